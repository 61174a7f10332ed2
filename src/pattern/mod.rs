// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sticking-pattern index arithmetic.
//!
//! Every sticking pattern of length N corresponds to exactly one integer in
//! `[0, 2^N)`: the binary representation of the id, MSB first, with 0 mapping
//! to a Right stroke and 1 to a Left stroke. Three two-measure variants per
//! base pattern give a combined index space of `2^N * 3`.
//!
//! All functions here are pure; patterns are derived values, never stored.

pub mod names;

pub use names::{display_name, variant_display_name, variant_suffix};

use rand::Rng;

/// Number of two-measure variants per base pattern
pub const VARIANT_COUNT: u64 = 3;

/// One hand stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stroke {
    Left,
    Right,
}

impl Stroke {
    /// The opposite hand
    pub fn flipped(self) -> Stroke {
        match self {
            Stroke::Left => Stroke::Right,
            Stroke::Right => Stroke::Left,
        }
    }

    /// Single-letter display form
    pub fn letter(self) -> char {
        match self {
            Stroke::Left => 'L',
            Stroke::Right => 'R',
        }
    }
}

/// A sticking pattern: an index paired with the stroke sequence it encodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    id: u64,
    sticking: Vec<Stroke>,
}

impl Pattern {
    /// The pattern's index within `[0, 2^length)`
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Number of strokes in one measure
    pub fn len(&self) -> usize {
        self.sticking.len()
    }

    /// True for the degenerate zero-length pattern
    pub fn is_empty(&self) -> bool {
        self.sticking.is_empty()
    }

    /// The stroke sequence
    pub fn sticking(&self) -> &[Stroke] {
        &self.sticking
    }

    /// Stroke at position `i`, if in range
    pub fn stroke(&self, i: usize) -> Option<Stroke> {
        self.sticking.get(i).copied()
    }

    /// The sticking as a string of R/L letters
    pub fn letters(&self) -> String {
        self.sticking.iter().map(|s| s.letter()).collect()
    }

    /// The L/R-mirrored pattern.
    ///
    /// Every stroke flips hands, so the id becomes `2^N - 1 - id`.
    /// Reversal is its own inverse.
    pub fn reversed(&self) -> Pattern {
        Pattern {
            id: bit_mask(self.sticking.len() as u32) - self.id,
            sticking: self.sticking.iter().map(|s| s.flipped()).collect(),
        }
    }
}

/// How a base pattern and its reversal combine into two measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The base pattern played in both measures
    PatternDoubled,
    /// The reversal played in both measures
    ReversalDoubled,
    /// Base pattern first, reversal second
    PatternThenReversal,
}

impl Variant {
    /// All variants in combined-index order
    pub const ALL: [Variant; 3] = [
        Variant::PatternDoubled,
        Variant::ReversalDoubled,
        Variant::PatternThenReversal,
    ];

    /// Position of this variant within a combined index
    pub fn index(self) -> u64 {
        match self {
            Variant::PatternDoubled => 0,
            Variant::ReversalDoubled => 1,
            Variant::PatternThenReversal => 2,
        }
    }

    /// Variant for a combined-index remainder
    pub fn from_index(i: u64) -> Variant {
        Variant::ALL[(i % VARIANT_COUNT) as usize]
    }
}

/// A pattern expanded over two measures by a variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoMeasurePattern {
    /// First measure
    pub first: Pattern,
    /// Second measure
    pub second: Pattern,
    /// Variant used to produce the pair
    pub variant: Variant,
}

impl TwoMeasurePattern {
    /// The measure covering `beat` when beats run across both measures
    pub fn measure_for(&self, beat: usize) -> &Pattern {
        if beat < self.first.len() {
            &self.first
        } else {
            &self.second
        }
    }
}

fn bit_mask(length: u32) -> u64 {
    if length == 0 {
        0
    } else if length >= 64 {
        u64::MAX
    } else {
        (1u64 << length) - 1
    }
}

/// Derive the pattern for an index.
///
/// Out-of-range indices are bit-masked to `length` bits, so the result is
/// deterministic for any input; callers wanting wraparound semantics should
/// go through [`normalize_index`] first.
pub fn pattern_at(index: u64, length: u32) -> Pattern {
    let id = index & bit_mask(length);
    let sticking = (0..length)
        .map(|i| {
            if (id >> (length - 1 - i)) & 1 == 1 {
                Stroke::Left
            } else {
                Stroke::Right
            }
        })
        .collect();
    Pattern { id, sticking }
}

/// Expand a base pattern into two measures per the variant
pub fn combine(pattern: &Pattern, variant: Variant) -> TwoMeasurePattern {
    let (first, second) = match variant {
        Variant::PatternDoubled => (pattern.clone(), pattern.clone()),
        Variant::ReversalDoubled => (pattern.reversed(), pattern.reversed()),
        Variant::PatternThenReversal => (pattern.clone(), pattern.reversed()),
    };
    TwoMeasurePattern {
        first,
        second,
        variant,
    }
}

/// Total number of combined indices for a pattern length.
///
/// Length 0 degenerates to 3: one empty sticking times three variants.
pub fn total_patterns(length: u32) -> u64 {
    (bit_mask(length) + 1) * VARIANT_COUNT
}

/// Wrap any index into `[0, total_patterns(length))`.
///
/// Floored modulo, so negative input lands in range rather than propagating.
pub fn normalize_index(index: i64, length: u32) -> u64 {
    index.rem_euclid(total_patterns(length) as i64) as u64
}

/// Build a combined index from a base index and variant
pub fn compose(base: u64, variant: Variant) -> u64 {
    base * VARIANT_COUNT + variant.index()
}

/// Split a combined index into its base index and variant
pub fn decompose(combined: u64) -> (u64, Variant) {
    (
        combined / VARIANT_COUNT,
        Variant::from_index(combined % VARIANT_COUNT),
    )
}

/// The two-measure pattern for a combined index
pub fn two_measure_at(combined: u64, length: u32) -> TwoMeasurePattern {
    let (base, variant) = decompose(normalize_index(combined as i64, length));
    combine(&pattern_at(base, length), variant)
}

/// A uniformly random combined index for the given length
pub fn random_index(length: u32) -> u64 {
    rand::thread_rng().gen_range(0..total_patterns(length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(sticking: &[Stroke]) -> u64 {
        sticking.iter().fold(0u64, |acc, s| {
            (acc << 1) | if *s == Stroke::Left { 1 } else { 0 }
        })
    }

    #[test]
    fn test_stroke_flip() {
        assert_eq!(Stroke::Left.flipped(), Stroke::Right);
        assert_eq!(Stroke::Right.flipped(), Stroke::Left);
        assert_eq!(Stroke::Left.letter(), 'L');
        assert_eq!(Stroke::Right.letter(), 'R');
    }

    #[test]
    fn test_pattern_bijection() {
        // Every index round-trips through its sticking, MSB first
        for length in 1..=12u32 {
            for index in 0..(1u64 << length) {
                let pattern = pattern_at(index, length);
                assert_eq!(pattern.len(), length as usize);
                assert_eq!(pattern.id(), index);
                assert_eq!(decode(pattern.sticking()), index);
            }
        }
    }

    #[test]
    fn test_pattern_encoding_msb_first() {
        // id 1 of length 4: 0001 -> R R R L
        let pattern = pattern_at(1, 4);
        assert_eq!(pattern.letters(), "RRRL");

        // id 8 of length 4: 1000 -> L R R R
        let pattern = pattern_at(8, 4);
        assert_eq!(pattern.letters(), "LRRR");
    }

    #[test]
    fn test_out_of_range_index_is_masked() {
        let pattern = pattern_at(0b1_0110, 4);
        assert_eq!(pattern.id(), 0b0110);
        assert_eq!(pattern.letters(), "RLLR");
    }

    #[test]
    fn test_reversal_involution() {
        for length in 1..=10u32 {
            for index in 0..(1u64 << length) {
                let pattern = pattern_at(index, length);
                let reversed = pattern.reversed();
                assert_eq!(reversed.id(), (1u64 << length) - 1 - index);
                assert_eq!(reversed.reversed(), pattern);
            }
        }
    }

    #[test]
    fn test_reversal_flips_every_stroke() {
        let pattern = pattern_at(0b10110100, 8);
        let reversed = pattern.reversed();
        for (a, b) in pattern.sticking().iter().zip(reversed.sticking()) {
            assert_eq!(a.flipped(), *b);
        }
    }

    #[test]
    fn test_combine_variants() {
        let pattern = pattern_at(0b1100, 4); // LLRR
        let reversed = pattern.reversed(); // RRLL

        let doubled = combine(&pattern, Variant::PatternDoubled);
        assert_eq!(doubled.first, pattern);
        assert_eq!(doubled.second, pattern);

        let rev_doubled = combine(&pattern, Variant::ReversalDoubled);
        assert_eq!(rev_doubled.first, reversed);
        assert_eq!(rev_doubled.second, reversed);

        let then_rev = combine(&pattern, Variant::PatternThenReversal);
        assert_eq!(then_rev.first, pattern);
        assert_eq!(then_rev.second, reversed);
    }

    #[test]
    fn test_total_patterns() {
        assert_eq!(total_patterns(0), 3);
        assert_eq!(total_patterns(1), 6);
        assert_eq!(total_patterns(4), 48);
        assert_eq!(total_patterns(8), 768);
    }

    #[test]
    fn test_normalize_index() {
        let total = total_patterns(4) as i64;

        assert_eq!(normalize_index(0, 4), 0);
        assert_eq!(normalize_index(total, 4), 0);
        assert_eq!(normalize_index(total + 5, 4), 5);
        assert_eq!(normalize_index(-1, 4), (total - 1) as u64);
        assert_eq!(normalize_index(-total, 4), 0);

        // Idempotent, including for negative input
        for x in [-1000i64, -1, 0, 7, total - 1, total, 10 * total + 3] {
            let once = normalize_index(x, 4);
            assert_eq!(normalize_index(once as i64, 4), once);
            assert!(once < total as u64);
        }
    }

    #[test]
    fn test_normalize_degenerate_length() {
        // Length 0 still has three variant slots; no division by zero
        assert_eq!(total_patterns(0), 3);
        assert_eq!(normalize_index(7, 0), 1);
        assert_eq!(normalize_index(-1, 0), 2);
        assert!(pattern_at(5, 0).is_empty());
    }

    #[test]
    fn test_compose_decompose_roundtrip() {
        for combined in 0..200u64 {
            let (base, variant) = decompose(combined);
            assert_eq!(compose(base, variant), combined);
        }

        assert_eq!(decompose(0), (0, Variant::PatternDoubled));
        assert_eq!(decompose(1), (0, Variant::ReversalDoubled));
        assert_eq!(decompose(2), (0, Variant::PatternThenReversal));
        assert_eq!(decompose(3), (1, Variant::PatternDoubled));
    }

    #[test]
    fn test_two_measure_at() {
        // Combined index 5 = base 1, variant 2 (pattern-then-reversal)
        let two = two_measure_at(5, 4);
        assert_eq!(two.variant, Variant::PatternThenReversal);
        assert_eq!(two.first.id(), 1);
        assert_eq!(two.second.id(), 14);
    }

    #[test]
    fn test_random_index_in_range() {
        for _ in 0..200 {
            assert!(random_index(4) < total_patterns(4));
        }
        for _ in 0..20 {
            assert!(random_index(0) < 3);
        }
    }
}
