// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Meter tables and accent arithmetic.
//!
//! A [`Meter`] combines a note subdivision, a time signature, and the cycle
//! span into the quantities the scheduler needs: notes per measure, seconds
//! per note, and the accent tier of each beat position.

/// Note subdivision: how many notes subdivide one beat.
///
/// Fractional values are real; a whole note covers four beats, and the
/// triplet subdivisions put 3 or 6 notes inside a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subdivision {
    WholeNote,
    HalfNote,
    QuarterNote,
    EighthNote,
    Triplet,
    SixteenthNote,
    Sextuplet,
}

impl Subdivision {
    /// All subdivisions in cycling order, coarse to fine
    pub const ALL: [Subdivision; 7] = [
        Subdivision::WholeNote,
        Subdivision::HalfNote,
        Subdivision::QuarterNote,
        Subdivision::EighthNote,
        Subdivision::Triplet,
        Subdivision::SixteenthNote,
        Subdivision::Sextuplet,
    ];

    /// Notes per beat
    pub fn notes_per_beat(self) -> f64 {
        match self {
            Subdivision::WholeNote => 0.25,
            Subdivision::HalfNote => 0.5,
            Subdivision::QuarterNote => 1.0,
            Subdivision::EighthNote => 2.0,
            Subdivision::Triplet => 3.0,
            Subdivision::SixteenthNote => 4.0,
            Subdivision::Sextuplet => 6.0,
        }
    }

    /// Config-file name
    pub fn name(self) -> &'static str {
        match self {
            Subdivision::WholeNote => "whole",
            Subdivision::HalfNote => "half",
            Subdivision::QuarterNote => "quarter",
            Subdivision::EighthNote => "eighth",
            Subdivision::Triplet => "triplet",
            Subdivision::SixteenthNote => "sixteenth",
            Subdivision::Sextuplet => "sextuplet",
        }
    }

    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            Subdivision::WholeNote => "1/1",
            Subdivision::HalfNote => "1/2",
            Subdivision::QuarterNote => "1/4",
            Subdivision::EighthNote => "1/8",
            Subdivision::Triplet => "1/8T",
            Subdivision::SixteenthNote => "1/16",
            Subdivision::Sextuplet => "1/16T",
        }
    }

    /// Parse a config-file name
    pub fn from_name(name: &str) -> Option<Subdivision> {
        Subdivision::ALL.into_iter().find(|s| s.name() == name)
    }

    /// The next subdivision in cycling order, wrapping around
    pub fn next(self) -> Subdivision {
        let i = Subdivision::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Subdivision::ALL[(i + 1) % Subdivision::ALL.len()]
    }
}

/// Supported time signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSignature {
    FourFour,
    ThreeFour,
    TwoFour,
    SixEight,
}

impl TimeSignature {
    /// All signatures in cycling order
    pub const ALL: [TimeSignature; 4] = [
        TimeSignature::FourFour,
        TimeSignature::ThreeFour,
        TimeSignature::TwoFour,
        TimeSignature::SixEight,
    ];

    /// Time signature numerator
    pub fn beats_per_measure(self) -> u32 {
        match self {
            TimeSignature::FourFour => 4,
            TimeSignature::ThreeFour => 3,
            TimeSignature::TwoFour => 2,
            TimeSignature::SixEight => 6,
        }
    }

    /// Time signature denominator
    pub fn beat_unit(self) -> u32 {
        match self {
            TimeSignature::SixEight => 8,
            _ => 4,
        }
    }

    /// Compound meters group beats in threes and accent at mid-measure
    pub fn is_compound(self) -> bool {
        matches!(self, TimeSignature::SixEight)
    }

    /// Display label, also the config-file form
    pub fn label(self) -> &'static str {
        match self {
            TimeSignature::FourFour => "4/4",
            TimeSignature::ThreeFour => "3/4",
            TimeSignature::TwoFour => "2/4",
            TimeSignature::SixEight => "6/8",
        }
    }

    /// Parse a label like "4/4"
    pub fn from_label(label: &str) -> Option<TimeSignature> {
        TimeSignature::ALL.into_iter().find(|s| s.label() == label)
    }

    /// The next signature in cycling order, wrapping around
    pub fn next(self) -> TimeSignature {
        let i = TimeSignature::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or(0);
        TimeSignature::ALL[(i + 1) % TimeSignature::ALL.len()]
    }
}

/// Loudness/pitch tier of a single click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// First note of a measure
    Downbeat,
    /// On-beat note within the measure
    Strong,
    /// Everything else
    Weak,
}

impl Accent {
    /// Click tone frequency in Hz
    pub fn frequency(self) -> f32 {
        match self {
            Accent::Downbeat => 880.0,
            Accent::Strong => 440.0,
            Accent::Weak => 352.0,
        }
    }

    /// Click gain relative to master volume
    pub fn gain(self) -> f32 {
        match self {
            Accent::Downbeat => 1.0,
            Accent::Strong => 0.8,
            Accent::Weak => 0.5,
        }
    }
}

/// When the click is audible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Click on every scheduled note
    EveryNote,
    /// Click only on quarter-note-equivalent boundaries
    QuarterOnly,
}

impl ClickPolicy {
    /// Config-file name
    pub fn name(self) -> &'static str {
        match self {
            ClickPolicy::EveryNote => "every-note",
            ClickPolicy::QuarterOnly => "quarter-only",
        }
    }

    /// Parse a config-file name
    pub fn from_name(name: &str) -> Option<ClickPolicy> {
        match name {
            "every-note" => Some(ClickPolicy::EveryNote),
            "quarter-only" => Some(ClickPolicy::QuarterOnly),
            _ => None,
        }
    }

    /// The other policy
    pub fn toggled(self) -> ClickPolicy {
        match self {
            ClickPolicy::EveryNote => ClickPolicy::QuarterOnly,
            ClickPolicy::QuarterOnly => ClickPolicy::EveryNote,
        }
    }
}

/// The scheduler's view of the current meter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meter {
    pub subdivision: Subdivision,
    pub signature: TimeSignature,
    /// Two-measure cycle span when true, single measure otherwise
    pub two_measure: bool,
}

impl Default for Meter {
    fn default() -> Self {
        Self {
            subdivision: Subdivision::SixteenthNote,
            signature: TimeSignature::FourFour,
            two_measure: true,
        }
    }
}

impl Meter {
    /// Discrete notes in one measure
    pub fn notes_per_measure(&self) -> u32 {
        (self.subdivision.notes_per_beat() * self.signature.beats_per_measure() as f64).floor()
            as u32
    }

    /// Notes in one full cycle (one or two measures)
    pub fn total_notes(&self) -> u32 {
        self.notes_per_measure() * if self.two_measure { 2 } else { 1 }
    }

    /// Wall-clock seconds between consecutive notes at `bpm`
    pub fn seconds_per_note(&self, bpm: f64) -> f64 {
        (60.0 / bpm) / self.subdivision.notes_per_beat()
    }

    /// Position of a cycle beat index within its measure
    pub fn position_in_measure(&self, beat: u32) -> u32 {
        beat % self.notes_per_measure().max(1)
    }

    /// Accent tier for a cycle beat index.
    ///
    /// The first note of either measure is a downbeat. Compound signatures
    /// take a strong beat at mid-measure only; simple signatures take one
    /// wherever the position is a whole multiple of notes-per-beat. The
    /// float remainder is deliberate: for triplet subdivisions it marks
    /// every third note, which is the historical behavior of this check.
    pub fn accent(&self, beat: u32) -> Accent {
        let npm = self.notes_per_measure().max(1);
        let position = beat % npm;
        if position == 0 {
            return Accent::Downbeat;
        }

        let strong = if self.signature.is_compound() {
            position == npm / 2
        } else {
            (position as f64) % self.subdivision.notes_per_beat() == 0.0
        };
        if strong {
            Accent::Strong
        } else {
            Accent::Weak
        }
    }

    /// Whether the click sounds for this beat under the policy.
    ///
    /// The beat callback fires either way; this only silences the tone.
    pub fn click_audible(&self, beat: u32, policy: ClickPolicy) -> bool {
        match policy {
            ClickPolicy::EveryNote => true,
            ClickPolicy::QuarterOnly => {
                let position = self.position_in_measure(beat);
                (position as f64) % self.subdivision.notes_per_beat() == 0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter(subdivision: Subdivision, signature: TimeSignature, two_measure: bool) -> Meter {
        Meter {
            subdivision,
            signature,
            two_measure,
        }
    }

    #[test]
    fn test_subdivision_tables() {
        assert_eq!(Subdivision::ALL.len(), 7);
        assert_eq!(Subdivision::QuarterNote.notes_per_beat(), 1.0);
        assert_eq!(Subdivision::Triplet.notes_per_beat(), 3.0);
        assert_eq!(Subdivision::Sextuplet.notes_per_beat(), 6.0);
        assert_eq!(Subdivision::from_name("sixteenth"), Some(Subdivision::SixteenthNote));
        assert_eq!(Subdivision::from_name("nope"), None);
    }

    #[test]
    fn test_subdivision_cycling_wraps() {
        let mut s = Subdivision::WholeNote;
        for _ in 0..Subdivision::ALL.len() {
            s = s.next();
        }
        assert_eq!(s, Subdivision::WholeNote);
    }

    #[test]
    fn test_signature_tables() {
        assert_eq!(TimeSignature::ALL.len(), 4);
        assert_eq!(TimeSignature::FourFour.beats_per_measure(), 4);
        assert_eq!(TimeSignature::SixEight.beats_per_measure(), 6);
        assert_eq!(TimeSignature::SixEight.beat_unit(), 8);
        assert!(TimeSignature::SixEight.is_compound());
        assert!(!TimeSignature::ThreeFour.is_compound());
        assert_eq!(TimeSignature::from_label("6/8"), Some(TimeSignature::SixEight));
        assert_eq!(TimeSignature::from_label("7/8"), None);
    }

    #[test]
    fn test_notes_per_measure() {
        assert_eq!(
            meter(Subdivision::SixteenthNote, TimeSignature::FourFour, false).notes_per_measure(),
            16
        );
        assert_eq!(
            meter(Subdivision::Triplet, TimeSignature::ThreeFour, false).notes_per_measure(),
            9
        );
        // Fractional products floor: half a note per measure rounds to zero
        assert_eq!(
            meter(Subdivision::WholeNote, TimeSignature::TwoFour, false).notes_per_measure(),
            0
        );
    }

    #[test]
    fn test_total_notes_spans_two_measures() {
        let m = meter(Subdivision::EighthNote, TimeSignature::FourFour, true);
        assert_eq!(m.notes_per_measure(), 8);
        assert_eq!(m.total_notes(), 16);
    }

    #[test]
    fn test_seconds_per_note() {
        let m = meter(Subdivision::QuarterNote, TimeSignature::FourFour, false);
        assert_eq!(m.seconds_per_note(120.0), 0.5);

        let m = meter(Subdivision::EighthNote, TimeSignature::FourFour, false);
        assert_eq!(m.seconds_per_note(120.0), 0.25);
    }

    #[test]
    fn test_downbeats() {
        let m = meter(Subdivision::EighthNote, TimeSignature::FourFour, true);
        assert_eq!(m.accent(0), Accent::Downbeat);
        // First note of the second measure is a downbeat too
        assert_eq!(m.accent(8), Accent::Downbeat);
        assert_eq!(m.accent(1), Accent::Weak);
    }

    #[test]
    fn test_simple_meter_strong_beats() {
        let m = meter(Subdivision::EighthNote, TimeSignature::FourFour, false);
        // Every other eighth lands on a beat
        assert_eq!(m.accent(2), Accent::Strong);
        assert_eq!(m.accent(4), Accent::Strong);
        assert_eq!(m.accent(3), Accent::Weak);
    }

    #[test]
    fn test_compound_meter_strong_beats() {
        let m = meter(Subdivision::EighthNote, TimeSignature::SixEight, false);
        assert_eq!(m.notes_per_measure(), 12);
        assert_eq!(m.accent(0), Accent::Downbeat);
        // Mid-measure only
        assert_eq!(m.accent(6), Accent::Strong);
        assert_eq!(m.accent(2), Accent::Weak);
        assert_eq!(m.accent(4), Accent::Weak);
    }

    #[test]
    fn test_sub_beat_subdivisions_accent_everywhere() {
        // At half-note subdivision every position is a multiple of 0.5
        let m = meter(Subdivision::HalfNote, TimeSignature::FourFour, false);
        assert_eq!(m.notes_per_measure(), 2);
        assert_eq!(m.accent(1), Accent::Strong);
    }

    #[test]
    fn test_quarter_only_click_policy() {
        let m = meter(Subdivision::EighthNote, TimeSignature::FourFour, false);
        // Audible only on even positions within the measure
        for beat in 0..8 {
            assert_eq!(
                m.click_audible(beat, ClickPolicy::QuarterOnly),
                beat % 2 == 0,
                "beat {}",
                beat
            );
            assert!(m.click_audible(beat, ClickPolicy::EveryNote));
        }
    }

    #[test]
    fn test_quarter_only_policy_with_triplets() {
        // The literal remainder check marks every third triplet note
        let m = meter(Subdivision::Triplet, TimeSignature::FourFour, false);
        assert!(m.click_audible(0, ClickPolicy::QuarterOnly));
        assert!(!m.click_audible(1, ClickPolicy::QuarterOnly));
        assert!(!m.click_audible(2, ClickPolicy::QuarterOnly));
        assert!(m.click_audible(3, ClickPolicy::QuarterOnly));
    }

    #[test]
    fn test_accent_tone_tiers() {
        assert!(Accent::Downbeat.frequency() > Accent::Strong.frequency());
        assert!(Accent::Weak.frequency() < Accent::Strong.frequency());
        assert_eq!(Accent::Downbeat.gain(), 1.0);
        assert_eq!(Accent::Strong.gain(), 0.8);
        assert_eq!(Accent::Weak.gain(), 0.5);
    }

    #[test]
    fn test_degenerate_meter_does_not_divide_by_zero() {
        let m = meter(Subdivision::WholeNote, TimeSignature::TwoFour, true);
        assert_eq!(m.total_notes(), 0);
        // Accent lookup still answers deterministically
        assert_eq!(m.accent(0), Accent::Downbeat);
        assert_eq!(m.position_in_measure(5), 0);
    }
}
