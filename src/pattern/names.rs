// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Human-readable pattern names.
//!
//! Length-8 stickings are matched against a fixed table of standard drum
//! rudiments. Anything else falls back to repeating-unit detection and
//! finally to a numbered name.

use super::{Pattern, Variant};

/// Named rudiments, keyed by the exact length-8 stroke string
const RUDIMENTS: &[(&str, &str)] = &[
    ("RLRLRLRL", "Single Stroke Roll"),
    ("LRLRLRLR", "Single Stroke Roll"),
    ("RRLLRRLL", "Double Stroke Roll"),
    ("LLRRLLRR", "Double Stroke Roll"),
    ("RLRRLRLL", "Single Paradiddle"),
    ("LRLLRLRR", "Single Paradiddle"),
    ("RLLRLRRL", "Inverted Paradiddle"),
    ("LRRLRLLR", "Inverted Paradiddle"),
];

/// The display name of a base pattern.
///
/// Lookup order: the rudiment table (length-8 patterns only), then a
/// repeating 2- or 4-stroke unit ("RL Pattern"), then a 1-indexed number.
pub fn display_name(pattern: &Pattern) -> String {
    let letters = pattern.letters();

    if pattern.len() == 8 {
        if let Some((_, name)) = RUDIMENTS.iter().find(|(key, _)| *key == letters) {
            return (*name).to_string();
        }
    }

    for unit in [2usize, 4] {
        if let Some(head) = repeating_unit(&letters, unit) {
            return format!("{} Pattern", head);
        }
    }

    format!("Pattern #{}", pattern.id() + 1)
}

/// Fixed display suffix for each two-measure variant
pub fn variant_suffix(variant: Variant) -> &'static str {
    match variant {
        Variant::PatternDoubled => "",
        Variant::ReversalDoubled => " (Reversed)",
        Variant::PatternThenReversal => " + Reversal",
    }
}

/// Base pattern name with the variant suffix appended
pub fn variant_display_name(pattern: &Pattern, variant: Variant) -> String {
    format!("{}{}", display_name(pattern), variant_suffix(variant))
}

/// The leading `unit` strokes if the whole sticking is that unit repeated
fn repeating_unit(letters: &str, unit: usize) -> Option<&str> {
    if letters.len() <= unit || letters.len() % unit != 0 {
        return None;
    }
    let head = &letters.as_bytes()[..unit];
    if letters.as_bytes().chunks(unit).all(|chunk| chunk == head) {
        Some(&letters[..unit])
    } else {
        None
    }
}
