// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Practice session sequencing.
//!
//! The [`PracticeSession`] consumes the engine's beat and cycle-complete
//! callbacks: it tracks the highlighted beat, counts repeats of the current
//! two-measure pattern, and advances the combined pattern index when the
//! repeat schedule says so - sequentially or at random, always with the
//! next pattern pre-computed for preview.

use tracing::debug;

use crate::pattern::{
    normalize_index, random_index, two_measure_at, variant_display_name, TwoMeasurePattern,
};

/// Repeat count limits, clamped at the setter boundary
pub const MIN_REPEATS: u32 = 1;
pub const MAX_REPEATS: u32 = 99;

/// How the next pattern index is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceMode {
    /// Step through the combined index space in order
    Sequential,
    /// Draw a uniformly random combined index
    Random,
}

impl AdvanceMode {
    /// Config-file name
    pub fn name(self) -> &'static str {
        match self {
            AdvanceMode::Sequential => "sequential",
            AdvanceMode::Random => "random",
        }
    }

    /// Parse a config-file name
    pub fn from_name(name: &str) -> Option<AdvanceMode> {
        match name {
            "sequential" => Some(AdvanceMode::Sequential),
            "random" => Some(AdvanceMode::Random),
            _ => None,
        }
    }

    /// The other mode
    pub fn toggled(self) -> AdvanceMode {
        match self {
            AdvanceMode::Sequential => AdvanceMode::Random,
            AdvanceMode::Random => AdvanceMode::Sequential,
        }
    }
}

/// Sequencing state for a practice run
#[derive(Debug)]
pub struct PracticeSession {
    /// Strokes per measure; defines the combined index space
    pattern_length: u32,
    /// Active combined pattern index
    current: u64,
    /// Pre-computed upcoming index, shown as a preview
    next: u64,
    /// Configured repeats per pattern
    repeats: u32,
    /// Repeat currently playing, 1-based
    repeat_number: u32,
    mode: AdvanceMode,
    /// Target of the last applied cycle-complete transition, kept until the
    /// next beat lands; duplicate completion signals proposing it are dropped
    last_applied: Option<u64>,
    /// Beat highlighted in the display, if playback has reported one
    highlight: Option<u32>,
}

impl PracticeSession {
    /// Create a session over patterns of the given measure length
    pub fn new(pattern_length: u32) -> Self {
        let current = 0;
        let mut session = Self {
            pattern_length,
            current,
            next: 0,
            repeats: 4,
            repeat_number: 1,
            mode: AdvanceMode::Sequential,
            last_applied: None,
            highlight: None,
        };
        session.next = session.advance_from(current);
        session
    }

    /// Strokes per measure
    pub fn pattern_length(&self) -> u32 {
        self.pattern_length
    }

    /// Re-derive the index space for a new measure length.
    ///
    /// The current index is re-normalized rather than reset so a subdivision
    /// change mid-session keeps the position stable where possible.
    pub fn set_pattern_length(&mut self, pattern_length: u32) {
        if pattern_length == self.pattern_length {
            return;
        }
        self.pattern_length = pattern_length;
        self.current = normalize_index(self.current as i64, pattern_length);
        self.next = self.advance_from(self.current);
        self.last_applied = None;
    }

    /// Set repeats per pattern, clamped to [1, 99]
    pub fn set_repeats(&mut self, repeats: u32) {
        self.repeats = repeats.clamp(MIN_REPEATS, MAX_REPEATS);
        self.repeat_number = self.repeat_number.min(self.repeats);
    }

    /// Configured repeats per pattern
    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    /// Repeat currently playing, 1-based
    pub fn repeat_number(&self) -> u32 {
        self.repeat_number
    }

    /// Set the advance mode and recompute the preview accordingly
    pub fn set_mode(&mut self, mode: AdvanceMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.next = self.advance_from(self.current);
    }

    /// Current advance mode
    pub fn mode(&self) -> AdvanceMode {
        self.mode
    }

    /// Active combined index
    pub fn current_index(&self) -> u64 {
        self.current
    }

    /// Upcoming combined index
    pub fn next_index(&self) -> u64 {
        self.next
    }

    /// Beat highlighted in the display
    pub fn highlight(&self) -> Option<u32> {
        self.highlight
    }

    /// The active two-measure pattern
    pub fn current_pattern(&self) -> TwoMeasurePattern {
        two_measure_at(self.current, self.pattern_length)
    }

    /// The upcoming two-measure pattern
    pub fn next_pattern(&self) -> TwoMeasurePattern {
        two_measure_at(self.next, self.pattern_length)
    }

    /// Display name of the active pattern, variant suffix included
    pub fn current_name(&self) -> String {
        let two = self.current_pattern();
        variant_display_name(&two.first, two.variant)
    }

    /// Display name of the upcoming pattern
    pub fn next_name(&self) -> String {
        let two = self.next_pattern();
        variant_display_name(&two.first, two.variant)
    }

    /// Beat callback: remember the highlight position.
    ///
    /// Duplicates of a completion signal can only arrive before the next
    /// beat lands, so the transition guard expires here.
    pub fn on_beat(&mut self, beat: u32) {
        self.highlight = Some(beat);
        self.last_applied = None;
    }

    /// Playback stopped: clear the highlight and restart the repeat count
    pub fn on_stopped(&mut self) {
        self.highlight = None;
        self.repeat_number = 1;
        self.last_applied = None;
    }

    /// Cycle-complete callback: count the finished repeat and advance the
    /// pattern when the schedule is exhausted.
    ///
    /// A duplicate completion signal proposing the same target index as the
    /// last applied transition is ignored.
    pub fn on_cycle_complete(&mut self) {
        if self.repeat_number < self.repeats {
            self.repeat_number += 1;
            return;
        }

        let target = self.next;
        if self.last_applied == Some(target) {
            debug!(index = target, "duplicate cycle completion ignored");
            return;
        }

        self.last_applied = Some(target);
        self.current = target;
        self.next = self.advance_from(target);
        self.repeat_number = 1;
        debug!(index = self.current, "advanced to next pattern");
    }

    /// Jump directly to a combined index (manual navigation)
    pub fn select(&mut self, index: i64) {
        self.current = normalize_index(index, self.pattern_length);
        self.next = self.advance_from(self.current);
        self.repeat_number = 1;
        self.last_applied = None;
    }

    /// Step the active pattern forward or back by hand
    pub fn step(&mut self, delta: i64) {
        self.select(self.current as i64 + delta);
    }

    /// Jump to a random pattern
    pub fn shuffle(&mut self) {
        self.select(random_index(self.pattern_length) as i64);
    }

    fn advance_from(&self, index: u64) -> u64 {
        match self.mode {
            AdvanceMode::Sequential => normalize_index(index as i64 + 1, self.pattern_length),
            AdvanceMode::Random => random_index(self.pattern_length),
        }
    }
}
