// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control system for keyboard input.
//!
//! Maps key events to the actions the practice app understands.

pub mod keyboard;

pub use keyboard::{KeyBinding, KeyboardController, Shortcut};

/// Action that can be triggered by controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// No action
    None,

    // Transport
    /// Toggle play/stop
    TogglePlay,
    /// Stop playback
    Stop,

    // Tempo
    /// Adjust tempo by delta
    AdjustTempo(f64),

    // Meter
    /// Cycle to the next note subdivision
    CycleSubdivision,
    /// Cycle to the next time signature
    CycleSignature,
    /// Toggle one- vs two-measure cycles
    ToggleTwoMeasure,
    /// Toggle the click policy
    ToggleClickPolicy,
    /// Adjust master volume by delta
    AdjustVolume(f32),

    // Sequencing
    /// Adjust repeats per pattern by delta
    AdjustRepeats(i32),
    /// Toggle sequential/random advance
    ToggleAdvanceMode,
    /// Step to the next pattern by hand
    NextPattern,
    /// Step to the previous pattern by hand
    PrevPattern,
    /// Jump to a random pattern
    RandomPattern,

    // UI
    /// Toggle help display
    ToggleHelp,
    /// Quit application
    Quit,
}

impl ControlAction {
    /// Check if this is a transport action
    pub fn is_transport(&self) -> bool {
        matches!(self, ControlAction::TogglePlay | ControlAction::Stop)
    }

    /// Check if this action changes the pattern sequence
    pub fn is_sequencing(&self) -> bool {
        matches!(
            self,
            ControlAction::AdjustRepeats(_)
                | ControlAction::ToggleAdvanceMode
                | ControlAction::NextPattern
                | ControlAction::PrevPattern
                | ControlAction::RandomPattern
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_action_categories() {
        assert!(ControlAction::TogglePlay.is_transport());
        assert!(ControlAction::Stop.is_transport());
        assert!(!ControlAction::NextPattern.is_transport());

        assert!(ControlAction::NextPattern.is_sequencing());
        assert!(ControlAction::ToggleAdvanceMode.is_sequencing());
        assert!(!ControlAction::Quit.is_sequencing());
    }
}
