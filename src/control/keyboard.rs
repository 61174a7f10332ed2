// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard shortcut handling.
//!
//! Provides the default key bindings for transport, meter, and pattern
//! navigation, plus the lookup used by the app's event loop.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::ControlAction;

/// A keyboard shortcut definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a shortcut with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Create a shortcut with Shift modifier
    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// A keyboard binding (shortcut to action)
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// The shortcut
    pub shortcut: Shortcut,
    /// The action to perform
    pub action: ControlAction,
    /// Description for help display
    pub description: String,
}

impl KeyBinding {
    /// Create a new key binding
    pub fn new(shortcut: Shortcut, action: ControlAction, description: impl Into<String>) -> Self {
        Self {
            shortcut,
            action,
            description: description.into(),
        }
    }
}

/// Keyboard controller with the app's bindings
pub struct KeyboardController {
    bindings: HashMap<Shortcut, KeyBinding>,
    /// Binding order for the help display
    order: Vec<Shortcut>,
}

impl KeyboardController {
    /// Create an empty keyboard controller
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a keyboard controller with default bindings
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.add_default_bindings();
        controller
    }

    fn add_default_bindings(&mut self) {
        // Transport
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char(' ')),
            ControlAction::TogglePlay,
            "Play/Stop",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Esc),
            ControlAction::Stop,
            "Stop",
        ));

        // Tempo
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Up),
            ControlAction::AdjustTempo(1.0),
            "Tempo +1 BPM",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Down),
            ControlAction::AdjustTempo(-1.0),
            "Tempo -1 BPM",
        ));
        self.add(KeyBinding::new(
            Shortcut::shift(KeyCode::Up),
            ControlAction::AdjustTempo(10.0),
            "Tempo +10 BPM",
        ));
        self.add(KeyBinding::new(
            Shortcut::shift(KeyCode::Down),
            ControlAction::AdjustTempo(-10.0),
            "Tempo -10 BPM",
        ));

        // Meter
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('s')),
            ControlAction::CycleSubdivision,
            "Next subdivision",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('t')),
            ControlAction::CycleSignature,
            "Next time signature",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('2')),
            ControlAction::ToggleTwoMeasure,
            "One/two measure cycle",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('c')),
            ControlAction::ToggleClickPolicy,
            "Click policy",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('+')),
            ControlAction::AdjustVolume(0.1),
            "Volume up",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('-')),
            ControlAction::AdjustVolume(-0.1),
            "Volume down",
        ));

        // Sequencing
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Right),
            ControlAction::NextPattern,
            "Next pattern",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Left),
            ControlAction::PrevPattern,
            "Previous pattern",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('x')),
            ControlAction::RandomPattern,
            "Random pattern",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('m')),
            ControlAction::ToggleAdvanceMode,
            "Sequential/random advance",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char(']')),
            ControlAction::AdjustRepeats(1),
            "More repeats",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('[')),
            ControlAction::AdjustRepeats(-1),
            "Fewer repeats",
        ));

        // UI
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('h')),
            ControlAction::ToggleHelp,
            "Help",
        ));
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('q')),
            ControlAction::Quit,
            "Quit",
        ));
    }

    /// Register a binding, replacing any existing one for the shortcut
    pub fn add(&mut self, binding: KeyBinding) {
        if !self.bindings.contains_key(&binding.shortcut) {
            self.order.push(binding.shortcut);
        }
        self.bindings.insert(binding.shortcut, binding);
    }

    /// Look up the action for a key event
    pub fn process(&self, code: KeyCode, modifiers: KeyModifiers) -> ControlAction {
        self.bindings
            .get(&Shortcut::new(code, modifiers))
            .map(|binding| binding.action)
            .unwrap_or(ControlAction::None)
    }

    /// Bindings in registration order, for the help display
    pub fn bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.order.iter().filter_map(|s| self.bindings.get(s))
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::with_defaults()
    }
}
