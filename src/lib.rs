// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! STICKWORK - a practice-pattern metronome for drummers.
//!
//! Generates two-measure hand-sticking patterns, plays a click synchronized
//! to a moving beat display, and advances through the pattern space on a
//! configurable repeat schedule.
//!
//! Crate layout:
//! - `pattern`: index arithmetic mapping integers to sticking patterns
//! - `timing`: subdivision and time-signature tables, accent tiers
//! - `audio`: cpal output stream and click synthesis
//! - `engine`: the lookahead beat scheduler
//! - `session`: repeat counting and pattern advance policy
//! - `config`: practice settings loaded from YAML
//! - `control`: keyboard shortcut handling
//! - `ui`: terminal interface

pub mod audio;
pub mod config;
pub mod control;
pub mod engine;
pub mod pattern;
pub mod session;
pub mod timing;
pub mod ui;
