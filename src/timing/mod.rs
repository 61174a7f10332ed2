// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing and meter module.
//!
//! This module provides the subdivision and time-signature tables and the
//! accent arithmetic the beat scheduler runs on.

pub mod meter;

pub use meter::{Accent, ClickPolicy, Meter, Subdivision, TimeSignature};
