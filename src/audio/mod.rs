// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio engine for the STICKWORK metronome.
//!
//! This module provides:
//! - Click tone synthesis mixed in the stream callback
//! - Audio output via cpal
//! - A sample-counting clock the scheduler reads timestamps from

pub mod click;
pub mod output;

pub use click::{Click, ClickMixer};
pub use output::{AudioConfig, AudioOutput};

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::debug;

/// Audio error types
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    /// No audio device available
    #[error("no audio output device available")]
    NoDevice,
    /// Failed to initialize audio
    #[error("audio initialization failed: {0}")]
    InitFailed(String),
    /// Failed to start or control the audio stream
    #[error("audio stream failed: {0}")]
    StreamFailed(String),
}

/// Monotonic clock counting frames rendered by the output stream.
///
/// This is the timebase all click timestamps are computed against; the
/// polling timer never touches it.
#[derive(Debug)]
pub struct SampleClock {
    frames: AtomicU64,
    sample_rate: AtomicU32,
}

impl SampleClock {
    /// Create a clock at the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate: AtomicU32::new(sample_rate),
        }
    }

    /// Update the sample rate (when the device config is known)
    pub fn set_sample_rate(&self, sample_rate: u32) {
        self.sample_rate.store(sample_rate.max(1), Ordering::Relaxed);
    }

    /// Current sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Relaxed)
    }

    /// Total frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Advance by rendered frames (called from the stream callback)
    pub fn advance(&self, frames: u64) {
        self.frames.fetch_add(frames, Ordering::AcqRel);
    }

    /// Stream time in seconds
    pub fn now_secs(&self) -> f64 {
        self.frames() as f64 / self.sample_rate() as f64
    }
}

/// Click playback: mixer, output stream, and clock in one place
pub struct ClickOutput {
    /// Shared click mixer, rendered by the stream callback
    mixer: Arc<Mutex<ClickMixer>>,
    /// Stream timebase
    clock: Arc<SampleClock>,
    /// Audio output, present while open
    output: Option<AudioOutput>,
}

impl ClickOutput {
    /// Create a click output; no device is touched until `open`
    pub fn new() -> Self {
        let config = AudioConfig::default();
        Self {
            mixer: Arc::new(Mutex::new(ClickMixer::new(config.sample_rate))),
            clock: Arc::new(SampleClock::new(config.sample_rate)),
            output: None,
        }
    }

    /// Open the output stream. Idempotent while already open.
    pub fn open(&mut self) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }

        let config = AudioConfig::default();
        self.clock.set_sample_rate(config.sample_rate);
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.set_sample_rate(config.sample_rate);
        }

        let mixer = Arc::clone(&self.mixer);
        let clock = Arc::clone(&self.clock);
        let output = AudioOutput::new(config, move |buffer, channels| {
            let frames = (buffer.len() / channels.max(1)) as u64;
            let start_frame = clock.frames();
            if let Ok(mut mixer) = mixer.lock() {
                mixer.render(buffer, channels, start_frame);
            }
            clock.advance(frames);
        })?;

        debug!(
            sample_rate = output.sample_rate(),
            latency_ms = output.latency_ms(),
            "audio output opened"
        );
        self.output = Some(output);
        Ok(())
    }

    /// Release the output stream and discard pending clicks
    pub fn close(&mut self) {
        self.clear_pending();
        self.output = None;
    }

    /// Check if the stream is open
    pub fn is_open(&self) -> bool {
        self.output.is_some()
    }

    /// Resume a suspended stream
    pub fn resume(&self) -> Result<(), AudioError> {
        match &self.output {
            Some(output) => output.resume(),
            None => Err(AudioError::NoDevice),
        }
    }

    /// Suspend the stream; errors here are ignorable on teardown paths
    pub fn suspend(&self) {
        if let Some(output) = &self.output {
            let _ = output.suspend();
        }
    }

    /// Stream time in seconds
    pub fn now_secs(&self) -> f64 {
        self.clock.now_secs()
    }

    /// Shared clock handle for the scheduler thread
    pub fn clock(&self) -> Arc<SampleClock> {
        Arc::clone(&self.clock)
    }

    /// Shared mixer handle for the scheduler thread
    pub fn mixer(&self) -> Arc<Mutex<ClickMixer>> {
        Arc::clone(&self.mixer)
    }

    /// Queue a click at an absolute stream time
    pub fn schedule(&self, click: Click) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.schedule(click);
        }
    }

    /// Drop clicks that have not started sounding yet
    pub fn clear_pending(&self) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.clear_pending();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&self, volume: f32) {
        if let Ok(mut mixer) = self.mixer.lock() {
            mixer.set_master_gain(volume);
        }
    }
}

impl Default for ClickOutput {
    fn default() -> Self {
        Self::new()
    }
}
