// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Click tone synthesis.
//!
//! Each click is a short exponentially decaying sine burst. The mixer keeps
//! a queue of clicks scheduled at absolute stream times and renders them
//! sample-accurately inside the output callback.

use std::collections::VecDeque;
use std::f32::consts::TAU;

/// Amplitude time constant of a click burst in seconds
const CLICK_DECAY_SECS: f32 = 0.008;

/// Envelope level below which a voice is retired
const VOICE_FLOOR: f32 = 0.001;

/// A click scheduled at an absolute stream time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    /// Stream time in seconds at which the click starts
    pub at_secs: f64,
    /// Tone frequency in Hz
    pub frequency: f32,
    /// Gain relative to master volume (0.0 - 1.0)
    pub gain: f32,
}

/// A click waiting for its start frame
#[derive(Debug, Clone, Copy)]
struct PendingClick {
    start_frame: u64,
    frequency: f32,
    gain: f32,
}

/// One sounding click
#[derive(Debug)]
struct ClickVoice {
    phase: f32,
    phase_inc: f32,
    amp: f32,
    decay: f32,
    gain: f32,
}

impl ClickVoice {
    fn new(frequency: f32, gain: f32, sample_rate: u32) -> Self {
        Self {
            phase: 0.0,
            phase_inc: TAU * frequency / sample_rate as f32,
            amp: 1.0,
            decay: (-1.0 / (CLICK_DECAY_SECS * sample_rate as f32)).exp(),
            gain,
        }
    }

    fn next_sample(&mut self) -> f32 {
        let sample = self.phase.sin() * self.amp * self.gain;
        self.phase += self.phase_inc;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        self.amp *= self.decay;
        sample
    }

    fn finished(&self) -> bool {
        self.amp < VOICE_FLOOR
    }
}

/// Mixer rendering scheduled clicks into the output buffer.
///
/// Clicks must be scheduled in non-decreasing start time; the scheduler's
/// lookahead loop produces them that way.
#[derive(Debug)]
pub struct ClickMixer {
    sample_rate: u32,
    master_gain: f32,
    pending: VecDeque<PendingClick>,
    active: Vec<ClickVoice>,
}

impl ClickMixer {
    /// Create a mixer for the given sample rate
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            master_gain: 1.0,
            pending: VecDeque::new(),
            active: Vec::new(),
        }
    }

    /// Update the sample rate (when the device config is known)
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate.max(1);
    }

    /// Set master volume, clamped to [0, 1]
    pub fn set_master_gain(&mut self, gain: f32) {
        self.master_gain = gain.clamp(0.0, 1.0);
    }

    /// Current master volume
    pub fn master_gain(&self) -> f32 {
        self.master_gain
    }

    /// Queue a click for its computed start frame
    pub fn schedule(&mut self, click: Click) {
        self.pending.push_back(PendingClick {
            start_frame: (click.at_secs.max(0.0) * self.sample_rate as f64) as u64,
            frequency: click.frequency,
            gain: click.gain.clamp(0.0, 1.0),
        });
    }

    /// Drop all queued clicks; already sounding voices ring out
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Number of queued clicks
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Mix clicks into an interleaved buffer starting at `start_frame`.
    ///
    /// The buffer is expected to be cleared by the caller; samples are
    /// added, not overwritten.
    pub fn render(&mut self, buffer: &mut [f32], channels: usize, start_frame: u64) {
        let channels = channels.max(1);
        let frames = buffer.len() / channels;

        for i in 0..frames {
            let frame = start_frame + i as u64;

            while let Some(next) = self.pending.front() {
                if next.start_frame > frame {
                    break;
                }
                let next = *next;
                self.pending.pop_front();
                self.active
                    .push(ClickVoice::new(next.frequency, next.gain, self.sample_rate));
            }

            let mut sample = 0.0;
            for voice in &mut self.active {
                sample += voice.next_sample();
            }
            sample *= self.master_gain;

            for ch in 0..channels {
                buffer[i * channels + ch] += sample;
            }

            self.active.retain(|voice| !voice.finished());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44100;

    fn render_frames(mixer: &mut ClickMixer, frames: usize, start_frame: u64) -> Vec<f32> {
        let mut buffer = vec![0.0f32; frames * 2];
        mixer.render(&mut buffer, 2, start_frame);
        buffer
    }

    #[test]
    fn test_silence_without_clicks() {
        let mut mixer = ClickMixer::new(SAMPLE_RATE);
        let buffer = render_frames(&mut mixer, 256, 0);
        assert!(buffer.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_click_starts_at_scheduled_frame() {
        let mut mixer = ClickMixer::new(SAMPLE_RATE);
        mixer.schedule(Click {
            at_secs: 100.0 / SAMPLE_RATE as f64,
            frequency: 880.0,
            gain: 1.0,
        });

        let buffer = render_frames(&mut mixer, 256, 0);
        // Nothing before frame 100
        assert!(buffer[..100 * 2].iter().all(|s| *s == 0.0));
        // Sound afterwards
        assert!(buffer[100 * 2..].iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn test_late_click_still_sounds() {
        let mut mixer = ClickMixer::new(SAMPLE_RATE);
        mixer.schedule(Click {
            at_secs: 0.0,
            frequency: 440.0,
            gain: 1.0,
        });

        // Rendering starts past the scheduled frame
        let buffer = render_frames(&mut mixer, 128, 500);
        assert!(buffer.iter().any(|s| s.abs() > 0.01));
    }

    #[test]
    fn test_click_decays_to_silence() {
        let mut mixer = ClickMixer::new(SAMPLE_RATE);
        mixer.schedule(Click {
            at_secs: 0.0,
            frequency: 880.0,
            gain: 1.0,
        });

        // A second of audio is far longer than the click burst
        render_frames(&mut mixer, SAMPLE_RATE as usize, 0);
        let tail = render_frames(&mut mixer, 256, SAMPLE_RATE as u64);
        assert!(tail.iter().all(|s| *s == 0.0));
        assert_eq!(mixer.pending_len(), 0);
    }

    #[test]
    fn test_master_gain_scales_output() {
        let mut loud = ClickMixer::new(SAMPLE_RATE);
        let mut quiet = ClickMixer::new(SAMPLE_RATE);
        quiet.set_master_gain(0.5);

        let click = Click {
            at_secs: 0.0,
            frequency: 440.0,
            gain: 1.0,
        };
        loud.schedule(click);
        quiet.schedule(click);

        let loud_buf = render_frames(&mut loud, 64, 0);
        let quiet_buf = render_frames(&mut quiet, 64, 0);
        for (l, q) in loud_buf.iter().zip(&quiet_buf) {
            assert!((q - l * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_gain_clamping() {
        let mut mixer = ClickMixer::new(SAMPLE_RATE);
        mixer.set_master_gain(1.5);
        assert_eq!(mixer.master_gain(), 1.0);
        mixer.set_master_gain(-0.5);
        assert_eq!(mixer.master_gain(), 0.0);
    }

    #[test]
    fn test_clear_pending_keeps_active_voices() {
        let mut mixer = ClickMixer::new(SAMPLE_RATE);
        mixer.schedule(Click {
            at_secs: 0.0,
            frequency: 440.0,
            gain: 1.0,
        });
        mixer.schedule(Click {
            at_secs: 1.0,
            frequency: 440.0,
            gain: 1.0,
        });

        // Activate the first click, then drop the queued one
        render_frames(&mut mixer, 16, 0);
        mixer.clear_pending();
        assert_eq!(mixer.pending_len(), 0);

        // The first click keeps ringing
        let buffer = render_frames(&mut mixer, 16, 16);
        assert!(buffer.iter().any(|s| s.abs() > 0.0));
    }
}
