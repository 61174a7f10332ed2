// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Beat scheduling engine.
//!
//! The [`Metronome`] owns all playback state: a polling worker thread fills
//! a short lookahead window against the audio clock, queueing sample-accurate
//! clicks and wall-clock visual callbacks. Configuration setters may be
//! called at any time and take effect on the next scheduling pass.

pub mod lookahead;

pub use lookahead::{LookaheadScheduler, NoteEvent, VisualQueue};

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::audio::{Click, ClickMixer, ClickOutput, SampleClock};
use crate::timing::{ClickPolicy, Meter, Subdivision, TimeSignature};

/// Polling period of the scheduling loop
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Forward scheduling horizon in seconds
const LOOKAHEAD_SECS: f64 = 0.1;

/// BPM limits, clamped at the setter boundary
pub const MIN_BPM: f64 = 20.0;
pub const MAX_BPM: f64 = 300.0;

/// Callbacks the engine drives while running
#[derive(Default)]
pub struct Callbacks {
    /// Fired once per note, in cycle order
    pub on_beat: Option<Box<dyn Fn(u32) + Send>>,
    /// Fired once per cycle, right after the last note's beat callback
    pub on_cycle_complete: Option<Box<dyn Fn() + Send>>,
}

/// Engine configuration, mutable at any time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub bpm: f64,
    pub meter: Meter,
    pub click_policy: ClickPolicy,
    pub volume: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            meter: Meter::default(),
            click_policy: ClickPolicy::EveryNote,
            volume: 1.0,
        }
    }
}

/// State shared with the scheduling worker
struct Shared {
    config: Mutex<EngineConfig>,
    callbacks: Mutex<Callbacks>,
    running: AtomicBool,
    /// Bumped on every start/stop; pending work from older generations is dead
    generation: AtomicU64,
    /// Most recently reported beat index
    beat: AtomicU32,
}

impl Shared {
    fn is_live(&self, generation: u64) -> bool {
        self.running.load(Ordering::Acquire) && self.generation.load(Ordering::Acquire) == generation
    }
}

/// The beat scheduling engine.
///
/// State machine: Stopped -> Running -> Stopped. `start` while Running and
/// `stop` while Stopped are no-ops; after `dispose` the engine is inert.
pub struct Metronome {
    shared: Arc<Shared>,
    output: ClickOutput,
    worker: Option<JoinHandle<()>>,
    disposed: bool,
}

impl Metronome {
    /// Create a stopped engine; no audio device is touched yet
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                config: Mutex::new(EngineConfig::default()),
                callbacks: Mutex::new(Callbacks::default()),
                running: AtomicBool::new(false),
                generation: AtomicU64::new(0),
                beat: AtomicU32::new(0),
            }),
            output: ClickOutput::new(),
            worker: None,
            disposed: false,
        }
    }

    /// Set tempo, clamped to [20, 300] BPM
    pub fn set_bpm(&self, bpm: f64) {
        if let Ok(mut config) = self.shared.config.lock() {
            config.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        }
    }

    /// Current tempo
    pub fn bpm(&self) -> f64 {
        self.shared.config.lock().map(|c| c.bpm).unwrap_or(120.0)
    }

    /// Adjust tempo by a delta, clamped
    pub fn nudge_bpm(&self, delta: f64) {
        self.set_bpm(self.bpm() + delta);
    }

    /// Set the note subdivision
    pub fn set_subdivision(&self, subdivision: Subdivision) {
        if let Ok(mut config) = self.shared.config.lock() {
            config.meter.subdivision = subdivision;
        }
    }

    /// Set the time signature
    pub fn set_time_signature(&self, signature: TimeSignature) {
        if let Ok(mut config) = self.shared.config.lock() {
            config.meter.signature = signature;
        }
    }

    /// Switch between one- and two-measure cycles
    pub fn set_two_measure(&self, two_measure: bool) {
        if let Ok(mut config) = self.shared.config.lock() {
            config.meter.two_measure = two_measure;
        }
    }

    /// Set the click audibility policy
    pub fn set_click_policy(&self, policy: ClickPolicy) {
        if let Ok(mut config) = self.shared.config.lock() {
            config.click_policy = policy;
        }
    }

    /// Set master volume, clamped to [0, 1]
    pub fn set_volume(&self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        if let Ok(mut config) = self.shared.config.lock() {
            config.volume = volume;
        }
        self.output.set_volume(volume);
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> EngineConfig {
        self.shared
            .config
            .lock()
            .map(|c| *c)
            .unwrap_or_default()
    }

    /// Install the beat and cycle-complete callbacks
    pub fn set_callbacks(&self, callbacks: Callbacks) {
        if let Ok(mut slot) = self.shared.callbacks.lock() {
            *slot = callbacks;
        }
    }

    /// Check if the engine is running
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Most recently reported beat index
    pub fn current_beat(&self) -> u32 {
        self.shared.beat.load(Ordering::Acquire)
    }

    /// Start playback.
    ///
    /// If the audio subsystem cannot be opened this is a logged no-op and
    /// the engine stays Stopped; callers may simply retry later. A suspended
    /// stream is resumed before any scheduling happens.
    pub fn start(&mut self) {
        if self.disposed {
            warn!("start ignored: engine is disposed");
            return;
        }
        if self.is_running() {
            return;
        }

        if let Err(e) = self.output.open() {
            warn!("audio unavailable, metronome not started: {}", e);
            return;
        }
        if let Err(e) = self.output.resume() {
            warn!("could not resume audio stream: {}", e);
            return;
        }
        self.output.clear_pending();

        let volume = self.config().volume;
        self.output.set_volume(volume);

        let generation = self.shared.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.shared.beat.store(0, Ordering::Release);
        self.shared.running.store(true, Ordering::Release);

        let shared = Arc::clone(&self.shared);
        let clock = self.output.clock();
        let mixer = self.output.mixer();
        let spawned = thread::Builder::new()
            .name("stickwork-scheduler".to_string())
            .spawn(move || run_scheduler(shared, clock, mixer, generation));

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                info!(bpm = self.bpm(), "metronome started");
            }
            Err(e) => {
                self.shared.running.store(false, Ordering::Release);
                warn!("failed to spawn scheduler thread: {}", e);
            }
        }
    }

    /// Stop playback.
    ///
    /// Synchronously halts the scheduling loop; no beat or cycle callback
    /// fires after this returns, and no further audio is queued.
    pub fn stop(&mut self) {
        if !self.shared.running.swap(false, Ordering::AcqRel) {
            return;
        }
        self.shared.generation.fetch_add(1, Ordering::AcqRel);

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }

        self.output.clear_pending();
        self.output.suspend();
        self.shared.beat.store(0, Ordering::Release);
        info!("metronome stopped");
    }

    /// Stop and release the audio subsystem; the engine cannot restart
    pub fn dispose(&mut self) {
        self.stop();
        self.output.close();
        self.disposed = true;
        debug!("metronome disposed");
    }
}

impl Default for Metronome {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Metronome {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// The scheduling loop.
///
/// Two timing sources: the audio clock (sample counter) for click
/// timestamps, and wall clock for visual callback dispatch. The loop wakes
/// on a fixed poll period or earlier when a visual event comes due.
fn run_scheduler(
    shared: Arc<Shared>,
    clock: Arc<SampleClock>,
    mixer: Arc<Mutex<ClickMixer>>,
    generation: u64,
) {
    let epoch = Instant::now();
    let mut plan = LookaheadScheduler::new(LOOKAHEAD_SECS);
    plan.reset(clock.now_secs());
    let mut visuals = VisualQueue::new();

    while shared.is_live(generation) {
        let (bpm, meter, policy) = match shared.config.lock() {
            Ok(config) => (config.bpm, config.meter, config.click_policy),
            Err(_) => return,
        };

        let now_audio = clock.now_secs();
        let now_wall = epoch.elapsed();

        for note in plan.fill(now_audio, bpm, &meter, policy) {
            if note.audible {
                if let Ok(mut mixer) = mixer.lock() {
                    mixer.schedule(Click {
                        at_secs: note.at_secs,
                        frequency: note.accent.frequency(),
                        gain: note.accent.gain(),
                    });
                }
            }

            // Visual dispatch approximates the audio timestamp in wall time
            let delay = (note.at_secs - now_audio).max(0.0);
            let fire_at = now_wall + Duration::from_secs_f64(delay);
            visuals.push(fire_at.as_micros() as u64, note.beat, note.cycle_end);
        }

        let now_micros = epoch.elapsed().as_micros() as u64;
        while let Some(event) = visuals.pop_due(now_micros) {
            // The running flag is re-checked at fire time
            if !shared.is_live(generation) {
                return;
            }
            shared.beat.store(event.beat, Ordering::Release);
            if let Ok(callbacks) = shared.callbacks.lock() {
                if let Some(on_beat) = &callbacks.on_beat {
                    on_beat(event.beat);
                }
                if event.cycle_end {
                    if let Some(on_cycle_complete) = &callbacks.on_cycle_complete {
                        on_cycle_complete();
                    }
                }
            }
        }

        // Wake for the next poll tick or the next due visual, whichever
        // comes first
        let mut sleep = POLL_INTERVAL;
        if let Some(due) = visuals.next_due_micros() {
            let now = epoch.elapsed().as_micros() as u64;
            sleep = sleep.min(Duration::from_micros(due.saturating_sub(now)));
        }
        thread::sleep(sleep.max(Duration::from_millis(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_starts_stopped() {
        let engine = Metronome::new();
        assert!(!engine.is_running());
        assert_eq!(engine.current_beat(), 0);
        assert_eq!(engine.bpm(), 120.0);
    }

    #[test]
    fn test_bpm_clamping() {
        let engine = Metronome::new();

        engine.set_bpm(10.0);
        assert_eq!(engine.bpm(), MIN_BPM);

        engine.set_bpm(500.0);
        assert_eq!(engine.bpm(), MAX_BPM);

        engine.set_bpm(140.0);
        assert_eq!(engine.bpm(), 140.0);
    }

    #[test]
    fn test_nudge_bpm() {
        let engine = Metronome::new();
        engine.nudge_bpm(5.0);
        assert_eq!(engine.bpm(), 125.0);
        engine.nudge_bpm(-500.0);
        assert_eq!(engine.bpm(), MIN_BPM);
    }

    #[test]
    fn test_volume_clamping() {
        let engine = Metronome::new();

        engine.set_volume(1.5);
        assert_eq!(engine.config().volume, 1.0);

        engine.set_volume(-0.2);
        assert_eq!(engine.config().volume, 0.0);
    }

    #[test]
    fn test_config_setters() {
        let engine = Metronome::new();
        engine.set_subdivision(Subdivision::Triplet);
        engine.set_time_signature(TimeSignature::SixEight);
        engine.set_two_measure(false);
        engine.set_click_policy(ClickPolicy::QuarterOnly);

        let config = engine.config();
        assert_eq!(config.meter.subdivision, Subdivision::Triplet);
        assert_eq!(config.meter.signature, TimeSignature::SixEight);
        assert!(!config.meter.two_measure);
        assert_eq!(config.click_policy, ClickPolicy::QuarterOnly);
    }

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let mut engine = Metronome::new();
        engine.stop();
        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_start_after_dispose_is_noop() {
        let mut engine = Metronome::new();
        engine.dispose();
        engine.start();
        assert!(!engine.is_running());
    }
}
