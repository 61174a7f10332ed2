// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use stickwork::audio::output::{default_device_name, list_devices};
use stickwork::config::{validate_config, PracticeFile};
use stickwork::engine::{Callbacks, Metronome};
use stickwork::pattern::{self, variant_display_name};
use stickwork::session::PracticeSession;
use stickwork::timing::Subdivision;
use stickwork::ui::App;

const DEFAULT_CONFIG: &str = "stickwork.yaml";
const LOG_FILE: &str = "stickwork.log";

fn print_usage() {
    println!("STICKWORK - Practice-Pattern Metronome");
    println!();
    println!("Usage: stickwork [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <path>        Load practice settings from a YAML file");
    println!("  --list-audio           List available audio output devices");
    println!("  --test-click [BPM]     Play a short headless click check (default 120)");
    println!("  --show <index> [len]   Print the pattern for a combined index (default len 16)");
    println!("  --help                 Show this help message");
    println!();
    println!("With no options, runs the practice session UI, reading");
    println!("./stickwork.yaml when present.");
}

/// Log to a file so output never fights the alternate-screen UI
fn init_logging() -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn run_app(config_path: Option<&str>) -> Result<()> {
    let file = match config_path {
        Some(path) => PracticeFile::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => PracticeFile::load(DEFAULT_CONFIG)?,
        None => PracticeFile::default(),
    };
    let config = &file.practice;
    for warning in validate_config(config) {
        warn!("config: {}", warning);
    }

    let mut engine = Metronome::new();
    engine.set_bpm(config.bpm);
    engine.set_subdivision(config.subdivision());
    engine.set_time_signature(config.time_signature());
    engine.set_two_measure(config.two_measure);
    engine.set_click_policy(config.click_policy());
    engine.set_volume(config.volume);

    let mut session = PracticeSession::new(engine.config().meter.notes_per_measure());
    session.set_repeats(config.repeats);
    session.set_mode(config.advance_mode());
    session.select(config.start_index as i64);

    let mut app = App::new(engine, session)?;
    app.run()?;
    Ok(())
}

fn run_test_click(bpm: f64) -> Result<()> {
    println!("Playing quarter-note click at {} BPM (press Ctrl+C to abort)...", bpm);

    let mut engine = Metronome::new();
    engine.set_bpm(bpm);
    engine.set_subdivision(Subdivision::QuarterNote);
    engine.set_two_measure(false);
    engine.set_callbacks(Callbacks {
        on_beat: Some(Box::new(|beat| println!("  beat {}", beat + 1))),
        on_cycle_complete: Some(Box::new(|| println!("  -- cycle --"))),
    });

    engine.start();
    if !engine.is_running() {
        println!("No audio output available");
        return Ok(());
    }

    // Two full 4/4 measures at the clamped tempo
    let seconds_per_beat = 60.0 / engine.bpm();
    thread::sleep(Duration::from_secs_f64(seconds_per_beat * 8.0));
    engine.stop();

    println!("Click test complete!");
    Ok(())
}

fn show_pattern(index: i64, length: u32) {
    let combined = pattern::normalize_index(index, length);
    let (base, variant) = pattern::decompose(combined);
    let two = pattern::two_measure_at(combined, length);

    println!(
        "Pattern {} of {} (base {}, variant {})",
        combined + 1,
        pattern::total_patterns(length),
        base,
        variant.index()
    );
    println!("  {}", variant_display_name(&two.first, two.variant));
    println!("  1 | {}", two.first.letters());
    println!("  2 | {}", two.second.letters());
}

fn main() -> Result<()> {
    init_logging()?;
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run_app(None)?,
        Some("--config") => {
            let Some(path) = args.get(2) else {
                eprintln!("Error: --config requires a file path");
                std::process::exit(1);
            };
            run_app(Some(path))?;
        }
        Some("--list-audio") => {
            let devices = list_devices();
            if devices.is_empty() {
                println!("No audio output devices found");
            } else {
                let default = default_device_name();
                for name in devices {
                    let marker = if Some(&name) == default.as_ref() { " (default)" } else { "" };
                    println!("{}{}", name, marker);
                }
            }
        }
        Some("--test-click") => {
            let bpm: f64 = args
                .get(2)
                .and_then(|s| s.parse().ok())
                .unwrap_or(120.0);
            run_test_click(bpm)?;
        }
        Some("--show") => {
            let Some(index) = args.get(2).and_then(|s| s.parse::<i64>().ok()) else {
                eprintln!("Error: --show requires a pattern index");
                std::process::exit(1);
            };
            let length: u32 = args
                .get(3)
                .and_then(|s| s.parse().ok())
                .unwrap_or(16);
            show_pattern(index, length);
        }
        Some("--help") | Some("-h") => {
            print_usage();
        }
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
