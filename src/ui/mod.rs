// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the STICKWORK metronome.
//!
//! Provides a ratatui-based interface showing the active sticking pattern
//! with a moving beat highlight, a transport line, and a help overlay.

mod pattern_view;
mod transport;

pub use pattern_view::{beat_cell, PatternState, PatternWidget};
pub use transport::{TransportState, TransportWidget};

use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tracing::info;

use crate::control::{ControlAction, KeyboardController};
use crate::engine::{Callbacks, Metronome};
use crate::session::PracticeSession;

/// Frame poll interval
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal UI application
pub struct App {
    engine: Metronome,
    session: Arc<Mutex<PracticeSession>>,
    keyboard: KeyboardController,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    show_help: bool,
    running: bool,
}

impl App {
    /// Create the app and set up the terminal.
    ///
    /// Wires the engine callbacks into the session before anything plays.
    pub fn new(engine: Metronome, session: PracticeSession) -> io::Result<Self> {
        let session = Arc::new(Mutex::new(session));

        let beat_session = Arc::clone(&session);
        let cycle_session = Arc::clone(&session);
        engine.set_callbacks(Callbacks {
            on_beat: Some(Box::new(move |beat| {
                if let Ok(mut session) = beat_session.lock() {
                    session.on_beat(beat);
                }
            })),
            on_cycle_complete: Some(Box::new(move || {
                if let Ok(mut session) = cycle_session.lock() {
                    session.on_cycle_complete();
                }
            })),
        });

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            engine,
            session,
            keyboard: KeyboardController::with_defaults(),
            terminal,
            show_help: false,
            running: true,
        })
    }

    /// Run the event loop until quit
    pub fn run(&mut self) -> io::Result<()> {
        info!("ui started");
        while self.running {
            self.draw()?;

            if event::poll(FRAME_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        // Normalize shifted characters reported with the
                        // SHIFT modifier set
                        let modifiers = match key.code {
                            event::KeyCode::Char(_) => key.modifiers & !KeyModifiers::SHIFT,
                            _ => key.modifiers,
                        };
                        let action = self.keyboard.process(key.code, modifiers);
                        self.apply(action);
                    }
                }
            }
        }
        self.engine.stop();
        info!("ui stopped");
        Ok(())
    }

    /// Apply a control action
    fn apply(&mut self, action: ControlAction) {
        match action {
            ControlAction::None => {}
            ControlAction::TogglePlay => {
                if self.engine.is_running() {
                    self.stop_playback();
                } else {
                    self.engine.start();
                }
            }
            ControlAction::Stop => self.stop_playback(),
            ControlAction::AdjustTempo(delta) => self.engine.nudge_bpm(delta),
            ControlAction::CycleSubdivision => {
                let next = self.engine.config().meter.subdivision.next();
                self.engine.set_subdivision(next);
                self.sync_pattern_length();
            }
            ControlAction::CycleSignature => {
                let next = self.engine.config().meter.signature.next();
                self.engine.set_time_signature(next);
                self.sync_pattern_length();
            }
            ControlAction::ToggleTwoMeasure => {
                let two_measure = !self.engine.config().meter.two_measure;
                self.engine.set_two_measure(two_measure);
            }
            ControlAction::ToggleClickPolicy => {
                let policy = self.engine.config().click_policy.toggled();
                self.engine.set_click_policy(policy);
            }
            ControlAction::AdjustVolume(delta) => {
                let volume = self.engine.config().volume + delta;
                self.engine.set_volume(volume);
            }
            ControlAction::AdjustRepeats(delta) => {
                if let Ok(mut session) = self.session.lock() {
                    let repeats = session.repeats() as i32 + delta;
                    session.set_repeats(repeats.max(1) as u32);
                }
            }
            ControlAction::ToggleAdvanceMode => {
                if let Ok(mut session) = self.session.lock() {
                    let mode = session.mode().toggled();
                    session.set_mode(mode);
                }
            }
            ControlAction::NextPattern => {
                if let Ok(mut session) = self.session.lock() {
                    session.step(1);
                }
            }
            ControlAction::PrevPattern => {
                if let Ok(mut session) = self.session.lock() {
                    session.step(-1);
                }
            }
            ControlAction::RandomPattern => {
                if let Ok(mut session) = self.session.lock() {
                    session.shuffle();
                }
            }
            ControlAction::ToggleHelp => self.show_help = !self.show_help,
            ControlAction::Quit => self.running = false,
        }
    }

    fn stop_playback(&mut self) {
        self.engine.stop();
        if let Ok(mut session) = self.session.lock() {
            session.on_stopped();
        }
    }

    /// Keep the session's index space in step with the meter
    fn sync_pattern_length(&mut self) {
        let length = self.engine.config().meter.notes_per_measure();
        if let Ok(mut session) = self.session.lock() {
            session.set_pattern_length(length);
        }
    }

    /// Snapshot engine and session state for rendering
    fn snapshot(&self) -> (TransportState, PatternState) {
        let config = self.engine.config();
        let transport = TransportState {
            playing: self.engine.is_running(),
            bpm: config.bpm,
            signature: config.meter.signature.label(),
            subdivision: config.meter.subdivision.label(),
            two_measure: config.meter.two_measure,
            click: config.click_policy.name(),
            volume: config.volume,
        };

        let pattern = match self.session.lock() {
            Ok(session) => {
                let two = session.current_pattern();
                PatternState {
                    name: session.current_name(),
                    first: two.first.letters(),
                    second: two.second.letters(),
                    highlight: if self.engine.is_running() {
                        session.highlight()
                    } else {
                        None
                    },
                    notes_per_measure: config.meter.notes_per_measure(),
                    two_measure: config.meter.two_measure,
                    next_name: session.next_name(),
                    repeat_number: session.repeat_number(),
                    repeats: session.repeats(),
                    mode: session.mode().name(),
                }
            }
            Err(_) => PatternState::default(),
        };

        (transport, pattern)
    }

    /// Draw one frame
    fn draw(&mut self) -> io::Result<()> {
        let (transport, pattern) = self.snapshot();
        let help_lines: Vec<String> = self
            .keyboard
            .bindings()
            .map(|b| format!("{:12} {}", shortcut_label(&b.shortcut), b.description))
            .collect();
        let show_help = self.show_help;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Transport
                    Constraint::Min(8),    // Pattern
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            frame.render_widget(
                TransportWidget::new(&transport)
                    .block(Block::default().borders(Borders::ALL).title(" Transport ")),
                chunks[0],
            );
            frame.render_widget(
                PatternWidget::new(&pattern)
                    .block(Block::default().borders(Borders::ALL).title(" Pattern ")),
                chunks[1],
            );
            render_status_bar(frame, chunks[2]);

            if show_help {
                render_help_overlay(frame, area, &help_lines);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn shortcut_label(shortcut: &crate::control::Shortcut) -> String {
    use crossterm::event::KeyCode;

    let key = match shortcut.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        other => format!("{:?}", other),
    };
    if shortcut.modifiers.contains(KeyModifiers::SHIFT) {
        format!("Shift+{}", key)
    } else {
        key
    }
}

/// Render the bottom status bar
fn render_status_bar(frame: &mut Frame, area: Rect) {
    let line = Line::from(" Space: Play/Stop | Left/Right: Pattern | s/t: Meter | h: Help | q: Quit");
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Render the help overlay centered on the screen
fn render_help_overlay(frame: &mut Frame, area: Rect, help_lines: &[String]) {
    let height = (help_lines.len() as u16 + 2).min(area.height);
    let width = 44u16.min(area.width);
    let overlay = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let lines: Vec<Line> = help_lines.iter().map(|l| Line::from(l.as_str())).collect();
    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Keys ")),
        overlay,
    );
}
