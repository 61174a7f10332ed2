// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sticking pattern display widget.
//!
//! Shows the two measures of the active pattern as rows of R/L letters with
//! the currently sounding beat highlighted.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Which measure and position a cycle beat index falls on
pub fn beat_cell(notes_per_measure: u32, beat: u32) -> (usize, usize) {
    let npm = notes_per_measure.max(1);
    (((beat / npm) % 2) as usize, (beat % npm) as usize)
}

/// Pattern state for UI display
#[derive(Debug, Clone, Default)]
pub struct PatternState {
    /// Display name of the active pattern
    pub name: String,
    /// R/L letters of the first measure
    pub first: String,
    /// R/L letters of the second measure
    pub second: String,
    /// Cycle beat currently sounding
    pub highlight: Option<u32>,
    /// Notes per measure, for mapping the highlight
    pub notes_per_measure: u32,
    /// Whether the cycle spans both measures
    pub two_measure: bool,
    /// Display name of the upcoming pattern
    pub next_name: String,
    /// Repeat currently playing, 1-based
    pub repeat_number: u32,
    /// Configured repeats per pattern
    pub repeats: u32,
    /// Advance mode label
    pub mode: &'static str,
}

/// Widget rendering the active pattern
pub struct PatternWidget<'a> {
    state: &'a PatternState,
    block: Option<Block<'a>>,
}

impl<'a> PatternWidget<'a> {
    /// Create a new pattern widget
    pub fn new(state: &'a PatternState) -> Self {
        Self { state, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn measure_line(&self, letters: &str, measure: usize) -> Line<'static> {
        let highlight_cell = self
            .state
            .highlight
            .map(|beat| beat_cell(self.state.notes_per_measure, beat));
        // A single-measure cycle never reaches the second row
        let highlight_cell = match highlight_cell {
            Some((m, p)) if m == measure => Some(p),
            _ => None,
        };

        // The second row is inert while the cycle spans a single measure
        let dimmed = measure == 1 && !self.state.two_measure;

        let mut spans = vec![Span::styled(
            format!("{} │ ", measure + 1),
            Style::default().fg(Color::DarkGray),
        )];
        for (i, letter) in letters.chars().enumerate() {
            let style = if highlight_cell == Some(i) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if dimmed {
                Style::default().fg(Color::DarkGray)
            } else if letter == 'R' {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::Magenta)
            };
            spans.push(Span::styled(letter.to_string(), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Widget for PatternWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let mut lines = vec![
            Line::from(Span::styled(
                self.state.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            self.measure_line(&self.state.first, 0),
            self.measure_line(&self.state.second, 1),
            Line::default(),
            Line::from(vec![
                Span::styled("repeat ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!(
                    "{}/{}",
                    self.state.repeat_number, self.state.repeats
                )),
                Span::styled("   next ", Style::default().fg(Color::DarkGray)),
                Span::raw(self.state.next_name.clone()),
                Span::styled(
                    format!("   ({})", self.state.mode),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
        ];
        lines.truncate(area.height as usize);

        Paragraph::new(lines).render(area, buf);
    }
}
