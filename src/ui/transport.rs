// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Transport display widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Paragraph, Widget},
};

/// Transport state for UI display
#[derive(Debug, Clone)]
pub struct TransportState {
    /// Whether playing
    pub playing: bool,
    /// Current tempo in BPM
    pub bpm: f64,
    /// Time signature label
    pub signature: &'static str,
    /// Subdivision label
    pub subdivision: &'static str,
    /// Two-measure cycle span
    pub two_measure: bool,
    /// Click policy label
    pub click: &'static str,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            playing: false,
            bpm: 120.0,
            signature: "4/4",
            subdivision: "1/16",
            two_measure: true,
            click: "every-note",
            volume: 0.8,
        }
    }
}

impl TransportState {
    /// Cycle span label
    pub fn span_label(&self) -> &'static str {
        if self.two_measure {
            "2 bars"
        } else {
            "1 bar"
        }
    }
}

/// Transport widget for displaying playback state
pub struct TransportWidget<'a> {
    state: &'a TransportState,
    block: Option<Block<'a>>,
}

impl<'a> TransportWidget<'a> {
    /// Create a new transport widget
    pub fn new(state: &'a TransportState) -> Self {
        Self { state, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for TransportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(9),  // Play/Stop indicator
                Constraint::Length(12), // Tempo
                Constraint::Length(6),  // Time signature
                Constraint::Length(8),  // Subdivision
                Constraint::Length(9),  // Cycle span
                Constraint::Length(14), // Click policy
                Constraint::Min(0),     // Volume
            ])
            .split(area);

        let (indicator, style) = if self.state.playing {
            (
                "▶ PLAY",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            ("■ STOP", Style::default().fg(Color::Yellow))
        };
        Paragraph::new(indicator).style(style).render(chunks[0], buf);

        let tempo = format!("{:.0} BPM", self.state.bpm);
        Paragraph::new(tempo)
            .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .render(chunks[1], buf);

        Paragraph::new(self.state.signature)
            .style(Style::default().fg(Color::White))
            .render(chunks[2], buf);

        Paragraph::new(self.state.subdivision)
            .style(Style::default().fg(Color::Cyan))
            .render(chunks[3], buf);

        Paragraph::new(self.state.span_label())
            .style(Style::default().fg(Color::White))
            .render(chunks[4], buf);

        Paragraph::new(self.state.click)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[5], buf);

        let volume = format!("vol {:.0}%", self.state.volume * 100.0);
        Paragraph::new(volume)
            .style(Style::default().fg(Color::DarkGray))
            .render(chunks[6], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_label() {
        let mut state = TransportState::default();
        assert_eq!(state.span_label(), "2 bars");
        state.two_measure = false;
        assert_eq!(state.span_label(), "1 bar");
    }
}
