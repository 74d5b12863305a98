//! # Hero Section
//!
//! The landing strip at the top of the page: title, tagline, and the key
//! hints that replace the original's clickable buttons.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

/// Pulse intensity above which the divider renders at full brightness.
const PULSE_BRIGHT_THRESHOLD: f32 = 0.5;

pub const HERO_HEIGHT: u16 = 10;

pub struct Hero {
    /// Current pulse intensity (0.0 to 1.0) for the animated divider
    pub pulse_intensity: f32,
}

impl Hero {
    pub fn new(pulse_intensity: f32) -> Self {
        Self { pulse_intensity }
    }
}

impl Widget for Hero {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let divider_style = if self.pulse_intensity > PULSE_BRIGHT_THRESHOLD {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        };

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "🌱 EcoSegrega",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "AI-Powered Waste Segregation Helper",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled("─".repeat(40), divider_style)),
            Line::default(),
            Line::from(Span::styled(
                "s start camera · x stop · i ask the assistant · r update stats",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "1-5 or Tab to move between sections · q quits",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_hero_renders_title_and_tagline() {
        let backend = TestBackend::new(80, HERO_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                f.render_widget(Hero::new(0.0), f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("EcoSegrega"));
        assert!(text.contains("AI-Powered Waste Segregation Helper"));
        assert!(text.contains("start camera"));
    }
}
