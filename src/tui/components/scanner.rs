//! # Scanner Section
//!
//! The simulated camera panel: viewfinder box, status line, and the scored
//! catalog from the latest scan tick.
//!
//! Stateless: everything comes in as props from `App`, including the
//! prediction set the scan loop last posted.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::camera::StreamConstraints;
use crate::core::state::ScanPhase;
use crate::sim::Prediction;

/// Pulse intensity threshold above which the live border goes BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity threshold above which the live border leaves DIM.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

const HEADER_HEIGHT: u16 = 3;
const VIEWFINDER_HEIGHT: u16 = 8;
const VIEWFINDER_WIDTH: u16 = 36;
const STATUS_HEIGHT: u16 = 3;
const PREDICTION_CARD_HEIGHT: u16 = 3;
const PREDICTIONS_HEADER_HEIGHT: u16 = 2;

pub struct ScannerPanel<'a> {
    pub phase: ScanPhase,
    pub status: &'a str,
    pub predictions: &'a [Prediction],
    pub constraints: StreamConstraints,
    /// Current pulse intensity (0.0 to 1.0) while the camera is live
    pub pulse_intensity: f32,
}

impl ScannerPanel<'_> {
    /// Rendered height for the given prediction count. The parent needs this
    /// before rendering to size the page scroll view.
    pub fn height(prediction_count: usize) -> u16 {
        let mut height = HEADER_HEIGHT + VIEWFINDER_HEIGHT + 1 + STATUS_HEIGHT + 1;
        if prediction_count > 0 {
            height += PREDICTIONS_HEADER_HEIGHT + prediction_count as u16 * PREDICTION_CARD_HEIGHT;
        }
        height
    }

    fn viewfinder_border(&self) -> Style {
        match self.phase {
            ScanPhase::Live => {
                let style = Style::default().fg(Color::Green);
                if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
                    style.add_modifier(Modifier::BOLD)
                } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
                    style
                } else {
                    style.add_modifier(Modifier::DIM)
                }
            }
            ScanPhase::Error => Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
            ScanPhase::Idle | ScanPhase::Acquiring => {
                Style::default().fg(Color::DarkGray)
            }
        }
    }

    fn viewfinder_caption(&self) -> Line<'static> {
        let (text, style) = match self.phase {
            ScanPhase::Live => (
                format!("● LIVE  {}×{}", self.constraints.width, self.constraints.height),
                Style::default().fg(Color::Green),
            ),
            ScanPhase::Acquiring => ("warming up...".to_string(), Style::default().fg(Color::Yellow)),
            ScanPhase::Error => ("no signal".to_string(), Style::default().fg(Color::Red)),
            ScanPhase::Idle => ("camera off".to_string(), Style::default().fg(Color::DarkGray)),
        };
        Line::from(Span::styled(text, style))
    }
}

/// Confidence color bands from the original: >0.7 green, >0.4 yellow, else red.
fn confidence_color(confidence: f64) -> Color {
    if confidence > 0.7 {
        Color::Green
    } else if confidence > 0.4 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Status line styling keys off content class: ready ✅, failure ❌, neutral.
fn status_style(status: &str) -> Style {
    if status.contains('✅') {
        Style::default().fg(Color::Green)
    } else if status.contains('❌') {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

impl Widget for ScannerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut constraints = vec![
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(VIEWFINDER_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(STATUS_HEIGHT),
            Constraint::Length(1),
        ];
        if !self.predictions.is_empty() {
            constraints.push(Constraint::Length(PREDICTIONS_HEADER_HEIGHT));
            constraints.push(Constraint::Min(0));
        }
        let chunks = Layout::vertical(constraints).split(area);

        // Header
        Paragraph::new(vec![
            Line::from(Span::styled(
                "📷 Smart Waste Scanner",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Point your camera at any waste item and I'll tell you how to dispose it!",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .render(chunks[0], buf);

        // Viewfinder, centered like the original's preview box
        let [viewfinder_area] = Layout::horizontal([Constraint::Length(VIEWFINDER_WIDTH)])
            .flex(Flex::Center)
            .areas(chunks[1]);
        Paragraph::new(self.viewfinder_caption())
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(self.viewfinder_border())
                    .padding(Padding::new(0, 0, VIEWFINDER_HEIGHT / 2 - 1, 0)),
            )
            .render(viewfinder_area, buf);

        // Status line
        Paragraph::new(self.status)
            .alignment(Alignment::Center)
            .style(status_style(self.status))
            .block(Block::bordered().border_type(BorderType::Rounded).border_style(
                status_style(self.status).add_modifier(Modifier::DIM),
            ))
            .render(chunks[3], buf);

        // Predictions
        if self.predictions.is_empty() {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            "Predictions",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        let mut y = chunks[6].y;
        for prediction in self.predictions {
            let card = Rect::new(chunks[6].x, y, chunks[6].width, PREDICTION_CARD_HEIGHT);
            let percent = format!("{:.0}%", prediction.confidence * 100.0);
            let pad = card
                .width
                .saturating_sub(4 + prediction.label.len() as u16 + percent.len() as u16);
            let line = Line::from(vec![
                Span::styled(prediction.label, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(" ".repeat(pad as usize)),
                Span::styled(
                    percent,
                    Style::default()
                        .fg(confidence_color(prediction.confidence))
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            Paragraph::new(line)
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::DarkGray))
                        .title(Span::styled(
                            format!(" {} ", prediction.category.label()),
                            Style::default().fg(Color::DarkGray),
                        ))
                        .padding(Padding::horizontal(1)),
                )
                .render(card, buf);
            y += PREDICTION_CARD_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::WasteCategory;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn predictions() -> Vec<Prediction> {
        vec![
            Prediction {
                label: "Plastic Bottle",
                confidence: 0.91,
                category: WasteCategory::Dry,
                point_value: 5,
            },
            Prediction {
                label: "Paper",
                confidence: 0.45,
                category: WasteCategory::Dry,
                point_value: 3,
            },
            Prediction {
                label: "Organic Waste",
                confidence: 0.12,
                category: WasteCategory::Wet,
                point_value: 4,
            },
        ]
    }

    fn render_to_text(panel: ScannerPanel) -> String {
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(panel, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_confidence_color_bands() {
        assert_eq!(confidence_color(0.95), Color::Green);
        assert_eq!(confidence_color(0.71), Color::Green);
        assert_eq!(confidence_color(0.7), Color::Yellow);
        assert_eq!(confidence_color(0.41), Color::Yellow);
        assert_eq!(confidence_color(0.4), Color::Red);
        assert_eq!(confidence_color(0.0), Color::Red);
    }

    #[test]
    fn test_status_style_classes() {
        assert_eq!(status_style("✅ Camera ready!").fg, Some(Color::Green));
        assert_eq!(status_style("❌ Camera not available.").fg, Some(Color::Red));
        assert_eq!(status_style("Press 's' to start").fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_height_grows_with_predictions() {
        let empty = ScannerPanel::height(0);
        let four = ScannerPanel::height(4);
        assert_eq!(four, empty + PREDICTIONS_HEADER_HEIGHT + 4 * PREDICTION_CARD_HEIGHT);
    }

    #[test]
    fn test_render_idle_panel() {
        let text = render_to_text(ScannerPanel {
            phase: ScanPhase::Idle,
            status: "Press 's' to start the camera and scan waste items!",
            predictions: &[],
            constraints: StreamConstraints::default(),
            pulse_intensity: 0.0,
        });
        assert!(text.contains("Smart Waste Scanner"));
        assert!(text.contains("camera off"));
        assert!(text.contains("Press 's' to start"));
        assert!(!text.contains("Predictions"));
    }

    #[test]
    fn test_render_live_panel_with_predictions() {
        let preds = predictions();
        let text = render_to_text(ScannerPanel {
            phase: ScanPhase::Live,
            status: "✅ Camera ready! Point at waste items!",
            predictions: &preds,
            constraints: StreamConstraints::default(),
            pulse_intensity: 0.9,
        });
        assert!(text.contains("LIVE"));
        assert!(text.contains("640×480"));
        assert!(text.contains("Predictions"));
        assert!(text.contains("Plastic Bottle"));
        assert!(text.contains("91%"));
        assert!(text.contains("Dry Waste"));
        assert!(text.contains("Wet Waste"));
    }
}
