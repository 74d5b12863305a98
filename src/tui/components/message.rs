use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::sim::{ChatMessage, ChatRole};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A transient component rendering one chat bubble: created fresh each frame
/// with the message it needs, holds no state of its own.
///
/// User bubbles are cyan and titled "you"; assistant bubbles are green and
/// titled "eco". Both carry an HH:MM stamp in the title, matching the
/// original's bubble footer.
#[derive(Clone, Copy)]
pub struct ChatBubble<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> ChatBubble<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    /// Predicts the rendered height for a given width without rendering.
    ///
    /// Uses `textwrap` with options matching Ratatui's `Paragraph` wrapping,
    /// so the parent can lay out the viewport before drawing.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn role_name(&self) -> &'static str {
        match self.message.role {
            ChatRole::User => "you",
            ChatRole::Assistant => "eco",
        }
    }

    fn role_style(&self) -> Style {
        match self.message.role {
            ChatRole::User => Style::default().fg(Color::Cyan),
            ChatRole::Assistant => Style::default().fg(Color::Green),
        }
    }
}

impl Widget for ChatBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.role_style();
        let title = format!(
            " {} · {} ",
            self.role_name(),
            self.message.created_at.format("%H:%M")
        );

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style.add_modifier(Modifier::DIM))
                    .title(Span::styled(title, style))
                    .padding(Padding::horizontal(CONTENT_PAD_H)),
            )
            .render(area, buf);
    }
}
