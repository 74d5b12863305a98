//! # Assistant Section
//!
//! The chat panel: a bottom-pinned viewport over the conversation log, an
//! animated typing indicator while a reply is composing, and the single-line
//! input box.
//!
//! The log itself lives in core state; this component only decides which
//! tail of it fits the viewport.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::sim::{ChatLog, ChatRole};
use crate::tui::components::input_box::{INPUT_HEIGHT, InputBox};
use crate::tui::components::message::ChatBubble;

const HEADER_HEIGHT: u16 = 3;
const CHAT_VIEW_HEIGHT: u16 = 18;

/// Row offset of the input box within the section, used by the parent to
/// place the terminal cursor.
pub const INPUT_TOP_OFFSET: u16 = HEADER_HEIGHT + CHAT_VIEW_HEIGHT + 1;
pub const PANEL_HEIGHT: u16 = INPUT_TOP_OFFSET + INPUT_HEIGHT;

/// Bubbles take at most this fraction of the panel width, like the
/// original's `max-w-[80%]`.
const BUBBLE_WIDTH_NUM: u16 = 3;
const BUBBLE_WIDTH_DEN: u16 = 4;

pub struct AssistantPanel<'a> {
    pub log: &'a ChatLog,
    pub composing: bool,
    /// Animation frame for the typing indicator
    pub spinner_frame: usize,
    pub input: &'a InputBox,
}

impl Widget for AssistantPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, chat_area, _, input_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(CHAT_VIEW_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .areas(area);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "🤖 AI Waste Assistant",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Ask me anything about waste segregation!",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .render(header_area, buf);

        self.render_chat(chat_area, buf);
        self.input.render(input_area, buf);
    }
}

impl AssistantPanel<'_> {
    /// Lays out the tail of the log bottom-up: newest bubble flush with the
    /// viewport bottom, older ones above until the space runs out.
    fn render_chat(&self, area: Rect, buf: &mut Buffer) {
        let bubble_width = area.width * BUBBLE_WIDTH_NUM / BUBBLE_WIDTH_DEN;
        if bubble_width == 0 {
            return;
        }

        let mut bottom = area.y + area.height;

        if self.composing {
            bottom -= 1;
            let dots = 1 + self.spinner_frame % 3;
            let indicator = format!("eco is typing {}", "●".repeat(dots));
            Paragraph::new(Span::styled(
                indicator,
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
            ))
            .render(Rect::new(area.x, bottom, area.width, 1), buf);
        }

        for message in self.log.messages().iter().rev() {
            let height = ChatBubble::calculate_height(message, bubble_width);
            if height > bottom - area.y {
                break;
            }
            let y = bottom - height;
            let x = match message.role {
                // User bubbles hug the right edge, assistant the left.
                ChatRole::User => area.x + area.width - bubble_width,
                ChatRole::Assistant => area.x,
            };
            ChatBubble::new(message).render(Rect::new(x, y, bubble_width, height), buf);
            bottom = y;
        }
    }
}
