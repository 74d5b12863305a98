//! # InputBox Component
//!
//! Single-line text entry for the assistant. Enter submits; blank input is
//! swallowed. While a reply is composing the box is dimmed and ignores
//! editing, mirroring the original's disabled input field.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

pub const INPUT_HEIGHT: u16 = 3;

const PLACEHOLDER: &str = "Ask: 'Where should I throw this plastic bottle?'";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether editing is disabled (Prop: true while a reply is composing)
    pub dimmed: bool,
    /// Cursor position as a byte index into `buffer`
    cursor_pos: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            dimmed: false,
            cursor_pos: 0,
        }
    }

    /// First visible byte index so the cursor always stays inside the box.
    fn window_start(&self, inner_width: u16) -> usize {
        let budget = inner_width.saturating_sub(1) as usize;
        let mut used = 0;
        let mut start = self.cursor_pos;
        for (idx, ch) in self.buffer[..self.cursor_pos].char_indices().rev() {
            let w = ch.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            start = idx;
        }
        start
    }

    /// Cursor column within the inner area (excluding the border).
    pub fn cursor_offset(&self, inner_width: u16) -> u16 {
        let start = self.window_start(inner_width);
        self.buffer[start..self.cursor_pos].width() as u16
    }

    fn prev_char_boundary(&self) -> usize {
        self.buffer[..self.cursor_pos]
            .char_indices()
            .next_back()
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    fn next_char_boundary(&self) -> usize {
        self.buffer[self.cursor_pos..]
            .chars()
            .next()
            .map(|c| self.cursor_pos + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl Widget for &InputBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.dimmed {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Green)
        };
        let title = if self.dimmed { " thinking... " } else { " ask " };

        let inner_width = area.width.saturating_sub(2);
        let (text, style) = if self.buffer.is_empty() {
            (
                PLACEHOLDER.to_string(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        } else {
            let start = self.window_start(inner_width);
            (self.buffer[start..].to_string(), Style::default())
        };

        Paragraph::new(text)
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(title),
            )
            .render(area, buf);
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.dimmed {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                // Single-line box: control characters never enter the buffer.
                if c.is_control() {
                    return None;
                }
                self.buffer.insert(self.cursor_pos, *c);
                self.cursor_pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let flat: String = text.chars().filter(|c| !c.is_control()).collect();
                if flat.is_empty() {
                    return None;
                }
                self.buffer.insert_str(self.cursor_pos, &flat);
                self.cursor_pos += flat.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor_pos > 0 {
                    let prev = self.prev_char_boundary();
                    self.buffer.drain(prev..self.cursor_pos);
                    self.cursor_pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor_pos < self.buffer.len() {
                    let next = self.next_char_boundary();
                    self.buffer.drain(self.cursor_pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = self.prev_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor_pos < self.buffer.len() {
                    self.cursor_pos = self.next_char_boundary();
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Submit => {
                if !self.buffer.trim().is_empty() {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor_pos = 0;
                    Some(InputEvent::Submit(text))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
