use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};

/// TUI-specific input events. Raw translation only; what a key *means*
/// depends on the input mode and is decided in the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C - quits regardless of mode
    ForceQuit,
    Escape,
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste - newlines are stripped by the input box
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,
    NextSection, // Tab
    PrevSection, // Shift+Tab
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event with the given timeout.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    let Ok(raw) = event::read() else {
        return None;
    };
    match raw {
        Event::Key(key_event) => match (key_event.modifiers, key_event.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
            (_, KeyCode::Esc) => Some(TuiEvent::Escape),
            (_, KeyCode::Enter) => Some(TuiEvent::Submit),
            (_, KeyCode::Tab) => Some(TuiEvent::NextSection),
            (_, KeyCode::BackTab) => Some(TuiEvent::PrevSection),
            (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
            (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
            (_, KeyCode::Delete) => Some(TuiEvent::Delete),
            (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
            (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
            (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
            (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
            (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
            (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
            (_, KeyCode::Home) => Some(TuiEvent::ScrollToTop),
            (_, KeyCode::End) => Some(TuiEvent::ScrollToBottom),
            _ => None,
        },
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}
