//! # NavBar Component
//!
//! The navigation shell: one row listing the page sections, with the section
//! nearest the scroll position highlighted and the running scan counter on
//! the right.
//!
//! The section list is static. Only the active id changes, and that is
//! recomputed from the scroll offset every frame rather than stored.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

/// Rows ahead of the viewport top used when deciding which section is
/// "current", the terminal analogue of the original page's 100px offset.
pub const SCROLL_LOOKAHEAD: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionId {
    Home,
    Scanner,
    Assistant,
    Dashboard,
    About,
}

/// One nav entry. The list below never changes at runtime.
#[derive(Debug, Clone, Copy)]
pub struct NavSection {
    pub id: SectionId,
    pub label: &'static str,
}

pub const NAV_SECTIONS: [NavSection; 5] = [
    NavSection {
        id: SectionId::Home,
        label: "Home",
    },
    NavSection {
        id: SectionId::Scanner,
        label: "Smart Scanner",
    },
    NavSection {
        id: SectionId::Assistant,
        label: "AI Assistant",
    },
    NavSection {
        id: SectionId::Dashboard,
        label: "Impact Dashboard",
    },
    NavSection {
        id: SectionId::About,
        label: "About",
    },
];

/// Vertical extent of one rendered section within the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBounds {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

impl SectionBounds {
    fn contains(&self, y: u16) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Picks the active section for a scroll offset: the first section whose
/// bounds contain the offset plus the lookahead.
pub fn section_at(scroll_y: u16, bounds: &[SectionBounds]) -> SectionId {
    let probe = scroll_y.saturating_add(SCROLL_LOOKAHEAD);
    bounds
        .iter()
        .find(|b| b.contains(probe))
        .or_else(|| bounds.last())
        .map(|b| b.id)
        .unwrap_or(SectionId::Home)
}

const BRAND: &str = "🌱 EcoSegrega";
/// Space around each nav label, and between the brand and the first label.
const LABEL_PAD: u16 = 2;

pub struct NavBar {
    /// Section nearest the current scroll position (prop, recomputed upstream)
    pub active: SectionId,
    /// Root scan counter, shown on the right
    pub items_scanned: u64,
}

impl NavBar {
    pub fn new(active: SectionId, items_scanned: u64) -> Self {
        Self {
            active,
            items_scanned,
        }
    }

    /// Column ranges of the rendered labels, for mouse hit testing.
    /// Must mirror the span layout in `render`.
    fn label_columns() -> Vec<(SectionId, u16, u16)> {
        let mut columns = Vec::with_capacity(NAV_SECTIONS.len());
        let mut x = BRAND.width() as u16 + LABEL_PAD;
        for section in NAV_SECTIONS {
            let width = section.label.width() as u16;
            columns.push((section.id, x, x + width));
            x += width + LABEL_PAD;
        }
        columns
    }

    /// Maps a clicked column on the nav row to a section.
    pub fn hit_test(column: u16) -> Option<SectionId> {
        Self::label_columns()
            .into_iter()
            .find(|&(_, start, end)| column >= start && column < end)
            .map(|(id, _, _)| id)
    }
}

impl Component for NavBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                BRAND,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(LABEL_PAD as usize)),
        ];

        for section in NAV_SECTIONS {
            let style = if section.id == self.active {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(section.label, style));
            spans.push(Span::raw(" ".repeat(LABEL_PAD as usize)));
        }

        let counter = format!("♻ {} scanned", self.items_scanned);
        let used: u16 = spans.iter().map(|s| s.content.width() as u16).sum();
        let gap = area
            .width
            .saturating_sub(used)
            .saturating_sub(counter.width() as u16);
        spans.push(Span::raw(" ".repeat(gap as usize)));
        spans.push(Span::styled(counter, Style::default().fg(Color::Cyan)));

        frame.render_widget(Line::from(spans), area);
    }
}
