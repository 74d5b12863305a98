//! Page composition: one tall virtual page (hero, scanner, assistant,
//! dashboard, about) inside a scroll view, plus the nav bar and cursor
//! placement. Section bounds are cached on `TuiState` each frame so the nav
//! shell and smooth scrolling can reason about positions without a redraw.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollbarVisibility};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::assistant::{self, AssistantPanel};
use crate::tui::components::hero::{HERO_HEIGHT, Hero};
use crate::tui::components::nav_bar::{NAV_SECTIONS, NavBar, SectionBounds, section_at};
use crate::tui::components::scanner::ScannerPanel;
use crate::tui::components::{DashboardPanel, SectionId};
use crate::tui::{InputMode, TuiState};

const FOOTER_HEIGHT: u16 = 4;

/// Vertical extents of every section for the current state. Heights depend
/// on content (prediction count, achievement panel), so this is recomputed
/// each frame.
pub fn compute_bounds(app: &App, tui: &TuiState) -> Vec<SectionBounds> {
    let mut bounds = Vec::with_capacity(NAV_SECTIONS.len());
    let mut top = 0;
    for section in NAV_SECTIONS {
        let height = match section.id {
            SectionId::Home => HERO_HEIGHT,
            SectionId::Scanner => ScannerPanel::height(app.predictions.len()),
            SectionId::Assistant => assistant::PANEL_HEIGHT,
            SectionId::Dashboard => DashboardPanel::height(&tui.dashboard),
            SectionId::About => FOOTER_HEIGHT,
        };
        bounds.push(SectionBounds {
            id: section.id,
            top,
            height,
        });
        top += height;
    }
    bounds
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0)]);
    let [nav_area, page_area] = layout.areas(frame.area());

    let bounds = compute_bounds(app, tui);
    let content_width = page_area.width.saturating_sub(1);
    let total_height: u16 = bounds.iter().map(|b| b.height).sum();

    let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

    for section in &bounds {
        let area = Rect::new(0, section.top, content_width, section.height);
        match section.id {
            SectionId::Home => scroll_view.render_widget(Hero::new(tui.pulse_value), area),
            SectionId::Scanner => scroll_view.render_widget(
                ScannerPanel {
                    phase: app.phase,
                    status: &app.scanner_status,
                    predictions: &app.predictions,
                    constraints: app.config.constraints,
                    pulse_intensity: tui.pulse_value,
                },
                area,
            ),
            SectionId::Assistant => scroll_view.render_widget(
                AssistantPanel {
                    log: &app.chat,
                    composing: app.composing,
                    spinner_frame,
                    input: &tui.input_box,
                },
                area,
            ),
            SectionId::Dashboard => scroll_view.render_widget(
                DashboardPanel {
                    items_scanned: app.items_scanned,
                    state: &tui.dashboard,
                },
                area,
            ),
            SectionId::About => scroll_view.render_widget(footer(), area),
        }
    }

    tui.section_bounds = bounds;
    frame.render_stateful_widget(scroll_view, page_area, &mut tui.scroll_state);

    let scroll_y = tui.scroll_state.offset().y;
    let active = section_at(scroll_y, &tui.section_bounds);
    NavBar::new(active, app.items_scanned).render(frame, nav_area);

    place_cursor(frame, app, tui, page_area, scroll_y, content_width);
}

/// Puts the terminal cursor inside the chat input when it is focused,
/// enabled, and actually on screen.
fn place_cursor(
    frame: &mut Frame,
    app: &App,
    tui: &TuiState,
    page_area: Rect,
    scroll_y: u16,
    content_width: u16,
) {
    if tui.input_mode != InputMode::Chat || app.composing {
        return;
    }
    let Some(section) = tui
        .section_bounds
        .iter()
        .find(|b| b.id == SectionId::Assistant)
    else {
        return;
    };
    // +1 steps over the input box border.
    let row_in_page = section.top + assistant::INPUT_TOP_OFFSET + 1;
    if row_in_page < scroll_y || row_in_page >= scroll_y + page_area.height {
        return;
    }
    let inner_width = content_width.saturating_sub(2);
    let x = page_area.x + 1 + tui.input_box.cursor_offset(inner_width);
    let y = page_area.y + (row_in_page - scroll_y);
    frame.set_cursor_position((x, y));
}

fn footer() -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            "Made with 💚 for a sustainable future",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("EcoSegrega v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
}
