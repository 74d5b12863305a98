//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (camera live, reply composing, counters counting up,
//!   smooth scroll in flight): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.

pub mod component;
pub mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Position;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;
use tui_scrollview::ScrollViewState;

use crate::camera::{FrameSource, SimulatedCamera, StreamConstraints};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::sim::classifier::ScanModel;
use crate::sim::{KeywordEngine, ReplyEngine, SimulatedModel};
use crate::tui::component::EventHandler;
use crate::tui::components::nav_bar::{NAV_SECTIONS, NavBar, section_at};
use crate::tui::components::{DashboardState, InputBox, InputEvent, SectionBounds, SectionId};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands and section navigation.
    Browse,
    /// Text editing in the chat input. Esc switches back to Browse.
    Chat,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub input_box: InputBox,
    pub dashboard: DashboardState,
    // Page scrolling
    pub scroll_state: ScrollViewState,
    pub scroll_target: Option<u16>,
    pub section_bounds: Vec<SectionBounds>,
    // Modal input mode
    pub input_mode: InputMode,
    // Animation state
    pub pulse_value: f32,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(),
            dashboard: DashboardState::new(),
            scroll_state: ScrollViewState::default(),
            scroll_target: None,
            section_bounds: Vec::new(),
            input_mode: InputMode::Browse,
            pulse_value: 0.0,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock  // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let camera: Arc<dyn FrameSource> = Arc::new(SimulatedCamera::new(
        config.camera_access,
        config.camera_prompt_delay,
    ));
    let model: Arc<dyn ScanModel> = Arc::new(SimulatedModel::new(config.detect_probability));
    let engine: Arc<dyn ReplyEngine> = Arc::new(KeywordEngine::new(config.thinking_delay));
    let mut app = App::new(camera, model, engine, config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Abort handle for the running prediction loop (invalidated on stop, so
    // no orphaned tick can outlive the scanner)
    let mut scan_abort: Option<AbortHandle> = None;

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync InputBox props with App state
        tui.input_box.dimmed = app.composing;

        // Determine if anything is animating
        let animating = app.is_scanning()
            || app.composing
            || tui.dashboard.is_animating()
            || tui.scroll_target.is_some();

        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let now = Instant::now();
            tui.dashboard.advance(now);
            step_scroll(&mut tui);

            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of mode
            if matches!(tui_event, TuiEvent::ForceQuit) {
                let effect = update(&mut app, Action::Quit);
                handle_effect(effect, &app, &tx, &mut scan_abort, &mut should_quit);
                continue;
            }

            // Scrolling — always drives the page regardless of mode.
            // Manual scrolling cancels any smooth-scroll in flight.
            match tui_event {
                TuiEvent::ScrollUp => {
                    tui.scroll_target = None;
                    tui.scroll_state.scroll_up();
                    continue;
                }
                TuiEvent::ScrollDown => {
                    tui.scroll_target = None;
                    tui.scroll_state.scroll_down();
                    continue;
                }
                TuiEvent::ScrollPageUp => {
                    tui.scroll_target = None;
                    tui.scroll_state.scroll_page_up();
                    continue;
                }
                TuiEvent::ScrollPageDown => {
                    tui.scroll_target = None;
                    tui.scroll_state.scroll_page_down();
                    continue;
                }
                TuiEvent::ScrollToTop => {
                    tui.scroll_target = None;
                    tui.scroll_state.scroll_to_top();
                    continue;
                }
                TuiEvent::ScrollToBottom => {
                    tui.scroll_target = None;
                    tui.scroll_state.scroll_to_bottom();
                    continue;
                }
                _ => {}
            }

            // Mouse click — nav bar navigation
            if let TuiEvent::MouseClick(col, row) = tui_event {
                if row == 0
                    && let Some(id) = NavBar::hit_test(col)
                {
                    navigate_to(&mut tui, id);
                }
                continue;
            }

            // Tab cycling works in both modes
            if matches!(tui_event, TuiEvent::NextSection | TuiEvent::PrevSection) {
                let forward = matches!(tui_event, TuiEvent::NextSection);
                cycle_section(&mut tui, forward);
                continue;
            }

            // Modal event dispatch
            match tui.input_mode {
                InputMode::Chat => match tui_event {
                    TuiEvent::Escape => {
                        tui.input_mode = InputMode::Browse;
                    }
                    other => {
                        // While composing the box is dimmed and swallows
                        // everything, like the original's disabled input.
                        if let Some(input_event) = tui.input_box.handle_event(&other) {
                            match input_event {
                                InputEvent::Submit(text) => {
                                    let effect = update(&mut app, Action::SubmitQuestion(text));
                                    handle_effect(
                                        effect,
                                        &app,
                                        &tx,
                                        &mut scan_abort,
                                        &mut should_quit,
                                    );
                                }
                                InputEvent::ContentChanged => {}
                            }
                        }
                    }
                },
                InputMode::Browse => match tui_event {
                    TuiEvent::InputChar('q') => {
                        let effect = update(&mut app, Action::Quit);
                        handle_effect(effect, &app, &tx, &mut scan_abort, &mut should_quit);
                    }
                    TuiEvent::InputChar('s') => {
                        let effect = update(&mut app, Action::StartScanner);
                        handle_effect(effect, &app, &tx, &mut scan_abort, &mut should_quit);
                        navigate_to(&mut tui, SectionId::Scanner);
                    }
                    TuiEvent::InputChar('x') => {
                        let effect = update(&mut app, Action::StopScanner);
                        handle_effect(effect, &app, &tx, &mut scan_abort, &mut should_quit);
                    }
                    TuiEvent::InputChar('r') => {
                        let started = tui.dashboard.refresh(
                            app.items_scanned,
                            Instant::now(),
                            app.config.animation_duration,
                        );
                        if started {
                            navigate_to(&mut tui, SectionId::Dashboard);
                        } else {
                            debug!("Stats refresh ignored, animation in flight");
                        }
                    }
                    TuiEvent::InputChar('i') => {
                        tui.input_mode = InputMode::Chat;
                        navigate_to(&mut tui, SectionId::Assistant);
                    }
                    TuiEvent::InputChar(c @ '1'..='5') => {
                        let index = c as usize - '1' as usize;
                        navigate_to(&mut tui, NAV_SECTIONS[index].id);
                    }
                    _ => {}
                },
            }
        }

        // Handle background task actions (camera, scan ticks, replies)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            handle_effect(effect, &app, &tx, &mut scan_abort, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    // Release the camera on the way out, whatever state we're in.
    let effect = update(&mut app, Action::StopScanner);
    let mut already_quitting = true;
    handle_effect(effect, &app, &tx, &mut scan_abort, &mut already_quitting);

    ratatui::restore();
    Ok(())
}

/// Executes the I/O an `update()` asked for.
fn handle_effect(
    effect: Effect,
    app: &App,
    tx: &mpsc::Sender<Action>,
    scan_abort: &mut Option<AbortHandle>,
    should_quit: &mut bool,
) {
    match effect {
        Effect::None => {}
        Effect::Quit => *should_quit = true,
        Effect::AcquireCamera => {
            spawn_camera_acquisition(
                app.camera.clone(),
                app.config.constraints,
                app.config.model_load_delay,
                tx.clone(),
            );
        }
        Effect::StartScanLoop => {
            if let Some(handle) = scan_abort.take() {
                handle.abort();
            }
            *scan_abort = Some(spawn_scan_loop(
                app.model.clone(),
                app.config.scan_tick,
                tx.clone(),
            ));
        }
        Effect::StopScanLoop => {
            if let Some(handle) = scan_abort.take() {
                handle.abort();
                info!("Scan loop aborted");
            }
        }
        Effect::SpawnReply(question) => {
            spawn_reply(app.engine.clone(), question, tx.clone());
        }
    }
}

/// Starts a smooth scroll toward the top of the given section.
fn navigate_to(tui: &mut TuiState, id: SectionId) {
    if let Some(section) = tui.section_bounds.iter().find(|b| b.id == id) {
        tui.scroll_target = Some(section.top);
    }
}

fn cycle_section(tui: &mut TuiState, forward: bool) {
    let active = section_at(tui.scroll_state.offset().y, &tui.section_bounds);
    let current = NAV_SECTIONS
        .iter()
        .position(|s| s.id == active)
        .unwrap_or(0);
    let next = if forward {
        (current + 1) % NAV_SECTIONS.len()
    } else {
        (current + NAV_SECTIONS.len() - 1) % NAV_SECTIONS.len()
    };
    navigate_to(tui, NAV_SECTIONS[next].id);
}

/// Moves the scroll offset a quarter of the remaining distance per frame
/// (at least one row), clearing the target on arrival.
fn step_scroll(tui: &mut TuiState) {
    let Some(target) = tui.scroll_target else {
        return;
    };
    let current = tui.scroll_state.offset().y;
    if current == target {
        tui.scroll_target = None;
        return;
    }
    let step = current.abs_diff(target).div_ceil(4);
    let next = if target > current {
        current + step
    } else {
        current - step
    };
    tui.scroll_state.set_offset(Position::new(0, next));
    if next == target {
        tui.scroll_target = None;
    }
}

fn spawn_camera_acquisition(
    camera: Arc<dyn FrameSource>,
    constraints: StreamConstraints,
    model_load_delay: Duration,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning camera acquisition ({}x{})",
        constraints.width, constraints.height
    );
    tokio::spawn(async move {
        match camera.open(constraints).await {
            Ok(stream) => {
                // Simulated model load happens after the grant, like the
                // original's artificial wait before predictions start.
                tokio::time::sleep(model_load_delay).await;
                if tx.send(Action::CameraLive(stream)).is_err() {
                    warn!("Failed to send CameraLive: receiver dropped");
                }
            }
            Err(e) => {
                if tx.send(Action::CameraFailed(e)).is_err() {
                    warn!("Failed to send CameraFailed: receiver dropped");
                }
            }
        }
    });
}

/// Runs the periodic prediction loop until aborted. The first frame lands
/// immediately, then one per period.
fn spawn_scan_loop(
    model: Arc<dyn ScanModel>,
    period: Duration,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Starting scan loop ({}ms period)", period.as_millis());
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let frame = model.predict();
            if tx.send(Action::ScanTick(frame)).is_err() {
                warn!("Failed to send ScanTick: receiver dropped");
                return;
            }
        }
    });
    handle.abort_handle()
}

fn spawn_reply(engine: Arc<dyn ReplyEngine>, question: String, tx: mpsc::Sender<Action>) {
    info!("Spawning reply engine");
    tokio::spawn(async move {
        let result = engine.reply(&question).await;
        if tx.send(Action::ReplyReady(result)).is_err() {
            warn!("Failed to send ReplyReady: receiver dropped");
        }
    });
}
