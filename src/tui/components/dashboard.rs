//! # Dashboard Section
//!
//! Four stat counters with an interpolated count-up whenever the user asks
//! for fresh numbers. The scan counter is a prop from core state; the other
//! three are owned here, recomputed through `sim::impact` and animated from
//! their previous values.

use std::time::{Duration, Instant};

use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::sim::ImpactStats;
use crate::sim::impact::project_impact;

/// Points threshold past which the achievement panel appears.
const ACHIEVEMENT_THRESHOLD: u64 = 50;

const HEADER_HEIGHT: u16 = 3;
const CARD_HEIGHT: u16 = 5;
const HINT_HEIGHT: u16 = 2;
const ACHIEVEMENT_HEIGHT: u16 = 4;

struct CounterAnimation {
    from: ImpactStats,
    to: ImpactStats,
    started: Instant,
    duration: Duration,
}

impl CounterAnimation {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

fn lerp_counter(from: u64, to: u64, progress: f64) -> u64 {
    (from as f64 + (to as f64 - from as f64) * progress).floor() as u64
}

/// Presentation state for the dashboard: the displayed counters and the
/// in-flight animation, if any.
pub struct DashboardState {
    stats: ImpactStats,
    anim: Option<CounterAnimation>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            stats: ImpactStats::default(),
            anim: None,
        }
    }

    pub fn stats(&self) -> ImpactStats {
        self.stats
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }

    pub fn achievement_unlocked(&self) -> bool {
        self.stats.points_earned > ACHIEVEMENT_THRESHOLD
    }

    /// Recomputes the counters and starts the count-up. Returns false (and
    /// changes nothing) while a previous animation is still in flight.
    pub fn refresh(&mut self, items_scanned: u64, now: Instant, duration: Duration) -> bool {
        self.refresh_with(&mut rand::rng(), items_scanned, now, duration)
    }

    /// As [`refresh`](Self::refresh), over a caller-supplied generator.
    pub fn refresh_with<R: Rng>(
        &mut self,
        rng: &mut R,
        items_scanned: u64,
        now: Instant,
        duration: Duration,
    ) -> bool {
        if self.anim.is_some() {
            return false;
        }
        let target = project_impact(rng, items_scanned, &self.stats);
        self.anim = Some(CounterAnimation {
            from: self.stats,
            to: target,
            started: now,
            duration,
        });
        true
    }

    /// Steps the animation. Call once per frame; settles exactly on the
    /// target when the duration elapses.
    pub fn advance(&mut self, now: Instant) {
        let Some(anim) = &self.anim else {
            return;
        };
        let progress = anim.progress(now);
        self.stats = ImpactStats {
            items_scanned: anim.to.items_scanned,
            co2_saved_kg: lerp_counter(anim.from.co2_saved_kg, anim.to.co2_saved_kg, progress),
            trees_equivalent: lerp_counter(
                anim.from.trees_equivalent,
                anim.to.trees_equivalent,
                progress,
            ),
            points_earned: lerp_counter(anim.from.points_earned, anim.to.points_earned, progress),
        };
        if progress >= 1.0 {
            self.stats = anim.to;
            self.anim = None;
        }
    }
}

pub struct DashboardPanel<'a> {
    /// Root scan counter (prop, never owned here)
    pub items_scanned: u64,
    pub state: &'a DashboardState,
}

impl DashboardPanel<'_> {
    pub fn height(state: &DashboardState) -> u16 {
        let mut height = HEADER_HEIGHT + CARD_HEIGHT + 1 + HINT_HEIGHT;
        if state.achievement_unlocked() {
            height += ACHIEVEMENT_HEIGHT;
        }
        height
    }

    fn render_card(area: Rect, buf: &mut Buffer, label: &str, value: u64, color: Color) {
        Paragraph::new(vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(area, buf);
    }
}

impl Widget for DashboardPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let achievement = self.state.achievement_unlocked();
        let mut constraints = vec![
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(CARD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(HINT_HEIGHT),
        ];
        if achievement {
            constraints.push(Constraint::Length(ACHIEVEMENT_HEIGHT));
        }
        let chunks = Layout::vertical(constraints).split(area);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "📊 Impact Dashboard",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "See how your waste segregation helps the environment!",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .render(chunks[0], buf);

        let stats = self.state.stats();
        let cards = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(chunks[1]);
        Self::render_card(cards[0], buf, "Items Scanned", self.items_scanned, Color::Blue);
        Self::render_card(cards[1], buf, "kg CO₂ Saved", stats.co2_saved_kg, Color::Green);
        Self::render_card(
            cards[2],
            buf,
            "Trees Equivalent",
            stats.trees_equivalent,
            Color::LightGreen,
        );
        Self::render_card(cards[3], buf, "Green Points", stats.points_earned, Color::Yellow);

        let hint = if self.state.is_animating() {
            Span::styled("Calculating Impact...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                "Press 'r' to update impact stats",
                Style::default().fg(Color::DarkGray),
            )
        };
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if achievement {
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "🏆 Achievement Unlocked!",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "You're making a real difference! Keep up the great work! 🌱",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(chunks[4], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    const ANIM: Duration = Duration::from_millis(1000);

    fn refreshed(state: &mut DashboardState, items: u64, now: Instant, seed: u64) -> bool {
        let mut rng = StdRng::seed_from_u64(seed);
        state.refresh_with(&mut rng, items, now, ANIM)
    }

    #[test]
    fn test_refresh_rejected_while_animating() {
        let mut state = DashboardState::new();
        let now = Instant::now();
        assert!(refreshed(&mut state, 3, now, 1));
        // Mid-flight: a second refresh must be a no-op.
        state.advance(now + Duration::from_millis(300));
        assert!(!refreshed(&mut state, 3, now + Duration::from_millis(300), 2));
        // Completed: refresh is accepted again.
        state.advance(now + ANIM);
        assert!(!state.is_animating());
        assert!(refreshed(&mut state, 3, now + ANIM, 3));
    }

    #[test]
    fn test_counters_settle_on_target() {
        let mut state = DashboardState::new();
        let now = Instant::now();
        refreshed(&mut state, 10, now, 7);
        state.advance(now + ANIM);
        let settled = state.stats();
        assert_eq!(settled.trees_equivalent, settled.co2_saved_kg / 22);
        assert!(settled.points_earned >= 10);

        // Advancing further changes nothing.
        state.advance(now + ANIM * 2);
        assert_eq!(state.stats(), settled);
    }

    #[test]
    fn test_counters_interpolate_midway() {
        let mut state = DashboardState::new();
        let now = Instant::now();
        refreshed(&mut state, 100, now, 7);
        state.advance(now + ANIM / 2);
        let midway = state.stats();
        state.advance(now + ANIM);
        let settled = state.stats();
        assert!(midway.co2_saved_kg < settled.co2_saved_kg);
        assert!(midway.points_earned < settled.points_earned);
        assert!(state.stats().points_earned >= midway.points_earned);
    }

    #[test]
    fn test_points_monotone_across_awaited_refreshes() {
        let mut state = DashboardState::new();
        let mut now = Instant::now();
        let mut last_points = 0;
        for seed in 0..10 {
            assert!(refreshed(&mut state, 0, now, seed));
            now += ANIM;
            state.advance(now);
            let points = state.stats().points_earned;
            assert!(points >= last_points);
            last_points = points;
        }
    }

    #[test]
    fn test_achievement_threshold_is_exclusive() {
        let mut state = DashboardState::new();
        state.stats.points_earned = ACHIEVEMENT_THRESHOLD;
        assert!(!state.achievement_unlocked());
        state.stats.points_earned = ACHIEVEMENT_THRESHOLD + 1;
        assert!(state.achievement_unlocked());
    }

    #[test]
    fn test_zero_duration_settles_immediately() {
        let mut state = DashboardState::new();
        let now = Instant::now();
        let mut rng = StdRng::seed_from_u64(4);
        state.refresh_with(&mut rng, 5, now, Duration::ZERO);
        state.advance(now);
        assert!(!state.is_animating());
        assert_eq!(state.stats().items_scanned, 5);
    }

    #[test]
    fn test_render_shows_cards_and_hint() {
        let state = DashboardState::new();
        let backend = TestBackend::new(100, DashboardPanel::height(&state));
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    DashboardPanel {
                        items_scanned: 12,
                        state: &state,
                    },
                    f.area(),
                );
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Impact Dashboard"));
        assert!(text.contains("Items Scanned"));
        assert!(text.contains("12"));
        assert!(text.contains("Green Points"));
        assert!(text.contains("update impact stats"));
        assert!(!text.contains("Achievement"));
    }

    #[test]
    fn test_render_achievement_panel() {
        let mut state = DashboardState::new();
        state.stats.points_earned = 80;
        let backend = TestBackend::new(100, DashboardPanel::height(&state));
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    DashboardPanel {
                        items_scanned: 0,
                        state: &state,
                    },
                    f.area(),
                );
            })
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Achievement Unlocked"));
    }
}
