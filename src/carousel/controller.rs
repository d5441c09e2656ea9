//! The carousel controller.
//!
//! [`Carousel`] owns the slide list, the [`CarouselState`] and the timers that
//! drive it. It is the only code allowed to change the state:
//!
//! - User moves ([`Carousel::next`], [`Carousel::prev`], [`Carousel::go_to`])
//!   are dropped while a transition is in flight.
//! - The auto-advance tick moves to the next slide even while locked, and
//!   restarts the lock.
//! - Every move schedules an unlock `transition` later, replacing any unlock
//!   still pending.
//!
//! ## Auto-advance policy
//!
//! Whether a move restarts the auto-advance countdown is a choice, see
//! [`RearmPolicy`]. The default keeps one repeating timer for the whole life
//! of the carousel; `on-change` restarts the countdown on every index change,
//! user-triggered or not.

use super::slides::Slides;
use super::state::CarouselState;
use super::timer::{TimerId, TimerKind, TimerQueue};
use super::view::{CarouselView, describe};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CarouselError {
    #[error("slide index {index} out of range (carousel has {len} slides)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("unknown rearm policy '{0}' (expected 'independent' or 'on-change')")]
    UnknownPolicy(String),
}

/// When the auto-advance countdown restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RearmPolicy {
    /// One repeating timer registered at mount; clicks do not touch it.
    #[default]
    Independent,
    /// Any change of the active index restarts the countdown.
    OnChange,
}

impl RearmPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RearmPolicy::Independent => "independent",
            RearmPolicy::OnChange => "on-change",
        }
    }
}

impl fmt::Display for RearmPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RearmPolicy {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "independent" => Ok(RearmPolicy::Independent),
            "on-change" => Ok(RearmPolicy::OnChange),
            other => Err(CarouselError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Timing knobs for a mounted carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Auto-advance period.
    pub interval: Duration,
    /// How long the transition lock holds after a move.
    pub transition: Duration,
    /// Whether the auto-advance timer is registered at all.
    pub autoplay: bool,
    pub rearm: RearmPolicy,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(5000),
            transition: Duration::from_millis(500),
            autoplay: true,
            rearm: RearmPolicy::Independent,
        }
    }
}

/// Result of a user move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved { from: usize, to: usize },
    /// Dropped because a transition was in flight (or the carousel is unmounted).
    Ignored,
}

/// Something a timer did while the clock advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselEvent {
    pub at: Duration,
    pub kind: EventKind,
    /// State right after the event was applied.
    pub state: CarouselState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    AutoAdvanced { from: usize, to: usize },
    Unlocked,
}

#[derive(Debug)]
pub struct Carousel {
    slides: Slides,
    state: CarouselState,
    timing: Timing,
    timers: TimerQueue,
    auto_advance: Option<TimerId>,
    unlock: Option<TimerId>,
    mounted: bool,
}

impl Carousel {
    /// Create the carousel at slide 0 and register the auto-advance timer.
    pub fn mount(slides: Slides, timing: Timing) -> Self {
        let mut carousel = Self {
            slides,
            state: CarouselState::default(),
            timing,
            timers: TimerQueue::new(),
            auto_advance: None,
            unlock: None,
            mounted: true,
        };
        carousel.arm_auto_advance();
        debug!(
            slides = carousel.slides.len(),
            interval_ms = timing.interval.as_millis() as u64,
            rearm = %timing.rearm,
            "carousel mounted"
        );
        carousel
    }

    /// Cancel every pending timer. The carousel ignores all input afterwards.
    pub fn unmount(&mut self) {
        self.timers.clear();
        self.auto_advance = None;
        self.unlock = None;
        self.mounted = false;
        debug!("carousel unmounted");
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Virtual time since mount.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// When the auto-advance timer fires next, if it is armed.
    pub fn next_auto_advance(&self) -> Option<Duration> {
        self.auto_advance.and_then(|id| self.timers.deadline_of(id))
    }

    /// Render description of the current state.
    pub fn view(&self) -> CarouselView<'_> {
        describe(&self.slides, &self.state)
    }

    pub fn next(&mut self) -> Outcome {
        let to = (self.state.active_index + 1) % self.slides.len();
        self.user_move(to)
    }

    pub fn prev(&mut self) -> Outcome {
        let len = self.slides.len();
        let to = (self.state.active_index + len - 1) % len;
        self.user_move(to)
    }

    pub fn go_to(&mut self, index: usize) -> Result<Outcome, CarouselError> {
        let len = self.slides.len();
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }
        Ok(self.user_move(index))
    }

    /// Let `elapsed` pass, firing every timer that comes due, in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<CarouselEvent> {
        let until = self.timers.now() + elapsed;
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(until) {
            let kind = match fired.kind {
                TimerKind::AutoAdvance => {
                    let from = self.state.active_index;
                    let to = self.tick();
                    EventKind::AutoAdvanced { from, to }
                }
                TimerKind::Unlock => {
                    self.unlock = None;
                    self.state.is_transitioning = false;
                    EventKind::Unlocked
                }
            };
            debug!(at_ms = fired.at.as_millis() as u64, ?kind, "timer fired");
            events.push(CarouselEvent {
                at: fired.at,
                kind,
                state: self.state,
            });
        }
        self.timers.settle(until);
        events
    }

    fn tick(&mut self) -> usize {
        let to = (self.state.active_index + 1) % self.slides.len();
        self.move_to(to);
        to
    }

    fn user_move(&mut self, to: usize) -> Outcome {
        if !self.mounted || self.state.is_transitioning {
            debug!(to, "move ignored while transitioning");
            return Outcome::Ignored;
        }
        let from = self.state.active_index;
        self.move_to(to);
        debug!(from, to, "slide changed");
        Outcome::Moved { from, to }
    }

    fn move_to(&mut self, to: usize) {
        let changed = self.state.active_index != to;
        self.state.active_index = to;
        self.state.is_transitioning = true;

        if let Some(id) = self.unlock.take() {
            self.timers.cancel(id);
        }
        self.unlock = Some(
            self.timers
                .schedule_once(self.timing.transition, TimerKind::Unlock),
        );

        if changed && self.timing.rearm == RearmPolicy::OnChange {
            self.arm_auto_advance();
        }
    }

    fn arm_auto_advance(&mut self) {
        if let Some(id) = self.auto_advance.take() {
            self.timers.cancel(id);
        }
        if self.timing.autoplay {
            self.auto_advance = Some(
                self.timers
                    .schedule_repeating(self.timing.interval, TimerKind::AutoAdvance),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn carousel(len: usize) -> Carousel {
        Carousel::mount(Slides::numbered(len).unwrap(), Timing::default())
    }

    fn manual(len: usize) -> Carousel {
        Carousel::mount(
            Slides::numbered(len).unwrap(),
            Timing {
                autoplay: false,
                ..Timing::default()
            },
        )
    }

    fn settle(c: &mut Carousel) {
        c.advance(ms(500));
    }

    #[test]
    fn mounts_idle_at_first_slide() {
        let c = carousel(3);
        assert_eq!(c.state(), CarouselState::default());
        assert!(c.is_mounted());
        assert_eq!(c.next_auto_advance(), Some(ms(5000)));
    }

    #[test]
    fn next_n_times_returns_to_start() {
        for len in 1..=5 {
            for start in 0..len {
                let mut c = manual(len);
                c.go_to(start).unwrap();
                settle(&mut c);
                for _ in 0..len {
                    assert!(matches!(c.next(), Outcome::Moved { .. }));
                    settle(&mut c);
                }
                assert_eq!(c.state().active_index, start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn prev_undoes_next() {
        for len in 1..=4 {
            for start in 0..len {
                let mut c = manual(len);
                c.go_to(start).unwrap();
                settle(&mut c);
                c.next();
                settle(&mut c);
                c.prev();
                settle(&mut c);
                assert_eq!(c.state().active_index, start);
            }
        }
    }

    #[test]
    fn go_to_sets_index_and_locks_for_transition() {
        let mut c = manual(4);
        assert_eq!(c.go_to(2), Ok(Outcome::Moved { from: 0, to: 2 }));
        assert_eq!(c.state().active_index, 2);
        assert!(c.state().is_transitioning);

        c.advance(ms(499));
        assert!(c.state().is_transitioning);
        let events = c.advance(ms(1));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Unlocked);
        assert_eq!(events[0].at, ms(500));
        assert!(!c.state().is_transitioning);
    }

    #[test]
    fn go_to_out_of_range_is_error_and_leaves_state() {
        let mut c = manual(2);
        assert_eq!(
            c.go_to(2),
            Err(CarouselError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(c.state(), CarouselState::default());
    }

    #[test]
    fn user_moves_ignored_while_transitioning() {
        let mut c = manual(3);
        c.next();
        let locked = c.state();

        assert_eq!(c.next(), Outcome::Ignored);
        assert_eq!(c.prev(), Outcome::Ignored);
        assert_eq!(c.go_to(0), Ok(Outcome::Ignored));
        assert_eq!(c.state(), locked);
    }

    #[test]
    fn two_slide_scenario() {
        let mut c = manual(2);
        assert_eq!(c.next(), Outcome::Moved { from: 0, to: 1 });
        assert_eq!(
            c.state(),
            CarouselState {
                active_index: 1,
                is_transitioning: true
            }
        );

        c.advance(ms(500));
        assert!(!c.state().is_transitioning);

        assert_eq!(c.next(), Outcome::Moved { from: 1, to: 0 });
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let mut c = manual(5);
        assert_eq!(c.prev(), Outcome::Moved { from: 0, to: 4 });
    }

    #[test]
    fn single_slide_still_locks() {
        let mut c = manual(1);
        assert_eq!(c.next(), Outcome::Moved { from: 0, to: 0 });
        assert!(c.state().is_transitioning);
        assert_eq!(c.prev(), Outcome::Ignored);
    }

    #[test]
    fn auto_advance_every_interval() {
        let mut c = carousel(2);
        let mut indices = vec![c.state().active_index];
        for _ in 0..3 {
            let events = c.advance(ms(5000));
            let ticks: Vec<_> = events
                .iter()
                .filter(|e| matches!(e.kind, EventKind::AutoAdvanced { .. }))
                .collect();
            assert_eq!(ticks.len(), 1);
            indices.push(c.state().active_index);
        }
        assert_eq!(indices, vec![0, 1, 0, 1]);
    }

    #[test]
    fn tick_locks_then_unlocks() {
        let mut c = carousel(3);
        c.advance(ms(5000));
        assert!(c.state().is_transitioning);
        assert_eq!(c.next(), Outcome::Ignored);

        c.advance(ms(500));
        assert!(!c.state().is_transitioning);
        assert_eq!(c.next(), Outcome::Moved { from: 1, to: 2 });
    }

    #[test]
    fn tick_advances_even_while_locked() {
        let mut c = carousel(3);
        c.advance(ms(4800));
        c.next();
        assert_eq!(c.state().active_index, 1);

        // The unlock is still pending when the tick lands at 5000ms.
        let events = c.advance(ms(200));
        assert_eq!(
            events[0].kind,
            EventKind::AutoAdvanced { from: 1, to: 2 }
        );
        assert!(c.state().is_transitioning);

        // The tick replaced the 5300ms unlock with one at 5500ms.
        c.advance(ms(400));
        assert!(c.state().is_transitioning);
        c.advance(ms(100));
        assert!(!c.state().is_transitioning);
    }

    #[test]
    fn independent_policy_ignores_clicks() {
        let mut c = carousel(3);
        c.advance(ms(3000));
        c.next();

        let events = c.advance(ms(2000));
        assert!(
            events
                .iter()
                .any(|e| e.at == ms(5000) && matches!(e.kind, EventKind::AutoAdvanced { .. }))
        );
    }

    #[test]
    fn on_change_policy_restarts_countdown() {
        let mut c = Carousel::mount(
            Slides::numbered(3).unwrap(),
            Timing {
                rearm: RearmPolicy::OnChange,
                ..Timing::default()
            },
        );
        c.advance(ms(3000));
        c.next();
        assert_eq!(c.next_auto_advance(), Some(ms(8000)));

        let events = c.advance(ms(2000));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e.kind, EventKind::AutoAdvanced { .. }))
        );

        let events = c.advance(ms(3000));
        assert!(events.iter().any(|e| e.at == ms(8000)
            && e.kind == EventKind::AutoAdvanced { from: 1, to: 2 }));
    }

    #[test]
    fn on_change_policy_keeps_countdown_when_index_unchanged() {
        let mut c = Carousel::mount(
            Slides::numbered(3).unwrap(),
            Timing {
                rearm: RearmPolicy::OnChange,
                ..Timing::default()
            },
        );
        c.advance(ms(1000));
        c.go_to(0).unwrap();
        assert_eq!(c.next_auto_advance(), Some(ms(5000)));
    }

    #[test]
    fn autoplay_off_never_ticks() {
        let mut c = manual(2);
        assert_eq!(c.next_auto_advance(), None);
        let events = c.advance(ms(60_000));
        assert!(events.is_empty());
        assert_eq!(c.state().active_index, 0);
    }

    #[test]
    fn unmount_before_tick_prevents_it() {
        let mut c = carousel(2);
        c.advance(ms(4999));
        c.unmount();

        let events = c.advance(ms(10_000));
        assert!(events.is_empty());
        assert_eq!(c.state().active_index, 0);
        assert!(!c.is_mounted());
        assert_eq!(c.next(), Outcome::Ignored);
    }

    #[test]
    fn unmount_cancels_pending_unlock() {
        let mut c = manual(2);
        c.next();
        c.unmount();
        c.advance(ms(1000));
        assert!(c.state().is_transitioning);
    }

    #[test]
    fn view_tracks_active_index() {
        let mut c = manual(3);
        c.go_to(2).unwrap();
        let view = c.view();
        let active: Vec<_> = view.slides.iter().map(|s| s.active).collect();
        assert_eq!(active, vec![false, false, true]);
        assert!(view.transitioning);
    }

    #[test]
    fn rearm_policy_parses_from_kebab_case() {
        assert_eq!("independent".parse(), Ok(RearmPolicy::Independent));
        assert_eq!("on-change".parse(), Ok(RearmPolicy::OnChange));
        assert!(matches!(
            "sometimes".parse::<RearmPolicy>(),
            Err(CarouselError::UnknownPolicy(_))
        ));
        assert_eq!(RearmPolicy::OnChange.to_string(), "on-change");
    }
}
