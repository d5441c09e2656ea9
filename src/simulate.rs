//! Scripted runs of the carousel controller on a virtual clock.
//!
//! Backs the `simulate` subcommand: mount a carousel, replay user actions at
//! given times, let timers fire in between, unmount at the end, and record
//! every state change. Useful for checking what a timing configuration
//! feels like without opening a browser.
//!
//! Actions are written `<at_ms>:<action>`, e.g. `1200:next`, `3000:prev`,
//! `4500:goto=1`. Timers due at or before an action's time fire first.

use crate::carousel::{Carousel, CarouselError, CarouselEvent, CarouselState, EventKind, Outcome, Slides, Timing};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Largest slide count the `simulate` subcommand accepts.
pub const MAX_SLIDES: u64 = 100;

/// Longest run the `simulate` subcommand accepts (one hour).
pub const MAX_DURATION_MS: u64 = 3_600_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("expected <at_ms>:<action>, got '{0}'")]
    MissingSeparator(String),
    #[error("invalid time '{0}' (expected milliseconds)")]
    BadTime(String),
    #[error("unknown action '{0}' (expected next, prev or goto=<index>)")]
    UnknownAction(String),
    #[error("invalid slide index '{0}'")]
    BadIndex(String),
}

/// A user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Prev,
    GoTo(usize),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Next => f.write_str("next"),
            Action::Prev => f.write_str("prev"),
            Action::GoTo(i) => write!(f, "goto={i}"),
        }
    }
}

impl FromStr for Action {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "next" => Ok(Action::Next),
            "prev" => Ok(Action::Prev),
            other => {
                let index = other
                    .strip_prefix("goto=")
                    .ok_or_else(|| ScriptError::UnknownAction(other.to_string()))?;
                index
                    .parse()
                    .map(Action::GoTo)
                    .map_err(|_| ScriptError::BadIndex(index.to_string()))
            }
        }
    }
}

/// An action scheduled at a point on the virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedAction {
    pub at: Duration,
    pub action: Action,
}

impl FromStr for ScriptedAction {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (at, action) = s
            .split_once(':')
            .ok_or_else(|| ScriptError::MissingSeparator(s.to_string()))?;
        let at = at.trim();
        let ms: u64 = at
            .strip_suffix("ms")
            .unwrap_or(at)
            .parse()
            .map_err(|_| ScriptError::BadTime(at.to_string()))?;
        Ok(Self {
            at: Duration::from_millis(ms),
            action: action.parse()?,
        })
    }
}

/// What caused a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Mount,
    User(Action),
    /// A user action dropped by the transition lock.
    Ignored(Action),
    AutoAdvance,
    Unlock,
    Unmount,
}

impl Source {
    pub fn label(&self) -> String {
        match self {
            Source::Mount => "mount".to_string(),
            Source::User(action) | Source::Ignored(action) => action.to_string(),
            Source::AutoAdvance => "auto".to_string(),
            Source::Unlock => "unlock".to_string(),
            Source::Unmount => "unmount".to_string(),
        }
    }
}

/// One line of the simulated timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub at: Duration,
    pub source: Source,
    /// State right after the entry.
    pub state: CarouselState,
    /// `(from, to)` when the active index was (re)set.
    pub moved: Option<(usize, usize)>,
}

/// Mount, replay `script`, run until `duration`, unmount.
///
/// Actions scheduled after `duration` are dropped. An out-of-range `goto`
/// aborts the run.
pub fn run(
    slides: Slides,
    timing: Timing,
    script: &[ScriptedAction],
    duration: Duration,
) -> Result<Vec<Entry>, CarouselError> {
    let mut carousel = Carousel::mount(slides, timing);
    let mut entries = vec![Entry {
        at: carousel.now(),
        source: Source::Mount,
        state: carousel.state(),
        moved: None,
    }];

    let mut script: Vec<ScriptedAction> = script
        .iter()
        .filter(|a| a.at <= duration)
        .copied()
        .collect();
    script.sort_by_key(|a| a.at);

    for scripted in script {
        let elapsed = scripted.at.saturating_sub(carousel.now());
        record_timers(&mut entries, carousel.advance(elapsed));

        let outcome = match scripted.action {
            Action::Next => carousel.next(),
            Action::Prev => carousel.prev(),
            Action::GoTo(index) => carousel.go_to(index)?,
        };
        let (source, moved) = match outcome {
            Outcome::Moved { from, to } => (Source::User(scripted.action), Some((from, to))),
            Outcome::Ignored => (Source::Ignored(scripted.action), None),
        };
        entries.push(Entry {
            at: carousel.now(),
            source,
            state: carousel.state(),
            moved,
        });
    }

    let remaining = duration.saturating_sub(carousel.now());
    record_timers(&mut entries, carousel.advance(remaining));

    carousel.unmount();
    entries.push(Entry {
        at: carousel.now(),
        source: Source::Unmount,
        state: carousel.state(),
        moved: None,
    });

    Ok(entries)
}

fn record_timers(entries: &mut Vec<Entry>, events: Vec<CarouselEvent>) {
    entries.extend(events.into_iter().map(|event| match event.kind {
        EventKind::AutoAdvanced { from, to } => Entry {
            at: event.at,
            source: Source::AutoAdvance,
            state: event.state,
            moved: Some((from, to)),
        },
        EventKind::Unlocked => Entry {
            at: event.at,
            source: Source::Unlock,
            state: event.state,
            moved: None,
        },
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::RearmPolicy;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn at(n: u64, action: Action) -> ScriptedAction {
        ScriptedAction { at: ms(n), action }
    }

    fn indices(entries: &[Entry]) -> Vec<usize> {
        entries.iter().map(|e| e.state.active_index).collect()
    }

    #[test]
    fn parses_actions() {
        assert_eq!("1200:next".parse(), Ok(at(1200, Action::Next)));
        assert_eq!("0:prev".parse(), Ok(at(0, Action::Prev)));
        assert_eq!("4500ms:goto=1".parse(), Ok(at(4500, Action::GoTo(1))));
    }

    #[test]
    fn rejects_malformed_actions() {
        assert!(matches!(
            "next".parse::<ScriptedAction>(),
            Err(ScriptError::MissingSeparator(_))
        ));
        assert!(matches!(
            "soon:next".parse::<ScriptedAction>(),
            Err(ScriptError::BadTime(_))
        ));
        assert!(matches!(
            "10:jump".parse::<ScriptedAction>(),
            Err(ScriptError::UnknownAction(_))
        ));
        assert!(matches!(
            "10:goto=x".parse::<ScriptedAction>(),
            Err(ScriptError::BadIndex(_))
        ));
    }

    #[test]
    fn action_display_matches_syntax() {
        for action in [Action::Next, Action::Prev, Action::GoTo(3)] {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn autoplay_only_timeline() {
        let entries = run(Slides::numbered(2).unwrap(), Timing::default(), &[], ms(15_000)).unwrap();

        let sources: Vec<_> = entries.iter().map(|e| e.source).collect();
        assert_eq!(
            sources,
            vec![
                Source::Mount,
                Source::AutoAdvance,
                Source::Unlock,
                Source::AutoAdvance,
                Source::Unlock,
                Source::AutoAdvance,
                Source::Unmount,
            ]
        );
        assert_eq!(indices(&entries), vec![0, 1, 1, 0, 0, 1, 1]);

        // The third tick's unlock (15500ms) never fires
        let last = entries.last().unwrap();
        assert_eq!(last.at, ms(15_000));
        assert!(last.state.is_transitioning);
    }

    #[test]
    fn script_is_replayed_in_time_order() {
        let timing = Timing {
            autoplay: false,
            ..Timing::default()
        };
        let script = [at(2000, Action::GoTo(2)), at(1000, Action::Next)];
        let entries = run(Slides::numbered(3).unwrap(), timing, &script, ms(3000)).unwrap();

        let moves: Vec<_> = entries.iter().filter_map(|e| e.moved).collect();
        assert_eq!(moves, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn locked_action_is_recorded_as_ignored() {
        let timing = Timing {
            autoplay: false,
            ..Timing::default()
        };
        let script = [at(100, Action::Next), at(200, Action::Next)];
        let entries = run(Slides::numbered(3).unwrap(), timing, &script, ms(1000)).unwrap();

        assert_eq!(entries[2].source, Source::Ignored(Action::Next));
        assert_eq!(entries[2].state.active_index, 1);
    }

    #[test]
    fn actions_after_duration_are_dropped() {
        let timing = Timing {
            autoplay: false,
            ..Timing::default()
        };
        let script = [at(5000, Action::Next)];
        let entries = run(Slides::numbered(2).unwrap(), timing, &script, ms(1000)).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn on_change_policy_shifts_auto_advance() {
        let timing = Timing {
            rearm: RearmPolicy::OnChange,
            ..Timing::default()
        };
        let script = [at(3000, Action::Next)];
        let entries = run(Slides::numbered(3).unwrap(), timing, &script, ms(9000)).unwrap();

        let autos: Vec<_> = entries
            .iter()
            .filter(|e| e.source == Source::AutoAdvance)
            .map(|e| e.at)
            .collect();
        assert_eq!(autos, vec![ms(8000)]);
    }

    #[test]
    fn out_of_range_goto_aborts() {
        let script = [at(10, Action::GoTo(5))];
        let result = run(Slides::numbered(2).unwrap(), Timing::default(), &script, ms(100));
        assert_eq!(
            result,
            Err(CarouselError::IndexOutOfRange { index: 5, len: 2 })
        );
    }
}
