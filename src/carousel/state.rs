use serde::Serialize;

/// Phase of the transition lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No animation in flight; user controls are accepted.
    Idle,
    /// An animation is in flight; user controls are ignored until unlock.
    Transitioning,
}

/// The whole of the carousel's mutable state.
///
/// Mounts as `{ active_index: 0, is_transitioning: false }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CarouselState {
    pub active_index: usize,
    pub is_transitioning: bool,
}

impl CarouselState {
    pub fn phase(&self) -> Phase {
        if self.is_transitioning {
            Phase::Transitioning
        } else {
            Phase::Idle
        }
    }
}
