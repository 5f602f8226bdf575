// SPDX-License-Identifier: MPL-2.0
//! Visibility state machine for the controls overlay.
//!
//! Two resting states, `Shown` and `Hidden`, joined by timed fades. The
//! overlay opacity is derived from the phase and the current instant; it is
//! never stored. Taps are only honored while the overlay is *armed*, and the
//! armed flag changes when a fade completes, not when it starts, so a tap
//! cannot land on a control that is already fading away from view.

use crate::domain::Opacity;
use std::time::Duration;
use tokio::time::Instant;

/// Resting visibility of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    fn opacity(self) -> Opacity {
        match self {
            Self::Shown => Opacity::SHOWN,
            Self::Hidden => Opacity::HIDDEN,
        }
    }
}

/// An opacity transition in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: Opacity,
    pub target: Visibility,
    pub started: Instant,
    pub duration: Duration,
}

impl Fade {
    fn opacity_at(&self, now: Instant) -> Opacity {
        if self.duration.is_zero() {
            return self.target.opacity();
        }
        let elapsed = now.saturating_duration_since(self.started);
        let progress = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from.lerp(self.target.opacity(), progress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Resting(Visibility),
    Fading(Fade),
}

/// Outcome of asking for a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Already there or already heading there.
    Unchanged,
    /// A fade started; call [`VisibilityState::settle`] after this long.
    Started(Duration),
    /// Zero-length fade: the new resting state is already in effect.
    Settled(Visibility),
}

#[derive(Debug, Clone)]
pub struct VisibilityState {
    phase: Phase,
    armed: bool,
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityState {
    /// Starts shown and armed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Resting(Visibility::Shown),
            armed: true,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_interaction_armed(&self) -> bool {
        self.armed
    }

    /// Where the overlay is, or where it is fading to.
    #[must_use]
    pub fn heading(&self) -> Visibility {
        match self.phase {
            Phase::Resting(v) => v,
            Phase::Fading(fade) => fade.target,
        }
    }

    #[must_use]
    pub fn is_resting(&self, visibility: Visibility) -> bool {
        self.phase == Phase::Resting(visibility)
    }

    #[must_use]
    pub fn opacity(&self, now: Instant) -> Opacity {
        match self.phase {
            Phase::Resting(v) => v.opacity(),
            Phase::Fading(fade) => fade.opacity_at(now),
        }
    }

    /// Fades towards `target`, starting from the current opacity.
    ///
    /// Reversing a fade midway keeps the armed flag as it was.
    pub fn begin(&mut self, target: Visibility, now: Instant, duration: Duration) -> Transition {
        if self.heading() == target {
            return Transition::Unchanged;
        }
        if duration.is_zero() {
            self.rest(target);
            return Transition::Settled(target);
        }
        self.phase = Phase::Fading(Fade {
            from: self.opacity(now),
            target,
            started: now,
            duration,
        });
        Transition::Started(duration)
    }

    /// Shows the overlay and arms it immediately, even mid-fade.
    pub fn force_shown(&mut self, now: Instant, duration: Duration) -> Transition {
        self.armed = true;
        if self.is_resting(Visibility::Shown) {
            return Transition::Unchanged;
        }
        if duration.is_zero() {
            self.rest(Visibility::Shown);
            return Transition::Settled(Visibility::Shown);
        }
        self.phase = Phase::Fading(Fade {
            from: self.opacity(now),
            target: Visibility::Shown,
            started: now,
            duration,
        });
        Transition::Started(duration)
    }

    /// Completes the current fade. Returns the new resting state.
    pub fn settle(&mut self) -> Option<Visibility> {
        match self.phase {
            Phase::Fading(fade) => {
                self.rest(fade.target);
                Some(fade.target)
            }
            Phase::Resting(_) => None,
        }
    }

    fn rest(&mut self, visibility: Visibility) {
        self.phase = Phase::Resting(visibility);
        self.armed = visibility == Visibility::Shown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const FADE: Duration = Duration::from_millis(500);

    #[test]
    fn starts_shown_and_armed() {
        let state = VisibilityState::new();
        assert!(state.is_resting(Visibility::Shown));
        assert!(state.is_interaction_armed());
        assert_eq!(state.opacity(Instant::now()), Opacity::SHOWN);
    }

    #[test]
    fn hide_fade_interpolates_and_stays_armed_until_settled() {
        let mut state = VisibilityState::new();
        let t0 = Instant::now();
        assert_eq!(
            state.begin(Visibility::Hidden, t0, FADE),
            Transition::Started(FADE)
        );

        assert_abs_diff_eq!(state.opacity(t0).value(), 1.0);
        assert_abs_diff_eq!(
            state.opacity(t0 + Duration::from_millis(250)).value(),
            0.5,
            epsilon = 1e-4
        );
        assert_abs_diff_eq!(state.opacity(t0 + FADE * 2).value(), 0.0);
        assert!(state.is_interaction_armed());

        assert_eq!(state.settle(), Some(Visibility::Hidden));
        assert!(!state.is_interaction_armed());
        assert!(state.is_resting(Visibility::Hidden));
    }

    #[test]
    fn show_fade_arms_only_when_settled() {
        let mut state = VisibilityState::new();
        let t0 = Instant::now();
        state.begin(Visibility::Hidden, t0, FADE);
        state.settle();

        state.begin(Visibility::Shown, t0, FADE);
        assert!(!state.is_interaction_armed());
        assert_eq!(state.heading(), Visibility::Shown);

        assert_eq!(state.settle(), Some(Visibility::Shown));
        assert!(state.is_interaction_armed());
    }

    #[test]
    fn begin_towards_current_heading_is_unchanged() {
        let mut state = VisibilityState::new();
        let t0 = Instant::now();
        assert_eq!(
            state.begin(Visibility::Shown, t0, FADE),
            Transition::Unchanged
        );
        state.begin(Visibility::Hidden, t0, FADE);
        assert_eq!(
            state.begin(Visibility::Hidden, t0, FADE),
            Transition::Unchanged
        );
    }

    #[test]
    fn reversing_midway_starts_from_current_opacity() {
        let mut state = VisibilityState::new();
        let t0 = Instant::now();
        state.begin(Visibility::Hidden, t0, FADE);

        let mid = t0 + Duration::from_millis(250);
        state.begin(Visibility::Shown, mid, FADE);
        assert_abs_diff_eq!(state.opacity(mid).value(), 0.5, epsilon = 1e-4);
        // Never settled hidden, so still armed.
        assert!(state.is_interaction_armed());
    }

    #[test]
    fn zero_duration_settles_immediately() {
        let mut state = VisibilityState::new();
        assert_eq!(
            state.begin(Visibility::Hidden, Instant::now(), Duration::ZERO),
            Transition::Settled(Visibility::Hidden)
        );
        assert!(!state.is_interaction_armed());
    }

    #[test]
    fn force_shown_arms_immediately() {
        let mut state = VisibilityState::new();
        let t0 = Instant::now();
        state.begin(Visibility::Hidden, t0, FADE);
        state.settle();
        assert!(!state.is_interaction_armed());

        let transition = state.force_shown(t0, Duration::from_millis(100));
        assert_eq!(transition, Transition::Started(Duration::from_millis(100)));
        assert!(state.is_interaction_armed());
        assert_eq!(state.settle(), Some(Visibility::Shown));
    }

    #[test]
    fn settle_without_fade_is_none() {
        let mut state = VisibilityState::new();
        assert_eq!(state.settle(), None);
    }
}
