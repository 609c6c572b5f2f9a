//! Page navigation state machine.
//!
//! Every input channel (control clicks, swipes, drags, arrow keys) ends up in
//! [`PageNavigator::navigate`]. A page turn is accepted only when the target page is in bounds
//! and no other turn is animating; anything else is dropped without a trace at user level.
//!
//! ```text
//! Idle --(next/previous, bounds OK)--> Animating --(lock elapses)--> Idle
//! ```
//!
//! The animation lock is a deadline rather than a sleeping timer, so the navigator stays
//! responsive (and keeps rejecting) while a turn is in progress.

use log::trace;
use tokio::time::{Duration, Instant};

/// Lock duration matching the visual page-turn transition.
pub const DEFAULT_LOCK_DURATION: Duration = Duration::from_millis(800);

/// Direction of a page-turn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Navigator state: idle, or animating until a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnState {
    Idle,
    Animating { started: Instant, until: Instant },
}

/// An accepted page turn, handed to the renderer and effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTurn {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// Current page, page count and animation lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_page: usize,
    total_pages: usize,
    turn: TurnState,
}

impl NavigationState {
    fn new(total_pages: usize) -> Self {
        Self {
            current_page: 1,
            total_pages: total_pages.max(1),
            turn: TurnState::Idle,
        }
    }

    /// 1-based index of the visible page
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// True while a turn's lock deadline lies in the future.
    pub fn is_animating(&self, now: Instant) -> bool {
        match self.turn {
            TurnState::Idle => false,
            TurnState::Animating { until, .. } => now < until,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Page indicator text, e.g. `"2 / 4"`.
    pub fn indicator(&self) -> String {
        format!("{} / {}", self.current_page, self.total_pages)
    }
}

/// Guarded page counter shared by every input channel.
#[derive(Debug, Clone)]
pub struct PageNavigator {
    state: NavigationState,
    lock_duration: Duration,
}

impl PageNavigator {
    /// Create a navigator on page 1. A zero page count is treated as a single page.
    pub fn new(total_pages: usize, lock_duration: Duration) -> Self {
        Self {
            state: NavigationState::new(total_pages),
            lock_duration,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages
    }

    pub fn lock_duration(&self) -> Duration {
        self.lock_duration
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.state.is_animating(now)
    }

    /// Turn forward one page.
    pub fn next(&mut self, now: Instant) -> Option<PageTurn> {
        self.navigate(Direction::Next, now)
    }

    /// Turn back one page.
    pub fn previous(&mut self, now: Instant) -> Option<PageTurn> {
        self.navigate(Direction::Previous, now)
    }

    /// Single guarded transition. Returns `None` for out-of-bounds or locked requests.
    pub fn navigate(&mut self, direction: Direction, now: Instant) -> Option<PageTurn> {
        self.poll(now);

        if self.state.is_animating(now) {
            trace!("page turn {:?} rejected: animation in progress", direction);
            return None;
        }

        let from = self.state.current_page;
        let to = match direction {
            Direction::Next if from < self.state.total_pages => from + 1,
            Direction::Previous if from > 1 => from - 1,
            _ => {
                trace!("page turn {:?} rejected: already at page {}", direction, from);
                return None;
            }
        };

        self.state.current_page = to;
        self.state.turn = TurnState::Animating {
            started: now,
            until: now + self.lock_duration,
        };

        Some(PageTurn {
            from,
            to,
            direction,
        })
    }

    /// Release an expired lock. Returns true when the lock was released by this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state.turn {
            TurnState::Animating { until, .. } if now >= until => {
                self.state.turn = TurnState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Fraction of the running turn that has elapsed, or `None` when idle.
    pub fn flip_progress(&self, now: Instant) -> Option<f32> {
        match self.state.turn {
            TurnState::Animating { started, until } if now < until => {
                let total = until.duration_since(started).as_secs_f32();
                if total <= 0.0 {
                    return None;
                }
                let elapsed = now.saturating_duration_since(started).as_secs_f32();
                Some((elapsed / total).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCK: Duration = Duration::from_millis(800);

    #[test]
    fn starts_idle_on_first_page() {
        let nav = PageNavigator::new(4, LOCK);
        let now = Instant::now();
        assert_eq!(nav.current_page(), 1);
        assert_eq!(nav.total_pages(), 4);
        assert!(!nav.is_animating(now));
        assert_eq!(nav.state().turn, TurnState::Idle);
        assert_eq!(nav.state().indicator(), "1 / 4");
    }

    #[test]
    fn previous_on_first_page_is_noop() {
        let mut nav = PageNavigator::new(4, LOCK);
        let before = nav.state().clone();
        assert!(nav.previous(Instant::now()).is_none());
        assert_eq!(nav.state(), &before);
    }

    #[test]
    fn next_on_last_page_is_noop() {
        let mut nav = PageNavigator::new(2, LOCK);
        let t0 = Instant::now();
        assert!(nav.next(t0).is_some());

        let after_lock = t0 + LOCK;
        nav.poll(after_lock);
        let before = nav.state().clone();
        assert!(nav.next(after_lock).is_none());
        assert_eq!(nav.state(), &before);
    }

    #[test]
    fn second_call_during_lock_is_rejected() {
        let mut nav = PageNavigator::new(4, LOCK);
        let t0 = Instant::now();

        let turn = nav.next(t0).unwrap();
        assert_eq!(
            turn,
            PageTurn {
                from: 1,
                to: 2,
                direction: Direction::Next
            }
        );
        assert!(nav.next(t0).is_none());
        assert!(nav.previous(t0 + Duration::from_millis(799)).is_none());
        assert_eq!(nav.current_page(), 2);
    }

    #[test]
    fn lock_releases_exactly_at_deadline() {
        let mut nav = PageNavigator::new(4, LOCK);
        let t0 = Instant::now();
        nav.next(t0).unwrap();

        assert!(nav.is_animating(t0));
        assert!(nav.is_animating(t0 + Duration::from_millis(799)));
        assert!(!nav.poll(t0 + Duration::from_millis(799)));
        assert!(!nav.is_animating(t0 + LOCK));
        assert!(nav.poll(t0 + LOCK));
        assert_eq!(nav.state().turn, TurnState::Idle);
    }

    #[test]
    fn flip_progress_tracks_elapsed_lock() {
        let mut nav = PageNavigator::new(4, LOCK);
        let t0 = Instant::now();
        assert_eq!(nav.flip_progress(t0), None);

        nav.next(t0).unwrap();
        assert_eq!(nav.flip_progress(t0), Some(0.0));
        let half = nav.flip_progress(t0 + Duration::from_millis(400)).unwrap();
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(nav.flip_progress(t0 + LOCK), None);
    }

    #[test]
    fn zero_pages_is_single_page() {
        let mut nav = PageNavigator::new(0, LOCK);
        assert_eq!(nav.total_pages(), 1);
        assert!(nav.state().is_first_page());
        assert!(nav.state().is_last_page());
        assert!(nav.next(Instant::now()).is_none());
    }
}
