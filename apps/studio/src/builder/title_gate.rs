//! The "resume title confirmed" lock in front of the builder form.
//!
//! The form unlocks only after the title is non-empty and three fixed delays
//! have run back to back: a typing pause, a "typing complete" notice, and a
//! loading delay. Every new keystroke restarts the sequence; clearing the title
//! locks the form again. Phases are derived lazily from the time of the last
//! keystroke, so there are no timers to cancel.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTimings {
    pub typing_pause: Duration,
    pub complete_display: Duration,
    pub loading_delay: Duration,
}

impl Default for GateTimings {
    fn default() -> Self {
        Self {
            typing_pause: Duration::from_millis(1000),
            complete_display: Duration::from_millis(800),
            loading_delay: Duration::from_millis(1500),
        }
    }
}

impl GateTimings {
    fn total(&self) -> Duration {
        self.typing_pause + self.complete_display + self.loading_delay
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePhase {
    Locked,
    Typing,
    TypingComplete,
    Loading,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Locked,
    Pending { last_input: Instant },
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateStatus {
    pub phase: GatePhase,
    /// Time left until the form unlocks; absent when locked or unlocked.
    pub unlocks_in_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct TitleGate {
    timings: GateTimings,
    state: GateState,
}

impl TitleGate {
    pub fn new(timings: GateTimings) -> Self {
        Self {
            timings,
            state: GateState::Locked,
        }
    }

    /// Records a change of the title field at `now`.
    pub fn on_title_input(&mut self, title: &str, now: Instant) {
        if title.trim().is_empty() {
            self.state = GateState::Locked;
            return;
        }
        // once confirmed, further edits keep the form open
        if self.state != GateState::Unlocked {
            self.state = GateState::Pending { last_input: now };
        }
    }

    /// Current phase at `now`. Settles into `Unlocked` once the sequence ran out.
    pub fn poll(&mut self, now: Instant) -> GateStatus {
        let status = self.status_at(now);
        if status.phase == GatePhase::Unlocked {
            self.state = GateState::Unlocked;
        }
        status
    }

    fn status_at(&self, now: Instant) -> GateStatus {
        let last_input = match self.state {
            GateState::Locked => {
                return GateStatus {
                    phase: GatePhase::Locked,
                    unlocks_in_ms: None,
                }
            }
            GateState::Unlocked => {
                return GateStatus {
                    phase: GatePhase::Unlocked,
                    unlocks_in_ms: None,
                }
            }
            GateState::Pending { last_input } => last_input,
        };

        let t = self.timings;
        let elapsed = now.saturating_duration_since(last_input);
        let phase = if elapsed < t.typing_pause {
            GatePhase::Typing
        } else if elapsed < t.typing_pause + t.complete_display {
            GatePhase::TypingComplete
        } else if elapsed < t.total() {
            GatePhase::Loading
        } else {
            GatePhase::Unlocked
        };

        let unlocks_in_ms = (phase != GatePhase::Unlocked)
            .then(|| t.total().saturating_sub(elapsed).as_millis() as u64);
        GateStatus {
            phase,
            unlocks_in_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> TitleGate {
        TitleGate::new(GateTimings {
            typing_pause: Duration::from_millis(1000),
            complete_display: Duration::from_millis(500),
            loading_delay: Duration::from_millis(2000),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_locked() {
        let mut g = gate();
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Locked);
        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Locked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_sequence_unlocks() {
        let mut g = gate();
        g.on_title_input("Backend CV", Instant::now());

        let s = g.poll(Instant::now());
        assert_eq!(s.phase, GatePhase::Typing);
        assert_eq!(s.unlocks_in_ms, Some(3500));

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::TypingComplete);

        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Loading);

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Loading);

        tokio::time::advance(Duration::from_millis(1)).await;
        let s = g.poll(Instant::now());
        assert_eq!(s.phase, GatePhase::Unlocked);
        assert_eq!(s.unlocks_in_ms, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_restarts_pause() {
        let mut g = gate();
        g.on_title_input("B", Instant::now());
        tokio::time::advance(Duration::from_millis(900)).await;
        g.on_title_input("Ba", Instant::now());
        tokio::time::advance(Duration::from_millis(900)).await;
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Typing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_title_relocks() {
        let mut g = gate();
        g.on_title_input("CV", Instant::now());
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Unlocked);

        g.on_title_input("   ", Instant::now());
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Locked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_after_unlock_stay_unlocked() {
        let mut g = gate();
        g.on_title_input("CV", Instant::now());
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Unlocked);
        g.on_title_input("CV 2026", Instant::now());
        assert_eq!(g.poll(Instant::now()).phase, GatePhase::Unlocked);
    }
}
