//! Timing and retry policy for swapping the player vehicle's model.
//!
//! The swap waits for the host scene to settle, then searches for the
//! placeholder vehicle. Misses are retried after a fixed backoff, up to an
//! optional attempt limit. The engine-facing side supplies the search and
//! performs the actual node replacement; this type only decides when.

use std::time::Duration;

use crate::config::VehicleSwapConfig;
use crate::error::SceneryError;

#[derive(Debug)]
pub enum SwapPhase<T> {
    Settling { elapsed: Duration },
    Searching { attempts: u32, until_next: Duration },
    /// Target found; waiting for the replacement model.
    Loading { target: T, attempts: u32 },
    Done,
    Failed(SceneryError),
}

/// Something worth reporting that happened during `advance`.
#[derive(Debug, PartialEq, Eq)]
pub enum SwapStep {
    SearchMissed { attempts: u32 },
    TargetFound { attempts: u32 },
    GaveUp { attempts: u32 },
}

/// Delays and the retry limit are read from the config passed to each
/// `advance`, so a host may replace the config at any time.
#[derive(Debug)]
pub struct VehicleSwap<T> {
    phase: SwapPhase<T>,
}

impl<T> Default for VehicleSwap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VehicleSwap<T> {
    pub fn new() -> Self {
        Self {
            phase: SwapPhase::Settling {
                elapsed: Duration::ZERO,
            },
        }
    }

    pub fn phase(&self) -> &SwapPhase<T> {
        &self.phase
    }

    pub fn target(&self) -> Option<&T> {
        match &self.phase {
            SwapPhase::Loading { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SwapPhase::Done | SwapPhase::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self.phase {
            SwapPhase::Settling { .. } => "waiting for scene",
            SwapPhase::Searching { .. } => "searching",
            SwapPhase::Loading { .. } => "loading model",
            SwapPhase::Done => "replaced",
            SwapPhase::Failed(_) => "failed",
        }
    }

    /// Advance timers by `delta`; runs `search` when a search is due.
    pub fn advance(
        &mut self,
        delta: Duration,
        config: &VehicleSwapConfig,
        search: impl FnOnce() -> Option<T>,
    ) -> Option<SwapStep> {
        let attempts = match &mut self.phase {
            SwapPhase::Settling { elapsed } => {
                *elapsed = elapsed.saturating_add(delta);
                if *elapsed < config.settle_delay() {
                    return None;
                }
                0
            }
            SwapPhase::Searching {
                attempts,
                until_next,
            } => {
                if delta < *until_next {
                    *until_next -= delta;
                    return None;
                }
                *attempts
            }
            _ => return None,
        };
        Some(self.search_now(attempts, config, search))
    }

    fn search_now(
        &mut self,
        previous: u32,
        config: &VehicleSwapConfig,
        search: impl FnOnce() -> Option<T>,
    ) -> SwapStep {
        let attempts = previous.saturating_add(1);
        match search() {
            Some(target) => {
                self.phase = SwapPhase::Loading { target, attempts };
                SwapStep::TargetFound { attempts }
            }
            None if config
                .max_search_attempts
                .is_some_and(|max| attempts >= max) =>
            {
                self.phase = SwapPhase::Failed(SceneryError::SceneNotFound { attempts });
                SwapStep::GaveUp { attempts }
            }
            None => {
                self.phase = SwapPhase::Searching {
                    attempts,
                    until_next: config.retry_backoff(),
                };
                SwapStep::SearchMissed { attempts }
            }
        }
    }

    /// The target disappeared while its replacement was loading; search again
    /// on the next `advance`.
    pub fn target_lost(&mut self) {
        if let SwapPhase::Loading { attempts, .. } = self.phase {
            self.phase = SwapPhase::Searching {
                attempts,
                until_next: Duration::ZERO,
            };
        }
    }

    pub fn complete(&mut self) {
        self.phase = SwapPhase::Done;
    }

    pub fn fail(&mut self, error: SceneryError) {
        self.phase = SwapPhase::Failed(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn config(max: Option<u32>) -> VehicleSwapConfig {
        VehicleSwapConfig {
            max_search_attempts: max,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_search_during_settle_delay() {
        let cfg = config(Some(3));
        let mut s = VehicleSwap::<&str>::new();
        let step = s.advance(SECOND, &cfg, || panic!("searched too early"));
        assert_eq!(step, None);
        assert_eq!(s.label(), "waiting for scene");
    }

    #[test]
    fn test_found_after_settle() {
        let cfg = config(Some(3));
        let mut s = VehicleSwap::new();
        s.advance(SECOND, &cfg, || None);
        let step = s.advance(SECOND, &cfg, || Some("car"));
        assert_eq!(step, Some(SwapStep::TargetFound { attempts: 1 }));
        assert_eq!(s.target(), Some(&"car"));
    }

    #[test]
    fn test_retries_with_backoff_then_finds() {
        let cfg = config(Some(5));
        let mut s = VehicleSwap::new();
        assert_eq!(
            s.advance(2 * SECOND, &cfg, || None),
            Some(SwapStep::SearchMissed { attempts: 1 })
        );
        // Half the backoff: no search.
        assert_eq!(
            s.advance(SECOND / 2, &cfg, || panic!("backoff ignored")),
            None
        );
        assert_eq!(
            s.advance(SECOND / 2, &cfg, || None),
            Some(SwapStep::SearchMissed { attempts: 2 })
        );
        assert_eq!(
            s.advance(SECOND, &cfg, || Some("roadster")),
            Some(SwapStep::TargetFound { attempts: 3 })
        );
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let cfg = config(Some(2));
        let mut s = VehicleSwap::new();
        s.advance(2 * SECOND, &cfg, || None);
        let step = s.advance(SECOND, &cfg, || None);
        assert_eq!(step, Some(SwapStep::GaveUp { attempts: 2 }));
        assert!(s.is_finished());
        assert!(matches!(
            s.phase(),
            SwapPhase::Failed(SceneryError::SceneNotFound { attempts: 2 })
        ));
        // Finished swaps ignore further time.
        assert_eq!(s.advance(10 * SECOND, &cfg, || Some("late")), None);
    }

    #[test]
    fn test_unbounded_keeps_retrying() {
        let cfg = config(None);
        let mut s = VehicleSwap::<&str>::new();
        s.advance(2 * SECOND, &cfg, || None);
        for _ in 0..500 {
            s.advance(SECOND, &cfg, || None);
        }
        assert!(!s.is_finished());
        assert!(matches!(
            s.phase(),
            SwapPhase::Searching { attempts: 501, .. }
        ));
    }

    #[test]
    fn test_config_change_applies_mid_swap() {
        let mut s = VehicleSwap::<&str>::new();
        s.advance(SECOND, &config(Some(30)), || None);

        // Settle delay shortened after the first second already elapsed.
        let shorter = VehicleSwapConfig {
            settle_delay_secs: 0.5,
            max_search_attempts: Some(1),
            ..Default::default()
        };
        let step = s.advance(Duration::ZERO, &shorter, || None);
        assert_eq!(step, Some(SwapStep::GaveUp { attempts: 1 }));
    }

    #[test]
    fn test_lost_target_searches_immediately() {
        let cfg = config(Some(10));
        let mut s = VehicleSwap::new();
        s.advance(2 * SECOND, &cfg, || Some("car"));
        s.target_lost();
        assert_eq!(s.target(), None);
        assert_eq!(
            s.advance(Duration::ZERO, &cfg, || Some("car2")),
            Some(SwapStep::TargetFound { attempts: 2 })
        );
    }

    #[test]
    fn test_complete_and_fail_finish() {
        let mut s = VehicleSwap::<&str>::new();
        s.complete();
        assert!(s.is_finished());
        assert_eq!(s.label(), "replaced");

        let mut s = VehicleSwap::<&str>::new();
        s.fail(SceneryError::AssetLoad {
            path: "x.glb".to_string(),
            reason: "bad".to_string(),
        });
        assert_eq!(s.label(), "failed");
    }
}
