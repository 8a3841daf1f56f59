// src/engine/progress.rs

use serde::{Deserialize, Serialize};

/// Percentage of completed tasks, clamped to `[0, 100]`. An empty graph
/// counts as done.
pub fn progress_percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (100.0 * completed as f64 / total as f64).clamp(0.0, 100.0)
}

/// Mean of the given percentages; zero when there are none.
pub fn average_progress<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Whether an algorithm finished within its deadline.
///
/// Stays `Pending` until every task completes, then latches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeadlineStatus {
    Pending,
    Met,
    Missed,
}

impl DeadlineStatus {
    /// Next status given the current progress. Once `Met` or `Missed`, the
    /// status never changes.
    pub fn latch(self, progress: f64, now: f64, deadline: f64) -> Self {
        match self {
            DeadlineStatus::Pending if progress >= 100.0 => {
                if now <= deadline {
                    DeadlineStatus::Met
                } else {
                    DeadlineStatus::Missed
                }
            }
            other => other,
        }
    }

    pub fn is_settled(self) -> bool {
        self != DeadlineStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_bounded() {
        assert_eq!(progress_percent(0, 0), 100.0);
        assert_eq!(progress_percent(3, 4), 75.0);
        assert_eq!(progress_percent(9, 4), 100.0);
    }

    #[test]
    fn status_latches_once_complete() {
        let status = DeadlineStatus::Pending.latch(50.0, 10.0, 48.0);
        assert_eq!(status, DeadlineStatus::Pending);

        let status = status.latch(100.0, 29.0, 48.0);
        assert_eq!(status, DeadlineStatus::Met);
        assert_eq!(status.latch(100.0, 99.0, 48.0), DeadlineStatus::Met);

        assert_eq!(
            DeadlineStatus::Pending.latch(100.0, 48.5, 48.0),
            DeadlineStatus::Missed
        );
    }

    #[test]
    fn averages_progress() {
        assert_eq!(average_progress([100.0, 50.0]), 75.0);
        assert_eq!(average_progress(std::iter::empty()), 0.0);
    }
}
