/// Productivity score
///
/// The analytics view summarizes completion stats as a single 0-100 score:
/// the rounded percentage of completed tasks over all tasks, 0 when the user
/// has no tasks at all.
use crate::models::task::CompletionStats;

/// Computes the productivity score from completion stats
pub fn productivity_score(stats: &CompletionStats) -> u8 {
    let total = stats.total();
    if total == 0 {
        return 0;
    }

    ((stats.completed as f64 / total as f64) * 100.0).round() as u8
}
