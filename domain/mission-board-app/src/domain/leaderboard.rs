pub const LEADERBOARD_SIZE: usize = 10;

/// Sorts rows by score descending and keeps the top entries.
///
/// The sort is stable, so rows with equal scores keep the order they were
/// handed in (creation order when coming from a repository).
pub fn top_by_score<T>(mut rows: Vec<T>, score: impl Fn(&T) -> i64) -> Vec<T> {
    rows.sort_by(|a, b| score(b).cmp(&score(a)));
    rows.truncate(LEADERBOARD_SIZE);
    rows
}
