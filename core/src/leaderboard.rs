//! Ranking of courses by grade performance.

use {
    crate::{model::CourseId, stats::CourseStats},
    serde::{Deserialize, Serialize},
    std::cmp::Ordering,
};

/// A course waiting to be ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankInput {
    pub course_id: CourseId,
    pub course_name: String,
    pub stats: CourseStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position in the leaderboard.
    pub rank: usize,
    pub course_id: CourseId,
    pub course_name: String,
    pub stats: CourseStats,
}

/// Orders by grade percentage (absent counts as 0) then assignment count,
/// both descending. Entries equal on both keys keep their input order.
pub fn rank(mut inputs: Vec<RankInput>) -> Vec<LeaderboardEntry> {
    // `sort_by` is stable
    inputs.sort_by(compare);
    inputs
        .into_iter()
        .enumerate()
        .map(|(i, input)| LeaderboardEntry {
            rank: i + 1,
            course_id: input.course_id,
            course_name: input.course_name,
            stats: input.stats,
        })
        .collect()
}

fn compare(a: &RankInput, b: &RankInput) -> Ordering {
    let percentage = |input: &RankInput| input.stats.grade_percentage.unwrap_or(0.0);
    percentage(b)
        .total_cmp(&percentage(a))
        .then_with(|| b.stats.assignment_count.cmp(&a.stats.assignment_count))
}
