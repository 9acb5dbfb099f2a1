//! Domain logic for the Canvas grade dashboard: the LMS wire model, grade
//! aggregation, streaks, leaderboard ranking and the immutable session value
//! that a fetch cycle produces.

pub mod leaderboard;
pub mod model;
pub mod session;
pub mod stats;
pub mod streak;
