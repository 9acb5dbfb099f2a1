//! Submission streaks: runs of consecutive past-due assignments that carry a
//! graded submission.

use {
    crate::model::{Assignment, AssignmentId, Submission},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::collections::HashSet,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Run ending at the most recently due assignment.
    pub current: usize,
    pub longest: usize,
}

/// Walks past-due assignments in due order; undated and future assignments
/// are skipped.
pub fn submission_streak(
    assignments: &[Assignment],
    submissions: &[Submission],
    now: DateTime<Utc>,
) -> Streak {
    let graded: HashSet<AssignmentId> = submissions
        .iter()
        .filter(|s| s.is_graded())
        .map(|s| s.assignment_id)
        .collect();

    let mut due: Vec<(DateTime<Utc>, AssignmentId)> = assignments
        .iter()
        .filter_map(|a| Some((a.due_at?, a.id)))
        .filter(|(due_at, _)| *due_at <= now)
        .collect();
    due.sort_unstable();

    let mut streak = Streak::default();
    for (_, id) in due {
        if graded.contains(&id) {
            streak.current += 1;
            streak.longest = streak.longest.max(streak.current);
        } else {
            streak.current = 0;
        }
    }
    streak
}

#[test]
fn test_submission_streak() {
    use chrono::{Duration, TimeZone};

    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let days_ago = |days: i64| Some(now - Duration::days(days));
    let assignment = |id: AssignmentId, due_at: Option<DateTime<Utc>>| Assignment {
        id,
        course_id: 1,
        name: format!("Week {id}"),
        due_at,
        points_possible: Some(10.0),
    };
    let graded = |assignment_id: AssignmentId| Submission {
        assignment_id,
        score: Some(9.0),
    };

    // Listed out of order on purpose, due order is 1..=6
    let assignments = [
        assignment(4, days_ago(14)),
        assignment(1, days_ago(35)),
        assignment(2, days_ago(28)),
        assignment(3, days_ago(21)),
        assignment(5, days_ago(7)),
        assignment(6, days_ago(1)),
        // Ignored: no due date, due in the future
        assignment(7, None),
        assignment(8, days_ago(-3)),
    ];
    let mut submissions = vec![
        graded(1),
        graded(2),
        graded(3),
        Submission {
            assignment_id: 4,
            score: None,
        },
        graded(5),
        graded(6),
        graded(7),
        graded(8),
    ];
    assert_eq!(
        submission_streak(&assignments, &submissions, now),
        Streak {
            current: 2,
            longest: 3
        }
    );

    // Missing the latest assignment breaks the current run only
    submissions.retain(|s| s.assignment_id != 6);
    assert_eq!(
        submission_streak(&assignments, &submissions, now),
        Streak {
            current: 0,
            longest: 3
        }
    );

    assert_eq!(submission_streak(&[], &submissions, now), Streak::default());
}
