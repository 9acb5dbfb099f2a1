//! Per-course grade statistics.

use {
    crate::model::{Assignment, AssignmentId, CourseId, Submission},
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseStats {
    pub assignment_count: usize,
    pub graded_count: usize,
    pub average_grade: Option<f64>,
    pub grade_percentage: Option<f64>,
}

/// Grade summary for one course.
///
/// Only assignments belonging to `course_id` are considered. Ungraded
/// submissions (no score) are ignored entirely. The percentage is
/// points-weighted: the sum of graded scores over the sum of the matching
/// assignments' points possible. A graded submission whose assignment is
/// unknown, or has no points possible, still adds its score to the numerator
/// but nothing to the denominator.
///
/// `assignment_count` counts assignments as listed; a repeated id counts
/// each time it appears.
pub fn compute_course_stats(
    course_id: CourseId,
    assignments: &[Assignment],
    submissions: &[Submission],
) -> CourseStats {
    let in_course: Vec<&Assignment> = assignments
        .iter()
        .filter(|a| a.course_id == course_id)
        .collect();
    let assignment_count = in_course.len();
    let points_by_assignment: HashMap<AssignmentId, Option<f64>> = in_course
        .iter()
        .map(|a| (a.id, a.points_possible))
        .collect();
    let graded_count = submissions.iter().filter(|s| s.is_graded()).count();

    // Without assignments there is nothing to grade against.
    if assignment_count == 0 {
        return CourseStats {
            graded_count,
            ..CourseStats::default()
        };
    }

    let mut score_sum = 0.0;
    let mut points_sum = 0.0;
    for submission in submissions {
        let Some(score) = submission.score else {
            continue;
        };
        score_sum += score;
        if let Some(Some(points)) = points_by_assignment.get(&submission.assignment_id) {
            points_sum += points;
        }
    }

    let average_grade =
        (graded_count > 0).then(|| round_one_decimal(score_sum / graded_count as f64));
    let grade_percentage =
        (points_sum > 0.0).then(|| round_one_decimal(score_sum / points_sum * 100.0));

    CourseStats {
        assignment_count,
        graded_count,
        average_grade,
        grade_percentage,
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: AssignmentId, points_possible: Option<f64>) -> Assignment {
        Assignment {
            id,
            course_id: 1,
            name: format!("Assignment {id}"),
            due_at: None,
            points_possible,
        }
    }

    fn submission(assignment_id: AssignmentId, score: Option<f64>) -> Submission {
        Submission {
            assignment_id,
            score,
        }
    }

    #[test]
    fn weighted_percentage() {
        let assignments = [assignment(1, Some(10.0)), assignment(2, Some(20.0))];
        let submissions = [submission(1, Some(8.0)), submission(2, Some(15.0))];
        let stats = compute_course_stats(1, &assignments, &submissions);
        assert_eq!(stats.assignment_count, 2);
        assert_eq!(stats.graded_count, 2);
        assert_eq!(stats.average_grade, Some(11.5));
        // (8 + 15) / (10 + 20) * 100
        assert_eq!(stats.grade_percentage, Some(76.7));
    }

    #[test]
    fn ungraded_submissions_are_ignored() {
        let assignments = [
            assignment(1, Some(10.0)),
            assignment(2, Some(20.0)),
            assignment(3, Some(50.0)),
        ];
        let graded = [submission(1, Some(8.0)), submission(2, Some(15.0))];
        let mut with_ungraded = graded.to_vec();
        with_ungraded.push(submission(3, None));

        let expected = compute_course_stats(1, &assignments, &graded);
        let stats = compute_course_stats(1, &assignments, &with_ungraded);
        assert_eq!(stats.graded_count, 2);
        assert_eq!(stats.average_grade, expected.average_grade);
        assert_eq!(stats.grade_percentage, expected.grade_percentage);
    }

    #[test]
    fn zero_assignments() {
        let submissions = [submission(1, Some(8.0))];
        let stats = compute_course_stats(1, &[], &submissions);
        assert_eq!(
            stats,
            CourseStats {
                assignment_count: 0,
                graded_count: 1,
                average_grade: None,
                grade_percentage: None,
            }
        );
    }

    #[test]
    fn nothing_graded() {
        let assignments = [assignment(1, Some(10.0))];
        let submissions = [submission(1, None)];
        let stats = compute_course_stats(1, &assignments, &submissions);
        assert_eq!(stats.assignment_count, 1);
        assert_eq!(stats.graded_count, 0);
        assert_eq!(stats.average_grade, None);
        assert_eq!(stats.grade_percentage, None);
    }

    #[test]
    fn unknown_points_do_not_count_in_denominator() {
        let assignments = [assignment(1, Some(10.0)), assignment(2, None)];
        // Assignment 2 has no points possible and assignment 7 is unknown
        let submissions = [
            submission(1, Some(5.0)),
            submission(2, Some(3.0)),
            submission(7, Some(2.0)),
        ];
        let stats = compute_course_stats(1, &assignments, &submissions);
        assert_eq!(stats.graded_count, 3);
        assert_eq!(stats.average_grade, Some(3.3));
        assert_eq!(stats.grade_percentage, Some(100.0));

        let stats = compute_course_stats(1, &[assignment(2, None)], &[submission(2, Some(3.0))]);
        assert_eq!(stats.graded_count, 1);
        assert_eq!(stats.average_grade, Some(3.0));
        assert_eq!(stats.grade_percentage, None);
    }

    #[test]
    fn other_courses_are_excluded() {
        let mut foreign = assignment(2, Some(90.0));
        foreign.course_id = 2;
        let assignments = [assignment(1, Some(10.0)), foreign];
        let submissions = [submission(1, Some(10.0))];
        let stats = compute_course_stats(1, &assignments, &submissions);
        assert_eq!(stats.assignment_count, 1);
        assert_eq!(stats.grade_percentage, Some(100.0));
    }

    #[test]
    fn repeated_assignment_ids_are_counted() {
        let assignments = [assignment(1, Some(10.0)), assignment(1, Some(10.0))];
        let submissions = [submission(1, Some(5.0))];
        let stats = compute_course_stats(1, &assignments, &submissions);
        assert_eq!(stats.assignment_count, 2);
        assert_eq!(stats.grade_percentage, Some(50.0));
    }
}
