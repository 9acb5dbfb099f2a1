//! Resources as the LMS proxy returns them.
//!
//! Field names follow the Canvas JSON shape (`course_id`, `due_at`, ...); the
//! camelCase spellings are accepted as aliases. Unknown fields are ignored.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

mod token;

pub use token::{Token, TokenError};

pub type CourseId = i64;
pub type AssignmentId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    /// Set by the fetcher to the course whose endpoint returned the assignment.
    #[serde(default, alias = "courseId")]
    pub course_id: CourseId,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "dueAt")]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "pointsPossible")]
    pub points_possible: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(alias = "assignmentId")]
    pub assignment_id: AssignmentId,
    #[serde(default)]
    pub score: Option<f64>,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.score.is_some()
    }
}

#[test]
fn test_canvas_payloads() {
    let assignment: Assignment = serde_json::from_str(
        r#"{"id": 4, "course_id": 9, "name": "Essay", "due_at": "2024-03-01T23:59:00Z",
            "points_possible": 20.0, "submission_types": ["online_upload"]}"#,
    )
    .unwrap();
    assert_eq!(assignment.course_id, 9);
    assert_eq!(assignment.points_possible, Some(20.0));
    assert!(assignment.due_at.is_some());

    // Canvas sends explicit nulls for undated and ungraded items
    let assignment: Assignment =
        serde_json::from_str(r#"{"id": 5, "name": "Quiz", "due_at": null, "points_possible": null}"#)
            .unwrap();
    assert_eq!(assignment.course_id, 0);
    assert_eq!(assignment.due_at, None);
    assert_eq!(assignment.points_possible, None);

    let submission: Submission =
        serde_json::from_str(r#"{"assignmentId": 5, "score": null, "workflow_state": "unsubmitted"}"#)
            .unwrap();
    assert_eq!(submission.assignment_id, 5);
    assert!(!submission.is_graded());
}
