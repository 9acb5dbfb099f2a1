use {
    crate::{
        leaderboard::{self, LeaderboardEntry, RankInput},
        model::{Assignment, Course, CourseId, Submission, Token},
        stats::{self, CourseStats},
        streak::{self, Streak},
    },
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, fmt},
};

mod id;

pub use id::CycleId;

/// Which per-course resource a request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Assignments,
    Submissions,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assignments => f.write_str("assignments"),
            Self::Submissions => f.write_str("submissions"),
        }
    }
}

/// A per-course fetch that failed. The course keeps an empty list for that
/// resource and the cycle carries on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchWarning {
    pub course_id: CourseId,
    pub resource: Resource,
    pub message: String,
}

impl fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not load {} for course {}: {}",
            self.resource, self.course_id, self.message
        )
    }
}

/// Everything fetched for a single course in one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFetch {
    pub course: Course,
    pub assignments: Vec<Assignment>,
    pub submissions: Vec<Submission>,
}

/// The result of one successful fetch cycle.
///
/// A session is never patched: each cycle builds a new one with
/// [`Session::assemble`] and the previous value is dropped. The empty session
/// is the state before the first cycle and after a disconnect.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    #[serde(skip)]
    token: Option<Token>,
    pub courses: Vec<Course>,
    pub assignments_by_course: BTreeMap<CourseId, Vec<Assignment>>,
    pub submissions_by_course: BTreeMap<CourseId, Vec<Submission>>,
    pub stats_by_course: BTreeMap<CourseId, CourseStats>,
    pub streaks_by_course: BTreeMap<CourseId, Streak>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub warnings: Vec<FetchWarning>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Joins the fetched resources into per-course stats and streaks and ranks
    /// the courses. Courses keep the order they were fetched in.
    pub fn assemble(
        token: Token,
        fetched: Vec<CourseFetch>,
        warnings: Vec<FetchWarning>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut session = Self {
            token: Some(token),
            warnings,
            fetched_at: Some(now),
            ..Self::default()
        };
        let mut rank_inputs = Vec::with_capacity(fetched.len());

        for CourseFetch {
            course,
            assignments,
            submissions,
        } in fetched
        {
            let stats = stats::compute_course_stats(course.id, &assignments, &submissions);
            let streak = streak::submission_streak(&assignments, &submissions, now);
            rank_inputs.push(RankInput {
                course_id: course.id,
                course_name: course.name.clone(),
                stats,
            });
            session.stats_by_course.insert(course.id, stats);
            session.streaks_by_course.insert(course.id, streak);
            session.assignments_by_course.insert(course.id, assignments);
            session.submissions_by_course.insert(course.id, submissions);
            session.courses.push(course);
        }

        session.leaderboard = leaderboard::rank(rank_inputs);
        session
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none()
            && self.courses.is_empty()
            && self.assignments_by_course.is_empty()
            && self.submissions_by_course.is_empty()
            && self.stats_by_course.is_empty()
            && self.streaks_by_course.is_empty()
            && self.leaderboard.is_empty()
            && self.warnings.is_empty()
            && self.fetched_at.is_none()
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn assignments(&self, course_id: CourseId) -> &[Assignment] {
        self.assignments_by_course
            .get(&course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn submissions(&self, course_id: CourseId) -> &[Submission] {
        self.submissions_by_course
            .get(&course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn stats(&self, course_id: CourseId) -> Option<&CourseStats> {
        self.stats_by_course.get(&course_id)
    }

    pub fn streak(&self, course_id: CourseId) -> Option<&Streak> {
        self.streaks_by_course.get(&course_id)
    }
}

#[test]
fn test_assemble() {
    use chrono::TimeZone;

    let now = Utc.with_ymd_and_hms(2024, 9, 30, 8, 0, 0).unwrap();
    let token = Token::new("secret").unwrap();
    let assignment = |id: i64, course_id: CourseId, points: f64| Assignment {
        id,
        course_id,
        name: format!("Assignment {id}"),
        due_at: Some(now - chrono::Duration::days(id)),
        points_possible: Some(points),
    };
    let graded = |assignment_id: i64, score: f64| Submission {
        assignment_id,
        score: Some(score),
    };

    let fetched = vec![
        CourseFetch {
            course: Course {
                id: 10,
                name: "Biology".into(),
            },
            assignments: vec![assignment(1, 10, 10.0), assignment(2, 10, 20.0)],
            submissions: vec![graded(1, 8.0), graded(2, 15.0)],
        },
        // The assignment request for this course failed
        CourseFetch {
            course: Course {
                id: 20,
                name: "History".into(),
            },
            assignments: Vec::new(),
            submissions: vec![graded(3, 7.0)],
        },
        CourseFetch {
            course: Course {
                id: 30,
                name: "Physics".into(),
            },
            assignments: vec![assignment(4, 30, 10.0)],
            submissions: vec![graded(4, 10.0)],
        },
    ];
    let warnings = vec![FetchWarning {
        course_id: 20,
        resource: Resource::Assignments,
        message: "request timed out".into(),
    }];

    let session = Session::assemble(token.clone(), fetched, warnings, now);
    assert!(!session.is_empty());
    assert_eq!(session.token(), Some(&token));
    assert_eq!(
        session.courses.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![10, 20, 30]
    );

    assert_eq!(session.stats(10).unwrap().grade_percentage, Some(76.7));

    // Submissions survive a failed assignment fetch
    let history = session.stats(20).unwrap();
    assert_eq!(history.assignment_count, 0);
    assert_eq!(history.graded_count, 1);
    assert_eq!(session.submissions(20).len(), 1);
    assert!(session.assignments(20).is_empty());

    assert_eq!(session.streak(10).unwrap().longest, 2);
    assert_eq!(
        session
            .leaderboard
            .iter()
            .map(|e| (e.rank, e.course_id))
            .collect::<Vec<_>>(),
        vec![(1, 30), (2, 10), (3, 20)]
    );

    let json = serde_json::to_value(&session).unwrap();
    assert!(json.get("token").is_none());
    assert_eq!(json["warnings"][0]["resource"], "assignments");

    assert!(Session::empty().is_empty());
}
