//! One fetch cycle: probe, courses, then assignments and submissions for every
//! course, joined into a fresh [`Session`].

use {
    crate::{
        error::{FetchError, SessionError},
        lms::LmsClient,
    },
    canvas_dashboard_core::{
        model::{Course, CourseId, Token},
        session::{CourseFetch, FetchWarning, Resource, Session},
    },
    chrono::Utc,
};

/// Decides which fetched courses take part in a cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoursePolicy {
    /// Everything the backend returns.
    #[default]
    AcceptAll,
}

impl CoursePolicy {
    pub fn apply(self, courses: Vec<Course>) -> Vec<Course> {
        match self {
            Self::AcceptAll => courses,
        }
    }
}

/// The probe and the course list complete before any per-course request is
/// made. Per-course failures become warnings and empty lists.
pub async fn run(
    client: &LmsClient,
    policy: CoursePolicy,
    token: Token,
) -> Result<Session, SessionError> {
    client.probe().await?;

    let courses = client.fetch_courses(&token).await?;
    let raw_names: Vec<String> = courses.iter().map(|c| c.name.clone()).collect();
    let courses = policy.apply(courses);
    if courses.is_empty() {
        return Err(SessionError::NoCourses { raw_names });
    }
    tracing::info!("Loading {} courses", courses.len());

    let results = futures::future::join_all(
        courses
            .into_iter()
            .map(|course| fetch_course(client, &token, course)),
    )
    .await;

    let mut fetched = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();
    for (course_fetch, course_warnings) in results {
        fetched.push(course_fetch);
        warnings.extend(course_warnings);
    }
    if !warnings.is_empty() {
        tracing::warn!("Cycle finished with {} warnings", warnings.len());
    }
    Ok(Session::assemble(token, fetched, warnings, Utc::now()))
}

async fn fetch_course(
    client: &LmsClient,
    token: &Token,
    course: Course,
) -> (CourseFetch, Vec<FetchWarning>) {
    // Independent: one failing does not stop the other.
    let (assignments, submissions) = tokio::join!(
        client.fetch_assignments(token, course.id),
        client.fetch_submissions(token, course.id),
    );
    let mut warnings = Vec::new();
    let assignments = or_warn(assignments, course.id, Resource::Assignments, &mut warnings);
    let submissions = or_warn(submissions, course.id, Resource::Submissions, &mut warnings);
    let course_fetch = CourseFetch {
        course,
        assignments,
        submissions,
    };
    (course_fetch, warnings)
}

fn or_warn<T>(
    result: Result<Vec<T>, FetchError>,
    course_id: CourseId,
    resource: Resource,
    warnings: &mut Vec<FetchWarning>,
) -> Vec<T> {
    result.unwrap_or_else(|e| {
        let warning = FetchWarning {
            course_id,
            resource,
            message: e.to_string(),
        };
        tracing::warn!("{warning}");
        warnings.push(warning);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::mock_backend::{self, MockBackend},
        std::time::Duration,
    };

    fn token() -> Token {
        Token::new(mock_backend::TOKEN).unwrap()
    }

    #[tokio::test]
    async fn full_cycle() {
        let mut backend = MockBackend::with_courses(&[(1, "Algebra"), (2, "Biology")]);
        backend.assignments.insert(
            1,
            r#"[{"id": 1, "name": "HW1", "points_possible": 10},
                {"id": 2, "name": "HW2", "points_possible": 20}]"#
                .into(),
        );
        backend.submissions.insert(
            1,
            r#"[{"assignment_id": 1, "score": 8}, {"assignment_id": 2, "score": 15}]"#.into(),
        );
        backend.assignments.insert(
            2,
            r#"[{"id": 3, "name": "Lab", "points_possible": 10}]"#.into(),
        );
        backend
            .submissions
            .insert(2, r#"[{"assignment_id": 3, "score": null}]"#.into());
        let backend = mock_backend::spawn(backend).await;
        let client = LmsClient::new(&backend.url, Duration::from_secs(5)).unwrap();

        let session = run(&client, CoursePolicy::AcceptAll, token()).await.unwrap();
        assert!(session.warnings.is_empty());
        assert_eq!(session.stats(1).unwrap().grade_percentage, Some(76.7));
        assert_eq!(session.stats(2).unwrap().graded_count, 0);
        assert_eq!(session.leaderboard[0].course_name, "Algebra");
        assert_eq!(session.token(), Some(&token()));

        let hits = backend.hits();
        assert_eq!(&hits[..2], ["/", "/courses"]);
        assert_eq!(hits.len(), 6);
    }

    #[tokio::test]
    async fn per_course_failures_are_isolated() {
        let mut backend = MockBackend::with_courses(&[(1, "Algebra"), (2, "Biology")]);
        // Course 1: assignments broken, submissions fine
        backend
            .assignments
            .insert(1, r#"{"error": "boom"}"#.into());
        backend
            .submissions
            .insert(1, r#"[{"assignment_id": 4, "score": 3}]"#.into());
        // Course 2: submissions missing entirely (404)
        backend.submissions.remove(&2);
        backend
            .assignments
            .insert(2, r#"[{"id": 9, "name": "Essay", "points_possible": 5}]"#.into());
        let backend = mock_backend::spawn(backend).await;
        let client = LmsClient::new(&backend.url, Duration::from_secs(5)).unwrap();

        let session = run(&client, CoursePolicy::AcceptAll, token()).await.unwrap();
        assert_eq!(session.courses.len(), 2);

        let algebra = session.stats(1).unwrap();
        assert_eq!(algebra.assignment_count, 0);
        assert_eq!(algebra.graded_count, 1);
        assert_eq!(session.submissions(1).len(), 1);

        assert_eq!(session.assignments(2).len(), 1);
        assert!(session.submissions(2).is_empty());

        let failed: Vec<(CourseId, Resource)> = session
            .warnings
            .iter()
            .map(|w| (w.course_id, w.resource))
            .collect();
        assert_eq!(
            failed,
            vec![(1, Resource::Assignments), (2, Resource::Submissions)]
        );
    }

    #[tokio::test]
    async fn slow_course_times_out_alone() {
        let mut backend = MockBackend::with_courses(&[(1, "Algebra"), (2, "Biology")]);
        backend
            .assignments_delay
            .insert(2, Duration::from_secs(5));
        backend
            .assignments
            .insert(1, r#"[{"id": 1, "name": "HW1", "points_possible": 10}]"#.into());
        let backend = mock_backend::spawn(backend).await;
        let client = LmsClient::new(&backend.url, Duration::from_millis(300)).unwrap();

        let session = run(&client, CoursePolicy::AcceptAll, token()).await.unwrap();
        assert_eq!(session.assignments(1).len(), 1);
        assert_eq!(session.warnings.len(), 1);
        assert_eq!(session.warnings[0].course_id, 2);
        assert_eq!(session.warnings[0].message, "request timed out");
    }

    #[tokio::test]
    async fn dead_backend_short_circuits() {
        let backend = mock_backend::spawn(MockBackend {
            alive: false,
            ..MockBackend::with_courses(&[(1, "Algebra")])
        })
        .await;
        let client = LmsClient::new(&backend.url, Duration::from_secs(5)).unwrap();

        let result = run(&client, CoursePolicy::AcceptAll, token()).await;
        assert!(matches!(result, Err(SessionError::BackendUnavailable(_))));
        assert_eq!(backend.hits(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn no_courses() {
        let backend = mock_backend::spawn(MockBackend::with_courses(&[])).await;
        let client = LmsClient::new(&backend.url, Duration::from_secs(5)).unwrap();

        let result = run(&client, CoursePolicy::AcceptAll, token()).await;
        assert_eq!(
            result.unwrap_err(),
            SessionError::NoCourses {
                raw_names: Vec::new()
            }
        );
    }

    #[test]
    fn accept_all_keeps_everything() {
        let courses = vec![
            Course {
                id: 1,
                name: "Sandbox".into(),
            },
            Course {
                id: 2,
                name: String::new(),
            },
        ];
        assert_eq!(CoursePolicy::default().apply(courses.clone()), courses);
    }
}
