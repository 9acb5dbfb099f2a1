//! HTML for the dashboard pages.

use {
    crate::controller::{ConnectionStatus, Snapshot, Tab},
    canvas_dashboard_core::{leaderboard::LeaderboardEntry, session::Session},
    std::fmt::Write,
};

const HEAD: &str = include_str!("../../html/head.html");

pub fn page(snapshot: &Snapshot) -> String {
    let mut result = String::from(HEAD);
    match snapshot.status {
        ConnectionStatus::Connected => connected(&mut result, snapshot),
        ConnectionStatus::Connecting => {
            result.push_str("<p>Connecting to Canvas... <a href=\"/\">Refresh</a></p>\n");
        }
        ConnectionStatus::Disconnected => token_form(&mut result, snapshot),
    }
    result.push_str("</body></html>");
    result
}

/// Like [`page`], with a one-off message on top unless the page already shows
/// it as the last error.
pub fn page_with_notice(snapshot: &Snapshot, notice: &str) -> String {
    let page = page(snapshot);
    if snapshot.last_error.as_deref() == Some(notice) {
        return page;
    }
    let notice = format!("<p class=\"error\">{}</p>\n", escape(notice));
    match page.find("</h1>\n") {
        Some(i) => {
            let (head, body) = page.split_at(i + "</h1>\n".len());
            format!("{head}{notice}{body}")
        }
        None => page,
    }
}

fn token_form(out: &mut String, snapshot: &Snapshot) {
    if let Some(e) = &snapshot.last_error {
        writeln!(out, "<p class=\"error\">{}</p>", escape(e)).ok();
    }
    out.push_str("<form method=\"post\" action=\"/connect\">\n");
    out.push_str("<h2>Enter Canvas Token</h2>\n");
    out.push_str(
        "<input type=\"password\" name=\"token\" placeholder=\"Your Canvas API Token\">\n",
    );
    out.push_str("<button type=\"submit\">Submit</button>\n");
    if snapshot.has_stored_token {
        out.push_str("<p>Leave the field empty to reuse your saved token.</p>\n");
    }
    out.push_str("</form>\n");
}

fn connected(out: &mut String, snapshot: &Snapshot) {
    out.push_str("<nav>");
    for tab in Tab::ALL {
        let class = if tab == snapshot.active_tab {
            " class=\"active\""
        } else {
            ""
        };
        write!(out, "<a href=\"/?tab={}\"{class}>{tab}</a>", tab.slug()).ok();
    }
    out.push_str("</nav>\n");
    out.push_str(
        "<form method=\"post\" action=\"/disconnect\"><button type=\"submit\">Go Back</button></form>\n",
    );

    let session = &snapshot.session;
    for warning in &session.warnings {
        writeln!(out, "<p class=\"warning\">{}</p>", escape(&warning.to_string())).ok();
    }

    match snapshot.active_tab {
        Tab::Courses => courses(out, session),
        Tab::Assignments => assignments(out, session),
        Tab::Grades => grades(out, session),
        Tab::Leaderboard => out.push_str(&leaderboard_table(&session.leaderboard)),
        Tab::Streaks => streaks(out, session),
    }
}

fn courses(out: &mut String, session: &Session) {
    out.push_str("<table>\n<tr><th>Course</th><th>Assignments</th><th>Submissions</th></tr>\n");
    for course in &session.courses {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&course.name),
            session.assignments(course.id).len(),
            session.submissions(course.id).len(),
        )
        .ok();
    }
    out.push_str("</table>\n");
}

fn assignments(out: &mut String, session: &Session) {
    for course in &session.courses {
        writeln!(out, "<h2>{}</h2>", escape(&course.name)).ok();
        out.push_str("<table>\n<tr><th>Assignment</th><th>Due</th><th>Points</th></tr>\n");
        for assignment in session.assignments(course.id) {
            let due = assignment
                .due_at
                .map(|due| due.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into());
            writeln!(
                out,
                "<tr><td>{}</td><td>{due}</td><td>{}</td></tr>",
                escape(&assignment.name),
                optional(assignment.points_possible),
            )
            .ok();
        }
        out.push_str("</table>\n");
    }
}

fn grades(out: &mut String, session: &Session) {
    out.push_str(
        "<table>\n<tr><th>Course</th><th>Assignments</th><th>Graded</th><th>Average</th><th>Percentage</th></tr>\n",
    );
    for course in &session.courses {
        let Some(stats) = session.stats(course.id) else {
            continue;
        };
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&course.name),
            stats.assignment_count,
            stats.graded_count,
            optional(stats.average_grade),
            percentage(stats.grade_percentage),
        )
        .ok();
    }
    out.push_str("</table>\n");
}

fn streaks(out: &mut String, session: &Session) {
    out.push_str("<table>\n<tr><th>Course</th><th>Current streak</th><th>Longest streak</th></tr>\n");
    for course in &session.courses {
        let streak = session.streak(course.id).copied().unwrap_or_default();
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&course.name),
            streak.current,
            streak.longest,
        )
        .ok();
    }
    out.push_str("</table>\n");
}

pub fn leaderboard_table(entries: &[LeaderboardEntry]) -> String {
    let mut result = String::new();
    result.push_str(
        "<table>\n<tr><th>Rank</th><th>Course</th><th>Percentage</th><th>Assignments</th></tr>\n",
    );
    for entry in entries {
        writeln!(
            result,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.rank,
            escape(&entry.course_name),
            percentage(entry.stats.grade_percentage),
            entry.stats.assignment_count,
        )
        .ok();
    }
    result.push_str("</table>\n");
    result
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

fn percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "-".into(), |v| format!("{v:.1}%"))
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
