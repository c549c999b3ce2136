use std::collections::HashMap;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::filter::{self, ExamFilter};
use crate::fixtures::Fixtures;
use crate::models::{DocumentRecord, DocumentStatus};
use crate::status::document_type_label;
use crate::timefmt::{format_relative, DisplayZone};

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTypeSummary {
    pub doc_type: String,
    pub count: usize,
    pub pending: usize,
}

pub fn summarize_by_type(documents: &[DocumentRecord]) -> Vec<DocumentTypeSummary> {
    let mut map: HashMap<&str, (usize, usize)> = HashMap::new();

    for doc in documents {
        let entry = map.entry(doc.doc_type.as_str()).or_insert((0, 0));
        entry.0 += 1;
        if doc.status == DocumentStatus::Pending {
            entry.1 += 1;
        }
    }

    let mut summaries: Vec<DocumentTypeSummary> = map
        .into_iter()
        .map(|(doc_type, (count, pending))| DocumentTypeSummary {
            doc_type: doc_type.to_string(),
            count,
            pending,
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.doc_type.cmp(&b.doc_type)));
    summaries
}

pub fn build_report(fixtures: &Fixtures, zone: DisplayZone, now: DateTime<Utc>) -> String {
    let stats = &fixtures.stats;
    let mut output = String::new();

    let _ = writeln!(output, "# Examination Operations Report");
    let _ = writeln!(output, "Generated {}", zone.format_date_time(now));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");
    let _ = writeln!(output, "- Active exams: {}", stats.active_exams);
    let _ = writeln!(output, "- Registered users: {}", stats.registered_users);
    let _ = writeln!(output, "- Pending approvals: {}", stats.pending_approvals);
    let _ = writeln!(output, "- Completed exams: {}", stats.completed_exams);

    let compliance = &stats.compliance;
    let _ = writeln!(output);
    let _ = writeln!(output, "## Compliance");
    let _ = writeln!(output, "- Document submission: {}%", compliance.document_submission);
    let _ = writeln!(output, "- Staff attendance: {}%", compliance.staff_attendance);
    let _ = writeln!(output, "- Geofence compliance: {}%", compliance.geofence_compliance);
    let _ = writeln!(output, "- Report completion: {}%", compliance.report_completion);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Alerts");

    if fixtures.alerts.is_empty() {
        let _ = writeln!(output, "No open alerts.");
    } else {
        for alert in &fixtures.alerts {
            let _ = writeln!(
                output,
                "- [{}] {} ({})",
                alert.severity.tag().label(),
                alert.message,
                format_relative(alert.timestamp, now)
            );
        }
    }

    let running = filter::filter_exams(&fixtures.exams, "", ExamFilter::InProgress);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Exams in Progress");

    if running.is_empty() {
        let _ = writeln!(output, "No exams are running.");
    } else {
        for exam in running {
            let progress = exam
                .visible_completion()
                .map(|value| format!(", {value}% complete"))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "- {} on {} ({}{progress})",
                exam.title,
                zone.format_date(exam.date),
                exam.status.tag().label()
            );
        }
    }

    let upcoming = filter::filter_exams(&fixtures.exams, "", ExamFilter::Upcoming);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Upcoming Exams");

    if upcoming.is_empty() {
        let _ = writeln!(output, "No exams scheduled.");
    } else {
        for exam in upcoming {
            let _ = writeln!(
                output,
                "- {} on {}: {} centers, {} staff",
                exam.title,
                zone.format_date(exam.date),
                exam.centers,
                exam.staff
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Document Review");

    for count in filter::document_status_counts(&fixtures.documents) {
        let _ = writeln!(output, "- {}: {}", count.tag.label(), count.count);
    }
    for summary in summarize_by_type(&fixtures.documents) {
        let _ = writeln!(
            output,
            "- {}: {} submitted, {} awaiting review",
            document_type_label(&summary.doc_type),
            summary.count,
            summary.pending
        );
    }

    let mut recent = fixtures.activity.clone();
    recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Activity");

    if recent.is_empty() {
        let _ = writeln!(output, "No recorded activity.");
    } else {
        for item in recent.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} by {} ({})",
                item.message,
                item.actor.name,
                format_relative(item.timestamp, now)
            );
        }
    }

    output
}
