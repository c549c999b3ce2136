use std::str::FromStr;

use log::debug;

use crate::models::{
    DocumentRecord, DocumentStatus, ExamRecord, ExamStatus, StatusCount, UserRecord, UserStatus,
};
use crate::status::StatusTag;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown {kind} filter '{tag}' (expected one of: {expected})")]
    UnknownTag {
        kind: &'static str,
        tag: String,
        expected: &'static str,
    },
}

/// Records that can be matched by the free-text search box.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for UserRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.location.as_str()]
    }
}

impl Searchable for ExamRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

impl Searchable for DocumentRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.doc_type.as_str(),
            self.submitted_by.name.as_str(),
        ]
    }
}

/// Lowercased search text. An empty query matches every record.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.to_lowercase(),
        }
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        self.needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Stable filter: keeps source order and never copies records.
pub fn filter_records<'a, T, F>(records: &'a [T], query: &SearchQuery, keep: F) -> Vec<&'a T>
where
    T: Searchable,
    F: Fn(&T) -> bool,
{
    records
        .iter()
        .filter(|record| query.matches(*record) && keep(*record))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserFilter {
    #[default]
    All,
    Status(UserStatus),
}

impl UserFilter {
    pub fn accepts(self, status: UserStatus) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::Status(wanted) => wanted == status,
        }
    }
}

impl FromStr for UserFilter {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "all" => Ok(UserFilter::All),
            "active" => Ok(UserFilter::Status(UserStatus::Active)),
            "inactive" => Ok(UserFilter::Status(UserStatus::Inactive)),
            "pending" => Ok(UserFilter::Status(UserStatus::Pending)),
            other => Err(FilterError::UnknownTag {
                kind: "user",
                tag: other.to_string(),
                expected: "all, active, inactive, pending",
            }),
        }
    }
}

/// Exam list tabs. Each tab groups one or more underlying statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExamFilter {
    #[default]
    All,
    Upcoming,
    InProgress,
    Completed,
}

impl ExamFilter {
    pub fn statuses(self) -> &'static [ExamStatus] {
        match self {
            ExamFilter::All => &[
                ExamStatus::Preparation,
                ExamStatus::StaffAssignment,
                ExamStatus::Installation,
                ExamStatus::InProgress,
                ExamStatus::Completed,
            ],
            ExamFilter::Upcoming => &[ExamStatus::Preparation, ExamStatus::StaffAssignment],
            ExamFilter::InProgress => &[ExamStatus::InProgress, ExamStatus::Installation],
            ExamFilter::Completed => &[ExamStatus::Completed],
        }
    }

    pub fn accepts(self, status: ExamStatus) -> bool {
        self.statuses().contains(&status)
    }
}

impl FromStr for ExamFilter {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "all" => Ok(ExamFilter::All),
            "upcoming" => Ok(ExamFilter::Upcoming),
            "in_progress" => Ok(ExamFilter::InProgress),
            "completed" => Ok(ExamFilter::Completed),
            other => Err(FilterError::UnknownTag {
                kind: "exam",
                tag: other.to_string(),
                expected: "all, upcoming, in_progress, completed",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFilter {
    #[default]
    All,
    Status(DocumentStatus),
}

impl DocumentFilter {
    pub fn accepts(self, status: DocumentStatus) -> bool {
        match self {
            DocumentFilter::All => true,
            DocumentFilter::Status(wanted) => wanted == status,
        }
    }
}

impl FromStr for DocumentFilter {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "all" => Ok(DocumentFilter::All),
            "pending" => Ok(DocumentFilter::Status(DocumentStatus::Pending)),
            "approved" => Ok(DocumentFilter::Status(DocumentStatus::Approved)),
            "rejected" => Ok(DocumentFilter::Status(DocumentStatus::Rejected)),
            other => Err(FilterError::UnknownTag {
                kind: "document",
                tag: other.to_string(),
                expected: "all, pending, approved, rejected",
            }),
        }
    }
}

/// Monitoring tabs: installation day, exam day and closure day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitoringPhase {
    #[default]
    Installation,
    ExamDay,
    Closure,
}

impl MonitoringPhase {
    pub fn title(self) -> &'static str {
        match self {
            MonitoringPhase::Installation => "Installation Day",
            MonitoringPhase::ExamDay => "Exam Day",
            MonitoringPhase::Closure => "Closure Day",
        }
    }

    pub fn accepts(self, status: ExamStatus) -> bool {
        match self {
            MonitoringPhase::Installation => {
                matches!(status, ExamStatus::Installation | ExamStatus::Preparation)
            }
            MonitoringPhase::ExamDay => status == ExamStatus::InProgress,
            MonitoringPhase::Closure => status == ExamStatus::Completed,
        }
    }
}

impl FromStr for MonitoringPhase {
    type Err = FilterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "installation" => Ok(MonitoringPhase::Installation),
            "exam_day" => Ok(MonitoringPhase::ExamDay),
            "closure" => Ok(MonitoringPhase::Closure),
            other => Err(FilterError::UnknownTag {
                kind: "monitoring",
                tag: other.to_string(),
                expected: "installation, exam_day, closure",
            }),
        }
    }
}

pub fn filter_users<'a>(
    users: &'a [UserRecord],
    query: &str,
    filter: UserFilter,
) -> Vec<&'a UserRecord> {
    let matched = filter_records(users, &SearchQuery::new(query), |user| {
        filter.accepts(user.status)
    });
    debug!("users: {} of {} match {query:?} / {filter:?}", matched.len(), users.len());
    matched
}

pub fn filter_exams<'a>(
    exams: &'a [ExamRecord],
    query: &str,
    filter: ExamFilter,
) -> Vec<&'a ExamRecord> {
    let matched = filter_records(exams, &SearchQuery::new(query), |exam| {
        filter.accepts(exam.status)
    });
    debug!("exams: {} of {} match {query:?} / {filter:?}", matched.len(), exams.len());
    matched
}

pub fn filter_documents<'a>(
    documents: &'a [DocumentRecord],
    query: &str,
    filter: DocumentFilter,
) -> Vec<&'a DocumentRecord> {
    let matched = filter_records(documents, &SearchQuery::new(query), |doc| {
        filter.accepts(doc.status)
    });
    debug!(
        "documents: {} of {} match {query:?} / {filter:?}",
        matched.len(),
        documents.len()
    );
    matched
}

pub fn exams_in_phase(exams: &[ExamRecord], phase: MonitoringPhase) -> Vec<&ExamRecord> {
    exams.iter().filter(|exam| phase.accepts(exam.status)).collect()
}

/// Counts per tag over the whole collection, in the order of `tags`.
pub fn count_by_status<T, F>(records: &[T], tags: &[StatusTag], tag_of: F) -> Vec<StatusCount>
where
    F: Fn(&T) -> StatusTag,
{
    tags.iter()
        .map(|tag| StatusCount {
            tag: tag.clone(),
            count: records.iter().filter(|record| tag_of(*record) == *tag).count(),
        })
        .collect()
}

pub fn user_status_counts(users: &[UserRecord]) -> Vec<StatusCount> {
    count_by_status(
        users,
        &[StatusTag::Active, StatusTag::Inactive, StatusTag::Pending],
        |user| user.status.tag(),
    )
}

pub fn document_status_counts(documents: &[DocumentRecord]) -> Vec<StatusCount> {
    count_by_status(
        documents,
        &[StatusTag::Pending, StatusTag::Approved, StatusTag::Rejected],
        |doc| doc.status.tag(),
    )
}

/// `1 User`, `3 Users`.
pub fn count_heading(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserRef};
    use chrono::{TimeZone, Utc};

    fn user(id: &str, name: &str, status: UserStatus) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1 555 0100".to_string(),
            role: Role::Proctor,
            status,
            location: "Boston, MA".to_string(),
            avatar: None,
        }
    }

    fn exam(id: &str, title: &str, status: ExamStatus) -> ExamRecord {
        ExamRecord {
            id: id.to_string(),
            title: title.to_string(),
            date: Utc.with_ymd_and_hms(2023, 10, 20, 9, 0, 0).unwrap(),
            centers: 4,
            staff: 16,
            status,
            completion: None,
        }
    }

    fn document(id: &str, title: &str, doc_type: &str, status: DocumentStatus) -> DocumentRecord {
        DocumentRecord {
            id: id.to_string(),
            doc_type: doc_type.to_string(),
            title: title.to_string(),
            submitted_by: UserRef {
                id: "user-1".to_string(),
                name: "Mark Proctor".to_string(),
            },
            submitted_at: Utc.with_ymd_and_hms(2023, 10, 14, 16, 0, 0).unwrap(),
            status,
            url: None,
        }
    }

    fn user_ids(records: &[&UserRecord]) -> Vec<String> {
        records.iter().map(|record| record.id.clone()).collect()
    }

    fn exam_ids(records: &[&ExamRecord]) -> Vec<String> {
        records.iter().map(|record| record.id.clone()).collect()
    }

    #[test]
    fn query_matches_name_case_insensitively() {
        let users = vec![
            user("u1", "John Smith", UserStatus::Active),
            user("u2", "Jane Doe", UserStatus::Pending),
        ];

        let matched = filter_users(&users, "jane", UserFilter::All);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Jane Doe");
    }

    #[test]
    fn empty_query_keeps_everything_in_order() {
        let users = vec![
            user("u1", "John Smith", UserStatus::Active),
            user("u2", "Jane Doe", UserStatus::Pending),
            user("u3", "Ali Khan", UserStatus::Inactive),
        ];

        let matched = filter_users(&users, "", UserFilter::All);
        assert_eq!(user_ids(&matched), vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn user_search_covers_email_and_location() {
        let mut remote = user("u1", "John Smith", UserStatus::Active);
        remote.location = "Denver, CO".to_string();
        let users = vec![remote, user("u2", "Jane Doe", UserStatus::Active)];

        assert_eq!(filter_users(&users, "DENVER", UserFilter::All).len(), 1);
        assert_eq!(filter_users(&users, "jane.doe@", UserFilter::All).len(), 1);
        assert!(filter_users(&users, "nobody", UserFilter::All).is_empty());
    }

    #[test]
    fn status_filter_combines_with_query() {
        let users = vec![
            user("u1", "John Smith", UserStatus::Active),
            user("u2", "Johanna Stone", UserStatus::Pending),
        ];

        let filter: UserFilter = "pending".parse().unwrap();
        let matched = filter_users(&users, "joh", filter);
        assert_eq!(user_ids(&matched), vec!["u2"]);
    }

    #[test]
    fn upcoming_maps_to_preparation_and_staff_assignment() {
        let exams = vec![
            exam("e1", "Physics Final", ExamStatus::Preparation),
            exam("e2", "CS Midterm", ExamStatus::InProgress),
            exam("e3", "Business Quiz", ExamStatus::Completed),
            exam("e4", "Medical Admission", ExamStatus::StaffAssignment),
        ];

        let matched = filter_exams(&exams, "", ExamFilter::Upcoming);
        assert_eq!(exam_ids(&matched), vec!["e1", "e4"]);

        let running = filter_exams(&exams, "", "in_progress".parse().unwrap());
        assert_eq!(exam_ids(&running), vec!["e2"]);
    }

    #[test]
    fn all_tag_returns_every_search_match() {
        let exams = vec![
            exam("e1", "Physics Final", ExamStatus::Preparation),
            exam("e2", "Physics Midterm", ExamStatus::Completed),
            exam("e3", "Chemistry Final", ExamStatus::InProgress),
        ];

        let matched = filter_exams(&exams, "physics", ExamFilter::All);
        assert_eq!(exam_ids(&matched), vec!["e1", "e2"]);
    }

    #[test]
    fn document_search_includes_type_and_submitter() {
        let docs = vec![
            document("d1", "Center 12 setup", "installation_report", DocumentStatus::Pending),
            document("d2", "Day one roster", "attendance_sheet", DocumentStatus::Approved),
        ];

        assert_eq!(filter_documents(&docs, "attendance", DocumentFilter::All).len(), 1);
        assert_eq!(filter_documents(&docs, "mark", DocumentFilter::All).len(), 2);

        let approved = filter_documents(&docs, "mark", "approved".parse().unwrap());
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, "d2");
    }

    #[test]
    fn monitoring_phases_select_expected_statuses() {
        let exams = vec![
            exam("e1", "A", ExamStatus::Preparation),
            exam("e2", "B", ExamStatus::Installation),
            exam("e3", "C", ExamStatus::InProgress),
            exam("e4", "D", ExamStatus::StaffAssignment),
            exam("e5", "E", ExamStatus::Completed),
        ];

        let install = exams_in_phase(&exams, MonitoringPhase::Installation);
        assert_eq!(exam_ids(&install), vec!["e1", "e2"]);
        let day = exams_in_phase(&exams, MonitoringPhase::ExamDay);
        assert_eq!(exam_ids(&day), vec!["e3"]);
        let closure = exams_in_phase(&exams, MonitoringPhase::Closure);
        assert_eq!(exam_ids(&closure), vec!["e5"]);
    }

    #[test]
    fn monitoring_tabs_are_titled_by_day() {
        assert_eq!(MonitoringPhase::Installation.title(), "Installation Day");
        assert_eq!(MonitoringPhase::ExamDay.title(), "Exam Day");
        assert_eq!(MonitoringPhase::Closure.title(), "Closure Day");
    }

    #[test]
    fn unknown_filter_tags_are_rejected() {
        let err = "archived".parse::<DocumentFilter>().unwrap_err();
        assert!(matches!(err, FilterError::UnknownTag { kind: "document", .. }));
        assert!("soon".parse::<ExamFilter>().is_err());
        assert!("night".parse::<MonitoringPhase>().is_err());
    }

    #[test]
    fn counts_cover_full_collection() {
        let users = vec![
            user("u1", "John Smith", UserStatus::Active),
            user("u2", "Jane Doe", UserStatus::Pending),
            user("u3", "Ali Khan", UserStatus::Active),
        ];

        let counts = user_status_counts(&users);
        assert_eq!(counts[0], StatusCount { tag: StatusTag::Active, count: 2 });
        assert_eq!(counts[1], StatusCount { tag: StatusTag::Inactive, count: 0 });
        assert_eq!(counts[2], StatusCount { tag: StatusTag::Pending, count: 1 });
    }

    #[test]
    fn headings_pluralize() {
        assert_eq!(count_heading(0, "Exam"), "0 Exams");
        assert_eq!(count_heading(1, "User"), "1 User");
        assert_eq!(count_heading(3, "Document"), "3 Documents");
    }
}
