use anyhow::Context;
use chrono::{DateTime, Utc};
use log::warn;

use crate::models::{
    ActivityRecord, AlertRecord, ComplianceMetrics, DashboardStats, DocumentRecord,
    DocumentStatus, ExamRecord, ExamStatus, Role, Severity, UserRecord, UserRef, UserStatus,
};

/// Every collection the console reads from. Built once at startup and only
/// ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub users: Vec<UserRecord>,
    pub exams: Vec<ExamRecord>,
    pub documents: Vec<DocumentRecord>,
    pub alerts: Vec<AlertRecord>,
    pub activity: Vec<ActivityRecord>,
    pub stats: DashboardStats,
}

impl Fixtures {
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self {
            users: seed_users(),
            exams: seed_exams()?,
            documents: seed_documents()?,
            alerts: seed_alerts()?,
            activity: seed_activity()?,
            stats: seed_stats(),
        })
    }

    pub fn user(&self, id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == id)
    }
}

fn at(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid fixture timestamp '{raw}'"))?;
    Ok(parsed.with_timezone(&Utc))
}

fn user_ref(id: &str, name: &str) -> UserRef {
    UserRef {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn seed_users() -> Vec<UserRecord> {
    let users = vec![
        (
            "user-1",
            "John Smith",
            "john.smith@example.com",
            "+1 (555) 123-4567",
            "proctor",
            UserStatus::Active,
            "New York, NY",
            Some("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=200"),
        ),
        (
            "user-2",
            "Sarah Johnson",
            "sarah.johnson@example.com",
            "+1 (555) 234-5678",
            "center_manager",
            UserStatus::Active,
            "Los Angeles, CA",
            Some("https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=200"),
        ),
        (
            "user-3",
            "Michael Brown",
            "michael.brown@example.com",
            "+1 (555) 345-6789",
            "proctor",
            UserStatus::Inactive,
            "Chicago, IL",
            None,
        ),
        (
            "user-4",
            "Emily Davis",
            "emily.davis@example.com",
            "+1 (555) 456-7890",
            "proctor",
            UserStatus::Pending,
            "Houston, TX",
            None,
        ),
        (
            "user-5",
            "Mark Proctor",
            "mark.proctor@example.com",
            "+1 (555) 567-8901",
            "proctor",
            UserStatus::Active,
            "Phoenix, AZ",
            None,
        ),
        (
            "user-6",
            "Jane Manager",
            "jane.manager@example.com",
            "+1 (555) 678-9012",
            "center_manager",
            UserStatus::Active,
            "Philadelphia, PA",
            Some("https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=200"),
        ),
        (
            "user-7",
            "David Wilson",
            "david.wilson@example.com",
            "+1 (555) 789-0123",
            "regional_coordinator",
            UserStatus::Pending,
            "San Antonio, TX",
            None,
        ),
    ];

    users
        .into_iter()
        .map(
            |(id, name, email, phone, role, status, location, avatar)| UserRecord {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                role: Role::from(role.to_string()),
                status,
                location: location.to_string(),
                avatar: avatar.map(str::to_string),
            },
        )
        .collect()
}

fn seed_exams() -> anyhow::Result<Vec<ExamRecord>> {
    let exams = vec![
        (
            "exam-1",
            "Fall 2023 Physics Final",
            "2023-10-17T09:00:00Z",
            12,
            48,
            ExamStatus::Preparation,
            None,
        ),
        (
            "exam-2",
            "Engineering Entrance Test",
            "2023-10-20T10:00:00Z",
            25,
            100,
            ExamStatus::Preparation,
            None,
        ),
        (
            "exam-3",
            "Medical College Admission",
            "2023-10-25T08:30:00Z",
            30,
            120,
            ExamStatus::StaffAssignment,
            None,
        ),
        (
            "exam-4",
            "Computer Science Midterm",
            "2023-10-15T09:00:00Z",
            8,
            32,
            ExamStatus::InProgress,
            Some(45),
        ),
        (
            "exam-5",
            "Business Administration Quiz",
            "2023-10-15T14:00:00Z",
            5,
            20,
            ExamStatus::Installation,
            Some(80),
        ),
        (
            "exam-6",
            "Spring Midterms",
            "2023-04-12T09:00:00Z",
            18,
            72,
            ExamStatus::Completed,
            None,
        ),
        (
            "exam-7",
            "Law School Aptitude Test",
            "2023-09-30T08:00:00Z",
            10,
            40,
            ExamStatus::Completed,
            None,
        ),
    ];

    let mut records = Vec::with_capacity(exams.len());
    for (id, title, date, centers, staff, status, completion) in exams {
        records.push(ExamRecord {
            id: id.to_string(),
            title: title.to_string(),
            date: at(date)?,
            centers,
            staff,
            status,
            completion,
        });
    }

    Ok(records)
}

fn seed_documents() -> anyhow::Result<Vec<DocumentRecord>> {
    let documents = vec![
        (
            "doc-1",
            "installation_report",
            "Center 12 Installation Report",
            user_ref("user-2", "Sarah Johnson"),
            "2023-10-14T16:45:10Z",
            DocumentStatus::Approved,
            Some("https://images.unsplash.com/photo-1586281380349-632531db7ed4?w=400"),
        ),
        (
            "doc-2",
            "installation_report",
            "Center 5 Installation Report",
            user_ref("user-5", "Mark Proctor"),
            "2023-10-15T08:10:00Z",
            DocumentStatus::Pending,
            None,
        ),
        (
            "doc-3",
            "attendance_sheet",
            "Computer Science Midterm Attendance",
            user_ref("user-1", "John Smith"),
            "2023-10-15T09:40:00Z",
            DocumentStatus::Pending,
            None,
        ),
        (
            "doc-4",
            "incident_report",
            "Geofence Violation at Center 5",
            user_ref("user-5", "Mark Proctor"),
            "2023-10-14T14:30:00Z",
            DocumentStatus::Rejected,
            None,
        ),
        (
            "doc-5",
            "closure_report",
            "Spring Midterms Closure Summary",
            user_ref("user-6", "Jane Manager"),
            "2023-04-13T18:00:00Z",
            DocumentStatus::Approved,
            Some("https://images.unsplash.com/photo-1554224155-6726b3ff858f?w=400"),
        ),
    ];

    let mut records = Vec::with_capacity(documents.len());
    for (id, doc_type, title, submitted_by, submitted_at, status, url) in documents {
        records.push(DocumentRecord {
            id: id.to_string(),
            doc_type: doc_type.to_string(),
            title: title.to_string(),
            submitted_by,
            submitted_at: at(submitted_at)?,
            status,
            url: url.map(str::to_string),
        });
    }

    Ok(records)
}

fn seed_alerts() -> anyhow::Result<Vec<AlertRecord>> {
    let alerts = vec![
        (
            "alert-1",
            "geofence_violation",
            "Geofence violation at Center 5",
            Severity::High,
            "2023-10-15T10:23:45Z",
        ),
        (
            "alert-2",
            "document_pending",
            "15 installation reports pending review",
            Severity::Medium,
            "2023-10-15T09:15:22Z",
        ),
        (
            "alert-3",
            "staff_shortage",
            "Center 8 is understaffed for tomorrow's exam",
            Severity::High,
            "2023-10-15T08:45:10Z",
        ),
    ];

    let mut records = Vec::with_capacity(alerts.len());
    for (id, alert_type, message, severity, timestamp) in alerts {
        records.push(AlertRecord {
            id: id.to_string(),
            alert_type: alert_type.to_string(),
            message: message.to_string(),
            severity,
            timestamp: at(timestamp)?,
        });
    }

    Ok(records)
}

fn seed_activity() -> anyhow::Result<Vec<ActivityRecord>> {
    let activity = vec![
        (
            "act-1",
            "user_added",
            "New proctor 'John Smith' added to the system",
            "2023-10-15T09:23:45Z",
            user_ref("user-123", "Admin User"),
        ),
        (
            "act-2",
            "exam_created",
            "New exam 'Fall 2023 Physics Final' created",
            "2023-10-15T08:15:22Z",
            user_ref("user-123", "Admin User"),
        ),
        (
            "act-3",
            "document_approved",
            "Installation report for 'Center 12' approved",
            "2023-10-14T16:45:10Z",
            user_ref("user-456", "Jane Manager"),
        ),
        (
            "act-4",
            "alert",
            "Geofence violation detected at 'Center 5'",
            "2023-10-14T14:22:33Z",
            user_ref("user-789", "Mark Proctor"),
        ),
        (
            "act-5",
            "user_assigned",
            "12 proctors assigned to 'Spring Midterms'",
            "2023-10-14T11:05:18Z",
            user_ref("user-123", "Admin User"),
        ),
    ];

    let mut records = Vec::with_capacity(activity.len());
    for (id, activity_type, message, timestamp, actor) in activity {
        records.push(ActivityRecord {
            id: id.to_string(),
            activity_type: activity_type.to_string(),
            message: message.to_string(),
            timestamp: at(timestamp)?,
            actor,
        });
    }

    Ok(records)
}

fn seed_stats() -> DashboardStats {
    DashboardStats {
        active_exams: 24,
        registered_users: 1248,
        pending_approvals: 17,
        completed_exams: 156,
        compliance: ComplianceMetrics {
            document_submission: 92,
            staff_attendance: 97,
            geofence_compliance: 99,
            report_completion: 88,
        },
    }
}

/// Bulk user import. Rows with an id already in `existing` are skipped; the
/// number of appended users is returned.
pub fn import_users_csv(
    existing: &mut Vec<UserRecord>,
    csv_path: &std::path::Path,
) -> anyhow::Result<usize> {
    let reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    import_users(existing, reader)
}

fn import_users<R: std::io::Read>(
    existing: &mut Vec<UserRecord>,
    mut reader: csv::Reader<R>,
) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        id: String,
        name: String,
        email: String,
        phone: String,
        role: String,
        status: UserStatus,
        location: String,
        avatar: Option<String>,
    }

    let mut inserted = 0usize;

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("invalid user row {}", line + 1))?;

        if existing.iter().any(|user| user.id == row.id) {
            warn!("skipping duplicate user id {}", row.id);
            continue;
        }

        existing.push(UserRecord {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            role: Role::from(row.role),
            status: row.status,
            location: row.location,
            avatar: row.avatar.filter(|uri| !uri.is_empty()),
        });
        inserted += 1;
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixtures_load_with_unique_ids() {
        let fixtures = Fixtures::load().unwrap();
        let ids: HashSet<&str> = fixtures.users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids.len(), fixtures.users.len());

        let exam_ids: HashSet<&str> = fixtures.exams.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(exam_ids.len(), fixtures.exams.len());
    }

    #[test]
    fn document_submitters_point_at_known_users() {
        let fixtures = Fixtures::load().unwrap();
        for doc in &fixtures.documents {
            let user = fixtures.user(&doc.submitted_by.id).unwrap();
            assert_eq!(user.name, doc.submitted_by.name);
        }
    }

    #[test]
    fn csv_import_appends_new_users_and_skips_duplicates() {
        let data = "\
id,name,email,phone,role,status,location,avatar
user-1,John Smith,john.smith@example.com,+1 555,proctor,active,New York,
user-90,Nadia Farouk,nadia@example.com,+1 555 0190,center_manager,pending,Austin TX,
";
        let mut users = seed_users();
        let before = users.len();
        let inserted = import_users(&mut users, csv::Reader::from_reader(data.as_bytes())).unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(users.len(), before + 1);
        let added = users.last().unwrap();
        assert_eq!(added.name, "Nadia Farouk");
        assert_eq!(added.role, Role::CenterManager);
        assert_eq!(added.status, UserStatus::Pending);
        assert_eq!(added.avatar, None);
    }

    #[test]
    fn csv_import_rejects_unknown_status() {
        let data = "\
id,name,email,phone,role,status,location,avatar
user-91,Lee Park,lee@example.com,+1 555,proctor,suspended,Reno,
";
        let mut users = Vec::new();
        let result = import_users(&mut users, csv::Reader::from_reader(data.as_bytes()));
        assert!(result.is_err());
        assert!(users.is_empty());
    }
}
