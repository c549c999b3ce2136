use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::StatusTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
}

impl UserStatus {
    pub fn tag(self) -> StatusTag {
        match self {
            UserStatus::Active => StatusTag::Active,
            UserStatus::Inactive => StatusTag::Inactive,
            UserStatus::Pending => StatusTag::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamStatus {
    Preparation,
    StaffAssignment,
    Installation,
    InProgress,
    Completed,
}

impl ExamStatus {
    pub fn tag(self) -> StatusTag {
        match self {
            ExamStatus::Preparation => StatusTag::Preparation,
            ExamStatus::StaffAssignment => StatusTag::StaffAssignment,
            ExamStatus::Installation => StatusTag::Installation,
            ExamStatus::InProgress => StatusTag::InProgress,
            ExamStatus::Completed => StatusTag::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn tag(self) -> StatusTag {
        match self {
            DocumentStatus::Pending => StatusTag::Pending,
            DocumentStatus::Approved => StatusTag::Approved,
            DocumentStatus::Rejected => StatusTag::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn tag(self) -> StatusTag {
        match self {
            Severity::High => StatusTag::High,
            Severity::Medium => StatusTag::Medium,
            Severity::Low => StatusTag::Low,
        }
    }
}

/// Staff role. Roles outside the known set keep their raw tag so they can
/// still be labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Proctor,
    CenterManager,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Proctor => "proctor",
            Role::CenterManager => "center_manager",
            Role::Admin => "admin",
            Role::Other(raw) => raw,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "proctor" => Role::Proctor,
            "center_manager" => Role::CenterManager,
            "admin" => Role::Admin,
            _ => Role::Other(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub status: UserStatus,
    pub location: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExamRecord {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub centers: u32,
    pub staff: u32,
    pub status: ExamStatus,
    /// Percent complete, only shown for exams being installed or running.
    pub completion: Option<u8>,
}

impl ExamRecord {
    pub fn visible_completion(&self) -> Option<u8> {
        match self.status {
            ExamStatus::InProgress | ExamStatus::Installation => {
                self.completion.map(|value| value.min(100))
            }
            _ => None,
        }
    }
}

/// Read-only pointer back to the user that submitted a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRecord {
    pub id: String,
    pub doc_type: String,
    pub title: String,
    pub submitted_by: UserRef,
    pub submitted_at: DateTime<Utc>,
    pub status: DocumentStatus,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecord {
    pub id: String,
    pub alert_type: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub id: String,
    pub activity_type: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub actor: UserRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceMetrics {
    pub document_submission: u8,
    pub staff_attendance: u8,
    pub geofence_compliance: u8,
    pub report_completion: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub active_exams: u32,
    pub registered_users: u32,
    pub pending_approvals: u32,
    pub completed_exams: u32,
    pub compliance: ComplianceMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub tag: StatusTag,
    pub count: usize,
}
