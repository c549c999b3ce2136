use std::fmt;

/// Semantic color bucket a badge is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Success,
    Error,
    Warning,
    Primary,
    Info,
    Default,
}

impl ColorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorCategory::Success => "success",
            ColorCategory::Error => "error",
            ColorCategory::Warning => "warning",
            ColorCategory::Primary => "primary",
            ColorCategory::Info => "info",
            ColorCategory::Default => "default",
        }
    }
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every status, phase and severity tag a badge can show. Anything else is
/// carried verbatim in `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusTag {
    Active,
    Inactive,
    Pending,
    Approved,
    Rejected,
    InProgress,
    Completed,
    Preparation,
    Installation,
    StaffAssignment,
    High,
    Medium,
    Low,
    Unknown(String),
}

impl StatusTag {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => StatusTag::Active,
            "inactive" => StatusTag::Inactive,
            "pending" => StatusTag::Pending,
            "approved" => StatusTag::Approved,
            "rejected" => StatusTag::Rejected,
            "in_progress" => StatusTag::InProgress,
            "completed" => StatusTag::Completed,
            "preparation" => StatusTag::Preparation,
            "installation" => StatusTag::Installation,
            "staff_assignment" => StatusTag::StaffAssignment,
            "high" => StatusTag::High,
            "medium" => StatusTag::Medium,
            "low" => StatusTag::Low,
            other => StatusTag::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusTag::Active => "active",
            StatusTag::Inactive => "inactive",
            StatusTag::Pending => "pending",
            StatusTag::Approved => "approved",
            StatusTag::Rejected => "rejected",
            StatusTag::InProgress => "in_progress",
            StatusTag::Completed => "completed",
            StatusTag::Preparation => "preparation",
            StatusTag::Installation => "installation",
            StatusTag::StaffAssignment => "staff_assignment",
            StatusTag::High => "high",
            StatusTag::Medium => "medium",
            StatusTag::Low => "low",
            StatusTag::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> String {
        let label = match self {
            StatusTag::Active => "Active",
            StatusTag::Inactive => "Inactive",
            StatusTag::Pending => "Pending",
            StatusTag::Approved => "Approved",
            StatusTag::Rejected => "Rejected",
            StatusTag::InProgress => "In Progress",
            StatusTag::Completed => "Completed",
            StatusTag::Preparation => "Preparation",
            StatusTag::Installation => "Installation",
            StatusTag::StaffAssignment => "Staff Assignment",
            StatusTag::High => "High",
            StatusTag::Medium => "Medium",
            StatusTag::Low => "Low",
            StatusTag::Unknown(raw) => return humanize(raw),
        };
        label.to_string()
    }

    pub fn color(&self) -> ColorCategory {
        match self {
            StatusTag::Active | StatusTag::Approved | StatusTag::Completed => {
                ColorCategory::Success
            }
            StatusTag::Inactive | StatusTag::Rejected | StatusTag::High => ColorCategory::Error,
            StatusTag::Pending
            | StatusTag::Preparation
            | StatusTag::Installation
            | StatusTag::StaffAssignment
            | StatusTag::Medium => ColorCategory::Warning,
            StatusTag::InProgress => ColorCategory::Primary,
            StatusTag::Low => ColorCategory::Info,
            StatusTag::Unknown(_) => ColorCategory::Default,
        }
    }

    pub fn classify(&self) -> Classification {
        Classification {
            label: self.label(),
            color: self.color(),
        }
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub color: ColorCategory,
}

pub fn classify(raw: &str) -> Classification {
    StatusTag::parse(raw).classify()
}

/// `staff_shortage` -> `Staff Shortage`. Only the first letter of each word
/// is touched; the rest keeps its case.
pub fn humanize(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut output = String::with_capacity(spaced.len());
    let mut at_word_start = true;

    for ch in spaced.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                output.extend(ch.to_uppercase());
            } else {
                output.push(ch);
            }
            at_word_start = false;
        } else {
            output.push(ch);
            at_word_start = true;
        }
    }

    output
}

pub fn role_label(role: &str) -> String {
    match role {
        "proctor" => "Proctor".to_string(),
        "center_manager" => "Center Manager".to_string(),
        other => humanize(other),
    }
}

pub fn document_type_label(doc_type: &str) -> String {
    humanize(doc_type)
}

/// Avatar fallback: first letter of the first and last word.
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |part: &str| part.chars().next().into_iter().flat_map(char::to_uppercase);

    match parts.as_slice() {
        [] => String::new(),
        [only] => first_letter(*only).collect(),
        [first, .., last] => first_letter(*first).chain(first_letter(*last)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_a_warning() {
        let result = classify("pending");
        assert_eq!(result.label, "Pending");
        assert_eq!(result.color, ColorCategory::Warning);
    }

    #[test]
    fn unknown_tags_fall_back_to_humanized_label() {
        let result = classify("unknown_tag");
        assert_eq!(result.label, "Unknown Tag");
        assert_eq!(result.color, ColorCategory::Default);
        assert_eq!(
            StatusTag::parse("unknown_tag"),
            StatusTag::Unknown("unknown_tag".to_string())
        );
    }

    #[test]
    fn label_table_matches_badges() {
        let expected = [
            ("active", "Active", ColorCategory::Success),
            ("inactive", "Inactive", ColorCategory::Error),
            ("approved", "Approved", ColorCategory::Success),
            ("rejected", "Rejected", ColorCategory::Error),
            ("in_progress", "In Progress", ColorCategory::Primary),
            ("completed", "Completed", ColorCategory::Success),
            ("preparation", "Preparation", ColorCategory::Warning),
            ("installation", "Installation", ColorCategory::Warning),
            ("staff_assignment", "Staff Assignment", ColorCategory::Warning),
            ("high", "High", ColorCategory::Error),
            ("medium", "Medium", ColorCategory::Warning),
            ("low", "Low", ColorCategory::Info),
        ];

        for (raw, label, color) in expected {
            let result = classify(raw);
            assert_eq!(result.label, label, "label for {raw}");
            assert_eq!(result.color, color, "color for {raw}");
            assert_eq!(StatusTag::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn humanize_handles_multiple_underscores() {
        assert_eq!(humanize("geofence_violation"), "Geofence Violation");
        assert_eq!(humanize("installation_report_v2"), "Installation Report V2");
        assert_eq!(humanize("ID_card"), "ID Card");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn roles_have_friendly_labels() {
        assert_eq!(role_label("proctor"), "Proctor");
        assert_eq!(role_label("center_manager"), "Center Manager");
        assert_eq!(role_label("regional_coordinator"), "Regional Coordinator");
        assert_eq!(document_type_label("attendance_sheet"), "Attendance Sheet");
    }

    #[test]
    fn initials_use_first_and_last_word() {
        assert_eq!(initials("John Smith"), "JS");
        assert_eq!(initials("maria de la cruz"), "MC");
        assert_eq!(initials("Admin"), "A");
        assert_eq!(initials("   "), "");
    }
}
