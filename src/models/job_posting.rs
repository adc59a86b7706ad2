//! Job posting model shown on the careers page.

use serde::{Deserialize, Serialize};

use super::{optional_text, required_text};
use crate::errors::AppError;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 2000;
pub const REQUIREMENTS_MAX: usize = 2000;
pub const DRIVE_LINK_MAX: usize = 500;

/// A job opening listed on the careers page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    /// Link to the application form or job description document
    pub drive_link: String,
    pub is_active: bool,
    /// Display position, ascending; not unique
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a job posting.
///
/// Every field is optional at the wire level so a missing field is reported
/// by name instead of as a deserialization failure. Any `order` sent by the
/// client is ignored; new postings are appended.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPostingRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub drive_link: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A validated job posting ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobPosting {
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub drive_link: String,
    pub is_active: bool,
}

impl CreateJobPostingRequest {
    /// Check required fields in order (`title`, `description`, `driveLink`)
    /// and report the first one missing.
    pub fn validate(&self) -> Result<NewJobPosting, AppError> {
        let title = required_text("title", self.title.as_deref(), TITLE_MAX)?;
        let description =
            required_text("description", self.description.as_deref(), DESCRIPTION_MAX)?;
        let drive_link = required_text("driveLink", self.drive_link.as_deref(), DRIVE_LINK_MAX)?;
        let requirements = optional_text(
            "requirements",
            self.requirements.as_deref().unwrap_or_default(),
            REQUIREMENTS_MAX,
        )?;

        Ok(NewJobPosting {
            title,
            description,
            requirements,
            drive_link,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Request body for a partial job posting update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPostingRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub drive_link: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Validated changes to merge onto an existing posting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPostingChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub drive_link: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
}

impl UpdateJobPostingRequest {
    /// Provided required fields must stay non-blank; absent fields are left alone.
    pub fn validate(&self) -> Result<JobPostingChanges, AppError> {
        let title = self
            .title
            .as_deref()
            .map(|v| required_text("title", Some(v), TITLE_MAX))
            .transpose()?;
        let description = self
            .description
            .as_deref()
            .map(|v| required_text("description", Some(v), DESCRIPTION_MAX))
            .transpose()?;
        let drive_link = self
            .drive_link
            .as_deref()
            .map(|v| required_text("driveLink", Some(v), DRIVE_LINK_MAX))
            .transpose()?;
        let requirements = self
            .requirements
            .as_deref()
            .map(|v| optional_text("requirements", v, REQUIREMENTS_MAX))
            .transpose()?;

        Ok(JobPostingChanges {
            title,
            description,
            requirements,
            drive_link,
            is_active: self.is_active,
            order: self.order,
        })
    }
}

impl JobPostingChanges {
    /// Merge onto an existing posting, returning the updated fields.
    pub fn apply(self, existing: &JobPosting) -> JobPosting {
        JobPosting {
            id: existing.id.clone(),
            title: self.title.unwrap_or_else(|| existing.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| existing.description.clone()),
            requirements: self
                .requirements
                .unwrap_or_else(|| existing.requirements.clone()),
            drive_link: self.drive_link.unwrap_or_else(|| existing.drive_link.clone()),
            is_active: self.is_active.unwrap_or(existing.is_active),
            order: self.order.unwrap_or(existing.order),
            created_at: existing.created_at.clone(),
            updated_at: existing.updated_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> CreateJobPostingRequest {
        CreateJobPostingRequest {
            title: Some("Facade Design Engineer".to_string()),
            description: Some("Detail curtain wall systems".to_string()),
            requirements: None,
            drive_link: Some("https://drive.example.com/form".to_string()),
            is_active: None,
        }
    }

    #[test]
    fn test_create_defaults() {
        let new = full_request().validate().unwrap();
        assert!(new.is_active);
        assert_eq!(new.requirements, "");
    }

    #[test]
    fn test_create_names_first_missing_field() {
        let mut req = full_request();
        req.title = None;
        req.drive_link = Some(" ".to_string());
        let err = req.validate().unwrap_err();
        assert_eq!(err.message(), "title is required and cannot be empty");

        let mut req = full_request();
        req.drive_link = None;
        let err = req.validate().unwrap_err();
        assert_eq!(err.message(), "driveLink is required and cannot be empty");
    }

    #[test]
    fn test_create_rejects_long_drive_link() {
        let mut req = full_request();
        req.drive_link = Some("x".repeat(DRIVE_LINK_MAX + 1));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let req = UpdateJobPostingRequest {
            title: Some("".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let existing = JobPosting {
            id: "job-1".to_string(),
            title: "Site Engineer".to_string(),
            description: "Supervise installation".to_string(),
            requirements: "5 years".to_string(),
            drive_link: "https://drive.example.com/a".to_string(),
            is_active: true,
            order: 2,
            created_at: "2024-01-01T00:00:00.000000Z".to_string(),
            updated_at: "2024-01-01T00:00:00.000000Z".to_string(),
        };
        let changes = UpdateJobPostingRequest {
            is_active: Some(false),
            order: Some(7),
            ..Default::default()
        }
        .validate()
        .unwrap();

        let merged = changes.apply(&existing);
        assert_eq!(merged.title, "Site Engineer");
        assert_eq!(merged.requirements, "5 years");
        assert!(!merged.is_active);
        assert_eq!(merged.order, 7);
    }
}
