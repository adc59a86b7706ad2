//! Careers page copy, stored as a single row.

use serde::{Deserialize, Serialize};

use super::{optional_text, required_text};
use crate::errors::AppError;

pub const DEFAULT_PAGE_TITLE: &str = "Join Our Team";
pub const DEFAULT_PAGE_DESCRIPTION: &str = "Be part of a dynamic team that's transforming skylines across India. We're looking for passionate professionals who share our commitment to excellence in facade engineering.";
pub const DEFAULT_SECTION_TITLE: &str = "Why Work With Us";
pub const DEFAULT_SECTION_DESCRIPTION: &str = "At Blufacade, we foster innovation, encourage professional growth, and celebrate achievements. Join us to work on iconic projects that shape the architectural landscape.";

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 1000;

/// Editable copy for the careers page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareersPageInfo {
    pub page_title: String,
    pub page_description: String,
    pub section_title: String,
    pub section_description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for `PUT /api/admin/careers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCareersRequest {
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub page_description: Option<String>,
    #[serde(default)]
    pub section_title: Option<String>,
    #[serde(default)]
    pub section_description: Option<String>,
}

/// Validated careers copy. Absent section fields keep their stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareersPageUpdate {
    pub page_title: String,
    pub page_description: String,
    pub section_title: Option<String>,
    pub section_description: Option<String>,
}

impl UpdateCareersRequest {
    pub fn validate(&self) -> Result<CareersPageUpdate, AppError> {
        Ok(CareersPageUpdate {
            page_title: required_text("pageTitle", self.page_title.as_deref(), TITLE_MAX)?,
            page_description: required_text(
                "pageDescription",
                self.page_description.as_deref(),
                DESCRIPTION_MAX,
            )?,
            section_title: self
                .section_title
                .as_deref()
                .map(|v| optional_text("sectionTitle", v, TITLE_MAX))
                .transpose()?,
            section_description: self
                .section_description
                .as_deref()
                .map(|v| optional_text("sectionDescription", v, DESCRIPTION_MAX))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_page_fields() {
        let err = UpdateCareersRequest {
            page_title: Some("Careers".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message(), "pageDescription is required and cannot be empty");
    }

    #[test]
    fn test_sections_optional() {
        let update = UpdateCareersRequest {
            page_title: Some(" Careers ".to_string()),
            page_description: Some("Build with us".to_string()),
            section_title: Some("".to_string()),
            section_description: None,
        }
        .validate()
        .unwrap();
        assert_eq!(update.page_title, "Careers");
        assert_eq!(update.section_title.as_deref(), Some(""));
        assert!(update.section_description.is_none());
    }

    #[test]
    fn test_default_copy_fits_limits() {
        assert!(DEFAULT_PAGE_TITLE.len() <= TITLE_MAX);
        assert!(DEFAULT_PAGE_DESCRIPTION.len() <= DESCRIPTION_MAX);
        assert!(DEFAULT_SECTION_TITLE.len() <= TITLE_MAX);
        assert!(DEFAULT_SECTION_DESCRIPTION.len() <= DESCRIPTION_MAX);
    }
}
