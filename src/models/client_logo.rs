//! Client logo model for the homepage marquee.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_LOGO_NAME: &str = "Client Logo";
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A client logo image hosted on the image CDN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLogo {
    pub id: String,
    pub name: String,
    /// Public URL of the logo image
    pub logo: String,
    pub is_active: bool,
    /// Display position, ascending; unique across all logos
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
    /// Image host id of an asset this service uploaded
    #[serde(skip)]
    pub logo_asset_id: Option<String>,
}

/// An image file received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Raw multipart fields of a client logo create/update form.
#[derive(Debug, Clone, Default)]
pub struct ClientLogoForm {
    pub name: Option<String>,
    pub is_active: Option<String>,
    pub order: Option<String>,
    pub logo: Option<UploadedFile>,
    pub existing_logo: Option<String>,
}

/// Validated create form.
#[derive(Debug, Clone)]
pub struct NewClientLogoForm {
    pub name: String,
    pub is_active: bool,
    pub order: i64,
    pub logo: UploadedFile,
}

/// Validated update form. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ClientLogoFormChanges {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<i64>,
    pub logo: Option<UploadedFile>,
    pub existing_logo: Option<String>,
}

/// Fields written to the `client_logos` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientLogoRecord {
    pub name: String,
    pub logo: String,
    pub logo_asset_id: Option<String>,
    pub is_active: bool,
    pub order: i64,
}

impl ClientLogoForm {
    pub fn validate_create(self) -> Result<NewClientLogoForm, AppError> {
        let logo = self
            .logo
            .ok_or_else(|| AppError::Validation("Logo image is required".to_string()))?;

        Ok(NewClientLogoForm {
            name: parse_name(self.name.as_deref()).unwrap_or_else(|| DEFAULT_LOGO_NAME.to_string()),
            is_active: self.is_active.as_deref().map(parse_flag).unwrap_or(true),
            order: self.order.as_deref().map(parse_order).transpose()?.unwrap_or(0),
            logo,
        })
    }

    pub fn validate_update(self) -> Result<ClientLogoFormChanges, AppError> {
        Ok(ClientLogoFormChanges {
            name: parse_name(self.name.as_deref()),
            is_active: self.is_active.as_deref().map(parse_flag),
            order: self.order.as_deref().map(parse_order).transpose()?,
            logo: self.logo,
            existing_logo: self
                .existing_logo
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

fn parse_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_flag(raw: &str) -> bool {
    raw.trim() == "true"
}

fn parse_order(raw: &str) -> Result<i64, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| AppError::Validation(format!("order must be an integer, got {:?}", raw)))
}

/// Folder on the image host for a logo, derived from its name.
pub fn logo_folder(name: &str) -> String {
    let slug = slug::slugify(name);
    if slug.is_empty() {
        "client-logos/client-logo".to_string()
    } else {
        format!("client-logos/{}", slug)
    }
}

/// Query parameters for the admin logo listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Resolve defaults, clamping non-positive values to 1 and `limit` to
    /// [`MAX_PAGE_LIMIT`].
    pub fn resolve(&self) -> (i64, i64) {
        (
            self.page.unwrap_or(DEFAULT_PAGE).max(1),
            self.limit
                .unwrap_or(DEFAULT_PAGE_LIMIT)
                .clamp(1, MAX_PAGE_LIMIT),
        )
    }
}

/// Query parameters for the collection-level delete.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteLogoQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// One page of results with navigation metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T: Serialize> Paginated<T> {
    /// `page` and `limit` must be at least 1.
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if total > 0 { (total - 1) / limit + 1 } else { 0 };
        Self {
            items,
            current_page: page,
            total_pages,
            total_items: total,
            limit,
            has_next_page: page.saturating_mul(limit) < total,
            has_prev_page: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> UploadedFile {
        UploadedFile {
            file_name: "logo.png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[test]
    fn test_create_requires_image() {
        let err = ClientLogoForm::default().validate_create().unwrap_err();
        assert_eq!(err.message(), "Logo image is required");
    }

    #[test]
    fn test_create_defaults() {
        let form = ClientLogoForm {
            logo: Some(png()),
            ..Default::default()
        }
        .validate_create()
        .unwrap();
        assert_eq!(form.name, DEFAULT_LOGO_NAME);
        assert!(form.is_active);
        assert_eq!(form.order, 0);
    }

    #[test]
    fn test_flag_and_order_parsing() {
        let form = ClientLogoForm {
            name: Some("  Acme Towers ".to_string()),
            is_active: Some("false".to_string()),
            order: Some(" 4 ".to_string()),
            logo: Some(png()),
            existing_logo: None,
        }
        .validate_create()
        .unwrap();
        assert_eq!(form.name, "Acme Towers");
        assert!(!form.is_active);
        assert_eq!(form.order, 4);

        let bad = ClientLogoForm {
            order: Some("first".to_string()),
            logo: Some(png()),
            ..Default::default()
        };
        assert!(bad.validate_create().is_err());
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let changes = ClientLogoForm {
            existing_logo: Some("   ".to_string()),
            ..Default::default()
        }
        .validate_update()
        .unwrap();
        assert!(changes.name.is_none());
        assert!(changes.is_active.is_none());
        assert!(changes.order.is_none());
        assert!(changes.existing_logo.is_none());
    }

    #[test]
    fn test_logo_folder() {
        assert_eq!(logo_folder("Acme Glass Works"), "client-logos/acme-glass-works");
        assert_eq!(logo_folder("!!!"), "client-logos/client-logo");
    }

    #[test]
    fn test_pagination_metadata() {
        let page: Paginated<i64> = Paginated::new(vec![1, 2], 2, 2, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next_page);
        assert!(page.has_prev_page);

        let last: Paginated<i64> = Paginated::new(vec![5], 3, 2, 5);
        assert!(!last.has_next_page);

        let empty: Paginated<i64> = Paginated::new(vec![], 1, 50, 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next_page);
        assert!(!empty.has_prev_page);
    }

    #[test]
    fn test_page_query_clamps() {
        let query = PageQuery {
            page: Some(0),
            limit: Some(-3),
        };
        assert_eq!(query.resolve(), (1, 1));
        assert_eq!(PageQuery::default().resolve(), (1, 50));

        let huge = PageQuery {
            page: Some(i64::MAX),
            limit: Some(i64::MAX),
        };
        assert_eq!(huge.resolve(), (i64::MAX, MAX_PAGE_LIMIT));
    }

    #[test]
    fn test_pagination_metadata_saturates() {
        let far: Paginated<i64> = Paginated::new(vec![], i64::MAX, MAX_PAGE_LIMIT, 5);
        assert_eq!(far.total_pages, 1);
        assert!(!far.has_next_page);
        assert!(far.has_prev_page);

        let one_each: Paginated<i64> = Paginated::new(vec![], 1, 1, i64::MAX);
        assert_eq!(one_each.total_pages, i64::MAX);
        assert!(one_each.has_next_page);
    }
}
