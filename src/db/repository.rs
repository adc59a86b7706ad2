//! Database repository for CRUD operations.
//!
//! Each operation is a single statement where the data allows it, so ordering
//! and singleton invariants are enforced by SQLite rather than by
//! read-then-write sequences.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    now_timestamp, CareersPageInfo, CareersPageUpdate, ClientLogo, ClientLogoRecord, JobPosting,
    JobPostingChanges, NewJobPosting, DEFAULT_PAGE_DESCRIPTION, DEFAULT_PAGE_TITLE,
    DEFAULT_SECTION_DESCRIPTION, DEFAULT_SECTION_TITLE,
};

const CAREERS_COLUMNS: &str =
    "page_title, page_description, section_title, section_description, created_at, updated_at";

const JOB_COLUMNS: &str = "id, title, description, requirements, drive_link, is_active, sort_order, created_at, updated_at";

const LOGO_COLUMNS: &str =
    "id, name, logo, logo_asset_id, is_active, sort_order, created_at, updated_at";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== CAREERS PAGE OPERATIONS ====================

    /// Get the careers page copy, creating it with default copy when absent.
    ///
    /// The insert is a no-op once the row exists, so concurrent first reads
    /// still leave exactly one row.
    pub async fn get_or_init_careers_page(&self) -> Result<CareersPageInfo, AppError> {
        let now = now_timestamp();
        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO careers_page (id, page_title, page_description, section_title, section_description, created_at, updated_at) VALUES (1, ?, ?, ?, ?, ?, ?)",
        )
        .bind(DEFAULT_PAGE_TITLE)
        .bind(DEFAULT_PAGE_DESCRIPTION)
        .bind(DEFAULT_SECTION_TITLE)
        .bind(DEFAULT_SECTION_DESCRIPTION)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() > 0 {
            tracing::info!("Created default careers page");
        }

        let row = sqlx::query(&format!(
            "SELECT {} FROM careers_page WHERE id = 1",
            CAREERS_COLUMNS
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(careers_from_row(&row))
    }

    /// Write the careers page copy, creating the row if needed.
    pub async fn upsert_careers_page(
        &self,
        update: &CareersPageUpdate,
    ) -> Result<CareersPageInfo, AppError> {
        let now = now_timestamp();
        let row = sqlx::query(&format!(
            r#"INSERT INTO careers_page (id, page_title, page_description, section_title, section_description, created_at, updated_at)
               VALUES (1, ?, ?, COALESCE(?, ?), COALESCE(?, ?), ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   page_title = excluded.page_title,
                   page_description = excluded.page_description,
                   section_title = COALESCE(?, careers_page.section_title),
                   section_description = COALESCE(?, careers_page.section_description),
                   updated_at = excluded.updated_at
               RETURNING {}"#,
            CAREERS_COLUMNS
        ))
        .bind(&update.page_title)
        .bind(&update.page_description)
        .bind(&update.section_title)
        .bind(DEFAULT_SECTION_TITLE)
        .bind(&update.section_description)
        .bind(DEFAULT_SECTION_DESCRIPTION)
        .bind(&now)
        .bind(&now)
        .bind(&update.section_title)
        .bind(&update.section_description)
        .fetch_one(&self.pool)
        .await?;

        Ok(careers_from_row(&row))
    }

    // ==================== JOB POSTING OPERATIONS ====================

    /// List job postings by `(order asc, createdAt desc)`.
    pub async fn list_job_postings(&self, active_only: bool) -> Result<Vec<JobPosting>, AppError> {
        let filter = if active_only { "WHERE is_active = 1" } else { "" };
        let rows = sqlx::query(&format!(
            "SELECT {} FROM job_postings {} ORDER BY sort_order ASC, created_at DESC",
            JOB_COLUMNS, filter
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(job_from_row).collect())
    }

    /// Get a job posting by ID.
    pub async fn get_job_posting(&self, id: &str) -> Result<Option<JobPosting>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM job_postings WHERE id = ?",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(job_from_row))
    }

    /// Create a job posting at the end of the list.
    ///
    /// The order is computed inside the INSERT, so it always reflects the
    /// maximum at write time.
    pub async fn create_job_posting(&self, posting: &NewJobPosting) -> Result<JobPosting, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_timestamp();

        let row = sqlx::query(&format!(
            r#"INSERT INTO job_postings (id, title, description, requirements, drive_link, is_active, sort_order, created_at, updated_at)
               SELECT ?, ?, ?, ?, ?, ?, COALESCE(MAX(sort_order) + 1, 0), ?, ? FROM job_postings
               RETURNING {}"#,
            JOB_COLUMNS
        ))
        .bind(&id)
        .bind(&posting.title)
        .bind(&posting.description)
        .bind(&posting.requirements)
        .bind(&posting.drive_link)
        .bind(posting.is_active as i32)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(job_from_row(&row))
    }

    /// Merge changes onto an existing job posting.
    pub async fn update_job_posting(
        &self,
        id: &str,
        changes: JobPostingChanges,
    ) -> Result<JobPosting, AppError> {
        let existing = self
            .get_job_posting(id)
            .await?
            .ok_or_else(|| job_not_found(id))?;

        let merged = changes.apply(&existing);
        let now = now_timestamp();

        let row = sqlx::query(&format!(
            r#"UPDATE job_postings SET
                   title = ?, description = ?, requirements = ?, drive_link = ?,
                   is_active = ?, sort_order = ?, updated_at = ?
               WHERE id = ?
               RETURNING {}"#,
            JOB_COLUMNS
        ))
        .bind(&merged.title)
        .bind(&merged.description)
        .bind(&merged.requirements)
        .bind(&merged.drive_link)
        .bind(merged.is_active as i32)
        .bind(merged.order)
        .bind(&now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        // Deleted between the read and the write
        row.as_ref().map(job_from_row).ok_or_else(|| job_not_found(id))
    }

    /// Delete a job posting.
    pub async fn delete_job_posting(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM job_postings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(job_not_found(id));
        }

        Ok(())
    }

    // ==================== CLIENT LOGO OPERATIONS ====================

    /// List one page of client logos and the total count.
    pub async fn list_client_logos_page(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ClientLogo>, i64), AppError> {
        let offset = (page - 1).saturating_mul(limit);

        let rows = sqlx::query(&format!(
            "SELECT {} FROM client_logos ORDER BY sort_order ASC, created_at DESC LIMIT ? OFFSET ?",
            LOGO_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM client_logos")
            .fetch_one(&self.pool)
            .await?
            .get("total");

        Ok((rows.iter().map(logo_from_row).collect(), total))
    }

    /// List active client logos by `(order asc, createdAt desc)`.
    pub async fn list_active_client_logos(&self) -> Result<Vec<ClientLogo>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM client_logos WHERE is_active = 1 ORDER BY sort_order ASC, created_at DESC",
            LOGO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(logo_from_row).collect())
    }

    /// Get a client logo by ID.
    pub async fn get_client_logo(&self, id: &str) -> Result<Option<ClientLogo>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM client_logos WHERE id = ?",
            LOGO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(logo_from_row))
    }

    /// Whether another logo already holds `order`.
    ///
    /// Only a fast path to avoid uploading images for requests that would be
    /// rejected anyway; the unique index is what enforces the invariant.
    pub async fn client_logo_order_taken(
        &self,
        order: i64,
        exclude_id: Option<&str>,
    ) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM client_logos WHERE sort_order = ? AND id != ?) AS taken",
        )
        .bind(order)
        .bind(exclude_id.unwrap_or(""))
        .fetch_one(&self.pool)
        .await?;

        let taken: i32 = row.get("taken");
        Ok(taken != 0)
    }

    /// Create a client logo.
    pub async fn create_client_logo(&self, record: &ClientLogoRecord) -> Result<ClientLogo, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_timestamp();

        let row = sqlx::query(&format!(
            r#"INSERT INTO client_logos (id, name, logo, logo_asset_id, is_active, sort_order, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING {}"#,
            LOGO_COLUMNS
        ))
        .bind(&id)
        .bind(&record.name)
        .bind(&record.logo)
        .bind(&record.logo_asset_id)
        .bind(record.is_active as i32)
        .bind(record.order)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| order_conflict(e, record.order))?;

        Ok(logo_from_row(&row))
    }

    /// Replace the stored fields of a client logo.
    pub async fn update_client_logo(
        &self,
        id: &str,
        record: &ClientLogoRecord,
    ) -> Result<ClientLogo, AppError> {
        let now = now_timestamp();

        let row = sqlx::query(&format!(
            r#"UPDATE client_logos SET
                   name = ?, logo = ?, logo_asset_id = ?, is_active = ?, sort_order = ?, updated_at = ?
               WHERE id = ?
               RETURNING {}"#,
            LOGO_COLUMNS
        ))
        .bind(&record.name)
        .bind(&record.logo)
        .bind(&record.logo_asset_id)
        .bind(record.is_active as i32)
        .bind(record.order)
        .bind(&now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| order_conflict(e, record.order))?;

        row.as_ref().map(logo_from_row).ok_or_else(|| logo_not_found(id))
    }

    /// Delete a client logo, returning the removed record.
    pub async fn delete_client_logo(&self, id: &str) -> Result<ClientLogo, AppError> {
        let row = sqlx::query(&format!(
            "DELETE FROM client_logos WHERE id = ? RETURNING {}",
            LOGO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(logo_from_row).ok_or_else(|| logo_not_found(id))
    }
}

// Helper functions for row conversion

fn careers_from_row(row: &SqliteRow) -> CareersPageInfo {
    CareersPageInfo {
        page_title: row.get("page_title"),
        page_description: row.get("page_description"),
        section_title: row.get("section_title"),
        section_description: row.get("section_description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn job_from_row(row: &SqliteRow) -> JobPosting {
    let is_active: i32 = row.get("is_active");
    JobPosting {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        requirements: row.get("requirements"),
        drive_link: row.get("drive_link"),
        is_active: is_active != 0,
        order: row.get("sort_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn logo_from_row(row: &SqliteRow) -> ClientLogo {
    let is_active: i32 = row.get("is_active");
    ClientLogo {
        id: row.get("id"),
        name: row.get("name"),
        logo: row.get("logo"),
        is_active: is_active != 0,
        order: row.get("sort_order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        logo_asset_id: row.get("logo_asset_id"),
    }
}

fn job_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Job posting {} not found", id))
}

fn logo_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Client logo {} not found", id))
}

/// Translate a unique-index violation on `sort_order` into a conflict.
fn order_conflict(err: sqlx::Error, order: i64) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
            format!("A client logo with order {} already exists", order),
        ),
        _ => err.into(),
    }
}
