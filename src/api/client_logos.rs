//! Client logo API endpoints.
//!
//! Admin endpoints sit behind the bearer auth layer and receive the caller's
//! [`AdminClaims`]; the public listing does not.

use axum::{
    extract::{Multipart, Path, Query, State},
    Extension,
};

use super::{done, success, success_with_message, ApiResult};
use crate::auth::AdminClaims;
use crate::errors::AppError;
use crate::models::{
    logo_folder, ClientLogo, ClientLogoForm, ClientLogoRecord, DeleteLogoQuery, PageQuery,
    Paginated, UploadedFile,
};
use crate::uploads::schedule_cleanup;
use crate::AppState;

/// GET /api/client-logos - Active logos for the public marquee.
pub async fn list_public_client_logos(
    State(state): State<AppState>,
) -> ApiResult<Vec<ClientLogo>> {
    success(state.repo.list_active_client_logos().await?)
}

/// GET /api/admin/client-logos - Paginated list of every logo.
pub async fn list_client_logos(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Paginated<ClientLogo>> {
    let (page, limit) = query.resolve();
    let (items, total) = state.repo.list_client_logos_page(page, limit).await?;
    success(Paginated::new(items, page, limit, total))
}

/// GET /api/admin/client-logos/:id - Get a single logo.
pub async fn get_client_logo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ClientLogo> {
    let logo = state
        .repo
        .get_client_logo(&id)
        .await?
        .ok_or_else(|| logo_not_found(&id))?;
    success(logo)
}

/// POST /api/admin/client-logos - Upload a new logo.
pub async fn create_client_logo(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    multipart: Multipart,
) -> ApiResult<ClientLogo> {
    let form = read_logo_form(multipart).await?.validate_create()?;

    // Reject before uploading; the unique index settles races below.
    if state.repo.client_logo_order_taken(form.order, None).await? {
        return Err(order_taken(form.order));
    }

    let asset = state
        .uploads
        .upload(form.logo.bytes, &logo_folder(&form.name), &form.logo.file_name)
        .await?;

    let record = ClientLogoRecord {
        name: form.name,
        logo: asset.url,
        logo_asset_id: Some(asset.asset_id.clone()),
        is_active: form.is_active,
        order: form.order,
    };

    let logo = match state.repo.create_client_logo(&record).await {
        Ok(logo) => logo,
        Err(e) => {
            schedule_cleanup(state.uploads.clone(), asset.asset_id);
            return Err(e);
        }
    };

    tracing::info!(admin = %admin.email, logo_id = %logo.id, order = logo.order, "Created client logo");
    success_with_message(logo, "Client logo created successfully")
}

/// PUT /api/admin/client-logos/:id - Update a logo, optionally replacing the image.
pub async fn update_client_logo(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<ClientLogo> {
    let changes = read_logo_form(multipart).await?.validate_update()?;

    let existing = state
        .repo
        .get_client_logo(&id)
        .await?
        .ok_or_else(|| logo_not_found(&id))?;

    let name = changes.name.unwrap_or_else(|| existing.name.clone());
    let order = changes.order.unwrap_or(existing.order);

    if state.repo.client_logo_order_taken(order, Some(&id)).await? {
        return Err(order_taken(order));
    }

    let (logo, logo_asset_id, uploaded) = match (changes.logo, changes.existing_logo) {
        (Some(file), _) => {
            let asset = state
                .uploads
                .upload(file.bytes, &logo_folder(&name), &file.file_name)
                .await?;
            (asset.url, Some(asset.asset_id.clone()), Some(asset.asset_id))
        }
        // A caller-supplied URL is stored verbatim; only our own asset id survives it.
        (None, Some(url)) if url != existing.logo => (url, None, None),
        (None, _) => (existing.logo.clone(), existing.logo_asset_id.clone(), None),
    };

    let record = ClientLogoRecord {
        name,
        logo,
        logo_asset_id,
        is_active: changes.is_active.unwrap_or(existing.is_active),
        order,
    };

    let updated = match state.repo.update_client_logo(&id, &record).await {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(asset_id) = uploaded {
                schedule_cleanup(state.uploads.clone(), asset_id);
            }
            return Err(e);
        }
    };

    if let Some(old_asset) = existing.logo_asset_id {
        if updated.logo_asset_id.as_deref() != Some(old_asset.as_str()) {
            schedule_cleanup(state.uploads.clone(), old_asset);
        }
    }

    tracing::info!(admin = %admin.email, logo_id = %updated.id, "Updated client logo");
    success_with_message(updated, "Client logo updated successfully")
}

/// DELETE /api/admin/client-logos/:id - Delete a logo.
pub async fn delete_client_logo(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    remove_logo(&state, &admin, &id).await
}

/// DELETE /api/admin/client-logos?id= - Delete a logo addressed by query string.
pub async fn delete_client_logo_by_query(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminClaims>,
    Query(query): Query<DeleteLogoQuery>,
) -> ApiResult<()> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Client logo ID is required".to_string()))?;
    remove_logo(&state, &admin, &id).await
}

async fn remove_logo(state: &AppState, admin: &AdminClaims, id: &str) -> ApiResult<()> {
    let removed = state.repo.delete_client_logo(id).await?;

    if let Some(asset_id) = removed.logo_asset_id {
        schedule_cleanup(state.uploads.clone(), asset_id);
    }

    tracing::info!(admin = %admin.email, logo_id = %id, "Deleted client logo");
    done("Client logo deleted successfully")
}

/// Collect the known fields of a logo form. An empty file part counts as no file.
async fn read_logo_form(mut multipart: Multipart) -> Result<ClientLogoForm, AppError> {
    let mut form = ClientLogoForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(field_name) = field.name().map(str::to_string) else {
            continue;
        };

        match field_name.as_str() {
            "logo" => {
                let file_name = field.file_name().unwrap_or("logo").to_string();
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.logo = Some(UploadedFile {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "name" => form.name = Some(field.text().await?),
            "isActive" => form.is_active = Some(field.text().await?),
            "order" => form.order = Some(field.text().await?),
            "existingLogo" => form.existing_logo = Some(field.text().await?),
            other => tracing::debug!("Ignoring unknown form field {:?}", other),
        }
    }

    Ok(form)
}

fn logo_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Client logo {} not found", id))
}

fn order_taken(order: i64) -> AppError {
    AppError::Conflict(format!("A client logo with order {} already exists", order))
}
