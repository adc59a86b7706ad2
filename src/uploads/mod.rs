//! Image upload relay.
//!
//! Turns an uploaded image into a durable public URL on the image host and
//! removes assets this service no longer references.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use crate::config::CloudinaryConfig;
use crate::errors::AppError;

/// An image stored on the image host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    /// Public HTTPS URL of the image
    pub url: String,
    /// Host-side identifier, needed to delete the asset later
    pub asset_id: String,
}

/// Destination for uploaded images.
#[async_trait]
pub trait UploadRelay: Send + Sync {
    /// Store `bytes` under `folder` and return where it can be fetched.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        file_name: &str,
    ) -> Result<UploadedAsset, AppError>;

    /// Delete a previously uploaded asset.
    async fn destroy(&self, asset_id: &str) -> Result<(), AppError>;
}

/// Delete an asset in the background. Failures are logged and otherwise ignored.
pub fn schedule_cleanup(relay: Arc<dyn UploadRelay>, asset_id: String) {
    tokio::spawn(async move {
        match relay.destroy(&asset_id).await {
            Ok(()) => tracing::info!(asset_id = %asset_id, "Removed orphaned image asset"),
            Err(e) => tracing::warn!(asset_id = %asset_id, "Failed to remove image asset: {}", e),
        }
    });
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryDestroyResponse {
    result: String,
}

/// Cloudinary signed-upload client.
pub struct CloudinaryRelay {
    client: reqwest::Client,
    config: Option<CloudinaryConfig>,
    base_url: String,
}

impl CloudinaryRelay {
    pub fn new(config: Option<CloudinaryConfig>, timeout: Duration) -> Result<Self, AppError> {
        Self::with_base_url(config, timeout, "https://api.cloudinary.com/v1_1")
    }

    /// Point the client at a different API root.
    pub fn with_base_url(
        config: Option<CloudinaryConfig>,
        timeout: Duration,
        base_url: &str,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn config(&self) -> Result<&CloudinaryConfig, AppError> {
        self.config
            .as_ref()
            .ok_or_else(|| AppError::Upstream("Image host is not configured".to_string()))
    }

    fn endpoint(&self, cloud_name: &str, action: &str) -> String {
        format!("{}/{}/image/{}", self.base_url, cloud_name, action)
    }
}

#[async_trait]
impl UploadRelay for CloudinaryRelay {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        file_name: &str,
    ) -> Result<UploadedAsset, AppError> {
        let config = self.config()?;
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", &timestamp)],
            &config.api_secret,
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("api_key", config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint(&config.cloud_name, "upload"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Image upload failed with status {}: {}",
                status, body
            )));
        }

        let uploaded: CloudinaryUploadResponse = response.json().await?;
        tracing::info!(folder = %folder, public_id = %uploaded.public_id, "Uploaded image");

        Ok(UploadedAsset {
            url: uploaded.secure_url,
            asset_id: uploaded.public_id,
        })
    }

    async fn destroy(&self, asset_id: &str) -> Result<(), AppError> {
        let config = self.config()?;
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", asset_id), ("timestamp", &timestamp)],
            &config.api_secret,
        );

        let response = self
            .client
            .post(self.endpoint(&config.cloud_name, "destroy"))
            .form(&[
                ("public_id", asset_id),
                ("api_key", config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "Image deletion failed with status {}",
                status
            )));
        }

        let destroyed: CloudinaryDestroyResponse = response.json().await?;
        match destroyed.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(AppError::Upstream(format!(
                "Image deletion returned {:?}",
                other
            ))),
        }
    }
}

/// Cloudinary request signature: SHA-1 of the `key=value` pairs sorted by
/// key and joined with `&`, followed by the API secret.
fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let payload = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(payload.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_matches_documented_example() {
        // Example from the Cloudinary signed upload documentation.
        let signature = sign_params(
            &[
                ("timestamp", "1315060510"),
                ("public_id", "sample_image"),
                ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop"),
            ],
            "abcd",
        );
        assert_eq!(signature, "bfd09f95f331f558cbd1320e67aa8d488770583e");
    }

    #[test]
    fn test_signature_is_order_independent() {
        let a = sign_params(&[("folder", "client-logos/acme"), ("timestamp", "1")], "s");
        let b = sign_params(&[("timestamp", "1"), ("folder", "client-logos/acme")], "s");
        assert_eq!(a, b);
        assert_eq!(a.len(), 40);
    }

    #[tokio::test]
    async fn test_unconfigured_relay_fails_upstream() {
        let relay = CloudinaryRelay::new(None, Duration::from_secs(1)).unwrap();
        let err = relay
            .upload(vec![1, 2, 3], "client-logos/acme", "acme.png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
