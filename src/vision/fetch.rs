// Image acquisition and normalization

use super::models::{validate_image_size, ImageFormat, NormalizedImage};
use crate::config::FetchConfig;
use crate::error::{AnalysisError, Result};
use crate::metrics;
use base64::Engine;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Prefix marking an inline image payload.
pub const DATA_URI_PREFIX: &str = "data:image/";

/// Fetches remote creative images and normalizes inline payloads.
///
/// Holds one pooled HTTP client with the configured download timeout.
/// Download failures are terminal for the request; nothing is retried.
pub struct ImageFetcher {
    http: Client,
    config: FetchConfig,
}

impl ImageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .use_rustls_tls()
            .build()
            .map_err(|e| {
                AnalysisError::Internal(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Produce the canonical byte representation for `image_url`: decode
    /// inline data URIs directly, download anything else.
    pub async fn normalize(&self, image_url: &str) -> Result<NormalizedImage> {
        if image_url.starts_with(DATA_URI_PREFIX) {
            debug!("Image supplied inline, skipping download");
            return decode_data_uri(image_url, self.config.max_image_bytes);
        }
        self.download(image_url).await
    }

    async fn download(&self, url: &str) -> Result<NormalizedImage> {
        debug!("Downloading creative image");

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!("Image download failed: {}", e);
            metrics::record_image_download("error");
            AnalysisError::Download(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Image host returned HTTP {}", status);
            metrics::record_image_download("error");
            return Err(AnalysisError::Download(format!("HTTP {}", status)));
        }

        let data = response.bytes().await.map_err(|e| {
            warn!("Failed to read image body: {}", e);
            metrics::record_image_download("error");
            AnalysisError::Download(e.to_string())
        })?;

        validate_image_size(data.len(), self.config.max_image_bytes)
            .map_err(AnalysisError::InvalidRequest)?;

        // The image host may not send a usable content type; magic bytes
        // are more reliable, with JPEG as the assumed fallback.
        let mime_type = ImageFormat::detect(&data)
            .map(|f| f.mime_type())
            .unwrap_or("image/jpeg");

        metrics::record_image_download("ok");
        debug!("Downloaded {} bytes ({})", data.len(), mime_type);

        Ok(NormalizedImage::from_bytes(data, mime_type.to_string()))
    }
}

/// Decode an inline `data:image/...;base64,` URI into image bytes.
///
/// The original URI string is retained on the result so providers that
/// consume base64 URIs can reuse it verbatim.
pub fn decode_data_uri(uri: &str, max_bytes: usize) -> Result<NormalizedImage> {
    let rest = &uri["data:".len()..];

    let (header, payload) = rest.split_once(',').ok_or_else(|| {
        AnalysisError::InvalidRequest("Malformed data URI: missing ',' separator".to_string())
    })?;

    let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
        AnalysisError::InvalidRequest("Only base64-encoded data URIs are supported".to_string())
    })?;

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| AnalysisError::InvalidRequest(format!("Invalid base64 image data: {}", e)))?;

    validate_image_size(decoded.len(), max_bytes).map_err(AnalysisError::InvalidRequest)?;

    Ok(NormalizedImage::from_data_uri(
        Bytes::from(decoded),
        mime_type.to_string(),
        uri.to_string(),
    ))
}
