//! # ImgBB Image Host
//!
//! [`ImageHost`] adapter for an ImgBB-compatible upload API.
//!
//! ## Wire Format
//! ```text
//! POST {endpoint}?key={api_key}
//! Content-Type: multipart/form-data
//!   image = <jpeg bytes>
//!
//! 200 { "success": true,  "data":  { "url": "https://i.ibb.co/..." } }
//! 4xx { "success": false, "error": { "message": "Invalid API key" } }
//! ```

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ImageHostSettings;
use crate::error::{StorefrontError, StorefrontResult};
use crate::ports::{EncodedImage, ImageHost};

const SERVICE: &str = "image host";

/// HTTP client for the image host.
#[derive(Debug, Clone)]
pub struct ImgbbHost {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ImgbbHost {
    /// Builds a client from settings. An empty API key is a configuration
    /// error.
    pub fn from_settings(settings: &ImageHostSettings) -> StorefrontResult<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(StorefrontError::Config(
                "image_host.api_key is not set (SUUQ_IMGBB_API_KEY)".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| StorefrontError::Config(format!("HTTP client: {}", e)))?;

        Ok(ImgbbHost {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl ImageHost for ImgbbHost {
    async fn upload(&self, image: EncodedImage) -> StorefrontResult<String> {
        debug!(file = %image.file_name, bytes = image.bytes.len(), "Uploading image");

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| StorefrontError::upstream(SERVICE, e))?;
        let form = Form::new().part("image", part);

        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorefrontError::upstream(SERVICE, format!("unavailable: {}", e)))?;

        let status = resp.status();
        let body = resp
            .json::<ImgbbResponse>()
            .await
            .map_err(|e| {
                StorefrontError::upstream(SERVICE, format!("invalid response ({}): {}", status, e))
            });

        match body {
            Ok(body) => body.into_url(),
            Err(e) if status.is_success() => Err(e),
            Err(_) => {
                warn!(file = %image.file_name, %status, "Image host rejected upload");
                Err(StorefrontError::upstream(SERVICE, format!("returned {}", status)))
            }
        }
    }
}

// =============================================================================
// Response
// =============================================================================

#[derive(Debug, Deserialize)]
struct ImgbbResponse {
    #[serde(default)]
    success: bool,
    data: Option<ImgbbData>,
    error: Option<ImgbbErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ImgbbData {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ImgbbErrorBody {
    message: String,
}

impl ImgbbResponse {
    fn into_url(self) -> StorefrontResult<String> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data.url),
            (_, _, Some(error)) => Err(StorefrontError::upstream(SERVICE, error.message)),
            _ => Err(StorefrontError::upstream(SERVICE, "Upload failed")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> StorefrontResult<String> {
        serde_json::from_str::<ImgbbResponse>(json).unwrap().into_url()
    }

    #[test]
    fn test_success_response() {
        let url = parse(r#"{"success":true,"status":200,"data":{"id":"x","url":"https://i.ibb.co/x/a.jpg"}}"#);
        assert_eq!(url.unwrap(), "https://i.ibb.co/x/a.jpg");
    }

    #[test]
    fn test_error_response_carries_message() {
        let err = parse(r#"{"success":false,"status":400,"error":{"message":"Invalid API v1 key.","code":100}}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            StorefrontError::Upstream { ref message, .. } if message == "Invalid API v1 key."
        ));
    }

    #[test]
    fn test_success_without_data_fails() {
        let err = parse(r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, StorefrontError::Upstream { ref message, .. } if message == "Upload failed"));
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let settings = ImageHostSettings::default();
        assert!(matches!(
            ImgbbHost::from_settings(&settings),
            Err(StorefrontError::Config(_))
        ));

        let settings = ImageHostSettings {
            api_key: "k".into(),
            ..ImageHostSettings::default()
        };
        assert!(ImgbbHost::from_settings(&settings).is_ok());
    }
}
