use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::path::PathBuf;

use crate::config::ImagesConfig;
use crate::error::{FetchError, RecipeError};

static IMAGE_EXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.(jpe?g|png|webp|gif)").unwrap());

/// Persists a recipe's source image and returns where it can be served from.
///
/// Callers treat failures as "no image"; a recipe is never rejected because its
/// image could not be stored.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, image_url: &str, slug: &str) -> Result<String, RecipeError>;
}

/// Downloads images into a local directory as `{slug}{ext}`
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    client: Client,
    dir: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    pub fn new(client: Client, dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            client,
            dir: dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Reuses the page client so image requests carry the same browser identity
    pub fn from_config(client: Client, config: &ImagesConfig) -> Self {
        Self::new(client, &config.dir, &config.public_prefix)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, image_url: &str, slug: &str) -> Result<String, RecipeError> {
        if image_url.is_empty() {
            return Err(RecipeError::Image("recipe has no image URL".to_string()));
        }
        if slug.is_empty() {
            return Err(RecipeError::Image("recipe has no slug to name the image".to_string()));
        }

        debug!("LocalImageStore: downloading {}", image_url);
        let response = self
            .client
            .get(image_url)
            .send()
            .await
            .map_err(FetchError::from)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status).into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let extension = image_extension(image_url, content_type.as_deref());
        let bytes = response.bytes().await.map_err(FetchError::from)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let file_name = format!("{slug}{extension}");
        tokio::fs::write(self.dir.join(&file_name), &bytes).await?;
        debug!("LocalImageStore: wrote {} bytes to {}", bytes.len(), file_name);

        Ok(format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            file_name
        ))
    }
}

/// Extension from the URL when it names one, else from the content type; `.jpg` by default.
fn image_extension(url: &str, content_type: Option<&str>) -> &'static str {
    if let Some(caps) = IMAGE_EXT_RE.captures(url) {
        return match caps[1].to_ascii_lowercase().as_str() {
            "png" => ".png",
            "webp" => ".webp",
            "gif" => ".gif",
            _ => ".jpg",
        };
    }

    match content_type {
        Some(ct) if ct.contains("png") => ".png",
        Some(ct) if ct.contains("webp") => ".webp",
        Some(ct) if ct.contains("gif") => ".gif",
        _ => ".jpg",
    }
}
