//! Read access to the backend configuration service.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{PaletteConfig, TypographyConfig};

#[derive(Debug, Error)]
pub enum ThemeError {
    /// The configuration service answered with a non-success status.
    #[error("configuration service returned status {0}")]
    Status(u16),

    /// Transport-level failure reaching the service.
    #[error("configuration request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Idempotent reads of the active palette and site typography.
///
/// The two reads are independent; callers may issue them concurrently and
/// apply whichever completes, in any order.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn active_palette(&self) -> Result<PaletteConfig, ThemeError>;
    async fn site_typography(&self) -> Result<TypographyConfig, ThemeError>;
}

/// HTTP-backed source.
#[derive(Debug, Clone)]
pub struct HttpConfigSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpConfigSource {
    /// `base_url` such as `https://api.pagerodeo.com/v1`; a trailing slash
    /// is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ThemeError> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ThemeError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ConfigSource for HttpConfigSource {
    async fn active_palette(&self) -> Result<PaletteConfig, ThemeError> {
        self.get_json("/palettes/active").await
    }

    async fn site_typography(&self) -> Result<TypographyConfig, ThemeError> {
        self.get_json("/site-config/typography").await
    }
}

/// Source answering with fixed configs; for previews, demos, and tests.
#[derive(Debug)]
pub struct FixedConfigSource {
    palette: PaletteConfig,
    typography: TypographyConfig,
    palette_calls: AtomicUsize,
    typography_calls: AtomicUsize,
}

impl FixedConfigSource {
    pub fn new(palette: PaletteConfig, typography: TypographyConfig) -> Self {
        Self {
            palette,
            typography,
            palette_calls: AtomicUsize::new(0),
            typography_calls: AtomicUsize::new(0),
        }
    }

    pub fn palette_calls(&self) -> usize {
        self.palette_calls.load(Ordering::SeqCst)
    }

    pub fn typography_calls(&self) -> usize {
        self.typography_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigSource for FixedConfigSource {
    async fn active_palette(&self) -> Result<PaletteConfig, ThemeError> {
        self.palette_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.palette.clone())
    }

    async fn site_typography(&self) -> Result<TypographyConfig, ThemeError> {
        self.typography_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.typography.clone())
    }
}
