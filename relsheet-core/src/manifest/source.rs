//! Manifest sources - where the raw manifest bytes come from
//!
//! - HTTP (the download site, default)
//! - Local file or stdin (offline runs, fixtures)

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::{ReleaseError, Result};

#[cfg(feature = "http")]
use crate::config::SourceConfig;

/// Something that can hand over one manifest body
///
/// One call per run, no retries. Implementations enforce their own
/// deadline and report failures as [`ReleaseError`]s.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetch the raw manifest bytes
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Source description for logging
    fn describe(&self) -> String;
}

/// Reads the manifest from a file, or stdin for `-`
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[async_trait]
impl ManifestSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let read_error = |source| ReleaseError::Read {
            path: self.path.clone(),
            source,
        };

        let bytes = if self.is_stdin() {
            let mut buffer = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buffer)
                .await
                .map_err(read_error)?;
            buffer
        } else {
            tokio::fs::read(&self.path).await.map_err(read_error)?
        };

        debug!("Read {} bytes from {}", bytes.len(), self.describe());
        Ok(bytes)
    }

    fn describe(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

/// Fetches the manifest over HTTP
///
/// A single GET with the configured User-Agent under one overall deadline
/// covering connect, headers and body. Connections are never pooled.
#[cfg(feature = "http")]
pub struct HttpSource {
    client: reqwest::Client,
    config: SourceConfig,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ReleaseError::Request {
                endpoint: config.endpoint.clone(),
                source: Box::new(e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    fn transport_error(&self, error: reqwest::Error) -> ReleaseError {
        if error.is_timeout() {
            ReleaseError::Timeout {
                endpoint: self.config.endpoint.clone(),
                timeout: self.config.timeout(),
            }
        } else {
            ReleaseError::Request {
                endpoint: self.config.endpoint.clone(),
                source: Box::new(error),
            }
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl ManifestSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        debug!("GET {}", self.config.endpoint);

        let response = self
            .client
            .get(&self.config.endpoint)
            .header(reqwest::header::CONNECTION, "close")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!("{:?} {}", response.version(), status);
        for (name, value) in response.headers() {
            debug!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
        }

        if !status.is_success() {
            return Err(ReleaseError::Status {
                endpoint: self.config.endpoint.clone(),
                status: status.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!("Fetched {} bytes from {}", body.len(), self.config.endpoint);
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.config.endpoint.clone()
    }
}

/// Mock source for testing
#[cfg(test)]
pub struct MockSource {
    pub response: std::result::Result<Vec<u8>, String>,
}

#[cfg(test)]
#[async_trait]
impl ManifestSource for MockSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        self.response
            .clone()
            .map_err(|status| ReleaseError::Status {
                endpoint: "mock://manifest".to_string(),
                status,
            })
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
