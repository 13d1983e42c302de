//! Download of extension archives for a specific shell version.

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::Config;
use crate::core::catalog::{Extension, VersionBuild};
use crate::core::shell::ShellVersion;
use crate::error::{CatalogError, FileSystemError, GnomexError, NetworkError, Result};

/// Receives the running byte count while an artifact streams in.
pub trait ProgressSink: Send {
    fn start(&mut self, _uuid: &str) {}

    fn advance(&mut self, downloaded: u64);

    fn finish(&mut self, _downloaded: u64) {}
}

pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn advance(&mut self, _downloaded: u64) {}
}

pub fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Fill the first `UUID` and first `VERSION` placeholders of `template`.
/// The catalog drops `@` from UUIDs in artifact names.
pub fn download_url(template: &str, uuid: &str, version: i64) -> String {
    // VERSION goes first: the substituted digits can never form a new `UUID`.
    template
        .replacen("VERSION", &version.to_string(), 1)
        .replacen("UUID", &uuid.replace('@', ""), 1)
}

pub fn resolve_build<'a>(extension: &'a Extension, shell_version: &ShellVersion) -> Result<&'a VersionBuild> {
    extension
        .shell_version_map
        .get(shell_version.as_str())
        .ok_or_else(|| {
            CatalogError::IncompatibleShell {
                uuid: extension.uuid.clone(),
                shell_version: shell_version.to_string(),
                available: extension.shell_versions(),
            }
            .into()
        })
}

/// Copy every chunk of `stream` into `writer`, reporting the running total.
pub async fn stream_to<S, B, E, W>(mut stream: S, writer: &mut W, sink: &mut dyn ProgressSink) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<GnomexError>,
    W: AsyncWrite + Unpin,
{
    let mut downloaded: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => return Err(err.into()),
        };
        let bytes = chunk.as_ref();
        writer.write_all(bytes).await?;
        downloaded += bytes.len() as u64;
        sink.advance(downloaded);
    }
    writer.flush().await?;
    Ok(downloaded)
}

/// A downloaded archive in a temporary file, removed when dropped.
#[derive(Debug)]
pub struct Artifact {
    uuid: String,
    file: NamedTempFile,
    bytes: u64,
}

impl Artifact {
    #[cfg(test)]
    pub(crate) fn from_bytes(uuid: &str, contents: &[u8]) -> Result<Self> {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .prefix(&temp_prefix(uuid))
            .tempfile()
            .map_err(FileSystemError::TempFile)?;
        file.write_all(contents)?;
        Ok(Self {
            uuid: uuid.to_string(),
            file,
            bytes: contents.len() as u64,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Keep the archive as `<dir>/<uuid>.shell-extension.zip` instead of
    /// deleting it.
    pub fn persist(self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let target = dir.join(format!("{}.shell-extension.zip", self.uuid));
        match self.file.persist(&target) {
            Ok(_) => Ok(target),
            // rename(2) cannot cross filesystems, so fall back to copying
            Err(err) => {
                fs::copy(err.file.path(), &target).map_err(|source| FileSystemError::Persist {
                    path: target.clone(),
                    source,
                })?;
                Ok(target)
            }
        }
    }
}

fn temp_prefix(uuid: &str) -> String {
    let sanitized: String = uuid
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' { c } else { '_' })
        .collect();
    format!("{}.", sanitized)
}

#[async_trait]
pub trait ArtifactDownloader: Send + Sync {
    async fn acquire(
        &self,
        extension: &Extension,
        shell_version: &ShellVersion,
        sink: &mut dyn ProgressSink,
    ) -> Result<Artifact>;
}

pub struct HttpDownloader {
    client: reqwest::Client,
    url_template: String,
    timeout: Duration,
}

impl HttpDownloader {
    pub fn new(config: &Config) -> Result<Self> {
        // gzip, deflate and br are advertised through the reqwest features
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            client,
            url_template: config.download_url_template.clone(),
            timeout: config.download_timeout(),
        })
    }
}

#[async_trait]
impl ArtifactDownloader for HttpDownloader {
    async fn acquire(
        &self,
        extension: &Extension,
        shell_version: &ShellVersion,
        sink: &mut dyn ProgressSink,
    ) -> Result<Artifact> {
        let build = resolve_build(extension, shell_version)?;
        let url = download_url(&self.url_template, &extension.uuid, build.version);
        let parsed = reqwest::Url::parse(&url).map_err(|source| NetworkError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        debug!("Downloading {} build {} from {}", extension.uuid, build.version, url);

        let response = self
            .client
            .get(parsed)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(NetworkError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NetworkError::Status {
                url,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let file = tempfile::Builder::new()
            .prefix(&temp_prefix(&extension.uuid))
            .suffix(".shell-extension.zip")
            .tempfile()
            .map_err(FileSystemError::TempFile)?;
        let mut writer = tokio::fs::File::from_std(file.reopen().map_err(FileSystemError::TempFile)?);

        sink.start(&extension.uuid);
        let bytes = stream_to(Box::pin(response.bytes_stream()), &mut writer, sink).await?;
        sink.finish(bytes);

        info!("Downloaded {} ({:.2} MB)", extension.uuid, megabytes(bytes));

        Ok(Artifact {
            uuid: extension.uuid.clone(),
            file,
            bytes,
        })
    }
}
