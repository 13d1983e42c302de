//! Shared fixtures for unit tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::core::acquire::{Artifact, ArtifactDownloader, ProgressSink};
use crate::core::catalog::{CatalogSource, Extension, SearchPage, VersionBuild};
use crate::core::manager::ExtensionManager;
use crate::core::shell::ShellVersion;
use crate::error::{NetworkError, Result, ToolError};

pub fn extension(uuid: &str, name: &str) -> Extension {
    Extension {
        uuid: uuid.to_string(),
        name: name.to_string(),
        creator: "tester".to_string(),
        description: format!("{} description", name),
        link: format!("/extension/1/{}/", name.to_lowercase().replace(' ', "-")),
        ..Extension::default()
    }
}

pub fn extension_with_builds(uuid: &str, builds: &[(&str, i64, i64)]) -> Extension {
    let mut ext = extension(uuid, uuid);
    for (shell, pk, version) in builds {
        ext.shell_version_map.insert(shell.to_string(), VersionBuild { pk: *pk, version: *version });
    }
    ext
}

pub fn page(numpages: i64, extensions: Vec<Extension>) -> SearchPage {
    SearchPage { extensions, numpages }
}

/// Serves canned pages in order and records every request.
#[derive(Clone, Default)]
pub struct MockCatalog {
    pages: Arc<Vec<SearchPage>>,
    calls: Arc<Mutex<Vec<(String, String, u32)>>>,
}

impl MockCatalog {
    pub fn new(pages: Vec<SearchPage>) -> Self {
        Self {
            pages: Arc::new(pages),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.calls().into_iter().map(|(_, _, page)| page).collect()
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn fetch_page(&self, query: &str, shell_version: &ShellVersion, page: u32) -> Result<SearchPage> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), shell_version.to_string(), page));

        let index = (page as usize).checked_sub(1).expect("pages are 1-based");
        self.pages.get(index).cloned().ok_or_else(|| {
            NetworkError::Status {
                url: format!("mock://extension-query?page={}", page),
                status: 404,
                body: String::new(),
            }
            .into()
        })
    }
}

/// Records the calls made to the extension manager.
#[derive(Clone, Default)]
pub struct MockManager {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub installed: Vec<String>,
    pub fail_install: bool,
    /// Whether the archive existed when `install` ran
    pub saw_archive: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockManager {
    pub fn with_installed(installed: &[&str]) -> Self {
        Self {
            installed: installed.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ExtensionManager for MockManager {
    async fn install(&self, archive: &Path) -> Result<()> {
        self.record("install".to_string());
        if archive.exists() {
            self.saw_archive.lock().unwrap().push(archive.to_path_buf());
        }
        if self.fail_install {
            return Err(ToolError::Failed {
                operation: "install".to_string(),
                target: archive.display().to_string(),
                status: "exit status: 1".to_string(),
                stderr: String::new(),
            }
            .into());
        }
        Ok(())
    }

    async fn enable(&self, uuid: &str) -> Result<()> {
        self.record(format!("enable {}", uuid));
        Ok(())
    }

    async fn disable(&self, uuid: &str) -> Result<()> {
        self.record(format!("disable {}", uuid));
        Ok(())
    }

    async fn uninstall(&self, uuid: &str) -> Result<()> {
        self.record(format!("uninstall {}", uuid));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<String>> {
        self.record("list".to_string());
        Ok(self.installed.clone())
    }
}

/// Writes a small fake archive to a real temporary file.
#[derive(Clone, Default)]
pub struct MockDownloader {
    pub downloads: Arc<Mutex<Vec<String>>>,
}

impl MockDownloader {
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactDownloader for MockDownloader {
    async fn acquire(
        &self,
        extension: &Extension,
        shell_version: &ShellVersion,
        sink: &mut dyn ProgressSink,
    ) -> Result<Artifact> {
        crate::core::acquire::resolve_build(extension, shell_version)?;
        self.downloads.lock().unwrap().push(extension.uuid.clone());
        sink.start(&extension.uuid);
        sink.advance(3);
        sink.finish(3);
        Artifact::from_bytes(&extension.uuid, b"zip")
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub started: Option<String>,
    pub reports: Vec<u64>,
    pub finished: Option<u64>,
}

impl ProgressSink for RecordingProgress {
    fn start(&mut self, uuid: &str) {
        self.started = Some(uuid.to_string());
    }

    fn advance(&mut self, downloaded: u64) {
        self.reports.push(downloaded);
    }

    fn finish(&mut self, downloaded: u64) {
        self.finished = Some(downloaded);
    }
}

/// Minimal HTTP/1.1 server answering one connection per canned response.
/// The handle resolves to the request heads it received.
pub async fn serve(responses: Vec<(u16, Vec<u8>)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut heads = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            heads.push(String::from_utf8_lossy(&head).into_owned());

            let reason = if status < 400 { "OK" } else { "Error" };
            let mut response = format!(
                "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                reason,
                body.len()
            )
            .into_bytes();
            response.extend_from_slice(&body);
            stream.write_all(&response).await.unwrap();
            stream.shutdown().await.ok();
        }
        heads
    });

    (format!("http://{}", addr), handle)
}
