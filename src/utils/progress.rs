use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::acquire::{megabytes, ProgressSink};

/// Centralized progress bar creation utilities
pub struct ProgressUtils;

impl ProgressUtils {
    /// Spinner shown while catalog pages are fetched
    pub fn create_search_spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("valid spinner template"),
        );
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Byte counter for a download of unknown length
    pub fn create_download_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {prefix}: {msg}")
                .expect("valid download template"),
        );
        pb
    }
}

/// Common progress bar messages
pub struct ProgressMessages;

impl ProgressMessages {
    pub fn searching(query: &str) -> String {
        if query.is_empty() {
            "Fetching all extensions...".to_string()
        } else {
            format!("Searching for \"{}\"...", query)
        }
    }

    pub fn downloaded(bytes: u64) -> String {
        format!("{:.2} MB downloaded", megabytes(bytes))
    }
}

/// Renders the running byte count on the terminal, replacing the previous line.
/// The spinner only appears once a download actually starts.
#[derive(Default)]
pub struct DownloadProgress {
    bar: Option<ProgressBar>,
}

impl DownloadProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for DownloadProgress {
    fn start(&mut self, uuid: &str) {
        let bar = ProgressUtils::create_download_spinner();
        bar.set_prefix(uuid.to_string());
        bar.set_message(ProgressMessages::downloaded(0));
        self.bar = Some(bar);
    }

    fn advance(&mut self, downloaded: u64) {
        if let Some(bar) = &self.bar {
            bar.set_message(ProgressMessages::downloaded(downloaded));
            bar.tick();
        }
    }

    fn finish(&mut self, downloaded: u64) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(ProgressMessages::downloaded(downloaded));
        }
    }
}

impl Drop for DownloadProgress {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.abandon();
            }
        }
    }
}
