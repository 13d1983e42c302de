//! Paginated catalog search against extensions.gnome.org.
//!
//! Every command builds its own [`CatalogIndex`] from scratch; nothing is
//! cached between runs.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::config::Config;
use crate::core::shell::ShellVersion;
use crate::error::{CatalogError, NetworkError, Result};

/// A build of one extension for one shell release line.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionBuild {
    #[serde(default)]
    pub pk: i64,
    #[serde(default)]
    pub version: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Extension {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Detail page, relative to the catalog home
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shell_version_map: BTreeMap<String, VersionBuild>,
}

impl Extension {
    /// Shell versions this extension publishes builds for, in key order.
    pub fn shell_versions(&self) -> Vec<String> {
        self.shell_version_map.keys().cloned().collect()
    }
}

/// One page of `/extension-query` results.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub extensions: Vec<Extension>,
    #[serde(default)]
    pub numpages: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extensions keyed by UUID, valid for the lifetime of one command.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    extensions: HashMap<String, Extension>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later entries for the same UUID replace earlier ones.
    pub fn insert(&mut self, extension: Extension) {
        self.extensions.insert(extension.uuid.clone(), extension);
    }

    pub fn get(&self, uuid: &str) -> Option<&Extension> {
        self.extensions.get(uuid)
    }

    pub fn remove(&mut self, uuid: &str) -> Option<Extension> {
        self.extensions.remove(uuid)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Stable listing for display: by name, then UUID.
    pub fn sorted_by_name(&self) -> Vec<&Extension> {
        let mut extensions: Vec<&Extension> = self.extensions.values().collect();
        extensions.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.uuid.cmp(&b.uuid))
        });
        extensions
    }
}

impl Extend<Extension> for CatalogIndex {
    fn extend<I: IntoIterator<Item = Extension>>(&mut self, iter: I) {
        for extension in iter {
            self.insert(extension);
        }
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch a single 1-based page of search results.
    async fn fetch_page(&self, query: &str, shell_version: &ShellVersion, page: u32) -> Result<SearchPage>;
}

/// Requests pages 1, 2, ... in order until the declared page count is reached,
/// merging each page into `index`. Returns the number of pages fetched.
pub async fn fetch<S>(source: &S, query: &str, shell_version: &ShellVersion, index: &mut CatalogIndex) -> Result<u32>
where
    S: CatalogSource + ?Sized,
{
    let mut page: u32 = 1;
    loop {
        let result = source.fetch_page(query, shell_version, page).await?;
        debug!(
            "Catalog page {}/{} returned {} extension(s)",
            page,
            result.numpages,
            result.extensions.len()
        );

        index.extend(result.extensions);

        if i64::from(page) >= result.numpages {
            return Ok(page);
        }
        page += 1;
    }
}

pub struct HttpCatalog {
    client: reqwest::Client,
    search_url: String,
}

impl HttpCatalog {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            client,
            search_url: config.search_url.clone(),
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch_page(&self, query: &str, shell_version: &ShellVersion, page: u32) -> Result<SearchPage> {
        let page_param = page.to_string();
        let params = [
            ("page", page_param.as_str()),
            ("search", query),
            ("shell_version", shell_version.as_str()),
        ];

        let response = self
            .client
            .get(&self.search_url)
            .query(&params)
            .send()
            .await
            .map_err(NetworkError::Http)?;

        let url = response.url().to_string();
        let status = response.status();
        let body = response.text().await.map_err(NetworkError::Http)?;

        if !status.is_success() {
            return Err(NetworkError::Status {
                url,
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed = serde_json::from_str::<SearchPage>(&body);
        match parsed {
            Ok(page) => Ok(page),
            Err(source) => Err(NetworkError::Decode { url, body, source }.into()),
        }
    }
}

/// Catalog queries bound to the shell version they are filtered for.
pub struct CatalogClient {
    source: Box<dyn CatalogSource>,
    shell_version: ShellVersion,
}

impl CatalogClient {
    pub fn new(source: Box<dyn CatalogSource>, shell_version: ShellVersion) -> Self {
        Self {
            source,
            shell_version,
        }
    }

    pub fn shell_version(&self) -> &ShellVersion {
        &self.shell_version
    }

    /// An empty query matches every extension for the shell version.
    pub async fn search(&self, query: &str) -> Result<CatalogIndex> {
        let mut index = CatalogIndex::new();
        let pages = fetch(self.source.as_ref(), query, &self.shell_version, &mut index).await?;
        info!(
            "Fetched {} extension(s) across {} page(s) for GNOME Shell {}",
            index.len(),
            pages,
            self.shell_version
        );
        Ok(index)
    }

    /// Search with the UUID as query text and require an exact UUID match.
    pub async fn lookup(&self, uuid: &str) -> Result<Extension> {
        let mut index = self.search(uuid).await?;
        index.remove(uuid).ok_or_else(|| {
            CatalogError::NotFound {
                uuid: uuid.to_string(),
            }
            .into()
        })
    }
}
