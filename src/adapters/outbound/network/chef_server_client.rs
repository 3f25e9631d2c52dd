use super::request_signer::RequestSigner;
use crate::cookbook_analysis::domain::{CatalogEntry, CookbookVersionRef, NodeRaw};
use crate::ports::outbound::{CookbookCatalog, UsageIndex};
use crate::shared::security::validate_relative_path;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Rows requested per search page
const SEARCH_PAGE_SIZE: usize = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `GET /cookbooks?num_versions=all`
type CookbookListResponse = HashMap<String, CookbookListEntry>;

#[derive(Debug, Deserialize)]
struct CookbookListEntry {
    #[serde(default)]
    versions: Vec<CookbookListVersion>,
}

#[derive(Debug, Deserialize)]
struct CookbookListVersion {
    version: String,
}

/// `GET /cookbooks/{name}/{version}`
///
/// Newer servers list every file in `all_files`; older ones split them into
/// segments. Segments may be missing or null.
#[derive(Debug, Default, Deserialize)]
struct CookbookManifest {
    all_files: Option<Vec<ManifestFile>>,
    recipes: Option<Vec<ManifestFile>>,
    attributes: Option<Vec<ManifestFile>>,
    definitions: Option<Vec<ManifestFile>>,
    files: Option<Vec<ManifestFile>>,
    libraries: Option<Vec<ManifestFile>>,
    providers: Option<Vec<ManifestFile>>,
    resources: Option<Vec<ManifestFile>>,
    templates: Option<Vec<ManifestFile>>,
    root_files: Option<Vec<ManifestFile>>,
}

impl CookbookManifest {
    fn into_files(self) -> Vec<ManifestFile> {
        if let Some(all_files) = self.all_files.filter(|files| !files.is_empty()) {
            return all_files;
        }

        [
            self.recipes,
            self.attributes,
            self.definitions,
            self.files,
            self.libraries,
            self.providers,
            self.resources,
            self.templates,
            self.root_files,
        ]
        .into_iter()
        .flatten()
        .flatten()
        .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestFile {
    path: String,
    #[serde(default)]
    checksum: Option<String>,
    url: String,
}

/// Partial search response page
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct SearchResponse<T> {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    rows: Vec<SearchRow<T>>,
}

#[derive(Debug, Deserialize)]
struct SearchRow<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct NodeNameData {
    #[serde(default)]
    name: Option<String>,
}

/// ChefServerClient adapter for the Chef Infra Server REST API
///
/// Implements both the cookbook catalog and the node usage index. Every
/// API request is signed with the client key; bookshelf file URLs are
/// pre-signed by the server and fetched as is.
///
/// File bodies are shared between cookbook versions by checksum, so a
/// file already fetched during the run is copied locally instead. Clones
/// share the connection pool and the checksum cache.
#[derive(Clone)]
pub struct ChefServerClient {
    client: reqwest::Client,
    base_url: String,
    signer: Arc<RequestSigner>,
    max_retries: u32,
    file_cache: Arc<DashMap<String, PathBuf>>,
}

impl ChefServerClient {
    /// Creates a client for an organization URL such as `https://chef.example.com/organizations/acme`
    pub fn new(server_url: &str, signer: RequestSigner, no_ssl_verify: bool) -> Result<Self> {
        let parsed = Url::parse(server_url)
            .with_context(|| format!("Invalid Chef Infra Server URL: {}", server_url))?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            anyhow::bail!(
                "Chef Infra Server URL must use http or https: {}",
                server_url
            );
        }

        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("cookbook-audit/{}", version);
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(no_ssl_verify)
            .build()?;

        Ok(Self {
            client,
            base_url: server_url.trim_end_matches('/').to_string(),
            signer: Arc::new(signer),
            max_retries: 3,
            file_cache: Arc::new(DashMap::new()),
        })
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    fn cookbook_endpoint(&self, cookbook: &CookbookVersionRef) -> String {
        self.endpoint(&format!(
            "/cookbooks/{}/{}",
            urlencoding::encode(cookbook.name()),
            urlencoding::encode(cookbook.version())
        ))
    }

    fn search_endpoint(&self, query: &str, start: usize) -> String {
        self.endpoint(&format!(
            "/search/node?q={}&start={}&rows={}",
            urlencoding::encode(query),
            start,
            SEARCH_PAGE_SIZE
        ))
    }

    /// Search query matching nodes whose last run applied this cookbook version
    fn usage_query(cookbook: &CookbookVersionRef) -> String {
        format!(
            "cookbooks_{}_version:{}",
            cookbook.name(),
            cookbook.version()
        )
    }

    /// Retries an operation with linear backoff
    async fn fetch_with_retry<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if attempt >= self.max_retries => return Err(e),
                Err(_) => {
                    tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn send_signed(
        &self,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response> {
        let path = Url::parse(url)?.path().to_string();
        let payload = body.unwrap_or_default();

        let mut request = self.client.request(method.clone(), url);
        for (name, value) in self.signer.sign(method.as_str(), &path, &payload) {
            request = request.header(name, value);
        }
        if !payload.is_empty() {
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            anyhow::bail!(
                "Chef Infra Server returned status {} for {} {}",
                response.status(),
                method,
                url
            );
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send_signed(Method::GET, url, None).await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned>(&self, url: &str, body: &serde_json::Value) -> Result<T> {
        let payload = serde_json::to_vec(body)?;
        let response = self.send_signed(Method::POST, url, Some(payload)).await?;
        Ok(response.json().await?)
    }

    /// Runs a partial search over every page of results
    async fn partial_search<T: DeserializeOwned>(
        &self,
        query: &str,
        keys: &serde_json::Value,
    ) -> Result<Vec<T>> {
        let mut results = Vec::new();
        loop {
            let url = self.search_endpoint(query, results.len());
            let page: SearchResponse<T> = self
                .fetch_with_retry(|| self.post_json(&url, keys))
                .await?;

            let received = page.rows.len();
            results.extend(page.rows.into_iter().map(|row| row.data));
            if received == 0 || results.len() >= page.total {
                return Ok(results);
            }
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("File download returned status {} for {}", response.status(), url);
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Writes one manifest file to `target`, reusing a local copy with the same checksum
    async fn fetch_file(&self, file: &ManifestFile, target: &Path) -> Result<()> {
        let cached = file
            .checksum
            .as_ref()
            .and_then(|checksum| self.file_cache.get(checksum).map(|p| p.value().clone()));
        if let Some(cached) = cached {
            if tokio::fs::copy(&cached, target).await.is_ok() {
                return Ok(());
            }
        }

        let bytes = self
            .fetch_with_retry(|| self.fetch_bytes(&file.url))
            .await
            .with_context(|| format!("Failed to download {}", file.path))?;
        tokio::fs::write(target, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", target.display()))?;

        if let Some(checksum) = &file.checksum {
            self.file_cache
                .insert(checksum.clone(), target.to_path_buf());
        }
        Ok(())
    }
}

fn catalog_entries(list: CookbookListResponse) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = list
        .into_iter()
        .flat_map(|(name, entry)| {
            entry
                .versions
                .into_iter()
                .map(move |v| CatalogEntry::new(name.clone(), v.version))
        })
        .collect();
    entries.sort_by(|a, b| (&a.name, &a.version).cmp(&(&b.name, &b.version)));
    entries
}

fn all_nodes_keys() -> serde_json::Value {
    json!({
        "name": ["name"],
        "chef_version": ["chef_packages", "chef", "version"],
        "os": ["platform"],
        "os_version": ["platform_version"],
        "cookbooks": ["cookbooks"]
    })
}

#[async_trait]
impl CookbookCatalog for ChefServerClient {
    async fn list_cookbooks(&self) -> Result<Vec<CatalogEntry>> {
        let url = self.endpoint("/cookbooks?num_versions=all");
        let list: CookbookListResponse = self.fetch_with_retry(|| self.get_json(&url)).await?;
        Ok(catalog_entries(list))
    }

    async fn download(&self, cookbook: &CookbookVersionRef, destination: &Path) -> Result<PathBuf> {
        let url = self.cookbook_endpoint(cookbook);
        let manifest: CookbookManifest = self.fetch_with_retry(|| self.get_json(&url)).await?;

        tokio::fs::create_dir_all(destination)
            .await
            .with_context(|| format!("Failed to create {}", destination.display()))?;

        for file in manifest.into_files() {
            validate_relative_path(&file.path)?;
            let target = destination.join(&file.path);
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            self.fetch_file(&file, &target).await?;
        }

        Ok(destination.to_path_buf())
    }
}

#[async_trait]
impl UsageIndex for ChefServerClient {
    async fn nodes_using(&self, cookbook: &CookbookVersionRef) -> Result<Vec<String>> {
        let rows: Vec<NodeNameData> = self
            .partial_search(&Self::usage_query(cookbook), &json!({"name": ["name"]}))
            .await?;
        Ok(rows.into_iter().filter_map(|row| row.name).collect())
    }

    async fn all_nodes(&self) -> Result<Vec<NodeRaw>> {
        self.partial_search("*:*", &all_nodes_keys()).await
    }
}
