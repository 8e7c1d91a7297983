use std::fmt;
use std::time::Duration;

use reqwest::{Proxy, Url};
use tokio::io::AsyncWrite;

use crate::downloader::Client;
use crate::error::{Error, Result};
use crate::release::LATEST;

/// Default REST endpoint.
pub const GITHUB_API: &str = "https://api.github.com";

// ──────────────────────────────────────────────────────────────────────────────
// ClientConfig
// ──────────────────────────────────────────────────────────────────────────────

/// Immutable settings shared by both protocol requests.
///
/// Only [`Api`] constructs one, so the base URL has always been validated.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) token: Option<String>,
    pub(crate) silent: bool,
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("silent", &self.silent)
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Api
// ──────────────────────────────────────────────────────────────────────────────

/// Chainable builder for a [`Client`].
///
/// # Example
/// ```rust,no_run
/// use relget::Api;
///
/// #[tokio::main]
/// async fn main() {
///     let mut out = tokio::io::stdout();
///     Api::new()
///         .no_progress()
///         .repo("owner", "repo")
///         .latest()
///         .download("asset.tar.gz", Some(&mut out))
///         .await
///         .unwrap();
/// }
/// ```
pub struct Api {
    token: Option<String>,
    silent: bool,
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Duration,
    proxy: Option<String>,
    http: Option<reqwest::Client>,
}

impl Api {
    /// Create a new `Api` with sensible defaults.
    ///
    /// Only connecting is bounded by default; a slow asset body may take as
    /// long as it needs. Proxies follow reqwest's system settings
    /// (`HTTP_PROXY`, `HTTPS_PROXY`, `NO_PROXY`) unless [`Api::set_proxy`] is used.
    pub fn new() -> Self {
        Self {
            token: None,
            silent: false,
            base_url: GITHUB_API.to_owned(),
            timeout: None,
            connect_timeout: Duration::from_secs(10),
            proxy: None,
            http: None,
        }
    }

    /// Token sent as `Authorization: token ...`; an empty token is ignored.
    pub fn set_token(mut self, token: &str) -> Self {
        if !token.is_empty() {
            self.token = Some(token.to_owned());
        }
        self
    }

    /// Disable the download progress bar (builder).
    pub fn no_progress(mut self) -> Self {
        self.silent = true;
        self
    }

    pub fn set_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Point the client at another API root, e.g. a mock server (builder).
    pub fn set_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_owned();
        self
    }

    /// Bound each whole request, body included, to `secs` seconds (builder).
    pub fn set_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Bound connection establishment only (builder).
    pub fn set_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout = Duration::from_secs(secs);
        self
    }

    /// Set an explicit HTTP/HTTPS proxy URL (builder).
    pub fn set_proxy(mut self, proxy: &str) -> Self {
        self.proxy = Some(proxy.to_owned());
        self
    }

    /// Use a caller-supplied reqwest client; timeout and proxy are then ignored.
    pub fn set_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Validate the settings once and freeze them.
    pub fn config(self) -> Result<ClientConfig> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::Request(format!("invalid base url {}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Request(format!("invalid base url {}", self.base_url)));
        }

        let http = match self.http {
            Some(client) => client,
            None => build_http_client(self.timeout, self.connect_timeout, self.proxy.as_deref())?,
        };

        Ok(ClientConfig {
            token: self.token,
            silent: self.silent,
            http,
            base_url,
        })
    }

    pub fn build(self) -> Result<Client> {
        self.config().map(Client::new)
    }

    /// Select a repository and return a [`RepoApi`].
    pub fn repo(self, owner: &str, repo: &str) -> RepoApi {
        RepoApi {
            api: self,
            owner: owner.to_owned(),
            repo: repo.to_owned(),
        }
    }
}

impl Default for Api {
    fn default() -> Self {
        Self::new()
    }
}

fn build_http_client(
    timeout: Option<Duration>,
    connect_timeout: Duration,
    proxy: Option<&str>,
) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .user_agent(concat!("relget/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(proxy_url) = proxy {
        let proxy = Proxy::all(proxy_url).map_err(|e| Error::Request(format!("invalid proxy {proxy_url}: {e}")))?;
        builder = builder.proxy(proxy);
    }
    builder
        .build()
        .map_err(|e| Error::Request(format!("http client: {e}")))
}

// ──────────────────────────────────────────────────────────────────────────────
// RepoApi
// ──────────────────────────────────────────────────────────────────────────────

/// Intermediate builder after a repository has been specified.
pub struct RepoApi {
    api: Api,
    owner: String,
    repo: String,
}

impl RepoApi {
    /// Target the latest release.
    pub fn latest(self) -> VersionApi {
        self.version(LATEST)
    }

    /// Target a specific release tag (e.g. `"v3.5.1"`).
    pub fn version(self, tag: &str) -> VersionApi {
        VersionApi {
            api: self.api,
            owner: self.owner,
            repo: self.repo,
            tag: tag.to_owned(),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// VersionApi
// ──────────────────────────────────────────────────────────────────────────────

/// Intermediate builder after a release has been chosen.
pub struct VersionApi {
    api: Api,
    owner: String,
    repo: String,
    tag: String,
}

impl VersionApi {
    /// Resolve `file` in the chosen release and copy its bytes into `out`.
    ///
    /// Passing `None` resolves and fetches without keeping the bytes.
    pub async fn download<W>(self, file: &str, out: Option<&mut W>) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let client = self.api.build()?;
        client
            .download_release(&self.owner, &self.repo, &self.tag, file, out)
            .await
    }
}
