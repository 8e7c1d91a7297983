use log::{debug, info};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Method;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::api::ClientConfig;
use crate::error::{Error, Result};
use crate::release::{is_latest, AssetReference, Release};
use crate::transport::{self, BINARY_MEDIA_TYPE};

/// Resolves release assets by name and downloads their content.
///
/// Every download is two sequential requests: the release listing to find the
/// asset id, then the asset itself by id.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Download the asset named by `reference` into `out`.
    pub async fn download<W>(&self, reference: &AssetReference, out: Option<&mut W>) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.download_release(&reference.owner, &reference.repo, &reference.tag, &reference.filename, out)
            .await
    }

    /// Resolve `file` in release `tag` of `owner/repo` and copy its bytes to `out`.
    ///
    /// With `out == None` the asset is still fetched but nothing is written.
    /// A failed copy may leave a partially written sink behind.
    pub async fn download_release<W>(
        &self,
        owner: &str,
        repo: &str,
        tag: &str,
        file: &str,
        out: Option<&mut W>,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let asset_id = self.find_asset_id(owner, repo, tag, file).await?;
        debug!("{owner}/{repo}: {file} has asset id {asset_id}");

        let endpoint = format!("repos/{owner}/{repo}/releases/assets/{asset_id}");
        let mut request = transport::build_request(&self.config, Method::GET, &endpoint)?;
        request
            .headers_mut()
            .insert(ACCEPT, HeaderValue::from_static(BINARY_MEDIA_TYPE));

        let outcome = transport::execute(&self.config, request, self.config.silent).await;
        if !outcome.is_ok() {
            return Err(outcome.into_error(|status, message| Error::ContentFetch { status, message }));
        }

        let Some(out) = out else {
            info!("fetched {file} ({} bytes), output discarded", outcome.body.len());
            return Ok(());
        };

        out.write_all(&outcome.body).await.map_err(Error::Write)?;
        out.flush().await.map_err(Error::Write)?;
        info!("downloaded {file} ({} bytes)", outcome.body.len());
        Ok(())
    }

    /// Id of the first asset named exactly `file` in release `tag`.
    ///
    /// An empty tag or `"latest"` selects the most recent release.
    pub async fn find_asset_id(&self, owner: &str, repo: &str, tag: &str, file: &str) -> Result<u64> {
        let endpoint = if is_latest(tag) {
            format!("repos/{owner}/{repo}/releases/latest")
        } else {
            format!("repos/{owner}/{repo}/releases/tags/{tag}")
        };

        let request = transport::build_request(&self.config, Method::GET, &endpoint)?;
        let outcome = transport::execute(&self.config, request, true).await;
        if !outcome.is_ok() {
            return Err(outcome.into_error(|status, message| Error::MetadataFetch { status, message }));
        }

        let release: Release = serde_json::from_slice(&outcome.body)?;
        debug!("release {} lists {} assets", release.tag_name, release.assets.len());

        release.asset_id(file).ok_or_else(|| Error::AssetNotFound {
            name: file.to_owned(),
        })
    }
}
