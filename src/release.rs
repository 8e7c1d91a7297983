use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::Error;

/// Tag alias for the most recently published release.
pub const LATEST: &str = "latest";

/// Release metadata as returned by `releases/latest` and `releases/tags/{tag}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content_type: String,
}

impl Release {
    /// Id of the first asset whose name equals `name` exactly, in listing order.
    pub fn asset_id(&self, name: &str) -> Option<u64> {
        self.assets.iter().find(|a| a.name == name).map(|a| a.id)
    }
}

/// Whether `tag` selects the latest release rather than a named tag.
pub fn is_latest(tag: &str) -> bool {
    tag.is_empty() || tag == LATEST
}

/// Points at one asset of one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub owner: String,
    pub repo: String,
    pub tag: String,
    pub filename: String,
}

static TAGGED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+)/releases/download/(?P<tag>[^/]+)/(?P<file>.+)$")
        .expect("valid tagged download pattern")
});

static LATEST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/(?P<owner>[^/]+)/(?P<repo>[^/]+)/releases/latest/download/(?P<file>.+)$")
        .expect("valid latest download pattern")
});

impl AssetReference {
    pub fn new(owner: &str, repo: &str, tag: &str, filename: &str) -> Self {
        Self {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
            tag: tag.to_owned(),
            filename: filename.to_owned(),
        }
    }

    /// Decompose a browser download URL, `None` when it matches neither shape.
    pub fn from_download_url(url: &str) -> Option<Self> {
        if let Some(caps) = TAGGED_URL.captures(url) {
            return Some(Self::new(&caps["owner"], &caps["repo"], &caps["tag"], &caps["file"]));
        }
        LATEST_URL
            .captures(url)
            .map(|caps| Self::new(&caps["owner"], &caps["repo"], LATEST, &caps["file"]))
    }

    pub fn is_latest(&self) -> bool {
        is_latest(&self.tag)
    }
}

impl FromStr for AssetReference {
    type Err = Error;

    /// Accepts `owner/repo/file`, `owner/repo/tag/file` or a GitHub release
    /// download URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::MissingReference);
        }
        if let Some(reference) = Self::from_download_url(s) {
            return Ok(reference);
        }

        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [owner, repo, file] => Ok(Self::new(owner, repo, LATEST, file)),
            [owner, repo, tag, file] => Ok(Self::new(owner, repo, tag, file)),
            _ => Err(Error::InvalidReference(s.to_owned())),
        }
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}/{}", self.owner, self.repo, self.tag, self.filename)
    }
}
