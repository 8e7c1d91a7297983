//! # relget
//!
//! Download a single GitHub release asset by name.
//!
//! The API does not serve assets by file name, so every download first reads
//! the release listing to learn the asset id and then fetches the asset by id.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relget::{Api, AssetReference};
//!
//! #[tokio::main]
//! async fn main() -> relget::Result<()> {
//!     let reference: AssetReference = "owner/repo/v1.0.0/asset.tar.gz".parse()?;
//!     let client = Api::new().set_token("ghp_token").build()?;
//!     let mut out = tokio::fs::File::create("asset.tar.gz").await.unwrap();
//!     client.download(&reference, Some(&mut out)).await
//! }
//! ```

pub mod api;
pub mod downloader;
pub mod error;
pub mod progress;
pub mod release;
pub mod transport;
pub mod version;

pub use api::{Api, ClientConfig};
pub use downloader::Client;
pub use error::{Error, Result};
pub use release::{Asset, AssetReference, Release};
pub use version::{BuildInfo, BUILD_INFO};
