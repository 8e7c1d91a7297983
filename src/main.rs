//! # relget CLI
//!
//! Curl-like front end: parse an asset reference, download it to a file or stdout.

use clap::Parser;
use log::{error, LevelFilter};
use relget::{Api, AssetReference, Error, Result, BUILD_INFO};

/// Download a release asset from GitHub
#[derive(Parser)]
#[command(name = "relget")]
#[command(disable_version_flag = true)]
#[command(about = "Download a release asset from GitHub")]
#[command(long_about = "Download a release asset from GitHub

The ASSET argument takes one of three forms:
  OWNER/REPO/[TAG/]FILE                              TAG defaults to \"latest\"
  github.com/OWNER/REPO/releases/download/TAG/FILE
  github.com/OWNER/REPO/releases/latest/download/FILE

Examples:
  relget owner/repo/asset.tar.gz
  GITHUB_TOKEN=ghp_token relget owner/repo/asset.tar.gz
  relget owner/repo/v1.0.0/asset.tar.gz --output asset.tar.gz
  relget owner/repo/asset.tar.gz | tar -xvz -C /tmp")]
struct Cli {
    /// Asset to download
    asset: Option<String>,

    /// The output file to store the release asset. Default is stdout.
    #[arg(short, long)]
    output: Option<String>,

    /// Silent or quiet mode. Do not show progress meter.
    #[arg(short, long)]
    silent: bool,

    /// Token used to download releases from a private repository.
    #[arg(long = "github.token", env = "GITHUB_TOKEN", hide_env_values = true, default_value = "")]
    github_token: String,

    /// Print the version
    #[arg(short = 'v', long)]
    version: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.version {
        println!("{BUILD_INFO}");
        return Ok(());
    }

    let reference: AssetReference = cli.asset.as_deref().unwrap_or_default().parse()?;

    let client = Api::new()
        .set_token(&cli.github_token)
        .set_silent(cli.silent)
        .build()?;

    match cli.output.as_deref().filter(|o| !o.is_empty()) {
        Some(path) => {
            let mut file = tokio::fs::File::create(path).await.map_err(|source| Error::Io {
                context: format!("failed to create file {path}"),
                source,
            })?;
            client.download(&reference, Some(&mut file)).await
        }
        None => {
            let mut stdout = tokio::io::stdout();
            client.download(&reference, Some(&mut stdout)).await
        }
    }
}
