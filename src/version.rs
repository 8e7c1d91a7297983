use std::fmt;

/// Build metadata shown by `--version`.
///
/// Commit and date come from `RELGET_GIT_COMMIT` / `RELGET_BUILD_DATE` at
/// compile time when the release pipeline sets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_date: &'static str,
    pub arch: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: env!("CARGO_PKG_VERSION"),
    git_commit: match option_env!("RELGET_GIT_COMMIT") {
        Some(commit) => commit,
        None => "none",
    },
    build_date: match option_env!("RELGET_BUILD_DATE") {
        Some(date) => date,
        None => "unknown",
    },
    arch: std::env::consts::ARCH,
};

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Version:    {}", self.version)?;
        writeln!(f, "Git Commit: {}", self.git_commit)?;
        writeln!(f, "Build Date: {}", self.build_date)?;
        write!(f, "Arch:       {}", self.arch)
    }
}
