use std::fmt;

/// Build metadata captured by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub repo_version: &'static str,
    pub profile: &'static str,
    pub target: &'static str,
    pub timestamp: &'static str,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        repo_version: env!("REPO_VERSION"),
        profile: env!("BUILD_PROFILE"),
        target: env!("BUILD_TARGET"),
        timestamp: env!("BUILD_TIMESTAMP"),
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lpl {} ({}) [{} {}] built {}",
            self.version, self.repo_version, self.profile, self.target, self.timestamp
        )
    }
}
