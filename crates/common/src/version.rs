use std::fmt;

/// Build metadata captured by a binary's `build.rs`
///
/// Construct it with [`build_info!`](crate::build_info), which reads the
/// `cargo:rustc-env` values in the calling crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_profile: &'static str,
    pub build_features: &'static str,
    pub build_timestamp: &'static str,
    pub rust_version: &'static str,
    pub build_target: Option<&'static str>,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version:   {}", self.version)?;
        writeln!(f, "profile:   {}", self.build_profile)?;
        writeln!(f, "features:  {}", self.build_features)?;
        writeln!(f, "built:     {}", self.build_timestamp)?;
        write!(f, "rustc:     {}", self.rust_version)?;
        if let Some(target) = self.build_target {
            write!(f, "\ntarget:    {}", target)?;
        }
        Ok(())
    }
}

/// Collect [`BuildInfo`] for the crate this macro is expanded in
///
/// The calling crate's `build.rs` must emit `REPO_VERSION`, `BUILD_PROFILE`,
/// `BUILD_FEATURES`, `BUILD_TIMESTAMP` and `RUST_VERSION`.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::BuildInfo {
            version: env!("REPO_VERSION"),
            build_profile: env!("BUILD_PROFILE"),
            build_features: env!("BUILD_FEATURES"),
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rust_version: env!("RUST_VERSION"),
            build_target: option_env!("BUILD_TARGET"),
        }
    };
}
