// crates/country-card-core/src/requirements.rs

//! # Startup Guard
//!
//! Checks the environment before the block is registered. Every check runs,
//! failures are collected into a [`CheckReport`], and nothing here panics or
//! returns an error: a failed check only means the block stays inactive and
//! administrators see why.

use crate::i18n::{English, Translator};
use log::warn;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Shell command that produces the build artifacts.
pub const DEFAULT_INSTALL_COMMAND: &str = "composer install && npm install && npm run build";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureCode {
    #[serde(rename = "failed_check_runtime_version")]
    RuntimeVersion,
    #[serde(rename = "failed_check_host_version")]
    HostVersion,
    #[serde(rename = "failed_check_required_files")]
    RequiredFiles,
}

impl FailureCode {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureCode::RuntimeVersion => "failed_check_runtime_version",
            FailureCode::HostVersion => "failed_check_host_version",
            FailureCode::RequiredFiles => "failed_check_required_files",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub code: FailureCode,
    /// May contain `<code>` markup.
    pub message: String,
}

/// Failures recorded by [`Requirements::run_checks`], in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    failures: Vec<Failure>,
}

impl CheckReport {
    pub fn add(&mut self, code: FailureCode, message: impl Into<String>) {
        let message = message.into();
        warn!("startup check {code} failed: {message}");
        self.failures.push(Failure { code, message });
    }

    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn codes(&self) -> Vec<FailureCode> {
        self.failures.iter().map(|f| f.code).collect()
    }

    pub fn has(&self, code: FailureCode) -> bool {
        self.failures.iter().any(|f| f.code == code)
    }
}

/// What the guard needs to know about the running system.
pub trait Environment {
    fn runtime_version(&self) -> String;
    fn host_version(&self) -> String;

    fn is_readable(&self, path: &Path) -> bool {
        std::fs::File::open(path).is_ok()
    }
}

/// Environment with fixed version strings and the real filesystem.
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    pub runtime_version: String,
    pub host_version: String,
}

impl StaticEnvironment {
    pub fn new(runtime_version: impl Into<String>, host_version: impl Into<String>) -> Self {
        Self {
            runtime_version: runtime_version.into(),
            host_version: host_version.into(),
        }
    }
}

impl Environment for StaticEnvironment {
    fn runtime_version(&self) -> String {
        self.runtime_version.clone()
    }

    fn host_version(&self) -> String {
        self.host_version.clone()
    }
}

/// Minimum versions and build artifacts the block needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    runtime_version: String,
    host_version: String,
    required_files: Vec<PathBuf>,
    install_command: String,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            runtime_version: "0".to_string(),
            host_version: "0".to_string(),
            required_files: Vec::new(),
            install_command: DEFAULT_INSTALL_COMMAND.to_string(),
        }
    }
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime_version(mut self, version: impl Into<String>) -> Self {
        self.runtime_version = version.into();
        self
    }

    pub fn with_host_version(mut self, version: impl Into<String>) -> Self {
        self.host_version = version.into();
        self
    }

    pub fn with_required_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.required_files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_install_command(mut self, command: impl Into<String>) -> Self {
        self.install_command = command.into();
        self
    }

    pub fn runtime_version(&self) -> &str {
        &self.runtime_version
    }

    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    pub fn required_files(&self) -> &[PathBuf] {
        &self.required_files
    }

    pub fn check_runtime_version(
        &self,
        env: &dyn Environment,
        report: &mut CheckReport,
        tr: &dyn Translator,
    ) -> bool {
        if compare_versions(&env.runtime_version(), &self.runtime_version) == Ordering::Less {
            report.add(
                FailureCode::RuntimeVersion,
                tr.requires_runtime(&self.runtime_version),
            );
            return false;
        }
        true
    }

    pub fn check_host_version(
        &self,
        env: &dyn Environment,
        report: &mut CheckReport,
        tr: &dyn Translator,
    ) -> bool {
        if compare_versions(&env.host_version(), &self.host_version) == Ordering::Less {
            report.add(
                FailureCode::HostVersion,
                tr.requires_host(&self.host_version),
            );
            return false;
        }
        true
    }

    /// Stops at the first unreadable file; one failure covers them all since
    /// the fix (rebuilding) is the same.
    pub fn check_required_files(
        &self,
        env: &dyn Environment,
        report: &mut CheckReport,
        tr: &dyn Translator,
    ) -> bool {
        if let Some(missing) = self.required_files.iter().find(|f| !env.is_readable(f)) {
            warn!("required build artifact not readable: {}", missing.display());
            report.add(
                FailureCode::RequiredFiles,
                tr.incomplete_install(&self.install_command),
            );
            return false;
        }
        true
    }

    /// Run every check; none short-circuits another.
    pub fn run_checks(&self, env: &dyn Environment) -> CheckReport {
        self.run_checks_with(env, &English)
    }

    pub fn run_checks_with(&self, env: &dyn Environment, tr: &dyn Translator) -> CheckReport {
        let mut report = CheckReport::default();
        self.check_runtime_version(env, &mut report, tr);
        self.check_host_version(env, &mut report, tr);
        self.check_required_files(env, &mut report, tr);
        report
    }
}

/// Compare dotted version strings numerically.
///
/// Each dot-separated segment contributes its leading digits (`"2-beta"` → 2,
/// `"rc"` → 0); the first segment that is not dot-separated ends the version,
/// so `"6.4.2-alpha"` reads as `6.4.2`. Missing segments count as 0.
///
/// ```rust
/// use country_card_core::requirements::compare_versions;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_versions("5.10", "5.8"), Ordering::Greater);
/// assert_eq!(compare_versions("5.8", "5.8.0"), Ordering::Equal);
/// assert_eq!(compare_versions("8.1.2-1ubuntu", "8.1.2"), Ordering::Equal);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = (version_parts(a), version_parts(b));
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            x.cmp(&y)
        })
        .find(|o| *o != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn version_parts(v: &str) -> Vec<u64> {
    let mut parts = Vec::new();
    for segment in v.trim().trim_start_matches(['v', 'V']).split('.') {
        let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
        parts.push(digits.parse().unwrap_or(0));
        if digits.len() != segment.len() {
            break;
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeEnv {
        runtime: &'static str,
        host: &'static str,
        readable: Vec<PathBuf>,
    }

    impl Environment for FakeEnv {
        fn runtime_version(&self) -> String {
            self.runtime.to_string()
        }
        fn host_version(&self) -> String {
            self.host.to_string()
        }
        fn is_readable(&self, path: &Path) -> bool {
            self.readable.iter().any(|p| p == path)
        }
    }

    fn requirements() -> Requirements {
        Requirements::new()
            .with_runtime_version("5.6")
            .with_host_version("5.8")
            .with_required_files(["build/block.json"])
    }

    #[test]
    fn all_checks_pass() {
        let env = FakeEnv {
            runtime: "8.1.2",
            host: "6.4",
            readable: vec![PathBuf::from("build/block.json")],
        };
        assert!(requirements().run_checks(&env).is_ok());
    }

    #[test]
    fn checks_do_not_short_circuit() {
        let env = FakeEnv {
            runtime: "5.4",
            host: "5.7.9",
            readable: vec![],
        };
        let report = requirements().run_checks(&env);
        assert_eq!(
            report.codes(),
            vec![
                FailureCode::RuntimeVersion,
                FailureCode::HostVersion,
                FailureCode::RequiredFiles
            ]
        );
        assert_eq!(report.failures()[0].message, "Country Card requires runtime 5.6 or higher.");
    }

    #[test]
    fn missing_files_record_one_failure() {
        let env = FakeEnv {
            runtime: "8.0",
            host: "6.0",
            readable: vec![],
        };
        let report = requirements()
            .with_required_files(["build/block.json", "build/index.js"])
            .run_checks(&env);
        assert_eq!(report.codes(), vec![FailureCode::RequiredFiles]);
        assert!(report.failures()[0].message.contains("<code>composer install"));
    }

    #[test]
    fn version_ordering() {
        assert_eq!(compare_versions("5.7.9", "5.8"), Ordering::Less);
        assert_eq!(compare_versions("6.0", "5.8"), Ordering::Greater);
        assert_eq!(compare_versions("v1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("", "0"), Ordering::Equal);
        assert_eq!(compare_versions("5.8-RC1", "5.8"), Ordering::Equal);
    }
}
