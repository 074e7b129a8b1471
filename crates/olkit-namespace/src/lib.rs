// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Namespace construction for OpenLineage jobs and datasets.
//!
//! A namespace is a dotted identifier that disambiguates same-named jobs
//! across projects, environments and hosts:
//!
//! ```text
//! [prefix.]project.environment[.short_hostname]
//! ```
//!
//! The project segment is sanitized (every character outside `[A-Za-z0-9]`
//! becomes `_`, then lowercased). The environment and prefix are used as given.
//!
//! # Example
//!
//! ```
//! use olkit_namespace::build_namespace;
//!
//! let ns = build_namespace("My-Project!", "dev", None, false).unwrap();
//! assert_eq!(ns, "my_project_.dev");
//!
//! let ns = build_namespace("analytics", "staging", Some("company"), false).unwrap();
//! assert_eq!(ns, "company.analytics.staging");
//! ```

use thiserror::Error;
use tracing::debug;

/// Separator placed between namespace components.
pub const SEPARATOR: char = '.';

/// Errors raised while building a namespace
#[derive(Error, Debug)]
pub enum NamespaceError {
    /// Hostname lookup failed
    #[error("Failed to resolve local hostname: {0}")]
    Hostname(#[from] std::io::Error),

    /// Hostname bytes are not UTF-8
    #[error("Local hostname is not valid UTF-8: {0}")]
    NonUtf8Hostname(String),

    /// Hostname resolved to an empty string
    #[error("Local hostname is empty")]
    EmptyHostname,
}

/// Result alias for namespace operations
pub type NamespaceResult<T> = Result<T, NamespaceError>;

/// Replace every non-alphanumeric ASCII character with `_` and lowercase the result.
pub fn sanitize_project_name(project_name: &str) -> String {
    project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

/// Local hostname with any domain suffix after the first `.` stripped.
pub fn short_hostname() -> NamespaceResult<String> {
    let raw = hostname::get()?;
    let full = raw
        .into_string()
        .map_err(|os| NamespaceError::NonUtf8Hostname(os.to_string_lossy().into_owned()))?;

    let short = shorten_hostname(&full);
    if short.is_empty() {
        return Err(NamespaceError::EmptyHostname);
    }
    Ok(short.to_string())
}

fn shorten_hostname(full: &str) -> &str {
    full.split(SEPARATOR).next().unwrap_or_default()
}

/// Build a namespace, resolving the local hostname when `include_hostname` is set.
///
/// Hostname resolution failures are returned to the caller unchanged.
pub fn build_namespace(
    project_name: &str,
    environment: &str,
    prefix: Option<&str>,
    include_hostname: bool,
) -> NamespaceResult<String> {
    let hostname = if include_hostname {
        Some(short_hostname()?)
    } else {
        None
    };
    Ok(build_with_hostname(
        project_name,
        environment,
        prefix,
        hostname.as_deref(),
    ))
}

/// Build a namespace from already-known components.
///
/// `hostname` is shortened the same way [`short_hostname`] does, so a fully
/// qualified name can be passed in directly.
pub fn build_with_hostname(
    project_name: &str,
    environment: &str,
    prefix: Option<&str>,
    hostname: Option<&str>,
) -> String {
    let mut components: Vec<String> = Vec::with_capacity(4);

    if let Some(prefix) = prefix.filter(|p| !p.is_empty()) {
        components.push(prefix.to_string());
    }
    components.push(sanitize_project_name(project_name));
    components.push(environment.to_string());
    if let Some(host) = hostname {
        components.push(shorten_hostname(host).to_string());
    }

    let namespace = components.join(".");
    debug!(namespace = %namespace, "Built lineage namespace");
    namespace
}

/// Fluent builder over [`build_namespace`].
///
/// Hostname inclusion defaults to `true`.
#[derive(Debug, Clone)]
pub struct NamespaceBuilder {
    project_name: String,
    environment: String,
    prefix: Option<String>,
    include_hostname: bool,
}

impl NamespaceBuilder {
    /// Start a namespace for the given project and environment
    pub fn new(project_name: impl Into<String>, environment: impl Into<String>) -> Self {
        NamespaceBuilder {
            project_name: project_name.into(),
            environment: environment.into(),
            prefix: None,
            include_hostname: true,
        }
    }

    /// Set an organizational prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set an optional prefix, leaving it unset for `None`
    pub fn maybe_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Include or omit the short hostname segment
    pub fn include_hostname(mut self, include: bool) -> Self {
        self.include_hostname = include;
        self
    }

    /// Resolve the namespace string
    pub fn build(&self) -> NamespaceResult<String> {
        build_namespace(
            &self.project_name,
            &self.environment,
            self.prefix.as_deref(),
            self.include_hostname,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_and_lowercases() {
        assert_eq!(sanitize_project_name("My-Project!"), "my_project_");
        assert_eq!(sanitize_project_name("data pipeline v2"), "data_pipeline_v2");
        assert_eq!(sanitize_project_name("ALLCAPS"), "allcaps");
    }

    #[test]
    fn test_sanitize_non_ascii() {
        // Each non-ASCII char becomes a single underscore
        assert_eq!(sanitize_project_name("café"), "caf_");
    }

    #[test]
    fn test_empty_prefix_is_skipped() {
        assert_eq!(
            build_with_hostname("analytics", "staging", Some(""), None),
            "analytics.staging"
        );
    }

    #[test]
    fn test_environment_is_not_sanitized() {
        assert_eq!(
            build_with_hostname("proj", "Pre-Prod", None, None),
            "proj.Pre-Prod"
        );
    }

    #[test]
    fn test_hostname_is_shortened() {
        assert_eq!(
            build_with_hostname("ol_poc", "prod", Some("company"), Some("worker-3.eu.example.com")),
            "company.ol_poc.prod.worker-3"
        );
    }

    #[test]
    fn test_builder_defaults_include_hostname() {
        let builder = NamespaceBuilder::new("proj", "dev");
        assert!(builder.include_hostname);
        assert!(builder.prefix.is_none());
    }

    #[test]
    fn test_builder_without_hostname() {
        let ns = NamespaceBuilder::new("data_pipeline", "prod")
            .prefix("company")
            .include_hostname(false)
            .build()
            .unwrap();
        assert_eq!(ns, "company.data_pipeline.prod");
    }
}
