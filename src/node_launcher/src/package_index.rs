//! Package index lookup
//!
//! `package://` URIs and executable paths are resolved through a
//! [`PackageIndex`] handed to the builder, so nothing in the core reads
//! `AMENT_PREFIX_PATH` behind the caller's back.

use crate::error::ResolutionError;
use dashmap::DashMap;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Marker directory of the ament resource index, relative to an install prefix
const AMENT_PACKAGES_MARKER: &str = "share/ament_index/resource_index/packages";

pub trait PackageIndex {
    /// Install prefix the package is installed under (e.g. `/opt/ros/humble`)
    fn package_prefix(&self, package: &str) -> Result<PathBuf, ResolutionError>;

    /// Share directory of the package, `<prefix>/share/<package>`
    fn locate_package_share(&self, package: &str) -> Result<PathBuf, ResolutionError> {
        Ok(self.package_prefix(package)?.join("share").join(package))
    }
}

/// In-memory package index mapping package names to install prefixes
#[derive(Debug, Clone, Default)]
pub struct StaticPackageIndex {
    packages: HashMap<String, PathBuf>,
}

impl StaticPackageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: impl Into<String>, prefix: impl Into<PathBuf>) -> Self {
        self.insert(package, prefix);
        self
    }

    pub fn insert(&mut self, package: impl Into<String>, prefix: impl Into<PathBuf>) {
        self.packages.insert(package.into(), prefix.into());
    }
}

impl PackageIndex for StaticPackageIndex {
    fn package_prefix(&self, package: &str) -> Result<PathBuf, ResolutionError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| ResolutionError::PackageNotFound {
                package: package.to_string(),
            })
    }
}

/// Package index backed by ament install prefixes on disk
#[derive(Debug, Default)]
pub struct AmentIndex {
    prefixes: Vec<PathBuf>,
    cache: DashMap<String, PathBuf>,
}

impl AmentIndex {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            cache: DashMap::new(),
        }
    }

    /// Build from a colon-separated prefix list such as `AMENT_PREFIX_PATH`
    pub fn from_prefix_path(prefix_path: &str) -> Self {
        Self::new(prefix_path.split(':').filter(|p| !p.is_empty()))
    }

    /// Snapshot `AMENT_PREFIX_PATH` once
    pub fn from_env() -> Self {
        match std::env::var("AMENT_PREFIX_PATH") {
            Ok(prefix_path) => Self::from_prefix_path(&prefix_path),
            Err(_) => {
                log::warn!("AMENT_PREFIX_PATH is not set; no packages can be resolved");
                Self::default()
            }
        }
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    fn has_package(prefix: &Path, package: &str) -> bool {
        prefix.join(AMENT_PACKAGES_MARKER).join(package).is_file()
            || prefix.join("share").join(package).is_dir()
    }
}

impl PackageIndex for AmentIndex {
    fn package_prefix(&self, package: &str) -> Result<PathBuf, ResolutionError> {
        if let Some(prefix) = self.cache.get(package) {
            log::trace!("Package cache hit: {}", package);
            return Ok(prefix.clone());
        }

        let prefix = self
            .prefixes
            .iter()
            .find(|prefix| Self::has_package(prefix, package))
            .cloned()
            .ok_or_else(|| ResolutionError::PackageNotFound {
                package: package.to_string(),
            })?;

        log::debug!("Found package {} under {}", package, prefix.display());
        self.cache.insert(package.to_string(), prefix.clone());
        Ok(prefix)
    }
}
