//! Configuration types

use crate::error::{Error, Result};
use crate::symbol::EXTENSION_SUFFIXES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the generated header, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "include/GL/imgui_impl_opengl3_loader.h";

/// gl3w-rs configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory for the downloaded include tree
    pub root: PathBuf,

    /// Generated header path
    pub output: PathBuf,

    /// Keep extension-suffixed functions when no whitelist is active
    pub include_extensions: bool,

    /// Reference files or directories used to build the whitelist
    pub references: Vec<PathBuf>,

    /// Vendor suffixes that mark an extension entry point
    pub extension_suffixes: Vec<String>,

    /// Header sources
    pub sources: SourcesConfig,

    /// Whitelist configuration
    pub whitelist: WhitelistConfig,

    /// Template emission configuration
    pub emit: EmitConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            include_extensions: false,
            references: vec![],
            extension_suffixes: EXTENSION_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            sources: SourcesConfig::default(),
            whitelist: WhitelistConfig::default(),
            emit: EmitConfig::default(),
        }
    }
}

impl Config {
    /// Load a configuration from a YAML file; absent keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Whether extension functions are kept while scanning.
    ///
    /// Supplying references turns extensions on: the whitelist trims the
    /// unused ones anyway.
    pub fn effective_extensions(&self) -> bool {
        self.include_extensions || !self.references.is_empty()
    }

    /// Downloaded core profile header
    pub fn glcorearb_path(&self) -> PathBuf {
        self.root.join("include/GL/glcorearb.h")
    }

    /// Downloaded platform typedef header
    pub fn khrplatform_path(&self) -> PathBuf {
        self.root.join("include/KHR/khrplatform.h")
    }

    /// Directories created under the root before downloading
    pub fn layout_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.root.join("include/GL"),
            self.root.join("include/KHR"),
            self.root.join("src"),
        ]
    }
}

/// Where the Khronos headers come from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub glcorearb_url: String,
    pub khrplatform_url: String,

    /// User-Agent header sent with each request
    pub user_agent: String,

    /// Never touch the network; cached headers must exist
    pub offline: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            glcorearb_url: "https://www.khronos.org/registry/OpenGL/api/GL/glcorearb.h".into(),
            khrplatform_url: "https://www.khronos.org/registry/EGL/api/KHR/khrplatform.h".into(),
            user_agent: "Mozilla/5.0".into(),
            offline: false,
        }
    }
}

/// Whitelist configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// File extensions scanned when a reference path is a directory
    pub reference_extensions: Vec<String>,
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self {
            reference_extensions: ["c", "cc", "cpp", "cxx", "h", "hpp", "inl", "m", "mm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Template emission configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Template file; the bundled loader template when unset
    pub template: Option<PathBuf>,

    /// Fail when the template lacks one of the substitution markers
    pub strict_markers: bool,
}
