//! glcorearb.h Scanner
//!
//! Walks the core profile header line by line, keeping the declarations that
//! pass the whitelist and extension rules, and rebuilds the header with
//! emptied conditional blocks removed.

use crate::ifdef::IfdefTree;
use crate::whitelist::Whitelist;
use gl3w_core::symbol::{is_extension, EXTENSION_SUFFIXES};
use gl3w_core::Result;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Options controlling which functions survive when no whitelist is active
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Keep extension-suffixed functions
    pub include_extensions: bool,
    /// Suffixes that mark an extension function
    pub extension_suffixes: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_extensions: false,
            extension_suffixes: EXTENSION_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Counters describing what a scan kept and dropped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub lines: usize,
    pub functions_kept: usize,
    pub functions_dropped: usize,
    pub constants_kept: usize,
    pub constants_dropped: usize,
    pub pointer_types_dropped: usize,
    pub blocks_culled: usize,
}

/// Output of a header scan
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Kept functions, sorted by name
    pub functions: Vec<String>,
    /// Kept constants in header order
    pub constants: Vec<String>,
    /// Filtered header with empty conditional blocks removed
    pub text: String,
    pub stats: ScanStats,
}

/// Line filter over a Khronos GL header
pub struct HeaderScanner {
    function_re: Regex,
    constant_re: Regex,
    pointer_re: Regex,
    options: ScanOptions,
}

impl HeaderScanner {
    pub fn new(options: ScanOptions) -> Result<Self> {
        Ok(Self {
            function_re: Regex::new(r"^GLAPI.*APIENTRY\s+(\w+)")?,
            constant_re: Regex::new(r"^#define\s+(GL_[a-zA-Z0-9_]+)\s+(0x)?[0-9A-F]+")?,
            pointer_re: Regex::new(r"\bAPIENTRYP (PFNGL[A-Z0-9]+PROC)\b")?,
            options,
        })
    }

    /// Whether a function declaration is kept.
    ///
    /// Without a whitelist the extension rule decides; with one, membership
    /// alone decides, extension suffix or not.
    pub fn keep_function(&self, name: &str, whitelist: &Whitelist) -> bool {
        let extension_ok = self.options.include_extensions
            || !is_extension(name, &self.options.extension_suffixes);
        (whitelist.is_empty() && extension_ok) || whitelist.contains(name)
    }

    /// Constants and pointer typedefs are only filtered by a whitelist
    fn keep_symbol(name: &str, whitelist: &Whitelist) -> bool {
        whitelist.is_empty() || whitelist.contains(name)
    }

    /// Scan a header on disk
    pub fn scan_file(&self, path: &Path, whitelist: &Whitelist) -> Result<ScanResult> {
        info!("Parsing {}...", path.display());
        let header = std::fs::read_to_string(path)?;
        self.scan(&header, whitelist)
    }

    /// Filter `header` against `whitelist`
    pub fn scan(&self, header: &str, whitelist: &Whitelist) -> Result<ScanResult> {
        let mut result = ScanResult::default();
        let mut tree = IfdefTree::new();

        for (idx, raw) in header.lines().enumerate() {
            let line_no = idx + 1;
            result.stats.lines += 1;

            if let Some(cap) = self.function_re.captures(raw) {
                let name = &cap[1];
                if !self.keep_function(name, whitelist) {
                    result.stats.functions_dropped += 1;
                    continue;
                }
                result.functions.push(name.to_string());
            }

            if let Some(cap) = self.constant_re.captures(raw) {
                let name = &cap[1];
                if !Self::keep_symbol(name, whitelist) {
                    result.stats.constants_dropped += 1;
                    continue;
                }
                result.constants.push(name.to_string());
            }

            if let Some(cap) = self.pointer_re.captures(raw) {
                if !Self::keep_symbol(&cap[1], whitelist) {
                    result.stats.pointer_types_dropped += 1;
                    continue;
                }
            }

            let line = raw.trim_end_matches(['\r', '\n']);
            if line.starts_with("#if") {
                tree.open(line, line_no);
            } else if line.starts_with("#endif") {
                tree.close(line, line_no)?;
            } else if !line.is_empty() {
                tree.push_line(line);
            }
        }
        tree.finish()?;

        result.stats.blocks_culled = tree.cull_empty();
        result.text = tree.to_text();

        result.functions.sort();
        result.stats.functions_kept = result.functions.len();
        result.stats.constants_kept = result.constants.len();

        debug!(
            "Kept {} functions and {} constants, culled {} blocks",
            result.stats.functions_kept, result.stats.constants_kept, result.stats.blocks_culled
        );
        Ok(result)
    }
}
