//! Reference Whitelist
//!
//! Collects the GL functions and constants an application actually uses by
//! scanning its sources. Comments are stripped first so that symbols which
//! only appear in documentation do not end up in the loader.

use gl3w_core::symbol::pointer_type_name;
use gl3w_core::{Result, SymbolKind};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Immutable set of whitelisted symbol names.
///
/// An empty whitelist disables filtering altogether.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    symbols: BTreeSet<String>,
}

impl Whitelist {
    /// Whitelist that filters nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }
}

impl<S: Into<String>> FromIterator<S> for Whitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Builds a [`Whitelist`] from reference sources
pub struct WhitelistBuilder {
    symbol_re: Regex,
    comment_re: Regex,
    /// Extensions of files picked up when walking a directory
    extensions: Vec<String>,
    symbols: BTreeSet<String>,
}

impl WhitelistBuilder {
    /// Create a builder that walks directories for the given file extensions
    pub fn new<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        Ok(Self {
            symbol_re: Regex::new(r"\b(gl[A-Z][a-zA-Z0-9_]+|GL_[a-zA-Z0-9_]+)\b")?,
            comment_re: Regex::new(r"(?s)//[^\n]*|/\*.*?\*/")?,
            extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
            symbols: BTreeSet::new(),
        })
    }

    /// Add every symbol referenced outside comments in `source`
    pub fn add_source(&mut self, source: &str) -> usize {
        let before = self.symbols.len();
        let code = self.comment_re.replace_all(source, "");

        for cap in self.symbol_re.captures_iter(&code) {
            let name = &cap[1];
            if SymbolKind::classify(name) == Some(SymbolKind::Function) {
                self.symbols.insert(pointer_type_name(name));
            }
            self.symbols.insert(name.to_string());
        }

        self.symbols.len() - before
    }

    /// Scan a single reference file
    pub fn add_file(&mut self, path: &Path) -> Result<usize> {
        let source = std::fs::read_to_string(path)?;
        let added = self.add_source(&source);
        debug!("{} new symbols from {:?}", added, path);
        Ok(added)
    }

    /// Scan a reference file, or every matching file below a directory
    pub fn add_path(&mut self, path: &Path) -> Result<usize> {
        if !path.is_dir() {
            return self.add_file(path);
        }

        let files: Vec<PathBuf> = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.has_reference_extension(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        let mut added = 0;
        for file in &files {
            added += self.add_file(file)?;
        }

        info!("Scanned {:?}: {} new symbols", path, added);
        Ok(added)
    }

    fn has_reference_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    /// Freeze the collected symbols
    pub fn build(self) -> Whitelist {
        Whitelist {
            symbols: self.symbols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> WhitelistBuilder {
        WhitelistBuilder::new(&["c", "cpp", "h"]).unwrap()
    }

    #[test]
    fn test_no_sources_is_empty() {
        let whitelist = builder().build();
        assert!(whitelist.is_empty());
        assert_eq!(whitelist.len(), 0);
    }

    #[test]
    fn test_function_adds_pointer_type() {
        let mut builder = builder();
        builder.add_source("glBarEXT(0);\n");
        let whitelist = builder.build();

        assert!(whitelist.contains("glBarEXT"));
        assert!(whitelist.contains("PFNGLBAREXTPROC"));
        assert_eq!(whitelist.len(), 2);
    }

    #[test]
    fn test_constants() {
        let mut builder = builder();
        builder.add_source("glEnable(GL_BLEND); x = GL_ONE_MINUS_SRC_ALPHA;");
        let whitelist = builder.build();

        assert!(whitelist.contains("GL_BLEND"));
        assert!(whitelist.contains("GL_ONE_MINUS_SRC_ALPHA"));
        assert!(whitelist.contains("glEnable"));
        assert!(whitelist.contains("PFNGLENABLEPROC"));
    }

    #[test]
    fn test_comments_are_ignored() {
        let mut builder = builder();
        builder.add_source(
            "/* glBarEXT is\n   not used */\nint x; // glBazARB\nglFoo(); // trailing",
        );
        let whitelist = builder.build();

        assert!(!whitelist.contains("glBarEXT"));
        assert!(!whitelist.contains("glBazARB"));
        assert!(whitelist.contains("glFoo"));
    }

    #[test]
    fn test_identifier_boundaries() {
        let mut builder = builder();
        builder.add_source("myglFoo(); glx(); gl3wInit(); GL3W_OK;");
        let whitelist = builder.build();

        // `gl` must start the identifier and be followed by an uppercase letter
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_union_is_idempotent() {
        let mut builder = builder();
        assert_eq!(builder.add_source("glFoo();"), 2);
        assert_eq!(builder.add_source("glFoo(); glFoo();"), 0);
        assert_eq!(builder.build().len(), 2);
    }

    #[test]
    fn test_from_iter() {
        let whitelist: Whitelist = ["glB", "GL_X", "glB"].into_iter().collect();
        assert_eq!(whitelist.len(), 2);
        assert!(whitelist.contains("GL_X"));
    }

    #[test]
    fn test_constants_get_no_pointer_type() {
        let mut builder = builder();
        assert_eq!(builder.add_source("GL_BLEND"), 1);
        assert!(!builder.build().contains("PFNGL_BLENDPROC"));
    }

    #[test]
    fn test_line_comment_keeps_newline() {
        // Removing `//c` must not glue `x` onto the next line's identifier
        let mut builder = builder();
        builder.add_source("x//c\nglFoo();");
        let whitelist = builder.build();

        assert!(whitelist.contains("glFoo"));
        assert!(whitelist.contains("PFNGLFOOPROC"));
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let mut builder = builder();
        builder.add_source("glFoo(); // glBarEXT");
        let whitelist = builder.build();

        assert!(whitelist.contains("glFoo"));
        assert!(!whitelist.contains("glBarEXT"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut builder = builder();
        assert!(builder.add_path(Path::new("/nonexistent/reference.cpp")).is_err());
    }

    #[test]
    fn test_directory_walk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("backends")).unwrap();
        std::fs::write(dir.path().join("backends/renderer.cpp"), "glDrawElements();").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "glNotScanned();").unwrap();
        std::fs::write(dir.path().join("main.c"), "GL_TEXTURE_2D").unwrap();

        let mut builder = builder();
        let added = builder.add_path(dir.path()).unwrap();
        let whitelist = builder.build();

        assert_eq!(added, 3);
        assert!(whitelist.contains("glDrawElements"));
        assert!(whitelist.contains("GL_TEXTURE_2D"));
        assert!(!whitelist.contains("glNotScanned"));
    }
}
