//! Loader Template
//!
//! The template is plain C text with a handful of marker strings. Rendering
//! replaces every occurrence of each marker in a fixed order; the embedded
//! header is inserted before the khrplatform include is removed so that the
//! include inside glcorearb.h disappears too.

use crate::generate::{proc_macros, proc_names, proc_table};
use gl3w_core::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};

const BUNDLED: &str = include_str!("../templates/imgui_impl_opengl3_loader.h");

/// Substitution points of the template, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Followed by the `GL3WProcs` union
    ProcTable,
    /// Followed by the function macros
    ProcMacros,
    /// Replaced by the filtered glcorearb.h
    CoreHeader,
    /// Removed; the template carries its own platform typedefs
    PlatformHeader,
    /// Followed by the function name literals
    ProcNames,
}

impl Marker {
    pub const ALL: [Marker; 5] = [
        Marker::ProcTable,
        Marker::ProcMacros,
        Marker::CoreHeader,
        Marker::PlatformHeader,
        Marker::ProcNames,
    ];

    /// Literal text searched for in the template
    pub fn text(&self) -> &'static str {
        match self {
            Marker::ProcTable => "/* gl3w internal state */",
            Marker::ProcMacros => "/* OpenGL functions */",
            Marker::CoreHeader => "#include <GL/glcorearb.h>",
            Marker::PlatformHeader => "#include <KHR/khrplatform.h>",
            Marker::ProcNames => "static const char *proc_names[] = {",
        }
    }
}

/// A loader header template
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    strict: bool,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            strict: false,
        }
    }

    /// The single-header loader template shipped with the generator
    pub fn bundled() -> Self {
        Self::new(BUNDLED)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        debug!("Loaded template {:?}", path);
        Ok(Self::new(text))
    }

    /// Fail on a missing marker instead of skipping it
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Markers absent from the template text
    pub fn missing_markers(&self) -> Vec<Marker> {
        Marker::ALL
            .into_iter()
            .filter(|m| !self.text.contains(m.text()))
            .collect()
    }

    /// Render the header for the sorted `functions` and the filtered `header`
    pub fn render<S: AsRef<str>>(&self, functions: &[S], header: &str) -> Result<String> {
        let mut out = self.text.clone();

        for marker in Marker::ALL {
            let replacement = match marker {
                Marker::ProcTable => with_marker(marker, proc_table(functions)),
                Marker::ProcMacros => with_marker(marker, proc_macros(functions)),
                Marker::CoreHeader => header.to_string(),
                Marker::PlatformHeader => String::new(),
                Marker::ProcNames => with_marker(marker, proc_names(functions)),
            };
            out = self.substitute(out, marker, &replacement)?;
        }

        Ok(out)
    }

    fn substitute(&self, text: String, marker: Marker, replacement: &str) -> Result<String> {
        if text.contains(marker.text()) {
            return Ok(text.replace(marker.text(), replacement));
        }
        if self.strict {
            return Err(Error::MissingMarker(marker.text().to_string()));
        }
        warn!("Template has no {:?} marker `{}`, skipping", marker, marker.text());
        Ok(text)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::bundled()
    }
}

fn with_marker(marker: Marker, lines: Vec<String>) -> String {
    let mut block = vec![marker.text().to_string()];
    block.extend(lines);
    block.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = "#include <KHR/khrplatform.h>\n\
                           #include <GL/glcorearb.h>\n\
                           /* gl3w internal state */\n\
                           /* OpenGL functions */\n\
                           static const char *proc_names[] = {\n\
                           };\n";

    #[test]
    fn test_bundled_has_every_marker() {
        assert!(Template::bundled().missing_markers().is_empty());
    }

    #[test]
    fn test_render_minimal() {
        let out = Template::new(MINIMAL)
            .render(&["glFoo"], "GLAPI void APIENTRY glFoo (void);")
            .unwrap();

        assert_eq!(
            out,
            "\n\
             GLAPI void APIENTRY glFoo (void);\n\
             /* gl3w internal state */\n\
             union GL3WProcs {\n    \
             GL3WglProc ptr[1];\n    \
             struct {\n        \
             PFNGLFOOPROC Foo;\n    \
             } gl;\n\
             };\n\
             /* OpenGL functions */\n\
             #define glFoo        imgl3wProcs.gl.Foo\n\
             static const char *proc_names[] = {\n    \
             \"glFoo\",\n\
             };\n"
        );
    }

    #[test]
    fn test_embedded_platform_include_removed() {
        let out = Template::new(MINIMAL)
            .render::<&str>(&[], "#include <KHR/khrplatform.h>\ntypedef int GLint;")
            .unwrap();
        assert!(!out.contains("khrplatform"));
        assert!(out.contains("typedef int GLint;"));
    }

    #[test]
    fn test_missing_marker_is_skipped() {
        let template = Template::new("/* OpenGL functions */\n");
        assert_eq!(template.missing_markers().len(), 4);

        let out = template.render(&["glFoo"], "").unwrap();
        assert_eq!(
            out,
            "/* OpenGL functions */\n#define glFoo        imgl3wProcs.gl.Foo\n"
        );
    }

    #[test]
    fn test_missing_marker_strict() {
        let err = Template::new("/* OpenGL functions */\n")
            .strict(true)
            .render(&["glFoo"], "")
            .unwrap_err();
        assert!(matches!(err, Error::MissingMarker(m) if m == "/* gl3w internal state */"));
    }
}
