//! OpenGL symbol naming rules
//!
//! Function symbols look like `glDrawArrays`, constants like `GL_TRIANGLES`.
//! Every function has a matching pointer typedef (`PFNGLDRAWARRAYSPROC`) and a
//! field in the generated procedure table (`DrawArrays`).

/// Prefix of every OpenGL entry point
pub const API_PREFIX: &str = "gl";

/// Prefix of every OpenGL constant
pub const CONSTANT_PREFIX: &str = "GL_";

/// Vendor suffixes marking a non-core entry point
pub const EXTENSION_SUFFIXES: [&str; 7] = ["ARB", "EXT", "KHR", "OVR", "NV", "AMD", "INTEL"];

/// Kind of an OpenGL symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Constant,
}

impl SymbolKind {
    /// Classify a name, returning `None` for anything that is not a GL symbol
    pub fn classify(name: &str) -> Option<Self> {
        if name.starts_with(CONSTANT_PREFIX) {
            return Some(SymbolKind::Constant);
        }

        let rest = name.strip_prefix(API_PREFIX)?;
        match rest.chars().next() {
            Some(c) if c.is_ascii_uppercase() => Some(SymbolKind::Function),
            _ => None,
        }
    }
}

/// Check whether a function name ends in one of the given vendor suffixes
pub fn is_extension<S: AsRef<str>>(name: &str, suffixes: &[S]) -> bool {
    suffixes.iter().any(|suffix| name.ends_with(suffix.as_ref()))
}

/// Name of the function pointer typedef for a function, e.g. `PFNGLCLEARPROC`
pub fn pointer_type_name(name: &str) -> String {
    format!("PFN{}PROC", name.to_uppercase())
}

/// Field name of a function in the procedure table: the name without `gl`
pub fn field_name(name: &str) -> &str {
    name.strip_prefix(API_PREFIX).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(SymbolKind::classify("glClear"), Some(SymbolKind::Function));
        assert_eq!(SymbolKind::classify("GL_TRIANGLES"), Some(SymbolKind::Constant));
        assert_eq!(SymbolKind::classify("glx"), None);
        assert_eq!(SymbolKind::classify("gl"), None);
        assert_eq!(SymbolKind::classify("PFNGLCLEARPROC"), None);
    }

    #[test]
    fn test_is_extension() {
        assert!(is_extension("glBarEXT", &EXTENSION_SUFFIXES));
        assert!(is_extension("glFenceSyncINTEL", &EXTENSION_SUFFIXES));
        assert!(is_extension("glPathCommandsNV", &EXTENSION_SUFFIXES));
        assert!(!is_extension("glDrawArrays", &EXTENSION_SUFFIXES));

        // Custom suffix lists come from configuration
        let custom = vec!["MESA".to_string()];
        assert!(is_extension("glWindowPos2dMESA", &custom));
        assert!(!is_extension("glBarEXT", &custom));
    }

    #[test]
    fn test_derived_names() {
        assert_eq!(pointer_type_name("glBarEXT"), "PFNGLBAREXTPROC");
        assert_eq!(pointer_type_name("glDrawArrays"), "PFNGLDRAWARRAYSPROC");
        assert_eq!(field_name("glDrawArrays"), "DrawArrays");
        assert_eq!(field_name("Other"), "Other");
    }
}
