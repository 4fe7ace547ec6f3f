//! Generated loader blocks
//!
//! Each generator returns the lines that follow its marker in the rendered
//! header. Input names must already be sorted; the union layout, the macros
//! and the name table all rely on sharing one order.

use gl3w_core::symbol::{field_name, pointer_type_name};

/// Column width for pointer types and macro names.
///
/// Wide enough for the pointer type of the longest function, which is the
/// function name plus the seven characters of `PFN` and `PROC`.
pub fn padding_width<S: AsRef<str>>(functions: &[S]) -> usize {
    functions
        .iter()
        .map(|f| f.as_ref().len())
        .max()
        .unwrap_or(0)
        + 7
}

/// The `GL3WProcs` union: a flat pointer array overlaid with named fields
pub fn proc_table<S: AsRef<str>>(functions: &[S]) -> Vec<String> {
    let width = padding_width(functions);
    let mut lines = vec![
        "union GL3WProcs {".to_string(),
        format!("    GL3WglProc ptr[{}];", functions.len()),
        "    struct {".to_string(),
    ];
    for name in functions {
        let name = name.as_ref();
        lines.push(format!(
            "        {:<width$} {};",
            pointer_type_name(name),
            field_name(name),
            width = width
        ));
    }
    lines.push("    } gl;".to_string());
    lines.push("};".to_string());
    lines
}

/// One `#define glName imgl3wProcs.gl.Name` redirection per function
pub fn proc_macros<S: AsRef<str>>(functions: &[S]) -> Vec<String> {
    let width = padding_width(functions);
    functions
        .iter()
        .map(|name| {
            let name = name.as_ref();
            format!(
                "#define {:<width$} imgl3wProcs.gl.{}",
                name,
                field_name(name),
                width = width
            )
        })
        .collect()
}

/// String literals for runtime lookup, indexed like `GL3WProcs::ptr`
pub fn proc_names<S: AsRef<str>>(functions: &[S]) -> Vec<String> {
    functions
        .iter()
        .map(|name| format!("    \"{}\",", name.as_ref()))
        .collect()
}
