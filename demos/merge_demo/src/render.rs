//! Rendering of the merged record.

use std::io::Write;

use crate::cli::Format;
use crate::error::Result;
use crate::person::Person;

/// Render `person` in `format`, newline-terminated.
///
/// # Errors
///
/// Returns a serialisation error from `serde_json` or `toml`.
pub fn render(person: &Person, format: Format) -> Result<String> {
    let mut rendered = match format {
        Format::Json => serde_json::to_string_pretty(person)?,
        Format::Toml => toml::to_string(person)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}

/// Write `rendered` to `out`.
///
/// # Errors
///
/// Returns an I/O error when writing fails.
pub fn emit(out: &mut impl Write, rendered: &str) -> Result<()> {
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}
