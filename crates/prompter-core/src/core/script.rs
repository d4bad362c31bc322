//! Initial script content.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Instructional text shown in the editor on launch.
pub const PLACEHOLDER: &str = "\
Welcome to the Teleprompter!

This is your teleprompter. You can:

- Toggle between Edit and Display modes
- Adjust font size using the controls below
- Control scroll speed in Display mode
- Start and stop scrolling as needed

In Edit mode, you can type or paste your script.

In Display mode, the text is shown in bold white on black for better \
visibility during recording or presentation.

Use the controls at the bottom to customize your experience. The font size \
can be adjusted from 8 to 72 points, and scroll speed can be set from very \
slow (0.1x) to very fast (5.0x).

Happy presenting!";

/// Reads a script to preload into the editor.
///
/// Line endings are normalised to `\n`; the file is never written back.
///
/// # Errors
/// Returns an error if the file cannot be read or is not UTF-8.
pub fn load(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script from {}", path.display()))?;
    Ok(text.replace("\r\n", "\n"))
}

/// Script to start with: the file at `path` if given, otherwise [`PLACEHOLDER`].
///
/// # Errors
/// Returns an error if `path` is given and cannot be read.
pub fn initial(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => load(path),
        None => Ok(PLACEHOLDER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn placeholder_used_without_file() {
        assert_eq!(initial(None).unwrap(), PLACEHOLDER);
    }

    #[test]
    fn load_normalises_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script.txt");
        fs::write(&path, "one\r\ntwo\r\n").unwrap();

        assert_eq!(initial(Some(&path)).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read script"));
    }
}
