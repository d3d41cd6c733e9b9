//! Filename sanitization for asset files.
//!
//! Names end up both on disk and inside Markdown link targets
//! (`![..](assets/<name>)`), so only a conservative character set survives.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Longest asset filename handed out. Leaves room for the `.part` suffix
/// the file is staged under before its final rename.
pub const MAX_NAME_LEN: usize = NAME_MAX - crate::storage::TEMP_SUFFIX.len();

/// Longer suffixes are not treated as file extensions.
const MAX_EXT_LEN: usize = 16;

/// Sanitizes a candidate asset filename.
///
/// - Keeps ASCII letters, digits, `.`, `-` and `_`; everything else becomes `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots and underscores
/// - Limits length to [`MAX_NAME_LEN`] bytes, keeping the extension
pub fn sanitize_asset_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let keep = c.is_ascii_alphanumeric() || c == '.' || c == '-';
        if keep {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    truncate_keeping_extension(trimmed, MAX_NAME_LEN)
}

/// Cuts the stem so that `stem + ext` fits in `max` bytes. Input is ASCII.
fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }
    match split_extension(name) {
        (stem, Some(ext)) if ext.len() < max => {
            format!("{}{}", &stem[..max - ext.len()], ext)
        }
        _ => name[..max].to_string(),
    }
}

/// Splits `name` into stem and extension (with leading dot).
/// A leading dot alone does not start an extension, nor does a suffix
/// longer than [`MAX_EXT_LEN`].
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 && pos + 1 < name.len() && name.len() - pos <= MAX_EXT_LEN => {
            (&name[..pos], Some(&name[pos..]))
        }
        _ => (name, None),
    }
}
