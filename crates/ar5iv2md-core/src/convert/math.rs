//! MathML to TeX math notation.
//!
//! ar5iv keeps the LaTeX source of every formula in the `alttext` attribute
//! of `<math>` and usually again in a TeX `<annotation>`.

use super::dom::{attr, collapse_whitespace, find_all, tag_name, text_content};
use html2md::Handle;

const TEX_ENCODING: &str = "application/x-tex";

/// TeX source of a `<math>` element: `alttext`, else the TeX annotation,
/// else the plain text content.
pub(super) fn tex_source(math: &Handle) -> String {
    let raw = attr(math, "alttext")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| tex_annotation(math))
        .unwrap_or_else(|| text_content(math));
    collapse_whitespace(&raw)
}

fn tex_annotation(math: &Handle) -> Option<String> {
    find_all(math, &|n: &Handle| {
        tag_name(n).as_deref() == Some("annotation")
            && attr(n, "encoding").as_deref() == Some(TEX_ENCODING)
    })
    .first()
    .map(text_content)
    .filter(|s| !s.trim().is_empty())
}

pub(super) fn is_display(math: &Handle) -> bool {
    attr(math, "display").as_deref() == Some("block")
}

/// `$…$`, regardless of the display mode.
pub(super) fn inline(math: &Handle) -> String {
    format!("${}$", tex_source(math))
}

/// `$$…$$` without surrounding blank lines.
pub(super) fn display(tex: &str) -> String {
    format!("$${}$$", tex)
}
