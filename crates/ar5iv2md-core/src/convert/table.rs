//! `<table>` rendering: LaTeXML equation layouts and plain data tables.

use super::assets::AssetCollector;
use super::dom::{attr, collapse_whitespace, find_all, has_any_class, has_class, tag_name, text_content};
use super::handlers::image_markdown;
use super::math;
use html2md::{Handle, NodeData};

/// Classes LaTeXML puts on tables that only lay out numbered equations.
const EQUATION_CLASSES: &[&str] = &["ltx_equation", "ltx_equationgroup", "ltx_eqn_table"];

/// Markdown for a whole table, without surrounding blank lines.
pub(super) fn render(table: &Handle, assets: &mut AssetCollector) -> String {
    if has_any_class(table, EQUATION_CLASSES) {
        render_equations(table)
    } else {
        render_grid(table, assets)
    }
}

fn is_tag(node: &Handle, name: &str) -> bool {
    tag_name(node).as_deref() == Some(name)
}

fn rows_of(table: &Handle) -> Vec<Handle> {
    find_all(table, &|n: &Handle| is_tag(n, "tr") || is_tag(n, "table"))
        .into_iter()
        .filter(|n| is_tag(n, "tr"))
        .collect()
}

/// One `$$…$$` block per equation row, followed by its number when present.
fn render_equations(table: &Handle) -> String {
    let mut blocks = Vec::new();
    for row in rows_of(table) {
        let tex: Vec<String> = find_all(&row, &|n: &Handle| is_tag(n, "math"))
            .iter()
            .map(math::tex_source)
            .collect();
        if tex.is_empty() {
            continue;
        }
        let mut block = math::display(&tex.join(" "));
        let number = find_all(&row, &|n: &Handle| has_class(n, "ltx_tag_equation"))
            .first()
            .map(|n| collapse_whitespace(&text_content(n)))
            .filter(|s| !s.is_empty());
        if let Some(number) = number {
            block.push(' ');
            block.push_str(&number);
        }
        blocks.push(block);
    }
    blocks.join("\n\n")
}

/// GitHub pipe table; the first row is the header.
fn render_grid(table: &Handle, assets: &mut AssetCollector) -> String {
    let rows: Vec<Vec<String>> = rows_of(table)
        .iter()
        .map(|row| {
            row.children
                .borrow()
                .iter()
                .filter(|c| is_tag(c, "td") || is_tag(c, "th"))
                .map(|cell| cell_text(cell, assets))
                .collect::<Vec<String>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let line = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(columns, "");
        format!("| {} |", padded.join(" | "))
    };

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(line(rows[0].as_slice()));
    out.push(format!("|{}", " --- |".repeat(columns)));
    for row in &rows[1..] {
        out.push(line(row.as_slice()));
    }
    out.join("\n")
}

fn cell_text(cell: &Handle, assets: &mut AssetCollector) -> String {
    let mut out = String::new();
    inline_text(cell, assets, &mut out);
    collapse_whitespace(&out).replace('|', "\\|")
}

/// Flattens a cell to one line: text, inline math and images.
fn inline_text(node: &Handle, assets: &mut AssetCollector, out: &mut String) {
    match node.data {
        NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
        NodeData::Element { .. } => match tag_name(node).as_deref() {
            Some("math") => out.push_str(&math::inline(node)),
            Some("img") => {
                let src = attr(node, "src").unwrap_or_default();
                if let Some(target) = assets.target_for(&src) {
                    out.push_str(&image_markdown(node, &target));
                }
            }
            Some("br") => out.push(' '),
            Some("script") | Some("style") => {}
            _ => {
                for child in node.children.borrow().iter() {
                    inline_text(child, assets, out);
                }
            }
        },
        _ => {}
    }
}
