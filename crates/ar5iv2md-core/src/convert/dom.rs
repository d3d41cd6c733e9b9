//! Small read-only helpers over the html5ever DOM handed to tag handlers.

use html2md::{Handle, NodeData};

pub(super) fn tag_name(node: &Handle) -> Option<String> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

pub(super) fn attr(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub(super) fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|c| c.split_ascii_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

pub(super) fn has_any_class(node: &Handle, classes: &[&str]) -> bool {
    classes.iter().any(|c| has_class(node, c))
}

/// Concatenated text of all descendant text nodes.
pub(super) fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { ref contents } = node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// Descendant elements matching `pred`, in document order. Matches are not
/// searched further.
pub(super) fn find_all(node: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Vec<Handle> {
    let mut found = Vec::new();
    for child in node.children.borrow().iter() {
        collect_matching(child, pred, &mut found);
    }
    found
}

fn collect_matching(node: &Handle, pred: &dyn Fn(&Handle) -> bool, found: &mut Vec<Handle>) {
    if pred(node) {
        found.push(node.clone());
        return;
    }
    for child in node.children.borrow().iter() {
        collect_matching(child, pred, found);
    }
}

/// Whitespace runs (including newlines) collapsed to one space, trimmed.
pub(super) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
