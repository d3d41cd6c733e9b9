//! Locating the paper body in the parsed page.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};
use std::borrow::Cow;

/// Markup of the first `<article>` element, or the whole page when there is none.
pub(super) fn main_content(html: &str) -> Cow<'_, str> {
    match article_html(html) {
        Some(article) => Cow::Owned(article),
        None => Cow::Borrowed(html),
    }
}

fn article_html(html: &str) -> Option<String> {
    let dom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .ok()?;
    let article = find_element(&dom.document, "article")?;

    let mut out = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..SerializeOpts::default()
    };
    serialize(&mut out, &SerializableHandle::from(article), opts).ok()?;
    String::from_utf8(out).ok()
}

/// First element named `local` in document order.
fn find_element(node: &Handle, local: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == local {
            return Some(node.clone());
        }
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, local))
}
