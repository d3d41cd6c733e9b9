//! html2md tag handlers tuned for ar5iv (LaTeXML) pages.

use super::assets::AssetCollector;
use super::dom::{attr, collapse_whitespace, has_any_class, tag_name};
use super::{math, table};
use html2md::{Handle, StructuredPrinter, TagHandler, TagHandlerFactory};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Elements dropped with everything inside them.
const SKIPPED_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "nav", "header", "footer", "button", "form",
];

/// Block containers; dropped when they carry a page-chrome class.
const BLOCK_TAGS: &[&str] = &["div", "section", "article", "main", "figure", "figcaption"];

/// Classes ar5iv puts on navigation, banners and footers around the paper.
const CHROME_CLASSES: &[&str] = &[
    "ltx_page_navbar",
    "ltx_page_header",
    "ltx_page_footer",
    "ltx_page_logo",
    "ar5iv-footer",
    "ar5iv-toggle-color-scheme",
];

type Registry = HashMap<String, Box<dyn TagHandlerFactory>>;

struct Factory<F>(F);

impl<F> TagHandlerFactory for Factory<F>
where
    F: Fn() -> Box<dyn TagHandler>,
{
    fn instantiate(&self) -> Box<dyn TagHandler> {
        (self.0)()
    }
}

fn register<H, F>(registry: &mut Registry, tags: &[&str], make: F)
where
    H: TagHandler + 'static,
    F: Fn() -> H + Clone + 'static,
{
    for tag in tags {
        let make = make.clone();
        let factory = Factory(move || Box::new(make()) as Box<dyn TagHandler>);
        registry.insert(tag.to_string(), Box::new(factory));
    }
}

/// Builds the tag handler table for one conversion. Image and table
/// handlers share `assets`.
pub(super) fn registry(assets: &Rc<RefCell<AssetCollector>>) -> Registry {
    let mut registry = Registry::new();

    register(&mut registry, SKIPPED_TAGS, || SkipHandler);
    register(&mut registry, BLOCK_TAGS, BlockHandler::default);
    register(&mut registry, &["cite"], || InlineHandler);
    register(
        &mut registry,
        &["h1", "h2", "h3", "h4", "h5", "h6"],
        HeaderHandler::default,
    );
    register(&mut registry, &["math"], || MathHandler);

    let shared = Rc::clone(assets);
    register(&mut registry, &["img"], move || ImageHandler {
        assets: Rc::clone(&shared),
    });
    let shared = Rc::clone(assets);
    register(&mut registry, &["table"], move || TableHandler {
        assets: Rc::clone(&shared),
    });

    registry
}

/// Drops the element and its subtree.
struct SkipHandler;

impl TagHandler for SkipHandler {
    fn handle(&mut self, _tag: &Handle, _printer: &mut StructuredPrinter) {}

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}

/// Emits only the children. Replaces html2md's quote rendering of `<cite>`,
/// which ar5iv uses for inline citations.
struct InlineHandler;

impl TagHandler for InlineHandler {
    fn handle(&mut self, _tag: &Handle, _printer: &mut StructuredPrinter) {}

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}
}

/// Paragraph-separated container, or nothing at all for page chrome.
#[derive(Default)]
struct BlockHandler {
    chrome: bool,
}

impl TagHandler for BlockHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        self.chrome = has_any_class(tag, CHROME_CLASSES);
        if !self.chrome {
            printer.insert_newline();
            printer.insert_newline();
        }
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        if !self.chrome {
            printer.insert_newline();
            printer.insert_newline();
        }
    }

    fn skip_descendants(&self) -> bool {
        self.chrome
    }
}

/// ATX style headers for every level.
#[derive(Default)]
struct HeaderHandler {
    header_type: String,
}

impl TagHandler for HeaderHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        self.header_type = tag_name(tag).unwrap_or_default();

        printer.insert_newline();
        printer.insert_newline();
        match self.header_type.as_ref() {
            "h1" => printer.append_str("# "),
            "h2" => printer.append_str("## "),
            "h3" => printer.append_str("### "),
            "h4" => printer.append_str("#### "),
            "h5" => printer.append_str("##### "),
            "h6" => printer.append_str("###### "),
            _ => {}
        }
    }

    fn after_handle(&mut self, printer: &mut StructuredPrinter) {
        printer.insert_newline();
    }
}

/// `<math>` as `$…$`, or `$$…$$` on its own paragraph for display math.
struct MathHandler;

impl TagHandler for MathHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        if math::is_display(tag) {
            printer.insert_newline();
            printer.insert_newline();
            printer.append_str(&math::display(&math::tex_source(tag)));
            printer.insert_newline();
            printer.insert_newline();
        } else {
            printer.append_str(&math::inline(tag));
        }
    }

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}

/// `<img>` as a Markdown image pointing at the local asset when there is one.
struct ImageHandler {
    assets: Rc<RefCell<AssetCollector>>,
}

impl TagHandler for ImageHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        let src = attr(tag, "src").unwrap_or_default();
        let target = self.assets.borrow_mut().target_for(&src);
        if let Some(target) = target {
            printer.append_str(&image_markdown(tag, &target));
        }
    }

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}
}

pub(super) fn image_markdown(tag: &Handle, target: &str) -> String {
    let alt = collapse_whitespace(&attr(tag, "alt").unwrap_or_default())
        .replace('[', "\\[")
        .replace(']', "\\]");
    format!("![{}]({})", alt, target)
}

/// Tables are rendered in one go; html2md's own table support would not
/// apply these handlers to cell contents.
struct TableHandler {
    assets: Rc<RefCell<AssetCollector>>,
}

impl TagHandler for TableHandler {
    fn handle(&mut self, tag: &Handle, printer: &mut StructuredPrinter) {
        let rendered = table::render(tag, &mut self.assets.borrow_mut());
        if !rendered.is_empty() {
            printer.insert_newline();
            printer.insert_newline();
            printer.append_str(&rendered);
            printer.insert_newline();
            printer.insert_newline();
        }
    }

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}
