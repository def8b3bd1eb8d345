#![forbid(unsafe_code)]

//! `web-sys` implementations of the core host traits.

use hotsplit_core::{HostElement, HostRect, PageRoot, WidgetRoot};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// A part element inside a widget root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    element: Element,
}

impl DomElement {
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl HostElement for DomElement {
    fn set_width_percent(&self, percent: f64) {
        // Non-HTML parts (e.g. SVG) have no inline style to write.
        let Some(html) = self.element.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html
            .style()
            .set_property("width", &format!("{percent}%"))
        {
            warn!(error = ?err, "failed to write pane width");
        }
    }
}

/// A slider root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomWidget {
    root: Element,
}

impl DomWidget {
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.root
    }
}

impl WidgetRoot for DomWidget {
    type Element = DomElement;

    fn find_part(&self, selector: &str) -> Option<DomElement> {
        match self.root.query_selector(selector) {
            Ok(found) => found.map(|element| DomElement { element }),
            Err(err) => {
                debug!(selector, error = ?err, "invalid part selector");
                None
            }
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.root.get_attribute(name)
    }

    fn bounding_rect(&self) -> HostRect {
        let rect = self.root.get_bounding_client_rect();
        HostRect::new(rect.left(), rect.width())
    }
}

/// The live document.
#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PageRoot for DomPage {
    type Widget = DomWidget;

    fn widget_roots(&self, selector: &str) -> Vec<DomWidget> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!(selector, error = ?err, "invalid root selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|idx| list.get(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomWidget::new)
            .collect()
    }
}
