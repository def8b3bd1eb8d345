#![forbid(unsafe_code)]

//! Host seams.
//!
//! The core never touches a DOM directly. A host (the `hotsplit-web` binding,
//! or an in-memory fixture in tests) implements these traits over whatever
//! element handles it owns. Handles are shared references into a document the
//! host owns, so writes go through `&self`.

use crate::geometry::HostRect;

/// Element handle the controller writes pane widths to.
pub trait HostElement {
    /// Set the element's visible width as a percentage of the widget width.
    fn set_width_percent(&self, percent: f64);
}

/// One widget root in the host document.
pub trait WidgetRoot {
    type Element: HostElement;

    /// First descendant matching `selector`, if any.
    fn find_part(&self, selector: &str) -> Option<Self::Element>;

    /// Value of a declarative attribute on the root itself.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Current on-screen extent. Queried fresh on every pointer mapping.
    fn bounding_rect(&self) -> HostRect;
}

/// A document that can enumerate widget roots.
pub trait PageRoot {
    type Widget: WidgetRoot;

    /// All roots matching `selector`, in document order.
    fn widget_roots(&self, selector: &str) -> Vec<Self::Widget>;
}
