//! In-memory page fixture implementing the host traits.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hotsplit_core::{HostElement, HostRect, PageRoot, WidgetRoot};

/// Element handle recording every width written to it.
#[derive(Clone, Default)]
pub struct FakeElement {
    classes: Vec<String>,
    widths: Rc<RefCell<Vec<f64>>>,
}

impl FakeElement {
    fn with_class(class: &str) -> Self {
        Self {
            classes: vec![class.to_owned()],
            widths: Rc::default(),
        }
    }

    fn matches(&self, selector: &str) -> bool {
        selector
            .strip_prefix('.')
            .is_some_and(|class| self.classes.iter().any(|c| c == class))
    }

    pub fn writes(&self) -> Vec<f64> {
        self.widths.borrow().clone()
    }

    pub fn width(&self) -> Option<f64> {
        self.widths.borrow().last().copied()
    }
}

impl HostElement for FakeElement {
    fn set_width_percent(&self, percent: f64) {
        self.widths.borrow_mut().push(percent);
    }
}

/// Widget root with a class, attributes, children and a mutable rect.
#[derive(Clone)]
pub struct FakeWidget {
    class: String,
    start: Option<String>,
    children: Vec<FakeElement>,
    rect: Rc<Cell<HostRect>>,
}

impl FakeWidget {
    /// Root with all three required parts plus a decorative handle.
    pub fn complete(left: f64, width: f64) -> Self {
        Self::with_parts(left, width, &["BeforeMask", "AfterMask", "DragHotspot", "SliderHandle"])
    }

    pub fn with_parts(left: f64, width: f64, classes: &[&str]) -> Self {
        Self {
            class: "BeforeAfterWrapper".to_owned(),
            start: None,
            children: classes.iter().map(|c| FakeElement::with_class(c)).collect(),
            rect: Rc::new(Cell::new(HostRect::new(left, width))),
        }
    }

    pub fn start(mut self, value: &str) -> Self {
        self.start = Some(value.to_owned());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = class.to_owned();
        self
    }

    pub fn part(&self, class: &str) -> FakeElement {
        self.find_part(&format!(".{class}"))
            .unwrap_or_else(|| panic!("fixture has no .{class}"))
    }

    pub fn before_width(&self) -> Option<f64> {
        self.part("BeforeMask").width()
    }

    pub fn after_width(&self) -> Option<f64> {
        self.part("AfterMask").width()
    }

    /// Number of writes the before-pane has received.
    pub fn writes_len(&self) -> usize {
        self.part("BeforeMask").writes().len()
    }

    pub fn set_rect(&self, left: f64, width: f64) {
        self.rect.set(HostRect::new(left, width));
    }
}

impl WidgetRoot for FakeWidget {
    type Element = FakeElement;

    fn find_part(&self, selector: &str) -> Option<FakeElement> {
        self.children.iter().find(|c| c.matches(selector)).cloned()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "data-start" => self.start.clone(),
            _ => None,
        }
    }

    fn bounding_rect(&self) -> HostRect {
        self.rect.get()
    }
}

/// Page holding widget roots in document order.
#[derive(Default)]
pub struct FakePage {
    pub widgets: Vec<FakeWidget>,
}

impl PageRoot for FakePage {
    type Widget = FakeWidget;

    fn widget_roots(&self, selector: &str) -> Vec<FakeWidget> {
        let Some(class) = selector.strip_prefix('.') else {
            return Vec::new();
        };
        self.widgets
            .iter()
            .filter(|w| w.class == class)
            .cloned()
            .collect()
    }
}
