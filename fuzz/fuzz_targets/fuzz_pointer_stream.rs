#![no_main]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use arbitrary::Arbitrary;
use hotsplit_core::{
    HostElement, HostRect, PointerSource, SliderConfig, SplitSliderController, WidgetRoot,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Press { touch: bool, x: f64 },
    Move { touch: bool, x: f64 },
    Release { touch: bool },
    Resize { left: f64, width: f64 },
    SetSplit(f64),
}

#[derive(Debug, Arbitrary)]
struct Session {
    start: Option<String>,
    ops: Vec<Op>,
}

#[derive(Clone, Default)]
struct Pane(Rc<Cell<Option<f64>>>);

impl HostElement for Pane {
    fn set_width_percent(&self, percent: f64) {
        self.0.set(Some(percent));
    }
}

struct Root {
    before: Pane,
    after: Pane,
    start: Option<String>,
    rect: RefCell<HostRect>,
}

impl WidgetRoot for Root {
    type Element = Pane;

    fn find_part(&self, selector: &str) -> Option<Pane> {
        match selector {
            ".BeforeMask" => Some(self.before.clone()),
            ".AfterMask" => Some(self.after.clone()),
            ".DragHotspot" => Some(Pane::default()),
            _ => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        (name == "data-start").then(|| self.start.clone()).flatten()
    }

    fn bounding_rect(&self) -> HostRect {
        *self.rect.borrow()
    }
}

fn source(touch: bool) -> PointerSource {
    if touch { PointerSource::Touch } else { PointerSource::Mouse }
}

fuzz_target!(|session: Session| {
    let before = Pane::default();
    let after = Pane::default();
    let root = Root {
        before: before.clone(),
        after: after.clone(),
        start: session.start,
        rect: RefCell::new(HostRect::new(0.0, 100.0)),
    };
    let mut controller = SplitSliderController::attach(root, &SliderConfig::default());

    for op in session.ops {
        match op {
            Op::Press { touch, x } => {
                controller.press(source(touch), x);
            }
            Op::Move { touch, x } => {
                controller.pointer_move(source(touch), x);
            }
            Op::Release { touch } => {
                controller.release(source(touch));
            }
            Op::Resize { left, width } => {
                *controller.root().rect.borrow_mut() = HostRect::new(left, width);
            }
            Op::SetSplit(value) => {
                controller.set_split(value);
            }
        }
        let b = before.0.get().expect("initial render wrote before");
        let a = after.0.get().expect("initial render wrote after");
        assert!((0.0..=100.0).contains(&b), "before out of range: {b}");
        assert!((0.0..=100.0).contains(&a), "after out of range: {a}");
        assert!((a + b - 100.0).abs() < 1e-9, "widths do not sum to 100");
    }
});
