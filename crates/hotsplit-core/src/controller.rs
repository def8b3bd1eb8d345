#![forbid(unsafe_code)]

//! Per-widget slider controller.
//!
//! [`SplitSliderController`] binds one widget root: it resolves the before
//! pane, after pane and hotspot, renders the initial split, and turns pointer
//! signals into pane widths while its drag session is open.
//!
//! A root missing any required part produces an *inert* controller. Inert
//! controllers never write to the host and ignore every input; this is the
//! only failure mode and it is deliberately silent toward the page.

use crate::SliderConfig;
use crate::drag::{DragMachine, DragState, DragTransition, PointerSource, SliderInput};
use crate::host::{HostElement, WidgetRoot};
use crate::ratio::{PaneWidths, SplitRatio, parse_initial_split};

/// Resolved part handles of an active widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetParts<E> {
    pub before: E,
    pub after: E,
    pub hotspot: E,
}

impl<E> WidgetParts<E> {
    /// Resolve all required parts, or `None` if any is missing.
    pub fn resolve<R>(root: &R, config: &SliderConfig) -> Option<Self>
    where
        R: WidgetRoot<Element = E>,
    {
        Some(Self {
            before: root.find_part(&config.before_selector)?,
            after: root.find_part(&config.after_selector)?,
            hotspot: root.find_part(&config.hotspot_selector)?,
        })
    }
}

/// Result of delivering one input to a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderDispatch {
    /// Lifecycle transition; `None` when the controller is inert.
    pub transition: Option<DragTransition>,
    /// Host must suppress the event's default action (text selection,
    /// touch scrolling).
    pub prevent_default: bool,
    /// Widths written to the panes by this input, if any.
    pub widths: Option<PaneWidths>,
}

impl SliderDispatch {
    const INERT: Self = Self {
        transition: None,
        prevent_default: false,
        widths: None,
    };
}

/// Drag controller for one widget root.
pub struct SplitSliderController<R: WidgetRoot> {
    root: R,
    parts: Option<WidgetParts<R::Element>>,
    machine: DragMachine,
    ratio: Option<SplitRatio>,
}

impl<R: WidgetRoot> SplitSliderController<R> {
    /// Bind a widget root and render its initial split.
    ///
    /// Always succeeds. If a required part is missing the controller is
    /// inert and nothing is written.
    pub fn attach(root: R, config: &SliderConfig) -> Self {
        let parts = WidgetParts::resolve(&root, config);
        let mut controller = Self {
            root,
            parts,
            machine: DragMachine::new(),
            ratio: None,
        };
        if controller.parts.is_none() {
            #[cfg(feature = "tracing")]
            tracing::debug!("slider root missing required parts; left inert");
            return controller;
        }
        let attribute = controller.root.attribute(&config.initial_split_attribute);
        let initial = parse_initial_split(attribute.as_deref()).unwrap_or(config.default_split);
        #[cfg(feature = "tracing")]
        tracing::debug!(initial, "slider attached");
        controller.set_split(initial);
        controller
    }

    /// Whether all required parts were found.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.parts.is_some()
    }

    #[must_use]
    pub fn root(&self) -> &R {
        &self.root
    }

    #[must_use]
    pub fn parts(&self) -> Option<&WidgetParts<R::Element>> {
        self.parts.as_ref()
    }

    /// Last rendered split, `None` for inert controllers.
    #[must_use]
    pub fn ratio(&self) -> Option<SplitRatio> {
        self.ratio
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.machine.state()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.machine.state().is_dragging()
    }

    /// Clamp `ratio` into `[0, 1]` and write both pane widths.
    ///
    /// `NaN` keeps the previous split and writes nothing. Returns the widths
    /// written, or `None` when nothing was written.
    pub fn set_split(&mut self, ratio: f64) -> Option<PaneWidths> {
        let parts = self.parts.as_ref()?;
        let clamped = SplitRatio::clamped(ratio)?;
        let widths = clamped.widths();
        parts.before.set_width_percent(widths.before_percent);
        parts.after.set_width_percent(widths.after_percent);
        self.ratio = Some(clamped);
        Some(widths)
    }

    /// Map a client x-coordinate onto the root's current bounding box.
    ///
    /// `None` when the root has no usable width; the caller keeps the
    /// previous split.
    #[must_use]
    pub fn compute_ratio_from_pointer(&self, client_x: f64) -> Option<f64> {
        self.root.bounding_rect().ratio_at(client_x)
    }

    /// Deliver one input.
    pub fn apply(&mut self, input: SliderInput) -> SliderDispatch {
        if self.parts.is_none() {
            return SliderDispatch::INERT;
        }
        let transition = self.machine.apply(&input);
        let widths = transition
            .effect
            .tracked_x()
            .and_then(|client_x| self.compute_ratio_from_pointer(client_x))
            .and_then(|ratio| self.set_split(ratio));
        #[cfg(feature = "tracing")]
        tracing::trace!(
            transition_id = transition.transition_id,
            dragging = transition.to.is_dragging(),
            widths = ?widths,
            "slider input applied"
        );
        SliderDispatch {
            transition: Some(transition),
            prevent_default: matches!(input, SliderInput::Press { .. }),
            widths,
        }
    }

    /// Press on this widget's hotspot.
    pub fn press(&mut self, source: PointerSource, client_x: f64) -> SliderDispatch {
        self.apply(SliderInput::Press { source, client_x })
    }

    /// Document-wide pointer move.
    pub fn pointer_move(&mut self, source: PointerSource, client_x: f64) -> SliderDispatch {
        self.apply(SliderInput::Move { source, client_x })
    }

    /// Document-wide pointer release.
    pub fn release(&mut self, source: PointerSource) -> SliderDispatch {
        self.apply(SliderInput::Release { source })
    }
}
