#![forbid(unsafe_code)]

//! Page-level input dispatcher and bootstrap.
//!
//! Hosts register a single set of document-wide move/release listeners and
//! forward them here. Every subscribed controller sees every move and release;
//! its own drag state decides whether it reacts, so widgets on one page never
//! interfere. Presses are routed to exactly one widget, the one whose hotspot
//! was hit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::SliderConfig;
use crate::controller::{SliderDispatch, SplitSliderController};
use crate::drag::{DragEffect, PointerSource, SliderInput};
use crate::host::{PageRoot, WidgetRoot};
use crate::ratio::SplitRatio;

/// Handle of one controller registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Input addressed to the dispatcher.
///
/// `widget` names the press target. It is ignored for moves and releases,
/// which are always broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<SubscriptionId>,
    pub input: SliderInput,
}

impl HostInput {
    #[must_use]
    pub const fn press(widget: SubscriptionId, source: PointerSource, client_x: f64) -> Self {
        Self {
            widget: Some(widget),
            input: SliderInput::Press { source, client_x },
        }
    }

    #[must_use]
    pub const fn pointer_move(source: PointerSource, client_x: f64) -> Self {
        Self {
            widget: None,
            input: SliderInput::Move { source, client_x },
        }
    }

    #[must_use]
    pub const fn release(source: PointerSource) -> Self {
        Self {
            widget: None,
            input: SliderInput::Release { source },
        }
    }
}

/// Aggregate result of one dispatched input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Host must suppress the event's default action.
    pub prevent_default: bool,
    /// Widgets whose lifecycle reacted (non-noop transition), in
    /// registration order.
    pub reacted: Vec<SubscriptionId>,
}

impl DispatchOutcome {
    fn record(&mut self, id: SubscriptionId, dispatch: &SliderDispatch) {
        self.prevent_default |= dispatch.prevent_default;
        if dispatch
            .transition
            .is_some_and(|t| !matches!(t.effect, DragEffect::Noop { .. }))
        {
            self.reacted.push(id);
        }
    }
}

/// Shared top-level dispatcher owning every active controller on a page.
pub struct InputDispatcher<R: WidgetRoot> {
    subscriptions: BTreeMap<SubscriptionId, SplitSliderController<R>>,
    next_id: u32,
}

impl<R: WidgetRoot> Default for InputDispatcher<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: WidgetRoot> InputDispatcher<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscriptions: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Register a controller.
    ///
    /// Inert controllers attach no behavior: they are dropped and `None` is
    /// returned.
    pub fn subscribe(&mut self, controller: SplitSliderController<R>) -> Option<SubscriptionId> {
        if !controller.is_active() {
            return None;
        }
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.subscriptions.insert(id, controller);
        Some(id)
    }

    /// Remove a registration. Later inputs never reach the returned
    /// controller.
    pub fn dispose(&mut self, id: SubscriptionId) -> Option<SplitSliderController<R>> {
        let removed = self.subscriptions.remove(&id);
        #[cfg(feature = "tracing")]
        {
            if removed.is_some() {
                tracing::debug!(widget = id.get(), "slider disposed");
            }
        }
        removed
    }

    /// Remove every registration.
    pub fn dispose_all(&mut self) {
        self.subscriptions.clear();
    }

    #[must_use]
    pub fn controller(&self, id: SubscriptionId) -> Option<&SplitSliderController<R>> {
        self.subscriptions.get(&id)
    }

    pub fn controller_mut(
        &mut self,
        id: SubscriptionId,
    ) -> Option<&mut SplitSliderController<R>> {
        self.subscriptions.get_mut(&id)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = SubscriptionId> + '_ {
        self.subscriptions.keys().copied()
    }

    /// Rendered split per registration, in registration order.
    pub fn ratios(&self) -> impl Iterator<Item = (SubscriptionId, Option<SplitRatio>)> + '_ {
        self.subscriptions
            .iter()
            .map(|(id, controller)| (*id, controller.ratio()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Press on the hotspot of `id`. Unknown ids are ignored.
    pub fn press(
        &mut self,
        id: SubscriptionId,
        source: PointerSource,
        client_x: f64,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        if let Some(controller) = self.subscriptions.get_mut(&id) {
            let dispatch = controller.press(source, client_x);
            outcome.record(id, &dispatch);
        }
        outcome
    }

    /// Document-wide move, offered to every registration.
    pub fn pointer_move(&mut self, source: PointerSource, client_x: f64) -> DispatchOutcome {
        self.broadcast(SliderInput::Move { source, client_x })
    }

    /// Document-wide release, offered to every registration.
    pub fn release(&mut self, source: PointerSource) -> DispatchOutcome {
        self.broadcast(SliderInput::Release { source })
    }

    /// Apply an addressed input. A press without a target is ignored.
    pub fn apply(&mut self, host_input: HostInput) -> DispatchOutcome {
        match host_input.input {
            SliderInput::Press { source, client_x } => match host_input.widget {
                Some(id) => self.press(id, source, client_x),
                None => DispatchOutcome::default(),
            },
            input => self.broadcast(input),
        }
    }

    fn broadcast(&mut self, input: SliderInput) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        for (id, controller) in &mut self.subscriptions {
            let dispatch = controller.apply(input);
            outcome.record(*id, &dispatch);
        }
        outcome
    }
}

/// Discover every widget root on `page` in document order and register one
/// controller per root.
///
/// Roots missing a required part are constructed inert and not registered.
pub fn bootstrap<P: PageRoot>(page: &P, config: &SliderConfig) -> InputDispatcher<P::Widget> {
    let mut dispatcher = InputDispatcher::new();
    let roots = page.widget_roots(&config.root_selector);
    #[cfg(feature = "tracing")]
    let discovered = roots.len();
    for root in roots {
        let controller = SplitSliderController::attach(root, config);
        dispatcher.subscribe(controller);
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        discovered,
        active = dispatcher.len(),
        selector = %config.root_selector,
        "slider bootstrap complete"
    );
    dispatcher
}
