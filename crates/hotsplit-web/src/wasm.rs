#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use hotsplit_core::input_parser::parse_encoded_input;
use hotsplit_core::{InputDispatcher, PointerSource, SliderConfig, SubscriptionId, bootstrap};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Event, EventTarget, MouseEvent, TouchEvent, Window,
};

use crate::dom::{DomPage, DomWidget};
use crate::{HOTSPOT_LISTENERS, ListenerBinding, ListenerPhase, WINDOW_LISTENERS};

type SharedDispatcher = Rc<RefCell<InputDispatcher<DomWidget>>>;

thread_local! {
    static AUTO_PAGE: RefCell<Option<HotsplitPage>> = const { RefCell::new(None) };
}

fn js_error(message: impl AsRef<str>) -> JsValue {
    js_sys::Error::new(message.as_ref()).into()
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_error("no global window"))
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window.document().ok_or_else(|| js_error("window has no document"))
}

/// Fractional `clientX` of a mouse event or touch.
///
/// The typed `web-sys` getters return `i32` and drop sub-pixel positions.
fn client_x(value: &JsValue) -> Option<f64> {
    js_sys::Reflect::get(value, &JsValue::from_str("clientX"))
        .ok()?
        .as_f64()
}

/// Horizontal client coordinate of a mouse event or of the first active
/// touch contact.
fn pointer_x(event: &Event, source: PointerSource) -> Option<f64> {
    match source {
        PointerSource::Mouse => client_x(event.dyn_ref::<MouseEvent>()?.as_ref()),
        PointerSource::Touch => {
            let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
            client_x(touch.as_ref())
        }
    }
}

/// DOM listener that unregisters itself when dropped.
struct ListenerHandle {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl ListenerHandle {
    fn attach(
        target: &EventTarget,
        binding: &ListenerBinding,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, JsValue> {
        let options = AddEventListenerOptions::new();
        options.set_passive(binding.passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            binding.event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event: binding.event,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            warn!(event = self.event, error = ?err, "failed to remove listener");
        }
    }
}

fn press_listener(
    target: &EventTarget,
    binding: &ListenerBinding,
    dispatcher: &SharedDispatcher,
    id: SubscriptionId,
) -> Result<ListenerHandle, JsValue> {
    let shared = Rc::clone(dispatcher);
    let source = binding.source;
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(client_x) = pointer_x(&event, source) else {
            return;
        };
        let outcome = shared.borrow_mut().press(id, source, client_x);
        if outcome.prevent_default {
            event.prevent_default();
        }
    });
    ListenerHandle::attach(target, binding, closure)
}

fn window_listener(
    target: &EventTarget,
    binding: &ListenerBinding,
    dispatcher: &SharedDispatcher,
) -> Result<ListenerHandle, JsValue> {
    let shared = Rc::clone(dispatcher);
    let source = binding.source;
    let phase = binding.phase;
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| match phase {
        ListenerPhase::Move => {
            if let Some(client_x) = pointer_x(&event, source) {
                shared.borrow_mut().pointer_move(source, client_x);
            }
        }
        ListenerPhase::Release => {
            shared.borrow_mut().release(source);
        }
        ListenerPhase::Press => {}
    });
    ListenerHandle::attach(target, binding, closure)
}

/// Live slider bindings for one document.
///
/// Dropping or disposing the page removes every listener it registered.
#[wasm_bindgen]
pub struct HotsplitPage {
    dispatcher: SharedDispatcher,
    window_listeners: Vec<ListenerHandle>,
    widget_listeners: BTreeMap<SubscriptionId, Vec<ListenerHandle>>,
}

#[wasm_bindgen]
impl HotsplitPage {
    /// Discover sliders using the default markup contract.
    pub fn mount() -> Result<HotsplitPage, JsValue> {
        Self::mount_config(&SliderConfig::default())
    }

    /// Discover sliders using a JSON config (camelCase keys, all optional).
    #[wasm_bindgen(js_name = mountWithConfig)]
    pub fn mount_with_config(config_json: &str) -> Result<HotsplitPage, JsValue> {
        let config = SliderConfig::from_json(config_json).map_err(|e| js_error(e.to_string()))?;
        Self::mount_config(&config)
    }

    /// Number of active sliders.
    #[wasm_bindgen(js_name = widgetCount)]
    pub fn widget_count(&self) -> u32 {
        self.dispatcher.borrow().len() as u32
    }

    /// Ids of active sliders in document order.
    #[wasm_bindgen(js_name = widgetIds)]
    pub fn widget_ids(&self) -> Vec<u32> {
        self.dispatcher
            .borrow()
            .ids()
            .map(SubscriptionId::get)
            .collect()
    }

    /// Rendered split of one slider.
    pub fn split(&self, widget: u32) -> Option<f64> {
        self.dispatcher
            .borrow()
            .controller(SubscriptionId::new(widget))
            .and_then(|controller| controller.ratio())
            .map(f64::from)
    }

    /// Whether a slider currently has an open drag session.
    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self, widget: u32) -> bool {
        self.dispatcher
            .borrow()
            .controller(SubscriptionId::new(widget))
            .is_some_and(|controller| controller.is_dragging())
    }

    /// Apply one JSON-encoded host input (host-driven mode).
    ///
    /// Returns whether the host should suppress the originating event's
    /// default action.
    pub fn feed(&self, input_json: &str) -> Result<bool, JsValue> {
        let input = parse_encoded_input(input_json).map_err(|e| js_error(e.to_string()))?;
        Ok(self.dispatcher.borrow_mut().apply(input).prevent_default)
    }

    /// Tear down one slider. Returns `false` for unknown ids.
    #[wasm_bindgen(js_name = disposeWidget)]
    pub fn dispose_widget(&mut self, widget: u32) -> bool {
        let id = SubscriptionId::new(widget);
        self.widget_listeners.remove(&id);
        self.dispatcher.borrow_mut().dispose(id).is_some()
    }

    /// Remove every listener and registration.
    pub fn dispose(&mut self) {
        self.widget_listeners.clear();
        self.window_listeners.clear();
        self.dispatcher.borrow_mut().dispose_all();
        debug!("slider page disposed");
    }
}

impl HotsplitPage {
    fn mount_config(config: &SliderConfig) -> Result<HotsplitPage, JsValue> {
        let window = window()?;
        let page = DomPage::new(document(&window)?);
        let dispatcher: SharedDispatcher = Rc::new(RefCell::new(bootstrap(&page, config)));

        let hotspots: Vec<(SubscriptionId, EventTarget)> = {
            let borrowed = dispatcher.borrow();
            borrowed
                .ids()
                .filter_map(|id| {
                    let parts = borrowed.controller(id)?.parts()?;
                    Some((id, parts.hotspot.element().clone().into()))
                })
                .collect()
        };

        let mut widget_listeners = BTreeMap::new();
        for (id, hotspot) in hotspots {
            let handles = HOTSPOT_LISTENERS
                .iter()
                .map(|binding| press_listener(&hotspot, binding, &dispatcher, id))
                .collect::<Result<Vec<_>, _>>()?;
            widget_listeners.insert(id, handles);
        }

        let window_target: &EventTarget = window.as_ref();
        let window_listeners = WINDOW_LISTENERS
            .iter()
            .map(|binding| window_listener(window_target, binding, &dispatcher))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(widgets = widget_listeners.len(), "slider page mounted");
        Ok(Self {
            dispatcher,
            window_listeners,
            widget_listeners,
        })
    }
}

fn mount_auto_page() -> Result<(), JsValue> {
    let page = HotsplitPage::mount()?;
    AUTO_PAGE.with(|slot| {
        if let Some(mut previous) = slot.borrow_mut().replace(page) {
            previous.dispose();
        }
    });
    Ok(())
}

/// Mount every slider with the default markup contract once the document is
/// parsed. Calling again remounts.
#[wasm_bindgen(js_name = autoMount)]
pub fn auto_mount() -> Result<(), JsValue> {
    let window = window()?;
    let document = document(&window)?;
    if document.ready_state() != "loading" {
        return mount_auto_page();
    }
    let callback = Closure::once_into_js(move || {
        if let Err(err) = mount_auto_page() {
            warn!(error = ?err, "slider auto mount failed");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
}

/// Dispose the page mounted by [`auto_mount`], if any.
#[wasm_bindgen(js_name = autoDispose)]
pub fn auto_dispose() {
    AUTO_PAGE.with(|slot| {
        if let Some(mut page) = slot.borrow_mut().take() {
            page.dispose();
        }
    });
}
