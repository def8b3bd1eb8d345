#![forbid(unsafe_code)]

//! Browser binding for `hotsplit-core`.
//!
//! This crate provides [`HotsplitPage`], a `wasm-bindgen`-exported handle
//! that discovers every slider root in the document, wires the hotspot press
//! listeners and one set of window-level move/release listeners into a shared
//! [`hotsplit_core::InputDispatcher`], and tears all of it down on
//! `dispose()`.
//!
//! The listener tables below are target-independent so native tests can pin
//! the event contract without a browser.

use hotsplit_core::PointerSource;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomElement, DomPage, DomWidget};
#[cfg(target_arch = "wasm32")]
pub use wasm::{HotsplitPage, auto_dispose, auto_mount};

/// Lifecycle phase a DOM event feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerPhase {
    Press,
    Move,
    Release,
}

/// One DOM listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerBinding {
    pub event: &'static str,
    pub source: PointerSource,
    pub phase: ListenerPhase,
    /// Registered with `passive: false` so the handler may call
    /// `preventDefault()` and stop touch scrolling.
    pub passive: bool,
}

const fn binding(
    event: &'static str,
    source: PointerSource,
    phase: ListenerPhase,
    passive: bool,
) -> ListenerBinding {
    ListenerBinding {
        event,
        source,
        phase,
        passive,
    }
}

/// Listeners registered on each widget's hotspot.
pub const HOTSPOT_LISTENERS: [ListenerBinding; 2] = [
    binding("mousedown", PointerSource::Mouse, ListenerPhase::Press, false),
    binding("touchstart", PointerSource::Touch, ListenerPhase::Press, false),
];

/// Listeners registered once on the window and shared by every widget.
pub const WINDOW_LISTENERS: [ListenerBinding; 4] = [
    binding("mousemove", PointerSource::Mouse, ListenerPhase::Move, true),
    binding("touchmove", PointerSource::Touch, ListenerPhase::Move, false),
    binding("mouseup", PointerSource::Mouse, ListenerPhase::Release, true),
    binding("touchend", PointerSource::Touch, ListenerPhase::Release, true),
];
