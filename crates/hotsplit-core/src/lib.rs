#![forbid(unsafe_code)]

//! `hotsplit-core` provides the interaction core of a before/after image
//! comparison slider.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (a DOM binding, a test
//!   fixture) pushes press/move/release inputs and answers geometry queries.
//! - **Deterministic**: no clocks, no threads, no hidden globals. Every
//!   rendered width is a pure function of the inputs delivered so far.
//! - **Silent degradation**: markup that lacks a required part yields an
//!   inert controller instead of an error.
//!
//! The DOM binding lives in `hotsplit-web`; everything here talks to the host
//! through the traits in [`host`].

pub mod controller;
pub mod dispatcher;
pub mod drag;
pub mod geometry;
pub mod host;
#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod ratio;
pub mod session_record;

use serde::Deserialize;

pub use controller::{SliderDispatch, SplitSliderController, WidgetParts};
pub use dispatcher::{DispatchOutcome, HostInput, InputDispatcher, SubscriptionId, bootstrap};
pub use drag::{
    DragEffect, DragMachine, DragNoopReason, DragState, DragTransition, PointerSource, SliderInput,
};
pub use geometry::HostRect;
pub use host::{HostElement, PageRoot, WidgetRoot};
pub use ratio::{PaneWidths, SplitRatio, parse_initial_split};

/// Markup class marking a widget root.
pub const DEFAULT_ROOT_SELECTOR: &str = ".BeforeAfterWrapper";
/// Markup class marking the before-pane.
pub const DEFAULT_BEFORE_SELECTOR: &str = ".BeforeMask";
/// Markup class marking the after-pane.
pub const DEFAULT_AFTER_SELECTOR: &str = ".AfterMask";
/// Markup class marking the drag hotspot.
pub const DEFAULT_HOTSPOT_SELECTOR: &str = ".DragHotspot";
/// Root attribute carrying the initial split.
pub const DEFAULT_INITIAL_SPLIT_ATTRIBUTE: &str = "data-start";
/// Split rendered when the root carries no usable initial split.
pub const DEFAULT_SPLIT: f64 = 0.5;

/// Configuration error raised by [`SliderConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SliderConfigError {
    /// A selector or attribute name was empty.
    #[error("empty {0}")]
    Empty(&'static str),
    /// Default split outside `[0, 1]` or non-finite.
    #[error("default split must be a finite value in [0, 1], got {0}")]
    DefaultSplitOutOfRange(f64),
    /// Malformed JSON configuration.
    #[error("config JSON parse error: {0}")]
    Json(String),
}

/// Markup contract and defaults for slider discovery.
///
/// `Default` reproduces the historical class names, so existing pages work
/// without any configuration. A decorative handle element may sit next to
/// the hotspot; it is never resolved or read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderConfig {
    /// Selector enumerating widget roots in the page.
    pub root_selector: String,
    /// Selector resolving the before-pane under a root.
    pub before_selector: String,
    /// Selector resolving the after-pane under a root.
    pub after_selector: String,
    /// Selector resolving the drag hotspot under a root.
    pub hotspot_selector: String,
    /// Root attribute holding the initial split.
    pub initial_split_attribute: String,
    /// Split used when the attribute is absent or unparseable.
    pub default_split: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            root_selector: DEFAULT_ROOT_SELECTOR.to_owned(),
            before_selector: DEFAULT_BEFORE_SELECTOR.to_owned(),
            after_selector: DEFAULT_AFTER_SELECTOR.to_owned(),
            hotspot_selector: DEFAULT_HOTSPOT_SELECTOR.to_owned(),
            initial_split_attribute: DEFAULT_INITIAL_SPLIT_ATTRIBUTE.to_owned(),
            default_split: DEFAULT_SPLIT,
        }
    }
}

impl SliderConfig {
    /// Check selectors and the default split.
    pub fn validate(&self) -> Result<(), SliderConfigError> {
        let named = [
            ("root selector", &self.root_selector),
            ("before selector", &self.before_selector),
            ("after selector", &self.after_selector),
            ("hotspot selector", &self.hotspot_selector),
            ("initial split attribute", &self.initial_split_attribute),
        ];
        if let Some((name, _)) = named.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(SliderConfigError::Empty(*name));
        }
        if !(0.0..=1.0).contains(&self.default_split) {
            return Err(SliderConfigError::DefaultSplitOutOfRange(self.default_split));
        }
        Ok(())
    }

    /// Parse a JSON object (camelCase keys, all optional) and validate it.
    pub fn from_json(json: &str) -> Result<Self, SliderConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SliderConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
