#![forbid(unsafe_code)]

//! Drag lifecycle machine for one slider instance.
//!
//! The machine only tracks whether a drag session is active. It never
//! computes ratios; the controller maps the coordinates carried by accepted
//! transitions. Every input produces a [`DragTransition`], including ignored
//! ones, so hosts and tests can observe exactly why an event had no effect.

use serde::{Deserialize, Serialize};

/// Input device that produced a pointer signal.
///
/// Mouse and touch drive the same lifecycle. For touch, hosts report the
/// coordinate of the first active contact only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Host-delivered pointer signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SliderInput {
    /// Press on the widget's hotspot.
    Press {
        #[serde(default)]
        source: PointerSource,
        #[serde(rename = "x")]
        client_x: f64,
    },
    /// Pointer moved anywhere in the document.
    Move {
        #[serde(default)]
        source: PointerSource,
        #[serde(rename = "x")]
        client_x: f64,
    },
    /// Pointer released anywhere in the document.
    Release {
        #[serde(default)]
        source: PointerSource,
    },
}

impl SliderInput {
    /// Horizontal client coordinate carried by the signal, if any.
    #[must_use]
    pub const fn client_x(&self) -> Option<f64> {
        match *self {
            Self::Press { client_x, .. } | Self::Move { client_x, .. } => Some(client_x),
            Self::Release { .. } => None,
        }
    }

    #[must_use]
    pub const fn source(&self) -> PointerSource {
        match *self {
            Self::Press { source, .. } | Self::Move { source, .. } | Self::Release { source } => {
                source
            }
        }
    }
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: PointerSource,
        started_transition: u64,
    },
}

impl DragState {
    #[must_use]
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}

/// Why an input left the machine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
}

/// Effect of one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    /// A press opened a session. A press during an open session restarts it.
    Started { source: PointerSource, client_x: f64 },
    /// A move inside an open session.
    Tracked { source: PointerSource, client_x: f64 },
    /// A release closed the session.
    Ended { source: PointerSource },
    Noop { reason: DragNoopReason },
}

impl DragEffect {
    /// Coordinate the controller should map into a new ratio.
    #[must_use]
    pub const fn tracked_x(&self) -> Option<f64> {
        match *self {
            Self::Started { client_x, .. } | Self::Tracked { client_x, .. } => Some(client_x),
            Self::Ended { .. } | Self::Noop { .. } => None,
        }
    }
}

/// One state-machine transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

/// `Idle`/`Dragging` lifecycle for one slider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DragMachine {
    state: DragState,
    transition_counter: u64,
}

impl DragMachine {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
            transition_counter: 0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Apply one input and report the resulting transition.
    pub fn apply(&mut self, input: &SliderInput) -> DragTransition {
        let transition_id = self.next_transition_id();
        let from = self.state;
        let effect = match (self.state, *input) {
            (_, SliderInput::Press { source, client_x }) => {
                self.state = DragState::Dragging {
                    source,
                    started_transition: transition_id,
                };
                DragEffect::Started { source, client_x }
            }
            (DragState::Dragging { .. }, SliderInput::Move { source, client_x }) => {
                DragEffect::Tracked { source, client_x }
            }
            (DragState::Dragging { .. }, SliderInput::Release { source }) => {
                self.state = DragState::Idle;
                DragEffect::Ended { source }
            }
            (DragState::Idle, SliderInput::Move { .. } | SliderInput::Release { .. }) => {
                DragEffect::Noop {
                    reason: DragNoopReason::IdleWithoutActiveDrag,
                }
            }
        };
        DragTransition {
            transition_id,
            from,
            to: self.state,
            effect,
        }
    }

    fn next_transition_id(&mut self) -> u64 {
        self.transition_counter = self.transition_counter.saturating_add(1);
        self.transition_counter
    }
}
