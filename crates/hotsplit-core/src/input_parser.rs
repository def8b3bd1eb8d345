#![forbid(unsafe_code)]

//! JSON parser for host-encoded pointer inputs.
//!
//! Accepts one JSON object per input and returns the [`HostInput`] the
//! dispatcher consumes:
//!
//! ```text
//! {"kind":"press","source":"mouse","x":150,"widget":0}
//! {"kind":"touchmove","x":300}
//! {"kind":"release"}
//! ```
//!
//! `kind` takes either the semantic names (`press`, `move`, `release`) or the
//! DOM event names (`mousedown`, `touchstart`, `pointermove`, ...). When
//! `source` is omitted it is inferred from a DOM event name, defaulting to
//! mouse.

use serde::Deserialize;

use crate::dispatcher::{HostInput, SubscriptionId};
use crate::drag::{PointerSource, SliderInput};

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputParseError {
    /// Malformed JSON.
    #[error("JSON parse error: {0}")]
    Json(String),
    /// Missing required field.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// Unknown `kind` value.
    #[error("unknown input kind: {0}")]
    UnknownKind(String),
    /// Unknown `source` value.
    #[error("unknown pointer source: {0}")]
    UnknownSource(String),
    /// Coordinate was NaN or infinite.
    #[error("non-finite coordinate")]
    NonFiniteCoordinate,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    widget: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Press,
    Move,
    Release,
}

fn parse_kind(kind: &str) -> Result<(Phase, Option<PointerSource>), InputParseError> {
    let parsed = match kind {
        "press" => (Phase::Press, None),
        "move" => (Phase::Move, None),
        "release" => (Phase::Release, None),
        "pointerdown" => (Phase::Press, None),
        "pointermove" => (Phase::Move, None),
        "pointerup" => (Phase::Release, None),
        "mousedown" => (Phase::Press, Some(PointerSource::Mouse)),
        "mousemove" => (Phase::Move, Some(PointerSource::Mouse)),
        "mouseup" => (Phase::Release, Some(PointerSource::Mouse)),
        "touchstart" => (Phase::Press, Some(PointerSource::Touch)),
        "touchmove" => (Phase::Move, Some(PointerSource::Touch)),
        "touchend" => (Phase::Release, Some(PointerSource::Touch)),
        other => return Err(InputParseError::UnknownKind(other.to_owned())),
    };
    Ok(parsed)
}

fn parse_source(source: &str) -> Result<PointerSource, InputParseError> {
    match source {
        "mouse" | "pen" => Ok(PointerSource::Mouse),
        "touch" => Ok(PointerSource::Touch),
        other => Err(InputParseError::UnknownSource(other.to_owned())),
    }
}

fn require_x(raw: &RawInput) -> Result<f64, InputParseError> {
    let x = raw.x.ok_or(InputParseError::MissingField("x"))?;
    if !x.is_finite() {
        return Err(InputParseError::NonFiniteCoordinate);
    }
    Ok(x)
}

/// Parse one JSON-encoded host input.
pub fn parse_encoded_input(json: &str) -> Result<HostInput, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;
    let (phase, implied_source) = parse_kind(&raw.kind)?;
    let source = match raw.source.as_deref() {
        Some(source) => parse_source(source)?,
        None => implied_source.unwrap_or_default(),
    };

    let input = match phase {
        Phase::Press => {
            let client_x = require_x(&raw)?;
            let widget = raw.widget.ok_or(InputParseError::MissingField("widget"))?;
            return Ok(HostInput::press(
                SubscriptionId::new(widget),
                source,
                client_x,
            ));
        }
        Phase::Move => SliderInput::Move {
            source,
            client_x: require_x(&raw)?,
        },
        Phase::Release => SliderInput::Release { source },
    };
    Ok(HostInput {
        widget: None,
        input,
    })
}
