#![forbid(unsafe_code)]

//! Split ratio value type and the declarative initial-split parser.

use serde::{Deserialize, Serialize};

/// Fraction of the widget width allocated to the before-pane.
///
/// Always finite and within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SplitRatio(f64);

impl SplitRatio {
    pub const MIN: Self = Self(0.0);
    pub const HALF: Self = Self(0.5);
    pub const MAX: Self = Self(1.0);

    /// Clamp an arbitrary value into `[0, 1]`.
    ///
    /// Infinities clamp to the matching extreme. `NaN` has no defined
    /// position and yields `None`. Negative zero normalizes to `0.0`.
    #[must_use]
    pub fn clamped(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        // `+ 0.0` turns `-0.0` into `0.0`.
        Some(Self(value.clamp(0.0, 1.0) + 0.0))
    }

    /// Raw fraction.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Pane widths rendered for this ratio.
    #[must_use]
    pub fn widths(self) -> PaneWidths {
        let before_percent = self.0 * 100.0;
        PaneWidths {
            before_percent,
            after_percent: 100.0 - before_percent,
        }
    }
}

impl Default for SplitRatio {
    fn default() -> Self {
        Self::HALF
    }
}

impl TryFrom<f64> for SplitRatio {
    type Error = &'static str;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err("split ratio must be a finite value in [0, 1]")
        }
    }
}

impl From<SplitRatio> for f64 {
    fn from(ratio: SplitRatio) -> Self {
        ratio.0
    }
}

/// Visible-width percentages written to the two panes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneWidths {
    pub before_percent: f64,
    pub after_percent: f64,
}

/// Parse a declarative initial-split attribute the way browsers evaluate
/// `parseFloat`.
///
/// Leading whitespace is skipped and the longest decimal prefix is used, so
/// `"0.3abc"` yields `0.3`. Absent, empty, unparseable and non-finite input
/// (including `"Infinity"`) yield `None`. The result is not clamped; callers
/// clamp at render time.
#[must_use]
pub fn parse_initial_split(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim_start();
    let prefix = &text[..decimal_prefix_len(text.as_bytes())];
    prefix.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Length of the longest `[+-]digits[.digits][(e|E)[+-]digits]` prefix.
/// Returns 0 when the mantissa holds no digit.
fn decimal_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut idx: usize| {
        while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
            idx += 1;
        }
        idx
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    end = digits_from(end);
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}
