//! Conversion of legacy scaling strings (`raw*100 /128 +-100 clamped to [0,
//! 100]`) back into a structured `fmt` object.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Number;

use crate::signal::{Format, Scaling};

/// Bit length assumed when a scaling string does not say.
pub const DEFAULT_BIT_LENGTH: u32 = 8;

const NUMBER: &str = r"-?\d+(?:\.\d+)?(?:[eE][-+]?\d+)?";

static MUL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"raw\s*\*\s*({NUMBER})")).expect("valid mul pattern"));
static DIV: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"/\s*({NUMBER})")).expect("valid div pattern"));
// An exponent's `+` (`1e+16`) is not an offset.
static ADD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:^|[^eE])\+\s*({NUMBER})")).expect("valid add pattern")
});
static CLAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"clamped to \[\s*({NUMBER})\s*(?:,\s*({NUMBER})\s*)?\]"))
        .expect("valid clamp pattern")
});

/// Turns a scaling description into a [`Format`].
pub trait ScalingParser {
    /// Parses `text`. Never fails; unknown text yields a minimal format.
    fn parse(&self, text: &str) -> Format;
}

/// Regex-based parser for the strings the dataset generator writes.
///
/// Recognizes `raw*<n>`, `/<n>`, `+<n>` (the generator prints negative
/// offsets as `+-<n>`; numbers may use exponent notation), and `clamped to [<max>]` or `clamped to [<min>,
/// <max>]`. Anything else (value maps, free text) is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScalingParser;

impl ScalingParser for HeuristicScalingParser {
    fn parse(&self, text: &str) -> Format {
        let mut format = Format { len: Some(DEFAULT_BIT_LENGTH), ..Format::default() };

        format.mul = capture_number(&MUL, text);
        format.div = capture_number(&DIV, text);
        format.add = capture_number(&ADD, text);

        if let Some(caps) = CLAMP.captures(text) {
            let first = caps.get(1).and_then(|m| parse_number(m.as_str()));
            match caps.get(2).and_then(|m| parse_number(m.as_str())) {
                Some(max) => {
                    format.min = first;
                    format.max = Some(max);
                }
                None => format.max = first,
            }
        }

        format
    }
}

fn capture_number(pattern: &Regex, text: &str) -> Option<Number> {
    pattern.captures(text).and_then(|caps| caps.get(1)).and_then(|m| parse_number(m.as_str()))
}

/// Parses a decimal literal, keeping integers integral.
#[must_use]
pub fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Returns the structured form of `scaling`, parsing legacy text with
/// `parser`.
#[must_use]
pub fn normalize_scaling(scaling: &Scaling, parser: &dyn ScalingParser) -> Format {
    match scaling {
        Scaling::Structured(format) => format.clone(),
        Scaling::LegacyText(text) => parser.parse(text),
    }
}
