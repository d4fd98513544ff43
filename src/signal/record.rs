//! Parameter records as they arrive from the dataset.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A vehicle reference: make plus model.
///
/// Generic signal sets (e.g. `SAEJ1979`) carry an empty model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VehicleRef {
    /// Manufacturer name (e.g. "Hyundai").
    pub make: String,
    /// Model name (e.g. "IONIQ-5"); empty for generic signal sets.
    #[serde(default)]
    pub model: String,
}

impl VehicleRef {
    /// Creates a vehicle reference.
    #[must_use]
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self { make: make.into(), model: model.into() }
    }

    /// Dataset key: `Make-Model`, or just `Make` for generic sets.
    #[must_use]
    pub fn key(&self) -> String {
        if self.model.is_empty() {
            self.make.clone()
        } else {
            format!("{}-{}", self.make, self.model)
        }
    }

    /// Parses a `Make-Model` token. The make ends at the first `-`; the model
    /// keeps any further dashes (`Hyundai-IONIQ-5`).
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let (make, model) = token.trim().split_once('-')?;
        if make.is_empty() {
            return None;
        }
        Some(Self::new(make, model))
    }

    /// Returns `true` for generic signal sets without a model.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.model.is_empty()
    }
}

impl fmt::Display for VehicleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.model.is_empty() {
            write!(f, "{}", self.make)
        } else {
            write!(f, "{} {}", self.make, self.model)
        }
    }
}

/// Ordered mapping from service code to command value, e.g. `{"22": "E003"}`.
///
/// Entry order is the order of the source JSON and is part of a parameter's
/// identity, so it must never be re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandMap(Map<String, Value>);

impl CommandMap {
    /// Creates an empty command map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends (or replaces) a service entry.
    pub fn insert(&mut self, service: impl Into<String>, value: impl Into<String>) {
        self.0.insert(service.into(), Value::String(value.into()));
    }

    /// Iterates `(service, value)` pairs in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), value_text(v)))
    }

    /// Returns `true` when the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries rendered as `keyvalue` and joined with `sep` (`"22E003"` for an
    /// empty separator).
    #[must_use]
    pub fn joined(&self, sep: &str) -> String {
        self.entries().map(|(k, v)| format!("{k}{v}")).collect::<Vec<_>>().join(sep)
    }

    /// Compact JSON form, e.g. `{"22":"E003"}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CommandMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Renders a JSON scalar without quotes for strings.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Structured scaling for a signal (`fmt` in signal-set files).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Format {
    /// Bit index of the signal within the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bix: Option<u32>,
    /// Bit length of the signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<u32>,
    /// Lower clamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    /// Upper clamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    /// Multiplier applied to the raw value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mul: Option<Number>,
    /// Divisor applied to the raw value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub div: Option<Number>,
    /// Offset added after scaling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add: Option<Number>,
    /// Unit of the scaled value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Keys this crate does not interpret (`map`, `sign`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Where a signal's scaling comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Scaling {
    /// A structured `fmt` object.
    Structured(Format),
    /// A human-readable scaling string such as `raw/10 +-40`.
    LegacyText(String),
}

/// One signal of one vehicle, as sourced from the dataset.
///
/// Fields this crate does not model are kept in [`ParameterRecord::extra`]
/// so they survive a trip through the transfer pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    /// Vehicle-scoped identifier.
    #[serde(default)]
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// ECU header, e.g. "7E4".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdr: Option<String>,
    /// Command sent to the ECU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<CommandMap>,
    /// Polling frequency in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<Number>,
    /// Receive address (extended addressing).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rax: Option<Value>,
    /// Extended address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eax: Option<Value>,
    /// Tester address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tst: Option<Value>,
    /// Flow-control mode flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcm1: Option<Value>,
    /// Debug flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbg: Option<Value>,
    /// Bit position of the signal within the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_offset: Option<u32>,
    /// Bit width of the signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_length: Option<u32>,
    /// Structured scaling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fmt: Option<Format>,
    /// Legacy scaling string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling: Option<String>,
    /// Unit of the decoded value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Canonical metric name, e.g. "stateOfCharge".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_metric: Option<String>,
    /// Taxonomy path, e.g. "Battery.Modules.003".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Signal group descriptors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_groups: Option<Vec<Value>>,
    /// Injected before alignment; not part of source data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_make: Option<String>,
    /// Injected before alignment; not part of source data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    /// Everything else found on the source object.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParameterRecord {
    /// Creates a record with only an id and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), ..Self::default() }
    }

    /// The suggested metric, treating an empty string as absent.
    #[must_use]
    pub fn metric(&self) -> Option<&str> {
        self.suggested_metric.as_deref().filter(|m| !m.is_empty())
    }

    /// The scaling source: `fmt` wins over the legacy string.
    #[must_use]
    pub fn scaling_source(&self) -> Option<Scaling> {
        match (&self.fmt, &self.scaling) {
            (Some(fmt), _) => Some(Scaling::Structured(fmt.clone())),
            (None, Some(text)) => Some(Scaling::LegacyText(text.clone())),
            (None, None) => None,
        }
    }

    /// Command id used by the dataset index: `hdr_<cmd entries>`.
    #[must_use]
    pub fn command_id(&self) -> String {
        let cmd = self.cmd.as_ref().map(|c| c.joined("")).unwrap_or_default();
        format!("{}_{cmd}", self.hdr.as_deref().unwrap_or_default())
    }

    /// Display form of the command, e.g. `22E003` (entries joined by spaces).
    #[must_use]
    pub fn command_label(&self) -> String {
        self.cmd.as_ref().map(|c| c.joined(" ")).unwrap_or_default()
    }

    /// The extended address as text, if present.
    #[must_use]
    pub fn extended_address(&self) -> Option<String> {
        self.eax.as_ref().map(value_text).filter(|s| !s.is_empty())
    }

    /// Serializes the record into a JSON object, preserving field order.
    #[must_use]
    pub fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}
