//! Groups one vehicle's signals by the command that reads them, the shape
//! signal-set files use.

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use crate::signal::{ParameterRecord, Scaling};

use super::fields::{
    is_unrecognized, strip_fields, COMMAND_FIELDS, METADATA_FIELDS, OPTIONAL_COMMAND_FIELDS,
    PROVENANCE_FIELDS,
};
use super::planner::SynthesizedParameter;

/// Polling frequency used when a command's first record has none.
pub const DEFAULT_FREQ: f64 = 0.5;

/// A signal definition under a command.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalEntry {
    /// Signal-level properties in record order. The `fmt` slot holds the
    /// unnormalized scaling until the artifact is rendered.
    pub body: Map<String, Value>,
    /// Scaling to emit as `fmt`.
    pub scaling: Option<Scaling>,
    /// Set for parameters synthesized by a transfer.
    pub is_new: bool,
}

impl SignalEntry {
    /// The signal id, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.body.get("id").and_then(Value::as_str)
    }
}

/// One command with the signals decoded from its response.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandGroup {
    /// `hdr:cmd` grouping key.
    pub key: String,
    /// Command-level properties: `hdr`, `cmd`, `freq`, optional addressing
    /// flags, then carried-through fields.
    pub properties: Map<String, Value>,
    /// Signals in insertion order.
    pub signals: Vec<SignalEntry>,
}

impl CommandGroup {
    /// Returns `true` when every signal in the group is new.
    #[must_use]
    pub fn all_new(&self) -> bool {
        !self.signals.is_empty() && self.signals.iter().all(|s| s.is_new)
    }
}

/// Grouping key for a record: `hdr + ":" + compact JSON of cmd`.
#[must_use]
pub fn command_key(record: &ParameterRecord) -> String {
    let cmd = record.cmd.as_ref().map_or_else(|| "null".to_string(), |c| c.to_json());
    format!("{}:{cmd}", record.hdr.as_deref().unwrap_or_default())
}

/// Builds [`CommandGroup`]s for one target vehicle.
#[derive(Debug, Clone, Copy)]
pub struct CommandGrouper {
    default_freq: f64,
}

impl Default for CommandGrouper {
    fn default() -> Self {
        Self { default_freq: DEFAULT_FREQ }
    }
}

impl CommandGrouper {
    /// Creates a grouper with a custom default frequency.
    #[must_use]
    pub fn new(default_freq: f64) -> Self {
        Self { default_freq }
    }

    /// Groups `existing` records followed by `new` ones.
    ///
    /// Groups appear in first-seen order; within a group, synthesized signals
    /// always follow the vehicle's existing signals. Addressing flags missing
    /// on a group's first record are taken from later records.
    pub fn group<'a>(
        &self,
        existing: impl IntoIterator<Item = &'a ParameterRecord>,
        new: &[SynthesizedParameter],
    ) -> Vec<CommandGroup> {
        let mut groups: Vec<CommandGroup> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        let inputs = existing
            .into_iter()
            .map(|record| (record, false))
            .chain(new.iter().map(|s| (&s.record, s.is_new_parameter())));

        for (record, is_new) in inputs {
            let key = command_key(record);
            let object = record.to_object();

            let index = *index_by_key.entry(key.clone()).or_insert_with(|| {
                groups.push(CommandGroup {
                    key,
                    properties: self.command_properties(&object),
                    signals: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[index];

            for field in OPTIONAL_COMMAND_FIELDS {
                if let Some(value) = object.get(*field) {
                    group.properties.entry(*field).or_insert_with(|| value.clone());
                }
            }

            group.signals.push(signal_entry(record, object, is_new));
        }

        for group in &mut groups {
            order_command_properties(&mut group.properties);
        }

        tracing::debug!(groups = groups.len(), "grouped signals by command");
        groups
    }

    /// Command properties from a group's first record: `hdr`, `cmd`, `freq`,
    /// present addressing flags, then every unrecognized field.
    fn command_properties(&self, object: &Map<String, Value>) -> Map<String, Value> {
        let mut properties = Map::new();
        for field in ["hdr", "cmd"] {
            if let Some(value) = object.get(field) {
                properties.insert(field.to_string(), value.clone());
            }
        }
        let freq = object.get("freq").cloned().unwrap_or_else(|| {
            Number::from_f64(self.default_freq).map_or(Value::Null, Value::Number)
        });
        properties.insert("freq".to_string(), freq);

        for field in OPTIONAL_COMMAND_FIELDS {
            if let Some(value) = object.get(*field) {
                properties.insert((*field).to_string(), value.clone());
            }
        }

        for (key, value) in object {
            if is_unrecognized(key) {
                properties.insert(key.clone(), value.clone());
            }
        }
        properties
    }
}

/// Puts command fields in emission order, carried-through fields last.
fn order_command_properties(properties: &mut Map<String, Value>) {
    let merged = std::mem::take(properties);
    for field in COMMAND_FIELDS {
        if let Some(value) = merged.get(*field) {
            properties.insert((*field).to_string(), value.clone());
        }
    }
    for (key, value) in merged {
        if !COMMAND_FIELDS.contains(&key.as_str()) {
            properties.insert(key, value);
        }
    }
}

/// Builds a record's signal body: command, metadata and provenance fields
/// are dropped and everything else stays in place.
///
/// `fmt` keeps its slot; a legacy `scaling` string takes that slot when the
/// record has no `fmt`. The serializer fills it with the normalized format.
fn signal_entry(
    record: &ParameterRecord,
    object: Map<String, Value>,
    is_new: bool,
) -> SignalEntry {
    let has_fmt = object.contains_key("fmt");
    let mut body: Map<String, Value> = object
        .into_iter()
        .map(|(key, value)| {
            if key == "scaling" && !has_fmt {
                ("fmt".to_string(), value)
            } else {
                (key, value)
            }
        })
        .collect();
    strip_fields(&mut body, COMMAND_FIELDS);
    strip_fields(&mut body, METADATA_FIELDS);
    strip_fields(&mut body, PROVENANCE_FIELDS);

    SignalEntry { body, scaling: record.scaling_source(), is_new }
}

/// Groups with the default frequency.
pub fn group_by_command<'a>(
    existing: impl IntoIterator<Item = &'a ParameterRecord>,
    new: &[SynthesizedParameter],
) -> Vec<CommandGroup> {
    CommandGrouper::default().group(existing, new)
}
