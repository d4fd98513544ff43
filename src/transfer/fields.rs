//! Named field sets used to split a record into command-level properties and
//! a signal body. Grouping and serialization both read these lists.

use serde_json::{Map, Value};

/// Properties that belong to the command, in emission order.
pub const COMMAND_FIELDS: &[&str] = &["hdr", "cmd", "freq", "rax", "eax", "tst", "fcm1", "dbg"];

/// Command properties copied only when present.
pub const OPTIONAL_COMMAND_FIELDS: &[&str] = &["rax", "eax", "tst", "fcm1", "dbg"];

/// Vehicle and dataset bookkeeping that never reaches a signal definition.
pub const METADATA_FIELDS: &[&str] = &[
    "vehicleMake",
    "vehicleModel",
    "bitOffset",
    "bitLength",
    "make",
    "model",
    "pid",
    "scaling",
    "specialCase",
];

/// Transfer provenance markers.
pub const PROVENANCE_FIELDS: &[&str] =
    &["sourceMake", "sourceModel", "sourceId", "targetMake", "targetModel", "isNewParameter"];

/// Properties recognised as part of a signal definition.
pub const SIGNAL_FIELDS: &[&str] =
    &["id", "name", "description", "fmt", "unit", "suggestedMetric", "path", "signalGroups"];

/// Returns `true` for fields that are neither command, metadata, provenance
/// nor signal properties. These are carried onto the command.
#[must_use]
pub fn is_unrecognized(field: &str) -> bool {
    ![COMMAND_FIELDS, METADATA_FIELDS, PROVENANCE_FIELDS, SIGNAL_FIELDS]
        .iter()
        .any(|set| set.contains(&field))
}

/// Removes every key listed in `fields`, keeping the order of the rest.
pub fn strip_fields(object: &mut Map<String, Value>, fields: &[&str]) {
    object.retain(|key, _| !fields.contains(&key.as_str()));
}
