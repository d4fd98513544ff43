//! Text artifact for pasting transferred signals into a vehicle's
//! `signalsets/v3/default.json`.
//!
//! The layout is consumed by hand and by downstream tooling, so property
//! order and marker lines are fixed:
//!
//! ```text
//! // Signal definitions for Subaru WRX
//! // Merge into signalsets/v3/default.json of the Subaru-WRX repository
//! { "commands": [
//! // === NEW COMMAND ===
//! {
//!   "hdr": "7A0",
//!   "cmd": {"22":"C00B"},
//!   "freq": 0.5,
//!   "signals": [
//!   // === NEW PARAMETER ===
//!   {
//!     "id": "WRX_TP_FL",
//!     ...
//!   }
//!   ]
//! }
//! ] }
//! ```

mod scaling;

pub use scaling::{
    normalize_scaling, parse_number, HeuristicScalingParser, ScalingParser, DEFAULT_BIT_LENGTH,
};

use serde_json::{Map, Value};

use crate::signal::VehicleRef;
use crate::transfer::fields::{strip_fields, PROVENANCE_FIELDS};
use crate::transfer::{CommandGroup, SignalEntry};

/// Marks a command block whose signals are all new.
pub const NEW_COMMAND_MARKER: &str = "// === NEW COMMAND ===";

/// Marks a signal synthesized by a transfer.
pub const NEW_PARAMETER_MARKER: &str = "// === NEW PARAMETER ===";

const INDENT: &str = "  ";

/// Renders command groups as a paste-ready artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSerializer<P = HeuristicScalingParser> {
    parser: P,
}

impl ArtifactSerializer {
    /// Serializer using the heuristic scaling parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: ScalingParser> ArtifactSerializer<P> {
    /// Serializer with a custom scaling parser.
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Renders `groups` for `vehicle`.
    #[must_use]
    pub fn serialize(&self, groups: &[CommandGroup], vehicle: &VehicleRef) -> String {
        let blocks: Vec<String> = groups.iter().map(|g| self.render_group(g)).collect();
        format!(
            "// Signal definitions for {vehicle}\n\
             // Merge into signalsets/v3/default.json of the {} repository\n\
             {{ \"commands\": [\n{}\n] }}\n",
            vehicle.key(),
            blocks.join(",\n")
        )
    }

    fn render_group(&self, group: &CommandGroup) -> String {
        let mut lines: Vec<String> = Vec::new();
        if group.all_new() {
            lines.push(NEW_COMMAND_MARKER.to_string());
        }
        lines.push("{".to_string());
        for (key, value) in &group.properties {
            lines.push(format!("{INDENT}{}: {value},", Value::String(key.clone())));
        }
        lines.push(format!("{INDENT}\"signals\": ["));

        let signals: Vec<String> = group.signals.iter().map(|s| self.render_signal(s)).collect();
        if !signals.is_empty() {
            lines.push(signals.join(",\n"));
        }

        lines.push(format!("{INDENT}]"));
        lines.push("}".to_string());
        lines.join("\n")
    }

    fn render_signal(&self, signal: &SignalEntry) -> String {
        let mut body: Map<String, Value> = signal.body.clone();
        strip_fields(&mut body, PROVENANCE_FIELDS);
        // Inserting over an existing `fmt` keeps its slot in the body.
        if let Some(scaling) = &signal.scaling {
            let format = normalize_scaling(scaling, &self.parser);
            if let Ok(value) = serde_json::to_value(format) {
                body.insert("fmt".to_string(), value);
            }
        }

        let pretty = serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string());
        let mut lines: Vec<String> = Vec::new();
        if signal.is_new {
            lines.push(format!("{INDENT}{NEW_PARAMETER_MARKER}"));
        }
        lines.extend(pretty.lines().map(|line| format!("{INDENT}{line}")));
        lines.join("\n")
    }
}

/// Renders with the default serializer.
#[must_use]
pub fn serialize(groups: &[CommandGroup], vehicle: &VehicleRef) -> String {
    ArtifactSerializer::new().serialize(groups, vehicle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{Format, Scaling};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn group(signals: Vec<SignalEntry>) -> CommandGroup {
        let properties = json!({"hdr": "7E0", "cmd": {"22": "1001"}, "freq": 0.5, "dbg": true});
        CommandGroup {
            key: r#"7E0:{"22":"1001"}"#.into(),
            properties: properties.as_object().unwrap().clone(),
            signals,
        }
    }

    fn signal(id: &str, is_new: bool, scaling: Option<Scaling>) -> SignalEntry {
        SignalEntry {
            body: json!({"id": id, "name": "Oil temp"}).as_object().unwrap().clone(),
            scaling,
            is_new,
        }
    }

    #[test]
    fn renders_complete_block() {
        let groups = vec![group(vec![signal(
            "WRX_OIL",
            true,
            Some(Scaling::LegacyText("raw +-40".into())),
        )])];
        let text = serialize(&groups, &VehicleRef::new("Subaru", "WRX"));

        let expected = r#"// Signal definitions for Subaru WRX
// Merge into signalsets/v3/default.json of the Subaru-WRX repository
{ "commands": [
// === NEW COMMAND ===
{
  "hdr": "7E0",
  "cmd": {"22":"1001"},
  "freq": 0.5,
  "dbg": true,
  "signals": [
  // === NEW PARAMETER ===
  {
    "id": "WRX_OIL",
    "name": "Oil temp",
    "fmt": {
      "len": 8,
      "add": -40
    }
  }
  ]
}
] }
"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn normalized_fmt_stays_in_record_position() {
        let body = json!({"id": "WRX_OIL", "name": "Oil temp", "fmt": "raw +-40", "unit": "celsius"});
        let entry = SignalEntry {
            body: body.as_object().unwrap().clone(),
            scaling: Some(Scaling::LegacyText("raw +-40".into())),
            is_new: false,
        };
        let text = serialize(&[group(vec![entry])], &VehicleRef::new("Subaru", "WRX"));

        let fmt = text.find("\"fmt\": {").unwrap();
        assert!(text.find("\"name\"").unwrap() < fmt);
        assert!(fmt < text.find("\"unit\"").unwrap());
        assert!(text.contains("\"add\": -40"));
        assert!(!text.contains("raw +-40"));
    }

    #[test]
    fn mixed_group_marks_only_new_signals() {
        let groups = vec![group(vec![signal("WRX_A", false, None), signal("WRX_B", true, None)])];
        let text = serialize(&groups, &VehicleRef::new("Subaru", "WRX"));

        assert!(!text.contains(NEW_COMMAND_MARKER));
        assert_eq!(text.matches(NEW_PARAMETER_MARKER).count(), 1);
        let marker = text.find(NEW_PARAMETER_MARKER).unwrap();
        assert!(text.find("WRX_A").unwrap() < marker);
        assert!(marker < text.find("WRX_B").unwrap());
    }

    #[test]
    fn structured_format_is_emitted_as_is() {
        let format = Format { bix: Some(8), len: Some(16), ..Format::default() };
        let groups = vec![group(vec![signal("WRX_A", false, Some(Scaling::Structured(format)))])];
        let text = serialize(&groups, &VehicleRef::new("Subaru", "WRX"));
        assert!(text.contains("\"bix\": 8"));
        assert!(!text.contains("scaling"));
    }

    #[test]
    fn groups_are_comma_separated() {
        let groups = vec![group(vec![signal("A", false, None)]), group(vec![signal("B", false, None)])];
        let text = serialize(&groups, &VehicleRef::new("Subaru", "WRX"));
        assert!(text.contains("  ]\n},\n{\n"));
        assert_eq!(text.matches("\"signals\": [").count(), 2);
    }

    #[test]
    fn custom_parser_is_used_for_legacy_text() {
        struct Fixed;
        impl ScalingParser for Fixed {
            fn parse(&self, _: &str) -> Format {
                Format { len: Some(12), ..Format::default() }
            }
        }
        let groups = vec![group(vec![signal("A", false, Some(Scaling::LegacyText("x".into())))])];
        let text = ArtifactSerializer::with_parser(Fixed).serialize(&groups, &VehicleRef::new("Kia", "EV6"));
        assert!(text.contains("\"len\": 12"));
    }
}
