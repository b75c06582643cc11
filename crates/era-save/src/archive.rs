//! The export archive and the import-side format detection.
//!
//! Three archive layouts have been written over time:
//!
//! - **Canonical**: `{ "version", "registry": [...], "slots": { id: state } }`.
//! - **Flat dump**: an object mapping raw storage keys to their (usually
//!   JSON-encoded) values, as produced by copying the whole key space.
//! - **Bare state**: one `GameState` object on its own.
//!
//! [`ArchiveShape::detect`] classifies a decoded document by structural
//! predicates in that priority order, and each shape has its own
//! normalizer producing an [`Archive`]. Slot payloads are kept as raw JSON;
//! they go through migration when a slot is loaded.

use era_core::state::{SAVE_VERSION, SaveMetadata};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::codec;

/// Storage-key fragments that identify a flat dump.
const DUMP_MARKERS: [&str; 4] = ["era-tycoon", "registry", "active", "era-nexus"];

const SLOT_MARKER: &str = "slot-";

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// A normalized archive: registry entries plus slot payloads keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archive {
    pub version: Value,
    pub registry: Vec<Value>,
    pub slots: Map<String, Value>,
}

impl Archive {
    /// An archive at the running save-format version.
    pub fn new(registry: &[SaveMetadata], slots: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let registry = registry
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            version: json!(SAVE_VERSION),
            registry,
            slots,
        })
    }

    /// Whether the archive was written by this save-format version.
    pub fn version_matches(&self) -> bool {
        self.version.as_f64() == Some(f64::from(SAVE_VERSION))
    }

    /// The version as shown to the player.
    pub fn version_label(&self) -> String {
        match &self.version {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Slot payloads whose key is a slot id.
    pub fn numbered_slots(&self) -> impl Iterator<Item = (u32, &Value)> {
        self.slots
            .iter()
            .filter_map(|(k, v)| k.trim().parse::<u32>().ok().map(|id| (id, v)))
    }
}

// ---------------------------------------------------------------------------
// Shape detection
// ---------------------------------------------------------------------------

/// Which archive layout a decoded document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveShape {
    Canonical,
    FlatDump,
    BareState,
    Unrecognized,
}

impl ArchiveShape {
    pub fn detect(doc: &Value) -> ArchiveShape {
        let Some(obj) = doc.as_object() else {
            return ArchiveShape::Unrecognized;
        };
        // Any document carrying all three sections is an archive of its own
        // version, however malformed the sections are.
        if ["version", "registry", "slots"]
            .iter()
            .all(|key| obj.get(*key).is_some_and(is_truthy))
        {
            return ArchiveShape::Canonical;
        }
        if obj
            .keys()
            .any(|k| DUMP_MARKERS.iter().any(|marker| k.contains(marker)))
        {
            return ArchiveShape::FlatDump;
        }
        if obj.get("buildings").is_some_and(is_truthy) && obj.get("currentEra").is_some_and(is_truthy) {
            return ArchiveShape::BareState;
        }
        ArchiveShape::Unrecognized
    }

    /// Normalize `doc`, which must have this shape.
    pub fn normalize(self, doc: Value, now_ms: u64) -> Option<Archive> {
        let Value::Object(obj) = doc else {
            return None;
        };
        match self {
            ArchiveShape::Canonical => Some(from_canonical(obj)),
            ArchiveShape::FlatDump => from_flat_dump(obj, now_ms),
            ArchiveShape::BareState => Some(from_bare_state(obj, now_ms)),
            ArchiveShape::Unrecognized => None,
        }
    }
}

/// JavaScript-style truthiness, which the legacy layouts relied on.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

fn from_canonical(mut obj: Map<String, Value>) -> Archive {
    let version = obj.remove("version").unwrap_or(Value::Null);
    let registry = match obj.remove("registry") {
        Some(Value::Array(entries)) => entries,
        _ => Vec::new(),
    };
    let slots = match obj.remove("slots") {
        Some(Value::Object(slots)) => slots,
        _ => Map::new(),
    };
    Archive {
        version,
        registry,
        slots,
    }
}

/// Values in a dump are normally JSON strings; objects are taken as-is.
fn decode_dump_value(value: Value) -> Option<Value> {
    match value {
        Value::String(s) => serde_json::from_str(&s).ok(),
        other => Some(other),
    }
}

/// `None` when no slot or registry entry could be read.
fn from_flat_dump(mut obj: Map<String, Value>, now_ms: u64) -> Option<Archive> {
    let version = obj.remove("version").unwrap_or_else(|| json!(SAVE_VERSION));
    let mut slots = Map::new();
    let mut registry = Vec::new();

    for (key, value) in obj {
        if !is_truthy(&value) {
            continue;
        }
        if let Some(pos) = key.rfind(SLOT_MARKER) {
            let id = &key[pos + SLOT_MARKER.len()..];
            match decode_dump_value(value) {
                Some(state) => {
                    slots.insert(id.to_string(), state);
                }
                None => warn!(key = %key, "skipping unreadable slot in dump"),
            }
        } else if key.contains("registry") {
            match decode_dump_value(value) {
                Some(Value::Array(entries)) => registry = entries,
                _ => warn!(key = %key, "skipping unreadable registry in dump"),
            }
        }
    }

    if registry.is_empty() {
        registry = slots
            .iter()
            .filter_map(|(id, state)| {
                let id = id.trim().parse::<u32>().ok()?;
                Some(synthesize_entry(id, state, id == 1, now_ms))
            })
            .collect();
    }
    if slots.is_empty() && registry.is_empty() {
        warn!("flat dump holds no readable slot or registry");
        return None;
    }

    Some(Archive {
        version,
        registry,
        slots,
    })
}

fn from_bare_state(obj: Map<String, Value>, now_ms: u64) -> Archive {
    let state = Value::Object(obj);
    let id = state
        .get("slotId")
        .and_then(Value::as_f64)
        .filter(|id| id.is_finite() && *id >= 1.0 && *id <= f64::from(u32::MAX))
        .map_or(1, |id| id.floor() as u32);
    let entry = synthesize_entry(id, &state, true, now_ms);
    let mut slots = Map::new();
    slots.insert(id.to_string(), state);
    Archive {
        version: json!(SAVE_VERSION),
        registry: vec![entry],
        slots,
    }
}

/// A registry entry built from a slot's own summary fields.
fn synthesize_entry(id: u32, state: &Value, is_main: bool, now_ms: u64) -> Value {
    let era = state
        .get("currentEra")
        .filter(|v| is_truthy(v))
        .cloned()
        .unwrap_or_else(|| json!("Stone Age"));
    let science = state
        .pointer("/resources/science")
        .filter(|v| is_truthy(v))
        .cloned()
        .unwrap_or_else(|| json!(0));
    let timestamp = state
        .get("lastUpdate")
        .filter(|v| is_truthy(v))
        .cloned()
        .unwrap_or_else(|| json!(now_ms));
    json!({
        "id": id,
        "era": era,
        "science": science,
        "timestamp": timestamp,
        "isEmpty": false,
        "isMain": is_main,
    })
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Decode an archive file's text into an [`Archive`].
///
/// Returns `None` when the codec yields nothing, the text is not JSON, or
/// the document matches no known layout.
pub fn parse_archive(raw: &str, now_ms: u64) -> Option<Archive> {
    let text = codec::unpack(raw);
    if text.is_empty() {
        return None;
    }
    let doc: Value = match serde_json::from_str(&text) {
        Ok(doc) => doc,
        Err(e) => {
            debug!(error = %e, "archive payload is not JSON");
            return None;
        }
    };
    let shape = ArchiveShape::detect(&doc);
    debug!(?shape, "detected archive layout");
    shape.normalize(doc, now_ms)
}

/// Serialize and obfuscate an archive for writing to a file.
pub fn pack_archive(archive: &Archive) -> Result<String, serde_json::Error> {
    Ok(codec::pack(&serde_json::to_string(archive)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(doc: &Value) -> String {
        codec::pack(&doc.to_string())
    }

    #[test]
    fn detects_each_shape() {
        let canonical = json!({"version": 15, "registry": [], "slots": {}});
        let dump = json!({"era-tycoon-active-v15": "1"});
        let bare = json!({"buildings": {}, "currentEra": "Stone Age"});
        assert_eq!(ArchiveShape::detect(&canonical), ArchiveShape::Canonical);
        assert_eq!(ArchiveShape::detect(&dump), ArchiveShape::FlatDump);
        assert_eq!(ArchiveShape::detect(&bare), ArchiveShape::BareState);
        assert_eq!(ArchiveShape::detect(&json!([1, 2])), ArchiveShape::Unrecognized);
        assert_eq!(ArchiveShape::detect(&json!({"foo": 1})), ArchiveShape::Unrecognized);
        assert_eq!(
            ArchiveShape::detect(&json!({"buildings": {}, "currentEra": ""})),
            ArchiveShape::Unrecognized
        );
    }

    #[test]
    fn canonical_round_trip() {
        let archive = Archive {
            version: json!(15),
            registry: vec![
                json!({"id": 1, "era": "Industrial Age", "science": 12.5, "timestamp": 1000, "isEmpty": false, "isMain": true}),
                json!({"id": 2, "era": "Stone Age", "science": 0, "timestamp": 1000, "isEmpty": true, "isMain": false}),
            ],
            slots: json!({"1": {"currentEra": "Industrial Age", "resources": {"food": 3.5}}})
                .as_object()
                .cloned()
                .unwrap(),
        };
        let raw = pack_archive(&archive).unwrap();
        assert_eq!(parse_archive(&raw, 0), Some(archive));
    }

    #[test]
    fn flat_dump_collects_slots_and_registry() {
        let registry = json!([{"id": 1, "isMain": true}]).to_string();
        let dump = json!({
            "era-tycoon-v15-slot-1": json!({"currentEra": "Classical Age"}).to_string(),
            "era-tycoon-v15-slot-3": {"currentEra": "Industrial Age"},
            "era-tycoon-registry-v15": registry,
            "era-tycoon-active-v15": "1",
            "era-tycoon-v15-slot-4": "",
        });
        let a = parse_archive(&packed(&dump), 0).unwrap();
        assert!(a.version_matches());
        assert_eq!(a.registry, vec![json!({"id": 1, "isMain": true})]);
        assert_eq!(a.slots.len(), 2);
        assert_eq!(a.slots["1"]["currentEra"], "Classical Age");
        assert_eq!(a.slots["3"]["currentEra"], "Industrial Age");
    }

    #[test]
    fn half_formed_archive_is_still_canonical() {
        let doc = json!({"version": 14, "registry": {"1": {"id": 1}}, "slots": {"1": {}}});
        assert_eq!(ArchiveShape::detect(&doc), ArchiveShape::Canonical);
        let a = parse_archive(&packed(&doc), 0).unwrap();
        assert!(!a.version_matches());
        assert_eq!(a.version_label(), "14");
        assert!(a.registry.is_empty());
        assert_eq!(a.slots.len(), 1);

        let stray = json!({"version": 15, "registry": [], "slots": []});
        let a = parse_archive(&packed(&stray), 0).unwrap();
        assert!(a.slots.is_empty());
    }

    #[test]
    fn flat_dump_keeps_its_own_version() {
        let dump = json!({
            "version": 12,
            "era-tycoon-v15-slot-1": json!({"currentEra": "Stone Age"}).to_string(),
        });
        let a = parse_archive(&packed(&dump), 0).unwrap();
        assert_eq!(a.version, json!(12));
        assert!(!a.version_matches());
    }

    #[test]
    fn empty_flat_dump_is_rejected() {
        let active_only = json!({"era-tycoon-active-v15": "2"});
        assert_eq!(ArchiveShape::detect(&active_only), ArchiveShape::FlatDump);
        assert_eq!(parse_archive(&packed(&active_only), 0), None);

        let unreadable = json!({
            "era-tycoon-v15-slot-1": "{broken",
            "era-tycoon-registry-v15": "nope",
        });
        assert_eq!(parse_archive(&packed(&unreadable), 0), None);
    }

    #[test]
    fn flat_dump_skips_unparsable_slot() {
        let dump = json!({
            "era-nexus-slot-1": "{not json",
            "era-nexus-slot-2": json!({"currentEra": "Industrial Age"}).to_string(),
        });
        let a = parse_archive(&packed(&dump), 0).unwrap();
        assert_eq!(a.slots.keys().collect::<Vec<_>>(), vec!["2"]);
    }

    #[test]
    fn flat_dump_synthesizes_missing_registry() {
        let dump = json!({
            "era-tycoon-v15-slot-1": json!({
                "currentEra": "Industrial Age",
                "resources": {"science": 42},
                "lastUpdate": 777
            }).to_string(),
            "era-tycoon-v15-slot-2": json!({}).to_string(),
        });
        let a = parse_archive(&packed(&dump), 999).unwrap();
        assert_eq!(
            a.registry,
            vec![
                json!({"id": 1, "era": "Industrial Age", "science": 42, "timestamp": 777, "isEmpty": false, "isMain": true}),
                json!({"id": 2, "era": "Stone Age", "science": 0, "timestamp": 999, "isEmpty": false, "isMain": false}),
            ]
        );
    }

    #[test]
    fn bare_state_becomes_single_slot() {
        let state = json!({"buildings": {"b1": {"count": 3}}, "currentEra": "Classical Age", "slotId": 4});
        let a = parse_archive(&packed(&state), 5).unwrap();
        assert_eq!(a.slots.keys().collect::<Vec<_>>(), vec!["4"]);
        assert_eq!(a.registry.len(), 1);
        assert_eq!(a.registry[0]["id"], 4);
        assert_eq!(a.registry[0]["isMain"], true);
        assert_eq!(a.registry[0]["timestamp"], 5);

        let no_slot = json!({"buildings": {}, "currentEra": "Stone Age", "slotId": 0});
        let a = parse_archive(&packed(&no_slot), 5).unwrap();
        assert!(a.slots.contains_key("1"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_archive("", 0), None);
        assert_eq!(parse_archive("%%%", 0), None);
        assert_eq!(parse_archive(&codec::pack("not json"), 0), None);
        assert_eq!(parse_archive(&packed(&json!({"hello": "world"})), 0), None);
    }

    #[test]
    fn version_label_and_match() {
        let mut a = Archive::new(&[], Map::new()).unwrap();
        assert!(a.version_matches());
        a.version = json!(14);
        assert!(!a.version_matches());
        assert_eq!(a.version_label(), "14");
        a.version = json!("15b");
        assert_eq!(a.version_label(), "15b");
    }

    #[test]
    fn numbered_slots_skip_foreign_keys() {
        let mut slots = Map::new();
        slots.insert("2".into(), json!({}));
        slots.insert("backup".into(), json!({}));
        let a = Archive::new(&[], slots).unwrap();
        assert_eq!(a.numbered_slots().map(|(id, _)| id).collect::<Vec<_>>(), vec![2]);
    }
}
