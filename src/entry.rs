use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One trackable record from the source feed.
///
/// Every field the source may omit is optional; lookups default rather
/// than fail. Fields this tool never inspects are carried through
/// untouched in `extra` so a snapshot round-trip loses nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "supportLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub support_link: Option<String>,
    #[serde(
        rename = "totalSupporters",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_supporters: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_seen: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// The entry's identity, if it has a usable one. An empty string
    /// cannot identify an entry across runs, so it counts as absent.
    pub fn identity(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// The source document shape. `entries` is a hard contract: a source
/// without it fails deserialization, which aborts the whole run.
#[derive(Clone, Debug, Deserialize)]
pub struct SourceData {
    pub entries: Vec<Entry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camel_case_source_fields_map_onto_entry() {
        let entry: Entry = serde_json::from_value(json!({
            "id": "p-17",
            "status": "ONGOING",
            "title": "Save the library",
            "supportLink": "https://example.org/p/17",
            "totalSupporters": 1204
        }))
        .unwrap();
        assert_eq!(entry.id.as_deref(), Some("p-17"));
        assert_eq!(entry.support_link.as_deref(), Some("https://example.org/p/17"));
        assert_eq!(entry.total_supporters, Some(1204));
        assert_eq!(entry.first_seen, None);
    }

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "id": "p-1",
            "status": "ONGOING",
            "category": "environment",
            "deadline": "2026-12-31"
        });
        let entry: Entry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(entry.extra.get("category"), Some(&json!("environment")));
        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn empty_id_has_no_identity() {
        let entry = Entry {
            id: Some(String::new()),
            ..Entry::default()
        };
        assert_eq!(entry.identity(), None);
    }

    #[test]
    fn source_without_entries_field_is_rejected() {
        let result: Result<SourceData, _> = serde_json::from_str("{}");
        assert!(result.is_err());
    }
}
