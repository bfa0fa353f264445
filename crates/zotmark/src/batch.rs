//! Webhook item batches.
//!
//! The Zotero side posts a JSON object `{ "sender_id": ..., "data": [item, ...] }`
//! where every item carries its `itemkey`, `citekey`, the HTML of its notes and
//! any number of bibliographic fields. Each note is converted on its own; the
//! notes of one item are concatenated here, never by the converter.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::service::NoteConverter;
use crate::{Error, Result};

/// `sender_id` of the action that writes literature notes
pub const SENDER_WRITE_NOTES: &str = "zotero_to_obsidian_note";
/// `sender_id` of the action that opens existing notes
pub const SENDER_OPEN_NOTES: &str = "open_obsidian_note";

/// What the sender asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderAction {
    WriteNotes,
    OpenNotes,
}

impl SenderAction {
    pub fn from_sender_id(sender_id: &str) -> Result<Self> {
        match sender_id {
            SENDER_WRITE_NOTES => Ok(SenderAction::WriteNotes),
            SENDER_OPEN_NOTES => Ok(SenderAction::OpenNotes),
            other => Err(Error::UnknownSender(other.to_string())),
        }
    }

    pub fn sender_id(self) -> &'static str {
        match self {
            SenderAction::WriteNotes => SENDER_WRITE_NOTES,
            SenderAction::OpenNotes => SENDER_OPEN_NOTES,
        }
    }
}

/// A decoded webhook request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub data: Vec<ItemRecord>,
}

impl WebhookPayload {
    /// Decode a payload; a payload without items is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: WebhookPayload = serde_json::from_str(json)?;
        if payload.data.is_empty() {
            return Err(Error::EmptyPayload);
        }
        debug!("decoded webhook payload with {} items", payload.data.len());
        Ok(payload)
    }

    /// The requested action
    pub fn action(&self) -> Result<SenderAction> {
        match self.sender_id.as_deref() {
            Some(sender_id) => SenderAction::from_sender_id(sender_id),
            None => Err(Error::MissingSender),
        }
    }
}

/// One catalogued item as sent by Zotero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub itemkey: Option<String>,
    #[serde(default)]
    pub citekey: Option<String>,
    /// Note bodies as HTML
    #[serde(default)]
    pub notes: Vec<String>,
    /// Every other field, kept for the note template
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// An item whose notes have been converted to Markdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedItem {
    pub itemkey: String,
    pub citekey: String,
    /// One Markdown string per note, each newline-terminated
    pub notes: Vec<String>,
    pub fields: Map<String, Value>,
}

impl ConvertedItem {
    /// All notes concatenated in order
    pub fn body(&self) -> String {
        self.notes.concat()
    }

    /// The item's fields with `notes` replaced by the converted Markdown,
    /// ready to hand to a note template.
    pub fn template_fields(&self) -> Map<String, Value> {
        let mut fields = self.fields.clone();
        fields.insert("itemkey".to_string(), Value::String(self.itemkey.clone()));
        fields.insert("citekey".to_string(), Value::String(self.citekey.clone()));
        fields.insert(
            "notes".to_string(),
            Value::Array(self.notes.iter().cloned().map(Value::String).collect()),
        );
        fields
    }
}

impl ItemRecord {
    /// Convert this item's notes; `None` when `itemkey` or `citekey` is missing.
    pub fn convert(&self, converter: &NoteConverter) -> Option<ConvertedItem> {
        let itemkey = self.itemkey.as_deref().filter(|k| !k.is_empty())?;
        let citekey = self.citekey.as_deref().filter(|k| !k.is_empty())?;

        Some(ConvertedItem {
            itemkey: itemkey.to_string(),
            citekey: citekey.to_string(),
            notes: self
                .notes
                .iter()
                .map(|html| converter.convert_note(html))
                .collect(),
            fields: self.fields.clone(),
        })
    }
}

/// Convert every usable item, keyed by citekey in payload order.
///
/// Items missing `itemkey` or `citekey` are skipped with a warning. A repeated
/// citekey keeps its first position and the last item's content.
pub fn convert_items(converter: &NoteConverter, items: &[ItemRecord]) -> IndexMap<String, ConvertedItem> {
    let total = items.len();
    let mut converted = IndexMap::with_capacity(total);

    for (index, item) in items.iter().enumerate() {
        let Some(item) = item.convert(converter) else {
            warn!("skipping item {}/{total}: missing itemkey or citekey", index + 1);
            continue;
        };
        debug!(
            "converted item {}/{total}: {} ({} notes)",
            index + 1,
            item.citekey,
            item.notes.len()
        );
        converted.insert(item.citekey.clone(), item);
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "sender_id": "zotero_to_obsidian_note",
        "data": [
            {
                "itemkey": "ABCD1234",
                "citekey": "smith2020",
                "title": "A Study",
                "notes": ["<div><p>first</p></div>", "<div><ul><li>a</li></ul></div>"]
            },
            { "itemkey": "NOCITE" },
            { "itemkey": "EFGH5678", "citekey": "doe1999" }
        ]
    }"#;

    #[test]
    fn test_decode_payload() {
        let payload = WebhookPayload::from_json(PAYLOAD).unwrap();
        assert_eq!(payload.action().unwrap(), SenderAction::WriteNotes);
        assert_eq!(payload.data.len(), 3);
        assert_eq!(payload.data[0].fields.get("title"), Some(&Value::String("A Study".into())));
        assert!(payload.data[2].notes.is_empty());
    }

    #[test]
    fn test_payload_errors() {
        assert!(matches!(WebhookPayload::from_json("{"), Err(Error::InvalidPayload(_))));
        assert!(matches!(
            WebhookPayload::from_json(r#"{"sender_id":"x","data":[]}"#),
            Err(Error::EmptyPayload)
        ));
        assert!(matches!(
            WebhookPayload::from_json(r#"{"sender_id":"x","data":{"a":1}}"#),
            Err(Error::InvalidPayload(_))
        ));

        let unknown = WebhookPayload::from_json(r#"{"sender_id":"x","data":[{}]}"#).unwrap();
        assert!(matches!(unknown.action(), Err(Error::UnknownSender(id)) if id == "x"));

        let missing = WebhookPayload::from_json(r#"{"data":[{}]}"#).unwrap();
        assert!(matches!(missing.action(), Err(Error::MissingSender)));
    }

    #[test]
    fn test_sender_round_trip() {
        for action in [SenderAction::WriteNotes, SenderAction::OpenNotes] {
            assert_eq!(SenderAction::from_sender_id(action.sender_id()).unwrap(), action);
        }
    }

    #[test]
    fn test_convert_items() {
        let payload = WebhookPayload::from_json(PAYLOAD).unwrap();
        let converted = convert_items(&NoteConverter::new(), &payload.data);

        assert_eq!(converted.keys().collect::<Vec<_>>(), vec!["smith2020", "doe1999"]);

        let smith = &converted["smith2020"];
        assert_eq!(smith.itemkey, "ABCD1234");
        assert_eq!(smith.notes, vec!["first\n".to_string(), "- a\n".to_string()]);
        assert_eq!(smith.body(), "first\n- a\n");
        assert_eq!(converted["doe1999"].body(), "");
    }

    #[test]
    fn test_template_fields() {
        let payload = WebhookPayload::from_json(PAYLOAD).unwrap();
        let converted = convert_items(&NoteConverter::new(), &payload.data);
        let fields = converted["smith2020"].template_fields();

        assert_eq!(fields["citekey"], Value::String("smith2020".into()));
        assert_eq!(fields["title"], Value::String("A Study".into()));
        assert_eq!(fields["notes"][1], Value::String("- a\n".into()));
    }
}
