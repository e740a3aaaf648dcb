use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub event_id: i64,
    pub event_title: String,
    pub event_date: String,
    pub event_time: String,
    pub event_description: Option<String>,
    pub event_image: Option<String>,
    pub event_key_items: Option<String>,
}

impl Event {
    /// Key items are stored as a JSON array of short tags. An empty or absent
    /// column decodes to an empty list; a malformed value is logged and also
    /// decodes to an empty list rather than failing the whole response.
    pub fn decoded_key_items(&self) -> Vec<String> {
        match self.event_key_items.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                tracing::warn!("event {}: unreadable key items: {}", self.event_id, e);
                Vec::new()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_key_items(items: &[String]) -> String {
        serde_json::to_string(items).unwrap()
    }

    fn event_with_items(items: Option<&str>) -> Event {
        Event {
            event_id: 1,
            event_title: "Rustconf".to_string(),
            event_date: "2026-09-01".to_string(),
            event_time: "18:00".to_string(),
            event_description: None,
            event_image: None,
            event_key_items: items.map(str::to_string),
        }
    }

    #[test]
    fn absent_key_items_decode_to_empty_list() {
        assert!(event_with_items(None).decoded_key_items().is_empty());
    }

    #[test]
    fn empty_key_items_decode_to_empty_list() {
        assert!(event_with_items(Some("")).decoded_key_items().is_empty());
    }

    #[test]
    fn key_items_round_trip() {
        let items = vec!["badge".to_string(), "lanyard".to_string(), "snacks".to_string()];
        let encoded = encode_key_items(&items);
        assert_eq!(event_with_items(Some(&encoded)).decoded_key_items(), items);
    }

    #[test]
    fn malformed_key_items_decode_to_empty_list() {
        assert!(event_with_items(Some("not json")).decoded_key_items().is_empty());
    }
}
