//! JSON bodies for creating and updating linear playlists.

use serde::{Deserialize, Serialize};

/// One slot in a linear playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaylistEntry {
    /// A beam (asset) by id.
    Beam { id: String },
    /// An ad break of `dur` seconds.
    Ad { dur: u32 },
}

impl PlaylistEntry {
    fn parse_item(item: &str) -> Self {
        if !item.is_empty() && item.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(dur) = item.parse() {
                return PlaylistEntry::Ad { dur };
            }
        }
        PlaylistEntry::Beam {
            id: item.to_string(),
        }
    }
}

/// Parse `"30,beamA,beamB,30"` into entries.
///
/// Purely numeric items are ad breaks, everything else is a beam id. Items
/// are trimmed and empty items dropped.
pub fn parse_playlist(items: &str) -> Vec<PlaylistEntry> {
    items.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(PlaylistEntry::parse_item)
        .collect()
}

/// Body of a create or update call. Unset fields are left out so an update
/// only touches what was given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_slate_fill: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub studio_drm_required: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_drm: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// -1 repeats forever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beam_break_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<Vec<PlaylistEntry>>,
}

impl PlaylistPayload {
    pub fn with_playlist(mut self, items: Option<&str>) -> Self {
        self.playlist = items.map(parse_playlist);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == PlaylistPayload::default()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_playlist_mixes_ads_and_beams() {
        let entries = parse_playlist("30,abc,def, 15 ,,9x");
        assert_eq!(
            entries,
            vec![
                PlaylistEntry::Ad { dur: 30 },
                PlaylistEntry::Beam { id: "abc".into() },
                PlaylistEntry::Beam { id: "def".into() },
                PlaylistEntry::Ad { dur: 15 },
                PlaylistEntry::Beam { id: "9x".into() },
            ]
        );
    }

    #[test]
    fn test_entries_serialize_to_api_shape() {
        let value = serde_json::to_value(parse_playlist("30,abc")).unwrap();
        assert_eq!(value, json!([{"ad": {"dur": 30}}, {"beam": {"id": "abc"}}]));
    }

    #[test]
    fn test_payload_skips_unset_fields() {
        let payload = PlaylistPayload {
            desc: Some("Morning block".into()),
            repeat: Some(-1),
            active: Some(1),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"active": 1, "desc": "Morning block", "repeat": -1})
        );
    }

    #[test]
    fn test_empty_playlist_string_sends_empty_list() {
        let payload = PlaylistPayload::default().with_playlist(Some(""));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"playlist": []})
        );
        assert!(!payload.is_empty());
        assert!(PlaylistPayload::default().with_playlist(None).is_empty());
    }
}
