//! Typed views of the response envelopes the convenience layer reads.
//!
//! These are decoded on demand from the raw [`ApiResponse`] body with
//! [`ApiResponse::decode`]; endpoint methods themselves return the body
//! untyped.
//!
//! [`ApiResponse`]: crate::ApiResponse

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `ConferenceResponse` envelope, returned by conference creation.
#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceResponse {
    /// Identifier of the newly created conference.
    #[serde(rename = "conferenceId", deserialize_with = "string_or_number")]
    pub conference_id: String,
}

/// `MediaResponse` envelope, returned by media creation and media status.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaResponse {
    /// Identifier of the media resource.
    #[serde(rename = "mediaId", default, deserialize_with = "opt_string_or_number")]
    pub media_id: Option<String>,

    /// URL from which the media content can be fetched, when content exists.
    #[serde(rename = "downloadUrl", default)]
    pub download_url: Option<String>,

    /// Size of the media content in bytes, when content exists.
    #[serde(rename = "fileSize", default)]
    pub file_size: Option<u64>,
}

/// `UploadResponse` envelope, returned by an upload-grant request.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Short-lived token authorizing one file upload.
    #[serde(rename = "grantId", deserialize_with = "string_or_number")]
    pub grant_id: String,
}

/// `NetworkidListResponse` envelope (post-normalization shape).
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkIdListResponse {
    /// Registered network ids.
    #[serde(default)]
    pub networkids: Vec<String>,
}

/// `ConferenceListResponse` envelope (post-normalization shape).
#[derive(Debug, Clone, Deserialize)]
pub struct ConferenceListResponse {
    /// Conferences currently in progress.
    #[serde(default)]
    pub active: Vec<String>,

    /// Conferences that have ended.
    #[serde(default)]
    pub inactive: Vec<String>,
}

/// `MediaidListResponse` envelope (post-normalization shape).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaIdListResponse {
    /// Media ids whose content was uploaded.
    #[serde(default)]
    pub uploaded: Vec<String>,

    /// Media ids whose content was recorded over a call.
    #[serde(default)]
    pub recorded: Vec<String>,
}

// The XML-to-JSON gateway is inconsistent about whether numeric-looking ids
// come back as strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn media_response_tolerates_missing_fields() {
        let media: MediaResponse = serde_json::from_value(json!({"mediaId": "m-1"})).unwrap();
        assert_eq!(media.media_id.as_deref(), Some("m-1"));
        assert_eq!(media.download_url, None);
        assert_eq!(media.file_size, None);
    }

    #[test]
    fn grant_id_accepts_numbers() {
        let grant: UploadResponse = serde_json::from_value(json!({"grantId": 4711})).unwrap();
        assert_eq!(grant.grant_id, "4711");
    }

    #[test]
    fn conference_list_defaults_missing_sides() {
        let list: ConferenceListResponse =
            serde_json::from_value(json!({"active": ["c-1"]})).unwrap();
        assert_eq!(list.active, vec!["c-1"]);
        assert!(list.inactive.is_empty());
    }
}
