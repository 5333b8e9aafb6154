use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::{LyricsProvider, ProviderResult, TrackCandidate};
use crate::error::{NetworkError, ProviderError, Result};

const PROVIDER: &str = "Musixmatch";
/// Candidates requested per search; the configured result limit cannot exceed it.
pub const SEARCH_PAGE_SIZE: usize = 10;

#[derive(Clone)]
pub struct MusixmatchClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MusixmatchClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("lyrics-bridge/{}", version))
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Calls one API method and returns the `message.body` on success,
    /// `None` when the API reports the resource as not found.
    async fn call(&self, method: &str, params: &[(&str, &str)]) -> ProviderResult<Option<Value>> {
        let url = format!("{}/{}", self.base_url, method);
        debug!("Calling Musixmatch {} with {:?}", method, params);

        let response = self.client
            .get(&url)
            .query(params)
            .query(&[("format", "json"), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status { provider: PROVIDER, status: status.as_u16() });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::network(PROVIDER, e))?;

        parse_envelope(payload)
    }
}

/// Musixmatch answers HTTP 200 and reports the real status in
/// `message.header.status_code`.
fn parse_envelope(payload: Value) -> ProviderResult<Option<Value>> {
    let message = payload
        .get("message")
        .ok_or_else(|| ProviderError::invalid_response(PROVIDER, "missing message"))?;

    let status_code = message
        .pointer("/header/status_code")
        .and_then(Value::as_u64)
        .ok_or_else(|| ProviderError::invalid_response(PROVIDER, "missing header.status_code"))?;

    match status_code {
        200 => Ok(Some(message.get("body").cloned().unwrap_or(Value::Null))),
        404 => Ok(None),
        401 | 403 => Err(ProviderError::network(PROVIDER, NetworkError::Authentication)),
        402 | 429 => Err(ProviderError::network(PROVIDER, NetworkError::RateLimit)),
        500 | 503 => Err(ProviderError::network(PROVIDER, NetworkError::ServiceUnavailable)),
        other => Err(ProviderError::Status {
            provider: PROVIDER,
            status: u16::try_from(other).unwrap_or(u16::MAX),
        }),
    }
}

/// Items without a usable `track` object are skipped; only a `track_list`
/// that is not an array makes the whole body invalid.
fn extract_tracks(body: &Value) -> ProviderResult<Vec<TrackCandidate>> {
    let list = match body.get("track_list") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(list)) => list,
        Some(_) => return Err(ProviderError::invalid_response(PROVIDER, "track_list is not an array")),
    };

    let mut tracks = Vec::with_capacity(list.len());
    for (index, item) in list.iter().enumerate() {
        let track = match item.get("track") {
            Some(track) => track.clone(),
            None => {
                warn!("Skipping Musixmatch search item {} without track", index);
                continue;
            }
        };
        match serde_json::from_value::<TrackCandidate>(track) {
            Ok(candidate) => tracks.push(candidate),
            Err(e) => warn!("Skipping malformed Musixmatch track at {}: {}", index, e),
        }
    }
    Ok(tracks)
}

fn extract_lyrics(body: &Value) -> Option<String> {
    body.pointer("/lyrics/lyrics_body")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn extract_translation(body: &Value) -> Option<String> {
    body.pointer("/translations_list/0/translation/translated_text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl LyricsProvider for MusixmatchClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search_tracks(&self, query: &str) -> ProviderResult<Vec<TrackCandidate>> {
        let page_size = SEARCH_PAGE_SIZE.to_string();
        let body = self
            .call("track.search", &[("q", query), ("page_size", page_size.as_str()), ("page", "1")])
            .await?;

        match body {
            Some(body) => extract_tracks(&body),
            None => Ok(Vec::new()),
        }
    }

    async fn get_lyrics(&self, track_id: i64) -> ProviderResult<Option<String>> {
        let track_id = track_id.to_string();
        let body = self.call("track.lyrics.get", &[("track_id", track_id.as_str())]).await?;
        Ok(body.as_ref().and_then(extract_lyrics))
    }

    async fn get_lyrics_translation(&self, track_id: i64, lang: &str) -> ProviderResult<Option<String>> {
        let track_id = track_id.to_string();
        let body = self
            .call(
                "crowdtrack.translations.get",
                &[
                    ("track_id", track_id.as_str()),
                    ("selected_language", lang),
                    ("comment_format", "text"),
                ],
            )
            .await?;
        Ok(body.as_ref().and_then(extract_translation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(status: u64, body: Value) -> Value {
        json!({ "message": { "header": { "status_code": status }, "body": body } })
    }

    #[test]
    fn test_envelope_status_mapping() {
        assert!(parse_envelope(envelope(200, json!({}))).unwrap().is_some());
        assert!(parse_envelope(envelope(404, json!([]))).unwrap().is_none());

        let err = parse_envelope(envelope(401, json!([]))).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Network { source: NetworkError::Authentication, .. }
        ));

        let err = parse_envelope(envelope(402, json!([]))).unwrap_err();
        assert!(matches!(err, ProviderError::Network { source: NetworkError::RateLimit, .. }));

        let err = parse_envelope(envelope(418, json!([]))).unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 418, .. }));

        let err = parse_envelope(envelope(70000, json!([]))).unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: u16::MAX, .. }));

        assert!(parse_envelope(json!({ "unexpected": true })).is_err());
    }

    #[test]
    fn test_extract_tracks_keeps_provider_order() {
        let body = json!({
            "track_list": [
                { "track": { "track_id": 3, "track_name": "Bohemian Rhapsody", "artist_name": "Queen" } },
                { "track": { "track_id": 1, "track_name": "Bohemian Rhapsody (Live)", "artist_name": "Queen" } }
            ]
        });

        let tracks = extract_tracks(&body).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].track_id, 3);
        assert_eq!(tracks[1].track_id, 1);
    }

    #[test]
    fn test_extract_tracks_handles_empty_body() {
        assert!(extract_tracks(&json!({ "track_list": [] })).unwrap().is_empty());
        assert!(extract_tracks(&json!([])).unwrap().is_empty());
        assert!(extract_tracks(&json!({ "track_list": [{ "nope": {} }] })).unwrap().is_empty());
        assert!(extract_tracks(&json!({ "track_list": "oops" })).is_err());
    }

    #[test]
    fn test_extract_tracks_skips_malformed_items() {
        let body = json!({
            "track_list": [
                { "track": { "track_id": 1, "track_name": "Bohemian Rhapsody" } },
                { "track": { "track_name": "No id" } },
                { "track": { "track_id": "not a number" } },
                { "track": { "track_id": 2 } }
            ]
        });

        let ids: Vec<i64> = extract_tracks(&body).unwrap().iter().map(|t| t.track_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_extract_lyrics_and_translation() {
        let lyrics = json!({ "lyrics": { "lyrics_id": 7, "lyrics_body": "Is this the real life?" } });
        assert_eq!(extract_lyrics(&lyrics).as_deref(), Some("Is this the real life?"));
        assert_eq!(extract_lyrics(&json!({})), None);

        let translation = json!({
            "translations_list": [
                { "translation": { "translated_text": "¿Es esta la vida real?" } }
            ]
        });
        assert_eq!(extract_translation(&translation).as_deref(), Some("¿Es esta la vida real?"));
        assert_eq!(extract_translation(&json!({ "translations_list": [] })), None);
    }
}
