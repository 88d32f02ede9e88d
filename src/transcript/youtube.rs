//! YouTube caption tracks via the InnerTube player API.

use super::{CaptionProvider, CaptionSegment};
use crate::error::{Result, YoyakError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};

const WATCH_URL: &str = "https://www.youtube.com/watch";
const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// One entry of the caption track list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    /// `asr` for auto-generated tracks.
    #[serde(default)]
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Caption provider that talks to YouTube directly.
pub struct YoutubeCaptions {
    client: reqwest::Client,
    api_key_regex: Regex,
    fmt_regex: Regex,
}

impl YoutubeCaptions {
    /// Create a provider with the given user agent and optional timeout.
    pub fn new(user_agent: &str, timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT_LANGUAGE,
                    reqwest::header::HeaderValue::from_static("en-US"),
                );
                headers
            });
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let api_key_regex = Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#)
            .map_err(|e| YoyakError::Config(e.to_string()))?;
        let fmt_regex = Regex::new(r"([?&])fmt=[^&]*")
            .map_err(|e| YoyakError::Config(e.to_string()))?;

        Ok(Self {
            client: builder.build()?,
            api_key_regex,
            fmt_regex,
        })
    }

    /// Read the InnerTube API key from the watch page.
    async fn innertube_key(&self, video_id: &str) -> Result<String> {
        let html = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if html.contains("g-recaptcha") {
            return Err(YoyakError::TranscriptUnavailable(
                "YouTube is asking for a captcha; requests from this IP are blocked".to_string(),
            ));
        }

        self.api_key_regex
            .captures(&html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                YoyakError::TranscriptUnavailable(format!(
                    "Could not read player data for {}",
                    video_id
                ))
            })
    }

    /// List the caption tracks of a video.
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let api_key = self.innertube_key(video_id).await?;

        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": CLIENT_NAME,
                    "clientVersion": CLIENT_VERSION
                }
            },
            "videoId": video_id
        });

        let player: PlayerResponse = self
            .client
            .post(PLAYER_URL)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let tracks = player
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .map(|r| r.caption_tracks)
            .unwrap_or_default();

        if tracks.is_empty() {
            return Err(YoyakError::TranscriptUnavailable(format!(
                "Captions are disabled for {}",
                video_id
            )));
        }

        Ok(tracks)
    }

    /// Download one track as json3.
    async fn download_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionSegment>> {
        let url = json3_url(&self.fmt_regex, &track.base_url);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_json3(&body)
    }
}

/// Point a track URL at the json3 format.
fn json3_url(fmt_regex: &Regex, base_url: &str) -> String {
    let base = base_url.replace("\\u0026", "&");
    if fmt_regex.is_match(&base) {
        fmt_regex.replace(&base, "${1}fmt=json3").into_owned()
    } else if base.contains('?') {
        format!("{}&fmt=json3", base)
    } else {
        format!("{}?fmt=json3", base)
    }
}

/// Pick a track: exact language (manual before generated), or the first
/// listed manual track, else the first track, when no language is given.
///
/// Language codes must match exactly. A request for `en` does not take an
/// `en-US` track; it falls through to the translated default track instead.
fn select_track<'a>(tracks: &'a [CaptionTrack], language: Option<&str>) -> Option<&'a CaptionTrack> {
    let candidates: Vec<&CaptionTrack> = match language {
        Some(lang) => tracks.iter().filter(|t| t.language_code == lang).collect(),
        None => tracks.iter().collect(),
    };

    candidates
        .iter()
        .find(|t| !t.is_generated())
        .or_else(|| candidates.first())
        .copied()
}

/// Turn a json3 caption document into segments, one per caption event.
fn parse_json3(body: &str) -> Result<Vec<CaptionSegment>> {
    let captions: Json3Captions = serde_json::from_str(body).map_err(|e| {
        YoyakError::TranscriptUnavailable(format!("Failed to parse captions: {}", e))
    })?;

    let segments = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs?.into_iter().map(|s| s.utf8).collect();
            let text = text.replace('\n', " ").trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(CaptionSegment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(segments)
}

#[async_trait]
impl CaptionProvider for YoutubeCaptions {
    #[instrument(skip(self))]
    async fn fetch_captions(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<CaptionSegment>> {
        let tracks = self.list_tracks(video_id).await?;
        debug!("Found {} caption tracks", tracks.len());

        let track = select_track(&tracks, language).ok_or_else(|| {
            YoyakError::TranscriptUnavailable(format!(
                "No {} captions for {}",
                language.unwrap_or("default"),
                video_id
            ))
        })?;

        info!(
            "Downloading {} captions{}",
            track.language_code,
            if track.is_generated() { " (auto-generated)" } else { "" }
        );
        self.download_track(track).await
    }
}
