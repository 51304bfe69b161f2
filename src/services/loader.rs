//! Load orchestration
//!
//! `load_url` is the single entry point behind the player's URL input: it
//! persists the URL as last-used, records history, classifies, and dispatches
//! to the matching playback path. Playlist-shaped types (`m3u`, `hls`) go
//! through one network fetch first; a body starting with `#EXTM3U` is parsed
//! as a playlist even when the URL classified as a direct stream — content
//! sniffing overrides the extension rules. A failed fetch is reported as a
//! transient notice and then still handed to the HLS surface with the
//! original URL: best-effort fallback, never silent failure.
//!
//! There is no retry policy, no request cancellation, and at most one fetch
//! per load action; a new load simply ignores a still-pending prior fetch.

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::HttpConfig;
use crate::errors::{AppResult, SourceError, SourceResult};
use crate::player::Playback;
use crate::sources;
use crate::state::PlayerState;
use crate::streaming::{MediaType, extract_video_id, looks_like_playlist};

/// User-facing notification produced during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Blocks the action; nothing was dispatched (unrecognized media type).
    Blocking(String),
    /// Dismissable; the action continued on a fallback path.
    Transient(String),
}

/// What a load ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fetched body was a playlist; it replaced the channel list.
    PlaylistInstalled { channels: usize, groups: usize },
    /// URL was handed to a playback path.
    Dispatched(MediaType),
    /// Unrecognized media type; nothing dispatched.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub outcome: LoadOutcome,
    pub notices: Vec<Notice>,
}

pub struct Loader {
    client: Client,
}

impl Loader {
    pub fn new(http: &HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(http.fetch_timeout())
            .user_agent(http.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }

    /// Shared HTTP client, for collaborators that fetch with the same
    /// timeout/user-agent settings (e.g. the default-playlists source).
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Handle a user-initiated load of `url`.
    pub async fn load_url(
        &self,
        url: &str,
        state: &mut PlayerState,
        playback: &Playback,
    ) -> AppResult<LoadReport> {
        state.set_last_url(url)?;
        state.record_history(url)?;

        let media_type = MediaType::classify(url);
        info!(url, %media_type, "Loading URL");

        let mut notices = Vec::new();
        let outcome = match media_type {
            MediaType::Youtube => {
                playback.play_embedded(&extract_video_id(url)).await?;
                LoadOutcome::Dispatched(MediaType::Youtube)
            }
            MediaType::Mp4 => {
                playback.play_video(url).await?;
                LoadOutcome::Dispatched(MediaType::Mp4)
            }
            MediaType::Mp3 => {
                playback.play_audio(url).await?;
                LoadOutcome::Dispatched(MediaType::Mp3)
            }
            MediaType::Dash => {
                playback.play_dash(url).await?;
                LoadOutcome::Dispatched(MediaType::Dash)
            }
            MediaType::M3u | MediaType::Hls => {
                self.load_playlist_or_stream(url, state, playback, &mut notices)
                    .await?
            }
            MediaType::Unknown => {
                warn!(url, "Unrecognized media type, rejecting");
                notices.push(Notice::Blocking("Unrecognized media type".to_string()));
                LoadOutcome::Rejected
            }
        };

        Ok(LoadReport { outcome, notices })
    }

    /// Route a click on an already-listed entry. No fetch and no history
    /// write; anything that is not a direct type goes straight to HLS.
    pub async fn play_entry(&self, url: &str, playback: &Playback) -> AppResult<MediaType> {
        let media_type = MediaType::classify(url);
        match media_type {
            MediaType::Youtube => playback.play_embedded(&extract_video_id(url)).await?,
            MediaType::Mp4 => playback.play_video(url).await?,
            MediaType::Mp3 => playback.play_audio(url).await?,
            MediaType::Dash => playback.play_dash(url).await?,
            _ => playback.play_hls(url).await?,
        }
        Ok(media_type)
    }

    /// Fetch-then-sniff path for `m3u`/`hls` classified URLs.
    async fn load_playlist_or_stream(
        &self,
        url: &str,
        state: &mut PlayerState,
        playback: &Playback,
        notices: &mut Vec<Notice>,
    ) -> AppResult<LoadOutcome> {
        match self.fetch_text(url).await {
            Ok(body) if looks_like_playlist(&body) => {
                let playlist = sources::parse(&body);
                let (channels, groups) = (playlist.channels.len(), playlist.groups.len());
                state.install_playlist(playlist);
                Ok(LoadOutcome::PlaylistInstalled { channels, groups })
            }
            Ok(_) => {
                debug!(url, "Fetched body is not a playlist, playing as HLS");
                playback.play_hls(url).await?;
                Ok(LoadOutcome::Dispatched(MediaType::Hls))
            }
            Err(e) => {
                // Best-effort fallback: report, then try HLS playback with
                // the original URL anyway.
                warn!(url, error = %e, "Playlist fetch failed, falling back to HLS playback");
                notices.push(Notice::Transient(format!("Failed to load: {e}")));
                playback.play_hls(url).await?;
                Ok(LoadOutcome::Dispatched(MediaType::Hls))
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().await.map_err(|e| SourceError::Decode {
            message: e.to_string(),
        })
    }
}
