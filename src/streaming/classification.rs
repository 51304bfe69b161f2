//! Stream Classification Module
//!
//! Purpose:
//!   Classify a stream URL into the media-type tag that drives playback
//!   routing and playlist re-parsing. Classification is pure string matching:
//!   no network I/O, total over all inputs, deterministic.
//!
//! Rule order matters and is part of the observable contract:
//!   1. youtube.com / youtu.be host fragment  => Youtube
//!   2. `.m3u` / `.m3u8` suffix               => M3u   (fetch and try to parse)
//!   3. `.mp4` suffix                         => Mp4
//!   4. `.mp3` suffix                         => Mp3
//!   5. `.mpd` suffix                         => Dash
//!   6. `.m3u8` anywhere in the URL           => Hls
//!   7. otherwise                             => Unknown (rejected, not played)
//!
//! A URL like `http://a.com/x.m3u8?t=1` deliberately lands on rule 6, not
//! rule 2: the suffix rules look at the literal end of the URL, query string
//! included. Unknown triggers a user-facing rejection instead of a playback
//! attempt.

use serde::{Deserialize, Serialize};
use url::Url;

/// Media-type tag assigned to a stream URL.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaType {
    Youtube,
    M3u,
    Mp4,
    Mp3,
    Dash,
    Hls,
    Unknown,
}

impl MediaType {
    /// Classify a URL by the fixed precedence rules above, case-insensitively.
    pub fn classify(url: &str) -> Self {
        let u = url.to_ascii_lowercase();
        if u.contains("youtube.com") || u.contains("youtu.be") {
            MediaType::Youtube
        } else if u.ends_with(".m3u") || u.ends_with(".m3u8") {
            MediaType::M3u
        } else if u.ends_with(".mp4") {
            MediaType::Mp4
        } else if u.ends_with(".mp3") {
            MediaType::Mp3
        } else if u.ends_with(".mpd") {
            MediaType::Dash
        } else if u.contains(".m3u8") {
            MediaType::Hls
        } else {
            MediaType::Unknown
        }
    }
}

/// Content sniff: a fetched body that starts with the `#EXTM3U` marker is a
/// playlist, whatever its URL was classified as.
pub fn looks_like_playlist(body: &str) -> bool {
    body.starts_with("#EXTM3U")
}

/// Extract the embeddable video identifier from a YouTube-style URL:
/// the `v=` query parameter, falling back to the final path segment.
pub fn extract_video_id(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if let Some((_, v)) = parsed.query_pairs().find(|(k, _)| k == "v") {
            return v.into_owned();
        }
        if let Some(segment) = parsed
            .path_segments()
            .and_then(|mut s| s.next_back())
            .filter(|s| !s.is_empty())
        {
            return segment.to_string();
        }
    }
    // Unparsable input: best-effort final segment of the raw string
    url.rsplit('/').next().unwrap_or(url).to_string()
}
