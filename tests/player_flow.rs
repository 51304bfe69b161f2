//! End-to-end flows: load orchestration against a local HTTP stub,
//! playback dispatch, and state persistence across reloads.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use m3u_player::config::HttpConfig;
use m3u_player::errors::AppResult;
use m3u_player::player::{Playback, PlaybackSurface};
use m3u_player::services::{LoadOutcome, Loader, Notice};
use m3u_player::sources::DefaultPlaylistsSource;
use m3u_player::state::PlayerState;
use m3u_player::storage::JsonFileStore;
use m3u_player::streaming::MediaType;

/// One-shot-per-connection HTTP stub: path -> (status, body).
async fn spawn_server(routes: Vec<(&'static str, u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((404, ""));
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    format!("http://{addr}")
}

/// Playback surface that records every dispatch instead of playing anything.
#[derive(Clone, Default)]
struct RecordingSurface {
    calls: Arc<tokio::sync::Mutex<Vec<(String, String)>>>,
}

impl RecordingSurface {
    async fn record(&self, kind: &str, target: &str) {
        self.calls
            .lock()
            .await
            .push((kind.to_string(), target.to_string()));
    }

    async fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PlaybackSurface for RecordingSurface {
    async fn play_video(&self, url: &str) -> AppResult<()> {
        self.record("video", url).await;
        Ok(())
    }
    async fn play_audio(&self, url: &str) -> AppResult<()> {
        self.record("audio", url).await;
        Ok(())
    }
    async fn play_hls(&self, url: &str) -> AppResult<()> {
        self.record("hls", url).await;
        Ok(())
    }
    async fn play_dash(&self, url: &str) -> AppResult<()> {
        self.record("dash", url).await;
        Ok(())
    }
    async fn play_embedded(&self, video_id: &str) -> AppResult<()> {
        self.record("embedded", video_id).await;
        Ok(())
    }
}

fn fixture(dir: &tempfile::TempDir) -> (Loader, PlayerState, RecordingSurface, Playback) {
    let loader = Loader::new(&HttpConfig::default());
    let state = PlayerState::load(JsonFileStore::open(dir.path()).unwrap());
    let surface = RecordingSurface::default();
    let playback = Playback::available(Box::new(surface.clone()));
    (loader, state, surface, playback)
}

const PLAYLIST_BODY: &str = "#EXTM3U\n\
#EXTINF:-1 tvg-logo=\"http://x/l.png\" group-title=\"News\",BBC\n\
http://x/bbc.m3u8\n\
#EXTINF:-1 group-title=\"Sports\",ESPN\n\
http://x/espn.m3u8\n";

#[tokio::test]
async fn playlist_url_is_fetched_parsed_and_installed() {
    let base = spawn_server(vec![("/list.m3u", 200, PLAYLIST_BODY)]).await;
    let dir = tempfile::tempdir().unwrap();
    let (loader, mut state, surface, playback) = fixture(&dir);

    let url = format!("{base}/list.m3u");
    let report = loader.load_url(&url, &mut state, &playback).await.unwrap();

    assert_eq!(
        report.outcome,
        LoadOutcome::PlaylistInstalled {
            channels: 2,
            groups: 2
        }
    );
    assert!(report.notices.is_empty());
    assert_eq!(state.channels()[0].name, "BBC");
    assert_eq!(state.categories(), &["ALL", "News", "Sports"]);
    // Nothing was dispatched to playback
    assert!(surface.calls().await.is_empty());

    // Load side effects persisted: a fresh state sees them
    assert_eq!(state.last_url(), Some(url.as_str()));
    let reloaded = PlayerState::load(JsonFileStore::open(dir.path()).unwrap());
    assert_eq!(reloaded.history(), &[url.clone()]);
    assert_eq!(reloaded.last_url(), Some(url.as_str()));
}

#[tokio::test]
async fn content_sniffing_overrides_classification() {
    // Classified m3u by suffix, but the body is not a playlist
    let base = spawn_server(vec![("/stream.m3u8", 200, "binary-ish segment data")]).await;
    let dir = tempfile::tempdir().unwrap();
    let (loader, mut state, surface, playback) = fixture(&dir);

    let url = format!("{base}/stream.m3u8");
    let report = loader.load_url(&url, &mut state, &playback).await.unwrap();

    assert_eq!(report.outcome, LoadOutcome::Dispatched(MediaType::Hls));
    assert!(report.notices.is_empty());
    assert_eq!(surface.calls().await, vec![("hls".to_string(), url)]);
    assert!(state.channels().is_empty());
}

#[tokio::test]
async fn fetch_failure_notifies_and_falls_back_to_hls() {
    let base = spawn_server(vec![]).await; // every path 404s
    let dir = tempfile::tempdir().unwrap();
    let (loader, mut state, surface, playback) = fixture(&dir);

    let url = format!("{base}/missing.m3u");
    let report = loader.load_url(&url, &mut state, &playback).await.unwrap();

    assert_eq!(report.outcome, LoadOutcome::Dispatched(MediaType::Hls));
    assert!(matches!(report.notices.as_slice(), [Notice::Transient(_)]));
    // Fallback still hands the original URL to the HLS path
    assert_eq!(surface.calls().await, vec![("hls".to_string(), url.clone())]);
    // The attempt is still in history
    assert_eq!(state.history(), &[url]);
}

#[tokio::test]
async fn unknown_type_is_rejected_with_blocking_notice() {
    let dir = tempfile::tempdir().unwrap();
    let (loader, mut state, surface, playback) = fixture(&dir);

    let report = loader
        .load_url("http://host/stream", &mut state, &playback)
        .await
        .unwrap();

    assert_eq!(report.outcome, LoadOutcome::Rejected);
    assert!(matches!(report.notices.as_slice(), [Notice::Blocking(_)]));
    assert!(surface.calls().await.is_empty());
}

#[tokio::test]
async fn direct_types_dispatch_without_network() {
    let dir = tempfile::tempdir().unwrap();
    let (loader, mut state, surface, playback) = fixture(&dir);

    for (url, expected) in [
        ("http://host/movie.mp4", ("video", "http://host/movie.mp4")),
        ("http://host/song.mp3", ("audio", "http://host/song.mp3")),
        ("http://host/live.mpd", ("dash", "http://host/live.mpd")),
        ("https://www.youtube.com/watch?v=abc123", ("embedded", "abc123")),
    ] {
        let report = loader.load_url(url, &mut state, &playback).await.unwrap();
        assert_eq!(
            report.outcome,
            LoadOutcome::Dispatched(MediaType::classify(url))
        );
        let (kind, target) = expected;
        assert_eq!(
            surface.calls().await.last().unwrap(),
            &(kind.to_string(), target.to_string())
        );
    }
}

#[tokio::test]
async fn play_entry_routes_without_touching_history() {
    let dir = tempfile::tempdir().unwrap();
    let (loader, state, surface, playback) = fixture(&dir);

    let media_type = loader
        .play_entry("http://host/live/stream.m3u8?t=1", &playback)
        .await
        .unwrap();

    assert_eq!(media_type, MediaType::Hls);
    assert_eq!(surface.calls().await.len(), 1);
    assert!(state.history().is_empty());
}

#[tokio::test]
async fn unavailable_playback_records_direct_assignment() {
    let base = spawn_server(vec![]).await;
    let dir = tempfile::tempdir().unwrap();
    let loader = Loader::new(&HttpConfig::default());
    let mut state = PlayerState::load(JsonFileStore::open(dir.path()).unwrap());
    let playback = Playback::unavailable();

    let url = format!("{base}/missing.m3u8");
    loader.load_url(&url, &mut state, &playback).await.unwrap();

    assert_eq!(playback.assigned_source().await, Some(url));
}

#[tokio::test]
async fn default_playlists_descriptor_is_fetched_and_filtered() {
    let base = spawn_server(vec![(
        "/playlists.json",
        200,
        r#"{ "playlists": [
            { "name": "France", "url": "http://x/fr.m3u" },
            { "name": "broken" },
            { "url": "http://x/misc.m3u" }
        ] }"#,
    )])
    .await;

    let loader = Loader::new(&HttpConfig::default());
    let mut source =
        DefaultPlaylistsSource::new(loader.client(), format!("{base}/playlists.json"));

    let entries = source.ensure_loaded(false).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "France");
    assert_eq!(entries[1].name, "http://x/misc.m3u");

    // Cached on second call, refetched on force
    let entries = source.ensure_loaded(false).await;
    assert_eq!(entries.len(), 2);
    let entries = source.ensure_loaded(true).await;
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn default_playlists_failure_degrades_to_empty() {
    let base = spawn_server(vec![]).await;
    let loader = Loader::new(&HttpConfig::default());
    let mut source =
        DefaultPlaylistsSource::new(loader.client(), format!("{base}/playlists.json"));

    assert!(source.ensure_loaded(false).await.is_empty());
}
