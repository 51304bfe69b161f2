//! Media playback surface
//!
//! Playback itself is delegated to an external collaborator (an HLS engine, a
//! DASH engine, a plain media element, an embedded third-party page). This
//! module defines the trait that collaborator implements plus a capability
//! wrapper for the case where no engine is wired up at all: instead of
//! presence checks scattered through call sites, the unavailable variant
//! degrades every dispatch to a plain direct source assignment the embedder
//! can read back.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::AppResult;

/// Delegate capable of playing each supported media shape.
#[async_trait]
pub trait PlaybackSurface: Send + Sync {
    /// Direct video URL (progressive download)
    async fn play_video(&self, url: &str) -> AppResult<()>;
    /// Direct audio URL
    async fn play_audio(&self, url: &str) -> AppResult<()>;
    /// Adaptive HLS URL
    async fn play_hls(&self, url: &str) -> AppResult<()>;
    /// Adaptive DASH manifest URL
    async fn play_dash(&self, url: &str) -> AppResult<()>;
    /// Embedded third-party page for an extracted video identifier
    async fn play_embedded(&self, video_id: &str) -> AppResult<()>;
}

/// Playback capability: a real surface, or the direct-assignment fallback.
pub struct Playback {
    capability: Capability,
}

enum Capability {
    Available(Box<dyn PlaybackSurface>),
    Unavailable(DirectAssignment),
}

/// Fallback sink used when no playback engine is present: each dispatch just
/// records the source the embedder should assign to its media element.
#[derive(Default)]
struct DirectAssignment {
    current: Mutex<Option<String>>,
}

impl DirectAssignment {
    async fn assign(&self, source: &str) {
        debug!(source, "No playback engine, direct source assignment");
        *self.current.lock().await = Some(source.to_string());
    }
}

impl Playback {
    pub fn available(surface: Box<dyn PlaybackSurface>) -> Self {
        Self {
            capability: Capability::Available(surface),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            capability: Capability::Unavailable(DirectAssignment::default()),
        }
    }

    pub async fn play_video(&self, url: &str) -> AppResult<()> {
        match &self.capability {
            Capability::Available(surface) => surface.play_video(url).await,
            Capability::Unavailable(direct) => {
                direct.assign(url).await;
                Ok(())
            }
        }
    }

    pub async fn play_audio(&self, url: &str) -> AppResult<()> {
        match &self.capability {
            Capability::Available(surface) => surface.play_audio(url).await,
            Capability::Unavailable(direct) => {
                direct.assign(url).await;
                Ok(())
            }
        }
    }

    pub async fn play_hls(&self, url: &str) -> AppResult<()> {
        match &self.capability {
            Capability::Available(surface) => surface.play_hls(url).await,
            Capability::Unavailable(direct) => {
                direct.assign(url).await;
                Ok(())
            }
        }
    }

    pub async fn play_dash(&self, url: &str) -> AppResult<()> {
        match &self.capability {
            Capability::Available(surface) => surface.play_dash(url).await,
            Capability::Unavailable(direct) => {
                direct.assign(url).await;
                Ok(())
            }
        }
    }

    pub async fn play_embedded(&self, video_id: &str) -> AppResult<()> {
        match &self.capability {
            Capability::Available(surface) => surface.play_embedded(video_id).await,
            Capability::Unavailable(direct) => {
                direct
                    .assign(&format!(
                        "https://www.youtube.com/embed/{video_id}?autoplay=1"
                    ))
                    .await;
                Ok(())
            }
        }
    }

    /// Source recorded by the direct-assignment fallback; `None` when a real
    /// surface is wired up or nothing has been dispatched yet.
    pub async fn assigned_source(&self) -> Option<String> {
        match &self.capability {
            Capability::Available(_) => None,
            Capability::Unavailable(direct) => direct.current.lock().await.clone(),
        }
    }
}
