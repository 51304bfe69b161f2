//! Default-playlists descriptor source
//!
//! Fetches the JSON document `{ "playlists": [ { "name": ..., "url": ... } ] }`
//! on demand (first visit to the playlists view, or explicit reload) and caches
//! the result in memory. Entries without a URL are filtered out. Any fetch or
//! decode failure degrades to an empty list; the descriptor is a convenience,
//! never a hard dependency.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::PlaylistDescriptor;

#[derive(Debug, Default, Deserialize)]
struct DescriptorDocument {
    #[serde(default)]
    playlists: Vec<RawDescriptorEntry>,
}

#[derive(Debug, Deserialize)]
struct RawDescriptorEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

impl DescriptorDocument {
    /// Keep only entries with a URL; unnamed entries display their URL.
    fn into_entries(self) -> Vec<PlaylistDescriptor> {
        self.playlists
            .into_iter()
            .filter(|entry| !entry.url.is_empty())
            .map(|entry| PlaylistDescriptor {
                name: if entry.name.is_empty() {
                    entry.url.clone()
                } else {
                    entry.name
                },
                url: entry.url,
            })
            .collect()
    }
}

pub struct DefaultPlaylistsSource {
    client: Client,
    descriptor_url: String,
    cached: Option<Vec<PlaylistDescriptor>>,
}

impl DefaultPlaylistsSource {
    pub fn new(client: Client, descriptor_url: impl Into<String>) -> Self {
        Self {
            client,
            descriptor_url: descriptor_url.into(),
            cached: None,
        }
    }

    /// Return the descriptor entries, fetching them on first use. `force`
    /// bypasses the cache for an explicit user reload.
    pub async fn ensure_loaded(&mut self, force: bool) -> &[PlaylistDescriptor] {
        if self.cached.is_none() || force {
            let playlists = self.fetch().await;
            info!(
                url = %self.descriptor_url,
                count = playlists.len(),
                "Loaded default playlists descriptor"
            );
            self.cached = Some(playlists);
        }
        self.cached.as_deref().unwrap_or_default()
    }

    async fn fetch(&self) -> Vec<PlaylistDescriptor> {
        match self.fetch_document().await {
            Ok(doc) => doc.into_entries(),
            Err(message) => {
                debug!(
                    url = %self.descriptor_url,
                    message,
                    "Descriptor fetch failed, using empty list"
                );
                Vec::new()
            }
        }
    }

    async fn fetch_document(&self) -> Result<DescriptorDocument, String> {
        let response = self
            .client
            .get(&self.descriptor_url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }
        response.json().await.map_err(|e| e.to_string())
    }
}
