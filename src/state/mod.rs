//! Player state controller
//!
//! Single owner of all mutable player collections: the current channel list
//! and its derived categories, favorites, history, user playlist bookmarks,
//! theme, and last-used URL. No ambient globals; UI layers hold one
//! `PlayerState` and call its methods.
//!
//! Every mutating method mirrors the touched collection to the key-value
//! store before returning, so a crash never loses more than the in-flight
//! mutation. Reads at startup degrade to defaults (absent or corrupt keys
//! are both "empty", per the storage contract).

use tracing::{debug, info};

use crate::errors::AppResult;
use crate::models::{ChannelEntry, FavoriteEntry, Theme, UserPlaylistEntry};
use crate::sources::M3uPlaylist;
use crate::storage::{JsonFileStore, keys};

/// Synthetic category matching every channel.
pub const ALL_CATEGORY: &str = "ALL";

/// Maximum retained history entries; the oldest beyond the cap are discarded.
pub const HISTORY_CAP: usize = 30;

pub struct PlayerState {
    store: JsonFileStore,

    // Rebuilt wholesale on every parse, never persisted
    channels: Vec<ChannelEntry>,
    categories: Vec<String>,

    // Persisted collections
    favorites: Vec<FavoriteEntry>,
    history: Vec<String>,
    user_playlists: Vec<UserPlaylistEntry>,
    theme: Theme,
    last_url: Option<String>,

    // View filters
    category_filter: String,
    text_filter: String,
}

impl PlayerState {
    /// Load persisted state from the store; everything absent or corrupt
    /// starts at its default.
    pub fn load(store: JsonFileStore) -> Self {
        let favorites: Vec<FavoriteEntry> = store.read_or_default(keys::FAVORITES);
        let history: Vec<String> = store.read_or_default(keys::HISTORY);
        let user_playlists: Vec<UserPlaylistEntry> = store.read_or_default(keys::PLAYLISTS);
        let theme: Theme = store.read_or_default(keys::THEME);
        let last_url: String = store.read_or_default(keys::LAST_URL);

        debug!(
            favorites = favorites.len(),
            history = history.len(),
            playlists = user_playlists.len(),
            "Loaded persisted player state"
        );

        Self {
            store,
            channels: Vec::new(),
            categories: vec![ALL_CATEGORY.to_string()],
            favorites,
            history,
            user_playlists,
            theme,
            last_url: if last_url.is_empty() {
                None
            } else {
                Some(last_url)
            },
            category_filter: ALL_CATEGORY.to_string(),
            text_filter: String::new(),
        }
    }

    // --- Channels & categories ---

    /// Replace the channel list with a freshly parsed playlist. Categories are
    /// recomputed (`ALL` sentinel plus the playlist's groups, first-seen
    /// order) and the category filter resets; the text filter is kept.
    pub fn install_playlist(&mut self, playlist: M3uPlaylist) {
        info!(
            channels = playlist.channels.len(),
            groups = playlist.groups.len(),
            "Installing parsed playlist"
        );
        self.channels = playlist.channels;
        self.categories = std::iter::once(ALL_CATEGORY.to_string())
            .chain(playlist.groups)
            .collect();
        self.category_filter = ALL_CATEGORY.to_string();
    }

    pub fn channels(&self) -> &[ChannelEntry] {
        &self.channels
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_category_filter(&mut self, category: impl Into<String>) {
        self.category_filter = category.into();
    }

    /// Case-insensitive substring filter over name-or-URL.
    pub fn set_text_filter(&mut self, filter: &str) {
        self.text_filter = filter.to_lowercase();
    }

    /// Channels passing the current category and text filters, in list order.
    pub fn visible_channels(&self) -> Vec<&ChannelEntry> {
        self.channels
            .iter()
            .filter(|c| self.category_filter == ALL_CATEGORY || c.group == self.category_filter)
            .filter(|c| self.matches_text(&c.name, &c.url))
            .collect()
    }

    /// Favorites passing the current text filter.
    pub fn visible_favorites(&self) -> Vec<&FavoriteEntry> {
        self.favorites
            .iter()
            .filter(|f| self.matches_text(&f.name, &f.url))
            .collect()
    }

    /// History entries passing the current text filter.
    pub fn visible_history(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter(|url| self.matches_text("", url))
            .map(String::as_str)
            .collect()
    }

    fn matches_text(&self, name: &str, url: &str) -> bool {
        if self.text_filter.is_empty() {
            return true;
        }
        let haystack = if name.is_empty() { url } else { name };
        haystack.to_lowercase().contains(&self.text_filter)
    }

    // --- Favorites ---

    pub fn favorites(&self) -> &[FavoriteEntry] {
        &self.favorites
    }

    pub fn is_favorite(&self, url: &str) -> bool {
        self.favorites.iter().any(|f| f.url == url)
    }

    /// Toggle favorite status for a list item: present removes, absent adds to
    /// the front. Returns whether the URL is a favorite afterwards.
    pub fn toggle_favorite(&mut self, name: &str, url: &str, logo: &str) -> AppResult<bool> {
        let now_favorite = if self.is_favorite(url) {
            self.favorites.retain(|f| f.url != url);
            false
        } else {
            self.favorites.insert(0, FavoriteEntry::from_item(name, url, logo));
            true
        };
        self.store.write(keys::FAVORITES, &self.favorites)?;
        Ok(now_favorite)
    }

    // --- History ---

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Record a load in history: move-to-front per URL, capped at
    /// [`HISTORY_CAP`] entries.
    pub fn record_history(&mut self, url: &str) -> AppResult<()> {
        self.history.retain(|u| u != url);
        self.history.insert(0, url.to_string());
        self.history.truncate(HISTORY_CAP);
        self.store.write(keys::HISTORY, &self.history)?;
        Ok(())
    }

    // --- User playlists ---

    pub fn user_playlists(&self) -> &[UserPlaylistEntry] {
        &self.user_playlists
    }

    /// Bookmark an external M3U resource, newest first. A blank name falls
    /// back to the URL; a blank URL is rejected.
    pub fn add_user_playlist(&mut self, name: &str, url: &str) -> AppResult<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(crate::errors::AppError::validation(
                "user playlist URL is required",
            ));
        }
        let name = name.trim();
        self.user_playlists.insert(
            0,
            UserPlaylistEntry {
                name: if name.is_empty() { url } else { name }.to_string(),
                url: url.to_string(),
            },
        );
        self.store.write(keys::PLAYLISTS, &self.user_playlists)?;
        Ok(())
    }

    /// Remove the bookmark at `index` (list position, newest first).
    pub fn remove_user_playlist(&mut self, index: usize) -> AppResult<UserPlaylistEntry> {
        if index >= self.user_playlists.len() {
            return Err(crate::errors::AppError::validation(format!(
                "no user playlist at index {index}"
            )));
        }
        let removed = self.user_playlists.remove(index);
        self.store.write(keys::PLAYLISTS, &self.user_playlists)?;
        Ok(removed)
    }

    // --- Theme ---

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> AppResult<Theme> {
        self.theme = self.theme.toggled();
        self.store.write(keys::THEME, &self.theme)?;
        Ok(self.theme)
    }

    // --- Last-used URL ---

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    pub fn set_last_url(&mut self, url: &str) -> AppResult<()> {
        self.store.write(keys::LAST_URL, &url)?;
        self.last_url = Some(url.to_string());
        Ok(())
    }
}
