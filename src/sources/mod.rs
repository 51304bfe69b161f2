//! Playlist sources
//!
//! Where channel lists come from: raw M3U/M3U8 text (pasted, uploaded, or
//! fetched) and the remote default-playlists descriptor document.

pub mod defaults;
pub mod m3u;

pub use defaults::DefaultPlaylistsSource;
pub use m3u::{M3uPlaylist, parse};
