//! Data model for the playlist player core
//!
//! All persisted collections serialize through serde as plain JSON values;
//! the in-memory channel list is rebuilt wholesale on every parse and is
//! never persisted.

use serde::{Deserialize, Serialize};

/// Placeholder logo substituted when a playlist entry carries no usable
/// logo attribute. Inline SVG data URI so the UI never needs a network
/// round-trip for the fallback icon.
pub const PLACEHOLDER_LOGO: &str = "data:image/svg+xml;utf8,\
%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22%20width%3D%2264%22%20height%3D%2264%22%3E\
%3Crect%20width%3D%2264%22%20height%3D%2264%22%20rx%3D%2210%22%20fill%3D%22%23111%22%2F%3E\
%3Ctext%20x%3D%2250%25%22%20y%3D%2254%25%22%20dominant-baseline%3D%22middle%22%20text-anchor%3D%22middle%22%20font-size%3D%2234%22%3E%F0%9F%93%BA%3C%2Ftext%3E\
%3C%2Fsvg%3E";

/// A single channel parsed from an M3U playlist.
///
/// Produced only by the parser and immutable after creation. `logo` is always
/// non-empty: a missing attribute resolves to [`PLACEHOLDER_LOGO`] at parse
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub name: String,
    pub url: String,
    pub group: String,
    pub logo: String,
}

/// A user-favorited stream.
///
/// The favorites collection holds at most one entry per `url`, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub logo: String,
}

impl FavoriteEntry {
    /// Build a favorite from whatever list item was toggled. A blank name
    /// falls back to the URL; a missing logo is stored as the empty string.
    pub fn from_item(name: &str, url: &str, logo: &str) -> Self {
        Self {
            name: if name.is_empty() { url } else { name }.to_string(),
            url: url.to_string(),
            logo: logo.to_string(),
        }
    }
}

/// A user-managed bookmark to an external M3U resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPlaylistEntry {
    pub name: String,
    pub url: String,
}

/// One entry of the remote default-playlists descriptor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDescriptor {
    pub name: String,
    pub url: String,
}

/// UI color theme, one of the five persisted values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}
