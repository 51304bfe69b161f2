//! Stream classification
//!
//! Maps stream URLs to a media-type tag used both to route playback and to
//! decide whether a fetched resource should be re-parsed as a playlist.

pub mod classification;

pub use classification::{MediaType, extract_video_id, looks_like_playlist};
