//! M3U playlist parser
//!
//! Converts raw M3U/M3U8 text into an ordered channel list plus the distinct
//! set of group labels, in first-seen order.
//!
//! The format as consumed here is line-oriented and tolerant:
//! - `#EXTINF` lines carry metadata for subsequent URL lines: the free text
//!   after the last comma is the display name, `group-title="..."` the group,
//!   `tvg-logo="..."` or `logo="..."` the logo URL.
//! - Any line starting with an absolute `http(s)://` URL emits a channel with
//!   the most recently seen metadata. Metadata is NOT reset between URL lines:
//!   consecutive URLs sharing one `#EXTINF` all inherit it. This carry-over is
//!   load-bearing for malformed real-world lists and must not be "fixed".
//! - Missing attributes degrade to defaults; nothing here returns an error.
//!   The `#EXTM3U` header is not validated; text with no recognizable lines
//!   simply yields zero channels.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{ChannelEntry, PLACEHOLDER_LOGO};

/// Display name used when an `#EXTINF` line carries no title text.
pub const DEFAULT_CHANNEL_NAME: &str = "Channel";

/// Group label used when an `#EXTINF` line carries no `group-title`.
pub const DEFAULT_GROUP: &str = "Other";

/// Result of one parse: the rebuilt channel list and the groups encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct M3uPlaylist {
    pub channels: Vec<ChannelEntry>,
    pub groups: Vec<String>,
}

/// Parse M3U text into channels and groups.
pub fn parse(text: &str) -> M3uPlaylist {
    let mut channels = Vec::new();
    let mut groups: Vec<String> = Vec::new();

    // Carry-over metadata, seeded with the defaults an attribute-less list
    // would degrade to anyway.
    let mut name = DEFAULT_CHANNEL_NAME.to_string();
    let mut group = DEFAULT_GROUP.to_string();
    let mut logo: Option<String> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if line.starts_with("#EXTINF") {
            let rest = &line["#EXTINF".len()..];

            // Display name: free text after the last comma. A missing or
            // blank title degrades to the default.
            name = match rest.rfind(',') {
                Some(pos) => {
                    let title = rest[pos + 1..].trim();
                    if title.is_empty() {
                        DEFAULT_CHANNEL_NAME.to_string()
                    } else {
                        title.to_string()
                    }
                }
                None => DEFAULT_CHANNEL_NAME.to_string(),
            };

            let attrs_part = match rest.rfind(',') {
                Some(pos) => &rest[..pos],
                None => rest,
            };
            let attributes = parse_extinf_attributes(attrs_part);

            group = attributes
                .get("group-title")
                .filter(|g| !g.is_empty())
                .cloned()
                .unwrap_or_else(|| DEFAULT_GROUP.to_string());
            logo = attributes
                .get("tvg-logo")
                .or_else(|| attributes.get("logo"))
                .filter(|l| !l.is_empty())
                .cloned();

            // Groups are collected at metadata time, so a group from an
            // EXTINF line without a following URL still shows up.
            if !groups.contains(&group) {
                groups.push(group.clone());
            }
        } else if is_stream_url(line) {
            channels.push(ChannelEntry {
                name: name.clone(),
                url: line.to_string(),
                group: group.clone(),
                logo: logo
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER_LOGO.to_string()),
            });
        }
        // Anything else (comments, blank lines, other directives) is ignored.
    }

    debug!(
        channels = channels.len(),
        groups = groups.len(),
        "Parsed M3U text"
    );

    M3uPlaylist { channels, groups }
}

/// Absolute HTTP(S) URL line test, case-insensitive on the scheme.
fn is_stream_url(line: &str) -> bool {
    let has_prefix = |p: &str| {
        line.len() >= p.len() && line.as_bytes()[..p.len()].eq_ignore_ascii_case(p.as_bytes())
    };
    has_prefix("http://") || has_prefix("https://")
}

/// Parse `key="value"` pairs from the attribute section of an EXTINF line.
///
/// Quote-aware character scan rather than a regex: attribute values may
/// contain spaces and commas, and malformed syntax should degrade to "no
/// attribute" rather than fail the line.
fn parse_extinf_attributes(attrs_part: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();

    let mut chars = attrs_part.chars().peekable();
    let mut current_key = String::new();
    let mut current_value = String::new();
    let mut in_quotes = false;
    let mut in_value = false;

    while let Some(ch) = chars.next() {
        match ch {
            ' ' | '\t' if !in_quotes => {
                if in_value {
                    // End of unquoted value
                    if !current_key.is_empty() && !current_value.is_empty() {
                        attributes.insert(current_key.clone(), current_value.clone());
                    }
                    current_value.clear();
                    in_value = false;
                }
                current_key.clear();
            }
            '=' if !in_quotes && !in_value => {
                in_value = true;
                if chars.peek() == Some(&'"') {
                    chars.next();
                    in_quotes = true;
                }
            }
            '"' if in_value => {
                in_quotes = false;
                if !current_key.is_empty() {
                    attributes.insert(current_key.clone(), current_value.clone());
                }
                current_key.clear();
                current_value.clear();
                in_value = false;
            }
            _ => {
                if in_value {
                    current_value.push(ch);
                } else {
                    current_key.push(ch);
                }
            }
        }
    }

    // Trailing unquoted value
    if in_value && !current_key.is_empty() && !current_value.is_empty() {
        attributes.insert(current_key, current_value);
    }

    attributes
}
