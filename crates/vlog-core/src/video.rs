//! Video URL recognition for the supported hosting providers.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static YOUTUBE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        compile(r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})(?:&|$)"),
        compile(r"(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]{11})(?:\?|$)"),
        compile(r"(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]{11})(?:\?|$)"),
    ]
});

static VIMEO_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        compile(r"(?:https?://)?(?:www\.)?vimeo\.com/(\d+)"),
        compile(r"(?:https?://)?player\.vimeo\.com/video/(\d+)"),
    ]
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static video pattern is valid")
}

/// Hosting provider of an external video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoProvider {
    YouTube,
    Vimeo,
}

impl VideoProvider {
    /// Detect the provider from the host part of a URL.
    pub fn detect(url: &str) -> Option<Self> {
        if url.contains("youtube.com") || url.contains("youtu.be") {
            Some(Self::YouTube)
        } else if url.contains("vimeo.com") {
            Some(Self::Vimeo)
        } else {
            None
        }
    }
}

fn first_capture<'a>(patterns: &[Regex], url: &'a str) -> Option<&'a str> {
    patterns
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the 11-character video id from a YouTube watch, short or embed URL.
pub fn youtube_id(url: &str) -> Option<&str> {
    first_capture(YOUTUBE_PATTERNS.as_slice(), url)
}

/// Extract the numeric video id from a Vimeo page or player URL.
pub fn vimeo_id(url: &str) -> Option<&str> {
    first_capture(VIMEO_PATTERNS.as_slice(), url)
}

/// Player URL suitable for an iframe, if the provider is recognised.
pub fn embed_url(url: &str) -> Option<String> {
    match VideoProvider::detect(url)? {
        VideoProvider::YouTube => {
            youtube_id(url).map(|id| format!("https://www.youtube-nocookie.com/embed/{id}"))
        }
        VideoProvider::Vimeo => {
            vimeo_id(url).map(|id| format!("https://player.vimeo.com/video/{id}"))
        }
    }
}
