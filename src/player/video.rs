use serde::{Deserialize, Serialize};

const PIXELDRAIN_HOST: &str = "pixeldrain.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoFormat {
    Mp4,
    M3u8,
    Pixeldrain,
    Direct,
}

impl VideoFormat {
    pub fn detect(url: &str) -> Self {
        if url.contains(PIXELDRAIN_HOST) {
            VideoFormat::Pixeldrain
        } else if url.contains(".m3u8") {
            VideoFormat::M3u8
        } else if url.contains(".mp4") {
            VideoFormat::Mp4
        } else {
            VideoFormat::Direct
        }
    }

    /// MIME type handed to the video element
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            VideoFormat::M3u8 => Some("application/x-mpegURL"),
            VideoFormat::Mp4 => Some("video/mp4"),
            VideoFormat::Pixeldrain | VideoFormat::Direct => None,
        }
    }
}

/// Turn a catalog URL into one a video element can play directly.
///
/// Pixeldrain share pages (`https://pixeldrain.com/u/<id>`) are rewritten to
/// the file download endpoint; everything else passes through trimmed.
pub fn resolve_source(url: &str) -> String {
    let url = url.trim();
    match VideoFormat::detect(url) {
        VideoFormat::Pixeldrain => {
            let file_id = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
            format!("https://{}/api/file/{}?download", PIXELDRAIN_HOST, file_id)
        }
        _ => url.to_string(),
    }
}

/// `m:ss` for a playback position in seconds
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
