//! Image Probe - checks that a card image URL serves decodable bytes
//!
//! Some image CDNs refuse requests without browser-like headers, so the
//! probe sends a desktop User-Agent and an image Accept header.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8";

/// Image download configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept")]
    pub accept: String,

    /// Request timeout; 0 keeps the HTTP client default
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

fn default_accept() -> String {
    IMAGE_ACCEPT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            accept: default_accept(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

/// Image format detected from magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Avif,
    Svg,
    Unknown,
}

impl ImageFormat {
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            return ImageFormat::Png;
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return ImageFormat::Jpeg;
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return ImageFormat::Gif;
        }
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return ImageFormat::Webp;
        }
        if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" && (&bytes[8..12] == b"avif" || &bytes[8..12] == b"avis") {
            return ImageFormat::Avif;
        }

        let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
        let head = head.trim_start();
        if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
            return ImageFormat::Svg;
        }

        ImageFormat::Unknown
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Webp => "webp",
            ImageFormat::Avif => "avif",
            ImageFormat::Svg => "svg",
            ImageFormat::Unknown => "unknown",
        }
    }
}

/// Result of probing one image URL
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: usize,
    pub format: ImageFormat,
}

impl ImageReport {
    /// True when the server answered 2xx with recognisable image bytes
    pub fn is_decodable(&self) -> bool {
        (200..300).contains(&self.status) && self.format != ImageFormat::Unknown
    }
}

/// Image probe errors
#[derive(Debug, thiserror::Error)]
pub enum ImageProbeError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),
}

/// Download an image and report what came back
pub fn probe_image(url: &str, config: &ImageConfig) -> Result<ImageReport, ImageProbeError> {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(config.user_agent.as_str())
        .danger_accept_invalid_certs(config.accept_invalid_certs);
    // 0 keeps the reqwest default
    if config.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(config.timeout_secs));
    }
    let http = builder
        .build()
        .map_err(|e| ImageProbeError::Client(e.to_string()))?;

    let map_send_err = |e: reqwest::Error| {
        if e.is_timeout() {
            ImageProbeError::Timeout(config.timeout_secs)
        } else {
            ImageProbeError::Transport(e.to_string())
        }
    };

    debug!(url, "Downloading image");
    let response = http
        .get(url)
        .header(reqwest::header::ACCEPT, config.accept.as_str())
        .send()
        .map_err(map_send_err)?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = response.bytes().map_err(map_send_err)?;
    let format = ImageFormat::sniff(&bytes);
    debug!(url, status, len = bytes.len(), format = format.as_str(), "Image downloaded");

    Ok(ImageReport {
        url: url.to_string(),
        status,
        content_type,
        content_length: bytes.len(),
        format,
    })
}
