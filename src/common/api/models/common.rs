use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_VIDEO_THUMBNAIL: &str =
    "https://via.placeholder.com/320x180?text=No+Thumbnail";
pub const PLACEHOLDER_CHANNEL_ICON: &str = "https://via.placeholder.com/96x96?text=Channel";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// 取第一张缩略图，没有则返回占位图
pub fn first_thumbnail<'a>(thumbnails: &'a [Thumbnail], placeholder: &'a str) -> &'a str {
    thumbnails
        .iter()
        .map(|t| t.url.as_str())
        .find(|url| !url.is_empty())
        .unwrap_or(placeholder)
}
