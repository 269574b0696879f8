use serde::{Deserialize, Serialize};

use super::common::{PLACEHOLDER_VIDEO_THUMBNAIL, Thumbnail, first_thumbnail};
use crate::parser::Rendition;

/// /api/v1/videos/{id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoDetails {
    pub title: String,
    pub video_id: String,
    pub author: String,
    pub author_id: String,
    pub description: String,
    pub description_html: String,
    pub view_count: u64,
    pub like_count: u64,
    pub length_seconds: u64,
    pub published: i64,
    pub published_text: String,
    pub video_thumbnails: Vec<Thumbnail>,
    #[serde(alias = "format")]
    pub format_streams: Vec<Rendition>,
    pub adaptive_formats: Vec<Rendition>,
}

impl VideoDetails {
    pub fn thumbnail_url(&self) -> &str {
        first_thumbnail(&self.video_thumbnails, PLACEHOLDER_VIDEO_THUMBNAIL)
    }

    // 只保留带地址的 mp4 / webm
    pub fn playable_formats(&self) -> Vec<Rendition> {
        self.format_streams
            .iter()
            .chain(self.adaptive_formats.iter())
            .filter(|r| r.url.is_some())
            .filter(|r| r.container == "mp4" || r.container == "webm")
            .cloned()
            .collect()
    }
}
