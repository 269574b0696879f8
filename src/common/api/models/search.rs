use serde::{Deserialize, Serialize};

use super::common::{PLACEHOLDER_VIDEO_THUMBNAIL, Thumbnail, first_thumbnail};

/// /api/v1/search 返回的条目，按 type 字段区分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchItem {
    Video(SearchVideo),
    Channel(SearchChannel),
    Playlist(SearchPlaylist),
    #[serde(other)]
    Other,
}

impl SearchItem {
    pub fn as_video(&self) -> Option<&SearchVideo> {
        match self {
            Self::Video(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchVideo {
    pub title: String,
    pub video_id: String,
    pub author: String,
    pub author_id: String,
    pub video_thumbnails: Vec<Thumbnail>,
    pub length_seconds: u64,
    pub view_count: u64,
    pub published_text: String,
}

impl SearchVideo {
    pub fn thumbnail_url(&self) -> &str {
        first_thumbnail(&self.video_thumbnails, PLACEHOLDER_VIDEO_THUMBNAIL)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchChannel {
    pub author: String,
    pub author_id: String,
    pub sub_count: u64,
    pub video_count: u64,
    pub author_thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchPlaylist {
    pub title: String,
    pub playlist_id: String,
    pub author: String,
    pub video_count: u64,
}

/// 搜索时附带的 type 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Video,
    Channel,
    Playlist,
    All,
}
