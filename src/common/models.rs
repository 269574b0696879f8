use serde::{Deserialize, Serialize};

use crate::common::api::models::video::VideoDetails;
use crate::parser::{Rendition, StreamSelector};

// -----------------------------------------------------------------------------------------------

/// /video_info 返回给前端的视频信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    pub author: String,
    pub thumbnail: String,
    pub embed_url: Option<String>,
    pub formats: Vec<Rendition>, // 带地址的 mp4 / webm
    pub selected_url: Option<String>,
}

impl VideoInfo {
    /// `video_id` 是请求的ID，上游没有返回 videoId 时用它补上
    pub fn from_details(
        video_id: &str,
        details: &VideoDetails,
        selector: &StreamSelector,
        embed_url: Option<String>,
    ) -> Self {
        let selected_url = selector.select_stream(&details.format_streams).into_url();
        let video_id = if details.video_id.is_empty() {
            video_id.to_string()
        } else {
            details.video_id.clone()
        };

        Self {
            video_id,
            title: details.title.clone(),
            author: details.author.clone(),
            thumbnail: details.thumbnail_url().to_string(),
            embed_url,
            formats: details.playable_formats(),
            selected_url,
        }
    }
}
