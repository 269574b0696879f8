use serde::{Deserialize, Serialize};

use super::common::{PLACEHOLDER_CHANNEL_ICON, Thumbnail, first_thumbnail};

/// /api/v1/channels/{id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Channel {
    pub author: String,
    pub author_id: String,
    pub sub_count: Option<u64>,
    #[serde(alias = "viewCount")]
    pub total_views: Option<u64>,
    pub description: String,
    pub description_html: String,
    pub author_thumbnails: Vec<Thumbnail>,
}

impl Channel {
    pub fn icon_url(&self) -> &str {
        first_thumbnail(&self.author_thumbnails, PLACEHOLDER_CHANNEL_ICON)
    }
}
