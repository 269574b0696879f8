use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// /api/v1/comments/{id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comments {
    pub comment_count: Option<u64>,
    pub video_id: String,
    pub comments: Vec<Comment>,
    pub continuation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub author: String,
    pub author_id: String,
    pub content: String,
    pub published: i64,
    pub published_text: String,
    pub like_count: u64,
}

impl Comment {
    /// 发布日期，时间戳缺失时退回上游给的相对时间文本
    pub fn published_date(&self) -> String {
        if self.published > 0 {
            if let Some(dt) = DateTime::from_timestamp(self.published, 0) {
                return dt.format("%Y-%m-%d").to_string();
            }
        }
        self.published_text.clone()
    }
}
