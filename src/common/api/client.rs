use std::time::Duration;

use reqwest::{
    Client, ClientBuilder, Response,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::ApiError;
use super::models::{
    channel::Channel,
    comment::Comments,
    search::{SearchItem, SearchType},
    video::VideoDetails,
};
use crate::common::config::{InstanceKind, InstanceSet, MirrorConfig};

// 按实例列表顺序依次请求的上游客户端
#[derive(Debug, Clone)]
pub struct InvidiousClient {
    pub inner: Client,
    instances: InstanceSet,
}

impl InvidiousClient {
    pub fn new(instances: InstanceSet, timeout: Duration) -> Result<Self, ApiError> {
        let inner = ClientBuilder::new()
            .timeout(timeout)
            .default_headers(Self::get_default_headers())
            .build()?;
        Ok(Self { inner, instances })
    }

    pub fn from_config(config: &MirrorConfig) -> Result<Self, ApiError> {
        Self::new(config.instances.clone(), config.timeout)
    }

    pub fn get_default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ja-JP,ja;q=0.9,en;q=0.8"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("iv_mirror/", env!("CARGO_PKG_VERSION"))),
        );
        headers
    }

    pub async fn search(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<Vec<SearchItem>, ApiError> {
        let params = serde_urlencoded::to_string([("q", query)])
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let type_param = serde_urlencoded::to_string([("type", search_type)])
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        let path = format!("/api/v1/search?{}&{}", params, type_param);
        self.get(InstanceKind::Search, &path).await
    }

    pub async fn video(&self, video_id: &str) -> Result<VideoDetails, ApiError> {
        let path = format!("/api/v1/videos/{}", urlencoding::encode(video_id));
        self.get(InstanceKind::Video, &path).await
    }

    pub async fn comments(&self, video_id: &str) -> Result<Comments, ApiError> {
        let path = format!("/api/v1/comments/{}", urlencoding::encode(video_id));
        self.get(InstanceKind::Comments, &path).await
    }

    pub async fn channel(&self, channel_id: &str) -> Result<Channel, ApiError> {
        let path = format!("/api/v1/channels/{}", urlencoding::encode(channel_id));
        self.get(InstanceKind::Channel, &path).await
    }

    /// 嵌入播放器地址，使用第一个视频实例
    pub fn embed_url(&self, video_id: &str) -> Option<String> {
        self.instances
            .primary(InstanceKind::Video)
            .map(|base| format!("{}/embed/{}", base, urlencoding::encode(video_id)))
    }

    // 通用请求，失败时换下一个实例
    pub async fn get<T: DeserializeOwned>(
        &self,
        kind: InstanceKind,
        path: &str,
    ) -> Result<T, ApiError> {
        let mut last_error = None;
        for base in self.instances.get(kind) {
            let url = format!("{}{}", base, path);
            debug!("请求上游: {}", url);

            match self.get_once::<T>(&url).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_retryable() => {
                    warn!("实例 {} 请求失败，尝试下一个: {}", base, e);
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        let last = last_error.map(|e| e.to_string()).unwrap_or_default();
        warn!("所有 {} 实例都不可用", kind);
        Err(ApiError::AllInstancesFailed { kind, last })
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let resp = self.inner.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: Self::error_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        let json_value: Value = serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("不是有效的JSON: {}", e))
        })?;

        serde_json::from_value::<T>(json_value)
            .map_err(|e| ApiError::InvalidResponse(format!("解析响应失败: {}", e)))
    }

    // Invidious 出错时返回 {"error": "..."}
    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<Value>(body)
            .ok()?
            .get("error")?
            .as_str()
            .map(str::to_string)
    }
}
