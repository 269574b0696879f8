use async_trait::async_trait;

use super::client::InvidiousClient;
use super::error::ApiError;
use super::models::{
    channel::Channel,
    comment::Comments,
    search::{SearchItem, SearchType},
    video::VideoDetails,
};

// 服务端只依赖这个 trait，方便替换上游
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    async fn search(&self, query: &str, search_type: SearchType)
    -> Result<Vec<SearchItem>, ApiError>;

    async fn video(&self, video_id: &str) -> Result<VideoDetails, ApiError>;

    async fn comments(&self, video_id: &str) -> Result<Comments, ApiError>;

    async fn channel(&self, channel_id: &str) -> Result<Channel, ApiError>;

    fn embed_url(&self, video_id: &str) -> Option<String>;
}

#[async_trait]
impl UpstreamApi for InvidiousClient {
    async fn search(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<Vec<SearchItem>, ApiError> {
        InvidiousClient::search(self, query, search_type).await
    }

    async fn video(&self, video_id: &str) -> Result<VideoDetails, ApiError> {
        InvidiousClient::video(self, video_id).await
    }

    async fn comments(&self, video_id: &str) -> Result<Comments, ApiError> {
        InvidiousClient::comments(self, video_id).await
    }

    async fn channel(&self, channel_id: &str) -> Result<Channel, ApiError> {
        InvidiousClient::channel(self, channel_id).await
    }

    fn embed_url(&self, video_id: &str) -> Option<String> {
        InvidiousClient::embed_url(self, video_id)
    }
}
