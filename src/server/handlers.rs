use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::AppState;
use super::error::{ServerError, ServerResult};
use crate::common::api::models::{
    channel::Channel,
    comment::Comments,
    search::{SearchItem, SearchType},
};
use crate::common::models::VideoInfo;
use crate::parser::parse_video_ref;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default, rename = "type")]
    pub search_type: Option<SearchType>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoInfoParams {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentsParams {
    #[serde(default)]
    pub id: String,
}

pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ServerResult<Json<Vec<SearchItem>>> {
    let Query(params) = params?;
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ServerError::bad_request("No search query provided."));
    }

    info!("搜索: {}", query);
    let items = state
        .upstream
        .search(query, params.search_type.unwrap_or_default())
        .await
        .map_err(ServerError::upstream("Failed to fetch search results"))?;
    debug!("搜索结果 {} 条", items.len());
    Ok(Json(items))
}

pub async fn video_info(
    State(state): State<AppState>,
    params: Result<Query<VideoInfoParams>, QueryRejection>,
) -> ServerResult<Json<VideoInfo>> {
    let Query(params) = params?;
    // url 优先，和 id 二选一
    let reference = if !params.url.trim().is_empty() {
        params.url.trim()
    } else {
        params.id.trim()
    };
    if reference.is_empty() {
        return Err(ServerError::bad_request("No video URL or ID provided."));
    }

    let video_id =
        parse_video_ref(reference).map_err(|e| ServerError::bad_request(e.to_string()))?;

    info!("获取视频信息: {}", video_id);
    let details = state
        .upstream
        .video(&video_id)
        .await
        .map_err(ServerError::upstream("Failed to get video info"))?;

    let info = VideoInfo::from_details(
        &video_id,
        &details,
        &state.selector,
        state.upstream.embed_url(&video_id),
    );
    if info.selected_url.is_none() {
        debug!("{} 没有符合偏好的播放地址", video_id);
    }
    Ok(Json(info))
}

pub async fn comments(
    State(state): State<AppState>,
    params: Result<Query<CommentsParams>, QueryRejection>,
) -> ServerResult<Json<Comments>> {
    let Query(params) = params?;
    let reference = params.id.trim();
    if reference.is_empty() {
        return Err(ServerError::bad_request("No video ID provided."));
    }
    let video_id =
        parse_video_ref(reference).map_err(|e| ServerError::bad_request(e.to_string()))?;

    let comments = state
        .upstream
        .comments(&video_id)
        .await
        .map_err(ServerError::upstream("Failed to fetch comments"))?;
    Ok(Json(comments))
}

pub async fn channel(
    State(state): State<AppState>,
    channel_id: Result<Path<String>, PathRejection>,
) -> ServerResult<Json<Channel>> {
    let Path(channel_id) = channel_id?;
    let channel = state
        .upstream
        .channel(channel_id.trim())
        .await
        .map_err(ServerError::upstream("Failed to fetch channel"))?;
    Ok(Json(channel))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
