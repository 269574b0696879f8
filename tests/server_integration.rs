#![cfg(feature = "http")]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use reqwest::StatusCode as UpstreamStatus;
use serde_json::{Value, json};
use tower::ServiceExt;

use iv_mirror::common::api::error::ApiError;
use iv_mirror::common::api::models::{
    channel::Channel,
    comment::{Comment, Comments},
    search::{SearchItem, SearchType, SearchVideo},
    video::VideoDetails,
};
use iv_mirror::common::api::upstream::UpstreamApi;
use iv_mirror::common::config::InstanceKind;
use iv_mirror::parser::{Rendition, StreamSelector};
use iv_mirror::server::{AppState, build_router};

// 不走网络的假上游
struct FakeUpstream;

#[async_trait]
impl UpstreamApi for FakeUpstream {
    async fn search(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<Vec<SearchItem>, ApiError> {
        if query == "down" {
            return Err(ApiError::AllInstancesFailed {
                kind: InstanceKind::Search,
                last: "connection refused".to_string(),
            });
        }
        Ok(vec![SearchItem::Video(SearchVideo {
            title: format!("{} ({:?})", query, search_type),
            video_id: "dQw4w9WgXcQ".to_string(),
            ..Default::default()
        })])
    }

    async fn video(&self, video_id: &str) -> Result<VideoDetails, ApiError> {
        match video_id {
            "dQw4w9WgXcQ" => Ok(VideoDetails {
                video_id: video_id.to_string(),
                title: "Never Gonna Give You Up".to_string(),
                format_streams: vec![
                    Rendition::new("mp4", "480p", Some("u1")),
                    Rendition::new("mp4", "720p", Some("u2")),
                ],
                ..Default::default()
            }),
            // 只返回部分字段的实例
            "sparseVid01" => Ok(VideoDetails::default()),
            "webmOnly123" => Ok(VideoDetails {
                video_id: video_id.to_string(),
                format_streams: vec![Rendition::new("webm", "720p", Some("w1"))],
                ..Default::default()
            }),
            _ => Err(ApiError::Status {
                status: UpstreamStatus::NOT_FOUND,
                message: "Video unavailable".to_string(),
            }),
        }
    }

    async fn comments(&self, video_id: &str) -> Result<Comments, ApiError> {
        Ok(Comments {
            comment_count: Some(1),
            video_id: video_id.to_string(),
            comments: vec![Comment {
                author: "@someone".to_string(),
                content: "nice".to_string(),
                ..Default::default()
            }],
            continuation: None,
        })
    }

    async fn channel(&self, channel_id: &str) -> Result<Channel, ApiError> {
        if channel_id == "broken" {
            return Err(ApiError::InvalidResponse("not json".to_string()));
        }
        Ok(Channel {
            author: "Rick Astley".to_string(),
            author_id: channel_id.to_string(),
            sub_count: Some(42),
            ..Default::default()
        })
    }

    fn embed_url(&self, video_id: &str) -> Option<String> {
        Some(format!("https://mirror.example/embed/{}", video_id))
    }
}

fn app() -> axum::Router {
    build_router(AppState::new(Arc::new(FakeUpstream), StreamSelector::default()))
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let resp = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_search_requires_query() {
    let (status, body) = get("/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No search query provided." }));

    let (status, _) = get("/search?q=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_returns_items() {
    let (status, body) = get("/search?q=rick%20astley").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["type"], "video");
    assert_eq!(body[0]["videoId"], "dQw4w9WgXcQ");
    assert_eq!(body[0]["title"], "rick astley (Video)");

    let (_, body) = get("/search?q=rick&type=channel").await;
    assert_eq!(body[0]["title"], "rick (Channel)");
}

#[tokio::test]
async fn test_search_bad_type_is_json_error() {
    let (status, body) = get("/search?q=x&type=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("bogus"), "{}", message);
}

#[tokio::test]
async fn test_search_upstream_failure_is_bad_gateway() {
    let (status, body) = get("/search?q=down").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to fetch search results"), "{}", message);
}

#[tokio::test]
async fn test_video_info_selects_stream() {
    let (status, body) = get("/video_info?id=dQw4w9WgXcQ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Never Gonna Give You Up");
    assert_eq!(body["selectedUrl"], "u2");
    assert_eq!(body["embedUrl"], "https://mirror.example/embed/dQw4w9WgXcQ");
    assert_eq!(body["formats"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_video_info_accepts_url() {
    let uri = "/video_info?url=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ";
    let (status, body) = get(uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["videoId"], "dQw4w9WgXcQ");
}

#[tokio::test]
async fn test_video_info_without_match_has_null_url() {
    let (status, body) = get("/video_info?id=webmOnly123").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["selectedUrl"].is_null());
    assert_eq!(body["formats"][0]["container"], "webm");
}

#[tokio::test]
async fn test_video_info_keeps_requested_id_for_sparse_upstream() {
    let (status, body) = get("/video_info?id=sparseVid01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["videoId"], "sparseVid01");
    assert_eq!(body["embedUrl"], "https://mirror.example/embed/sparseVid01");
    assert!(body["selectedUrl"].is_null());
}

#[tokio::test]
async fn test_video_info_bad_requests() {
    let (status, body) = get("/video_info").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No video URL or ID provided." }));

    let (status, _) = get("/video_info?id=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_video_info_passes_upstream_not_found() {
    let (status, body) = get("/video_info?id=AAAAAAAAAAA").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("Video unavailable"));
}

#[tokio::test]
async fn test_comments() {
    let (status, body) = get("/comments").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No video ID provided." }));

    let (status, body) = get("/comments?id=dQw4w9WgXcQ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["commentCount"], 1);
    assert_eq!(body["comments"][0]["author"], "@someone");
}

#[tokio::test]
async fn test_comments_accepts_video_url() {
    let uri = "/comments?id=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3DdQw4w9WgXcQ";
    let (status, body) = get(uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["videoId"], "dQw4w9WgXcQ");

    let (status, body) = get("/comments?id=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_channel() {
    let (status, body) = get("/channels/UC123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authorId"], "UC123");
    assert_eq!(body["subCount"], 42);

    let (status, _) = get("/channels/broken").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_healthz() {
    let (status, body) = get("/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
