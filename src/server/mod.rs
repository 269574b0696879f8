//! 只读镜像的 HTTP 服务
//!
//! 把原来几个重复的后端合并成一个，全部返回 JSON。

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, routing::get};
use tokio::signal;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::common::api::client::InvidiousClient;
use crate::common::api::upstream::UpstreamApi;
use crate::common::config::MirrorConfig;
use crate::parser::StreamSelector;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn UpstreamApi>,
    pub selector: Arc<StreamSelector>,
}

impl AppState {
    pub fn new(upstream: Arc<dyn UpstreamApi>, selector: StreamSelector) -> Self {
        Self {
            upstream,
            selector: Arc::new(selector),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(handlers::search))
        .route("/video_info", get(handlers::video_info))
        .route("/comments", get(handlers::comments))
        .route("/channels/{id}", get(handlers::channel))
        .route("/healthz", get(handlers::healthz))
        // 前端页面会跨域请求
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(config: MirrorConfig) -> anyhow::Result<()> {
    let client = InvidiousClient::from_config(&config).context("创建上游客户端失败")?;
    let state = AppState::new(
        Arc::new(client),
        StreamSelector::new(config.preference.clone()),
    );
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法监听 {}", addr))?;
    info!("服务已启动: http://{}", addr);
    info!("格式偏好: {}", config.preference);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务运行失败")?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("无法监听 Ctrl+C: {}", e);
    }
}
