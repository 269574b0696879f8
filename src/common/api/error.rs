use reqwest::StatusCode;
use thiserror::Error;

use crate::common::config::InstanceKind;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("上游返回 {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("所有 {kind} 实例均请求失败，最后一个错误: {last}")]
    AllInstancesFailed { kind: InstanceKind, last: String },
}

impl ApiError {
    /// 换一个实例可能会成功的错误
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Reqwest(_) | Self::InvalidResponse(_) => true,
            Self::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
