use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("无效的视频ID或链接: {0}")]
    InvalidVideoRef(String),
    #[error("无效的格式偏好: {0}")]
    InvalidPreference(String),
}
