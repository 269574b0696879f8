use super::errors::ParseError;
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref VIDEO_ID_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();
    // 路径形式: /embed/ID, /shorts/ID, /live/ID, /v/ID
    static ref PATH_PATTERN: Regex =
        Regex::new(r"^/(?:embed|shorts|live|v)/([A-Za-z0-9_-]{11})(?:/|$)").unwrap();
}

/// 把用户输入的视频ID或链接统一转换成视频ID
pub fn parse_video_ref(input: &str) -> Result<String, ParseError> {
    let input = input.trim();

    if VIDEO_ID_PATTERN.is_match(input) {
        return Ok(input.to_string());
    }

    let url = Url::parse(input).map_err(|_| ParseError::InvalidVideoRef(input.to_string()))?;
    extract_from_url(&url).ok_or_else(|| ParseError::InvalidVideoRef(input.to_string()))
}

fn extract_from_url(url: &Url) -> Option<String> {
    // watch?v=ID，镜像实例的链接也是这个格式
    if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
        if VIDEO_ID_PATTERN.is_match(&v) {
            return Some(v.into_owned());
        }
    }

    // 短链接 youtu.be/ID
    if url.host_str() == Some("youtu.be") {
        let id = url.path().trim_start_matches('/').split('/').next()?;
        return VIDEO_ID_PATTERN.is_match(id).then(|| id.to_string());
    }

    PATH_PATTERN
        .captures(url.path())
        .map(|caps| caps[1].to_string())
}
