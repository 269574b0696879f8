use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::ParseError;

// 上游返回的一种编码格式（formatStreams / adaptiveFormats 中的一项）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rendition {
    #[serde(default)]
    pub container: String, // mp4 / webm，大小写按上游原样比较

    #[serde(default)]
    pub quality_label: String, // 720p / 480p，上游自定义

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>, // 可能缺失
}

impl Rendition {
    pub fn new(container: &str, quality_label: &str, url: Option<&str>) -> Self {
        Self {
            container: container.to_string(),
            quality_label: quality_label.to_string(),
            url: url.map(str::to_string),
        }
    }
}

// 清晰度匹配方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityMatch {
    Exact(String), // 精确匹配 qualityLabel
    Any,           // 不限清晰度
}

impl QualityMatch {
    pub fn matches(&self, quality_label: &str) -> bool {
        match self {
            Self::Exact(label) => label == quality_label,
            Self::Any => true,
        }
    }
}

/// 单条偏好规则: (container, quality)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceRule {
    pub container: String,
    pub quality: QualityMatch,
}

impl PreferenceRule {
    pub fn exact(container: &str, quality_label: &str) -> Self {
        Self {
            container: container.to_string(),
            quality: QualityMatch::Exact(quality_label.to_string()),
        }
    }

    pub fn any_quality(container: &str) -> Self {
        Self {
            container: container.to_string(),
            quality: QualityMatch::Any,
        }
    }

    pub fn matches(&self, rendition: &Rendition) -> bool {
        rendition.container == self.container && self.quality.matches(&rendition.quality_label)
    }
}

impl fmt::Display for PreferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quality {
            // 空标签（音频）和字面量 "*" 加引号，避免解析回来变成 Any
            QualityMatch::Exact(label) if needs_quotes(label) => {
                write!(f, "{}:\"{}\"", self.container, label)
            }
            QualityMatch::Exact(label) => write!(f, "{}:{}", self.container, label),
            QualityMatch::Any => write!(f, "{}:*", self.container),
        }
    }
}

fn needs_quotes(label: &str) -> bool {
    label.is_empty() || label == "*" || label.starts_with('"')
}

/// 按优先级从高到低排列的规则列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPreference {
    rules: Vec<PreferenceRule>,
}

impl SelectionPreference {
    pub fn new(rules: Vec<PreferenceRule>) -> Result<Self, ParseError> {
        if rules.is_empty() {
            return Err(ParseError::InvalidPreference("偏好列表为空".to_string()));
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[PreferenceRule] {
        &self.rules
    }
}

impl Default for SelectionPreference {
    // 优先 720p MP4，其次任意 MP4
    fn default() -> Self {
        Self {
            rules: vec![
                PreferenceRule::exact("mp4", "720p"),
                PreferenceRule::any_quality("mp4"),
            ],
        }
    }
}

// 文本格式: "mp4:720p,mp4:*"，省略清晰度等同于 "*"，带引号的标签按原样精确匹配（"mp4:\"\"" 匹配音频）
impl FromStr for SelectionPreference {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (container, quality) = match part.split_once(':') {
                Some((container, quality)) => (container.trim(), quality.trim()),
                None => (part, "*"),
            };

            if container.is_empty() {
                return Err(ParseError::InvalidPreference(format!(
                    "规则缺少容器格式: {}",
                    part
                )));
            }

            let rule = match quality {
                "" | "*" => PreferenceRule::any_quality(container),
                quoted if quoted.len() >= 2 && quoted.starts_with('"') && quoted.ends_with('"') => {
                    PreferenceRule::exact(container, &quoted[1..quoted.len() - 1])
                }
                label => PreferenceRule::exact(container, label),
            };
            rules.push(rule);
        }

        Self::new(rules)
    }
}

impl fmt::Display for SelectionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules = self
            .rules
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}", rules)
    }
}

/// 选择结果；找不到并不是错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    Selected(String),
    NoMatchingRendition,
}

impl SelectionResult {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Selected(url) => Some(url),
            Self::NoMatchingRendition => None,
        }
    }

    pub fn into_url(self) -> Option<String> {
        match self {
            Self::Selected(url) => Some(url),
            Self::NoMatchingRendition => None,
        }
    }
}
