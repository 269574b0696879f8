use std::{
    env, fmt,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::parser::{ParseError, SelectionPreference};

pub const DEFAULT_INSTANCE: &str = "https://lekker.gay";
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_INSTANCES: &str = "IV_MIRROR_INSTANCES";
pub const ENV_PREFERENCE: &str = "IV_MIRROR_PREFERENCE";
pub const ENV_HOST: &str = "IV_MIRROR_HOST";
pub const ENV_PORT: &str = "IV_MIRROR_PORT";
pub const ENV_TIMEOUT: &str = "IV_MIRROR_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} 没有可用的实例地址")]
    NoValidInstances(InstanceKind),

    #[error("无效的监听地址 (需要 IP 地址，例如 127.0.0.1): {0}")]
    InvalidHost(String),

    #[error("无效的端口: {0}")]
    InvalidPort(String),

    #[error("无效的超时时间: {0}")]
    InvalidTimeout(String),

    #[error(transparent)]
    InvalidPreference(#[from] ParseError),
}

/// 实例列表的用途，每种用途单独配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    Search,
    Video,
    Comments,
    Channel,
}

impl InstanceKind {
    pub const ALL: [InstanceKind; 4] = [
        InstanceKind::Search,
        InstanceKind::Video,
        InstanceKind::Comments,
        InstanceKind::Channel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Video => "video",
            Self::Comments => "comments",
            Self::Channel => "channel",
        }
    }

    pub fn env_key(self) -> &'static str {
        match self {
            Self::Search => "IV_MIRROR_SEARCH_INSTANCES",
            Self::Video => "IV_MIRROR_VIDEO_INSTANCES",
            Self::Comments => "IV_MIRROR_COMMENTS_INSTANCES",
            Self::Channel => "IV_MIRROR_CHANNEL_INSTANCES",
        }
    }
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 经过校验的实例地址，按配置顺序保存，末尾不带 '/'
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSet {
    search: Vec<String>,
    video: Vec<String>,
    comments: Vec<String>,
    channel: Vec<String>,
}

impl InstanceSet {
    /// 所有用途共用同一组地址
    pub fn uniform(instances: &[&str]) -> Result<Self, ConfigError> {
        let raw: Vec<String> = instances.iter().map(|s| s.to_string()).collect();
        let mut set = Self::empty();
        for kind in InstanceKind::ALL {
            *set.slot_mut(kind) = validate_list(kind, &raw)?;
        }
        Ok(set)
    }

    fn empty() -> Self {
        Self {
            search: Vec::new(),
            video: Vec::new(),
            comments: Vec::new(),
            channel: Vec::new(),
        }
    }

    pub fn get(&self, kind: InstanceKind) -> &[String] {
        match kind {
            InstanceKind::Search => &self.search,
            InstanceKind::Video => &self.video,
            InstanceKind::Comments => &self.comments,
            InstanceKind::Channel => &self.channel,
        }
    }

    pub fn primary(&self, kind: InstanceKind) -> Option<&str> {
        self.get(kind).first().map(String::as_str)
    }

    fn slot_mut(&mut self, kind: InstanceKind) -> &mut Vec<String> {
        match kind {
            InstanceKind::Search => &mut self.search,
            InstanceKind::Video => &mut self.video,
            InstanceKind::Comments => &mut self.comments,
            InstanceKind::Channel => &mut self.channel,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub instances: InstanceSet,
    pub preference: SelectionPreference,
    pub host: IpAddr,
    pub port: u16,
    pub timeout: Duration,
}

impl MirrorConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// 命令行参数，优先级高于环境变量
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub instances: Vec<String>,
    pub preference: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub timeout_secs: Option<u64>,
}

pub fn load_config(overrides: ConfigOverrides) -> Result<MirrorConfig, ConfigError> {
    resolve_config(overrides, env_var_string)
}

pub fn resolve_config(
    overrides: ConfigOverrides,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<MirrorConfig, ConfigError> {
    let mut instances = InstanceSet::empty();
    for kind in InstanceKind::ALL {
        let raw = if !overrides.instances.is_empty() {
            overrides
                .instances
                .iter()
                .flat_map(|s| split_list(s))
                .collect()
        } else {
            env_lookup(kind.env_key())
                .or_else(|| env_lookup(ENV_INSTANCES))
                .map(|value| split_list(&value))
                .unwrap_or_default()
        };

        let list = if raw.is_empty() {
            debug!("{} 未配置实例，使用默认实例 {}", kind, DEFAULT_INSTANCE);
            vec![DEFAULT_INSTANCE.to_string()]
        } else {
            validate_list(kind, &raw)?
        };
        *instances.slot_mut(kind) = list;
    }

    let preference = match overrides.preference.or_else(|| env_lookup(ENV_PREFERENCE)) {
        Some(text) => text.parse::<SelectionPreference>()?,
        None => SelectionPreference::default(),
    };

    let host = match overrides.host.or_else(|| env_lookup(ENV_HOST)) {
        Some(value) => value
            .trim()
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::InvalidHost(value.clone()))?,
        None => DEFAULT_HOST,
    };

    let port = match overrides.port {
        Some(port) => port,
        None => match env_lookup(ENV_PORT) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => DEFAULT_PORT,
        },
    };

    let timeout_secs = match overrides.timeout_secs {
        Some(secs) => secs,
        None => match env_lookup(ENV_TIMEOUT) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(value.clone()))?,
            None => DEFAULT_TIMEOUT_SECS,
        },
    };
    if timeout_secs == 0 {
        return Err(ConfigError::InvalidTimeout("0".to_string()));
    }

    Ok(MirrorConfig {
        instances,
        preference,
        host,
        port,
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// 校验单个实例地址，返回去掉末尾 '/' 的地址
pub fn validate_instance(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if raw.contains('*') {
        return Err("包含通配符".to_string());
    }

    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("不支持的协议 {}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("缺少主机名".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("不能带查询参数".to_string());
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn validate_list(kind: InstanceKind, raw: &[String]) -> Result<Vec<String>, ConfigError> {
    let mut valid: Vec<String> = Vec::new();
    for entry in raw {
        match validate_instance(entry) {
            Ok(base) if valid.contains(&base) => debug!("跳过重复实例: {}", base),
            Ok(base) => valid.push(base),
            Err(reason) => warn!("忽略无效的 {} 实例 {:?}: {}", kind, entry, reason),
        }
    }

    if valid.is_empty() {
        return Err(ConfigError::NoValidInstances(kind));
    }
    Ok(valid)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_var_string(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
