use clap::{Parser, Subcommand};

use crate::common::config::ConfigOverrides;

/// Invidious 只读镜像
#[derive(Parser, Debug)]
#[command(name = "ivmirror")]
#[command(version)]
#[command(author = "rpeng252@gmail.com")]
#[command(about = "Invidious 只读镜像服务与视频信息查询工具", long_about = None)]
pub struct Cli {
    /// 上游实例地址，可重复指定，覆盖所有用途的实例列表
    #[arg(long = "instance", value_name = "URL", global = true)]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub instances: Vec<String>,

    /// 格式偏好，例如 mp4:720p,mp4:*
    #[arg(long, value_name = "RULES", global = true)]
    pub prefer: Option<String>,

    /// 请求超时（秒）
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 启动 HTTP 服务
    Serve {
        /// 监听地址
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// 监听端口
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// 搜索视频，不提供关键词时从标准输入读取
    Search {
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// 输出原始 JSON
        #[arg(long)]
        json: bool,
    },

    /// 查看视频信息和播放地址
    Video {
        /// 视频ID或链接
        #[arg(value_name = "ID_OR_URL")]
        video: String,

        #[arg(long)]
        json: bool,
    },

    /// 查看视频评论
    Comments {
        #[arg(value_name = "VIDEO_ID")]
        video: String,

        #[arg(long)]
        json: bool,
    },

    /// 查看频道信息
    Channel {
        #[arg(value_name = "CHANNEL_ID")]
        channel: String,

        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        let (host, port) = match &self.command {
            Command::Serve { host, port } => (host.clone(), *port),
            _ => (None, None),
        };

        ConfigOverrides {
            instances: self.instances.clone(),
            preference: self.prefer.clone(),
            host,
            port,
            timeout_secs: self.timeout,
        }
    }
}
