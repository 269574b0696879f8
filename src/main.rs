use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use iv_mirror::cli::{Cli, Command};
use iv_mirror::common::api::client::InvidiousClient;
use iv_mirror::common::config::{MirrorConfig, load_config};
use iv_mirror::common::logger::PrettyLogger;
use iv_mirror::common::models::VideoInfo;
use iv_mirror::common::utils::{format_count, format_duration, format_optional_count};
use iv_mirror::parser::{StreamSelector, parse_video_ref};
use iv_mirror::{log_error, log_info, log_warning};

/// 没有给关键词时从标准输入读取
async fn prompt_query() -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all("搜索关键词: ".as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("读取输入失败")?;
    Ok(line.trim().to_string())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_search(client: &InvidiousClient, query: Option<String>, json: bool) -> Result<()> {
    let query = match query {
        Some(q) => q.trim().to_string(),
        None => prompt_query().await?,
    };
    if query.is_empty() {
        bail!("请输入搜索关键词");
    }

    info!("搜索: {}", query);
    let items = client.search(&query, Default::default()).await?;
    if json {
        return print_json(&items);
    }

    let videos: Vec<_> = items.iter().filter_map(|item| item.as_video()).collect();
    if videos.is_empty() {
        log_warning!("没有找到视频: {}", query);
        return Ok(());
    }

    PrettyLogger::title(format!("搜索结果: {}", query));
    for video in videos {
        PrettyLogger::video_info(&video.title, &video.author);
        PrettyLogger::field("ID", &video.video_id);
        PrettyLogger::field("时长", format_duration(video.length_seconds));
        PrettyLogger::field("播放", format_count(video.view_count));
        PrettyLogger::field("缩略图", video.thumbnail_url());
    }
    PrettyLogger::separator();
    Ok(())
}

async fn run_video(
    client: &InvidiousClient,
    selector: &StreamSelector,
    reference: &str,
    json: bool,
) -> Result<()> {
    let video_id = parse_video_ref(reference)?;
    debug!("视频ID: {}", video_id);

    PrettyLogger::waiting(format!("正在获取 {} ...", video_id));
    let details = client.video(&video_id).await?;
    let info = VideoInfo::from_details(&video_id, &details, selector, client.embed_url(&video_id));
    if json {
        return print_json(&info);
    }

    PrettyLogger::video_info(&info.title, &info.author);
    PrettyLogger::field("播放", format_count(details.view_count));
    PrettyLogger::field("时长", format_duration(details.length_seconds));
    PrettyLogger::field("缩略图", &info.thumbnail);
    for format in &info.formats {
        let label = if format.quality_label.is_empty() {
            "audio"
        } else {
            format.quality_label.as_str()
        };
        PrettyLogger::field(format!("{} {}", format.container, label), "可用");
    }

    match &info.selected_url {
        Some(url) => PrettyLogger::stream(selector.preference().to_string(), url),
        None => log_warning!("没有符合 {} 的播放地址", selector.preference()),
    }
    if let Some(embed) = &info.embed_url {
        PrettyLogger::field("嵌入", embed);
    }
    Ok(())
}

async fn run_comments(client: &InvidiousClient, video: &str, json: bool) -> Result<()> {
    let video_id = parse_video_ref(video)?;
    let comments = client.comments(&video_id).await?;
    if json {
        return print_json(&comments);
    }

    if comments.comments.is_empty() {
        log_info!("没有评论");
        return Ok(());
    }

    PrettyLogger::title(format!("评论: {}", video_id));
    for comment in &comments.comments {
        PrettyLogger::comment(&comment.author, comment.published_date(), &comment.content);
    }
    PrettyLogger::separator();
    if let Some(total) = comments.comment_count {
        log_info!("共 {} 条评论", format_count(total));
    }
    Ok(())
}

async fn run_channel(client: &InvidiousClient, channel_id: &str, json: bool) -> Result<()> {
    let channel = client.channel(channel_id.trim()).await?;
    if json {
        return print_json(&channel);
    }

    PrettyLogger::channel(&channel.author, &channel.author_id);
    PrettyLogger::field("订阅", format_optional_count(channel.sub_count));
    PrettyLogger::field("总播放", format_optional_count(channel.total_views));
    PrettyLogger::field("头像", channel.icon_url());
    if !channel.description.is_empty() {
        PrettyLogger::field("简介", &channel.description);
    }
    Ok(())
}

#[cfg(feature = "http")]
async fn run_serve(config: MirrorConfig) -> Result<()> {
    iv_mirror::server::run_server(config).await
}

#[cfg(not(feature = "http"))]
async fn run_serve(_config: MirrorConfig) -> Result<()> {
    bail!("编译时未启用 http 功能")
}

async fn run(args: Cli) -> Result<()> {
    let config = load_config(args.config_overrides())?;
    debug!("配置: {:?}", config);

    // serve 自己创建客户端，其余命令按需创建
    let client = || InvidiousClient::from_config(&config);
    let selector = StreamSelector::new(config.preference.clone());

    match args.command {
        Command::Serve { .. } => run_serve(config).await,
        Command::Search { query, json } => run_search(&client()?, query, json).await,
        Command::Video { video, json } => run_video(&client()?, &selector, &video, json).await,
        Command::Comments { video, json } => run_comments(&client()?, &video, json).await,
        Command::Channel { channel, json } => run_channel(&client()?, &channel, json).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // 初始化日志
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => debug!("完成"),
        Err(e) => {
            log_error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
