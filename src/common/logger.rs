use colored::*;

/// 命令行的彩色输出
pub struct PrettyLogger;

impl PrettyLogger {
    /// 显示信息消息
    pub fn info(message: impl AsRef<str>) {
        println!("{} {}", "ℹ".blue().bold(), message.as_ref());
    }

    /// 显示警告消息
    pub fn warning(message: impl AsRef<str>) {
        println!("{} {}", "⚠".yellow().bold(), message.as_ref());
    }

    /// 显示错误消息
    pub fn error(message: impl AsRef<str>) {
        eprintln!("{} {}", "✗".red().bold(), message.as_ref());
    }

    /// 显示分割线
    pub fn separator() {
        println!("{}", "─".repeat(50).bright_black());
    }

    /// 显示标题
    pub fn title(text: impl AsRef<str>) {
        let text = text.as_ref();
        let width = text.chars().count().min(48);
        let padding = (48 - width) / 2;
        println!(
            "{} {} {}",
            "─".repeat(padding).bright_black(),
            text.bold(),
            "─".repeat(48 - padding - width).bright_black()
        );
    }

    /// 显示视频信息
    pub fn video_info(title: impl AsRef<str>, author: impl AsRef<str>) {
        println!(
            "{} {} ({})",
            "🎬".magenta().bold(),
            title.as_ref().bold(),
            author.as_ref().cyan()
        );
    }

    /// 显示一个字段
    pub fn field(label: impl AsRef<str>, value: impl AsRef<str>) {
        println!("   {}: {}", label.as_ref().bright_black(), value.as_ref());
    }

    /// 显示选中的播放地址
    pub fn stream(quality: impl AsRef<str>, url: impl AsRef<str>) {
        println!("{} {} {}", "▶".cyan().bold(), quality.as_ref().green(), url.as_ref());
    }

    /// 显示一条评论
    pub fn comment(author: impl AsRef<str>, date: impl AsRef<str>, content: impl AsRef<str>) {
        println!(
            "{} {} ({})",
            "💬".blue().bold(),
            author.as_ref().bold(),
            date.as_ref().bright_black()
        );
        for line in content.as_ref().lines() {
            println!("   {}", line);
        }
    }

    /// 显示频道信息
    pub fn channel(name: impl AsRef<str>, details: impl AsRef<str>) {
        println!("{} {} - {}", "👤".green().bold(), name.as_ref().bold(), details.as_ref());
    }

    /// 显示等待消息
    pub fn waiting(message: impl AsRef<str>) {
        println!("{} {}", "⏳".yellow().bold(), message.as_ref());
    }
}

/// 便捷宏用于漂亮的日志输出
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::warning(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::error(format!($($arg)*))
    };
}
