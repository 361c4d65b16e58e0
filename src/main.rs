//! Telegram Notify 主程序入口
//!
//! CI/CD 流水线构建通知插件

use anyhow::{Context, Result};
use telegram_notify::cli::Args;
use telegram_notify::config::env::{apply_env_aliases, load_env_files};
use telegram_notify::dispatch::Dispatcher;
use telegram_notify::logging::{LogConfig, LoggingSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // 解析参数前先加载 env 文件并归一环境变量别名
    load_env_files();
    apply_env_aliases();

    // 解析命令行参数
    let args = Args::parse_args();

    // 初始化日志系统
    let log_config = LogConfig {
        level: args.effective_log_level(),
        console: true,
        json_format: false,
    };

    let _logging_system =
        LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!("Telegram Notify v{} 启动", telegram_notify::VERSION);

    // 执行通知发送
    let dispatcher = Dispatcher::new(args.to_config(), args.to_context());
    if let Err(e) = dispatcher.run().await {
        error!("通知发送失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
