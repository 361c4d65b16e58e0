//! Telegram Notify - CI/CD 构建通知插件
//!
//! 这是一个用Rust编写的 CI/CD 流水线通知工具，支持：
//! - Telegram Bot API 文本与附件消息
//! - Handlebars 消息模板渲染
//! - 按提交作者邮箱过滤接收者
//! - glob 模式解析附件文件
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod notification;
pub mod resolve;

// 重新导出主要类型
pub use config::{Config, MessageFormat};
pub use context::MessageContext;
pub use dispatch::Dispatcher;
pub use error::TelegramNotifyError;

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
