//! 通知模块
//!
//! 提供 Telegram 通知发送与消息模板功能

pub mod message;
pub mod sender;
pub mod telegram;
pub mod template;

// 重新导出主要类型
pub use sender::{NotificationSender, TextPayload};
pub use telegram::TelegramSender;
pub use template::TemplateEngine;
