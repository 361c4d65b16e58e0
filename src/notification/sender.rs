//! 通知发送器模块
//!
//! 定义通知发送的trait和基础实现

use async_trait::async_trait;

use crate::config::MessageFormat;
use crate::error::SendError;
use crate::resolve::Location;

/// 文本消息载荷
#[derive(Debug, Clone)]
pub struct TextPayload {
    /// 消息文本
    pub text: String,
    /// 解析格式
    pub format: MessageFormat,
    /// 是否关闭链接预览
    pub disable_web_page_preview: bool,
    /// 是否静默推送
    pub disable_notification: bool,
}

/// 通知发送器trait
///
/// 所有方法按 chat_id 发送单条内容，失败时返回 [`SendError`]。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 发送文本消息
    ///
    /// # 参数
    /// * `chat_id` - 会话ID
    /// * `payload` - 文本载荷
    ///
    /// # 返回
    /// * `Result<(), SendError>` - 发送结果
    async fn send_text(&self, chat_id: i64, payload: &TextPayload) -> Result<(), SendError>;

    /// 发送图片附件
    async fn send_photo(&self, chat_id: i64, path: &str) -> Result<(), SendError>;

    /// 发送文档附件
    async fn send_document(&self, chat_id: i64, path: &str) -> Result<(), SendError>;

    /// 发送贴纸附件
    async fn send_sticker(&self, chat_id: i64, path: &str) -> Result<(), SendError>;

    /// 发送音频附件，附带固定标题
    async fn send_audio(&self, chat_id: i64, path: &str, title: &str) -> Result<(), SendError>;

    /// 发送语音附件
    async fn send_voice(&self, chat_id: i64, path: &str) -> Result<(), SendError>;

    /// 发送视频附件，附带固定说明文字
    async fn send_video(&self, chat_id: i64, path: &str, caption: &str) -> Result<(), SendError>;

    /// 发送位置消息
    async fn send_location(&self, chat_id: i64, location: &Location) -> Result<(), SendError>;

    /// 发送地点消息（带标题与地址的位置）
    async fn send_venue(&self, chat_id: i64, location: &Location) -> Result<(), SendError>;
}

/// 空的通知发送器实现（用于测试）
pub struct NoOpSender;

#[async_trait]
impl NotificationSender for NoOpSender {
    async fn send_text(&self, _chat_id: i64, _payload: &TextPayload) -> Result<(), SendError> {
        // 不执行任何操作
        Ok(())
    }

    async fn send_photo(&self, _chat_id: i64, _path: &str) -> Result<(), SendError> {
        Ok(())
    }

    async fn send_document(&self, _chat_id: i64, _path: &str) -> Result<(), SendError> {
        Ok(())
    }

    async fn send_sticker(&self, _chat_id: i64, _path: &str) -> Result<(), SendError> {
        Ok(())
    }

    async fn send_audio(&self, _chat_id: i64, _path: &str, _title: &str) -> Result<(), SendError> {
        Ok(())
    }

    async fn send_voice(&self, _chat_id: i64, _path: &str) -> Result<(), SendError> {
        Ok(())
    }

    async fn send_video(
        &self,
        _chat_id: i64,
        _path: &str,
        _caption: &str,
    ) -> Result<(), SendError> {
        Ok(())
    }

    async fn send_location(&self, _chat_id: i64, _location: &Location) -> Result<(), SendError> {
        Ok(())
    }

    async fn send_venue(&self, _chat_id: i64, _location: &Location) -> Result<(), SendError> {
        Ok(())
    }
}
