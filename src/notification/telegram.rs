//! Telegram通知发送器模块
//!
//! 通过 Telegram Bot API 发送文本、附件与位置消息

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, SendError};
use crate::notification::sender::{NotificationSender, TextPayload};
use crate::resolve::Location;

/// Telegram Bot API 基础地址
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Bot API 统一响应结构
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

/// 机器人账号信息，来自 `getMe`
#[derive(Debug, Deserialize)]
pub struct BotProfile {
    /// 机器人ID
    pub id: i64,
    /// 机器人用户名
    #[serde(default)]
    pub username: String,
    /// 机器人显示名称
    #[serde(default)]
    pub first_name: String,
}

/// 发送成功后返回的消息摘要
#[derive(Debug, Deserialize)]
struct SentMessage {
    message_id: i64,
}

/// Telegram通知发送器
pub struct TelegramSender {
    /// HTTP客户端
    client: Client,
    /// 机器人 token
    token: String,
    /// API 基础地址，测试时可替换
    api_base: String,
}

impl TelegramSender {
    /// 创建新的Telegram发送器
    ///
    /// # 参数
    /// * `config` - 插件配置（token 与可选的 SOCKS5 代理地址）
    ///
    /// # 返回
    /// * `Result<Self>` - 发送器实例
    pub fn new(config: &Config) -> crate::error::Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION));

        if !config.socks5.is_empty() {
            let proxy =
                reqwest::Proxy::all(&config.socks5).map_err(|e| ConfigError::InvalidProxy {
                    url: config.socks5.clone(),
                    reason: e.to_string(),
                })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("创建HTTP客户端失败")?;

        Ok(Self {
            client,
            token: config.token.clone(),
            api_base: TELEGRAM_API_BASE.to_string(),
        })
    }

    /// 覆盖 API 基础地址（测试用）
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// 创建发送器并通过 `getMe` 验证凭据
    ///
    /// # 参数
    /// * `config` - 插件配置
    ///
    /// # 返回
    /// * `Result<Self>` - 已认证的发送器实例
    pub async fn connect(config: &Config) -> crate::error::Result<Self> {
        let sender = Self::new(config)?;
        let profile = sender.get_me().await?;
        info!("Telegram 机器人认证成功: @{}", profile.username);

        Ok(sender)
    }

    /// 查询机器人账号信息
    pub async fn get_me(&self) -> Result<BotProfile, SendError> {
        let url = self.method_url("getMe");
        self.execute(self.client.get(&url)).await
    }

    /// 拼接 API 方法地址
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// 把文本中的 token 替换为 `<token>`
    fn redact(&self, text: &str) -> String {
        if self.token.is_empty() {
            return text.to_string();
        }

        text.replace(&self.token, "<token>")
    }

    /// 发起请求并解析 Bot API 响应
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SendError> {
        let response = request
            .send()
            .await
            .map_err(|e| SendError::HttpError(self.redact(&e.to_string())))?;

        let body = response
            .text()
            .await
            .map_err(|e| SendError::HttpError(self.redact(&e.to_string())))?;
        debug!("Telegram API 响应: {}", self.redact(&body));

        let parsed: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|e| SendError::ApiError(self.redact(&format!("响应解析失败: {e}"))))?;

        if !parsed.ok {
            let description = parsed
                .description
                .unwrap_or_else(|| "未知错误".to_string());
            return Err(SendError::ApiError(self.redact(&description)));
        }

        parsed
            .result
            .ok_or_else(|| SendError::ApiError("响应缺少 result 字段".to_string()))
    }

    /// 发送 JSON 请求体的消息方法
    async fn send_json(&self, method: &str, body: &Value) -> Result<(), SendError> {
        let url = self.method_url(method);
        let sent: SentMessage = self.execute(self.client.post(&url).json(body)).await?;
        debug!("{} 发送成功: message_id={}", method, sent.message_id);

        Ok(())
    }

    /// 以 multipart 表单上传本地文件
    ///
    /// # 参数
    /// * `method` - Bot API 方法名
    /// * `field` - 文件字段名
    /// * `chat_id` - 会话ID
    /// * `path` - 本地文件路径
    /// * `extra` - 附加文本字段
    async fn upload(
        &self,
        method: &str,
        field: &'static str,
        chat_id: i64,
        path: &str,
        extra: &[(&'static str, String)],
    ) -> Result<(), SendError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SendError::AttachmentError {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let file_name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());

        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part(field, Part::bytes(bytes).file_name(file_name));
        for (key, value) in extra {
            form = form.text(*key, value.clone());
        }

        let url = self.method_url(method);
        let sent: SentMessage = self.execute(self.client.post(&url).multipart(form)).await?;
        debug!("{} 发送成功: message_id={}", method, sent.message_id);

        Ok(())
    }
}

#[async_trait]
impl NotificationSender for TelegramSender {
    async fn send_text(&self, chat_id: i64, payload: &TextPayload) -> Result<(), SendError> {
        let body = json!({
            "chat_id": chat_id,
            "text": payload.text,
            "parse_mode": payload.format.as_parse_mode(),
            "disable_web_page_preview": payload.disable_web_page_preview,
            "disable_notification": payload.disable_notification,
        });

        self.send_json("sendMessage", &body).await
    }

    async fn send_photo(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.upload("sendPhoto", "photo", chat_id, path, &[]).await
    }

    async fn send_document(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.upload("sendDocument", "document", chat_id, path, &[])
            .await
    }

    async fn send_sticker(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.upload("sendSticker", "sticker", chat_id, path, &[])
            .await
    }

    async fn send_audio(&self, chat_id: i64, path: &str, title: &str) -> Result<(), SendError> {
        self.upload(
            "sendAudio",
            "audio",
            chat_id,
            path,
            &[("title", title.to_string())],
        )
        .await
    }

    async fn send_voice(&self, chat_id: i64, path: &str) -> Result<(), SendError> {
        self.upload("sendVoice", "voice", chat_id, path, &[]).await
    }

    async fn send_video(&self, chat_id: i64, path: &str, caption: &str) -> Result<(), SendError> {
        self.upload(
            "sendVideo",
            "video",
            chat_id,
            path,
            &[("caption", caption.to_string())],
        )
        .await
    }

    async fn send_location(&self, chat_id: i64, location: &Location) -> Result<(), SendError> {
        let body = json!({
            "chat_id": chat_id,
            "latitude": location.latitude,
            "longitude": location.longitude,
        });

        self.send_json("sendLocation", &body).await
    }

    async fn send_venue(&self, chat_id: i64, location: &Location) -> Result<(), SendError> {
        let body = json!({
            "chat_id": chat_id,
            "latitude": location.latitude,
            "longitude": location.longitude,
            "title": location.title,
            "address": location.address,
        });

        self.send_json("sendVenue", &body).await
    }
}
