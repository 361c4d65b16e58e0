//! 通知分发模块
//!
//! 解析接收者与附件，渲染消息模板，并按顺序发送全部通知

use std::collections::HashMap;
use std::fs;

use serde_json::json;
use tracing::{debug, info};

use crate::config::{validate_config, Config, MessageFormat};
use crate::context::MessageContext;
use crate::error::{ConfigError, Result, TelegramNotifyError};
use crate::notification::message;
use crate::notification::sender::{NotificationSender, TextPayload};
use crate::notification::{TelegramSender, TemplateEngine};
use crate::resolve::{
    escape_markdown, parse_location, resolve_patterns, resolve_recipients, trim_elements, Location,
};

/// 音频附件的固定标题
const AUDIO_TITLE: &str = "Audio Message.";
/// 视频附件的固定说明文字
const VIDEO_CAPTION: &str = "Video Message";

/// 发送前准备好的消息内容
struct Prepared {
    /// 待渲染的消息行
    lines: Vec<String>,
    /// 实际生效的消息格式
    format: MessageFormat,
    /// 自定义模板变量
    tpl: HashMap<String, String>,
}

/// 通知分发器
///
/// 持有插件配置与流水线上下文，驱动从校验到发送的完整流程。
pub struct Dispatcher {
    /// 插件配置
    config: Config,
    /// 流水线上下文
    context: MessageContext,
}

impl Dispatcher {
    /// 创建新的分发器
    ///
    /// # 参数
    /// * `config` - 插件配置
    /// * `context` - 流水线上下文
    pub fn new(config: Config, context: MessageContext) -> Self {
        Self { config, context }
    }

    /// 执行完整的通知流程
    ///
    /// 校验配置、加载消息与模板变量，认证机器人后依次发送。
    /// 任何一步失败立即返回错误，后续发送全部跳过。
    pub async fn run(&self) -> Result<()> {
        let prepared = self.prepare()?;
        let sender = TelegramSender::connect(&self.config).await?;

        self.deliver(&sender, prepared).await
    }

    /// 使用外部提供的发送器执行通知流程（测试用）
    pub async fn run_with(&self, sender: &dyn NotificationSender) -> Result<()> {
        let prepared = self.prepare()?;

        self.deliver(sender, prepared).await
    }

    /// 校验配置并加载消息内容与模板变量
    fn prepare(&self) -> Result<Prepared> {
        validate_config(&self.config)?;

        let (lines, format) = self.load_message()?;
        let tpl = self.load_template_vars()?;

        Ok(Prepared { lines, format, tpl })
    }

    /// 加载消息内容
    ///
    /// 优先级：消息文件 > 内联消息 > 默认消息。
    /// 使用默认消息时格式强制为 Markdown。
    fn load_message(&self) -> Result<(Vec<String>, MessageFormat)> {
        if !self.config.message_file.is_empty() {
            let content = fs::read_to_string(&self.config.message_file).map_err(|source| {
                TelegramNotifyError::Io {
                    path: self.config.message_file.clone(),
                    source,
                }
            })?;
            return Ok((vec![content], self.config.format));
        }

        if !self.config.message.is_empty() {
            return Ok((vec![self.config.message.clone()], self.config.format));
        }

        Ok((
            message::compose_default(&self.context, self.config.github),
            MessageFormat::Markdown,
        ))
    }

    /// 加载自定义模板变量
    ///
    /// 内联 JSON 与变量文件都会被解析，文件中的条目覆盖内联条目。
    fn load_template_vars(&self) -> Result<HashMap<String, String>> {
        let mut vars: HashMap<String, String> = HashMap::new();

        if !self.config.template_vars.is_empty() {
            let inline: HashMap<String, String> = serde_json::from_str(&self.config.template_vars)
                .map_err(|e| ConfigError::InvalidTemplateVars {
                    source_name: self.config.template_vars.clone(),
                    reason: e.to_string(),
                })?;
            vars.extend(inline);
        }

        if !self.config.template_vars_file.is_empty() {
            let content =
                fs::read_to_string(&self.config.template_vars_file).map_err(|source| {
                    TelegramNotifyError::Io {
                        path: self.config.template_vars_file.clone(),
                        source,
                    }
                })?;
            let from_file: HashMap<String, String> = serde_json::from_str(&content).map_err(|e| {
                ConfigError::InvalidTemplateVars {
                    source_name: self.config.template_vars_file.clone(),
                    reason: e.to_string(),
                }
            })?;
            vars.extend(from_file);
        }

        Ok(vars)
    }

    /// 解析接收者与附件并依次发送全部通知
    async fn deliver(&self, sender: &dyn NotificationSender, prepared: Prepared) -> Result<()> {
        let recipients = resolve_recipients(
            &self.config.to,
            &self.context.commit.email,
            self.config.match_email,
        );

        let photos = resolve_patterns(&self.config.photo);
        let documents = resolve_patterns(&self.config.document);
        let stickers = resolve_patterns(&self.config.sticker);
        let audios = resolve_patterns(&self.config.audio);
        let voices = resolve_patterns(&self.config.voice);
        let videos = resolve_patterns(&self.config.video);

        let locations: Vec<Location> = trim_elements(&self.config.location)
            .iter()
            .filter_map(|value| parse_location(value))
            .collect();
        let venues: Vec<Location> = trim_elements(&self.config.venue)
            .iter()
            .filter_map(|value| parse_location(value))
            .collect();

        let mut lines = trim_elements(&prepared.lines);
        let mut context = self.context.clone();
        if prepared.format == MessageFormat::Markdown {
            lines = escape_markdown(&lines);
            context.escape_markdown_fields();
        }

        let engine = TemplateEngine::new();
        let data = json!({
            "repo": context.repo,
            "commit": context.commit,
            "build": context.build,
            "github": context.github,
            "tpl": prepared.tpl,
        });

        for chat_id in &recipients {
            for line in &lines {
                let rendered = engine.render_trim(line, &data)?;
                let text = html_escape::decode_html_entities(&rendered).into_owned();
                debug!(
                    "发送文本消息: chat_id={}, format={}",
                    chat_id, prepared.format
                );

                let payload = TextPayload {
                    text,
                    format: prepared.format,
                    disable_web_page_preview: self.config.disable_web_page_preview,
                    disable_notification: self.config.disable_notification,
                };
                sender.send_text(*chat_id, &payload).await?;
            }

            for path in &photos {
                sender.send_photo(*chat_id, path).await?;
            }

            for path in &documents {
                sender.send_document(*chat_id, path).await?;
            }

            for path in &stickers {
                sender.send_sticker(*chat_id, path).await?;
            }

            for path in &audios {
                sender.send_audio(*chat_id, path, AUDIO_TITLE).await?;
            }

            for path in &voices {
                sender.send_voice(*chat_id, path).await?;
            }

            for path in &videos {
                sender.send_video(*chat_id, path, VIDEO_CAPTION).await?;
            }

            for location in &locations {
                sender.send_location(*chat_id, location).await?;
            }

            for venue in &venues {
                sender.send_venue(*chat_id, venue).await?;
            }
        }

        info!("通知发送完成: 接收者 {} 个", recipients.len());

        Ok(())
    }
}
