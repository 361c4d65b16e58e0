//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use clap::ValueEnum;

/// 消息格式
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageFormat {
    /// Markdown 格式
    #[default]
    Markdown,
    /// HTML 格式
    Html,
}

impl MessageFormat {
    /// 转换为 Telegram API 的 parse_mode 取值
    pub fn as_parse_mode(&self) -> &'static str {
        match self {
            MessageFormat::Markdown => "Markdown",
            MessageFormat::Html => "HTML",
        }
    }
}

impl std::fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageFormat::Markdown => write!(f, "markdown"),
            MessageFormat::Html => write!(f, "html"),
        }
    }
}

/// 派发配置
///
/// 来自命令行参数和环境变量的全部插件设置，
/// 构造后不再修改。字符串字段为空即视为未设置。
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Telegram bot token
    pub token: String,
    /// 接收者列表（`id` 或 `id:email`）
    pub to: Vec<String>,
    /// 内联消息文本
    pub message: String,
    /// 消息文件路径，优先于内联消息
    pub message_file: String,
    /// 内联模板变量（JSON 对象字符串）
    pub template_vars: String,
    /// 模板变量文件路径，条目覆盖内联同名变量
    pub template_vars_file: String,
    /// 照片附件模式列表
    pub photo: Vec<String>,
    /// 文档附件模式列表
    pub document: Vec<String>,
    /// 贴纸附件模式列表
    pub sticker: Vec<String>,
    /// 音频附件模式列表
    pub audio: Vec<String>,
    /// 语音附件模式列表
    pub voice: Vec<String>,
    /// 视频附件模式列表
    pub video: Vec<String>,
    /// 位置字符串列表
    pub location: Vec<String>,
    /// 地点字符串列表
    pub venue: Vec<String>,
    /// 消息格式
    pub format: MessageFormat,
    /// 是否运行在 GitHub Actions 环境
    pub github: bool,
    /// SOCKS5 代理地址
    pub socks5: String,
    /// 是否启用调试输出
    pub debug: bool,
    /// 是否只发送给邮箱命中的接收者
    pub match_email: bool,
    /// 是否禁用链接预览
    pub disable_web_page_preview: bool,
    /// 是否静默发送（接收者无提示音）
    pub disable_notification: bool,
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), ConfigError>` - 验证结果
pub fn validate_config(config: &Config) -> Result<(), crate::error::ConfigError> {
    if config.token.is_empty() || config.to.is_empty() {
        return Err(crate::error::ConfigError::MissingCredentials);
    }

    Ok(())
}
