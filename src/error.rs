//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Telegram Notify 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum TelegramNotifyError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 文件读取错误
    #[error("读取文件失败: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 模板相关错误
    #[error("模板错误: {0}")]
    Template(#[from] TemplateError),

    /// 发送相关错误
    #[error("发送错误: {0}")]
    Send(#[from] SendError),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 缺少必填配置项
    #[error("缺少 token 或接收者列表")]
    MissingCredentials,

    /// 模板变量解析错误
    #[error("模板变量解析失败: {source_name}: {reason}")]
    InvalidTemplateVars { source_name: String, reason: String },

    /// 代理地址错误
    #[error("SOCKS5 代理地址无效: {url}: {reason}")]
    InvalidProxy { url: String, reason: String },
}

/// 模板错误类型
#[derive(Error, Debug)]
pub enum TemplateError {
    /// 模板渲染错误
    #[error("模板渲染失败: {0}")]
    RenderError(String),
}

/// 发送错误类型
///
/// 所有变体携带的文本在构造时已将 bot token 替换为 `<token>`，
/// 日志和错误输出不会泄露凭据。
#[derive(Error, Debug)]
pub enum SendError {
    /// Telegram API 返回失败响应
    #[error("Telegram API 错误: {0}")]
    ApiError(String),

    /// HTTP 传输层错误
    #[error("HTTP 请求失败: {0}")]
    HttpError(String),

    /// 附件读取错误
    #[error("读取附件失败: {path}: {reason}")]
    AttachmentError { path: String, reason: String },
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, TelegramNotifyError>;
