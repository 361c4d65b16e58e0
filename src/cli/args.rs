//! 命令行参数定义
//!
//! 使用clap定义插件的命令行接口，每个参数绑定对应的
//! Drone/GitHub Actions 环境变量

use clap::{Parser, ValueEnum};

use crate::config::{Config, MessageFormat};
use crate::context::MessageContext;

/// Telegram Notify - CI/CD 构建通知插件
#[derive(Parser, Debug, Clone)]
#[command(
    name = "telegram-notify",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// Telegram bot token
    #[arg(
        long,
        help = "Telegram bot token",
        env = "PLUGIN_TOKEN",
        hide_env_values = true,
        default_value = ""
    )]
    pub token: String,

    /// 接收者列表，`id` 或 `id:email`
    #[arg(
        long,
        help = "接收者列表（id 或 id:email，逗号分隔）",
        env = "PLUGIN_TO",
        value_delimiter = ','
    )]
    pub to: Vec<String>,

    /// 内联消息文本
    #[arg(
        long,
        help = "通知消息文本（Handlebars 模板）",
        env = "PLUGIN_MESSAGE",
        default_value = ""
    )]
    pub message: String,

    /// 消息文件路径
    #[arg(
        long,
        help = "从文件读取通知消息",
        env = "PLUGIN_MESSAGE_FILE",
        default_value = ""
    )]
    pub message_file: String,

    /// 内联模板变量
    #[arg(
        long,
        help = "附加模板变量（JSON 对象字符串）",
        env = "PLUGIN_TEMPLATE_VARS",
        default_value = ""
    )]
    pub template_vars: String,

    /// 模板变量文件路径
    #[arg(
        long,
        help = "从 JSON 文件加载附加模板变量",
        env = "PLUGIN_TEMPLATE_VARS_FILE",
        default_value = ""
    )]
    pub template_vars_file: String,

    /// 照片附件
    #[arg(
        long,
        help = "发送照片附件（路径或 glob 模式）",
        env = "PLUGIN_PHOTO",
        value_delimiter = ','
    )]
    pub photo: Vec<String>,

    /// 文档附件
    #[arg(
        long,
        help = "发送文档附件（路径或 glob 模式）",
        env = "PLUGIN_DOCUMENT",
        value_delimiter = ','
    )]
    pub document: Vec<String>,

    /// 贴纸附件
    #[arg(
        long,
        help = "发送贴纸附件（路径或 glob 模式）",
        env = "PLUGIN_STICKER",
        value_delimiter = ','
    )]
    pub sticker: Vec<String>,

    /// 音频附件
    #[arg(
        long,
        help = "发送音频附件（路径或 glob 模式）",
        env = "PLUGIN_AUDIO",
        value_delimiter = ','
    )]
    pub audio: Vec<String>,

    /// 语音附件
    #[arg(
        long,
        help = "发送语音附件（路径或 glob 模式）",
        env = "PLUGIN_VOICE",
        value_delimiter = ','
    )]
    pub voice: Vec<String>,

    /// 位置消息
    #[arg(
        long,
        help = "发送位置消息（纬度,经度）",
        env = "PLUGIN_LOCATION",
        value_delimiter = ';'
    )]
    pub location: Vec<String>,

    /// 地点消息
    #[arg(
        long,
        help = "发送地点消息（纬度,经度,标题,地址）",
        env = "PLUGIN_VENUE",
        value_delimiter = ';'
    )]
    pub venue: Vec<String>,

    /// 视频附件
    #[arg(
        long,
        help = "发送视频附件（路径或 glob 模式）",
        env = "PLUGIN_VIDEO",
        value_delimiter = ','
    )]
    pub video: Vec<String>,

    /// 消息格式
    #[arg(
        long,
        value_enum,
        ignore_case = true,
        default_value = "markdown",
        help = "消息格式（markdown 或 html）",
        env = "PLUGIN_FORMAT"
    )]
    pub format: MessageFormat,

    /// 是否运行在 GitHub Actions 环境
    #[arg(long, help = "运行环境为 GitHub Actions", env = "PLUGIN_GITHUB")]
    pub github: bool,

    /// SOCKS5 代理地址
    #[arg(
        long,
        help = "SOCKS5 代理地址（socks5://host:port）",
        env = "PLUGIN_SOCKS5",
        default_value = ""
    )]
    pub socks5: String,

    /// 是否启用调试输出
    #[arg(long, help = "启用调试输出", env = "PLUGIN_DEBUG")]
    pub debug: bool,

    /// 是否只发送给邮箱命中的接收者
    #[arg(
        long,
        help = "仅向邮箱与提交作者匹配的接收者发送",
        env = "PLUGIN_ONLY_MATCH_EMAIL"
    )]
    pub match_email: bool,

    /// 是否禁用链接预览
    #[arg(
        long,
        help = "禁用消息内链接预览",
        env = "PLUGIN_DISABLE_WEB_PAGE_PREVIEW"
    )]
    pub disable_web_page_preview: bool,

    /// 是否静默发送
    #[arg(
        long,
        help = "静默发送，接收者无提示音",
        env = "PLUGIN_DISABLE_NOTIFICATION"
    )]
    pub disable_notification: bool,

    /// 日志级别
    #[arg(
        long,
        value_enum,
        default_value = "info",
        help = "日志级别",
        env = "TELEGRAM_NOTIFY_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 仓库全名（owner/name）
    #[arg(long, help = "仓库全名", env = "DRONE_REPO", default_value = "")]
    pub repo: String,

    /// 仓库所属空间
    #[arg(
        long,
        help = "仓库所属空间",
        env = "DRONE_REPO_OWNER",
        default_value = ""
    )]
    pub repo_namespace: String,

    /// 仓库名称
    #[arg(long, help = "仓库名称", env = "DRONE_REPO_NAME", default_value = "")]
    pub repo_name: String,

    /// 提交 SHA
    #[arg(long, help = "提交 SHA", env = "DRONE_COMMIT_SHA", default_value = "")]
    pub commit_sha: String,

    /// 提交引用
    #[arg(long, help = "提交引用", env = "DRONE_COMMIT_REF", default_value = "")]
    pub commit_ref: String,

    /// 提交分支
    #[arg(
        long,
        help = "提交分支",
        env = "DRONE_COMMIT_BRANCH",
        default_value = "master"
    )]
    pub commit_branch: String,

    /// 提交链接
    #[arg(long, help = "提交链接", env = "DRONE_COMMIT_LINK", default_value = "")]
    pub commit_link: String,

    /// 提交作者
    #[arg(
        long,
        help = "提交作者",
        env = "DRONE_COMMIT_AUTHOR",
        default_value = ""
    )]
    pub commit_author: String,

    /// 提交作者邮箱
    #[arg(
        long,
        help = "提交作者邮箱",
        env = "DRONE_COMMIT_AUTHOR_EMAIL",
        default_value = ""
    )]
    pub commit_author_email: String,

    /// 提交作者头像
    #[arg(
        long,
        help = "提交作者头像",
        env = "DRONE_COMMIT_AUTHOR_AVATAR",
        default_value = ""
    )]
    pub commit_author_avatar: String,

    /// 提交信息
    #[arg(
        long,
        help = "提交信息",
        env = "DRONE_COMMIT_MESSAGE",
        default_value = ""
    )]
    pub commit_message: String,

    /// 构建标签
    #[arg(long, help = "构建标签", env = "DRONE_TAG", default_value = "")]
    pub build_tag: String,

    /// 构建事件
    #[arg(
        long,
        help = "构建事件",
        env = "DRONE_BUILD_EVENT",
        default_value = "push"
    )]
    pub build_event: String,

    /// 构建编号
    #[arg(
        long,
        help = "构建编号",
        env = "DRONE_BUILD_NUMBER",
        default_value_t = 0
    )]
    pub build_number: i64,

    /// 构建状态
    #[arg(
        long,
        help = "构建状态",
        env = "DRONE_BUILD_STATUS",
        default_value = "success"
    )]
    pub build_status: String,

    /// 构建链接
    #[arg(long, help = "构建链接", env = "DRONE_BUILD_LINK", default_value = "")]
    pub build_link: String,

    /// 构建开始时间（秒级时间戳）
    #[arg(
        long,
        help = "构建开始时间（秒级时间戳）",
        env = "DRONE_BUILD_STARTED",
        default_value_t = 0
    )]
    pub build_started: i64,

    /// 构建结束时间（秒级时间戳）
    #[arg(
        long,
        help = "构建结束时间（秒级时间戳）",
        env = "DRONE_BUILD_FINISHED",
        default_value_t = 0
    )]
    pub build_finished: i64,

    /// PR 编号
    #[arg(long, help = "PR 编号", env = "DRONE_PULL_REQUEST", default_value = "")]
    pub pull_request: String,

    /// 部署目标环境
    #[arg(
        long,
        help = "部署目标环境（promote/rollback 流水线）",
        env = "DRONE_DEPLOY_TO",
        default_value = ""
    )]
    pub deploy_to: String,

    /// GitHub workflow 名称
    #[arg(
        long,
        help = "GitHub workflow 名称",
        env = "GITHUB_WORKFLOW",
        default_value = ""
    )]
    pub github_workflow: String,

    /// GitHub workspace 路径
    #[arg(
        long,
        help = "GitHub workspace 路径",
        env = "GITHUB_WORKSPACE",
        default_value = ""
    )]
    pub github_workspace: String,

    /// GitHub action 名称
    #[arg(
        long,
        help = "GitHub action 名称",
        env = "GITHUB_ACTION",
        default_value = ""
    )]
    pub github_action: String,

    /// 触发 workflow 的事件名
    #[arg(
        long,
        help = "触发 workflow 的事件名",
        env = "GITHUB_EVENT_NAME",
        default_value = ""
    )]
    pub github_event_name: String,

    /// 事件负载文件路径
    #[arg(
        long,
        help = "事件负载文件路径",
        env = "GITHUB_EVENT_PATH",
        default_value = ""
    )]
    pub github_event_path: String,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl Args {
    /// 解析命令行参数
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// 计算生效的日志级别，debug 开关优先
    pub fn effective_log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            self.log_level.clone().into()
        }
    }

    /// 提取插件配置
    pub fn to_config(&self) -> Config {
        Config {
            token: self.token.clone(),
            to: self.to.clone(),
            message: self.message.clone(),
            message_file: self.message_file.clone(),
            template_vars: self.template_vars.clone(),
            template_vars_file: self.template_vars_file.clone(),
            photo: self.photo.clone(),
            document: self.document.clone(),
            sticker: self.sticker.clone(),
            audio: self.audio.clone(),
            voice: self.voice.clone(),
            video: self.video.clone(),
            location: self.location.clone(),
            venue: self.venue.clone(),
            format: self.format,
            github: self.github,
            socks5: self.socks5.clone(),
            debug: self.debug,
            match_email: self.match_email,
            disable_web_page_preview: self.disable_web_page_preview,
            disable_notification: self.disable_notification,
        }
    }

    /// 提取流水线上下文
    pub fn to_context(&self) -> MessageContext {
        let mut context = MessageContext::default();

        context.repo.full_name = self.repo.clone();
        context.repo.namespace = self.repo_namespace.clone();
        context.repo.name = self.repo_name.clone();

        context.commit.sha = self.commit_sha.clone();
        context.commit.ref_ = self.commit_ref.clone();
        context.commit.branch = self.commit_branch.clone();
        context.commit.link = self.commit_link.clone();
        context.commit.author = self.commit_author.clone();
        context.commit.email = self.commit_author_email.clone();
        context.commit.avatar = self.commit_author_avatar.clone();
        context.commit.message = self.commit_message.clone();

        context.build.tag = self.build_tag.clone();
        context.build.event = self.build_event.clone();
        context.build.number = self.build_number;
        context.build.status = self.build_status.clone();
        context.build.link = self.build_link.clone();
        context.build.started = self.build_started;
        context.build.finished = self.build_finished;
        context.build.pr = self.pull_request.clone();
        context.build.deploy_to = self.deploy_to.clone();

        context.github.workflow = self.github_workflow.clone();
        context.github.workspace = self.github_workspace.clone();
        context.github.action = self.github_action.clone();
        context.github.event_name = self.github_event_name.clone();
        context.github.event_path = self.github_event_path.clone();

        context
    }
}
