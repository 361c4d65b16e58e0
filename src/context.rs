//! 构建元数据模块
//!
//! 定义 CI/CD 流水线注入的仓库、提交、构建元数据，
//! 这些数据作为模板渲染的上下文

use crate::resolve::text::escape_markdown_one;
use serde::Serialize;

/// 仓库信息
///
/// 序列化键全部为小写且不含分隔符，模板中通过
/// `{{repo.fullname}}` 这类表达式引用，键名本身不会
/// 被 Markdown 转义破坏。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Repo {
    /// 仓库全名（namespace/name）
    #[serde(rename = "fullname")]
    pub full_name: String,
    /// 仓库所属命名空间
    pub namespace: String,
    /// 仓库名称
    pub name: String,
}

/// 提交信息
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Commit {
    /// 提交 SHA
    pub sha: String,
    /// git ref
    #[serde(rename = "ref")]
    pub ref_: String,
    /// 分支名
    pub branch: String,
    /// 提交链接
    pub link: String,
    /// 作者名称
    pub author: String,
    /// 作者邮箱
    pub email: String,
    /// 作者头像链接
    pub avatar: String,
    /// 提交说明
    pub message: String,
}

/// 构建信息
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Build {
    /// 构建标签
    pub tag: String,
    /// 触发事件
    pub event: String,
    /// 构建编号
    pub number: i64,
    /// 构建状态
    pub status: String,
    /// 构建链接
    pub link: String,
    /// 开始时间（Unix 秒）
    pub started: i64,
    /// 结束时间（Unix 秒）
    pub finished: i64,
    /// PR 编号
    pub pr: String,
    /// 部署目标环境
    #[serde(rename = "deployto")]
    pub deploy_to: String,
}

/// GitHub Actions 运行环境信息
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GitHub {
    /// 工作流名称
    pub workflow: String,
    /// 工作区路径
    pub workspace: String,
    /// action 名称
    pub action: String,
    /// 触发事件名称
    #[serde(rename = "eventname")]
    pub event_name: String,
    /// 事件负载文件路径
    #[serde(rename = "eventpath")]
    pub event_path: String,
}

/// 消息上下文
///
/// 一次派发运行的全部元数据集合，构造后只读，
/// 唯一的例外是发送前对部分字段做 Markdown 转义。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageContext {
    /// 仓库信息
    pub repo: Repo,
    /// 提交信息
    pub commit: Commit,
    /// 构建信息
    pub build: Build,
    /// GitHub Actions 信息
    pub github: GitHub,
}

impl MessageContext {
    /// 对会插入消息正文的自由文本字段做 Markdown 转义
    ///
    /// 覆盖提交说明、分支、链接、作者、邮箱、构建标签/链接/PR、
    /// 仓库命名空间和名称。仅在消息格式为 Markdown 时调用。
    pub fn escape_markdown_fields(&mut self) {
        self.commit.message = escape_markdown_one(&self.commit.message);
        self.commit.branch = escape_markdown_one(&self.commit.branch);
        self.commit.link = escape_markdown_one(&self.commit.link);
        self.commit.author = escape_markdown_one(&self.commit.author);
        self.commit.email = escape_markdown_one(&self.commit.email);

        self.build.tag = escape_markdown_one(&self.build.tag);
        self.build.link = escape_markdown_one(&self.build.link);
        self.build.pr = escape_markdown_one(&self.build.pr);

        self.repo.namespace = escape_markdown_one(&self.repo.namespace);
        self.repo.name = escape_markdown_one(&self.repo.name);
    }
}
