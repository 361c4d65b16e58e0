//! 消息组装模块
//!
//! 根据流水线上下文生成默认通知文本

use crate::context::MessageContext;

/// 根据构建状态返回表情图标，未知状态返回空串
pub fn status_icon(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "failure" => "❌",
        "cancelled" => "❕",
        "success" => "✅",
        _ => "",
    }
}

/// 组装默认通知消息
///
/// # 参数
/// * `context` - 流水线上下文
/// * `github` - 是否使用 GitHub Actions 风格的触发消息
///
/// # 返回
/// * `Vec<String>` - 单元素的消息行列表
pub fn compose_default(context: &MessageContext, github: bool) -> Vec<String> {
    if github {
        return vec![format!(
            "{}/{} triggered by {} ({})",
            context.repo.full_name,
            context.github.workflow,
            context.repo.namespace,
            context.github.event_name,
        )];
    }

    let icon = status_icon(&context.build.status);

    vec![format!(
        "{} Build #{} of `{}` {}.\n\n📝 Commit by {} on `{}`:\n``` {} ```\n\n🌐 {}",
        icon,
        context.build.number,
        context.repo.full_name,
        context.build.status,
        context.commit.author,
        context.commit.branch,
        context.commit.message,
        context.build.link,
    )]
}
