//! 文本规整模块
//!
//! 提供字符串列表清理和 Markdown 转义功能

/// 清理字符串列表
///
/// 去除每个元素的首尾空白字符，丢弃清理后为空的元素，
/// 保留幸存元素的相对顺序。
///
/// # 参数
/// * `values` - 原始字符串列表
///
/// # 返回
/// * `Vec<String>` - 清理后的列表
pub fn trim_elements<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.as_ref().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// 转义单个字符串中的 Markdown 下划线
///
/// 两步变换：先把已转义的 `\_` 还原为 `_`，再把所有 `_` 转义为 `\_`。
/// 无论输入是否已经转义过，输出中的下划线都恰好带一个反斜杠，
/// 因此该操作是幂等的。
pub fn escape_markdown_one(value: &str) -> String {
    value.replace("\\_", "_").replace('_', "\\_")
}

/// 批量转义消息行
///
/// 对每一行应用 [`escape_markdown_one`]，丢弃转义后为空的行。
pub fn escape_markdown<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| escape_markdown_one(line.as_ref()))
        .filter(|line| !line.is_empty())
        .collect()
}
