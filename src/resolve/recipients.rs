//! 接收者解析模块
//!
//! 将配置的接收者列表解析为数字 chat ID，并应用邮箱匹配过滤

use crate::resolve::text::trim_elements;

/// 解析接收者列表
///
/// 每个条目形如 `"<id>"` 或 `"<id>:<email>"`：
/// - ID 必须是十进制 64 位整数，解析失败的条目整体丢弃；
/// - 带邮箱的条目只有在邮箱与提交作者邮箱完全一致时才保留；
/// - `match_email` 为 true 且至少有一个邮箱条目命中时，结果只包含
///   命中的条目；否则无条件条目在前、命中条目在后。
///
/// # 参数
/// * `specs` - 原始接收者列表
/// * `author_email` - 提交作者邮箱（可能为空）
/// * `match_email` - 是否只发送给邮箱命中的接收者
///
/// # 返回
/// * `Vec<i64>` - 解析后的 chat ID 列表，允许重复，保留输入顺序
pub fn resolve_recipients<S: AsRef<str>>(
    specs: &[S],
    author_email: &str,
    match_email: bool,
) -> Vec<i64> {
    let mut ids = Vec::new();
    let mut matched = Vec::new();
    let mut any_matched = false;

    for spec in trim_elements(specs) {
        // 最多拆成两段，空段丢弃，因此 "123:" 等价于 "123"
        let parts: Vec<&str> = spec.splitn(2, ':').collect();
        let parts = trim_elements(&parts);

        let id = match parts.first().map(|part| part.parse::<i64>()) {
            Some(Ok(id)) => id,
            _ => continue,
        };

        match parts.get(1) {
            Some(email) => {
                if email != author_email {
                    continue;
                }
                matched.push(id);
                any_matched = true;
            }
            None => ids.push(id),
        }
    }

    if match_email && any_matched {
        return matched;
    }

    ids.extend(matched);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs() -> Vec<String> {
        vec![
            "0".to_string(),
            "1:1@x.com".to_string(),
            "2:2@x.com".to_string(),
            "3:3@x.com".to_string(),
            "4".to_string(),
            "5".to_string(),
        ]
    }

    #[test]
    fn test_resolve_recipients_default_fanout() {
        // 无条件条目在前，命中邮箱的条目附加在后
        let result = resolve_recipients(&specs(), "1@x.com", false);
        assert_eq!(result, vec![0, 4, 5, 1]);
    }

    #[test]
    fn test_resolve_recipients_match_email_only() {
        let result = resolve_recipients(&specs(), "1@x.com", true);
        assert_eq!(result, vec![1]);
    }

    #[test]
    fn test_resolve_recipients_no_email_match() {
        // 邮箱不命中时，带邮箱的条目全部丢弃，开关不影响结果
        let result = resolve_recipients(&specs(), "a@x.com", false);
        assert_eq!(result, vec![0, 4, 5]);

        let result = resolve_recipients(&specs(), "a@x.com", true);
        assert_eq!(result, vec![0, 4, 5]);
    }

    #[test]
    fn test_resolve_recipients_invalid_id_dropped() {
        let input = ["1".to_string(), "測試".to_string(), "3".to_string()];
        assert_eq!(resolve_recipients(&input, "", false), vec![1, 3]);
    }

    #[test]
    fn test_resolve_recipients_blank_input() {
        let input = ["  ".to_string(), String::new()];
        assert!(resolve_recipients(&input, "1@x.com", false).is_empty());
        assert!(resolve_recipients(&input, "1@x.com", true).is_empty());
    }

    #[test]
    fn test_resolve_recipients_trailing_colon() {
        // 冒号后为空视为无条件条目
        let input = ["123:".to_string()];
        assert_eq!(resolve_recipients(&input, "any@x.com", true), vec![123]);
    }

    #[test]
    fn test_resolve_recipients_negative_and_spaces() {
        // 群组 chat ID 为负数；分隔符两侧允许空白
        let input = ["-100123456".to_string(), " 7 : 7@x.com ".to_string()];
        assert_eq!(
            resolve_recipients(&input, "7@x.com", false),
            vec![-100123456, 7]
        );
    }
}
