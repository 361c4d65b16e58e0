//! 附件解析模块
//!
//! 将 glob 模式展开为实际存在的附件文件路径

use crate::resolve::text::trim_elements;
use globset::GlobBuilder;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// glob 元字符集合
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// 解析附件模式列表
///
/// 每个条目按 glob 模式展开，匹配结果按模式出现顺序追加；
/// 同一模式内的匹配按文件名排序，保证结果可复现。
/// 无效模式记录告警后跳过，不影响其余条目。
///
/// # 参数
/// * `patterns` - 原始模式列表
///
/// # 返回
/// * `Vec<String>` - 解析出的文件路径列表
pub fn resolve_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<String> {
    let mut resolved = Vec::new();

    for pattern in trim_elements(patterns) {
        match expand_pattern(&pattern) {
            Ok(mut matches) => resolved.append(&mut matches),
            Err(e) => warn!("glob 模式无效，已跳过 {:?}: {}", pattern, e),
        }
    }

    resolved
}

/// 展开单个模式
fn expand_pattern(pattern: &str) -> Result<Vec<String>, globset::Error> {
    // 不含通配符的条目只做存在性检查，省掉目录遍历
    if !pattern.contains(GLOB_META) {
        if Path::new(pattern).is_file() {
            return Ok(vec![pattern.to_string()]);
        }
        return Ok(Vec::new());
    }

    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher();

    let base = literal_base(pattern);
    let walk_root: &Path = if base.as_os_str().is_empty() {
        Path::new(".")
    } else {
        &base
    };

    let mut matches = Vec::new();
    for entry in WalkDir::new(walk_root)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        // 相对模式下 walkdir 会产生 "./" 前缀，匹配前去掉
        let candidate = path.strip_prefix("./").unwrap_or(path);
        if matcher.is_match(candidate) {
            matches.push(candidate.to_string_lossy().into_owned());
        }
    }

    Ok(matches)
}

/// 取模式中不含通配符的前缀目录，作为遍历起点
fn literal_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();

    let parent = match Path::new(pattern).parent() {
        Some(parent) => parent,
        None => return base,
    };

    for component in parent.components() {
        if component.as_os_str().to_string_lossy().contains(GLOB_META) {
            break;
        }
        base.push(component);
    }

    base
}
