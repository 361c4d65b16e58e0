//! 环境变量预处理模块
//!
//! 在解析命令行参数之前加载 env 文件，并把各 CI 平台的
//! 别名变量归一到参数绑定的标准名称上

use std::path::Path;

/// Drone runner 注入的环境文件路径
const DRONE_ENV_FILE: &str = "/run/drone/env";

/// 环境变量别名表：标准名 ← 按优先级排列的别名
///
/// clap 的 `env` 属性每个参数只能绑定一个变量，CI 平台却会用
/// `TELEGRAM_*`、`INPUT_*`、`GITHUB_*` 等多套前缀注入同一项配置，
/// 因此在解析前把别名值复制到标准名上。
const ENV_ALIASES: &[(&str, &[&str])] = &[
    ("PLUGIN_TOKEN", &["TELEGRAM_TOKEN", "INPUT_TOKEN"]),
    ("PLUGIN_TO", &["TELEGRAM_TO", "INPUT_TO"]),
    ("PLUGIN_MESSAGE", &["TELEGRAM_MESSAGE", "INPUT_MESSAGE"]),
    (
        "PLUGIN_MESSAGE_FILE",
        &["TELEGRAM_MESSAGE_FILE", "INPUT_MESSAGE_FILE"],
    ),
    (
        "PLUGIN_TEMPLATE_VARS",
        &["TELEGRAM_TEMPLATE_VARS", "INPUT_TEMPLATE_VARS"],
    ),
    ("PLUGIN_TEMPLATE_VARS_FILE", &["TELEGRAM_TEMPLATE_VARS_FILE"]),
    ("PLUGIN_PHOTO", &["PHOTO", "INPUT_PHOTO"]),
    ("PLUGIN_DOCUMENT", &["DOCUMENT", "INPUT_DOCUMENT"]),
    ("PLUGIN_STICKER", &["STICKER", "INPUT_STICKER"]),
    ("PLUGIN_AUDIO", &["AUDIO", "INPUT_AUDIO"]),
    ("PLUGIN_VOICE", &["VOICE", "INPUT_VOICE"]),
    ("PLUGIN_LOCATION", &["LOCATION", "INPUT_LOCATION"]),
    ("PLUGIN_VENUE", &["VENUE", "INPUT_VENUE"]),
    ("PLUGIN_VIDEO", &["VIDEO", "INPUT_VIDEO"]),
    ("PLUGIN_DEBUG", &["DEBUG", "INPUT_DEBUG"]),
    ("PLUGIN_ONLY_MATCH_EMAIL", &["INPUT_ONLY_MATCH_EMAIL"]),
    (
        "PLUGIN_DISABLE_WEB_PAGE_PREVIEW",
        &["INPUT_DISABLE_WEB_PAGE_PREVIEW"],
    ),
    (
        "PLUGIN_DISABLE_NOTIFICATION",
        &["INPUT_DISABLE_NOTIFICATION"],
    ),
    ("PLUGIN_FORMAT", &["FORMAT", "INPUT_FORMAT"]),
    ("PLUGIN_GITHUB", &["GITHUB"]),
    ("PLUGIN_SOCKS5", &["SOCKS5", "INPUT_SOCKS5"]),
    ("DRONE_REPO", &["GITHUB_REPOSITORY"]),
    ("DRONE_REPO_OWNER", &["DRONE_REPO_NAMESPACE", "GITHUB_ACTOR"]),
    ("DRONE_COMMIT_SHA", &["GITHUB_SHA"]),
    ("DRONE_COMMIT_REF", &["GITHUB_REF"]),
];

/// 加载 env 文件
///
/// 先加载 `PLUGIN_ENV_FILE` 指定的文件（不覆盖已有变量），
/// 再用 Drone runner 注入的 `/run/drone/env` 覆盖加载。
/// 文件缺失或格式错误不视为致命，直接忽略。
pub fn load_env_files() {
    if let Ok(env_file) = std::env::var("PLUGIN_ENV_FILE") {
        if !env_file.is_empty() {
            let _ = dotenvy::from_filename(&env_file);
        }
    }

    if Path::new(DRONE_ENV_FILE).exists() {
        let _ = dotenvy::from_filename_override(DRONE_ENV_FILE);
    }
}

/// 应用环境变量别名
///
/// 标准名已设置时保持不变；否则取别名表中第一个已设置的别名值。
pub fn apply_env_aliases() {
    for (primary, aliases) in ENV_ALIASES {
        if std::env::var_os(primary).is_some() {
            continue;
        }

        for alias in *aliases {
            if let Some(value) = std::env::var_os(alias) {
                std::env::set_var(primary, value);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_alias_copied_when_primary_unset() {
        std::env::remove_var("PLUGIN_SOCKS5");
        std::env::set_var("SOCKS5", "socks5://127.0.0.1:1080");

        apply_env_aliases();

        assert_eq!(
            std::env::var("PLUGIN_SOCKS5").unwrap(),
            "socks5://127.0.0.1:1080"
        );

        std::env::remove_var("PLUGIN_SOCKS5");
        std::env::remove_var("SOCKS5");
    }

    #[test]
    #[serial]
    fn test_primary_wins_over_alias() {
        std::env::set_var("PLUGIN_TOKEN", "primary");
        std::env::set_var("TELEGRAM_TOKEN", "alias");

        apply_env_aliases();

        assert_eq!(std::env::var("PLUGIN_TOKEN").unwrap(), "primary");

        std::env::remove_var("PLUGIN_TOKEN");
        std::env::remove_var("TELEGRAM_TOKEN");
    }

    #[test]
    #[serial]
    fn test_alias_priority_order() {
        std::env::remove_var("PLUGIN_TO");
        std::env::set_var("TELEGRAM_TO", "first");
        std::env::set_var("INPUT_TO", "second");

        apply_env_aliases();

        assert_eq!(std::env::var("PLUGIN_TO").unwrap(), "first");

        std::env::remove_var("PLUGIN_TO");
        std::env::remove_var("TELEGRAM_TO");
        std::env::remove_var("INPUT_TO");
    }

    #[test]
    #[serial]
    fn test_load_env_files_from_plugin_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join("plugin.env");
        std::fs::write(&env_path, "TN_TEST_FROM_FILE=loaded\n").unwrap();

        std::env::remove_var("TN_TEST_FROM_FILE");
        std::env::set_var("PLUGIN_ENV_FILE", env_path.display().to_string());

        load_env_files();

        assert_eq!(std::env::var("TN_TEST_FROM_FILE").unwrap(), "loaded");

        std::env::remove_var("TN_TEST_FROM_FILE");
        std::env::remove_var("PLUGIN_ENV_FILE");
    }

    #[test]
    #[serial]
    fn test_load_env_files_missing_file_ignored() {
        std::env::set_var("PLUGIN_ENV_FILE", "/nonexistent/plugin.env");

        // 不应 panic，也不应报错
        load_env_files();

        std::env::remove_var("PLUGIN_ENV_FILE");
    }
}
