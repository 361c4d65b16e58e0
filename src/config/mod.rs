//! 配置管理模块
//!
//! 提供插件配置的数据结构、环境变量预处理与校验

pub mod env;
pub mod types;

// 重新导出主要类型
pub use types::{validate_config, Config, MessageFormat};
