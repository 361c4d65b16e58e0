//! 输入解析模块
//!
//! 提供接收者、附件、位置和文本的解析与规整功能

pub mod attachments;
pub mod location;
pub mod recipients;
pub mod text;

// 重新导出主要类型
pub use attachments::resolve_patterns;
pub use location::{parse_location, Location};
pub use recipients::resolve_recipients;
pub use text::{escape_markdown, escape_markdown_one, trim_elements};
