//! 消息模板模块
//!
//! 基于 Handlebars 渲染消息文本，渲染输出不做 HTML 转义

use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};

use crate::error::TemplateError;

/// 模板渲染引擎
///
/// 注册了两个内置 helper：
/// * `uppercasefirst` - 首字母大写
/// * `duration` - 两个秒级时间戳的差值，格式化为 `1h2m3s` 风格
pub struct TemplateEngine {
    registry: Handlebars<'static>,
}

impl TemplateEngine {
    /// 创建模板引擎并注册内置 helper
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry.register_helper("uppercasefirst", Box::new(uppercase_first_helper));
        registry.register_helper("duration", Box::new(duration_helper));

        Self { registry }
    }

    /// 渲染模板并裁剪首尾空白
    ///
    /// # 参数
    /// * `template` - 模板字符串
    /// * `data` - 渲染数据
    ///
    /// # 返回
    /// * `Result<String, TemplateError>` - 渲染后的文本
    pub fn render_trim(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, TemplateError> {
        let rendered = self
            .registry
            .render_template(template, data)
            .map_err(|e| TemplateError::RenderError(e.to_string()))?;

        Ok(rendered.trim().to_string())
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 首字母大写 helper，用法 `{{uppercasefirst commit.author}}`
fn uppercase_first_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h
        .param(0)
        .and_then(|p| p.value().as_str())
        .unwrap_or_default();

    let mut chars = value.chars();
    let result = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    out.write(&result)?;
    Ok(())
}

/// 构建耗时 helper，用法 `{{duration build.started build.finished}}`
fn duration_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let started = h.param(0).and_then(|p| p.value().as_i64()).unwrap_or(0);
    let finished = h.param(1).and_then(|p| p.value().as_i64()).unwrap_or(0);

    out.write(&format_duration(finished - started))?;
    Ok(())
}

/// 把秒数格式化为 Go `time.Duration` 风格的字符串
///
/// 高位单位存在时低位单位总是补齐，例如 3600 秒为 `1h0m0s`。
pub fn format_duration(seconds: i64) -> String {
    let (sign, secs) = if seconds < 0 {
        ("-", -seconds)
    } else {
        ("", seconds)
    };

    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    let rest = secs % 60;

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{rest}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{rest}s")
    } else {
        format!("{sign}{rest}s")
    }
}
