//! 位置解析模块
//!
//! 将逗号分隔的坐标字符串解析为位置信息

use crate::resolve::text::trim_elements;
use serde::Serialize;
use tracing::warn;

/// 地理位置信息
///
/// 作为 location 消息时只使用经纬度，作为 venue 消息时
/// 附带标题和地址。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Location {
    /// 地点标题
    pub title: String,
    /// 地点地址
    pub address: String,
    /// 纬度
    pub latitude: f64,
    /// 经度
    pub longitude: f64,
}

/// 解析位置字符串
///
/// 输入格式为 `"纬度,经度[,标题[,地址]]"`，各字段两侧空白会被去除。
/// 字段不足两个、或经纬度不是合法十进制小数时返回 `None` 并记录
/// 告警日志，调用方据此跳过该条目。
///
/// # 参数
/// * `value` - 原始位置字符串
///
/// # 返回
/// * `Option<Location>` - 解析成功的位置，失败时为 `None`
pub fn parse_location(value: &str) -> Option<Location> {
    let fields: Vec<&str> = value.split(',').collect();
    let fields = trim_elements(&fields);

    if fields.len() < 2 {
        warn!("位置字符串字段不足，已跳过: {:?}", value);
        return None;
    }

    let latitude = match fields[0].parse::<f64>() {
        Ok(v) => v,
        Err(e) => {
            warn!("纬度解析失败，已跳过 {:?}: {}", value, e);
            return None;
        }
    };

    let longitude = match fields[1].parse::<f64>() {
        Ok(v) => v,
        Err(e) => {
            warn!("经度解析失败，已跳过 {:?}: {}", value, e);
            return None;
        }
    };

    Some(Location {
        title: fields.get(2).cloned().unwrap_or_default(),
        address: fields.get(3).cloned().unwrap_or_default(),
        latitude,
        longitude,
    })
}
