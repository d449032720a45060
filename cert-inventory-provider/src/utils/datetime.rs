//! 平台时间字符串解析
//!
//! 腾讯云 SSL 接口以 `yyyy-MM-dd HH:mm:ss` 返回北京时间（UTC+08:00），
//! 这里统一转换为 Unix 毫秒时间戳。

use chrono::{FixedOffset, NaiveDateTime, TimeZone};

/// 平台时间格式
pub const PLATFORM_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 平台时区偏移（秒）
const PLATFORM_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// 解析 `yyyy-MM-dd HH:mm:ss`（UTC+08:00）为 Unix 毫秒
///
/// 空字符串或格式不符返回 `None`。
pub fn parse_platform_time_millis(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(value, PLATFORM_TIME_FORMAT).ok()?;
    let offset = FixedOffset::east_opt(PLATFORM_UTC_OFFSET_SECS)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp_millis())
}
