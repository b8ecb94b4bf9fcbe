//! Common serde helpers for map JSON payloads
//!
//! 地图 JSON 来自多个前端版本，字段格式不完全一致：
//! - 缺失/null 的布尔字段按默认值处理
//! - 时间戳支持 RFC 3339 字符串和毫秒整数两种格式

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Lenient optional timestamp (de)serialization.
///
/// Accepts an RFC 3339 string or epoch milliseconds. Anything else (a
/// malformed string, a boolean, an object) deserializes as `None` rather
/// than failing the whole payload: an unparseable hold expiry means the
/// seat resolves as available.
pub mod lenient_datetime {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Some(serde_json::Value::Number(n)) => {
                n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis)
            }
            _ => None,
        })
    }
}
