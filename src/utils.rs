/// Utility functions
use chrono::NaiveDate;
use serde_json::Value;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.trim().parse::<f64>().ok();
    }
    None
}

/// Non-empty string at a JSON pointer (`/rover/status`)
pub fn str_at<'a>(v: &'a Value, pointer: &str) -> Option<&'a str> {
    v.pointer(pointer)
        .and_then(|x| x.as_str())
        .filter(|s| !s.is_empty())
}

/// Positive integer at a JSON pointer, accepting numeric strings
pub fn u32_at(v: &Value, pointer: &str) -> Option<u32> {
    v.pointer(pointer)
        .and_then(num)
        .filter(|n| *n >= 1.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
}

/// Pick string value from JSON by trying multiple pointers
pub fn s_pick(v: &Value, pointers: &[&str]) -> Option<String> {
    for p in pointers {
        if let Some(x) = v.pointer(p) {
            if let Some(s) = x.as_str() {
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            } else if x.is_number() {
                return Some(x.to_string());
            }
        }
    }
    None
}

/// Day stamp in the `Mon Oct 19 2026` form used by the cache file
pub fn date_stamp(day: NaiveDate) -> String {
    day.format("%a %b %d %Y").to_string()
}
