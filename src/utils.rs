//! 通用辅助函数：环境变量读取与解析

use std::env;

/// 读取进程环境变量
pub(crate) fn env_var(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// 去除首尾空白，空值视为未设置。
pub(crate) fn opt_string(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 布尔值的真值（1/true/on/yes/y），其余一律为假。
pub(crate) fn bool_truthy(v: Option<String>) -> Option<bool> {
    v.map(|v| truthy(&v))
}

fn truthy(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "on" | "yes" | "y")
}
