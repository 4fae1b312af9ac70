// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

/// 按优先级排列的商品编码规则，第一个命中的规则胜出
///
/// 单词边界只按 ASCII 判断，紧贴中文的编码（如 `耐克AB1234运动鞋`）同样能命中
static SKU_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // AB-1234, ABC_123456, XY1234
        Regex::new(r"(?-u:\b)([A-Z]{2,}[-_]?[0-9]{3,6})(?-u:\b)").unwrap(),
        // A1234
        Regex::new(r"(?-u:\b)([A-Z][0-9]{3,5})(?-u:\b)").unwrap(),
        // 1234AB
        Regex::new(r"(?-u:\b)([0-9]{3,4}[A-Z]{1,3})(?-u:\b)").unwrap(),
        // Explicit labels
        Regex::new(r"(?i)(?-u:\b)SKU(?-u:\b)[:\s]*([A-Za-z0-9_-]+)").unwrap(),
        Regex::new(r"(?i)(?-u:\b)Item(?-u:\b)[:\s]*([A-Za-z0-9_-]+)").unwrap(),
        Regex::new(r"(?i)(?-u:\b)Code(?-u:\b)[:\s]*([A-Za-z0-9_-]+)").unwrap(),
    ]
});

/// 从自由文本中提取可能的商品编码
///
/// # 参数
///
/// * `text` - 商品标题、图片 alt 等文本
///
/// # 返回值
///
/// * `Some(String)` - 第一个命中规则的捕获组（去空白并转大写）
/// * `None` - 没有规则命中
pub fn extract_sku(text: &str) -> Option<String> {
    SKU_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_uppercase())
            .filter(|sku| !sku.is_empty())
    })
}
