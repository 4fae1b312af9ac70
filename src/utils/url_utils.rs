// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 判断主机名是否属于指定的域名族（自身或其子域名）
pub fn host_in_domain(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// 去除缩略图变换后缀（`!` 之后的部分），得到原图地址
pub fn strip_thumbnail_suffix(image_url: &str) -> &str {
    match image_url.split_once('!') {
        Some((canonical, _)) => canonical,
        None => image_url,
    }
}

/// 按字符（而非字节）截断字符串
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// 将连续空白折叠为单个空格并去除首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
