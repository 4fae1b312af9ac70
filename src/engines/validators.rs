// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::config::settings::SiteSettings;
use crate::utils::url_utils::{host_in_domain, resolve_url};

/// 相册路径标记
const ALBUMS_SEGMENT: &str = "/albums/";

/// URL 规范化与校验策略
///
/// 画廊页面把相册链接、导航栏和语言切换混在同一块 DOM 中，
/// 仅靠选择器无法区分，因此按 URL 形状加拒绝列表判断
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    domain: String,
    denylist: Vec<String>,
}

impl UrlPolicy {
    pub fn new(domain: impl Into<String>, denylist: Vec<String>) -> Self {
        Self {
            domain: domain.into(),
            denylist: denylist.into_iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    pub fn from_settings(site: &SiteSettings) -> Self {
        Self::new(site.domain.clone(), site.nav_denylist.clone())
    }

    /// 将可能为相对路径的 href 解析为绝对 URL
    ///
    /// # 参数
    ///
    /// * `href` - 页面中的原始链接
    /// * `base_url` - 链接所在页面的 URL
    ///
    /// # 返回值
    ///
    /// * `Some(String)` - 规范化后的绝对 URL
    /// * `None` - 解析失败、包含 `undefined` 或不属于目标站点
    pub fn normalize(&self, href: &str, base_url: &str) -> Option<String> {
        let base = Url::parse(base_url).ok()?;
        let resolved = resolve_url(&base, href.trim()).ok()?;
        let url = resolved.to_string();

        if url.contains("undefined") {
            return None;
        }
        if !resolved
            .host_str()
            .is_some_and(|host| host_in_domain(host, &self.domain))
        {
            return None;
        }

        Some(url)
    }

    /// 判断 URL 是否为有效的相册地址
    ///
    /// 要求路径包含 `/albums/<数字ID>`，不等于列表页本身，且不命中拒绝列表
    pub fn is_valid_album_url(&self, url: &str, base_url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        if self.is_denylisted(url) {
            return false;
        }

        if url.trim_end_matches('/') == base_url.trim_end_matches('/') {
            return false;
        }

        album_id(parsed.path()).is_some()
    }

    fn is_denylisted(&self, url: &str) -> bool {
        let lowered = url.to_lowercase();
        // Non-ASCII patterns only match the percent-decoded form
        let decoded = urlencoding::decode(url)
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|_| lowered.clone());

        self.denylist
            .iter()
            .any(|pattern| lowered.contains(pattern) || decoded.contains(pattern))
    }
}

/// 提取 `/albums/` 之后的数字相册ID
pub fn album_id(path: &str) -> Option<&str> {
    let start = path.find(ALBUMS_SEGMENT)? + ALBUMS_SEGMENT.len();
    let segment = path[start..].split('/').next()?;
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        Some(segment)
    } else {
        None
    }
}
