// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::config::settings::CrawlConfig;
use crate::domain::models::Item;
use crate::domain::services::sku_extractor::extract_sku;
use crate::engines::traits::{BrowserSession, EngineError, PageRenderer, RenderOptions};
use crate::engines::validators::UrlPolicy;
use crate::infrastructure::debug_capture::DebugCapture;
use crate::utils::url_utils::{collapse_whitespace, resolve_url, strip_thumbnail_suffix};

/// 图片网格出现的标志选择器
pub const PHOTO_GRID_SELECTOR: &str =
    r#"img[src*="yupoo"], .image, [class*="photo"], [class*="item"]"#;

/// 商品链接选择器，按优先级排列
pub const ITEM_SELECTORS: &[&str] = &[
    r#"a[href*="?uid="]"#,
    r#"a[href*="/albums/"][href*="?"]"#,
    ".photo-item a",
    ".image-item a",
    r#"[class*="photo"] a[href]"#,
    r#"[class*="item"] a[href]"#,
];

/// 图片地址属性，懒加载属性优先
const IMAGE_ATTRS: &[&str] = &["data-src", "src", "data-original"];

static ITEM_STRATEGIES: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    ITEM_SELECTORS
        .iter()
        .map(|s| (*s, Selector::parse(s).expect("invalid item selector")))
        .collect()
});

static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// 相册页中的候选商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCandidate {
    pub href: String,
    pub title: String,
    pub image_url: String,
}

impl ItemCandidate {
    fn from_anchor(anchor: ElementRef<'_>) -> Self {
        let img = anchor.select(&IMG).next();

        let image_url = img
            .and_then(|img| {
                IMAGE_ATTRS
                    .iter()
                    .filter_map(|attr| img.value().attr(attr))
                    .map(str::trim)
                    .find(|src| !src.is_empty())
            })
            .map(strip_thumbnail_suffix)
            .unwrap_or_default()
            .to_string();

        let title_attr = anchor.value().attr("title").map(str::trim).unwrap_or_default();
        let alt = img
            .and_then(|img| img.value().attr("alt"))
            .map(str::trim)
            .unwrap_or_default();
        let text = collapse_whitespace(&anchor.text().collect::<String>());

        let title = [title_attr, alt, text.as_str()]
            .into_iter()
            .find(|t| !t.is_empty())
            .unwrap_or_default()
            .to_string();

        Self {
            href: anchor.value().attr("href").unwrap_or_default().trim().to_string(),
            title,
            image_url,
        }
    }

    fn is_usable(&self) -> bool {
        !self.href.is_empty() && !self.image_url.is_empty()
    }
}

/// 从相册页 HTML 中提取候选商品
///
/// 使用第一个产生可用候选（同时有链接与图片）的选择器，不合并各策略结果
pub fn extract_item_candidates(html: &str) -> Vec<ItemCandidate> {
    let document = Html::parse_document(html);

    for (name, selector) in ITEM_STRATEGIES.iter() {
        let candidates: Vec<ItemCandidate> = document
            .select(selector)
            .map(ItemCandidate::from_anchor)
            .filter(ItemCandidate::is_usable)
            .collect();

        if !candidates.is_empty() {
            debug!(selector = name, count = candidates.len(), "Matched item links");
            return candidates;
        }
    }

    Vec::new()
}

/// 将候选商品转换为商品记录
///
/// 按 DOM 顺序最多保留 `max_items` 个候选；链接无法规范化的候选被静默丢弃，
/// 无法解析的图片地址按原样保留
///
/// # 参数
///
/// * `candidates` - 候选商品
/// * `album_url` - 相册页 URL，用于解析相对地址
/// * `album_title` - 相册标题
/// * `max_items` - 商品数量上限
/// * `policy` - URL 规范化策略
pub fn build_items(
    candidates: Vec<ItemCandidate>,
    album_url: &str,
    album_title: &str,
    max_items: usize,
    policy: &UrlPolicy,
) -> Vec<Item> {
    let Ok(album) = Url::parse(album_url) else {
        return Vec::new();
    };

    candidates
        .into_iter()
        .take(max_items)
        .enumerate()
        .filter_map(|(index, candidate)| {
            let item_url = policy.normalize(&candidate.href, album_url)?;
            // An image source that cannot be joined is kept as written
            let image_url = resolve_url(&album, &candidate.image_url)
                .map(|url| url.to_string())
                .unwrap_or(candidate.image_url);

            let sku = extract_sku(&candidate.title);
            let title = if candidate.title.is_empty() {
                format!("Item {}", index + 1)
            } else {
                candidate.title
            };

            Some(Item::new(sku, &title, album_title, image_url, item_url))
        })
        .collect()
}

/// 从相册页 HTML 中提取商品记录
pub fn extract_items_from_html(
    html: &str,
    album_url: &str,
    album_title: &str,
    max_items: usize,
    policy: &UrlPolicy,
) -> Vec<Item> {
    build_items(
        extract_item_candidates(html),
        album_url,
        album_title,
        max_items,
        policy,
    )
}

/// 相册商品提取器
pub struct AlbumItemExtractor {
    renderer: Arc<dyn PageRenderer>,
    config: Arc<CrawlConfig>,
    policy: UrlPolicy,
    capture: DebugCapture,
}

impl AlbumItemExtractor {
    pub fn new(
        renderer: Arc<dyn PageRenderer>,
        config: Arc<CrawlConfig>,
        policy: UrlPolicy,
        capture: DebugCapture,
    ) -> Self {
        Self {
            renderer,
            config,
            policy,
            capture,
        }
    }

    /// 提取单个相册的商品
    ///
    /// 任何渲染或提取错误都视为该相册没有商品，爬取继续进行
    ///
    /// # 参数
    ///
    /// * `album_url` - 相册 URL
    /// * `album_title` - 相册标题
    /// * `max_items` - 商品数量上限
    /// * `album_index` - 相册序号（从1开始），用于命名调试产物
    pub async fn extract_items(
        &self,
        album_url: &str,
        album_title: &str,
        max_items: usize,
        album_index: usize,
    ) -> Vec<Item> {
        let mut session = match self.renderer.open_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Failed to open browser session for {}", album_url);
                return Vec::new();
            }
        };

        let outcome = self
            .extract_in(session.as_mut(), album_url, album_title, max_items, album_index)
            .await;

        if let Err(e) = session.close().await {
            debug!(error = %e, "Browser session close reported an error");
        }

        outcome.unwrap_or_else(|e| {
            if e.is_timeout() {
                warn!("Timed out loading album {}", album_url);
            } else {
                warn!(error = %e, "Error scraping album {}", album_url);
            }
            Vec::new()
        })
    }

    async fn extract_in(
        &self,
        session: &mut dyn BrowserSession,
        album_url: &str,
        album_title: &str,
        max_items: usize,
        album_index: usize,
    ) -> Result<Vec<Item>, EngineError> {
        let options = RenderOptions::from_settings(&self.config.browser);

        session.navigate(album_url, &options).await?;
        self.capture
            .capture(session, &format!("album-{}", album_index))
            .await;

        if let Err(e) = session
            .wait_for_selector(PHOTO_GRID_SELECTOR, self.config.browser.grid_wait())
            .await
        {
            debug!(error = %e, "Photo grid did not appear, extracting what is present");
        }

        let html = session.content().await?;
        Ok(extract_items_from_html(
            &html,
            album_url,
            album_title,
            max_items,
            &self.policy,
        ))
    }
}
