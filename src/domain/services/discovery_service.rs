// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::settings::CrawlConfig;
use crate::domain::models::AlbumReference;
use crate::engines::traits::{BrowserSession, EngineError, PageRenderer, RenderOptions};
use crate::engines::validators::UrlPolicy;
use crate::infrastructure::debug_capture::DebugCapture;
use crate::utils::url_utils::collapse_whitespace;

/// 相册列表页的调试产物名称
pub const LISTING_CAPTURE_NAME: &str = "albums";

/// 标题全部为空时使用的默认相册名
pub const DEFAULT_ALBUM_TITLE: &str = "Album";

/// 相册卡片选择器，从最具体到最宽泛
pub const ALBUM_SELECTORS: &[&str] = &[
    ".album-item a",
    ".album-card a",
    r#"[class*="album"] a[href*="/albums/"]"#,
    r#"a[href*="/albums/"][href*="?"]"#,
    ".showalbum__children a",
];

static ALBUM_STRATEGIES: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    ALBUM_SELECTORS
        .iter()
        .map(|s| (*s, Selector::parse(s).expect("invalid album selector")))
        .collect()
});

static ANY_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

/// 页面中的候选相册链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumCandidate {
    pub href: String,
    pub title: String,
}

impl AlbumCandidate {
    fn from_anchor(anchor: ElementRef<'_>) -> Self {
        let href = anchor.value().attr("href").unwrap_or_default().to_string();
        let text = collapse_whitespace(&anchor.text().collect::<String>());
        let alt = anchor
            .select(&IMG)
            .next()
            .and_then(|img| img.value().attr("alt"))
            .map(str::trim)
            .unwrap_or_default();
        let title_attr = anchor.value().attr("title").map(str::trim).unwrap_or_default();

        let title = [text.as_str(), alt, title_attr]
            .into_iter()
            .find(|t| !t.is_empty())
            .unwrap_or_default()
            .to_string();

        Self { href, title }
    }
}

/// 使用单个选择器收集候选链接
fn select_candidates(document: &Html, selector: &Selector) -> Vec<AlbumCandidate> {
    document
        .select(selector)
        .map(AlbumCandidate::from_anchor)
        .collect()
}

/// 按 URL 去重并限制数量的收集器
struct AlbumCollector<'a> {
    base_url: &'a str,
    max_albums: usize,
    policy: &'a UrlPolicy,
    seen: HashSet<String>,
    albums: Vec<AlbumReference>,
}

impl<'a> AlbumCollector<'a> {
    fn new(base_url: &'a str, max_albums: usize, policy: &'a UrlPolicy) -> Self {
        Self {
            base_url,
            max_albums,
            policy,
            seen: HashSet::new(),
            albums: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.albums.len() >= self.max_albums
    }

    fn accept_all(&mut self, candidates: Vec<AlbumCandidate>) {
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            let Some(url) = self.policy.normalize(&candidate.href, self.base_url) else {
                continue;
            };
            if !self.policy.is_valid_album_url(&url, self.base_url) || !self.seen.insert(url.clone())
            {
                continue;
            }

            let title = if candidate.title.is_empty() {
                DEFAULT_ALBUM_TITLE.to_string()
            } else {
                candidate.title
            };
            self.albums.push(AlbumReference::new(url, title));
        }
    }
}

/// 从相册列表页 HTML 中提取相册
///
/// 依次尝试 [`ALBUM_SELECTORS`]，第一个产生有效相册的策略胜出，不合并各策略结果；
/// 全部落空时退回扫描页面上的所有链接
///
/// # 参数
///
/// * `html` - 渲染后的列表页 HTML
/// * `base_url` - 列表页 URL
/// * `max_albums` - 相册数量上限
/// * `policy` - URL 规范化与校验策略
pub fn extract_albums(
    html: &str,
    base_url: &str,
    max_albums: usize,
    policy: &UrlPolicy,
) -> Vec<AlbumReference> {
    let document = Html::parse_document(html);
    let mut collector = AlbumCollector::new(base_url, max_albums, policy);

    for (name, selector) in ALBUM_STRATEGIES.iter() {
        let candidates = select_candidates(&document, selector);
        if candidates.is_empty() {
            continue;
        }
        debug!(selector = name, count = candidates.len(), "Found potential albums");

        collector.accept_all(candidates);
        if !collector.albums.is_empty() {
            return collector.albums;
        }
    }

    debug!("No selector strategy matched, scanning every link");
    collector.accept_all(select_candidates(&document, &ANY_ANCHOR));
    collector.albums
}

/// 相册发现服务
///
/// 每次运行只执行一次发现
pub struct AlbumDiscoveryService {
    renderer: Arc<dyn PageRenderer>,
    config: Arc<CrawlConfig>,
    policy: UrlPolicy,
    capture: DebugCapture,
}

impl AlbumDiscoveryService {
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

    /// 发现卖家的相册
    ///
    /// 渲染或提取失败时返回空列表，由编排器决定如何终止
    pub async fn discover_albums(&self) -> Vec<AlbumReference> {
        let base_url = self.config.crawl.base_url.as_str();
        info!(renderer = self.renderer.name(), "Discovering albums at {}", base_url);

        let mut session = match self.renderer.open_session().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Failed to open browser session for album discovery");
                return Vec::new();
            }
        };

        let outcome = self.discover_in(session.as_mut()).await;

        if let Err(e) = session.close().await {
            debug!(error = %e, "Browser session close reported an error");
        }

        match outcome {
            Ok(albums) => {
                info!("Found {} valid albums", albums.len());
                albums
            }
            Err(e) => {
                warn!(error = %e, "Album discovery failed for {}", base_url);
                Vec::new()
            }
        }
    }

    async fn discover_in(
        &self,
        session: &mut dyn BrowserSession,
    ) -> Result<Vec<AlbumReference>, EngineError> {
        let base_url = self.config.crawl.base_url.as_str();
        let options = RenderOptions::from_settings(&self.config.browser);

        session.navigate(base_url, &options).await?;
        self.capture.capture(session, LISTING_CAPTURE_NAME).await;

        let html = session.content().await?;
        Ok(extract_albums(
            &html,
            base_url,
            self.config.crawl.max_albums,
            &self.policy,
        ))
    }
}
