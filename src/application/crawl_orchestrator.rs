// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{error, info};

use crate::application::politeness::PolitenessDelay;
use crate::application::summary;
use crate::config::settings::CrawlConfig;
use crate::domain::models::{AlbumStat, CrawlReport, Item};
use crate::domain::services::discovery_service::AlbumDiscoveryService;
use crate::domain::services::item_extraction_service::AlbumItemExtractor;
use crate::engines::traits::PageRenderer;
use crate::engines::validators::UrlPolicy;
use crate::infrastructure::dataset_writer;
use crate::infrastructure::debug_capture::DebugCapture;
use crate::utils::errors::CrawlError;

/// 爬取编排器
///
/// 依次执行：发现相册 → 逐个抓取相册 → 聚合 → 写入数据集 → 汇总。
/// 相册严格串行抓取，相邻两次抓取之间插入礼貌延迟
pub struct CrawlOrchestrator {
    config: Arc<CrawlConfig>,
    discovery: AlbumDiscoveryService,
    extractor: AlbumItemExtractor,
    capture: DebugCapture,
    delay: PolitenessDelay,
}

impl CrawlOrchestrator {
    /// 创建编排器
    ///
    /// # 参数
    ///
    /// * `config` - 只读运行配置
    /// * `renderer` - 页面渲染器
    pub fn new(config: Arc<CrawlConfig>, renderer: Arc<dyn PageRenderer>) -> Self {
        let policy = UrlPolicy::from_settings(&config.site);
        let capture = DebugCapture::new(config.output.debug_dir.clone());
        let delay = PolitenessDelay::from_settings(&config.crawl);

        Self {
            discovery: AlbumDiscoveryService::new(
                renderer.clone(),
                config.clone(),
                policy.clone(),
                capture.clone(),
            ),
            extractor: AlbumItemExtractor::new(renderer, config.clone(), policy, capture.clone()),
            capture,
            delay,
            config,
        }
    }

    /// 替换礼貌延迟（例如注入固定种子）
    pub fn with_delay(mut self, delay: PolitenessDelay) -> Self {
        self.delay = delay;
        self
    }

    /// 执行一次完整爬取
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 至少抓取到一个商品且数据集已写入
    /// * `Err(CrawlError)` - 未发现相册、未抓取到商品或数据集写入失败
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlError> {
        self.capture.prepare().await;

        let albums = self.discovery.discover_albums().await;
        if albums.is_empty() {
            error!("No albums found. Possible reasons:");
            error!("   - The account is private or closed");
            error!("   - The account requires login");
            error!("   - The listing markup changed");
            error!(
                "   - Check {} and {} for details",
                self.capture.html_path("albums").display(),
                self.capture.screenshot_path("albums").display()
            );
            return Err(CrawlError::NoAlbumsDiscovered {
                base_url: self.config.crawl.base_url.clone(),
            });
        }

        summary::log_album_preview(&albums);

        let max_items = self.config.crawl.max_items_per_album;
        let total = albums.len();
        let mut items: Vec<Item> = Vec::new();
        let mut stats: Vec<AlbumStat> = Vec::with_capacity(total);

        info!("Scraping {} albums...", total);
        for (index, album) in albums.iter().enumerate() {
            let position = index + 1;
            let album_items = self
                .extractor
                .extract_items(&album.url, &album.title, max_items, position)
                .await;

            if album_items.is_empty() {
                info!("Album {:02}/{} [{}]... no items", position, total, album.title);
            } else {
                info!(
                    "Album {:02}/{} [{}]... {} items",
                    position,
                    total,
                    album.title,
                    album_items.len()
                );
            }

            stats.push(AlbumStat {
                album: album.title.clone(),
                items: album_items.len(),
            });
            items.extend(album_items);

            if position < total {
                self.delay.pause().await;
            }
        }

        if items.is_empty() {
            error!(
                "No items scraped. Check debug artifacts in {}",
                self.capture.dir().display()
            );
            return Err(CrawlError::NoItemsScraped {
                albums: total,
                debug_dir: self.capture.dir().to_path_buf(),
            });
        }

        let output_path = self.config.output.csv_path.clone();
        info!("Saving {} items to {}", items.len(), output_path.display());
        dataset_writer::write_items(&items, &output_path)?;

        let report = CrawlReport {
            albums,
            items,
            stats,
            output_path,
            debug_dir: self.capture.dir().to_path_buf(),
        };
        summary::log_summary(&report);

        Ok(report)
    }
}
