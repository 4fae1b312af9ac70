// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// 默认的卖家相册列表页
pub const DEFAULT_BASE_URL: &str = "https://czyyy268.x.yupoo.com/albums";

/// 默认的浏览器标识（桌面版 Chrome）
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "ALBUM_HARVESTER";

/// 爬虫运行配置
///
/// 在启动时构建一次，之后只读，并显式传递给每个组件
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// 爬取范围与礼貌延迟配置
    pub crawl: CrawlSettings,
    /// 输出配置
    pub output: OutputSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 目标站点配置
    pub site: SiteSettings,
}

/// 爬取范围与礼貌延迟配置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 相册列表页URL
    pub base_url: String,
    /// 最多访问的相册数量
    pub max_albums: usize,
    /// 每个相册最多提取的商品数量
    pub max_items_per_album: usize,
    /// 相册之间的最小延迟（毫秒）
    pub delay_min_ms: u64,
    /// 相册之间的最大延迟（毫秒）
    pub delay_max_ms: u64,
    /// 延迟随机数种子（用于可复现的运行）
    pub delay_seed: Option<u64>,
}

/// 输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    /// 数据集CSV路径
    pub csv_path: PathBuf,
    /// 调试产物目录
    pub debug_dir: PathBuf,
    /// 调试开关（提升日志级别）
    pub debug: bool,
}

/// 浏览器配置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 页面导航超时（毫秒）
    pub navigation_timeout_ms: u64,
    /// 页面加载后的稳定等待时间（毫秒）
    pub settle_ms: u64,
    /// 等待图片网格出现的超时（毫秒）
    pub grid_wait_ms: u64,
    /// 浏览器标识
    pub user_agent: String,
    /// 是否无头模式
    pub headless: bool,
    /// 远程 Chrome 调试地址
    pub remote_debugging_url: Option<String>,
}

/// 目标站点配置
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// 站点域名族
    pub domain: String,
    /// 导航/语言/个人主页链接的拒绝列表（不区分大小写的子串）
    pub nav_denylist: Vec<String>,
}

/// 命令行覆盖项，优先级最高
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub max_albums: Option<u32>,
    pub max_items_per_album: Option<u32>,
    pub csv_path: Option<String>,
    pub debug_dir: Option<String>,
    pub debug: Option<bool>,
    pub remote_debugging_url: Option<String>,
}

impl CrawlConfig {
    /// 加载配置
    ///
    /// 依次叠加：内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// `ALBUM_HARVESTER__*` 环境变量以及命令行覆盖项
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlConfig)` - 成功加载并通过校验的配置
    /// * `Err(ConfigError)` - 配置加载或校验失败
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Crawl scope
            .set_default("crawl.base_url", DEFAULT_BASE_URL)?
            .set_default("crawl.max_albums", 50)?
            .set_default("crawl.max_items_per_album", 500)?
            .set_default("crawl.delay_min_ms", 300)?
            .set_default("crawl.delay_max_ms", 800)?
            // Output
            .set_default("output.csv_path", "data/yupoo/products.csv")?
            .set_default("output.debug_dir", "data/yupoo/debug")?
            .set_default("output.debug", false)?
            // Browser
            .set_default("browser.navigation_timeout_ms", 30_000)?
            .set_default("browser.settle_ms", 2_000)?
            .set_default("browser.grid_wait_ms", 5_000)?
            .set_default("browser.user_agent", DEFAULT_USER_AGENT)?
            .set_default("browser.headless", true)?
            // Site
            .set_default("site.domain", "yupoo.com")?
            .set_default(
                "site.nav_denylist",
                vec!["/undefined", "language", "个人主页", "homepage"],
            )?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("site.nav_denylist"),
            )
            .set_override_option("crawl.base_url", overrides.base_url)?
            .set_override_option("crawl.max_albums", overrides.max_albums.map(i64::from))?
            .set_override_option(
                "crawl.max_items_per_album",
                overrides.max_items_per_album.map(i64::from),
            )?
            .set_override_option("output.csv_path", overrides.csv_path)?
            .set_override_option("output.debug_dir", overrides.debug_dir)?
            .set_override_option("output.debug", overrides.debug)?
            .set_override_option(
                "browser.remote_debugging_url",
                overrides.remote_debugging_url,
            )?;

        let config: CrawlConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置的一致性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = Url::parse(&self.crawl.base_url).map_err(|e| {
            ConfigError::Message(format!("invalid base url {}: {}", self.crawl.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "base url must be http(s): {}",
                self.crawl.base_url
            )));
        }
        if self.crawl.max_albums == 0 {
            return Err(ConfigError::Message("max_albums must be at least 1".into()));
        }
        if self.crawl.max_items_per_album == 0 {
            return Err(ConfigError::Message(
                "max_items_per_album must be at least 1".into(),
            ));
        }
        if self.crawl.delay_min_ms > self.crawl.delay_max_ms {
            return Err(ConfigError::Message(format!(
                "delay_min_ms ({}) exceeds delay_max_ms ({})",
                self.crawl.delay_min_ms, self.crawl.delay_max_ms
            )));
        }
        Ok(())
    }
}

impl BrowserSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn grid_wait(&self) -> Duration {
        Duration::from_millis(self.grid_wait_ms)
    }
}
