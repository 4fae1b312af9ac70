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

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use album_harvester::application::crawl_orchestrator::CrawlOrchestrator;
use album_harvester::config::settings::{ConfigOverrides, CrawlConfig};
use album_harvester::engines::chromium_engine::ChromiumRenderer;
use album_harvester::engines::traits::PageRenderer;
use album_harvester::utils::errors::CrawlError;
use album_harvester::utils::telemetry;

#[derive(Debug, Parser)]
#[command(
    name = "album-harvester",
    version,
    about = "Crawls a seller's gallery albums and exports the items as CSV"
)]
struct Cli {
    /// Albums listing page of the seller
    #[arg(long, visible_alias = "baseUrl", value_name = "URL")]
    base_url: Option<String>,

    /// Maximum number of albums to visit
    #[arg(long, visible_alias = "maxAlbums", value_name = "N")]
    max_albums: Option<u32>,

    /// Maximum number of items kept per album
    #[arg(long, visible_alias = "maxItemsPerAlbum", value_name = "N")]
    max_items_per_album: Option<u32>,

    /// Output CSV path
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Directory for HTML snapshots and screenshots
    #[arg(long, value_name = "DIR")]
    debug_dir: Option<String>,

    /// Verbose logging
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Attach to a running Chrome instead of launching one
    #[arg(long, value_name = "URL")]
    remote_debugging_url: Option<String>,
}

impl Cli {
    fn overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url,
            max_albums: self.max_albums,
            max_items_per_album: self.max_items_per_album,
            csv_path: self.output,
            debug_dir: self.debug_dir,
            debug: self.debug.then_some(true),
            remote_debugging_url: self.remote_debugging_url,
        }
    }
}

/// 主函数
///
/// 加载配置、初始化日志并执行一次完整爬取，终止条件映射为非零退出码
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = CrawlConfig::load(cli.overrides()).context("Failed to load configuration")?;

    telemetry::init_telemetry(config.output.debug);
    info!("Album harvester starting");
    info!("Base URL: {}", config.crawl.base_url);
    info!("Max Albums: {}", config.crawl.max_albums);
    info!("Max Items per Album: {}", config.crawl.max_items_per_album);
    info!("Debug Mode: {}", if config.output.debug { "ON" } else { "OFF" });
    info!("Output: {}", config.output.csv_path.display());

    let renderer: Arc<dyn PageRenderer> = Arc::new(ChromiumRenderer::new(config.browser.clone()));
    let mut orchestrator = CrawlOrchestrator::new(Arc::new(config), renderer);

    match orchestrator.run().await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e @ (CrawlError::NoAlbumsDiscovered { .. } | CrawlError::NoItemsScraped { .. })) => {
            Ok(ExitCode::from(e.exit_code()))
        }
        Err(e) => {
            error!(error = %e, "Fatal error");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
