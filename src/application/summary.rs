// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing::info;

use crate::domain::models::{AlbumReference, CrawlReport, Item};
use crate::infrastructure::dataset_writer::HEADER;
use crate::utils::url_utils::truncate_chars;

const ALBUM_PREVIEW_LEN: usize = 10;
const ROW_PREVIEW_LEN: usize = 5;

/// 记录前10个发现的相册
pub fn log_album_preview(albums: &[AlbumReference]) {
    info!("Found {} albums, first album URLs discovered:", albums.len());
    for (i, album) in albums.iter().take(ALBUM_PREVIEW_LEN).enumerate() {
        info!("  {}. {}", i + 1, album.title);
        info!("     {}", album.url);
    }
}

/// 单行数据预览
pub fn preview_row(item: &Item) -> String {
    let sku = item.sku.as_deref().unwrap_or("(none)");
    let mut title = truncate_chars(&item.title, 40);
    if item.title.chars().count() > 40 {
        title.push_str("...");
    }
    format!("{},\"{}\",{},...", sku, title, truncate_chars(&item.album, 20))
}

/// 记录运行汇总
pub fn log_summary(report: &CrawlReport) {
    info!("{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!(
        albums = report.albums.len(),
        items = report.items.len(),
        with_sku = report.items_with_sku(),
        without_sku = report.items_without_sku(),
        "Albums scraped: {}, total items: {}",
        report.albums.len(),
        report.items.len()
    );
    info!("Items with SKU: {}", report.items_with_sku());
    info!("Items without SKU: {}", report.items_without_sku());

    info!("Item counts per album:");
    for stat in &report.stats {
        info!("  {}: {} items", stat.album, stat.items);
    }

    info!("First {} CSV rows:", ROW_PREVIEW_LEN);
    info!("  {}", HEADER.join(","));
    for item in report.items.iter().take(ROW_PREVIEW_LEN) {
        info!("  {}", preview_row(item));
    }

    info!("Output: {}", report.output_path.display());
    info!("Debug artifacts: {}", report.debug_dir.display());
}
