// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;

use super::album::{AlbumReference, AlbumStat};
use super::item::Item;

/// 一次完整爬取的结果
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// 发现的相册（按访问顺序）
    pub albums: Vec<AlbumReference>,
    /// 聚合后的商品（按相册访问顺序）
    pub items: Vec<Item>,
    /// 每个尝试过的相册一条统计
    pub stats: Vec<AlbumStat>,
    /// 数据集输出路径
    pub output_path: PathBuf,
    /// 调试产物目录
    pub debug_dir: PathBuf,
}

impl CrawlReport {
    pub fn items_with_sku(&self) -> usize {
        self.items.iter().filter(|item| item.has_sku()).count()
    }

    pub fn items_without_sku(&self) -> usize {
        self.items.len() - self.items_with_sku()
    }
}
