// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了爬虫的核心数据结构，包括：
/// - 相册引用（album）：发现阶段产生的相册URL与标题，以及每个相册的统计
/// - 商品（item）：从相册中提取出的单条商品记录
/// - 爬取报告（crawl_report）：一次运行的聚合结果
pub mod album;
pub mod crawl_report;
pub mod item;

pub use album::{AlbumReference, AlbumStat};
pub use crawl_report::CrawlReport;
pub use item::Item;
