// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use thiserror::Error;

/// 数据集写入错误类型
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// 爬取流程错误类型
///
/// 前两个变体是终止条件而非程序缺陷，由 `main` 转换为非零退出码
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("no albums discovered at {base_url}")]
    NoAlbumsDiscovered { base_url: String },

    #[error("{albums} albums discovered but no items scraped (see {})", .debug_dir.display())]
    NoItemsScraped { albums: usize, debug_dir: PathBuf },

    #[error("failed to write dataset: {0}")]
    Dataset(#[from] DatasetError),
}

impl CrawlError {
    /// 进程退出码
    ///
    /// # 返回值
    ///
    /// * `2` - 未发现任何相册
    /// * `3` - 发现了相册但没有抓取到任何商品
    /// * `1` - 其他错误
    pub fn exit_code(&self) -> u8 {
        match self {
            CrawlError::NoAlbumsDiscovered { .. } => 2,
            CrawlError::NoItemsScraped { .. } => 3,
            _ => 1,
        }
    }
}
