// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

/// 相册引用
///
/// 由相册发现服务产生，编排器使用一次后即丢弃
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumReference {
    /// 规范化后的相册URL
    pub url: String,
    /// 相册标题
    pub title: String,
}

impl AlbumReference {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// 单个相册的抓取统计，仅用于运行结束时的汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumStat {
    pub album: String,
    pub items: usize,
}
