// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::url_utils::truncate_chars;
use serde::{Deserialize, Serialize};

/// 商品标题的最大字符数
pub const MAX_TITLE_CHARS: usize = 200;

/// 相册标题的最大字符数
pub const MAX_ALBUM_CHARS: usize = 100;

/// 商品记录
///
/// 字段顺序即数据集的列顺序：`sku, title, album, image_url, item_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 推断出的商品编码
    pub sku: Option<String>,
    /// 商品标题（最多200字符）
    pub title: String,
    /// 所属相册标题（最多100字符）
    pub album: String,
    /// 原图绝对URL
    pub image_url: String,
    /// 商品页绝对URL
    pub item_url: String,
}

impl Item {
    /// 创建商品记录，并按上限截断标题与相册名
    pub fn new(
        sku: Option<String>,
        title: &str,
        album: &str,
        image_url: impl Into<String>,
        item_url: impl Into<String>,
    ) -> Self {
        Self {
            sku,
            title: truncate_chars(title, MAX_TITLE_CHARS),
            album: truncate_chars(album, MAX_ALBUM_CHARS),
            image_url: image_url.into(),
            item_url: item_url.into(),
        }
    }

    pub fn has_sku(&self) -> bool {
        self.sku.as_deref().is_some_and(|s| !s.is_empty())
    }
}
