// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::domain::models::Item;
use crate::utils::errors::DatasetError;

/// 数据集表头，列顺序固定
pub const HEADER: [&str; 5] = ["sku", "title", "album", "image_url", "item_url"];

/// 将商品写入 CSV 数据集
///
/// 覆盖已存在的文件；每个字段都用双引号包裹，内部双引号加倍转义
///
/// # 参数
///
/// * `items` - 聚合后的商品
/// * `path` - 输出路径，父目录不存在时自动创建
pub fn write_items(items: &[Item], path: &Path) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    writeln!(file, "{}", HEADER.join(","))?;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(file);

    for item in items {
        writer.write_record([
            item.sku.as_deref().unwrap_or_default(),
            item.title.as_str(),
            item.album.as_str(),
            item.image_url.as_str(),
            item.item_url.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// 读取数据集，供下游导入使用
pub fn read_items(path: &Path) -> Result<Vec<Item>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut items = Vec::new();
    for record in reader.deserialize() {
        items.push(record?);
    }
    Ok(items)
}
