// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 相册发现（discovery_service）：从列表页找出相册
/// - 商品提取（item_extraction_service）：从相册页提取商品
/// - 商品编码（sku_extractor）：从文本中推断商品编码
pub mod discovery_service;
pub mod item_extraction_service;
pub mod sku_extractor;
