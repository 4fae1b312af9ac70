// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理爬虫的运行配置，包括爬取范围、输出路径、浏览器和目标站点等配置
pub mod settings;
