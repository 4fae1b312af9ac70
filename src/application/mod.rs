// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 编排一次完整的爬取运行：发现、逐相册抓取、礼貌延迟、写入与汇总
pub mod crawl_orchestrator;
pub mod politeness;
pub mod summary;
