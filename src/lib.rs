// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 爬取流程编排、礼貌延迟与运行汇总
pub mod application;

/// 配置模块
///
/// 处理爬虫的运行配置、配置文件和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心数据模型、相册发现与商品提取服务
pub mod domain;

/// 引擎模块
///
/// 浏览器渲染引擎与URL规范化校验
pub mod engines;

/// 基础设施模块
///
/// 调试产物与数据集的文件输出
pub mod infrastructure;

/// 工具模块
///
/// 提供日志、错误类型等通用辅助功能
pub mod utils;
