// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供文件系统集成：调试产物与数据集输出
pub mod dataset_writer;
pub mod debug_capture;
