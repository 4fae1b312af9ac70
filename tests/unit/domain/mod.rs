// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层单元测试
mod discovery_service_test;
mod item_extraction_service_test;
