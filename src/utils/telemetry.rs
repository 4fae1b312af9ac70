// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 默认日志过滤器
pub const DEFAULT_FILTER: &str = "info,album_harvester=info";

/// 调试模式下的日志过滤器
pub const DEBUG_FILTER: &str = "info,album_harvester=debug";

/// 根据调试开关选择默认过滤器，`RUST_LOG` 始终优先
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// 初始化日志系统
///
/// 重复初始化（例如在测试中）会被静默忽略
pub fn init_telemetry(debug: bool) {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(debug).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
