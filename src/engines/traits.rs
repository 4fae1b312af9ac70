// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::config::settings::BrowserSettings;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器启动或连接失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 页面导航失败
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },
    /// 超时
    #[error("Timeout after {0:?}")]
    Timeout(Duration),
    /// 会话已关闭
    #[error("Session already closed")]
    Closed,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 判断错误是否为超时（导航超时或等待选择器超时）
    pub fn is_timeout(&self) -> bool {
        matches!(self, EngineError::Timeout(_))
    }
}

/// 页面渲染参数
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// 导航与网络稳定的总超时
    pub navigation_timeout: Duration,
    /// 加载完成后的固定等待，让延迟绑定的 DOM 变更生效
    pub settle: Duration,
}

impl RenderOptions {
    pub fn from_settings(settings: &BrowserSettings) -> Self {
        Self {
            navigation_timeout: settings.navigation_timeout(),
            settle: settings.settle(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(30),
            settle: Duration::from_secs(2),
        }
    }
}

/// 浏览器会话
///
/// 一个会话对应一个已打开的页面；调用方必须在所有退出路径上调用 `close`
#[async_trait]
pub trait BrowserSession: Send {
    /// 加载 URL 并等待页面稳定
    async fn navigate(&mut self, url: &str, options: &RenderOptions) -> Result<(), EngineError>;

    /// 等待匹配选择器的元素出现
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), EngineError>;

    /// 获取当前渲染后的 HTML
    async fn content(&mut self) -> Result<String, EngineError>;

    /// 截取整页 PNG 截图
    async fn screenshot(&mut self) -> Result<Vec<u8>, EngineError>;

    /// 释放会话，重复调用无副作用
    async fn close(&mut self) -> Result<(), EngineError>;
}

/// 页面渲染器特质
///
/// 负责创建能执行站点客户端脚本的浏览器会话
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// 打开新的浏览器会话
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, EngineError>;

    /// 渲染器名称
    fn name(&self) -> &'static str;
}
