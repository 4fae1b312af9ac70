// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, EventLifecycleEvent, FrameId, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{BrowserSession, EngineError, PageRenderer, RenderOptions};

/// 远程 Chrome 调试地址的环境变量
pub const REMOTE_URL_ENV: &str = "CHROMIUM_REMOTE_DEBUGGING_URL";

/// 轮询 DOM 状态的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 网络空闲的生命周期事件名
const NETWORK_IDLE: &str = "networkIdle";

/// Chromium 渲染器
///
/// 基于chromiumoxide实现，每个会话启动（或连接）一个独立的浏览器
pub struct ChromiumRenderer {
    settings: BrowserSettings,
}

impl ChromiumRenderer {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    fn remote_debugging_url(&self) -> Option<String> {
        self.settings
            .remote_debugging_url
            .clone()
            .or_else(|| std::env::var(REMOTE_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
    }

    async fn start_browser(&self) -> Result<(Browser, JoinHandle<()>, bool), EngineError> {
        let remote_url = self.remote_debugging_url();

        let (browser, mut handler) = if let Some(ref url) = remote_url {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url)
                .await
                .map_err(|e| EngineError::Launch(format!("Failed to connect to remote Chrome: {}", e)))?
        } else {
            let mut builder = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(self.settings.navigation_timeout())
                .window_size(1920, 1080)
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage");

            if !self.settings.headless {
                builder = builder.with_head();
            }

            Browser::launch(builder.build().map_err(EngineError::Launch)?)
                .await
                .map_err(|e| EngineError::Launch(e.to_string()))?
        };

        // Drive the CDP connection until the browser goes away
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok((browser, handle, remote_url.is_none()))
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    /// 打开浏览器会话
    ///
    /// # 返回值
    ///
    /// * `Ok(Box<dyn BrowserSession>)` - 已设置桌面浏览器标识的空白页会话
    /// * `Err(EngineError)` - 浏览器启动或建页失败
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, EngineError> {
        let (browser, handler, owns_browser) = self.start_browser().await?;

        let mut session = ChromiumSession {
            browser: Some(browser),
            page: None,
            handler: Some(handler),
            owns_browser,
            lifecycle_events: false,
            current_url: String::from("about:blank"),
        };

        let new_page = session.browser_ref()?.new_page("about:blank").await;
        let page = match new_page {
            Ok(page) => page,
            Err(e) => {
                let _ = session.close().await;
                return Err(EngineError::Launch(e.to_string()));
            }
        };

        if let Err(e) = page.set_user_agent(self.settings.user_agent.as_str()).await {
            tracing::warn!("Failed to set user agent: {}", e);
        }

        match page.execute(SetLifecycleEventsEnabledParams::new(true)).await {
            Ok(_) => session.lifecycle_events = true,
            Err(e) => {
                tracing::warn!("Lifecycle events unavailable, falling back to readyState: {}", e)
            }
        }

        session.page = Some(page);
        Ok(Box::new(session))
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// 单个 Chromium 页面会话
///
/// 优先通过 `close` 显式释放；遗漏时由 `Drop` 在后台完成清理
pub struct ChromiumSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    owns_browser: bool,
    lifecycle_events: bool,
    current_url: String,
}

impl ChromiumSession {
    fn browser_ref(&self) -> Result<&Browser, EngineError> {
        self.browser.as_ref().ok_or(EngineError::Closed)
    }

    fn page_ref(&self) -> Result<&Page, EngineError> {
        self.page.as_ref().ok_or(EngineError::Closed)
    }
}

/// 判断生命周期事件是否为主框架的网络空闲
fn is_network_idle(event: &EventLifecycleEvent, main_frame: Option<&FrameId>) -> bool {
    event.name == NETWORK_IDLE && main_frame.is_none_or(|frame| &event.frame_id == frame)
}

/// 等待主框架的 `networkIdle` 事件
///
/// 事件流提前结束时退回到 `document.readyState` 轮询
async fn wait_for_network_idle<S>(page: &Page, events: &mut S)
where
    S: futures::Stream<Item = std::sync::Arc<EventLifecycleEvent>> + Unpin,
{
    let main_frame = page.mainframe().await.ok().flatten();

    while let Some(event) = events.next().await {
        if is_network_idle(&event, main_frame.as_ref()) {
            return;
        }
    }

    wait_until_ready(page).await;
}

/// 轮询直到 `document.readyState` 为 `complete`
async fn wait_until_ready(page: &Page) {
    loop {
        let state = page
            .evaluate("document.readyState")
            .await
            .ok()
            .and_then(|result| result.into_value::<String>().ok());

        if state.as_deref() == Some("complete") {
            return;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str, options: &RenderOptions) -> Result<(), EngineError> {
        let page = self.page_ref()?;

        // Subscribe before navigating so the idle event cannot be missed
        let mut lifecycle = if self.lifecycle_events {
            page.event_listener::<EventLifecycleEvent>().await.ok()
        } else {
            None
        };

        tokio::time::timeout(options.navigation_timeout, async {
            page.goto(url).await.map_err(|e| EngineError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            match lifecycle.as_mut() {
                Some(events) => wait_for_network_idle(page, events).await,
                None => wait_until_ready(page).await,
            }
            Ok::<(), EngineError>(())
        })
        .await
        .map_err(|_| EngineError::Timeout(options.navigation_timeout))??;

        tokio::time::sleep(options.settle).await;
        self.current_url = url.to_string();
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), EngineError> {
        let page = self.page_ref()?;

        tokio::time::timeout(timeout, async {
            while page.find_element(selector).await.is_err() {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await
        .map_err(|_| EngineError::Timeout(timeout))
    }

    async fn content(&mut self) -> Result<String, EngineError> {
        self.page_ref()?
            .content()
            .await
            .map_err(|e| EngineError::Other(e.to_string()))
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, EngineError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();

        self.page_ref()?
            .screenshot(params)
            .await
            .map_err(|e| EngineError::Other(format!("Page screenshot failed: {}", e)))
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        let mut first_error = None;

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::debug!("Page close failed for {}: {}", self.current_url, e);
                first_error.get_or_insert(EngineError::Other(e.to_string()));
            }
        }

        if let Some(mut browser) = self.browser.take() {
            // A remote browser is shared, only our page belongs to us
            if self.owns_browser {
                if let Err(e) = browser.close().await {
                    first_error.get_or_insert(EngineError::Other(e.to_string()));
                }
                let _ = browser.wait().await;
            }
        }

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if self.page.is_none() && self.browser.is_none() {
            return;
        }

        let page = self.page.take();
        let browser = self.browser.take();
        let handler = self.handler.take();
        let owns_browser = self.owns_browser;
        let url = std::mem::take(&mut self.current_url);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if let Some(page) = page {
                        let _ = page.close().await;
                    }
                    if let (Some(mut browser), true) = (browser, owns_browser) {
                        let _ = browser.close().await;
                        let _ = browser.wait().await;
                    }
                    if let Some(handler) = handler {
                        handler.abort();
                    }
                    tracing::debug!("Browser session for {} cleaned up on drop", url);
                });
            }
            Err(_) => {
                tracing::warn!("No runtime available to close browser session for {}", url);
            }
        }
    }
}
