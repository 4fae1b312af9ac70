// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use album_harvester::config::settings::{
    BrowserSettings, CrawlConfig, CrawlSettings, OutputSettings, SiteSettings,
};
use album_harvester::engines::traits::{BrowserSession, EngineError, PageRenderer, RenderOptions};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const BASE_URL: &str = "https://seller.x.yupoo.com/albums";

/// 伪造页面
#[derive(Debug, Clone)]
pub enum FakePage {
    Html(String),
    Timeout,
}

#[derive(Default)]
struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    visits: Mutex<Vec<String>>,
}

/// 内存渲染器，按 URL 返回预置 HTML
#[derive(Default)]
pub struct FakeRenderer {
    pages: Arc<HashMap<String, FakePage>>,
    counters: Arc<Counters>,
}

impl FakeRenderer {
    pub fn new(pages: Vec<(String, FakePage)>) -> Self {
        Self {
            pages: Arc::new(pages.into_iter().collect()),
            counters: Arc::default(),
        }
    }

    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    pub fn visits(&self) -> Vec<String> {
        self.counters.visits.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn open_session(&self) -> Result<Box<dyn BrowserSession>, EngineError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            pages: self.pages.clone(),
            counters: self.counters.clone(),
            current: None,
            closed: false,
        }))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

struct FakeSession {
    pages: Arc<HashMap<String, FakePage>>,
    counters: Arc<Counters>,
    current: Option<String>,
    closed: bool,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&mut self, url: &str, options: &RenderOptions) -> Result<(), EngineError> {
        self.counters.visits.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(FakePage::Html(html)) => {
                self.current = Some(html.clone());
                Ok(())
            }
            Some(FakePage::Timeout) => Err(EngineError::Timeout(options.navigation_timeout)),
            None => Err(EngineError::Navigation {
                url: url.to_string(),
                reason: "404".to_string(),
            }),
        }
    }

    async fn wait_for_selector(
        &mut self,
        _selector: &str,
        timeout: Duration,
    ) -> Result<(), EngineError> {
        match &self.current {
            Some(html) if html.contains("<img") => Ok(()),
            _ => Err(EngineError::Timeout(timeout)),
        }
    }

    async fn content(&mut self) -> Result<String, EngineError> {
        self.current.clone().ok_or(EngineError::Closed)
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, EngineError> {
        Ok(b"\x89PNG\r\n\x1a\nfake".to_vec())
    }

    async fn close(&mut self) -> Result<(), EngineError> {
        if !self.closed {
            self.closed = true;
            self.counters.closed.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// 构建指向临时目录的测试配置
pub fn test_config(base_url: &str, out_dir: &Path) -> CrawlConfig {
    CrawlConfig {
        crawl: CrawlSettings {
            base_url: base_url.to_string(),
            max_albums: 50,
            max_items_per_album: 500,
            delay_min_ms: 300,
            delay_max_ms: 800,
            delay_seed: Some(11),
        },
        output: OutputSettings {
            csv_path: out_dir.join("data/products.csv"),
            debug_dir: out_dir.join("debug"),
            debug: false,
        },
        browser: BrowserSettings {
            navigation_timeout_ms: 30_000,
            settle_ms: 0,
            grid_wait_ms: 5_000,
            user_agent: "test".to_string(),
            headless: true,
            remote_debugging_url: None,
        },
        site: SiteSettings {
            domain: "yupoo.com".to_string(),
            nav_denylist: vec![
                "/undefined".to_string(),
                "language".to_string(),
                "个人主页".to_string(),
                "homepage".to_string(),
            ],
        },
    }
}

/// 相册页面 URL
pub fn album_url(id: u32) -> String {
    format!("{}/{}?uid=1", BASE_URL, id)
}

/// 相册列表页：给定的相册加上两个导航链接
pub fn listing_html(album_ids: &[u32]) -> String {
    let mut html = String::from("<html><body><div class=\"albums\">");
    for id in album_ids {
        html.push_str(&format!(
            r#"<div class="album-item"><a href="/albums/{id}?uid=1"><span>Album {id}</span></a></div>"#
        ));
    }
    html.push_str(r#"<div class="album-item"><a href="/albums/900?uid=1&tab=language">English</a></div>"#);
    html.push_str(r#"<div class="album-item"><a href="/albums/901?uid=1&from=homepage">Home</a></div>"#);
    html.push_str("</div></body></html>");
    html
}

/// 含 `count` 个商品的相册页
pub fn album_html(id: u32, count: usize) -> String {
    let mut html = String::from("<html><body><div class=\"showalbum__children\">");
    for n in 1..=count {
        html.push_str(&format!(
            r#"<div class="image__main"><a href="/albums/{id}?uid=1&photo={n}" title="Tee AB-{id}{n:02}"><img data-src="https://photo.yupoo.com/seller/{id}/{n}.jpg!medium" src="data:image/gif;base64,R0lGOD"></a></div>"#
        ));
    }
    html.push_str("</div></body></html>");
    html
}
