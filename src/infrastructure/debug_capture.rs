// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::engines::traits::{BrowserSession, EngineError};

/// 调试产物写入错误
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Browser error: {0}")]
    Engine(#[from] EngineError),
}

/// 调试产物采集
///
/// 为每个访问过的页面保存渲染后的 HTML 与整页截图，
/// 任何失败都只记录日志，不影响爬取结果
#[derive(Debug, Clone)]
pub struct DebugCapture {
    dir: PathBuf,
}

impl DebugCapture {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn html_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.html", name))
    }

    pub fn screenshot_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.png", name))
    }

    /// 预先创建调试目录
    pub async fn prepare(&self) {
        if let Err(e) = fs::create_dir_all(&self.dir).await {
            tracing::warn!(
                error = %e,
                "Failed to create debug directory {}",
                self.dir.display()
            );
        }
    }

    /// 保存 `<dir>/<name>.html` 与 `<dir>/<name>.png`
    ///
    /// # 返回值
    ///
    /// 两个文件都写入成功时返回 `true`
    pub async fn capture(&self, session: &mut dyn BrowserSession, name: &str) -> bool {
        match self.try_capture(session, name).await {
            Ok(()) => {
                tracing::debug!("Saved {}.html and {}.png", name, name);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save debug artifacts for {}", name);
                false
            }
        }
    }

    async fn try_capture(
        &self,
        session: &mut dyn BrowserSession,
        name: &str,
    ) -> Result<(), CaptureError> {
        let html = session.content().await?;
        save(&self.html_path(name), html.as_bytes()).await?;

        let screenshot = session.screenshot().await?;
        save(&self.screenshot_path(name), &screenshot).await?;

        Ok(())
    }
}

async fn save(path: &Path, data: &[u8]) -> Result<(), std::io::Error> {
    // 确保目录存在
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await?;

    Ok(())
}
