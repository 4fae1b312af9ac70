// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{album_html, album_url, FakePage, FakeRenderer};
use album_harvester::engines::traits::{PageRenderer, RenderOptions};
use album_harvester::infrastructure::debug_capture::DebugCapture;
use tempfile::TempDir;

#[tokio::test]
async fn test_capture_writes_html_and_screenshot() {
    let dir = TempDir::new().unwrap();
    let renderer = FakeRenderer::new(vec![(album_url(1), FakePage::Html(album_html(1, 2)))]);
    let capture = DebugCapture::new(dir.path().join("debug"));

    let mut session = renderer.open_session().await.unwrap();
    session
        .navigate(&album_url(1), &RenderOptions::default())
        .await
        .unwrap();

    assert!(capture.capture(session.as_mut(), "album-1").await);
    session.close().await.unwrap();

    let html = std::fs::read_to_string(capture.html_path("album-1")).unwrap();
    assert!(html.contains("showalbum__children"));
    let png = std::fs::read(capture.screenshot_path("album-1")).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn test_capture_failure_is_swallowed() {
    let dir = TempDir::new().unwrap();
    // 调试目录路径被普通文件占用
    let blocker = dir.path().join("debug");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let renderer = FakeRenderer::new(vec![(album_url(1), FakePage::Html(album_html(1, 1)))]);
    let capture = DebugCapture::new(&blocker);
    capture.prepare().await;

    let mut session = renderer.open_session().await.unwrap();
    session
        .navigate(&album_url(1), &RenderOptions::default())
        .await
        .unwrap();

    assert!(!capture.capture(session.as_mut(), "albums").await);
    assert!(!capture.html_path("albums").exists());
}

#[tokio::test]
async fn test_capture_without_page_reports_failure() {
    let dir = TempDir::new().unwrap();
    let renderer = FakeRenderer::default();
    let capture = DebugCapture::new(dir.path());

    let mut session = renderer.open_session().await.unwrap();
    assert!(!capture.capture(session.as_mut(), "albums").await);
}

#[test]
fn test_artifact_paths() {
    let capture = DebugCapture::new("data/yupoo/debug");
    assert_eq!(
        capture.html_path("album-3"),
        std::path::Path::new("data/yupoo/debug/album-3.html")
    );
    assert_eq!(
        capture.screenshot_path("albums"),
        std::path::Path::new("data/yupoo/debug/albums.png")
    );
}
