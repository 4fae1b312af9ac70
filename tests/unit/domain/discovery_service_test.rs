// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{listing_html, test_config, FakePage, FakeRenderer, BASE_URL};
use album_harvester::domain::services::discovery_service::AlbumDiscoveryService;
use album_harvester::engines::validators::UrlPolicy;
use album_harvester::infrastructure::debug_capture::DebugCapture;
use std::sync::Arc;
use tempfile::TempDir;

fn service(renderer: Arc<FakeRenderer>, dir: &TempDir, max_albums: usize) -> AlbumDiscoveryService {
    let mut config = test_config(BASE_URL, dir.path());
    config.crawl.max_albums = max_albums;
    let policy = UrlPolicy::from_settings(&config.site);
    let capture = DebugCapture::new(config.output.debug_dir.clone());
    AlbumDiscoveryService::new(renderer, Arc::new(config), policy, capture)
}

#[tokio::test]
async fn test_discovery_skips_navigation_links_and_captures_listing() {
    let dir = TempDir::new().unwrap();
    let renderer = Arc::new(FakeRenderer::new(vec![(
        BASE_URL.to_string(),
        FakePage::Html(listing_html(&[1, 2, 3])),
    )]));

    let albums = service(renderer.clone(), &dir, 50).discover_albums().await;

    let titles: Vec<_> = albums.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Album 1", "Album 2", "Album 3"]);
    assert_eq!(renderer.opened(), 1);
    assert_eq!(renderer.closed(), 1);
    assert!(dir.path().join("debug/albums.html").exists());
    assert!(dir.path().join("debug/albums.png").exists());
}

#[tokio::test]
async fn test_discovery_respects_album_cap() {
    let dir = TempDir::new().unwrap();
    let renderer = Arc::new(FakeRenderer::new(vec![(
        BASE_URL.to_string(),
        FakePage::Html(listing_html(&[1, 2, 3, 4, 5])),
    )]));

    let albums = service(renderer, &dir, 2).discover_albums().await;

    assert_eq!(albums.len(), 2);
    assert!(albums[1].url.contains("/albums/2?"));
}

#[tokio::test]
async fn test_navigation_failure_yields_empty_and_closes_session() {
    let dir = TempDir::new().unwrap();
    let renderer = Arc::new(FakeRenderer::new(vec![(BASE_URL.to_string(), FakePage::Timeout)]));

    let albums = service(renderer.clone(), &dir, 50).discover_albums().await;

    assert!(albums.is_empty());
    assert_eq!(renderer.closed(), 1);
    assert!(!dir.path().join("debug/albums.html").exists());
}
