// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::integration::helpers::{album_html, album_url, test_config, FakePage, FakeRenderer, BASE_URL};
use album_harvester::domain::services::item_extraction_service::AlbumItemExtractor;
use album_harvester::engines::validators::UrlPolicy;
use album_harvester::infrastructure::debug_capture::DebugCapture;
use std::sync::Arc;
use tempfile::TempDir;

fn extractor(renderer: Arc<FakeRenderer>, dir: &TempDir) -> AlbumItemExtractor {
    let config = test_config(BASE_URL, dir.path());
    let policy = UrlPolicy::from_settings(&config.site);
    let capture = DebugCapture::new(config.output.debug_dir.clone());
    AlbumItemExtractor::new(renderer, Arc::new(config), policy, capture)
}

#[tokio::test]
async fn test_items_carry_album_title_and_full_size_images() {
    let dir = TempDir::new().unwrap();
    let renderer = Arc::new(FakeRenderer::new(vec![(
        album_url(7),
        FakePage::Html(album_html(7, 3)),
    )]));

    let items = extractor(renderer.clone(), &dir)
        .extract_items(&album_url(7), "Summer tees", 500, 4)
        .await;

    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.album == "Summer tees"));
    assert_eq!(items[0].image_url, "https://photo.yupoo.com/seller/7/1.jpg");
    assert_eq!(items[0].item_url, format!("{}&photo=1", album_url(7)));
    assert_eq!(items[0].sku.as_deref(), Some("AB-701"));
    assert_eq!(renderer.closed(), 1);
    assert!(dir.path().join("debug/album-4.html").exists());
    assert!(dir.path().join("debug/album-4.png").exists());
}

#[tokio::test]
async fn test_missing_photo_grid_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let renderer = Arc::new(FakeRenderer::new(vec![(
        album_url(8),
        FakePage::Html("<html><body><p>No photos yet</p></body></html>".to_string()),
    )]));

    let items = extractor(renderer.clone(), &dir)
        .extract_items(&album_url(8), "Empty", 500, 1)
        .await;

    assert!(items.is_empty());
    assert_eq!(renderer.closed(), 1);
    assert!(dir.path().join("debug/album-1.html").exists());
}

#[tokio::test]
async fn test_navigation_timeout_yields_no_items() {
    let dir = TempDir::new().unwrap();
    let renderer = Arc::new(FakeRenderer::new(vec![(album_url(9), FakePage::Timeout)]));

    let items = extractor(renderer.clone(), &dir)
        .extract_items(&album_url(9), "Slow", 500, 2)
        .await;

    assert!(items.is_empty());
    assert_eq!(renderer.opened(), 1);
    assert_eq!(renderer.closed(), 1);
}
