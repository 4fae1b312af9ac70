// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use album_harvester::domain::models::Item;
use album_harvester::infrastructure::dataset_writer::{read_items, write_items};
use album_harvester::utils::errors::DatasetError;
use tempfile::TempDir;

fn sample() -> Vec<Item> {
    vec![
        Item::new(
            Some("AB-1234".to_string()),
            "Jacket, \"limited\" AB-1234",
            "Winter",
            "https://photo.yupoo.com/s/1.jpg",
            "https://s.x.yupoo.com/albums/1?uid=1&p=1",
        ),
        Item::new(
            None,
            "Item 2",
            "Winter",
            "https://photo.yupoo.com/s/2.jpg",
            "https://s.x.yupoo.com/albums/1?uid=1&p=2",
        ),
    ]
}

#[test]
fn test_missing_sku_is_written_as_empty_quoted_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.csv");
    write_items(&sample(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "sku,title,album,image_url,item_url");
    assert!(lines[1].starts_with(r#""AB-1234","Jacket, ""limited"" AB-1234","#));
    assert!(lines[2].starts_with(r#""","Item 2","Winter","#));

    let items = read_items(&path).unwrap();
    assert_eq!(items, sample());
}

#[test]
fn test_unwritable_destination_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, b"file").unwrap();

    let err = write_items(&sample(), &blocker.join("products.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}
