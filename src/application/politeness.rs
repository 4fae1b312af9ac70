// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::config::settings::CrawlSettings;

/// 礼貌延迟
///
/// 在相邻两次相册抓取之间随机暂停 `[min_ms, max_ms]` 毫秒；
/// 随机源可注入种子，便于测试断言延迟范围
#[derive(Debug, Clone)]
pub struct PolitenessDelay {
    min_ms: u64,
    max_ms: u64,
    rng: StdRng,
}

impl PolitenessDelay {
    pub fn new(min_ms: u64, max_ms: u64, seed: Option<u64>) -> Self {
        let (min_ms, max_ms) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self { min_ms, max_ms, rng }
    }

    pub fn from_settings(settings: &CrawlSettings) -> Self {
        Self::new(settings.delay_min_ms, settings.delay_max_ms, settings.delay_seed)
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_ms),
            Duration::from_millis(self.max_ms),
        )
    }

    /// 抽取下一次延迟
    pub fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.random_range(self.min_ms..=self.max_ms))
    }

    /// 抽取延迟并睡眠
    pub async fn pause(&mut self) -> Duration {
        let delay = self.next_delay();
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Politeness delay");
        tokio::time::sleep(delay).await;
        delay
    }
}
