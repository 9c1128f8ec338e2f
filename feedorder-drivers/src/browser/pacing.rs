use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Random pause inserted before each page advance, to stay polite with
/// rate-limited listings. Disabled when `max_ms` is zero.
pub struct Pacing {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Pacing {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.max_ms == 0
    }

    /// Pick a delay in `min_ms..=max_ms`.
    pub fn next_delay(&self) -> Duration {
        if self.is_disabled() {
            return Duration::ZERO;
        }
        let mut rng = OsRng;
        let ms = rng.gen_range(self.min_ms.min(self.max_ms)..=self.max_ms);
        Duration::from_millis(ms)
    }

    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}
