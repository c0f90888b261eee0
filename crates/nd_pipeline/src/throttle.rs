use std::time::Duration;
use tracing::debug;

/// Fixed pause taken before every model call to stay under provider quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(10);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!("⏳ Waiting {:?} before calling the model", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}
