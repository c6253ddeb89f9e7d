use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Polls `cond` every few milliseconds; panics if it stays false for 5s.
pub async fn wait_until(mut cond: impl FnMut() -> bool, what: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !cond() {
        if Instant::now() >= deadline {
            panic!("timed out waiting for {}", what);
        }
        sleep(Duration::from_millis(5)).await;
    }
}
