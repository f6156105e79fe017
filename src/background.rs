use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::config::default_backgrounds;

/// Rotating backdrop. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Background {
    images: Vec<String>,
    index: usize,
}

impl Background {
    pub fn new(images: Vec<String>) -> Self {
        let images = if images.is_empty() {
            default_backgrounds()
        } else {
            images
        };
        Self { images, index: 0 }
    }

    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.images.len();
        self.index
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &str {
        &self.images[self.index]
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new(default_backgrounds())
    }
}

pub fn asset_url(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    format!("{base}/{name}")
}

/// Repeating fire-and-forget task. Dropping the handle stops it.
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Sends `make()` every `period`, first one after a full period.
    /// Exits on its own once the receiver is gone.
    pub fn spawn<M, F>(period: Duration, tx: mpsc::UnboundedSender<M>, make: F) -> Self
    where
        M: Send + 'static,
        F: Fn() -> M + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(make()).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
