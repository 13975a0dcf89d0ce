// src/exam/timer.rs

use std::time::Duration;

use tokio::{
    task::JoinHandle,
    time::{Instant, interval_at},
};

/// Period of the exam countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A repeating tick owned by exactly one exam session.
///
/// The first tick fires one `period` after start. The tick task stops when
/// the callback returns `false`, when [`CountdownTimer::cancel`] is called,
/// or when the timer is dropped.
#[derive(Debug)]
pub struct CountdownTimer {
    handle: JoinHandle<()>,
}

impl CountdownTimer {
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if !on_tick() {
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Stops ticking. Irreversible; safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
