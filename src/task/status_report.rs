//! Status reporter
//!
//! Prints one line with the current command, speed level, queue backlog and
//! uptime on a fixed cadence. Reporting is best-effort: if the state lock
//! is not available within the grace period the cycle is skipped, so this
//! task can never hold up the motor task.

use core::fmt::Write;

use defmt::info;
use embassy_time::{with_timeout, Duration, Instant, Ticker};
use heapless::String;

use crate::system::command;
use crate::system::console;
use crate::system::state::MOTOR_STATE;

/// Time between status lines
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// How long to wait for the state lock before skipping a cycle
const LOCK_TIMEOUT: Duration = Duration::from_millis(100);

#[embassy_executor::task]
pub async fn status_report() {
    info!("Status task started");

    // Ticker wakes relative to the previous scheduled tick, so the cadence
    // does not drift when a cycle runs long.
    let mut ticker = Ticker::every(REPORT_INTERVAL);
    loop {
        ticker.next().await;

        let (current, speed) = match with_timeout(LOCK_TIMEOUT, MOTOR_STATE.lock()).await {
            Ok(state) => (state.current_command, state.speed),
            // Motor task is busy; reporting is not worth waiting for.
            Err(_) => continue,
        };

        let mut line: String<96> = String::new();
        let _ = write!(
            line,
            "Status - Command: {}, Speed: {}, Queue: {}/{}, Uptime: {}s",
            current.label(),
            speed,
            command::backlog(),
            command::QUEUE_DEPTH,
            Instant::now().as_secs()
        );
        console::debug_line(&line).await;
    }
}
