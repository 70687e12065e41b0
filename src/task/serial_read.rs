//! Debug-serial command reader
//!
//! Second command source: the wired debug console accepts the same
//! one-character alphabet as the Bluetooth link. Bytes from both readers
//! land in the same queue and are processed in arrival order.

use crate::system::command::{self, CommandRecord};
use defmt::{info, warn};
use embassy_rp::uart::{Async, UartRx};
use embassy_time::Instant;

#[embassy_executor::task]
pub async fn serial_read(mut rx: UartRx<'static, Async>) {
    info!("Serial reader started");

    let mut buf = [0u8; 1];
    loop {
        match rx.read(&mut buf).await {
            Ok(()) => {
                command::enqueue(CommandRecord {
                    byte: buf[0],
                    enqueued_at: Instant::now(),
                })
                .await;
            }
            Err(e) => {
                warn!("Serial: read error: {}", e);
            }
        }
    }
}
