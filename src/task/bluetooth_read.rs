//! Bluetooth command reader
//!
//! Owns the receive half of the Bluetooth link. Every byte is stamped with
//! the time it was read and pushed onto the command queue; a full queue
//! blocks this task rather than dropping input.

use crate::system::command::{self, CommandRecord};
use defmt::{info, warn};
use embassy_rp::uart::{Async, UartRx};
use embassy_time::Instant;

#[embassy_executor::task]
pub async fn bluetooth_read(mut rx: UartRx<'static, Async>) {
    info!("Bluetooth reader started");

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
                // Framing or overrun error, the byte is gone.
                warn!("BT: read error: {}", e);
            }
        }
    }
}
