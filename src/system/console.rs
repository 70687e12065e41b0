//! Shared transmit halves of the serial transports
//!
//! Acknowledgements go out on both links and the status reporter writes its
//! own lines on the debug link, so the transmit halves live behind mutexes.
//! Tasks take the lock, write one line, and release. A write failure is
//! logged and the line dropped; nothing retries console output.

use defmt::warn;
use embassy_rp::uart::{Async, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;

/// Transmit half of the Bluetooth link
static BLUETOOTH_TX: Mutex<CriticalSectionRawMutex, Option<UartTx<'static, Async>>> =
    Mutex::new(None);

/// Transmit half of the wired debug link
static DEBUG_TX: Mutex<CriticalSectionRawMutex, Option<UartTx<'static, Async>>> =
    Mutex::new(None);

/// Stashes the transmit halves.
///
/// Must be called once from `main`, before any task that writes to the
/// console is spawned.
pub fn init(bluetooth: UartTx<'static, Async>, debug: UartTx<'static, Async>) {
    critical_section::with(|_| {
        *BLUETOOTH_TX.try_lock().unwrap() = Some(bluetooth);
        *DEBUG_TX.try_lock().unwrap() = Some(debug);
    });
}

/// Writes one acknowledgement line to both transports
pub async fn ack(line: &str) {
    write_line(&BLUETOOTH_TX, line).await;
    write_line(&DEBUG_TX, line).await;
}

/// Writes one line to the debug transport only
pub async fn debug_line(line: &str) {
    write_line(&DEBUG_TX, line).await;
}

async fn write_line(
    shared: &Mutex<CriticalSectionRawMutex, Option<UartTx<'static, Async>>>,
    line: &str,
) {
    let mut guard = shared.lock().await;
    let tx = guard.as_mut().unwrap();
    if let Err(e) = tx.write(line.as_bytes()).await {
        warn!("console write error: {}", e);
        return;
    }
    if let Err(e) = tx.write(b"\r\n").await {
        warn!("console write error: {}", e);
    }
}
