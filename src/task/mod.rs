pub mod bluetooth_read;
pub mod motor;
pub mod serial_read;
pub mod status_report;
