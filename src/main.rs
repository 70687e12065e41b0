//! Firmware entry point
//!
//! Brings up both serial transports and hands out the hardware, then runs
//! the reader and status tasks on core 0 and the motor task alone on
//! core 1. Motor response latency is the one thing this firmware cares
//! about, so nothing else ever runs on core 1.

#![no_std]
#![no_main]

use bt_car::system::console;
use bt_car::system::resources::{Irqs, MotorDriverResources};
use bt_car::task::{
    bluetooth_read::bluetooth_read, motor::motor, serial_read::serial_read,
    status_report::status_report,
};
use core::ptr::addr_of_mut;
use defmt::info;
use embassy_executor::Executor;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::uart::{self, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// HC-05 modules ship configured for 9600 baud
const BLUETOOTH_BAUD: u32 = 9600;

/// Wired debug console baud rate
const DEBUG_BAUD: u32 = 115_200;

/// Greeting and command listing, sent over the debug link at boot
const BANNER: &str = "\r\n==== BLUETOOTH CAR ====\r\n\
    Commands:\r\n\
    F/f = Forward\r\n\
    B/b = Backward\r\n\
    L/l = Turn Left\r\n\
    R/r = Turn Right\r\n\
    S/s = Stop\r\n\
    1-9 = Speed control (1=slow, 9=fast)\r\n";

static mut CORE1_STACK: Stack<8192> = Stack::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    let p = embassy_rp::init(Config::default());

    // Bluetooth transceiver on UART0.
    let mut bt_config = uart::Config::default();
    bt_config.baudrate = BLUETOOTH_BAUD;
    let bt_uart = Uart::new(
        p.UART0, p.PIN_0, p.PIN_1, Irqs, p.DMA_CH0, p.DMA_CH1, bt_config,
    );

    // Wired debug console on UART1.
    let mut debug_config = uart::Config::default();
    debug_config.baudrate = DEBUG_BAUD;
    let debug_uart = Uart::new(
        p.UART1, p.PIN_4, p.PIN_5, Irqs, p.DMA_CH2, p.DMA_CH3, debug_config,
    );

    let (bt_tx, bt_rx) = bt_uart.split();
    let (mut debug_tx, debug_rx) = debug_uart.split();

    // Greet whoever is on the debug console before the tasks take over the
    // transmit halves.
    let _ = debug_tx.blocking_write(BANNER.as_bytes());
    info!("==== BLUETOOTH CAR ====");

    console::init(bt_tx, debug_tx);

    let motor_driver = MotorDriverResources {
        left_forward_pin: p.PIN_21,
        left_backward_pin: p.PIN_20,
        left_slice: p.PWM_SLICE6,
        left_pwm_pin: p.PIN_28,
        right_forward_pin: p.PIN_19,
        right_backward_pin: p.PIN_18,
        right_slice: p.PWM_SLICE5,
        right_pwm_pin: p.PIN_27,
    };

    // Core 1 runs the motor task and nothing else.
    spawn_core1(
        p.CORE1,
        unsafe { &mut *addr_of_mut!(CORE1_STACK) },
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| spawner.spawn(motor(motor_driver)).unwrap());
        },
    );

    // Core 0 hosts the I/O-bound tasks.
    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner.spawn(bluetooth_read(bt_rx)).unwrap();
        spawner.spawn(serial_read(debug_rx)).unwrap();
        spawner.spawn(status_report()).unwrap();
    });
}
