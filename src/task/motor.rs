//! Motor task
//!
//! Sole consumer of the command queue and the only writer of the shared
//! motor state. Runs alone on core 1 so command latency never competes
//! with the I/O tasks. Each dequeued byte is decoded, applied to the state
//! and the H-bridge while the lock is held, and acknowledged on both
//! transports after the lock is released.

use core::fmt::Write;

use defmt::{info, warn};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{self, Pwm};
use embassy_time::{Duration, Timer};
use heapless::String;

use crate::system::command::{self, Command};
use crate::system::console;
use crate::system::drive::{ChannelPattern, DrivePattern};
use crate::system::resources::MotorDriverResources;
use crate::system::state::{Applied, MOTOR_STATE};

/// How long one dequeue attempt waits before the task yields
const RECEIVE_TIMEOUT: Duration = Duration::from_millis(10);

/// Fixed sleep between dequeue attempts, bounds this task's duty on core 1
const YIELD_INTERVAL: Duration = Duration::from_millis(20);

/// PWM frequency; cheap brushed motors run smoother well below 20kHz
const PWM_FREQ_HZ: u32 = 10_000;

/// One H-bridge channel: direction pair plus duty-cycle output
struct DriveChannel {
    forward: Output<'static>,
    reverse: Output<'static>,
    pwm: Pwm<'static>,
    config: pwm::Config,
    top: u16,
}

impl DriveChannel {
    /// Constant-time line writes, nothing here can fail or block
    fn apply(&mut self, pattern: &ChannelPattern) {
        self.forward.set_level(level(pattern.forward));
        self.reverse.set_level(level(pattern.reverse));

        let compare = (u32::from(self.top) * u32::from(pattern.duty) / 255) as u16;
        // Only one output of the slice is routed to a pin, so setting both
        // compares keeps this code identical for A- and B-channels.
        self.config.compare_a = compare;
        self.config.compare_b = compare;
        self.pwm.set_config(&self.config);
    }
}

fn level(high: bool) -> Level {
    if high {
        Level::High
    } else {
        Level::Low
    }
}

/// Both drive channels of the car
struct MotorDriver {
    left: DriveChannel,
    right: DriveChannel,
}

impl MotorDriver {
    fn new(r: MotorDriverResources) -> Self {
        // Keep the PWM period inside the 16-bit counter at the desired
        // frequency by picking the smallest workable divider.
        let clock_freq_hz = embassy_rp::clocks::clk_sys_freq();
        let divider = ((clock_freq_hz / PWM_FREQ_HZ) / 65535 + 1) as u8;
        let top = (clock_freq_hz / (PWM_FREQ_HZ * u32::from(divider))) as u16 - 1;

        let mut config = pwm::Config::default();
        config.divider = divider.into();
        config.top = top;
        config.compare_a = 0;
        config.compare_b = 0;

        // Direction lines start low and both duties at zero: the car comes
        // up in the Stop pattern before the first command arrives.
        let left = DriveChannel {
            forward: Output::new(r.left_forward_pin, Level::Low),
            reverse: Output::new(r.left_backward_pin, Level::Low),
            pwm: Pwm::new_output_a(r.left_slice, r.left_pwm_pin, config.clone()),
            config: config.clone(),
            top,
        };
        let right = DriveChannel {
            forward: Output::new(r.right_forward_pin, Level::Low),
            reverse: Output::new(r.right_backward_pin, Level::Low),
            pwm: Pwm::new_output_b(r.right_slice, r.right_pwm_pin, config.clone()),
            config,
            top,
        };

        Self { left, right }
    }

    fn apply(&mut self, pattern: &DrivePattern) {
        self.left.apply(&pattern.left);
        self.right.apply(&pattern.right);
    }
}

#[embassy_executor::task]
pub async fn motor(r: MotorDriverResources) {
    info!("Motor task started");
    let mut driver = MotorDriver::new(r);

    loop {
        if let Some(record) = command::next(RECEIVE_TIMEOUT).await {
            info!(
                "Processing: {} (queued {}us ago)",
                record.byte as char,
                record.enqueued_at.elapsed().as_micros()
            );
            process(&mut driver, record.byte).await;
        }

        Timer::after(YIELD_INTERVAL).await;
    }
}

/// Decodes and applies one input byte
async fn process(driver: &mut MotorDriver, byte: u8) {
    let Some(cmd) = Command::decode(byte) else {
        warn!("unknown command: {}", byte as char);
        let mut line: String<32> = String::new();
        let _ = write!(line, "Unknown command: {}", byte as char);
        console::debug_line(&line).await;
        return;
    };

    // State update and actuation happen under the lock; the wait is
    // unbounded because a command must never be skipped over contention.
    let applied = {
        let mut state = MOTOR_STATE.lock().await;
        let applied = state.apply(cmd);
        if let Applied::Motion(motion) = applied {
            driver.apply(&DrivePattern::for_command(motion, state.speed));
        }
        applied
    };

    // Acknowledge after the lock is released.
    match applied {
        Applied::Motion(motion) => console::ack(motion.label()).await,
        Applied::SpeedSet(speed) => {
            let mut line: String<16> = String::new();
            let _ = write!(line, "Speed: {}", speed);
            console::ack(&line).await;
        }
    }
}
