//! Hardware resource assignment
//!
//! Groups the peripherals each task owns so `main` can hand them over as
//! one value per task, and binds the UART interrupt handlers.
//!
//! # Wiring
//! - UART0 (GPIO 0/1, 9600 baud): HC-05 Bluetooth transceiver
//! - UART1 (GPIO 4/5, 115200 baud): wired debug console
//! - GPIO 20/21 + PWM6A on GPIO 28: left drive channel (IN1/IN2/ENA)
//! - GPIO 18/19 + PWM5B on GPIO 27: right drive channel (IN3/IN4/ENB)

use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{
    PIN_18, PIN_19, PIN_20, PIN_21, PIN_27, PIN_28, PWM_SLICE5, PWM_SLICE6, UART0, UART1,
};
use embassy_rp::uart::InterruptHandler;
use embassy_rp::Peri;

/// H-bridge pins and PWM slices, owned by the motor task
pub struct MotorDriverResources {
    pub left_forward_pin: Peri<'static, PIN_21>,
    pub left_backward_pin: Peri<'static, PIN_20>,
    pub left_slice: Peri<'static, PWM_SLICE6>,
    pub left_pwm_pin: Peri<'static, PIN_28>,
    pub right_forward_pin: Peri<'static, PIN_19>,
    pub right_backward_pin: Peri<'static, PIN_18>,
    pub right_slice: Peri<'static, PWM_SLICE5>,
    pub right_pwm_pin: Peri<'static, PIN_27>,
}

bind_interrupts!(pub struct Irqs {
    UART0_IRQ => InterruptHandler<UART0>;
    UART1_IRQ => InterruptHandler<UART1>;
});
