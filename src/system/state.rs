//! Shared motor state
//!
//! One mutex-protected struct holds the active speed level and the motion
//! commands. The motor task is the only writer and mutates it while holding
//! the lock; the status reporter reads it under the same lock. Keeping both
//! fields behind one lock means a reader can never observe a speed from one
//! command paired with a motion from another.

use crate::system::command::{Command, MotionCommand};
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, mutex::Mutex};

/// Speed level in effect until the first speed command arrives
pub const DEFAULT_SPEED: u8 = 200;

/// Global motor state, written only by the motor task
pub static MOTOR_STATE: Mutex<CriticalSectionRawMutex, MotorState> =
    Mutex::new(MotorState::new());

/// Speed level and motion command state shared with the status reporter
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    /// Duty-cycle value applied to both channels, 0-255
    pub speed: u8,
    /// The last successfully applied motion command
    pub current_command: MotionCommand,
    /// The motion command that was current before `current_command`
    pub last_command: MotionCommand,
}

impl MotorState {
    pub const fn new() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            current_command: MotionCommand::Stop,
            last_command: MotionCommand::Stop,
        }
    }

    /// Applies a decoded command to the state.
    ///
    /// Speed commands change the speed level only; motion commands rotate
    /// `current_command` into `last_command`. Both fields are updated under
    /// the caller's borrow, so their pairing is atomic as far as any other
    /// lock holder can tell. Returns what the caller has to actuate and
    /// acknowledge.
    pub fn apply(&mut self, command: Command) -> Applied {
        match command {
            Command::SetSpeed(speed) => {
                self.speed = speed;
                Applied::SpeedSet(speed)
            }
            Command::Motion(motion) => {
                self.last_command = self.current_command;
                self.current_command = motion;
                Applied::Motion(motion)
            }
        }
    }
}

impl Default for MotorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of applying a command, consumed by the motor task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Applied {
    /// A motion command took effect; drive the motors and acknowledge
    Motion(MotionCommand),
    /// The speed level changed; acknowledge without touching the motors
    SpeedSet(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::drive::DrivePattern;

    #[test]
    fn test_initial_state() {
        let state = MotorState::new();
        assert_eq!(state.speed, 200);
        assert_eq!(state.current_command, MotionCommand::Stop);
        assert_eq!(state.last_command, MotionCommand::Stop);
    }

    #[test]
    fn test_speed_command_leaves_motion_untouched() {
        let mut state = MotorState::new();
        state.apply(Command::Motion(MotionCommand::Forward));

        for digit in 1..=9u8 {
            let applied = state.apply(Command::decode(b'0' + digit).unwrap());
            assert_eq!(applied, Applied::SpeedSet(digit * 28));
            assert_eq!(state.speed, digit * 28);
            assert_eq!(state.current_command, MotionCommand::Forward);
        }
    }

    #[test]
    fn test_motion_command_rotates_history() {
        let mut state = MotorState::new();

        let applied = state.apply(Command::Motion(MotionCommand::Forward));
        assert_eq!(applied, Applied::Motion(MotionCommand::Forward));
        assert_eq!(state.current_command, MotionCommand::Forward);
        assert_eq!(state.last_command, MotionCommand::Stop);

        state.apply(Command::Motion(MotionCommand::Left));
        assert_eq!(state.current_command, MotionCommand::Left);
        assert_eq!(state.last_command, MotionCommand::Forward);
    }

    #[test]
    fn test_unknown_byte_changes_nothing() {
        let mut state = MotorState::new();
        state.apply(Command::Motion(MotionCommand::Right));
        state.apply(Command::SetSpeed(84));

        // Decoding fails before the state is ever touched.
        assert_eq!(Command::decode(b'Q'), None);
        assert_eq!(state.speed, 84);
        assert_eq!(state.current_command, MotionCommand::Right);
        assert_eq!(state.last_command, MotionCommand::Stop);
    }

    #[test]
    fn test_input_sequence_f5s() {
        let mut state = MotorState::new();

        // 'F': forward at the default speed.
        let applied = state.apply(Command::decode(b'F').unwrap());
        assert_eq!(applied, Applied::Motion(MotionCommand::Forward));
        let pattern = DrivePattern::for_command(MotionCommand::Forward, state.speed);
        assert_eq!(state.speed, 200);
        assert_eq!(pattern.left.duty, 200);
        assert!(pattern.left.forward && pattern.right.forward);

        // '5': speed drops to 140, motion stays Forward, no actuation.
        let applied = state.apply(Command::decode(b'5').unwrap());
        assert_eq!(applied, Applied::SpeedSet(140));
        assert_eq!(state.current_command, MotionCommand::Forward);

        // 'S': everything off.
        let applied = state.apply(Command::decode(b'S').unwrap());
        assert_eq!(applied, Applied::Motion(MotionCommand::Stop));
        let pattern = DrivePattern::for_command(MotionCommand::Stop, state.speed);
        assert_eq!(pattern.left.duty, 0);
        assert_eq!(pattern.right.duty, 0);
        assert!(!pattern.left.forward && !pattern.left.reverse);
        assert!(!pattern.right.forward && !pattern.right.reverse);
        assert_eq!(state.current_command, MotionCommand::Stop);
        assert_eq!(state.last_command, MotionCommand::Forward);
    }
}
