//! Drive patterns
//!
//! Maps a motion intent and the active speed level onto the six output
//! lines of the H-bridge: one direction pair and one duty-cycle output per
//! drive channel. Turns are pivot turns: the inner channel runs in reverse
//! at the same duty as the outer one, spinning the car in place.

use crate::system::command::MotionCommand;

/// Line levels and duty cycle for one drive channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelPattern {
    /// Forward direction line
    pub forward: bool,
    /// Reverse direction line
    pub reverse: bool,
    /// Duty-cycle value, 0-255
    pub duty: u8,
}

impl ChannelPattern {
    fn forward(duty: u8) -> Self {
        Self {
            forward: true,
            reverse: false,
            duty,
        }
    }

    fn reverse(duty: u8) -> Self {
        Self {
            forward: false,
            reverse: true,
            duty,
        }
    }

    fn idle() -> Self {
        Self {
            forward: false,
            reverse: false,
            duty: 0,
        }
    }
}

/// Complete output state for both drive channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrivePattern {
    pub left: ChannelPattern,
    pub right: ChannelPattern,
}

impl DrivePattern {
    /// Output pattern for `command` at `speed`.
    ///
    /// Stop de-asserts all four direction lines and zeroes both duties.
    pub fn for_command(command: MotionCommand, speed: u8) -> Self {
        match command {
            MotionCommand::Forward => Self {
                left: ChannelPattern::forward(speed),
                right: ChannelPattern::forward(speed),
            },
            MotionCommand::Backward => Self {
                left: ChannelPattern::reverse(speed),
                right: ChannelPattern::reverse(speed),
            },
            MotionCommand::Left => Self {
                left: ChannelPattern::reverse(speed),
                right: ChannelPattern::forward(speed),
            },
            MotionCommand::Right => Self {
                left: ChannelPattern::forward(speed),
                right: ChannelPattern::reverse(speed),
            },
            MotionCommand::Stop => Self {
                left: ChannelPattern::idle(),
                right: ChannelPattern::idle(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOTIONS: [MotionCommand; 5] = [
        MotionCommand::Forward,
        MotionCommand::Backward,
        MotionCommand::Left,
        MotionCommand::Right,
        MotionCommand::Stop,
    ];

    #[test]
    fn test_forward_drives_both_channels_forward() {
        let pattern = DrivePattern::for_command(MotionCommand::Forward, 200);
        assert_eq!(pattern.left, ChannelPattern::forward(200));
        assert_eq!(pattern.right, ChannelPattern::forward(200));
    }

    #[test]
    fn test_backward_drives_both_channels_in_reverse() {
        let pattern = DrivePattern::for_command(MotionCommand::Backward, 140);
        assert_eq!(pattern.left, ChannelPattern::reverse(140));
        assert_eq!(pattern.right, ChannelPattern::reverse(140));
    }

    #[test]
    fn test_turns_are_pivot_turns() {
        // Left reverses the left channel while the right drives forward.
        let left = DrivePattern::for_command(MotionCommand::Left, 252);
        assert_eq!(left.left, ChannelPattern::reverse(252));
        assert_eq!(left.right, ChannelPattern::forward(252));

        // Right is the mirror image.
        let right = DrivePattern::for_command(MotionCommand::Right, 252);
        assert_eq!(right.left, ChannelPattern::forward(252));
        assert_eq!(right.right, ChannelPattern::reverse(252));
    }

    #[test]
    fn test_stop_zeroes_everything_regardless_of_speed() {
        for speed in [0u8, 28, 200, 255] {
            let pattern = DrivePattern::for_command(MotionCommand::Stop, speed);
            assert_eq!(pattern.left, ChannelPattern::idle());
            assert_eq!(pattern.right, ChannelPattern::idle());
            assert_eq!(pattern.left.duty, 0);
            assert_eq!(pattern.right.duty, 0);
        }
    }

    #[test]
    fn test_direction_line_patterns_are_distinct() {
        // No two motions may produce the same direction-line pattern, so a
        // decoded command is always observable at the pins.
        let lines: fn(DrivePattern) -> [bool; 4] = |p| {
            [
                p.left.forward,
                p.left.reverse,
                p.right.forward,
                p.right.reverse,
            ]
        };
        for (i, a) in MOTIONS.iter().enumerate() {
            for b in MOTIONS.iter().skip(i + 1) {
                let pa = lines(DrivePattern::for_command(*a, 200));
                let pb = lines(DrivePattern::for_command(*b, 200));
                assert_ne!(pa, pb, "{:?} and {:?} share a line pattern", a, b);
            }
        }
    }

    #[test]
    fn test_duty_follows_speed_for_motions() {
        for speed in [28u8, 140, 252] {
            for motion in [
                MotionCommand::Forward,
                MotionCommand::Backward,
                MotionCommand::Left,
                MotionCommand::Right,
            ] {
                let pattern = DrivePattern::for_command(motion, speed);
                assert_eq!(pattern.left.duty, speed);
                assert_eq!(pattern.right.duty, speed);
            }
        }
    }
}
