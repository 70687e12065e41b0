//! Command decoding and the command queue
//!
//! Both input readers push timestamped raw bytes here and the motor task is
//! the sole consumer. The queue is bounded: a burst deeper than its
//! capacity blocks the producing reader until the motor task catches up,
//! so input is back-pressured instead of dropped or reordered.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{with_timeout, Duration, Instant};

/// Queue capacity; producers block while the queue holds this many records
pub const QUEUE_DEPTH: usize = 10;

/// Duty-cycle steps per speed digit, so `'1'..='9'` map to 28..252
pub const SPEED_STEP: u8 = 28;

/// Multi-producer, single-consumer command queue
static COMMAND_QUEUE: Channel<CriticalSectionRawMutex, CommandRecord, QUEUE_DEPTH> = Channel::new();

/// Pushes a record onto the queue, waiting for a free slot if it is full
pub async fn enqueue(record: CommandRecord) {
    COMMAND_QUEUE.sender().send(record).await;
}

/// Pops the next record, or `None` if nothing arrives within `timeout`
pub async fn next(timeout: Duration) -> Option<CommandRecord> {
    with_timeout(timeout, COMMAND_QUEUE.receiver().receive())
        .await
        .ok()
}

/// Number of records currently waiting in the queue
pub fn backlog() -> usize {
    COMMAND_QUEUE.len()
}

/// One raw input byte captured from a transport
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandRecord {
    /// The byte as read from the transport
    pub byte: u8,
    /// When the reader picked it up
    pub enqueued_at: Instant,
}

/// A decoded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive in the given way at the current speed level
    Motion(MotionCommand),
    /// Change the speed level without touching the motors
    SetSpeed(u8),
}

impl Command {
    /// Decodes one input byte.
    ///
    /// Digits `'1'..='9'` select a speed level, the motion letters are
    /// accepted in both cases, everything else is rejected with `None`.
    pub fn decode(byte: u8) -> Option<Command> {
        match byte {
            b'1'..=b'9' => Some(Command::SetSpeed((byte - b'0') * SPEED_STEP)),
            b'F' | b'f' => Some(Command::Motion(MotionCommand::Forward)),
            b'B' | b'b' => Some(Command::Motion(MotionCommand::Backward)),
            b'L' | b'l' => Some(Command::Motion(MotionCommand::Left)),
            b'R' | b'r' => Some(Command::Motion(MotionCommand::Right)),
            b'S' | b's' => Some(Command::Motion(MotionCommand::Stop)),
            _ => None,
        }
    }
}

/// Motion intents the car understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionCommand {
    Forward,
    Backward,
    /// Pivot left, driving the channels in opposite directions
    Left,
    /// Pivot right
    Right,
    Stop,
}

impl MotionCommand {
    /// Human-readable name, used for acknowledgements and the status line
    pub fn label(self) -> &'static str {
        match self {
            MotionCommand::Forward => "Forward",
            MotionCommand::Backward => "Backward",
            MotionCommand::Left => "Left",
            MotionCommand::Right => "Right",
            MotionCommand::Stop => "Stop",
        }
    }
}
