pub mod command;
pub mod drive;
pub mod state;

#[cfg(feature = "rp2350")]
pub mod console;
#[cfg(feature = "rp2350")]
pub mod resources;
