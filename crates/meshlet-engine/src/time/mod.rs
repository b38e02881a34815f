//! Time subsystem.
//!
//! Provides testable frame timing utilities without coupling to the runtime:
//! - one `FrameClock` per window, ticked once per presented frame
//! - `FrameRate` for periodic frames-per-second reporting

mod frame_clock;

pub use frame_clock::{FrameClock, FrameRate, FrameTime};
