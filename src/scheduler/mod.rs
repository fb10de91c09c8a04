//! Frame scheduling
//!
//! Drives per-frame updates on a tokio task behind an explicit handle.

pub mod frame_loop;

pub use frame_loop::FrameLoopHandle;
