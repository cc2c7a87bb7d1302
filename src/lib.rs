//! Core simulation for a small side-scrolling terminal shooter.
//!
//! The library is split the same way the binary consumes it: `entities`
//! holds plain data, `compute` advances it one tick at a time, and
//! `persist` carries score and kills across sessions. Rendering, input
//! decoding, and sound playback live in the binary.

pub mod compute;
pub mod entities;
pub mod persist;
