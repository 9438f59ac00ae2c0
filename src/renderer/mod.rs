//! Rendering module
//!
//! The simulation hands over a read-only snapshot each frame; this module
//! turns it into draw commands and (on the web) replays them on a 2D canvas.

pub mod draw_list;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw_list::{DrawCmd, FrameEffects, Rgba, TextAlign, build_frame};
