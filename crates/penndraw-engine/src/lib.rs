//! penndraw engine crate.
//!
//! This crate owns the retained draw list, the CPU tessellator, and the
//! platform + GPU runtime that puts a finished drawing on screen. The
//! teaching API in `penndraw` talks to it through [`scene::Renderer`].

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod coords;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
