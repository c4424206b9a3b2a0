//! Rendering layer
//!
//! Produces pixmaps from application state; platform code only blits them.

pub mod renderer;

pub use renderer::{SceneLayout, SceneRenderer};
