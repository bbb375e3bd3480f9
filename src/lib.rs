//! meshview: a headless 3D model viewer.
//!
//! Loads an OBJ or glTF/GLB asset, auto-fits it into a canonical viewing
//! volume (uniform scale, centering, camera placement), renders a flat-shaded
//! preview and exports PNG screenshots or turntable GIFs.
//!
//! The reusable piece is [`core::fit`]: a pure "fit arbitrary 3D content into
//! a bounded, camera-framed viewport" computation. Everything else — loaders,
//! the preview rasterizer, export — is the scaffolding a viewer needs around
//! it.

pub mod app;
pub mod core;
pub mod error;
pub mod io;
pub mod render;
pub mod scene;

pub use error::{Error, Result};
