pub mod framebuffer;
pub mod renderer;
