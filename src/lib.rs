pub mod app;
pub mod args;
pub mod loader;
pub mod normalize;
pub mod render;
