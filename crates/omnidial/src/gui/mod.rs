pub mod app;
pub mod assets;
pub mod audio;
pub mod surface;
pub mod theme;
