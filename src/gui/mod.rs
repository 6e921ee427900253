pub mod app;
pub mod host;
pub mod menu;
pub mod surface;
pub mod theme;
