//! Reusable UI components.

pub mod screen;
pub mod sidebar;

pub use screen::ScreenFrame;
pub use sidebar::Sidebar;
