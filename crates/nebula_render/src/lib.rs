pub mod hud;
pub mod menu;
pub mod terminal;
pub mod viewer;

pub use menu::Session;
pub use terminal::TerminalContext;
