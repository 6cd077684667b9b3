//! Page objects for playwright.dev

mod home;
mod menu_bar;

pub use home::HomePage;
pub use menu_bar::MenuBar;
