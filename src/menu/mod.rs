mod handlers;
mod main_menu;

pub use main_menu::{print_goodbye, show_main_menu};
