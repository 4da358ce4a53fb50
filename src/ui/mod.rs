mod admin;
pub mod layout;
mod menu;
mod quiz;
mod results;

pub use admin::draw_admin;
pub use layout::{calculate_quiz_chunks, calculate_results_chunks};
pub use menu::draw_menu;
pub use quiz::{draw_quit_confirmation, draw_quiz};
pub use results::{breakdown_detail, draw_results};
