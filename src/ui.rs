//! Ratatui front-end: one form for a crop record, a status footer, and a
//! confirmation modal for deletes. All record logic lives in `cursor`; this
//! module only turns key presses into those actions and draws the result.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
