mod cli;
mod tui;

pub(crate) use cli::{as_cli, reset};
pub(crate) use tui::as_tui;
