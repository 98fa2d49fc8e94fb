use ratatui::style::{Color, Modifier, Style};

use crate::analytics::{BurnLevel, Severity};
use crate::models::SyncStatus;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

pub(crate) fn section_style() -> Style {
    Style::default().fg(YELLOW).add_modifier(Modifier::BOLD)
}

pub(crate) fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Danger => RED,
        Severity::Warning => YELLOW,
        Severity::Info => ACCENT,
    }
}

pub(crate) fn burn_color(level: BurnLevel) -> Color {
    match level {
        BurnLevel::Healthy => GREEN,
        BurnLevel::High => YELLOW,
        BurnLevel::Critical => RED,
    }
}

/// Green for a surplus, red for a deficit.
pub(crate) fn balance_color(positive: bool) -> Color {
    if positive {
        GREEN
    } else {
        RED
    }
}

pub(crate) fn sync_badge_style(status: SyncStatus) -> Style {
    let bg = match status {
        SyncStatus::Synced => GREEN,
        SyncStatus::Pending => YELLOW,
        SyncStatus::Local => OVERLAY,
    };
    Style::default()
        .fg(HEADER_BG)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn network_badge_style(online: bool) -> Style {
    Style::default()
        .fg(HEADER_BG)
        .bg(if online { GREEN } else { RED })
        .add_modifier(Modifier::BOLD)
}
