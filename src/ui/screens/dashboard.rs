use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analytics::expense_breakdown;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_rate, truncate};

/// Icon, title, advice.
const BUDGET_TIPS: [(&str, &str, &str); 3] = [
    ("🎯", "50/30/20 Rule", "Aim for 50% needs, 30% wants, 20% savings."),
    ("🔔", "Set Alerts", "Review your budget weekly to stay on track."),
    ("📈", "Track Trends", "Compare month-over-month to find patterns."),
];

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Analytics cards
            Constraint::Min(8),    // Breakdown + insights
            Constraint::Length(5), // Tips
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_analytics_cards(f, chunks[0], app);
    render_breakdown_chart(f, body[0], app);
    render_insights(f, body[1], app);
    render_tips(f, chunks[2]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_analytics_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    if !app.state.is_hydrated {
        for card in cards.iter() {
            let loading = Paragraph::new(Line::from(Span::styled("Loading…", theme::dim_style())))
                .centered()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(theme::OVERLAY)),
                );
            f.render_widget(loading, *card);
        }
        return;
    }

    let analytics = &app.analytics;
    let has_income = app.state.budget.income > Decimal::ZERO;
    let level = analytics.burn_level();
    let saving = analytics.savings_potential >= Decimal::ZERO;
    let surplus = analytics.month_end_prediction >= Decimal::ZERO;

    render_card(
        f,
        cards[0],
        "Total Expenses",
        format_amount(analytics.total_expenses),
        theme::RED,
        if has_income {
            format!("{} of income", format_rate(analytics.burn_rate))
        } else {
            "Set income to see ratio".to_string()
        },
    );
    render_card(
        f,
        cards[1],
        "Burn Rate",
        format_rate(analytics.burn_rate),
        theme::burn_color(level),
        level.to_string(),
    );
    render_card(
        f,
        cards[2],
        "Savings Potential",
        format_amount(analytics.savings_potential),
        theme::balance_color(saving),
        if saving { "Monthly savings" } else { "Monthly deficit" }.to_string(),
    );
    render_card(
        f,
        cards[3],
        "Month-End Balance",
        format_amount(analytics.month_end_prediction),
        theme::balance_color(surplus),
        if surplus { "Projected surplus" } else { "Projected shortfall" }.to_string(),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: Color, subtitle: String) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_breakdown_chart(f: &mut Frame, area: Rect, app: &App) {
    let breakdown = expense_breakdown(&app.state.budget);
    if breakdown.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No Expenses Yet",
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Add your monthly expenses to see a breakdown of your spending by category.",
                theme::dim_style(),
            )),
        ])
        .centered()
        .wrap(Wrap { trim: true })
        .block(panel("Spending by Category"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = breakdown
        .iter()
        .map(|(category, amount, pct)| {
            let val = amount.round().to_u64().unwrap_or(0);
            let label = truncate(category.short_name(), 10);
            Bar::default()
                .value(val)
                .text_value(format!("{}%", pct.round()))
                .label(Line::from(label))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Spending by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_tips(f: &mut Frame, area: Rect) {
    let block = panel("Budget Tips");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    for ((icon, title, advice), cell) in BUDGET_TIPS.iter().zip(cells.iter()) {
        let tip = Paragraph::new(vec![
            Line::from(vec![
                Span::raw(format!("{icon} ")),
                Span::styled(*title, Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(*advice, theme::dim_style())),
        ])
        .wrap(Wrap { trim: true });
        f.render_widget(tip, *cell);
    }
}

fn render_insights(f: &mut Frame, area: Rect, app: &App) {
    let block = panel("Smart Insights");

    let lines: Vec<Line> = if !app.state.is_hydrated {
        vec![Line::from(Span::styled("Loading…", theme::dim_style()))]
    } else if !app.state.budget.has_expenses() {
        vec![Line::from(Span::styled(
            "Add your income and expenses to receive personalized budget insights.",
            theme::dim_style(),
        ))]
    } else if app.warnings.is_empty() {
        vec![Line::from(Span::styled(
            "Your budget looks healthy! Keep up the good work.",
            Style::default().fg(theme::GREEN),
        ))]
    } else {
        let mut lines = Vec::new();
        for warning in &app.warnings {
            let color = theme::severity_color(warning.severity);
            let tag = warning.severity.as_str().to_uppercase();
            let icon = warning.category.map_or("", |c| c.icon());
            lines.push(Line::from(vec![
                Span::raw(if icon.is_empty() { String::new() } else { format!("{icon} ") }),
                Span::styled(
                    format!("[{tag}] "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(warning.message, Style::default().fg(color)),
            ]));
            lines.push(Line::from(""));
        }
        lines.pop();
        lines
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
