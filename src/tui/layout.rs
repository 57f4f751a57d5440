use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::TuiApp;
use crate::tui::form::{Field, FoodForm};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Food list
            Constraint::Min(6),         // Details
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    render_list_pane(frame, app, chunks[0], colors);
    render_details_pane(frame, app, chunks[1], colors);
    render_status_bar(frame, app, chunks[2], colors);

    if let Some(form) = &app.form {
        render_form(frame, form, colors);
    }
}

fn render_list_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let name_width = app
        .foods()
        .iter()
        .map(|food| food.display_name().chars().count())
        .max()
        .unwrap_or(0)
        .min(32);

    let items: Vec<ListItem> = app
        .foods()
        .iter()
        .map(|food| {
            let (marker, marker_style) = if food.available {
                ("●", Style::default().fg(colors.available))
            } else {
                ("○", Style::default().fg(colors.unavailable))
            };

            let name_style = if food.available {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.unavailable)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), marker_style),
                Span::styled(
                    format!("{:<width$}  ", food.display_name(), width = name_width),
                    name_style,
                ),
                Span::styled(
                    format!("{:>10}  ", food.display_price()),
                    Style::default().fg(colors.price),
                ),
                Span::raw(food.description.clone()),
            ]))
        })
        .collect();

    let busy = if app.dashboard.is_busy() { " …" } else { "" };
    let title = format!(
        " Foods ({}) [{}/{}]{} ",
        app.foods().len(),
        (app.selected + 1).min(app.foods().len().max(1)),
        app.foods().len().max(1),
        busy
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_details_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let Some(food) = app.selected_food() else {
        let empty = if app.dashboard.is_busy() {
            "Loading foods..."
        } else {
            "No foods yet. Press 'a' to add one."
        };
        frame.render_widget(
            Paragraph::new(empty).block(block.title(" Details ")),
            area,
        );
        return;
    };

    let availability = if food.available {
        Span::styled("Available", Style::default().fg(colors.available))
    } else {
        Span::styled("Unavailable", Style::default().fg(colors.unavailable))
    };

    let lines = vec![
        Line::from(Span::styled(
            food.display_name().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Price: "),
            Span::styled(food.display_price(), Style::default().fg(colors.price)),
            Span::raw("   "),
            availability,
        ]),
        Line::from(format!("Image: {}", food.image)),
        Line::from(""),
        Line::from(food.description.clone()),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block.title(format!(" #{} ", food.id)))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let mut style = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let status = if let Some((_, ref name)) = app.pending_delete {
        format!("Delete \"{}\"? (y/n)", name)
    } else if let Some(error) = app.dashboard.last_error() {
        style = style.fg(colors.error);
        error.to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.form.is_some() {
        "Tab:Next field  Enter:Save  Esc:Cancel".to_string()
    } else {
        "j/k:Nav  n/p:Page  a:Add  e:Edit  d:Delete  t:Availability  o:Image  R:Reload  q:Quit"
            .to_string()
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

fn render_form(frame: &mut Frame, form: &FoodForm, colors: &ColorConfig) {
    let area = centered_rect(60, 12, frame.area());

    let mut lines = Vec::new();
    for field in Field::ALL {
        let focused = field == form.focus;
        let label_style = if focused {
            Style::default()
                .fg(colors.focused_field)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(format!("{:>12}: ", field.label()), label_style),
            Span::raw(format!("{}{}", form.value(field), cursor)),
        ]));
        lines.push(Line::from(""));
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(colors.error),
        )));
    }

    let block = Block::default()
        .title(form.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.modal_border));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// A `percent_x` wide, `height` rows tall rectangle centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
