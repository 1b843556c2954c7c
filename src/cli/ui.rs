use super::app::{App, Focus, Modal};
use super::form::{Field, MovieForm};
use filmshelf::Listing;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Filter
                Constraint::Min(3),    // Listing grows
                Constraint::Length(3), // Create form
                Constraint::Length(1), // Status / key hints
            ]
            .as_ref(),
        )
        .split(f.area());

    let filter_style = focus_style(app.focus == Focus::Filter && app.modal.is_none());
    app.filter_input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(filter_style)
            .title(" Filter "),
    );
    f.render_widget(&app.filter_input, chunks[0]);

    draw_listing(f, app, chunks[1]);
    draw_form_row(f, &app.create_form, chunks[2]);
    draw_status(f, app, chunks[3]);

    match &app.modal {
        Some(Modal::Edit { form, .. }) => draw_edit(f, form),
        Some(Modal::ConfirmDelete { title, .. }) => draw_confirm(f, title),
        None => {}
    }

    if let Some(message) = &app.alert {
        draw_alert(f, message);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn draw_listing(f: &mut Frame, app: &App, area: Rect) {
    let cache = app.sync.cache();
    let title = if cache.is_empty() {
        " Movies ".to_string()
    } else {
        format!(" Movies ({} of {}) ", app.listing.len(), cache.len())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    match &app.listing {
        Listing::Placeholder(message) => {
            let placeholder = Paragraph::new(*message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(placeholder, area);
        }
        Listing::Rows(rows) => {
            let header = Row::new(["Title", "Year", "Genre"])
                .style(Style::default().add_modifier(Modifier::BOLD));
            let rows: Vec<Row> = rows
                .iter()
                .map(|row| {
                    Row::new([
                        Cell::from(row.title.as_str()),
                        Cell::from(row.year.to_string()),
                        Cell::from(row.genre.as_str()),
                    ])
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(55),
                    Constraint::Length(6),
                    Constraint::Percentage(35),
                ],
            )
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(">> ");

            let mut state = TableState::default().with_selected(Some(app.selected));
            f.render_stateful_widget(table, area, &mut state);
        }
    }
}

fn draw_form_row(f: &mut Frame, form: &MovieForm, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
        ])
        .split(area);

    for (field, column) in Field::ALL.into_iter().zip(columns.iter()) {
        f.render_widget(form.textarea(field), *column);
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if app.sync.outstanding() > 0 {
        spans.push(Span::styled("Syncing… ", Style::default().fg(Color::Cyan)));
    }
    let hints = match app.focus {
        Focus::Filter => {
            "Tab: new movie  ↑↓: select  Ctrl+E: edit  Ctrl+D: delete  Ctrl+R: reload  Esc: quit"
        }
        Focus::CreateForm => "Tab: next field  Enter: add movie  Esc: quit",
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_edit(f: &mut Frame, form: &MovieForm) {
    let area = centered_rect(60, 13, f.area());
    f.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title(" Edit movie ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    for (field, chunk) in Field::ALL.into_iter().zip(chunks.iter()) {
        f.render_widget(form.textarea(field), *chunk);
    }
    f.render_widget(
        Paragraph::new("Enter: save  Tab: next field  Esc: cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn draw_confirm(f: &mut Frame, title: &str) {
    let area = centered_rect(50, 5, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(format!("Delete \"{}\"?", title)),
        Line::from(Span::styled(
            "[y] yes   [n] no",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Confirm "));
    f.render_widget(dialog, area);
}

fn draw_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 6, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from("[Enter] OK"),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Invalid input "));
    f.render_widget(dialog, area);
}

/// A `width`-percent wide, `height`-rows tall rect centred in `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let width = (u32::from(area.width) * u32::from(width.min(100)) / 100) as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
