//! Interactive task board.
//!
//! One synchronous input loop: each store operation is bridged onto the
//! runtime and runs to completion (including any optimistic revert) before
//! the next key event is handled. Rapid repeated actions on the same task
//! can still race at the server; last response wins.

use anyhow::{Context, Result};
use chrono::Utc;
use chrono_tz::Tz;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::future::Future;
use std::io::{self, Stdout};
use std::time::Duration;
use taskdeck_core::{BoardView, Priority, TaskDraft, TaskFilter, TaskRow};
use taskdeck_store::{Board, RemoteTaskStore};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Priority,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Priority,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
        }
    }
}

enum Mode {
    Normal,
    Add { draft: TaskDraft, focus: Field },
    Edit { focus: Field },
    ConfirmDelete { id: String },
}

enum Step {
    Continue,
    Quit,
    Switch(Mode),
}

pub fn run_board(cfg: &Config) -> Result<()> {
    let tz = taskdeck_core::parse_tz(&cfg.ui.timezone)?;
    let notice_ttl = chrono::Duration::seconds(cfg.ui.notice_secs);
    let store = RemoteTaskStore::new(reqwest::Client::new(), cfg.api.task_store_url.clone());
    let mut board = Board::new(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = board_loop(&mut terminal, &mut board, tz, notice_ttl);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Run an async store operation from the synchronous input loop.
///
/// The binary uses #[tokio::main], so a runtime is usually already running;
/// calling block_on directly there would panic. block_in_place moves this
/// thread out of the cooperative pool for the duration of the call.
fn block_on<T>(fut: impl Future<Output = T>) -> Result<T> {
    if let Ok(handle) = tokio::runtime::Handle::try_current() {
        Ok(tokio::task::block_in_place(|| handle.block_on(fut)))
    } else {
        let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
        Ok(rt.block_on(fut))
    }
}

fn board_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    board: &mut Board<RemoteTaskStore>,
    tz: Tz,
    notice_ttl: chrono::Duration,
) -> Result<()> {
    block_on(board.refresh(Utc::now()))?;

    let mut mode = Mode::Normal;
    let mut selected: usize = 0;

    loop {
        board.clear_expired_notice(Utc::now(), notice_ttl);

        let view = board.view(Utc::now(), tz);
        let row_count = view.rows().len();
        if row_count == 0 {
            selected = 0;
        } else if selected >= row_count {
            selected = row_count - 1;
        }

        terminal.draw(|f| draw(f, board, &view, &mode, selected))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(key.code, &mut mode, board, &view, &mut selected)? {
            Step::Continue => {}
            Step::Quit => break,
            Step::Switch(next) => mode = next,
        }
    }

    Ok(())
}

fn handle_key(
    code: KeyCode,
    mode: &mut Mode,
    board: &mut Board<RemoteTaskStore>,
    view: &BoardView,
    selected: &mut usize,
) -> Result<Step> {
    let row_count = view.rows().len();

    match mode {
        Mode::Normal => match code {
            KeyCode::Char('q') => return Ok(Step::Quit),
            KeyCode::Char('r') => {
                block_on(board.refresh(Utc::now()))?;
            }
            KeyCode::Char('a') => {
                return Ok(Step::Switch(Mode::Add {
                    draft: TaskDraft::default(),
                    focus: Field::Title,
                }));
            }
            KeyCode::Char('1') => board.set_filter(TaskFilter::All),
            KeyCode::Char('2') => board.set_filter(TaskFilter::Active),
            KeyCode::Char('3') => board.set_filter(TaskFilter::Completed),
            KeyCode::Down | KeyCode::Char('j') => {
                if row_count > 0 {
                    *selected = (*selected + 1).min(row_count - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Char(' ') => {
                if let Some(id) = row_id(view, *selected) {
                    block_on(board.toggle_completed(&id, Utc::now()))?;
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = row_id(view, *selected) {
                    if board.begin_edit(&id) {
                        return Ok(Step::Switch(Mode::Edit {
                            focus: Field::Title,
                        }));
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = row_id(view, *selected) {
                    return Ok(Step::Switch(Mode::ConfirmDelete { id }));
                }
            }
            _ => {}
        },

        Mode::Add { draft, focus } => match code {
            KeyCode::Esc => return Ok(Step::Switch(Mode::Normal)),
            KeyCode::Tab => *focus = focus.next(),
            KeyCode::BackTab => *focus = focus.prev(),
            KeyCode::Enter => {
                let draft = draft.clone();
                if block_on(board.add(&draft, Utc::now()))? {
                    return Ok(Step::Switch(Mode::Normal));
                }
            }
            KeyCode::Left if *focus == Field::Priority => {
                draft.priority = draft.priority.prev();
            }
            KeyCode::Right if *focus == Field::Priority => {
                draft.priority = draft.priority.next();
            }
            KeyCode::Backspace => {
                if let Some(text) = field_text_mut(draft, *focus) {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = field_text_mut(draft, *focus) {
                    text.push(c);
                }
            }
            _ => {}
        },

        Mode::Edit { focus } => match code {
            KeyCode::Esc => {
                board.cancel_edit();
                return Ok(Step::Switch(Mode::Normal));
            }
            KeyCode::Tab => *focus = focus.next(),
            KeyCode::BackTab => *focus = focus.prev(),
            KeyCode::Enter => {
                if block_on(board.commit_edit(Utc::now()))? {
                    return Ok(Step::Switch(Mode::Normal));
                }
            }
            KeyCode::Left if *focus == Field::Priority => {
                if let Some(session) = board.editing_mut() {
                    session.draft.priority = session.draft.priority.prev();
                }
            }
            KeyCode::Right if *focus == Field::Priority => {
                if let Some(session) = board.editing_mut() {
                    session.draft.priority = session.draft.priority.next();
                }
            }
            KeyCode::Backspace => {
                let field = *focus;
                if let Some(session) = board.editing_mut() {
                    if let Some(text) = field_text_mut(&mut session.draft, field) {
                        text.pop();
                    }
                }
            }
            KeyCode::Char(c) => {
                let field = *focus;
                if let Some(session) = board.editing_mut() {
                    if let Some(text) = field_text_mut(&mut session.draft, field) {
                        text.push(c);
                    }
                }
            }
            _ => {}
        },

        Mode::ConfirmDelete { id } => match code {
            KeyCode::Char('y') => {
                let id = id.clone();
                block_on(board.remove(&id, Utc::now()))?;
                return Ok(Step::Switch(Mode::Normal));
            }
            KeyCode::Char('n') | KeyCode::Esc => return Ok(Step::Switch(Mode::Normal)),
            _ => {}
        },
    }

    Ok(Step::Continue)
}

fn field_text_mut(draft: &mut TaskDraft, field: Field) -> Option<&mut String> {
    match field {
        Field::Title => Some(&mut draft.title),
        Field::Description => Some(&mut draft.description),
        Field::Priority => None,
    }
}

fn row_id(view: &BoardView, selected: usize) -> Option<String> {
    view.rows().get(selected).map(|r| r.id.clone())
}

fn draw(
    f: &mut Frame,
    board: &Board<RemoteTaskStore>,
    view: &BoardView,
    mode: &Mode,
    selected: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(Span::styled(
        "taskdeck",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let mut spans = Vec::new();
    for (key, filter) in [
        ("1", TaskFilter::All),
        ("2", TaskFilter::Active),
        ("3", TaskFilter::Completed),
    ] {
        let style = if board.filter() == filter {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" [{key}] {} ", filter.label()), style));
    }
    let filter_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("filtros"));
    f.render_widget(filter_bar, chunks[1]);

    match view {
        BoardView::Empty(text) => {
            let empty = Paragraph::new(*text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("tareas"));
            f.render_widget(empty, chunks[2]);
        }
        BoardView::Rows(rows) => {
            let items: Vec<ListItem> = rows.iter().map(row_item).collect();
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title("tareas"))
                .highlight_style(Style::default().bg(Color::DarkGray))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(selected));
            f.render_stateful_widget(list, chunks[2], &mut state);
        }
    }

    // The footer doubles as the transient error banner.
    let footer = if let Some(n) = board.notice() {
        Paragraph::new(Span::styled(
            n.message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL))
    } else {
        Paragraph::new(Span::styled(
            "a=añadir  espacio=completar  e=editar  d=eliminar  r=recargar  1/2/3=filtro  q=salir",
            Style::default().fg(Color::Gray),
        ))
        .block(Block::default().borders(Borders::ALL))
    };
    f.render_widget(footer, chunks[3]);

    match mode {
        Mode::Normal => {}
        Mode::Add { draft, focus } => draw_form(f, "Nueva tarea", draft, *focus),
        Mode::Edit { focus } => {
            if let Some(session) = board.editing() {
                draw_form(f, "Editar tarea", &session.draft, *focus);
            }
        }
        Mode::ConfirmDelete { .. } => draw_confirm(f),
    }
}

/// Row text is rendered raw: whatever the user typed is shown literally.
fn row_item(row: &TaskRow) -> ListItem<'static> {
    let check = if row.completed { "[x]" } else { "[ ]" };
    let title_style = if row.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(format!("{check} ")),
        Span::styled(row.title.clone(), title_style),
        Span::raw("  "),
        Span::styled(format!("[{}]", row.priority_label), priority_style(row.priority)),
        Span::raw("  "),
        Span::styled(row.created_label.clone(), Style::default().fg(Color::Gray)),
    ])];
    if let Some(desc) = &row.description {
        lines.push(Line::from(Span::styled(
            format!("    {desc}"),
            Style::default().fg(Color::Gray),
        )));
    }

    ListItem::new(lines)
}

fn priority_style(priority: Priority) -> Style {
    let color = match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    };
    Style::default().fg(color)
}

fn draw_form(f: &mut Frame, title: &str, draft: &TaskDraft, focus: Field) {
    let area = centered_rect(60, 9, f.area());
    f.render_widget(Clear, area);

    let focused = |field: Field| {
        if focus == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Título: ", focused(Field::Title)),
            Span::raw(draft.title.clone()),
        ]),
        Line::from(vec![
            Span::styled("Descripción: ", focused(Field::Description)),
            Span::raw(draft.description.clone()),
        ]),
        Line::from(vec![
            Span::styled("Prioridad: ", focused(Field::Priority)),
            Span::raw(draft.priority.label()),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "Tab=campo  ←/→=prioridad  Enter=guardar  Esc=cancelar",
            Style::default().fg(Color::Gray),
        )),
    ];

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(form, area);
}

fn draw_confirm(f: &mut Frame) {
    let area = centered_rect(50, 6, f.area());
    f.render_widget(Clear, area);

    let body = Paragraph::new(vec![
        Line::raw("¿Estás seguro de que deseas eliminar esta tarea?"),
        Line::raw(""),
        Line::from(Span::styled(
            "y=eliminar  n=cancelar",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Eliminar"));
    f.render_widget(body, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
