mod export;
mod help;
mod state;

use crate::acquisition::AcquisitionEngine;
use crate::cli::{self, Cli};
use crate::directory::GithubDirectory;
use crate::model::ReviewEvent;
use crate::orchestrator::{self, UiCommand};
use crate::storage::RosterStore;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame, Terminal,
};
use state::{apply_event, UiState};
use std::sync::Arc;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    let cfg = cli::build_config(&args);
    let directory = GithubDirectory::new(&cfg).context("build directory client")?;
    let store: Arc<dyn RosterStore> = Arc::new(cli::open_store(&args)?);

    // Unbounded channels avoid backpressure between the UI thread and the
    // controller.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<ReviewEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the
    // Tokio runtime.
    let ui_store = store.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_store, event_rx, cmd_tx));

    let mut engine = AcquisitionEngine::new(directory, store, event_tx);
    let res = orchestrator::run_controller(&mut engine, cmd_rx, args.fetch_on_launch).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    store: Arc<dyn RosterStore>,
    mut event_rx: UnboundedReceiver<ReviewEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::default();
    state.set_saved(store.load_all().unwrap_or_default());

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Tab) => {
                        state.tab = (state.tab + 1) % 3;
                        if state.tab == 1 {
                            // The saved tab re-reads the roster each time it
                            // is shown; edits from elsewhere appear here.
                            state.set_saved(store.load_all().unwrap_or_default());
                            state.saved_selected = 0;
                            state.saved_scroll_offset = 0;
                        }
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = 2;
                    }
                    (_, KeyCode::Char('a')) => {
                        if state.tab == 0 && !state.review_controls_disabled() {
                            let _ = cmd_tx.send(UiCommand::Accept);
                        }
                    }
                    (_, KeyCode::Char('x')) => {
                        if state.tab == 0 && !state.review_controls_disabled() {
                            let _ = cmd_tx.send(UiCommand::Reject);
                        }
                    }
                    (_, KeyCode::Char('r')) => {
                        if state.tab == 1 {
                            match store.load_all() {
                                Ok(roster) => {
                                    state.set_saved(roster);
                                    state.info = "Refreshed".into();
                                }
                                Err(e) => {
                                    state.info = format!("Refresh failed: {e}");
                                }
                            }
                        } else if state.tab == 0 && !state.loading {
                            // Covers both the failed-state retry and the
                            // first fetch when fetch-on-launch is off.
                            let _ = cmd_tx.send(UiCommand::Retry);
                        }
                    }
                    (_, KeyCode::Up) | (_, KeyCode::Char('k')) => {
                        if state.tab == 1 && !state.saved.is_empty() && state.saved_selected > 0 {
                            state.saved_selected -= 1;
                            if state.saved_selected < state.saved_scroll_offset {
                                state.saved_scroll_offset = state.saved_selected;
                            }
                        }
                    }
                    (_, KeyCode::Down) | (_, KeyCode::Char('j')) => {
                        if state.tab == 1
                            && !state.saved.is_empty()
                            && state.saved_selected < state.saved.len().saturating_sub(1)
                        {
                            state.saved_selected += 1;
                            let estimated_max_rows = 30;
                            if state.saved_selected
                                >= state.saved_scroll_offset + estimated_max_rows
                            {
                                state.saved_scroll_offset =
                                    state.saved_selected.saturating_sub(estimated_max_rows - 1);
                            }
                        }
                    }
                    (_, KeyCode::Char('d')) => {
                        if state.tab == 1
                            && !state.saved.is_empty()
                            && state.saved_selected < state.saved.len()
                        {
                            let id = state.saved[state.saved_selected].id;
                            if let Err(e) = store.remove_by_id(id) {
                                state.info = format!("Remove failed: {e}");
                            } else {
                                state.set_saved(store.load_all().unwrap_or_default());
                                state.info = "Removed".into();
                            }
                        }
                    }
                    (_, KeyCode::Char('e')) => {
                        if state.tab == 1 && !state.saved.is_empty() {
                            match export::export_roster_json(&state.saved) {
                                Ok(p) => {
                                    state.info = format!("Exported JSON: {}", p.display());
                                }
                                Err(e) => {
                                    state.info = format!("JSON export failed: {e:#}");
                                }
                            }
                        }
                    }
                    (_, KeyCode::Char('c')) => {
                        if state.tab == 1 && !state.saved.is_empty() {
                            match export::export_roster_csv(&state.saved) {
                                Ok(p) => {
                                    state.info = format!("Exported CSV: {}", p.display());
                                }
                                Err(e) => {
                                    state.info = format!("CSV export failed: {e:#}");
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn draw(area: Rect, f: &mut Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let tabs = Tabs::new(["Review", "Saved", "Help"])
        .select(state.tab)
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("devscout"));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_review(chunks[1], f, state),
        1 => draw_saved(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }

    let status = Paragraph::new(state.info.as_str())
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[2]);
}

fn draw_review(area: Rect, f: &mut Frame, state: &UiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Candidate Search");

    if let Some(message) = state.error.as_deref() {
        let p = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from("Press r to try again."),
        ])
        .block(block);
        f.render_widget(p, area);
        return;
    }

    // The stale candidate stays hidden while a cycle is loading.
    if state.loading {
        let p = Paragraph::new("Loading…").block(block);
        f.render_widget(p, area);
        return;
    }

    let Some(c) = state.current.as_ref() else {
        let p = Paragraph::new("No candidate loaded. Press r to fetch one.").block(block);
        f.render_widget(p, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                c.login.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  (#{})", c.id), Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
    ];
    push_kv(&mut lines, "Name", c.name.as_deref());
    push_kv(&mut lines, "Location", c.location.as_deref());
    push_kv(&mut lines, "Email", c.email.as_deref());
    push_kv(&mut lines, "Company", c.company.as_deref());
    push_kv(&mut lines, "Bio", c.bio.as_deref());
    lines.push(Line::from(""));
    push_kv(&mut lines, "Avatar", Some(c.avatar_url.as_str()));
    push_kv(&mut lines, "Profile", Some(c.html_url.as_str()));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("a", Style::default().fg(Color::Green)),
        Span::raw(" accept    "),
        Span::styled("x", Style::default().fg(Color::Red)),
        Span::raw(" reject"),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(p, area);
}

/// Push a "Label: value" line, skipping absent values; the review card only
/// shows attributes the profile actually has.
fn push_kv(out: &mut Vec<Line<'static>>, label: &str, value: Option<&str>) {
    let Some(value) = value else { return };
    out.push(Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::raw(value.to_string()),
    ]));
}

fn draw_saved(area: Rect, f: &mut Frame, state: &UiState) {
    if state.saved.is_empty() {
        let p = Paragraph::new("No candidates have been saved yet.").block(
            Block::default()
                .borders(Borders::ALL)
                .title("Potential Candidates"),
        );
        f.render_widget(p, area);
        return;
    }

    let visible_rows = (area.height as usize).saturating_sub(4).max(1);
    let start = state
        .saved_scroll_offset
        .min(state.saved.len().saturating_sub(1));
    let end = (start + visible_rows).min(state.saved.len());

    let rows = state.saved[start..end].iter().enumerate().map(|(i, c)| {
        let style = if start + i == state.saved_selected {
            Style::default().fg(Color::Black).bg(Color::Magenta)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(c.display_name().to_string()),
            Cell::from(c.login.clone()),
            Cell::from(cell_text(c.location.as_deref())),
            Cell::from(cell_text(c.email.as_deref())),
            Cell::from(cell_text(c.company.as_deref())),
            Cell::from(cell_text(c.bio.as_deref())),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(16),
            Constraint::Percentage(18),
            Constraint::Percentage(14),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(["Name", "Login", "Location", "Email", "Company", "Bio"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Potential Candidates ({})", state.saved.len())),
    );
    f.render_widget(table, area);
}

/// Absent optional attributes render as a dash placeholder in table cells.
fn cell_text(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("—").to_string()
}
