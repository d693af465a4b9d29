use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use tracing::info;

use crate::board::BoardState;
use crate::catalog::Catalog;
use crate::filter::{Recency, SalaryBand, cycle_next};
use crate::models::{JobId, JobPosting, WorkArrangement};
use crate::truncate;

struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    border: Color,
    highlight_bg: Color,
    star: Color,
    chip_idle: Color,
}

impl Palette {
    fn for_theme(dark: bool) -> Self {
        if dark {
            Self {
                bg: Color::Rgb(17, 24, 39),
                fg: Color::White,
                muted: Color::Rgb(156, 163, 175),
                border: Color::Rgb(55, 65, 81),
                highlight_bg: Color::Rgb(55, 65, 81),
                star: Color::Rgb(250, 204, 21),
                chip_idle: Color::Rgb(55, 65, 81),
            }
        } else {
            Self {
                bg: Color::Rgb(249, 250, 251),
                fg: Color::Rgb(17, 24, 39),
                muted: Color::Rgb(107, 114, 128),
                border: Color::Rgb(229, 231, 235),
                highlight_bg: Color::Rgb(229, 231, 235),
                star: Color::Rgb(202, 138, 4),
                chip_idle: Color::Rgb(243, 244, 246),
            }
        }
    }
}

fn salary_chip_color(band: Option<SalaryBand>) -> Color {
    match band {
        None => Color::Gray,
        Some(SalaryBand::Under50k) => Color::Red,
        Some(SalaryBand::From50kTo75k) => Color::Rgb(249, 115, 22),
        Some(SalaryBand::From75kTo100k) => Color::Yellow,
        Some(SalaryBand::From100kTo150k) => Color::Green,
        Some(SalaryBand::Over150k) => Color::Rgb(16, 185, 129),
    }
}

fn work_chip_color(work: Option<WorkArrangement>) -> Color {
    match work {
        None => Color::Gray,
        Some(WorkArrangement::Remote) => Color::Green,
        Some(WorkArrangement::Hybrid) => Color::Blue,
        Some(WorkArrangement::OnSite) => Color::Magenta,
    }
}

fn recency_chip_color(recency: Option<Recency>) -> Color {
    match recency {
        None => Color::Gray,
        Some(Recency::Today) => Color::LightMagenta,
        Some(Recency::Last3Days) => Color::Rgb(99, 102, 241),
        Some(Recency::LastWeek) => Color::Cyan,
        Some(Recency::LastMonth) => Color::Rgb(20, 184, 166),
    }
}

fn work_badge_color(work: WorkArrangement) -> Color {
    match work {
        WorkArrangement::Remote => Color::Green,
        WorkArrangement::Hybrid => Color::Blue,
        WorkArrangement::OnSite => Color::Gray,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct AppState<'a> {
    catalog: &'a Catalog,
    board: BoardState,
    selected: usize,
    scroll_offset: u16,
    mode: InputMode,
}

impl<'a> AppState<'a> {
    fn new(catalog: &'a Catalog, board: BoardState) -> Self {
        Self {
            catalog,
            board,
            selected: 0,
            scroll_offset: 0,
            mode: InputMode::Normal,
        }
    }

    fn visible(&self) -> Vec<&'a JobPosting> {
        self.board.visible_jobs(self.catalog)
    }

    fn current_job(&self) -> Option<&'a JobPosting> {
        self.visible().get(self.selected).copied()
    }

    fn next(&mut self) {
        let len = self.visible().len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }

    fn visible_ids(&self) -> Vec<JobId> {
        self.visible().iter().map(|j| j.id).collect()
    }

    /// Keeps the cursor on a row that still exists and starts the detail
    /// pane from the top whenever the result set changed.
    fn sync_view(&mut self, before: &[JobId]) {
        let after = self.visible_ids();
        if after.as_slice() != before {
            self.scroll_offset = 0;
        }
        if self.selected >= after.len() {
            self.selected = after.len().saturating_sub(1);
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> Flow {
        let before = self.visible_ids();
        let flow = match self.mode {
            InputMode::Search => self.handle_search_key(code),
            InputMode::Normal => self.handle_normal_key(code),
        };
        self.sync_view(&before);
        flow
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Flow {
        match code {
            KeyCode::Enter | KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Backspace => {
                let mut text = self.board.criteria.search_text.clone();
                text.pop();
                self.board.set_search_text(text);
            }
            KeyCode::Char(c) => {
                let mut text = self.board.criteria.search_text.clone();
                text.push(c);
                self.board.set_search_text(text);
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Flow {
        let criteria = self.board.criteria.clone();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.prev(),
            KeyCode::Char('J') | KeyCode::PageDown => self.scroll_down(),
            KeyCode::Char('K') | KeyCode::PageUp => self.scroll_up(),
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Char('f') => self.board.toggle_filters_panel(),
            KeyCode::Char('t') => self.board.toggle_theme(),
            KeyCode::Char('s') => {
                let band = cycle_next(&SalaryBand::ALL, criteria.salary_band);
                self.board.set_salary_band(band);
            }
            KeyCode::Char('w') => {
                let work = cycle_next(&WorkArrangement::ALL, criteria.work_arrangement);
                self.board.set_work_arrangement(work);
            }
            KeyCode::Char('d') => {
                let recency = cycle_next(&Recency::ALL, criteria.recency);
                self.board.set_recency(recency);
            }
            KeyCode::Char('c') => self.board.clear_all_filters(),
            KeyCode::Char(' ') | KeyCode::Char('*') => {
                if let Some(job) = self.current_job() {
                    self.board.toggle_saved_job(job.id);
                }
            }
            _ => {}
        }
        Flow::Continue
    }
}

pub fn run_browse(catalog: &Catalog, board: BoardState) -> Result<()> {
    let mut state = AppState::new(catalog, board);
    info!(
        jobs = catalog.len(),
        visible = state.visible().len(),
        dark = state.board.selection.dark_theme,
        "starting board session"
    );

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    info!(
        saved = state.board.selection.saved_job_ids.len(),
        "board session ended"
    );
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, state: &mut AppState) -> Result<()> {
    let mut list_state = ListState::default();

    loop {
        list_state.select(if state.visible().is_empty() { None } else { Some(state.selected) });
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if state.handle_key(key.code) == Flow::Quit {
                break;
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState) {
    let palette = Palette::for_theme(state.board.selection.dark_theme);
    let base = Style::default().bg(palette.bg).fg(palette.fg);
    frame.render_widget(Block::default().style(base), frame.area());

    let panel_height = if state.board.selection.filters_panel_open { 6 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(panel_height),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, rows[0], state, &palette);
    draw_search(frame, rows[1], state, &palette);
    if state.board.selection.filters_panel_open {
        draw_filter_panel(frame, rows[2], state, &palette);
    }

    let visible = state.visible();
    let count = Paragraph::new(format!(" Showing {} jobs", visible.len())).style(Style::default().fg(palette.muted));
    frame.render_widget(count, rows[3]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[4]);

    // Left panel: job list
    let items: Vec<ListItem> = visible
        .iter()
        .map(|job| {
            let star = if state.board.is_saved(job.id) {
                Span::styled("★ ", Style::default().fg(palette.star))
            } else {
                Span::styled("☆ ", Style::default().fg(palette.muted))
            };
            let featured = if job.featured { "▌" } else { " " };
            ListItem::new(Line::from(vec![
                Span::styled(featured, Style::default().fg(Color::Blue)),
                star,
                Span::raw(truncate(&job.title, 32)),
                Span::styled(format!(" | {}", job.company), Style::default().fg(palette.muted)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(bordered(" Jobs ", &palette))
        .highlight_style(Style::default().bg(palette.highlight_bg).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    // Right panel: job detail
    let detail_widget = Paragraph::new(build_detail(state, &palette))
        .block(bordered(" Detail ", &palette))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));

    frame.render_widget(detail_widget, chunks[1]);

    let help = match state.mode {
        InputMode::Search => " type to search  enter/esc:done",
        InputMode::Normal => {
            " j/k:navigate  J/K:scroll  /:search  f:filters s/w/d:salary/work/date c:clear  space:save  t:theme  q:quit"
        }
    };
    frame.render_widget(Paragraph::new(help).style(Style::default().fg(palette.muted)), rows[5]);
}

fn bordered<'a>(title: &'a str, palette: &Palette) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(title)
}

fn draw_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let theme = if state.board.selection.dark_theme { "☾ dark" } else { "☀ light" };
    let header = Text::from(vec![
        Line::from(vec![
            Span::styled(" PeopleOps Jobs", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  [{}]", theme), Style::default().fg(palette.muted)),
        ]),
        Line::from(Span::styled(
            " Find your next opportunity in People Operations",
            Style::default().fg(palette.muted),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn draw_search(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let text = &state.board.criteria.search_text;
    let content = if text.is_empty() && state.mode == InputMode::Normal {
        Span::styled("Search jobs or companies...", Style::default().fg(palette.muted))
    } else {
        Span::raw(text.clone())
    };
    let title = if state.board.criteria.has_categorical_filters() {
        " Search (filters active) "
    } else {
        " Search "
    };
    let border = if state.mode == InputMode::Search { palette.star } else { palette.border };
    let search = Paragraph::new(Line::from(content)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );
    frame.render_widget(search, area);
}

fn chip<'a>(label: &'a str, active: bool, color: Color, palette: &Palette) -> Span<'a> {
    let style = if active {
        Style::default().bg(color).fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(palette.chip_idle).fg(palette.muted)
    };
    Span::styled(format!(" {} ", label), style)
}

fn chip_row<'a, T: Copy + PartialEq>(
    heading: &'a str,
    all_label: &'a str,
    options: &[T],
    current: Option<T>,
    label: fn(&T) -> &'static str,
    color: fn(Option<T>) -> Color,
    palette: &Palette,
) -> Line<'a> {
    let mut spans = vec![Span::styled(format!("{:<12}", heading), Style::default().add_modifier(Modifier::BOLD))];
    spans.push(chip(all_label, current.is_none(), color(None), palette));
    for option in options {
        spans.push(Span::raw(" "));
        let active = current == Some(*option);
        spans.push(chip(label(option), active, color(Some(*option)), palette));
    }
    Line::from(spans)
}

fn draw_filter_panel(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let criteria = &state.board.criteria;
    let lines = vec![
        chip_row(
            "Salary (s)",
            "All",
            &SalaryBand::ALL,
            criteria.salary_band,
            SalaryBand::label,
            salary_chip_color,
            palette,
        ),
        chip_row(
            "Work (w)",
            "All Types",
            &WorkArrangement::ALL,
            criteria.work_arrangement,
            WorkArrangement::label,
            work_chip_color,
            palette,
        ),
        chip_row(
            "Posted (d)",
            "Any Time",
            &Recency::ALL,
            criteria.recency,
            Recency::label,
            recency_chip_color,
            palette,
        ),
        Line::from(Span::styled("c: Clear All Filters", Style::default().fg(palette.muted))),
    ];
    let panel = Paragraph::new(lines).block(bordered(" Filter Jobs ", palette));
    frame.render_widget(panel, area);
}

fn build_detail(state: &AppState, palette: &Palette) -> Text<'static> {
    let Some(job) = state.current_job() else {
        return Text::raw("No jobs match the current filters");
    };

    let mut lines: Vec<Line> = Vec::new();

    // Header
    let mut title = vec![Span::styled(job.title.clone(), Style::default().add_modifier(Modifier::BOLD))];
    if job.featured {
        title.push(Span::styled("  Featured", Style::default().fg(Color::Blue)));
    }
    lines.push(Line::from(title));

    lines.push(Line::from(format!("at {}", job.company)));
    lines.push(Line::from(format!("{}  ·  {}", job.location, job.posted_display)));
    lines.push(Line::from(vec![
        Span::styled(
            format!(" {} ", job.work_arrangement),
            Style::default().bg(work_badge_color(job.work_arrangement)).fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(job.salary_display.clone(), Style::default().fg(Color::Green)),
    ]));

    let saved = if state.board.is_saved(job.id) {
        Span::styled("★ Saved", Style::default().fg(palette.star))
    } else {
        Span::styled("☆ Not saved", Style::default().fg(palette.muted))
    };
    lines.push(Line::from(saved));
    lines.push(Line::from(""));

    for line in textwrap::fill(&job.description, 70).lines() {
        lines.push(Line::from(line.to_string()));
    }
    lines.push(Line::from(""));

    let mut tags: Vec<Span> = Vec::new();
    for tag in &job.tags {
        tags.push(Span::styled(format!(" {} ", tag), Style::default().bg(palette.chip_idle).fg(palette.fg)));
        tags.push(Span::raw(" "));
    }
    lines.push(Line::from(tags));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Ready for your next People Ops role?",
        Style::default().fg(palette.muted),
    )));

    Text::from(lines)
}
