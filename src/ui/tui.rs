use crate::core::error::Result;
use crate::index::model::Index;
use crate::search::hit::MatchHit;
use crate::search::matcher::{match_query, MatchOptions};
use crate::ui::debounce::Debounce;
use crate::ui::render::{detail_lines, headline, NO_HITS};
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::cursor;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use std::io;
use std::time::{Duration, Instant};

/// How long to block on input when nothing is pending
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Interactive search box. Typing schedules a ranking pass through the
/// debounce policy; Enter ranks immediately.
pub struct SearchTui<'a> {
    index: &'a Index,
    options: MatchOptions,
    limit: usize,
    debounce: Debounce,

    query: String,
    results: Vec<MatchHit<'a>>,
    selected: usize,
    passes: usize,
}

impl<'a> SearchTui<'a> {
    pub fn new(index: &'a Index, options: MatchOptions, limit: usize, debounce: Duration) -> Self {
        Self {
            index,
            options,
            limit,
            debounce: Debounce::new(debounce),
            query: String::new(),
            results: Vec::new(),
            selected: 0,
            passes: 0,
        }
    }

    /// Start with `query` already ranked
    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self.perform_search();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MatchHit<'a>] {
        &self.results
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Number of ranking passes run so far
    pub fn passes(&self) -> usize {
        self.passes
    }

    fn perform_search(&mut self) {
        let mut hits = match_query(&self.query, self.index, &self.options);
        hits.truncate(self.limit);
        self.results = hits;
        self.selected = 0;
        self.passes += 1;
    }

    /// Apply a key press. Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('c') if ctrl => return true,
            KeyCode::Char('u') if ctrl => {
                self.query.clear();
                self.debounce.trigger(now);
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.debounce.trigger(now);
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.debounce.trigger(now);
                }
            }
            KeyCode::Enter => {
                self.debounce.cancel();
                self.perform_search();
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected < self.results.len().saturating_sub(1) {
                    self.selected += 1;
                }
            }
            _ => {}
        }
        false
    }

    /// Run the pending ranking pass if its quiet period is over
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.poll(now) {
            self.perform_search();
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        // Always restore terminal, even if we early-return with an error.
        struct TerminalRestore;
        impl Drop for TerminalRestore {
            fn drop(&mut self) {
                let _ = disable_raw_mode();
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
            }
        }
        let _restore = TerminalRestore;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        loop {
            terminal.draw(|f| self.render_ui(f))?;

            let timeout = self.debounce.time_left(Instant::now()).unwrap_or(IDLE_POLL);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key, Instant::now()) {
                        break;
                    }
                }
            }
            self.tick(Instant::now());
        }

        Ok(())
    }

    fn render_ui(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Search bar
                Constraint::Min(0),    // Results
                Constraint::Length(2), // Footer
            ])
            .split(size);

        let title = Paragraph::new(Line::from(vec![Span::styled(
            "dsfind",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]))
        .alignment(Alignment::Left);
        f.render_widget(title, chunks[0]);

        let search_text = if self.query.is_empty() {
            Span::styled("Søk etter mønster, komponent eller side...", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(self.query.as_str(), Style::default().fg(Color::White))
        };
        let search = Paragraph::new(Line::from(search_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Søk"),
        );
        f.render_widget(search, chunks[1]);

        if self.results.is_empty() {
            let message = if self.index.is_empty() {
                "Indeksen er tom eller kunne ikke lastes."
            } else {
                NO_HITS
            };
            let empty = Paragraph::new(vec![Line::from(""), Line::from(message)])
                .block(Block::default().borders(Borders::ALL).title("Treff"))
                .alignment(Alignment::Center);
            f.render_widget(empty, chunks[2]);
        } else {
            let result_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[2]);

            let items: Vec<ListItem> = self
                .results
                .iter()
                .map(|hit| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("[{:3}] ", hit.score), Style::default().fg(Color::DarkGray)),
                        Span::raw(headline(hit)),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("Treff ({})", self.results.len())),
                )
                .highlight_style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            let mut list_state = ListState::default();
            list_state.select(Some(self.selected));
            f.render_stateful_widget(list, result_chunks[0], &mut list_state);

            if let Some(hit) = self.results.get(self.selected) {
                let mut lines = vec![
                    Line::from(Span::styled(
                        headline(hit),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                ];
                lines.extend(detail_lines(hit).into_iter().map(Line::from));
                let details = Paragraph::new(lines)
                    .block(Block::default().borders(Borders::ALL).title("Detaljer"))
                    .wrap(Wrap { trim: false });
                f.render_widget(details, result_chunks[1]);
            }
        }

        let pending = if self.debounce.is_pending() { "  …" } else { "" };
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": Søk  "),
            Span::styled("↑↓", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(": Velg  "),
            Span::styled("Ctrl+U", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(": Tøm  "),
            Span::styled("Esc", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(": Avslutt"),
            Span::raw(pending),
        ]))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
        f.render_widget(footer, chunks[3]);
    }
}
