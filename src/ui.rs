use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Sparkline},
};

use crate::events::{Event as JournalEvent, EventLogger, EventType};
use crate::types::TradeSide;

const SECONDS_PER_DAY: f32 = 1.5;

/// Day-by-day cursor over a recorded journal.
pub struct ReplayState {
    events: Vec<JournalEvent>,
    /// Distinct days in journal order.
    days: Vec<u32>,
    /// Gold at the close of each entry in `days`.
    gold_by_day: Vec<u64>,
    current: usize,
    paused: bool,
    last_step: Instant,
}

impl ReplayState {
    pub fn new(events: Vec<JournalEvent>) -> Self {
        let mut days: Vec<u32> = Vec::new();
        let mut gold_by_day: Vec<u64> = Vec::new();
        let mut gold = 0u64;

        for event in &events {
            if days.last() != Some(&event.day) {
                days.push(event.day);
                gold_by_day.push(gold);
            }
            if let Some(g) = event.event_type.gold() {
                gold = u64::from(g);
                if let Some(last) = gold_by_day.last_mut() {
                    *last = gold;
                }
            }
        }

        Self {
            events,
            days,
            gold_by_day,
            current: 0,
            paused: true,
            last_step: Instant::now(),
        }
    }

    pub fn current_day(&self) -> Option<u32> {
        self.days.get(self.current).copied()
    }

    /// Events recorded for the day under the cursor.
    pub fn day_events(&self) -> Vec<&JournalEvent> {
        match self.current_day() {
            Some(day) => self.events.iter().filter(|e| e.day == day).collect(),
            None => Vec::new(),
        }
    }

    /// Closing gold for every day up to and including the cursor.
    pub fn gold_history(&self) -> &[u64] {
        let end = (self.current + 1).min(self.gold_by_day.len());
        &self.gold_by_day[..end]
    }

    pub fn step_forward(&mut self) {
        if self.current + 1 < self.days.len() {
            self.current += 1;
        }
    }

    pub fn step_backward(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn jump_to_start(&mut self) {
        self.current = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.current = self.days.len().saturating_sub(1);
    }

    fn at_end(&self) -> bool {
        self.current + 1 >= self.days.len()
    }
}

/// Open the journal at `journal_file` and browse it in the terminal.
pub fn run_replay(journal_file: &Path) -> io::Result<()> {
    let events = if journal_file.exists() {
        EventLogger::load_from_file(journal_file)?
            .get_events()
            .to_vec()
    } else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Journal file not found: {}", journal_file.display()),
        ));
    };

    if events.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "No events found in journal",
        ));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = ReplayState::new(events);
    let res = run_app(&mut terminal, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut ReplayState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char(' ') => state.paused = !state.paused,
                        KeyCode::Right => state.step_forward(),
                        KeyCode::Left => state.step_backward(),
                        KeyCode::Home => state.jump_to_start(),
                        KeyCode::End => state.jump_to_end(),
                        _ => {}
                    }
                    state.last_step = Instant::now();
                }
            }
        }

        if !state.paused && !state.at_end() {
            if state.last_step.elapsed().as_secs_f32() >= SECONDS_PER_DAY {
                state.step_forward();
                state.last_step = Instant::now();
            }
        }
    }
}

fn draw_ui(f: &mut Frame, state: &ReplayState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Gold trend
            Constraint::Min(5),    // Day events
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    let header = Paragraph::new(format!(
        "Trade Journal - Day {} ({}/{}) {}",
        state.current_day().unwrap_or(0),
        state.current + 1,
        state.days.len(),
        if state.paused { "[PAUSED]" } else { "" }
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    let history = state.gold_history();
    let gold_now = history.last().copied().unwrap_or(0);
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Gold: {} ", gold_now)),
        )
        .data(history)
        .style(Style::default().fg(Color::Yellow));
    f.render_widget(sparkline, chunks[1]);

    let items: Vec<ListItem> = state
        .day_events()
        .into_iter()
        .map(|e| ListItem::new(Line::from(Span::styled(e.to_string(), event_style(&e.event_type)))))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Events "));
    f.render_widget(list, chunks[2]);

    let footer = Paragraph::new("[Q] Quit  [Space] Play/Pause  [←→] Step  [Home/End] Jump")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, chunks[3]);
}

fn event_style(event_type: &EventType) -> Style {
    match event_type {
        EventType::TradeExecuted {
            side: TradeSide::Buy,
            ..
        } => Style::default().fg(Color::Red),
        EventType::TradeExecuted {
            side: TradeSide::Sell,
            ..
        } => Style::default().fg(Color::Green),
        EventType::TravelFailed { .. } => Style::default().fg(Color::Yellow),
        EventType::DayStarted { .. } | EventType::DayEnded { .. } => {
            Style::default().add_modifier(Modifier::BOLD)
        }
        _ => Style::default().fg(Color::White),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;

    fn three_day_journal() -> Vec<JournalEvent> {
        let mut game = Game::new(GameConfig::default(), 11);
        for day in 0..3 {
            game.start_day().unwrap();
            game.travel(day).unwrap();
            game.leave_village().unwrap();
            game.end_day(day < 2).unwrap();
        }
        game.journal().get_events().to_vec()
    }

    #[test]
    fn test_replay_groups_by_day() {
        let mut state = ReplayState::new(three_day_journal());

        assert_eq!(state.current_day(), Some(1));
        assert_eq!(state.day_events().len(), 3);

        state.step_forward();
        state.step_forward();
        state.step_forward();
        assert_eq!(state.current_day(), Some(3));
        assert!(state.at_end());

        state.step_backward();
        assert_eq!(state.current_day(), Some(2));
        state.jump_to_start();
        state.step_backward();
        assert_eq!(state.current_day(), Some(1));
    }

    #[test]
    fn test_gold_history_tracks_closing_gold() {
        let mut state = ReplayState::new(three_day_journal());
        assert_eq!(state.gold_history(), &[90]);

        state.jump_to_end();
        assert_eq!(state.gold_history(), &[90, 80, 70]);
    }

    #[test]
    fn test_empty_replay() {
        let state = ReplayState::new(Vec::new());
        assert_eq!(state.current_day(), None);
        assert!(state.day_events().is_empty());
        assert!(state.gold_history().is_empty());
    }
}
