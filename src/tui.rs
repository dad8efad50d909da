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

use crate::analytics;
use crate::state::Marketplace;
use crate::store::StorePort;

struct BrowseState {
    selected: usize,
    scroll_offset: u16,
    message: Option<String>,
}

impl BrowseState {
    fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            message: None,
        }
    }

    fn next(&mut self, len: usize) {
        // Any navigation drops the last action flash so the help line
        // comes back.
        self.message = None;
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        self.message = None;
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
}

pub fn run_browse<S: StorePort>(market: &mut Marketplace<S>) -> Result<()> {
    if market.jobs().is_empty() {
        println!("No jobs found. Run 'skillhire init' to seed demo data.");
        return Ok(());
    }

    let mut state = BrowseState::new();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, market);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop<S: StorePort>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut BrowseState,
    market: &mut Marketplace<S>,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        terminal.draw(|frame| draw(frame, market, state, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(market.jobs().len()),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Char('a') => {
                    let job_id = market.jobs().get(state.selected).map(|j| j.id.clone());
                    if let Some(id) = job_id {
                        state.message = match market.apply(&id, "resume.pdf") {
                            Some(app) => Some(format!(
                                "Applied to {} at {} ({})",
                                app.job_title, app.company, app.id
                            )),
                            None => Some(format!("Job '{}' not found", id)),
                        };
                    }
                }
                _ => {}
            }
            list_state.select(Some(state.selected));
        }
    }
    Ok(())
}

fn draw<S: StorePort>(
    frame: &mut Frame,
    market: &Marketplace<S>,
    state: &BrowseState,
    list_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(frame.area());

    // Left panel: job board
    let items: Vec<ListItem> = market
        .jobs()
        .iter()
        .map(|job| {
            let title = if job.title.chars().count() > 30 {
                let cut: String = job.title.chars().take(27).collect();
                format!("{}...", cut)
            } else {
                job.title.clone()
            };
            ListItem::new(format!("{} {} | {}", job.id, title, job.company))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Jobs ({}) ",
            market.jobs().len()
        )))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[0], list_state);

    // Right panel: job detail
    let detail = build_detail(market, state);
    let detail_widget = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));

    frame.render_widget(detail_widget, chunks[1]);

    // Footer: last action or help
    let footer_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let footer_text = match &state.message {
        Some(msg) => msg.clone(),
        None => " j/k:navigate  J/K:scroll  a:apply  q:quit".to_string(),
    };
    let footer = Paragraph::new(footer_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area[1]);
}

fn build_detail<S: StorePort>(market: &Marketplace<S>, state: &BrowseState) -> Text<'static> {
    let Some(job) = market.jobs().get(state.selected) else {
        return Text::raw("No job selected");
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        job.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("at {}", job.company)));
    lines.push(Line::from(format!("Location: {}", job.location)));
    lines.push(Line::from(format!("CTC (LPA): {}", job.salary)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Skills",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("  {}", job.skills.join(", "))));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Description",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for line in textwrap::fill(&job.description, 70).lines() {
        lines.push(Line::from(format!("  {}", line)));
    }
    lines.push(Line::from(""));

    // Pipeline summary for this posting
    let applied_here = market
        .applications()
        .iter()
        .filter(|a| a.job_id == job.id)
        .count();
    if applied_here > 0 {
        lines.push(Line::from(Span::styled(
            format!("You applied {} time(s)", applied_here),
            Style::default().fg(Color::Cyan),
        )));
    }

    let pipeline = analytics::pipeline_distribution(market.applications());
    let summary: Vec<String> = pipeline
        .iter()
        .map(|(status, count)| format!("{}: {}", status, count))
        .collect();
    lines.push(Line::from(Span::styled(
        format!("Pipeline  {}", summary.join("  ")),
        Style::default().fg(Color::DarkGray),
    )));

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_clears_stale_footer_message() {
        let mut state = BrowseState::new();
        state.message = Some("Applied to Backend Developer at Quanta Systems".to_string());
        state.next(3);
        assert!(state.message.is_none());

        state.message = Some("Applied to Frontend Developer at Nimbus Tech".to_string());
        state.prev();
        assert!(state.message.is_none());
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut state = BrowseState::new();
        state.prev();
        assert_eq!(state.selected, 0);
        state.next(2);
        assert_eq!(state.selected, 1);
        state.next(2);
        assert_eq!(state.selected, 1);
    }
}
