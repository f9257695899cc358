use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::io;

pub struct App {
    items: Vec<String>,
    amount_input: String,
    amount_editable: bool,
    selected: usize,
}

impl App {
    pub fn new(items: Vec<String>, amount_input: String, amount_editable: bool) -> App {
        App {
            items,
            amount_input,
            amount_editable,
            selected: 0,
        }
    }

    pub fn next(&mut self) {
        if self.selected >= self.items.len() - 1 {
            self.selected = 0;
        } else {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.selected == 0 {
            self.selected = self.items.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    // Amount edits only apply when the amount was not fixed on the command line
    pub fn push_amount_char(&mut self, c: char) {
        if self.amount_editable && (c.is_ascii_digit() || c == '.') {
            self.amount_input.push(c);
        }
    }

    pub fn backspace_amount(&mut self) {
        if self.amount_editable {
            self.amount_input.pop();
        }
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> Result<Option<(usize, String)>> {
    loop {
        terminal.draw(|f| {
            draw_ui(f, &app);
        })?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                KeyCode::Down => app.next(),
                KeyCode::Up => app.previous(),
                KeyCode::Backspace => app.backspace_amount(),
                KeyCode::Char(c) => app.push_amount_char(c),
                KeyCode::Enter => return Ok(Some((app.selected, app.amount_input.clone()))),
                _ => {}
            }
        }
    }
}

fn draw_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(f.size());

    let title = Paragraph::new("Crypto Payment Helper")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = app
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == app.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(item.as_str(), style)]))
        })
        .collect();

    let items = List::new(items).block(
        Block::default()
            .title("Select Cryptocurrency")
            .borders(Borders::ALL),
    );
    f.render_widget(items, chunks[1]);

    let footer_text = if app.amount_editable {
        format!(
            "Amount (USD): {}_  Enter to calculate, q to quit",
            app.amount_input
        )
    } else {
        format!(
            "Converting {} USD. Enter to calculate, q to quit",
            app.amount_input
        )
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[2]);
}

pub fn start_tui(
    options: Vec<String>,
    amount_input: String,
    amount_editable: bool,
) -> Result<Option<(usize, String)>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(options, amount_input, amount_editable);
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}
