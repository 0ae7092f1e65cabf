mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mortgage_calc::{config::CalcConfig, Calculator, FieldError, FieldName, MortgageType};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{fs::OpenOptions, io, sync::Mutex};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct App {
    calculator: Calculator,
    focus: FieldName,
}

impl Default for App {
    fn default() -> Self {
        Self {
            calculator: Calculator::new(),
            focus: FieldName::Amount,
        }
    }
}

impl App {
    fn focus_index(&self) -> usize {
        FieldName::ALL
            .iter()
            .position(|&name| name == self.focus)
            .unwrap_or(0)
    }

    /// Leaving a numeric field re-runs its edit path, so an untouched empty
    /// field becomes flagged.
    fn blur(&mut self) {
        if self.focus.is_numeric() {
            let value = self.calculator.state().get(self.focus).value.clone();
            self.edit_focused(&value);
        }
    }

    /// Rejected input keeps the previous value; anything else is logged.
    fn edit_focused(&mut self, value: &str) {
        match self.calculator.edit(self.focus, value) {
            Ok(()) | Err(FieldError::Unparseable { .. }) => {}
            Err(err) => tracing::warn!(field = %self.focus, %err, "edit not applied"),
        }
    }

    fn next_field(&mut self) {
        self.blur();
        let count = FieldName::ALL.len();
        self.focus = FieldName::ALL[(self.focus_index() + 1) % count];
    }

    fn prev_field(&mut self) {
        self.blur();
        let count = FieldName::ALL.len();
        self.focus = FieldName::ALL[(self.focus_index() + count - 1) % count];
    }

    fn push_char(&mut self, c: char) {
        let mut value = self.calculator.state().get(self.focus).value.clone();
        value.push(c);
        self.edit_focused(&value);
    }

    fn pop_char(&mut self) {
        let mut value = self.calculator.state().get(self.focus).value.clone();
        value.pop();
        self.edit_focused(&value);
    }

    fn submit(&mut self) {
        self.blur();
        let outcome = self.calculator.submit();
        if let Some(first) = outcome.errors.first().and_then(|err| err.field()) {
            self.focus = first;
        }
    }
}

fn main() -> Result<()> {
    let (config, config_error) = match CalcConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (CalcConfig::default(), Some(err)),
    };
    init_logging(&config)?;
    if let Some(err) = config_error {
        tracing::warn!("ignoring unreadable config: {err:#}");
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::default();
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(config: &CalcConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));

    let (writer, ansi) = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi))
        .init();
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(&mut app, key) {
                return Ok(());
            }
        }
    }
}

/// Returns true when the app should exit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.calculator.clear();
            app.focus = FieldName::Amount;
        }
        KeyCode::Enter => app.submit(),
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        _ if app.focus == FieldName::Type => handle_type_input(app, key),
        _ => handle_numeric_input(app, key),
    }
    false
}

fn handle_numeric_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        _ => {}
    }
}

fn handle_type_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('r') | KeyCode::Char('R') => {
            app.calculator.select_type(MortgageType::Repayment)
        }
        KeyCode::Right | KeyCode::Char('i') | KeyCode::Char('I') => {
            app.calculator.select_type(MortgageType::InterestOnly)
        }
        _ => {}
    }
}
