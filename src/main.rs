mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use hiragana_quiz::{
    app_dirs::AppDirs,
    backdrop::Backdrop,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{QuizEvent, Runner, Timed},
    Dataset, Mode, Quiz, QuizError, Status, SubmitReason, TimeLimit,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

/// timed hiragana flashcards in your terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed flashcard quiz over the 46 basic hiragana. Every character is asked exactly once per round; answer before the clock runs out to build your streak."
)]
pub struct Cli {
    /// seconds allowed per character: 5, 10, 15, 30 or 60
    #[clap(short = 't', long, value_parser = parse_time_limit)]
    time_limit: Option<TimeLimit>,

    /// quiz direction
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// settings file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// seed for a reproducible question order
    #[clap(long)]
    seed: Option<u64>,

    /// turn off the drifting kana background
    #[clap(long)]
    no_backdrop: bool,
}

fn parse_time_limit(s: &str) -> Result<TimeLimit, String> {
    let secs: u32 = s.parse().map_err(|e| format!("{e}"))?;
    TimeLimit::try_from(secs).map_err(|e| e.to_string())
}

impl Cli {
    fn load_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        store
            .load()
            .with_overrides(self.time_limit, self.mode, self.no_backdrop)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub quiz: Quiz,
    pub backdrop: Option<Backdrop>,
}

impl App {
    pub fn new(cli: &Cli) -> Result<Self, QuizError> {
        let config = cli.load_config();
        let dataset = Arc::new(Dataset::hiragana()?);
        let quiz = match cli.seed {
            Some(seed) => Quiz::with_seed(dataset.clone(), config.session_config(), seed),
            None => Quiz::new(dataset.clone(), config.session_config()),
        };
        let backdrop = config.backdrop.then(|| Backdrop::new(&dataset));

        Ok(Self { quiz, backdrop })
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match self.quiz.status() {
            Status::NotStarted => return self.on_menu_key(key),
            Status::AwaitingAnswer | Status::Cooldown => self.on_answer_key(key),
            Status::Completed => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.quiz.start(),
                KeyCode::Esc => self.quiz.stop(),
                KeyCode::Char('q') => return Flow::Quit,
                _ => {}
            },
        }
        Flow::Continue
    }

    fn on_menu_key(&mut self, key: KeyEvent) -> Flow {
        let config = self.quiz.config();
        let changed = match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.quiz.start();
                Ok(())
            }
            KeyCode::Left => self.quiz.set_time_limit(config.time_limit.shorter()),
            KeyCode::Right => self.quiz.set_time_limit(config.time_limit.longer()),
            KeyCode::Tab | KeyCode::Char('m') => self.quiz.set_mode(config.mode.toggled()),
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            _ => Ok(()),
        };
        if let Err(err) = changed {
            tracing::warn!(%err, "settings change rejected");
        }
        Flow::Continue
    }

    fn on_answer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.quiz.stop(),
            KeyCode::Enter => self.quiz.submit(SubmitReason::UserInitiated),
            KeyCode::Backspace => {
                let mut text = self.quiz.state().user_input.clone();
                text.pop();
                self.quiz.update_input(text);
            }
            KeyCode::Char(c) => {
                let mut text = self.quiz.state().user_input.clone();
                text.push(c);
                self.quiz.update_input(text);
            }
            _ => {}
        }
    }
}

impl Timed for App {
    /// Moves quiz timers and the background animation forward.
    fn advance(&mut self, elapsed: Duration) {
        self.quiz.advance(elapsed);
        if let Some(backdrop) = self.backdrop.as_mut() {
            backdrop.update(elapsed);
        }
    }
}

/// Installs the file logger, or says why it could not.
fn start_logging(path: &Path) -> Result<(), String> {
    logging::init(path)
        .map_err(|err| format!("hiragana-quiz: logging disabled ({}): {err}", path.display()))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        // Logging is best effort; the quiz runs without it
        if let Err(msg) = start_logging(&path) {
            eprintln!("{msg}");
        }
    }

    let mut app = App::new(&cli)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::terminal();

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        if let Some(QuizEvent::Key(key)) = runner.step(&mut *app) {
            if app.on_key(key) == Flow::Quit {
                break;
            }
        }

        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}
