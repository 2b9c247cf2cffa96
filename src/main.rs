pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use gauntlet::{
    app_dirs::AppDirs,
    catalog::{self, KanaCatalog},
    challenge::{ChallengeConfig, Direction, Dojo, Mode, Status},
    config::{Config, ConfigStore, FileConfigStore},
    dojo::{kana, kanji, vocabulary, DojoKind, KanaDojo, KanjiDojo, VocabDojo},
    engine::{Challenge, Engine},
    error::ConfigError,
    history::{HistoryLog, HistoryRecord},
    runtime::{CrosstermEventSource, EventSource, FixedTicker, GauntletEvent, Runner, Ticker},
    session::{FinishReason, Phase},
    telemetry,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// flashcard drills for kana, kanji and vocabulary in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Multiple choice and free text flashcard drills for Japanese kana, kanji and vocabulary, with an optional blitz clock and a history of past sessions."
)]
pub struct Cli {
    /// what to study (defaults to the saved choice)
    #[clap(value_enum)]
    dojo: Option<DojoKind>,

    /// answer by picking an option or by typing
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// show the answer side and ask for the native form
    #[clap(short = 'r', long)]
    reverse: bool,

    /// blitz: seconds on the clock
    #[clap(short = 'b', long)]
    blitz: Option<u64>,

    /// number of options in pick mode
    #[clap(short = 'o', long)]
    options: Option<usize>,

    /// stop after this many questions
    #[clap(short = 'q', long)]
    questions: Option<usize>,

    /// kana group indices, comma separated (e.g. 0,1,2)
    #[clap(short = 'g', long, value_delimiter = ',')]
    groups: Vec<usize>,

    /// kanji JLPT levels or vocabulary levels, comma separated
    #[clap(short = 'l', long, value_delimiter = ',')]
    levels: Vec<u32>,

    /// remember these choices as the new defaults
    #[clap(long)]
    save: bool,

    /// fixed random seed, for reproducible drills
    #[clap(long, hide = true)]
    seed: Option<u64>,
}

impl Cli {
    /// Apply command line overrides on top of stored preferences
    fn merge(&self, stored: Config) -> Config {
        let mut cfg = stored;
        if let Some(dojo) = self.dojo {
            cfg.dojo = dojo;
        }
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if self.reverse {
            cfg.reverse = true;
        }
        if let Some(secs) = self.blitz {
            cfg.blitz_secs = Some(secs);
        }
        if let Some(count) = self.options {
            cfg.option_count = count;
        }
        if let Some(limit) = self.questions {
            cfg.question_limit = Some(limit);
        }
        if !self.groups.is_empty() {
            cfg.kana_groups = self.groups.clone();
        }
        if !self.levels.is_empty() {
            match cfg.dojo {
                DojoKind::Kanji => cfg.kanji_levels = self.levels.clone(),
                DojoKind::Vocabulary => cfg.vocabulary_levels = self.levels.clone(),
                DojoKind::Kana => {}
            }
        }
        cfg
    }
}

fn configure<D: Dojo>(
    base: ChallengeConfig<D>,
    cfg: &Config,
    sets: Vec<String>,
) -> ChallengeConfig<D> {
    let direction = if cfg.reverse {
        Direction::Reverse
    } else {
        Direction::Forward
    };
    let mut config = base
        .with_mode(cfg.mode)
        .with_direction(direction)
        .with_reverse_mode(true)
        .with_option_count(cfg.option_count)
        .with_label(cfg.dojo.label(), sets);
    if let Some(secs) = cfg.blitz_secs {
        config = config.with_time_limit(Duration::from_secs(secs));
    }
    if let Some(limit) = cfg.question_limit {
        config = config.with_max_questions(limit);
    }
    config
}

fn boxed<D>(config: ChallengeConfig<D>, seed: Option<u64>) -> Result<Box<dyn Challenge>, ConfigError>
where
    D: Dojo + 'static,
    D::Item: 'static,
    D::Question: 'static,
{
    let engine = match seed {
        Some(seed) => Engine::with_seed(config, seed)?,
        None => Engine::new(config)?,
    };
    let engine = engine.on_cancel(|summary| {
        tracing::info!(
            dojo = %summary.dojo_label,
            score = summary.score,
            attempts = summary.attempts,
            "session cancelled"
        );
    });
    Ok(Box::new(engine))
}

/// Build the engine for the configured dojo from the embedded catalogs
pub fn build_challenge(cfg: &Config, seed: Option<u64>) -> Result<Box<dyn Challenge>, Box<dyn Error>> {
    let challenge = match cfg.dojo {
        DojoKind::Kana => {
            let catalog = KanaCatalog::load()?;
            let groups = if cfg.kana_groups.is_empty() {
                catalog.regular_groups()
            } else {
                cfg.kana_groups.clone()
            };
            let items = catalog.flatten(&groups)?;
            let sets = kana::selection_labels(&catalog, &groups);
            boxed(configure(ChallengeConfig::new(KanaDojo, items), cfg, sets), seed)?
        }
        DojoKind::Kanji => {
            let items = catalog::kanji_for_levels(catalog::load_kanji()?, &cfg.kanji_levels)?;
            let sets = kanji::level_labels(&cfg.kanji_levels);
            boxed(configure(ChallengeConfig::new(KanjiDojo, items), cfg, sets), seed)?
        }
        DojoKind::Vocabulary => {
            let items = catalog::vocabulary_for_levels(
                catalog::load_vocabulary()?,
                &cfg.vocabulary_levels,
            )?;
            let sets = vocabulary::level_labels(&cfg.vocabulary_levels);
            boxed(configure(ChallengeConfig::new(VocabDojo, items), cfg, sets), seed)?
        }
    };
    Ok(challenge)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    Quiz,
    Results,
    History,
}

pub struct App {
    pub challenge: Box<dyn Challenge>,
    /// free text typed in type mode
    pub input: String,
    pub state: AppState,
    pub history: Option<HistoryLog>,
    pub history_rows: Vec<HistoryRecord>,
    pub history_scroll: usize,
    recorded: bool,
}

impl App {
    pub fn new(challenge: Box<dyn Challenge>, history: Option<HistoryLog>) -> Self {
        Self {
            challenge,
            input: String::new(),
            state: AppState::Quiz,
            history,
            history_rows: Vec::new(),
            history_scroll: 0,
            recorded: false,
        }
    }

    pub fn restart(&mut self) {
        self.challenge.reset();
        self.input.clear();
        self.recorded = false;
        self.state = AppState::Quiz;
    }

    /// Move to the results screen once the session is over, appending it
    /// to the history the first time.
    pub fn sync_finished(&mut self) {
        if self.challenge.status() != Status::Finished {
            return;
        }
        if !self.recorded {
            self.recorded = true;
            let summary = self.challenge.summary();
            let cancelled = summary.finish_reason == Some(FinishReason::Cancelled);
            if let (Some(log), false) = (&self.history, cancelled || summary.attempts == 0) {
                if let Err(err) = log.append(&summary) {
                    tracing::warn!(%err, "could not record session history");
                }
            }
        }
        if self.state == AppState::Quiz {
            self.input.clear();
            self.state = AppState::Results;
        }
    }

    pub fn open_history(&mut self) {
        self.history_rows = match &self.history {
            Some(log) => log.read_all().unwrap_or_else(|err| {
                tracing::warn!(%err, "could not read session history");
                Vec::new()
            }),
            None => Vec::new(),
        };
        // newest first
        self.history_rows.reverse();
        self.history_scroll = 0;
        self.state = AppState::History;
    }

    pub fn on_tick(&mut self, dt: Duration) {
        self.challenge.tick(dt);
        self.sync_finished();
    }

    /// Returns false when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return false,
                KeyCode::Char('r') if self.state == AppState::Quiz => {
                    self.challenge.toggle_direction();
                }
                _ => {}
            }
            return true;
        }

        match self.state {
            AppState::Quiz => self.on_quiz_key(key),
            AppState::Results => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return false,
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('h') => self.open_history(),
                _ => {}
            },
            AppState::History => match key.code {
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    self.state = AppState::Results;
                }
                KeyCode::Up => {
                    self.history_scroll = self.history_scroll.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.history_scroll + 1 < self.history_rows.len() {
                        self.history_scroll += 1;
                    }
                }
                KeyCode::Home => self.history_scroll = 0,
                _ => {}
            },
        }
        true
    }

    fn on_quiz_key(&mut self, key: KeyEvent) {
        let view = self.challenge.view();

        match key.code {
            KeyCode::Esc => {
                if view.phase == Phase::Idle {
                    self.challenge.stop();
                } else {
                    self.challenge.cancel();
                }
            }
            KeyCode::Tab => {
                self.challenge.toggle_mode();
            }
            _ => match view.phase {
                Phase::Idle => {
                    if key.code == KeyCode::Enter {
                        self.challenge.start();
                    }
                }
                Phase::Presenting => match (view.mode, key.code) {
                    (Mode::Pick, KeyCode::Char(c)) => {
                        if let Some(digit) = c.to_digit(10).filter(|d| *d > 0) {
                            self.challenge.submit_option(digit as usize - 1);
                        }
                    }
                    (Mode::Type, KeyCode::Char(c)) => self.input.push(c),
                    (Mode::Type, KeyCode::Backspace) => {
                        self.input.pop();
                    }
                    (Mode::Type, KeyCode::Enter) => {
                        if !self.input.trim().is_empty()
                            && self.challenge.submit_answer(&self.input).is_some()
                        {
                            self.input.clear();
                        }
                    }
                    _ => {}
                },
                Phase::Evaluated => match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') => self.challenge.advance(),
                    KeyCode::Char('q') => self.challenge.stop(),
                    _ => {}
                },
                Phase::Finished => {}
            },
        }
        self.sync_finished();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(log_path) = AppDirs::log_path() {
        if let Err(err) = telemetry::init_tracing(&log_path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let cfg = cli.merge(store.load());
    if cli.save {
        store.save(&cfg)?;
        tracing::info!(path = %store.path().display(), "preferences saved");
    }

    let challenge = match build_challenge(&cfg, cli.seed) {
        Ok(challenge) => challenge,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, err.to_string()).exit();
        }
    };
    let mut app = App::new(challenge, HistoryLog::new());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = start_tui(&mut terminal, &mut app, runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut runner: Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GauntletEvent::Tick(dt) => {
                let running = matches!(
                    app.challenge.view().phase,
                    Phase::Presenting | Phase::Evaluated
                );
                app.on_tick(dt);
                if running {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            GauntletEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GauntletEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauntlet::dojo::KanaCharacter;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::mpsc;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn kana_app(mode: Mode, time_limit: Option<Duration>, history: Option<HistoryLog>) -> App {
        let items = vec![
            KanaCharacter::new("あ", "a"),
            KanaCharacter::new("い", "i"),
            KanaCharacter::new("う", "u"),
        ];
        let mut config = ChallengeConfig::new(KanaDojo, items)
            .with_mode(mode)
            .with_reverse_mode(true)
            .with_option_count(3)
            .with_label("Kana", vec!["あ-group".to_string()]);
        if let Some(limit) = time_limit {
            config = config.with_time_limit(limit);
        }
        let engine = Engine::with_seed(config, 7).unwrap();
        App::new(Box::new(engine), history)
    }

    fn correct_index(app: &App) -> usize {
        let view = app.challenge.view();
        let expected = match view.prompt.as_deref() {
            Some("あ") => "a",
            Some("い") => "i",
            Some("う") => "u",
            other => panic!("unexpected prompt {other:?}"),
        };
        view.options.iter().position(|o| o == expected).unwrap()
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(app, f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["gauntlet"]);

        assert_eq!(cli.dojo, None);
        assert_eq!(cli.mode, None);
        assert!(!cli.reverse);
        assert_eq!(cli.blitz, None);
        assert_eq!(cli.options, None);
        assert!(cli.groups.is_empty());
        assert!(!cli.save);
    }

    #[test]
    fn test_cli_full_flags() {
        let cli = Cli::parse_from([
            "gauntlet", "kanji", "--mode", "type", "--reverse", "--blitz", "60", "--options", "5",
            "--questions", "10", "--levels", "4,5", "--save",
        ]);

        assert_eq!(cli.dojo, Some(DojoKind::Kanji));
        assert_eq!(cli.mode, Some(Mode::Type));
        assert!(cli.reverse);
        assert_eq!(cli.blitz, Some(60));
        assert_eq!(cli.options, Some(5));
        assert_eq!(cli.questions, Some(10));
        assert_eq!(cli.levels, vec![4, 5]);
        assert!(cli.save);
    }

    #[test]
    fn test_cli_rejects_unknown_dojo() {
        assert!(Cli::try_parse_from(["gauntlet", "hanzi"]).is_err());
    }

    #[test]
    fn test_cli_overrides_stored_preferences() {
        let stored = Config {
            kana_groups: vec![3],
            vocabulary_levels: vec![2],
            ..Config::default()
        };
        let cli = Cli::parse_from(["gauntlet", "vocabulary", "-l", "1,3", "-b", "30"]);
        let cfg = cli.merge(stored);

        assert_eq!(cfg.dojo, DojoKind::Vocabulary);
        assert_eq!(cfg.vocabulary_levels, vec![1, 3]);
        assert_eq!(cfg.kana_groups, vec![3]);
        assert_eq!(cfg.blitz_secs, Some(30));
        assert_eq!(cfg.mode, Mode::Pick);
    }

    #[test]
    fn test_build_challenge_for_every_dojo() {
        for dojo in [DojoKind::Kana, DojoKind::Kanji, DojoKind::Vocabulary] {
            let cfg = Config {
                dojo,
                ..Config::default()
            };
            let mut challenge = build_challenge(&cfg, Some(1)).unwrap();
            challenge.start();
            let view = challenge.view();
            assert_eq!(view.dojo_label, dojo.label());
            assert!(view.prompt.is_some());
            assert!(!view.selected_sets.is_empty());
        }
    }

    #[test]
    fn test_build_challenge_reports_bad_config() {
        let cfg = Config {
            option_count: 1,
            ..Config::default()
        };
        let err = build_challenge(&cfg, None).err().unwrap();
        assert!(err.to_string().contains("option"));

        let cfg = Config {
            option_count: 10,
            ..Config::default()
        };
        let err = build_challenge(&cfg, None).err().unwrap();
        assert!(err.to_string().contains("at most 9"));

        let cfg = Config {
            dojo: DojoKind::Kanji,
            kanji_levels: vec![42],
            ..Config::default()
        };
        assert!(build_challenge(&cfg, None).is_err());
    }

    #[test]
    fn test_pick_flow_through_keys() {
        let mut app = kana_app(Mode::Pick, None, None);
        assert!(app.on_key(key(KeyCode::Enter)));
        assert_eq!(app.challenge.view().phase, Phase::Presenting);

        let index = correct_index(&app);
        let digit = char::from_digit(index as u32 + 1, 10).unwrap();
        app.on_key(key(KeyCode::Char(digit)));

        let view = app.challenge.view();
        assert_eq!(view.phase, Phase::Evaluated);
        assert_eq!(view.score, 1);
        assert_eq!(view.attempts, 1);

        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.challenge.view().phase, Phase::Presenting);
    }

    #[test]
    fn test_type_flow_collects_input() {
        let mut app = kana_app(Mode::Type, None, None);
        app.on_key(key(KeyCode::Enter));

        app.on_key(key(KeyCode::Char('x')));
        app.on_key(key(KeyCode::Backspace));
        assert!(app.input.is_empty());

        // blank answers are not submitted
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.challenge.view().attempts, 0);

        app.on_key(key(KeyCode::Char('z')));
        app.on_key(key(KeyCode::Enter));
        let view = app.challenge.view();
        assert_eq!(view.attempts, 1);
        assert_eq!(view.score, 0);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_toggles_only_between_questions() {
        let mut app = kana_app(Mode::Pick, None, None);

        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.challenge.view().mode, Mode::Type);
        app.on_key(ctrl('r'));
        assert_eq!(app.challenge.view().direction, Direction::Reverse);

        app.on_key(key(KeyCode::Enter));
        app.on_key(ctrl('r'));
        assert_eq!(app.challenge.view().direction, Direction::Reverse);
    }

    #[test]
    fn test_escape_cancels_then_quits() {
        let mut app = kana_app(Mode::Pick, None, None);
        app.on_key(key(KeyCode::Enter));

        assert!(app.on_key(key(KeyCode::Esc)));
        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.challenge.status(), Status::Finished);

        assert!(!app.on_key(key(KeyCode::Esc)));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = kana_app(Mode::Pick, None, None);
        assert!(!app.on_key(ctrl('c')));
    }

    #[test]
    fn test_blitz_expiry_records_history() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::with_path(dir.path().join("history.csv"));
        let mut app = kana_app(Mode::Pick, Some(Duration::from_secs(5)), Some(log.clone()));
        app.on_key(key(KeyCode::Enter));

        let index = correct_index(&app);
        app.challenge.submit_option(index);
        app.on_tick(Duration::from_secs(5));

        assert_eq!(app.state, AppState::Results);
        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 1);

        // a second sync does not record twice
        app.on_tick(Duration::from_secs(1));
        assert_eq!(log.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_cancelled_session_not_recorded() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::with_path(dir.path().join("history.csv"));
        let mut app = kana_app(Mode::Pick, None, Some(log.clone()));
        app.on_key(key(KeyCode::Enter));
        let index = correct_index(&app);
        app.challenge.submit_option(index);

        app.on_key(key(KeyCode::Esc));

        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_restart_from_results() {
        let mut app = kana_app(Mode::Pick, None, None);
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Results);

        app.on_key(key(KeyCode::Char('r')));
        assert_eq!(app.state, AppState::Quiz);
        let view = app.challenge.view();
        assert_eq!(view.phase, Phase::Presenting);
        assert_eq!(view.attempts, 0);
    }

    #[test]
    fn test_history_screen_navigation() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::with_path(dir.path().join("history.csv"));
        let mut app = kana_app(Mode::Pick, Some(Duration::from_secs(1)), Some(log));
        app.on_key(key(KeyCode::Enter));
        let index = correct_index(&app);
        app.challenge.submit_option(index);
        app.on_tick(Duration::from_secs(1));

        app.on_key(key(KeyCode::Char('h')));
        assert_eq!(app.state, AppState::History);
        assert_eq!(app.history_rows.len(), 1);

        app.on_key(key(KeyCode::Down));
        assert_eq!(app.history_scroll, 0);

        app.on_key(key(KeyCode::Char('b')));
        assert_eq!(app.state, AppState::Results);
    }

    #[test]
    fn test_ui_idle_screen() {
        let mut app = kana_app(Mode::Pick, None, None);
        let content = render(&mut app);
        assert!(content.contains("Kana"));
        assert!(content.contains("enter"));
    }

    #[test]
    fn test_ui_question_screen_lists_options() {
        let mut app = kana_app(Mode::Pick, Some(Duration::from_secs(30)), None);
        app.on_key(key(KeyCode::Enter));
        let content = render(&mut app);

        let view = app.challenge.view();
        assert!(content.contains(view.prompt.as_deref().unwrap()));
        assert!(content.contains(&format!("1. {}", view.options[0])));
        assert!(content.contains("30.0"));
    }

    #[test]
    fn test_ui_feedback_screen() {
        let mut app = kana_app(Mode::Type, None, None);
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Char('z')));
        app.on_key(key(KeyCode::Enter));

        let content = render(&mut app);
        assert!(content.contains("Incorrect"));
    }

    #[test]
    fn test_ui_results_screen() {
        let mut app = kana_app(Mode::Pick, None, None);
        app.on_key(key(KeyCode::Enter));
        let index = correct_index(&app);
        app.challenge.submit_option(index);
        app.on_key(key(KeyCode::Char('q')));
        assert_eq!(app.state, AppState::Results);

        let content = render(&mut app);
        assert!(content.contains("1 / 1"));
        assert!(content.contains("100%"));
    }

    #[test]
    fn test_ui_history_screen_empty() {
        let mut app = kana_app(Mode::Pick, None, None);
        app.open_history();
        let content = render(&mut app);
        assert!(content.contains("No sessions"));
    }

    #[test]
    fn test_start_tui_quits_on_ctrl_c() {
        let (tx, rx) = mpsc::channel();
        tx.send(GauntletEvent::Key(key(KeyCode::Enter))).unwrap();
        tx.send(GauntletEvent::Resize).unwrap();
        tx.send(GauntletEvent::Key(ctrl('c'))).unwrap();
        let runner = Runner::new(
            gauntlet::runtime::TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
        );

        let mut app = kana_app(Mode::Pick, None, None);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        start_tui(&mut terminal, &mut app, runner).unwrap();

        assert_eq!(app.challenge.view().phase, Phase::Presenting);
    }
}
