mod app;
mod config;
mod event;
mod quiz;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use quiz::words::WordStore;
use ui::components::hud::Hud;
use ui::components::intro::Intro;
use ui::components::question_card::QuestionCard;
use ui::components::summary::Summary;
use ui::layout::{RoundLayout, centered_rect};

#[derive(Parser)]
#[command(name = "hanvoca", version, about = "Terminal Chinese-Korean vocabulary blitz")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(
        short,
        long,
        help = "Custom word file (JSON array of {hanzi, pinyin, korean})"
    )]
    words: Option<PathBuf>,

    #[arg(long, help = "Round length in seconds")]
    time: Option<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(secs) = cli.time {
        config.initial_secs = secs;
    }
    if let Some(ref name) = cli.theme {
        config.theme = name.clone();
    }
    config.validate();

    // Load and validate the word list before touching terminal modes so a
    // bad file prints a normal error and the game never starts.
    let words = match cli.words {
        Some(ref path) => WordStore::load_file(path)
            .with_context(|| format!("loading word file {}", path.display()))?,
        None => WordStore::load_bundled(&config.word_pack).with_context(|| {
            format!(
                "loading bundled word pack '{}' (available: {})",
                config.word_pack,
                WordStore::available_packs().join(", ")
            )
        })?,
    };

    if ui::theme::Theme::load(&config.theme).is_none() {
        eprintln!(
            "Unknown theme '{}', using the default (available: {})",
            config.theme,
            ui::theme::Theme::available_themes().join(", ")
        );
    }

    let mut app = App::new(config, words);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(50));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Mute toggles during play are worth keeping.
    let _ = app.config.save();

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Intro => handle_intro_key(app, key),
        AppScreen::Round => handle_round_key(app, key),
        AppScreen::GameOver => handle_game_over_key(app, key),
    }
}

fn handle_intro_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => app.start_round(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('m') => app.toggle_mute(),
        _ => {}
    }
}

fn handle_round_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(ch @ '1'..='4') => {
            let idx = ch as usize - '1' as usize;
            app.submit_choice(idx);
        }
        KeyCode::Char('m') => app.toggle_mute(),
        KeyCode::Esc => app.end_round_early(),
        _ => {}
    }
}

fn handle_game_over_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => app.start_round(),
        KeyCode::Esc => app.screen = AppScreen::Intro,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Intro => {
            let centered = centered_rect(60, 70, area);
            let intro = Intro::new(app.words.len(), app.config.initial_secs, app.theme);
            frame.render_widget(intro, centered);
        }
        AppScreen::Round => render_round(frame, app),
        AppScreen::GameOver => {
            if let Some(ref round) = app.round {
                let centered = centered_rect(60, 80, area);
                frame.render_widget(Summary::new(round, app.theme), centered);
            }
        }
    }
}

fn render_round(frame: &mut ratatui::Frame, app: &App) {
    let Some(ref round) = app.round else {
        return;
    };
    let colors = &app.theme.colors;
    let layout = RoundLayout::new(frame.area());

    frame.render_widget(Hud::new(round, app.muted, app.theme), layout.hud);

    let card_area = centered_rect(70, 100, layout.card);
    frame.render_widget(
        QuestionCard::new(round, app.last_outcome.as_ref(), app.theme),
        card_area,
    );

    let footer = Paragraph::new(Line::from(Span::styled(
        " [1-4] Answer  [m] Mute  [Esc] End round ",
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, layout.footer);
}
