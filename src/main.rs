use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;

use flashcard_generator::logger;
use flashcard_generator::{
    build_request, draw, generate_with_config, handle_key, ingest, write_exports, AppConfig,
    AppState, Args, ExportFormat, FlashcardRequest, GeneratorSession, SessionAction,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = args
        .apply_to(AppConfig::from_env()?)
        .context("invalid configuration")?;

    // Logging is best effort.
    if let Err(e) = logger::init(&config.log_file, args.verbose) {
        eprintln!(
            "warning: could not start logging to {}: {}",
            config.log_file.display(),
            e
        );
    }
    tracing::info!(
        "Starting flashcard generator (model: {}, credential: {})",
        config.model,
        if config.has_credential() { "set" } else { "missing" }
    );

    if args.headless {
        return Ok(run_headless(&args, &config).await);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut session = GeneratorSession::new(
        args.prefill_form(),
        config.output_dir.clone(),
        config.model.clone(),
        config.has_credential(),
    );
    let result = run_app(&mut terminal, &mut session, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    tracing::info!("Exiting flashcard generator");
    Ok(ExitCode::SUCCESS)
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut GeneratorSession,
    config: &AppConfig,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| draw(f, session))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(session, key) {
            SessionAction::None => {}
            SessionAction::Quit => return Ok(()),
            SessionAction::Generate => match build_request(&session.form) {
                Ok(request) => {
                    session.state = AppState::Generating;
                    terminal.draw(|f| draw(f, session))?;
                    let result = generate_with_config(config, &request).await;
                    session.apply_generation(result);
                }
                Err(e) => {
                    tracing::warn!("Rejected generation request: {}", e);
                    session.apply_generation(Err(e));
                }
            },
        }
    }
}

/// One generation without the terminal UI. Cards go to stdout, every export
/// format is written to the output directory, and failures go to stderr.
async fn run_headless(args: &Args, config: &AppConfig) -> ExitCode {
    match headless_generate(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Headless run failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn headless_generate(args: &Args, config: &AppConfig) -> flashcard_generator::Result<()> {
    let form = args.prefill_form();
    let content = ingest(args.text.as_deref(), args.file.as_deref())?;
    let request = FlashcardRequest::new(
        &content,
        form.difficulty,
        args.count.unwrap_or(form.count),
        form.answer_length,
        args.subject.as_deref(),
    )?;

    let outcome = generate_with_config(config, &request).await?;
    for (i, card) in outcome.flashcards.iter().enumerate() {
        println!("Card {}", i + 1);
        println!("Q: {}", card.question);
        println!("A: {}", card.answer);
        println!();
    }
    if !outcome.count_matches() {
        println!(
            "Generated {} flashcards ({} requested)",
            outcome.flashcards.len(),
            outcome.requested
        );
    }

    let written = write_exports(&config.output_dir, &outcome.flashcards, &ExportFormat::ALL)?;
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
