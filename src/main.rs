mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, DimensionsArgs, OrderArgs, QuestionsArgs, ScoreArgs, SourceArgs, TemplateArgs};
use jagged_profile::config::{self, LoadedConfig};
use jagged_profile::core::report::{self, FinalReport, JsonReport, JsonScoringError, QuestionLine};
use jagged_profile::{QuestionBank, QuizSession, ScoringEngine, responses, telemetry};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::borrow::Cow;
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreMode {
    Strict,
    Preview,
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_scoring(args, ScoreMode::Strict, cli.verbose),
        Commands::Preview(args) => run_scoring(args, ScoreMode::Preview, cli.verbose),
        Commands::Questions(args) => run_questions(args, cli.verbose),
        Commands::Dimensions(args) => run_dimensions(args, cli.verbose),
        Commands::Template(args) => run_template(args, cli.verbose),
        Commands::Init(args) => {
            if args.config.is_some() {
                eprintln!("warning: --config is ignored by `jagged init`; writing ./jagged.toml");
            }

            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
    }
}

/// Loads config, starts logging and resolves the question bank.
fn prepare(source: &SourceArgs, verbose: bool) -> Result<(LoadedConfig, Cow<'static, QuestionBank>)> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(source.config.as_deref(), &cwd)?;

    let level = if verbose {
        "debug"
    } else {
        loaded.config.general.log_level.as_str()
    };
    telemetry::init(level)?;

    let bank = config::resolve_bank(&loaded, source.bank.as_deref())?;
    tracing::debug!(
        statements = bank.len(),
        dimensions = bank.dimensions().len(),
        "question bank ready"
    );
    Ok((loaded, bank))
}

fn run_scoring(args: ScoreArgs, mode: ScoreMode, verbose: bool) -> Result<i32> {
    let (loaded, bank) = prepare(&args.source, verbose)?;
    let responses = responses::load_responses(&args.responses)?;
    let engine = ScoringEngine::new(&bank);

    let outcome = match mode {
        ScoreMode::Strict => engine.score(&responses),
        ScoreMode::Preview => engine.preview(&responses),
    };
    let output_json = args.json || loaded.config.general.json;

    let table = match outcome {
        Ok(table) => table,
        Err(err) => {
            tracing::info!(kind = err.kind(), "response set rejected");
            if output_json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonScoringError::from(&err))?
                );
            } else {
                eprint!("{}", report::render_scoring_error(&bank, &err));
            }
            return Ok(1);
        }
    };

    let top_n = args.top.unwrap_or(loaded.config.general.top_n);
    let final_report = FinalReport::build(table, top_n, &loaded.config.content, args.diagnostics);
    if output_json {
        let json_report = JsonReport::from(&final_report);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        report::print_human(&final_report);
    }

    Ok(0)
}

fn run_questions(args: QuestionsArgs, verbose: bool) -> Result<i32> {
    let (loaded, bank) = prepare(&args.source, verbose)?;
    let session = new_session(&bank, &args.order);

    let lines: Vec<QuestionLine<'_>> = session
        .order()
        .iter()
        .enumerate()
        .map(|(idx, statement)| QuestionLine::new(idx + 1, statement))
        .collect();

    if args.json || loaded.config.general.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        print!("{}", report::render_questions(&lines));
    }
    Ok(0)
}

fn run_dimensions(args: DimensionsArgs, verbose: bool) -> Result<i32> {
    let (loaded, bank) = prepare(&args.source, verbose)?;
    let lines = report::dimension_lines(&bank);

    if args.json || loaded.config.general.json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        print!("{}", report::render_dimensions(&lines));
    }
    Ok(0)
}

fn run_template(args: TemplateArgs, verbose: bool) -> Result<i32> {
    let (_, bank) = prepare(&args.source, verbose)?;
    let session = new_session(&bank, &args.order);
    let content = responses::render_template(session.order().iter().copied());

    match &args.out {
        Some(path) => {
            if path.exists() {
                bail!("refusing to overwrite existing file: {}", path.display());
            }
            fs::write(path, content)
                .with_context(|| format!("failed writing {}", path.display()))?;
            println!("created {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(0)
}

fn new_session<'bank>(bank: &'bank QuestionBank, order: &OrderArgs) -> QuizSession<'bank> {
    if !order.shuffle {
        return QuizSession::in_authored_order(bank);
    }

    let mut rng = match order.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    QuizSession::new(bank, &mut rng)
}
