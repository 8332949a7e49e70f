#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use settle::errors::{SettleError, SyntaxError};
use settle::{Context, Engine};
use tracing_subscriber::EnvFilter;

mod repl;

#[derive(Parser)]
#[command(name = "settle", about = "Run deferred/promise scenario scripts")]
struct Cli {
    /// Path to a scenario script to execute
    file: Option<PathBuf>,
    /// Evaluate inline script source
    #[arg(long)]
    eval: Option<String>,
    /// Print token stream
    #[arg(long)]
    tokens: bool,
    /// Print parsed AST
    #[arg(long)]
    ast: bool,
    /// Print the final bindings and their states as JSON
    #[arg(long)]
    json: bool,
    /// Maximum number of statements and handler runs a single evaluation may take
    #[arg(long)]
    max_steps: Option<usize>,
    /// Log filter used when RUST_LOG is not set (e.g. "debug", "settle=trace")
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Print version and exit
    #[arg(long)]
    version: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if cli.version {
        println!(
            "{} {}",
            "settle".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_black()
        );
        return;
    }

    let mut engine = Engine::new();
    if let Some(max) = cli.max_steps {
        engine = engine.with_max_steps(max);
    }

    if cli.file.is_none() && cli.eval.is_none() {
        if let Err(err) = repl::run(engine) {
            eprintln!("{} {err:?}", "error:".red().bold());
            process::exit(1);
        }
        return;
    }

    let (source, source_path) = if let Some(code) = cli.eval {
        (code, PathBuf::from("<eval>"))
    } else if let Some(file) = cli.file {
        match std::fs::read_to_string(&file) {
            Ok(source) => (source, file),
            Err(err) => {
                eprintln!(
                    "{} could not read '{}': {err}",
                    "error:".red().bold(),
                    file.display().yellow()
                );
                process::exit(1);
            }
        }
    } else {
        return;
    };

    let tokens = match settle::lexer::lex(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("{}", format_syntax_error(&source, &source_path, "lex", &err));
            process::exit(1);
        }
    };

    if cli.tokens {
        for token in &tokens {
            println!("{} {:?}", "token".bright_black(), token);
        }
    }

    let program = match settle::parser::parse(tokens) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", format_syntax_error(&source, &source_path, "parse", &err));
            process::exit(1);
        }
    };

    if cli.ast {
        println!("{}", "AST".bright_blue().bold());
        println!("{program:#?}");
    }

    // With --json the output lines are kept for the report instead of echoed.
    let mut ctx = engine.with_echo(!cli.json).new_context();
    let result = ctx.eval(&source);

    if cli.json {
        print_report(&ctx);
    }

    match result {
        Ok(()) => {}
        Err(SettleError::Syntax(err)) => {
            eprintln!("{}", format_syntax_error(&source, &source_path, "parse", &err));
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{} {err}", "runtime error:".red().bold());
            process::exit(1);
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn print_report(ctx: &Context) {
    let report = serde_json::json!({
        "output": ctx.output(),
        "bindings": ctx.snapshot(),
    });
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(err) => eprintln!("{} {err}", "error:".red().bold()),
    }
}

fn format_syntax_error(source: &str, source_path: &Path, phase: &str, err: &SyntaxError) -> String {
    let map = settle::diagnostics::source_map::SourceMap::from_source(source);
    let pos = map.byte_to_pos(err.offset());
    let line = map.line_text(source, pos.line);
    let byte_col = pos.col - 1;
    let col = line.map_or(byte_col, |line| char_count(line, 0, byte_col)) + 1;
    let mut out = format!(
        "{} {} at {}:{}:{}: {}",
        "syntax".red().bold(),
        phase.yellow(),
        source_path.display().to_string().cyan(),
        pos.line,
        col,
        err.message.bright_white()
    );
    if let Some(line) = line {
        let caret = caret_under(line, byte_col, err.width());
        out.push_str(&format!("\n  {line}\n  {}", caret.red()));
    }
    out
}

/// A line of spaces and `^` marking `width` bytes starting at `byte_col`,
/// measured in characters so it lines up under multi-byte text.
fn caret_under(line: &str, byte_col: usize, width: usize) -> String {
    let lead = char_count(line, 0, byte_col);
    let marked = char_count(line, byte_col, byte_col + width).max(1);
    " ".repeat(lead) + &"^".repeat(marked)
}

/// Characters in `line[start..end]`, with both ends clamped to the line and
/// snapped back to a character boundary.
fn char_count(line: &str, start: usize, end: usize) -> usize {
    let boundary = |mut idx: usize| {
        idx = idx.min(line.len());
        while !line.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    };
    let (start, end) = (boundary(start), boundary(end));
    line.get(start..end.max(start)).map_or(0, |text| text.chars().count())
}
