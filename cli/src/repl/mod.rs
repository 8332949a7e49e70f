mod completer;
mod helper;
mod highlighter;
mod hinter;

use owo_colors::OwoColorize;
use rustyline::error::ReadlineError;
use rustyline::{Config, EditMode, Editor};
use settle::errors::{RuntimeError, SettleError};
use settle::{Context, Engine};

use self::helper::ReplHelper;

pub fn run(engine: Engine) -> Result<(), SettleError> {
    let config = Config::builder()
        .history_ignore_dups(true)
        .map_err(to_runtime_error)?
        .completion_type(rustyline::CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut rl: Editor<ReplHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(config).map_err(to_runtime_error)?;
    rl.set_helper(Some(ReplHelper));

    let engine = engine.with_echo(true);
    let mut ctx = engine.new_context();

    println!(
        "{} {}",
        "settle".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "Type .help for REPL commands".bright_black());

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);
                match parse_command(trimmed) {
                    Some(Command::Exit) => break,
                    Some(command) => run_command(command, &engine, &mut ctx),
                    None => run_snippet(&mut ctx, trimmed),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "bye".bright_black());
                break;
            }
            Err(err) => {
                eprintln!("{} {err}", "repl error:".red().bold());
                break;
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Help,
    Clear,
    Load(&'a str),
    States,
    Exit,
    Unknown(&'a str),
}

fn parse_command(trimmed: &str) -> Option<Command<'_>> {
    if trimmed == "exit" {
        return Some(Command::Exit);
    }
    let rest = trimmed.strip_prefix('.')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    Some(match name {
        "help" => Command::Help,
        "clear" => Command::Clear,
        "load" => Command::Load(arg),
        "states" => Command::States,
        "exit" => Command::Exit,
        _ => Command::Unknown(trimmed),
    })
}

fn run_command(command: Command<'_>, engine: &Engine, ctx: &mut Context) {
    match command {
        Command::Help => {
            println!("{}", ".help                show commands".bright_blue());
            println!("{}", ".clear               drop all bindings".bright_blue());
            println!("{}", ".load <file>         load and run a script".bright_blue());
            println!("{}", ".states              list bindings and their states".bright_blue());
            println!("{}", ".exit                exit REPL".bright_blue());
        }
        Command::Clear => {
            *ctx = engine.new_context();
            println!("{}", "environment cleared".green());
        }
        Command::Load("") => eprintln!("{} .load needs a file path", "load error:".red().bold()),
        Command::Load(path) => {
            if let Err(err) = ctx.eval_file(path) {
                report_error(&err);
            }
        }
        Command::States => {
            for entry in ctx.snapshot() {
                let detail = match (entry.state, entry.value) {
                    (Some(state), _) => state.to_string(),
                    (None, Some(value)) => value.to_nested_string(),
                    (None, None) => String::new(),
                };
                println!(
                    "{} {} {}",
                    entry.name.cyan(),
                    entry.kind.bright_black(),
                    detail
                );
            }
        }
        Command::Unknown(text) => {
            eprintln!(
                "{} unknown command '{text}', try .help",
                "error:".red().bold()
            );
        }
        Command::Exit => {}
    }
}

fn run_snippet(ctx: &mut Context, source: &str) {
    if let Err(err) = ctx.eval(source) {
        report_error(&err);
    }
    // Already echoed.
    ctx.take_output();
}

fn report_error(err: &SettleError) {
    match err {
        SettleError::Syntax(syntax) => eprintln!("{} {}", "syntax error:".red().bold(), syntax.message),
        other => eprintln!("{} {other}", "error:".red().bold()),
    }
}

/// Whether the input is an unfinished statement: open brackets or quotes, an
/// unterminated block comment, or a trailing backslash.
pub fn needs_more_input(source: &str) -> bool {
    let mut parens = 0i32;
    let mut brackets = 0i32;
    let mut in_single = false;
    let mut in_double = false;
    let mut in_block_comment = false;
    let mut escaped = false;
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            }
            continue;
        }
        if escaped {
            escaped = false;
            continue;
        }
        if (in_single || in_double) && ch == '\\' {
            escaped = true;
            continue;
        }
        if !in_double && ch == '\'' {
            in_single = !in_single;
            continue;
        }
        if !in_single && ch == '"' {
            in_double = !in_double;
            continue;
        }
        if in_single || in_double {
            continue;
        }
        match ch {
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|c| *c != '\n').is_some() {}
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                in_block_comment = true;
            }
            '(' => parens += 1,
            ')' => parens -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            _ => {}
        }
    }

    in_single
        || in_double
        || in_block_comment
        || parens > 0
        || brackets > 0
        || source.trim_end().ends_with('\\')
}

fn to_runtime_error(err: ReadlineError) -> SettleError {
    SettleError::Runtime(RuntimeError::TypeError {
        message: format!("failed to initialize REPL: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_call_needs_more_input() {
        assert!(needs_more_input("a.then(log(\"ok\"),"));
        assert!(needs_more_input("a.resolve([1, 2"));
        assert!(!needs_more_input("a.resolve([1, 2]);"));
    }

    #[test]
    fn brackets_inside_strings_and_comments_are_ignored() {
        assert!(!needs_more_input("print(\"(\");"));
        assert!(!needs_more_input("print('[');  // )"));
        assert!(needs_more_input("print(1); /* still open"));
        assert!(!needs_more_input("print(1); /* ( */"));
    }

    #[test]
    fn unterminated_string_needs_more_input() {
        assert!(needs_more_input("print(\"abc"));
        assert!(!needs_more_input("print(\"a\\\"b\");"));
    }

    #[test]
    fn commands_are_parsed() {
        assert_eq!(parse_command(".help"), Some(Command::Help));
        assert_eq!(parse_command(".states"), Some(Command::States));
        assert_eq!(
            parse_command(".load  demo.settle "),
            Some(Command::Load("demo.settle"))
        );
        assert_eq!(parse_command(".load"), Some(Command::Load("")));
        assert_eq!(parse_command("exit"), Some(Command::Exit));
        assert_eq!(parse_command(".nope"), Some(Command::Unknown(".nope")));
        assert_eq!(parse_command("let a = deferred();"), None);
    }
}
