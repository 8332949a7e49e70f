use rustyline::completion::Pair;

const KEYWORDS: [&str; 4] = ["let", "true", "false", "null"];

const BUILTINS: [&str; 4] = ["deferred", "when", "log", "print"];

const COMMANDS: [&str; 5] = [".help", ".clear", ".load", ".states", ".exit"];

/// Methods shared by deferreds and promises.
const SUBSCRIBERS: [&str; 7] = ["done", "fail", "progress", "always", "then", "pipe", "state"];

const MUTATORS: [&str; 4] = ["resolve", "reject", "notify", "promise"];

pub fn complete_line(line: &str, pos: usize) -> (usize, Vec<Pair>) {
    let safe_pos = pos.min(line.len());
    let prefix = &line[..safe_pos];

    if prefix.trim_start().starts_with('.') && !prefix.contains(' ') {
        let start = prefix.len() - prefix.trim_start().len();
        let needle = &prefix[start..];
        let commands = COMMANDS
            .iter()
            .copied()
            .filter(|cmd| cmd.starts_with(needle))
            .collect::<Vec<_>>();
        return (start, pairs(&commands));
    }

    if let Some((start, members)) = member_completion(prefix) {
        return (start, pairs(&members));
    }

    let start = word_start(prefix);
    let needle = &prefix[start..];
    if needle.is_empty() {
        return (start, Vec::new());
    }
    let words = KEYWORDS
        .iter()
        .chain(BUILTINS.iter())
        .copied()
        .filter(|word| word.starts_with(needle))
        .collect::<Vec<_>>();

    (start, pairs(&words))
}

/// Completes `name.` with every method; the REPL does not know whether
/// `name` is a deferred or a promise.
fn member_completion(prefix: &str) -> Option<(usize, Vec<&'static str>)> {
    let dot = prefix.rfind('.')?;
    let object_part = &prefix[..dot];
    let object_name = &object_part[word_start(object_part)..];
    let call_result = object_name.is_empty() && object_part.ends_with(')');
    if !call_result && !object_name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_' || c == '$') {
        return None;
    }
    let member_prefix = &prefix[dot + 1..];
    if !member_prefix.chars().all(is_ident_char) {
        return None;
    }

    let members = MUTATORS
        .iter()
        .chain(SUBSCRIBERS.iter())
        .copied()
        .filter(|name| name.starts_with(member_prefix))
        .collect::<Vec<_>>();

    Some((dot + 1, members))
}

fn pairs(values: &[&str]) -> Vec<Pair> {
    values
        .iter()
        .map(|v| Pair {
            display: (*v).to_string(),
            replacement: (*v).to_string(),
        })
        .collect()
}

fn word_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .find(|(_, ch)| !is_ident_char(*ch))
        .map_or(0, |(idx, ch)| idx + ch.len_utf8())
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}
