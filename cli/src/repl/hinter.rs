/// Inline hint shown after the cursor at the end of the line.
pub fn hint_for(line: &str, pos: usize) -> Option<String> {
    if pos < line.len() {
        return None;
    }

    let trimmed = line.trim_end();
    if trimmed.trim_start().is_empty() {
        return None;
    }

    if let Some(hint) = signature_hint(trimmed) {
        return Some(hint.to_string());
    }

    match trimmed.trim_start() {
        "let" => Some(" name = deferred();".to_string()),
        _ => None,
    }
}

/// Argument shape for a call whose parenthesis was just opened.
fn signature_hint(line: &str) -> Option<&'static str> {
    let call = line.strip_suffix('(')?;
    let name = call.rsplit(['.', ' ', '(', ',']).next()?;
    let hint = match name {
        "deferred" | "promise" | "state" => ");",
        "when" => "a, b, ...);",
        "log" => "\"label\")",
        "print" => "value, ...);",
        "resolve" | "reject" | "notify" => "args...);",
        "done" | "fail" | "progress" | "always" => "handler, ...);",
        "then" | "pipe" => "done, fail, progress);",
        _ => return None,
    };
    Some(hint)
}
