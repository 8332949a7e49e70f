use std::borrow::Cow;

use owo_colors::OwoColorize;

const KEYWORDS: [&str; 4] = ["let", "true", "false", "null"];

const BUILTINS: [&str; 4] = ["deferred", "when", "log", "print"];

/// Colors keywords, builtins, strings and numbers word by word.
pub fn highlight_line(line: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if ch == '"' || ch == '\'' {
            let mut end = line.len();
            let mut escaped = false;
            for (idx, c) in chars.by_ref() {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == ch {
                    end = idx + c.len_utf8();
                    break;
                }
            }
            out.push_str(&(&line[start..end]).green().to_string());
        } else if is_ident_char(ch) && !ch.is_ascii_digit() {
            let mut end = start + ch.len_utf8();
            while let Some((idx, c)) = chars.next_if(|(_, c)| is_ident_char(*c)) {
                end = idx + c.len_utf8();
            }
            let word = &line[start..end];
            if KEYWORDS.contains(&word) {
                out.push_str(&word.blue().bold().to_string());
            } else if BUILTINS.contains(&word) {
                out.push_str(&word.cyan().to_string());
            } else {
                out.push_str(word);
            }
        } else if ch.is_ascii_digit() {
            let mut end = start + 1;
            while let Some((idx, c)) = chars.next_if(|(_, c)| c.is_ascii_digit() || *c == '.') {
                end = idx + c.len_utf8();
            }
            out.push_str(&(&line[start..end]).yellow().to_string());
        } else {
            out.push(ch);
        }
    }

    Cow::Owned(out)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

pub fn highlight_prompt(prompt: &str) -> Cow<'_, str> {
    if prompt == "> " {
        return Cow::Owned(format!("{} ", ">".bright_green().bold()));
    }
    if prompt == "... " {
        return Cow::Owned(format!("{} ", "...".yellow().bold()));
    }
    Cow::Borrowed(prompt)
}

pub fn highlight_hint(hint: &str) -> Cow<'_, str> {
    Cow::Owned(hint.bright_black().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_containing_keywords_are_left_alone() {
        let out = highlight_line("letter.done(nullable);");
        assert_eq!(out, "letter.done(nullable);");
    }

    #[test]
    fn keywords_are_colored() {
        let out = highlight_line("let a = null;");
        assert!(out.contains(&"let".blue().bold().to_string()));
        assert!(out.contains(&"null".blue().bold().to_string()));
    }

    #[test]
    fn strings_are_colored_whole() {
        let out = highlight_line(r#"log("let x")"#);
        assert!(out.contains(&r#""let x""#.green().to_string()));
    }
}
