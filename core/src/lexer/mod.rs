pub mod cursor;
pub mod scanner;
pub mod token;

use crate::errors::SyntaxError;
use token::Token;

/// Tokenize script source into a list of tokens.
pub fn lex(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut scanner = scanner::Scanner::new(source);
    scanner.scan_tokens()
}
