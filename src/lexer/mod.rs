//! The Coffee Bean lexer: `tokenize(source) -> Vec<Token>`.
//!
//! Scans left to right over the source text with a single character of
//! lookahead, via a `Peekable<Chars>` plus a running line counter.

mod keywords;
mod token;

pub use keywords::KEYWORDS;
pub use token::{Token, TokenKind};

use std::iter::Peekable;
use std::str::Chars;

use crate::error::LexerError;

/// Two-character operator forms, tried greedily before the one-character
/// fallback.
const TWO_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::BangEq),
    ("<=", TokenKind::LtEq),
    (">=", TokenKind::GtEq),
];

fn one_char_operator(c: char) -> Option<TokenKind> {
    Some(match c {
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '=' => TokenKind::Eq,
        '!' => TokenKind::Bang,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        _ => return None,
    })
}

fn one_char_structural(c: char) -> Option<TokenKind> {
    Some(match c {
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '.' => TokenKind::Dot,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        _ => return None,
    })
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Scans the whole source and returns its tokens, the last of which is
    /// always `Eof`.
    pub fn lex(mut self) -> Result<Vec<Token>, LexerError> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.tokens.push(Token::structural(TokenKind::Newline, self.line));
                    self.advance();
                    self.line += 1;
                }
                '#' => self.eat_comment(),
                '"' => self.lex_quoted(TokenKind::String, '"', "Unterminated string")?,
                '\'' => self.lex_quoted(TokenKind::Character, '\'', "Unterminated character")?,
                c if c.is_ascii_digit() => self.lex_number(),
                c if c.is_alphabetic() || c == '_' => self.lex_identifier(),
                _ => {
                    if one_char_structural(c).is_some() || one_char_operator(c).is_some() {
                        self.lex_operator_or_structural(c);
                    } else {
                        return Err(LexerError::new(
                            self.line,
                            format!("Unexpected character '{c}'"),
                        ));
                    }
                }
            }
        }

        self.tokens.push(Token::structural(TokenKind::Eof, self.line));
        Ok(self.tokens)
    }

    fn eat_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn lex_operator_or_structural(&mut self, first: char) {
        let line = self.line;

        if let Some(kind) = one_char_structural(first) {
            self.advance();
            self.tokens.push(Token::structural(kind, line));
            return;
        }

        self.advance();
        let mut lookahead = String::new();
        lookahead.push(first);
        if let Some(next) = self.peek() {
            lookahead.push(next);
            if let Some((_, kind)) = TWO_CHAR_OPERATORS.iter().find(|(op, _)| *op == lookahead) {
                self.advance();
                self.tokens.push(Token::structural(*kind, line));
                return;
            }
        }

        let kind = one_char_operator(first).expect("caller only reaches this for operators");
        self.tokens.push(Token::structural(kind, line));
    }

    fn lex_number(&mut self) {
        let line = self.line;
        let mut lexeme = String::new();
        let mut is_float = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.advance();
            } else if c == '.' && !is_float {
                is_float = true;
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if is_float { TokenKind::Float } else { TokenKind::Integer };
        self.tokens.push(Token::new(kind, line, lexeme));
    }

    fn lex_identifier(&mut self) {
        let line = self.line;
        let mut lexeme = String::new();

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if let Some(kind) = KEYWORDS.get(lexeme.as_str()) {
            self.tokens.push(Token::structural(*kind, line));
        } else {
            self.tokens.push(Token::new(TokenKind::Identifier, line, lexeme));
        }
    }

    /// Consumes a `"..."`/`'...'` literal, lexeme included, quotes and all.
    fn lex_quoted(
        &mut self,
        kind: TokenKind,
        quote: char,
        unterminated_message: &str,
    ) -> Result<(), LexerError> {
        let line = self.line;
        let mut lexeme = String::new();
        lexeme.push(self.advance().expect("caller only reaches this on the quote char"));

        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexerError::new(line, unterminated_message));
                }
                Some(c) if c == quote => {
                    lexeme.push(c);
                    self.advance();
                    break;
                }
                Some(c) => {
                    lexeme.push(c);
                    self.advance();
                }
            }
        }

        self.tokens.push(Token::new(kind, line, lexeme));
        Ok(())
    }
}

/// Pure entry point: source text in, ordered token stream (or a `LexerError`) out.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
    Lexer::new(source).lex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_arithmetic() {
        let tokens = tokenize("1 + 2 * 3").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Integer,
                TokenKind::Plus,
                TokenKind::Integer,
                TokenKind::Star,
                TokenKind::Integer,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn ends_with_single_eof() {
        let tokens = tokenize("echo 1\necho 2").unwrap();
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn recognizes_echo_and_do_keywords() {
        let tokens = tokenize("echo 1\ndo\nend").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Echo,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Do,
                TokenKind::Newline,
                TokenKind::End,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn greedily_lexes_two_character_operators() {
        let tokens = tokenize("a += 1 != 2").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::PlusEq,
                TokenKind::Integer,
                TokenKind::BangEq,
                TokenKind::Integer,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn float_has_at_most_one_dot() {
        let tokens = tokenize("1.5").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Float);
        assert_eq!(tokens[0].lexeme, "1.5");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("\"abc").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("Unterminated string"));
    }

    #[test]
    fn unexpected_character_is_an_error() {
        let err = tokenize("@").unwrap_err();
        assert!(err.message.contains('@'));
    }

    #[test]
    fn line_comment_is_skipped() {
        let tokens = tokenize("echo 1 # trailing comment\necho 2").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Echo,
                TokenKind::Integer,
                TokenKind::Newline,
                TokenKind::Echo,
                TokenKind::Integer,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn import_is_reserved_but_not_parsed() {
        let tokens = tokenize("import").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Import);
    }
}
