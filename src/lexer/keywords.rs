//! The keyword lookup table.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::token::TokenKind;

pub static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("true", TokenKind::True);
    m.insert("false", TokenKind::False);
    m.insert("null", TokenKind::Null);
    m.insert("and", TokenKind::And);
    m.insert("or", TokenKind::Or);
    m.insert("not", TokenKind::Not);
    m.insert("import", TokenKind::Import);
    m.insert("if", TokenKind::If);
    m.insert("else", TokenKind::Else);
    m.insert("while", TokenKind::While);
    m.insert("for", TokenKind::For);
    m.insert("func", TokenKind::Func);
    m.insert("return", TokenKind::Return);
    m.insert("end", TokenKind::End);
    m.insert("echo", TokenKind::Echo);
    m.insert("do", TokenKind::Do);
    m
});
