use itertools::{Itertools, PeekingNext};

use crate::grammar::ARROW;

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Symbol(String)
}

pub fn lex_symbol(line: &mut impl PeekingNext<Item = char>) -> Token {
    // The arrow ends a symbol even without whitespace in between
    Token::Symbol(line.peeking_take_while(|&c| !c.is_whitespace() && c != ARROW).collect())
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == ARROW {
            line_chars.next();
            tokens.push(Token::Arrow);
        } else if !c.is_whitespace() {
            tokens.push(lex_symbol(&mut line_chars));
        } else {
            line_chars.next();
        }
    }

    tokens
}
