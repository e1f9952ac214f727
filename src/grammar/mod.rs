/*
    This module is for storing grammars
*/

use std::fmt::Display;
use std::path::PathBuf;

use itertools::Itertools;

use crate::parser::{self, FileResult};

/// Separates the left side of a rule from its right side
pub const ARROW: char = '→';

// The base unit in a rule, either a terminal or a nonterminal name
pub type Symbol = String;

/// A single production, `left → right[0] right[1] ...`
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Rule {
    pub left: Symbol,
    pub right: Vec<Symbol>,
}

impl Rule {
    /// Whether the right side is exactly the top of `stack`
    pub fn matches(&self, stack: &[Symbol]) -> bool {
        stack.ends_with(&self.right)
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, ARROW, self.right.iter().join(" "))
    }
}

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: Symbol,
    // Kept in load order, which is also the order reductions are tried in
    pub rules: Vec<Rule>,
}

impl Grammar {
    /// Builds a grammar from rule lines. The left side of the first rule is
    /// the start symbol.
    pub fn load<I, S>(lines: I) -> FileResult<Grammar>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let numbered = lines.into_iter()
            .enumerate()
            .map(|(num, line)| (num + 1, Ok(line.as_ref().to_string())));

        parser::grammar_from_lines(numbered, &PathBuf::new())
    }

    pub fn rule_texts(&self) -> Vec<String> {
        self.rules.iter().map(Rule::to_string).collect()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for text in self.rule_texts() {
            writeln!(f, "{}", text)?;
        }
        Ok(())
    }
}
