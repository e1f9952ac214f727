/*
    This module parses grammar files, one `LHS → RHS...` rule per line
*/

mod lexer;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;

#[derive(Debug)]
pub enum GrammarErrorType {
    // A rule line has no arrow (blank lines included)
    MissingArrow,
    // A rule line has more than one arrow
    UnexpectedArrow,
    // Nothing before the arrow
    MissingLeftSide,
    // More than one symbol before the arrow
    MultipleLeftSymbols,
    // Nothing after the arrow
    EmptyRightSide,
    // There are no rules, so there is no start symbol
    EmptyGrammar,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for GrammarErrorType {}

impl PartialEq for GrammarErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let GrammarErrorType::FileError(a) = self {
            if let GrammarErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::MissingArrow => write!(f, "Expected `{}` between the left and right side of the rule", ARROW),
            GrammarErrorType::UnexpectedArrow => write!(f, "Unexpected second `{}`", ARROW),
            GrammarErrorType::MissingLeftSide => write!(f, "Rule has no symbol before `{}`", ARROW),
            GrammarErrorType::MultipleLeftSymbols => write!(f, "Rule has more than one symbol before `{}`", ARROW),
            GrammarErrorType::EmptyRightSide => write!(f, "Rule has no symbols after `{}`", ARROW),
            GrammarErrorType::EmptyGrammar => write!(f, "Grammar has no rules"),
            GrammarErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type GrammarError = Error<GrammarErrorType>;
pub type GrammarErrors = Errors<GrammarErrorType>;

fn io_error(error: std::io::Error, file: PathBuf) -> GrammarError {
    GrammarError {
        location: Location::file(file),
        error: GrammarErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, GrammarErrorType>;
pub type LineResult<T> = std::result::Result<T, GrammarError>;
pub type FileResult<T> = std::result::Result<T, GrammarErrors>;

fn parse_symbols(tokens: &[Token]) -> Result<Vec<Symbol>> {
    tokens.iter().map(|t| match t {
        Token::Arrow => Err(GrammarErrorType::UnexpectedArrow),
        Token::Symbol(s) => Ok(s.clone())
    }).collect()
}

fn parse_line(tokens: &[Token]) -> Result<Rule> {
    let arrow = tokens.iter()
        .position(|t| *t == Token::Arrow)
        .ok_or(GrammarErrorType::MissingArrow)?;

    let left = match parse_symbols(&tokens[..arrow])?.as_slice() {
        [] => Err(GrammarErrorType::MissingLeftSide),
        [symbol] => Ok(symbol.clone()),
        _ => Err(GrammarErrorType::MultipleLeftSymbols)
    }?;

    let right = parse_symbols(&tokens[arrow + 1..])?;
    if right.is_empty() {
        return Err(GrammarErrorType::EmptyRightSide);
    }

    return Ok(Rule { left, right });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lexer::lex_line(line))
        .map_err(|error| GrammarError { location, error })
}

// Returns an iterator over the lines of a file, with the io errors wrapped
// in GrammarError and enumerated
fn file_line_nums<'a>(file: File, path: &'a PathBuf) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.clone())))
        .enumerate()
        .map(|(num, line)| (num + 1, line))
}

/// Builds a grammar out of numbered lines. Every malformed line is reported,
/// not just the first.
pub fn grammar_from_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &PathBuf) -> FileResult<Grammar> {
    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_lex_line(&line, Location {
            file: path.clone(),
            line: num
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    // A repeated rule keeps the position of its first occurrence
    let rules = rules.into_iter().unique().collect_vec();

    let start_symbol = match rules.first() {
        Some(rule) => rule.left.clone(),
        None => return Err(vec![GrammarError {
            location: Location::file(path.clone()),
            error: GrammarErrorType::EmptyGrammar
        }])
    };

    return Ok(Grammar {
        start_symbol,
        rules
    });
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;

    grammar_from_lines(file_line_nums(file, path), path)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn parse_normal_symbols() {
        let tokens = vec![
            Token::Symbol("(".to_string()),
            Token::Symbol("E".to_string()),
            Token::Symbol(")".to_string())
        ];

        assert_eq!(parse_symbols(&tokens).unwrap(), vec!["(", "E", ")"]);
        assert_eq!(parse_symbols(&[]).unwrap(), Vec::<Symbol>::new());
        assert_eq!(parse_symbols(&[Token::Arrow]), Err(GrammarErrorType::UnexpectedArrow));
    }

    #[test]
    fn parse_normal_line() {
        let lines = vec![
            "S → a S b",
            "F → id",
            "E→E + T"
        ];
        let answers = vec![
            Rule::new("S", &["a", "S", "b"]),
            Rule::new("F", &["id"]),
            Rule::new("E", &["E", "+", "T"])
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_line(&lexer::lex_line(line)), Ok(answer));
        }
    }

    #[test]
    fn parse_malformed_line() {
        let lines = vec![
            "",
            "S a b",
            "S -> a b",
            "S → a → b",
            "→ a b",
            "S T → a b",
            "S →",
            "S →   "
        ];
        let answers = vec![
            GrammarErrorType::MissingArrow,
            GrammarErrorType::MissingArrow,
            GrammarErrorType::MissingArrow,
            GrammarErrorType::UnexpectedArrow,
            GrammarErrorType::MissingLeftSide,
            GrammarErrorType::MultipleLeftSymbols,
            GrammarErrorType::EmptyRightSide,
            GrammarErrorType::EmptyRightSide
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_line(&lexer::lex_line(line)), Err(answer), "line {:?}", line);
        }
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/balanced.txt");
        let example_parsed = parse_file(&example_path).unwrap();

        assert_eq!(example_parsed, Grammar {
            start_symbol: "S".to_string(),
            rules: vec![
                Rule::new("S", &["a", "S", "b"]),
                Rule::new("S", &["a", "b"])
            ]
        });
    }

    #[test]
    fn parse_expression_file() {
        let example_path = PathBuf::from("example_data/expressions.txt");
        let example_parsed = parse_file(&example_path).unwrap();

        assert_eq!(example_parsed.start_symbol, "E");
        assert_eq!(example_parsed.rule_texts(), vec![
            "E → E + T",
            "E → T",
            "T → T * F",
            "T → F",
            "F → ( E )",
            "F → id"
        ]);
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.txt");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![
            GrammarError {
                location: Location {
                    file: example_path.clone(),
                    line: 2
                },
                error: GrammarErrorType::MissingArrow
            },
            GrammarError {
                location: Location {
                    file: example_path.clone(),
                    line: 4
                },
                error: GrammarErrorType::EmptyRightSide
            },
            GrammarError {
                location: Location {
                    file: example_path,
                    line: 5
                },
                error: GrammarErrorType::MissingLeftSide
            }
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let example_path = PathBuf::from("example_data/does_not_exist.txt");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![GrammarError {
            location: Location::file(example_path),
            error: GrammarErrorType::FileError(std::io::ErrorKind::NotFound.into())
        }]);
    }
}
