use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar, one `LHS → RHS...` rule per line
    /// (asked for if neither this nor --rule is given)
    pub file: Option<PathBuf>,

    /// Grammar rule given directly, e.g. "S → a S b" (repeatable)
    #[arg(short, long = "rule", value_name = "RULE", conflicts_with = "file")]
    pub rules: Vec<String>,

    /// String to parse (repeatable, default: read strings interactively)
    #[arg(short, long = "input", value_name = "STRING")]
    pub inputs: Vec<String>,

    /// Only print whether each string was accepted
    #[arg(short, long)]
    pub quiet: bool,

    /// Don't print the loaded grammar
    #[arg(long)]
    pub no_grammar: bool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from(["shiftreduce", "grammar.txt", "-i", "a b", "--input", "a a b b", "-q"]).unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("grammar.txt")));
        assert!(cli.rules.is_empty());
        assert_eq!(cli.inputs, vec!["a b", "a a b b"]);
        assert!(cli.quiet);
        assert!(!cli.no_grammar);
    }

    #[test]
    fn parse_inline_rules() {
        let cli = Cli::try_parse_from(["shiftreduce", "-r", "S → a S b", "--rule", "S → a b", "--no-grammar"]).unwrap();

        assert_eq!(cli.file, None);
        assert_eq!(cli.rules, vec!["S → a S b", "S → a b"]);
        assert!(cli.no_grammar);
    }

    #[test]
    fn file_conflicts_with_rules() {
        assert!(Cli::try_parse_from(["shiftreduce", "grammar.txt", "-r", "S → a"]).is_err());
    }
}
