/*
    This module recognizes strings with a greedy shift-reduce loop
*/

use std::collections::{HashSet, VecDeque};
use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::*;

/// Appended to every input, marks the end of the tokens
pub const END_MARKER: &str = "$";

#[derive(Debug, PartialEq, Clone, Copy)]
enum State {
    Running,
    Accepted,
    Rejected,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Outcome {
    Accepted,
    Rejected,
}

/// One line of a parse trace
#[derive(Debug, PartialEq, Clone)]
pub enum Event {
    // The state at the start of a step
    Step { stack: Vec<Symbol>, input: Vec<Symbol> },
    Reduce(Rule),
    Shift(Symbol),
    // Reductions went back to a stack they already produced without shifting
    Cycle(Vec<Symbol>),
    Accepted,
    Rejected,
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Step { stack, input } => write!(f, "Stack: [{}] | Input: {}", stack.iter().join(", "), input.iter().join(" ")),
            Event::Reduce(rule) => write!(f, "Reduced by rule: {}", rule),
            Event::Shift(token) => write!(f, "Shifted: {}", token),
            Event::Cycle(stack) => write!(f, "Reduction cycle at stack: [{}]", stack.iter().join(", ")),
            Event::Accepted => write!(f, "String accepted."),
            Event::Rejected => write!(f, "Syntax error. String rejected."),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Trace {
    pub events: Vec<Event>,
}

impl Display for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "{}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Parse {
    pub outcome: Outcome,
    pub trace: Trace,
}

impl Parse {
    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }
}

/// Decides whether strings belong to a grammar. Holds no state between
/// parses, so one engine can parse any number of strings.
pub struct Engine<'g> {
    grammar: &'g Grammar,
}

impl<'g> Engine<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Engine { grammar }
    }

    /// Parses whitespace separated tokens, returning the outcome along with
    /// every step taken
    pub fn run(&self, input: &str) -> Parse {
        let mut run = Run::new(self.grammar, input);
        while run.state == State::Running {
            run.step();
        }

        let outcome = match run.state {
            State::Accepted => Outcome::Accepted,
            _ => Outcome::Rejected
        };

        Parse {
            outcome,
            trace: run.trace
        }
    }

    /// Like `run`, but prints the trace and only returns whether the string
    /// was accepted
    pub fn parse(&self, input: &str) -> bool {
        let parse = self.run(input);
        println!("\nStarting shift-reduce parse...\n");
        print!("{}", parse.trace);
        parse.is_accepted()
    }
}

// The state of a single parse
struct Run<'g> {
    grammar: &'g Grammar,
    state: State,
    stack: Vec<Symbol>,
    input: VecDeque<Symbol>,
    // Stacks produced by reductions since the last shift
    reduced: HashSet<Vec<Symbol>>,
    trace: Trace,
}

impl<'g> Run<'g> {
    fn new(grammar: &'g Grammar, input: &str) -> Self {
        let input = input.split_whitespace()
            .map(str::to_string)
            .chain(std::iter::once(END_MARKER.to_string()))
            .collect();

        Run {
            grammar,
            state: State::Running,
            stack: Vec::new(),
            input,
            reduced: HashSet::new(),
            trace: Trace::default()
        }
    }

    // First rule, in load order, whose right side is the top of the stack
    fn find_reduction(&self) -> Option<&'g Rule> {
        let grammar = self.grammar;
        grammar.rules.iter().find(|rule| rule.matches(&self.stack))
    }

    fn reduce(&mut self, rule: &Rule) {
        self.stack.truncate(self.stack.len() - rule.right.len());
        self.stack.push(rule.left.clone());
        self.trace.events.push(Event::Reduce(rule.clone()));
    }

    fn shift(&mut self) {
        if let Some(token) = self.input.pop_front() {
            self.reduced.clear();
            self.trace.events.push(Event::Shift(token.clone()));
            self.stack.push(token);
        }
    }

    // Only the start symbol is left and only the end marker is pending
    fn is_accepting(&self) -> bool {
        matches!(self.stack.as_slice(), [top] if *top == self.grammar.start_symbol)
            && self.input.len() == 1
            && self.input.front().is_some_and(|token| token == END_MARKER)
    }

    fn finish(&mut self, state: State) {
        self.state = state;
        self.trace.events.push(match state {
            State::Accepted => Event::Accepted,
            _ => Event::Rejected
        });
    }

    fn step(&mut self) {
        self.trace.events.push(Event::Step {
            stack: self.stack.clone(),
            input: self.input.iter().cloned().collect()
        });

        match self.find_reduction() {
            Some(rule) => {
                self.reduce(rule);
                if !self.reduced.insert(self.stack.clone()) {
                    self.trace.events.push(Event::Cycle(self.stack.clone()));
                    self.finish(State::Rejected);
                    return;
                }
            }
            None => self.shift()
        }

        if self.is_accepting() {
            self.finish(State::Accepted);
        } else if self.input.is_empty() {
            self.finish(State::Rejected);
        }
    }
}
