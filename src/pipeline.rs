use std::time::{Duration, Instant};

use log::debug;

use crate::dictionary::WordDictionary;
use crate::lexer::{Lexer, Token};

/// Outcome of checking one text.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Misspelled words in the order they appear.
    pub misspelled: Vec<Token>,
    /// Candidate words that were looked up.
    pub words: usize,
    /// Time spent inside dictionary lookups.
    pub check_time: Duration,
}

pub struct Pipeline<'a> {
    dictionary: &'a WordDictionary,
}

impl<'a> Pipeline<'a> {
    pub fn new(dictionary: &'a WordDictionary) -> Pipeline<'a> {
        Pipeline { dictionary }
    }

    pub fn run(&self, lexer: Lexer) -> CheckReport {
        let mut report = CheckReport::default();
        for token in lexer {
            report.words += 1;

            let started = Instant::now();
            let known = self.dictionary.check(&token.lexeme);
            report.check_time += started.elapsed();

            if !known {
                debug!(
                    "misspelled {:?} at {}:{}",
                    token.lexeme,
                    token.start.line(),
                    token.start.column()
                );
                report.misspelled.push(token);
            }
        }
        report
    }
}
