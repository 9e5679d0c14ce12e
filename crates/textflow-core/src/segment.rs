//! Sentence segmentation for document-level workflows
//!
//! A unit ends after `.`, `!` or `?` when the mark is followed by at least
//! one space. The mark stays with its unit, the spaces are dropped.

use regex::{Matches, Regex};
use std::sync::LazyLock;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?] +").expect("sentence break pattern is valid"));

/// Split `text` into sentence units.
///
/// Units are trimmed and never empty. Text without a split point yields a
/// single unit; blank text yields none.
pub fn segment_sentences(text: &str) -> Sentences<'_> {
    Sentences {
        text,
        breaks: SENTENCE_BREAK.find_iter(text),
        start: Some(0),
    }
}

/// Iterator returned by [`segment_sentences`]
#[derive(Debug)]
pub struct Sentences<'a> {
    text: &'a str,
    breaks: Matches<'static, 'a>,
    /// Offset of the next unit, `None` once the tail has been emitted
    start: Option<usize>,
}

impl<'a> Iterator for Sentences<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.start?;
            let unit = match self.breaks.next() {
                Some(m) => {
                    self.start = Some(m.end());
                    // the mark is a single ASCII byte and stays with its unit
                    &self.text[start..m.start() + 1]
                }
                None => {
                    self.start = None;
                    &self.text[start..]
                }
            };

            let unit = unit.trim();
            if !unit.is_empty() {
                return Some(unit);
            }
        }
    }
}
