use std::ops::Range;

use super::category::Category;
use super::registry::{Rule, registry};

/// The winning rule for one dispatch cycle, with offsets relative to the
/// cursor it was selected from.
#[derive(Debug, Clone)]
pub struct Selection {
    pub rule: &'static Rule,
    pub start: usize,
    pub end: usize,
    /// First capture group, when the rule declares one.
    pub group: Option<Range<usize>>,
}

/// Where a rule next matches, as of the last search.
#[derive(Debug, Clone, Copy)]
enum Lookahead {
    Stale,
    At(usize),
    Exhausted,
}

#[derive(Debug)]
struct Candidate {
    rule: &'static Rule,
    next: Lookahead,
}

/// Earliest-match selection over one span, for a cursor that only moves
/// forward.
///
/// Every rule sees the remaining text as if it started at the cursor, so
/// boundary assertions at the cursor behave as at the start of text. A match
/// found further on stays valid until the cursor passes its start, which
/// keeps one driver call from rescanning the whole span on every cycle.
#[derive(Debug)]
pub struct Dispatcher<'h> {
    haystack: &'h str,
    real_len: usize,
    candidates: Vec<Candidate>,
}

impl<'h> Dispatcher<'h> {
    /// `haystack` is the span with a synthetic line break appended so that
    /// end-anchored and terminator-dependent patterns can see past the real
    /// end; `real_len` is the length without it.
    pub fn new(haystack: &'h str, real_len: usize, allowed: &[Category]) -> Self {
        let candidates = registry()
            .iter()
            .filter(|rule| rule.category.is_allowed(allowed))
            .map(|rule| Candidate {
                rule,
                next: Lookahead::Stale,
            })
            .collect();
        Self {
            haystack,
            real_len,
            candidates,
        }
    }

    /// Pick the earliest-starting match at or after `cursor`.
    ///
    /// A match starting inside the synthetic terminator is rejected. Ties go
    /// to the earliest registered rule.
    pub fn select_from(&mut self, cursor: usize) -> Option<Selection> {
        if cursor >= self.real_len {
            return None;
        }
        let haystack = self.haystack;
        let rest = &haystack[cursor..];

        // Nothing can start earlier than the cursor itself.
        let at_cursor = self
            .candidates
            .iter()
            .find(|candidate| candidate.rule.anchored.is_match(rest))
            .map(|candidate| (candidate.rule, 0));
        let best = match at_cursor {
            Some(hit) => Some(hit),
            None => self.earliest_after(cursor, rest),
        };

        let (rule, start) = best?;
        let caps = rule.pattern.captures_at(rest, start)?;
        let whole = caps.get(0)?;
        log::trace!(
            "dispatch: {:?} rule {:?} matched {}..{}",
            rule.category,
            rule.tag,
            cursor + whole.start(),
            cursor + whole.end()
        );

        Some(Selection {
            rule,
            start: whole.start(),
            end: whole.end(),
            group: caps.get(1).map(|group| group.range()),
        })
    }

    /// Earliest match past the cursor, reusing lookahead still ahead of it.
    /// Offsets are relative to the cursor.
    fn earliest_after(&mut self, cursor: usize, rest: &str) -> Option<(&'static Rule, usize)> {
        let mut best: Option<(&'static Rule, usize)> = None;
        for candidate in &mut self.candidates {
            let next = match candidate.next {
                Lookahead::At(start) if start > cursor => Some(start),
                Lookahead::Exhausted => None,
                _ => {
                    let pattern = &candidate.rule.pattern;
                    let found = pattern.find(rest).map(|m| cursor + m.start());
                    candidate.next = found.map_or(Lookahead::Exhausted, Lookahead::At);
                    found
                }
            };
            let Some(start) = next.filter(|&start| start < self.real_len) else {
                continue;
            };
            if best.is_none_or(|(_, best_start)| start - cursor < best_start) {
                best = Some((candidate.rule, start - cursor));
            }
        }
        best
    }
}

/// One-off selection from the start of `haystack`.
pub fn select(haystack: &str, real_len: usize, allowed: &[Category]) -> Option<Selection> {
    Dispatcher::new(haystack, real_len, allowed).select_from(0)
}
