//! Combinator kernel.
//!
//! Sequencing is ordinary `?` propagation. Alternation commits to the first
//! branch that consumes input; `attempt` makes a branch speculative by
//! restoring the cursor on failure. `many`, `sep_by` and friends follow the
//! same discipline: an iteration that fails after consuming input fails the
//! whole repetition.

use crate::{ParseResult, Parser};

/// Left-biased alternation. Each alternative is a `fn(&mut Parser) ->
/// ParseResult<T>` (a method path or closure); an alternative that fails
/// without consuming input passes control to the next one, an alternative
/// that fails after consuming commits the error. Wrap an alternative in
/// `Parser::attempt` when it must backtrack past a consumed prefix.
macro_rules! choice {
    ($p:expr, $expected:expr, $( $alt:expr ),+ $(,)?) => {{
        'choice: {
            $(
                let checkpoint = $p.cursor.save();
                let start = $p.cursor.offset();
                match $alt($p) {
                    Ok(value) => break 'choice Ok(value),
                    Err(err) => {
                        if $p.cursor.offset() != start {
                            break 'choice Err(err);
                        }
                        $p.cursor.restore(checkpoint);
                    }
                }
            )+
            break 'choice Err($p.expected_err($expected));
        }
    }};
}

pub(crate) use choice;

impl<'src> Parser<'src> {
    /// Run `f` speculatively: on failure the cursor is restored, so the
    /// surrounding alternation sees no consumption.
    pub(crate) fn attempt<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let checkpoint = self.cursor.save();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.cursor.restore(checkpoint);
                Err(err)
            }
        }
    }

    /// `attempt` with the failure discarded.
    pub(crate) fn opt<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> Option<T> {
        self.attempt(f).ok()
    }

    /// Zero or more. Stops at the first iteration that fails without
    /// consuming; an iteration that fails mid-way is fatal to the repetition.
    pub(crate) fn many<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        loop {
            let checkpoint = self.cursor.save();
            let start = self.cursor.offset();
            match f(self) {
                Ok(value) => items.push(value),
                Err(err) => {
                    if self.cursor.offset() != start {
                        return Err(err);
                    }
                    self.cursor.restore(checkpoint);
                    return Ok(items);
                }
            }
        }
    }

    /// One or more.
    pub(crate) fn many1<T>(
        &mut self,
        mut f: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let first = f(self)?;
        let mut items = self.many(f)?;
        items.insert(0, first);
        Ok(items)
    }

    /// One or more, separated by the literal `sep`. Once a separator is
    /// consumed the following item is required.
    pub(crate) fn sep_by1<T>(
        &mut self,
        sep: &str,
        mut f: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = vec![f(self)?];
        loop {
            let checkpoint = self.cursor.save();
            if self.punct(sep).is_ok() {
                items.push(f(self)?);
            } else {
                self.cursor.restore(checkpoint);
                return Ok(items);
            }
        }
    }

    /// Zero or more, separated by the literal `sep`.
    pub(crate) fn sep_by<T>(
        &mut self,
        sep: &str,
        mut f: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let checkpoint = self.cursor.save();
        let start = self.cursor.offset();
        match f(self) {
            Ok(first) => {
                let mut items = vec![first];
                loop {
                    let checkpoint = self.cursor.save();
                    if self.punct(sep).is_ok() {
                        items.push(f(self)?);
                    } else {
                        self.cursor.restore(checkpoint);
                        return Ok(items);
                    }
                }
            }
            Err(err) => {
                if self.cursor.offset() != start {
                    return Err(err);
                }
                self.cursor.restore(checkpoint);
                Ok(Vec::new())
            }
        }
    }

    /// Succeeds, consuming nothing, iff `f` fails at the current position.
    pub(crate) fn not_followed_by<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
        label: &str,
    ) -> ParseResult<()> {
        let checkpoint = self.cursor.save();
        let matched = f(self).is_ok();
        self.cursor.restore(checkpoint);
        if matched {
            self.fail(label)
        } else {
            Ok(())
        }
    }

    /// Run `f` and restore the cursor whether or not it succeeded.
    pub(crate) fn look_ahead<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let checkpoint = self.cursor.save();
        let result = f(self);
        self.cursor.restore(checkpoint);
        result
    }
}
