//! Splitting a completed line into shell-like arguments.

use core::ops::Range;
use log::debug;

/// The arguments of a tokenized line, borrowed from the line's buffer.
///
/// At most `ARGC - 1` arguments are kept; the final slot is always absent,
/// mirroring the terminating null of a C `argv` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Args<'a, const ARGC: usize> {
    argv: [&'a [u8]; ARGC],
    argc: usize,
}

impl<'a, const ARGC: usize> Args<'a, ARGC> {
    pub const fn empty() -> Self {
        Self {
            argv: [&[]; ARGC],
            argc: 0,
        }
    }

    pub(crate) fn from_spans(line: &'a [u8], spans: &Spans<ARGC>) -> Self {
        let mut ret = Self::empty();
        for (slot, span) in ret.argv.iter_mut().zip(spans.values()) {
            *slot = &line[span.clone()];
        }
        ret.argc = spans.len;
        ret
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.argc
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.argc == 0
    }

    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        self.as_slice().get(index).copied()
    }

    /// Returns the argument at `index` if it is valid UTF-8.
    pub fn get_str(&self, index: usize) -> Option<&'a str> {
        self.get(index).and_then(|arg| core::str::from_utf8(arg).ok())
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[&'a [u8]] {
        &self.argv[..self.argc]
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Byte ranges of the arguments within a tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Spans<const ARGC: usize> {
    buf: [Range<usize>; ARGC],
    len: usize,
}

impl<const ARGC: usize> Spans<ARGC> {
    const EMPTY: Range<usize> = 0..0;

    const fn new() -> Self {
        Self {
            buf: [Self::EMPTY; ARGC],
            len: 0,
        }
    }

    #[inline(always)]
    fn is_full(&self) -> bool {
        self.len + 1 >= ARGC
    }

    fn push(&mut self, start: usize) {
        self.buf[self.len] = start..start;
        self.len += 1;
    }

    fn close(&mut self, end: usize) {
        if let Some(last) = self.len.checked_sub(1) {
            self.buf[last].end = end;
        }
    }

    fn values(&self) -> &[Range<usize>] {
        &self.buf[..self.len]
    }
}

/// Splits `line` into arguments in place.
///
/// Whitespace separates arguments. A backslash makes the following byte
/// literal, and single or double quotes make everything up to the matching
/// quote literal. Backslashes and quotes are removed by shifting the rest
/// of the argument left, and each argument is nul-terminated where the
/// separating whitespace used to be. This rewrites the line, so it only
/// makes sense to tokenize a given line once.
///
/// ```rust
/// let mut line = *br#"set name "Joe Bloggs" it\'s"#;
/// let args = vtline::tokenize::<8>(&mut line);
/// assert_eq!(args.as_slice(), [&b"set"[..], b"name", b"Joe Bloggs", b"it's"]);
/// ```
pub fn tokenize<const ARGC: usize>(line: &mut [u8]) -> Args<'_, ARGC> {
    let spans = split::<ARGC>(line);
    Args::from_spans(line, &spans)
}

pub(crate) fn split<const ARGC: usize>(line: &mut [u8]) -> Spans<ARGC> {
    let mut spans = Spans::new();
    if ARGC == 0 {
        return spans;
    }

    let len = line.iter().position(|&b| b == 0).unwrap_or(line.len());
    let mut w = 0;
    let mut in_arg = false;
    let mut escaped = false;
    let mut quote = None;

    for r in 0..len {
        let b = line[r];
        let literal = if escaped {
            escaped = false;
            true
        } else if let Some(q) = quote {
            if b == q {
                quote = None;
                continue;
            }
            true
        } else {
            false
        };

        if !literal && is_whitespace(b) {
            if in_arg {
                spans.close(w);
                line[w] = 0;
                w += 1;
                in_arg = false;
            }
            continue;
        }

        if !in_arg {
            if spans.is_full() {
                debug!("more than {} arguments, ignoring the rest", ARGC - 1);
                return spans;
            }
            spans.push(w);
            in_arg = true;
        }

        if !literal {
            match b {
                b'\\' => {
                    escaped = true;
                    continue;
                }
                b'\'' | b'"' => {
                    quote = Some(b);
                    continue;
                }
                _ => {}
            }
        }

        line[w] = b;
        w += 1;
    }

    if in_arg {
        spans.close(w);
        if w < line.len() {
            line[w] = 0;
        }
    }
    spans
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}
