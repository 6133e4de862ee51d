/// Trait for implementations that receive the bytes a [`crate::LineMachine`]
/// echoes back to the terminal.
///
/// The provided method implementation discards everything.
pub trait OutputSink {
    /// Emits a single byte towards the terminal.
    ///
    /// `is_last` is set on the final byte of one logical write, which is
    /// everything produced by a single call to
    /// [`crate::LineMachine::insert_char`] or [`crate::LineMachine::prompt`].
    /// Implementations that buffer their output should flush at that point.
    #[inline(always)]
    fn emit(&mut self, byte: u8, is_last: bool) {
        let _ = (byte, is_last);
        // Silently ignored by default.
    }
}

/// Discards all output, for callers that do their own echoing or none at all.
impl OutputSink for () {}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    #[inline(always)]
    fn emit(&mut self, byte: u8, is_last: bool) {
        (**self).emit(byte, is_last);
    }
}

/// Returns an [`OutputSink`] that calls the given function for each byte
/// produced by an associated [`crate::LineMachine`].
pub fn sink_fn(f: impl FnMut(u8, bool)) -> impl OutputSink {
    OutputSinkFn { f }
}

struct OutputSinkFn<F> {
    f: F,
}

impl<F: FnMut(u8, bool)> OutputSink for OutputSinkFn<F> {
    #[inline(always)]
    fn emit(&mut self, byte: u8, is_last: bool) {
        (self.f)(byte, is_last);
    }
}

/// Wraps a sink and holds back one byte so that the last byte of each
/// logical write can be flagged once the write is known to be over.
pub(crate) struct Echo<S> {
    sink: S,
    pending: Option<u8>,
    crlf: bool,
}

impl<S> Echo<S> {
    pub(crate) const fn new(sink: S, crlf: bool) -> Self {
        Self {
            sink,
            pending: None,
            crlf,
        }
    }

    #[inline(always)]
    pub(crate) const fn sink(&self) -> &S {
        &self.sink
    }

    #[inline(always)]
    pub(crate) fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[inline(always)]
    pub(crate) fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: OutputSink> Echo<S> {
    pub(crate) fn put(&mut self, b: u8) {
        if b == b'\n' && self.crlf {
            self.push(b'\r');
        }
        self.push(b);
    }

    pub(crate) fn put_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.put(b);
        }
    }

    /// Moves the terminal cursor `n` columns to the left.
    #[inline(always)]
    pub(crate) fn cursor_back(&mut self, n: usize) {
        self.cursor_motion(n, b'D');
    }

    /// Moves the terminal cursor `n` columns to the right.
    #[inline(always)]
    pub(crate) fn cursor_fwd(&mut self, n: usize) {
        self.cursor_motion(n, b'C');
    }

    fn cursor_motion(&mut self, n: usize, cmd: u8) {
        if n == 0 {
            return;
        }
        let mut digits = [0_u8; 20];
        let mut start = digits.len();
        let mut v = n;
        while v > 0 {
            start -= 1;
            digits[start] = b'0' + (v % 10) as u8;
            v /= 10;
        }
        self.put_all(b"\x1b[");
        self.put_all(&digits[start..]);
        self.put(cmd);
    }

    pub(crate) fn erase_to_eol(&mut self) {
        self.put_all(b"\x1b[K");
    }

    pub(crate) fn clear_screen(&mut self) {
        self.put_all(b"\x1b[2J\x1b[H");
    }

    /// Ends the current logical write, flagging its final byte.
    pub(crate) fn end(&mut self) {
        if let Some(b) = self.pending.take() {
            self.sink.emit(b, true);
        }
    }

    fn push(&mut self, b: u8) {
        if let Some(prev) = self.pending.replace(b) {
            self.sink.emit(prev, false);
        }
    }
}
