use crate::buffer::LineBuffer;
use crate::history::History;
use crate::sink::Echo;
use crate::tokenize::{self, Args, Spans};
use crate::{Config, OutputSink};
use log::{debug, trace};

/// Line capacity used by [`LineMachine::new`], terminator included.
pub const DEFAULT_MAX_LINE: usize = 120;
/// History region size used by [`LineMachine::new`].
pub const DEFAULT_HISTORY_LEN: usize = 1000;
/// Argument slots used by [`LineMachine::new`], sentinel included.
pub const DEFAULT_MAX_ARGC: usize = 16;

const CTRL_A: u8 = 0x01;
const CTRL_C: u8 = 0x03;
const CTRL_E: u8 = 0x05;
const BACKSPACE: u8 = 0x08;
const CTRL_K: u8 = 0x0b;
const CTRL_L: u8 = 0x0c;
const CTRL_R: u8 = 0x12;
const ESC: u8 = 0x1b;
const DEL: u8 = 0x7f;

const SEARCH_PROMPT: &[u8] = b"search: ";

/// Repeat counts stop growing once they reach this value.
const COUNTER_LIMIT: usize = 100;

/// A line editor driven one input byte at a time.
///
/// `LINE` is the size of the line buffer including its nul terminator,
/// `HIST` the number of bytes of history to keep (zero disables history)
/// and `ARGC` the number of argument slots available to
/// [`LineMachine::args`], including the absent final slot.
pub struct LineMachine<
    S,
    const LINE: usize = { DEFAULT_MAX_LINE },
    const HIST: usize = { DEFAULT_HISTORY_LEN },
    const ARGC: usize = { DEFAULT_MAX_ARGC },
> {
    out: Echo<S>,
    config: Config,
    line: LineBuffer<LINE>,
    history: History<HIST>,
    history_pos: Option<usize>,
    state: State,
    counter: usize,
    searching: bool,
    done: bool,
    args: Option<Spans<ARGC>>,
}

impl<S> LineMachine<S> {
    /// Creates a machine with the default capacities and configuration.
    pub const fn new(sink: S) -> Self {
        Self::with_capacity(sink, Config::new())
    }

    /// Creates a machine with the default capacities.
    pub const fn with_config(sink: S, config: Config) -> Self {
        Self::with_capacity(sink, config)
    }
}

impl<S, const LINE: usize, const HIST: usize, const ARGC: usize>
    LineMachine<S, LINE, HIST, ARGC>
{
    /// Creates a machine whose capacities are chosen through its type, as in
    /// `LineMachine::<_, 64, 256, 8>::with_capacity(sink, config)`.
    pub const fn with_capacity(sink: S, config: Config) -> Self {
        Self {
            out: Echo::new(sink, config.serial_xlate()),
            config,
            line: LineBuffer::new(),
            history: History::new(),
            history_pos: None,
            state: State::Normal,
            counter: 0,
            searching: false,
            done: false,
            args: None,
        }
    }

    #[inline(always)]
    pub const fn sink(&self) -> &S {
        self.out.sink()
    }

    #[inline(always)]
    pub fn sink_mut(&mut self) -> &mut S {
        self.out.sink_mut()
    }

    #[inline(always)]
    pub fn take_sink(self) -> S {
        self.out.into_sink()
    }

    #[inline(always)]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the completed line, or `None` while a line is still being
    /// edited.
    ///
    /// The line stays available until the next byte is inserted. Once
    /// [`LineMachine::args`] has been called the line holds the rewritten,
    /// nul-separated arguments instead of the original text.
    pub fn line(&self) -> Option<&[u8]> {
        if !self.done {
            return None;
        }
        Some(self.line.as_bytes())
    }

    /// Like [`LineMachine::line`], for lines that are valid UTF-8.
    pub fn line_str(&self) -> Option<&str> {
        self.line().and_then(|line| core::str::from_utf8(line).ok())
    }

    #[inline(always)]
    pub const fn is_complete(&self) -> bool {
        self.done
    }

    /// Splits the completed line into arguments.
    ///
    /// Returns no arguments while a line is still being edited. The line is
    /// split the first time this is called and later calls return the same
    /// arguments again.
    pub fn args(&mut self) -> Args<'_, ARGC> {
        if !self.done {
            return Args::empty();
        }
        let spans = self
            .args
            .get_or_insert_with(|| tokenize::split(self.line.as_mut_bytes()));
        Args::from_spans(self.line.as_bytes(), spans)
    }

    /// The line as currently edited, which while searching is the search
    /// text rather than the matched command.
    #[inline(always)]
    pub fn buffer(&self) -> &[u8] {
        self.line.as_bytes()
    }

    #[inline(always)]
    pub const fn cursor(&self) -> usize {
        self.line.cursor()
    }

    #[inline(always)]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    #[inline(always)]
    pub const fn history(&self) -> &History<HIST> {
        &self.history
    }

    /// Returns the history entry `index` commands back, where 0 is the most
    /// recent. This doesn't affect up/down navigation.
    pub fn history_entry(&self, index: usize) -> Option<&[u8]> {
        self.history.get(index)
    }
}

impl<S: OutputSink, const LINE: usize, const HIST: usize, const ARGC: usize>
    LineMachine<S, LINE, HIST, ARGC>
{
    /// Processes one byte of input, returning `true` if it completed a line.
    ///
    /// The completed line can then be read with [`LineMachine::line`] or
    /// [`LineMachine::args`] until the next call. This must not be called
    /// from an interrupt handler: deliver Ctrl-C as byte `0x03` through the
    /// same loop as everything else instead.
    pub fn insert_char(&mut self, ch: u8) -> bool {
        let ch = if ch == b'\r' && self.config.serial_xlate() {
            b'\n'
        } else {
            ch
        };

        if self.done {
            self.done = false;
            self.line.clear();
            self.args = None;
        }

        match self.state {
            State::Normal => self.normal(ch),
            State::Escape => self.escape(ch),
            State::Csi => self.csi(ch),
        }
        self.out.end();
        self.done
    }

    /// Writes the prompt.
    ///
    /// Call this once at startup and again after each completed line has
    /// been dealt with.
    pub fn prompt(&mut self) {
        self.out.put_all(self.config.prompt().as_bytes());
        self.out.end();
    }

    fn normal(&mut self, ch: u8) {
        match ch {
            0 => {}
            CTRL_A => {
                self.accept_search();
                self.home();
            }
            CTRL_C => self.interrupt(),
            CTRL_E => {
                self.accept_search();
                self.end();
            }
            BACKSPACE | DEL => self.backspace(),
            CTRL_K => {
                self.accept_search();
                self.kill_to_eol();
            }
            CTRL_L => {
                self.accept_search();
                self.out.clear_screen();
                self.redraw_line();
            }
            CTRL_R => self.start_search(),
            ESC => {
                self.accept_search();
                self.state = State::Escape;
            }
            b'\n' => self.complete(),
            _ => self.insert(ch),
        }
    }

    fn escape(&mut self, ch: u8) {
        match ch {
            b'[' => {
                self.counter = 0;
                self.state = State::Csi;
            }
            ESC => {}
            _ => {
                trace!("discarding escape sequence ending in {ch:#04x}");
                self.state = State::Normal;
            }
        }
    }

    fn csi(&mut self, ch: u8) {
        if ch.is_ascii_digit() {
            if self.counter < COUNTER_LIMIT {
                self.counter = self.counter * 10 + usize::from(ch - b'0');
            }
            return;
        }

        let param = core::mem::take(&mut self.counter);
        let count = param.max(1);
        self.state = State::Normal;
        match ch {
            b'A' => self.history_up(),
            b'B' => self.history_down(),
            b'C' => self.right(count),
            b'D' => self.left(count),
            b'F' => self.end(),
            b'H' => self.home(),
            b'~' if param == 3 => self.delete(),
            ESC => self.state = State::Escape,
            _ => trace!("discarding control sequence {param}{}", ch as char),
        }
    }

    fn insert(&mut self, ch: u8) {
        if !self.line.insert(ch) {
            return;
        }
        if self.searching {
            self.render_search();
            return;
        }
        let from = self.line.cursor() - 1;
        self.out.put_all(&self.line.as_bytes()[from..]);
        self.out.cursor_back(self.line.len() - self.line.cursor());
    }

    fn backspace(&mut self) {
        if self.searching {
            if self.line.is_empty() {
                self.accept_search();
            } else {
                self.line.backspace();
                self.render_search();
            }
            return;
        }
        if self.line.backspace() {
            self.out.cursor_back(1);
            self.redraw_tail();
        }
    }

    fn delete(&mut self) {
        if self.line.delete() {
            self.redraw_tail();
        }
    }

    fn left(&mut self, n: usize) {
        if self.line.move_left(n) {
            self.out.cursor_back(n);
        }
    }

    fn right(&mut self, n: usize) {
        if self.line.move_right(n) {
            self.out.cursor_fwd(n);
        }
    }

    fn home(&mut self) {
        let moved = self.line.home();
        self.out.cursor_back(moved);
    }

    fn end(&mut self) {
        let moved = self.line.end();
        self.out.cursor_fwd(moved);
    }

    fn kill_to_eol(&mut self) {
        self.line.truncate();
        self.out.erase_to_eol();
    }

    fn history_up(&mut self) {
        let target = self.history_pos.map_or(0, |pos| pos + 1);
        self.load_history(target);
    }

    fn history_down(&mut self) {
        if let Some(target) = self.history_pos.and_then(|pos| pos.checked_sub(1)) {
            self.load_history(target);
        }
    }

    fn load_history(&mut self, index: usize) {
        let Some(entry) = self.history.get(index) else {
            return;
        };
        self.line.set(entry);
        self.history_pos = Some(index);
        self.redraw_line();
    }

    fn start_search(&mut self) {
        if self.searching {
            return;
        }
        self.searching = true;
        self.line.end();
        self.render_search();
    }

    /// Replaces the search text with the command it matches.
    fn resolve_search(&mut self) {
        self.searching = false;
        match self.history.search(self.line.as_bytes()) {
            Some(entry) => self.line.set(entry),
            None => self.line.clear(),
        }
    }

    /// Leaves search mode, if active, showing the matched command.
    fn accept_search(&mut self) {
        if self.searching {
            self.resolve_search();
            self.redraw_line();
        }
    }

    fn interrupt(&mut self) {
        debug!("line interrupted");
        self.out.put_all(b"^C\n");
        self.line.clear();
        self.history_pos = None;
        self.counter = 0;
        self.searching = false;
        self.state = State::Normal;
        self.out.put_all(self.config.prompt().as_bytes());
    }

    fn complete(&mut self) {
        if self.searching {
            self.resolve_search();
        }
        self.out.put(b'\n');
        self.history.push(self.line.as_bytes());
        debug!("line complete ({} bytes)", self.line.len());
        self.history_pos = None;
        self.counter = 0;
        self.done = true;
    }

    /// Rewrites the bytes from the cursor to the end of the line, blanking
    /// the column just past them.
    fn redraw_tail(&mut self) {
        let tail = self.line.tail();
        self.out.put_all(tail);
        self.out.put(b' ');
        self.out.cursor_back(tail.len() + 1);
    }

    fn redraw_line(&mut self) {
        self.out.put(b'\r');
        self.out.erase_to_eol();
        self.out.put_all(self.config.prompt().as_bytes());
        self.out.put_all(self.line.as_bytes());
        self.out.cursor_back(self.line.len() - self.line.cursor());
    }

    fn render_search(&mut self) {
        self.out.put(b'\r');
        self.out.erase_to_eol();
        self.out.put_all(SEARCH_PROMPT);
        if let Some(entry) = self.history.search(self.line.as_bytes()) {
            self.out.put_all(entry);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Normal,
    Escape,
    Csi,
}
