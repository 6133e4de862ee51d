/// A fixed-capacity line of bytes with an insertion cursor.
///
/// One byte of the `N` bytes of storage is reserved for a nul terminator, so
/// the line holds at most `N - 1` bytes and `bytes[len]` is always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer<const N: usize> {
    buf: [u8; N],
    len: usize,
    cursor: usize,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
            cursor: 0,
        }
    }

    /// The maximum number of bytes the line can hold.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N.saturating_sub(1)
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len >= self.capacity()
    }

    #[inline(always)]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The bytes of the line including its nul terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        if N == 0 {
            return &[];
        }
        &self.buf[..=self.len]
    }

    /// The bytes from the cursor to the end of the line.
    #[inline(always)]
    pub fn tail(&self) -> &[u8] {
        &self.buf[self.cursor..self.len]
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    /// Inserts `b` at `pos`, shifting the rest of the line right.
    ///
    /// Returns `false` without changing anything if the line is full or
    /// `pos` is past the end of the line. The cursor follows the byte it was
    /// in front of.
    pub fn insert_at(&mut self, pos: usize, b: u8) -> bool {
        if self.is_full() || pos > self.len {
            return false;
        }
        self.buf.copy_within(pos..self.len, pos + 1);
        self.buf[pos] = b;
        self.len += 1;
        self.buf[self.len] = 0;
        if self.cursor >= pos {
            self.cursor += 1;
        }
        true
    }

    /// Removes the byte at `pos`, shifting the rest of the line left.
    pub fn remove_at(&mut self, pos: usize) -> Option<u8> {
        if pos >= self.len {
            return None;
        }
        let b = self.buf[pos];
        self.buf.copy_within(pos + 1..=self.len, pos);
        self.len -= 1;
        if self.cursor > pos {
            self.cursor -= 1;
        }
        Some(b)
    }

    /// Inserts `b` at the cursor and advances past it.
    #[inline(always)]
    pub fn insert(&mut self, b: u8) -> bool {
        self.insert_at(self.cursor, b)
    }

    /// Removes the byte before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.remove_at(self.cursor - 1).is_some()
    }

    /// Removes the byte under the cursor.
    #[inline(always)]
    pub fn delete(&mut self) -> bool {
        self.remove_at(self.cursor).is_some()
    }

    /// Moves the cursor `n` bytes left. Moves that would pass the start of
    /// the line are rejected entirely.
    pub fn move_left(&mut self, n: usize) -> bool {
        if n > self.cursor {
            return false;
        }
        self.cursor -= n;
        true
    }

    /// Moves the cursor `n` bytes right. Moves that would pass the end of
    /// the line are rejected entirely.
    pub fn move_right(&mut self, n: usize) -> bool {
        match self.cursor.checked_add(n) {
            Some(to) if to <= self.len => {
                self.cursor = to;
                true
            }
            _ => false,
        }
    }

    /// Moves the cursor to the start of the line, returning how far it moved.
    pub fn home(&mut self) -> usize {
        core::mem::take(&mut self.cursor)
    }

    /// Moves the cursor to the end of the line, returning how far it moved.
    pub fn end(&mut self) -> usize {
        let moved = self.len - self.cursor;
        self.cursor = self.len;
        moved
    }

    /// Drops everything from the cursor onwards.
    pub fn truncate(&mut self) {
        self.len = self.cursor;
        if N > 0 {
            self.buf[self.len] = 0;
        }
    }

    /// Replaces the whole line, keeping as much of `bytes` as fits, and
    /// places the cursor at the end.
    pub fn set(&mut self, bytes: &[u8]) {
        let len = bytes.len().min(self.capacity());
        self.buf[..len].copy_from_slice(&bytes[..len]);
        self.len = len;
        self.cursor = len;
        if N > 0 {
            self.buf[len] = 0;
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.cursor = 0;
        if N > 0 {
            self.buf[0] = 0;
        }
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
