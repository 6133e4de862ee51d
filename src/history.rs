//! Bounded command history.
//!
//! Entries live in a single fixed region of `N` bytes as nul-terminated
//! strings, newest first, packed from offset zero. Adding an entry shifts the
//! existing ones towards the end of the region and whatever no longer fits
//! falls off, so the oldest commands are forgotten first.

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<const N: usize> {
    buf: [u8; N],
    used: usize,
}

impl<const N: usize> History<N> {
    pub const fn new() -> Self {
        Self { buf: [0; N], used: 0 }
    }

    /// Size of the region in bytes, terminators included.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of bytes of the region currently holding entries.
    #[inline(always)]
    pub const fn used(&self) -> usize {
        self.used
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Records `line` as the newest entry.
    ///
    /// The line is taken up to its first nul byte. Empty lines, lines equal
    /// to the current newest entry and lines too long to ever fit are
    /// ignored.
    pub fn push(&mut self, line: &[u8]) {
        let line = match line.iter().position(|&b| b == 0) {
            Some(nul) => &line[..nul],
            None => line,
        };
        if line.is_empty() || line.len() >= N {
            return;
        }
        if self.get(0) == Some(line) {
            return;
        }

        let entry_len = line.len() + 1;
        let keep = self.used.min(N - entry_len);
        self.buf.copy_within(..keep, entry_len);

        // Anything cut off mid-entry is dropped along with its terminator.
        let kept = &self.buf[entry_len..entry_len + keep];
        let kept_len = kept.iter().rposition(|&b| b == 0).map_or(0, |i| i + 1);
        if kept_len < self.used {
            debug!(
                "history full, dropped {} bytes of old entries",
                self.used - kept_len
            );
        }

        self.buf[..line.len()].copy_from_slice(line);
        self.buf[line.len()] = 0;
        self.used = entry_len + kept_len;
        self.buf[self.used..].fill(0);
    }

    /// Returns the entry `index` steps back, where 0 is the newest.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.iter().nth(index)
    }

    /// Returns the newest entry containing `needle`.
    ///
    /// An empty needle matches the newest entry.
    pub fn search(&self, needle: &[u8]) -> Option<&[u8]> {
        self.iter().find(|entry| contains(entry, needle))
    }

    /// Iterates over the entries, newest first.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            region: &self.buf[..self.used],
        }
    }

    pub fn clear(&mut self) {
        self.buf.fill(0);
        self.used = 0;
    }
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> IntoIterator for &'a History<N> {
    type Item = &'a [u8];
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`History`], newest first.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    region: &'a [u8],
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.region.is_empty() {
            return None;
        }
        // A region without a final terminator would be a packing bug; stop
        // rather than hand out a partial entry.
        let nul = self.region.iter().position(|&b| b == 0)?;
        let entry = &self.region[..nul];
        self.region = &self.region[nul + 1..];
        Some(entry)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}
