//! Output normalization: no more than two consecutive newlines.

use std::io::{self, Write};

/// Longest run of newlines let through.
const MAX_NEWLINES: usize = 2;

/// Writer adapter that drops every newline beyond the second in a run of
/// consecutive newlines. The run is tracked across writes.
#[derive(Debug)]
pub struct NewlineLimiter<W> {
    inner: W,
    newlines: usize,
}

impl<W: Write> NewlineLimiter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, newlines: 0 }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for NewlineLimiter<W> {
    /// Reports the whole buffer as written even when newlines were dropped.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut kept = Vec::with_capacity(buf.len());
        for &b in buf {
            if b == b'\n' {
                self.newlines += 1;
                if self.newlines > MAX_NEWLINES {
                    continue;
                }
            } else {
                self.newlines = 0;
            }
            kept.push(b);
        }
        self.inner.write_all(&kept)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Applies the newline limit to a complete string.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines > MAX_NEWLINES {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(ch);
    }
    out
}
