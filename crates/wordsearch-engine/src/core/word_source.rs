use std::{
    collections::VecDeque,
    io::{self, BufRead},
};

/// A producer of raw word-list lines, consumed until exhaustion.
pub trait WordSource {
    /// Returns the next line, or `None` at the end of the source.
    fn next_line(&mut self) -> Option<String>;
}

impl<S> WordSource for &mut S
where
    S: WordSource + ?Sized,
{
    fn next_line(&mut self) -> Option<String> {
        (**self).next_line()
    }
}

/// Words typed in one at a time.
///
/// Words are buffered with [`provide`](Self::provide) until the source is
/// [`close`](Self::close)d. Lines are only handed out once the source is
/// closed, so a half-entered list is never consumed.
///
/// # Example
///
/// ```
/// use wordsearch_engine::{ManualWordSource, WordSource as _};
///
/// let mut source = ManualWordSource::new();
/// source.provide("cat");
/// assert_eq!(source.next_line(), None);
/// source.close();
/// assert_eq!(source.next_line().as_deref(), Some("cat"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualWordSource {
    lines: VecDeque<String>,
    closed: bool,
}

impl ManualWordSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an already-closed source from a list of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            closed: true,
        }
    }

    /// Appends a line. Ignored once the source is closed.
    pub fn provide<S>(&mut self, line: S)
    where
        S: Into<String>,
    {
        if !self.closed {
            self.lines.push_back(line.into());
        }
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl WordSource for ManualWordSource {
    fn next_line(&mut self) -> Option<String> {
        if !self.closed {
            return None;
        }
        self.lines.pop_front()
    }
}

/// Lines read from a dictionary file or any other [`BufRead`].
///
/// A read error ends the source; it is kept and returned by
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct ReaderWordSource<R> {
    reader: R,
    error: Option<io::Error>,
}

impl<R> ReaderWordSource<R>
where
    R: BufRead,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            error: None,
        }
    }

    /// Consumes the source and reports the read error that ended it, if any.
    pub fn finish(self) -> io::Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl<R> WordSource for ReaderWordSource<R>
where
    R: BufRead,
{
    fn next_line(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                log::warn!("stopped reading word list: {e}");
                self.error = Some(e);
                None
            }
        }
    }
}
