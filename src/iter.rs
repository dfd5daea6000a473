//! Lazy decoding of a borrowed UTF-8 or UTF-16 sequence.

use core::cmp::Ordering;
use core::iter::FusedIterator;

use crate::error::DecodingError;
use crate::utf::Utf;

/// A cursor over a borrowed sequence of code units that decodes one code
/// point at a time.
///
/// The cursor is driven by hand with `begin`/`end`, [`current`](Self::current),
/// [`advance`](Self::advance), [`post_advance`](Self::post_advance) and `==`.
/// For the standard iterator algorithms, [`iter`](Self::iter) (or
/// `into_iter`) turns it into an [`Iterator`] of `Result<u32, DecodingError>`
/// starting at the cursor.
///
/// The cursor borrows the sequence, so the buffer cannot be mutated or
/// dropped while it is alive. To start over, build a new one with
/// [`begin`](Self::begin).
///
/// ```
/// use utfconv::Utf8CodePoints;
///
/// let steak = "шницла".as_bytes();
/// let found = Utf8CodePoints::begin(steak).iter().position(|c| c == Ok('ц' as u32));
/// assert_eq!(found, Some(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CodePoints<'a, U: Utf> {
    seq: &'a [U],
    cursor: usize,
}

pub type Utf8CodePoints<'a> = CodePoints<'a, u8>;
pub type Utf16CodePoints<'a> = CodePoints<'a, u16>;

impl<'a, U: Utf> CodePoints<'a, U> {
    /// A cursor positioned at the first code point of `seq`.
    #[inline]
    pub const fn begin(seq: &'a [U]) -> Self {
        Self { seq, cursor: 0 }
    }

    /// A cursor positioned past the last code point of `seq`.
    #[inline]
    pub const fn end(seq: &'a [U]) -> Self {
        Self {
            seq,
            cursor: seq.len(),
        }
    }

    /// Offset of the cursor, in code units, from the start of the sequence.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.cursor
    }

    /// True once the cursor has reached the end of the sequence.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.cursor >= self.seq.len()
    }

    /// Decodes the code point under the cursor without moving it.
    pub fn current(&self) -> Result<u32, DecodingError> {
        let mut cursor = self.cursor;
        U::decode_next(self.seq, &mut cursor)
            .map_err(|kind| DecodingError::new(kind, self.cursor))
    }

    /// Moves the cursor past the current code point.
    ///
    /// On error the cursor stays on the offending sequence.
    pub fn advance(&mut self) -> Result<&mut Self, DecodingError> {
        U::decode_next(self.seq, &mut self.cursor)
            .map_err(|kind| DecodingError::new(kind, self.cursor))?;
        Ok(self)
    }

    /// Moves the cursor past the current code point and returns the
    /// cursor as it was before the move.
    pub fn post_advance(&mut self) -> Result<Self, DecodingError> {
        let snapshot = *self;
        self.advance()?;
        Ok(snapshot)
    }

    /// An iterator over the code points from the cursor to the end.
    #[inline]
    pub const fn iter(&self) -> Iter<'a, U> {
        Iter { inner: *self }
    }
}

/// Two cursors are equal when they walk the same sequence and their
/// positions agree.
impl<U: Utf> PartialEq for CodePoints<'_, U> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.seq, other.seq) && self.cursor == other.cursor
    }
}

impl<U: Utf> Eq for CodePoints<'_, U> {}

/// Cursors over different sequences are unordered.
impl<U: Utf> PartialOrd for CodePoints<'_, U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        core::ptr::eq(self.seq, other.seq).then(|| self.cursor.cmp(&other.cursor))
    }
}

impl<'a, U: Utf> IntoIterator for CodePoints<'a, U> {
    type Item = Result<u32, DecodingError>;
    type IntoIter = Iter<'a, U>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter { inner: self }
    }
}

/// Iterator returned by [`CodePoints::iter`].
///
/// Yields each decoded code point. After the first error it is exhausted.
#[derive(Debug, Clone)]
pub struct Iter<'a, U: Utf> {
    inner: CodePoints<'a, U>,
}

impl<'a, U: Utf> Iter<'a, U> {
    /// The cursor at the next code point to be yielded.
    #[inline]
    pub const fn cursor(&self) -> CodePoints<'a, U> {
        self.inner
    }
}

impl<U: Utf> Iterator for Iter<'_, U> {
    type Item = Result<u32, DecodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = &mut self.inner;
        if inner.is_end() {
            return None;
        }
        let start = inner.cursor;
        match U::decode_next(inner.seq, &mut inner.cursor) {
            Ok(code_point) => Some(Ok(code_point)),
            Err(kind) => {
                inner.cursor = inner.seq.len();
                Some(Err(DecodingError::new(kind, start)))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.inner.seq.len().saturating_sub(self.inner.cursor);
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl<U: Utf> FusedIterator for Iter<'_, U> {}
