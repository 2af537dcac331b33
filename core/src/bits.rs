use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// Storage word for packed bits.
pub type Word = u64;

/// Bits per storage word. Bit `i` lives in word `i / WORD_BITS` at offset `i % WORD_BITS`.
pub const WORD_BITS: usize = Word::BITS as usize;

/// An index outside the logical length of a packed store.
///
/// Reaching this from the runtime entry points means a validation step was
/// skipped, so the panicking accessors treat it as a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index out of range: the len is {len} but the index is {index}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Fixed-length bit-packed boolean sequence.
///
/// Padding bits past `len` in the last word are kept at zero by every
/// operation, so the derived equality and hash are structural.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    len: usize,
    words: Vec<Word>,
}

impl BitVector {
    /// All-false vector of `len` bits. `len == 0` is an empty vector.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            words: vec![0; len.div_ceil(WORD_BITS)],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn locate(index: usize) -> (usize, Word) {
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }

    #[inline]
    fn check(&self, index: usize) -> Result<(), IndexOutOfRange> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    pub fn try_get(&self, index: usize) -> Result<bool, IndexOutOfRange> {
        self.check(index)?;
        let (word, mask) = Self::locate(index);
        Ok(self.words[word] & mask != 0)
    }

    pub fn try_set(&mut self, index: usize, value: bool) -> Result<(), IndexOutOfRange> {
        self.check(index)?;
        let (word, mask) = Self::locate(index);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
        Ok(())
    }

    /// Read bit `index`.
    ///
    /// # Panics
    /// If `index >= len`.
    pub fn get(&self, index: usize) -> bool {
        self.try_get(index).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Write bit `index`.
    ///
    /// # Panics
    /// If `index >= len`.
    pub fn set(&mut self, index: usize, value: bool) {
        self.try_set(index, value).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Clear every bit. Length is unchanged.
    pub fn reset(&mut self) {
        self.words.fill(0);
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.iter_ones_in(0..self.len)
    }

    /// Indices of set bits within `range`, ascending. Skips whole zero words.
    ///
    /// # Panics
    /// If `range` is inverted or ends past `len`.
    pub fn iter_ones_in(&self, range: Range<usize>) -> impl Iterator<Item = usize> + '_ {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "range {:?} out of bounds for length {}",
            range,
            self.len
        );
        let Range { start, end } = range;

        (start / WORD_BITS..end.div_ceil(WORD_BITS)).flat_map(move |wi| {
            let base = wi * WORD_BITS;
            let mut rest = self.words[wi];
            if base < start {
                rest &= Word::MAX << (start - base);
            }
            if end < base + WORD_BITS {
                rest &= (1 << (end - base)) - 1;
            }
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let offset = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(base + offset)
            })
        })
    }

    /// Flip every bit in place.
    pub fn invert(&mut self) {
        for w in &mut self.words {
            *w = !*w;
        }
        self.mask_tail();
    }

    /// `self &= other`.
    ///
    /// # Panics
    /// If the lengths differ.
    pub fn and_assign(&mut self, other: &BitVector) {
        self.zip_words(other, |a, b| a & b);
    }

    /// `self |= other`.
    ///
    /// # Panics
    /// If the lengths differ.
    pub fn or_assign(&mut self, other: &BitVector) {
        self.zip_words(other, |a, b| a | b);
    }

    /// `self &= !other`.
    ///
    /// # Panics
    /// If the lengths differ.
    pub fn and_not_assign(&mut self, other: &BitVector) {
        self.zip_words(other, |a, b| a & !b);
    }

    fn zip_words(&mut self, other: &BitVector, op: impl Fn(Word, Word) -> Word) {
        assert_eq!(
            self.len, other.len,
            "bitwise operation on vectors of different lengths"
        );
        for (a, &b) in self.words.iter_mut().zip(&other.words) {
            *a = op(*a, b);
        }
    }

    fn mask_tail(&mut self) {
        let used = self.len % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1 << used) - 1;
            }
        }
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        self.words.len() * std::mem::size_of::<Word>()
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: String = (0..self.len)
            .map(|i| if self.get(i) { '1' } else { '0' })
            .collect();
        f.debug_struct("BitVector")
            .field("len", &self.len)
            .field("bits", &bits)
            .finish()
    }
}
