use std::fmt;

use crate::bits::{BitVector, IndexOutOfRange};

/// Fixed-size `rows × columns` boolean grid.
///
/// Cells are flattened row-major into a single [`BitVector`] of exactly
/// `rows * columns` bits: cell `(r, c)` is bit `r * columns + c`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitMatrix {
    rows: usize,
    columns: usize,
    bits: BitVector,
}

impl BitMatrix {
    /// Panics if `rows * columns` overflows `usize`.
    pub fn new(rows: usize, columns: usize) -> Self {
        let cells = rows
            .checked_mul(columns)
            .unwrap_or_else(|| panic!("matrix dimensions overflow: {rows} x {columns}"));
        Self {
            rows,
            columns,
            bits: BitVector::new(cells),
        }
    }

    /// Square `n × n` matrix, the shape of every adjacency store.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Row and column are checked independently, so `(0, columns)` is
    /// rejected even though its flat offset would land inside the store.
    fn offset(&self, row: usize, column: usize) -> Result<usize, IndexOutOfRange> {
        if row >= self.rows {
            return Err(IndexOutOfRange {
                index: row,
                len: self.rows,
            });
        }
        if column >= self.columns {
            return Err(IndexOutOfRange {
                index: column,
                len: self.columns,
            });
        }
        Ok(row * self.columns + column)
    }

    pub fn try_get(&self, row: usize, column: usize) -> Result<bool, IndexOutOfRange> {
        let at = self.offset(row, column)?;
        self.bits.try_get(at)
    }

    pub fn try_set(&mut self, row: usize, column: usize, value: bool) -> Result<(), IndexOutOfRange> {
        let at = self.offset(row, column)?;
        self.bits.try_set(at, value)
    }

    /// # Panics
    /// If `row >= rows` or `column >= columns`.
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.try_get(row, column).unwrap_or_else(|e| panic!("{e}"))
    }

    /// # Panics
    /// If `row >= rows` or `column >= columns`.
    pub fn set(&mut self, row: usize, column: usize, value: bool) {
        self.try_set(row, column, value)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Clear every cell; dimensions are unchanged.
    pub fn reset(&mut self) {
        self.bits.reset();
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Set cells as `(row, column)`, in row-major order.
    pub fn iter_ones(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.columns;
        self.bits
            .iter_ones()
            .map(move |at| (at / columns, at % columns))
    }

    /// Columns set in `row`, ascending.
    ///
    /// # Panics
    /// If `row >= rows`.
    pub fn row_ones(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        let start = row * self.columns;
        self.bits
            .iter_ones_in(start..start + self.columns)
            .map(move |at| at - start)
    }

    /// Copy every set cell into the top-left block of `target`.
    ///
    /// # Panics
    /// If `target` is smaller than `self` in either dimension.
    pub fn copy_into(&self, target: &mut BitMatrix) {
        assert!(
            target.rows >= self.rows && target.columns >= self.columns,
            "cannot copy a {}x{} matrix into a {}x{} matrix",
            self.rows,
            self.columns,
            target.rows,
            target.columns
        );
        for (r, c) in self.iter_ones() {
            target.set(r, c, true);
        }
    }

    /// Flip every cell in place.
    pub fn invert(&mut self) {
        self.bits.invert();
    }

    /// Cellwise AND. Panics on a dimension mismatch.
    pub fn and_assign(&mut self, other: &BitMatrix) {
        self.assert_same_shape(other);
        self.bits.and_assign(&other.bits);
    }

    /// Cellwise OR. Panics on a dimension mismatch.
    pub fn or_assign(&mut self, other: &BitMatrix) {
        self.assert_same_shape(other);
        self.bits.or_assign(&other.bits);
    }

    /// Cellwise AND-NOT. Panics on a dimension mismatch.
    pub fn and_not_assign(&mut self, other: &BitMatrix) {
        self.assert_same_shape(other);
        self.bits.and_not_assign(&other.bits);
    }

    fn assert_same_shape(&self, other: &BitMatrix) {
        assert!(
            self.rows == other.rows && self.columns == other.columns,
            "matrix dimensions differ: {}x{} vs {}x{}",
            self.rows,
            self.columns,
            other.rows,
            other.columns
        );
    }

    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage()
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitMatrix {}x{}", self.rows, self.columns)?;
        for r in 0..self.rows {
            let row: String = (0..self.columns)
                .map(|c| if self.get(r, c) { '1' } else { '0' })
                .collect();
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}
