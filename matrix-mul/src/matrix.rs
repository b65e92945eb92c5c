//! Dense row-major matrices.

use std::ops::Range;

use crate::Error;

pub type Element = i64;

/// A dense row-major matrix of [`Element`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Element>,
}

impl Matrix {
    /// Allocates a `rows`×`cols` matrix with every element set to `value`.
    ///
    /// Fails with [`Error::Allocation`] instead of aborting when the memory
    /// is not available.
    pub fn filled(rows: usize, cols: usize, value: Element) -> Result<Self, Error> {
        let mut data = allocate(rows, cols)?;
        data.resize(rows * cols, value);
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        Self::filled(rows, cols, 0)
    }

    /// Allocates a matrix whose element `(i, j)` is `f(i, j)`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> Element,
    ) -> Result<Self, Error> {
        let mut data = allocate(rows, cols)?;
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Ok(Self { rows, cols, data })
    }

    pub fn from_rows(rows: Vec<Vec<Element>>) -> Result<Self, Error> {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut data = allocate(rows.len(), cols)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::Ragged {
                    row: i,
                    len: row.len(),
                    expected: cols,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> Element {
        self.data[i * self.cols + j]
    }

    pub fn row(&self, i: usize) -> &[Element] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// The contiguous storage of rows `range`.
    pub fn rows_mut(&mut self, range: Range<usize>) -> &mut [Element] {
        &mut self.data[range.start * self.cols..range.end * self.cols]
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.data
    }
}

fn allocate(rows: usize, cols: usize) -> Result<Vec<Element>, Error> {
    let len = rows
        .checked_mul(cols)
        .ok_or(Error::Allocation { rows, cols })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::Allocation { rows, cols })?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_and_indexed() {
        let mut m = Matrix::filled(3, 2, 7).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
        assert!(m.as_slice().iter().all(|&v| v == 7));

        m.rows_mut(1..3).copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(m.row(0), &[7, 7]);
        assert_eq!(m.row(2), &[3, 4]);
        assert_eq!(m.get(1, 1), 2);
    }

    #[test]
    fn from_fn_is_row_major() {
        let m = Matrix::from_fn(2, 3, |i, j| (i * 10 + j) as Element).unwrap();
        assert_eq!(m.as_slice(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(
            err,
            Error::Ragged {
                row: 1,
                len: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn impossible_sizes_fail_to_allocate() {
        assert!(matches!(
            Matrix::zeros(usize::MAX, 2),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            Matrix::zeros(1 << 40, 1 << 20),
            Err(Error::Allocation { .. })
        ));
    }
}
