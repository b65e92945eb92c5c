//! Row-banded square matrix multiplication.

use std::ops::Range;

use clap::ValueEnum;
use rounds::Workload;

use crate::Error;
use crate::matrix::{Element, Matrix};

/// The two factors of a round's product `C = A × B`.
#[derive(Debug, Clone)]
pub struct Operands {
    a: Matrix,
    b: Matrix,
}

impl Operands {
    /// Pairs two square matrices of the same size.
    pub fn new(a: Matrix, b: Matrix) -> Result<Self, Error> {
        let n = a.rows();
        if a.cols() != n || b.rows() != n || b.cols() != n {
            return Err(Error::DimensionMismatch(a.rows(), a.cols(), b.rows(), b.cols()));
        }
        Ok(Self { a, b })
    }

    pub fn size(&self) -> usize {
        self.a.rows()
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }
}

/// Multiplication algorithm run by each worker over its rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Kernel {
    /// Textbook i-j-k loops; walks B by column.
    #[default]
    Naive,
    /// i-k-j loops; walks B by row, which is friendlier to the cache.
    RowStream,
}

impl Kernel {
    /// Computes rows `rows` of `A × B`, row-major.
    ///
    /// Arithmetic wraps on overflow, like fixed-width integer matrices do, so
    /// a worker never panics part way through its band.
    pub fn multiply_rows(self, operands: &Operands, rows: Range<usize>) -> Vec<Element> {
        let n = operands.size();
        let (a, b) = (operands.a(), operands.b());
        let mut band = vec![0; rows.len() * n];

        for (out, i) in band.chunks_exact_mut(n.max(1)).zip(rows) {
            let a_row = a.row(i);
            match self {
                Kernel::Naive => {
                    for (j, cell) in out.iter_mut().enumerate() {
                        let mut sum = 0;
                        for (k, &a_ik) in a_row.iter().enumerate() {
                            sum = a_ik.wrapping_mul(b.get(k, j)).wrapping_add(sum);
                        }
                        *cell = sum;
                    }
                }
                Kernel::RowStream => {
                    for (k, &a_ik) in a_row.iter().enumerate() {
                        for (cell, &b_kj) in out.iter_mut().zip(b.row(k)) {
                            *cell = cell.wrapping_add(a_ik.wrapping_mul(b_kj));
                        }
                    }
                }
            }
        }

        band
    }
}

impl Workload for Kernel {
    type Input = Operands;
    type Output = Matrix;
    type Band = Vec<Element>;

    fn compute(&self, input: &Operands, rows: Range<usize>) -> Vec<Element> {
        self.multiply_rows(input, rows)
    }

    fn write_back(&self, output: &mut Matrix, rows: Range<usize>, band: Vec<Element>) {
        output.rows_mut(rows).copy_from_slice(&band);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operands(a: Vec<Vec<Element>>, b: Vec<Vec<Element>>) -> Operands {
        Operands::new(Matrix::from_rows(a).unwrap(), Matrix::from_rows(b).unwrap()).unwrap()
    }

    #[test]
    fn two_by_two_product() {
        let ops = operands(vec![vec![1, 2], vec![3, 4]], vec![vec![5, 6], vec![7, 8]]);
        for kernel in [Kernel::Naive, Kernel::RowStream] {
            assert_eq!(kernel.multiply_rows(&ops, 0..2), vec![19, 22, 43, 50]);
            assert_eq!(kernel.multiply_rows(&ops, 1..2), vec![43, 50]);
            assert!(kernel.multiply_rows(&ops, 1..1).is_empty());
        }
    }

    #[test]
    fn overflowing_products_wrap() {
        let big = Element::MAX;
        let ops = operands(vec![vec![big, big], vec![1, 1]], vec![vec![big, 1], vec![big, 1]]);
        let expected = vec![
            big.wrapping_mul(big).wrapping_add(big.wrapping_mul(big)),
            big.wrapping_add(big),
            big.wrapping_add(big),
            2,
        ];

        for kernel in [Kernel::Naive, Kernel::RowStream] {
            assert_eq!(kernel.multiply_rows(&ops, 0..2), expected);
        }
    }

    #[test]
    fn rejects_non_square_operands() {
        let a = Matrix::zeros(2, 3).unwrap();
        let b = Matrix::zeros(3, 2).unwrap();
        assert!(matches!(
            Operands::new(a, b),
            Err(Error::DimensionMismatch(2, 3, 3, 2))
        ));
    }

    #[test]
    fn band_lands_on_its_rows() {
        let ops = operands(vec![vec![1, 0], vec![0, 1]], vec![vec![1, 2], vec![3, 4]]);
        let mut c = Matrix::zeros(2, 2).unwrap();

        let band = Kernel::Naive.compute(&ops, 1..2);
        Kernel::Naive.write_back(&mut c, 1..2, band);

        assert_eq!(c.as_slice(), &[0, 0, 3, 4]);
    }
}
