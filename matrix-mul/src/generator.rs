//! Fill policies producing each round's operands.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rounds::Generator;

use crate::Error;
use crate::matrix::{Element, Matrix};
use crate::matrix_mul::{Kernel, Operands};

/// How A and B are filled at the start of every round.
#[derive(Debug, Clone)]
pub enum Fill {
    /// Every element of A is `a`, every element of B is `b`.
    Constant { a: Element, b: Element },
    /// Uniform values in `0..=max`, drawn from one generator across rounds.
    Random { rng: StdRng, max: Element },
}

impl Fill {
    /// A filled with ones and B with twos, so every element of `C` is `2·N`.
    pub fn ones_and_twos() -> Self {
        Fill::Constant { a: 1, b: 2 }
    }

    /// Random fill; a fixed `seed` makes every run produce the same rounds.
    ///
    /// A negative `max` is treated as 0. The command line rejects it before
    /// it gets here.
    pub fn random(seed: Option<u64>, max: Element) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Fill::Random { rng, max }
    }

    /// Allocates operands of `size` and a zeroed result matrix.
    pub fn operands(&mut self, size: usize) -> Result<(Operands, Matrix), Error> {
        let (a, b) = match self {
            Fill::Constant { a, b } => (
                Matrix::filled(size, size, *a)?,
                Matrix::filled(size, size, *b)?,
            ),
            Fill::Random { rng, max } => {
                let max = (*max).max(0);
                (
                    Matrix::from_fn(size, size, |_, _| rng.gen_range(0..=max))?,
                    Matrix::from_fn(size, size, |_, _| rng.gen_range(0..=max))?,
                )
            }
        };
        let c = Matrix::zeros(size, size)?;
        Ok((Operands::new(a, b)?, c))
    }
}

impl Default for Fill {
    fn default() -> Self {
        Self::ones_and_twos()
    }
}

impl Generator<Kernel> for Fill {
    fn generate(&mut self, size: usize) -> rounds::Result<(Operands, Matrix)> {
        self.operands(size).map_err(|e| rounds::Error::Generate {
            size,
            source: Box::new(e),
        })
    }
}
