//! Collaborator seams: what workers compute and how rounds are filled.

use std::ops::Range;

use crate::Result;

/// The computation a worker runs over its rows of a round.
///
/// `compute` runs without any lock held and must only read `input`; the band
/// it returns is handed to `write_back` under the round mutex. Row ranges of
/// different workers never overlap, so `write_back` touches disjoint parts of
/// the output.
pub trait Workload: Send + Sync + 'static {
    /// Data shared read-only with every worker for the round.
    type Input: Send + Sync + 'static;
    /// The round's result, zeroed at publication.
    type Output: Send + 'static;
    /// The slice of the output one worker produces.
    type Band: Send;

    fn compute(&self, input: &Self::Input, rows: Range<usize>) -> Self::Band;

    /// Stores a worker's band into the output.
    ///
    /// Runs with the round mutex held, so writes from different workers are
    /// serialized. Keep it to a copy; the real work belongs in `compute`.
    fn write_back(&self, output: &mut Self::Output, rows: Range<usize>, band: Self::Band);
}

/// Produces the input and a zeroed output for a round of a given size.
pub trait Generator<W: Workload>: Send {
    fn generate(&mut self, size: usize) -> Result<(W::Input, W::Output)>;
}

impl<W, F> Generator<W> for F
where
    W: Workload,
    F: FnMut(usize) -> Result<(W::Input, W::Output)> + Send,
{
    fn generate(&mut self, size: usize) -> Result<(W::Input, W::Output)> {
        self(size)
    }
}
