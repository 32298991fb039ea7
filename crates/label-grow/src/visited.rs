//! Per-call visited marks for paint-over fills.

use crate::error::{GrowError, GrowResult};

const WORD_BITS: usize = u64::BITS as usize;

/// One bit per cell of the active view.
///
/// Lives for a single fill call only; marks never carry over, so a later
/// call can revisit and relabel the same cells.
#[derive(Debug, Clone)]
pub struct VisitedMask {
    words: Vec<u64>,
    cells: usize,
}

impl VisitedMask {
    /// Allocates a cleared mask for `cells` cells.
    ///
    /// # Errors
    ///
    /// Returns [`GrowError::Allocation`] if the allocator refuses the request.
    pub fn try_new(cells: usize) -> GrowResult<Self> {
        let len = cells.div_ceil(WORD_BITS);
        let mut words = Vec::new();
        words
            .try_reserve_exact(len)
            .map_err(|source| GrowError::Allocation { cells, source })?;
        words.resize(len, 0);
        Ok(Self { words, cells })
    }

    /// Marks `cell`, returning `true` if it was not marked before.
    /// Cells past the end are ignored and report `false`.
    pub fn mark(&mut self, cell: usize) -> bool {
        if cell >= self.cells {
            return false;
        }
        let Some(word) = self.words.get_mut(cell / WORD_BITS) else {
            return false;
        };
        let fresh = *word & bit(cell) == 0;
        *word |= bit(cell);
        fresh
    }
}

const fn bit(cell: usize) -> u64 {
    1 << (cell % WORD_BITS)
}
