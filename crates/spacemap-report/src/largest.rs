//! Top-K selection over the full scanned tree.

use spacemap_core::{FileTree, LargestEntry};
use thiserror::Error;

/// Errors from [`largest`].
#[derive(Debug, Error)]
pub enum LargestError {
    /// The scan kept fewer entries than the request needs.
    #[error(
        "{requested} largest entries requested but the scan kept only {tracked} of {candidates}; \
         set ScanConfig::largest_count to at least {requested}"
    )]
    NotTracked {
        requested: usize,
        tracked: usize,
        candidates: u64,
    },
}

/// Return the `k` largest entries of the tree, largest first, ties broken
/// by path ascending.
///
/// Candidates are every file and directory below the root, including those
/// beyond the display depth. The result always has `min(k, candidates)`
/// entries. Candidates are ranked during the scan, which keeps only
/// [`ScanConfig::largest_count`](spacemap_core::ScanConfig::largest_count)
/// of them, so asking for more than were kept while more exist fails with
/// [`LargestError::NotTracked`].
pub fn largest(tree: &FileTree, k: usize) -> Result<&[LargestEntry], LargestError> {
    let candidates = tree.stats.largest_candidates;
    let wanted = usize::try_from(candidates).map_or(k, |c| c.min(k));
    let tracked = tree.largest.len();

    if wanted > tracked {
        return Err(LargestError::NotTracked {
            requested: k,
            tracked,
            candidates,
        });
    }
    Ok(&tree.largest[..wanted])
}
