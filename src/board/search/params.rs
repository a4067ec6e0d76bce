#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Search configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams {
    /// Default depth budget in plies.
    pub depth: u32,
    /// Extend leaves with a captures-only search.
    pub quiescence: bool,
    /// Order root moves by a positional pre-pass and add it to their values.
    pub root_prepass: bool,
    pub use_transpositions: bool,
    pub use_killers: bool,
    /// Quiescence stand-pat returns only when it clears the window by this.
    pub delta_margin: i32,
    /// Transposition table size in megabytes.
    pub tt_mb: usize,
    /// Plies below the root that report nested progress.
    pub progress_depth: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            depth: 4,
            quiescence: true,
            root_prepass: true,
            use_transpositions: true,
            use_killers: true,
            delta_margin: 200,
            tt_mb: 16,
            progress_depth: 2,
        }
    }
}

impl SearchParams {
    /// Plain minimax with alpha-beta: no quiescence, pre-pass, cache or
    /// killers.
    #[must_use]
    pub fn plain() -> Self {
        SearchParams {
            quiescence: false,
            root_prepass: false,
            use_transpositions: false,
            use_killers: false,
            ..Self::default()
        }
    }
}
