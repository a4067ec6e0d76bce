//! Search constants.

/// Bound used for the initial alpha-beta window.
pub const SCORE_INFINITY: i32 = 10_000_000;

/// Killer slots kept per ply.
pub const KILLERS_PER_PLY: usize = 2;

/// Progress is reported as a whole percentage.
pub const PROGRESS_SCALE: f64 = 100.0;
