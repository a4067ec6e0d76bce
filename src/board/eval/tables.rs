//! Evaluation constants and tables.
//!
//! Tables are indexed `[file][rank]` and symmetric under a rank flip, so the
//! same entry serves both colors.

// ============================================================================
// TERMINAL SCORES
// ============================================================================

/// Score of a delivered mate at the root.
pub const MATE_VALUE: i32 = 100_000;

/// Subtracted per ply so a faster mate scores higher.
pub const MATE_PLY_PENALTY: i32 = 10;

/// Small bonus for the side giving check.
pub const CHECK_BONUS: i32 = 15;

// ============================================================================
// PHASES
// ============================================================================

/// Game plies that count as the opening.
pub const OPENING_PLIES: u32 = 15;

/// Non-king material above which a side keeps the game in the middle game.
pub const MIDDLE_GAME_MATERIAL: i32 = 2400;

/// Non-king material of one side in the starting position.
pub const STARTING_MATERIAL: i32 = 4000;

// ============================================================================
// MATERIAL
// ============================================================================

/// The lead is scaled up by `traded / TRADE_DOWN_DIVISOR` of itself.
pub const TRADE_DOWN_DIVISOR: i32 = 4 * STARTING_MATERIAL;

// ============================================================================
// CENTRAL CONTROL
// ============================================================================

pub const CENTRE_OPENING: [[i32; 8]; 8] = [
    [0, 0, 1, 2, 2, 1, 0, 0],
    [0, 1, 3, 4, 4, 3, 1, 0],
    [1, 3, 5, 6, 6, 5, 3, 1],
    [2, 4, 6, 9, 9, 6, 4, 2],
    [2, 4, 6, 9, 9, 6, 4, 2],
    [1, 3, 5, 6, 6, 5, 3, 1],
    [0, 1, 3, 4, 4, 3, 1, 0],
    [0, 0, 1, 2, 2, 1, 0, 0],
];

pub const CENTRE_MIDDLE: [[i32; 8]; 8] = [
    [0, 1, 2, 2, 2, 2, 1, 0],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 5, 6, 6, 5, 3, 2],
    [2, 4, 6, 7, 7, 6, 4, 2],
    [2, 4, 6, 7, 7, 6, 4, 2],
    [2, 3, 5, 6, 6, 5, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [0, 1, 2, 2, 2, 2, 1, 0],
];

pub const CENTRE_END: [[i32; 8]; 8] = [
    [0, 1, 2, 3, 3, 2, 1, 0],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [2, 3, 4, 5, 5, 4, 3, 2],
    [3, 4, 5, 6, 6, 5, 4, 3],
    [3, 4, 5, 6, 6, 5, 4, 3],
    [2, 3, 4, 5, 5, 4, 3, 2],
    [1, 2, 3, 4, 4, 3, 2, 1],
    [0, 1, 2, 3, 3, 2, 1, 0],
];

/// Weight of the centre table per piece kind (pawn, knight, bishop, rook,
/// queen, king) per phase.
pub const CENTRE_WEIGHTS: [[i32; 6]; 4] = [
    // Opening: develop minors, keep the king home
    [3, 4, 2, 0, 0, -3],
    // Middle game
    [2, 3, 2, 1, 1, -2],
    // End game with pawns
    [1, 2, 2, 1, 1, 0],
    // End game with pieces
    [1, 3, 2, 2, 2, 0],
];

// ============================================================================
// KING SAFETY
// ============================================================================

/// Bonus per own piece at Chebyshev distance 1, 2 or 3 from the enemy king.
pub const KING_PRESSURE: [i32; 4] = [0, 12, 8, 3];

/// Bonus per own pawn directly in front of a king on its back ranks.
pub const PAWN_SHIELD_BONUS: i32 = 8;

/// Endgame king centralization weight (times the end centre table).
pub const KING_CENTRE_WEIGHT: i32 = 4;

/// Bonus per step the leading king is closer than the maximum distance.
pub const KING_PROXIMITY_WEIGHT: i32 = 6;

// ============================================================================
// PAWNS
// ============================================================================

/// Passed pawn bonus by relative rank.
pub const PASSED_PAWN_ADVANCE: [i32; 8] = [0, 10, 15, 25, 40, 65, 100, 0];

/// A passed pawn the enemy king cannot catch in a pawn ending.
pub const UNSTOPPABLE_PAWN_BONUS: i32 = 600;

pub const ROOK_BEHIND_PASSER: i32 = 20;

pub const DOUBLED_PAWN_PENALTY: i32 = 15;

/// Per wing pawn (files a, b, g, h) moved in the opening.
pub const WING_PAWN_PENALTY: i32 = 10;

// ============================================================================
// MISC
// ============================================================================

pub const CASTLED_BONUS: i32 = 30;

/// Per pseudo-legal move of a minor or major piece.
pub const MOBILITY_WEIGHT: i32 = 2;

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Stand-in value of the king as an attacker when ordering captures.
pub const KING_ORDER_VALUE: i32 = 1000;

pub const MATE_ORDER_BONUS: i32 = 1_000_000;

pub const CHECK_ORDER_BONUS: i32 = 500;

/// Per point of the end centre table on the capture square.
pub const CENTRE_CAPTURE_WEIGHT: i32 = 5;
