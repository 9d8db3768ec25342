//! Shared vocabulary for the engine, the versus arbiter and their consumers
//!
//! Everything here is plain data with no external dependencies, so the same
//! types can be used by the rules engine, a renderer, or an input driver.
//!
//! # Board Geometry
//!
//! The grid is indexed `[row][col]`, row 0 at the top:
//!
//! - **Width**: 10 columns
//! - **Height**: 25 rows, the first 2 of which are a hidden spawn buffer
//! - **Spawn anchor**: column 4, row 10 (top-left corner of the 4x4 piece box)
//!
//! # Level Curve
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINES_PER_LEVEL` | 10 | Cleared lines per level step |
//! | `SPEED_STEP_MS` | 50 | Drop interval reduction per level |
//! | `MIN_DROP_MS` | 100 | Fastest possible drop interval |
//!
//! # Examples
//!
//! ```
//! use tetris_duel_types::{GameAction, PieceKind, PlayerId};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.color(), 6);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(PlayerId::One.opponent(), PlayerId::Two);
//! ```

/// Default board width in columns
pub const BOARD_WIDTH: usize = 10;

/// Default board height in rows, buffer rows included
pub const BOARD_HEIGHT: usize = 25;

/// Hidden rows above the visible play field
pub const BUFFER_ROWS: usize = 2;

/// Column of the spawn anchor
pub const SPAWN_COL: i32 = 4;

/// Row of the spawn anchor
pub const SPAWN_ROW: i32 = 10;

/// Points for each user-initiated soft drop step
pub const SOFT_DROP_SCORE: u32 = 1;

/// Multiplier of the `count^2` row-clear bonus
pub const ROW_CLEAR_BASE: u32 = 50;

/// Combo bonus per combo step
pub const COMBO_BONUS_PER_STEP: u32 = 50;

/// Cleared lines per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Drop interval reduction per level (ms)
pub const SPEED_STEP_MS: u32 = 50;

/// Floor for the drop interval (ms)
pub const MIN_DROP_MS: u32 = 100;

/// Default maximum HP in versus mode
pub const DEFAULT_MAX_HP: u32 = 100;

/// Base attack damage indexed by lines cleared (index 0 unused)
pub const BASE_DAMAGE: [u32; 5] = [0, 1, 3, 5, 8];

/// The seven tetromino kinds
///
/// The discriminant order is the catalog order; `color()` is the cell value
/// a locked block of this kind leaves on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Cell value written by this kind (1..=7)
    pub fn color(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color`]
    pub fn from_color(color: u8) -> Option<Self> {
        match color {
            1..=7 => Some(Self::ALL[(color - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Verbs an input source may send to a board
///
/// `Tick` is the gravity step issued by the external timer; every other
/// variant maps to a keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (+1 point when it moves)
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Advance to the next rotation state
    Rotate,
    /// Store the active piece, swapping with the held one
    Hold,
    /// Gravity step (no drop points)
    Tick,
    /// Reset the board and start over
    NewGame,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_duel_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "tick" => Some(GameAction::Tick),
            "newgame" => Some(GameAction::NewGame),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Tick => "tick",
            GameAction::NewGame => "newGame",
        }
    }
}

/// One of the two versus players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// The other player
    pub fn opponent(&self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Zero-based slot used for per-player arrays
    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Parse `"1"`/`"2"` (or `"one"`/`"two"`)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1" | "one" => Some(PlayerId::One),
            "2" | "two" => Some(PlayerId::Two),
            _ => None,
        }
    }
}
