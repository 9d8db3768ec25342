//! Board module - one player's game, end to end
//!
//! The board owns the grid, the active piece (kind via the rotation tracker,
//! plus its offset), the generator, the hold slot and the score trackers,
//! and runs them as a small state machine:
//!
//! ```text
//! Spawning -> Falling -> Locked -> Spawning -> ...
//!     \
//!      -> GameOver (spawn point blocked)
//! ```
//!
//! Geometry questions go to [`collision`](crate::collision) and
//! [`ghost`](crate::ghost); grid mutation goes through
//! [`matrix`](crate::matrix). Illegal moves are `false`, never errors. Only
//! out-of-order lock processing (merging with no falling piece, clearing
//! before merging) is reported as an [`EngineError`].

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

use tetris_duel_types::{GameAction, PieceKind, SOFT_DROP_SCORE};

use crate::collision::{can_move_down, can_move_left, can_move_right, can_rotate, collides, Position};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::ghost::project_landing_row;
use crate::hold::{HoldManager, HoldOutcome};
use crate::matrix::{self, ClearResult, Matrix};
use crate::pieces::spawn_shape;
use crate::rng::PieceGenerator;
use crate::rotator::RotationTracker;
use crate::scoring::{calculate_clear_points, ComboTracker, LevelTracker, Score, ScoreListener};
use crate::snapshot::{GameSnapshot, PieceView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Waiting for the next piece
    Spawning,
    /// A piece is under player control
    Falling,
    /// The piece was merged; rows have not been cleared yet
    Locked,
    /// The spawn point was blocked
    GameOver,
}

/// Who asked for a one-row drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSource {
    /// Player soft drop, scored
    User,
    /// Timer tick, unscored
    Gravity,
}

/// A clear as scored by the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    pub clear: ClearResult,
    /// Points added to the score for this clear
    pub points: u32,
    /// Combo after this lock
    pub combo: i32,
    /// Level after this lock
    pub level: u32,
}

impl ClearReport {
    pub fn lines_removed(&self) -> usize {
        self.clear.lines_removed
    }
}

/// Full lock processing: merge, clear, respawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockReport {
    pub clear: ClearReport,
    /// The next piece could not spawn
    pub topped_out: bool,
}

/// Result of one input verb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The verb changed something
    pub accepted: bool,
    /// Present when the verb ended in a lock
    pub lock: Option<LockReport>,
    /// Piece view after the verb, for redraw
    pub view: Option<PieceView>,
}

#[derive(Debug)]
pub struct Board {
    config: EngineConfig,
    matrix: Matrix,
    generator: PieceGenerator,
    rotator: RotationTracker,
    offset: Position,
    hold: HoldManager,
    level: LevelTracker,
    combo: ComboTracker,
    score: Score,
    phase: Phase,
}

impl Board {
    /// Empty board waiting in [`Phase::Spawning`]; call
    /// [`Board::new_game`] or [`Board::create_new_brick`] to start.
    pub fn new(config: EngineConfig) -> Self {
        let seed = config.resolve_seed();
        debug!(seed, width = config.width, height = config.height, "board created");
        Self {
            matrix: Matrix::new(config.height, config.width),
            generator: PieceGenerator::new(seed),
            rotator: RotationTracker::new(),
            offset: Self::spawn_position(&config),
            hold: HoldManager::new(),
            level: LevelTracker::new(),
            combo: ComboTracker::new(),
            score: Score::new(),
            phase: Phase::Spawning,
            config,
        }
    }

    fn spawn_position(config: &EngineConfig) -> Position {
        Position::new(config.spawn.col, config.spawn.row)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_falling(&self) -> bool {
        self.phase == Phase::Falling
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }

    pub fn lines(&self) -> u32 {
        self.level.total_lines()
    }

    pub fn lines_until_next_level(&self) -> u32 {
        self.level.lines_until_next_level()
    }

    pub fn combo(&self) -> i32 {
        self.combo.combo()
    }

    pub fn combo_text(&self) -> String {
        self.combo.combo_text()
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.hold.held()
    }

    pub fn can_hold(&self) -> bool {
        self.hold.can_hold()
    }

    pub fn active_piece(&self) -> Option<PieceKind> {
        self.rotator.piece().ok()
    }

    pub fn next_piece(&self) -> PieceKind {
        self.generator.peek_next()
    }

    pub fn offset(&self) -> Position {
        self.offset
    }

    /// Gravity interval for the current level and difficulty
    ///
    /// Read before arming each tick; a change applies from the next tick.
    pub fn drop_interval(&self) -> Duration {
        self.level.drop_interval(self.config.difficulty)
    }

    pub fn add_score_listener(&mut self, listener: Box<dyn ScoreListener>) {
        self.score.add_listener(listener);
    }

    /// Independent copy of the grid
    pub fn matrix(&self) -> Matrix {
        matrix::copy(&self.matrix)
    }

    /// Borrow the grid without copying
    pub fn matrix_ref(&self) -> &Matrix {
        &self.matrix
    }

    /// Direct grid access, for setting up positions
    pub fn matrix_mut(&mut self) -> &mut Matrix {
        &mut self.matrix
    }

    fn active_shape(&self) -> Option<Matrix> {
        if self.phase != Phase::Falling {
            return None;
        }
        self.rotator.current_shape().ok()
    }

    /// Renderer view of the falling piece
    pub fn view(&self) -> Option<PieceView> {
        let shape = self.active_shape()?;
        let ghost_row = project_landing_row(&self.matrix, &shape, self.offset);
        Some(PieceView {
            shape,
            col: self.offset.col,
            row: self.offset.row,
            next_shape: spawn_shape(self.generator.peek_next()),
            ghost_row,
        })
    }

    /// Row the active piece would land on
    pub fn ghost_row(&self) -> Option<i32> {
        self.view().map(|v| v.ghost_row)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            matrix: self.matrix(),
            piece: self.view(),
            held: self.hold.held().map(spawn_shape),
            can_hold: self.hold.can_hold(),
            score: self.score.value(),
            level: self.level.level(),
            lines: self.level.total_lines(),
            combo: self.combo.combo(),
            game_over: self.is_game_over(),
        }
    }

    /// Put `kind` at the spawn anchor in rotation 0
    ///
    /// Returns true (and ends the game) when it collides there.
    fn place_at_spawn(&mut self, kind: PieceKind) -> bool {
        self.rotator.set_piece(kind);
        self.offset = Self::spawn_position(&self.config);
        let shape = spawn_shape(kind);
        if collides(&self.matrix, &shape, self.offset.col, self.offset.row) {
            self.phase = Phase::GameOver;
            info!(?kind, score = self.score.value(), "spawn blocked, game over");
            return true;
        }
        self.phase = Phase::Falling;
        debug!(?kind, col = self.offset.col, row = self.offset.row, "piece spawned");
        false
    }

    /// Spawn the next generator piece; true means the spawn failed
    pub fn create_new_brick(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return true;
        }
        let kind = self.generator.draw();
        self.hold.reset_lock();
        self.place_at_spawn(kind)
    }

    fn try_shift(&mut self, dcol: i32, drow: i32) -> bool {
        let Some(shape) = self.active_shape() else {
            return false;
        };
        let allowed = match (dcol, drow) {
            (-1, 0) => can_move_left(&self.matrix, &shape, self.offset),
            (1, 0) => can_move_right(&self.matrix, &shape, self.offset),
            (0, 1) => can_move_down(&self.matrix, &shape, self.offset),
            _ => false,
        };
        if allowed {
            self.offset = self.offset.translate(dcol, drow);
        }
        allowed
    }

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    /// One row down; false means the piece has landed
    pub fn move_down(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    /// Advance to the next rotation state in place
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Ok(candidate) = self.rotator.next_shape_candidate() else {
            return false;
        };
        if !can_rotate(&self.matrix, &candidate.shape, self.offset) {
            return false;
        }
        self.rotator.commit_rotation(candidate.index).is_ok()
    }

    /// Swap the active piece with the hold slot
    ///
    /// The incoming piece restarts from the spawn anchor in rotation 0,
    /// whatever the outgoing piece's position was.
    pub fn hold_current_piece(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Ok(current) = self.rotator.piece() else {
            return false;
        };
        match self.hold.hold(current) {
            HoldOutcome::Rejected => false,
            HoldOutcome::Accepted(previous) => {
                let incoming = previous.unwrap_or_else(|| self.generator.draw());
                debug!(held = ?current, ?incoming, "hold");
                self.place_at_spawn(incoming);
                true
            }
        }
    }

    /// Write the falling piece into the grid
    pub fn merge_to_background(&mut self) -> Result<(), EngineError> {
        if self.phase != Phase::Falling {
            return Err(EngineError::InvalidPhase {
                expected: Phase::Falling,
                actual: self.phase,
            });
        }
        let shape = self.rotator.current_shape()?;
        self.matrix = matrix::merge(&self.matrix, &shape, self.offset.col, self.offset.row);
        self.rotator.clear();
        self.phase = Phase::Locked;
        debug!(col = self.offset.col, row = self.offset.row, "piece merged");
        Ok(())
    }

    /// Compact full rows and score the lock
    ///
    /// Level, combo and score are all updated here, so every lock path
    /// scores the same way.
    pub fn clear_rows(&mut self) -> Result<ClearReport, EngineError> {
        if self.phase != Phase::Locked {
            return Err(EngineError::InvalidPhase {
                expected: Phase::Locked,
                actual: self.phase,
            });
        }
        let clear = matrix::detect_and_compact(&self.matrix);
        self.matrix = matrix::copy(&clear.matrix);
        self.phase = Phase::Spawning;

        let lines = clear.lines_removed;
        self.combo.on_piece_locked(lines);
        let mut points = 0;
        if lines > 0 {
            let level_changed = self.level.add_cleared_lines(lines as u32);
            points = calculate_clear_points(
                clear.score_bonus,
                self.level.level(),
                self.config.difficulty,
                self.combo.combo(),
            );
            self.score.add(points, lines);
            if level_changed {
                info!(level = self.level.level(), "level up");
                self.score.notify_level(self.level.level());
            }
            if self.combo.has_active_combo() {
                self.score.notify_combo(self.combo.combo());
            }
            debug!(lines, points, combo = self.combo.combo(), "rows cleared");
        }

        Ok(ClearReport {
            clear,
            points,
            combo: self.combo.combo(),
            level: self.level.level(),
        })
    }

    /// Merge, clear and respawn as one step
    pub fn lock_piece(&mut self) -> Result<LockReport, EngineError> {
        self.merge_to_background()?;
        let clear = self.clear_rows()?;
        let topped_out = self.create_new_brick();
        Ok(LockReport { clear, topped_out })
    }

    fn outcome(&self, accepted: bool, lock: Option<LockReport>) -> ActionOutcome {
        ActionOutcome {
            accepted,
            lock,
            view: self.view(),
        }
    }

    /// One row down without locking; user drops score per row
    ///
    /// Returns false when the piece has landed and must be locked.
    pub fn step_down(&mut self, source: DropSource) -> bool {
        let moved = self.move_down();
        if moved && source == DropSource::User {
            self.score.add(SOFT_DROP_SCORE, 0);
        }
        moved
    }

    /// One row down, locking when the piece has landed
    pub fn soft_drop(&mut self, source: DropSource) -> Result<ActionOutcome, EngineError> {
        if self.phase != Phase::Falling {
            return Ok(self.outcome(false, None));
        }
        if self.step_down(source) {
            return Ok(self.outcome(true, None));
        }
        let lock = self.lock_piece()?;
        Ok(self.outcome(true, Some(lock)))
    }

    /// Drop to the landing row and lock, without yielding in between
    pub fn hard_drop(&mut self) -> Result<ActionOutcome, EngineError> {
        if self.phase != Phase::Falling {
            return Ok(self.outcome(false, None));
        }
        while self.move_down() {}
        let lock = self.lock_piece()?;
        Ok(self.outcome(true, Some(lock)))
    }

    /// Gravity step
    pub fn tick(&mut self) -> Result<ActionOutcome, EngineError> {
        self.soft_drop(DropSource::Gravity)
    }

    /// Route one input verb
    pub fn apply(&mut self, action: GameAction) -> Result<ActionOutcome, EngineError> {
        let accepted = match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold_current_piece(),
            GameAction::SoftDrop => return self.soft_drop(DropSource::User),
            GameAction::HardDrop => return self.hard_drop(),
            GameAction::Tick => return self.tick(),
            GameAction::NewGame => {
                self.new_game();
                true
            }
        };
        Ok(self.outcome(accepted, None))
    }

    /// Clear everything and spawn the first piece
    ///
    /// The generator keeps its sequence; score listeners stay registered.
    pub fn new_game(&mut self) {
        self.matrix.clear();
        self.score.reset();
        self.level.reset();
        self.combo.reset();
        self.hold.reset();
        self.rotator.clear();
        self.phase = Phase::Spawning;
        info!("new game");
        self.create_new_brick();
    }
}
