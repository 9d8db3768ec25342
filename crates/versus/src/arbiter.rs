//! Two-player match arbitration
//!
//! The arbiter owns both boards and both health pools. Boards never see
//! each other; the only coupling is the damage routed here after a lock.
//! Lock processing for one player runs start to finish
//! (merge, clear, damage, respawn) inside a single call, so the other
//! player's input can never observe it half done.

use serde::Serialize;
use tracing::{debug, info};

use tetris_duel_core::{Board, ClearReport, DropSource, EngineConfig, EngineError, GameSnapshot, VersusConfig};
use tetris_duel_types::{GameAction, PlayerId};

use crate::attack::{attack_name, calculate_damage};
use crate::health::Health;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    NotStarted,
    InProgress,
    Won(PlayerId),
}

/// What one player's lock did to the match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttackReport {
    pub clear: ClearReport,
    /// Damage dealt to the opponent, 0 when nothing was cleared
    pub damage: u32,
    pub attack_name: &'static str,
    /// Opponent HP after the damage
    pub defender_hp: u32,
    /// The acting player's next piece could not spawn
    pub topped_out: bool,
}

#[derive(Debug)]
pub struct Arbiter {
    config: VersusConfig,
    boards: [Board; 2],
    health: [Health; 2],
    status: MatchStatus,
}

impl Arbiter {
    /// Both boards share the engine config; player two plays the seed
    /// after player one's, so the sequences differ but stay reproducible.
    pub fn new(config: VersusConfig) -> Self {
        let seed = config.engine.resolve_seed();
        let engine = |seed: u32| EngineConfig {
            seed: Some(seed),
            ..config.engine.clone()
        };
        let boards = [Board::new(engine(seed)), Board::new(engine(seed.wrapping_add(1)))];
        Self {
            boards,
            health: [Health::new(config.max_hp), Health::new(config.max_hp)],
            status: MatchStatus::NotStarted,
            config,
        }
    }

    pub fn config(&self) -> &VersusConfig {
        &self.config
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            MatchStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == MatchStatus::InProgress
    }

    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[player.index()]
    }

    pub fn board_mut(&mut self, player: PlayerId) -> &mut Board {
        &mut self.boards[player.index()]
    }

    pub fn health(&self, player: PlayerId) -> &Health {
        &self.health[player.index()]
    }

    pub fn snapshot(&self, player: PlayerId) -> GameSnapshot {
        self.board(player).snapshot()
    }

    /// Reset both boards and both health pools and spawn the first pieces
    pub fn start_new_match(&mut self) {
        for health in &mut self.health {
            health.reset();
        }
        for board in &mut self.boards {
            board.new_game();
        }
        self.status = MatchStatus::InProgress;
        info!(max_hp = self.config.max_hp, "match started");
        for player in [PlayerId::One, PlayerId::Two] {
            self.check_top_out(player);
        }
    }

    fn declare_winner(&mut self, winner: PlayerId) {
        if self.status == MatchStatus::InProgress {
            self.status = MatchStatus::Won(winner);
            info!(?winner, "match won");
        }
    }

    fn check_top_out(&mut self, player: PlayerId) {
        if self.board(player).is_game_over() {
            self.declare_winner(player.opponent());
        }
    }

    /// Lock `player`'s falling piece and route the damage
    ///
    /// Returns `None` without touching anything unless the match is in
    /// progress. When the attacker's respawn tops out, the defender wins even
    /// if this same attack emptied their health.
    pub fn on_piece_locked(&mut self, player: PlayerId) -> Result<Option<AttackReport>, EngineError> {
        if !self.is_in_progress() {
            return Ok(None);
        }
        let defender = player.opponent();
        let board = &mut self.boards[player.index()];
        board.merge_to_background()?;
        let clear = board.clear_rows()?;

        let lines = clear.lines_removed();
        let damage = calculate_damage(lines, clear.combo.max(0));
        let target = &mut self.health[defender.index()];
        let alive = if damage > 0 { target.take_damage(damage) } else { !target.is_defeated() };
        let defender_hp = target.current();
        if damage > 0 {
            debug!(?player, lines, combo = clear.combo, damage, defender_hp, "attack");
        }
        if !alive {
            self.declare_winner(player);
        }

        let topped_out = self.boards[player.index()].create_new_brick();
        if topped_out {
            self.status = MatchStatus::Won(defender);
            info!(winner = ?defender, "match won by top-out");
        }

        Ok(Some(AttackReport {
            clear,
            damage,
            attack_name: attack_name(lines),
            defender_hp,
            topped_out,
        }))
    }

    /// Route one input verb for `player`
    ///
    /// Input is ignored unless the match is in progress, except `NewGame`,
    /// which restarts the whole match. Returns the attack report when the
    /// verb ended in a lock.
    pub fn apply(&mut self, player: PlayerId, action: GameAction) -> Result<Option<AttackReport>, EngineError> {
        if action == GameAction::NewGame {
            self.start_new_match();
            return Ok(None);
        }
        if !self.is_in_progress() {
            return Ok(None);
        }
        let board = &mut self.boards[player.index()];
        let report = match action {
            GameAction::SoftDrop | GameAction::Tick => {
                let source = if action == GameAction::SoftDrop {
                    DropSource::User
                } else {
                    DropSource::Gravity
                };
                if board.is_falling() && !board.step_down(source) {
                    self.on_piece_locked(player)?
                } else {
                    None
                }
            }
            GameAction::HardDrop => {
                if board.is_falling() {
                    while board.move_down() {}
                    self.on_piece_locked(player)?
                } else {
                    None
                }
            }
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::Rotate | GameAction::Hold => {
                board.apply(action)?;
                None
            }
            GameAction::NewGame => None,
        };
        self.check_top_out(player);
        Ok(report)
    }

    /// Gravity step for `player`
    pub fn tick(&mut self, player: PlayerId) -> Result<Option<AttackReport>, EngineError> {
        self.apply(player, GameAction::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_duel_core::Phase;

    fn arbiter(max_hp: u32) -> Arbiter {
        let config = VersusConfig {
            max_hp,
            engine: EngineConfig::default().with_seed(42),
        };
        let mut arbiter = Arbiter::new(config);
        arbiter.start_new_match();
        arbiter
    }

    /// Fill the bottom row except where the falling piece will land
    fn prepare_single(arbiter: &mut Arbiter, player: PlayerId) {
        let board = arbiter.board_mut(player);
        let view = board.view().unwrap();
        let bottom = board.config().height - 1;
        let width = board.config().width;
        let holes: Vec<usize> = view
            .shape
            .filled()
            .filter(|&(r, _, _)| view.ghost_row + r as i32 == bottom as i32)
            .map(|(_, c, _)| (view.col + c as i32) as usize)
            .collect();
        let matrix = board.matrix_mut();
        for col in 0..width {
            if !holes.contains(&col) {
                matrix.set(bottom as i32, col as i32, 7);
            }
        }
    }

    #[test]
    fn test_new_arbiter_waits_for_start() {
        let arbiter = Arbiter::new(VersusConfig::default());
        assert_eq!(arbiter.status(), MatchStatus::NotStarted);
        assert_eq!(arbiter.board(PlayerId::One).phase(), Phase::Spawning);
    }

    #[test]
    fn test_input_ignored_before_start() {
        let mut arbiter = Arbiter::new(VersusConfig::default());
        assert_eq!(arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap(), None);
        assert!(arbiter.board(PlayerId::One).matrix().is_clear());
    }

    #[test]
    fn test_boards_use_distinct_seeds() {
        let arbiter = arbiter(100);
        let one = arbiter.board(PlayerId::One).config().seed;
        let two = arbiter.board(PlayerId::Two).config().seed;
        assert_eq!(one, Some(42));
        assert_eq!(two, Some(43));
    }

    #[test]
    fn test_lock_without_clear_deals_no_damage() {
        let mut arbiter = arbiter(100);
        let report = arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap().unwrap();
        assert_eq!(report.damage, 0);
        assert_eq!(report.attack_name, "");
        assert_eq!(arbiter.health(PlayerId::Two).current(), 100);
        assert!(arbiter.is_in_progress());
    }

    #[test]
    fn test_single_clear_damages_opponent() {
        let mut arbiter = arbiter(100);
        prepare_single(&mut arbiter, PlayerId::One);
        let report = arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap().unwrap();
        assert_eq!(report.clear.lines_removed(), 1);
        assert_eq!(report.damage, 1);
        assert_eq!(report.attack_name, "Single");
        assert_eq!(arbiter.health(PlayerId::Two).current(), 99);
        assert_eq!(arbiter.health(PlayerId::One).current(), 100);
    }

    #[test]
    fn test_lethal_attack_wins_match() {
        let mut arbiter = arbiter(1);
        prepare_single(&mut arbiter, PlayerId::Two);
        arbiter.apply(PlayerId::Two, GameAction::HardDrop).unwrap();
        assert_eq!(arbiter.status(), MatchStatus::Won(PlayerId::Two));
        assert!(arbiter.health(PlayerId::One).is_defeated());

        // Match over: further input is ignored
        let before = arbiter.board(PlayerId::One).matrix();
        assert_eq!(arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap(), None);
        assert_eq!(arbiter.board(PlayerId::One).matrix(), before);
    }

    #[test]
    fn test_top_out_hands_win_to_opponent() {
        let mut arbiter = arbiter(100);
        let board = arbiter.board_mut(PlayerId::One);
        let height = board.config().height;
        let width = board.config().width;
        let matrix = board.matrix_mut();
        // Rows stay one short of full so nothing clears
        for row in 10..height {
            for col in 0..width - 1 {
                matrix.set(row as i32, col as i32, 3);
            }
        }
        let report = arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap().unwrap();
        assert!(report.topped_out);
        assert_eq!(arbiter.winner(), Some(PlayerId::Two));
    }

    #[test]
    fn test_top_out_overrides_simultaneous_kill() {
        let mut arbiter = arbiter(1);
        let board = arbiter.board_mut(PlayerId::One);
        let height = board.config().height as i32;
        let width = board.config().width as i32;
        let matrix = board.matrix_mut();
        // A full bottom row to clear, and a stack that still blocks the
        // spawn point after the clear shifts it down
        for col in 0..width {
            matrix.set(height - 1, col, 5);
        }
        for row in 3..height - 1 {
            for col in 0..width - 1 {
                matrix.set(row, col, 3);
            }
        }

        let report = arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap().unwrap();
        assert_eq!(report.clear.lines_removed(), 1);
        assert_eq!(report.damage, 1);
        assert!(arbiter.health(PlayerId::Two).is_defeated());
        assert!(report.topped_out);
        assert_eq!(arbiter.status(), MatchStatus::Won(PlayerId::Two));
    }

    #[test]
    fn test_direct_lock_ignored_outside_match() {
        let mut arbiter = Arbiter::new(VersusConfig::default());
        assert_eq!(arbiter.on_piece_locked(PlayerId::One).unwrap(), None);
        assert_eq!(arbiter.health(PlayerId::Two).current(), 100);

        let mut arbiter = arbiter_won();
        let before = arbiter.board(PlayerId::Two).matrix();
        assert_eq!(arbiter.on_piece_locked(PlayerId::Two).unwrap(), None);
        assert_eq!(arbiter.board(PlayerId::Two).matrix(), before);
        assert_eq!(arbiter.winner(), Some(PlayerId::One));
    }

    fn arbiter_won() -> Arbiter {
        let mut arbiter = arbiter(1);
        prepare_single(&mut arbiter, PlayerId::One);
        arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap();
        arbiter
    }

    #[test]
    fn test_new_game_restarts_match() {
        let mut arbiter = arbiter(1);
        prepare_single(&mut arbiter, PlayerId::One);
        arbiter.apply(PlayerId::One, GameAction::HardDrop).unwrap();
        assert_eq!(arbiter.winner(), Some(PlayerId::One));

        arbiter.apply(PlayerId::Two, GameAction::NewGame).unwrap();
        assert!(arbiter.is_in_progress());
        assert_eq!(arbiter.health(PlayerId::Two).current(), 1);
        assert!(arbiter.board(PlayerId::One).matrix().is_clear());
    }

    #[test]
    fn test_soft_drop_and_tick_route_to_one_board() {
        let mut arbiter = arbiter(100);
        let row_two = arbiter.board(PlayerId::Two).offset().row;
        arbiter.apply(PlayerId::One, GameAction::SoftDrop).unwrap();
        arbiter.tick(PlayerId::One).unwrap();
        assert_eq!(arbiter.board(PlayerId::One).score(), 1);
        assert_eq!(arbiter.board(PlayerId::One).offset().row, 12);
        assert_eq!(arbiter.board(PlayerId::Two).offset().row, row_two);
    }
}
