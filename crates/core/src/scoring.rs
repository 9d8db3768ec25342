//! Scoring module - level, combo and score tracking
//!
//! One formula is used everywhere a clear is scored:
//!
//! ```text
//! points = 50 * lines^2 * level * difficulty_multiplier + max(0, combo) * 50
//! ```
//!
//! where `level` is the level after the clear has been counted. Soft drops
//! driven by the player add [`SOFT_DROP_SCORE`] per row; gravity and hard
//! drops add nothing.

use std::fmt;
use std::time::Duration;

use tetris_duel_types::{COMBO_BONUS_PER_STEP, LINES_PER_LEVEL, MIN_DROP_MS, SPEED_STEP_MS};

pub use tetris_duel_types::SOFT_DROP_SCORE;

use crate::config::Difficulty;

/// Level as a pure function of cumulative lines (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Drop interval for a level, starting from the difficulty's base speed
pub fn drop_interval_ms(base_ms: u32, level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(SPEED_STEP_MS);
    base_ms.saturating_sub(reduction).max(MIN_DROP_MS)
}

/// Combo bonus: 50 per step past the first clear of a chain
pub fn calculate_combo_bonus(combo: i32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BONUS_PER_STEP * combo as u32
}

/// Points for one clear, combo bonus included
pub fn calculate_clear_points(row_bonus: u32, level: u32, difficulty: Difficulty, combo: i32) -> u32 {
    row_bonus
        .saturating_mul(level)
        .saturating_mul(difficulty.score_multiplier())
        .saturating_add(calculate_combo_bonus(combo))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTracker {
    level: u32,
    total_lines: u32,
}

impl LevelTracker {
    pub fn new() -> Self {
        Self {
            level: 1,
            total_lines: 0,
        }
    }

    /// Count cleared lines; returns true when the level changed
    pub fn add_cleared_lines(&mut self, lines: u32) -> bool {
        self.total_lines = self.total_lines.saturating_add(lines);
        let level = calculate_level(self.total_lines);
        let changed = level != self.level;
        self.level = level;
        changed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn score_multiplier(&self) -> u32 {
        self.level
    }

    pub fn lines_until_next_level(&self) -> u32 {
        LINES_PER_LEVEL - self.total_lines % LINES_PER_LEVEL
    }

    pub fn drop_interval(&self, difficulty: Difficulty) -> Duration {
        Duration::from_millis(u64::from(drop_interval_ms(
            difficulty.drop_ms(),
            self.level,
        )))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for LevelTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Streak counter over consecutive clearing locks
///
/// `-1` means no chain; the first clear of a chain is combo 0 and earns no
/// bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboTracker {
    combo: i32,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self { combo: -1 }
    }

    /// Feed every lock, clearing or not
    pub fn on_piece_locked(&mut self, lines_cleared: usize) {
        if lines_cleared > 0 {
            self.combo = self.combo.saturating_add(1);
        } else {
            self.combo = -1;
        }
    }

    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn bonus(&self) -> u32 {
        calculate_combo_bonus(self.combo)
    }

    pub fn has_active_combo(&self) -> bool {
        self.combo >= 1
    }

    /// "2x Combo!" while a combo is active, empty otherwise
    pub fn combo_text(&self) -> String {
        if self.has_active_combo() {
            format!("{}x Combo!", self.combo)
        } else {
            String::new()
        }
    }

    pub fn reset(&mut self) {
        self.combo = -1;
    }
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives score-related notifications from a board
///
/// All methods default to doing nothing so listeners implement only what
/// they care about.
pub trait ScoreListener {
    fn on_score_changed(&mut self, _score: u32, _lines_cleared: usize) {}
    fn on_level_changed(&mut self, _level: u32) {}
    fn on_combo(&mut self, _combo: i32) {}
}

/// Non-negative score counter with listeners
#[derive(Default)]
pub struct Score {
    value: u32,
    listeners: Vec<Box<dyn ScoreListener>>,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Add points and notify listeners
    pub fn add(&mut self, points: u32, lines_cleared: usize) {
        self.value = self.value.saturating_add(points);
        let value = self.value;
        for listener in &mut self.listeners {
            listener.on_score_changed(value, lines_cleared);
        }
    }

    pub fn notify_level(&mut self, level: u32) {
        for listener in &mut self.listeners {
            listener.on_level_changed(level);
        }
    }

    pub fn notify_combo(&mut self, combo: i32) {
        for listener in &mut self.listeners {
            listener.on_combo(combo);
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ScoreListener>) {
        self.listeners.push(listener);
    }

    /// Back to zero; listeners stay registered and see the reset
    pub fn reset(&mut self) {
        self.value = 0;
        for listener in &mut self.listeners {
            listener.on_score_changed(0, 0);
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Score")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(drop_interval_ms(800, 1), 800);
        assert_eq!(drop_interval_ms(800, 2), 750);
        assert_eq!(drop_interval_ms(500, 9), 100);
        assert_eq!(drop_interval_ms(250, 30), 100);
        assert_eq!(drop_interval_ms(1000, 0), 1000);
    }

    #[test]
    fn test_level_tracker() {
        let mut levels = LevelTracker::new();
        assert_eq!(levels.level(), 1);
        assert_eq!(levels.lines_until_next_level(), 10);

        assert!(!levels.add_cleared_lines(4));
        assert_eq!(levels.lines_until_next_level(), 6);
        assert!(levels.add_cleared_lines(6));
        assert_eq!(levels.level(), 2);
        assert_eq!(levels.score_multiplier(), 2);
        assert_eq!(
            levels.drop_interval(Difficulty::Easy),
            Duration::from_millis(950)
        );

        levels.reset();
        assert_eq!(levels.level(), 1);
        assert_eq!(levels.total_lines(), 0);
    }

    #[test]
    fn test_combo_sequence() {
        let mut combo = ComboTracker::new();
        let mut combos = Vec::new();
        let mut bonuses = Vec::new();
        for lines in [1, 1, 0, 1, 1, 1] {
            combo.on_piece_locked(lines);
            combos.push(combo.combo());
            bonuses.push(combo.bonus());
        }
        assert_eq!(combos, vec![0, 1, -1, 0, 1, 2]);
        assert_eq!(bonuses, vec![0, 50, 0, 0, 50, 100]);
    }

    #[test]
    fn test_combo_text() {
        let mut combo = ComboTracker::new();
        combo.on_piece_locked(1);
        assert_eq!(combo.combo_text(), "");
        assert!(!combo.has_active_combo());
        combo.on_piece_locked(2);
        assert_eq!(combo.combo_text(), "1x Combo!");
        combo.reset();
        assert_eq!(combo.combo(), -1);
    }

    #[test]
    fn test_clear_points() {
        // Single at level 1, Easy, no chain
        assert_eq!(calculate_clear_points(50, 1, Difficulty::Easy, 0), 50);
        // Tetris at level 2, Medium, combo 1
        assert_eq!(calculate_clear_points(800, 2, Difficulty::Medium, 1), 3250);
        assert_eq!(calculate_clear_points(200, 1, Difficulty::Hard, -1), 600);
    }

    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ScoreListener for Recorder {
        fn on_score_changed(&mut self, score: u32, lines: usize) {
            self.events.borrow_mut().push(format!("score {score} {lines}"));
        }
        fn on_level_changed(&mut self, level: u32) {
            self.events.borrow_mut().push(format!("level {level}"));
        }
    }

    #[test]
    fn test_score_notifies_listeners() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut score = Score::new();
        score.add_listener(Box::new(Recorder {
            events: Rc::clone(&events),
        }));

        score.add(100, 1);
        score.notify_level(2);
        score.notify_combo(3);
        score.reset();

        assert_eq!(score.value(), 0);
        assert_eq!(
            *events.borrow(),
            vec!["score 100 1", "level 2", "score 0 0"]
        );
    }
}
