//! Core game state and per-tick simulation

use crate::bag::RandomBag;
use crate::error::ConfigError;
use crate::field::Field;
use crate::hold::HoldSlot;
use crate::input::{Actions, Input, InputTracker};
use crate::piece::ActivePiece;
use crate::queue::NextQueue;
use crate::score::Score;
use crate::settings::EngineConfig;
use crate::snapshot::Snapshot;
use crate::tetromino::{PieceType, Rgb, RotationDirection};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::time::Duration;

/// Mixed into the engine seed so garbage holes don't mirror the bag
const GARBAGE_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// A piece could not spawn or locked above the field; terminal
    GameOver,
}

/// The engine: owns the field, pieces and counters, stepped once per frame
pub struct GameMaster {
    config: EngineConfig,
    field: Field,
    /// Current falling piece
    active: Option<ActivePiece>,
    hold: HoldSlot,
    nexts: NextQueue,
    score: Score,
    input: InputTracker,
    garbage_rng: ChaCha8Rng,
    /// Locked pieces since the last clear or garbage row
    pieces_since_garbage: u32,
    last_tick: Option<Duration>,
    state: GameState,
    snapshot: Snapshot,
}

impl GameMaster {
    /// Build an engine, refusing configurations it cannot run with
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            tracing::warn!("Rejected engine config: {}", e);
            return Err(e);
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            "Starting {}x{} engine, seed={}, ghost={}, garbage={}",
            config.width,
            config.height,
            seed,
            config.enable_ghost,
            config.enable_garbage
        );

        let mut game = Self {
            field: Field::new(config.width, config.height),
            active: None,
            hold: HoldSlot::new(),
            nexts: NextQueue::new(config.num_nexts, RandomBag::new(seed)),
            score: Score::new(config.timing.start_level),
            input: InputTracker::new(config.timing.das(), config.timing.arr()),
            garbage_rng: ChaCha8Rng::seed_from_u64(seed ^ GARBAGE_SEED_SALT),
            pieces_since_garbage: 0,
            last_tick: None,
            state: GameState::Playing,
            snapshot: Snapshot::new(&config),
            config,
        };
        game.spawn_next();
        game.refresh_snapshot();
        Ok(game)
    }

    /// Advance the simulation to `now` with the buttons currently held
    ///
    /// `now` is measured from any fixed epoch. Time running backwards counts
    /// as no time passing. Does nothing once the game is over.
    pub fn tick(&mut self, now: Duration, input: Input) {
        if self.state == GameState::GameOver {
            return;
        }

        let elapsed = match self.last_tick {
            Some(last) => now.saturating_sub(last),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now);

        let actions = self.input.update(input, elapsed);
        self.apply_actions(&actions);

        if self.state == GameState::Playing {
            if actions.hard_drop {
                self.hard_drop();
            } else {
                self.apply_gravity(elapsed, actions.soft_drop);
            }
        }

        self.refresh_snapshot();
    }

    fn apply_actions(&mut self, actions: &Actions) {
        if actions.hold {
            self.hold_piece();
        }

        let max_resets = self.config.timing.max_lock_resets;
        let Some(piece) = self.active.as_mut() else {
            return;
        };

        let mut moved = false;
        if actions.rotate_cw {
            moved |= piece.rotate(RotationDirection::Clockwise, &self.field);
        }
        if actions.rotate_ccw {
            moved |= piece.rotate(RotationDirection::CounterClockwise, &self.field);
        }
        for _ in 0..actions.shift.unsigned_abs() {
            let shifted = if actions.shift < 0 {
                piece.move_left(&self.field)
            } else {
                piece.move_right(&self.field)
            };
            if !shifted {
                break;
            }
            moved = true;
        }

        if moved {
            try_reset_lock(piece, max_resets);
        }
    }

    /// Gravity, soft drop and lock delay for one tick
    fn apply_gravity(&mut self, elapsed: Duration, soft_drop: bool) {
        let interval = self.score.gravity_interval();
        let lock_delay = self.config.timing.lock_delay();
        let Some(piece) = self.active.as_mut() else {
            return;
        };

        if soft_drop && piece.move_down(&self.field) {
            self.score.add_soft_drop(1);
            piece.fall_timer = Duration::ZERO;
            track_lowest(piece);
        }

        // Never fall further than the field is tall in one tick
        piece.fall_timer = piece.fall_timer.saturating_add(elapsed);
        let mut rows = 0;
        while piece.fall_timer >= interval && rows < self.field.height() {
            if !piece.move_down(&self.field) {
                break;
            }
            piece.fall_timer -= interval;
            track_lowest(piece);
            rows += 1;
        }

        // The lock delay is paused, not restarted, while the piece is airborne
        if !piece.is_grounded(&self.field) {
            return;
        }

        // At most one pending gravity step, taken as soon as the piece is lifted
        piece.fall_timer = piece.fall_timer.min(interval);
        let waited = match piece.lock_timer {
            Some(waited) => waited.saturating_add(elapsed),
            None => Duration::ZERO,
        };
        piece.lock_timer = Some(waited);
        if waited >= lock_delay {
            self.lock_active();
        }
    }

    fn hard_drop(&mut self) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        let distance = piece.hard_drop(&self.field);
        self.score.add_hard_drop(distance);
        self.lock_active();
    }

    /// Swap the active piece with the hold slot, once per piece
    fn hold_piece(&mut self) {
        let Some(current) = self.active.as_ref() else {
            return;
        };
        if current.has_held {
            return;
        }

        let current_type = current.piece_type;
        let next_type = match self.hold.swap(current_type) {
            Some(held) => held,
            None => self.nexts.pop(),
        };
        tracing::debug!("Held {:?}, bringing in {:?}", current_type, next_type);

        self.active = None;
        self.spawn(next_type, true);
    }

    /// Lock the current piece, clear rows, maybe add garbage, spawn next
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let dropped = self.field.lock(&piece.cells(), piece.piece_type.color());
        tracing::debug!(
            "Locked {:?} at ({}, {}) {:?}",
            piece.piece_type,
            piece.row,
            piece.col,
            piece.rotation
        );

        // Check for lock out (blocks locked above the field)
        if dropped > 0 {
            tracing::warn!("Lock out: {:?} locked above the field", piece.piece_type);
            self.state = GameState::GameOver;
            return;
        }

        let lines = self.field.clear_full_rows() as u32;
        if lines > 0 {
            let level = self.score.level;
            let points = self.score.add_clear(lines);
            tracing::info!(
                "Cleared {} line(s) for {} points, {} total",
                lines,
                points,
                self.score.lines
            );
            if self.score.level != level {
                tracing::info!("Level up to {}", self.score.level);
            }
            self.pieces_since_garbage = 0;
        } else if self.config.enable_garbage {
            self.pieces_since_garbage += 1;
            if self.pieces_since_garbage >= self.config.garbage.interval {
                self.pieces_since_garbage = 0;
                self.inject_garbage();
            }
        }

        self.spawn_next();
    }

    fn inject_garbage(&mut self) {
        let hole = self.garbage_rng.gen_range(0..self.field.width());
        let overflow = self.field.inject_garbage(hole);
        tracing::debug!("Garbage row in, hole at column {}", hole);
        if overflow {
            tracing::debug!("Garbage pushed blocks off the top of the field");
        }
    }

    fn spawn_next(&mut self) {
        let piece_type = self.nexts.pop();
        self.spawn(piece_type, false);
    }

    fn spawn(&mut self, piece_type: PieceType, has_held: bool) {
        let mut piece = ActivePiece::spawn(piece_type, self.field.width());
        piece.has_held = has_held;

        // Check for top out
        if !piece.fits(&self.field) {
            tracing::warn!("Top out: {:?} cannot spawn", piece_type);
            self.state = GameState::GameOver;
            return;
        }

        tracing::debug!("Spawned {:?}", piece_type);
        self.active = Some(piece);
    }

    fn refresh_snapshot(&mut self) {
        self.snapshot
            .render_field(&self.field, self.active.as_ref(), self.config.enable_ghost);
        self.snapshot.render_nexts(&self.nexts);
        self.snapshot.render_hold(self.hold.piece());
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.field.width()
    }

    pub fn height(&self) -> usize {
        self.field.height()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Total rows cleared since the game started
    pub fn num_deleted_lines(&self) -> u32 {
        self.score.lines
    }

    /// Locked blocks only, without the active piece
    pub fn locked_field(&self) -> &Field {
        &self.field
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn held_piece(&self) -> Option<PieceType> {
        self.hold.piece()
    }

    /// Upcoming pieces, soonest first
    pub fn next_pieces(&self) -> impl Iterator<Item = PieceType> + '_ {
        self.nexts.iter()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Field occupancy with the active piece drawn in, row-major
    pub fn field(&self) -> &[bool] {
        self.snapshot.field()
    }

    pub fn field_color(&self) -> &[Rgb] {
        self.snapshot.field_color()
    }

    /// Ghost projection layer, row-major over the field
    pub fn ghost(&self) -> &[bool] {
        self.snapshot.ghost()
    }

    pub fn nexts(&self) -> &[bool] {
        self.snapshot.nexts()
    }

    pub fn nexts_color(&self) -> &[Rgb] {
        self.snapshot.nexts_color()
    }

    pub fn hold(&self) -> &[bool] {
        self.snapshot.hold()
    }

    pub fn hold_color(&self) -> &[Rgb] {
        self.snapshot.hold_color()
    }
}

/// Restart the lock delay after a successful move on the stack
///
/// Resets are limited per piece; reaching a new lowest row restores them.
fn try_reset_lock(piece: &mut ActivePiece, max_resets: u8) {
    track_lowest(piece);

    if piece.lock_resets < max_resets && piece.lock_timer.is_some() {
        piece.lock_timer = Some(Duration::ZERO);
        piece.lock_resets += 1;
    }
}

/// Record how deep the piece has been; a new low clears the lock state
fn track_lowest(piece: &mut ActivePiece) {
    let bottom = piece.bottom_row();
    if bottom > piece.lowest_row {
        piece.lowest_row = bottom;
        piece.lock_resets = 0;
        piece.lock_timer = None;
    }
}

impl fmt::Display for GameMaster {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.field().chunks(self.width()) {
            write!(f, "|")?;
            for &block in line {
                let symbol = if block { '*' } else { ' ' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Cell;
    use crate::tetromino::Rotation;

    const FRAME: Duration = Duration::from_millis(16);

    fn game(enable_garbage: bool) -> GameMaster {
        let config = EngineConfig::new(20, 10, 6, 4, 4, true, enable_garbage).with_seed(2024);
        GameMaster::new(config).unwrap()
    }

    fn press_hard_drop() -> Input {
        Input {
            hard_drop: true,
            ..Input::default()
        }
    }

    /// Tick at successive frame times, counting from `start`
    fn run(game: &mut GameMaster, start: &mut Duration, input: Input, frames: u32) {
        for _ in 0..frames {
            *start += FRAME;
            game.tick(*start, input);
        }
    }

    fn drop_piece(game: &mut GameMaster, now: &mut Duration) {
        run(game, now, press_hard_drop(), 1);
        run(game, now, Input::default(), 1);
    }

    #[test]
    fn test_new_game_has_active_piece_and_full_queue() {
        let game = game(false);
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.active_piece().is_some());
        assert_eq!(game.next_pieces().count(), 6);
        assert_eq!(game.nexts().len(), 6 * 16);
        assert_eq!(game.field().iter().filter(|&&c| c).count(), 4);
        assert!(game.hold().iter().all(|c| !c));
    }

    #[test]
    fn test_invalid_config_is_refused() {
        let config = EngineConfig::new(20, 10, 0, 4, 4, true, false);
        assert!(matches!(GameMaster::new(config), Err(ConfigError::NoNextPieces)));
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = game(false);
        let b = game(false);
        assert_eq!(a.active_piece(), b.active_piece());
        assert!(a.next_pieces().eq(b.next_pieces()));
    }

    #[test]
    fn test_first_piece_matches_bag() {
        let game = game(false);
        let mut bag = RandomBag::new(2024);
        assert_eq!(game.active_piece().unwrap().piece_type, bag.next());
        let expected: Vec<_> = (0..6).map(|_| bag.next()).collect();
        assert!(game.next_pieces().eq(expected));
    }

    #[test]
    fn test_gravity_moves_piece_down() {
        let mut game = game(false);
        game.tick(Duration::ZERO, Input::default());
        let row = game.active_piece().unwrap().row;
        game.tick(Duration::from_millis(999), Input::default());
        assert_eq!(game.active_piece().unwrap().row, row);
        game.tick(Duration::from_millis(1000), Input::default());
        assert_eq!(game.active_piece().unwrap().row, row + 1);
    }

    #[test]
    fn test_backwards_time_is_ignored() {
        let mut game = game(false);
        game.tick(Duration::from_secs(5), Input::default());
        let before = game.active_piece().cloned();
        game.tick(Duration::from_secs(1), Input::default());
        game.tick(Duration::from_secs(1), Input::default());
        assert_eq!(game.active_piece().cloned(), before);
    }

    #[test]
    fn test_long_pause_falls_at_most_one_field() {
        let mut game = game(false);
        game.tick(Duration::ZERO, Input::default());
        game.tick(Duration::from_secs(3600), Input::default());
        // landed but lock delay has only just started
        let piece = game.active_piece().unwrap();
        assert!(piece.is_grounded(game.locked_field()));
        assert!(game.locked_field().is_empty());
    }

    #[test]
    fn test_lock_delay_then_spawn() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        let first = game.active_piece().unwrap().piece_type;
        // soft drop to the floor
        let soft = Input {
            soft_drop: true,
            ..Input::default()
        };
        run(&mut game, &mut now, soft, 25);
        assert!(game.locked_field().is_empty() || game.locked_field().occupied_count() == 4);

        run(&mut game, &mut now, Input::default(), 40);
        assert_eq!(game.locked_field().occupied_count(), 4);
        let locked_color = game
            .locked_field()
            .cells()
            .iter()
            .find(|c| c.is_filled())
            .map(|c| c.color());
        assert_eq!(locked_color, Some(first.color()));
        assert!(game.active_piece().is_some());
        assert!(game.score().points >= 18);
    }

    #[test]
    fn test_hard_drop_locks_in_same_tick() {
        let mut game = game(false);
        let mut piece = ActivePiece::spawn(PieceType::O, 10);
        piece.col = 0;
        game.active = Some(piece);

        game.tick(Duration::ZERO, press_hard_drop());
        let field = game.locked_field();
        for (row, col) in [(18, 0), (18, 1), (19, 0), (19, 1)] {
            assert!(field.get(row, col).unwrap().is_filled());
        }
        assert_eq!(field.occupied_count(), 4);
        assert_eq!(game.score().points, 36);
    }

    #[test]
    fn test_hard_drop_fires_once_per_press() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        run(&mut game, &mut now, press_hard_drop(), 10);
        assert_eq!(game.locked_field().occupied_count(), 4);
    }

    #[test]
    fn test_vertical_i_in_column_nine_clears_one_line() {
        let mut game = game(false);
        for col in 0..9 {
            game.field.set(19, col, Cell::Filled(Rgb::GARBAGE));
        }
        let mut piece = ActivePiece::spawn(PieceType::I, 10);
        piece.rotation = Rotation::East;
        piece.row = 0;
        piece.col = 7;
        assert!(piece.cells().iter().all(|&(_, c)| c == 9));
        game.active = Some(piece);

        let before = game.num_deleted_lines();
        game.tick(Duration::ZERO, press_hard_drop());
        assert_eq!(game.num_deleted_lines(), before + 1);

        // the rest of the I piece settles into the bottom three rows
        let field = game.locked_field();
        assert_eq!(field.occupied_count(), 3);
        for row in 17..20 {
            assert!(field.get(row, 9).unwrap().is_filled());
        }
    }

    #[test]
    fn test_hold_once_per_piece() {
        let mut game = game(false);
        let first = game.active_piece().unwrap().piece_type;
        let upcoming = game.nexts.peek(0);

        game.hold_piece();
        assert_eq!(game.held_piece(), Some(first));
        assert_eq!(game.active_piece().map(|p| p.piece_type), upcoming);
        assert_eq!(game.nexts.len(), 6);

        let after_first = (game.active.clone(), game.hold.clone());
        let queue_after_first: Vec<_> = game.next_pieces().collect();
        game.hold_piece();
        assert_eq!((game.active.clone(), game.hold.clone()), after_first);
        assert!(game.next_pieces().eq(queue_after_first));
    }

    #[test]
    fn test_hold_swaps_back_after_lock() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        let first = game.active_piece().unwrap().piece_type;
        let hold = Input {
            hold: true,
            ..Input::default()
        };
        run(&mut game, &mut now, hold, 1);
        run(&mut game, &mut now, Input::default(), 1);
        drop_piece(&mut game, &mut now);

        let second_active = game.active_piece().unwrap().piece_type;
        run(&mut game, &mut now, hold, 1);
        assert_eq!(game.active_piece().unwrap().piece_type, first);
        assert_eq!(game.held_piece(), Some(second_active));
        assert!(game.active_piece().unwrap().has_held);
        assert_eq!(game.hold().iter().filter(|&&c| c).count(), 4);
        let held_color = second_active.color();
        let colored = game.hold_color().iter().filter(|&&c| c == held_color);
        assert_eq!(colored.count(), 4);
    }

    /// Put a fresh piece of `piece_type` on the floor of an empty field
    fn land(game: &mut GameMaster, now: &mut Duration, piece_type: PieceType) {
        game.active = Some(ActivePiece::spawn(piece_type, 10));
        let soft = Input {
            soft_drop: true,
            ..Input::default()
        };
        while !game.active_piece().unwrap().is_grounded(game.locked_field()) {
            run(game, now, soft, 1);
        }
        run(game, now, Input::default(), 1);
        assert!(game.locked_field().is_empty());
    }

    /// Frames until something locks, giving up after `limit`
    fn frames_until_lock(
        game: &mut GameMaster,
        now: &mut Duration,
        inputs: &[Input],
        limit: u32,
    ) -> Option<u32> {
        for frame in 0..limit {
            run(game, now, inputs[frame as usize % inputs.len()], 1);
            if !game.locked_field().is_empty() {
                return Some(frame);
            }
        }
        None
    }

    #[test]
    fn test_rotating_on_the_floor_still_locks() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        land(&mut game, &mut now, PieceType::L);

        let rotate = Input {
            rotate_cw: true,
            ..Input::default()
        };
        // 15 resets of at most 500ms each, plus the final delay
        let limit = (16 * 500 / FRAME.as_millis() + 1) as u32;
        let frames = frames_until_lock(&mut game, &mut now, &[rotate, Input::default()], limit);
        assert!(frames.is_some());
        assert_eq!(game.locked_field().occupied_count(), 4);
    }

    #[test]
    fn test_shifting_on_the_floor_still_locks() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        land(&mut game, &mut now, PieceType::T);

        let left = Input {
            move_left: true,
            ..Input::default()
        };
        let right = Input {
            move_right: true,
            ..Input::default()
        };
        let limit = (16 * 500 / FRAME.as_millis() + 1) as u32;
        let frames = frames_until_lock(&mut game, &mut now, &[left, right], limit);
        assert!(frames.is_some());
    }

    #[test]
    fn test_lock_resets_are_capped() {
        let field = Field::new(10, 20);
        let mut piece = ActivePiece::spawn(PieceType::T, 10);
        piece.hard_drop(&field);
        track_lowest(&mut piece);
        piece.lock_timer = Some(Duration::from_millis(300));

        for _ in 0..20 {
            try_reset_lock(&mut piece, 15);
            piece.lock_timer = Some(Duration::from_millis(300));
        }
        assert_eq!(piece.lock_resets, 15);

        try_reset_lock(&mut piece, 15);
        assert_eq!(piece.lock_timer, Some(Duration::from_millis(300)));
    }

    #[test]
    fn test_airborne_piece_without_new_low_keeps_lock_state() {
        let field = Field::new(10, 20);
        let mut piece = ActivePiece::spawn(PieceType::T, 10);
        piece.hard_drop(&field);
        track_lowest(&mut piece);
        piece.lock_timer = Some(Duration::from_millis(300));
        piece.lock_resets = 15;

        // lifted by a kick, then back down to the same depth
        piece.row -= 1;
        track_lowest(&mut piece);
        piece.row += 1;
        track_lowest(&mut piece);
        assert_eq!(piece.lock_resets, 15);
        assert_eq!(piece.lock_timer, Some(Duration::from_millis(300)));
    }

    #[test]
    fn test_new_low_restores_reset_budget() {
        let mut field = Field::new(10, 20);
        for col in 0..10 {
            field.set(19, col, Cell::Filled(Rgb::GARBAGE));
        }
        let mut piece = ActivePiece::spawn(PieceType::T, 10);
        piece.hard_drop(&field);
        track_lowest(&mut piece);
        piece.lock_timer = Some(Duration::from_millis(300));
        piece.lock_resets = 15;

        field.set(19, 4, Cell::Empty);
        field.set(19, 5, Cell::Empty);
        field.set(19, 3, Cell::Empty);
        assert!(piece.move_down(&field));
        try_reset_lock(&mut piece, 15);
        assert_eq!(piece.lock_resets, 0);
        assert_eq!(piece.lock_timer, None);
    }

    #[test]
    fn test_time_jumps_do_not_overflow() {
        let left = Input {
            move_left: true,
            ..Input::default()
        };
        for input in [Input::default(), left] {
            let mut game = game(false);
            game.tick(Duration::ZERO, input);
            game.tick(Duration::from_millis(500), input);
            game.tick(Duration::ZERO, input);
            game.tick(Duration::MAX, input);
            game.tick(Duration::MAX, input);
            assert_eq!(game.state(), GameState::Playing);
            assert!(game.active_piece().is_some());
        }
    }

    #[test]
    fn test_das_slides_to_wall() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        let left = Input {
            move_left: true,
            ..Input::default()
        };
        run(&mut game, &mut now, left, 40);
        let piece = game.active_piece().unwrap();
        assert_eq!(piece.cells().iter().map(|&(_, c)| c).min(), Some(0));
    }

    #[test]
    fn test_both_directions_cancel() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        let col = game.active_piece().unwrap().col;
        let both = Input {
            move_left: true,
            move_right: true,
            ..Input::default()
        };
        run(&mut game, &mut now, both, 20);
        assert_eq!(game.active_piece().unwrap().col, col);
    }

    #[test]
    fn test_queue_length_invariant_over_many_spawns() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        for _ in 0..10_000 {
            drop_piece(&mut game, &mut now);
            assert_eq!(game.nexts.len(), 6);
            assert_eq!(game.nexts().len(), 6 * 16);
            // keep the stack from topping out
            game.field = Field::new(10, 20);
        }
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_spawn_overlap_is_top_out() {
        let mut game = game(false);
        for col in 3..7 {
            game.field.set(0, col, Cell::Filled(Rgb::GARBAGE));
            game.field.set(1, col, Cell::Filled(Rgb::GARBAGE));
        }
        game.active = None;
        game.spawn_next();
        assert!(game.is_game_over());

        let before = game.locked_field().cells().to_vec();
        let mut now = Duration::ZERO;
        run(&mut game, &mut now, press_hard_drop(), 1);
        run(&mut game, &mut now, Input::default(), 100);
        assert_eq!(game.locked_field().cells(), &before[..]);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_stacking_eventually_tops_out_and_freezes() {
        let mut game = game(false);
        let mut now = Duration::ZERO;
        for _ in 0..500 {
            if game.is_game_over() {
                break;
            }
            drop_piece(&mut game, &mut now);
        }
        assert!(game.is_game_over());

        let frozen = game.snapshot().clone();
        run(&mut game, &mut now, press_hard_drop(), 3);
        assert_eq!(game.snapshot(), &frozen);
    }

    #[test]
    fn test_garbage_arrives_after_interval() {
        let mut game = game(true);
        let interval = game.config().garbage.interval;
        let mut now = Duration::ZERO;
        for _ in 0..interval - 1 {
            drop_piece(&mut game, &mut now);
        }
        assert!(!game.locked_field().is_row_full(19));
        let garbage_cells = |g: &GameMaster| {
            g.locked_field()
                .cells()
                .iter()
                .filter(|c| **c == Cell::Filled(Rgb::GARBAGE))
                .count()
        };
        assert_eq!(garbage_cells(&game), 0);

        drop_piece(&mut game, &mut now);
        assert_eq!(garbage_cells(&game), 9);
    }

    #[test]
    fn test_ghost_layer_follows_config() {
        let with_ghost = game(false);
        assert_eq!(with_ghost.ghost().iter().filter(|&&c| c).count(), 4);

        let config = EngineConfig::new(20, 10, 6, 4, 4, false, false).with_seed(2024);
        let without = GameMaster::new(config).unwrap();
        assert!(without.ghost().iter().all(|c| !c));
    }

    #[test]
    fn test_nexts_show_queue_shapes() {
        let game = game(false);
        for (n, piece_type) in game.next_pieces().enumerate() {
            let block = &game.nexts()[n * 16..(n + 1) * 16];
            assert_eq!(block.iter().filter(|&&c| c).count(), 4);
            let colors = &game.nexts_color()[n * 16..(n + 1) * 16];
            assert!(colors.iter().any(|c| *c == piece_type.color()));
        }
    }

    #[test]
    fn test_accessors_do_not_mutate() {
        let game = game(true);
        let first = game.snapshot().clone();
        for _ in 0..3 {
            let _ = (game.field(), game.field_color(), game.nexts(), game.hold());
            let _ = game.num_deleted_lines();
        }
        assert_eq!(game.snapshot(), &first);
    }

    #[test]
    fn test_display_draws_active_piece() {
        let game = game(false);
        let text = game.to_string();
        assert_eq!(text.lines().count(), 20);
        assert_eq!(text.matches('*').count(), 4);
    }
}
