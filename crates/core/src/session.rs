//! Game session module - selection/match state machine for one game
//!
//! A session owns its board and counters. Clicks come in through
//! [`GameSession::select_card`]; everything a renderer needs to know comes out
//! as [`SessionEvent`]s taken with [`GameSession::take_events`].
//!
//! # Lifecycle
//!
//! ```text
//! Idle --first click--> AwaitingSecond --second click--> Evaluating
//!                            ^                              |
//!                            |          match: immediately  |
//!   AwaitingFirst <----------+---- mismatch: finish_mismatch (after lock)
//!        |
//!        +--last pair matched--> Complete
//! ```
//!
//! The timer starts on the first click and stops when the last pair is found.
//! A mismatch keeps the session in `Evaluating` until the caller ends the lock
//! window with [`GameSession::finish_mismatch`]; clicks during the lock are
//! rejected.

use std::time::Instant;

use arrayvec::ArrayVec;
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::board::Board;
use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::name::PlayerName;
use crate::score::ScoreEntry;
use crate::types::{Difficulty, Position, TileId, MISMATCH_DELAY_MS};

/// Identifies a session for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No card flipped yet; the timer has not started.
    Idle,
    AwaitingFirst,
    AwaitingSecond,
    /// Two cards are up. Lasts for the mismatch lock window.
    Evaluating,
    Complete,
}

/// Why a click was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Evaluating,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Rejected(RejectReason),
    /// The selected card was clicked again and put back.
    Undone,
    FirstPicked,
    Matched {
        first: Position,
        second: Position,
        /// False when the pair had already been found earlier.
        newly_found: bool,
    },
    Mismatched {
        first: Position,
        second: Position,
    },
}

/// Notifications for the rendering side, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    BoardReady {
        side: usize,
    },
    TimerStarted,
    CardFlipped {
        pos: Position,
        tile: TileId,
    },
    CardHidden {
        pos: Position,
    },
    PairMatched {
        first: Position,
        second: Position,
        tile: TileId,
    },
    MismatchLocked {
        first: Position,
        second: Position,
        unlock_after_ms: u32,
    },
    TilesReset {
        first: Position,
        second: Position,
    },
    MovesChanged {
        moves: u32,
    },
    TimeTick {
        seconds: u64,
    },
    Finished(GameResult),
}

/// Counters shown while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub moves: u32,
    pub pairs_found: u32,
    pub elapsed_seconds: u64,
}

/// Snapshot taken when the last pair is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub moves: u32,
    pub elapsed_seconds: u64,
    pub finished_at: NaiveDateTime,
}

impl GameResult {
    pub fn to_score_entry(&self) -> ScoreEntry {
        ScoreEntry {
            player_name: self.player_name.clone(),
            difficulty: self.difficulty,
            moves: self.moves,
            timestamp: self.finished_at,
        }
    }
}

/// Per-session settings chosen before the board is dealt.
#[derive(Debug, Clone)]
pub struct SessionSetup {
    pub difficulty: Difficulty,
    pub player: PlayerName,
    pub mismatch_delay_ms: u32,
}

impl SessionSetup {
    pub fn new(difficulty: Difficulty, player: PlayerName) -> Self {
        Self {
            difficulty,
            player,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
        }
    }

    pub fn with_mismatch_delay_ms(mut self, ms: u32) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GameSession<C: Clock = SystemClock> {
    id: SessionId,
    setup: SessionSetup,
    board: Board,
    clock: C,
    phase: Phase,
    selection: ArrayVec<Position, 2>,
    matched: Vec<bool>,
    moves: u32,
    pairs_found: u32,
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
    result: Option<GameResult>,
    events: Vec<SessionEvent>,
}

impl<C: Clock> GameSession<C> {
    /// Create a session over a dealt board.
    ///
    /// Queues `BoardReady`. The board side must match the difficulty.
    pub fn new(id: SessionId, setup: SessionSetup, board: Board, clock: C) -> Result<Self, SessionError> {
        let expected = setup.difficulty.side_len();
        if board.side() != expected {
            return Err(SessionError::BoardSizeMismatch {
                expected,
                actual: board.side(),
            });
        }

        let side = board.side();
        let matched = vec![false; board.len()];
        info!(
            session = id.0,
            difficulty = setup.difficulty.as_str(),
            player = %setup.player,
            "session created"
        );

        Ok(Self {
            id,
            setup,
            board,
            clock,
            phase: Phase::Idle,
            selection: ArrayVec::new(),
            matched,
            moves: 0,
            pairs_found: 0,
            started_at: None,
            stopped_at: None,
            result: None,
            events: vec![SessionEvent::BoardReady { side }],
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.setup.difficulty
    }

    pub fn player_name(&self) -> &str {
        self.setup.player.as_str()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn pairs_found(&self) -> u32 {
        self.pairs_found
    }

    pub fn total_pairs(&self) -> u32 {
        self.board.pair_count() as u32
    }

    pub fn selection(&self) -> &[Position] {
        &self.selection
    }

    pub fn is_matched(&self, pos: Position) -> bool {
        self.board.contains(pos) && self.matched[pos.to_index(self.board.side())]
    }

    /// Timer started and game not finished.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.phase != Phase::Complete
    }

    pub fn is_game_complete(&self) -> bool {
        self.pairs_found == self.total_pairs()
    }

    /// Whole seconds since the first click; 0 before it, frozen once complete.
    pub fn elapsed_seconds(&self) -> u64 {
        match (self.started_at, self.stopped_at) {
            (None, _) => 0,
            (Some(start), Some(stop)) => stop.saturating_duration_since(start).as_secs(),
            (Some(start), None) => self.clock.now().saturating_duration_since(start).as_secs(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            moves: self.moves,
            pairs_found: self.pairs_found,
            elapsed_seconds: self.elapsed_seconds(),
        }
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Take and clear the queued notifications.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn select_card(&mut self, pos: Position) -> Result<SelectOutcome, SessionError> {
        if !self.board.contains(pos) {
            return Err(SessionError::OutOfBounds {
                pos,
                side: self.board.side(),
            });
        }

        match self.phase {
            Phase::Evaluating => return Ok(SelectOutcome::Rejected(RejectReason::Evaluating)),
            Phase::Complete => return Ok(SelectOutcome::Rejected(RejectReason::Complete)),
            Phase::Idle => self.start_timer(),
            Phase::AwaitingFirst | Phase::AwaitingSecond => {}
        }

        if let Some(i) = self.selection.iter().position(|&p| p == pos) {
            self.selection.remove(i);
            self.phase = Phase::AwaitingFirst;
            if !self.is_matched(pos) {
                self.events.push(SessionEvent::CardHidden { pos });
            }
            debug!(session = self.id.0, row = pos.row, col = pos.col, "pick undone");
            return Ok(SelectOutcome::Undone);
        }

        let Some(tile) = self.board.get(pos) else {
            return Err(SessionError::OutOfBounds {
                pos,
                side: self.board.side(),
            });
        };
        if !self.is_matched(pos) {
            self.events.push(SessionEvent::CardFlipped { pos, tile });
        }
        self.selection.push(pos);

        if self.selection.len() < 2 {
            self.phase = Phase::AwaitingSecond;
            return Ok(SelectOutcome::FirstPicked);
        }

        self.phase = Phase::Evaluating;
        let first = self.selection[0];
        Ok(self.evaluate(first, pos))
    }

    fn evaluate(&mut self, first: Position, second: Position) -> SelectOutcome {
        let was_matched = self.is_matched(first);
        let is_pair = self.check_match(first, second);
        self.events.push(SessionEvent::MovesChanged { moves: self.moves });

        if !is_pair {
            debug!(session = self.id.0, moves = self.moves, "mismatch");
            self.events.push(SessionEvent::MismatchLocked {
                first,
                second,
                unlock_after_ms: self.setup.mismatch_delay_ms,
            });
            return SelectOutcome::Mismatched { first, second };
        }

        let side = self.board.side();
        self.matched[first.to_index(side)] = true;
        self.matched[second.to_index(side)] = true;
        if let Some(tile) = self.board.get(first) {
            self.events.push(SessionEvent::PairMatched {
                first,
                second,
                tile,
            });
        }
        self.selection.clear();
        self.phase = Phase::AwaitingFirst;
        debug!(
            session = self.id.0,
            moves = self.moves,
            pairs = self.pairs_found,
            "pair matched"
        );

        if self.is_game_complete() {
            self.complete();
        }

        SelectOutcome::Matched {
            first,
            second,
            newly_found: !was_matched,
        }
    }

    /// Count the move and compare the two tiles.
    ///
    /// Re-picking an already matched pair still costs a move but leaves
    /// `pairs_found` alone, so the count never exceeds `pair_count`.
    fn check_match(&mut self, first: Position, second: Position) -> bool {
        self.moves += 1;
        let is_pair = match (self.board.get(first), self.board.get(second)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        if is_pair && !self.is_matched(first) {
            self.pairs_found += 1;
        }
        is_pair
    }

    /// End the mismatch lock window, flipping the unmatched tiles back.
    ///
    /// Returns false (and does nothing) outside a lock window.
    pub fn finish_mismatch(&mut self) -> bool {
        if self.phase != Phase::Evaluating || self.selection.len() != 2 {
            return false;
        }

        let first = self.selection[0];
        let second = self.selection[1];
        match (self.is_matched(first), self.is_matched(second)) {
            (false, false) => self.events.push(SessionEvent::TilesReset { first, second }),
            (true, false) => self.events.push(SessionEvent::CardHidden { pos: second }),
            (false, true) => self.events.push(SessionEvent::CardHidden { pos: first }),
            (true, true) => {}
        }
        self.selection.clear();
        self.phase = Phase::AwaitingFirst;
        true
    }

    /// Queue a time refresh while running. Returns the seconds shown.
    pub fn clock_tick(&mut self) -> Option<u64> {
        if !self.is_running() {
            return None;
        }
        let seconds = self.elapsed_seconds();
        self.events.push(SessionEvent::TimeTick { seconds });
        Some(seconds)
    }

    fn start_timer(&mut self) {
        self.started_at = Some(self.clock.now());
        self.phase = Phase::AwaitingFirst;
        self.events.push(SessionEvent::TimerStarted);
        debug!(session = self.id.0, "timer started");
    }

    fn complete(&mut self) {
        self.stopped_at = Some(self.clock.now());
        self.phase = Phase::Complete;

        let result = GameResult {
            player_name: self.setup.player.as_str().to_string(),
            difficulty: self.setup.difficulty,
            moves: self.moves,
            elapsed_seconds: self.elapsed_seconds(),
            finished_at: self.clock.wall_time(),
        };
        info!(
            session = self.id.0,
            moves = result.moves,
            seconds = result.elapsed_seconds,
            "game complete"
        );

        self.events.push(SessionEvent::TimeTick {
            seconds: result.elapsed_seconds,
        });
        self.events.push(SessionEvent::Finished(result.clone()));
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::NaiveDate;

    fn clock() -> ManualClock {
        ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
    }

    /// Easy board: row 0 = 0 0 1 1, row 1 = 2 2 3 3, ...
    fn easy_board() -> Board {
        let tiles = (0..16u32).map(|i| TileId(i / 2)).collect();
        Board::from_tiles(4, tiles).unwrap()
    }

    fn session_with(clock: ManualClock) -> GameSession<ManualClock> {
        let setup = SessionSetup::new(Difficulty::Easy, PlayerName::parse("Ana").unwrap());
        GameSession::new(SessionId(1), setup, easy_board(), clock).unwrap()
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_new_session_is_idle() {
        let mut s = session_with(clock());
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.elapsed_seconds(), 0);
        assert!(!s.is_running());
        assert_eq!(s.take_events(), vec![SessionEvent::BoardReady { side: 4 }]);
    }

    #[test]
    fn test_board_must_match_difficulty() {
        let setup = SessionSetup::new(Difficulty::Hard, PlayerName::parse("Ana").unwrap());
        let err = GameSession::new(SessionId(1), setup, easy_board(), clock()).unwrap_err();
        assert_eq!(
            err,
            SessionError::BoardSizeMismatch {
                expected: 8,
                actual: 4
            }
        );
    }

    #[test]
    fn test_first_click_starts_timer() {
        let mut s = session_with(clock());
        s.take_events();

        assert_eq!(s.select_card(p(0, 0)), Ok(SelectOutcome::FirstPicked));
        assert!(s.is_running());
        assert_eq!(s.phase(), Phase::AwaitingSecond);
        assert_eq!(
            s.take_events(),
            vec![
                SessionEvent::TimerStarted,
                SessionEvent::CardFlipped {
                    pos: p(0, 0),
                    tile: TileId(0)
                },
            ]
        );
    }

    #[test]
    fn test_same_card_twice_is_undone_without_a_move() {
        let mut s = session_with(clock());
        s.select_card(p(0, 0)).unwrap();
        s.take_events();

        assert_eq!(s.select_card(p(0, 0)), Ok(SelectOutcome::Undone));
        assert!(s.selection().is_empty());
        assert_eq!(s.moves(), 0);
        assert_eq!(s.phase(), Phase::AwaitingFirst);
        assert_eq!(s.take_events(), vec![SessionEvent::CardHidden { pos: p(0, 0) }]);
    }

    #[test]
    fn test_match_clears_selection_immediately() {
        let mut s = session_with(clock());
        s.select_card(p(0, 0)).unwrap();
        let outcome = s.select_card(p(0, 1)).unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                first: p(0, 0),
                second: p(0, 1),
                newly_found: true
            }
        );
        assert_eq!(s.moves(), 1);
        assert_eq!(s.pairs_found(), 1);
        assert!(s.selection().is_empty());
        assert!(s.is_matched(p(0, 0)) && s.is_matched(p(0, 1)));
        assert_eq!(s.phase(), Phase::AwaitingFirst);
    }

    #[test]
    fn test_mismatch_locks_until_finished() {
        let mut s = session_with(clock());
        s.select_card(p(0, 0)).unwrap();
        assert_eq!(
            s.select_card(p(0, 2)),
            Ok(SelectOutcome::Mismatched {
                first: p(0, 0),
                second: p(0, 2)
            })
        );
        assert_eq!(s.phase(), Phase::Evaluating);
        let events = s.take_events();
        assert!(events.contains(&SessionEvent::MismatchLocked {
            first: p(0, 0),
            second: p(0, 2),
            unlock_after_ms: MISMATCH_DELAY_MS
        }));

        // Clicks during the lock change nothing.
        assert_eq!(
            s.select_card(p(1, 0)),
            Ok(SelectOutcome::Rejected(RejectReason::Evaluating))
        );
        assert_eq!(s.moves(), 1);
        assert_eq!(s.selection(), &[p(0, 0), p(0, 2)]);
        assert!(s.take_events().is_empty());

        assert!(s.finish_mismatch());
        assert!(s.selection().is_empty());
        assert_eq!(s.phase(), Phase::AwaitingFirst);
        assert_eq!(
            s.take_events(),
            vec![SessionEvent::TilesReset {
                first: p(0, 0),
                second: p(0, 2)
            }]
        );
        assert!(!s.finish_mismatch());
    }

    #[test]
    fn test_rematching_a_found_pair_costs_a_move_only() {
        let mut s = session_with(clock());
        s.select_card(p(0, 0)).unwrap();
        s.select_card(p(0, 1)).unwrap();
        s.take_events();

        let outcome = s.select_card(p(0, 1)).unwrap();
        assert_eq!(outcome, SelectOutcome::FirstPicked);
        let outcome = s.select_card(p(0, 0)).unwrap();
        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                first: p(0, 1),
                second: p(0, 0),
                newly_found: false
            }
        );
        assert_eq!(s.moves(), 2);
        assert_eq!(s.pairs_found(), 1);
    }

    #[test]
    fn test_mismatch_with_matched_tile_only_hides_the_other() {
        let mut s = session_with(clock());
        s.select_card(p(0, 0)).unwrap();
        s.select_card(p(0, 1)).unwrap();
        s.select_card(p(0, 0)).unwrap();
        s.select_card(p(1, 0)).unwrap();
        s.take_events();

        assert!(s.finish_mismatch());
        assert_eq!(s.take_events(), vec![SessionEvent::CardHidden { pos: p(1, 0) }]);
        assert!(s.is_matched(p(0, 0)));
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let mut s = session_with(clock());
        assert_eq!(
            s.select_card(p(4, 0)),
            Err(SessionError::OutOfBounds {
                pos: p(4, 0),
                side: 4
            })
        );
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_full_solve_completes_and_freezes_time() {
        let clock = clock();
        let mut s = session_with(clock.clone());

        for pair in 0..8usize {
            let row = pair / 2;
            let col = (pair % 2) * 2;
            clock.advance_ms(1000);
            s.select_card(p(row, col)).unwrap();
            s.select_card(p(row, col + 1)).unwrap();
            if pair < 7 {
                assert!(!s.is_game_complete());
            }
        }

        assert!(s.is_game_complete());
        assert_eq!(s.phase(), Phase::Complete);
        assert_eq!(s.moves(), 8);
        // Timer started at the first click, after the first 1000ms advance.
        assert_eq!(s.elapsed_seconds(), 7);

        clock.advance_ms(60_000);
        assert_eq!(s.elapsed_seconds(), 7);
        assert_eq!(s.clock_tick(), None);

        let result = s.result().cloned().unwrap();
        assert_eq!(result.player_name, "Ana");
        assert_eq!(result.moves, 8);
        assert_eq!(result.elapsed_seconds, 7);
        let events = s.take_events();
        assert_eq!(events.last(), Some(&SessionEvent::Finished(result.clone())));

        assert_eq!(
            s.select_card(p(0, 0)),
            Ok(SelectOutcome::Rejected(RejectReason::Complete))
        );
        assert_eq!(result.to_score_entry().timestamp, result.finished_at);
    }

    #[test]
    fn test_elapsed_is_monotonic_while_running() {
        let clock = clock();
        let mut s = session_with(clock.clone());
        s.select_card(p(0, 0)).unwrap();

        let mut last = 0;
        for _ in 0..5 {
            clock.advance_ms(700);
            let now = s.elapsed_seconds();
            assert!(now >= last);
            last = now;
        }
        assert_eq!(last, 3);
        assert_eq!(s.clock_tick(), Some(3));
    }

    #[test]
    fn test_stats_track_counters() {
        let mut s = session_with(clock());
        s.select_card(p(0, 0)).unwrap();
        s.select_card(p(0, 1)).unwrap();
        assert_eq!(
            s.stats(),
            SessionStats {
                moves: 1,
                pairs_found: 1,
                elapsed_seconds: 0
            }
        );
    }
}
