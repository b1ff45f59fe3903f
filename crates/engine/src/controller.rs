//! SessionController: routes clicks into a session and its notifications out.
//!
//! The controller owns a [`GameSession`] and the [`BoardRenderer`] it draws
//! on. It schedules the session's deferred work on a [`Scheduler`] shared with
//! the rest of the application, and only acts on due tasks that belong to its
//! own, still-live session.

use tracing::{debug, info, warn};

use crate::core::{
    BoardRenderer, Clock, DueTask, GameResult, GameSession, Leaderboard, ScoreStore, Scheduler,
    SelectOutcome, SessionError, SessionEvent, SessionId, SystemClock, Task, TaskId,
};
use crate::types::{Position, TileVisual, CLOCK_TICK_MS};

/// Timing of the controller-driven refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerTimings {
    pub clock_tick_ms: u32,
}

impl Default for ControllerTimings {
    fn default() -> Self {
        Self {
            clock_tick_ms: CLOCK_TICK_MS,
        }
    }
}

pub struct SessionController<R: BoardRenderer, C: Clock = SystemClock> {
    session: GameSession<C>,
    renderer: R,
    scores: Option<ScoreStore>,
    timings: ControllerTimings,
    unlock_task: Option<TaskId>,
    clock_task: Option<TaskId>,
    leaderboard: Option<Leaderboard>,
    torn_down: bool,
}

impl<R: BoardRenderer, C: Clock> SessionController<R, C> {
    /// Wrap a fresh session and forward its initial notifications.
    ///
    /// Passing `None` for `scores` plays without persisting results.
    pub fn new(
        session: GameSession<C>,
        renderer: R,
        scores: Option<ScoreStore>,
        timings: ControllerTimings,
        scheduler: &mut Scheduler,
    ) -> Self {
        let mut controller = Self {
            session,
            renderer,
            scores,
            timings,
            unlock_task: None,
            clock_task: None,
            leaderboard: None,
            torn_down: false,
        };
        controller.dispatch(scheduler);
        controller
    }

    pub fn session(&self) -> &GameSession<C> {
        &self.session
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.session.result()
    }

    /// Leaderboard as written after this game finished, if it was saved.
    pub fn leaderboard(&self) -> Option<&Leaderboard> {
        self.leaderboard.as_ref()
    }

    /// A mismatch unlock is waiting to run.
    pub fn is_locked(&self) -> bool {
        self.unlock_task.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Forward a click on a board position.
    pub fn on_click(&mut self, scheduler: &mut Scheduler, pos: Position) -> Result<SelectOutcome, SessionError> {
        if self.torn_down {
            return Err(SessionError::TornDown);
        }
        let outcome = self.session.select_card(pos)?;
        debug!(
            session = self.session.id().0,
            row = pos.row,
            col = pos.col,
            outcome = ?outcome,
            "click"
        );
        self.dispatch(scheduler);
        Ok(outcome)
    }

    /// Run a task that came due. Tasks of other or torn-down sessions are
    /// dropped. Returns whether the task was run.
    pub fn handle_task(&mut self, scheduler: &mut Scheduler, due: DueTask) -> bool {
        if self.torn_down || due.owner != self.session.id() {
            debug!(
                task = ?due.task,
                owner = due.owner.0,
                live = self.session.id().0,
                "discarding stale task"
            );
            return false;
        }

        match due.task {
            Task::HideMismatch => {
                if self.unlock_task == Some(due.id) {
                    self.unlock_task = None;
                }
                self.session.finish_mismatch();
            }
            Task::ClockTick => {
                if self.clock_task == Some(due.id) {
                    self.clock_task = None;
                }
                if self.session.clock_tick().is_some() {
                    self.arm_clock(scheduler);
                }
            }
        }
        self.dispatch(scheduler);
        true
    }

    /// Cancel the session's pending tasks and destroy the board.
    ///
    /// Idempotent.
    pub fn teardown(&mut self, scheduler: &mut Scheduler) {
        if self.torn_down {
            return;
        }
        let cancelled = scheduler.cancel_owner(self.session.id());
        self.unlock_task = None;
        self.clock_task = None;
        self.torn_down = true;
        self.renderer.destroy_board();
        info!(session = self.session.id().0, cancelled, "session torn down");
    }

    fn arm_clock(&mut self, scheduler: &mut Scheduler) {
        let id = scheduler.schedule(self.session.id(), self.timings.clock_tick_ms, Task::ClockTick);
        self.clock_task = Some(id);
    }

    fn dispatch(&mut self, scheduler: &mut Scheduler) {
        for event in self.session.take_events() {
            match event {
                SessionEvent::BoardReady { side } => self.renderer.create_board(side),
                SessionEvent::TimerStarted => self.arm_clock(scheduler),
                SessionEvent::CardFlipped { pos, tile } => {
                    self.renderer.update_tile(pos, TileVisual::Revealed(tile))
                }
                SessionEvent::CardHidden { pos } => self.renderer.update_tile(pos, TileVisual::Hidden),
                SessionEvent::PairMatched {
                    first,
                    second,
                    tile,
                } => {
                    self.renderer.update_tile(first, TileVisual::Matched(tile));
                    self.renderer.update_tile(second, TileVisual::Matched(tile));
                }
                SessionEvent::MismatchLocked {
                    unlock_after_ms, ..
                } => {
                    let id = scheduler.schedule(self.session.id(), unlock_after_ms, Task::HideMismatch);
                    self.unlock_task = Some(id);
                }
                SessionEvent::TilesReset { first, second } => self.renderer.reset_tiles(first, second),
                SessionEvent::MovesChanged { moves } => self.renderer.update_move_count(moves),
                SessionEvent::TimeTick { seconds } => self.renderer.update_time(seconds),
                SessionEvent::Finished(result) => self.finish(scheduler, result),
            }
        }
    }

    fn finish(&mut self, scheduler: &mut Scheduler, result: GameResult) {
        if let Some(id) = self.clock_task.take() {
            scheduler.cancel(id);
        }

        if let Some(store) = &self.scores {
            match store.save(result.to_score_entry()) {
                Ok(board) => self.leaderboard = Some(board),
                Err(e) => warn!(error = %e, "could not save leaderboard"),
            }
        }

        self.renderer
            .show_completion_dialog(&result.player_name, result.moves, result.elapsed_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, ManualClock, PlayerName, SessionSetup};
    use crate::types::{Difficulty, TileId, MISMATCH_DELAY_MS};
    use chrono::NaiveDate;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Create(usize),
        Tile(Position, TileVisual),
        Reset(Position, Position),
        Moves(u32),
        Time(u64),
        Dialog(String, u32, u64),
        Destroy,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl BoardRenderer for Recorder {
        fn create_board(&mut self, side: usize) {
            self.calls.push(Call::Create(side));
        }
        fn update_tile(&mut self, pos: Position, visual: TileVisual) {
            self.calls.push(Call::Tile(pos, visual));
        }
        fn reset_tiles(&mut self, first: Position, second: Position) {
            self.calls.push(Call::Reset(first, second));
        }
        fn update_move_count(&mut self, moves: u32) {
            self.calls.push(Call::Moves(moves));
        }
        fn update_time(&mut self, seconds: u64) {
            self.calls.push(Call::Time(seconds));
        }
        fn show_completion_dialog(&mut self, player_name: &str, moves: u32, seconds: u64) {
            self.calls.push(Call::Dialog(player_name.to_string(), moves, seconds));
        }
        fn destroy_board(&mut self) {
            self.calls.push(Call::Destroy);
        }
    }

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn clock() -> ManualClock {
        ManualClock::new(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        )
    }

    /// Row 0 = 0 0 1 1, row 1 = 2 2 3 3, ...
    fn controller(
        clock: ManualClock,
        scores: Option<ScoreStore>,
        scheduler: &mut Scheduler,
    ) -> SessionController<Recorder, ManualClock> {
        let tiles = (0..16u32).map(|i| TileId(i / 2)).collect();
        let board = Board::from_tiles(4, tiles).unwrap();
        let setup = SessionSetup::new(Difficulty::Easy, PlayerName::parse("Ana").unwrap());
        let session = GameSession::new(SessionId(1), setup, board, clock).unwrap();
        SessionController::new(
            session,
            Recorder::default(),
            scores,
            ControllerTimings::default(),
            scheduler,
        )
    }

    fn run_due(c: &mut SessionController<Recorder, ManualClock>, scheduler: &mut Scheduler, ms: u32) -> usize {
        let mut ran = 0;
        for due in scheduler.advance(ms) {
            if c.handle_task(scheduler, due) {
                ran += 1;
            }
        }
        ran
    }

    #[test]
    fn new_controller_creates_the_board() {
        let mut sched = Scheduler::new();
        let c = controller(clock(), None, &mut sched);
        assert_eq!(c.renderer().calls, vec![Call::Create(4)]);
        assert_eq!(sched.pending_len(), 0);
    }

    #[test]
    fn mismatch_hides_after_the_delay_and_rejects_clicks_meanwhile() {
        let mut sched = Scheduler::new();
        let mut c = controller(clock(), None, &mut sched);

        c.on_click(&mut sched, p(0, 0)).unwrap();
        c.on_click(&mut sched, p(0, 2)).unwrap();
        assert!(c.is_locked());

        assert_eq!(
            c.on_click(&mut sched, p(1, 0)).unwrap(),
            SelectOutcome::Rejected(crate::core::RejectReason::Evaluating)
        );
        assert_eq!(c.session().moves(), 1);

        assert_eq!(run_due(&mut c, &mut sched, MISMATCH_DELAY_MS - 1), 0);
        assert_eq!(run_due(&mut c, &mut sched, 1), 1);
        assert!(!c.is_locked());
        assert_eq!(c.renderer().calls.last(), Some(&Call::Reset(p(0, 0), p(0, 2))));
        assert!(matches!(
            c.on_click(&mut sched, p(1, 0)).unwrap(),
            SelectOutcome::FirstPicked
        ));
    }

    #[test]
    fn clock_tick_rearms_while_running() {
        let clock = clock();
        let mut sched = Scheduler::new();
        let mut c = controller(clock.clone(), None, &mut sched);
        c.on_click(&mut sched, p(0, 0)).unwrap();
        assert_eq!(sched.pending_len(), 1);

        for second in 1..=3u64 {
            clock.advance_ms(CLOCK_TICK_MS as u64);
            assert_eq!(run_due(&mut c, &mut sched, CLOCK_TICK_MS), 1);
            assert_eq!(c.renderer().calls.last(), Some(&Call::Time(second)));
            assert_eq!(sched.pending_len(), 1);
        }
    }

    #[test]
    fn teardown_cancels_tasks_and_drops_stale_ones() {
        let mut sched = Scheduler::new();
        let mut c = controller(clock(), None, &mut sched);
        c.on_click(&mut sched, p(0, 0)).unwrap();
        c.on_click(&mut sched, p(0, 2)).unwrap();
        assert_eq!(sched.pending_len(), 2);

        c.teardown(&mut sched);
        c.teardown(&mut sched);
        assert_eq!(sched.pending_len(), 0);
        assert_eq!(c.renderer().calls.last(), Some(&Call::Destroy));

        let calls = c.renderer().calls.len();
        sched.schedule(SessionId(1), 0, Task::HideMismatch);
        sched.schedule(SessionId(2), 0, Task::ClockTick);
        assert_eq!(run_due(&mut c, &mut sched, 0), 0);
        assert_eq!(c.renderer().calls.len(), calls);
        assert_eq!(c.on_click(&mut sched, p(0, 0)), Err(SessionError::TornDown));
    }

    #[test]
    fn tasks_of_other_sessions_are_ignored() {
        let mut sched = Scheduler::new();
        let mut c = controller(clock(), None, &mut sched);
        sched.schedule(SessionId(7), 0, Task::ClockTick);
        assert_eq!(run_due(&mut c, &mut sched, 0), 0);
        assert_eq!(c.renderer().calls, vec![Call::Create(4)]);
    }

    fn solve(c: &mut SessionController<Recorder, ManualClock>, sched: &mut Scheduler) {
        for row in 0..4 {
            for col in [0, 2] {
                c.on_click(sched, p(row, col)).unwrap();
                c.on_click(sched, p(row, col + 1)).unwrap();
            }
        }
    }

    #[test]
    fn completion_saves_and_shows_the_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(dir.path().join("ranking.txt"));
        let clock = clock();
        let mut sched = Scheduler::new();
        let mut c = controller(clock.clone(), Some(store.clone()), &mut sched);

        c.on_click(&mut sched, p(0, 0)).unwrap();
        clock.advance_ms(42_000);
        c.on_click(&mut sched, p(0, 1)).unwrap();
        solve(&mut c, &mut sched);

        assert_eq!(
            c.renderer().calls.last(),
            Some(&Call::Dialog("Ana".to_string(), 9, 42))
        );
        assert_eq!(sched.pending_len(), 0);
        let saved = c.leaderboard().unwrap();
        assert_eq!(saved.entries(Difficulty::Easy)[0].moves, 9);
        assert_eq!(store.load(), *saved);
    }

    #[test]
    fn failed_save_still_shows_the_dialog() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a leaderboard file.
        let store = ScoreStore::new(dir.path());
        let mut sched = Scheduler::new();
        let mut c = controller(clock(), Some(store), &mut sched);

        solve(&mut c, &mut sched);

        assert!(c.leaderboard().is_none());
        assert!(matches!(c.renderer().calls.last(), Some(Call::Dialog(_, 8, 0))));
    }
}
