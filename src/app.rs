//! Application state machine: menu, prompts, loading and play.
//!
//! `App` owns everything that outlives a single game (configuration, the
//! leaderboard store, the shared scheduler, cached tile faces) plus the current
//! screen. The binary feeds it terminal events and elapsed time and asks it to
//! draw; nothing here touches the terminal directly.

use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info, warn};

use crate::assets::{AssetLoader, FaceSet, FaceSource, LoadStatus};
use crate::core::{
    Board, GameSession, Leaderboard, PlayerName, ScoreStore, Scheduler, SessionId, SessionSetup,
    SimpleRng, SystemClock,
};
use crate::engine::{AppConfig, ControllerTimings, SessionController};
use crate::input::{is_interrupt, map_key, should_quit, LineInput, PromptEvent};
use crate::term::{
    render_loading, render_menu, render_prompt, render_stats, BoardScreen, BoardView, FrameBuffer,
    Viewport,
};
use crate::types::{Difficulty, Position, UiAction, LOADING_POLL_MS, MAX_PLAYER_NAME_LEN};

pub const MENU_ITEMS: [&str; 3] = ["Play", "Stats", "Quit"];

const DIFFICULTY_PROMPT: &str = "Difficulty (easy / medium / hard)";
const NAME_PROMPT: &str = "Player name";
const INVALID_DIFFICULTY: &str = "Invalid difficulty.";
const DIFFICULTY_INPUT_LEN: usize = 12;

pub type Controller = SessionController<BoardScreen, SystemClock>;

pub enum Screen {
    Menu {
        selected: usize,
    },
    Stats {
        leaderboard: Leaderboard,
    },
    AskDifficulty {
        input: LineInput,
        error: Option<String>,
    },
    AskName {
        difficulty: Difficulty,
        input: LineInput,
        error: Option<String>,
    },
    Loading {
        difficulty: Difficulty,
        player: PlayerName,
        loader: AssetLoader,
        since_poll_ms: u32,
    },
    Playing {
        controller: Box<Controller>,
        cursor: Position,
    },
}

pub struct App {
    config: AppConfig,
    store: ScoreStore,
    scheduler: Scheduler,
    screen: Screen,
    faces: Option<FaceSet>,
    view: BoardView,
    base_seed: u32,
    next_session_id: u64,
    last_difficulty: Option<Difficulty>,
    last_name: Option<String>,
    quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let base_seed = config.seed.unwrap_or_else(clock_seed);
        let store = ScoreStore::new(config.scores_path.clone());
        info!(
            scores = %store.path().display(),
            seed = base_seed,
            "starting"
        );
        Self {
            config,
            store,
            scheduler: Scheduler::new(),
            screen: Screen::Menu { selected: 0 },
            faces: None,
            view: BoardView::default(),
            base_seed,
            next_session_id: 1,
            last_difficulty: None,
            last_name: None,
            quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The live game, if one is on screen.
    pub fn controller(&self) -> Option<&Controller> {
        match &self.screen {
            Screen::Playing { controller, .. } => Some(controller.as_ref()),
            _ => None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_interrupt(key) {
            self.request_quit();
            return;
        }

        match &mut self.screen {
            Screen::Menu { selected } => {
                if should_quit(key) {
                    self.request_quit();
                    return;
                }
                match map_key(key) {
                    Some(UiAction::Up) => *selected = (*selected + MENU_ITEMS.len() - 1) % MENU_ITEMS.len(),
                    Some(UiAction::Down) => *selected = (*selected + 1) % MENU_ITEMS.len(),
                    Some(UiAction::Confirm) => {
                        let choice = *selected;
                        self.choose_menu_item(choice);
                    }
                    Some(UiAction::Back) => self.request_quit(),
                    _ => {}
                }
            }
            Screen::Stats { .. } => {
                if matches!(map_key(key), Some(UiAction::Back | UiAction::Confirm)) || should_quit(key) {
                    self.screen = Screen::Menu { selected: 1 };
                }
            }
            Screen::AskDifficulty { input, error } => match input.handle_key(key) {
                PromptEvent::Submitted(text) => match Difficulty::from_str(&text) {
                    Some(difficulty) => self.ask_name(difficulty),
                    None => {
                        debug!(input = %text, "rejected difficulty");
                        *error = Some(INVALID_DIFFICULTY.to_string());
                    }
                },
                PromptEvent::Cancelled => self.screen = Screen::Menu { selected: 0 },
                PromptEvent::Edited => *error = None,
                PromptEvent::Ignored => {}
            },
            Screen::AskName {
                difficulty,
                input,
                error,
            } => match input.handle_key(key) {
                PromptEvent::Submitted(text) => match PlayerName::parse(&text) {
                    Ok(player) => {
                        let difficulty = *difficulty;
                        self.begin_loading(difficulty, player);
                    }
                    Err(e) => *error = Some(e.to_string()),
                },
                PromptEvent::Cancelled => self.ask_difficulty(),
                PromptEvent::Edited => *error = None,
                PromptEvent::Ignored => {}
            },
            Screen::Loading { .. } => {
                if matches!(map_key(key), Some(UiAction::Back)) {
                    info!("loading cancelled");
                    self.screen = Screen::Menu { selected: 0 };
                } else if should_quit(key) {
                    self.request_quit();
                }
            }
            Screen::Playing { controller, cursor } => {
                if should_quit(key) {
                    self.request_quit();
                    return;
                }
                let finished = controller.result().is_some();
                let side = controller.session().board().side();
                match map_key(key) {
                    Some(UiAction::Confirm | UiAction::Back) if finished => self.leave_game(),
                    Some(UiAction::Back) => self.leave_game(),
                    Some(UiAction::Confirm) => {
                        let pos = *cursor;
                        if let Err(e) = controller.on_click(&mut self.scheduler, pos) {
                            warn!(error = %e, "click rejected");
                        }
                    }
                    Some(UiAction::Up) => cursor.row = cursor.row.saturating_sub(1),
                    Some(UiAction::Down) => cursor.row = (cursor.row + 1).min(side - 1),
                    Some(UiAction::Left) => cursor.col = cursor.col.saturating_sub(1),
                    Some(UiAction::Right) => cursor.col = (cursor.col + 1).min(side - 1),
                    None => {}
                }
            }
        }
    }

    /// Left clicks on a tile select it. Gaps and other screens ignore mice.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, viewport: Viewport) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        let Screen::Playing { controller, cursor } = &mut self.screen else {
            return;
        };
        if controller.result().is_some() {
            return;
        }

        let layout = self.view.layout(controller.session().board().side(), viewport);
        let Some(pos) = layout.hit_test(mouse.column, mouse.row) else {
            return;
        };
        *cursor = pos;
        if let Err(e) = controller.on_click(&mut self.scheduler, pos) {
            warn!(error = %e, "click rejected");
        }
    }

    /// Advance time: run due tasks and poll a pending face load.
    pub fn tick(&mut self, elapsed_ms: u32) {
        for due in self.scheduler.advance(elapsed_ms) {
            match &mut self.screen {
                Screen::Playing { controller, .. } => {
                    controller.handle_task(&mut self.scheduler, due);
                }
                _ => debug!(task = ?due.task, owner = due.owner.0, "discarding task with no live session"),
            }
        }

        let Screen::Loading {
            difficulty,
            player,
            loader,
            since_poll_ms,
        } = &mut self.screen
        else {
            return;
        };
        *since_poll_ms = since_poll_ms.saturating_add(elapsed_ms);
        if *since_poll_ms < LOADING_POLL_MS {
            return;
        }
        *since_poll_ms = 0;

        let count = difficulty.pair_count();
        let faces = match loader.poll() {
            LoadStatus::Pending { .. } => return,
            LoadStatus::Ready(faces) => faces,
            LoadStatus::Failed => {
                warn!("face acquisition failed, using placeholders");
                FaceSet::placeholders(count)
            }
        };
        let (difficulty, player) = (*difficulty, player.clone());
        self.start_game(difficulty, player, faces);
    }

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        match &self.screen {
            Screen::Menu { selected } => render_menu(fb, viewport, &MENU_ITEMS, *selected),
            Screen::Stats { leaderboard } => render_stats(fb, viewport, leaderboard),
            Screen::AskDifficulty { input, error } => {
                render_prompt(fb, viewport, DIFFICULTY_PROMPT, input.text(), error.as_deref())
            }
            Screen::AskName { input, error, .. } => {
                render_prompt(fb, viewport, NAME_PROMPT, input.text(), error.as_deref())
            }
            Screen::Loading { loader, .. } => render_loading(fb, viewport, loader.loaded(), loader.total()),
            Screen::Playing { controller, cursor } => {
                let cursor = controller.result().is_none().then_some(*cursor);
                self.view.render_into(controller.renderer(), cursor, viewport, fb);
            }
        }
    }

    fn request_quit(&mut self) {
        if let Screen::Playing { controller, .. } = &mut self.screen {
            controller.teardown(&mut self.scheduler);
        }
        self.quit = true;
    }

    fn choose_menu_item(&mut self, choice: usize) {
        match MENU_ITEMS.get(choice).copied() {
            Some("Play") => self.ask_difficulty(),
            Some("Stats") => {
                self.screen = Screen::Stats {
                    leaderboard: self.store.load(),
                }
            }
            _ => self.request_quit(),
        }
    }

    fn ask_difficulty(&mut self) {
        let prefill = self.last_difficulty.map(|d| d.as_str()).unwrap_or_default();
        self.screen = Screen::AskDifficulty {
            input: LineInput::with_text(DIFFICULTY_INPUT_LEN, prefill),
            error: None,
        };
    }

    fn ask_name(&mut self, difficulty: Difficulty) {
        self.last_difficulty = Some(difficulty);
        let prefill = self.last_name.as_deref().unwrap_or_default();
        self.screen = Screen::AskName {
            difficulty,
            input: LineInput::with_text(MAX_PLAYER_NAME_LEN, prefill),
            error: None,
        };
    }

    fn begin_loading(&mut self, difficulty: Difficulty, player: PlayerName) {
        self.last_name = Some(player.as_str().to_string());
        let count = difficulty.pair_count();

        if let Some(faces) = self.faces.as_ref().filter(|f| f.covers(count)) {
            debug!(count, "reusing loaded faces");
            let faces = faces.clone();
            self.start_game(difficulty, player, faces);
            return;
        }

        let source = FaceSource::from_path(self.config.faces_path.clone());
        match AssetLoader::start(source, count) {
            Ok(loader) => {
                self.screen = Screen::Loading {
                    difficulty,
                    player,
                    loader,
                    since_poll_ms: 0,
                }
            }
            Err(e) => {
                warn!(error = %e, "could not start face loader, using built-in faces");
                self.start_game(difficulty, player, FaceSet::builtin(count));
            }
        }
    }

    fn start_game(&mut self, difficulty: Difficulty, player: PlayerName, faces: FaceSet) {
        if faces.missing() == 0 {
            self.faces = Some(faces.clone());
        }

        let id = SessionId(self.next_session_id);
        self.next_session_id += 1;
        let mut rng = SimpleRng::new(self.base_seed.wrapping_add(id.0 as u32));
        let board = Board::for_difficulty(difficulty, &mut rng);

        let screen = BoardScreen::new(faces, player.as_str(), difficulty);
        let setup = SessionSetup::new(difficulty, player).with_mismatch_delay_ms(self.config.mismatch_delay_ms);
        match GameSession::new(id, setup, board, SystemClock) {
            Ok(session) => {
                let controller = SessionController::new(
                    session,
                    screen,
                    Some(self.store.clone()),
                    ControllerTimings::default(),
                    &mut self.scheduler,
                );
                self.screen = Screen::Playing {
                    controller: Box::new(controller),
                    cursor: Position::new(0, 0),
                };
            }
            Err(e) => {
                warn!(error = %e, "could not start session");
                self.screen = Screen::Menu { selected: 0 };
            }
        }
    }

    fn leave_game(&mut self) {
        if let Screen::Playing { controller, .. } = &mut self.screen {
            controller.teardown(&mut self.scheduler);
        }
        self.screen = Screen::Menu { selected: 0 };
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
