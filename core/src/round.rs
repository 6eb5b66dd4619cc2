use web_time::Instant;

use crate::*;

/// What an input did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored(IgnoreReason),
    /// A guess was scored and applied.
    Guessed {
        kind: GuessKind,
        coords: Coord2,
        delta: Score,
        total: Score,
        /// The guess revealed the last hidden cell, a restart is scheduled.
        cleared: bool,
    },
    /// The board was regenerated with a new configuration.
    Reconfigured { size: Coord, mine_count: CellCount },
}

impl Outcome {
    /// Whether a new snapshot should be published.
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Steps taken by one configuration change, in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    SizeChanged(Coord),
    MineCountChanged(CellCount),
    Regenerated,
}

/// What deferred work did when [`RoundController::tick`] ran.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub released: usize,
    pub restarted: bool,
}

/// Owns one game session: the configuration, the live board and its reveal state, the chat log,
/// and the score and cooldown ledgers composed into it.
///
/// Inputs are processed one at a time to completion. The two deferred mechanisms, cooldown
/// release and the restart after a full clear, only run from [`RoundController::tick`], and
/// both are tied to the board generation they were scheduled against.
#[derive(Debug)]
pub struct RoundController<G = RandomBoardGenerator> {
    config: GameConfig,
    timings: Timings,
    generator: G,
    engine: RevealEngine,
    chat_log: ChatLog,
    scores: ScoreTracker,
    cooldowns: CooldownManager,
    generation: Generation,
    restarts: TimerQueue<Generation>,
}

impl RoundController<RandomBoardGenerator> {
    pub fn new(settings: &SessionSettings) -> Self {
        Self::with_parts(
            settings.game,
            settings.timings,
            RandomBoardGenerator::from_seed(settings.seed),
            ScoreTracker::new(),
            CooldownManager::new(),
        )
    }
}

impl Default for RoundController<RandomBoardGenerator> {
    fn default() -> Self {
        Self::new(&SessionSettings::default())
    }
}

impl<G: BoardGenerator> RoundController<G> {
    /// Starts a session with a freshly generated board.
    pub fn with_parts(
        config: GameConfig,
        timings: Timings,
        mut generator: G,
        scores: ScoreTracker,
        cooldowns: CooldownManager,
    ) -> Self {
        let config = config.clamped();
        let engine = RevealEngine::new(generator.generate(config.size, config.mine_count));
        log::debug!(
            "Session started on a {}x{} board with {} mines",
            config.size,
            config.size,
            config.mine_count
        );
        Self {
            config,
            timings,
            generator,
            engine,
            chat_log: ChatLog::default(),
            scores,
            cooldowns,
            generation: Generation::default(),
            restarts: TimerQueue::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn chat_log(&self) -> &ChatLog {
        &self.chat_log
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub fn cooldowns(&self) -> &CooldownManager {
        &self.cooldowns
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.engine, self.generation, &self.scores, &self.chat_log)
    }

    /// Parses and applies one chat message.
    pub fn handle_chat(&mut self, event: &ChatEvent, now: Instant) -> Outcome {
        let action = parse_action(&event.message, event.is_moderator, self.config.size);
        let outcome = self.apply(action, &event.user, &event.color, now);
        match &outcome {
            Outcome::Ignored(reason) => {
                log::trace!("Ignored {:?} from {}: {:?}", event.message, event.user, reason)
            }
            outcome => log::debug!("{} sent {:?}: {:?}", event.user, event.message, outcome),
        }
        outcome
    }

    /// A left click on the local screen.
    pub fn check_tile(&mut self, coords: Coord2, now: Instant) -> Outcome {
        self.apply(Action::CheckTile(coords), LOCAL_USER, LOCAL_COLOR, now)
    }

    /// A right click on the local screen.
    pub fn flag_tile(&mut self, coords: Coord2, now: Instant) -> Outcome {
        self.apply(Action::FlagTile(coords), LOCAL_USER, LOCAL_COLOR, now)
    }

    /// Applies an already parsed action on behalf of `identity`.
    ///
    /// Deferred work due at `now` runs first, so an ended cooldown or a pending restart is
    /// settled before the action sees the board. Call [`RoundController::tick`] beforehand to
    /// observe that work separately.
    pub fn apply(&mut self, action: Action, identity: &str, color: &str, now: Instant) -> Outcome {
        let due = self.tick(now);
        if due.restarted || due.released > 0 {
            log::trace!("Settled due work before {:?}: {:?}", action, due);
        }

        match action {
            Action::CheckTile(coords) => self.guess(GuessKind::Check, coords, identity, color, now),
            Action::FlagTile(coords) => self.guess(GuessKind::Flag, coords, identity, color, now),
            Action::ResizeBoard(size) => {
                self.resize(size);
                self.reconfigured()
            }
            Action::SetMineCount(mine_count) => {
                self.set_mine_count(mine_count);
                self.reconfigured()
            }
            Action::Ignored(reason) => Outcome::Ignored(reason),
        }
    }

    fn guess(
        &mut self,
        kind: GuessKind,
        coords: Coord2,
        identity: &str,
        color: &str,
        now: Instant,
    ) -> Outcome {
        if !self.engine.board().contains(coords) {
            return Outcome::Ignored(IgnoreReason::OutOfBounds);
        }
        if self.cooldowns.is_throttled(identity) {
            return Outcome::Ignored(IgnoreReason::Throttled);
        }
        if self.engine.is_revealed(coords) {
            return Outcome::Ignored(IgnoreReason::AlreadyRevealed);
        }

        let on_mine = self.engine.board().contains_mine(coords);
        let (event, reveal) = match kind {
            GuessKind::Check => (ScoreEvent::for_check(on_mine), self.engine.reveal(coords)),
            GuessKind::Flag => (ScoreEvent::for_flag(on_mine), self.engine.flag(coords)),
        };
        let delta = event.delta();
        let total = self.scores.adjust(identity, delta);

        self.chat_log.push(ChatEntry {
            user: identity.to_owned(),
            color: color.to_owned(),
            kind,
            coords,
            delta,
        });
        self.cooldowns
            .throttle(identity, self.timings.cooldown(), now, self.generation);

        let cleared = reveal == RevealOutcome::Cleared;
        if cleared {
            self.schedule_restart(now);
        }

        Outcome::Guessed {
            kind,
            coords,
            delta,
            total,
            cleared,
        }
    }

    fn reconfigured(&self) -> Outcome {
        Outcome::Reconfigured {
            size: self.config.size,
            mine_count: self.config.mine_count,
        }
    }

    /// Changes the board side, keeping the mine ratio, and regenerates.
    ///
    /// When the ratio yields the current mine count the board is regenerated at once, otherwise
    /// the mine count change does the regenerating.
    pub fn resize(&mut self, size: Coord) -> Vec<Transition> {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let plan = self.config.plan_resize(size);
        self.config.size = size;

        let mut transitions = vec![Transition::SizeChanged(size)];
        match plan {
            ResizePlan::Regenerate => {
                self.regenerate();
                transitions.push(Transition::Regenerated);
            }
            ResizePlan::ChangeMineCount(mine_count) => {
                transitions.extend(self.set_mine_count(mine_count));
            }
        }
        transitions
    }

    /// Sets the mine count, clamped into `(0, size²)`, and regenerates.
    pub fn set_mine_count(&mut self, mine_count: CellCount) -> Vec<Transition> {
        self.config.mine_count = GameConfig {
            mine_count,
            ..self.config
        }
        .clamped()
        .mine_count;
        self.regenerate();
        vec![
            Transition::MineCountChanged(self.config.mine_count),
            Transition::Regenerated,
        ]
    }

    /// Deals a new board with the current configuration. Scores survive; the chat log and every
    /// throttle do not.
    fn regenerate(&mut self) {
        self.generation = self.generation.next();
        let board = self
            .generator
            .generate(self.config.size, self.config.mine_count);
        self.engine = RevealEngine::new(board);
        self.chat_log.clear();
        self.cooldowns.release_all();
        log::debug!(
            "Generation {}: {}x{} board with {} mines",
            self.generation.get(),
            self.config.size,
            self.config.size,
            self.config.mine_count
        );
    }

    fn schedule_restart(&mut self, now: Instant) {
        let deadline = now + self.timings.restart_delay();
        self.restarts.schedule(deadline, self.generation);
        log::debug!(
            "Board cleared, restarting in {:?}",
            self.timings.restart_delay()
        );
    }

    /// Runs every deferred callback due at `now`.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport {
            released: self.cooldowns.expire_due(now, self.generation),
            restarted: false,
        };

        while let Some(generation) = self.restarts.pop_due(now) {
            if generation == self.generation {
                self.regenerate();
                report.restarted = true;
            } else {
                log::trace!(
                    "Dropped stale restart from generation {}",
                    generation.get()
                );
            }
        }
        report
    }

    /// When [`RoundController::tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.cooldowns.next_deadline(), self.restarts.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
