//! Play session built on top of the engine.
//!
//! The session owns the current cube and layers the bookkeeping around it:
//! move history, the solve timer, scramble sequencing, and statistics.
//!
//! Timer policy: scramble moves never start the timer. The timer starts on
//! the first player move after a reset or scramble, and stops when a player
//! move solves the cube. Undo never counts as a solve.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;

use crate::engine::{self, Twist};
use crate::geometry::{Axis, Direction};
use crate::pieces::Cube;
use crate::stats::Stats;

/// Number of random moves in a scramble unless configured otherwise.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Default location of the statistics file.
pub const DEFAULT_STATS_PATH: &str = "stats.bin";

/// Source of timestamps for moves and the solve timer.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub scramble_length: usize,
    /// Where statistics are saved; used by the front ends, not the session.
    pub stats_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            stats_path: PathBuf::from(DEFAULT_STATS_PATH),
        }
    }
}

/// A recorded twist.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Move {
    pub twist: Twist,
    pub timestamp: Instant,
}

/// State of the solve timer.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Timer {
    #[default]
    Idle,
    Running {
        start: Instant,
    },
    Stopped {
        elapsed: Duration,
    },
}

impl Timer {
    pub fn is_running(&self) -> bool {
        matches!(self, Timer::Running { .. })
    }

    /// Time on the clock as of `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        match *self {
            Timer::Idle => Duration::ZERO,
            Timer::Running { start } => now.saturating_duration_since(start),
            Timer::Stopped { elapsed } => elapsed,
        }
    }
}

/// What happened to a player move.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TwistOutcome {
    /// The move was refused because a scramble is in progress.
    Ignored,
    /// The move was applied and the cube is not newly solved.
    Applied,
    /// The move solved the cube; the solve was added to the stats.
    Solved { time: Duration, moves: u32 },
}

/// Cube plus history, timer, and statistics.
#[derive(Debug)]
pub struct Session<C: Clock = SystemClock> {
    cube: Cube,
    history: Vec<Move>,
    /// Twists of a scramble that have not been applied yet.
    scramble_queue: VecDeque<Twist>,
    is_scrambled: bool,
    is_solved: bool,
    timer: Timer,
    stats: Stats,
    config: SessionConfig,
    clock: C,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(config: SessionConfig, clock: C) -> Self {
        Self {
            cube: Cube::solved(),
            history: vec![],
            scramble_queue: VecDeque::new(),
            is_scrambled: false,
            is_solved: true,
            timer: Timer::Idle,
            stats: Stats::default(),
            config,
            clock,
        }
    }

    /// Replaces the statistics, e.g. with ones loaded from disk.
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = stats;
        self
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    pub fn history(&self) -> &[Move] {
        &self.history
    }
    pub fn stats(&self) -> &Stats {
        &self.stats
    }
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
    pub fn clock(&self) -> &C {
        &self.clock
    }
    pub fn timer(&self) -> Timer {
        self.timer
    }
    pub fn is_solved(&self) -> bool {
        self.is_solved
    }
    /// Whether the cube has been scrambled and not solved since.
    pub fn is_scrambled(&self) -> bool {
        self.is_scrambled
    }
    /// Whether a scramble is still being played out.
    pub fn is_animating(&self) -> bool {
        !self.scramble_queue.is_empty()
    }
    /// Time on the solve timer.
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed(self.clock.now())
    }

    /// Applies a player move.
    pub fn twist(&mut self, twist: Twist) -> TwistOutcome {
        if self.is_animating() {
            debug!("ignoring {twist} while scrambling");
            return TwistOutcome::Ignored;
        }

        let now = self.clock.now();
        if self.timer == Timer::Idle && self.history.is_empty() {
            self.timer = Timer::Running { start: now };
            debug!("timer started");
        }

        self.cube = twist.apply(&self.cube);
        self.history.push(Move {
            twist,
            timestamp: now,
        });
        debug!("twist {twist} (move {})", self.history.len());

        self.after_player_rotation(now)
    }

    /// Undoes the most recent player move, returning it.
    ///
    /// Returns `None` if there is nothing to undo or a scramble is running.
    /// Undoing back to a solved cube abandons the attempt: the timer goes
    /// back to idle and nothing is recorded.
    pub fn undo(&mut self) -> Option<Twist> {
        if self.is_animating() {
            return None;
        }
        let last = self.history.pop()?;
        self.cube = last.twist.rev().apply(&self.cube);
        self.is_solved = self.cube.is_solved();
        debug!("undo {}", last.twist);

        if self.is_solved && self.timer.is_running() {
            self.timer = Timer::Idle;
            debug!("attempt abandoned");
        }
        Some(last.twist)
    }

    fn after_player_rotation(&mut self, now: Instant) -> TwistOutcome {
        let was_solved = self.is_solved;
        self.is_solved = self.cube.is_solved();

        if !self.is_solved || was_solved || !self.timer.is_running() {
            return TwistOutcome::Applied;
        }

        let time = self.timer.elapsed(now);
        let moves = self.history.len() as u32;
        self.timer = Timer::Stopped { elapsed: time };
        self.is_scrambled = false;
        self.stats.record_solve(time, moves);
        info!("solved in {time:?} with {moves} moves");

        TwistOutcome::Solved { time, moves }
    }

    /// Reorients the whole cube. Not a move: history, timer, and stats are
    /// untouched.
    pub fn rotate_whole_cube(&mut self, axis: Axis, direction: Direction) {
        self.cube = engine::rotate_whole_cube(&self.cube, axis, direction);
    }

    /// Queues a random scramble to be played out with
    /// [`Self::advance_scramble`].
    ///
    /// Returns `false` if a scramble is already running.
    pub fn start_scramble<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_animating() {
            return false;
        }
        self.scramble_queue = (0..self.config.scramble_length)
            .map(|_| Twist::random(rng))
            .collect();
        self.timer = Timer::Idle;
        info!("scrambling with {} moves", self.scramble_queue.len());

        if self.scramble_queue.is_empty() {
            self.finish_scramble();
        }
        true
    }

    /// Applies the next queued scramble move, returning it.
    pub fn advance_scramble(&mut self) -> Option<Twist> {
        let twist = self.scramble_queue.pop_front()?;
        self.cube = twist.apply(&self.cube);
        self.is_solved = self.cube.is_solved();
        self.history.push(Move {
            twist,
            timestamp: self.clock.now(),
        });
        debug!("scramble move {twist}");

        if self.scramble_queue.is_empty() {
            self.finish_scramble();
        }
        Some(twist)
    }

    /// Stops a running scramble after the moves already applied.
    pub fn cancel_scramble(&mut self) {
        if self.is_animating() {
            self.scramble_queue.clear();
            info!("scramble cancelled");
            self.finish_scramble();
        }
    }

    fn finish_scramble(&mut self) {
        self.history.clear();
        self.is_scrambled = !self.is_solved;
        self.timer = Timer::Idle;
    }

    /// Scrambles immediately and returns the twists applied.
    pub fn scramble<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Twist> {
        let mut applied = vec![];
        if self.start_scramble(rng) {
            while let Some(twist) = self.advance_scramble() {
                applied.push(twist);
            }
        }
        applied
    }

    /// Restores the solved cube and clears history and timer. Stats are kept.
    pub fn reset(&mut self) {
        self.cube = Cube::solved();
        self.history.clear();
        self.scramble_queue.clear();
        self.is_scrambled = false;
        self.is_solved = true;
        self.timer = Timer::Idle;
        info!("reset");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::grid::Layer;

    #[derive(Debug)]
    struct ManualClock {
        now: Cell<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Cell::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }

    const R: Twist = Twist::new(Axis::X, Layer::new(3), Direction::Cw);
    const U: Twist = Twist::new(Axis::Y, Layer::new(3), Direction::Cw);

    fn session() -> Session<ManualClock> {
        Session::with_clock(SessionConfig::default(), ManualClock::new())
    }

    #[test]
    fn test_new_session_is_solved_and_idle() {
        let s = session();
        assert_eq!(*s.cube(), Cube::solved());
        assert!(s.is_solved());
        assert!(!s.is_scrambled());
        assert!(!s.is_animating());
        assert!(s.history().is_empty());
        assert_eq!(s.timer(), Timer::Idle);
        assert_eq!(s.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_first_twist_starts_timer_and_records_move() {
        let mut s = session();
        assert_eq!(s.twist(R), TwistOutcome::Applied);
        assert!(s.timer().is_running());
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history()[0].twist, R);
        assert!(!s.is_solved());

        s.clock().advance(Duration::from_secs(3));
        assert_eq!(s.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn test_returning_to_solved_records_a_solve() {
        let mut s = session();
        s.twist(R);
        s.clock().advance(Duration::from_millis(1500));
        let outcome = s.twist(R.rev());
        assert_eq!(
            outcome,
            TwistOutcome::Solved {
                time: Duration::from_millis(1500),
                moves: 2
            }
        );
        assert!(s.is_solved());
        assert_eq!(s.timer(), Timer::Stopped { elapsed: Duration::from_millis(1500) });
        assert_eq!(s.stats().total_solves, 1);
        assert_eq!(s.stats().best_time, Some(Duration::from_millis(1500)));
        assert_eq!(s.stats().last_move_count, 2);

        // the stopped timer holds its value
        s.clock().advance(Duration::from_secs(10));
        assert_eq!(s.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn test_scramble_then_reset_restores_initial_state() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(42);
        let applied = s.scramble(&mut rng);
        assert_eq!(applied.len(), DEFAULT_SCRAMBLE_LENGTH);
        assert!(s.history().is_empty());

        s.reset();
        assert_eq!(*s.cube(), Cube::solved());
        assert!(s.history().is_empty());
        assert!(s.is_solved());
        assert!(!s.is_scrambled());
    }

    #[test]
    fn test_scramble_does_not_start_timer_or_touch_stats() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(1);
        s.scramble(&mut rng);
        assert_eq!(s.timer(), Timer::Idle);
        assert_eq!(*s.stats(), Stats::default());
        assert!(s.is_scrambled());
        assert!(!s.is_solved());
    }

    /// Whether any prefix of `twists` leaves the cube solved.
    fn passes_through_solved(twists: &[Twist]) -> bool {
        let mut cube = Cube::solved();
        twists.iter().any(|twist| {
            cube = twist.apply(&cube);
            cube.is_solved()
        })
    }

    #[test]
    fn test_solving_a_scramble() {
        // pick a scramble whose unwinding only hits solved at the very end
        let (mut s, scramble) = (0..)
            .find_map(|seed| {
                let mut s = session();
                let scramble = s.scramble(&mut StdRng::seed_from_u64(seed));
                (!passes_through_solved(&scramble)).then_some((s, scramble))
            })
            .unwrap();

        s.clock().advance(Duration::from_secs(5));
        let mut last = TwistOutcome::Applied;
        for twist in scramble.iter().rev() {
            s.clock().advance(Duration::from_millis(250));
            last = s.twist(twist.rev());
        }

        // timer started at the first solving move, not at the scramble
        let expected = Duration::from_millis(250) * (scramble.len() as u32 - 1);
        assert_eq!(
            last,
            TwistOutcome::Solved {
                time: expected,
                moves: scramble.len() as u32
            }
        );
        assert!(!s.is_scrambled());
        assert_eq!(s.stats().total_solves, 1);
    }

    #[test]
    fn test_animated_scramble_blocks_player_moves() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(s.start_scramble(&mut rng));
        assert!(s.is_animating());
        assert!(!s.start_scramble(&mut rng));

        for _ in 0..5 {
            assert!(s.advance_scramble().is_some());
        }
        assert_eq!(s.history().len(), 5);
        assert_eq!(s.twist(R), TwistOutcome::Ignored);
        assert_eq!(s.undo(), None);

        s.cancel_scramble();
        assert!(!s.is_animating());
        assert!(s.history().is_empty());
        assert_eq!(s.advance_scramble(), None);
        assert_eq!(s.twist(R), TwistOutcome::Applied);
    }

    #[test]
    fn test_undo_reverts_last_move() {
        let mut s = session();
        s.twist(R);
        s.twist(U);
        let after_r = R.apply(&Cube::solved());

        assert_eq!(s.undo(), Some(U));
        assert_eq!(*s.cube(), after_r);
        assert_eq!(s.history().len(), 1);
        assert!(s.timer().is_running());

        assert_eq!(s.undo(), Some(R));
        assert_eq!(s.undo(), None);
    }

    #[test]
    fn test_undo_back_to_solved_is_not_a_solve() {
        let mut s = session();
        s.twist(R);
        s.clock().advance(Duration::from_millis(80));
        assert_eq!(s.undo(), Some(R));

        assert!(s.is_solved());
        assert_eq!(s.timer(), Timer::Idle);
        assert_eq!(s.stats().total_solves, 0);
        assert_eq!(s.stats().best_time, None);

        // the next move starts a fresh attempt
        s.clock().advance(Duration::from_secs(2));
        s.twist(U);
        s.clock().advance(Duration::from_secs(1));
        assert_eq!(
            s.twist(U.rev()),
            TwistOutcome::Solved {
                time: Duration::from_secs(1),
                moves: 2
            }
        );
        assert_eq!(s.stats().total_solves, 1);
    }

    #[test]
    fn test_timer_only_restarts_after_reset_or_scramble() {
        let mut s = session();
        s.twist(R);
        s.twist(R.rev());
        assert!(matches!(s.timer(), Timer::Stopped { .. }));

        // playing on after a solve neither restarts the timer nor records
        s.twist(U);
        s.twist(U.rev());
        assert!(matches!(s.timer(), Timer::Stopped { .. }));
        assert_eq!(s.stats().total_solves, 1);

        s.reset();
        s.twist(U);
        assert!(s.timer().is_running());
    }

    #[test]
    fn test_whole_cube_rotation_is_not_a_move() {
        let mut s = session();
        s.rotate_whole_cube(Axis::Y, Direction::Cw);
        assert!(s.history().is_empty());
        assert_eq!(s.timer(), Timer::Idle);
        assert!(s.is_solved());
        assert_ne!(*s.cube(), Cube::solved());
    }

    #[test]
    fn test_empty_scramble_finishes_immediately() {
        let config = SessionConfig {
            scramble_length: 0,
            ..SessionConfig::default()
        };
        let mut s = Session::with_clock(config, ManualClock::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(s.start_scramble(&mut rng));
        assert!(!s.is_animating());
        assert!(!s.is_scrambled());
    }

    #[test]
    fn test_reset_keeps_stats() {
        let mut s = session().with_stats(Stats {
            total_solves: 4,
            ..Stats::default()
        });
        s.twist(R);
        s.reset();
        assert_eq!(s.stats().total_solves, 4);
        assert_eq!(s.timer(), Timer::Idle);
    }
}
