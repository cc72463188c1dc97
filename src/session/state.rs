//! Workout session state machine
//!
//! Owns rep/set/calorie counters and the countdown and rest timers. One
//! session per page, single user. Driven by three inputs: control buttons,
//! rep events from the detector, and a 1 Hz clock. Every operation returns
//! the side effects it wants performed.
//!
//! Timer safety: each countdown or rest period takes a fresh generation
//! number, and `tick` ignores any generation that is not the live one. A
//! tick that fires after its timer was cancelled is a no-op by construction.

use crate::analysis::ExerciseKind;

use super::effects::Effect;

/// Reps that complete one set
pub const REPS_PER_SET: u32 = 10;

/// Rest between sets, seconds
pub const REST_SECONDS: u32 = 30;

/// Countdown before the workout starts, seconds
pub const COUNTDOWN_SECONDS: u32 = 3;

/// Rest checkpoints that get their own spoken cue
const REST_CALLOUTS: [u32; 2] = [15, 10];

/// Session status. One variant at a time by construction; "stopped" is
/// `Idle` with the totals left in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    CountingDown,
    Running,
    Resting,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::CountingDown => "countdown",
            Status::Running => "running",
            Status::Resting => "resting",
        }
    }
}

/// The single active workout session
pub struct WorkoutSession {
    kind: ExerciseKind,
    status: Status,
    total_reps: u32,
    reps_in_set: u32,
    completed_sets: u32,
    calories: f32,
    /// Seconds left on whichever timer the status implies
    seconds_remaining: u32,
    /// Generation of the live timer; bumped on every timer start and cancel
    timer_generation: u64,
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

impl WorkoutSession {
    pub fn new(kind: ExerciseKind) -> Self {
        Self {
            kind,
            status: Status::Idle,
            total_reps: 0,
            reps_in_set: 0,
            completed_sets: 0,
            calories: 0.0,
            seconds_remaining: 0,
            timer_generation: 0,
        }
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }

    pub fn reps_in_set(&self) -> u32 {
        self.reps_in_set
    }

    pub fn completed_sets(&self) -> u32 {
        self.completed_sets
    }

    pub fn calories(&self) -> f32 {
        self.calories
    }

    /// Seconds left on the countdown or rest timer, 0 when neither runs
    pub fn seconds_remaining(&self) -> u32 {
        match self.status {
            Status::CountingDown | Status::Resting => self.seconds_remaining,
            _ => 0,
        }
    }

    /// Generation a tick must carry to be honored
    pub fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    /// Start/stop button. Idle starts the countdown; pressing again during
    /// the countdown cancels it; pressing during a run (or rest) stops the
    /// workout with totals preserved.
    pub fn toggle_start(&mut self) -> Vec<Effect> {
        match self.status {
            Status::Idle => {
                self.status = Status::CountingDown;
                self.seconds_remaining = COUNTDOWN_SECONDS;
                self.timer_generation += 1;
                vec![
                    Effect::announce(format!("Starting in {}", COUNTDOWN_SECONDS)),
                    Effect::message(format!("Starting in {}...", COUNTDOWN_SECONDS)),
                ]
            }
            Status::CountingDown => {
                self.status = Status::Idle;
                self.seconds_remaining = 0;
                self.timer_generation += 1;
                vec![
                    Effect::announce("Countdown cancelled"),
                    Effect::message("Countdown cancelled"),
                ]
            }
            Status::Running | Status::Resting => {
                self.status = Status::Idle;
                self.seconds_remaining = 0;
                self.timer_generation += 1;
                vec![
                    Effect::announce(format!(
                        "Workout stopped. {} reps, {} sets.",
                        self.total_reps, self.completed_sets
                    )),
                    Effect::message("Workout stopped"),
                ]
            }
        }
    }

    /// Full reset from any state. Quiet: the page shows the cleared numbers.
    pub fn reset(&mut self) -> Vec<Effect> {
        let kind = self.kind;
        // Generations stay monotonic across resets so ticks queued for any
        // earlier timer can never match again
        let generation = self.timer_generation;
        *self = WorkoutSession::new(kind);
        self.timer_generation = generation + 1;
        vec![Effect::message("Ready")]
    }

    /// Switch exercise. Locked while a workout is active: counting down,
    /// running or resting.
    pub fn change_exercise(&mut self, kind: ExerciseKind) -> Vec<Effect> {
        if self.status != Status::Idle {
            return vec![Effect::message("Stop the workout to change exercise")];
        }
        self.kind = kind;
        let mut effects = self.reset();
        effects.push(Effect::message(format!("Exercise: {}", kind.label())));
        effects
    }

    // ------------------------------------------------------------------
    // Rep events
    // ------------------------------------------------------------------

    /// Detector saw the user hit working depth
    pub fn on_depth_reached(&mut self) -> Vec<Effect> {
        if self.status != Status::Running {
            return vec![];
        }
        vec![Effect::say("Good depth")]
    }

    /// Detector saw a full down-up cycle. Only a running session credits
    /// it; during rest the detector keeps tracking phase but nothing is
    /// counted here.
    pub fn on_rep_completed(&mut self) -> Vec<Effect> {
        if self.status != Status::Running {
            return vec![];
        }

        self.total_reps += 1;
        self.reps_in_set += 1;
        // Calories are always recomputed from the total, never accumulated
        self.calories = round2(self.total_reps as f32 * self.kind.kcal_per_rep());

        if self.reps_in_set == REPS_PER_SET {
            self.completed_sets += 1;
            self.reps_in_set = 0;
            return self.begin_rest();
        }

        let remaining = REPS_PER_SET - self.reps_in_set;
        vec![
            Effect::say(format!("{}", self.reps_in_set)),
            Effect::message(format!("{} reps to go in this set", remaining)),
        ]
    }

    fn begin_rest(&mut self) -> Vec<Effect> {
        self.status = Status::Resting;
        self.seconds_remaining = REST_SECONDS;
        self.timer_generation += 1;
        vec![
            Effect::announce(format!(
                "Set {} complete. Rest for {} seconds.",
                self.completed_sets, REST_SECONDS
            )),
            Effect::message(format!("Resting: {}s", REST_SECONDS)),
        ]
    }

    // ------------------------------------------------------------------
    // Clock
    // ------------------------------------------------------------------

    /// One-second tick. Stale generations (a timer that was cancelled or
    /// replaced) are ignored; so are ticks when no timer is running.
    pub fn tick(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.timer_generation {
            return vec![];
        }

        match self.status {
            Status::CountingDown => self.tick_countdown(),
            Status::Resting => self.tick_rest(),
            _ => vec![],
        }
    }

    fn tick_countdown(&mut self) -> Vec<Effect> {
        self.seconds_remaining -= 1;

        if self.seconds_remaining > 0 {
            return vec![
                Effect::announce(format!("{}", self.seconds_remaining)),
                Effect::message(format!("Starting in {}...", self.seconds_remaining)),
            ];
        }

        // Countdown done: zero everything and run
        self.total_reps = 0;
        self.reps_in_set = 0;
        self.completed_sets = 0;
        self.calories = 0.0;
        self.status = Status::Running;
        self.timer_generation += 1;
        vec![Effect::announce("Go!"), Effect::message("Workout started")]
    }

    fn tick_rest(&mut self) -> Vec<Effect> {
        self.seconds_remaining -= 1;
        let left = self.seconds_remaining;

        if left == 0 {
            self.status = Status::Running;
            self.timer_generation += 1;
            return vec![
                Effect::announce("Rest over. Go!"),
                Effect::message("Workout resumed"),
            ];
        }

        let mut effects = Vec::new();
        if REST_CALLOUTS.contains(&left) {
            effects.push(Effect::say(format!("{} seconds left", left)));
        } else if left <= 5 {
            effects.push(Effect::say(format!("{}", left)));
        }
        effects.push(Effect::message(format!("Resting: {}s", left)));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_session(kind: ExerciseKind) -> WorkoutSession {
        let mut session = WorkoutSession::new(kind);
        session.toggle_start();
        for _ in 0..COUNTDOWN_SECONDS {
            session.tick(session.timer_generation());
        }
        assert_eq!(session.status(), Status::Running);
        session
    }

    fn has_speech(effects: &[Effect], needle: &str) -> bool {
        effects.iter().any(|e| match e {
            Effect::Speak { text, .. } => text.contains(needle),
            _ => false,
        })
    }

    #[test]
    fn test_countdown_start_and_completion() {
        let mut session = WorkoutSession::new(ExerciseKind::Squat);

        let effects = session.toggle_start();
        assert_eq!(session.status(), Status::CountingDown);
        assert_eq!(session.seconds_remaining(), 3);
        assert!(has_speech(&effects, "Starting in 3"));

        session.tick(session.timer_generation());
        session.tick(session.timer_generation());
        assert_eq!(session.status(), Status::CountingDown);
        assert_eq!(session.seconds_remaining(), 1);

        let effects = session.tick(session.timer_generation());
        assert_eq!(session.status(), Status::Running);
        assert!(has_speech(&effects, "Go!"));
        assert_eq!(session.total_reps(), 0);
        assert_eq!(session.calories(), 0.0);
    }

    #[test]
    fn test_second_start_cancels_countdown() {
        let mut session = WorkoutSession::new(ExerciseKind::Squat);

        session.toggle_start();
        let countdown_generation = session.timer_generation();
        session.toggle_start();

        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.seconds_remaining(), 0);

        // The cancelled countdown's tick must do nothing
        let effects = session.tick(countdown_generation);
        assert!(effects.is_empty());
        assert_eq!(session.status(), Status::Idle);
    }

    #[test]
    fn test_ten_reps_complete_a_set_and_start_rest() {
        let mut session = running_session(ExerciseKind::Squat);

        for _ in 0..9 {
            let effects = session.on_rep_completed();
            assert_eq!(session.status(), Status::Running);
            assert!(effects.iter().any(|e| matches!(e, Effect::Message(_))));
        }
        assert_eq!(session.reps_in_set(), 9);

        let effects = session.on_rep_completed();
        assert_eq!(session.total_reps(), 10);
        assert_eq!(session.completed_sets(), 1);
        assert_eq!(session.reps_in_set(), 0);
        assert_eq!(session.status(), Status::Resting);
        assert_eq!(session.seconds_remaining(), REST_SECONDS);
        assert_eq!(session.calories(), 3.2);
        assert!(has_speech(&effects, "Set 1 complete"));
    }

    #[test]
    fn test_calories_recomputed_from_total() {
        let mut session = running_session(ExerciseKind::Pushup);

        for _ in 0..3 {
            session.on_rep_completed();
        }
        assert_eq!(session.calories(), 0.87);
    }

    #[test]
    fn test_reps_ignored_unless_running() {
        let mut session = WorkoutSession::new(ExerciseKind::Squat);

        assert!(session.on_rep_completed().is_empty());
        assert_eq!(session.total_reps(), 0);

        session.toggle_start();
        assert!(session.on_rep_completed().is_empty());
        assert_eq!(session.total_reps(), 0);
    }

    #[test]
    fn test_reps_suppressed_while_resting() {
        let mut session = running_session(ExerciseKind::Squat);
        for _ in 0..REPS_PER_SET {
            session.on_rep_completed();
        }
        assert_eq!(session.status(), Status::Resting);

        // User keeps moving through the rest period
        assert!(session.on_rep_completed().is_empty());
        assert!(session.on_depth_reached().is_empty());
        assert_eq!(session.total_reps(), 10);
        assert_eq!(session.reps_in_set(), 0);
        assert_eq!(session.calories(), 3.2);
    }

    #[test]
    fn test_rest_ticks_back_to_running() {
        let mut session = running_session(ExerciseKind::Squat);
        for _ in 0..REPS_PER_SET {
            session.on_rep_completed();
        }

        let mut spoke_fifteen = false;
        for _ in 0..REST_SECONDS {
            let effects = session.tick(session.timer_generation());
            spoke_fifteen |= has_speech(&effects, "15 seconds left");
        }

        assert!(spoke_fifteen);
        assert_eq!(session.status(), Status::Running);
        assert_eq!(session.seconds_remaining(), 0);
        // Totals carried through the rest
        assert_eq!(session.total_reps(), 10);
        assert_eq!(session.completed_sets(), 1);
    }

    #[test]
    fn test_reset_during_rest_cancels_timer() {
        let mut session = running_session(ExerciseKind::Squat);
        for _ in 0..REPS_PER_SET {
            session.on_rep_completed();
        }
        let rest_generation = session.timer_generation();

        session.reset();
        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.total_reps(), 0);
        assert_eq!(session.completed_sets(), 0);
        assert_eq!(session.calories(), 0.0);

        // The orphaned rest tick fires once more and must change nothing
        let effects = session.tick(rest_generation);
        assert!(effects.is_empty());
        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.seconds_remaining(), 0);
    }

    #[test]
    fn test_stop_preserves_totals() {
        let mut session = running_session(ExerciseKind::Squat);
        for _ in 0..4 {
            session.on_rep_completed();
        }

        let effects = session.toggle_start();
        assert_eq!(session.status(), Status::Idle);
        assert_eq!(session.total_reps(), 4);
        assert_eq!(session.calories(), 1.28);
        assert!(has_speech(&effects, "Workout stopped"));

        // Next start's countdown completion is what zeroes the counters
        session.toggle_start();
        assert_eq!(session.total_reps(), 4);
        for _ in 0..COUNTDOWN_SECONDS {
            session.tick(session.timer_generation());
        }
        assert_eq!(session.total_reps(), 0);
    }

    #[test]
    fn test_exercise_change_locked_while_active() {
        let mut session = running_session(ExerciseKind::Squat);
        for _ in 0..2 {
            session.on_rep_completed();
        }

        session.change_exercise(ExerciseKind::Pushup);
        assert_eq!(session.kind(), ExerciseKind::Squat);
        assert_eq!(session.total_reps(), 2);

        session.toggle_start();
        let effects = session.change_exercise(ExerciseKind::Pushup);
        assert_eq!(session.kind(), ExerciseKind::Pushup);
        assert_eq!(session.total_reps(), 0);
        assert!(effects.iter().any(|e| *e == Effect::message("Exercise: Push-up")));
    }

    #[test]
    fn test_tick_without_timer_is_noop() {
        let mut session = running_session(ExerciseKind::Squat);
        let effects = session.tick(session.timer_generation());
        assert!(effects.is_empty());
        assert_eq!(session.status(), Status::Running);
    }
}
