//! Simulated job progress: a labeled step sequence advanced on a fixed
//! cadence while the real request is in flight. True progress is not
//! observable from the client, so the bar is a deliberate approximation;
//! only an explicit `complete` may show the terminal label or 100%.

/// Percentage shown immediately after `start`, before the first tick.
pub const PERCENT_FLOOR: u8 = 5;
/// Percentage the simulation clamps to until `complete` is called.
pub const PERCENT_CEILING: u8 = 92;
/// Milliseconds between ticks. The timer lives in the shell; the core is
/// driven through `tick` and owns no clock.
pub const TICK_INTERVAL_MS: u64 = 1200;

/// Label shown when no run is active.
pub const IDLE_LABEL: &str = "Listo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressTracker {
    steps: Vec<String>,
    cursor: usize,
    percent: u8,
    phase: Phase,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a run over `steps`. The last element is the terminal label
    /// and is only ever shown by `complete`.
    pub fn start(&mut self, steps: Vec<String>) {
        // Caller contract: at least one step.
        if steps.is_empty() {
            return;
        }
        self.steps = steps;
        self.cursor = 0;
        self.percent = PERCENT_FLOOR;
        self.phase = Phase::Running;
    }

    /// Advances the cursor by at most one step. Returns whether anything
    /// visible changed. The cursor never lands on the terminal label; once
    /// the last working step is active, ticking only raises the percentage
    /// to the ceiling.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        if self.cursor + 2 < self.steps.len() {
            self.cursor += 1;
            self.percent = advancing_percent(self.cursor, self.steps.len());
            return true;
        }
        let changed = self.percent != PERCENT_CEILING;
        self.percent = PERCENT_CEILING;
        changed
    }

    /// Ends the run: terminal label active, 100%. Idempotent, and safe to
    /// call whether or not a tick is pending.
    pub fn complete(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.cursor = self.steps.len() - 1;
        self.percent = 100;
        self.phase = Phase::Completed;
    }

    /// Discards the run entirely. The caller must invoke this on any failed
    /// request so no stale active step survives the error.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn label(&self) -> &str {
        match self.steps.get(self.cursor) {
            Some(step) if self.phase != Phase::Idle => step,
            _ => IDLE_LABEL,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}

fn advancing_percent(cursor: usize, len: usize) -> u8 {
    let raw = (100.0 * (cursor as f64 + 1.0) / len as f64).round() as u8;
    raw.min(PERCENT_CEILING)
}
