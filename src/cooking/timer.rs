use std::fmt;

/// Stopwatch status for the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepStatus {
    #[default]
    Idle,
    Timing,
    Paused,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepStatus::Idle => "idle",
            StepStatus::Timing => "timing",
            StepStatus::Paused => "paused",
        };
        f.write_str(label)
    }
}

/// Result of a step navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    /// Moved to the step with this index
    Moved(usize),
    /// The last step was completed
    Finished,
    /// Nothing to do from the current position
    Ignored,
}

/// How the elapsed time compares to the step's estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPace {
    OnTrack,
    Approaching,
    Exceeded,
}

const APPROACHING_PERCENT: u32 = 75;

impl StepPace {
    pub fn classify(elapsed: u32, estimate: u32) -> Self {
        if elapsed > estimate {
            StepPace::Exceeded
        } else if step_progress_percent(elapsed, estimate) >= APPROACHING_PERCENT {
            StepPace::Approaching
        } else {
            StepPace::OnTrack
        }
    }
}

/// Elapsed time as a percentage of the estimate, capped at 100.
pub fn step_progress_percent(elapsed: u32, estimate: u32) -> u32 {
    if estimate == 0 {
        return 100;
    }
    let percent = (elapsed as f64 / estimate as f64 * 100.0).round() as u32;
    percent.min(100)
}

/// Step-by-step state machine for cooking mode.
///
/// `index` ranges over `0..=total`; `index == total` is the complete state.
/// Elapsed seconds only grow through [`StepTimer::tick`] while timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimer {
    index: usize,
    total: usize,
    status: StepStatus,
    elapsed: u32,
}

impl StepTimer {
    pub fn new(total: usize) -> Self {
        StepTimer {
            index: 0,
            total,
            status: StepStatus::Idle,
            elapsed: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.total
    }

    pub fn is_timing(&self) -> bool {
        self.status == StepStatus::Timing
    }

    /// Idle or paused → timing.
    pub fn start(&mut self) {
        if !self.is_complete() {
            self.status = StepStatus::Timing;
        }
    }

    /// Timing → paused. Elapsed time is kept.
    pub fn pause(&mut self) {
        if self.status == StepStatus::Timing {
            self.status = StepStatus::Paused;
        }
    }

    /// The single start/pause control.
    pub fn toggle(&mut self) {
        if self.is_timing() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Count one second. Ignored unless timing.
    pub fn tick(&mut self) -> bool {
        if self.is_timing() {
            self.elapsed += 1;
            true
        } else {
            false
        }
    }

    pub fn complete_step(&mut self) -> StepChange {
        if self.is_complete() {
            return StepChange::Ignored;
        }
        self.index += 1;
        self.reset_step();
        if self.is_complete() {
            StepChange::Finished
        } else {
            StepChange::Moved(self.index)
        }
    }

    pub fn previous_step(&mut self) -> StepChange {
        if self.index == 0 {
            return StepChange::Ignored;
        }
        self.index -= 1;
        self.reset_step();
        StepChange::Moved(self.index)
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    /// Share of fully completed steps, rounded to a whole percent.
    pub fn progress_percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        let done = self.index.min(self.total) as f64;
        (done / self.total as f64 * 100.0).round() as u32
    }

    /// "Step n of N", with n clamped to N once complete.
    pub fn step_label(&self) -> String {
        format!(
            "Step {} of {}",
            (self.index + 1).min(self.total),
            self.total
        )
    }

    fn reset_step(&mut self) {
        self.elapsed = 0;
        self.status = StepStatus::Idle;
    }
}
