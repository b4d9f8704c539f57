//! Fit options and the per-sweep stopping rule
//!
//! [`ConvergenceTracker`] owns the objective history and decides after every
//! completed sweep whether the optimizer keeps going. The checks are, in
//! priority order:
//!
//! 1. **Converged**: `prev_obj − obj < tol` and at least `min_iter` sweeps ran
//! 2. **MaxIter**: `max_iter` sweeps ran
//! 3. **MaxTime**: elapsed wall-clock time exceeds `max_time`

use crate::error::NcpError;
use std::fmt;
use std::time::{Duration, Instant};

/// Options controlling a HALS fit
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use mncp_decomp::FitOptions;
///
/// let options = FitOptions::default()
///     .with_tol(1e-8)
///     .with_max_iter(200)
///     .with_max_time(Duration::from_secs(30))
///     .with_seed(42)
///     .quiet();
///
/// assert!(options.validate().is_ok());
/// assert_eq!(options.min_iter, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Stop once the objective improves by less than this between sweeps
    pub tol: f64,

    /// Maximum number of sweeps
    pub max_iter: usize,

    /// Sweeps that must complete before `tol` is consulted
    pub min_iter: usize,

    /// Wall-clock budget, checked between sweeps. `None` means unlimited.
    pub max_time: Option<Duration>,

    /// Log every sweep at `info` level instead of `debug`
    pub verbose: bool,

    /// Seed for random initialization. `None` draws one from the thread RNG.
    pub seed: Option<u64>,

    /// HALS column passes per mode and sweep
    pub inner_iters: usize,

    /// Gram diagonals at or below this fraction of the largest diagonal entry
    /// are treated as degenerate components
    pub degenerate_tol: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tol: 1e-5,
            max_iter: 500,
            min_iter: 1,
            max_time: None,
            verbose: true,
            seed: None,
            inner_iters: 1,
            degenerate_tol: 1e-12,
        }
    }
}

impl FitOptions {
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_min_iter(mut self, min_iter: usize) -> Self {
        self.min_iter = min_iter;
        self
    }

    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Shorthand for `with_verbose(false)`
    pub fn quiet(self) -> Self {
        self.with_verbose(false)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_inner_iters(mut self, inner_iters: usize) -> Self {
        self.inner_iters = inner_iters;
        self
    }

    pub fn with_degenerate_tol(mut self, degenerate_tol: f64) -> Self {
        self.degenerate_tol = degenerate_tol;
        self
    }

    /// Check that the options are mutually consistent
    ///
    /// # Errors
    ///
    /// [`NcpError::InvalidOption`] describing the first offending field.
    pub fn validate(&self) -> Result<(), NcpError> {
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(NcpError::InvalidOption(format!(
                "tol must be finite and nonnegative, got {}",
                self.tol
            )));
        }
        if self.max_iter == 0 {
            return Err(NcpError::InvalidOption(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if self.min_iter > self.max_iter {
            return Err(NcpError::InvalidOption(format!(
                "min_iter ({}) exceeds max_iter ({})",
                self.min_iter, self.max_iter
            )));
        }
        if self.inner_iters == 0 {
            return Err(NcpError::InvalidOption(
                "inner_iters must be at least 1".to_string(),
            ));
        }
        if !self.degenerate_tol.is_finite() || self.degenerate_tol < 0.0 {
            return Err(NcpError::InvalidOption(format!(
                "degenerate_tol must be finite and nonnegative, got {}",
                self.degenerate_tol
            )));
        }
        Ok(())
    }
}

/// Why the optimizer stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    Converged,
    MaxIter,
    MaxTime,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopReason::Converged => "converged",
            StopReason::MaxIter => "max_iter",
            StopReason::MaxTime => "max_time",
        };
        f.write_str(name)
    }
}

/// Lifecycle of a single fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    Initializing,
    Sweeping,
    Converged,
    MaxIter,
    MaxTime,
    Finalized,
}

impl From<StopReason> for OptimizerState {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::Converged => OptimizerState::Converged,
            StopReason::MaxIter => OptimizerState::MaxIter,
            StopReason::MaxTime => OptimizerState::MaxTime,
        }
    }
}

/// History and timing handed back by [`ConvergenceTracker::finalize`]
#[derive(Debug, Clone, PartialEq)]
pub struct FitSummary {
    pub obj_hist: Vec<f64>,
    pub iterations: usize,
    pub stop_reason: StopReason,
    pub total_time: Duration,
}

/// Objective history and stopping decisions for one fit
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    tol: f64,
    max_iter: usize,
    min_iter: usize,
    max_time: Option<Duration>,
    verbose: bool,
    obj_hist: Vec<f64>,
    prev_obj: f64,
    start: Instant,
    state: OptimizerState,
}

impl ConvergenceTracker {
    /// Create a tracker in the `Initializing` state
    pub fn new(options: &FitOptions) -> Self {
        Self {
            tol: options.tol,
            max_iter: options.max_iter,
            min_iter: options.min_iter,
            max_time: options.max_time,
            verbose: options.verbose,
            obj_hist: Vec::with_capacity(options.max_iter.min(1024)),
            prev_obj: f64::INFINITY,
            start: Instant::now(),
            state: OptimizerState::Initializing,
        }
    }

    /// Enter the `Sweeping` state and restart the clock
    pub fn start(&mut self) {
        self.start = Instant::now();
        self.state = OptimizerState::Sweeping;
    }

    /// Record the objective of a completed sweep
    ///
    /// Returns the reason to stop, or `None` to keep sweeping.
    pub fn update(&mut self, obj: f64) -> Option<StopReason> {
        if self.state == OptimizerState::Initializing {
            self.state = OptimizerState::Sweeping;
        }

        self.obj_hist.push(obj);
        let iterations = self.obj_hist.len();
        let improvement = self.prev_obj - obj;
        self.prev_obj = obj;

        if self.verbose {
            tracing::info!(
                iteration = iterations,
                objective = obj,
                improvement,
                "sweep complete"
            );
        } else {
            tracing::debug!(
                iteration = iterations,
                objective = obj,
                improvement,
                "sweep complete"
            );
        }

        let reason = if improvement < self.tol && iterations >= self.min_iter {
            Some(StopReason::Converged)
        } else if iterations >= self.max_iter {
            Some(StopReason::MaxIter)
        } else if self.max_time.is_some_and(|budget| self.start.elapsed() > budget) {
            Some(StopReason::MaxTime)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.state = reason.into();
        }
        reason
    }

    pub fn still_optimizing(&self) -> bool {
        matches!(
            self.state,
            OptimizerState::Initializing | OptimizerState::Sweeping
        )
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.obj_hist.len()
    }

    pub fn obj_hist(&self) -> &[f64] {
        &self.obj_hist
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Close the fit and hand back its history
    pub fn finalize(&mut self, stop_reason: StopReason) -> FitSummary {
        self.state = OptimizerState::Finalized;

        let summary = FitSummary {
            iterations: self.obj_hist.len(),
            obj_hist: std::mem::take(&mut self.obj_hist),
            stop_reason,
            total_time: self.start.elapsed(),
        };
        tracing::info!(
            iterations = summary.iterations,
            stop_reason = %summary.stop_reason,
            final_objective = summary.obj_hist.last().copied().unwrap_or(f64::NAN),
            elapsed_ms = summary.total_time.as_secs_f64() * 1000.0,
            "fit finished"
        );
        summary
    }
}
