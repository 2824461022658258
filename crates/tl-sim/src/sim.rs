//! Fixed-step run driver.
//!
//! The model itself only knows `step(dt)`. A driver decides how often to
//! call it and whether to pace calls against the wall clock.

use crate::error::{SimError, SimResult};
use crate::model::{ProcessModel, StepReport};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Options for a driven run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Fixed time step (seconds)
    pub dt: f64,
    /// Number of steps to take
    pub steps: usize,
    /// Sleep so that each step takes `dt` of wall-clock time
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dt: 0.02,
            steps: 1000,
            realtime: false,
        }
    }
}

/// Totals over a driven run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: usize,
    /// Simulated time at the end of the run (s)
    pub time_s: f64,
    /// Volume pumped out of T1
    pub pumped: f64,
    /// Volume returned to T1
    pub returned: f64,
    /// Volume that left the plant (junction loss, spill, overflow)
    pub lost: f64,
    pub alarms_raised: usize,
    pub alarms_cleared: usize,
    pub samples_recorded: usize,
}

impl RunSummary {
    fn record(&mut self, report: &StepReport) {
        self.steps += 1;
        self.time_s = report.time_s;
        self.pumped += report.flows.drawn;
        self.returned += report.flows.t4_to_t1;
        self.lost += report.flows.lost();
        for change in &report.alarm_changes {
            if change.raised {
                self.alarms_raised += 1;
            } else {
                self.alarms_cleared += 1;
            }
        }
        if report.sampled {
            self.samples_recorded += 1;
        }
    }
}

/// Run the model for `opts.steps` fixed steps.
pub fn run(model: &mut ProcessModel, opts: &RunOptions) -> SimResult<RunSummary> {
    run_with_observer(model, opts, |_, _| {})
}

/// Run the model, calling `observer` after every step with the model and the
/// step report. The observer only gets a shared reference.
pub fn run_with_observer<F>(
    model: &mut ProcessModel,
    opts: &RunOptions,
    mut observer: F,
) -> SimResult<RunSummary>
where
    F: FnMut(&ProcessModel, &StepReport),
{
    if !(opts.dt.is_finite() && opts.dt > 0.0) {
        return Err(SimError::InvalidArg {
            what: "dt must be finite and positive",
        });
    }

    tracing::info!(dt = opts.dt, steps = opts.steps, realtime = opts.realtime, "run started");

    const TOO_LARGE: SimError = SimError::InvalidArg {
        what: "dt too large for real-time pacing",
    };
    let mut pacer = if opts.realtime {
        let tick = Duration::try_from_secs_f64(opts.dt).map_err(|_| TOO_LARGE)?;
        let first = Instant::now().checked_add(tick).ok_or(TOO_LARGE)?;
        Some((tick, first))
    } else {
        None
    };
    let mut summary = RunSummary::default();

    for _ in 0..opts.steps {
        let report = model.step(opts.dt)?;
        summary.record(&report);
        observer(model, &report);

        if let Some((tick, next_deadline)) = pacer.as_mut() {
            let now = Instant::now();
            if *next_deadline > now {
                std::thread::sleep(*next_deadline - now);
            } else {
                tracing::debug!(
                    behind_ms = (now - *next_deadline).as_secs_f64() * 1e3,
                    "driver running behind wall clock"
                );
            }
            *next_deadline = next_deadline.checked_add(*tick).ok_or(TOO_LARGE)?;
        }
    }

    tracing::info!(
        steps = summary.steps,
        time_s = summary.time_s,
        alarms_raised = summary.alarms_raised,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_options_defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.dt, 0.02);
        assert_eq!(opts.steps, 1000);
        assert!(!opts.realtime);
    }

    #[test]
    fn run_rejects_bad_dt() {
        let mut model = ProcessModel::new().unwrap();
        let opts = RunOptions {
            dt: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            run(&mut model, &opts),
            Err(SimError::InvalidArg { .. })
        ));
        assert_eq!(model.time(), 0.0);
    }

    #[test]
    fn huge_dt_runs_without_pacing() {
        let mut model = ProcessModel::new().unwrap();
        let opts = RunOptions {
            dt: 1e20,
            steps: 1,
            realtime: false,
        };
        let summary = run(&mut model, &opts).unwrap();
        assert_eq!(summary.steps, 1);
        assert_eq!(model.time(), 1e20);
    }

    #[test]
    fn huge_dt_rejected_for_realtime() {
        let mut model = ProcessModel::new().unwrap();
        let opts = RunOptions {
            dt: 1e20,
            steps: 1,
            realtime: true,
        };
        assert!(matches!(
            run(&mut model, &opts),
            Err(SimError::InvalidArg { .. })
        ));
        assert_eq!(model.time(), 0.0);
    }

    #[test]
    fn observer_sees_every_step() {
        let mut model = ProcessModel::new().unwrap();
        let opts = RunOptions {
            dt: 0.02,
            steps: 25,
            realtime: false,
        };
        let mut seen = 0;
        let summary = run_with_observer(&mut model, &opts, |m, r| {
            seen += 1;
            assert_eq!(m.time(), r.time_s);
        })
        .unwrap();
        assert_eq!(seen, 25);
        assert_eq!(summary.steps, 25);
        assert!((summary.time_s - 0.5).abs() < 1e-9);
        assert_eq!(summary.samples_recorded, 2);
        assert!(summary.pumped > 0.0);
    }

    #[test]
    fn zero_steps_is_a_no_op() {
        let mut model = ProcessModel::new().unwrap();
        let opts = RunOptions {
            steps: 0,
            ..Default::default()
        };
        let summary = run(&mut model, &opts).unwrap();
        assert_eq!(summary, RunSummary::default());
    }
}
