//! Batch payroll runs.
//!
//! A batch calculates many employees for one period. Each employee is
//! isolated: a failure is recorded against that employee and the batch
//! moves on. Duplicate ids are calculated once (first occurrence wins).

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{BatchFailure, BatchResult, PayPeriod, Payslip};

/// Shared cancellation signal for a running batch.
///
/// Employees already dispatched finish normally; those not yet dispatched
/// are reported in [`BatchResult::skipped`].
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Creates a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Runs a per-employee calculation over a list of employees.
#[derive(Debug, Clone)]
pub struct BatchPayrollRunner {
    max_concurrency: usize,
    cancellation: CancellationFlag,
}

enum Dispatch {
    Spawned(String, JoinHandle<EngineResult<Payslip>>),
    Skipped(String),
}

impl BatchPayrollRunner {
    /// Creates a runner that calculates at most `max_concurrency` employees
    /// at once in [`run_concurrent`](Self::run_concurrent). Zero is treated as one.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            cancellation: CancellationFlag::new(),
        }
    }

    /// Uses an externally owned cancellation flag.
    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// The runner's cancellation flag.
    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    /// Calculates each employee in turn.
    pub fn run<F>(&self, employee_ids: &[String], period: PayPeriod, calculate: F) -> BatchResult
    where
        F: Fn(&str, PayPeriod) -> EngineResult<Payslip>,
    {
        let ids = dedupe(employee_ids);
        info!(period = %period, employees = ids.len(), "Starting batch run");

        let mut result = BatchResult::new(period);
        for id in ids {
            if self.cancellation.is_cancelled() {
                result.skipped.push(id);
                continue;
            }
            let outcome = calculate(&id, period);
            record(&mut result, id, outcome);
        }

        log_summary(&result);
        result
    }

    /// Calculates employees on the blocking thread pool, bounded by
    /// `max_concurrency`. Outcomes are reported in input order.
    pub async fn run_concurrent<F>(
        &self,
        employee_ids: &[String],
        period: PayPeriod,
        calculate: F,
    ) -> BatchResult
    where
        F: Fn(&str, PayPeriod) -> EngineResult<Payslip> + Send + Sync + 'static,
    {
        let ids = dedupe(employee_ids);
        info!(
            period = %period,
            employees = ids.len(),
            max_concurrency = self.max_concurrency,
            "Starting concurrent batch run"
        );

        let calculate = Arc::new(calculate);
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut dispatched = Vec::with_capacity(ids.len());

        for id in ids {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    dispatched.push(Dispatch::Skipped(id));
                    continue;
                }
            };
            if self.cancellation.is_cancelled() {
                dispatched.push(Dispatch::Skipped(id));
                continue;
            }

            let calculate = Arc::clone(&calculate);
            let task_id = id.clone();
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                calculate(&task_id, period)
            });
            dispatched.push(Dispatch::Spawned(id, handle));
        }

        let mut result = BatchResult::new(period);
        for dispatch in dispatched {
            match dispatch {
                Dispatch::Skipped(id) => result.skipped.push(id),
                Dispatch::Spawned(id, handle) => {
                    let outcome = handle.await.unwrap_or_else(|err| {
                        Err(EngineError::CalculationError {
                            message: format!("calculation task did not complete: {}", err),
                        })
                    });
                    record(&mut result, id, outcome);
                }
            }
        }

        log_summary(&result);
        result
    }
}

impl Default for BatchPayrollRunner {
    fn default() -> Self {
        Self::new(4)
    }
}

fn dedupe(employee_ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(employee_ids.len());
    employee_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

fn record(result: &mut BatchResult, employee_id: String, outcome: EngineResult<Payslip>) {
    match outcome {
        Ok(payslip) => {
            debug!(employee_id = %employee_id, net_pay = %payslip.net_pay, "Employee calculated");
            if let Err(err) = result.push_success(payslip) {
                warn!(employee_id = %employee_id, error = %err, "Batch totals overflowed");
                result.push_failure(BatchFailure::from_error(employee_id, &err));
            }
        }
        Err(err) => {
            warn!(
                employee_id = %employee_id,
                category = ?err.category(),
                error = %err,
                "Employee calculation failed"
            );
            result.push_failure(BatchFailure::from_error(employee_id, &err));
        }
    }
}

fn log_summary(result: &BatchResult) {
    info!(
        period = %result.period,
        succeeded = result.succeeded.len(),
        failed = result.failed.len(),
        skipped = result.skipped.len(),
        total_gross = %result.total_gross,
        total_net = %result.total_net,
        "Batch run finished"
    );
}
