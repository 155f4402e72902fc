use twine_core::Snapshot;

/// Model snapshots at the requested times, plus solver statistics.
#[derive(Debug, Clone)]
pub struct OdeSolution<I, O> {
    /// Requested output times, in order.
    pub times: Vec<f64>,

    /// One model input/output pair per requested time.
    pub history: Vec<Snapshot<I, O>>,

    /// Work done by the solver.
    pub stats: OdeStats,
}

impl<I, O> OdeSolution<I, O> {
    /// Iterates over `(time, snapshot)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Snapshot<I, O>)> {
        self.times.iter().copied().zip(self.history.iter())
    }
}

/// Counters reported by the BDF solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OdeStats {
    /// Steps that met the error tolerance.
    pub steps: usize,

    /// Steps retried after failing the error test.
    pub error_test_failures: usize,

    /// Newton iterations across all steps.
    pub nonlinear_iterations: usize,

    /// Jacobian factorizations.
    pub linear_solver_setups: usize,
}
