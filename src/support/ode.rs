//! Adaptive-step integration of [`OdeProblem`]s with [`diffsol`]'s BDF solver.
//!
//! [`solve`] integrates a [`Model`] whose output is a state derivative, as
//! described by an [`OdeProblem`], and reports model snapshots at
//! caller-chosen times. Typed states and derivatives cross into the solver
//! through [`OdeVector`]. Between output times the solver takes as many
//! variable-order BDF steps as the tolerances in [`OdeConfig`] demand; output
//! values are interpolated from its history.
//!
//! The right-hand side comes from the model, so diffsol's Newton iteration
//! receives a forward-difference Jacobian action rather than an analytic one.

mod config;
mod error;
mod solution;
mod vector;

pub use config::OdeConfig;
pub use error::OdeError;
pub use solution::{OdeSolution, OdeStats};
pub use vector::OdeVector;

use std::cell::RefCell;

use diffsol::{NalgebraLU, NalgebraMat, OdeBuilder, OdeSolverMethod, VectorHost};
use twine_core::{DerivativeOf, Model, OdeProblem, Snapshot};

type Matrix = NalgebraMat<f64>;
type Lu = NalgebraLU<f64>;

/// Integrates `model` from `initial` and reports a snapshot at each of `times`.
///
/// `times` are absolute values of the independent variable. The first one is
/// the time of `initial`, and the first snapshot holds `initial` itself.
/// Later inputs are rebuilt with [`OdeProblem::build_input`] from `initial`,
/// the integrated state, and the elapsed time. Repeated times repeat the
/// previous snapshot.
///
/// # Errors
///
/// Returns an [`OdeError`] if `config` or `times` is invalid, if the model or
/// problem fails, if the derivative or state becomes non-finite, or if the
/// solver cannot reach the last time within the step limit.
/// No partial solution is returned.
pub fn solve<M, P, const N: usize>(
    model: &M,
    problem: &P,
    initial: M::Input,
    times: &[f64],
    config: &OdeConfig,
) -> Result<OdeSolution<M::Input, M::Output>, OdeError>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::State: OdeVector<N>,
    P::Delta: OdeVector<1>,
    DerivativeOf<P::State, P::Delta>: OdeVector<N>,
{
    config.validate()?;
    validate_times(times)?;

    let t0 = times[0];
    let t_end = times[times.len() - 1];

    let output = model.call(&initial).map_err(OdeError::model)?;
    let y0 = problem.state(&initial).map_err(OdeError::problem)?.to_array();
    let f0 = problem
        .derivative(&initial, &output)
        .map_err(OdeError::problem)?
        .to_array();
    if !all_finite(&y0) || !all_finite(&f0) {
        return Err(OdeError::NonFinite { time: t0 });
    }

    let mut history = Vec::with_capacity(times.len());
    history.push(Snapshot::new(initial.clone(), output));

    if t_end == t0 {
        history.resize(times.len(), history[0].clone());
        return Ok(OdeSolution {
            times: times.to_vec(),
            history,
            stats: OdeStats::default(),
        });
    }

    // The solver cannot return errors from the right-hand side, so the first
    // failure is held here and the solver sees zeros until it is checked.
    let failure = RefCell::new(None);
    let evaluate = |t: f64, y: &[f64], out: &mut [f64]| {
        match rates::<M, P, N>(model, problem, &initial, t, t - t0, y) {
            Ok(rates) => out.copy_from_slice(&rates),
            Err(err) => {
                failure.borrow_mut().get_or_insert(err);
                out.fill(0.0);
            }
        }
    };

    let ode = OdeBuilder::<Matrix>::new()
        .t0(t0)
        .rtol(config.rel_tol)
        .atol([config.abs_tol])
        .rhs_implicit(
            |x, _p, t, y| evaluate(t, x.as_slice(), y.as_mut_slice()),
            |x, _p, t, v, y| {
                jacobian_action::<N>(&evaluate, t, x.as_slice(), v.as_slice(), y.as_mut_slice());
            },
        )
        .init(move |_p, _t, y| y.as_mut_slice().copy_from_slice(&y0), N)
        .build()
        .map_err(|source| OdeError::solver(t0, source))?;

    let mut solver = ode.bdf::<Lu>().map_err(|source| OdeError::solver(t0, source))?;
    check(&failure)?;
    solver
        .set_stop_time(t_end)
        .map_err(|source| OdeError::solver(t0, source))?;

    let mut steps = 0;
    let mut previous = t0;

    for &target in &times[1..] {
        if target == previous {
            let last = history[history.len() - 1].clone();
            history.push(last);
            continue;
        }

        while solver.state().t < target {
            if steps >= config.max_steps {
                return Err(OdeError::MaxSteps {
                    time: solver.state().t,
                    steps,
                });
            }
            let result = solver.step();
            steps += 1;
            check(&failure)?;
            result.map_err(|source| OdeError::solver(solver.state().t, source))?;
        }

        let y = solver
            .interpolate(target)
            .map_err(|source| OdeError::solver(target, source))?;
        let values: [f64; N] = std::array::from_fn(|i| y.as_slice()[i]);
        if !all_finite(&values) {
            return Err(OdeError::NonFinite { time: target });
        }

        let input = input_at::<M, P, N>(problem, &initial, target - t0, values)?;
        let output = model.call(&input).map_err(OdeError::model)?;
        history.push(Snapshot::new(input, output));
        previous = target;
    }

    let bdf = solver.get_statistics();
    let stats = OdeStats {
        steps: bdf.number_of_steps,
        error_test_failures: bdf.number_of_error_test_failures,
        nonlinear_iterations: bdf.number_of_nonlinear_solver_iterations,
        linear_solver_setups: bdf.number_of_linear_solver_setups,
    };

    Ok(OdeSolution {
        times: times.to_vec(),
        history,
        stats,
    })
}

fn validate_times(times: &[f64]) -> Result<(), OdeError> {
    if times.is_empty() {
        return Err(OdeError::EmptyTimes);
    }

    for (index, t) in times.iter().enumerate() {
        if !t.is_finite() {
            return Err(OdeError::NonFiniteTime { index });
        }
        if index > 0 && *t < times[index - 1] {
            return Err(OdeError::DecreasingTimes { index });
        }
    }

    Ok(())
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn check(failure: &RefCell<Option<OdeError>>) -> Result<(), OdeError> {
    match failure.borrow_mut().take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Rebuilds the model input for state `y` at `elapsed` past the initial time.
fn input_at<M, P, const N: usize>(
    problem: &P,
    initial: &M::Input,
    elapsed: f64,
    y: [f64; N],
) -> Result<M::Input, OdeError>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::State: OdeVector<N>,
    P::Delta: OdeVector<1>,
{
    let state = P::State::from_array(y);
    let delta = P::Delta::from_array([elapsed]);
    problem
        .build_input(initial, &state, &delta)
        .map_err(OdeError::problem)
}

/// Evaluates the state derivative through the model at time `t`.
fn rates<M, P, const N: usize>(
    model: &M,
    problem: &P,
    initial: &M::Input,
    t: f64,
    elapsed: f64,
    y: &[f64],
) -> Result<[f64; N], OdeError>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::State: OdeVector<N>,
    P::Delta: OdeVector<1>,
    DerivativeOf<P::State, P::Delta>: OdeVector<N>,
{
    let y: [f64; N] = std::array::from_fn(|i| y[i]);
    if !all_finite(&y) {
        return Err(OdeError::NonFinite { time: t });
    }

    let input = input_at::<M, P, N>(problem, initial, elapsed, y)?;
    let output = model.call(&input).map_err(OdeError::model)?;
    let rates = problem
        .derivative(&input, &output)
        .map_err(OdeError::problem)?
        .to_array();

    if all_finite(&rates) {
        Ok(rates)
    } else {
        Err(OdeError::NonFinite { time: t })
    }
}

/// Forward-difference approximation of `J(x) · v`.
fn jacobian_action<const N: usize>(
    evaluate: &impl Fn(f64, &[f64], &mut [f64]),
    t: f64,
    x: &[f64],
    v: &[f64],
    out: &mut [f64],
) {
    let v_norm = v.iter().fold(0.0_f64, |norm, vi| norm.max(vi.abs()));
    if v_norm == 0.0 {
        out.fill(0.0);
        return;
    }

    let x_norm = x.iter().fold(0.0_f64, |norm, xi| norm.max(xi.abs()));
    let eps = f64::EPSILON.sqrt() * x_norm.max(1.0) / v_norm;

    let shifted: [f64; N] = std::array::from_fn(|i| x[i] + eps * v[i]);
    let mut base = [0.0; N];
    let mut perturbed = [0.0; N];
    evaluate(t, x, &mut base);
    evaluate(t, &shifted, &mut perturbed);

    for ((o, p), b) in out.iter_mut().zip(perturbed).zip(base) {
        *o = (p - b) / eps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use twine_core::StepIntegrable;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Point<const N: usize>([f64; N]);

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Rate<const N: usize>([f64; N]);

    impl<const N: usize> StepIntegrable<f64> for Point<N> {
        type Derivative = Rate<N>;

        fn step(&self, derivative: Rate<N>, delta: f64) -> Self {
            Point(std::array::from_fn(|i| self.0[i] + derivative.0[i] * delta))
        }
    }

    impl<const N: usize> OdeVector<N> for Point<N> {
        fn to_array(&self) -> [f64; N] {
            self.0
        }

        fn from_array(values: [f64; N]) -> Self {
            Point(values)
        }
    }

    impl<const N: usize> OdeVector<N> for Rate<N> {
        fn to_array(&self) -> [f64; N] {
            self.0
        }

        fn from_array(values: [f64; N]) -> Self {
            Rate(values)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Input<const N: usize> {
        t: f64,
        y: Point<N>,
    }

    /// A model whose output is `rhs(t, y)`.
    struct Rhs<F, const N: usize>(F);

    impl<F, const N: usize> Model for Rhs<F, N>
    where
        F: Fn(f64, &[f64; N]) -> [f64; N],
    {
        type Input = Input<N>;
        type Output = Rate<N>;
        type Error = Infallible;

        fn call(&self, input: &Input<N>) -> Result<Rate<N>, Infallible> {
            Ok(Rate((self.0)(input.t, &input.y.0)))
        }
    }

    /// Integrates the whole input state over `t`.
    struct Ivp<const N: usize>;

    impl<const N: usize> OdeProblem for Ivp<N> {
        type Input = Input<N>;
        type Output = Rate<N>;
        type Delta = f64;
        type State = Point<N>;
        type Error = Infallible;

        fn state(&self, input: &Input<N>) -> Result<Point<N>, Infallible> {
            Ok(input.y)
        }

        fn derivative(&self, _input: &Input<N>, output: &Rate<N>) -> Result<Rate<N>, Infallible> {
            Ok(*output)
        }

        fn build_input(
            &self,
            base: &Input<N>,
            state: &Point<N>,
            delta: &f64,
        ) -> Result<Input<N>, Infallible> {
            Ok(Input {
                t: base.t + delta,
                y: *state,
            })
        }
    }

    fn integrate<F, const N: usize>(
        rhs: F,
        y0: [f64; N],
        times: &[f64],
        config: &OdeConfig,
    ) -> Result<OdeSolution<Input<N>, Rate<N>>, OdeError>
    where
        F: Fn(f64, &[f64; N]) -> [f64; N],
    {
        let initial = Input {
            t: times.first().copied().unwrap_or_default(),
            y: Point(y0),
        };
        solve::<_, _, N>(&Rhs::<F, N>(rhs), &Ivp::<N>, initial, times, config)
    }

    fn states<const N: usize>(solution: &OdeSolution<Input<N>, Rate<N>>) -> Vec<[f64; N]> {
        solution.history.iter().map(|s| s.input.y.0).collect()
    }

    #[allow(clippy::cast_precision_loss)]
    fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
        let step = (end - start) / (count - 1) as f64;
        (0..count).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn exponential_growth_matches_closed_form() {
        let times = linspace(0.0, 2.0, 21);
        let solution = integrate(|_, y: &[f64; 1]| [0.8 * y[0]], [3.0], &times, &OdeConfig::default())
            .expect("exponential growth should integrate");

        for (t, snapshot) in solution.iter() {
            assert_relative_eq!(snapshot.input.y.0[0], 3.0 * (0.8 * t).exp(), max_relative = 1e-6);
            assert_relative_eq!(snapshot.input.t, t, epsilon = 1e-12);
        }
    }

    #[test]
    fn harmonic_oscillator_conserves_phase() {
        let times = linspace(0.0, std::f64::consts::TAU, 9);
        let solution = integrate(
            |_, y: &[f64; 2]| [y[1], -y[0]],
            [1.0, 0.0],
            &times,
            &OdeConfig::default(),
        )
        .expect("oscillator should integrate");

        for (t, snapshot) in solution.iter() {
            let [x, v] = snapshot.input.y.0;
            assert_relative_eq!(x, t.cos(), epsilon = 1e-5);
            assert_relative_eq!(v, -t.sin(), epsilon = 1e-5);
        }
    }

    #[test]
    fn time_dependent_forcing() {
        // dy/dt = t, y(1) = 0  =>  y(t) = (t^2 - 1) / 2
        let times = [1.0, 2.0, 3.0];
        let solution = integrate(|t, _: &[f64; 1]| [t], [0.0], &times, &OdeConfig::default())
            .expect("forcing should integrate");

        let y = states(&solution);
        assert_relative_eq!(y[1][0], 1.5, epsilon = 1e-7);
        assert_relative_eq!(y[2][0], 4.0, epsilon = 1e-7);
    }

    #[test]
    fn outputs_are_model_evaluations() {
        let solution = integrate(|_, y: &[f64; 1]| [-2.0 * y[0]], [1.0], &[0.0, 0.5], &OdeConfig::default())
            .unwrap();

        for snapshot in &solution.history {
            assert_eq!(snapshot.output, Rate([-2.0 * snapshot.input.y.0[0]]));
        }
    }

    #[test]
    fn first_snapshot_is_initial_input_exactly() {
        let y0 = [20.0, 18.0];
        let solution = integrate(
            |_, y: &[f64; 2]| [0.1 * y[0], 0.2 * y[1]],
            y0,
            &[0.0, 5.0],
            &OdeConfig::default(),
        )
        .unwrap();

        assert_eq!(solution.history[0].input, Input { t: 0.0, y: Point(y0) });
        assert_eq!(solution.times, vec![0.0, 5.0]);
    }

    #[test]
    fn repeated_times_repeat_states() {
        let solution = integrate(
            |_, y: &[f64; 1]| [-y[0]],
            [1.0],
            &[0.0, 0.0, 1.0, 1.0, 2.0],
            &OdeConfig::default(),
        )
        .unwrap();

        let y = states(&solution);
        assert_eq!(y.len(), 5);
        assert_eq!(y[0], y[1]);
        assert_eq!(y[2], y[3]);
        assert_relative_eq!(y[4][0], (-2.0f64).exp(), max_relative = 1e-6);
    }

    #[test]
    fn single_time_returns_initial_state() {
        let solution = integrate(|_, y: &[f64; 1]| [y[0]], [4.0], &[7.0], &OdeConfig::default())
            .unwrap();

        assert_eq!(states(&solution), vec![[4.0]]);
        assert_eq!(solution.stats, OdeStats::default());
    }

    #[test]
    fn deterministic() {
        let times = linspace(0.0, 10.0, 50);
        let rhs = |_: f64, y: &[f64; 2]| [0.3 * y[0] - 0.1 * y[1], 0.05 * y[0]];

        let a = integrate(rhs, [1.0, 2.0], &times, &OdeConfig::default()).unwrap();
        let b = integrate(rhs, [1.0, 2.0], &times, &OdeConfig::default()).unwrap();

        assert_eq!(states(&a), states(&b));
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn rejects_bad_times() {
        let rhs = |_: f64, y: &[f64; 1]| [y[0]];
        let config = OdeConfig::default();

        assert!(matches!(
            integrate(rhs, [1.0], &[], &config),
            Err(OdeError::EmptyTimes)
        ));
        assert!(matches!(
            integrate(rhs, [1.0], &[0.0, f64::NAN], &config),
            Err(OdeError::NonFiniteTime { index: 1 })
        ));
        assert!(matches!(
            integrate(rhs, [1.0], &[0.0, 2.0, 1.0], &config),
            Err(OdeError::DecreasingTimes { index: 2 })
        ));
    }

    #[test]
    fn rejects_invalid_config_before_integrating() {
        let rhs = |_: f64, y: &[f64; 2]| [3e-7 * y[0], 4e-7 * y[0]];
        let times = [0.0, 1000.0];

        let zero_abs_tol = OdeConfig {
            abs_tol: 0.0,
            ..OdeConfig::default()
        };
        assert!(matches!(
            integrate(rhs, [0.0, 0.0], &times, &zero_abs_tol),
            Err(OdeError::InvalidConfig {
                setting: "absolute tolerance",
                ..
            })
        ));

        let nan_rel_tol = OdeConfig {
            rel_tol: f64::NAN,
            ..OdeConfig::default()
        };
        assert!(matches!(
            integrate(rhs, [0.0, 0.0], &times, &nan_rel_tol),
            Err(OdeError::InvalidConfig {
                setting: "relative tolerance",
                ..
            })
        ));

        let no_steps = OdeConfig {
            max_steps: 0,
            ..OdeConfig::default()
        };
        assert!(matches!(
            integrate(rhs, [0.0, 0.0], &[0.0], &no_steps),
            Err(OdeError::InvalidConfig {
                setting: "step limit",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_derivative_aborts() {
        let result = integrate(
            |_, y: &[f64; 1]| [y[0] / 0.0],
            [1.0],
            &[0.0, 1.0],
            &OdeConfig::default(),
        );

        assert!(matches!(result, Err(OdeError::NonFinite { time }) if time == 0.0));
    }

    #[test]
    fn derivative_turning_non_finite_mid_run_aborts() {
        let result = integrate(
            |t, y: &[f64; 1]| if t < 0.5 { [-y[0]] } else { [f64::NAN] },
            [1.0],
            &[0.0, 1.0],
            &OdeConfig::default(),
        );

        match result {
            Err(err @ OdeError::NonFinite { .. }) => {
                assert!(err.time().is_some_and(|t| t >= 0.5));
            }
            other => panic!("Expected NonFinite, got: {other:?}"),
        }
    }

    #[test]
    fn blow_up_aborts() {
        // dy/dt = y^2, y(0) = 1 has a singularity at t = 1.
        let result = integrate(
            |_, y: &[f64; 1]| [y[0] * y[0]],
            [1.0],
            &[0.0, 2.0],
            &OdeConfig::default(),
        );

        assert!(
            matches!(
                result,
                Err(OdeError::NonFinite { .. }
                    | OdeError::StepSizeUnderflow { .. }
                    | OdeError::MaxSteps { .. }
                    | OdeError::Solver { .. })
            ),
            "expected integration failure, got: {result:?}"
        );
    }

    #[test]
    fn step_limit_is_enforced() {
        let config = OdeConfig {
            max_steps: 3,
            ..OdeConfig::default()
        };

        let result = integrate(|_, y: &[f64; 1]| [-y[0]], [1.0], &[0.0, 100.0], &config);
        match result {
            Err(err @ OdeError::MaxSteps { steps: 3, .. }) => {
                assert!(err.time().is_some_and(|t| t > 0.0 && t < 100.0));
            }
            other => panic!("Expected MaxSteps, got: {other:?}"),
        }
    }

    #[test]
    fn zero_state_stays_zero() {
        let times = linspace(0.0, 1000.0, 100);
        let solution = integrate(
            |_, y: &[f64; 2]| [3e-7 * y[0], 4e-7 * y[0]],
            [0.0, 0.0],
            &times,
            &OdeConfig::default(),
        )
        .unwrap();

        assert!(states(&solution).iter().all(|y| *y == [0.0, 0.0]));
    }

    #[test]
    fn model_errors_are_reported() {
        #[derive(Debug, thiserror::Error)]
        #[error("model is undefined past t = 0.5")]
        struct Undefined;

        struct Partial;

        impl Model for Partial {
            type Input = Input<1>;
            type Output = Rate<1>;
            type Error = Undefined;

            fn call(&self, input: &Input<1>) -> Result<Rate<1>, Undefined> {
                if input.t > 0.5 {
                    Err(Undefined)
                } else {
                    Ok(Rate([-input.y.0[0]]))
                }
            }
        }

        let initial = Input {
            t: 0.0,
            y: Point([1.0]),
        };
        let result = solve::<_, _, 1>(&Partial, &Ivp::<1>, initial, &[0.0, 1.0], &OdeConfig::default());

        match result {
            Err(OdeError::Model(err)) => assert!(err.is::<Undefined>()),
            other => panic!("Expected Model error, got: {other:?}"),
        }
    }
}
