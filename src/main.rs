//! Simulates the reference two-node zone and charts its temperatures.
//!
//! Takes no arguments. Logging honors `RUST_LOG` and defaults to `info`.
//! The chart is written to `zone_temperatures.png` in the working directory.

use anyhow::{Context, Result};
use log::{info, warn};
use plotters::style::{BLUE, RED};
use uom::si::{
    f64::{ThermodynamicTemperature, Time},
    thermodynamic_temperature::degree_celsius,
    time::second,
};

use twine_zone::{
    models::thermal::zone::{
        CrossingError, TimeGrid, ZoneParameters, ZoneSimulation, ZoneState,
    },
    support::{
        constraint::StrictlyPositive,
        plot::{PlotConfig, Series, render},
    },
};

const OUTPUT_PATH: &str = "zone_temperatures.png";

/// Interior temperature whose arrival time is reported.
const COMFORT_LIMIT_CELSIUS: f64 = 25.0;

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    let simulation = ZoneSimulation::new(ZoneParameters::reference());
    let initial = ZoneState::from_celsius(20.0, 18.0);
    let grid = TimeGrid::reference();

    info!(
        "simulating reference zone over {} samples from {} s to {} s",
        grid.len(),
        grid.start().get::<second>(),
        grid.end().get::<second>(),
    );

    let trajectory = simulation
        .run(initial, &grid)
        .context("failed to simulate the reference zone")?;

    if let Some(last) = trajectory.last() {
        info!(
            "final temperatures: interior {:.3} °C, structure {:.3} °C",
            last.state.interior.get::<degree_celsius>(),
            last.state.structure.get::<degree_celsius>(),
        );
    }

    let horizon = StrictlyPositive::new(grid.end() - grid.start())
        .context("reference horizon must be positive")?;
    let limit = ThermodynamicTemperature::new::<degree_celsius>(COMFORT_LIMIT_CELSIUS);

    match simulation.time_to_interior_temperature(initial, limit, horizon) {
        Ok(time) => info!(
            "interior reaches {COMFORT_LIMIT_CELSIUS} °C after {:.1} s",
            time.get::<second>()
        ),
        Err(CrossingError::NotReached { horizon, .. }) => warn!(
            "interior does not reach {COMFORT_LIMIT_CELSIUS} °C within {} s",
            Time::get::<second>(&horizon)
        ),
        Err(err) => return Err(err).context("failed to search for the interior crossing"),
    }

    let series = [
        Series::new("Internal Temp (Tint)", trajectory.interior_series(), RED),
        Series::new("Structural Temp (Ts)", trajectory.structure_series(), BLUE),
    ];
    let config = PlotConfig {
        title: "Two-node zone temperatures".to_string(),
        ..PlotConfig::default()
    };

    render(OUTPUT_PATH, &series, &config).context("failed to render temperature chart")?;
    info!("wrote {OUTPUT_PATH}");

    Ok(())
}
