//! Python bindings for the cue-core shot physics engine.
//!
//! ```python
//! from cue_physics import Ball, Table, Vec2, simulate_shot
//!
//! table = Table.eight_foot()
//! cue = Ball(0.5, 0.5, vx=2.0)
//! obj = Ball(1.0, 0.5)
//!
//! success, path, (cue, obj) = simulate_shot(cue, [obj], Vec2(2.54, 0.5), table)
//! print(success, len(path), obj.position)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

use cue_core::difficulty::ShotDifficultyScorer;
use cue_core::presets::PresetLoader;
use cue_core::simulation::{ShotSimulator, SimulationConfig};
use cue_core::types::{Ball as CoreBall, Table as CoreTable, ValidationError, Vec2 as CoreVec2};

fn invalid(err: ValidationError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// 2D vector for positions and velocities on the cloth.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec2 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
}

#[pymethods]
impl Vec2 {
    #[new]
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn __repr__(&self) -> String {
        format!("Vec2({:.4}, {:.4})", self.x, self.y)
    }

    fn magnitude(&self) -> f64 {
        CoreVec2::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<CoreVec2> for Vec2 {
    fn from(v: CoreVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2> for CoreVec2 {
    fn from(v: Vec2) -> Self {
        CoreVec2::new(v.x, v.y)
    }
}

/// A billiard ball with standard mass, radius, and restitution unless overridden.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Ball {
    inner: CoreBall,
}

#[pymethods]
impl Ball {
    #[new]
    #[pyo3(signature = (x, y, vx=0.0, vy=0.0))]
    fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        CoreBall::new(CoreVec2::new(x, y), CoreVec2::new(vx, vy)).into()
    }

    fn __repr__(&self) -> String {
        let b = &self.inner;
        format!(
            "Ball(pos=({:.4}, {:.4}), vel=({:.4}, {:.4}))",
            b.position.x, b.position.y, b.velocity.x, b.velocity.y
        )
    }

    #[getter]
    fn position(&self) -> Vec2 {
        self.inner.position.into()
    }

    #[setter]
    fn set_position(&mut self, v: Vec2) {
        self.inner.position = v.into();
    }

    #[getter]
    fn velocity(&self) -> Vec2 {
        self.inner.velocity.into()
    }

    #[setter]
    fn set_velocity(&mut self, v: Vec2) {
        self.inner.velocity = v.into();
    }

    #[getter]
    fn mass(&self) -> f64 {
        self.inner.mass
    }

    #[setter]
    fn set_mass(&mut self, mass: f64) -> PyResult<()> {
        self.update(|b| b.mass = mass)
    }

    #[getter]
    fn radius(&self) -> f64 {
        self.inner.radius
    }

    #[setter]
    fn set_radius(&mut self, radius: f64) -> PyResult<()> {
        self.update(|b| b.radius = radius)
    }

    #[getter]
    fn restitution(&self) -> f64 {
        self.inner.restitution
    }

    #[setter]
    fn set_restitution(&mut self, restitution: f64) -> PyResult<()> {
        self.update(|b| b.restitution = restitution)
    }

    /// Speed in m/s.
    fn speed(&self) -> f64 {
        self.inner.speed()
    }

    /// Aim the ball at a point with the given speed.
    fn strike_toward(&mut self, target: Vec2, speed: f64) {
        self.inner = self.inner.struck_toward(target.into(), speed);
    }
}

impl Ball {
    /// Apply a change only if the result still validates.
    fn update(&mut self, change: impl FnOnce(&mut CoreBall)) -> PyResult<()> {
        let mut next = self.inner;
        change(&mut next);
        next.validate().map_err(invalid)?;
        self.inner = next;
        Ok(())
    }
}

impl From<CoreBall> for Ball {
    fn from(inner: CoreBall) -> Self {
        Self { inner }
    }
}

/// Playing surface dimensions and cushion properties.
#[pyclass]
#[derive(Clone)]
pub struct Table {
    inner: CoreTable,
}

#[pymethods]
impl Table {
    #[new]
    #[pyo3(signature = (width, height, pocket_radius=0.057, rail_restitution=0.7, surface_friction=0.2))]
    fn new(
        width: f64,
        height: f64,
        pocket_radius: f64,
        rail_restitution: f64,
        surface_friction: f64,
    ) -> PyResult<Self> {
        let inner = CoreTable {
            width,
            height,
            pocket_radius,
            rail_restitution,
            surface_friction,
        };
        inner.validate().map_err(invalid)?;
        Ok(Self { inner })
    }

    #[staticmethod]
    fn eight_foot() -> Self {
        CoreTable::eight_foot().into()
    }

    #[staticmethod]
    fn nine_foot() -> Self {
        CoreTable::nine_foot().into()
    }

    #[staticmethod]
    fn seven_foot() -> Self {
        CoreTable::seven_foot().into()
    }

    fn __repr__(&self) -> String {
        format!("Table({:.3} x {:.3})", self.inner.width, self.inner.height)
    }

    #[getter]
    fn width(&self) -> f64 {
        self.inner.width
    }

    #[getter]
    fn height(&self) -> f64 {
        self.inner.height
    }

    #[getter]
    fn pocket_radius(&self) -> f64 {
        self.inner.pocket_radius
    }

    #[getter]
    fn rail_restitution(&self) -> f64 {
        self.inner.rail_restitution
    }

    #[getter]
    fn surface_friction(&self) -> f64 {
        self.inner.surface_friction
    }

    /// The six pocket centers: four corners, then the two side pockets.
    fn pocket_positions(&self) -> Vec<Vec2> {
        self.inner
            .pocket_positions()
            .into_iter()
            .map(Vec2::from)
            .collect()
    }
}

impl From<CoreTable> for Table {
    fn from(inner: CoreTable) -> Self {
        Self { inner }
    }
}

/// Simulate a shot.
///
/// Returns `(success, cue_trajectory, final_balls)` where `final_balls` is the
/// cue ball followed by the object balls. The balls passed in are not modified.
#[pyfunction]
#[pyo3(signature = (cue, objects, target, table=None, max_steps=1000, dt=0.001))]
fn simulate_shot(
    py: Python<'_>,
    cue: Ball,
    objects: Vec<Ball>,
    target: Vec2,
    table: Option<PyRef<'_, Table>>,
    max_steps: usize,
    dt: f64,
) -> PyResult<(bool, Vec<(f64, f64)>, Vec<Ball>)> {
    if dt.is_nan() || dt <= 0.0 {
        return Err(PyValueError::new_err(format!("dt must be positive, got {}", dt)));
    }
    let table = table.map(|t| t.inner.clone()).unwrap_or_default();
    let config = SimulationConfig {
        max_steps,
        dt,
        ..SimulationConfig::default()
    };

    let mut cue = cue.inner;
    let mut objects: Vec<CoreBall> = objects.into_iter().map(|b| b.inner).collect();

    let outcome = py.allow_threads(|| {
        ShotSimulator::with_config(&table, config).simulate(&mut cue, &mut objects, target.into())
    });

    let trajectory = outcome
        .cue_trajectory
        .iter()
        .map(|p| (p.x, p.y))
        .collect();
    let balls = std::iter::once(cue)
        .chain(objects)
        .map(Ball::from)
        .collect();

    Ok((outcome.success, trajectory, balls))
}

/// Difficulty in `[0, 1]` of sinking `object` in `pocket`; 0 is trivial.
#[pyfunction]
#[pyo3(signature = (cue, object, pocket, table=None))]
fn shot_difficulty(cue: Ball, object: Ball, pocket: Vec2, table: Option<PyRef<'_, Table>>) -> f64 {
    let table = table.map(|t| t.inner.clone()).unwrap_or_default();
    ShotDifficultyScorer::new(&table).score(&cue.inner, &object.inner, pocket.into())
}

/// Load a table preset from `<base>/tables/<name>.yaml`.
#[pyfunction]
fn load_table(base: &str, name: &str) -> PyResult<Table> {
    PresetLoader::new(base)
        .load_table(name)
        .map(Table::from)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Route engine logs to stderr, e.g. `init_logging("cue_core=debug")`.
///
/// Returns False if a subscriber was already installed.
#[pyfunction]
#[pyo3(signature = (filter="info"))]
fn init_logging(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Python module definition.
#[pymodule]
fn cue_physics(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec2>()?;
    m.add_class::<Ball>()?;
    m.add_class::<Table>()?;
    m.add_function(wrap_pyfunction!(simulate_shot, m)?)?;
    m.add_function(wrap_pyfunction!(shot_difficulty, m)?)?;
    m.add_function(wrap_pyfunction!(load_table, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    Ok(())
}
