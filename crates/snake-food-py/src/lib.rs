use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;
use snake_food_core::chance::DEFAULT_SPAWN_PERIOD;
use snake_food_core::{Coord, FoodConfig, FoodField, OccupancyGrid};

/// PyO3 module exposing the food layer to the Python gym.
#[pyfunction]
fn version() -> &'static str {
    "0.1.0"
}

fn index_error(e: impl std::fmt::Display) -> PyErr {
    PyIndexError::new_err(e.to_string())
}

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn coords(list: Option<Vec<(usize, usize)>>) -> impl Iterator<Item = Coord> {
    list.unwrap_or_default().into_iter().map(Coord::from)
}

/// Food layer with the gym's method names. Snake maps are nested x-major
/// lists (`snake_map.tolist()` for numpy arrays); any non-zero cell is a snake.
#[pyclass(name = "FoodField")]
struct PyFoodField {
    inner: FoodField,
}

#[pymethods]
impl PyFoodField {
    #[new]
    #[pyo3(signature = (map_size, food_spawn_locations = None, seed = 0, spawn_period = DEFAULT_SPAWN_PERIOD))]
    fn new(
        map_size: (usize, usize),
        food_spawn_locations: Option<Vec<(usize, usize)>>,
        seed: u64,
        spawn_period: i32,
    ) -> PyResult<Self> {
        let config = FoodConfig {
            board_width: map_size.0,
            board_height: map_size.1,
            spawn_period,
            seed,
        };
        let inner =
            FoodField::try_from_config(&config, coords(food_spawn_locations)).map_err(value_error)?;
        Ok(Self { inner })
    }

    #[staticmethod]
    #[pyo3(signature = (config_json, food_spawn_locations = None))]
    fn from_config_json(
        config_json: &str,
        food_spawn_locations: Option<Vec<(usize, usize)>>,
    ) -> PyResult<Self> {
        let config = FoodConfig::from_json(config_json).map_err(value_error)?;
        let inner =
            FoodField::try_from_config(&config, coords(food_spawn_locations)).map_err(value_error)?;
        Ok(Self { inner })
    }

    #[staticmethod]
    #[pyo3(signature = (map_size, food_list, seed = 0))]
    fn make_from_list(
        map_size: (usize, usize),
        food_list: Vec<(usize, usize)>,
        seed: u64,
    ) -> PyResult<Self> {
        let mut field = Self::new(map_size, None, seed, DEFAULT_SPAWN_PERIOD)?;
        for coord in coords(Some(food_list)) {
            field.inner.place_food(coord).map_err(index_error)?;
        }
        Ok(field)
    }

    /// Place one food item; returns its coordinate.
    fn spawn_food(&mut self, snake_map: Vec<Vec<f64>>) -> PyResult<(usize, usize)> {
        let snakes = OccupancyGrid::from_rows(&snake_map);
        let placement = self.inner.spawn_one_round(&snakes).map_err(index_error)?;
        Ok(placement.coord().into())
    }

    /// End-of-turn spawn rules; returns how many food items were placed.
    fn end_of_turn(
        &mut self,
        snake_map: Vec<Vec<f64>>,
        number_of_food_eaten: usize,
        number_of_snakes_alive: usize,
    ) -> PyResult<usize> {
        let snakes = OccupancyGrid::from_rows(&snake_map);
        let outcome = self
            .inner
            .advance_turn(&snakes, number_of_food_eaten, number_of_snakes_alive)
            .map_err(index_error)?;
        Ok(outcome.spawned())
    }

    fn get_food_map(&self) -> Vec<Vec<u8>> {
        self.inner.food_map().rows()
    }

    fn does_coord_have_food(&self, coord: (usize, usize)) -> PyResult<bool> {
        let coord = Coord::from(coord);
        self.inner
            .try_has_food(coord)
            .ok_or_else(|| index_error(format!("coordinate {coord} is off the board")))
    }

    fn remove_food_from_coord(&mut self, coord: (usize, usize)) -> PyResult<()> {
        self.does_coord_have_food(coord)?;
        self.inner.remove_food(coord.into());
        Ok(())
    }

    #[getter]
    fn turns_since_last_food_spawn(&self) -> u32 {
        self.inner.turns_since_last_spawn()
    }

    #[setter]
    fn set_turns_since_last_food_spawn(&mut self, turns: u32) {
        self.inner.set_turns_since_last_spawn(turns);
    }

    #[getter]
    fn max_turns_to_next_food_spawn(&self) -> i32 {
        self.inner.spawn_period()
    }

    fn stats_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.stats()).map_err(value_error)
    }
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_class::<PyFoodField>()?;
    Ok(())
}
