//! # Problem instances
//!
//! A [`TspInstance`] holds the city coordinates of a travelling salesperson
//! problem and, optionally, a known optimal route. City 0 is the start and end
//! of every tour.
//!
//! Instances are read from TSPLIB-style text:
//!
//! ```text
//! NAME : tiny4
//! TYPE : TSP
//! NODE_COORD_SECTION
//! 1 0 0
//! 2 3 0
//! 3 3 4
//! 4 0 4
//! EOF
//! ```
//!
//! Optimal tours list 1-indexed cities after a `TOUR_SECTION` line and end
//! with `-1`.
//!
//! ## Example
//!
//! ```rust
//! use genroute::tsp::TspInstance;
//!
//! let text = "NAME : tiny4\nNODE_COORD_SECTION\n1 0 0\n2 3 0\n3 3 4\n4 0 4\nEOF\n";
//! let tour = "TOUR_SECTION\n1\n2\n3\n4\n-1\n";
//!
//! let instance = TspInstance::parse(text).unwrap().with_optimal_tour(tour).unwrap();
//! assert_eq!(instance.name(), "tiny4");
//! assert_eq!(instance.num_cities(), 4);
//! assert_eq!(instance.optimal_length(), Some(14.0));
//! ```

use std::{fmt::Display, fs, io, path::Path, str::FromStr};

use tracing::debug;

use crate::{
    error::{GeneticError, OptionExt, Result},
    genotype::Route,
};

/// A point in the plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// City coordinates and an optional known-optimal route.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TspInstance {
    name: String,
    cities: Vec<Point>,
    optimal_route: Option<Route>,
}

impl TspInstance {
    /// Creates an instance from coordinates. City 0 is the tour start.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInstance` if there are fewer than two cities, a
    /// coordinate is NaN or infinite, or every leg between two cities rounds
    /// to zero, which leaves every tour with length 0.
    pub fn new(name: impl Into<String>, cities: Vec<Point>) -> Result<Self> {
        if cities.len() < 2 {
            return Err(GeneticError::InvalidInstance(format!(
                "an instance needs at least 2 cities, found {}",
                cities.len()
            )));
        }
        if let Some(city) = cities.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeneticError::InvalidInstance(format!(
                "city {} has non-finite coordinates {:?}",
                city + 1,
                cities[city]
            )));
        }
        let spread = cities
            .iter()
            .enumerate()
            .any(|(i, a)| cities[i + 1..].iter().any(|b| a.distance(b).round() > 0.0));
        if !spread {
            return Err(GeneticError::InvalidInstance(
                "every city lies within rounding distance of every other, so all tours have length 0"
                    .to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            cities,
            optimal_route: None,
        })
    }

    /// Attaches a known-optimal route.
    pub fn with_optimal_route(mut self, route: Route) -> Result<Self> {
        if route.cities().len() != self.route_len() || !route.is_permutation() {
            return Err(GeneticError::InvalidInstance(format!(
                "optimal route {:?} does not cover cities 1..={}",
                route.cities(),
                self.route_len()
            )));
        }
        self.optimal_route = Some(route);
        Ok(self)
    }

    /// Parses and attaches an optimal tour given as `TOUR_SECTION` text.
    pub fn with_optimal_tour(self, text: &str) -> Result<Self> {
        let route = parse_optimal_tour(text, self.num_cities())?;
        self.with_optimal_route(route)
    }

    /// Parses TSPLIB-style instance text.
    pub fn parse(text: &str) -> Result<Self> {
        parse_instance(text)
    }

    /// Reads an instance file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = read_text(path, "instance")?;
        let instance = parse_instance(&text)?;
        debug!(name = %instance.name, cities = instance.num_cities(), "loaded instance");
        Ok(instance)
    }

    /// Reads an instance file and, if given, its optimal tour file.
    pub fn from_files(instance: impl AsRef<Path>, optimal: Option<&Path>) -> Result<Self> {
        let loaded = Self::load(instance)?;
        match optimal {
            Some(path) => {
                let text = read_text(path, "optimal tour")?;
                loaded.with_optimal_tour(&text)
            }
            None => Ok(loaded),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cities(&self) -> &[Point] {
        &self.cities
    }

    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    /// Length of a route genotype for this instance (every city but city 0).
    pub fn route_len(&self) -> usize {
        self.cities.len() - 1
    }

    pub fn optimal_route(&self) -> Option<&Route> {
        self.optimal_route.as_ref()
    }

    /// Closed tour length from city 0 through `route` and back, each leg
    /// rounded to the nearest integer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGenotype` if the route names a city the instance does not have.
    pub fn tour_length(&self, route: &Route) -> Result<f64> {
        let depot = self.cities[0];
        let mut last = depot;
        let mut length = 0.0;
        for &city in route.cities() {
            let point = self.cities.get(city).copied().ok_or_else_genetic(|| {
                GeneticError::InvalidGenotype(format!(
                    "city {} out of range for {} cities",
                    city,
                    self.cities.len()
                ))
            })?;
            length += last.distance(&point).round();
            last = point;
        }
        length += last.distance(&depot).round();
        Ok(length)
    }

    /// Length of the known-optimal route, if one is attached.
    pub fn optimal_length(&self) -> Option<f64> {
        self.optimal_route
            .as_ref()
            .and_then(|route| self.tour_length(route).ok())
    }

    /// Fitness of the known-optimal route, usable as a stopping target.
    pub fn optimal_fitness(&self) -> Option<f64> {
        self.optimal_length().map(fitness_of_length)
    }
}

/// Fitness of a tour of `length`. Lengths are sums of rounded legs, so a
/// positive length is at least 1; a tour whose legs all round to zero
/// scores as if it had length 1.
pub(crate) fn fitness_of_length(length: f64) -> f64 {
    1.0 / length.round().max(1.0)
}

/// Reads `path`, keeping the I/O error kind and naming the file in the message.
fn read_text(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        GeneticError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read {} {}: {}", what, path.display(), e),
        ))
    })
}

fn parse_number<T>(token: &str, what: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    token.parse::<T>().map_err(|e| {
        GeneticError::InvalidInstance(format!("line {}: bad {} {:?}: {}", line, what, token, e))
    })
}

fn parse_coordinate(token: &str, what: &str, line: usize) -> Result<f64> {
    let value: f64 = parse_number(token, what, line)?;
    if !value.is_finite() {
        return Err(GeneticError::InvalidInstance(format!(
            "line {}: {} {:?} is not finite",
            line, what, token
        )));
    }
    Ok(value)
}

/// Parses TSPLIB-style instance text.
///
/// # Errors
///
/// Returns `InvalidInstance` if the `NODE_COORD_SECTION` or `EOF` markers are
/// missing, a coordinate row is malformed or not finite, or the cities do not
/// form a valid [`TspInstance`].
pub fn parse_instance(text: &str) -> Result<TspInstance> {
    let mut lines = text.lines().enumerate();
    let mut name = None;
    let mut in_coordinates = false;

    for (_, line) in lines.by_ref() {
        let line = line.trim();
        if line.starts_with("NODE_COORD_SECTION") {
            in_coordinates = true;
            break;
        }
        if let Some(rest) = line.strip_prefix("NAME") {
            let value = rest.trim_start().trim_start_matches(':').trim();
            if !value.is_empty() {
                name = Some(value.to_string());
            }
        }
    }
    if !in_coordinates {
        return Err(GeneticError::InvalidInstance(
            "missing NODE_COORD_SECTION".to_string(),
        ));
    }

    let mut cities = Vec::new();
    let mut terminated = false;
    for (index, line) in lines {
        let line_no = index + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            ["EOF", ..] => {
                terminated = true;
                break;
            }
            [id, x, y, ..] => {
                let id: usize = parse_number(id, "city index", line_no)?;
                if id != cities.len() + 1 {
                    return Err(GeneticError::InvalidInstance(format!(
                        "line {}: expected city {}, found {}",
                        line_no,
                        cities.len() + 1,
                        id
                    )));
                }
                cities.push(Point::new(
                    parse_coordinate(x, "x coordinate", line_no)?,
                    parse_coordinate(y, "y coordinate", line_no)?,
                ));
            }
            _ => {
                return Err(GeneticError::InvalidInstance(format!(
                    "line {}: expected `index x y`, found {:?}",
                    line_no, line
                )))
            }
        }
    }
    if !terminated {
        return Err(GeneticError::InvalidInstance(
            "missing EOF marker after the coordinates".to_string(),
        ));
    }

    TspInstance::new(name.unwrap_or_else(|| "unnamed".to_string()), cities)
}

/// Parses a `TOUR_SECTION` listing for an instance of `num_cities` cities.
///
/// Cities on disk are 1-indexed. The tour is rotated to start at city 0 and
/// returned as a route over the remaining cities.
pub fn parse_optimal_tour(text: &str, num_cities: usize) -> Result<Route> {
    if num_cities == 0 {
        return Err(GeneticError::InvalidInstance(
            "cannot read a tour for an instance without cities".to_string(),
        ));
    }

    let mut lines = text.lines().enumerate();
    if !lines
        .by_ref()
        .any(|(_, line)| line.trim().starts_with("TOUR_SECTION"))
    {
        return Err(GeneticError::InvalidInstance(
            "missing TOUR_SECTION".to_string(),
        ));
    }

    let mut tour = Vec::with_capacity(num_cities);
    'lines: for (index, line) in lines {
        for token in line.split_whitespace() {
            if token == "EOF" {
                break 'lines;
            }
            let city: i64 = parse_number(token, "tour city", index + 1)?;
            if city == -1 {
                break 'lines;
            }
            if city < 1 || city as usize > num_cities {
                return Err(GeneticError::InvalidInstance(format!(
                    "line {}: tour city {} outside 1..={}",
                    index + 1,
                    city,
                    num_cities
                )));
            }
            tour.push(city as usize - 1);
        }
    }

    let mut seen = vec![false; num_cities];
    for &city in &tour {
        if seen[city] {
            return Err(GeneticError::InvalidInstance(format!(
                "tour visits city {} twice",
                city + 1
            )));
        }
        seen[city] = true;
    }
    if tour.len() != num_cities {
        return Err(GeneticError::InvalidInstance(format!(
            "tour lists {} of {} cities",
            tour.len(),
            num_cities
        )));
    }

    let start = tour.iter().position(|&c| c == 0).unwrap_or(0);
    tour.rotate_left(start);
    Route::try_new(tour.split_off(1))
}
