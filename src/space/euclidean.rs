//! R² transport space: Euclidean or Manhattan metric over floating-point points.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::{Interpolated, TransportSpace};

/// A point in the plane. Neither coordinate carries units; callers pick a
/// consistent scale (the spec's scenarios use plain distance units with
/// `velocity = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which metric [`EuclideanSpace`] uses for `d`/`t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
}

/// Euclidean or Manhattan R² space with a uniform travel velocity.
///
/// `random_point` draws uniformly from an optional bounding box; without one
/// it defaults to the unit square, matching the teacher's convention of
/// giving every spatial helper a small built-in default rather than making
/// callers always supply one (`spatial::GeoIndex::default` picks resolution
/// 9 the same way).
#[derive(Debug, Clone, Copy)]
pub struct EuclideanSpace {
    velocity: f64,
    metric: Metric,
    bounds: (Point2, Point2),
}

impl EuclideanSpace {
    /// Construct a space with the given velocity and metric, defaulting the
    /// `random_point` bounding box to the unit square `[0,1] x [0,1]`.
    ///
    /// A non-positive velocity is an `InvalidConfiguration` condition (§7):
    /// raised at construction, fatal, not something the dispatcher can
    /// recover mid-run from.
    pub fn new(velocity: f64, metric: Metric) -> Result<Self, ConfigError> {
        if velocity <= 0.0 {
            return Err(ConfigError::NonPositiveVelocity(velocity));
        }
        Ok(Self {
            velocity,
            metric,
            bounds: (Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)),
        })
    }

    pub fn with_bounds(mut self, min: Point2, max: Point2) -> Self {
        self.bounds = (min, max);
        self
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }
}

fn dist(metric: Metric, u: Point2, v: Point2) -> f64 {
    let dx = v.x - u.x;
    let dy = v.y - u.y;
    match metric {
        Metric::Euclidean => (dx * dx + dy * dy).sqrt(),
        Metric::Manhattan => dx.abs() + dy.abs(),
    }
}

impl TransportSpace for EuclideanSpace {
    type Loc = Point2;

    fn d(&self, u: Point2, v: Point2) -> f64 {
        dist(self.metric, u, v)
    }

    fn t(&self, u: Point2, v: Point2) -> f64 {
        self.d(u, v) / self.velocity
    }

    fn interp_time(&self, u: Point2, v: Point2, time_to_dest: f64) -> Interpolated<Point2> {
        let total = self.t(u, v);
        if total <= 0.0 {
            return Interpolated {
                location: v,
                residual: 0.0,
            };
        }
        let frac = (time_to_dest / total).clamp(0.0, 1.0);
        let location = Point2::new(v.x - frac * (v.x - u.x), v.y - frac * (v.y - u.y));
        Interpolated {
            location,
            residual: 0.0,
        }
    }

    fn interp_dist(&self, u: Point2, v: Point2, dist_to_dest: f64) -> Interpolated<Point2> {
        let total = self.d(u, v);
        if total <= 0.0 {
            return Interpolated {
                location: v,
                residual: 0.0,
            };
        }
        let frac = (dist_to_dest / total).clamp(0.0, 1.0);
        let location = Point2::new(v.x - frac * (v.x - u.x), v.y - frac * (v.y - u.y));
        Interpolated {
            location,
            residual: 0.0,
        }
    }

    fn random_point(&self, rng: &mut dyn rand::RngCore) -> Point2 {
        let (min, max) = self.bounds;
        Point2::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euclidean_distance_matches_pythagoras() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let d = space.d(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn manhattan_distance_sums_axes() {
        let space = EuclideanSpace::new(1.0, Metric::Manhattan).unwrap();
        let d = space.d(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((d - 7.0).abs() < 1e-9);
    }

    #[test]
    fn travel_time_scales_by_velocity() {
        let space = EuclideanSpace::new(2.0, Metric::Euclidean).unwrap();
        let t = space.t(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert!((t - 5.0).abs() < 1e-9);
    }

    #[test]
    fn interp_time_midpoint() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let u = Point2::new(0.0, 0.0);
        let v = Point2::new(10.0, 0.0);
        let half = space.interp_time(u, v, 5.0);
        assert!((half.location.x - 5.0).abs() < 1e-9);
        assert_eq!(half.residual, 0.0);
    }

    #[test]
    fn non_positive_velocity_is_rejected() {
        let err = EuclideanSpace::new(0.0, Metric::Euclidean).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveVelocity(0.0));

        let err = EuclideanSpace::new(-3.0, Metric::Euclidean).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveVelocity(-3.0));
    }
}
