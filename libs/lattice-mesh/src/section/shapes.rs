//! # Profile Shapes
//!
//! Loop generators. Every generator returns a fixed point count for a given
//! set of arguments, so sections built from one generator can be stitched.

use super::Profile;
use glam::DVec2;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

impl Profile {
    /// Rectangle with half-width `a` and half-height `b`.
    ///
    /// Corner order: bottom-left, top-left, top-right, bottom-right.
    pub fn rectangle(a: f64, b: f64) -> Self {
        Self::rectangle_asymmetric(a, b, a, b)
    }

    /// Rectangle whose negative and positive half-extents differ.
    ///
    /// # Arguments
    ///
    /// * `a`, `b` - Half-width toward `-y`, half-height toward `-z`
    /// * `a2`, `b2` - Half-width toward `+y`, half-height toward `+z`
    pub fn rectangle_asymmetric(a: f64, b: f64, a2: f64, b2: f64) -> Self {
        Self::new(vec![
            DVec2::new(-a, -b),
            DVec2::new(-a, b2),
            DVec2::new(a2, b2),
            DVec2::new(a2, -b),
        ])
    }

    /// Ellipse of `n` points evenly spaced in angle, `(a·cos θ, b·sin θ)`.
    pub fn ellipse(a: f64, b: f64, n: usize) -> Self {
        let points = (0..n)
            .map(|i| {
                let theta = TAU * i as f64 / n as f64;
                DVec2::new(a * theta.cos(), b * theta.sin())
            })
            .collect();
        Self::new(points)
    }

    /// Ellipse built per quadrant with separate semi-axes on each side.
    ///
    /// `n / 4` points go into each quadrant; the last quadrant includes its
    /// end angle `2π`, the others exclude it. Quadrants with positive `y`
    /// use `a2` and those with positive `z` use `b2`; a zero `a2` or `b2`
    /// means "same as the negative side".
    pub fn ellipse_quadrants(a: f64, b: f64, n: usize, a2: f64, b2: f64) -> Self {
        let a2 = if a2 == 0.0 { a } else { a2 };
        let b2 = if b2 == 0.0 { b } else { b2 };
        let per_quadrant = n / 4;

        // (start angle, y semi-axis, z semi-axis, includes end)
        let quadrants = [
            (0.0, a2, b2, false),
            (FRAC_PI_2, a, b2, false),
            (PI, a, b, false),
            (3.0 * FRAC_PI_2, a2, b, true),
        ];

        let mut points = Vec::with_capacity(per_quadrant * 4);
        for &(start, ya, zb, include_end) in &quadrants {
            for theta in quadrant_angles(start, per_quadrant, include_end) {
                points.push(DVec2::new(ya * theta.cos(), zb * theta.sin()));
            }
        }
        Self::new(points)
    }

    /// Multipole star for an `n_fold` magnet: `2·n_fold` points at
    /// `π·i/n_fold + π/(2·n_fold)`.
    pub fn multipole(aperture: f64, n_fold: usize) -> Self {
        let n = n_fold as f64;
        let points = (0..2 * n_fold)
            .map(|i| {
                let angle = PI * i as f64 / n + PI / (2.0 * n);
                DVec2::new(aperture * angle.cos(), aperture * angle.sin())
            })
            .collect();
        Self::new(points)
    }
}

/// Evenly spaced angles over a quarter turn starting at `start`.
fn quadrant_angles(start: f64, count: usize, include_end: bool) -> impl Iterator<Item = f64> {
    let divisions = if include_end {
        count.saturating_sub(1).max(1)
    } else {
        count.max(1)
    };
    (0..count).map(move |i| start + FRAC_PI_2 * i as f64 / divisions as f64)
}
