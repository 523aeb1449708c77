// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`
use kurbo::{Affine, Vec2};

/// Matrix, scale, and rotation of a view.
///
/// The matrix is a 2×3 affine map with coefficients `[a, b, c, d, e, f]`:
///
/// ```text
/// (x, y) → (a·x + c·y + e, b·x + d·y + f)
/// ```
///
/// Its linear part is always a rotation times a uniform scale:
///
/// ```text
/// [a, b, c, d] = [s·cos θ, s·sin θ, −s·sin θ, s·cos θ]
/// ```
///
/// where `s` is [`AffineState::scale`] and `θ` is [`AffineState::theta`].
/// Only the translation `(e, f)` is free. Every mutation made through
/// [`crate::ViewTransform`] keeps this relation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineState {
    matrix: Affine,
    scale: f64,
    theta: f64,
}

impl Default for AffineState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineState {
    /// Identity matrix, scale `1`, rotation `0`.
    pub const IDENTITY: Self = Self {
        matrix: Affine::IDENTITY,
        scale: 1.0,
        theta: 0.0,
    };

    /// Returns the full matrix.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Returns the matrix coefficients `[a, b, c, d, e, f]`.
    ///
    /// This is the argument order of a canvas `setTransform` call.
    #[must_use]
    pub fn coeffs(&self) -> [f64; 6] {
        self.matrix.as_coeffs()
    }

    /// Returns the uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the cumulative clockwise rotation in radians.
    ///
    /// This is not wrapped into `[0, 2π)`.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Returns the translation `(e, f)`.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.matrix.translation()
    }

    /// Largest absolute difference between the stored linear part and the one
    /// implied by `scale` and `theta`.
    #[must_use]
    pub fn linear_deviation(&self) -> f64 {
        let [a, b, c, d, _, _] = self.coeffs();
        let [ea, eb, ec, ed] = linear_part(self.scale, self.theta);
        (a - ea)
            .abs()
            .max((b - eb).abs())
            .max((c - ec).abs())
            .max((d - ed).abs())
    }

    /// Whether the linear part matches `scale` and `theta` within `tolerance`.
    #[must_use]
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        self.linear_deviation() <= tolerance
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        let [a, b, c, d, e, f] = self.coeffs();
        self.matrix = Affine::new([a, b, c, d, e + delta.x, f + delta.y]);
    }

    /// Multiplies every coefficient by `factor` and records `new_scale`.
    ///
    /// `new_scale` must equal `scale * factor` up to rounding.
    pub(crate) fn scale_about_origin(&mut self, factor: f64, new_scale: f64) {
        let [a, b, c, d, e, f] = self.coeffs();
        self.matrix = Affine::new([
            a * factor,
            b * factor,
            c * factor,
            d * factor,
            e * factor,
            f * factor,
        ]);
        self.scale = new_scale;
    }

    /// Sets `theta` and recomputes the linear part from trig.
    pub(crate) fn set_theta(&mut self, theta: f64) {
        self.theta = theta;
        let [a, b, c, d] = linear_part(self.scale, theta);
        let t = self.translation();
        self.matrix = Affine::new([a, b, c, d, t.x, t.y]);
    }
}

fn linear_part(scale: f64, theta: f64) -> [f64; 4] {
    let dir = Vec2::from_angle(theta) * scale;
    [dir.x, dir.y, -dir.y, dir.x]
}
