// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use kurbo::{Point, Vec2};

use crate::RotationObserver;

/// Directional indicator that follows the rotation of a view.
///
/// The compass tracks a *heading* `h = π − theta`. With screen Y pointing
/// down, its needle `(sin h, cos h)` is the on-screen direction of world
/// "up" `(0, −1)`, so an unrotated view has heading `π` and a needle pointing
/// straight up.
///
/// A compass can also drive the view. [`Compass::turn_to`] and
/// [`Compass::turn_towards`] update the heading and return the rotation
/// delta for the caller to apply with
/// [`RotationNotify::Suppress`](crate::RotationNotify::Suppress):
///
/// ```rust
/// use kurbo::Point;
/// use understory_view_transform::{Compass, RotationNotify, ViewTransform};
///
/// let mut view = ViewTransform::with_observer((), Compass::default());
/// let center = Point::new(400.0, 300.0);
///
/// // The user drags the compass needle to point right.
/// let delta = view.observer_mut().turn_towards(Point::new(50.0, 0.0), Point::ZERO);
/// view.rotate(delta, center, RotationNotify::Suppress);
///
/// assert!((view.observer().heading() - view.heading()).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Compass {
    heading: f64,
    initial_heading: f64,
}

impl Default for Compass {
    /// A compass matching an unrotated view (heading `π`).
    fn default() -> Self {
        Self::new(PI)
    }
}

impl Compass {
    /// Creates a compass with the given initial heading in radians.
    #[must_use]
    pub fn new(initial_heading: f64) -> Self {
        Self {
            heading: initial_heading,
            initial_heading,
        }
    }

    /// Current heading in radians (unbounded).
    #[must_use]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Heading the compass was created with.
    #[must_use]
    pub fn initial_heading(&self) -> f64 {
        self.initial_heading
    }

    /// Unit vector, in screen space, along which the needle is drawn.
    #[must_use]
    pub fn needle(&self) -> Vec2 {
        let v = Vec2::from_angle(self.heading);
        // `from_angle` yields (cos, sin); the needle is (sin, cos).
        Vec2::new(v.y, v.x)
    }

    /// Restores the initial heading.
    pub fn reset(&mut self) {
        self.heading = self.initial_heading;
    }

    /// Turns the needle to `target` heading by the shortest arc.
    ///
    /// Returns the view rotation delta (clockwise radians, within `(−π, π]`)
    /// that keeps the view consistent with the new heading.
    pub fn turn_to(&mut self, target: f64) -> f64 {
        let delta = wrap_angle(self.heading - target);
        self.heading -= delta;
        delta
    }

    /// Turns the needle to point from `center` towards `pointer`.
    ///
    /// Both points are in the compass's own screen space. If they coincide
    /// the heading is unchanged and `0.0` is returned.
    pub fn turn_towards(&mut self, pointer: Point, center: Point) -> f64 {
        let d = pointer - center;
        if d == Vec2::ZERO {
            return 0.0;
        }
        // Inverse of `needle`: (sin h, cos h) ∝ (dx, dy).
        self.turn_to(Vec2::new(d.y, d.x).atan2())
    }
}

impl RotationObserver for Compass {
    fn rotation_changed(&mut self, heading: f64) {
        self.heading = heading;
    }
}

/// Wraps `angle` into `(−π, π]`.
fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle - TAU * ((angle + PI) / TAU).floor();
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}
