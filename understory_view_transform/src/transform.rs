// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use kurbo::{Affine, Point, Rect, Vec2};

use crate::config::{ViewTransformConfig, ZoomInput};
use crate::observer::{RotationNotify, RotationObserver};
use crate::sink::PresentationSink;
use crate::state::AffineState;

/// Pan, zoom, and rotate state of a canvas view.
///
/// `ViewTransform` owns an [`AffineState`] mapping world coordinates to
/// screen pixels. Zoom and rotation take a *pivot* in screen space: the point
/// under the pivot stays on the same pixel before and after the call.
///
/// After every mutation the full matrix is pushed to the
/// [`PresentationSink`]. Rotations are additionally reported to the
/// [`RotationObserver`] as a heading `π − theta`, unless suppressed.
///
/// The scale is clamped to the limits in [`ViewTransformConfig`]; when a zoom
/// request is clamped, the factor actually applied is used for the pivot
/// correction so the pivot stays fixed at the limits too.
#[derive(Clone, Debug)]
pub struct ViewTransform<S, O = ()> {
    state: AffineState,
    config: ViewTransformConfig,
    sink: S,
    observer: O,
}

impl<S: PresentationSink> ViewTransform<S> {
    /// Creates an identity transform that presents to `sink`.
    ///
    /// The sink receives the identity matrix immediately.
    pub fn new(sink: S) -> Self {
        Self::with_observer(sink, ())
    }
}

impl<S: PresentationSink, O: RotationObserver> ViewTransform<S, O> {
    /// Creates an identity transform with a rotation observer.
    ///
    /// The sink receives the identity matrix immediately. The observer is
    /// not notified; construct it with a matching initial heading (`π`).
    pub fn with_observer(sink: S, observer: O) -> Self {
        let mut view = Self {
            state: AffineState::IDENTITY,
            config: ViewTransformConfig::default(),
            sink,
            observer,
        };
        view.present();
        view
    }

    /// Returns this transform with `config` applied.
    ///
    /// Equivalent to calling [`ViewTransform::set_scale_limits`] and
    /// [`ViewTransform::set_zoom_input`].
    #[must_use]
    pub fn with_config(mut self, config: ViewTransformConfig) -> Self {
        self.config.set_zoom_input(config.zoom_input());
        self.set_scale_limits(config.min_scale(), config.max_scale());
        self
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> ViewTransformConfig {
        self.config
    }

    /// Sets the convention used by [`ViewTransform::zoom`].
    pub fn set_zoom_input(&mut self, zoom_input: ZoomInput) {
        self.config.set_zoom_input(zoom_input);
    }

    /// Sets the minimum and maximum scale.
    ///
    /// The range is normalized as in [`ViewTransformConfig::set_scale_limits`].
    /// If the current scale lies outside the new range it is clamped by
    /// zooming about the screen origin.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        self.config.set_scale_limits(min_scale, max_scale);
        let scale = self.state.scale();
        let clamped = self.config.clamp_scale(scale);
        if clamped != scale {
            self.apply_scale(clamped, Point::ZERO);
        }
    }

    /// Returns the full view state.
    #[must_use]
    pub fn state(&self) -> &AffineState {
        &self.state
    }

    /// Returns the world → screen matrix.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.state.matrix()
    }

    /// Returns the uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale()
    }

    /// Returns the cumulative clockwise rotation in radians.
    #[must_use]
    pub fn theta(&self) -> f64 {
        self.state.theta()
    }

    /// Returns the heading reported to the observer, `π − theta`.
    #[must_use]
    pub fn heading(&self) -> f64 {
        PI - self.state.theta()
    }

    /// Returns the translation `(e, f)` in screen pixels.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.state.translation()
    }

    /// Returns the presentation sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the presentation sink mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Returns the rotation observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Returns the rotation observer mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Splits the transform into its state, sink, and observer.
    pub fn into_parts(self) -> (AffineState, S, O) {
        (self.state, self.sink, self.observer)
    }

    /// Pans the view by `delta` screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.state.translate(delta);
        self.present();
    }

    /// Zooms about `pivot`, interpreting `amount` per the configured
    /// [`ZoomInput`].
    ///
    /// Returns the multiplicative factor actually applied after clamping.
    pub fn zoom(&mut self, amount: f64, pivot: Point) -> f64 {
        let factor = self
            .config
            .zoom_input()
            .to_factor(amount, self.state.scale());
        self.zoom_by_factor(factor, pivot)
    }

    /// Zooms about `pivot` by a raw device `delta`.
    ///
    /// Uses [`ViewTransformConfig::delta_sensitivity`] regardless of the
    /// configured [`ZoomInput`]. Returns the factor actually applied.
    pub fn zoom_by_delta(&mut self, delta: f64, pivot: Point) -> f64 {
        let input = ZoomInput::Delta {
            sensitivity: self.config.delta_sensitivity(),
        };
        let factor = input.to_factor(delta, self.state.scale());
        self.zoom_by_factor(factor, pivot)
    }

    /// Zooms about `pivot` by a multiplicative `factor`.
    ///
    /// The new scale is clamped into the configured limits. Returns the
    /// factor actually applied: `factor` (up to rounding) when no clamping
    /// occurred, `1.0` for a non-finite request, which is ignored.
    pub fn zoom_by_factor(&mut self, factor: f64, pivot: Point) -> f64 {
        if !factor.is_finite() {
            log::debug!("ignoring non-finite zoom factor {factor}");
            return 1.0;
        }
        let scale = self.state.scale();
        let requested = scale * factor;
        let clamped = self.config.clamp_scale(requested);
        if clamped != requested {
            log::debug!("zoom clamped: requested scale {requested}, applied {clamped}");
        }
        self.apply_scale(clamped, pivot)
    }

    /// Rotates the view by `delta` radians (clockwise) about `pivot`.
    ///
    /// `theta` accumulates without wrapping. With [`RotationNotify::Emit`] the
    /// observer receives the new heading `π − theta`. A non-finite `delta` is
    /// ignored.
    pub fn rotate(&mut self, delta: f64, pivot: Point, notify: RotationNotify) {
        if !delta.is_finite() {
            log::debug!("ignoring non-finite rotation {delta}");
            return;
        }
        let rel = pivot - self.state.translation().to_point();
        self.state.set_theta(self.state.theta() + delta);

        // Rotating about the translation origin carries `rel` to the same
        // radius at angle `phi + delta`; move the origin so the pivot returns.
        // `atan2(0, 0)` is 0, so a zero radius yields no correction.
        let rho = rel.hypot();
        let phi = rel.atan2();
        let moved = Vec2::from_angle(phi + delta) * rho;
        self.state.translate(rel - moved);
        self.present();

        if notify == RotationNotify::Emit {
            self.observer.rotation_changed(self.heading());
        }
    }

    /// Returns to the identity transform.
    ///
    /// The observer is told the identity heading `π`.
    pub fn reset(&mut self) {
        self.state = AffineState::IDENTITY;
        self.present();
        self.observer.rotation_changed(self.heading());
    }

    /// Converts a screen point into world coordinates.
    ///
    /// This applies the exact inverse of [`ViewTransform::matrix`], including
    /// rotation.
    #[must_use]
    pub fn screen_to_world(&self, pt: Point) -> Point {
        let rel = (pt - self.state.translation().to_point()) / self.state.scale();
        // Undo the rotation: R(−θ).
        let dir = Vec2::from_angle(self.state.theta());
        Point::new(
            dir.x * rel.x + dir.y * rel.y,
            -dir.y * rel.x + dir.x * rel.y,
        )
    }

    /// Converts a screen point into world coordinates, ignoring rotation.
    ///
    /// Computes `((x − e) / scale, (y − f) / scale)`. This matches
    /// [`ViewTransform::screen_to_world`] only while `theta` is a multiple of
    /// `2π`; it is kept for callers that relied on this approximation.
    #[must_use]
    pub fn screen_to_world_unrotated(&self, pt: Point) -> Point {
        let t = self.state.translation();
        let scale = self.state.scale();
        Point::new((pt.x - t.x) / scale, (pt.y - t.y) / scale)
    }

    /// Converts a world point into screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, pt: Point) -> Point {
        self.state.matrix() * pt
    }

    /// Returns the world-space bounding box of a screen rectangle.
    ///
    /// Under rotation the box is larger than the rectangle's preimage.
    #[must_use]
    pub fn visible_world_rect(&self, view_rect: Rect) -> Rect {
        let q0 = self.screen_to_world(view_rect.origin());
        let q1 = self.screen_to_world(Point::new(view_rect.max_x(), view_rect.y0));
        let q2 = self.screen_to_world(Point::new(view_rect.x0, view_rect.max_y()));
        let q3 = self.screen_to_world(Point::new(view_rect.max_x(), view_rect.max_y()));
        let min_x = q0.x.min(q1.x).min(q2.x).min(q3.x);
        let min_y = q0.y.min(q1.y).min(q2.y).min(q3.y);
        let max_x = q0.x.max(q1.x).max(q2.x).max(q3.x);
        let max_y = q0.y.max(q1.y).max(q2.y).max(q3.y);
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewTransformDebugInfo {
        ViewTransformDebugInfo {
            coeffs: self.state.coeffs(),
            scale: self.state.scale(),
            theta: self.state.theta(),
            heading: self.heading(),
            linear_deviation: self.state.linear_deviation(),
            config: self.config,
        }
    }

    /// Scales to `new_scale` about `pivot` and returns the applied factor.
    fn apply_scale(&mut self, new_scale: f64, pivot: Point) -> f64 {
        let factor = new_scale / self.state.scale();
        self.state.scale_about_origin(factor, new_scale);
        // Scaling about the origin moves the pivot; translating by
        // `pivot * (1 - factor)` puts it back.
        self.state.translate(pivot.to_vec2() * (1.0 - factor));
        self.present();
        factor
    }

    fn present(&mut self) {
        debug_assert!(
            self.state.is_consistent(1e-9 * self.state.scale().max(1.0)),
            "linear part drifted from scale/theta: {:?}",
            self.state
        );
        log::trace!(
            "view transform: {:?} (scale {}, theta {})",
            self.state.coeffs(),
            self.state.scale(),
            self.state.theta()
        );
        self.sink.set_transform(self.state.matrix());
    }
}

/// Debug snapshot of a [`ViewTransform`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransformDebugInfo {
    /// Matrix coefficients `[a, b, c, d, e, f]`.
    pub coeffs: [f64; 6],
    /// Current uniform scale.
    pub scale: f64,
    /// Cumulative clockwise rotation in radians.
    pub theta: f64,
    /// Heading reported to the observer, `π − theta`.
    pub heading: f64,
    /// See [`AffineState::linear_deviation`].
    pub linear_deviation: f64,
    /// Active configuration.
    pub config: ViewTransformConfig,
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use kurbo::{Affine, Point, Rect, Vec2};

    use super::ViewTransform;
    use crate::{RotationNotify, ViewTransformConfig, ZoomInput};

    fn assert_point_near(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn new_presents_identity() {
        let view = ViewTransform::new(Vec::<Affine>::new());
        assert_eq!(view.sink().as_slice(), &[Affine::IDENTITY]);
        assert_eq!(view.scale(), 1.0);
        assert_eq!(view.theta(), 0.0);
    }

    #[test]
    fn zoom_then_pan_scenario() {
        let mut view = ViewTransform::new(Affine::IDENTITY);
        let applied = view.zoom(2.0, Point::new(100.0, 100.0));
        assert_eq!(applied, 2.0);
        assert_eq!(view.scale(), 2.0);
        assert_eq!(view.matrix().as_coeffs(), [2.0, 0.0, 0.0, 2.0, -100.0, -100.0]);

        view.pan(Vec2::new(10.0, -5.0));
        assert_eq!(view.matrix().as_coeffs(), [2.0, 0.0, 0.0, 2.0, -90.0, -105.0]);
        assert_eq!(*view.sink(), view.matrix());
    }

    #[test]
    fn zoom_clamps_and_keeps_pivot() {
        let mut view = ViewTransform::new(());
        view.pan(Vec2::new(13.0, -7.0));
        let pivot = Point::new(250.0, 80.0);
        let world = view.screen_to_world(pivot);

        let applied = view.zoom(100.0, pivot);
        assert_eq!(view.scale(), 4.0);
        assert_eq!(applied, 4.0);
        assert_point_near(view.world_to_screen(world), pivot);

        let applied = view.zoom(1e-6, pivot);
        assert_eq!(view.scale(), 0.125);
        assert!((applied - 0.125 / 4.0).abs() < 1e-12);
        assert_point_near(view.world_to_screen(world), pivot);
    }

    #[test]
    fn non_finite_zoom_is_ignored() {
        let mut view = ViewTransform::new(Vec::<Affine>::new());
        assert_eq!(view.zoom(f64::NAN, Point::ZERO), 1.0);
        assert_eq!(view.zoom(f64::INFINITY, Point::ZERO), 1.0);
        assert_eq!(view.scale(), 1.0);
        // Only the construction push.
        assert_eq!(view.sink().len(), 1);
    }

    #[test]
    fn negative_factor_saturates_at_floor() {
        let mut view = ViewTransform::new(());
        view.zoom(-3.0, Point::new(5.0, 5.0));
        assert_eq!(view.scale(), 0.125);
        assert!(view.state().is_consistent(1e-12));
    }

    #[test]
    fn delta_zoom_uses_sensitivity() {
        let config = ViewTransformConfig::new().with_zoom_input(ZoomInput::Delta { sensitivity: 0.01 });
        let mut view = ViewTransform::new(()).with_config(config);
        view.zoom(50.0, Point::ZERO);
        assert!((view.scale() - 1.5).abs() < 1e-12);

        // Explicit delta zoom works under the factor convention too.
        let mut view = ViewTransform::new(());
        view.zoom_by_delta(-500.0, Point::ZERO);
        assert!((view.scale() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn rotate_keeps_pivot_and_notifies() {
        let mut view = ViewTransform::with_observer((), Vec::<f64>::new());
        view.zoom(1.5, Point::new(40.0, 40.0));
        view.pan(Vec2::new(-20.0, 35.0));
        let pivot = Point::new(320.0, 240.0);
        let world = view.screen_to_world(pivot);

        view.rotate(FRAC_PI_4, pivot, RotationNotify::Emit);
        assert_point_near(view.world_to_screen(world), pivot);
        assert_eq!(view.observer().as_slice(), &[PI - FRAC_PI_4]);

        view.rotate(FRAC_PI_4, pivot, RotationNotify::Suppress);
        assert_eq!(view.observer().len(), 1);
        assert!((view.theta() - FRAC_PI_2).abs() < 1e-12);
        assert!(view.state().is_consistent(1e-12));
    }

    #[test]
    fn rotate_about_translation_origin_needs_no_correction() {
        let mut view = ViewTransform::new(());
        view.pan(Vec2::new(30.0, 40.0));
        view.rotate(1.0, Point::new(30.0, 40.0), RotationNotify::Suppress);
        assert_eq!(view.translation(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn theta_is_not_wrapped() {
        let mut view = ViewTransform::new(());
        for _ in 0..10 {
            view.rotate(PI, Point::ZERO, RotationNotify::Suppress);
        }
        assert!((view.theta() - 10.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn screen_to_world_inverts_under_rotation() {
        let mut view = ViewTransform::new(());
        view.zoom(2.5, Point::new(10.0, 20.0));
        view.rotate(0.7, Point::new(100.0, 50.0), RotationNotify::Suppress);
        view.pan(Vec2::new(3.0, 4.0));

        let world = Point::new(-12.0, 33.0);
        let screen = view.world_to_screen(world);
        assert_point_near(view.screen_to_world(screen), world);
        assert_point_near(view.screen_to_world(screen), view.matrix().inverse() * screen);
    }

    #[test]
    fn unrotated_mapping_matches_without_rotation() {
        let mut view = ViewTransform::new(());
        view.zoom(3.0, Point::new(7.0, 9.0));
        view.pan(Vec2::new(-4.0, 2.0));
        let pt = Point::new(120.0, -30.0);
        assert_point_near(view.screen_to_world_unrotated(pt), view.screen_to_world(pt));
    }

    #[test]
    fn scale_limits_reclamp_current_scale() {
        let mut view = ViewTransform::new(Vec::<Affine>::new());
        view.zoom(4.0, Point::new(50.0, 50.0));
        view.set_scale_limits(0.5, 2.0);
        assert_eq!(view.scale(), 2.0);
        assert!(view.state().is_consistent(1e-12));
        assert_eq!(view.sink().last(), Some(&view.matrix()));

        let pushes = view.sink().len();
        view.set_scale_limits(0.25, 8.0);
        assert_eq!(view.sink().len(), pushes, "in-range scale is left alone");
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut view = ViewTransform::with_observer((), Vec::<f64>::new());
        view.zoom(2.0, Point::new(1.0, 2.0));
        view.rotate(0.3, Point::new(4.0, 4.0), RotationNotify::Suppress);
        view.reset();
        assert_eq!(view.matrix(), Affine::IDENTITY);
        assert_eq!(view.observer().as_slice(), &[PI]);
    }

    #[test]
    fn visible_world_rect_unrotated() {
        let mut view = ViewTransform::new(());
        view.zoom(2.0, Point::ZERO);
        let visible = view.visible_world_rect(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!((visible.width() - 400.0).abs() < 1e-9);
        assert!((visible.height() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn debug_info_reflects_state() {
        let mut view = ViewTransform::new(());
        view.rotate(FRAC_PI_2, Point::ZERO, RotationNotify::Emit);
        let info = view.debug_info();
        assert_eq!(info.scale, 1.0);
        assert!((info.heading - FRAC_PI_2).abs() < 1e-12);
        assert!(info.linear_deviation < 1e-12);
        assert_eq!(info.config, ViewTransformConfig::default());
    }
}
