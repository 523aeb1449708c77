// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory View Transform: pivot-anchored pan, zoom, and rotation.
//!
//! This crate provides a small, headless model of a canvas view transform:
//! a 2×3 affine matrix restricted to rotation, uniform scale, and
//! translation. Zoom and rotation gestures take a *pivot* in screen space,
//! and the point under the pivot stays on the same pixel across the call,
//! so a wheel zoom or a two-finger twist happens "under the cursor".
//!
//! It focuses on:
//! - Keeping the matrix, the scale, and the rotation angle consistent.
//! - Clamping the scale to configurable limits without losing the pivot.
//! - Mapping between screen and world coordinates.
//! - Pushing the matrix to a [`PresentationSink`] (for example a 2D canvas
//!   context) after every change, and reporting rotations to a
//!   [`RotationObserver`] such as a [`Compass`].
//!
//! It does **not** decode input events. Callers translate pointer, wheel,
//! and gesture events into [`ViewTransform::pan`], [`ViewTransform::zoom`],
//! and [`ViewTransform::rotate`] calls.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Affine, Point, Vec2};
//! use understory_view_transform::{RotationNotify, ViewTransform};
//!
//! // `Affine` as a sink just keeps the latest matrix.
//! let mut view = ViewTransform::new(Affine::IDENTITY);
//!
//! // Zoom 2x under the cursor, then drag the canvas.
//! view.zoom(2.0, Point::new(100.0, 100.0));
//! assert_eq!(view.matrix().as_coeffs(), [2.0, 0.0, 0.0, 2.0, -100.0, -100.0]);
//! view.pan(Vec2::new(10.0, -5.0));
//! assert_eq!(view.translation(), Vec2::new(-90.0, -105.0));
//!
//! // Rotate a quarter turn clockwise about the window center.
//! let center = Point::new(400.0, 300.0);
//! let under_center = view.screen_to_world(center);
//! view.rotate(core::f64::consts::FRAC_PI_2, center, RotationNotify::Emit);
//! assert!((view.world_to_screen(under_center) - center).hypot() < 1e-9);
//!
//! // The sink always holds the current matrix.
//! assert_eq!(*view.sink(), view.matrix());
//! ```
//!
//! ## Wheel input
//!
//! Pinch recognizers usually report a relative scale, while wheels report a
//! raw delta. Choose the convention with [`ZoomInput`]:
//!
//! ```rust
//! use kurbo::Point;
//! use understory_view_transform::{ViewTransform, ViewTransformConfig, ZoomInput};
//!
//! let config = ViewTransformConfig::new()
//!     .with_scale_limits(0.25, 8.0)
//!     .with_zoom_input(ZoomInput::wheel());
//! let mut view = ViewTransform::new(()).with_config(config);
//!
//! // Scrolling down (positive delta) zooms out.
//! view.zoom(120.0, Point::new(50.0, 50.0));
//! assert!(view.scale() < 1.0);
//! ```
//!
//! ## Design notes
//!
//! - The rotation angle accumulates without wrapping.
//! - Observers only listen. A [`Compass`] that lets the user turn the view
//!   returns a delta for the caller to apply with
//!   [`RotationNotify::Suppress`]; it never calls back into the transform.
//! - [`ViewTransform::screen_to_world`] is the exact inverse. The older
//!   rotation-blind mapping is available as
//!   [`ViewTransform::screen_to_world_unrotated`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod compass;
mod config;
mod observer;
mod sink;
mod state;
mod transform;

pub use compass::Compass;
pub use config::{
    DEFAULT_DELTA_SENSITIVITY, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, ViewTransformConfig,
    ZoomInput,
};
pub use observer::{RotationNotify, RotationObserver};
pub use sink::PresentationSink;
pub use state::AffineState;
pub use transform::{ViewTransform, ViewTransformDebugInfo};
