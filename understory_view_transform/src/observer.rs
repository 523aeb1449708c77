// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// Receives heading updates from a [`crate::ViewTransform`].
///
/// The heading is `π − theta`, where `theta` is the view's cumulative
/// clockwise rotation. Observers only listen: an indicator that lets the user
/// turn the view (for example [`crate::Compass::turn_to`]) hands the caller a
/// delta to apply with [`RotationNotify::Suppress`] instead of calling back
/// into the transform.
pub trait RotationObserver {
    /// Called after a rotation that was not suppressed.
    fn rotation_changed(&mut self, heading: f64);
}

/// Whether a rotation is reported to the [`RotationObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RotationNotify {
    /// Report the new heading.
    #[default]
    Emit,
    /// Do not report; the observer already knows about this rotation.
    Suppress,
}

impl RotationObserver for () {
    fn rotation_changed(&mut self, _heading: f64) {}
}

impl<O: RotationObserver> RotationObserver for Option<O> {
    fn rotation_changed(&mut self, heading: f64) {
        if let Some(observer) = self {
            observer.rotation_changed(heading);
        }
    }
}

/// Records every reported heading.
impl RotationObserver for Vec<f64> {
    fn rotation_changed(&mut self, heading: f64) {
        self.push(heading);
    }
}

impl<O: RotationObserver + ?Sized> RotationObserver for &mut O {
    fn rotation_changed(&mut self, heading: f64) {
        (**self).rotation_changed(heading);
    }
}
