// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Affine;

/// A presentation surface that receives the view matrix.
///
/// [`crate::ViewTransform`] calls [`PresentationSink::set_transform`] after
/// every mutation with the complete matrix. A canvas backend typically
/// forwards the coefficients to its `setTransform(a, b, c, d, e, f)` call
/// (see [`Affine::as_coeffs`]).
pub trait PresentationSink {
    /// Replaces the surface transform with `transform`.
    fn set_transform(&mut self, transform: Affine);
}

/// Discards every transform.
impl PresentationSink for () {
    fn set_transform(&mut self, _transform: Affine) {}
}

/// Keeps the most recent transform.
impl PresentationSink for Affine {
    fn set_transform(&mut self, transform: Affine) {
        *self = transform;
    }
}

/// Records every transform in push order.
impl PresentationSink for Vec<Affine> {
    fn set_transform(&mut self, transform: Affine) {
        self.push(transform);
    }
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn set_transform(&mut self, transform: Affine) {
        (**self).set_transform(transform);
    }
}
