// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Smallest uniform scale allowed by [`ViewTransformConfig::default`].
pub const DEFAULT_MIN_SCALE: f64 = 0.125;

/// Largest uniform scale allowed by [`ViewTransformConfig::default`].
pub const DEFAULT_MAX_SCALE: f64 = 4.0;

/// Scale change per unit of raw device delta for [`ZoomInput::Delta`].
///
/// The sign is negative so that a raw wheel `delta_y` (positive when
/// scrolling down) zooms out.
pub const DEFAULT_DELTA_SENSITIVITY: f64 = -0.001;

/// How the `amount` passed to [`crate::ViewTransform::zoom`] is interpreted.
///
/// Different gesture sources report zoom differently: pinch recognizers
/// usually produce a relative scale, while mouse wheels produce a raw delta.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ZoomInput {
    /// `amount` multiplies the current scale (`2.0` doubles it).
    #[default]
    Factor,
    /// `amount` is a raw device delta.
    ///
    /// The candidate scale is `scale + amount * sensitivity`; it is then
    /// applied as the multiplicative factor `candidate / scale`.
    Delta {
        /// Scale change per unit of delta.
        sensitivity: f64,
    },
}

impl ZoomInput {
    /// Delta convention using [`DEFAULT_DELTA_SENSITIVITY`].
    #[must_use]
    pub const fn wheel() -> Self {
        Self::Delta {
            sensitivity: DEFAULT_DELTA_SENSITIVITY,
        }
    }

    /// Converts an input `amount` into a multiplicative factor relative to
    /// `current_scale`.
    #[must_use]
    pub fn to_factor(self, amount: f64, current_scale: f64) -> f64 {
        match self {
            Self::Factor => amount,
            Self::Delta { sensitivity } => (current_scale + amount * sensitivity) / current_scale,
        }
    }
}

/// Run-time configuration of a [`crate::ViewTransform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransformConfig {
    min_scale: f64,
    max_scale: f64,
    zoom_input: ZoomInput,
}

impl Default for ViewTransformConfig {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom_input: ZoomInput::Factor,
        }
    }
}

impl ViewTransformConfig {
    /// Returns the default configuration: scale in `[0.125, 4]`, factor input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this configuration with the given scale limits.
    ///
    /// See [`ViewTransformConfig::set_scale_limits`] for normalization.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.set_scale_limits(min_scale, max_scale);
        self
    }

    /// Returns this configuration with the given zoom input convention.
    #[must_use]
    pub fn with_zoom_input(mut self, zoom_input: ZoomInput) -> Self {
        self.zoom_input = zoom_input;
        self
    }

    /// Sets the minimum and maximum scale.
    ///
    /// The range is normalized so that `min_scale <= max_scale`, and both ends
    /// are kept strictly positive. Non-finite values fall back to the
    /// defaults for that end.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let min_scale = positive_or(min_scale, DEFAULT_MIN_SCALE);
        let max_scale = positive_or(max_scale, DEFAULT_MAX_SCALE);
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
    }

    /// Sets the zoom input convention.
    pub fn set_zoom_input(&mut self, zoom_input: ZoomInput) {
        self.zoom_input = zoom_input;
    }

    /// Returns the minimum scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Returns the maximum scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Returns the zoom input convention.
    #[must_use]
    pub fn zoom_input(&self) -> ZoomInput {
        self.zoom_input
    }

    /// Clamps `scale` into the configured range.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Sensitivity used by explicit delta zooms.
    ///
    /// This is the configured sensitivity under [`ZoomInput::Delta`] and
    /// [`DEFAULT_DELTA_SENSITIVITY`] otherwise.
    #[must_use]
    pub fn delta_sensitivity(&self) -> f64 {
        match self.zoom_input {
            ZoomInput::Delta { sensitivity } => sensitivity,
            ZoomInput::Factor => DEFAULT_DELTA_SENSITIVITY,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.max(f64::MIN_POSITIVE)
    } else {
        fallback
    }
}
