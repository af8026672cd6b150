//! The target → hologram → reconstruction pipeline.

use crate::{propagate, Error, Field, Propagation};
use log::info;
use ndarray::Array2;
use num_complex::Complex;

/// Parameters of a full hologram computation.
///
/// Carried explicitly rather than as module constants so the propagator and
/// pipeline can be driven with arbitrary parameter sets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HologramConfig {
    /// Pattern resolution, samples per axis.
    pub size: usize,
    /// Wavelength of the illumination in metres.
    pub wavelength: f64,
    /// Sample pitch of the modulator in metres.
    pub pixel_size: f64,
    /// Separation between the modulator and target planes in metres.
    pub distance: f64,
}

impl Default for HologramConfig {
    fn default() -> Self {
        HologramConfig {
            size: 512,
            wavelength: 633e-9,
            pixel_size: 8e-6,
            distance: 0.2,
        }
    }
}

impl HologramConfig {
    pub fn propagation(&self) -> Propagation {
        Propagation {
            wavelength: self.wavelength,
            distance: self.distance,
            pixel_size: self.pixel_size,
        }
    }
}

/// Computes a phase-only hologram for `target_amplitude` together with the
/// field it reconstructs at the target plane.
///
/// The target amplitude is lifted to a zero-phase complex field and back
/// propagated to the modulator plane. Only the principal argument of that
/// field is kept; re-exponentiating it yields a unit-amplitude hologram
/// suitable for a phase modulator. Discarding the amplitude profile is
/// lossy, so the forward-propagated reconstruction approximates rather than
/// reproduces the target.
///
/// Returns `(hologram, reconstruction)`. Errors from either propagation
/// pass through unchanged.
pub fn compute_hologram(
    target_amplitude: &Array2<f64>,
    params: &Propagation,
) -> Result<(Field, Field), Error> {
    info!(
        "computing hologram for {}x{} target at {} m",
        target_amplitude.shape()[0],
        target_amplitude.shape()[1],
        params.distance
    );

    let target_field = target_amplitude.map(|&a| Complex::new(a, 0.0));
    let at_modulator = propagate(&target_field, &params.reversed())?;
    let hologram = at_modulator.map(|e| Complex::new(0.0, e.arg()).exp());
    let reconstruction = propagate(&hologram, params)?;

    Ok((hologram, reconstruction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amplitude;
    use crate::mask::generate_target;

    fn params() -> Propagation {
        Propagation {
            wavelength: 633e-9,
            distance: 0.05,
            pixel_size: 8e-6,
        }
    }

    #[test]
    fn hologram_has_unit_amplitude_everywhere() {
        let target = generate_target(32).unwrap();
        let (hologram, _) = compute_hologram(&target, &params()).unwrap();
        for e in hologram.iter() {
            assert!((e.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn reconstruction_amplitude_is_finite_and_non_negative() {
        let target = generate_target(32).unwrap();
        let (_, reconstruction) = compute_hologram(&target, &params()).unwrap();
        for v in amplitude(&reconstruction).iter() {
            assert!(v.is_finite());
            assert!(*v >= 0.0);
        }
    }

    #[test]
    fn output_shapes_match_the_target() {
        let target = generate_target(16).unwrap();
        let (hologram, reconstruction) = compute_hologram(&target, &params()).unwrap();
        assert_eq!(hologram.dim(), (16, 16));
        assert_eq!(reconstruction.dim(), (16, 16));
    }

    #[test]
    fn invalid_pixel_size_fails_without_propagating() {
        let target = generate_target(8).unwrap();
        let bad = Propagation {
            pixel_size: 0.0,
            ..params()
        };
        assert!(matches!(
            compute_hologram(&target, &bad),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn default_config_values() {
        let config = HologramConfig::default();
        assert_eq!(config.size, 512);
        assert_eq!(
            config.propagation(),
            Propagation {
                wavelength: 633e-9,
                distance: 0.2,
                pixel_size: 8e-6,
            }
        );
    }
}
