//! Free-space scalar wave propagation with the angular spectrum method, and
//! a pipeline that uses it to compute phase-only holograms.

use crate::fft2::{fft2, ifft2};
use log::debug;
use ndarray::{Array2, Zip};
use num_complex::Complex;
use std::f64::consts::PI;
use thiserror::Error;

mod fft2;
pub mod hologram;
pub mod mask;

/// A complex scalar field sampled on a uniform grid.
///
/// The row axis is y and the column axis is x. Every field in a single
/// pipeline run shares its shape and sample pitch; there is no resampling.
pub type Field = Array2<Complex<f64>>;

/// Errors raised by parameter and input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A physical parameter was out of range, or an input contained
    /// non-finite samples. Raised before any transform is attempted.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Physical parameters of a single propagation, all in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Propagation {
    /// Wavelength of the illumination.
    pub wavelength: f64,
    /// Signed distance between the source and destination planes. Positive
    /// propagates forward, negative back-propagates, zero is the identity up
    /// to FFT round-trip error.
    pub distance: f64,
    /// Sample pitch of the field grid.
    pub pixel_size: f64,
}

impl Propagation {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.wavelength.is_finite() || self.wavelength <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "wavelength must be positive, got {}",
                self.wavelength
            )));
        }
        if !self.pixel_size.is_finite() || self.pixel_size <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "pixel_size must be positive, got {}",
                self.pixel_size
            )));
        }
        if !self.distance.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "distance must be finite, got {}",
                self.distance
            )));
        }
        Ok(())
    }

    /// The same parameters with the propagation direction reversed.
    pub fn reversed(&self) -> Propagation {
        Propagation {
            distance: -self.distance,
            ..*self
        }
    }
}

/// Sample frequencies of a DFT of length `len` at sample pitch `pitch`, in
/// FFT bin order: `{0, 1, …, ⌊len/2⌋, −⌈len/2⌉, …, −1} / (len · pitch)`.
///
/// The axis is not monotonic; it wraps to the negative frequencies at the
/// Nyquist bin, matching the bin layout of the transforms in [`propagate`].
pub fn fft_freq(len: usize, pitch: f64) -> Vec<f64> {
    let df = 1.0 / (len as f64 * pitch);
    (0..len)
        .map(|i| {
            if i < (len + 1) / 2 {
                i as f64 * df
            } else {
                (i as isize - len as isize) as f64 * df
            }
        })
        .collect()
}

/// Propagates `field` to a parallel plane `params.distance` metres away
/// using the angular spectrum method.
///
/// The spectrum of the field is multiplied by the free-space transfer
/// function `exp(i·distance·sqrt(k² − kx² − ky²))` and transformed back.
/// Spatial frequencies in the evanescent region (`kz² < 0`) are carried with
/// zero added phase instead of the physical exponential decay, so the
/// transfer function stays phase-only everywhere.
///
/// Near the Nyquist boundary `kz²` passes through zero and the square root
/// amplifies rounding error; very large `|distance|` combined with a very
/// small `pixel_size` loses phase precision there.
pub fn propagate(field: &Field, params: &Propagation) -> Result<Field, Error> {
    params.validate()?;
    let (rows, cols) = field.dim();
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidParameter(
            "field must be non-empty".to_string(),
        ));
    }
    if field.iter().any(|e| !e.re.is_finite() || !e.im.is_finite()) {
        return Err(Error::InvalidParameter(
            "field contains non-finite samples".to_string(),
        ));
    }
    debug!(
        "propagating {}x{} field over {} m",
        rows, cols, params.distance
    );

    let k = 2.0 * PI / params.wavelength;
    let fy = fft_freq(rows, params.pixel_size);
    let fx = fft_freq(cols, params.pixel_size);

    let mut spectrum = fft2(field.clone());
    Zip::indexed(&mut spectrum).par_for_each(|(y, x), e| {
        let ky = 2.0 * PI * fy[y];
        let kx = 2.0 * PI * fx[x];
        let kz2 = k * k - kx * kx - ky * ky;
        // evanescent bins get zero added phase, not decay
        *e = *e * Complex::new(0.0, params.distance * kz2.max(0.0).sqrt()).exp();
    });
    Ok(ifft2(spectrum))
}

/// Per-sample magnitude `|e|` of a field.
pub fn amplitude(field: &Field) -> Array2<f64> {
    field.map(|e| e.norm())
}

/// Per-sample principal argument of a field, in `(−π, π]`.
pub fn phase(field: &Field) -> Array2<f64> {
    field.map(|e| e.arg())
}

/// Area weighted sum of the squared norm of the field.
///
/// This is the radiant flux; propagation over a band-limited,
/// non-evanescent spectrum conserves it.
pub fn intensity_integral(field: &Field, pixel_size: f64) -> f64 {
    field.iter().fold(0.0, |sum, v| sum + v.norm_sqr()) * (pixel_size * pixel_size)
}
