use crate::Error;
use ndarray::{Array2, Zip};

// returns 1.0 if greater than nominal, with a soft transition one pitch wide
// straddling the nominal transition.
fn soft_greater_than(x: f64, x_nominal: f64, pitch: f64) -> f64 {
    if x < x_nominal - 0.5 * pitch {
        0.0
    } else if x > x_nominal + 0.5 * pitch {
        1.0
    } else {
        (x - (x_nominal - 0.5 * pitch)) / pitch
    }
}

fn grid_step(size: usize) -> f64 {
    if size > 1 {
        2.0 / (size - 1) as f64
    } else {
        0.0
    }
}

/// Hard-edged circular aperture amplitude mask.
///
/// Samples a `size × size` grid spanning `[-1, 1]` on both axes, 1.0 strictly
/// inside radius 0.5 and 0.0 at and beyond the boundary. Swappable with any
/// other amplitude mask of the same shape.
pub fn generate_target(size: usize) -> Result<Array2<f64>, Error> {
    if size == 0 {
        return Err(Error::InvalidParameter(
            "pattern size must be positive".to_string(),
        ));
    }
    let step = grid_step(size);

    let mut pattern = Array2::zeros([size, size]);
    Zip::indexed(&mut pattern).par_for_each(|(y, x), e| {
        let y0 = y as f64 * step - 1.0;
        let x0 = x as f64 * step - 1.0;
        let r = (x0 * x0 + y0 * y0).sqrt();
        *e = if r < 0.5 { 1.0 } else { 0.0 };
    });

    Ok(pattern)
}

/// The same disk as [`generate_target`] with a linear edge transition one
/// grid step wide, for alias-free rendering.
pub fn generate_target_soft(size: usize) -> Result<Array2<f64>, Error> {
    if size == 0 {
        return Err(Error::InvalidParameter(
            "pattern size must be positive".to_string(),
        ));
    }
    let step = grid_step(size);

    let mut pattern = Array2::zeros([size, size]);
    Zip::indexed(&mut pattern).par_for_each(|(y, x), e| {
        let y0 = y as f64 * step - 1.0;
        let x0 = x as f64 * step - 1.0;
        let r = (x0 * x0 + y0 * y0).sqrt();
        *e = 1.0 - soft_greater_than(r, 0.5, step);
    });

    Ok(pattern)
}
