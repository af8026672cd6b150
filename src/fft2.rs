use ndarray::parallel::prelude::{IntoParallelIterator, ParallelIterator};
use ndarray::{Array2, ArrayViewMut2, Zip};
use rustfft::num_complex::Complex;
use rustfft::num_traits::Zero;
use rustfft::{FftDirection, FftPlanner};

/// Unnormalised forward 2D FFT.
pub fn fft2(mut input: Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    transform_2d(input.view_mut(), FftDirection::Forward);
    input
}

/// Inverse 2D FFT, normalised by `1 / (rows · cols)` so that
/// `ifft2(fft2(x))` returns `x` within floating point error.
pub fn ifft2(mut input: Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    transform_2d(input.view_mut(), FftDirection::Inverse);
    input
}

fn transform_2d(mut input: ArrayViewMut2<Complex<f64>>, direction: FftDirection) {
    let (rows, cols) = input.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft(cols, direction);
    let fft_col = planner.plan_fft(rows, direction);
    let scale = match direction {
        FftDirection::Forward => 1.0,
        FftDirection::Inverse => 1.0 / (rows * cols) as f64,
    };

    Zip::from(input.rows_mut()).into_par_iter().for_each_init(
        || vec![Complex::zero(); fft_row.get_inplace_scratch_len()],
        |scratch, mut row| {
            fft_row.process_with_scratch(row.0.as_slice_mut().unwrap(), scratch);
        },
    );

    // column slices are strided, so each column is staged through a
    // contiguous buffer for the transform
    Zip::from(input.columns_mut())
        .into_par_iter()
        .for_each_init(
            || {
                (
                    vec![Complex::zero(); rows],
                    vec![Complex::zero(); fft_col.get_inplace_scratch_len()],
                )
            },
            |(buffer, scratch), mut col| {
                for (b, c) in buffer.iter_mut().zip(col.0.iter()) {
                    *b = *c;
                }
                fft_col.process_with_scratch(buffer, scratch);
                for (c, b) in col.0.iter_mut().zip(buffer.iter()) {
                    *c = *b * scale;
                }
            },
        );
}
