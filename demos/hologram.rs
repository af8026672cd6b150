use image::{Rgb, RgbImage};
use ndarray::ArrayView2;
use palette::{LinSrgb, Srgb};
use phase_hologram::hologram::{compute_hologram, HologramConfig};
use phase_hologram::mask::generate_target;
use phase_hologram::{amplitude, phase};
use std::f64::consts::PI;

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = HologramConfig::default();
    let target = generate_target(config.size)?;
    let (hologram, reconstruction) = compute_hologram(&target, &config.propagation())?;

    save_grayscale_real_image("target.png", target.view(), false)?;

    // map the principal argument from (-pi, pi] onto [0, 1]
    let hologram_phase = phase(&hologram).map(|p| (p + PI) / (2.0 * PI));
    save_grayscale_real_image("hologram_phase.png", hologram_phase.view(), false)?;

    save_grayscale_real_image("reconstruction.png", amplitude(&reconstruction).view(), true)?;

    Ok(())
}

pub fn save_grayscale_real_image<T: AsRef<std::path::Path> + std::fmt::Debug>(
    file_name: T,
    arr: ArrayView2<f64>,
    normalise: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let &[h, w, ..] = arr.shape() {
        let mut max: f64 = arr.iter().fold(0.0, |max, val| val.max(max));
        let sum = arr.iter().fold(0.0, |sum, val| val + sum);
        println!("h:{} w:{} max:{} sum:{} - {:?}", h, w, max, sum, file_name);

        if !normalise || max == 0.0 {
            max = 1.0;
        }

        let mut img = RgbImage::new(w as u32, h as u32);
        for (x, y, p) in img.enumerate_pixels_mut() {
            let value = (arr[[y as usize, x as usize]] / max).max(0.0).min(1.0);

            let colour = Srgb::from_linear(LinSrgb::new(value, value, value));
            *p = Rgb([
                (colour.red * 255.0) as u8,
                (colour.green * 255.0) as u8,
                (colour.blue * 255.0) as u8,
            ]);
        }

        img.save(file_name)?;
    }
    Ok(())
}
