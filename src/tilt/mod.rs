//! Tilt-noise removal for collocated rotation and acceleration recordings.
//!
//! Horizontal accelerometers also record a fraction `g·sin(θ)` of gravity
//! when tilted by `θ`. Given an independent tilt record, [`remove_tilt`]
//! subtracts this contribution either with the theoretical coupling or with
//! an empirically estimated [`transfer_function`].
//!
//! # Example
//!
//! ```
//! use rotseis::tilt::{remove_tilt, transfer_function};
//! use rotseis::TiltCorrectionConfig;
//!
//! let dt = 0.05;
//! let tilt: Vec<f64> = (0..512).map(|i| 1e-6 * (0.02 * f64::from(i)).sin()).collect();
//! let acc: Vec<f64> = tilt.iter().map(|t| 9.81 * t).collect();
//!
//! let tf = transfer_function(&acc, &tilt, dt, 1.0)?;
//! let config = TiltCorrectionConfig::coherence_gated(0.9);
//! let corrected = remove_tilt(&acc, &tilt, dt, &config, Some(&tf.transfer_coherence()))?;
//! assert_eq!(corrected.len(), acc.len());
//! # Ok::<(), rotseis::SeisError>(())
//! ```

use num_complex::Complex64;

pub mod correction;
pub mod transfer;

pub use correction::remove_tilt;
pub use transfer::{transfer_function, TransferCoherence, TransferFunction};

/// Complex number from radius and angle (rad).
#[must_use]
pub fn polar_to_complex(radius: f64, angle: f64) -> Complex64 {
    Complex64::from_polar(radius, angle)
}

/// Radius and angle (rad) of a complex number.
#[must_use]
pub fn complex_to_polar(z: Complex64) -> (f64, f64) {
    z.to_polar()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_polar_conversion() {
        let z = polar_to_complex(2.0, FRAC_PI_2);
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-15);
        assert_relative_eq!(z.im, 2.0, epsilon = 1e-15);

        let (r, phi) = complex_to_polar(Complex64::new(-1.0, 0.0));
        assert_relative_eq!(r, 1.0);
        assert_relative_eq!(phi, std::f64::consts::PI);
    }
}
