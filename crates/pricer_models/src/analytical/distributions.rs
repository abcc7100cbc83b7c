//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//! - `ln_norm_cdf`: Logarithm of the CDF, finite far into the lower tail

use statrs::function::erf::erfc;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// ln(2π) / 2
const HALF_LN_2PI: f64 = 0.918_938_533_204_672_8;

/// Below this, Φ(x) is close to the subnormal range and `ln_norm_cdf`
/// switches to the asymptotic expansion.
const LOWER_TAIL_CUTOFF: f64 = -37.0;

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) using the complementary error function.
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// # Accuracy
/// Going through `erfc` keeps full relative precision in the lower tail,
/// where `1 - Φ(-x)` would cancel to zero.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// // φ(0) = 1 / sqrt(2π) ≈ 0.3989
/// assert!((norm_pdf(0.0) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Natural logarithm of the standard normal CDF.
///
/// Equal to `norm_cdf(x).ln()` where Φ(x) is representable. Below
/// x = -37 it uses the Mills-ratio expansion
///
/// ln Φ(x) ≈ -x²/2 - ln(-x) - ln(2π)/2 + ln(1 - 1/x² + 3/x⁴ - 15/x⁶ + 105/x⁸)
///
/// so it stays finite where Φ(x) itself underflows to zero.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::ln_norm_cdf;
///
/// assert!((ln_norm_cdf(0.0) - 0.5f64.ln()).abs() < 1e-15);
/// assert!(ln_norm_cdf(-100.0).is_finite());
/// ```
pub fn ln_norm_cdf(x: f64) -> f64 {
    if x >= LOWER_TAIL_CUTOFF {
        return norm_cdf(x).ln();
    }
    let z = x * x;
    let series = -1.0 / z + 3.0 / (z * z) - 15.0 / (z * z * z) + 105.0 / (z * z * z * z);
    -0.5 * z - (-x).ln() - HALF_LN_2PI + series.ln_1p()
}
