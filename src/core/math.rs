//! Small numeric helpers shared by the strategies.

use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Gamma function (Lanczos approximation, g = 7, n = 9).
///
/// Accurate to about 15 significant digits for positive arguments.
pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection: Γ(x) Γ(1 - x) = π / sin(πx)
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut acc = LANCZOS_COEFFS[0];
        for (i, &c) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
            acc += c / (x + i as f64);
        }
        let t = x + LANCZOS_G + 0.5;
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
    }
}

/// Sign with `sign(0) = 0`, unlike `f64::signum`.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Coordinate-wise mean of a set of positions.
///
/// Returns an empty vector for an empty input.
pub fn mean_position<'a, I>(positions: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut sum: Vec<f64> = Vec::new();
    let mut count = 0usize;
    for pos in positions {
        if sum.is_empty() {
            sum = vec![0.0; pos.len()];
        }
        for (s, &x) in sum.iter_mut().zip(pos) {
            *s += x;
        }
        count += 1;
    }
    if count > 0 {
        let n = count as f64;
        sum.iter_mut().for_each(|s| *s /= n);
    }
    sum
}
