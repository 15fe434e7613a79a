// Correlation coefficients between coherence scores and human ratings.

use crate::error::{CoherenceError, Result};

fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(CoherenceError::LengthMismatch {
            expected: x.len(),
            actual: y.len(),
        });
    }
    Ok(())
}

/// Kendall's τ-b rank correlation.
///
/// Pairs are ordered by x; a later pair tied in x counts toward the x-bound
/// only when its y differs. Returns 0 when either bound term is 0.
pub fn kendall_tau(x: &[f64], y: &[f64]) -> Result<f64> {
    check_lengths(x, y)?;

    let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    // Stable sort keeps equal-x pairs in input order; NaN sorts last.
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (mut concordant, mut discordant) = (0u64, 0u64);
    let (mut tied_x, mut tied_y) = (0u64, 0u64);
    for (i, &(xi, yi)) in pairs.iter().enumerate() {
        for &(xj, yj) in &pairs[i + 1..] {
            if xj > xi {
                if yj > yi {
                    concordant += 1;
                } else if yj < yi {
                    discordant += 1;
                } else {
                    tied_y += 1;
                }
            } else if yj != yi {
                tied_x += 1;
            }
        }
    }

    let ordered = (concordant + discordant) as f64;
    let bound_x = ordered + tied_x as f64;
    let bound_y = ordered + tied_y as f64;
    if bound_x == 0.0 || bound_y == 0.0 {
        return Ok(0.0);
    }
    Ok((concordant as f64 - discordant as f64) / (bound_x * bound_y).sqrt())
}

/// Pearson's product-moment correlation; 0 when either variance is 0.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    check_lengths(x, y)?;
    if x.is_empty() {
        return Ok(0.0);
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(0.0);
    }
    Ok(covariance / (var_x * var_y).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kendall_perfect_agreement_and_reversal() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!((kendall_tau(&x, &[10.0, 20.0, 30.0, 40.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((kendall_tau(&x, &[4.0, 3.0, 2.0, 1.0]).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_kendall_with_ties() {
        // sorted by x: (1,1) (2,3) (2,2) (3,3)
        // concordant: 4, discordant: 0, tied in y only: 1, tied in x only: 1
        let x = [1.0, 2.0, 2.0, 3.0];
        let y = [1.0, 3.0, 2.0, 3.0];
        let tau = kendall_tau(&x, &y).unwrap();
        let expected = 4.0 / (5.0f64 * 5.0).sqrt();
        assert!((tau - expected).abs() < 1e-12, "tau was {tau}");
    }

    #[test]
    fn test_kendall_constant_input_is_zero() {
        assert_eq!(kendall_tau(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
        assert_eq!(kendall_tau(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_kendall_nan_sorts_last_without_panicking() {
        // sorted by x: (1,1) (2,2) (3,3) (NaN,5); NaN compares as a tie in x
        let tau = kendall_tau(&[2.0, f64::NAN, 1.0, 3.0], &[2.0, 5.0, 1.0, 3.0]).unwrap();
        assert!((tau - 3.0 / 18f64.sqrt()).abs() < 1e-12, "tau was {tau}");
        let nan_heavy: Vec<f64> = (0..50)
            .map(|i| if i % 3 == 0 { f64::NAN } else { f64::from(i) })
            .collect();
        let ratings: Vec<f64> = (0..50).map(|i| f64::from(50 - i)).collect();
        assert!(kendall_tau(&nan_heavy, &ratings).is_ok());
    }

    #[test]
    fn test_pearson() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
        let r = pearson(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0]).unwrap();
        assert!((r - 0.5).abs() < 1e-12);
        assert_eq!(pearson(&[1.0, 1.0], &[0.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(kendall_tau(&[1.0], &[1.0, 2.0]).is_err());
        assert!(pearson(&[1.0, 2.0], &[1.0]).is_err());
    }
}
