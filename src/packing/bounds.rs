//! Area lower bound derivation.

/// Lower bound on the bounding-rectangle area: `sum(pi * r^2)`.
///
/// Non-overlapping disks occupy at least their total disk area, so any
/// rectangle containing them is at least this large. Used as the lower
/// bound of the area variable and as a solution-quality reference.
pub fn area_lower_bound(radii: &[f64], pi: f64) -> f64 {
    radii.iter().map(|r| pi * r * r).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::instance::{DEFAULT_PI, DEFAULT_RADII};

    #[test]
    fn test_reference_bound() {
        // sum of squared radii: 2*169 + 5*64 + 7*16 = 770
        let lb = area_lower_bound(&DEFAULT_RADII, DEFAULT_PI);
        assert!((lb - 770.0 * 3.1459).abs() < 1e-9);
        assert!((lb - 2422.3).abs() < 0.1);
    }

    #[test]
    fn test_empty() {
        assert_eq!(area_lower_bound(&[], DEFAULT_PI), 0.0);
    }

    #[test]
    fn test_single_unit_circle_exact_pi() {
        let lb = area_lower_bound(&[1.0], std::f64::consts::PI);
        assert!((lb - std::f64::consts::PI).abs() < 1e-12);
    }
}
