use nucreact_data::CurveRecord;

use crate::error::{NucReactError, Result};

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Result<Vec<f64>> {
    if !start.is_finite() || !stop.is_finite() {
        return Err(NucReactError::InvalidGrid(format!(
            "non-finite bounds {start}..{stop}"
        )));
    }
    match n {
        0 => Err(NucReactError::InvalidGrid("zero points".to_string())),
        1 => Ok(vec![start]),
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            Ok((0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect())
        }
    }
}

/// A derived quantity paired point-for-point with the incident lab energy.
///
/// Filtering drops whole pairs, so every value stays attached to the beam
/// energy it was computed from, however many stages it went through.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    lab_energy: Vec<f64>,
    values: Vec<f64>,
}

impl Curve {
    pub fn new(lab_energy: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if lab_energy.len() != values.len() {
            return Err(NucReactError::CurveLengthMismatch {
                lab_energy: lab_energy.len(),
                values: values.len(),
            });
        }
        Ok(Curve { lab_energy, values })
    }

    /// Evaluates `f` at every grid point.
    pub fn from_grid(grid: &[f64], f: impl Fn(f64) -> f64) -> Self {
        Curve {
            lab_energy: grid.to_vec(),
            values: grid.iter().map(|&e| f(e)).collect(),
        }
    }

    /// The grid itself, as the identity curve.
    pub fn identity(grid: &[f64]) -> Self {
        Self::from_grid(grid, |e| e)
    }

    /// Maps each value, keeping only the points where `f` returns `Some`.
    pub fn filter_map(&self, f: impl Fn(f64) -> Option<f64>) -> Self {
        let (lab_energy, values) = self
            .points()
            .filter_map(|(lab, value)| f(value).map(|v| (lab, v)))
            .unzip();
        Curve { lab_energy, values }
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lab_energy
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    pub fn lab_energy(&self) -> &[f64] {
        &self.lab_energy
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_record(&self, label: &str) -> CurveRecord {
        CurveRecord {
            label: label.to_string(),
            lab_energy: self.lab_energy.clone(),
            values: self.values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let grid = linspace(4000.0, 9000.0, 1000).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 4000.0);
        assert_eq!(grid[999], 9000.0);
        assert!((grid[1] - grid[0] - 5000.0 / 999.0).abs() < 1e-9);
    }

    #[test]
    fn test_linspace_rejects_empty() {
        assert!(matches!(
            linspace(0.0, 1.0, 0),
            Err(NucReactError::InvalidGrid(_))
        ));
        assert_eq!(linspace(3.0, 5.0, 1).unwrap(), vec![3.0]);
    }

    #[test]
    fn test_filter_map_keeps_pairing() {
        let curve = Curve::from_grid(&[1.0, 2.0, 3.0, 4.0], |e| e * 10.0);
        let odd = curve.filter_map(|v| if v != 20.0 { Some(v + 1.0) } else { None });
        assert_eq!(odd.lab_energy(), &[1.0, 3.0, 4.0]);
        assert_eq!(odd.values(), &[11.0, 31.0, 41.0]);
    }

    #[test]
    fn test_new_length_mismatch() {
        assert!(matches!(
            Curve::new(vec![1.0, 2.0], vec![1.0]),
            Err(NucReactError::CurveLengthMismatch {
                lab_energy: 2,
                values: 1
            })
        ));
    }
}
