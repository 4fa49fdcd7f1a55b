use crate::error::LearningNodeError;
use crate::utils::math::l1_norm;
use rand::Rng;

/// Dense row-major matrix: one row per target, one column per feature plus
/// a trailing bias column.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl WeightMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LearningNodeError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for row in &rows {
            LearningNodeError::check_len("weight row", cols, row.len())?;
            values.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            values,
        })
    }

    /// Each entry drawn independently and uniformly from `[-1, 1]`, row by row.
    pub fn random_uniform<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let values = (0..rows * cols)
            .map(|_| rng.random_range(-1.0..=1.0))
            .collect();
        Self { rows, cols, values }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.values[i * self.cols..(i + 1) * self.cols]
    }

    pub fn mul_vec(&self, x: &[f64]) -> Result<Vec<f64>, LearningNodeError> {
        LearningNodeError::check_len("normalized sample", self.cols, x.len())?;
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(x).map(|(w, v)| w * v).sum())
            .collect())
    }

    /// `self += scale * u v^T`.
    pub fn add_scaled_outer(
        &mut self,
        scale: f64,
        u: &[f64],
        v: &[f64],
    ) -> Result<(), LearningNodeError> {
        LearningNodeError::check_len("normalized target", self.rows, u.len())?;
        LearningNodeError::check_len("normalized sample", self.cols, v.len())?;
        for (i, &ui) in u.iter().enumerate() {
            let factor = scale * ui;
            for (w, &vj) in self.row_mut(i).iter_mut().zip(v) {
                *w += factor * vj;
            }
        }
        Ok(())
    }

    /// Scales each row to unit L1 norm. Rows whose absolute sum is exactly
    /// zero are left as they are.
    pub fn normalize_rows(&mut self) {
        for i in 0..self.rows {
            let row = self.row_mut(i);
            let sum = l1_norm(row);
            if sum != 0.0 {
                for w in row.iter_mut() {
                    *w /= sum;
                }
            }
        }
    }

    pub fn estimate_size_bytes(&self) -> usize {
        size_of::<Self>() + self.values.len() * size_of::<f64>()
    }
}
