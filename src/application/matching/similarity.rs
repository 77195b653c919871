//! Cosine similarity over embedding rows.

use crate::error::{EmbeddingError, Result};

/// Dense row-major `rows × cols` matrix of cosine similarities.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute all pairwise similarities between `left` and `right` rows.
    ///
    /// Rows are L2-normalized first, so a zero row scores 0 against
    /// everything instead of producing NaN.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::DimensionMismatch`] if the rows do not all
    /// share one dimension.
    pub fn cosine(left: &[Vec<f32>], right: &[Vec<f32>]) -> Result<Self> {
        let dimension = left.first().or_else(|| right.first()).map_or(0, Vec::len);
        check_dimension(left, dimension)?;
        check_dimension(right, dimension)?;

        let left: Vec<Vec<f32>> = left.iter().map(|row| normalize(row)).collect();
        let right: Vec<Vec<f32>> = right.iter().map(|row| normalize(row)).collect();

        let mut values = Vec::with_capacity(left.len() * right.len());
        for a in &left {
            for b in &right {
                values.push(dot(a, b));
            }
        }

        Ok(Self {
            rows: left.len(),
            cols: right.len(),
            values,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Similarity of left row `i` and right row `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.values[i * self.cols + j]
    }
}

fn check_dimension(rows: &[Vec<f32>], expected: usize) -> Result<()> {
    match rows.iter().find(|row| row.len() != expected) {
        Some(row) => Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: row.len(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Scale a vector to unit length. Zero vectors are returned unchanged.
#[must_use]
pub fn normalize(row: &[f32]) -> Vec<f32> {
    let norm = dot(row, row).sqrt();
    if norm <= f32::EPSILON {
        return row.to_vec();
    }
    row.iter().map(|x| x / norm).collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
