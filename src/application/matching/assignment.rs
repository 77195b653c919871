//! Pair assignment policies over one keyword's similarity matrix.
//!
//! [`AssignmentPolicy::Greedy`] is a row-major scan that consumes both ids
//! of every pair it visits, whether or not the pair clears the threshold.
//! A sub-threshold visit can therefore use up an id that a later keyword
//! would have matched well.
//!
//! [`AssignmentPolicy::Optimal`] states the maximum-weight bipartite matching
//! as a binary program, solves it with HiGHS through `good_lp`, and only
//! consumes ids of accepted pairs.

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel, Variable};
use serde::{Deserialize, Serialize};

use super::ledger::AssignmentLedger;
use super::similarity::SimilarityMatrix;
use crate::domain::MarketId;
use crate::error::{Error, Result};

/// How pairs are selected inside one keyword's candidate block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentPolicy {
    /// First-come scan in table order; consumes ids on every visited pair.
    #[default]
    Greedy,
    /// Maximum total similarity; consumes ids only on accepted pairs.
    Optimal,
}

/// An accepted pair as indices into the keyword's row and column tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    pub row: usize,
    pub col: usize,
    pub score: f32,
}

impl AssignmentPolicy {
    /// Select pairs scoring strictly above `threshold` and record consumed
    /// ids in `ledger`.
    ///
    /// `rows` and `cols` are the Polymarket and Kalshi ids matching the
    /// matrix axes. Accepted pairs are returned ordered by row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Solver`] if the optimal policy's solver fails. The
    /// ledger is left untouched in that case.
    pub fn assign(
        self,
        matrix: &SimilarityMatrix,
        rows: &[&MarketId],
        cols: &[&MarketId],
        threshold: f32,
        ledger: &mut AssignmentLedger,
    ) -> Result<Vec<Assignment>> {
        match self {
            Self::Greedy => Ok(greedy(matrix, rows, cols, threshold, ledger)),
            Self::Optimal => optimal(matrix, rows, cols, threshold, ledger),
        }
    }
}

fn greedy(
    matrix: &SimilarityMatrix,
    rows: &[&MarketId],
    cols: &[&MarketId],
    threshold: f32,
    ledger: &mut AssignmentLedger,
) -> Vec<Assignment> {
    let mut accepted = Vec::new();
    for (row, poly_id) in rows.iter().enumerate() {
        for (col, kalshi_id) in cols.iter().enumerate() {
            if ledger.is_blocked(poly_id, kalshi_id) {
                continue;
            }
            ledger.consume(poly_id, kalshi_id);

            let score = matrix.get(row, col);
            if score > threshold {
                accepted.push(Assignment { row, col, score });
            }
        }
    }
    accepted
}

fn optimal(
    matrix: &SimilarityMatrix,
    rows: &[&MarketId],
    cols: &[&MarketId],
    threshold: f32,
    ledger: &mut AssignmentLedger,
) -> Result<Vec<Assignment>> {
    let live_rows: Vec<usize> = (0..rows.len())
        .filter(|&i| !ledger.is_polymarket_used(rows[i]))
        .collect();
    let live_cols: Vec<usize> = (0..cols.len())
        .filter(|&j| !ledger.is_kalshi_used(cols[j]))
        .collect();
    if live_rows.is_empty() || live_cols.is_empty() {
        return Ok(Vec::new());
    }

    let weights: Vec<Vec<f64>> = live_rows
        .iter()
        .map(|&i| {
            live_cols
                .iter()
                .map(|&j| {
                    let score = matrix.get(i, j);
                    if score > threshold {
                        f64::from(score)
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();

    let mut accepted: Vec<Assignment> = max_weight_assignment(&weights)?
        .into_iter()
        .map(|(r, c)| (live_rows[r], live_cols[c]))
        .filter_map(|(row, col)| {
            let score = matrix.get(row, col);
            (score > threshold).then_some(Assignment { row, col, score })
        })
        .collect();
    accepted.sort_by_key(|a| a.row);

    for assignment in &accepted {
        ledger.consume(rows[assignment.row], cols[assignment.col]);
    }
    Ok(accepted)
}

/// Maximum-weight matching over a rectangular weight matrix.
///
/// One binary variable per cell, at most one selected cell per row and per
/// column, maximizing the selected weight. Only cells with positive weight
/// are returned, ordered by row.
fn max_weight_assignment(weights: &[Vec<f64>]) -> Result<Vec<(usize, usize)>> {
    let rows = weights.len();
    let cols = weights.first().map_or(0, Vec::len);
    if rows == 0 || cols == 0 {
        return Ok(Vec::new());
    }

    let mut vars = variables!();
    let cells: Vec<Vec<Variable>> = (0..rows)
        .map(|_| (0..cols).map(|_| vars.add(variable().binary())).collect())
        .collect();

    let objective: Expression = cells
        .iter()
        .zip(weights)
        .flat_map(|(row, w)| row.iter().zip(w).map(|(x, &w)| w * *x))
        .sum();

    let mut model = vars.maximise(&objective).using(highs);
    for row in &cells {
        let taken: Expression = row.iter().copied().sum();
        model = model.with(constraint!(taken <= 1.0));
    }
    for j in 0..cols {
        let taken: Expression = cells.iter().map(|row| row[j]).sum();
        model = model.with(constraint!(taken <= 1.0));
    }

    let solution = model
        .solve()
        .map_err(|e| Error::Solver(e.to_string()))?;

    let mut pairs = Vec::new();
    for (i, row) in cells.iter().enumerate() {
        for (j, x) in row.iter().enumerate() {
            if solution.value(*x) > 0.5 && weights[i][j] > 0.0 {
                pairs.push((i, j));
            }
        }
    }
    Ok(pairs)
}
