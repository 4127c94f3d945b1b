// Copyright contributors to the Twirl project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;

use crate::{Matrix, TwirlError, c64};

/// Reordering of the qubits of an `n`-qubit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutation {
    n_qubits: usize,
}

impl Permutation {
    pub fn new(n_qubits: usize) -> Result<Self, TwirlError> {
        if n_qubits < 1 {
            return Err(TwirlError::InvalidQubitCount(n_qubits));
        }
        Ok(Self { n_qubits })
    }

    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Computational basis labels, e.g. `["00", "01", "10", "11"]`.
    pub fn basis_set(&self) -> Vec<String> {
        (0..1usize << self.n_qubits)
            .map(|b| format!("{b:0width$b}", width = self.n_qubits))
            .collect()
    }

    /// Pairs `(old, new)` of basis labels where the qubit at position `i` of
    /// `new` is the qubit at position `order[i]` (1-based) of `old`.
    pub fn permutation_list(&self, order: &[usize]) -> Result<Vec<(String, String)>, TwirlError> {
        let width = self.n_qubits;
        Ok(self
            .permuted_indices(order)?
            .into_iter()
            .map(|(old, new)| (format!("{old:0width$b}"), format!("{new:0width$b}")))
            .collect())
    }

    /// The 0/1 matrix with a one at `(old, new)` for every basis pair.
    pub fn permutation_matrix(&self, order: &[usize]) -> Result<Matrix, TwirlError> {
        let dim = 1usize << self.n_qubits;
        let mut m = Matrix::zeros(dim, dim);
        for (old, new) in self.permuted_indices(order)? {
            m[(old, new)] = c64(1.0, 0.0);
        }
        Ok(m)
    }

    fn validate(&self, order: &[usize]) -> Result<(), TwirlError> {
        if order.len() != self.n_qubits {
            return Err(TwirlError::InvalidPermutation(
                "the order list must have the same length as the number of qubits to permute"
                    .to_string(),
            ));
        }
        let unique: HashSet<_> = order.iter().collect();
        if unique.len() != self.n_qubits {
            return Err(TwirlError::InvalidPermutation(
                "the order list cannot contain duplicate items".to_string(),
            ));
        }
        if let Some((index, item)) = order
            .iter()
            .enumerate()
            .find(|(_, item)| **item < 1 || **item > self.n_qubits)
        {
            return Err(TwirlError::InvalidPermutation(format!(
                "item {item} at index {index} in order list is out of bounds"
            )));
        }
        Ok(())
    }

    fn permuted_indices(&self, order: &[usize]) -> Result<Vec<(usize, usize)>, TwirlError> {
        self.validate(order)?;
        let n = self.n_qubits;
        // Qubit 0 is the most significant bit of the basis index.
        let bit = |b: usize, qubit: usize| (b >> (n - 1 - qubit)) & 1;
        Ok((0..1usize << n)
            .map(|old| {
                let new = order
                    .iter()
                    .enumerate()
                    .fold(0, |acc, (i, src)| acc | (bit(old, src - 1) << (n - 1 - i)));
                (old, new)
            })
            .collect())
    }
}

/// The operator exchanging the two factors of `C^dim ⊗ C^dim`.
pub fn swap_operator(dim: usize) -> Matrix {
    let mut m = Matrix::zeros(dim * dim, dim * dim);
    for i in 0..dim {
        for j in 0..dim {
            m[(i * dim + j, j * dim + i)] = c64(1.0, 0.0);
        }
    }
    m
}
