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

use log::trace;
use twirl_common::{Matrix, Tolerance, TwirlError, check_dims, conjugate, square_dim};

use crate::pauli;

/// Membership test for the normalizer of a Pauli group, i.e. the Clifford
/// group.
///
/// Holds the Pauli group so it is computed once and shared by every
/// candidate of a closure run.
#[derive(Debug, Clone)]
pub struct NormalizerTest {
    pauli_group: Vec<Matrix>,
    tolerance: Tolerance,
}

impl NormalizerTest {
    pub fn new(pauli_group: Vec<Matrix>, tolerance: Tolerance) -> Result<Self, TwirlError> {
        let first = pauli_group.first().ok_or(TwirlError::EmptyEnsemble)?;
        let dim = square_dim(first)?;
        check_dims(dim, &pauli_group)?;
        Ok(Self {
            pauli_group,
            tolerance,
        })
    }

    /// Test against the Pauli group (up to phase) on `n_qubits` qubits.
    pub fn for_qubits(n_qubits: usize, tolerance: Tolerance) -> Result<Self, TwirlError> {
        Self::new(pauli::pauli_group(n_qubits)?, tolerance)
    }

    pub fn pauli_group(&self) -> &[Matrix] {
        &self.pauli_group
    }

    pub fn dim(&self) -> usize {
        self.pauli_group[0].nrows()
    }

    /// Whether `x p x†` is a Pauli group element, up to phase, for every `p`.
    ///
    /// A candidate of the wrong dimension is not a normalizer.
    pub fn is_normalizer(&self, x: &Matrix) -> bool {
        if x.shape() != (self.dim(), self.dim()) {
            return false;
        }
        let result = self.pauli_group.iter().all(|p| {
            let image = conjugate(x, p);
            self.pauli_group
                .iter()
                .any(|q| self.tolerance.approx_eq_up_to_phase(&image, q))
        });
        trace!("normalizer test: {result}");
        result
    }
}

/// Whether `x` normalizes `pauli_group`. See [`NormalizerTest::is_normalizer`].
pub fn is_normalizer(
    x: &Matrix,
    pauli_group: &[Matrix],
    tolerance: Tolerance,
) -> Result<bool, TwirlError> {
    let test = NormalizerTest::new(pauli_group.to_vec(), tolerance)?;
    check_dims(test.dim(), [x])?;
    Ok(test.is_normalizer(x))
}

/// Whether `x` is a Clifford unitary on as many qubits as its dimension
/// implies. Recomputes the Pauli group on every call.
pub fn is_clifford(x: &Matrix, tolerance: Tolerance) -> Result<bool, TwirlError> {
    let dim = square_dim(x)?;
    if !dim.is_power_of_two() || dim < 2 {
        return Err(TwirlError::DimensionMismatch {
            expected: dim.next_power_of_two().max(2),
            found: dim,
        });
    }
    let test = NormalizerTest::for_qubits(dim.trailing_zeros() as usize, tolerance)?;
    Ok(test.is_normalizer(x))
}
