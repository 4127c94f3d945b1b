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

use twirl_common::{Equivalence, Matrix, TwirlError, gates};

use crate::closure::{ClosureOptions, GroupClosure};

/// `X`, `Y` and `Z` on each of `n_qubits` qubits, qubit by qubit.
pub fn pauli_generators(n_qubits: usize) -> Result<Vec<Matrix>, TwirlError> {
    if n_qubits == 0 {
        return Err(TwirlError::InvalidQubitCount(n_qubits));
    }
    let singles = [gates::pauli_x(), gates::pauli_y(), gates::pauli_z()];
    (0..n_qubits)
        .flat_map(|q| singles.iter().map(move |p| gates::on_qubit(p, q, n_qubits)))
        .collect()
}

/// The Pauli group on `n_qubits` qubits modulo global phase: `4^n`
/// elements, starting with the identity. For one qubit this is
/// `[I, X, Y, Z]`.
pub fn pauli_group(n_qubits: usize) -> Result<Vec<Matrix>, TwirlError> {
    pauli_group_with(n_qubits, ClosureOptions::up_to_phase())
}

/// The Pauli group including the phases `{±1, ±i}`: `4^(n+1)` elements.
pub fn pauli_group_with_phases(n_qubits: usize) -> Result<Vec<Matrix>, TwirlError> {
    pauli_group_with(
        n_qubits,
        ClosureOptions {
            equivalence: Equivalence::Exact,
            ..Default::default()
        },
    )
}

/// Pauli closure with caller-chosen options. Every candidate is accepted and
/// none is normalized.
pub fn pauli_group_with(
    n_qubits: usize,
    options: ClosureOptions,
) -> Result<Vec<Matrix>, TwirlError> {
    let closure = GroupClosure::from_generators(pauli_generators(n_qubits)?)?
        .options(options)
        .build()?;
    Ok(closure.into_elements())
}

#[cfg(test)]
mod tests {
    use twirl_common::Tolerance;

    use super::*;

    #[test]
    fn single_qubit_group_in_discovery_order() {
        let group = pauli_group(1).unwrap();
        assert_eq!(
            vec![
                gates::identity(2),
                gates::pauli_x(),
                gates::pauli_y(),
                gates::pauli_z()
            ],
            group
        );
    }

    #[test]
    fn group_with_phases() {
        let group = pauli_group_with_phases(1).unwrap();
        assert_eq!(16, group.len());
        let tol = Tolerance::default();
        let iz = gates::pauli_z() * twirl_common::c64(0.0, 1.0);
        assert!(group.iter().any(|m| tol.approx_eq(m, &iz)));
    }

    #[test]
    fn generator_count() {
        assert_eq!(3, pauli_generators(1).unwrap().len());
        assert_eq!(6, pauli_generators(2).unwrap().len());
        assert_eq!(
            Err(TwirlError::InvalidQubitCount(0)),
            pauli_generators(0)
        );
    }

    #[test]
    fn two_qubit_group_size() {
        assert_eq!(16, pauli_group(2).unwrap().len());
        assert_eq!(64, pauli_group_with_phases(2).unwrap().len());
    }
}
