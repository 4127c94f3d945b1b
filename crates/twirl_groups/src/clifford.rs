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

use log::info;
use twirl_common::{Matrix, Normalization, TwirlError, gates};

use crate::closure::{Closure, ClosureOptions, GroupClosure};
use crate::normalizer::NormalizerTest;
use crate::pauli;
use crate::set::Lookup;

/// `H` and `S` on each qubit, then CNOT on each neighbouring pair.
/// For one qubit this is `[H, S]`.
pub fn clifford_generators(n_qubits: usize) -> Result<Vec<Matrix>, TwirlError> {
    if n_qubits == 0 {
        return Err(TwirlError::InvalidQubitCount(n_qubits));
    }
    let mut generators = Vec::with_capacity(3 * n_qubits);
    for gate in [gates::hadamard(), gates::phase_s()] {
        for q in 0..n_qubits {
            generators.push(gates::on_qubit(&gate, q, n_qubits)?);
        }
    }
    for q in 0..n_qubits - 1 {
        generators.push(gates::on_pair(&gates::cnot(), q, n_qubits)?);
    }
    Ok(generators)
}

/// Options used by [`clifford_group`]: elements up to phase, with hashed
/// lookup beyond a single qubit where the group has thousands of elements.
pub fn default_options(n_qubits: usize) -> ClosureOptions {
    let lookup = if n_qubits > 1 {
        Lookup::Hashed { decimals: 6 }
    } else {
        Lookup::Linear
    };
    ClosureOptions {
        lookup,
        ..ClosureOptions::up_to_phase()
    }
}

/// The Clifford group on `n_qubits` qubits modulo global phase, each element
/// scaled to unit determinant. 24 elements for one qubit, 11520 for two.
pub fn clifford_group(n_qubits: usize) -> Result<Vec<Matrix>, TwirlError> {
    let closure = clifford_closure(n_qubits, default_options(n_qubits))?;
    Ok(closure.into_elements())
}

/// Clifford closure with caller-chosen options. The Pauli group is computed
/// once per call and used by the normalizer test.
pub fn clifford_closure(n_qubits: usize, options: ClosureOptions) -> Result<Closure, TwirlError> {
    let pauli_options = ClosureOptions {
        tolerance: options.tolerance,
        ..default_options(n_qubits)
    };
    let test = NormalizerTest::new(
        pauli::pauli_group_with(n_qubits, pauli_options)?,
        options.tolerance,
    )?;
    clifford_closure_with(&test, options)
}

/// Clifford closure against a precomputed normalizer test, for callers that
/// hoist the Pauli group out of repeated runs.
pub fn clifford_closure_with(
    test: &NormalizerTest,
    options: ClosureOptions,
) -> Result<Closure, TwirlError> {
    let n_qubits = test.dim().trailing_zeros() as usize;
    info!("Enumerating the {n_qubits}-qubit Clifford group");
    GroupClosure::from_generators(clifford_generators(n_qubits)?)?
        .normalization(Normalization::UnitDeterminant)
        .accept_with(|x| test.is_normalizer(x))
        .options(options)
        .build()
}
