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

//! Pure states, the single-qubit stabilizer state design and fidelities.

use nalgebra::{DVector, dvector};
use twirl_common::{C64, Matrix, TwirlError, c64, check_dims, gates, square_dim};

use crate::average::scalar_average;

/// A pure state vector.
pub type State = DVector<C64>;

/// The computational basis state `|index>` of a `dim`-dimensional space.
pub fn basis_state(dim: usize, index: usize) -> Result<State, TwirlError> {
    if index >= dim {
        return Err(TwirlError::IndexOutOfRange { index, dim });
    }
    let mut v = State::zeros(dim);
    v[index] = c64(1.0, 0.0);
    Ok(v)
}

/// `|0>, |1>, |+>, |->, |+i>, |-i>`: the eigenstates of the single-qubit
/// Paulis, a state 2-design.
pub fn stabilizer_states() -> Vec<State> {
    let (x, h, s) = (gates::pauli_x(), gates::hadamard(), gates::phase_s());
    let preparations = [
        gates::identity(2),
        x.clone(),
        h.clone(),
        &h * &x,
        &s * &h,
        &s * &h * &x,
    ];
    let zero = dvector![c64(1.0, 0.0), c64(0.0, 0.0)];
    orbit(&preparations, &zero)
}

/// The states `U |fiducial>` for every `U` in `unitaries`.
pub fn orbit(unitaries: &[Matrix], fiducial: &State) -> Vec<State> {
    unitaries.iter().map(|u| u * fiducial).collect()
}

/// `|<a|b>|²`.
pub fn state_fidelity(a: &State, b: &State) -> Result<f64, TwirlError> {
    if a.len() != b.len() {
        return Err(TwirlError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.dotc(b).norm_sqr())
}

/// Mean over `states` of `|<ψ| ideal† actual |ψ>|²`, i.e. the overlap of the
/// intended output `ideal |ψ>` with the produced output `actual |ψ>`.
pub fn average_fidelity(
    ideal: &Matrix,
    actual: &Matrix,
    states: &[State],
) -> Result<f64, TwirlError> {
    let dim = square_dim(ideal)?;
    check_dims(dim, [actual])?;
    let overlap = ideal.adjoint() * actual;
    let mut fidelities = Vec::with_capacity(states.len());
    for psi in states {
        if psi.len() != dim {
            return Err(TwirlError::DimensionMismatch {
                expected: dim,
                found: psi.len(),
            });
        }
        fidelities.push(psi.dotc(&(&overlap * psi)).norm_sqr());
    }
    scalar_average(|f| f, fidelities)
}
