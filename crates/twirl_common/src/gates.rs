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

//! Standard gates as dense matrices.
//!
//! Multi-qubit operators use big-endian qubit order: qubit 0 is the
//! leftmost Kronecker factor.

use std::f64::consts::FRAC_1_SQRT_2;

use crate::{C64, Matrix, TwirlError, c64, kron_all};

const ZERO: C64 = c64(0.0, 0.0);
const ONE: C64 = c64(1.0, 0.0);
const I: C64 = c64(0.0, 1.0);

pub fn identity(dim: usize) -> Matrix {
    Matrix::identity(dim, dim)
}

pub fn pauli_x() -> Matrix {
    Matrix::from_row_slice(2, 2, &[ZERO, ONE, ONE, ZERO])
}

pub fn pauli_y() -> Matrix {
    Matrix::from_row_slice(2, 2, &[ZERO, -I, I, ZERO])
}

pub fn pauli_z() -> Matrix {
    Matrix::from_row_slice(2, 2, &[ONE, ZERO, ZERO, -ONE])
}

pub fn hadamard() -> Matrix {
    let h = c64(FRAC_1_SQRT_2, 0.0);
    Matrix::from_row_slice(2, 2, &[h, h, h, -h])
}

/// The phase gate `diag(1, i)`.
pub fn phase_s() -> Matrix {
    Matrix::from_row_slice(2, 2, &[ONE, ZERO, ZERO, I])
}

/// The `diag(1, e^{iπ/4})` gate. Not a Clifford.
pub fn phase_t() -> Matrix {
    let t = C64::from_polar(1.0, std::f64::consts::FRAC_PI_4);
    Matrix::from_row_slice(2, 2, &[ONE, ZERO, ZERO, t])
}

/// Rotation `exp(-i θ X / 2)`.
pub fn rx(theta: f64) -> Matrix {
    let c = c64((theta / 2.0).cos(), 0.0);
    let s = c64(0.0, -(theta / 2.0).sin());
    Matrix::from_row_slice(2, 2, &[c, s, s, c])
}

/// Controlled-NOT with control on the first qubit.
pub fn cnot() -> Matrix {
    #[rustfmt::skip]
    let entries = [
        ONE,  ZERO, ZERO, ZERO,
        ZERO, ONE,  ZERO, ZERO,
        ZERO, ZERO, ZERO, ONE,
        ZERO, ZERO, ONE,  ZERO,
    ];
    Matrix::from_row_slice(4, 4, &entries)
}

/// Place a single-qubit `gate` on `qubit` of an `n_qubits` register.
pub fn on_qubit(gate: &Matrix, qubit: usize, n_qubits: usize) -> Result<Matrix, TwirlError> {
    if n_qubits == 0 {
        return Err(TwirlError::InvalidQubitCount(n_qubits));
    }
    if qubit >= n_qubits {
        return Err(TwirlError::InvalidPermutation(format!(
            "qubit {qubit} is out of range for {n_qubits} qubits"
        )));
    }
    crate::check_dims(2, [gate])?;
    let id = identity(2);
    let factors: Vec<&Matrix> = (0..n_qubits)
        .map(|i| if i == qubit { gate } else { &id })
        .collect();
    Ok(kron_all(factors))
}

/// Place a two-qubit `gate` on the neighbouring qubits `(qubit, qubit + 1)`.
pub fn on_pair(gate: &Matrix, qubit: usize, n_qubits: usize) -> Result<Matrix, TwirlError> {
    if n_qubits < 2 || qubit + 1 >= n_qubits {
        return Err(TwirlError::InvalidPermutation(format!(
            "qubits ({qubit}, {}) are out of range for {n_qubits} qubits",
            qubit + 1
        )));
    }
    crate::check_dims(4, [gate])?;
    let before = identity(1 << qubit);
    let after = identity(1 << (n_qubits - qubit - 2));
    Ok(kron_all([&before, gate, &after]))
}
