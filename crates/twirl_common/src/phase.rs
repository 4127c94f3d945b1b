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

//! Global-phase canonicalization.
//!
//! Group elements are identified up to a unit-modulus scalar. Each rule here
//! maps a matrix to a representative of its phase class.

use serde::{Deserialize, Serialize};

use crate::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// Leave candidates untouched.
    #[default]
    None,
    /// Divide by the principal `d`-th root of the determinant, so the result
    /// has unit determinant. Leaves a `d`-th root of unity ambiguous.
    UnitDeterminant,
    /// Make the first entry with modulus above `atol` real and positive.
    FirstEntry { atol: f64 },
}

impl Normalization {
    pub fn apply(&self, m: &Matrix) -> Matrix {
        match self {
            Self::None => m.clone(),
            Self::UnitDeterminant => unit_determinant(m),
            Self::FirstEntry { atol } => first_entry(m, *atol),
        }
    }
}

/// `m / det(m)^(1/d)` using the principal root. Singular input is returned
/// unchanged.
pub fn unit_determinant(m: &Matrix) -> Matrix {
    let dim = m.nrows();
    let det = m.determinant();
    if det.norm() == 0.0 || dim == 0 {
        return m.clone();
    }
    let root = if dim == 2 {
        det.sqrt()
    } else {
        det.powf(1.0 / dim as f64)
    };
    m.map(|v| v / root)
}

/// Divide by the phase of the first entry (in storage order) whose modulus
/// exceeds `atol`.
pub fn first_entry(m: &Matrix, atol: f64) -> Matrix {
    match m.iter().find(|v| v.norm() > atol) {
        Some(v) => {
            let phase = *v / v.norm();
            m.map(|x| x / phase)
        }
        None => m.clone(),
    }
}
