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

use serde::{Deserialize, Serialize};

use crate::{C64, Matrix};

/// Entrywise closeness relation `|a - b| <= atol + rtol * |b|`.
///
/// Too tight a tolerance lets floating-point noise duplicate group elements;
/// too loose a tolerance merges distinct ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub rtol: f64,
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Tolerance {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// Scalar closeness. Not symmetric: `b` is the reference value.
    pub fn close(&self, a: C64, b: C64) -> bool {
        (a - b).norm() <= self.atol + self.rtol * b.norm()
    }

    pub fn close_real(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }

    /// Entrywise closeness of two matrices of the same shape.
    pub fn approx_eq(&self, a: &Matrix, b: &Matrix) -> bool {
        a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| self.close(*x, *y))
    }

    /// Whether `a` is close to `λ b` for some unit-modulus `λ`.
    ///
    /// The phase is estimated from the largest entry of `b`.
    pub fn approx_eq_up_to_phase(&self, a: &Matrix, b: &Matrix) -> bool {
        if a.shape() != b.shape() {
            return false;
        }
        let Some((k, pivot)) = b
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.norm().total_cmp(&y.norm()))
        else {
            return true; // both empty
        };
        if pivot.norm() <= self.atol {
            return self.approx_eq(a, b);
        }
        let ratio = a[k] / pivot;
        if ratio.norm() == 0.0 {
            return false;
        }
        let phase = ratio / ratio.norm();
        a.iter()
            .zip(b.iter())
            .all(|(x, y)| self.close(*x, phase * *y))
    }
}

/// Relation used to decide whether two matrices are the same group element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Equivalence {
    /// Entrywise closeness.
    #[default]
    Exact,
    /// Closeness up to a global phase.
    UpToPhase,
}

impl Equivalence {
    pub fn equivalent(&self, tolerance: &Tolerance, a: &Matrix, b: &Matrix) -> bool {
        match self {
            Self::Exact => tolerance.approx_eq(a, b),
            Self::UpToPhase => tolerance.approx_eq_up_to_phase(a, b),
        }
    }
}
