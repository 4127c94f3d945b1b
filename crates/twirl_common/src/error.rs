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

use thiserror::Error;

/// Errors raised by group enumeration and ensemble averaging.
///
/// All of these are input-validation failures reported before any partial
/// result is produced, except [`TwirlError::ElementLimit`] which is raised
/// mid-closure when a configured bound is exceeded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TwirlError {
    #[error("the generating set is empty")]
    EmptyGenerators,

    #[error("the ensemble is empty")]
    EmptyEnsemble,

    #[error("dimension mismatch: expected {expected}x{expected}, found {found}x{found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("closure exceeded the limit of {limit} elements")]
    ElementLimit { limit: usize },

    #[error("cannot average over the interval [{a}, {b})")]
    InvalidInterval { a: f64, b: f64 },

    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("the number of qubits must be at least 1, got {0}")]
    InvalidQubitCount(usize),

    #[error("the dimension must be at least 1, got {0}")]
    InvalidDimension(usize),

    #[error("basis index {index} is out of range for dimension {dim}")]
    IndexOutOfRange { index: usize, dim: usize },
}
