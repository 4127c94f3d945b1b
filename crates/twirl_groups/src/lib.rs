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

//! Breadth-first enumeration of finite matrix groups.
//!
//! [`GroupClosure`] closes a generating set under right multiplication with a
//! pluggable acceptance predicate and phase normalization. The Pauli and
//! Clifford groups are the two standard instantiations; the Clifford closure
//! uses [`NormalizerTest`] as its acceptance predicate.

pub mod clifford;
pub mod closure;
pub mod normalizer;
pub mod pauli;
mod set;

pub use clifford::{clifford_closure, clifford_closure_with, clifford_generators, clifford_group};
pub use closure::{Closure, ClosureOptions, ClosureStats, GroupClosure, closure, closure_with};
pub use normalizer::{NormalizerTest, is_clifford, is_normalizer};
pub use pauli::{pauli_generators, pauli_group, pauli_group_with, pauli_group_with_phases};
pub use set::{Lookup, MatrixSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use twirl_common::{Matrix, MatrixRecord, Tolerance, TwirlError};

/// The groups the command line can enumerate.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupChoices {
    Pauli,
    Clifford,
}

impl GroupChoices {
    pub fn options(&self, n_qubits: usize) -> ClosureOptions {
        match self {
            Self::Pauli => ClosureOptions::up_to_phase(),
            Self::Clifford => clifford::default_options(n_qubits),
        }
    }

    pub fn enumerate(
        &self,
        n_qubits: usize,
        options: ClosureOptions,
    ) -> Result<Closure, TwirlError> {
        match self {
            Self::Pauli => GroupClosure::from_generators(pauli_generators(n_qubits)?)?
                .options(options)
                .build(),
            Self::Clifford => clifford_closure(n_qubits, options),
        }
    }
}

impl std::fmt::Display for GroupChoices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pauli => write!(f, "pauli"),
            Self::Clifford => write!(f, "clifford"),
        }
    }
}

/// An enumerated group as written by `twirl_groups generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupFile {
    pub group: String,
    pub qubits: usize,
    pub tolerance: Tolerance,
    pub elements: Vec<MatrixRecord>,
}

impl GroupFile {
    pub fn new(group: GroupChoices, qubits: usize, tolerance: Tolerance, elements: &[Matrix]) -> Self {
        Self {
            group: group.to_string(),
            qubits,
            tolerance,
            elements: elements.iter().map(MatrixRecord::from).collect(),
        }
    }

    pub fn matrices(&self) -> Result<Vec<Matrix>, TwirlError> {
        self.elements.iter().map(Matrix::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    static CLIFFORD_1Q: LazyLock<Vec<Matrix>> =
        LazyLock::new(|| clifford_group(1).expect("The Clifford group should enumerate"));

    #[test]
    fn clifford_group_contains_pauli_group() {
        let tol = Tolerance::default();
        for p in pauli_group(1).unwrap() {
            assert!(
                CLIFFORD_1Q.iter().any(|c| tol.approx_eq_up_to_phase(&p, c)),
                "{p}"
            );
        }
    }

    #[test]
    fn choices_enumerate_expected_sizes() {
        let pauli = GroupChoices::Pauli
            .enumerate(1, GroupChoices::Pauli.options(1))
            .unwrap();
        assert_eq!(4, pauli.len());
        let clifford = GroupChoices::Clifford
            .enumerate(1, GroupChoices::Clifford.options(1))
            .unwrap();
        assert_eq!(CLIFFORD_1Q.as_slice(), clifford.elements());
    }
}

#[cfg(test)]
mod group_file_tests {
    use super::*;

    #[test]
    fn group_file_roundtrip() {
        let group = pauli_group(1).unwrap();
        let file = GroupFile::new(GroupChoices::Pauli, 1, Tolerance::default(), &group);
        let text = serde_json::to_string(&file).unwrap();
        let parsed: GroupFile = serde_json::from_str(&text).unwrap();
        assert_eq!("pauli", parsed.group);
        assert_eq!(group, parsed.matrices().unwrap());
    }
}
