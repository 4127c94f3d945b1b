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

//! Group-theoretic properties of the enumerated Pauli and Clifford groups.

use std::sync::LazyLock;

use itertools::Itertools;
use twirl_common::{Matrix, Normalization, Tolerance, gates, phase};
use twirl_groups::{
    ClosureOptions, GroupClosure, Lookup, NormalizerTest, clifford_closure, clifford_generators,
    clifford_group, closure, closure_with, is_normalizer, pauli_generators, pauli_group,
};

// ---------------------------------------------------------------------------
// Shared fixtures
// ---------------------------------------------------------------------------

static PAULI_1Q: LazyLock<Vec<Matrix>> =
    LazyLock::new(|| pauli_group(1).expect("The Pauli group should enumerate"));

static CLIFFORD_1Q: LazyLock<Vec<Matrix>> =
    LazyLock::new(|| clifford_group(1).expect("The Clifford group should enumerate"));

fn pairwise_distinct_up_to_phase(group: &[Matrix]) -> bool {
    let tol = Tolerance::default();
    group
        .iter()
        .tuple_combinations()
        .all(|(a, b)| !tol.approx_eq_up_to_phase(a, b))
}

fn contains_up_to_phase(group: &[Matrix], m: &Matrix) -> bool {
    let tol = Tolerance::default();
    group.iter().any(|g| tol.approx_eq_up_to_phase(m, g))
}

// =========================================================================
// Pauli group
// =========================================================================

#[test]
fn pauli_group_has_four_distinct_elements() {
    assert_eq!(4, PAULI_1Q.len());
    assert!(pairwise_distinct_up_to_phase(&PAULI_1Q));
    let tol = Tolerance::default();
    for (a, b) in PAULI_1Q.iter().tuple_combinations() {
        assert!(!tol.approx_eq(a, b));
    }
}

#[test]
fn pauli_group_is_closed_under_generators() {
    for (p, g) in PAULI_1Q.iter().cartesian_product(pauli_generators(1).unwrap()) {
        assert!(contains_up_to_phase(&PAULI_1Q, &(p * g)));
    }
}

#[test]
fn pauli_closure_is_idempotent() {
    // Closing the group itself adds nothing.
    let again = GroupClosure::from_generators(PAULI_1Q.clone())
        .unwrap()
        .options(ClosureOptions::up_to_phase())
        .build()
        .unwrap();
    assert_eq!(PAULI_1Q.len(), again.len());
    for m in again.elements() {
        assert!(contains_up_to_phase(&PAULI_1Q, m));
    }
}

#[test]
fn seed_is_included_exactly_once() {
    let tol = Tolerance::default();
    for group in [&*PAULI_1Q, &*CLIFFORD_1Q] {
        let seeds = group
            .iter()
            .filter(|m| tol.approx_eq_up_to_phase(m, &gates::identity(2)))
            .count();
        assert_eq!(1, seeds);
    }
}

#[test]
fn free_function_builds_pauli_group() {
    let elements = closure(
        gates::identity(2),
        pauli_generators(1).unwrap(),
        |_| true,
        Matrix::clone,
    )
    .unwrap();
    assert_eq!(4, elements.len());
    for (m, p) in elements.iter().zip(PAULI_1Q.iter()) {
        assert!(Tolerance::default().approx_eq(m, p));
    }
}

#[test]
fn first_entry_normalization_folds_phases_without_phase_equivalence() {
    let elements = closure_with(
        gates::identity(2),
        pauli_generators(1).unwrap(),
        |_| true,
        |m| Normalization::FirstEntry { atol: 1e-8 }.apply(m),
        ClosureOptions::default(),
    )
    .unwrap();
    assert_eq!(4, elements.len());
    for m in &elements {
        assert!(contains_up_to_phase(&PAULI_1Q, m));
    }
}

// =========================================================================
// Clifford group
// =========================================================================

#[test]
fn clifford_group_has_24_elements() {
    assert_eq!(24, CLIFFORD_1Q.len());
    assert!(pairwise_distinct_up_to_phase(&CLIFFORD_1Q));
}

#[test]
fn every_clifford_normalizes_the_pauli_group() {
    let tol = Tolerance::default();
    for c in CLIFFORD_1Q.iter() {
        assert!(is_normalizer(c, &PAULI_1Q, tol).unwrap(), "{c}");
    }
}

#[test]
fn clifford_group_is_closed_under_generators() {
    for (c, g) in CLIFFORD_1Q
        .iter()
        .cartesian_product(clifford_generators(1).unwrap())
    {
        assert!(contains_up_to_phase(&CLIFFORD_1Q, &(c * g)));
    }
}

#[test]
fn clifford_group_is_closed_under_products() {
    for (a, b) in CLIFFORD_1Q.iter().cartesian_product(CLIFFORD_1Q.iter()) {
        assert!(contains_up_to_phase(&CLIFFORD_1Q, &(a * b)));
    }
}

#[test]
fn clifford_group_starts_with_identity_then_generators() {
    let tol = Tolerance::default();
    assert!(tol.approx_eq_up_to_phase(&CLIFFORD_1Q[0], &gates::identity(2)));
    assert!(tol.approx_eq_up_to_phase(&CLIFFORD_1Q[1], &gates::hadamard()));
    assert!(tol.approx_eq_up_to_phase(&CLIFFORD_1Q[2], &gates::phase_s()));
}

#[test]
fn free_function_builds_clifford_group() {
    let test = NormalizerTest::new(PAULI_1Q.clone(), Tolerance::default()).unwrap();
    let generators = vec![gates::hadamard(), gates::phase_s()];
    let elements = closure(
        gates::identity(2),
        generators.clone(),
        |x| test.is_normalizer(x),
        phase::unit_determinant,
    )
    .unwrap();
    assert_eq!(24, elements.len());
    assert!(pairwise_distinct_up_to_phase(&elements));

    // The square root of the determinant leaves a sign, so entrywise
    // deduplication keeps both x and -x.
    let signed = closure_with(
        gates::identity(2),
        generators,
        |x| test.is_normalizer(x),
        phase::unit_determinant,
        ClosureOptions::default(),
    )
    .unwrap();
    assert_eq!(48, signed.len());
}

#[test]
fn lookup_strategy_does_not_change_the_group() {
    let hashed = clifford_closure(
        1,
        ClosureOptions {
            lookup: Lookup::Hashed { decimals: 6 },
            ..ClosureOptions::up_to_phase()
        },
    )
    .unwrap();
    assert_eq!(CLIFFORD_1Q.as_slice(), hashed.elements());
}

#[test]
fn non_cliffords_are_pruned() {
    // Adding T to the generators must not leak non-Clifford elements.
    let test = NormalizerTest::new(PAULI_1Q.clone(), Tolerance::default()).unwrap();
    let closure = GroupClosure::from_generators(vec![
        gates::hadamard(),
        gates::phase_s(),
        gates::phase_t(),
    ])
    .unwrap()
    .normalization(Normalization::UnitDeterminant)
    .accept_with(|x| test.is_normalizer(x))
    .options(ClosureOptions::up_to_phase())
    .build()
    .unwrap();
    assert_eq!(24, closure.len());
    assert!(closure.stats().rejected >= 24);
}

// =========================================================================
// Two qubits
// =========================================================================

#[test]
fn two_qubit_pauli_group() {
    let group = pauli_group(2).unwrap();
    assert_eq!(16, group.len());
    assert!(pairwise_distinct_up_to_phase(&group));
}

#[test]
fn two_qubit_clifford_group_has_11520_elements() {
    let group = clifford_group(2).unwrap();
    assert_eq!(11520, group.len());
    let tol = Tolerance::default();
    let test = NormalizerTest::for_qubits(2, tol).unwrap();
    for c in group.iter().step_by(97) {
        assert!(test.is_normalizer(c));
    }
}
