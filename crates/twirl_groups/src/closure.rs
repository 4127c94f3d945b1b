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

//! Breadth-first closure of a generating set under right multiplication.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use twirl_common::{Equivalence, Matrix, Normalization, Tolerance, TwirlError, check_dims, square_dim};

use crate::set::{Lookup, MatrixSet};

/// Knobs of a closure run that do not change which group is generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosureOptions {
    pub tolerance: Tolerance,
    pub equivalence: Equivalence,
    pub lookup: Lookup,
    /// Remember rejected candidates so that rediscovering them skips the
    /// acceptance predicate.
    pub memoize_rejections: bool,
    /// Fail instead of growing the group beyond this many elements.
    pub max_elements: Option<usize>,
}

impl Default for ClosureOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            equivalence: Equivalence::Exact,
            lookup: Lookup::Linear,
            memoize_rejections: true,
            max_elements: None,
        }
    }
}

impl ClosureOptions {
    /// Options identifying elements up to global phase.
    pub fn up_to_phase() -> Self {
        Self {
            equivalence: Equivalence::UpToPhase,
            ..Default::default()
        }
    }
}

/// Counters collected while running a closure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureStats {
    pub candidates: usize,
    pub duplicates: usize,
    pub rejected: usize,
    pub memo_hits: usize,
    pub accepted: usize,
}

impl fmt::Display for ClosureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} candidates: {} accepted, {} duplicates, {} rejected, {} memo hits",
            self.candidates, self.accepted, self.duplicates, self.rejected, self.memo_hits
        )
    }
}

/// The elements generated by a closure run, in breadth-first discovery order.
#[derive(Debug, Clone)]
pub struct Closure {
    elements: Vec<Matrix>,
    stats: ClosureStats,
}

impl Closure {
    pub fn elements(&self) -> &[Matrix] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Matrix> {
        self.elements
    }

    pub fn stats(&self) -> ClosureStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

type Predicate<'a> = Box<dyn Fn(&Matrix) -> bool + 'a>;
type Normalizer<'a> = Box<dyn Fn(&Matrix) -> Matrix + 'a>;

/// Enumerates the group generated by a finite set of matrices.
///
/// Starting from `seed`, each dequeued candidate is normalized, dropped if an
/// equivalent element was already found, dropped without expansion if the
/// acceptance predicate rejects it, and otherwise recorded and multiplied on
/// the right by every generator.
///
/// Termination requires the generated structure to be finite modulo the
/// equivalence and normalization in use. Set
/// [`ClosureOptions::max_elements`] to turn an infinite group into an error.
pub struct GroupClosure<'a> {
    seed: Matrix,
    generators: Vec<Matrix>,
    accept: Predicate<'a>,
    normalize: Normalizer<'a>,
    options: ClosureOptions,
}

impl<'a> GroupClosure<'a> {
    pub fn new(seed: Matrix, generators: Vec<Matrix>) -> Result<Self, TwirlError> {
        if generators.is_empty() {
            return Err(TwirlError::EmptyGenerators);
        }
        let dim = square_dim(&seed)?;
        check_dims(dim, &generators)?;

        Ok(Self {
            seed,
            generators,
            accept: Box::new(|_| true),
            normalize: Box::new(Matrix::clone),
            options: ClosureOptions::default(),
        })
    }

    /// Closure seeded with the identity of the generators' dimension.
    pub fn from_generators(generators: Vec<Matrix>) -> Result<Self, TwirlError> {
        let first = generators.first().ok_or(TwirlError::EmptyGenerators)?;
        let dim = square_dim(first)?;
        Self::new(Matrix::identity(dim, dim), generators)
    }

    pub fn accept_with(mut self, accept: impl Fn(&Matrix) -> bool + 'a) -> Self {
        self.accept = Box::new(accept);
        self
    }

    pub fn normalize_with(mut self, normalize: impl Fn(&Matrix) -> Matrix + 'a) -> Self {
        self.normalize = Box::new(normalize);
        self
    }

    pub fn normalization(self, normalization: Normalization) -> Self {
        self.normalize_with(move |m| normalization.apply(m))
    }

    pub fn options(mut self, options: ClosureOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dim(&self) -> usize {
        self.seed.nrows()
    }

    pub fn build(&self) -> Result<Closure, TwirlError> {
        let ClosureOptions {
            tolerance,
            equivalence,
            lookup,
            memoize_rejections,
            max_elements,
        } = self.options;

        info!(
            "Starting closure of {} generators in dimension {}",
            self.generators.len(),
            self.dim()
        );

        let mut group = MatrixSet::new(equivalence, tolerance, lookup);
        let mut rejected = MatrixSet::new(equivalence, tolerance, lookup);
        let mut stats = ClosureStats::default();
        let mut queue = VecDeque::from([self.seed.clone()]);

        while let Some(candidate) = queue.pop_front() {
            stats.candidates += 1;
            let x = (self.normalize)(&candidate);

            if group.contains(&x) {
                stats.duplicates += 1;
                continue;
            }
            if memoize_rejections && rejected.contains(&x) {
                stats.memo_hits += 1;
                continue;
            }
            if !(self.accept)(&x) {
                trace!("Rejected candidate {x}");
                stats.rejected += 1;
                if memoize_rejections {
                    rejected.insert(x);
                }
                continue;
            }
            if let Some(limit) = max_elements {
                if group.len() >= limit {
                    return Err(TwirlError::ElementLimit { limit });
                }
            }

            queue.extend(self.generators.iter().map(|g| &x * g));
            group.insert(x);
            stats.accepted += 1;

            if stats.accepted % 1000 == 0 {
                debug!(
                    "Found {} elements, {} candidates queued",
                    stats.accepted,
                    queue.len()
                );
            }
        }

        debug!("Closure statistics: {stats}");
        info!("Closure done with {} elements", group.len());

        Ok(Closure {
            elements: group.into_vec(),
            stats,
        })
    }
}

/// Enumerate the group generated by `generators` from `seed`, identifying
/// elements that agree up to a global phase at the default tolerance.
///
/// A normalization such as `x / sqrt(det x)` fixes the phase only up to a
/// sign, so `x` and `-x` must count as the same element.
pub fn closure(
    seed: Matrix,
    generators: Vec<Matrix>,
    accept: impl Fn(&Matrix) -> bool,
    normalize: impl Fn(&Matrix) -> Matrix,
) -> Result<Vec<Matrix>, TwirlError> {
    closure_with(seed, generators, accept, normalize, ClosureOptions::up_to_phase())
}

/// [`closure`] with explicit options, e.g. `Equivalence::Exact` to keep
/// phase multiples apart.
pub fn closure_with(
    seed: Matrix,
    generators: Vec<Matrix>,
    accept: impl Fn(&Matrix) -> bool,
    normalize: impl Fn(&Matrix) -> Matrix,
    options: ClosureOptions,
) -> Result<Vec<Matrix>, TwirlError> {
    let closure = GroupClosure::new(seed, generators)?
        .accept_with(accept)
        .normalize_with(normalize)
        .options(options)
        .build()?;
    Ok(closure.into_elements())
}

#[cfg(test)]
mod tests {
    use twirl_common::{c64, gates};

    use super::*;
    use crate::normalizer::NormalizerTest;

    #[test]
    fn empty_generators_fail() {
        assert!(matches!(
            GroupClosure::new(gates::identity(2), vec![]),
            Err(TwirlError::EmptyGenerators)
        ));
        assert!(matches!(
            GroupClosure::from_generators(vec![]),
            Err(TwirlError::EmptyGenerators)
        ));
    }

    #[test]
    fn mismatched_generators_fail() {
        let result = GroupClosure::new(gates::identity(2), vec![gates::pauli_x(), gates::cnot()]);
        assert!(matches!(
            result,
            Err(TwirlError::DimensionMismatch {
                expected: 2,
                found: 4
            })
        ));
    }

    #[test]
    fn cyclic_group_of_s() {
        // <S> = {I, S, Z, S^3}
        let elements = closure(gates::identity(2), vec![gates::phase_s()], |_| true, Matrix::clone)
            .unwrap();
        assert_eq!(4, elements.len());
        assert_eq!(gates::identity(2), elements[0]);
        assert_eq!(gates::phase_s(), elements[1]);
    }

    #[test]
    fn seed_appears_once_and_first() {
        let closure = GroupClosure::from_generators(vec![gates::pauli_x(), gates::pauli_z()])
            .unwrap()
            .build()
            .unwrap();
        let tol = Tolerance::default();
        let seeds = closure
            .elements()
            .iter()
            .filter(|m| tol.approx_eq(m, &gates::identity(2)))
            .count();
        assert_eq!(1, seeds);
        assert_eq!(gates::identity(2), closure.elements()[0]);
        // <X, Z> with phases is the dihedral group of order 8.
        assert_eq!(8, closure.len());
    }

    #[test]
    fn rejected_candidates_are_not_expanded() {
        // Reject S itself: only the seed survives.
        let s = gates::phase_s();
        let closure = GroupClosure::from_generators(vec![s.clone()])
            .unwrap()
            .accept_with(|m| m != &s)
            .build()
            .unwrap();
        assert_eq!(1, closure.len());
        assert_eq!(1, closure.stats().rejected);
    }

    #[test]
    fn memo_does_not_change_result() {
        // S·T is reached both as the generator S·T applied to I and as T
        // applied to S, so the second visit hits the memo.
        let s = gates::phase_s();
        let t = gates::phase_t();
        let generators = vec![s.clone(), t.clone(), &s * &t];
        let test = NormalizerTest::for_qubits(1, Tolerance::default()).unwrap();
        let run = |memoize_rejections| {
            GroupClosure::from_generators(generators.clone())
                .unwrap()
                .accept_with(|m| test.is_normalizer(m))
                .options(ClosureOptions {
                    memoize_rejections,
                    ..ClosureOptions::up_to_phase()
                })
                .build()
                .unwrap()
        };
        let with_memo = run(true);
        let without_memo = run(false);
        assert_eq!(with_memo.elements(), without_memo.elements());
        // I, S, Z and S^3 up to phase.
        assert_eq!(4, with_memo.len());
        assert!(with_memo.stats().memo_hits > 0);
        assert_eq!(0, without_memo.stats().memo_hits);
        assert!(without_memo.stats().rejected > with_memo.stats().rejected);
    }

    #[test]
    fn element_limit_stops_infinite_groups() {
        // Rotation by an irrational angle generates an infinite group.
        let closure = GroupClosure::from_generators(vec![gates::rx(1.0)])
            .unwrap()
            .options(ClosureOptions {
                max_elements: Some(50),
                ..Default::default()
            })
            .build();
        assert!(matches!(closure, Err(TwirlError::ElementLimit { limit: 50 })));
    }

    #[test]
    fn normalization_folds_phases() {
        // <iX> has order 4 exactly but order 2 modulo phase.
        let ix = gates::pauli_x() * c64(0.0, 1.0);
        let exact = GroupClosure::from_generators(vec![ix.clone()])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(4, exact.len());

        let folded = GroupClosure::from_generators(vec![ix])
            .unwrap()
            .normalization(Normalization::FirstEntry { atol: 1e-8 })
            .build()
            .unwrap();
        assert_eq!(2, folded.len());
    }

    #[test]
    fn stats_add_up() {
        let closure = GroupClosure::from_generators(vec![gates::pauli_x(), gates::pauli_y()])
            .unwrap()
            .build()
            .unwrap();
        let stats = closure.stats();
        assert_eq!(closure.len(), stats.accepted);
        assert_eq!(
            stats.candidates,
            stats.accepted + stats.duplicates + stats.rejected + stats.memo_hits
        );
        // Every accepted element enqueues one candidate per generator.
        assert_eq!(stats.candidates, 1 + 2 * stats.accepted);
    }
}
