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

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use twirl_common::{Equivalence, Matrix, Tolerance};

/// Bucket keys one member may occupy before it moves to the overflow list,
/// which every lookup scans.
const MAX_KEYS: usize = 64;

/// How a [`MatrixSet`] finds existing members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lookup {
    /// Compare against every member.
    #[default]
    Linear,
    /// Bucket members on a grid of cells no finer than `10^-decimals` and
    /// compare only within the candidate's cell. Cells are widened to stay
    /// well above the tolerance.
    Hashed { decimals: i32 },
}

/// An ordered collection of matrices, pairwise distinct under an
/// [`Equivalence`] at a given [`Tolerance`].
///
/// A hashed set registers each member under every cell its tolerance
/// neighbourhood touches, so a candidate finds all members it could be
/// equivalent to through its own cell.
#[derive(Debug, Clone)]
pub struct MatrixSet {
    elements: Vec<Matrix>,
    buckets: HashMap<Vec<i64>, Vec<usize>>,
    overflow: Vec<usize>,
    cell: f64,
    equivalence: Equivalence,
    tolerance: Tolerance,
    lookup: Lookup,
}

impl MatrixSet {
    pub fn new(equivalence: Equivalence, tolerance: Tolerance, lookup: Lookup) -> Self {
        let cell = match lookup {
            Lookup::Linear => 0.0,
            Lookup::Hashed { decimals } => {
                let finest = 10f64.powi(-decimals).max(16.0 * (tolerance.atol + tolerance.rtol));
                // Power-of-two cells centre dyadic entries such as 0, 1/2 and 1.
                2f64.powi(finest.log2().ceil() as i32)
            }
        };
        Self {
            elements: Vec::new(),
            buckets: HashMap::new(),
            overflow: Vec::new(),
            cell,
            equivalence,
            tolerance,
            lookup,
        }
    }

    pub fn contains(&self, m: &Matrix) -> bool {
        self.position(m).is_some()
    }

    /// Index of the earliest member equivalent to `m`, if any.
    pub fn position(&self, m: &Matrix) -> Option<usize> {
        match self.lookup {
            Lookup::Linear => self.elements.iter().position(|e| self.same(m, e)),
            Lookup::Hashed { .. } => self
                .buckets
                .get(&self.key(m))
                .into_iter()
                .flatten()
                .chain(&self.overflow)
                .copied()
                .filter(|&i| self.same(m, &self.elements[i]))
                .min(),
        }
    }

    /// Insert `m` unless an equivalent member exists. Returns whether it was
    /// inserted.
    pub fn insert(&mut self, m: Matrix) -> bool {
        if self.contains(&m) {
            return false;
        }
        if let Lookup::Hashed { .. } = self.lookup {
            let index = self.elements.len();
            match self.keys_around(&m) {
                Some(keys) => {
                    for key in keys {
                        self.buckets.entry(key).or_default().push(index);
                    }
                }
                None => self.overflow.push(index),
            }
        }
        self.elements.push(m);
        true
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matrix> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Matrix] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<Matrix> {
        self.elements
    }

    fn same(&self, candidate: &Matrix, member: &Matrix) -> bool {
        self.equivalence.equivalent(&self.tolerance, candidate, member)
    }

    /// Hashed coordinates of `m`, each paired with the modulus of the entry
    /// it comes from. Moduli are phase invariant, so they key phase classes.
    fn coordinates(&self, m: &Matrix) -> Vec<(f64, f64)> {
        match self.equivalence {
            Equivalence::UpToPhase => m.iter().map(|v| (v.norm(), v.norm())).collect(),
            Equivalence::Exact => m
                .iter()
                .flat_map(|v| [(v.re, v.norm()), (v.im, v.norm())])
                .collect(),
        }
    }

    fn key(&self, m: &Matrix) -> Vec<i64> {
        self.coordinates(m)
            .into_iter()
            .map(|(x, _)| (x / self.cell).round() as i64)
            .collect()
    }

    /// Every cell a candidate within tolerance of member `m` can fall in,
    /// or `None` when there are more than [`MAX_KEYS`].
    fn keys_around(&self, m: &Matrix) -> Option<Vec<Vec<i64>>> {
        let mut keys = vec![Vec::new()];
        for (x, size) in self.coordinates(m) {
            // |candidate - member| <= atol + rtol * |member| per entry.
            let slack = self.tolerance.atol + self.tolerance.rtol * size;
            let low = ((x - slack) / self.cell).round() as i64;
            let high = ((x + slack) / self.cell).round() as i64;
            let span = (high - low + 1).max(1) as usize;
            if keys.len() * span > MAX_KEYS {
                return None;
            }
            keys = keys
                .into_iter()
                .flat_map(|key| {
                    (low..=high).map(move |c| {
                        let mut key = key.clone();
                        key.push(c);
                        key
                    })
                })
                .collect();
        }
        Some(keys)
    }
}
