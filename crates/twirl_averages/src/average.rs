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

//! Averages over finite ensembles.

use itertools::Itertools;
use log::debug;
use twirl_common::{Matrix, TwirlError, check_dims, conjugate, kron_all, square_dim};

/// The twirl `(1/|S|) Σ U M U†` of `m` over `ensemble`.
pub fn twirl(m: &Matrix, ensemble: &[Matrix]) -> Result<Matrix, TwirlError> {
    if ensemble.is_empty() {
        return Err(TwirlError::EmptyEnsemble);
    }
    let dim = square_dim(m)?;
    check_dims(dim, ensemble)?;
    debug!("Twirling a {dim}x{dim} operator over {} unitaries", ensemble.len());

    let sum = ensemble
        .iter()
        .fold(Matrix::zeros(dim, dim), |acc, u| acc + conjugate(u, m));
    Ok(sum.unscale(ensemble.len() as f64))
}

/// Twirl `m` over the `parties`-fold tensor power of `ensemble`, i.e. over
/// every tuple `U_1 ⊗ … ⊗ U_k` with each factor drawn from `ensemble`.
///
/// `m` must act on `parties` copies of the ensemble's space.
pub fn tensor_twirl(m: &Matrix, ensemble: &[Matrix], parties: usize) -> Result<Matrix, TwirlError> {
    if ensemble.is_empty() {
        return Err(TwirlError::EmptyEnsemble);
    }
    let local = square_dim(&ensemble[0])?;
    check_dims(local, ensemble)?;
    let expected = local.pow(parties as u32);
    check_dims(expected, [m])?;
    if parties == 0 {
        return Ok(m.clone());
    }
    debug!(
        "Twirling a {expected}x{expected} operator over {} product unitaries",
        ensemble.len().pow(parties as u32)
    );

    let mut count = 0usize;
    let sum = (0..parties)
        .map(|_| ensemble.iter())
        .multi_cartesian_product()
        .fold(Matrix::zeros(expected, expected), |acc, factors| {
            count += 1;
            acc + conjugate(&kron_all(factors), m)
        });
    Ok(sum.unscale(count as f64))
}

/// Arithmetic mean of `f` over `samples`.
pub fn scalar_average<T>(
    f: impl FnMut(T) -> f64,
    samples: impl IntoIterator<Item = T>,
) -> Result<f64, TwirlError> {
    let (count, total) = samples
        .into_iter()
        .map(f)
        .fold((0usize, 0.0), |(n, total), v| (n + 1, total + v));
    if count == 0 {
        return Err(TwirlError::EmptyEnsemble);
    }
    Ok(total / count as f64)
}
