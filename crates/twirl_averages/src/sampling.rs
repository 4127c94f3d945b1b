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

//! Continuous ensembles and Monte-Carlo averages over them.
//!
//! Every sampler implements [`rand::distr::Distribution`], so the averages
//! below accept any distribution and any caller-provided generator.

use log::debug;
use nalgebra::{Vector2, Vector3};
use rand::Rng;
use rand::distr::{Distribution, Uniform};
use rand_distr::{StandardNormal, UnitCircle, UnitSphere};
use twirl_common::{Matrix, TwirlError, c64, check_dims, conjugate, kron_all, square_dim};

use crate::average::scalar_average;

/// Uniform samples from the half-open interval between two endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    uniform: Uniform<f64>,
}

impl Interval {
    /// Endpoints may be given in either order but must differ.
    pub fn new(a: f64, b: f64) -> Result<Self, TwirlError> {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let uniform = Uniform::new(low, high).map_err(|_| TwirlError::InvalidInterval { a, b })?;
        Ok(Self { uniform })
    }
}

impl Distribution<f64> for Interval {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.uniform.sample(rng)
    }
}

/// Uniform points on the unit circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Circle;

impl Distribution<Vector2<f64>> for Circle {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2<f64> {
        let [x, y]: [f64; 2] = UnitCircle.sample(rng);
        Vector2::new(x, y)
    }
}

/// Uniform points on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sphere;

impl Distribution<Vector3<f64>> for Sphere {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        let [x, y, z]: [f64; 3] = UnitSphere.sample(rng);
        Vector3::new(x, y, z)
    }
}

/// Haar-random unitaries of a fixed dimension.
///
/// Samples a complex Ginibre matrix, takes its QR decomposition and fixes
/// the phases of `Q`'s columns with the phases of `R`'s diagonal, which
/// makes the distribution of `Q` invariant under left and right
/// multiplication by unitaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Haar {
    dim: usize,
}

impl Haar {
    pub fn new(dim: usize) -> Result<Self, TwirlError> {
        if dim < 1 {
            return Err(TwirlError::InvalidDimension(dim));
        }
        Ok(Self { dim })
    }

    pub fn for_qubits(n_qubits: usize) -> Result<Self, TwirlError> {
        if n_qubits < 1 {
            return Err(TwirlError::InvalidQubitCount(n_qubits));
        }
        Self::new(1 << n_qubits)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl Distribution<Matrix> for Haar {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix {
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        let ginibre = Matrix::from_fn(self.dim, self.dim, |_, _| {
            let re: f64 = StandardNormal.sample(rng);
            let im: f64 = StandardNormal.sample(rng);
            c64(re * scale, im * scale)
        });
        let (mut q, r) = ginibre.qr().unpack();
        for (j, mut column) in q.column_iter_mut().enumerate() {
            let d = r[(j, j)];
            let norm = d.norm();
            if norm > 0.0 {
                column *= d / norm;
            }
        }
        q
    }
}

/// Mean of `f` over `n_samples` draws from `distribution`.
pub fn monte_carlo_average<T, D, R>(
    f: impl FnMut(T) -> f64,
    distribution: &D,
    n_samples: usize,
    rng: &mut R,
) -> Result<f64, TwirlError>
where
    D: Distribution<T>,
    R: Rng + ?Sized,
{
    debug!("Monte-Carlo average over {n_samples} samples");
    scalar_average(f, (0..n_samples).map(|_| distribution.sample(rng)))
}

/// Estimate of the twirl of `m` from `n_samples` unitaries drawn from
/// `distribution`.
pub fn monte_carlo_twirl<D, R>(
    m: &Matrix,
    distribution: &D,
    n_samples: usize,
    rng: &mut R,
) -> Result<Matrix, TwirlError>
where
    D: Distribution<Matrix>,
    R: Rng + ?Sized,
{
    monte_carlo_tensor_twirl(m, distribution, 1, n_samples, rng)
}

/// Estimate of the twirl of `m` over `parties` independent copies of
/// `distribution`: each sample is a product `U_1 ⊗ … ⊗ U_k` of fresh draws.
pub fn monte_carlo_tensor_twirl<D, R>(
    m: &Matrix,
    distribution: &D,
    parties: usize,
    n_samples: usize,
    rng: &mut R,
) -> Result<Matrix, TwirlError>
where
    D: Distribution<Matrix>,
    R: Rng + ?Sized,
{
    if n_samples == 0 {
        return Err(TwirlError::EmptyEnsemble);
    }
    let dim = square_dim(m)?;
    debug!("Monte-Carlo twirl of a {dim}x{dim} operator over {n_samples} samples");

    let mut sum = Matrix::zeros(dim, dim);
    for _ in 0..n_samples {
        let factors: Vec<Matrix> = (0..parties).map(|_| distribution.sample(rng)).collect();
        let u = kron_all(&factors);
        check_dims(dim, [&u])?;
        sum += conjugate(&u, m);
    }
    Ok(sum.unscale(n_samples as f64))
}
