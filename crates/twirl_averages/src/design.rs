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

//! Unitary and spherical designs.
//!
//! A finite ensemble is a t-design when its average reproduces the uniform
//! average of every polynomial observable up to degree t. For unitaries the
//! 1-design condition is checked through the frame operator; the point
//! designs are averaged with [`scalar_average`](crate::scalar_average).

use std::f64::consts::PI;

use nalgebra::{Vector2, Vector3};
use twirl_common::{Matrix, Permutation, Tolerance, TwirlError, check_dims, permutation, square_dim};

/// The frame operator `(1/|S|) Σ U ⊗ U†`.
pub fn frame_operator(ensemble: &[Matrix]) -> Result<Matrix, TwirlError> {
    let first = ensemble.first().ok_or(TwirlError::EmptyEnsemble)?;
    let dim = square_dim(first)?;
    check_dims(dim, ensemble)?;
    let sum = ensemble.iter().fold(Matrix::zeros(dim * dim, dim * dim), |acc, u| {
        acc + u.kronecker(&u.adjoint())
    });
    Ok(sum.unscale(ensemble.len() as f64))
}

/// Whether `ensemble` is a unitary 1-design: its frame operator equals the
/// SWAP of two copies of the space divided by the dimension.
pub fn is_unitary_1_design(ensemble: &[Matrix], tolerance: Tolerance) -> Result<bool, TwirlError> {
    let frame = frame_operator(ensemble)?;
    let dim = square_dim(&ensemble[0])?;
    let swap = swap(dim)?;
    Ok(tolerance.approx_eq(&frame, &swap.unscale(dim as f64)))
}

fn swap(dim: usize) -> Result<Matrix, TwirlError> {
    if dim > 1 && dim.is_power_of_two() {
        // Exchange the first n qubits with the last n.
        let n = dim.trailing_zeros() as usize;
        let order: Vec<usize> = (n + 1..=2 * n).chain(1..=n).collect();
        Permutation::new(2 * n)?.permutation_matrix(&order)
    } else {
        Ok(permutation::swap_operator(dim))
    }
}

fn normalized(points: Vec<Vector3<f64>>) -> Vec<Vector3<f64>> {
    points.into_iter().map(|p| p.normalize()).collect()
}

/// Vertices of the regular tetrahedron on the unit sphere, a spherical
/// 2-design.
pub fn tetrahedron() -> Vec<Vector3<f64>> {
    let h = 1.0 / 2f64.sqrt();
    normalized(vec![
        Vector3::new(1.0, 0.0, -h),
        Vector3::new(-1.0, 0.0, -h),
        Vector3::new(0.0, 1.0, h),
        Vector3::new(0.0, -1.0, h),
    ])
}

/// Vertices of the cube on the unit sphere, a spherical 3-design.
pub fn cube() -> Vec<Vector3<f64>> {
    let signs = [-1.0, 1.0];
    let mut points = Vec::with_capacity(8);
    for x in signs {
        for y in signs {
            for z in signs {
                points.push(Vector3::new(x, y, z));
            }
        }
    }
    normalized(points)
}

/// Vertices of the icosahedron on the unit sphere, a spherical 5-design.
pub fn icosahedron() -> Vec<Vector3<f64>> {
    let g = (1.0 + 5f64.sqrt()) / 2.0;
    let mut points = Vec::with_capacity(12);
    for a in [1.0, -1.0] {
        for b in [g, -g] {
            // Cyclic permutations of (0, ±1, ±g).
            points.push(Vector3::new(0.0, a, b));
            points.push(Vector3::new(a, b, 0.0));
            points.push(Vector3::new(b, 0.0, a));
        }
    }
    normalized(points)
}

/// Vertices of the regular polygon with `sides` corners on the unit circle,
/// starting at `(1, 0)`. The polygon is a circular `(sides - 1)`-design.
pub fn polygon(sides: usize) -> Vec<Vector2<f64>> {
    let step = 2.0 * PI / sides as f64;
    (0..sides)
        .map(|k| {
            let angle = k as f64 * step;
            Vector2::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// The polygon that is a circular `t`-design.
pub fn circular_design(t: usize) -> Vec<Vector2<f64>> {
    polygon(t + 1)
}

#[cfg(test)]
mod tests {
    use twirl_common::gates;
    use twirl_groups::{clifford_group, pauli_group};

    use super::*;
    use crate::scalar_average;

    const EPS: f64 = 1e-12;

    fn quartic(p: Vector3<f64>) -> f64 {
        p.x.powi(4)
    }

    fn quadratic(p: Vector3<f64>) -> f64 {
        p.x * p.x + p.x * p.z + p.y * p.z + p.z * p.z
    }

    #[test]
    fn points_are_on_the_unit_sphere() {
        for p in tetrahedron().iter().chain(&cube()).chain(&icosahedron()) {
            assert!((p.norm() - 1.0).abs() < EPS);
        }
        assert_eq!(4, tetrahedron().len());
        assert_eq!(8, cube().len());
        assert_eq!(12, icosahedron().len());
    }

    #[test]
    fn quadratic_average_agrees_on_all_designs() {
        for points in [tetrahedron(), cube(), icosahedron()] {
            let avg = scalar_average(quadratic, points).unwrap();
            assert!((avg - 2.0 / 3.0).abs() < EPS, "{avg}");
        }
    }

    #[test]
    fn only_the_icosahedron_averages_quartics() {
        let tetra = scalar_average(quartic, tetrahedron()).unwrap();
        let cube = scalar_average(quartic, cube()).unwrap();
        let icosa = scalar_average(quartic, icosahedron()).unwrap();
        assert!((tetra - 2.0 / 9.0).abs() < EPS);
        assert!((cube - 1.0 / 9.0).abs() < EPS);
        assert!((tetra - 0.2).abs() > 1e-3);
        assert!((cube - 0.2).abs() > 1e-3);
        assert!((icosa - 0.2).abs() < EPS, "{icosa}");
    }

    #[test]
    fn triangle_averages_x_squared() {
        let avg = scalar_average(|p: Vector2<f64>| p.x * p.x, polygon(3)).unwrap();
        assert!((avg - 0.5).abs() < EPS);
    }

    #[test]
    fn polygon_degree_threshold() {
        // The circle average of x^8 is 35/128; odd terms vanish.
        let f = |p: Vector2<f64>| p.x.powi(8) + p.x.powi(5) * p.y.powi(3) + p.x * p.y.powi(7);
        let exact = 35.0 / 128.0;
        let below = scalar_average(f, circular_design(7)).unwrap();
        let at = scalar_average(f, circular_design(8)).unwrap();
        assert!((below - exact).abs() > 1e-3);
        assert!((at - exact).abs() < EPS, "{at}");
    }

    #[test]
    fn qubit_swap_matches_swap_operator() {
        for dim in [2, 4] {
            assert_eq!(permutation::swap_operator(dim), swap(dim).unwrap());
        }
    }

    #[test]
    fn pauli_and_clifford_groups_are_1_designs() {
        let tol = Tolerance::default();
        assert!(is_unitary_1_design(&pauli_group(1).unwrap(), tol).unwrap());
        assert!(is_unitary_1_design(&clifford_group(1).unwrap(), tol).unwrap());
        assert!(is_unitary_1_design(&pauli_group(2).unwrap(), tol).unwrap());
    }

    #[test]
    fn identity_and_z_are_not_a_1_design() {
        let ensemble = [gates::identity(2), gates::pauli_z()];
        assert!(!is_unitary_1_design(&ensemble, Tolerance::default()).unwrap());
    }

    #[test]
    fn frame_operator_of_empty_ensemble_fails() {
        assert_eq!(Err(TwirlError::EmptyEnsemble), frame_operator(&[]));
    }
}
