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

//! Shared definitions for the twirl crates: the complex [`Matrix`] type,
//! standard gates, approximate equality and global-phase handling.

use nalgebra::{Complex, DMatrix};

pub mod error;
pub mod gates;
pub mod permutation;
pub mod phase;
pub mod record;
pub mod tolerance;

pub use error::TwirlError;
pub use permutation::Permutation;
pub use phase::Normalization;
pub use record::MatrixRecord;
pub use tolerance::{Equivalence, Tolerance};

/// Complex scalar used throughout.
pub type C64 = Complex<f64>;

/// Dense complex square matrix. Treated as an immutable value once built.
pub type Matrix = DMatrix<C64>;

/// Shorthand for building a complex scalar.
pub const fn c64(re: f64, im: f64) -> C64 {
    Complex::new(re, im)
}

/// Check that `m` is square and return its dimension.
pub fn square_dim(m: &Matrix) -> Result<usize, TwirlError> {
    let (rows, cols) = m.shape();
    if rows != cols {
        return Err(TwirlError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Check that every matrix in `ms` is square of dimension `dim`.
pub fn check_dims<'a>(
    dim: usize,
    ms: impl IntoIterator<Item = &'a Matrix>,
) -> Result<(), TwirlError> {
    for m in ms {
        let found = square_dim(m)?;
        if found != dim {
            return Err(TwirlError::DimensionMismatch {
                expected: dim,
                found,
            });
        }
    }
    Ok(())
}

/// The conjugation `u m u†`.
pub fn conjugate(u: &Matrix, m: &Matrix) -> Matrix {
    u * m * u.adjoint()
}

/// Kronecker product of a sequence of matrices, left to right.
/// The empty product is the 1x1 identity.
pub fn kron_all<'a>(ms: impl IntoIterator<Item = &'a Matrix>) -> Matrix {
    ms.into_iter()
        .fold(Matrix::identity(1, 1), |acc, m| acc.kronecker(m))
}

/// Discard residual imaginary parts, e.g. after averaging a matrix that is
/// known to be real.
pub fn real_part(m: &Matrix) -> DMatrix<f64> {
    m.map(|v| v.re)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_dim_rejects_rectangular() {
        let m = Matrix::zeros(2, 3);
        assert_eq!(
            Err(TwirlError::NotSquare { rows: 2, cols: 3 }),
            square_dim(&m)
        );
    }

    #[test]
    fn check_dims_reports_first_mismatch() {
        let ms = [Matrix::identity(2, 2), Matrix::identity(4, 4)];
        assert_eq!(
            Err(TwirlError::DimensionMismatch {
                expected: 2,
                found: 4
            }),
            check_dims(2, &ms)
        );
        assert!(check_dims(2, &ms[..1]).is_ok());
    }

    #[test]
    fn kron_all_of_identities() {
        let id = Matrix::identity(2, 2);
        assert_eq!(Matrix::identity(8, 8), kron_all([&id, &id, &id]));
        assert_eq!(Matrix::identity(1, 1), kron_all(Vec::<&Matrix>::new()));
    }

    #[test]
    fn real_part_drops_imaginary() {
        let m = Matrix::from_row_slice(1, 2, &[c64(1.0, 1e-17), c64(-2.0, -3.0)]);
        assert_eq!(DMatrix::from_row_slice(1, 2, &[1.0, -2.0]), real_part(&m));
    }
}
