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

use crate::{Matrix, TwirlError, c64};

/// Serializable row-major form of a [`Matrix`]; each entry is `[re, im]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRecord {
    pub rows: Vec<Vec<[f64; 2]>>,
}

impl From<&Matrix> for MatrixRecord {
    fn from(m: &Matrix) -> Self {
        let rows = m
            .row_iter()
            .map(|row| row.iter().map(|v| [v.re, v.im]).collect())
            .collect();
        Self { rows }
    }
}

impl TryFrom<&MatrixRecord> for Matrix {
    type Error = TwirlError;

    fn try_from(record: &MatrixRecord) -> Result<Self, Self::Error> {
        let dim = record.rows.len();
        if let Some(row) = record.rows.iter().find(|row| row.len() != dim) {
            return Err(TwirlError::NotSquare {
                rows: dim,
                cols: row.len(),
            });
        }
        let entries: Vec<_> = record
            .rows
            .iter()
            .flatten()
            .map(|[re, im]| c64(*re, *im))
            .collect();
        Ok(Matrix::from_row_slice(dim, dim, &entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates;

    #[test]
    fn record_is_row_major() {
        let record = MatrixRecord::from(&gates::pauli_y());
        assert_eq!(
            vec![vec![[0.0, 0.0], [0.0, -1.0]], vec![[0.0, 1.0], [0.0, 0.0]]],
            record.rows
        );
        assert_eq!(gates::pauli_y(), Matrix::try_from(&record).unwrap());
    }

    #[test]
    fn ragged_records_are_rejected() {
        let record = MatrixRecord {
            rows: vec![vec![[1.0, 0.0]], vec![[0.0, 0.0], [1.0, 0.0]]],
        };
        assert!(matches!(
            Matrix::try_from(&record),
            Err(TwirlError::NotSquare { .. })
        ));
    }

    #[test]
    fn json_layout() {
        let record = MatrixRecord::from(&gates::pauli_z());
        let text = serde_json::to_string(&record).unwrap();
        assert_eq!(r#"{"rows":[[[1.0,0.0],[0.0,0.0]],[[0.0,0.0],[-1.0,0.0]]]}"#, text);
    }
}
