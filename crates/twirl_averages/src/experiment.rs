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

//! The reports printed by `twirl_averages`.
//!
//! Each experiment produces a list of [`Report`] rows comparing an estimated
//! average with its exact value where one is known.

use std::f64::consts::PI;
use std::fmt;

use clap::ValueEnum;
use log::info;
use nalgebra::{Vector2, Vector3};
use rand::Rng;
use rand::distr::Distribution;
use serde::{Deserialize, Serialize};
use twirl_common::{Matrix, Tolerance, TwirlError, gates, real_part, square_dim};
use twirl_groups::{clifford_group, pauli_group};

use crate::design::{circular_design, cube, icosahedron, is_unitary_1_design, tetrahedron};
use crate::sampling::{Circle, Haar, Interval, Sphere, monte_carlo_average, monte_carlo_twirl};
use crate::states::{average_fidelity, basis_state, orbit, stabilizer_states};
use crate::{scalar_average, tensor_twirl, twirl};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experiment {
    /// Polynomial averages over the polyhedral spherical designs
    Spherical,
    /// A degree-8 average over polygons of increasing size
    Circular,
    /// The phase gate twirled by each unitary ensemble
    Twirl,
    /// CNOT twirled by the product of two single-qubit Clifford groups
    LocalTwirl,
    /// Frame-operator check of the unitary 1-design property
    OneDesign,
    /// Sampled averages on the interval, circle, sphere and unitary group
    MonteCarlo,
    /// Average fidelity of a miscalibrated X gate
    Fidelity,
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Spherical => "spherical",
            Self::Circular => "circular",
            Self::Twirl => "twirl",
            Self::LocalTwirl => "local-twirl",
            Self::OneDesign => "one-design",
            Self::MonteCarlo => "monte-carlo",
            Self::Fidelity => "fidelity",
        };
        write!(f, "{name}")
    }
}

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub experiment: String,
    pub ensemble: String,
    pub quantity: String,
    pub value: f64,
    pub exact: Option<f64>,
}

impl Report {
    fn new(
        experiment: Experiment,
        ensemble: impl Into<String>,
        quantity: impl Into<String>,
        value: f64,
        exact: Option<f64>,
    ) -> Self {
        Self {
            experiment: experiment.to_string(),
            ensemble: ensemble.into(),
            quantity: quantity.into(),
            value,
            exact,
        }
    }
}

/// The finite unitary ensembles the experiments draw from.
#[derive(Debug, Clone)]
pub struct Ensembles {
    pub pauli: Vec<Matrix>,
    pub clifford: Vec<Matrix>,
    /// A group loaded from a file, labelled by its name.
    pub extra: Option<(String, Vec<Matrix>)>,
}

impl Ensembles {
    /// The single-qubit Pauli and Clifford groups.
    pub fn standard() -> Result<Self, TwirlError> {
        Ok(Self {
            pauli: pauli_group(1)?,
            clifford: clifford_group(1)?,
            extra: None,
        })
    }

    pub fn with_extra(mut self, name: impl Into<String>, group: Vec<Matrix>) -> Self {
        self.extra = Some((name.into(), group));
        self
    }

    fn all(&self) -> Vec<(&str, &[Matrix])> {
        let mut all: Vec<(&str, &[Matrix])> =
            vec![("pauli", self.pauli.as_slice()), ("clifford", self.clifford.as_slice())];
        if let Some((name, group)) = &self.extra {
            all.push((name.as_str(), group.as_slice()));
        }
        all
    }
}

/// Average fidelity of `rx(π + angle)` standing in for X over a state
/// 2-design.
pub fn miscalibrated_x_fidelity(angle: f64) -> f64 {
    let half = angle / 2.0;
    half.cos().powi(2) + half.sin().powi(2) / 3.0
}

/// Run `experiment`, drawing `samples` points for the sampled ensembles.
pub fn run<R: Rng + ?Sized>(
    experiment: Experiment,
    ensembles: &Ensembles,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<Report>, TwirlError> {
    info!("Running the {experiment} experiment");
    match experiment {
        Experiment::Spherical => spherical(),
        Experiment::Circular => circular(),
        Experiment::Twirl => twirl_phase_gate(ensembles, samples, rng),
        Experiment::LocalTwirl => local_twirl(ensembles),
        Experiment::OneDesign => one_design(ensembles),
        Experiment::MonteCarlo => monte_carlo(samples, rng),
        Experiment::Fidelity => fidelity(ensembles, samples, rng),
    }
}

fn spherical() -> Result<Vec<Report>, TwirlError> {
    type Observable = fn(Vector3<f64>) -> f64;
    let observables: [(&str, Observable, f64); 2] = [
        ("x^2+xz+yz+z^2", |p: Vector3<f64>| p.x * p.x + p.x * p.z + p.y * p.z + p.z * p.z, 2.0 / 3.0),
        ("x^4", |p: Vector3<f64>| p.x.powi(4), 1.0 / 5.0),
    ];
    let designs = [
        ("tetrahedron", tetrahedron()),
        ("cube", cube()),
        ("icosahedron", icosahedron()),
    ];

    let mut reports = Vec::new();
    for (quantity, f, exact) in observables {
        for (name, points) in &designs {
            let value = scalar_average(f, points.iter().copied())?;
            reports.push(Report::new(Experiment::Spherical, *name, quantity, value, Some(exact)));
        }
    }
    Ok(reports)
}

fn circular() -> Result<Vec<Report>, TwirlError> {
    let f = |p: Vector2<f64>| p.x.powi(8) + p.x.powi(5) * p.y.powi(3) + p.x * p.y.powi(7);
    (2..=14)
        .map(|t| {
            let points = circular_design(t);
            let name = format!("polygon({})", points.len());
            let value = scalar_average(f, points)?;
            Ok(Report::new(
                Experiment::Circular,
                name,
                "x^8+x^5y^3+xy^7",
                value,
                Some(35.0 / 128.0),
            ))
        })
        .collect()
}

/// One row per real and imaginary part of each entry of `m`.
fn entry_reports(experiment: Experiment, ensemble: &str, m: &Matrix, exact: &Matrix) -> Vec<Report> {
    let mut reports = Vec::with_capacity(2 * m.len());
    for i in 0..m.nrows() {
        for j in 0..m.ncols() {
            let (v, e) = (m[(i, j)], exact[(i, j)]);
            reports.push(Report::new(experiment, ensemble, format!("re({i},{j})"), v.re, Some(e.re)));
            reports.push(Report::new(experiment, ensemble, format!("im({i},{j})"), v.im, Some(e.im)));
        }
    }
    reports
}

/// `tr(m)/d · I`, the twirl of `m` over any unitary 1-design.
fn depolarized(m: &Matrix) -> Result<Matrix, TwirlError> {
    let dim = square_dim(m)?;
    Ok(Matrix::identity(dim, dim) * (m.trace() / dim as f64))
}

fn twirl_phase_gate<R: Rng + ?Sized>(
    ensembles: &Ensembles,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<Report>, TwirlError> {
    let mut reports = Vec::new();
    for (name, group) in ensembles.all() {
        let Some(first) = group.first() else {
            return Err(TwirlError::EmptyEnsemble);
        };
        let n_qubits = square_dim(first)?.trailing_zeros() as usize;
        let m = gates::on_qubit(&gates::phase_s(), 0, n_qubits)?;
        let t = twirl(&m, group)?;
        reports.extend(entry_reports(Experiment::Twirl, name, &t, &depolarized(&m)?));
    }
    let s = gates::phase_s();
    let t = monte_carlo_twirl(&s, &Haar::new(2)?, samples, rng)?;
    reports.extend(entry_reports(Experiment::Twirl, "haar", &t, &depolarized(&s)?));
    Ok(reports)
}

fn local_twirl(ensembles: &Ensembles) -> Result<Vec<Report>, TwirlError> {
    let cnot = gates::cnot();
    let t = real_part(&tensor_twirl(&cnot, &ensembles.clifford, 2)?);
    let exact = real_part(&depolarized(&cnot)?);
    let mut reports = Vec::with_capacity(t.len());
    for i in 0..t.nrows() {
        for j in 0..t.ncols() {
            reports.push(Report::new(
                Experiment::LocalTwirl,
                "clifford x clifford",
                format!("re({i},{j})"),
                t[(i, j)],
                Some(exact[(i, j)]),
            ));
        }
    }
    Ok(reports)
}

fn one_design(ensembles: &Ensembles) -> Result<Vec<Report>, TwirlError> {
    let tolerance = Tolerance::default();
    let not_a_design = [gates::identity(2), gates::pauli_z()];
    let mut candidates: Vec<(&str, &[Matrix], f64)> = ensembles
        .all()
        .into_iter()
        .map(|(name, group)| (name, group, 1.0))
        .collect();
    candidates.push(("{I,Z}", &not_a_design[..], 0.0));

    candidates
        .into_iter()
        .map(|(name, group, exact)| {
            let value = if is_unitary_1_design(group, tolerance)? { 1.0 } else { 0.0 };
            Ok(Report::new(Experiment::OneDesign, name, "is_unitary_1_design", value, Some(exact)))
        })
        .collect()
}

fn monte_carlo<R: Rng + ?Sized>(samples: usize, rng: &mut R) -> Result<Vec<Report>, TwirlError> {
    let interval = Interval::new(-1.0, 1.0)?;
    let line = monte_carlo_average(|x: f64| 4.0 - x * x, &interval, samples, rng)?;
    let circle = monte_carlo_average(|p: Vector2<f64>| p.x * p.x, &Circle, samples, rng)?;
    let sphere = monte_carlo_average(|p: Vector3<f64>| p.x.powi(4), &Sphere, samples, rng)?;
    Ok(vec![
        Report::new(Experiment::MonteCarlo, "interval[-1,1)", "4-x^2", line, Some(11.0 / 3.0)),
        Report::new(Experiment::MonteCarlo, "circle", "x^2", circle, Some(0.5)),
        Report::new(Experiment::MonteCarlo, "sphere", "x^4", sphere, Some(0.2)),
    ])
}

fn fidelity<R: Rng + ?Sized>(
    ensembles: &Ensembles,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<Report>, TwirlError> {
    let x = gates::pauli_x();
    let zero = basis_state(2, 0)?;
    let stabilizers = stabilizer_states();
    let pauli_orbit = orbit(&ensembles.pauli, &zero);
    let haar = Haar::new(2)?;

    let mut reports = Vec::new();
    for angle in [0.0, PI / 2.0, PI] {
        let actual = gates::rx(PI + angle);
        let quantity = format!("angle={angle:.4}");
        let exact = miscalibrated_x_fidelity(angle);

        let value = average_fidelity(&x, &actual, &stabilizers)?;
        reports.push(Report::new(Experiment::Fidelity, "stabilizer states", &quantity, value, Some(exact)));

        let value = average_fidelity(&x, &actual, &pauli_orbit)?;
        let orbit_exact = (angle / 2.0).cos().powi(2);
        reports.push(Report::new(Experiment::Fidelity, "pauli orbit", &quantity, value, Some(orbit_exact)));

        let mut per_sample = Vec::with_capacity(samples);
        for _ in 0..samples {
            let u = haar.sample(rng);
            per_sample.push(average_fidelity(&x, &actual, &[&u * &zero])?);
        }
        let value = scalar_average(|f| f, per_sample)?;
        reports.push(Report::new(Experiment::Fidelity, "haar", &quantity, value, Some(exact)));
    }
    Ok(reports)
}
