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

//! Averages of operators and observables over ensembles: finite groups,
//! point designs, state designs and sampled distributions.

pub mod average;
pub mod design;
pub mod experiment;
pub mod sampling;
pub mod states;

pub use average::{scalar_average, tensor_twirl, twirl};
pub use design::{frame_operator, is_unitary_1_design};
pub use experiment::{Ensembles, Experiment, Report};
pub use sampling::{Circle, Haar, Interval, Sphere, monte_carlo_average, monte_carlo_twirl};
pub use states::{State, average_fidelity, state_fidelity, stabilizer_states};
