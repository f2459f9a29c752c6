//! Circle packing model generation.
//!
//! Builds a nonconvex nonlinear program for the fixed-radius circle
//! packing problem: given circles with prescribed radii, find planar
//! positions minimizing the area of the smallest axis-aligned bounding
//! rectangle that contains all circles without overlap.
//!
//! - **model**: solver-agnostic NLP containers — continuous variables,
//!   linear and quadratic constraints with range senses, and the owning
//!   [`Model`](model::Model).
//! - **packing**: the packing formulation — instance parameters, the
//!   disk-area lower bound, constraint generation, a shelf-layout warm
//!   start, and solution reporting.
//! - **solver**: the [`NlpSolver`](solver::NlpSolver) capability
//!   interface plus a small perturbation-descent solver for testing.
//!
//! # Architecture
//!
//! This crate is the modeling layer only. The nonconvex search itself
//! (branch-and-bound, relaxations, cutting planes) belongs to whatever
//! engine implements [`NlpSolver`](solver::NlpSolver); the core builds
//! models, hands them over, and interprets solutions back into geometry.
//!
//! # Examples
//!
//! ```
//! use u_circlepack::packing::{build_model, shelf_layout, PackingInstance, PackingReport};
//! use u_circlepack::solver::{NlpSolver, SimpleNlpSolver, SolverConfig};
//!
//! let instance = PackingInstance::new(vec![5.0, 5.0, 3.0]).with_side_limit(40.0);
//! let instance = match shelf_layout(&instance) {
//!     Some(layout) => instance.with_warm_start(layout),
//!     None => instance,
//! };
//! let packed = build_model(&instance).expect("valid instance");
//!
//! let config = SolverConfig::default().with_seed(42);
//! let result = SimpleNlpSolver::new().solve(&packed.model, &config);
//! let report = PackingReport::from_solution(&packed, &result);
//! println!("{report}");
//! ```

pub mod model;
pub mod packing;
pub mod solver;
