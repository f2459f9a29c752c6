//! Model generation for the packing formulation.
//!
//! Turns a [`PackingInstance`] into a solver-ready [`Model`]: position and
//! geometry variables, linear boundary constraints, the quadratic area
//! link, and one quadratic non-overlap constraint per circle pair. The
//! pair constraints dominate model size at `n*(n-1)/2`.

use thiserror::Error;

use crate::model::{
    LinearConstraint, LinearTerm, Model, ModelError, QuadTerm, QuadraticConstraint, VarId,
    Variable,
};

use super::instance::{InstanceError, PackingInstance};

/// Errors aborting a model build.
///
/// A failed build drops the partial model; nothing is ever handed to a
/// solver unless every variable and constraint was accepted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulationError {
    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Variable handles of a generated packing model.
#[derive(Debug, Clone)]
pub struct PackingVars {
    /// Center x-coordinate per circle, in instance order.
    pub x: Vec<VarId>,
    /// Center y-coordinate per circle, in instance order.
    pub y: Vec<VarId>,
    /// Bounding rectangle width.
    pub width: VarId,
    /// Bounding rectangle height.
    pub height: VarId,
    /// Rectangle area; the sole objective variable.
    pub area: VarId,
}

/// A packing instance compiled into an NLP model.
#[derive(Debug, Clone)]
pub struct PackingModel {
    pub instance: PackingInstance,
    pub model: Model,
    pub vars: PackingVars,
}

/// Builds the packing NLP for an instance.
///
/// Variables: `x_<i>`, `y_<i>` in `[0, side_limit]` per circle, `w`, `h`
/// in `[0, side_limit]`, and `area` in `[LB, +inf)` (or up to the area
/// cutoff) carrying objective coefficient 1.0.
///
/// Constraints:
/// - `boundary_{left,right,bottom,top}_<i>`: keep each disk inside
///   `[0, w] x [0, h]`,
/// - `area_link`: `-area + w*h <= 0`, which together with minimization
///   pins `area` to `w*h` at optimality without an equality constraint,
/// - `no_overlap_<i>_<j>` for `i < j`: squared center distance at least
///   `(r_i + r_j - margin)^2`, expanded into pairwise products,
/// - optionally `symmetry_<i>_<j>`: `x_i <= x_j` for consecutive circles
///   of equal radius.
///
/// Identical parameters always produce a structurally identical model.
pub fn build_model(instance: &PackingInstance) -> Result<PackingModel, FormulationError> {
    instance.validate()?;

    let n = instance.circle_count();
    let side = instance.side_limit();
    let mut model = Model::new("circle_packing");

    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for circle in instance.circles() {
        x.push(model.add_variable(Variable::new(format!("x_{}", circle.id), 0.0, side))?);
        y.push(model.add_variable(Variable::new(format!("y_{}", circle.id), 0.0, side))?);
    }

    let width = model.add_variable(Variable::new("w", 0.0, side))?;
    let height = model.add_variable(Variable::new("h", 0.0, side))?;

    let lower_bound = instance.area_lower_bound();
    let area_upper = instance.area_cutoff().unwrap_or(f64::INFINITY);
    let area = model.add_variable(
        Variable::new("area", lower_bound, area_upper).with_objective(1.0),
    )?;

    for circle in instance.circles() {
        let (i, r) = (circle.id, circle.radius);
        model.add_linear(LinearConstraint::geq(
            format!("boundary_left_{i}"),
            vec![LinearTerm::new(x[i], 1.0)],
            r,
        ))?;
        // x_i + r <= w, posted as x_i - w <= -r
        model.add_linear(LinearConstraint::leq(
            format!("boundary_right_{i}"),
            vec![LinearTerm::new(x[i], 1.0), LinearTerm::new(width, -1.0)],
            -r,
        ))?;
        model.add_linear(LinearConstraint::geq(
            format!("boundary_bottom_{i}"),
            vec![LinearTerm::new(y[i], 1.0)],
            r,
        ))?;
        model.add_linear(LinearConstraint::leq(
            format!("boundary_top_{i}"),
            vec![LinearTerm::new(y[i], 1.0), LinearTerm::new(height, -1.0)],
            -r,
        ))?;
    }

    model.add_quadratic(QuadraticConstraint::leq(
        "area_link",
        vec![LinearTerm::new(area, -1.0)],
        vec![QuadTerm::new(width, height, 1.0)],
        0.0,
    ))?;

    let radii = instance.radii();
    for i in 0..n {
        for j in (i + 1)..n {
            let mut quadratic = Vec::with_capacity(6);
            quadratic.extend(QuadTerm::squared_difference(x[i], x[j]));
            quadratic.extend(QuadTerm::squared_difference(y[i], y[j]));
            // clamp: a margin above the radius sum must not re-introduce
            // a separation requirement
            let separation = (radii[i] + radii[j] - instance.margin()).max(0.0);
            model.add_quadratic(QuadraticConstraint::geq(
                format!("no_overlap_{i}_{j}"),
                vec![],
                quadratic,
                separation * separation,
            ))?;
        }
    }

    if instance.symmetry_breaking() {
        for group in instance.equal_radius_groups() {
            for pair in group.windows(2) {
                let (i, j) = (pair[0], pair[1]);
                model.add_linear(LinearConstraint::leq(
                    format!("symmetry_{i}_{j}"),
                    vec![LinearTerm::new(x[i], 1.0), LinearTerm::new(x[j], -1.0)],
                    0.0,
                ))?;
            }
        }
    }

    if let Some(ws) = instance.warm_start() {
        let mut hint = Vec::with_capacity(2 * n + 3);
        for (i, &(px, py)) in ws.positions.iter().enumerate() {
            hint.push((x[i], px));
            hint.push((y[i], py));
        }
        hint.push((width, ws.width));
        hint.push((height, ws.height));
        hint.push((area, (ws.width * ws.height).max(lower_bound)));
        model.set_warm_start(hint)?;
    }

    Ok(PackingModel {
        instance: instance.clone(),
        model,
        vars: PackingVars {
            x,
            y,
            width,
            height,
            area,
        },
    })
}
