//! Solution reporting.

use std::fmt;

use crate::solver::{SolveResult, SolveStatus};

use super::formulation::PackingModel;

/// Final placement of one circle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Read-only rendering of a solve outcome for a packing model.
///
/// Values are extracted only when the status carries a solution; for
/// infeasible or unknown outcomes the report renders
/// `No feasible solution found` instead of meaningless numbers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackingReport {
    status: SolveStatus,
    objective: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    placements: Vec<Placement>,
}

impl PackingReport {
    /// Extracts the packing geometry from a solve result.
    pub fn from_solution(packed: &PackingModel, result: &SolveResult) -> Self {
        let mut report = Self {
            status: result.status,
            objective: None,
            width: None,
            height: None,
            placements: Vec::new(),
        };
        if !result.is_solution_found() {
            return report;
        }

        report.objective = result.value(packed.vars.area);
        report.width = result.value(packed.vars.width);
        report.height = result.value(packed.vars.height);
        for circle in packed.instance.circles() {
            let (Some(x), Some(y)) = (
                result.value(packed.vars.x[circle.id]),
                result.value(packed.vars.y[circle.id]),
            ) else {
                // incomplete assignment: render as not found
                report.objective = None;
                report.placements.clear();
                return report;
            };
            report.placements.push(Placement {
                index: circle.id,
                x,
                y,
                radius: circle.radius,
            });
        }
        report
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    /// Area of the bounding rectangle, when a solution was found.
    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn height(&self) -> Option<f64> {
        self.height
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

impl fmt::Display for PackingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.objective, self.width, self.height) {
            (Some(area), Some(w), Some(h)) => {
                writeln!(f, "Best objective (area) = {area}")?;
                writeln!(f, "w = {w}, h = {h}")?;
                for p in &self.placements {
                    writeln!(f, "circle {}: x={} y={} r={}", p.index, p.x, p.y, p.radius)?;
                }
                Ok(())
            }
            _ => writeln!(f, "No feasible solution found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::{build_model, shelf_layout, PackingInstance};
    use crate::solver::{NlpSolver, SimpleNlpSolver, SolverConfig};

    fn canned_result(packed: &PackingModel, positions: &[(f64, f64)], w: f64, h: f64) -> SolveResult {
        let mut values = vec![0.0; packed.model.variable_count()];
        for (i, &(x, y)) in positions.iter().enumerate() {
            values[packed.vars.x[i].index()] = x;
            values[packed.vars.y[i].index()] = y;
        }
        values[packed.vars.width.index()] = w;
        values[packed.vars.height.index()] = h;
        values[packed.vars.area.index()] = w * h;
        SolveResult {
            status: SolveStatus::Feasible,
            objective_value: Some(w * h),
            values,
            solve_time_ms: 1,
            iterations: 1,
        }
    }

    #[test]
    fn test_report_extracts_geometry() {
        let packed = build_model(&PackingInstance::new(vec![2.0, 3.0])).unwrap();
        let result = canned_result(&packed, &[(2.0, 2.0), (7.0, 3.0)], 10.0, 6.0);
        let report = PackingReport::from_solution(&packed, &result);

        assert_eq!(report.status(), SolveStatus::Feasible);
        assert_eq!(report.objective(), Some(60.0));
        assert_eq!(report.width(), Some(10.0));
        assert_eq!(report.height(), Some(6.0));
        assert_eq!(report.placements().len(), 2);
        assert_eq!(report.placements()[1].radius, 3.0);

        let text = report.to_string();
        assert!(text.contains("Best objective (area) = 60"));
        assert!(text.contains("w = 10, h = 6"));
        assert!(text.contains("circle 0: x=2 y=2 r=2"));
        assert!(text.contains("circle 1: x=7 y=3 r=3"));
    }

    #[test]
    fn test_report_no_solution() {
        let packed = build_model(&PackingInstance::new(vec![2.0, 3.0])).unwrap();
        for status in [SolveStatus::Infeasible, SolveStatus::Unknown, SolveStatus::Timeout] {
            let report = PackingReport::from_solution(&packed, &SolveResult::empty(status));
            assert_eq!(report.status(), status);
            assert!(report.objective().is_none());
            assert!(report.placements().is_empty());
            assert_eq!(report.to_string().trim(), "No feasible solution found");
        }
    }

    #[test]
    fn test_report_incomplete_values() {
        let packed = build_model(&PackingInstance::new(vec![2.0, 3.0])).unwrap();
        let mut result = canned_result(&packed, &[(2.0, 2.0), (7.0, 3.0)], 10.0, 6.0);
        result.values.truncate(2);
        let report = PackingReport::from_solution(&packed, &result);
        assert_eq!(report.to_string().trim(), "No feasible solution found");
    }

    /// End-to-end: generate the 14-circle model, warm-start it with the
    /// shelf layout, solve with the built-in heuristic, and check every
    /// reported quantity against the formulation guarantees.
    #[test]
    fn test_end_to_end_reference_instance() {
        let instance = PackingInstance::default();
        let layout = shelf_layout(&instance).unwrap();
        let instance = instance.with_warm_start(layout);
        let packed = build_model(&instance).unwrap();

        let config = SolverConfig::default().with_seed(42).with_time_limit_ms(10_000);
        let result = SimpleNlpSolver::new().solve(&packed.model, &config);
        assert!(result.is_solution_found(), "status: {:?}", result.status);

        let report = PackingReport::from_solution(&packed, &result);
        let area = report.objective().unwrap();
        let w = report.width().unwrap();
        let h = report.height().unwrap();

        let lb = instance.area_lower_bound();
        assert!(area >= lb - 1e-6, "area {area} below lower bound {lb}");
        assert!(w <= 80.0 + 1e-6 && h <= 80.0 + 1e-6);
        assert!(area >= w * h - 1e-4, "area link violated: {area} < {}", w * h);

        let placements = report.placements();
        assert_eq!(placements.len(), 14);

        // containment
        for p in placements {
            assert!(p.x >= p.radius - 1e-6 && p.x <= w - p.radius + 1e-6);
            assert!(p.y >= p.radius - 1e-6 && p.y <= h - p.radius + 1e-6);
        }

        // pairwise separation
        for i in 0..placements.len() {
            for j in (i + 1)..placements.len() {
                let (a, b) = (&placements[i], &placements[j]);
                let dist_sq = (a.x - b.x).powi(2) + (a.y - b.y).powi(2);
                let min_sep = a.radius + b.radius - instance.margin();
                assert!(
                    dist_sq >= min_sep * min_sep - 1e-4,
                    "circles {i} and {j} overlap"
                );
            }
        }

        let text = report.to_string();
        assert!(text.contains("Best objective (area) ="));
        assert!(text.contains("circle 13:"));
    }
}
