//! Interval-halving root search.

use crate::error::SolverError;
use crate::{Root, check_bracket, check_tolerance};

/// Find a root of `f` inside `[lower, upper]` by bisection.
///
/// `f(lower)` and `f(upper)` must have opposite signs. The interval is halved
/// while it is wider than `2 * tolerance`, and the midpoint of the final
/// interval is returned, so the result lies within `tolerance` of a root.
/// The number of evaluations is bounded by `log2((upper - lower) / (2 * tolerance))`
/// plus the two end points.
pub fn bisection<F, E>(lower: f64, upper: f64, tolerance: f64, mut f: F) -> Result<Root, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    check_tolerance(tolerance)?;
    check_bracket(lower, upper)?;

    let mut a = lower;
    let mut b = upper;
    let mut fa = f(a)?;
    if fa == 0.0 {
        return Ok(Root { x: a, iterations: 0 });
    }
    let mut fb = f(b)?;
    if fb == 0.0 {
        return Ok(Root { x: b, iterations: 0 });
    }
    if !(fa * fb < 0.0) {
        return Err(SolverError::NoSignChange { lower, upper }.into());
    }

    let max_iterations = iteration_bound(upper - lower, tolerance);
    let mut iterations = 0;

    while (b - a).abs() > 2.0 * tolerance {
        if iterations >= max_iterations {
            return Err(SolverError::ConvergenceFailed {
                what: "bisection",
                iterations,
            }
            .into());
        }

        let mid = 0.5 * (a + b);
        let fm = f(mid)?;
        iterations += 1;

        if fm == 0.0 {
            return Ok(Root { x: mid, iterations });
        }
        if fa * fm < 0.0 {
            b = mid;
            fb = fm;
        } else if fm * fb < 0.0 {
            a = mid;
            fa = fm;
        } else {
            return Err(SolverError::Numeric {
                what: format!("non-finite residual {fm} at x = {mid}"),
            }
            .into());
        }
    }

    tracing::trace!(root = 0.5 * (a + b), iterations, "bisection converged");
    Ok(Root {
        x: 0.5 * (a + b),
        iterations,
    })
}

fn iteration_bound(width: f64, tolerance: f64) -> usize {
    let halvings = (width / (2.0 * tolerance)).log2().ceil();
    if halvings.is_finite() && halvings > 0.0 {
        halvings as usize + 2
    } else {
        2
    }
}
