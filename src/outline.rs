//! Grid-to-path conversion used for the outline notification.
//!
//! The editor treats the tracer as an opaque pure function; hosts with a
//! proper contour tracer plug it in through [`OutlineTracer`], either as a
//! type or as a plain closure.

use crate::grid::Grid;
use std::fmt::Write;

/// Maps a grid to a vector path string.
pub trait OutlineTracer {
    fn trace(&self, grid: &Grid) -> String;
}

impl<F> OutlineTracer for F
where
    F: Fn(&Grid) -> String,
{
    fn trace(&self, grid: &Grid) -> String {
        self(grid)
    }
}

/// Emits one closed rectangle sub-path per horizontal run of ink cells.
///
/// Any non-zero index counts as ink. Output for a run of `len` cells starting
/// at `(x, y)` is `M{x} {y}H{x+len}V{y+1}H{x}Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowRunTracer;

impl OutlineTracer for RowRunTracer {
    fn trace(&self, grid: &Grid) -> String {
        let mut path = String::new();
        for y in 0..grid.height() {
            let mut run_start: Option<usize> = None;
            for x in 0..=grid.width() {
                let ink = grid.get(x, y).is_some_and(|color| color != 0);
                match (ink, run_start) {
                    (true, None) => run_start = Some(x),
                    (false, Some(start)) => {
                        let _ = write!(path, "M{start} {y}H{x}V{}H{start}Z", y + 1);
                        run_start = None;
                    }
                    _ => {}
                }
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_traces_to_empty_path() {
        assert_eq!(RowRunTracer.trace(&Grid::new(4, 4)), "");
    }

    #[test]
    fn runs_become_rectangles() {
        let grid = Grid::from_rows(&[vec![1, 1, 0, 2], vec![0, 0, 0, 0], vec![0, 1, 1, 1]]);
        assert_eq!(
            RowRunTracer.trace(&grid),
            "M0 0H2V1H0ZM3 0H4V1H3ZM1 2H4V3H1Z"
        );
    }

    #[test]
    fn closures_are_tracers() {
        let count = |grid: &Grid| grid.iter().filter(|(_, _, c)| *c != 0).count().to_string();
        let grid = Grid::from_rows(&[vec![1, 0, 1]]);
        assert_eq!(count.trace(&grid), "2");
    }
}
