//! Hole result classification against par.

use crate::models::ResultVsPar;

/// Classify gross strokes against par.
pub fn get_score_result_vs_par(strokes: u32, par: u8) -> ResultVsPar {
    ResultVsPar::from_diff(strokes as i32 - par as i32)
}
