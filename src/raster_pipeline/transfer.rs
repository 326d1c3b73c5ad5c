//! Piecewise-linear transfer functions
//!
//! A [`TransferFunction`] maps an input sample domain onto an output range
//! through a list of control points, interpolating linearly in between.
//! Inputs outside the first and last control points are rejected instead of
//! being extrapolated.

use crate::raster_pipeline::common::error::{AdjustError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    inputs: Vec<f64>,
    outputs: Vec<f64>,
}

impl TransferFunction {
    /// Builds a function from control points.
    ///
    /// `inputs` must be finite and strictly increasing, `outputs` finite and
    /// of the same length, and there must be at least two points.
    pub fn new(inputs: Vec<f64>, outputs: Vec<f64>) -> Result<Self> {
        if inputs.len() != outputs.len() {
            return Err(AdjustError::InvalidControlPoints(format!(
                "{} inputs but {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        if inputs.len() < 2 {
            return Err(AdjustError::InvalidControlPoints(format!(
                "need at least 2 points, got {}",
                inputs.len()
            )));
        }
        if let Some(bad) = inputs.iter().chain(&outputs).find(|v| !v.is_finite()) {
            return Err(AdjustError::InvalidControlPoints(format!(
                "non-finite control value {bad}"
            )));
        }
        if let Some(pair) = inputs.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(AdjustError::InvalidControlPoints(format!(
                "inputs not strictly increasing at {} -> {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self { inputs, outputs })
    }

    /// Defined input domain as `(lower, upper)`, both inclusive.
    pub fn domain(&self) -> (f64, f64) {
        (self.inputs[0], self.inputs[self.inputs.len() - 1])
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[f64] {
        &self.outputs
    }

    /// Evaluates the function at `x`, or `None` when `x` lies outside the
    /// domain (or is NaN).
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        let (lower, upper) = self.domain();
        if !(lower..=upper).contains(&x) {
            return None;
        }

        // Index of the first control point strictly greater than x, so the
        // enclosing segment is [segment - 1, segment].
        let segment = self
            .inputs
            .partition_point(|&p| p <= x)
            .clamp(1, self.inputs.len() - 1);
        let (x0, x1) = (self.inputs[segment - 1], self.inputs[segment]);
        let (y0, y1) = (self.outputs[segment - 1], self.outputs[segment]);

        Some(y0 + (y1 - y0) * (x - x0) / (x1 - x0))
    }
}
