//! Declarative noise tree definition
//!
//! A [`NoiseNode`] describes one fractal layer plus the children it is
//! combined with. The tree is plain data: it carries no evaluation state and
//! is compiled into a [`NoiseField`](super::NoiseField) before sampling.

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use super::source::NoiseRange;

/// Base noise family for a node
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseKind {
    /// Improved Perlin gradient noise, signed
    #[default]
    #[serde(alias = "gradient")]
    Perlin,
    /// Simplex gradient noise, signed
    Simplex,
    /// Worley cell noise, unsigned
    #[serde(alias = "truecellular", alias = "fastcellular")]
    Cellular,
}

impl NoiseKind {
    /// Output band of this family's base noise
    pub fn range(self) -> NoiseRange {
        match self {
            NoiseKind::Perlin | NoiseKind::Simplex => NoiseRange::Signed,
            NoiseKind::Cellular => NoiseRange::Unsigned,
        }
    }
}

/// Operator joining a node's own value (left) with its children's sum (right)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineOp {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl CombineOp {
    /// Apply the operator.
    ///
    /// Dividing by a zero children sum returns `lhs` unchanged.
    ///
    /// # Examples
    /// ```
    /// use lodscape::noise::CombineOp;
    ///
    /// assert_eq!(CombineOp::Subtract.apply(5.0, 2.0), 3.0);
    /// assert_eq!(CombineOp::Divide.apply(6.0, 3.0), 2.0);
    /// assert_eq!(CombineOp::Divide.apply(6.0, 0.0), 6.0);
    /// ```
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            CombineOp::Add => lhs + rhs,
            CombineOp::Subtract => lhs - rhs,
            CombineOp::Multiply => lhs * rhs,
            CombineOp::Divide => {
                if rhs == 0.0 {
                    lhs
                } else {
                    lhs / rhs
                }
            }
        }
    }
}

/// One node of a noise tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseNode {
    #[serde(default, alias = "type")]
    pub kind: NoiseKind,
    /// Number of fractal layers
    pub octaves: u32,
    /// Amplitude multiplier per octave
    pub persistence: f64,
    /// Frequency multiplier per octave
    #[serde(alias = "lancunarity")]
    pub lacunarity: f64,
    /// Frequency of the first octave
    #[serde(alias = "frequency")]
    pub base_frequency: f64,
    /// Rescale target for this node's own fractal sum
    #[serde(alias = "low")]
    pub output_low: f64,
    #[serde(alias = "high")]
    pub output_high: f64,
    #[serde(default, alias = "operation")]
    pub combine: CombineOp,
    /// Seed override; falls back to the tree seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(default)]
    pub children: Vec<NoiseNode>,
}

impl Default for NoiseNode {
    fn default() -> Self {
        Self::new(NoiseKind::default())
    }
}

impl NoiseNode {
    /// Single-octave node rescaled to `[0, 1]`
    pub fn new(kind: NoiseKind) -> Self {
        Self {
            kind,
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            base_frequency: 1.0,
            output_low: 0.0,
            output_high: 1.0,
            combine: CombineOp::Add,
            seed: None,
            children: Vec::new(),
        }
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_frequency(mut self, base_frequency: f64) -> Self {
        self.base_frequency = base_frequency;
        self
    }

    pub fn with_output(mut self, low: f64, high: f64) -> Self {
        self.output_low = low;
        self.output_high = high;
        self
    }

    pub fn with_combine(mut self, combine: CombineOp) -> Self {
        self.combine = combine;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_child(mut self, child: NoiseNode) -> Self {
        self.children.push(child);
        self
    }

    /// Highest possible fractal sum: the sum of all octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        let mut amplitude = 1.0;
        let mut max = 0.0;
        for _ in 0..self.octaves {
            max += amplitude;
            amplitude *= self.persistence;
        }
        max
    }

    /// Fractal sum bounds `(min, max)` for a base noise with the given band
    pub fn amplitude_bounds(&self, range: NoiseRange) -> (f64, f64) {
        let max = self.max_amplitude();
        (range.min_for(max), max)
    }

    /// Total number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NoiseNode::node_count).sum::<usize>()
    }

    /// Check this node and all descendants.
    pub fn validate(&self) -> Result<()> {
        self.validate_at("root")
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        self.check_params(path, self.kind.range())?;
        for (i, child) in self.children.iter().enumerate() {
            child.validate_at(&format!("{}.children[{}]", path, i))?;
        }
        Ok(())
    }

    /// Check this node's own parameters against the band of the base noise
    /// it will actually sample. Children are not visited.
    pub(crate) fn check_params(&self, path: &str, range: NoiseRange) -> Result<()> {
        if self.octaves == 0 {
            return Err(Error::noise(path, "octaves must be at least 1"));
        }
        if !self.persistence.is_finite() || self.persistence <= 0.0 {
            return Err(Error::noise(
                path,
                format!("persistence must be finite and positive, got {}", self.persistence),
            ));
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(Error::noise(
                path,
                format!("lacunarity must be finite and positive, got {}", self.lacunarity),
            ));
        }
        if !self.base_frequency.is_finite() || self.base_frequency <= 0.0 {
            return Err(Error::noise(
                path,
                format!("base frequency must be finite and positive, got {}", self.base_frequency),
            ));
        }
        if !self.output_low.is_finite() || !self.output_high.is_finite() {
            return Err(Error::noise(path, "output bounds must be finite"));
        }

        let (min, max) = self.amplitude_bounds(range);
        if !max.is_finite() || min == max {
            return Err(Error::noise(
                path,
                format!("degenerate rescale bounds [{}, {}]", min, max),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_ops() {
        assert_eq!(CombineOp::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(CombineOp::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(CombineOp::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(CombineOp::Divide.apply(3.0, 2.0), 1.5);
    }

    #[test]
    fn test_divide_by_zero_keeps_self_value() {
        assert_eq!(CombineOp::Divide.apply(4.5, 0.0), 4.5);
        assert_eq!(CombineOp::Divide.apply(4.5, -0.0), 4.5);
        assert!(!CombineOp::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_max_amplitude() {
        let node = NoiseNode::new(NoiseKind::Perlin).with_octaves(3).with_persistence(0.5);
        assert_eq!(node.max_amplitude(), 1.75);
        assert_eq!(node.amplitude_bounds(NoiseRange::Signed), (-1.75, 1.75));
        assert_eq!(node.amplitude_bounds(NoiseRange::Unsigned), (0.0, 1.75));
    }

    #[test]
    fn test_builder() {
        let node = NoiseNode::new(NoiseKind::Simplex)
            .with_octaves(4)
            .with_frequency(0.4)
            .with_output(0.0, 5000.0)
            .with_combine(CombineOp::Multiply)
            .with_seed(9)
            .with_child(NoiseNode::new(NoiseKind::Cellular));
        assert_eq!(node.octaves, 4);
        assert_eq!(node.base_frequency, 0.4);
        assert_eq!(node.output_high, 5000.0);
        assert_eq!(node.combine, CombineOp::Multiply);
        assert_eq!(node.seed, Some(9));
        assert_eq!(node.node_count(), 2);
    }

    #[test]
    fn test_validate_ok() {
        let node = NoiseNode::new(NoiseKind::Perlin)
            .with_octaves(5)
            .with_child(NoiseNode::new(NoiseKind::Cellular));
        assert!(node.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_octaves() {
        let node = NoiseNode::new(NoiseKind::Perlin).with_octaves(0);
        let err = node.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidNoise { ref path, .. } if path == "root"));
    }

    #[test]
    fn test_validate_rejects_zero_persistence() {
        let node = NoiseNode::new(NoiseKind::Perlin).with_persistence(0.0);
        assert!(node.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert!(NoiseNode::new(NoiseKind::Perlin).with_lacunarity(f64::NAN).validate().is_err());
        assert!(NoiseNode::new(NoiseKind::Perlin).with_frequency(0.0).validate().is_err());
        assert!(NoiseNode::new(NoiseKind::Perlin).with_output(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_amplitude() {
        let node = NoiseNode::new(NoiseKind::Perlin).with_octaves(2000).with_persistence(1e10);
        assert!(node.validate().is_err());
    }

    #[test]
    fn test_validate_reports_child_path() {
        let node = NoiseNode::new(NoiseKind::Perlin)
            .with_child(NoiseNode::new(NoiseKind::Perlin))
            .with_child(NoiseNode::new(NoiseKind::Perlin).with_child(NoiseNode::new(NoiseKind::Perlin).with_octaves(0)));
        match node.validate() {
            Err(Error::InvalidNoise { path, .. }) => assert_eq!(path, "root.children[1].children[0]"),
            other => panic!("expected invalid noise error, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let node = NoiseNode::new(NoiseKind::Cellular)
            .with_combine(CombineOp::Divide)
            .with_child(NoiseNode::new(NoiseKind::Simplex).with_seed(3));
        let json = serde_json::to_string(&node).unwrap();
        let back: NoiseNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }

    #[test]
    fn test_serde_editor_aliases() {
        let json = r#"{"type":"truecellular","octaves":2,"persistence":0.5,"lancunarity":2,
            "frequency":0.1,"low":-1,"high":1,"operation":"subtract","uid":0.5}"#;
        let node: NoiseNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.kind, NoiseKind::Cellular);
        assert_eq!(node.lacunarity, 2.0);
        assert_eq!(node.base_frequency, 0.1);
        assert_eq!(node.output_low, -1.0);
        assert_eq!(node.combine, CombineOp::Subtract);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_serde_rejects_negative_octaves() {
        let json = r#"{"octaves":-1,"persistence":0.5,"lacunarity":2,"base_frequency":1,
            "output_low":0,"output_high":1}"#;
        assert!(serde_json::from_str::<NoiseNode>(json).is_err());
    }
}
