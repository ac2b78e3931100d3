//! Compiled, immutable noise tree and its evaluator

use std::fmt;

use crate::core::types::Result;
use super::node::{CombineOp, NoiseNode};
use super::source::{source_for, BaseNoise};

struct CompiledNode {
    source: Box<dyn BaseNoise>,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    base_frequency: f64,
    min: f64,
    max: f64,
    output_low: f64,
    output_high: f64,
    combine: CombineOp,
    children: Vec<CompiledNode>,
}

impl CompiledNode {
    fn compile<F>(node: &NoiseNode, path: &str, factory: &mut F) -> Result<Self>
    where
        F: FnMut(&NoiseNode) -> Box<dyn BaseNoise>,
    {
        let source = factory(node);
        let range = source.range();
        node.check_params(path, range)?;
        let (min, max) = node.amplitude_bounds(range);

        let children = node
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| Self::compile(child, &format!("{}.children[{}]", path, i), factory))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source,
            octaves: node.octaves,
            persistence: node.persistence,
            lacunarity: node.lacunarity,
            base_frequency: node.base_frequency,
            min,
            max,
            output_low: node.output_low,
            output_high: node.output_high,
            combine: node.combine,
            children,
        })
    }

    fn fractal_sum(&self, x: f64, y: f64) -> f64 {
        let mut frequency = self.base_frequency;
        let mut amplitude = 1.0;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            total += self.source.sample(x * frequency, y * frequency) * amplitude;
            frequency *= self.lacunarity;
            amplitude *= self.persistence;
        }
        total
    }

    fn evaluate(&self, x: f64, y: f64) -> f64 {
        let own = rescale(
            self.fractal_sum(x, y),
            self.min,
            self.max,
            self.output_low,
            self.output_high,
        );
        let children: f64 = self.children.iter().map(|c| c.evaluate(x, y)).sum();
        self.combine.apply(own, children)
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(CompiledNode::count).sum::<usize>()
    }
}

/// Linearly map `value` from `[min, max]` to `[low, high]`.
///
/// `min != max` is guaranteed by node validation.
pub fn rescale(value: f64, min: f64, max: f64, low: f64, high: f64) -> f64 {
    low + (value - min) / (max - min) * (high - low)
}

/// Scalar height field defined by a noise tree
///
/// Evaluation is a pure function of `(x, y)`: nothing is mutated, so the same
/// field can be sampled from any number of call sites in any order.
pub struct NoiseField {
    root: CompiledNode,
}

impl NoiseField {
    /// Compile a tree using the built-in base noise for every node kind.
    ///
    /// Nodes without a seed override use `seed`.
    pub fn new(tree: &NoiseNode, seed: u32) -> Result<Self> {
        Self::with_sources(tree, |node| source_for(node.kind, node.seed.unwrap_or(seed)))
    }

    /// Compile a tree, asking `factory` for each node's base noise.
    pub fn with_sources<F>(tree: &NoiseNode, mut factory: F) -> Result<Self>
    where
        F: FnMut(&NoiseNode) -> Box<dyn BaseNoise>,
    {
        let root = CompiledNode::compile(tree, "root", &mut factory)?;
        Ok(Self { root })
    }

    /// Height at world coordinate `(x, y)`
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.root.evaluate(x, y)
    }

    /// Number of nodes in the compiled tree
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// Output band of the root node's own rescaled value, before combining
    pub fn root_output(&self) -> (f64, f64) {
        (self.root.output_low, self.root.output_high)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("nodes", &self.node_count())
            .field("root_octaves", &self.root.octaves)
            .field("root_combine", &self.root.combine)
            .finish()
    }
}
