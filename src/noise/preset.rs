//! Ready-made noise trees

use crate::core::types::Result;
use super::node::{CombineOp, NoiseKind, NoiseNode};

/// Broad rolling terrain: a four-octave base in `[0, 5000]` multiplied by a
/// slow single-octave mask in `[0, 1]` that flattens whole regions.
pub fn reference_terrain() -> NoiseNode {
    NoiseNode::new(NoiseKind::Perlin)
        .with_octaves(4)
        .with_persistence(0.5)
        .with_lacunarity(2.0)
        .with_frequency(0.4)
        .with_output(0.0, 5000.0)
        .with_combine(CombineOp::Multiply)
        .with_child(
            NoiseNode::new(NoiseKind::Perlin)
                .with_octaves(1)
                .with_persistence(0.5)
                .with_lacunarity(2.0)
                .with_frequency(0.1)
                .with_output(0.0, 1.0)
                .with_combine(CombineOp::Add),
        )
}

/// Upper bound of [`reference_terrain`] output
pub const REFERENCE_TERRAIN_MAX: f64 = 5000.0;

/// Parse and validate a tree exported by the browser noise editor.
///
/// The editor labels its gradient nodes `"simplex"` but renders them with
/// improved Perlin noise, so those nodes import as [`NoiseKind::Perlin`] to
/// reproduce the editor's terrain. Deserialize a [`NoiseNode`] directly to
/// get real simplex noise instead.
pub fn from_editor_json(json: &str) -> Result<NoiseNode> {
    let mut tree: NoiseNode = serde_json::from_str(json)?;
    editor_kinds(&mut tree);
    tree.validate()?;
    Ok(tree)
}

fn editor_kinds(node: &mut NoiseNode) {
    if node.kind == NoiseKind::Simplex {
        node.kind = NoiseKind::Perlin;
    }
    node.children.iter_mut().for_each(editor_kinds);
}
