use serde::{Deserialize, Serialize};

/// Configuration for a recursive comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Nesting depth after which rendered values are elided as `..`.
    pub render_depth: usize,
    /// Elements shown per rendered collection before `...`.
    pub render_elements: usize,
    /// When `true`, sequence elements add an index segment to the path
    /// (`friends[0].name`). When `false` elements share the collection's
    /// path (`friends.name`), so differences in two elements may repeat
    /// one path.
    pub index_segments: bool,
    /// When `true`, calendar instants of different concrete types are equal
    /// if they denote the same instant. When `false` the type tags must
    /// match too, unless a comparator says otherwise.
    pub compare_instants_across_types: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            render_depth: 8,
            render_elements: 32,
            index_segments: true,
            compare_instants_across_types: true,
        }
    }
}

impl EngineConfig {
    /// Sequence elements share the collection path, which is how field
    /// paths look in classic field-by-field reports.
    pub fn without_index_segments() -> Self {
        Self {
            index_segments: false,
            ..Default::default()
        }
    }
}
