pub mod cpu_renderer;
pub mod layer_tree;

pub use cpu_renderer::{CpuCacheConfig, CpuRenderer};
pub use layer_tree::LayerTree;
