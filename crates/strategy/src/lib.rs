pub mod optimizer;

pub use optimizer::{
    optimize, Narrative, OptimizationInsight, HEADROOM_NARRATIVE, TIGHTEN_NARRATIVE,
};
