#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ProfileResolved,
    ParametersScaled,
    PathGenerated,
    StatisticsAggregated,
    OptimizationDerived,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineEvent {
    pub sequence: u64,
    pub stage: PipelineStage,
}

impl PipelineEvent {
    pub fn new(sequence: u64, stage: PipelineStage) -> Self {
        Self { sequence, stage }
    }
}
