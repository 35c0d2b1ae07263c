pub mod core;
pub mod engine;
pub mod services;
pub mod transform;

// 公開API - 明示的にエクスポートして曖昧性を回避
pub use crate::core::{
    CancelSignal, CollectorStats, PipelineConfig, PipelineError, PipelineResult, PipelineSummary,
    ProgressReporter,
};
pub use crate::engine::{
    collect_with_engine, create_default_engine, create_quiet_engine, run_fanout, FanoutEngine,
    FanoutPipeline, PipelineRun,
};
pub use crate::services::{ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter};
pub use crate::transform::{FnTransform, TransformBackend};
