// エンジン層 - ステージ配線とオーケストレーション
// 5段構成: source → fan-out → workers → merge → sink(呼び出し側)

pub mod api;
pub mod fanout;
pub mod fanout_engine;
pub mod merge;
pub mod pipeline;
pub mod source;
pub mod worker;

// 公開API - 主要エンジンクラス
pub use api::{collect_with_engine, create_default_engine, create_quiet_engine, run_fanout};
pub use fanout_engine::FanoutEngine;
pub use pipeline::{FanoutPipeline, PipelineRun};
