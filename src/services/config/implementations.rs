// 設定管理の具象実装

use crate::core::PipelineConfig;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    concurrency: usize,
    lane_buffer: usize,
    enable_progress: bool,
}

impl DefaultPipelineConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            concurrency: cpu_count.max(1),
            lane_buffer: 1,
            enable_progress: true,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_lane_buffer_size(mut self, lane_buffer: usize) -> Self {
        self.lane_buffer = lane_buffer;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: num_cpus::get().max(1),
            lane_buffer: 1,
            enable_progress: true,
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn lane_buffer_size(&self) -> usize {
        self.lane_buffer
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}
