//! Frame-time statistics

use std::collections::VecDeque;

use crate::foundation::time::Stopwatch;

/// Rolling window length in frames
const SAMPLE_WINDOW: usize = 60;

/// Rolling frame-time monitor
///
/// Bracket each frame with [`begin_frame`](Self::begin_frame) and
/// [`end_frame`](Self::end_frame). Statistics average over the most recent
/// sixty samples, so startup spikes age out of the report quickly.
pub struct PerformanceMonitor {
    stopwatch: Stopwatch,
    samples: VecDeque<f32>,
    last_frame_ms: f32,
    frame_count: u64,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    /// Create a monitor with no samples
    pub fn new() -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            samples: VecDeque::with_capacity(SAMPLE_WINDOW),
            last_frame_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.stopwatch.restart();
    }

    /// Mark the end of a frame and record its duration
    pub fn end_frame(&mut self) {
        self.last_frame_ms = self.stopwatch.elapsed_millis();
        self.stopwatch.reset();

        if self.samples.len() == SAMPLE_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(self.last_frame_ms);
        self.frame_count += 1;
    }

    /// Record an externally measured frame duration in milliseconds
    ///
    /// Alternative to the begin/end bracket for loops that already time
    /// themselves.
    pub fn record_frame_time(&mut self, frame_time_ms: f32) {
        self.last_frame_ms = frame_time_ms;
        if self.samples.len() == SAMPLE_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time_ms);
        self.frame_count += 1;
    }

    /// Duration of the most recent frame in milliseconds
    pub fn frame_time_ms(&self) -> f32 {
        self.last_frame_ms
    }

    /// Instantaneous frames per second from the most recent frame
    pub fn fps(&self) -> f32 {
        if self.last_frame_ms > 0.0 {
            1000.0 / self.last_frame_ms
        } else {
            0.0
        }
    }

    /// Average frame time over the sample window in milliseconds
    pub fn average_frame_time_ms(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f32>() / self.samples.len() as f32
    }

    /// Average frames per second over the sample window
    pub fn average_fps(&self) -> f32 {
        let avg = self.average_frame_time_ms();
        if avg > 0.0 {
            1000.0 / avg
        } else {
            0.0
        }
    }

    /// Total frames recorded since creation or the last reset
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the windowed average meets the target frame rate
    pub fn is_performance_good(&self, target_fps: f32) -> bool {
        self.average_fps() >= target_fps
    }

    /// Drop all samples and counters
    pub fn reset_statistics(&mut self) {
        self.stopwatch.reset();
        self.samples.clear();
        self.last_frame_ms = 0.0;
        self.frame_count = 0;
    }

    /// One-line human-readable summary
    pub fn report(&self) -> String {
        format!(
            "FPS: {:.1} (avg {:.1}) | Frame Time: {:.2} ms (avg {:.2} ms) | Frames: {}",
            self.fps(),
            self.average_fps(),
            self.frame_time_ms(),
            self.average_frame_time_ms(),
            self.frame_count
        )
    }
}
