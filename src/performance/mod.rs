//! # Performance Metrics System
//!
//! Frame rate and frame time tracking for the stats overlay in the top-left
//! corner. Clicking the overlay cycles between the FPS and MS panels.
//!
//! ## Usage
//!
//! ```rust
//! use orrery::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! // In your main loop
//! monitor.begin_frame();
//! // ... update and render ...
//! monitor.end_frame();
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Which panel the overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsMode {
    /// Frames per second, from the interval between frame starts.
    #[default]
    Fps,
    /// Milliseconds spent between `begin_frame` and `end_frame`.
    FrameTime,
}

impl StatsMode {
    pub fn next(self) -> Self {
        match self {
            StatsMode::Fps => StatsMode::FrameTime,
            StatsMode::FrameTime => StatsMode::Fps,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Current frames per second
    pub fps: f32,
    /// Average work time per frame in milliseconds
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
    /// Number of draw calls in the last frame
    pub draw_calls: u32,
    /// Number of vertices rendered in the last frame
    pub vertex_count: u32,
    /// Number of triangles rendered in the last frame
    pub triangle_count: u32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: 0.0,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            vertex_count: 0,
            triangle_count: 0,
        }
    }
}

pub struct PerformanceMonitor {
    /// Ring buffer of intervals between frame starts
    frame_intervals: VecDeque<Duration>,
    /// Ring buffer of per-frame work times
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    frame_start: Option<Instant>,
    previous_frame_start: Option<Instant>,
    current_metrics: PerformanceMetrics,
    mode: StatsMode,
    last_update: Instant,
    update_interval: Duration,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_samples(120) // ~2 seconds at 60fps
    }

    pub fn with_samples(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_intervals: VecDeque::with_capacity(max_samples),
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            frame_start: None,
            previous_frame_start: None,
            current_metrics: PerformanceMetrics::default(),
            mode: StatsMode::default(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(100), // Update metrics 10 times per second
        }
    }

    /// Mark the beginning of a frame
    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        if let Some(previous) = self.previous_frame_start.replace(now) {
            push_sample(&mut self.frame_intervals, now - previous, self.max_samples);
        }
        self.frame_start = Some(now);
    }

    /// Mark the end of a frame and periodically refresh the metrics
    pub fn end_frame(&mut self) {
        if let Some(start) = self.frame_start.take() {
            push_sample(&mut self.frame_times, start.elapsed(), self.max_samples);

            if self.last_update.elapsed() >= self.update_interval {
                self.refresh();
                self.last_update = Instant::now();
            }
        }
    }

    /// Records one frame's samples directly.
    pub fn record_frame(&mut self, interval: Option<Duration>, work: Duration) {
        if let Some(interval) = interval {
            push_sample(&mut self.frame_intervals, interval, self.max_samples);
        }
        push_sample(&mut self.frame_times, work, self.max_samples);
    }

    /// Recomputes averages from the sample buffers.
    pub fn refresh(&mut self) {
        if let Some(avg_interval) = average(&self.frame_intervals) {
            let secs = avg_interval.as_secs_f32();
            self.current_metrics.fps = if secs > 0.0 { 1.0 / secs } else { 0.0 };
        }

        if let Some(avg_work) = average(&self.frame_times) {
            self.current_metrics.frame_time_ms = millis(avg_work);
        }
        if let (Some(min), Some(max)) = (self.frame_times.iter().min(), self.frame_times.iter().max())
        {
            self.current_metrics.min_frame_time_ms = millis(*min);
            self.current_metrics.max_frame_time_ms = millis(*max);
        }
    }

    pub fn update_render_stats(&mut self, draw_calls: u32, vertex_count: u32, triangle_count: u32) {
        self.current_metrics.draw_calls = draw_calls;
        self.current_metrics.vertex_count = vertex_count;
        self.current_metrics.triangle_count = triangle_count;
    }

    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    pub fn mode(&self) -> StatsMode {
        self.mode
    }

    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
    }

    fn history(&self) -> Vec<f32> {
        match self.mode {
            StatsMode::Fps => self
                .frame_intervals
                .iter()
                .map(|d| {
                    let secs = d.as_secs_f32();
                    if secs > 0.0 {
                        1.0 / secs
                    } else {
                        0.0
                    }
                })
                .collect(),
            StatsMode::FrameTime => self.frame_times.iter().copied().map(millis).collect(),
        }
    }

    pub fn reset(&mut self) {
        self.frame_intervals.clear();
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.frame_start = None;
        self.previous_frame_start = None;
        self.last_update = Instant::now();
    }

    /// Compact stats panel in the top-left corner. Click to switch panels.
    pub fn render_overlay(&mut self, ui: &imgui::Ui) {
        let metrics = self.current_metrics.clone();
        let history = self.history();
        let mut clicked = false;

        ui.window("Stats")
            .position([10.0, 10.0], imgui::Condition::Always)
            .always_auto_resize(true)
            .no_decoration()
            .movable(false)
            .save_settings(false)
            .bg_alpha(0.6)
            .build(|| {
                let (label, scale_max) = match self.mode {
                    StatsMode::Fps => (format!("{:.0} FPS", metrics.fps), 120.0),
                    StatsMode::FrameTime => (
                        format!(
                            "{:.1} MS ({:.1}-{:.1})",
                            metrics.frame_time_ms,
                            metrics.min_frame_time_ms,
                            metrics.max_frame_time_ms
                        ),
                        50.0,
                    ),
                };
                ui.text(&label);
                ui.plot_lines("##history", &history)
                    .graph_size([160.0, 40.0])
                    .scale_min(0.0)
                    .scale_max(scale_max)
                    .build();
                ui.text_disabled(format!(
                    "{} draws, {} verts, {} tris",
                    metrics.draw_calls, metrics.vertex_count, metrics.triangle_count
                ));

                clicked = ui.is_window_hovered() && ui.is_mouse_clicked(imgui::MouseButton::Left);
            });

        if clicked {
            self.cycle_mode();
        }
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

fn push_sample(buffer: &mut VecDeque<Duration>, sample: Duration, max_samples: usize) {
    if buffer.len() >= max_samples {
        buffer.pop_front();
    }
    buffer.push_back(sample);
}

fn average(buffer: &VecDeque<Duration>) -> Option<Duration> {
    if buffer.is_empty() {
        return None;
    }
    Some(buffer.iter().sum::<Duration>() / buffer.len() as u32)
}

fn millis(duration: Duration) -> f32 {
    duration.as_secs_f32() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn averages_over_the_sample_window() {
        let mut monitor = PerformanceMonitor::with_samples(4);
        for work_ms in [2, 4, 6, 8] {
            monitor.record_frame(Some(Duration::from_millis(20)), Duration::from_millis(work_ms));
        }
        monitor.refresh();

        let metrics = monitor.get_metrics();
        assert_relative_eq!(metrics.fps, 50.0, epsilon = 1e-3);
        assert_relative_eq!(metrics.frame_time_ms, 5.0, epsilon = 1e-3);
        assert_relative_eq!(metrics.min_frame_time_ms, 2.0, epsilon = 1e-3);
        assert_relative_eq!(metrics.max_frame_time_ms, 8.0, epsilon = 1e-3);
    }

    #[test]
    fn old_samples_fall_out_of_the_window() {
        let mut monitor = PerformanceMonitor::with_samples(2);
        monitor.record_frame(None, Duration::from_millis(100));
        monitor.record_frame(None, Duration::from_millis(10));
        monitor.record_frame(None, Duration::from_millis(10));
        monitor.refresh();

        assert_relative_eq!(monitor.get_metrics().frame_time_ms, 10.0, epsilon = 1e-3);
        // No intervals yet, so no frame rate either.
        assert_eq!(monitor.get_metrics().fps, 0.0);
    }

    #[test]
    fn mode_cycles_between_panels() {
        let mut monitor = PerformanceMonitor::new();
        assert_eq!(monitor.mode(), StatsMode::Fps);
        monitor.cycle_mode();
        assert_eq!(monitor.mode(), StatsMode::FrameTime);
        monitor.cycle_mode();
        assert_eq!(monitor.mode(), StatsMode::Fps);
    }

    #[test]
    fn reset_clears_history() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Some(Duration::from_millis(16)), Duration::from_millis(3));
        monitor.update_render_stats(10, 5000, 9000);
        assert_eq!(monitor.get_metrics().triangle_count, 9000);
        monitor.refresh();
        monitor.reset();
        assert_eq!(monitor.get_metrics(), &PerformanceMetrics::default());
    }
}
