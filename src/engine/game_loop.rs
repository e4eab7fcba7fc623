/// Game loop timing and control system
///
/// Fixed-rate ticking: each frame reports how many ticks are due, and the window
/// sleeps until the next one. Game logic only ever advances in whole ticks.
use std::time::{Duration, Instant};

/// Default update rate (60 ticks per second)
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Duration of one tick
    tick_duration: Duration,

    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Time when game loop started
    start_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop running `tick_rate` ticks per second
    pub fn new(tick_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            tick_duration: Duration::from_secs(1) / tick_rate.max(1),
            accumulator: Duration::ZERO,
            last_frame_time: now,
            start_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        // Store frame time for FPS calculation
        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.tick_duration && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_duration;
            ticks += 1;
        }

        // Drop the backlog instead of replaying it over the next frames
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= self.tick_duration {
            log::warn!(
                "Game loop fell behind by {:?}, skipping",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Instant at which the next tick becomes due
    pub fn next_tick_at(&self) -> Instant {
        self.last_frame_time + self.tick_duration.saturating_sub(self.accumulator)
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total elapsed time since start
    pub fn elapsed(&self) -> Duration {
        Instant::now().duration_since(self.start_time)
    }

    /// Elapsed wall-clock milliseconds; the clock for attack cooldowns
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Get total number of frames rendered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        // Calculate average frame time
        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        // Convert to FPS
        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}
