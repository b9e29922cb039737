//! Replay feed over recorded load samples.
//!
//! Streams a recorded trace one tick at a time, so historical data can
//! be driven through the engine exactly as a live feed would be.

use std::path::Path;

use proscale_core::LoadSample;

/// A resettable cursor over an owned sample trace.
#[derive(Debug, Clone)]
pub struct ReplayFeed {
    samples: Vec<LoadSample>,
    cursor: usize,
}

impl ReplayFeed {
    pub fn new(samples: Vec<LoadSample>) -> Self {
        Self { samples, cursor: 0 }
    }

    /// Load a trace from a JSON file containing an array of samples.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let samples: Vec<LoadSample> = serde_json::from_str(&content)?;
        Ok(Self::new(samples))
    }

    /// The next sample, or `None` at end of trace.
    pub fn next_tick(&mut self) -> Option<LoadSample> {
        let sample = self.samples.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(sample)
    }

    /// Rewind to the start of the trace.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Fraction of the trace consumed (0.0–1.0; 1.0 for an empty trace).
    pub fn progress(&self) -> f64 {
        if self.samples.is_empty() {
            return 1.0;
        }
        self.cursor as f64 / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Iterator for ReplayFeed {
    type Item = LoadSample;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(n: u64) -> Vec<LoadSample> {
        (0..n)
            .map(|tick| LoadSample {
                tick,
                current_load: 100.0 * tick as f64,
                forecast_load: 90.0 * tick as f64,
            })
            .collect()
    }

    #[test]
    fn streams_in_order_then_ends() {
        let mut feed = ReplayFeed::new(trace(3));
        assert_eq!(feed.next_tick().unwrap().tick, 0);
        assert_eq!(feed.next_tick().unwrap().tick, 1);
        assert_eq!(feed.next_tick().unwrap().tick, 2);
        assert!(feed.next_tick().is_none());
        assert!(feed.next_tick().is_none());
    }

    #[test]
    fn reset_rewinds_to_start() {
        let mut feed = ReplayFeed::new(trace(2));
        feed.next_tick();
        feed.next_tick();
        feed.reset();
        assert_eq!(feed.next_tick().unwrap().tick, 0);
    }

    #[test]
    fn progress_tracks_cursor() {
        let mut feed = ReplayFeed::new(trace(4));
        assert_eq!(feed.progress(), 0.0);
        feed.next_tick();
        assert_eq!(feed.progress(), 0.25);
        for _ in 0..3 {
            feed.next_tick();
        }
        assert_eq!(feed.progress(), 1.0);
    }

    #[test]
    fn empty_trace_reports_done() {
        let mut feed = ReplayFeed::new(Vec::new());
        assert!(feed.is_empty());
        assert_eq!(feed.progress(), 1.0);
        assert!(feed.next_tick().is_none());
    }

    #[test]
    fn json_round_trip() {
        let samples = trace(5);
        let json = serde_json::to_string(&samples).unwrap();
        let parsed: Vec<LoadSample> = serde_json::from_str(&json).unwrap();
        let mut feed = ReplayFeed::new(parsed);
        assert_eq!(feed.len(), 5);
        assert_eq!(feed.next_tick().unwrap(), samples[0]);
    }
}
