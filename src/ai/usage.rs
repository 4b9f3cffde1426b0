//! Token Usage Tracking
//!
//! Accumulates usage counters across the root pass and every subfolder pass
//! so the CLI can print one cost summary at the end of a run.

use console::style;

use super::TokenUsage;

#[derive(Debug, Default)]
pub struct UsageTracker {
    calls: usize,
    input_tokens: u64,
    output_tokens: u64,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, usage: &TokenUsage) {
        self.calls += 1;
        self.input_tokens += u64::from(usage.input_tokens);
        self.output_tokens += u64::from(usage.output_tokens);
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }

    /// One-line summary for terminal output; empty string when no calls
    /// were made
    pub fn summary(&self) -> String {
        if self.calls == 0 {
            return String::new();
        }
        format!(
            "{} {} LLM call(s), {} input + {} output tokens",
            style("Usage:").bold(),
            self.calls,
            self.input_tokens,
            self.output_tokens
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_across_calls() {
        let mut tracker = UsageTracker::new();
        tracker.record(&TokenUsage {
            input_tokens: 100,
            output_tokens: 40,
        });
        tracker.record(&TokenUsage {
            input_tokens: 50,
            output_tokens: 10,
        });

        assert_eq!(tracker.calls(), 2);
        assert_eq!(tracker.total_tokens(), 200);
    }

    #[test]
    fn test_empty_summary_without_calls() {
        let tracker = UsageTracker::new();
        assert!(tracker.summary().is_empty());
    }

    #[test]
    fn test_summary_mentions_counts() {
        let mut tracker = UsageTracker::new();
        tracker.record(&TokenUsage {
            input_tokens: 1,
            output_tokens: 2,
        });
        let summary = tracker.summary();
        assert!(summary.contains("1 LLM call(s)"));
    }
}
