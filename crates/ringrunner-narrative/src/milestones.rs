//! Score milestones and the story line sequence.

use ringrunner_core::constants::MILESTONE_INTERVAL;

/// Story lines revealed as the score climbs.
pub const DEFAULT_LINES: [&str; 6] = [
    "Signal acquired. Thread the rings, stay clear of the rocks.",
    "Twenty rings in. The beacon answers from somewhere past the belt.",
    "Forty. The field thickens, and the beacon repeats a name you almost know.",
    "Sixty rings. The name is yours. Someone out here has been waiting.",
    "Eighty. Hull singing, nav lights flickering. Keep the line.",
    "One hundred. The belt opens into clear dark, and the beacon goes quiet.",
];

/// Fixed ordered sequence of milestone lines.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeSequence {
    lines: Vec<String>,
    /// Score points per milestone.
    interval: u32,
}

impl Default for NarrativeSequence {
    fn default() -> Self {
        Self::new(
            DEFAULT_LINES.iter().map(|s| s.to_string()).collect(),
            MILESTONE_INTERVAL,
        )
    }
}

impl NarrativeSequence {
    /// Build a sequence. An empty line list gets a single empty line and a
    /// zero interval is treated as 1, so indexing never fails.
    pub fn new(lines: Vec<String>, interval: u32) -> Self {
        let lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        Self {
            lines,
            interval: interval.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// `floor(score / interval)`, clamped to the last line.
    pub fn index_for_score(&self, score: u32) -> usize {
        let raw = (score / self.interval) as usize;
        raw.min(self.lines.len() - 1)
    }

    pub fn line(&self, index: usize) -> &str {
        let idx = index.min(self.lines.len() - 1);
        &self.lines[idx]
    }
}

/// Outcome of a milestone check after the score changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneCheck {
    /// Same line as before.
    Unchanged,
    /// A new milestone was crossed; reveal this line.
    Crossed { index: usize },
}

/// Compare the line for `score` against the current index.
pub fn check(sequence: &NarrativeSequence, current_index: usize, score: u32) -> MilestoneCheck {
    let index = sequence.index_for_score(score);
    if index != current_index {
        log::debug!("Narrative milestone {index} reached at score {score}");
        MilestoneCheck::Crossed { index }
    } else {
        MilestoneCheck::Unchanged
    }
}
