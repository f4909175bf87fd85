use indicatif::{ProgressBar, ProgressStyle};
use roadgraph_core::Progress;

/// Road counter drawn on stderr while the graph is built
pub struct RoadProgress {
    pub pb: ProgressBar,
}

impl RoadProgress {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} roads processed ({per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { pb }
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Default for RoadProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for RoadProgress {
    fn advance(&self, n: u64) {
        self.pb.inc(n);
    }
}
