#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// How many nearest neighbors contribute to a prediction
    pub neighbor_count: usize,
    /// Default length of a recommendation list
    pub recommendation_count: usize,
    /// Precompute all pairwise similarities on snapshot refresh
    pub precompute_similarities: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            neighbor_count: 5,
            recommendation_count: 5,
            precompute_similarities: false,
        }
    }
}

// Prefer passing the settings explicitly (Dependency Injection) rather than
// keeping a global: the same process may host engines with different tunings.
