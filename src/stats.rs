/// Counters from the location classification pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassifyStats {
    pub records_scanned: u64,
    pub airports: u64,
    pub airports_without_codes: u64,
    pub cities: u64,
    pub divisions_pending: u64,
    pub interned_strings: u64,
}

impl ClassifyStats {
    /// Locations accepted without needing alternate names
    pub fn accepted(&self) -> u64 {
        self.airports + self.cities
    }
}

/// Counters from the alternate-name merge pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub records_scanned: u64,
    pub target_language_names: u64,
    pub names_attached: u64,
    pub divisions_promoted: u64,
    pub divisions_dropped: u64,
}

/// Everything reported at the end of a run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PipelineStats {
    pub classify: ClassifyStats,
    pub merge: MergeStats,
    pub locations_written: u64,
    pub countries_written: u64,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_locations(&self) -> u64 {
        self.classify.accepted() + self.merge.divisions_promoted
    }
}
