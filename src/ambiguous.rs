/// Gene symbols that double as common English words or abbreviations and
/// attract spurious literature matches.
const AMBIGUOUS_SYMBOLS: &[&str] = &[
    "ACE", "AGA", "AIM", "AR", "ARC", "ASS", "ATM", "BAD", "BID", "CAD",
    "CAMP", "CAN", "CAP", "CAST", "CAT", "CHOP", "CLOCK", "COIL", "COPE",
    "COT", "CS", "DAO", "DDT", "ERA", "FAST", "FATE", "FLAP", "FUSE", "GAS",
    "GC", "GRASP", "HIP", "HR", "IMPACT", "ITCH", "JUN", "KIT", "LARGE",
    "LIGHT", "MARS", "MASS", "MAX", "MET", "MICE", "NODAL", "NOT", "PIGS",
    "POLE", "REST", "SET", "SHE", "SHOT", "STAR", "TANK", "TIP", "TRAP",
    "TUBE", "WAS", "WASP", "ZIP",
];

/// Removes gene symbols known to collide with common words.
///
/// Applied only inside the null-distribution machinery: both the sampling
/// pool and the panel size are filtered. The already-computed observed score
/// is left untouched (see DESIGN.md on this asymmetry).
#[derive(Debug, Clone, Copy)]
pub struct AmbiguousGeneFilter {
    enabled: bool,
}

impl AmbiguousGeneFilter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_ambiguous(symbol: &str) -> bool {
        AMBIGUOUS_SYMBOLS.contains(&symbol)
    }

    /// Genes that survive filtering. A disabled filter is a no-op.
    pub fn filter(&self, genes: &[String]) -> Vec<String> {
        if !self.enabled {
            return genes.to_vec();
        }
        genes
            .iter()
            .filter(|gene| !Self::is_ambiguous(gene))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genes(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_removes_ambiguous_symbols() {
        let filter = AmbiguousGeneFilter::new(true);
        let filtered = filter.filter(&genes(&["CAT", "TP53", "SET"]));
        assert_eq!(filtered, genes(&["TP53"]));
    }

    #[test]
    fn test_disabled_filter_is_noop() {
        let filter = AmbiguousGeneFilter::new(false);
        let input = genes(&["CAT", "TP53", "SET"]);
        assert_eq!(filter.filter(&input), input);
    }

    #[test]
    fn test_is_ambiguous() {
        assert!(AmbiguousGeneFilter::is_ambiguous("CAT"));
        assert!(AmbiguousGeneFilter::is_ambiguous("IMPACT"));
        assert!(!AmbiguousGeneFilter::is_ambiguous("TP53"));
        // Matching is exact, not case-folded.
        assert!(!AmbiguousGeneFilter::is_ambiguous("cat"));
    }
}
