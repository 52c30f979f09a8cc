use crate::distance::DistanceAlgorithm;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SpellCheckerConfig {
    // Index depth; also the hard upper bound on any lookup's max_edit_distance.
    pub max_dictionary_edit_distance: usize,
    // Characters of each term used for delete-index generation.
    pub prefix_length: usize,
    // Minimum count for a term to be considered a real dictionary entry.
    pub count_threshold: u64,
    pub distance_algorithm: DistanceAlgorithm,
}

impl Default for SpellCheckerConfig {
    fn default() -> Self {
        Self {
            max_dictionary_edit_distance: 2,
            prefix_length: 7,
            count_threshold: 1,
            distance_algorithm: DistanceAlgorithm::OptimalStringAlignment,
        }
    }
}

impl SpellCheckerConfig {
    pub fn with_max_dictionary_edit_distance(mut self, value: usize) -> Self {
        self.max_dictionary_edit_distance = value;
        self
    }

    pub fn with_prefix_length(mut self, value: usize) -> Self {
        self.prefix_length = value;
        self
    }

    pub fn with_count_threshold(mut self, value: u64) -> Self {
        self.count_threshold = value;
        self
    }

    pub fn with_distance_algorithm(mut self, value: DistanceAlgorithm) -> Self {
        self.distance_algorithm = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = SpellCheckerConfig::default();
        assert_eq!(cfg.max_dictionary_edit_distance, 2);
        assert_eq!(cfg.prefix_length, 7);
        assert_eq!(cfg.count_threshold, 1);
    }

    #[test]
    fn builder_methods_chain() {
        let cfg = SpellCheckerConfig::default()
            .with_max_dictionary_edit_distance(3)
            .with_prefix_length(10);
        assert_eq!(cfg.max_dictionary_edit_distance, 3);
        assert_eq!(cfg.prefix_length, 10);
    }
}
