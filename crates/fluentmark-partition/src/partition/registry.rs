use std::sync::Arc;

use fluentmark_config::PartitioningConfig;

use crate::partition::{Partitioner, PartitioningId};

/// One shared partitioner per partitioning id.
///
/// Documents install partitioners from here so that every document of a kind
/// shares the same rule set.
#[derive(Debug, Clone)]
pub struct PartitionerRegistry {
    markdown: Arc<Partitioner>,
    plantuml: Arc<Partitioner>,
}

impl PartitionerRegistry {
    pub fn from_config(config: &PartitioningConfig) -> Self {
        Self {
            markdown: Arc::new(Partitioner::markdown(config)),
            plantuml: Arc::new(Partitioner::plantuml()),
        }
    }

    pub fn markdown(&self) -> Arc<Partitioner> {
        Arc::clone(&self.markdown)
    }

    pub fn plantuml(&self) -> Arc<Partitioner> {
        Arc::clone(&self.plantuml)
    }

    pub fn get(&self, id: PartitioningId) -> Arc<Partitioner> {
        match id {
            PartitioningId::Markdown => self.markdown(),
            PartitioningId::PlantUml => self.plantuml(),
        }
    }
}

impl Default for PartitionerRegistry {
    fn default() -> Self {
        Self::from_config(&PartitioningConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitioners_are_shared() {
        let registry = PartitionerRegistry::default();
        assert!(Arc::ptr_eq(&registry.markdown(), &registry.get(PartitioningId::Markdown)));
        assert!(Arc::ptr_eq(&registry.plantuml(), &registry.get(PartitioningId::PlantUml)));
    }

    #[test]
    fn partitioners_carry_their_id() {
        let registry = PartitionerRegistry::default();
        for id in PartitioningId::ALL {
            assert_eq!(registry.get(id).partitioning_id(), id);
        }
    }

    #[test]
    fn config_reaches_the_markdown_rules() {
        let config = PartitioningConfig {
            front_matter: false,
            ..PartitioningConfig::default()
        };
        let registry = PartitionerRegistry::from_config(&config);
        let regions = registry.markdown().partition_text("---\na\n---\n");
        assert_eq!(regions.len(), 1);
        assert!(regions[0].content_type.is_default());
    }
}
