use std::{collections::BTreeMap, path::Path};

use crate::{
    document::Document,
    error::PartitionError,
    io::read_document,
    models::SourceFile,
    partition::{PartitionerRegistry, PartitioningId},
    validation::{IssueSink, TypedRegionValidator},
};

/// Runs region validators over whole files.
///
/// Validators are grouped by the partitioning they require; each document is
/// partitioned once per group and every region is offered to each validator
/// of the group.
pub struct FileValidator {
    registry: PartitionerRegistry,
    validators: Vec<Box<dyn TypedRegionValidator>>,
}

impl FileValidator {
    pub fn new(registry: PartitionerRegistry, validators: Vec<Box<dyn TypedRegionValidator>>) -> Self {
        Self {
            registry,
            validators,
        }
    }

    /// Reads `file` below `root` and validates it.
    ///
    /// # Errors
    /// [`PartitionError::Io`] when the file cannot be read.
    pub fn validate_file(
        &self,
        root: &Path,
        file: &SourceFile,
        sink: &mut dyn IssueSink,
    ) -> Result<(), PartitionError> {
        if !self.validators.iter().any(|v| v.is_validator_for_file(file)) {
            return Ok(());
        }
        let mut document = read_document(file.relative_path(), root)?;
        self.validate(&mut document, file, sink)
    }

    /// Validates an open document. Partitioners missing on the document are
    /// installed from the registry.
    ///
    /// # Errors
    /// Propagates partitioning failures; issues go to `sink`.
    pub fn validate(
        &self,
        document: &mut Document,
        file: &SourceFile,
        sink: &mut dyn IssueSink,
    ) -> Result<(), PartitionError> {
        let mut by_partitioning: BTreeMap<PartitioningId, Vec<&dyn TypedRegionValidator>> =
            BTreeMap::new();
        for validator in self.validators.iter().filter(|v| v.is_validator_for_file(file)) {
            by_partitioning
                .entry(validator.required_partitioning(file))
                .or_default()
                .push(validator.as_ref());
        }

        if by_partitioning.is_empty() {
            log::debug!("no validators for {}", file.relative_path());
            return Ok(());
        }

        for (id, validators) in by_partitioning {
            document.setup_partitioner(self.registry.get(id));
            let regions = document.compute_partitioning(id)?.to_vec();
            if regions.is_empty() && !document.is_empty() {
                log::warn!("could not calculate {id} partitions for {}", file.relative_path());
                return Ok(());
            }

            for validator in validators {
                for region in regions.iter().filter(|r| validator.is_validator_for_region(r, file)) {
                    validator.validate_region(region, document, file, sink);
                }
            }
        }
        Ok(())
    }
}
