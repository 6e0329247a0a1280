//! In-memory collection of analyzed datasets with one active selection.
//!
//! The workspace is owned by a single caller (a UI session or the CLI), so
//! every mutation goes through `&mut self` and nothing is shared.

use tracing::debug;

use crate::cleaner::DataCleaner;
use crate::config::CleaningOptions;
use crate::error::{DataQualityError, Result};
use crate::types::Dataset;

#[derive(Debug, Clone, Default)]
pub struct DatasetWorkspace {
    datasets: Vec<Dataset>,
    active: Option<String>,
}

impl DatasetWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `dataset` and make it the active one.
    pub fn add(&mut self, dataset: Dataset) -> &Dataset {
        debug!("Adding dataset '{}' ({})", dataset.name(), dataset.id());
        self.active = Some(dataset.id().to_string());
        self.datasets.push(dataset);
        &self.datasets[self.datasets.len() - 1]
    }

    /// Make the dataset with `id` active.
    pub fn select(&mut self, id: &str) -> Result<&Dataset> {
        let index = self
            .position(id)
            .ok_or_else(|| DataQualityError::DatasetNotFound(id.to_string()))?;
        self.active = Some(id.to_string());
        Ok(&self.datasets[index])
    }

    pub fn active(&self) -> Option<&Dataset> {
        self.active_index().map(|index| &self.datasets[index])
    }

    /// Swap the active dataset for `replacement`, keeping its position in
    /// the list. The replacement becomes active.
    pub fn replace_active(&mut self, replacement: Dataset) -> Result<&Dataset> {
        let index = self.active_index().ok_or(DataQualityError::NoActiveDataset)?;
        debug!(
            "Replacing '{}' with '{}'",
            self.datasets[index].name(),
            replacement.name()
        );
        self.active = Some(replacement.id().to_string());
        self.datasets[index] = replacement;
        Ok(&self.datasets[index])
    }

    /// Clean the active dataset and put the result in its place.
    pub fn clean_active(
        &mut self,
        cleaner: &DataCleaner,
        options: &CleaningOptions,
    ) -> Result<&Dataset> {
        let active = self.active().ok_or(DataQualityError::NoActiveDataset)?;
        let cleaned = cleaner.clean(active, options)?;
        self.replace_active(cleaned)
    }

    /// Remove the active dataset; afterwards nothing is active.
    pub fn remove_active(&mut self) -> Result<Dataset> {
        let index = self.active_index().ok_or(DataQualityError::NoActiveDataset)?;
        self.active = None;
        Ok(self.datasets.remove(index))
    }

    pub fn list(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.datasets.iter().position(|dataset| dataset.id() == id)
    }

    fn active_index(&self) -> Option<usize> {
        self.active.as_deref().and_then(|id| self.position(id))
    }
}
