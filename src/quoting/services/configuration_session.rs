use super::ConfigurationCascade;
use crate::quoting::domain::{Configuration, ProductCatalog};
use uuid::Uuid;

const CONFIGURATION_ID_LEN: usize = 8;

fn new_configuration_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(CONFIGURATION_ID_LEN);
    id
}

/// ConfigurationSession owning the configurations of one quoting session
///
/// Holds the ordered list and the index of the configuration being edited.
/// The selected index is always valid while the list is non-empty.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationSession {
    configurations: Vec<Configuration>,
    selected: usize,
}

impl ConfigurationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a configuration defaulted to the first catalog model and its
    /// first tier, with licenses matched to that tier, and selects it
    pub fn add(&mut self, catalog: &ProductCatalog) -> &mut Configuration {
        let name = format!("Configuration {}", self.configurations.len() + 1);
        let mut config = Configuration::new(new_configuration_id(), name);
        if let Some(first) = catalog.models.first() {
            ConfigurationCascade::select_model(&mut config, catalog, Some(&first.id));
        }
        self.push_selected(config)
    }

    /// Appends a copy of the selected configuration under a new id and
    /// selects it. Returns `None` for an empty session.
    pub fn clone_selected(&mut self) -> Option<&mut Configuration> {
        let mut copy = self.current()?.clone();
        copy.id = new_configuration_id();
        copy.name = format!("{} (copy)", copy.name);
        Some(self.push_selected(copy))
    }

    fn push_selected(&mut self, config: Configuration) -> &mut Configuration {
        self.configurations.push(config);
        self.selected = self.configurations.len() - 1;
        &mut self.configurations[self.selected]
    }

    /// Removes the configuration at `index`.
    ///
    /// The selection moves back by one when the removed entry was at or
    /// before it, never below zero.
    pub fn remove(&mut self, index: usize) -> Option<Configuration> {
        if index >= self.configurations.len() {
            return None;
        }
        let removed = self.configurations.remove(index);
        if index <= self.selected {
            self.selected = self.selected.saturating_sub(1);
        }
        Some(removed)
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.configurations.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<&Configuration> {
        self.configurations.get(self.selected)
    }

    pub fn current_mut(&mut self) -> Option<&mut Configuration> {
        self.configurations.get_mut(self.selected)
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn into_configurations(self) -> Vec<Configuration> {
        self.configurations
    }
}
