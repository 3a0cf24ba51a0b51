/// Plugin descriptors: the declarative objects each plugin module exports.
///
/// Extension plugins describe slot contributions, routes and an optional
/// settings tab. Data and storage providers only carry identity plus the
/// factory for their setup form.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use pacer_core::{PacerError, PluginId, SlotName};

use crate::factory::{FactoryNames, LazyComponent};

/// Common surface of everything a [`Registry`](crate::registry::Registry) holds.
pub trait Descriptor: Send + Sync {
    fn id(&self) -> &PluginId;
    fn label(&self) -> &str;
    fn icon(&self) -> Option<&str>;

    /// Check the invariants the type system cannot express.
    fn validate(&self) -> Result<(), PacerError> {
        validate_identity(self.id(), self.label())
    }
}

fn validate_identity(id: &PluginId, label: &str) -> Result<(), PacerError> {
    let raw = id.as_str();
    if raw.is_empty() {
        return Err(PacerError::invalid(raw, "missing 'id'"));
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(PacerError::invalid(raw, "'id' must not contain whitespace"));
    }
    if label.trim().is_empty() {
        return Err(PacerError::invalid(raw, "missing 'label'"));
    }
    Ok(())
}

/// A route an extension adds to the host router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDef {
    pub path: String,
    pub name: String,
    /// Name of the page component the host mounts for this route.
    pub component: String,
}

impl RouteDef {
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component: component.into(),
        }
    }
}

/// Descriptor of a UI extension plugin.
#[derive(Clone)]
pub struct PluginDescriptor {
    pub id: PluginId,
    pub label: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    /// `None` and an empty map both mean "contributes to no slot".
    pub slots: Option<HashMap<SlotName, Vec<LazyComponent>>>,
    pub routes: Vec<RouteDef>,
    /// Opaque block read by the host's settings tab strip.
    pub tab_metadata: Option<serde_json::Value>,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<PluginId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            description: None,
            slots: None,
            routes: Vec::new(),
            tab_metadata: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append one factory to `slot`. Repeated calls keep declaration order.
    pub fn with_slot(mut self, slot: impl Into<SlotName>, factory: LazyComponent) -> Self {
        self.slots
            .get_or_insert_with(HashMap::new)
            .entry(slot.into())
            .or_default()
            .push(factory);
        self
    }

    /// Declare an explicitly empty slot mapping.
    pub fn with_empty_slots(mut self) -> Self {
        self.slots.get_or_insert_with(HashMap::new);
        self
    }

    pub fn with_route(mut self, route: RouteDef) -> Self {
        self.routes.push(route);
        self
    }

    pub fn with_tab_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.tab_metadata = Some(metadata);
        self
    }

    /// Factories contributed to `slot`, in declaration order. Empty if none.
    pub fn factories_for(&self, slot: &str) -> &[LazyComponent] {
        self.slots
            .as_ref()
            .and_then(|slots| slots.get(slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names of the slots this plugin fills with at least one factory, sorted.
    pub fn slot_names(&self) -> Vec<&SlotName> {
        let mut names: Vec<&SlotName> = self
            .slots
            .iter()
            .flatten()
            .filter(|(_, factories)| !factories.is_empty())
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names
    }
}

impl Descriptor for PluginDescriptor {
    fn id(&self) -> &PluginId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    fn validate(&self) -> Result<(), PacerError> {
        validate_identity(&self.id, &self.label)?;
        if let Some(slots) = &self.slots {
            if slots.keys().any(|slot| slot.as_str().trim().is_empty()) {
                return Err(PacerError::invalid(self.id.as_str(), "empty slot name"));
            }
        }
        for route in &self.routes {
            if !route.path.starts_with('/') {
                return Err(PacerError::invalid(
                    self.id.as_str(),
                    format!("route path '{}' must start with '/'", route.path),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Option<Vec<(&SlotName, FactoryNames<'_>)>> = self.slots.as_ref().map(|slots| {
            slots
                .iter()
                .map(|(name, factories)| (name, FactoryNames(factories)))
                .collect()
        });
        f.debug_struct("PluginDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("description", &self.description)
            .field("slots", &slots)
            .field("routes", &self.routes)
            .field("tab_metadata", &self.tab_metadata)
            .finish()
    }
}

/// Descriptor of a data-source or storage provider.
#[derive(Clone)]
pub struct ProviderDescriptor {
    pub id: PluginId,
    pub label: String,
    pub icon: Option<String>,
    /// Resolves to the provider's configuration form.
    pub setup_component: LazyComponent,
}

impl ProviderDescriptor {
    pub fn new(
        id: impl Into<PluginId>,
        label: impl Into<String>,
        setup_component: LazyComponent,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            setup_component,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

impl Descriptor for ProviderDescriptor {
    fn id(&self) -> &PluginId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("setup_component", &self.setup_component.name())
            .finish()
    }
}

/// Serializable listing of a descriptor, for CLIs and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DescriptorSummary {
    pub id: PluginId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<String>,
}

impl From<&PluginDescriptor> for DescriptorSummary {
    fn from(d: &PluginDescriptor) -> Self {
        Self {
            id: d.id.clone(),
            label: d.label.clone(),
            icon: d.icon.clone(),
            description: d.description.clone(),
            slots: d.slot_names().into_iter().cloned().collect(),
            routes: d.routes.iter().map(|r| r.path.clone()).collect(),
        }
    }
}

impl From<&ProviderDescriptor> for DescriptorSummary {
    fn from(d: &ProviderDescriptor) -> Self {
        Self {
            id: d.id.clone(),
            label: d.label.clone(),
            icon: d.icon.clone(),
            description: None,
            slots: Vec::new(),
            routes: Vec::new(),
        }
    }
}
