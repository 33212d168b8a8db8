use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::settings::Settings;

/// A named helper contributed by an extension; renders from the frozen settings.
pub type Helper = Arc<dyn Fn(&Settings) -> String + Send + Sync>;

/// Registration record for a bound extension.
/// - `helpers`: helper names this extension contributed, in contribution order.
pub struct Registration {
    pub name: &'static str,
    pub helpers: SmallVec<[&'static str; 2]>,
}

/// Instance-owned record of bound extensions and their helpers.
/// Owned by the builder during assembly and by the instance afterwards;
/// no process-wide registry exists.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: SmallVec<[Registration; 4]>,
    helpers: HashMap<&'static str, Helper>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.entries.iter().any(|reg| reg.name == name)
    }

    /// Record a completed binding. Helper name collisions across extensions
    /// follow last-write-wins, with a warning.
    pub(crate) fn commit(&mut self, name: &'static str, helpers: Vec<(&'static str, Helper)>) {
        let mut names: SmallVec<[&'static str; 2]> = SmallVec::new();
        for (helper_name, f) in helpers {
            if self.helpers.insert(helper_name, f).is_some() {
                tracing::warn!(helper = helper_name, extension = name, "helper name already registered; overriding");
            }
            names.push(helper_name);
        }
        self.entries.push(Registration {
            name,
            helpers: names,
        });
    }

    pub fn helper(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }

    /// Iterate bound extension names in binding order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|reg| reg.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
