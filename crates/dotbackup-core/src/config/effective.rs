//! Invocation-time overrides layered over a loaded configuration

use crate::config::{App, Config};
use crate::{Error, Result};

/// Flags given for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Force clean mode on; it cannot switch a configured `clean: true` off
    pub clean: bool,
    /// Applications to process; empty means all of them
    pub apps: Vec<String>,
}

/// A configuration with invocation overrides applied, as the engine sees it.
///
/// Built by [`Config::effective`]; the base configuration stays untouched.
#[derive(Debug, Clone)]
pub struct EffectiveConfig<'a> {
    /// The loaded configuration
    pub config: &'a Config,
    /// Whether destinations are erased before copying
    pub clean: bool,
    /// Requested application names, first occurrence kept; empty means all
    pub selected_apps: Vec<String>,
}

impl Config {
    /// Combine this configuration with invocation flags.
    pub fn effective(&self, overrides: &Overrides) -> EffectiveConfig<'_> {
        let mut selected_apps: Vec<String> = Vec::with_capacity(overrides.apps.len());
        for name in &overrides.apps {
            if !selected_apps.contains(name) {
                selected_apps.push(name.clone());
            }
        }

        EffectiveConfig {
            config: self,
            clean: self.clean || overrides.clean,
            selected_apps,
        }
    }
}

impl<'a> EffectiveConfig<'a> {
    /// Applications this run processes, in processing order.
    ///
    /// Explicit selections keep the order they were given in; otherwise all
    /// applications are returned in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownApp`] naming the first selected application
    /// that is not configured.
    pub fn selected(&self) -> Result<Vec<&'a App>> {
        if self.selected_apps.is_empty() {
            return Ok(self.config.apps.values().collect());
        }

        self.selected_apps
            .iter()
            .map(|name| {
                self.config.app(name).ok_or_else(|| Error::UnknownApp {
                    name: name.clone(),
                })
            })
            .collect()
    }
}
