//! Navigation/layout controller and the module registry

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dashboard::Tone;

/// Content modules selectable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    #[default]
    Overview,
    Health,
    Governance,
    Climate,
    Search,
}

/// Layout a module renders in the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Overview widgets only
    Dashboard,
    /// Research and citation search
    Search,
    /// Chat panel next to the active module's own data panel
    Intelligence,
}

impl Surface {
    pub fn id(&self) -> &'static str {
        match self {
            Surface::Dashboard => "dashboard",
            Surface::Search => "search",
            Surface::Intelligence => "intelligence",
        }
    }
}

/// Sidebar entry metadata
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ModuleInfo {
    pub module: Module,
    pub label: &'static str,
    pub glyph: &'static str,
    pub tone: Tone,
}

pub const MODULES: [ModuleInfo; 5] = [
    ModuleInfo {
        module: Module::Overview,
        label: "Overview",
        glyph: "◆",
        tone: Tone::Blue,
    },
    ModuleInfo {
        module: Module::Health,
        label: "Health Alerts",
        glyph: "♥",
        tone: Tone::Red,
    },
    ModuleInfo {
        module: Module::Governance,
        label: "Governance",
        glyph: "⚖",
        tone: Tone::Purple,
    },
    ModuleInfo {
        module: Module::Climate,
        label: "Climate",
        glyph: "☁",
        tone: Tone::Green,
    },
    ModuleInfo {
        module: Module::Search,
        label: "AI Search",
        glyph: "⌕",
        tone: Tone::Orange,
    },
];

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Overview,
        Module::Health,
        Module::Governance,
        Module::Climate,
        Module::Search,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Module::Overview => "overview",
            Module::Health => "health",
            Module::Governance => "governance",
            Module::Climate => "climate",
            Module::Search => "search",
        }
    }

    pub fn info(&self) -> &'static ModuleInfo {
        &MODULES[self.index()]
    }

    /// Position in the sidebar
    pub fn index(&self) -> usize {
        match self {
            Module::Overview => 0,
            Module::Health => 1,
            Module::Governance => 2,
            Module::Climate => 3,
            Module::Search => 4,
        }
    }

    pub fn surface(&self) -> Surface {
        match self {
            Module::Overview => Surface::Dashboard,
            Module::Search => Surface::Search,
            Module::Health | Module::Governance | Module::Climate => Surface::Intelligence,
        }
    }

    /// Parse an id, falling back to `Overview` for anything unknown
    pub fn from_id_or_default(id: &str) -> Module {
        id.parse().unwrap_or_else(|_| {
            tracing::debug!(id, "unknown module id, falling back to overview");
            Module::Overview
        })
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModule(pub String);

impl fmt::Display for UnknownModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown module '{}'", self.0)
    }
}

impl std::error::Error for UnknownModule {}

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.id() == s.trim())
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

/// Which module is shown and whether the sidebar is collapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationController {
    active: Module,
    sidebar_collapsed: bool,
}

impl NavigationController {
    pub fn new(active: Module, sidebar_collapsed: bool) -> Self {
        Self {
            active,
            sidebar_collapsed,
        }
    }

    pub fn active_module(&self) -> Module {
        self.active
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn select_module(&mut self, module: Module) {
        self.active = module;
    }

    /// Select by id; unknown ids select `Overview`
    pub fn select_module_id(&mut self, id: &str) -> Module {
        let module = Module::from_id_or_default(id);
        self.select_module(module);
        module
    }

    /// Flip the sidebar; returns the new collapsed state
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_matches_index() {
        for module in Module::ALL {
            assert_eq!(module.info().module, module);
            assert_eq!(MODULES[module.index()].module, module);
        }
    }

    #[test]
    fn test_unknown_id_falls_back_to_overview() {
        let mut nav = NavigationController::new(Module::Climate, false);
        assert_eq!(nav.select_module_id("unknown-id"), Module::Overview);
        assert_eq!(nav.active_module(), Module::Overview);
    }

    #[test]
    fn test_select_module_id() {
        let mut nav = NavigationController::default();
        assert_eq!(nav.select_module_id("governance"), Module::Governance);
        assert_eq!(nav.active_module().surface(), Surface::Intelligence);
    }

    #[test]
    fn test_toggle_sidebar_twice_restores() {
        let mut nav = NavigationController::default();
        assert!(nav.toggle_sidebar());
        assert!(!nav.toggle_sidebar());
        assert!(!nav.sidebar_collapsed());
    }
}
