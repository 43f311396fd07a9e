//! Composition root: owns navigation state and mounts the controller the
//! active module's surface needs.

use std::sync::Arc;

use tracing::debug;

use crate::backend::{ConversationBackend, SearchBackend, SimulatedConversation, SimulatedSearch};
use crate::config::AegisConfig;
use crate::conversation::ConversationController;
use crate::navigation::{Module, NavigationController, Surface};
use crate::search::SearchController;

/// Backends handed to every controller the shell mounts
#[derive(Clone)]
pub struct Backends {
    pub conversation: Arc<dyn ConversationBackend>,
    pub search: Arc<dyn SearchBackend>,
}

impl Backends {
    /// Simulated backends with the delays from `config`
    pub fn simulated(config: &AegisConfig) -> Self {
        Self {
            conversation: Arc::new(SimulatedConversation::new(config.conversation.delay())),
            search: Arc::new(SimulatedSearch::new(config.search.delay())),
        }
    }
}

/// Controller currently mounted in the content area
enum Mounted {
    None,
    Conversation(ConversationController),
    Search(SearchController),
}

pub struct Shell {
    nav: NavigationController,
    backends: Backends,
    config: AegisConfig,
    mounted: Mounted,
}

impl Shell {
    /// Start on the configured module with a freshly mounted surface
    pub fn new(backends: Backends, config: AegisConfig) -> Self {
        let nav = NavigationController::new(config.ui.start_module(), config.ui.sidebar_collapsed);
        let surface = nav.active_module().surface();
        let mut shell = Self {
            nav,
            backends,
            config,
            mounted: Mounted::None,
        };
        shell.mount(surface);
        shell
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn active_module(&self) -> Module {
        self.nav.active_module()
    }

    pub fn surface(&self) -> Surface {
        self.nav.active_module().surface()
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.nav.sidebar_collapsed()
    }

    pub fn select_module(&mut self, module: Module) {
        let previous = self.nav.active_module().surface();
        self.nav.select_module(module);
        let next = module.surface();
        if previous != next {
            debug!(module = %module, ?previous, ?next, "switching surface");
            self.unmount();
            self.mount(next);
        }
    }

    /// Select by id; unknown ids select overview
    pub fn select_module_id(&mut self, id: &str) -> Module {
        let module = Module::from_id_or_default(id);
        self.select_module(module);
        module
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        self.nav.toggle_sidebar()
    }

    pub fn conversation(&self) -> Option<&ConversationController> {
        match &self.mounted {
            Mounted::Conversation(chat) => Some(chat),
            _ => None,
        }
    }

    pub fn conversation_mut(&mut self) -> Option<&mut ConversationController> {
        match &mut self.mounted {
            Mounted::Conversation(chat) => Some(chat),
            _ => None,
        }
    }

    pub fn search(&self) -> Option<&SearchController> {
        match &self.mounted {
            Mounted::Search(search) => Some(search),
            _ => None,
        }
    }

    pub fn search_mut(&mut self) -> Option<&mut SearchController> {
        match &mut self.mounted {
            Mounted::Search(search) => Some(search),
            _ => None,
        }
    }

    /// Apply any completions that have arrived. Returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        match &mut self.mounted {
            Mounted::None => false,
            Mounted::Conversation(chat) => chat.poll(),
            Mounted::Search(search) => search.poll(),
        }
    }

    fn mount(&mut self, surface: Surface) {
        self.mounted = match surface {
            Surface::Dashboard => Mounted::None,
            Surface::Intelligence => Mounted::Conversation(
                ConversationController::new(Arc::clone(&self.backends.conversation))
                    .with_deadline(self.config.conversation.deadline()),
            ),
            Surface::Search => Mounted::Search(
                SearchController::new(Arc::clone(&self.backends.search))
                    .with_policy(self.config.search.filter_policy)
                    .with_deadline(self.config.search.deadline())
                    .with_filters(self.config.search.initial_filters()),
            ),
        };
    }

    fn unmount(&mut self) {
        match std::mem::replace(&mut self.mounted, Mounted::None) {
            Mounted::None => {}
            Mounted::Conversation(mut chat) => chat.dispose(),
            Mounted::Search(mut search) => search.dispose(),
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.unmount();
    }
}
