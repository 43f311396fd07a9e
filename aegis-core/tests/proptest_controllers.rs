use std::sync::Arc;

use aegis_core::{
    CategoryFilter, ConversationController, FilterUpdate, Module, NavigationController,
    SearchController, SimulatedConversation, SimulatedSearch, SubmitOutcome, TimeRange,
};
use proptest::prelude::*;

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

fn arb_module() -> impl Strategy<Value = Module> {
    prop::sample::select(Module::ALL.to_vec())
}

fn arb_filter_update() -> impl Strategy<Value = FilterUpdate> {
    prop_oneof![
        prop::sample::select(CategoryFilter::ALL.to_vec()).prop_map(FilterUpdate::Category),
        prop::sample::select(TimeRange::ALL.to_vec()).prop_map(FilterUpdate::TimeRange),
        (-1.0f32..2.0).prop_map(FilterUpdate::MinRelevance),
    ]
}

proptest! {
    /// Property: toggling the sidebar twice is the identity
    #[test]
    fn prop_toggle_sidebar_is_involution(start in any::<bool>(), module in arb_module()) {
        let mut nav = NavigationController::new(module, start);
        nav.toggle_sidebar();
        nav.toggle_sidebar();
        prop_assert_eq!(nav.sidebar_collapsed(), start);
        prop_assert_eq!(nav.active_module(), module);
    }

    /// Property: selecting any string lands on its module or on overview
    #[test]
    fn prop_select_module_id_is_deterministic(id in "[a-z-]{0,12}") {
        let mut nav = NavigationController::default();
        let selected = nav.select_module_id(&id);
        let expected = Module::ALL.into_iter().find(|m| m.id() == id).unwrap_or(Module::Overview);
        prop_assert_eq!(selected, expected);
        prop_assert_eq!(nav.active_module(), expected);
    }

    /// Property: whitespace-only input never changes the conversation
    #[test]
    fn prop_blank_submit_is_noop(text in "[ \t\r\n]{0,16}") {
        let rt = paused_runtime();
        rt.block_on(async {
            let mut chat = ConversationController::new(Arc::new(SimulatedConversation::default()));
            prop_assert_eq!(chat.submit(text), SubmitOutcome::Empty);
            prop_assert!(chat.messages().is_empty());
            prop_assert!(!chat.is_loading());
            Ok(())
        })?;
    }

    /// Property: a non-blank submit appends exactly one user message holding the text
    #[test]
    fn prop_submit_appends_verbatim(text in "[a-zA-Z ]{0,8}[a-zA-Z][a-zA-Z ]{0,8}") {
        let rt = paused_runtime();
        rt.block_on(async {
            let mut chat = ConversationController::new(Arc::new(SimulatedConversation::default()));
            prop_assert_eq!(chat.submit(text.clone()), SubmitOutcome::Sent);
            prop_assert_eq!(chat.messages().len(), 1);
            prop_assert_eq!(&chat.messages()[0].content, &text);
            prop_assert!(chat.is_loading());
            Ok(())
        })?;
    }

    /// Property: filter changes never mutate results and keep the threshold in range
    #[test]
    fn prop_filters_never_touch_results(updates in prop::collection::vec(arb_filter_update(), 0..20)) {
        let rt = paused_runtime();
        rt.block_on(async {
            let mut search = SearchController::new(Arc::new(SimulatedSearch::default()));
            search.search("water quality");
            search.settle().await;
            let before = search.results().to_vec();

            for update in updates {
                search.set_filter(update);
                prop_assert_eq!(search.results(), before.as_slice());
                let threshold = search.filters().min_relevance;
                prop_assert!((0.0..=1.0).contains(&threshold));
            }
            Ok(())
        })?;
    }
}
