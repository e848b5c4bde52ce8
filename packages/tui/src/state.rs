//! Application state: current screen, table views, modal machine,
//! listing filters, toasts, and the in-memory collections.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tui_input::Input;

use pawdeck_client::{ListingFilters, UserListParams};
use pawdeck_core::{Feed, FeedRequest, Listing, Pair, PaymentTransaction, PromotionBanner, Role};
use pawdeck_store::{Debouncer, MockCollection, QueryCache};

use crate::screens::{self, Screen};
use crate::ui::widgets::dialog::ConfirmDialog;
use crate::ui::widgets::form::FormState;
use crate::ui::widgets::table::TableView;

/// Modal overlay state. At most one modal is open, and each variant
/// owns the state it needs, so a closed modal cannot retain values.
#[derive(Debug)]
pub enum ModalState {
    Closed,
    Create(FormState),
    /// Form stays None until the record arrives; opening an edit never
    /// shows stale fields from a previous record.
    Edit { id: String, form: Option<FormState> },
    ConfirmDelete { id: String, dialog: ConfirmDialog },
    Filter(FormState),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

const TOAST_TTL: Duration = Duration::from_secs(4);

pub struct AppState {
    pub screen: Screen,
    tables: HashMap<Screen, TableView>,
    pub cache: QueryCache,
    pub modal: ModalState,
    /// Applied filters for the listings screen; the filter form edits a
    /// copy and commits here.
    pub listing_filters: ListingFilters,
    pub search_input: Input,
    pub search_active: bool,
    pub debouncer: Debouncer,
    pub toasts: Vec<Toast>,
    pub user_email: Option<String>,

    pub general_listings: MockCollection<Listing>,
    pub payments: MockCollection<PaymentTransaction>,
    pub feeds: MockCollection<Feed>,
    pub pairs: MockCollection<Pair>,
    pub feed_requests: MockCollection<FeedRequest>,
    pub promotions: MockCollection<PromotionBanner>,
}

impl AppState {
    pub fn new() -> Self {
        let tables = Screen::ALL
            .iter()
            .map(|screen| (*screen, TableView::new()))
            .collect();
        Self {
            screen: Screen::Users,
            tables,
            cache: QueryCache::new(),
            modal: ModalState::Closed,
            listing_filters: ListingFilters::baseline(),
            search_input: Input::default(),
            search_active: false,
            debouncer: Debouncer::default(),
            toasts: Vec::new(),
            user_email: None,
            general_listings: MockCollection::new(screens::seed_general_listings()),
            payments: MockCollection::new(screens::seed_payments()),
            feeds: MockCollection::new(screens::seed_feeds()),
            pairs: MockCollection::new(screens::seed_pairs()),
            feed_requests: MockCollection::new(screens::seed_feed_requests()),
            promotions: MockCollection::new(screens::seed_promotions()),
        }
    }

    pub fn table(&self) -> &TableView {
        &self.tables[&self.screen]
    }

    pub fn table_mut(&mut self) -> &mut TableView {
        self.tables.entry(self.screen).or_insert_with(TableView::new)
    }

    /// Switch screens; search and any open modal belong to the screen
    /// they were opened on and do not carry over.
    pub fn set_screen(&mut self, screen: Screen) {
        if screen != self.screen {
            self.screen = screen;
            self.search_input = Input::default();
            self.search_active = false;
            self.modal = ModalState::Closed;
            self.debouncer.cancel();
        }
    }

    pub fn search_text(&self) -> &str {
        self.search_input.value()
    }

    /// Request parameters for the current people screen
    pub fn user_params(&self) -> UserListParams {
        let role = self.screen.role().unwrap_or(Role::User);
        UserListParams::for_role(role).with_search(self.search_text())
    }

    /// Commit the filter form onto a fresh baseline. Blank fields fall
    /// back to defaults and the page always returns to 1, so a filter
    /// change can never show a stale page.
    pub fn apply_listing_filter(&mut self, form: &FormState) {
        let mut filters = ListingFilters::baseline();
        filters.pet_name = form.value_opt("petName");
        filters.pet_type = form.value_opt("type");
        filters.user_id = form.number("userId").map(|v| v as i64);
        filters.min_price = form.number("minPrice");
        filters.max_price = form.number("maxPrice");
        filters.role = form
            .value_opt("role")
            .and_then(|value| value.parse::<Role>().ok());
        // A blank language keeps the baseline "ur"
        if let Some(lang) = form.value_opt("lang") {
            filters.lang = Some(lang);
        }
        self.listing_filters = filters;
    }

    pub fn reset_listing_filter(&mut self) {
        self.listing_filters = ListingFilters::baseline();
    }

    /// Filters for the next listings request, at the given page
    pub fn listing_filters_at(&self, page: u32) -> ListingFilters {
        ListingFilters {
            page: Some(page),
            ..self.listing_filters.clone()
        }
    }

    pub fn toast_success(&mut self, message: impl Into<String>) {
        self.push_toast(message.into(), ToastKind::Success);
    }

    pub fn toast_error(&mut self, message: impl Into<String>) {
        self.push_toast(message.into(), ToastKind::Error);
    }

    fn push_toast(&mut self, message: String, kind: ToastKind) {
        self.toasts.push(Toast {
            message,
            kind,
            created: Instant::now(),
        });
    }

    /// Drop toasts past their display window; called on tick
    pub fn expire_toasts(&mut self) {
        self.toasts.retain(|toast| toast.created.elapsed() < TOAST_TTL);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn type_into(form: &mut FormState, field: usize, text: &str) {
        form.focused = field;
        for c in text.chars() {
            form.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn filter_apply_starts_from_baseline_and_resets_the_page() {
        let mut state = AppState::new();
        state.listing_filters.page = Some(7);

        let mut form = screens::listing_filter_form(&state.listing_filters);
        type_into(&mut form, 0, "Luna");
        type_into(&mut form, 3, "50");
        state.apply_listing_filter(&form);

        assert_eq!(state.listing_filters.page, Some(1));
        assert_eq!(state.listing_filters.limit, Some(10));
        assert_eq!(state.listing_filters.lang.as_deref(), Some("ur"));
        assert_eq!(state.listing_filters.pet_name.as_deref(), Some("Luna"));
        assert_eq!(state.listing_filters.min_price, Some(50.0));
        assert_eq!(state.listing_filters.max_price, None);
    }

    #[test]
    fn filter_language_merges_and_blank_falls_back_to_the_default() {
        let mut state = AppState::new();
        state.listing_filters.lang = None;

        let mut form = screens::listing_filter_form(&state.listing_filters);
        type_into(&mut form, 6, "en");
        state.apply_listing_filter(&form);
        assert_eq!(state.listing_filters.lang.as_deref(), Some("en"));

        state.listing_filters.lang = None;
        let form = screens::listing_filter_form(&state.listing_filters);
        state.apply_listing_filter(&form);
        assert_eq!(state.listing_filters.lang.as_deref(), Some("ur"));
    }

    #[test]
    fn filter_reset_restores_the_baseline() {
        let mut state = AppState::new();
        state.listing_filters.pet_name = Some("Luna".to_string());
        state.listing_filters.page = Some(4);

        state.reset_listing_filter();
        assert_eq!(state.listing_filters, ListingFilters::baseline());
    }

    #[test]
    fn blank_filter_fields_are_dropped_not_sent_empty() {
        let state = AppState::new();
        let form = screens::listing_filter_form(&state.listing_filters);
        let mut fresh = AppState::new();
        fresh.apply_listing_filter(&form);

        assert_eq!(fresh.listing_filters, ListingFilters::baseline());
    }

    #[test]
    fn switching_screens_clears_search_and_modal() {
        let mut state = AppState::new();
        state.search_input = Input::new("rosie".to_string());
        state.modal = ModalState::Create(screens::pricing_create_form());

        state.set_screen(Screen::Breeders);
        assert_eq!(state.search_text(), "");
        assert!(!state.modal.is_open());

        // Re-selecting the same screen keeps everything
        state.search_input = Input::new("milo".to_string());
        state.set_screen(Screen::Breeders);
        assert_eq!(state.search_text(), "milo");
    }

    #[test]
    fn user_params_follow_the_screen_role() {
        let mut state = AppState::new();
        state.set_screen(Screen::Vendors);
        state.search_input = Input::new("ali".to_string());

        let params = state.user_params();
        assert_eq!(params.role, Some(Role::Vendor));
        assert_eq!(params.search.as_deref(), Some("ali"));
    }

    #[test]
    fn toasts_expire_after_their_window() {
        let mut state = AppState::new();
        state.toast_success("Saved");
        state.toasts[0].created = Instant::now() - Duration::from_secs(5);
        state.toast_error("Failed");

        state.expire_toasts();
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].kind, ToastKind::Error);
    }

    #[test]
    fn edit_modal_opens_without_a_form_until_the_record_arrives() {
        let modal = ModalState::Edit {
            id: "7".to_string(),
            form: None,
        };
        match modal {
            ModalState::Edit { form, .. } => assert!(form.is_none()),
            _ => panic!("expected edit modal"),
        }
    }
}
