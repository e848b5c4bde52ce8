//! Main application: event loop, data loading through the query cache,
//! and the create / edit / delete / filter flows every screen shares.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use tui_input::backend::crossterm::EventHandler as InputEventHandler;

use pawdeck_client::{ApiClient, PricingFilters};
use pawdeck_core::{
    validate::is_plausible_url, CreatePricingPayload, CreateUserPayload, FeaturedListing,
    PagedEnvelope, PricingPlan, UpdateListingPayload, UpdatePricingPayload, UpdateUserPayload,
    UserRecord, ValidationError,
};
use pawdeck_store::{Collection, QueryKey};

use crate::events::{AppEvent, EventHandler};
use crate::screens::{self, Screen};
use crate::state::{AppState, ModalState};
use crate::ui;
use crate::ui::widgets::dialog::DialogResult;
use crate::ui::widgets::form::{encode_image_file, FormState};
use crate::ui::widgets::table::TableRow;

const PAGE_SIZE: u32 = 10;

pub struct App {
    pub state: AppState,
    client: ApiClient,
    pub should_quit: bool,
    /// Queued list reload (`Some(force)`), run between draws so the
    /// table's loading state gets a frame on screen first
    pending_reload: Option<bool>,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: AppState::new(),
            client,
            should_quit: false,
            pending_reload: None,
        }
    }

    pub fn with_session(mut self, email: impl Into<String>) -> Self {
        self.state.user_email = Some(email.into());
        self
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        let mut event_handler = EventHandler::new(250);
        self.request_reload(false);

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            // A queued reload runs after the draw, so the loading state
            // was on screen before the fetch is awaited
            if self.pending_reload.is_some() {
                self.run_pending_reload().await;
                continue;
            }

            if let Some(event) = event_handler.next().await {
                match event {
                    AppEvent::Key(key) => {
                        let sender = event_handler.sender().clone();
                        self.handle_key(key, &sender).await;
                    }
                    AppEvent::Tick => self.state.expire_toasts(),
                    AppEvent::SearchReady => {
                        self.state.table_mut().page = 1;
                        self.request_reload(false);
                    }
                    AppEvent::EditReady { id, form } => self.install_edit_form(&id, *form),
                    AppEvent::EditFailed { id, message } => self.fail_edit_load(&id, &message),
                    AppEvent::Quit => self.quit(),
                }
            }
        }

        Ok(())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Queue a reload of the current screen and flag its table as
    /// loading. `force` survives until the reload actually runs.
    fn request_reload(&mut self, force: bool) {
        self.state.table_mut().loading = true;
        let queued = self.pending_reload.unwrap_or(false);
        self.pending_reload = Some(queued || force);
    }

    /// Run a queued reload, if any. Failures become a toast and clear
    /// the loading flag.
    pub async fn run_pending_reload(&mut self) {
        let Some(force) = self.pending_reload.take() else {
            return;
        };
        if let Err(e) = self.load_current(force).await {
            self.state.table_mut().loading = false;
            self.state.toast_error(format!("Load failed: {}", e));
        }
    }

    // --- key routing ---

    pub async fn handle_key(&mut self, key: KeyEvent, sender: &mpsc::UnboundedSender<AppEvent>) {
        if self.state.search_active {
            self.handle_search_key(key, sender);
            return;
        }

        if self.state.modal.is_open() {
            self.handle_modal_key(key).await;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab => {
                let next = self.state.screen.next();
                self.switch_screen(next);
            }
            KeyCode::BackTab => {
                let prev = self.state.screen.prev();
                self.switch_screen(prev);
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.table_mut().select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.state.table_mut().select_prev(),
            KeyCode::Char(']') => {
                if let Some(page) = self.state.table().next_page() {
                    self.go_to_page(page);
                }
            }
            KeyCode::Char('[') => {
                if let Some(page) = self.state.table().prev_page() {
                    self.go_to_page(page);
                }
            }
            KeyCode::Char('/') => self.state.search_active = true,
            KeyCode::Char('n') => self.open_create(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit(sender),
            KeyCode::Char('d') => self.open_delete(),
            KeyCode::Char('f') => self.open_filter(),
            KeyCode::Char('t') => self.toggle_promotion(),
            KeyCode::Char('r') => self.request_reload(true),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, sender: &mpsc::UnboundedSender<AppEvent>) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.state.search_active = false;
            }
            _ => {
                let before = self.state.search_text().to_string();
                self.state.search_input.handle_event(&Event::Key(key));
                if self.state.search_text() != before {
                    let debouncer = self.state.debouncer.clone();
                    let sender = sender.clone();
                    tokio::spawn(async move {
                        if debouncer.trigger().await {
                            let _ = sender.send(AppEvent::SearchReady);
                        }
                    });
                }
            }
        }
    }

    async fn handle_modal_key(&mut self, key: KeyEvent) {
        // Route the key while the modal is borrowed, then run whatever
        // follow-up needs the whole app.
        let action = match &mut self.state.modal {
            ModalState::Closed => ModalAction::None,
            ModalState::ConfirmDelete { dialog, .. } => match dialog.handle_key(key.code) {
                DialogResult::Confirmed => ModalAction::ConfirmDelete,
                DialogResult::Cancelled => ModalAction::Close,
                DialogResult::Pending => ModalAction::None,
            },
            ModalState::Filter(form) => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => ModalAction::ApplyFilter,
                KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    ModalAction::ResetFilter
                }
                _ => {
                    form.handle_key(key);
                    ModalAction::None
                }
            },
            ModalState::Create(form) | ModalState::Edit { form: Some(form), .. } => {
                match key.code {
                    KeyCode::Esc => ModalAction::Close,
                    KeyCode::Enter => ModalAction::Submit,
                    _ => {
                        form.handle_key(key);
                        ModalAction::None
                    }
                }
            }
            ModalState::Edit { form: None, .. } => match key.code {
                KeyCode::Esc => ModalAction::Close,
                _ => ModalAction::None,
            },
        };

        match action {
            ModalAction::None => {}
            ModalAction::Close => self.state.modal = ModalState::Closed,
            ModalAction::ConfirmDelete => self.confirm_delete().await,
            ModalAction::ApplyFilter => self.apply_filter(),
            ModalAction::ResetFilter => {
                self.state.reset_listing_filter();
                self.state.modal = ModalState::Closed;
                self.state.table_mut().page = 1;
                self.request_reload(false);
            }
            ModalAction::Submit => self.submit_form().await,
        }
    }

    fn switch_screen(&mut self, screen: Screen) {
        self.state.set_screen(screen);
        self.request_reload(false);
    }

    fn go_to_page(&mut self, page: u32) {
        self.state.table_mut().page = page;
        self.state.table_mut().selected = None;
        self.request_reload(false);
    }

    /// Flip the active flag on the selected promotion banner
    fn toggle_promotion(&mut self) {
        if self.state.screen != Screen::Promotions {
            return;
        }
        let Some(id) = self.state.table().selected_id().map(str::to_string) else {
            return;
        };
        match self
            .state
            .promotions
            .update(&id, |banner| banner.is_active = !banner.is_active)
        {
            Ok(()) => self.request_reload(false),
            Err(e) => self.state.toast_error(format!("Toggle failed: {}", e)),
        }
    }

    // --- data loading ---

    /// Load the current screen's rows, reading through the cache.
    /// `force_refresh` bypasses the cache without invalidating siblings.
    pub async fn load_current(&mut self, force_refresh: bool) -> Result<()> {
        match self.state.screen {
            Screen::Users | Screen::Vendors | Screen::Breeders | Screen::Veterinary => {
                self.load_users(force_refresh).await
            }
            Screen::Listings => self.load_listings(force_refresh).await,
            Screen::Pricing => self.load_pricing(force_refresh).await,
            Screen::GeneralListings => {
                self.load_mock_rows(|state| {
                    let page = state.general_listings.page(
                        state.search_input.value(),
                        state.tables_page(),
                        PAGE_SIZE,
                    );
                    (
                        page.items.iter().map(screens::general_listing_row).collect(),
                        page.page,
                        page.last_page,
                        page.total,
                    )
                });
                Ok(())
            }
            Screen::Promotions => {
                self.load_mock_rows(|state| {
                    let page = state.promotions.page(
                        state.search_input.value(),
                        state.tables_page(),
                        PAGE_SIZE,
                    );
                    (
                        page.items.iter().map(screens::promotion_row).collect(),
                        page.page,
                        page.last_page,
                        page.total,
                    )
                });
                Ok(())
            }
            Screen::Payments => {
                self.load_mock_rows(|state| {
                    let page = state.payments.page(
                        state.search_input.value(),
                        state.tables_page(),
                        PAGE_SIZE,
                    );
                    (
                        page.items.iter().map(screens::payment_row).collect(),
                        page.page,
                        page.last_page,
                        page.total,
                    )
                });
                Ok(())
            }
            Screen::Feeds => {
                self.load_mock_rows(|state| {
                    let page =
                        state
                            .feeds
                            .page(state.search_input.value(), state.tables_page(), PAGE_SIZE);
                    (
                        page.items.iter().map(screens::feed_row).collect(),
                        page.page,
                        page.last_page,
                        page.total,
                    )
                });
                Ok(())
            }
            Screen::Pairs => {
                self.load_mock_rows(|state| {
                    let page =
                        state
                            .pairs
                            .page(state.search_input.value(), state.tables_page(), PAGE_SIZE);
                    (
                        page.items.iter().map(screens::pair_row).collect(),
                        page.page,
                        page.last_page,
                        page.total,
                    )
                });
                Ok(())
            }
            Screen::FeedRequests => {
                self.load_mock_rows(|state| {
                    let page = state.feed_requests.page(
                        state.search_input.value(),
                        state.tables_page(),
                        PAGE_SIZE,
                    );
                    (
                        page.items.iter().map(screens::feed_request_row).collect(),
                        page.page,
                        page.last_page,
                        page.total,
                    )
                });
                Ok(())
            }
        }
    }

    fn load_mock_rows<F>(&mut self, build: F)
    where
        F: FnOnce(&AppState) -> (Vec<TableRow>, u32, u32, u64),
    {
        let (rows, page, last_page, total) = build(&self.state);
        self.state.table_mut().set_rows(rows, page, last_page, total);
    }

    async fn load_users(&mut self, force_refresh: bool) -> Result<()> {
        let params = self.state.user_params();
        let key = QueryKey::new(Collection::Users, params.cache_key());

        let users: Vec<UserRecord> = match (force_refresh, self.state.cache.get(&key)) {
            (false, Some(cached)) => serde_json::from_value(cached.clone())?,
            _ => {
                debug!(params = %key.params, "Fetching users");
                let envelope = self.client.list_users(&params).await?;
                self.state
                    .cache
                    .insert(key, serde_json::to_value(&envelope.data)?);
                envelope.data
            }
        };

        let total = users.len() as u64;
        let rows = users.iter().map(screens::user_row).collect();
        self.state.table_mut().set_rows(rows, 1, 1, total);
        Ok(())
    }

    async fn load_listings(&mut self, force_refresh: bool) -> Result<()> {
        let page = self.state.table().page;
        let filters = self.state.listing_filters_at(page);
        let key = QueryKey::new(Collection::Listings, filters.cache_key());

        let envelope: PagedEnvelope<Vec<FeaturedListing>> =
            match (force_refresh, self.state.cache.get(&key)) {
                (false, Some(cached)) => serde_json::from_value(cached.clone())?,
                _ => {
                    debug!(params = %key.params, "Fetching listings");
                    let envelope = self.client.list_featured_listings(&filters).await?;
                    self.state.cache.insert(key, serde_json::to_value(&envelope)?);
                    envelope
                }
            };

        let rows = envelope.data.iter().map(screens::listing_row).collect();
        self.state
            .table_mut()
            .set_rows(rows, envelope.page, envelope.last_page, envelope.total);
        Ok(())
    }

    async fn load_pricing(&mut self, force_refresh: bool) -> Result<()> {
        let filters = PricingFilters {
            page: Some(self.state.table().page),
            limit: Some(PAGE_SIZE),
        };
        let key = QueryKey::new(Collection::PricingPlans, filters.cache_key());

        let envelope: PagedEnvelope<Vec<PricingPlan>> =
            match (force_refresh, self.state.cache.get(&key)) {
                (false, Some(cached)) => serde_json::from_value(cached.clone())?,
                _ => {
                    debug!(params = %key.params, "Fetching pricing plans");
                    let envelope = self.client.list_pricing_plans(&filters).await?;
                    self.state.cache.insert(key, serde_json::to_value(&envelope)?);
                    envelope
                }
            };

        let rows = envelope.data.iter().map(screens::pricing_row).collect();
        self.state
            .table_mut()
            .set_rows(rows, envelope.page, envelope.last_page, envelope.total);
        Ok(())
    }

    // --- modal openers ---

    pub fn open_create(&mut self) {
        if !self.state.screen.can_create() {
            return;
        }
        let form = match self.state.screen {
            Screen::Users | Screen::Vendors | Screen::Breeders | Screen::Veterinary => {
                let role = self.state.user_params().role.unwrap_or(pawdeck_core::Role::User);
                screens::user_create_form(role)
            }
            Screen::Pricing => screens::pricing_create_form(),
            Screen::GeneralListings => screens::general_listing_form(None),
            Screen::Payments => screens::payment_form(None),
            Screen::Feeds => screens::feed_form(None),
            Screen::Pairs => screens::pair_form(None),
            Screen::FeedRequests => screens::feed_request_form(None),
            Screen::Promotions => screens::promotion_form(None),
            Screen::Listings => return,
        };
        self.state.modal = ModalState::Create(form);
    }

    /// Open the edit modal for the selected row. Without a selection
    /// this does nothing, including not fetching anything. Remote
    /// records are fetched on a task that reports back through the
    /// event channel, so the loading modal stays interactive.
    pub fn open_edit(&mut self, sender: &mpsc::UnboundedSender<AppEvent>) {
        let Some(id) = self.state.table().selected_id().map(str::to_string) else {
            return;
        };

        if self.state.screen.is_mock() {
            let form = match self.state.screen {
                Screen::GeneralListings => self
                    .state
                    .general_listings
                    .get(&id)
                    .map(|l| screens::general_listing_form(Some(l))),
                Screen::Payments => self.state.payments.get(&id).map(|p| screens::payment_form(Some(p))),
                Screen::Feeds => self.state.feeds.get(&id).map(|f| screens::feed_form(Some(f))),
                Screen::Pairs => self.state.pairs.get(&id).map(|p| screens::pair_form(Some(p))),
                Screen::FeedRequests => self
                    .state
                    .feed_requests
                    .get(&id)
                    .map(|r| screens::feed_request_form(Some(r))),
                Screen::Promotions => self
                    .state
                    .promotions
                    .get(&id)
                    .map(|b| screens::promotion_form(Some(b))),
                _ => None,
            };
            match form {
                Some(form) => self.state.modal = ModalState::Edit { id, form: Some(form) },
                None => self.state.toast_error("Record no longer exists"),
            }
            return;
        }

        self.state.modal = ModalState::Edit {
            id: id.clone(),
            form: None,
        };

        let client = self.client.clone();
        let screen = self.state.screen;
        let sender = sender.clone();
        tokio::spawn(async move {
            match Self::fetch_edit_form(&client, screen, &id).await {
                Ok(form) => {
                    let _ = sender.send(AppEvent::EditReady {
                        id,
                        form: Box::new(form),
                    });
                }
                Err(e) => {
                    let _ = sender.send(AppEvent::EditFailed {
                        id,
                        message: e.to_string(),
                    });
                }
            }
        });
    }

    /// Install a fetched record into the edit modal, unless the modal
    /// moved on while the fetch was in flight
    pub fn install_edit_form(&mut self, id: &str, form: FormState) {
        if let ModalState::Edit { id: open_id, form: slot } = &mut self.state.modal {
            if open_id == id && slot.is_none() {
                *slot = Some(form);
            }
        }
    }

    pub fn fail_edit_load(&mut self, id: &str, message: &str) {
        let waiting = matches!(
            &self.state.modal,
            ModalState::Edit { id: open_id, form: None } if open_id == id
        );
        if waiting {
            warn!("Failed to load record {}: {}", id, message);
            self.state.modal = ModalState::Closed;
            self.state.toast_error(format!("Load failed: {}", message));
        }
    }

    async fn fetch_edit_form(client: &ApiClient, screen: Screen, id: &str) -> Result<FormState> {
        let numeric: i64 = id.parse()?;
        let form = match screen {
            Screen::Users | Screen::Vendors | Screen::Breeders | Screen::Veterinary => {
                let envelope = client.get_user(numeric).await?;
                screens::user_edit_form(&envelope.data)
            }
            Screen::Listings => {
                let envelope = client.get_featured_listing(numeric).await?;
                screens::listing_edit_form(&envelope.data)
            }
            Screen::Pricing => {
                let envelope = client.get_pricing_plan(numeric).await?;
                screens::pricing_edit_form(&envelope.data)
            }
            _ => anyhow::bail!("screen has no remote records"),
        };
        Ok(form)
    }

    pub fn open_delete(&mut self) {
        let Some(selected) = self.state.table().selected else {
            return;
        };
        let Some(row) = self.state.table().rows.get(selected) else {
            return;
        };
        let subject = match row.cells.get(1) {
            Some(name) if !name.is_empty() => format!("\"{}\"", name),
            _ => format!("record #{}", row.id),
        };
        self.state.modal = ModalState::ConfirmDelete {
            id: row.id.clone(),
            dialog: crate::ui::widgets::dialog::ConfirmDialog::delete(subject),
        };
    }

    pub fn open_filter(&mut self) {
        if !self.state.screen.has_filter() {
            return;
        }
        let form = screens::listing_filter_form(&self.state.listing_filters);
        self.state.modal = ModalState::Filter(form);
    }

    // --- mutations ---

    fn apply_filter(&mut self) {
        let ModalState::Filter(form) = &mut self.state.modal else {
            return;
        };
        if !form.validate() {
            return;
        }
        let form = match std::mem::replace(&mut self.state.modal, ModalState::Closed) {
            ModalState::Filter(form) => form,
            _ => return,
        };
        self.state.apply_listing_filter(&form);
        self.state.table_mut().page = 1;
        self.request_reload(false);
    }

    pub async fn confirm_delete(&mut self) {
        let id = match std::mem::replace(&mut self.state.modal, ModalState::Closed) {
            ModalState::ConfirmDelete { id, .. } => id,
            _ => return,
        };

        let result = self.delete_record(&id).await;
        match result {
            Ok(()) => {
                if let Some(collection) = self.state.screen.collection() {
                    self.state.cache.invalidate(collection);
                }
                self.state.toast_success("Record deleted");
            }
            Err(e) => self.state.toast_error(format!("Delete failed: {}", e)),
        }
        self.request_reload(false);
    }

    async fn delete_record(&mut self, id: &str) -> Result<()> {
        match self.state.screen {
            Screen::Users | Screen::Vendors | Screen::Breeders | Screen::Veterinary => {
                self.client.delete_user(id.parse()?).await?;
            }
            Screen::Listings => {
                self.client.delete_featured_listing(id.parse()?).await?;
            }
            Screen::Pricing => {
                self.client.delete_pricing_plan(id.parse()?).await?;
            }
            Screen::GeneralListings => {
                self.state.general_listings.delete(id)?;
            }
            Screen::Payments => {
                self.state.payments.delete(id)?;
            }
            Screen::Feeds => {
                self.state.feeds.delete(id)?;
            }
            Screen::Pairs => {
                self.state.pairs.delete(id)?;
            }
            Screen::FeedRequests => {
                self.state.feed_requests.delete(id)?;
            }
            Screen::Promotions => {
                self.state.promotions.delete(id)?;
            }
        }
        Ok(())
    }

    /// Validate and submit the open create or edit form
    pub async fn submit_form(&mut self) {
        let valid = match &mut self.state.modal {
            ModalState::Create(form) | ModalState::Edit { form: Some(form), .. } => form.validate(),
            _ => return,
        };
        if !valid {
            return;
        }

        let result = match self.state.screen {
            Screen::Users | Screen::Vendors | Screen::Breeders | Screen::Veterinary => {
                self.submit_user().await
            }
            Screen::Listings => self.submit_listing().await,
            Screen::Pricing => self.submit_pricing().await,
            Screen::GeneralListings => self.submit_general_listing(),
            Screen::Payments => self.submit_payment(),
            Screen::Feeds => self.submit_feed(),
            Screen::Pairs => self.submit_pair(),
            Screen::FeedRequests => self.submit_feed_request(),
            Screen::Promotions => self.submit_promotion(),
        };

        match result {
            Ok(message) => {
                if let Some(collection) = self.state.screen.collection() {
                    self.state.cache.invalidate(collection);
                }
                self.state.modal = ModalState::Closed;
                self.state.toast_success(message);
                self.request_reload(false);
            }
            Err(SubmitError::Validation(errors)) => self.apply_field_errors(errors),
            Err(SubmitError::Other(e)) => self.state.toast_error(format!("Save failed: {}", e)),
        }
    }

    fn apply_field_errors(&mut self, errors: Vec<ValidationError>) {
        if let ModalState::Create(form) | ModalState::Edit { form: Some(form), .. } =
            &mut self.state.modal
        {
            for error in errors {
                form.set_error(error.field, error.message);
            }
        }
    }

    fn open_form(&self) -> Option<(&FormState, Option<&str>)> {
        match &self.state.modal {
            ModalState::Create(form) => Some((form, None)),
            ModalState::Edit { id, form: Some(form) } => Some((form, Some(id.as_str()))),
            _ => None,
        }
    }

    async fn submit_user(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;

        match edit_id {
            None => {
                let payload = CreateUserPayload {
                    first_name: form.value("firstName").unwrap_or_default(),
                    last_name: form.value("lastName").unwrap_or_default(),
                    email: form.value("email").unwrap_or_default(),
                    phone_number: form.value("phoneNumber").unwrap_or_default(),
                    password: form.value("password").unwrap_or_default(),
                    role: form.value("role").unwrap_or_default(),
                };
                let errors = pawdeck_core::validate::validate_create_user(&payload);
                if !errors.is_empty() {
                    return Err(SubmitError::Validation(errors));
                }
                self.client.create_user(&payload).await?;
                Ok("User created".to_string())
            }
            Some(id) => {
                let id: i64 = id.parse().map_err(anyhow::Error::from)?;
                let payload = UpdateUserPayload {
                    first_name: form.value_opt("firstName"),
                    last_name: form.value_opt("lastName"),
                    email: form.value_opt("email"),
                    phone_number: form.value_opt("phoneNumber"),
                    role: form.value_opt("role"),
                    status: form.value_opt("status"),
                };
                let errors = pawdeck_core::validate::validate_update_user(&payload);
                if !errors.is_empty() {
                    return Err(SubmitError::Validation(errors));
                }
                self.client.update_user(id, &payload).await?;
                Ok("User updated".to_string())
            }
        }
    }

    async fn submit_listing(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;
        let Some(id) = edit_id else {
            return Err(SubmitError::closed());
        };
        let id: i64 = id.parse().map_err(anyhow::Error::from)?;

        let image = match form.value_opt("image") {
            Some(path) => match encode_image_file(&path) {
                Ok(data_url) => Some(data_url),
                Err(e) => {
                    return Err(SubmitError::Validation(vec![ValidationError::new(
                        "image",
                        format!("Cannot read image: {}", e),
                    )]))
                }
            },
            None => None,
        };

        let payload = UpdateListingPayload {
            price: form.number("price"),
            status: form.value_opt("status"),
            description: form.value_opt("description"),
            pet_name: form.value_opt("petName"),
            pet_type: form.value_opt("type"),
            user_id: None,
            image,
        };
        let errors = pawdeck_core::validate::validate_update_listing(&payload);
        if !errors.is_empty() {
            return Err(SubmitError::Validation(errors));
        }
        self.client.update_featured_listing(id, &payload).await?;
        Ok("Listing updated".to_string())
    }

    async fn submit_pricing(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;

        match edit_id {
            None => {
                let payload = CreatePricingPayload {
                    period_time: form.value("periodTime").unwrap_or_default(),
                    monthly_payment: form.number("monthlyPayment").unwrap_or(0.0),
                    discount: form.number("discount").unwrap_or(0.0),
                    total_payment: form.number("totalPayment").unwrap_or(0.0),
                };
                let errors = pawdeck_core::validate::validate_create_pricing(&payload);
                if !errors.is_empty() {
                    return Err(SubmitError::Validation(errors));
                }
                self.client.create_pricing_plan(&payload).await?;
                Ok("Pricing plan created".to_string())
            }
            Some(id) => {
                let id: i64 = id.parse().map_err(anyhow::Error::from)?;
                let payload = UpdatePricingPayload {
                    period_time: form.value_opt("periodTime"),
                    monthly_payment: form.number("monthlyPayment"),
                    discount: form.number("discount"),
                    total_payment: form.number("totalPayment"),
                    status: None,
                };
                let errors = pawdeck_core::validate::validate_update_pricing(&payload);
                if !errors.is_empty() {
                    return Err(SubmitError::Validation(errors));
                }
                self.client.update_pricing_plan(id, &payload).await?;
                Ok("Pricing plan updated".to_string())
            }
        }
    }

    fn submit_general_listing(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;
        let values = form.values();
        match edit_id.map(str::to_string) {
            None => {
                let record = pawdeck_core::Listing {
                    id: self.state.general_listings.next_id(),
                    name: values.get("name").cloned().unwrap_or_default(),
                    listing_type: values.get("type").cloned().unwrap_or_default(),
                    owner: values.get("owner").cloned().unwrap_or_default(),
                    status: values.get("status").cloned().unwrap_or_default(),
                    is_featured: false,
                };
                self.state
                    .general_listings
                    .create(record)
                    .map_err(anyhow::Error::from)?;
                Ok("Listing created".to_string())
            }
            Some(id) => {
                self.state
                    .general_listings
                    .update(&id, |record| {
                        record.name = values.get("name").cloned().unwrap_or_default();
                        record.listing_type = values.get("type").cloned().unwrap_or_default();
                        record.owner = values.get("owner").cloned().unwrap_or_default();
                        record.status = values.get("status").cloned().unwrap_or_default();
                    })
                    .map_err(anyhow::Error::from)?;
                Ok("Listing updated".to_string())
            }
        }
    }

    fn submit_payment(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;
        let values = form.values();
        match edit_id.map(str::to_string) {
            None => {
                let record = pawdeck_core::PaymentTransaction {
                    id: self.state.payments.next_id(),
                    name: values.get("name").cloned().unwrap_or_default(),
                    email: values.get("email").cloned().unwrap_or_default(),
                    method: values.get("method").cloned().unwrap_or_default(),
                    price: values.get("price").cloned().unwrap_or_default(),
                    date: values.get("date").cloned().unwrap_or_default(),
                    status: values.get("status").cloned().unwrap_or_default(),
                };
                self.state.payments.create(record).map_err(anyhow::Error::from)?;
                Ok("Payment created".to_string())
            }
            Some(id) => {
                self.state
                    .payments
                    .update(&id, |record| {
                        record.name = values.get("name").cloned().unwrap_or_default();
                        record.email = values.get("email").cloned().unwrap_or_default();
                        record.method = values.get("method").cloned().unwrap_or_default();
                        record.price = values.get("price").cloned().unwrap_or_default();
                        record.date = values.get("date").cloned().unwrap_or_default();
                        record.status = values.get("status").cloned().unwrap_or_default();
                    })
                    .map_err(anyhow::Error::from)?;
                Ok("Payment updated".to_string())
            }
        }
    }

    fn submit_feed(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;
        let values = form.values();
        match edit_id.map(str::to_string) {
            None => {
                let record = pawdeck_core::Feed {
                    id: self.state.feeds.next_id(),
                    name: values.get("name").cloned().unwrap_or_default(),
                    email: values.get("email").cloned().unwrap_or_default(),
                    date: values.get("date").cloned().unwrap_or_default(),
                    feed_type: values.get("type").cloned().unwrap_or_default(),
                    status: values.get("status").cloned().unwrap_or_default(),
                };
                self.state.feeds.create(record).map_err(anyhow::Error::from)?;
                Ok("Feed created".to_string())
            }
            Some(id) => {
                self.state
                    .feeds
                    .update(&id, |record| {
                        record.name = values.get("name").cloned().unwrap_or_default();
                        record.email = values.get("email").cloned().unwrap_or_default();
                        record.date = values.get("date").cloned().unwrap_or_default();
                        record.feed_type = values.get("type").cloned().unwrap_or_default();
                        record.status = values.get("status").cloned().unwrap_or_default();
                    })
                    .map_err(anyhow::Error::from)?;
                Ok("Feed updated".to_string())
            }
        }
    }

    fn submit_pair(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;
        let values = form.values();

        let image = match form.value_opt("image") {
            Some(path) => match encode_image_file(&path) {
                Ok(data_url) => Some(data_url),
                Err(e) => {
                    return Err(SubmitError::Validation(vec![ValidationError::new(
                        "image",
                        format!("Cannot read image: {}", e),
                    )]))
                }
            },
            None => None,
        };

        match edit_id.map(str::to_string) {
            None => {
                let record = pawdeck_core::Pair {
                    id: self.state.pairs.next_id(),
                    image,
                    pairs_name: values.get("pairsName").cloned().unwrap_or_default(),
                    owner: values.get("owner").cloned().unwrap_or_default(),
                    date: values.get("date").cloned().unwrap_or_default(),
                    pair_type: values.get("type").cloned().unwrap_or_default(),
                    status: values.get("status").cloned().unwrap_or_default(),
                };
                self.state.pairs.create(record).map_err(anyhow::Error::from)?;
                Ok("Pair created".to_string())
            }
            Some(id) => {
                self.state
                    .pairs
                    .update(&id, |record| {
                        if image.is_some() {
                            record.image = image.clone();
                        }
                        record.pairs_name = values.get("pairsName").cloned().unwrap_or_default();
                        record.owner = values.get("owner").cloned().unwrap_or_default();
                        record.date = values.get("date").cloned().unwrap_or_default();
                        record.pair_type = values.get("type").cloned().unwrap_or_default();
                        record.status = values.get("status").cloned().unwrap_or_default();
                    })
                    .map_err(anyhow::Error::from)?;
                Ok("Pair updated".to_string())
            }
        }
    }

    fn submit_feed_request(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;
        let values = form.values();
        match edit_id.map(str::to_string) {
            None => {
                let record = pawdeck_core::FeedRequest {
                    id: self.state.feed_requests.next_id(),
                    user_name: values.get("userName").cloned().unwrap_or_default(),
                    email: values.get("email").cloned().unwrap_or_default(),
                    subject: values.get("subject").cloned().unwrap_or_default(),
                    received: values.get("received").cloned().unwrap_or_default(),
                    status: values.get("status").cloned().unwrap_or_default(),
                };
                self.state
                    .feed_requests
                    .create(record)
                    .map_err(anyhow::Error::from)?;
                Ok("Feed request created".to_string())
            }
            Some(id) => {
                self.state
                    .feed_requests
                    .update(&id, |record| {
                        record.user_name = values.get("userName").cloned().unwrap_or_default();
                        record.email = values.get("email").cloned().unwrap_or_default();
                        record.subject = values.get("subject").cloned().unwrap_or_default();
                        record.received = values.get("received").cloned().unwrap_or_default();
                        record.status = values.get("status").cloned().unwrap_or_default();
                    })
                    .map_err(anyhow::Error::from)?;
                Ok("Feed request updated".to_string())
            }
        }
    }

    fn submit_promotion(&mut self) -> Result<String, SubmitError> {
        let (form, edit_id) = self.open_form().ok_or_else(SubmitError::closed)?;
        let values = form.values();

        let link = values.get("link").cloned().unwrap_or_default();
        if !is_plausible_url(&link) {
            return Err(SubmitError::Validation(vec![ValidationError::new(
                "link",
                "Link must be a valid URL",
            )]));
        }

        let image = match form.value_opt("image") {
            Some(path) => match encode_image_file(&path) {
                Ok(data_url) => Some(data_url),
                Err(e) => {
                    return Err(SubmitError::Validation(vec![ValidationError::new(
                        "image",
                        format!("Cannot read image: {}", e),
                    )]))
                }
            },
            None => None,
        };

        match edit_id.map(str::to_string) {
            None => {
                let record = pawdeck_core::PromotionBanner {
                    id: self.state.promotions.next_id(),
                    title: values.get("title").cloned().unwrap_or_default(),
                    link,
                    description: values.get("description").cloned().unwrap_or_default(),
                    image_url: image.unwrap_or_default(),
                    is_active: true,
                };
                self.state
                    .promotions
                    .create(record)
                    .map_err(anyhow::Error::from)?;
                Ok("Banner created".to_string())
            }
            Some(id) => {
                self.state
                    .promotions
                    .update(&id, |record| {
                        if let Some(image) = image.clone() {
                            record.image_url = image;
                        }
                        record.title = values.get("title").cloned().unwrap_or_default();
                        record.link = link.clone();
                        record.description =
                            values.get("description").cloned().unwrap_or_default();
                    })
                    .map_err(anyhow::Error::from)?;
                Ok("Banner updated".to_string())
            }
        }
    }
}

/// Follow-up decided while the modal was borrowed for key routing
enum ModalAction {
    None,
    Close,
    ConfirmDelete,
    ApplyFilter,
    ResetFilter,
    Submit,
}

/// Form submission outcome: field errors go back onto the form, other
/// failures become an error toast.
enum SubmitError {
    Validation(Vec<ValidationError>),
    Other(anyhow::Error),
}

impl SubmitError {
    fn closed() -> Self {
        SubmitError::Other(anyhow::anyhow!("no form is open"))
    }
}

impl From<anyhow::Error> for SubmitError {
    fn from(error: anyhow::Error) -> Self {
        SubmitError::Other(error)
    }
}

impl From<pawdeck_client::ApiError> for SubmitError {
    fn from(error: pawdeck_client::ApiError) -> Self {
        SubmitError::Other(error.into())
    }
}

impl AppState {
    fn tables_page(&self) -> u32 {
        self.table().page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToastKind;
    use crate::ui::widgets::dialog::ConfirmDialog;
    use crate::ui::widgets::form::FieldValue;
    use tui_input::Input;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn users_envelope() -> serde_json::Value {
        json!({
            "statusCode": 200,
            "success": true,
            "message": "OK",
            "data": [{
                "id": 7,
                "firstName": "Christine",
                "lastName": "Brooks",
                "email": "christine@example.com",
                "phoneNumber": "+1555000001",
                "role": "User",
                "status": "Active",
                "createdAt": "2025-02-14T10:00:00Z",
                "updatedAt": "2025-02-14T10:00:00Z"
            }]
        })
    }

    async fn app_for(server: &MockServer) -> App {
        App::new(ApiClient::new(server.uri()).unwrap())
    }

    fn type_into_open_form(app: &mut App, field: usize, text: &str) {
        let form = match &mut app.state.modal {
            ModalState::Create(form) | ModalState::Edit { form: Some(form), .. } => form,
            _ => panic!("no form open"),
        };
        form.focused = field;
        for c in text.chars() {
            form.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[tokio::test]
    async fn second_load_hits_the_cache_until_a_delete_invalidates_it() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_envelope()))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/user/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200, "success": true, "message": "Deleted", "data": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.load_current(false).await.unwrap();
        app.load_current(false).await.unwrap();
        assert_eq!(app.state.table().rows.len(), 1);

        app.open_delete();
        assert!(matches!(app.state.modal, ModalState::ConfirmDelete { .. }));
        app.confirm_delete().await;
        app.run_pending_reload().await;

        assert!(app
            .state
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Success));
    }

    #[tokio::test]
    async fn edit_without_a_selection_fetches_nothing() {
        let server = MockServer::start().await;
        let mut app = app_for(&server).await;
        let (sender, _receiver) = mpsc::unbounded_channel();

        app.open_edit(&sender);

        assert!(!app.state.modal.is_open());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_remote_delete_leaves_an_error_toast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_envelope()))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/user/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "statusCode": 404, "success": false, "message": "User not found", "data": null
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.load_current(false).await.unwrap();
        app.open_delete();
        app.confirm_delete().await;

        assert!(app
            .state
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Error));
    }

    #[tokio::test]
    async fn mock_create_appends_one_record_and_closes_the_modal() {
        let server = MockServer::start().await;
        let mut app = app_for(&server).await;
        app.state.set_screen(Screen::Payments);
        app.load_current(false).await.unwrap();
        let before = app.state.payments.len();

        app.open_create();
        type_into_open_form(&mut app, 0, "Nadia Aziz");
        type_into_open_form(&mut app, 1, "nadia@example.com");
        type_into_open_form(&mut app, 3, "$60");
        type_into_open_form(&mut app, 4, "20 Feb 2025");
        app.submit_form().await;

        assert_eq!(app.state.payments.len(), before + 1);
        assert!(!app.state.modal.is_open());
        assert!(app
            .state
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Success));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mock_delete_of_missing_id_fails_cleanly() {
        let server = MockServer::start().await;
        let mut app = app_for(&server).await;
        app.state.set_screen(Screen::Payments);
        app.load_current(false).await.unwrap();
        let before = app.state.payments.len();

        app.state.modal = ModalState::ConfirmDelete {
            id: "99".to_string(),
            dialog: ConfirmDialog::delete("record #99"),
        };
        app.confirm_delete().await;

        assert_eq!(app.state.payments.len(), before);
        assert!(app
            .state
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Error));
    }

    #[tokio::test]
    async fn invalid_form_keeps_the_modal_open_with_field_errors() {
        let server = MockServer::start().await;
        let mut app = app_for(&server).await;
        app.state.set_screen(Screen::Payments);

        app.open_create();
        app.submit_form().await;

        match &app.state.modal {
            ModalState::Create(form) => assert!(!form.validation_errors.is_empty()),
            _ => panic!("modal should stay open"),
        }
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_reload_request_marks_the_table_loading_until_it_runs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_envelope()))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        let (sender, _receiver) = mpsc::unbounded_channel();
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE), &sender)
            .await;

        assert!(app.state.table().loading);
        assert!(server.received_requests().await.unwrap().is_empty());

        app.run_pending_reload().await;
        assert!(!app.state.table().loading);
        assert_eq!(app.state.table().rows.len(), 1);
    }

    #[tokio::test]
    async fn edit_modal_waits_for_the_fetched_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_envelope()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "statusCode": 200,
                "success": true,
                "message": "OK",
                "data": {
                    "id": 7,
                    "firstName": "Christine",
                    "lastName": "Brooks",
                    "email": "christine@example.com",
                    "phoneNumber": "+1555000001",
                    "role": "User",
                    "status": "Active",
                    "createdAt": "2025-02-14T10:00:00Z",
                    "updatedAt": "2025-02-14T10:00:00Z"
                }
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.load_current(false).await.unwrap();
        app.state.table_mut().select_next();

        let (sender, mut receiver) = mpsc::unbounded_channel();
        app.open_edit(&sender);
        assert!(matches!(app.state.modal, ModalState::Edit { form: None, .. }));

        match receiver.recv().await {
            Some(AppEvent::EditReady { id, form }) => app.install_edit_form(&id, *form),
            other => panic!("expected the edit form, got {:?}", other),
        }
        match &app.state.modal {
            ModalState::Edit { form: Some(form), .. } => {
                assert_eq!(form.value("firstName").as_deref(), Some("Christine"));
            }
            _ => panic!("modal should hold the fetched form"),
        }
    }

    #[tokio::test]
    async fn failed_edit_fetch_closes_the_modal_with_a_toast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_envelope()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "statusCode": 404, "success": false, "message": "User not found", "data": null
            })))
            .mount(&server)
            .await;

        let mut app = app_for(&server).await;
        app.load_current(false).await.unwrap();
        app.state.table_mut().select_next();

        let (sender, mut receiver) = mpsc::unbounded_channel();
        app.open_edit(&sender);

        match receiver.recv().await {
            Some(AppEvent::EditFailed { id, message }) => app.fail_edit_load(&id, &message),
            other => panic!("expected a failed fetch, got {:?}", other),
        }
        assert!(!app.state.modal.is_open());
        assert!(app
            .state
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Error));
    }

    #[tokio::test]
    async fn general_listing_create_stays_local() {
        let server = MockServer::start().await;
        let mut app = app_for(&server).await;
        app.state.set_screen(Screen::GeneralListings);
        app.load_current(false).await.unwrap();
        assert_eq!(app.state.table().rows.len(), 3);

        app.open_create();
        type_into_open_form(&mut app, 0, "Pet Palace");
        type_into_open_form(&mut app, 2, "Sara");
        app.submit_form().await;

        assert_eq!(app.state.general_listings.len(), 4);
        assert!(!app.state.modal.is_open());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggling_a_promotion_flips_its_active_column() {
        let server = MockServer::start().await;
        let mut app = app_for(&server).await;
        app.state.set_screen(Screen::Promotions);
        app.load_current(false).await.unwrap();
        app.state.table_mut().select_next();

        let (sender, _receiver) = mpsc::unbounded_channel();
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE), &sender)
            .await;
        app.run_pending_reload().await;

        assert!(!app.state.promotions.get("1").unwrap().is_active);
        assert_eq!(app.state.table().rows[0].cells[4], "Inactive");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn promotion_link_must_be_an_http_url() {
        let server = MockServer::start().await;
        let mut app = app_for(&server).await;
        app.state.set_screen(Screen::Promotions);
        app.load_current(false).await.unwrap();
        app.state.table_mut().select_next();

        let (sender, _receiver) = mpsc::unbounded_channel();
        app.open_edit(&sender);
        if let ModalState::Edit { form: Some(form), .. } = &mut app.state.modal {
            form.fields[1].value = FieldValue::Text(Input::new("just-text".into()));
        } else {
            panic!("edit modal should be open");
        }
        app.submit_form().await;

        match &app.state.modal {
            ModalState::Edit { form: Some(form), .. } => {
                assert!(form.validation_errors.contains_key("link"));
            }
            _ => panic!("modal should stay open with the link error"),
        }
    }
}
