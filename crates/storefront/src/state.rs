//! Application state for the terminal UI.
//!
//! [`App`] owns the cart, theme and browse state and applies every
//! [`UiEvent`]. Rendering reads from it and never mutates. Cart
//! failures surface as notifications or notice dialogs instead of
//! ending the program.

use std::sync::Arc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use boutique_core::{CategoryFilter, ProductId, SortOrder};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cart::{self, CartError, CartNotice, CartStore};
use crate::catalog::{Catalog, Product};
use crate::events::UiEvent;
use crate::keys::{self, Action};
use crate::notifications::{Notification, NotificationLevel};
use crate::storage::StorageEvent;
use crate::theme::{Palette, ThemePreference};

/// How long an added line flashes its confirmation.
const ADDED_FLASH_MS: u64 = 900;

const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";
const CHECKOUT_MESSAGE: &str = "Checkout is a demo — thanks for trying this template!";
const VIEW_MESSAGE: &str = "Demo product view — implement product page as a next step.";
const LOGIN_MESSAGE: &str = "Logged in (demo).";
const SIGNUP_MESSAGE: &str = "Account created (demo).";
const NEWSLETTER_MESSAGE: &str = "Thanks for subscribing!";

/// A dialog floating over the main screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Help,
    Notice { message: String },
    Quantity { id: ProductId, title: String, input: String },
    Login { email: String },
    Signup { email: String },
    Newsletter { email: String },
}

impl Modal {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Help => "Help",
            Self::Notice { .. } => "Notice",
            Self::Quantity { .. } => "Add to Bag",
            Self::Login { .. } => "Log In",
            Self::Signup { .. } => "Sign Up",
            Self::Newsletter { .. } => "Newsletter",
        }
    }

    /// The text buffer of an input dialog, if this is one.
    pub fn input_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Quantity { input, .. } => Some(input),
            Self::Login { email } | Self::Signup { email } | Self::Newsletter { email } => {
                Some(email)
            }
            Self::Help | Self::Notice { .. } => None,
        }
    }
}

struct AddedFlash {
    id: ProductId,
    at: Instant,
}

/// The whole interactive state of the storefront.
pub struct App {
    pub catalog: Arc<Catalog>,
    pub cart: CartStore,
    pub theme: ThemePreference,
    pub filter: CategoryFilter,
    pub sort: SortOrder,
    pub selected_product: usize,
    pub selected_line: usize,
    pub cart_open: bool,
    pub nav_open: bool,
    pub modal: Option<Modal>,
    pub notifications: Vec<Notification>,
    added_flash: Option<AddedFlash>,
    cart_notices: mpsc::Receiver<CartNotice>,
}

impl App {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, mut cart: CartStore, theme: ThemePreference) -> Self {
        let cart_notices = cart.subscribe();
        Self {
            catalog,
            cart,
            theme,
            filter: CategoryFilter::default(),
            sort: SortOrder::default(),
            selected_product: 0,
            selected_line: 0,
            cart_open: false,
            nav_open: false,
            modal: None,
            notifications: Vec::new(),
            added_flash: None,
            cart_notices,
        }
    }

    /// Apply one event. Returns `true` when the program should exit.
    pub fn handle_event(&mut self, event: UiEvent) -> bool {
        let quit = match event {
            UiEvent::Input(key) => self.handle_key(key),
            UiEvent::Tick => {
                self.prune_expired();
                false
            }
            UiEvent::Resize { .. } => false,
            UiEvent::Storage(storage_event) => {
                self.handle_storage_event(&storage_event);
                false
            }
        };
        self.drain_cart_notices();
        quit
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.theme.theme())
    }

    /// Products under the current filter and sort.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.catalog.browse(self.filter, self.sort)
    }

    /// Whether `id` should show its just-added confirmation.
    #[must_use]
    pub fn is_flashed(&self, id: &ProductId) -> bool {
        self.added_flash.as_ref().is_some_and(|flash| &flash.id == id)
    }

    #[must_use]
    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.capture_modal_input(key) {
            return false;
        }
        keys::map_key(key).is_some_and(|action| self.handle_action(action))
    }

    /// Route typed characters into an open input dialog. Returns
    /// whether the key was consumed.
    fn capture_modal_input(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        let Some(input) = self.modal.as_mut().and_then(Modal::input_mut) else {
            return false;
        };
        match key.code {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Enter => self.submit_modal(),
            KeyCode::Esc => self.modal = None,
            KeyCode::Tab => {
                // The login dialog offers a jump to account creation.
                if matches!(self.modal, Some(Modal::Login { .. })) {
                    self.modal = Some(Modal::Signup { email: String::new() });
                }
            }
            _ => {}
        }
        true
    }

    fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::Cancel => {
                self.modal = None;
                self.cart_open = false;
            }
            Action::Confirm => self.confirm(),
            Action::MoveUp => self.select_previous(),
            Action::MoveDown => self.select_next(),
            Action::ToggleCart => {
                self.cart_open = !self.cart_open;
                if self.cart_open {
                    self.clamp_line_selection();
                }
            }
            Action::PromptQuantity => self.open_quantity_prompt(),
            Action::ViewProduct => {
                if self.current_product().is_some() {
                    self.show_notice(VIEW_MESSAGE);
                }
            }
            Action::IncrementLine => self.change_selected_line(1),
            Action::DecrementLine => self.change_selected_line(-1),
            Action::RemoveLine => self.remove_selected_line(),
            Action::ClearCart => self.try_cart(CartStore::clear),
            Action::Checkout => self.checkout(),
            Action::NextFilter => self.set_filter(self.filter.next()),
            Action::PrevFilter => self.set_filter(self.filter.previous()),
            Action::NextSort => self.set_sort(self.sort.next()),
            Action::PrevSort => self.set_sort(self.sort.previous()),
            Action::JumpFilter(index) => {
                if let Some(&filter) = CategoryFilter::all().get(index) {
                    self.set_filter(filter);
                }
            }
            Action::ToggleNav => self.nav_open = !self.nav_open,
            Action::ToggleTheme => self.toggle_theme(),
            Action::OpenHelp => self.modal = Some(Modal::Help),
            Action::OpenLogin => self.modal = Some(Modal::Login { email: String::new() }),
            Action::OpenSignup => self.modal = Some(Modal::Signup { email: String::new() }),
            Action::OpenNewsletter => {
                self.modal = Some(Modal::Newsletter { email: String::new() });
            }
        }
        false
    }

    /// Enter outside an input dialog: dismiss a notice, or add the
    /// highlighted product.
    fn confirm(&mut self) {
        if matches!(self.modal, Some(Modal::Help | Modal::Notice { .. })) {
            self.modal = None;
            return;
        }
        if self.modal.is_some() || self.cart_open {
            return;
        }
        self.add_current(1);
    }

    fn submit_modal(&mut self) {
        let Some(modal) = self.modal.take() else {
            return;
        };
        match modal {
            Modal::Quantity { id, input, .. } => {
                let quantity = cart::parse_quantity(&input);
                self.try_cart(|cart| cart.add(&id, quantity));
            }
            Modal::Login { .. } => self.show_notice(LOGIN_MESSAGE),
            Modal::Signup { .. } => self.show_notice(SIGNUP_MESSAGE),
            Modal::Newsletter { .. } => self.show_notice(NEWSLETTER_MESSAGE),
            Modal::Help | Modal::Notice { .. } => {}
        }
    }

    fn open_quantity_prompt(&mut self) {
        let Some(product) = self.current_product() else {
            return;
        };
        self.modal = Some(Modal::Quantity {
            id: product.id.clone(),
            title: product.title.clone(),
            input: String::new(),
        });
    }

    fn add_current(&mut self, quantity: u32) {
        let Some(id) = self.current_product().map(|p| p.id.clone()) else {
            return;
        };
        self.try_cart(|cart| cart.add(&id, quantity));
    }

    fn change_selected_line(&mut self, delta: i32) {
        if !self.cart_open {
            return;
        }
        let Some(id) = self.current_line_id() else {
            return;
        };
        self.try_cart(|cart| cart.change_quantity(&id, delta));
        self.clamp_line_selection();
    }

    fn remove_selected_line(&mut self) {
        if !self.cart_open {
            return;
        }
        let Some(id) = self.current_line_id() else {
            return;
        };
        self.try_cart(|cart| cart.remove(&id));
        self.clamp_line_selection();
    }

    fn checkout(&mut self) {
        match self.cart.checkout() {
            Ok(()) => {
                self.cart_open = false;
                self.show_notice(CHECKOUT_MESSAGE);
            }
            Err(CartError::Empty) => self.show_notice(EMPTY_CART_MESSAGE),
            Err(err) => self.report_cart_error(&err),
        }
    }

    fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(theme) => tracing::info!("theme set to {theme}"),
            Err(err) => {
                tracing::error!("could not save theme: {err}");
                self.notify(NotificationLevel::Warning, "Could not save your theme choice");
            }
        }
    }

    fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.selected_product = 0;
    }

    fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.selected_product = 0;
    }

    fn select_next(&mut self) {
        if self.cart_open {
            let len = self.cart.lines().len();
            if len > 0 {
                self.selected_line = (self.selected_line + 1) % len;
            }
        } else {
            let len = self.visible_products().len();
            if len > 0 {
                self.selected_product = (self.selected_product + 1) % len;
            }
        }
    }

    fn select_previous(&mut self) {
        if self.cart_open {
            let len = self.cart.lines().len();
            if len > 0 {
                self.selected_line = (self.selected_line + len - 1) % len;
            }
        } else {
            let len = self.visible_products().len();
            if len > 0 {
                self.selected_product = (self.selected_product + len - 1) % len;
            }
        }
    }

    fn current_product(&self) -> Option<&Product> {
        self.visible_products().get(self.selected_product).copied()
    }

    fn current_line_id(&self) -> Option<ProductId> {
        self.cart
            .lines()
            .get(self.selected_line)
            .map(|line| line.product.id.clone())
    }

    fn clamp_line_selection(&mut self) {
        let len = self.cart.lines().len();
        if self.selected_line >= len {
            self.selected_line = len.saturating_sub(1);
        }
    }

    fn handle_storage_event(&mut self, event: &StorageEvent) {
        if self.cart.apply_storage_event(event) {
            self.clamp_line_selection();
        }
        if self.theme.apply_storage_event(event) {
            tracing::info!("theme updated from another session");
        }
    }

    /// Run a cart mutation, turning failures into user feedback.
    fn try_cart(&mut self, op: impl FnOnce(&mut CartStore) -> Result<(), CartError>) {
        match op(&mut self.cart) {
            Ok(()) => {}
            Err(CartError::Empty) => self.show_notice(EMPTY_CART_MESSAGE),
            Err(err) => self.report_cart_error(&err),
        }
    }

    fn report_cart_error(&mut self, err: &CartError) {
        tracing::error!("cart operation failed: {err}");
        self.notify(
            NotificationLevel::Error,
            format!("Could not update your bag: {err}"),
        );
    }

    fn show_notice(&mut self, message: &str) {
        self.modal = Some(Modal::Notice {
            message: message.to_string(),
        });
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    fn prune_expired(&mut self) {
        let now = Utc::now();
        self.notifications.retain(|n| !n.is_expired(now));
        if self
            .added_flash
            .as_ref()
            .is_some_and(|flash| flash.at.elapsed() >= Duration::from_millis(ADDED_FLASH_MS))
        {
            self.added_flash = None;
        }
    }

    fn drain_cart_notices(&mut self) {
        while let Ok(notice) = self.cart_notices.try_recv() {
            match notice {
                CartNotice::Added { id, .. } => {
                    self.added_flash = Some(AddedFlash {
                        id,
                        at: Instant::now(),
                    });
                }
                CartNotice::CheckedOut => tracing::info!("order placed (demo)"),
                CartNotice::Synced { total_count } => {
                    tracing::debug!("cart synced from storage, {total_count} items");
                }
                CartNotice::QuantityChanged { .. }
                | CartNotice::Removed { .. }
                | CartNotice::Cleared => {}
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CART_KEY;
    use crate::storage::{MemoryStorage, SharedStorage};
    use crate::theme::Theme;

    fn pid(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn app_with(storage: Arc<dyn SharedStorage>) -> App {
        let catalog = Arc::new(Catalog::demo());
        let cart = CartStore::open(Arc::clone(&catalog), Arc::clone(&storage));
        let theme = ThemePreference::open(storage);
        App::new(catalog, cart, theme)
    }

    fn app() -> App {
        app_with(Arc::new(MemoryStorage::new()))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_event(UiEvent::Input(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    // ===== Quitting =====

    #[test]
    fn test_q_quits() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let quit = app.handle_event(UiEvent::Input(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(quit);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('z')));
        assert!(app.cart.is_empty());
        assert!(app.modal.is_none());
    }

    // ===== Browsing =====

    #[test]
    fn test_selection_moves_and_wraps() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_product, 1);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected_product, 3);
    }

    #[test]
    fn test_filter_cycle_resets_selection() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.filter.label(), "Dresses");
        assert_eq!(app.selected_product, 0);
        assert_eq!(app.visible_products().len(), 2);
    }

    #[test]
    fn test_digits_jump_to_a_category() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.filter.label(), "Tops");
        assert_eq!(app.visible_products().len(), 1);
    }

    #[test]
    fn test_sort_cycle_reorders_products() {
        let mut app = app();
        press(&mut app, KeyCode::Char('s'));
        let first = app.visible_products().first().map(|p| p.id.clone());
        assert_eq!(first, Some(pid("p3")));
    }

    #[test]
    fn test_nav_strip_toggles() {
        let mut app = app();
        assert!(!app.nav_open);
        press(&mut app, KeyCode::Char('n'));
        assert!(app.nav_open);
        press(&mut app, KeyCode::Char('n'));
        assert!(!app.nav_open);
    }

    // ===== Adding to the bag =====

    #[test]
    fn test_enter_adds_one_and_flashes() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cart.quantity(&pid("p1")), 1);
        assert!(app.is_flashed(&pid("p1")));
        assert!(!app.is_flashed(&pid("p2")));
    }

    #[test]
    fn test_quantity_prompt_adds_typed_amount() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(app.modal, Some(Modal::Quantity { .. })));
        type_text(&mut app, "2.7");
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());
        assert_eq!(app.cart.quantity(&pid("p1")), 2);
    }

    #[test]
    fn test_quantity_prompt_blank_means_one() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cart.quantity(&pid("p1")), 1);
    }

    #[test]
    fn test_typing_into_a_prompt_does_not_trigger_actions() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        assert!(matches!(app.modal, Some(Modal::Login { .. })));
        // 'q' must land in the buffer, not quit the app.
        assert!(!press(&mut app, KeyCode::Char('q')));
        type_text(&mut app, "uinn@example.com");
        press(&mut app, KeyCode::Backspace);
        match &app.modal {
            Some(Modal::Login { email }) => assert_eq!(email, "quinn@example.co"),
            other => panic!("unexpected modal: {other:?}"),
        }
    }

    #[test]
    fn test_flash_expires_on_tick() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.is_flashed(&pid("p1")));
        app.added_flash = Some(AddedFlash {
            id: pid("p1"),
            at: Instant::now() - Duration::from_millis(ADDED_FLASH_MS + 100),
        });
        app.handle_event(UiEvent::Tick);
        assert!(!app.is_flashed(&pid("p1")));
    }

    // ===== Bag panel =====

    fn app_with_two_lines() -> App {
        let mut app = app();
        app.cart.add(&pid("p1"), 2).unwrap();
        app.cart.add(&pid("p3"), 1).unwrap();
        press(&mut app, KeyCode::Char('c'));
        app
    }

    #[test]
    fn test_c_toggles_the_bag_panel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert!(app.cart_open);
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.cart_open);
    }

    #[test]
    fn test_escape_closes_panel_and_modal() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('?'));
        assert!(app.modal.is_some());
        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(!app.cart_open);
    }

    #[test]
    fn test_plus_and_minus_adjust_the_selected_line() {
        let mut app = app_with_two_lines();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.cart.quantity(&pid("p1")), 3);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.cart.quantity(&pid("p1")), 2);
    }

    #[test]
    fn test_minus_at_one_drops_the_line() {
        let mut app = app_with_two_lines();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.cart.quantity(&pid("p3")), 0);
        assert_eq!(app.cart.lines().len(), 1);
        assert_eq!(app.selected_line, 0);
    }

    #[test]
    fn test_d_removes_the_selected_line() {
        let mut app = app_with_two_lines();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.cart.quantity(&pid("p1")), 0);
        assert_eq!(app.cart.lines().len(), 1);
    }

    #[test]
    fn test_line_keys_do_nothing_while_browsing() {
        let mut app = app();
        app.cart.add(&pid("p1"), 1).unwrap();
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.cart.quantity(&pid("p1")), 1);
    }

    #[test]
    fn test_x_clears_the_bag() {
        let mut app = app_with_two_lines();
        press(&mut app, KeyCode::Char('x'));
        assert!(app.cart.is_empty());
    }

    // ===== Checkout =====

    #[test]
    fn test_checkout_with_empty_bag_shows_notice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(
            app.modal,
            Some(Modal::Notice {
                message: EMPTY_CART_MESSAGE.to_string()
            })
        );
    }

    #[test]
    fn test_checkout_empties_bag_and_closes_panel() {
        let mut app = app_with_two_lines();
        press(&mut app, KeyCode::Char('o'));
        assert!(app.cart.is_empty());
        assert!(!app.cart_open);
        assert_eq!(
            app.modal,
            Some(Modal::Notice {
                message: CHECKOUT_MESSAGE.to_string()
            })
        );
        // Enter dismisses the notice.
        press(&mut app, KeyCode::Enter);
        assert!(app.modal.is_none());
    }

    // ===== Mock dialogs =====

    #[test]
    fn test_login_flow_shows_demo_notice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        type_text(&mut app, "quinn@example.com");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.modal,
            Some(Modal::Notice {
                message: LOGIN_MESSAGE.to_string()
            })
        );
    }

    #[test]
    fn test_tab_jumps_from_login_to_signup() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        type_text(&mut app, "quinn@example.com");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.modal, Some(Modal::Signup { email: String::new() }));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.modal,
            Some(Modal::Notice {
                message: SIGNUP_MESSAGE.to_string()
            })
        );
    }

    #[test]
    fn test_signup_and_newsletter_notices() {
        let mut app = app();
        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.modal,
            Some(Modal::Notice {
                message: SIGNUP_MESSAGE.to_string()
            })
        );
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('w'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.modal,
            Some(Modal::Notice {
                message: NEWSLETTER_MESSAGE.to_string()
            })
        );
    }

    #[test]
    fn test_view_product_shows_demo_notice() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        assert_eq!(
            app.modal,
            Some(Modal::Notice {
                message: VIEW_MESSAGE.to_string()
            })
        );
    }

    // ===== Theme =====

    #[test]
    fn test_t_toggles_and_persists_the_theme() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app_with(Arc::clone(&storage) as Arc<dyn SharedStorage>);
        assert_eq!(app.theme.theme(), Theme::Dark);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.theme(), Theme::Light);
        assert_eq!(storage.get("theme").unwrap(), Some("light".to_string()));
        assert_eq!(app.palette(), Palette::light());
    }

    // ===== Storage events =====

    #[test]
    fn test_cart_storage_event_updates_lines_and_selection() {
        let mut app = app_with_two_lines();
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected_line, 1);

        app.handle_event(UiEvent::Storage(StorageEvent {
            key: CART_KEY.to_string(),
            old_value: None,
            new_value: Some(r#"{"p4": 1}"#.to_string()),
        }));

        assert_eq!(app.cart.quantity(&pid("p4")), 1);
        assert_eq!(app.cart.lines().len(), 1);
        assert_eq!(app.selected_line, 0);
    }

    #[test]
    fn test_theme_storage_event_switches_palette() {
        let mut app = app();
        app.handle_event(UiEvent::Storage(StorageEvent {
            key: "theme".to_string(),
            old_value: None,
            new_value: Some("light".to_string()),
        }));
        assert_eq!(app.theme.theme(), Theme::Light);
        assert_eq!(app.palette(), Palette::light());
    }

    #[test]
    fn test_synced_change_does_not_flash() {
        let mut app = app();
        app.handle_event(UiEvent::Storage(StorageEvent {
            key: CART_KEY.to_string(),
            old_value: None,
            new_value: Some(r#"{"p2": 2}"#.to_string()),
        }));
        assert_eq!(app.cart.quantity(&pid("p2")), 2);
        assert!(!app.is_flashed(&pid("p2")));
    }
}
