//! The per-session state container.
//!
//! A [`Session`] owns the current user, the screen being shown, the new-order form and the
//! handles it needs to act. Its lifecycle methods are the only way a front end changes
//! order state; each reports its outcome through the [`Notifier`] and returns it as well.

mod form;
mod router;

pub use form::*;
pub use router::*;

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::clients::OrderClient;
use crate::domain::{Order, Role, User};
use crate::notify::{Notification, Notifier};
use crate::order_actor::OrderError;
use crate::views::{ClientView, CourierView, MainMenu, ReviewsView};

pub struct Session {
    user: User,
    screen: Screen,
    form: OrderForm,
    orders: OrderClient,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    pub fn new(user_name: impl Into<String>, orders: OrderClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            user: User::new(user_name),
            screen: Screen::MainMenu,
            form: OrderForm::default(),
            orders,
            notifier,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn form(&self) -> &OrderForm {
        &self.form
    }

    // --- Routing ---

    pub fn select_client(&mut self) {
        self.user.role = Some(Role::Client);
        self.screen = Screen::Client(ClientTab::default());
    }

    pub fn select_courier(&mut self) {
        self.user.role = Some(Role::Courier);
        self.screen = Screen::Courier(CourierTab::default());
    }

    pub fn show_reviews(&mut self) {
        self.screen = Screen::Reviews;
    }

    pub fn back(&mut self) {
        self.screen = Screen::MainMenu;
    }

    /// Switches tab within the current role screen. Unknown names are reported and ignored.
    pub fn open_tab(&mut self, name: &str) -> bool {
        match self.screen.with_tab(name) {
            Some(screen) => {
                self.screen = screen;
                true
            }
            None => {
                self.notifier
                    .notify(Notification::error(format!("No tab `{name}` on {}", self.screen)));
                false
            }
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Passes a notification raised outside the session, such as a bad command, to the same sink.
    pub fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    // --- Order lifecycle ---

    /// Submits the form as a new order from the current user.
    ///
    /// On success the form is cleared and the client's active orders are shown. On
    /// failure nothing changes, the form included.
    #[instrument(skip(self), fields(user = %self.user.name))]
    pub async fn create_order(&mut self) -> Result<String, OrderError> {
        let result = match self.form.to_payload(&self.user.name) {
            Ok(payload) => self.orders.create_order(payload).await,
            Err(e) => Err(e),
        };
        let result = self.report(result, |id| format!("Order #{id} created"));
        if result.is_ok() {
            self.form.clear();
            self.user.role = Some(Role::Client);
            self.screen = Screen::Client(ClientTab::Active);
        }
        result
    }

    #[instrument(skip(self), fields(user = %self.user.name))]
    pub async fn accept_order(&self, id: &str) -> Result<Order, OrderError> {
        let result = self.orders.accept_order(id.to_string(), self.user.name.clone()).await;
        self.report(result, |o| format!("Order #{} accepted", o.id))
    }

    #[instrument(skip(self), fields(user = %self.user.name))]
    pub async fn start_work(&self, id: &str) -> Result<Order, OrderError> {
        let result = self.orders.start_work(id.to_string(), self.user.name.clone()).await;
        self.report(result, |o| format!("Work on order #{} started", o.id))
    }

    #[instrument(skip(self), fields(user = %self.user.name))]
    pub async fn complete_order(&self, id: &str) -> Result<Order, OrderError> {
        let result = self.orders.complete_order(id.to_string(), self.user.name.clone()).await;
        self.report(result, |o| format!("Order #{} completed, earned {} RUB", o.id, o.price))
    }

    #[instrument(skip(self), fields(user = %self.user.name))]
    pub async fn release_order(&self, id: &str) -> Result<Order, OrderError> {
        let result = self.orders.release_order(id.to_string(), self.user.name.clone()).await;
        self.report(result, |o| format!("Order #{} returned to the pool", o.id))
    }

    #[instrument(skip(self, review), fields(user = %self.user.name))]
    pub async fn rate_order(&self, id: &str, rating: u64, review: &str) -> Result<Order, OrderError> {
        let result = self
            .orders
            .rate_order(id.to_string(), self.user.name.clone(), rating, review.to_string())
            .await;
        self.report(result, |_| "Thanks for your review".to_string())
    }

    #[instrument(skip(self), fields(user = %self.user.name))]
    pub async fn cancel_order(&self, id: &str) -> Result<Order, OrderError> {
        let result = self.orders.cancel_order(id.to_string(), self.user.name.clone()).await;
        self.report(result, |o| format!("Order #{} cancelled", o.id))
    }

    // --- Rendering ---

    /// Current order snapshot, in creation order.
    pub async fn orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.list_orders().await
    }

    /// Renders the current screen from a fresh snapshot.
    pub async fn render(&self) -> Result<String, OrderError> {
        let orders = self.orders().await?;
        debug!(screen = %self.screen, orders = orders.len(), "Rendering");
        let name = self.user.name.as_str();
        Ok(match self.screen {
            Screen::MainMenu => MainMenu::build(&orders, &self.user).to_string(),
            Screen::Client(tab) => ClientView::build(&orders, name, &self.form, tab).to_string(),
            Screen::Courier(tab) => CourierView::build(&orders, name, tab).to_string(),
            Screen::Reviews => ReviewsView::build(&orders).to_string(),
        })
    }

    fn report<T>(
        &self,
        result: Result<T, OrderError>,
        success: impl FnOnce(&T) -> String,
    ) -> Result<T, OrderError> {
        let notification = match &result {
            Ok(value) => Notification::success(success(value)),
            Err(e) => Notification::error(e.to_string()),
        };
        self.notifier.notify(notification);
        result
    }
}
