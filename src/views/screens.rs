//! Plain-text presentation components.
//!
//! Each view is built from an order snapshot through the filter functions and renders
//! itself with `Display`. They hold borrowed data only and make no decisions of their own.

use std::fmt;

use super::filters;
use super::stats::{CompletedStats, ServiceStats};
use crate::domain::{Order, User};
use crate::session::{ClientTab, CourierTab, OrderForm};

pub struct MainMenu<'a> {
    pub user: &'a User,
    pub service: ServiceStats,
}

pub struct ClientView<'a> {
    pub client: &'a str,
    pub tab: ClientTab,
    pub form: &'a OrderForm,
    pub active: Vec<&'a Order>,
    pub history: Vec<&'a Order>,
}

pub struct CourierView<'a> {
    pub courier: &'a str,
    pub tab: CourierTab,
    pub available: Vec<&'a Order>,
    pub current: Vec<&'a Order>,
    pub history: Vec<&'a Order>,
    pub stats: CompletedStats,
}

pub struct ReviewsView<'a> {
    pub reviews: Vec<&'a Order>,
}

impl<'a> MainMenu<'a> {
    pub fn build(orders: &[Order], user: &'a User) -> Self {
        Self {
            user,
            service: ServiceStats::from_orders(orders),
        }
    }
}

impl<'a> ClientView<'a> {
    pub fn build(orders: &'a [Order], client: &'a str, form: &'a OrderForm, tab: ClientTab) -> Self {
        Self {
            client,
            tab,
            form,
            active: filters::client_active(orders, client),
            history: filters::client_history(orders, client),
        }
    }
}

impl<'a> CourierView<'a> {
    pub fn build(orders: &'a [Order], courier: &'a str, tab: CourierTab) -> Self {
        let history = filters::courier_history(orders, courier);
        let stats = CompletedStats::from_orders(history.iter().copied());
        Self {
            courier,
            tab,
            available: filters::available_orders(orders),
            current: filters::courier_current(orders, courier),
            history,
            stats,
        }
    }
}

impl<'a> ReviewsView<'a> {
    pub fn build(orders: &'a [Order]) -> Self {
        Self {
            reviews: filters::reviewed_orders(orders),
        }
    }
}

/// `★★★☆☆` for a rating of 3.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    let mut out = "★".repeat(filled);
    out.push_str(&"☆".repeat(5 - filled));
    out
}

fn tab_bar<'n>(f: &mut fmt::Formatter<'_>, names: impl IntoIterator<Item = (&'n str, bool)>) -> fmt::Result {
    let mut line = String::new();
    for (i, (name, selected)) in names.into_iter().enumerate() {
        if i > 0 {
            line.push_str(" | ");
        }
        if selected {
            line.push('[');
            line.push_str(name);
            line.push(']');
        } else {
            line.push_str(name);
        }
    }
    writeln!(f, "{line}")
}

fn order_card(f: &mut fmt::Formatter<'_>, order: &Order) -> fmt::Result {
    writeln!(f, "#{}  {}  {} RUB", order.id, order.address, order.price)?;
    writeln!(f, "    {}", order.description)?;
    writeln!(f, "    Status: {}", order.status_label())
}

fn empty_or<T>(f: &mut fmt::Formatter<'_>, items: &[T], empty: &str) -> Result<bool, fmt::Error> {
    if items.is_empty() {
        writeln!(f, "  ({empty})")?;
        return Ok(true);
    }
    Ok(false)
}

impl fmt::Display for MainMenu<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Courier Service ==")?;
        writeln!(f, "Signed in as {}", self.user.name)?;
        writeln!(
            f,
            "{} waiting for a courier, {} in progress, {} delivered",
            self.service.pending, self.service.accepted, self.service.completed
        )?;
        writeln!(f, "  courier   work as a courier")?;
        writeln!(f, "  client    order a pickup")?;
        writeln!(f, "  reviews   what customers say")?;
        writeln!(f, "  help      list commands")
    }
}

impl fmt::Display for ClientView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Client: {} ==", self.client)?;
        tab_bar(f, ClientTab::ALL.iter().map(|t| (t.name(), *t == self.tab)))?;
        match self.tab {
            ClientTab::Create => {
                writeln!(f, "New pickup request")?;
                writeln!(f, "  address:     {}", self.form.address)?;
                writeln!(f, "  description: {}", self.form.description)?;
                writeln!(f, "  price:       {}", self.form.price)?;
                writeln!(f, "Use `set <field> <value>` then `create`.")
            }
            ClientTab::Active => {
                if empty_or(f, &self.active, "no active orders")? {
                    return Ok(());
                }
                for order in &self.active {
                    order_card(f, order)?;
                    if let Some(courier) = &order.courier_name {
                        writeln!(f, "    Courier: {courier}")?;
                    }
                }
                Ok(())
            }
            ClientTab::History => {
                if empty_or(f, &self.history, "order history is empty")? {
                    return Ok(());
                }
                for order in &self.history {
                    order_card(f, order)?;
                    match order.rating {
                        Some(rating) => writeln!(f, "    Your rating: {}", stars(rating))?,
                        None => writeln!(f, "    Rate the courier: rate {} <1-5> [review]", order.id)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for CourierView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Courier: {} ==", self.courier)?;
        tab_bar(f, CourierTab::ALL.iter().map(|t| (t.name(), *t == self.tab)))?;
        match self.tab {
            CourierTab::Available => {
                if empty_or(f, &self.available, "no orders available")? {
                    return Ok(());
                }
                for order in &self.available {
                    order_card(f, order)?;
                    writeln!(f, "    accept {}", order.id)?;
                }
                Ok(())
            }
            CourierTab::Current => {
                if empty_or(f, &self.current, "no current orders")? {
                    return Ok(());
                }
                for order in &self.current {
                    order_card(f, order)?;
                    writeln!(f, "    Client: {}", order.client_name)?;
                }
                Ok(())
            }
            CourierTab::History => {
                if empty_or(f, &self.history, "order history is empty")? {
                    return Ok(());
                }
                for order in &self.history {
                    order_card(f, order)?;
                    if let Some(rating) = order.rating {
                        writeln!(f, "    {}", stars(rating))?;
                    }
                }
                Ok(())
            }
            CourierTab::Stats => {
                writeln!(f, "Earned:         {} RUB", self.stats.total)?;
                writeln!(f, "Orders done:    {}", self.stats.count)?;
                writeln!(f, "Average check:  {} RUB", self.stats.average_check)?;
                writeln!(f, "Rating:         {:.1}", self.stats.average_rating)
            }
        }
    }
}

impl fmt::Display for ReviewsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== Reviews ==")?;
        if empty_or(f, &self.reviews, "no reviews yet")? {
            return Ok(());
        }
        for order in &self.reviews {
            let rating = order.rating.unwrap_or_default();
            let courier = order.courier_name.as_deref().unwrap_or("-");
            writeln!(f, "{}  {} -> {}", stars(rating), order.client_name, courier)?;
            match order.review.as_deref() {
                Some(review) if !review.is_empty() => writeln!(f, "    \"{review}\"")?,
                _ => {}
            }
        }
        Ok(())
    }
}
