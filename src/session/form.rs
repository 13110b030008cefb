use std::str::FromStr;

use super::router::UnknownName;
use crate::domain::OrderCreate;
use crate::order_actor::OrderError;

/// One input of the new-order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Address,
    Description,
    Price,
}

impl FromStr for FormField {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, UnknownName> {
        match s {
            "address" => Ok(FormField::Address),
            "description" => Ok(FormField::Description),
            "price" => Ok(FormField::Price),
            other => Err(UnknownName::new("form field", other)),
        }
    }
}

/// The pending new-order form, held as raw text until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub address: String,
    pub description: String,
    pub price: String,
}

impl OrderForm {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Address => &mut self.address,
            FormField::Description => &mut self.description,
            FormField::Price => &mut self.price,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Turns the form into a creation payload for `client_name`.
    ///
    /// # Errors
    /// `ValidationError` if any field is blank or the price is not a whole,
    /// non-negative number.
    pub fn to_payload(&self, client_name: &str) -> Result<OrderCreate, OrderError> {
        let address = self.address.trim();
        let description = self.description.trim();
        let price = self.price.trim();

        if address.is_empty() || description.is_empty() || price.is_empty() {
            return Err(OrderError::ValidationError(
                "fill in address, description and price".to_string(),
            ));
        }
        let price: u64 = price.parse().map_err(|_| {
            OrderError::ValidationError(format!(
                "price must be a whole non-negative number, got {price:?}"
            ))
        })?;

        Ok(OrderCreate::new(client_name, address, description, price))
    }
}
