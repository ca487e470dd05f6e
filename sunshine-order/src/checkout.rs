use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use sunshine_catalog::ticket::{TicketCatalog, MAX_TICKETS_PER_TYPE};
use sunshine_shared::pii::Masked;

use crate::cart::Cart;
use crate::fulfillment::{generate_order_id, QrPayload, Receipt};
use crate::models::{CheckoutStep, ContactDetails, Order, PaymentDetails};

/// Drives one guest through select → payment → confirmation.
///
/// `payment` may go back to `select`; `confirmation` is terminal. Every
/// rejected call leaves the flow exactly as it was.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    catalog: Arc<TicketCatalog>,
    max_per_type: u32,
    step: CheckoutStep,
    cart: Cart,
    visit_date: Option<NaiveDate>,
    contact: ContactDetails,
    order: Option<Order>,
}

/// Snapshot of the flow for display
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
    pub step: CheckoutStep,
    pub tickets: BTreeMap<String, u32>,
    pub total_tickets: u32,
    pub total_amount: i64,
    pub visit_date: Option<NaiveDate>,
    pub email: Masked<String>,
    pub phone: Masked<String>,
    pub order_id: Option<String>,
}

impl CheckoutFlow {
    pub fn new(catalog: Arc<TicketCatalog>) -> Self {
        Self::with_limit(catalog, MAX_TICKETS_PER_TYPE)
    }

    pub fn with_limit(catalog: Arc<TicketCatalog>, max_per_type: u32) -> Self {
        Self {
            catalog,
            max_per_type,
            step: CheckoutStep::Select,
            cart: Cart::new(),
            visit_date: None,
            contact: ContactDetails::default(),
            order: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn visit_date(&self) -> Option<NaiveDate> {
        self.visit_date
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Add or remove tickets of one type. Returns the new quantity.
    pub fn adjust_quantity(&mut self, ticket_id: &str, delta: i64) -> Result<u32, CheckoutError> {
        self.require_step(CheckoutStep::Select, "adjust tickets")?;
        if !self.catalog.contains(ticket_id) {
            return Err(CheckoutError::UnknownTicket(ticket_id.to_string()));
        }
        Ok(self.cart.adjust(ticket_id, delta, self.max_per_type))
    }

    pub fn total_amount(&self) -> i64 {
        self.cart.total_amount(&self.catalog)
    }

    pub fn total_tickets(&self) -> u32 {
        self.cart.total_tickets()
    }

    /// Choose the visit date. Dates before `today` are not selectable.
    pub fn set_visit_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), CheckoutError> {
        self.require_step(CheckoutStep::Select, "choose a visit date")?;
        if date < today {
            return Err(CheckoutError::PastVisitDate(date));
        }
        self.visit_date = Some(date);
        Ok(())
    }

    /// Store contact details. Emptiness is only checked when advancing.
    pub fn set_contact(&mut self, email: Option<String>, phone: Option<String>) -> Result<(), CheckoutError> {
        self.require_step(CheckoutStep::Select, "edit contact details")?;
        if let Some(email) = email {
            self.contact.email = Masked::new(email);
        }
        if let Some(phone) = phone {
            self.contact.phone = Masked::new(phone);
        }
        Ok(())
    }

    /// Transition: Select → Payment
    pub fn advance_to_payment(&mut self) -> Result<(), CheckoutError> {
        self.require_step(CheckoutStep::Select, "continue to payment")?;

        if self.total_tickets() == 0 {
            return Err(CheckoutError::NoTickets);
        }
        if self.visit_date.is_none() {
            return Err(CheckoutError::MissingVisitDate);
        }
        if !self.contact.is_complete() {
            return Err(CheckoutError::MissingContactInfo);
        }

        self.step = CheckoutStep::Payment;
        tracing::debug!(tickets = self.total_tickets(), amount = self.total_amount(), "checkout moved to payment");
        Ok(())
    }

    /// Transition: Payment → Select, keeping everything entered so far
    pub fn back_to_selection(&mut self) -> Result<(), CheckoutError> {
        self.require_step(CheckoutStep::Payment, "go back to ticket selection")?;
        self.step = CheckoutStep::Select;
        Ok(())
    }

    /// Transition: Payment → Confirmation.
    ///
    /// Card fields only need to be present. Produces the order.
    pub fn complete_payment(&mut self, payment: &PaymentDetails, now: DateTime<Utc>) -> Result<&Order, CheckoutError> {
        self.require_step(CheckoutStep::Payment, "pay")?;
        if !payment.is_complete() {
            return Err(CheckoutError::IncompletePayment);
        }
        let visit_date = self.visit_date.ok_or(CheckoutError::MissingVisitDate)?;

        let order = Order {
            order_id: generate_order_id(now, &mut rand::thread_rng()),
            visit_date,
            email: self.contact.email.clone(),
            phone: self.contact.phone.clone(),
            total_amount: self.total_amount(),
            total_tickets: self.total_tickets(),
            tickets: self.cart.lines().clone(),
            card_last_four: payment.card_number.last_four(),
            created_at: now,
        };

        tracing::info!(order_id = %order.order_id, amount = order.total_amount, tickets = order.total_tickets, "order confirmed");

        self.step = CheckoutStep::Confirmation;
        Ok(self.order.insert(order))
    }

    /// Downloadable receipt for the confirmed order
    pub fn receipt(&self) -> Result<Receipt, CheckoutError> {
        let order = self.confirmed_order("download the receipt")?;
        Receipt::for_order(order).map_err(|e| CheckoutError::ArtifactFailed(e.to_string()))
    }

    /// Payload for the entrance QR code
    pub fn qr_payload(&self) -> Result<QrPayload, CheckoutError> {
        let order = self.confirmed_order("show the entrance code")?;
        Ok(QrPayload::for_order(order))
    }

    pub fn summary(&self) -> CheckoutSummary {
        CheckoutSummary {
            step: self.step,
            tickets: self.cart.lines().clone(),
            total_tickets: self.total_tickets(),
            total_amount: self.total_amount(),
            visit_date: self.visit_date,
            email: self.contact.email.clone(),
            phone: self.contact.phone.clone(),
            order_id: self.order.as_ref().map(|o| o.order_id.clone()),
        }
    }

    fn confirmed_order(&self, action: &'static str) -> Result<&Order, CheckoutError> {
        self.require_step(CheckoutStep::Confirmation, action)?;
        self.order.as_ref().ok_or(CheckoutError::InvalidStep { from: self.step, action })
    }

    fn require_step(&self, expected: CheckoutStep, action: &'static str) -> Result<(), CheckoutError> {
        if self.step != expected {
            return Err(CheckoutError::InvalidStep { from: self.step, action });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Please select at least one ticket")]
    NoTickets,

    #[error("Please select a visit date")]
    MissingVisitDate,

    #[error("Please provide your contact information")]
    MissingContactInfo,

    #[error("Please fill in all payment details")]
    IncompletePayment,

    #[error("Visit date {0} is in the past")]
    PastVisitDate(NaiveDate),

    #[error("Unknown ticket type: {0}")]
    UnknownTicket(String),

    #[error("Cannot {action} during the {from} step")]
    InvalidStep {
        from: CheckoutStep,
        action: &'static str,
    },

    #[error("Could not build order artifact: {0}")]
    ArtifactFailed(String),
}
