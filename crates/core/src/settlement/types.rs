//! Settlement domain types.
//!
//! An order is made of line items (one per shoe or product), each carrying
//! optional service sub-charges. Items and services are cancelled
//! independently; cancellation never removes a price from the gross total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shinedesk_shared::types::{LineItemId, ServiceId};

/// Status of a billable line item or service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Billable.
    #[default]
    Active,
    /// Cancelled; kept for audit but excluded from net totals.
    Cancelled,
}

impl ItemStatus {
    /// Returns true if the status is `Cancelled`.
    #[must_use]
    pub fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Revenue category a line item is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shoe-care work (cleaning, repair, sole replacement...).
    Service,
    /// Retail goods sold over the counter.
    Product,
}

impl Category {
    /// Both categories, in report order.
    pub const ALL: [Self; 2] = [Self::Service, Self::Product];

    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Product => "product",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named sub-charge within a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier.
    pub id: ServiceId,
    /// Display name, e.g. "cleaning".
    pub name: String,
    /// Charge for this service.
    pub price: Decimal,
    /// Own status, independent of the parent line item.
    #[serde(default)]
    pub status: ItemStatus,
}

impl Service {
    /// Creates an active service.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ServiceId::new(),
            name: name.into(),
            price,
            status: ItemStatus::Active,
        }
    }

    /// Returns the service with the given status.
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }
}

/// One billable unit of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier.
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Reporting category.
    pub category: Category,
    /// Base charge of the item itself (may be zero when only services bill).
    pub unit_price: Decimal,
    /// Service sub-charges.
    #[serde(default)]
    pub services: Vec<Service>,
    /// Item status.
    #[serde(default)]
    pub status: ItemStatus,
}

impl LineItem {
    /// Creates an active line item without services.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category, unit_price: Decimal) -> Self {
        Self {
            id: LineItemId::new(),
            name: name.into(),
            category,
            unit_price,
            services: Vec::new(),
            status: ItemStatus::Active,
        }
    }

    /// Appends a service sub-charge.
    #[must_use]
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Returns the line item with the given status.
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Unit price plus every service price, regardless of status.
    #[must_use]
    pub fn gross(&self) -> Decimal {
        self.unit_price + self.services.iter().map(|s| s.price).sum::<Decimal>()
    }

    /// Amount removed from the net total by cancellations.
    ///
    /// A cancelled line takes all its services with it, so a service that is
    /// cancelled under a cancelled parent is counted once.
    #[must_use]
    pub fn cancelled_amount(&self) -> Decimal {
        if self.status.is_cancelled() {
            return self.gross();
        }
        self.services
            .iter()
            .filter(|s| s.status.is_cancelled())
            .map(|s| s.price)
            .sum()
    }

    /// Gross minus cancellations.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.gross() - self.cancelled_amount()
    }
}

/// Policy inputs applied on top of the net total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPolicy {
    /// Fixed discount amount.
    #[serde(default)]
    pub discount: Decimal,
    /// Loyalty points redeemed, in currency units.
    #[serde(default)]
    pub points_used: Decimal,
    /// Flat VAT rate (0.10 = 10%).
    #[serde(default = "default_vat_rate")]
    pub vat_rate: Decimal,
    /// When set, no VAT is charged.
    #[serde(default)]
    pub no_vat: bool,
}

fn default_vat_rate() -> Decimal {
    Decimal::new(10, 2)
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            discount: Decimal::ZERO,
            points_used: Decimal::ZERO,
            vat_rate: default_vat_rate(),
            no_vat: false,
        }
    }
}

impl SettlementPolicy {
    /// Default policy with the given VAT rate.
    #[must_use]
    pub fn with_vat_rate(vat_rate: Decimal) -> Self {
        Self {
            vat_rate,
            ..Self::default()
        }
    }
}

/// Settlement figures for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementFigures {
    /// Sum of all prices regardless of status.
    pub gross_total: Decimal,
    /// Sum of cancelled prices.
    pub cancelled_total: Decimal,
    /// `gross_total - cancelled_total`.
    pub net_total: Decimal,
    /// VAT on the net total (zero under the no-VAT override).
    pub vat: Decimal,
    /// Discount applied.
    pub discount: Decimal,
    /// Points redeemed.
    pub points_used: Decimal,
    /// Amount the customer owes; never negative.
    pub final_owed: Decimal,
}

/// A cancelled price, derived from item and service statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationRecord {
    /// The line item the cancellation belongs to.
    pub line_item_id: LineItemId,
    /// The cancelled service, or `None` when the whole line is cancelled.
    pub service_id: Option<ServiceId>,
    /// Reporting category of the line.
    pub category: Category,
    /// Cancelled amount.
    pub amount: Decimal,
}

/// Gross, cancelled and net amounts of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFigures {
    /// Gross amount.
    pub gross: Decimal,
    /// Cancelled amount.
    pub cancelled: Decimal,
    /// `gross - cancelled`.
    pub net: Decimal,
}

impl CategoryFigures {
    fn add(&mut self, gross: Decimal, cancelled: Decimal) {
        self.gross += gross;
        self.cancelled += cancelled;
        self.net = self.gross - self.cancelled;
    }
}

/// Per-category split of an order's charges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Service charges.
    pub service: CategoryFigures,
    /// Product charges.
    pub product: CategoryFigures,
}

impl CategoryTotals {
    /// Returns the figures of one category.
    #[must_use]
    pub fn get(&self, category: Category) -> &CategoryFigures {
        match category {
            Category::Service => &self.service,
            Category::Product => &self.product,
        }
    }

    pub(crate) fn add_line(&mut self, item: &LineItem) {
        let figures = match item.category {
            Category::Service => &mut self.service,
            Category::Product => &mut self.product,
        };
        figures.add(item.gross(), item.cancelled_amount());
    }
}
