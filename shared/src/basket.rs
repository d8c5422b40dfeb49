//! Draft line-item basket for purchases and sales
//!
//! Lines are accumulated, edited and removed locally, then submitted to the
//! backend as one transaction. The basket only clears itself once the caller
//! reports a confirmed success; a failed submission keeps every line so the
//! user can correct and resubmit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::list_view::{AggregateTotals, LineFigures, UnresolvedCost};
use crate::models::{Product, ProductRef};
use crate::validation::{
    validate_entity_id, validate_purchase_price, validate_quantity, validate_sale_price,
};

/// Transaction type a basket is assembled for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BasketKind {
    /// Purchase from a supplier: every line names the product, supplier and user
    Purchase,
    /// Sale: only the product is required
    Sale,
}

impl BasketKind {
    pub fn requires_supplier(&self) -> bool {
        matches!(self, BasketKind::Purchase)
    }

    pub fn requires_user(&self) -> bool {
        matches!(self, BasketKind::Purchase)
    }
}

/// Lifecycle of a basket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BasketState {
    Empty,
    Building,
    /// A submission is in flight; edits are refused
    Submitting,
}

/// A draft line, not yet persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    #[serde(rename = "produitId")]
    pub product_id: i64,
    #[serde(rename = "fournisseurId", default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(rename = "utilisateurId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "quantite")]
    pub quantity: i32,
    #[serde(rename = "prix_achat", default)]
    pub purchase_price: Option<Decimal>,
    #[serde(rename = "prix_vente", default)]
    pub sale_price: Option<Decimal>,
    /// Display-only copy of the selected product
    #[serde(rename = "Produit", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
}

impl LineItem {
    pub fn new(product_id: i64, quantity: i32) -> Self {
        Self {
            product_id,
            supplier_id: None,
            user_id: None,
            quantity,
            purchase_price: None,
            sale_price: None,
            product: None,
        }
    }

    /// Draft line for a catalogue product, prefilled with its current prices
    pub fn for_product(product: &Product, quantity: i32) -> Self {
        Self {
            purchase_price: Some(product.purchase_price),
            sale_price: Some(product.sale_price),
            product: Some(ProductRef::from(product)),
            ..Self::new(product.id, quantity)
        }
    }

    pub fn with_supplier(mut self, supplier_id: i64) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_prices(mut self, purchase_price: Option<Decimal>, sale_price: Decimal) -> Self {
        self.purchase_price = purchase_price;
        self.sale_price = Some(sale_price);
        self
    }

    /// Check the line against the reference fields `kind` requires.
    /// Reports the first failing field only.
    pub fn validate(&self, kind: BasketKind) -> Result<(), LineItemError> {
        validate_entity_id(self.product_id).map_err(|_| LineItemError::ProductRequired)?;
        if kind.requires_supplier() {
            match self.supplier_id {
                Some(id) if validate_entity_id(id).is_ok() => {}
                _ => return Err(LineItemError::SupplierRequired),
            }
        }
        if kind.requires_user() {
            match self.user_id {
                Some(id) if validate_entity_id(id).is_ok() => {}
                _ => return Err(LineItemError::UserRequired),
            }
        }
        validate_quantity(self.quantity).map_err(|_| LineItemError::QuantityNotPositive)?;
        match self.sale_price {
            Some(price) if validate_sale_price(price).is_ok() => {}
            _ => return Err(LineItemError::SalePriceNotPositive),
        }
        if let Some(price) = self.purchase_price {
            validate_purchase_price(price).map_err(|_| LineItemError::PurchasePriceNegative)?;
        }
        Ok(())
    }

    pub fn total_purchase(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.purchase_price.unwrap_or(Decimal::ZERO))
    }

    pub fn total_sale(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.sale_price.unwrap_or(Decimal::ZERO))
    }

    pub fn margin(&self) -> Decimal {
        self.total_sale().saturating_sub(self.total_purchase())
    }

    fn to_payload(&self) -> LinePayload {
        LinePayload {
            product_id: self.product_id,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            sale_price: self.sale_price.unwrap_or(Decimal::ZERO),
        }
    }
}

impl LineFigures for LineItem {
    fn quantity(&self) -> i32 {
        self.quantity
    }

    fn unit_purchase_price(&self) -> Option<Decimal> {
        self.purchase_price
    }

    fn resolved_purchase_price(&self) -> Option<Decimal> {
        self.product.as_ref().and_then(|p| p.purchase_price)
    }

    fn unit_sale_price(&self) -> Option<Decimal> {
        self.sale_price
    }
}

/// Why a draft line was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemError {
    #[error("A product must be selected")]
    ProductRequired,

    #[error("A supplier must be selected")]
    SupplierRequired,

    #[error("A user must be selected")]
    UserRequired,

    #[error("Quantity must be greater than zero")]
    QuantityNotPositive,

    #[error("Sale price must be greater than zero")]
    SalePriceNotPositive,

    #[error("Purchase price cannot be negative")]
    PurchasePriceNegative,
}

impl LineItemError {
    /// Wire name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            LineItemError::ProductRequired => "produitId",
            LineItemError::SupplierRequired => "fournisseurId",
            LineItemError::UserRequired => "utilisateurId",
            LineItemError::QuantityNotPositive => "quantite",
            LineItemError::SalePriceNotPositive => "prix_vente",
            LineItemError::PurchasePriceNegative => "prix_achat",
        }
    }
}

/// Basket operation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasketError {
    #[error("Invalid line: {0}")]
    InvalidLine(#[from] LineItemError),

    #[error("Add at least one line before submitting")]
    Empty,

    #[error("No line at position {index} (basket has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("No submission is in progress")]
    NoSubmissionInProgress,
}

/// Line as the backend expects it: references, quantity and prices only
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LinePayload {
    #[serde(rename = "produitId")]
    pub product_id: i64,
    #[serde(rename = "quantite")]
    pub quantity: i32,
    #[serde(
        rename = "prix_achat",
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_price: Option<Decimal>,
    #[serde(rename = "prix_vente", serialize_with = "rust_decimal::serde::float::serialize")]
    pub sale_price: Decimal,
}

/// Transaction-level fields sent alongside the lines
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct OwnerFields {
    #[serde(rename = "utilisateurId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "fournisseurId", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
}

/// Body of a purchase or sale creation request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmissionPayload {
    #[serde(skip)]
    pub kind: BasketKind,
    #[serde(flatten)]
    pub owner: OwnerFields,
    #[serde(rename = "lignes")]
    pub lines: Vec<LinePayload>,
}

/// Ordered collection of draft lines for one transaction
#[derive(Debug, Clone)]
pub struct LineItemBasket {
    kind: BasketKind,
    lines: Vec<LineItem>,
    submitting: bool,
}

impl LineItemBasket {
    pub fn new(kind: BasketKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            submitting: false,
        }
    }

    pub fn kind(&self) -> BasketKind {
        self.kind
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn state(&self) -> BasketState {
        if self.submitting {
            BasketState::Submitting
        } else if self.lines.is_empty() {
            BasketState::Empty
        } else {
            BasketState::Building
        }
    }

    /// Append `line`, or replace the line at `at_index` when editing.
    ///
    /// The line is validated first; a rejected line leaves the basket unchanged.
    /// Returns the position of the accepted line.
    pub fn add_or_replace(
        &mut self,
        line: LineItem,
        at_index: Option<usize>,
    ) -> Result<usize, BasketError> {
        if self.submitting {
            return Err(BasketError::SubmissionInProgress);
        }
        line.validate(self.kind)?;
        match at_index {
            Some(index) => {
                let len = self.lines.len();
                let slot = self
                    .lines
                    .get_mut(index)
                    .ok_or(BasketError::IndexOutOfRange { index, len })?;
                *slot = line;
                Ok(index)
            }
            None => {
                self.lines.push(line);
                Ok(self.lines.len() - 1)
            }
        }
    }

    /// Remove the line at `index`. Out-of-range indices and removals during a
    /// submission are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<LineItem> {
        if self.submitting || index >= self.lines.len() {
            return None;
        }
        Some(self.lines.remove(index))
    }

    /// Drop every line. Ignored while a submission is in flight.
    pub fn clear(&mut self) {
        if !self.submitting {
            self.lines.clear();
        }
    }

    /// Project the lines onto the request body, dropping display-only fields.
    ///
    /// Owner fields come from the first line. Fails on an empty basket or if
    /// any line no longer validates.
    pub fn to_submission_payload(&self) -> Result<SubmissionPayload, BasketError> {
        let first = self.lines.first().ok_or(BasketError::Empty)?;
        for line in &self.lines {
            line.validate(self.kind)?;
        }

        let owner = match self.kind {
            BasketKind::Purchase => OwnerFields {
                user_id: first.user_id,
                supplier_id: first.supplier_id,
            },
            BasketKind::Sale => OwnerFields::default(),
        };

        Ok(SubmissionPayload {
            kind: self.kind,
            owner,
            lines: self.lines.iter().map(LineItem::to_payload).collect(),
        })
    }

    /// Build the payload and enter the submitting state
    pub fn begin_submission(&mut self) -> Result<SubmissionPayload, BasketError> {
        if self.submitting {
            return Err(BasketError::SubmissionInProgress);
        }
        let payload = self.to_submission_payload()?;
        self.submitting = true;
        Ok(payload)
    }

    /// Leave the submitting state: cleared on success, lines kept on failure
    pub fn complete_submission(&mut self, success: bool) -> Result<(), BasketError> {
        if !self.submitting {
            return Err(BasketError::NoSubmissionInProgress);
        }
        self.submitting = false;
        if success {
            self.lines.clear();
        }
        Ok(())
    }

    /// Running totals of the draft lines
    pub fn totals(&self) -> AggregateTotals {
        AggregateTotals::from_lines(&self.lines, UnresolvedCost::Zero)
    }
}
