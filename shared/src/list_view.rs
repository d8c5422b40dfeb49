//! Searchable, paginated list views with line-item aggregates
//!
//! A [`ListViewModel`] owns the records of one page of the console, a free-text
//! search term and a 1-based page index. Filtering and slicing never mutate the
//! backing collection; aggregates are always computed over the full,
//! unfiltered collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{PageInfo, DEFAULT_PAGE_SIZE};

/// Records that can be matched by the free-text search box
pub trait Searchable {
    /// Textual fields OR-ed by the search clause
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match on any search field.
    /// A blank filter matches everything.
    fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Quantity and unit prices of one line item
pub trait LineFigures {
    fn quantity(&self) -> i32;

    /// Acquisition price recorded on the line itself
    fn unit_purchase_price(&self) -> Option<Decimal>;

    /// Acquisition price of the related product, when the backend embedded it
    fn resolved_purchase_price(&self) -> Option<Decimal> {
        None
    }

    fn unit_sale_price(&self) -> Option<Decimal>;
}

/// Records carrying nested line items (purchases, sales)
pub trait LineItemSource {
    type Line: LineFigures;

    fn line_items(&self) -> &[Self::Line];
}

/// What to use as the acquisition price of a line whose cost is unknown
/// (neither recorded on the line nor resolvable from its product).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedCost {
    /// Count the cost as zero. The whole sale value shows up as margin.
    #[default]
    Zero,
    /// Count the cost as the line's sale price, so the line contributes no margin.
    AtSalePrice,
}

/// Sums over every line item of a collection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateTotals {
    pub total_acquisition_value: Decimal,
    pub total_disposal_value: Decimal,
    pub margin: Decimal,
    /// Lines whose acquisition price fell back to the [`UnresolvedCost`] policy
    pub unresolved_lines: usize,
}

impl AggregateTotals {
    /// Accumulate totals over any sequence of lines
    pub fn from_lines<'a, L, I>(lines: I, policy: UnresolvedCost) -> Self
    where
        L: LineFigures + 'a,
        I: IntoIterator<Item = &'a L>,
    {
        let mut totals = Self::default();
        for line in lines {
            let quantity = Decimal::from(line.quantity());
            let sale_price = line.unit_sale_price().unwrap_or(Decimal::ZERO);
            let purchase_price = match line
                .unit_purchase_price()
                .or_else(|| line.resolved_purchase_price())
            {
                Some(price) => price,
                None => {
                    totals.unresolved_lines += 1;
                    match policy {
                        UnresolvedCost::Zero => Decimal::ZERO,
                        UnresolvedCost::AtSalePrice => sale_price,
                    }
                }
            };
            // Sums saturate at the Decimal bounds instead of panicking
            totals.total_acquisition_value = totals
                .total_acquisition_value
                .saturating_add(quantity.saturating_mul(purchase_price));
            totals.total_disposal_value = totals
                .total_disposal_value
                .saturating_add(quantity.saturating_mul(sale_price));
        }
        totals.margin = totals
            .total_disposal_value
            .saturating_sub(totals.total_acquisition_value);
        totals
    }
}

/// Client-side view over a collection of records
#[derive(Debug, Clone)]
pub struct ListViewModel<T> {
    records: Vec<T>,
    search_term: String,
    page: usize,
    page_size: usize,
    /// Indices into `records` matching the current search term
    matches: Vec<usize>,
}

impl<T> Default for ListViewModel<T>
where
    T: Searchable,
{
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> ListViewModel<T>
where
    T: Searchable,
{
    /// Create an empty view. A page size of zero is coerced to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            search_term: String::new(),
            page: 1,
            page_size: page_size.max(1),
            matches: Vec::new(),
        }
    }

    /// Replace the backing collection wholesale
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.refilter();
        self.page = self.clamp_page(self.page);
    }

    /// Update the search term; always goes back to the first page
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = self.clamp_page(self.page);
    }

    /// Move to page `n`, clamped into `[1, max(page_count, 1)]`
    pub fn go_to_page(&mut self, n: usize) {
        self.page = self.clamp_page(n);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    /// Records of the current page, in collection order
    pub fn visible_page(&self) -> Vec<&T> {
        let start = (self.page - 1) * self.page_size;
        self.matches
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Every record matching the search term, across all pages
    pub fn filtered(&self) -> impl Iterator<Item = &T> + '_ {
        self.matches.iter().map(move |&i| &self.records[i])
    }

    pub fn filtered_count(&self) -> usize {
        self.matches.len()
    }

    /// `ceil(filtered_count / page_size)`; zero when nothing matches
    pub fn page_count(&self) -> usize {
        self.matches.len().div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            page: self.page,
            page_size: self.page_size,
            total_items: self.matches.len(),
            total_pages: self.page_count(),
        }
    }

    fn refilter(&mut self) {
        let term = self.search_term.as_str();
        self.matches = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.matches_filter(term))
            .map(|(i, _)| i)
            .collect();
    }

    fn clamp_page(&self, n: usize) -> usize {
        n.clamp(1, self.page_count().max(1))
    }
}

impl<T> ListViewModel<T>
where
    T: Searchable + LineItemSource,
{
    /// Totals over every line of every record, ignoring search and paging
    pub fn aggregate_totals(&self, policy: UnresolvedCost) -> AggregateTotals {
        AggregateTotals::from_lines(
            self.records.iter().flat_map(|record| record.line_items()),
            policy,
        )
    }
}
