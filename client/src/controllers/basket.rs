//! Purchase and sale entry: a draft basket plus the list it feeds

use std::sync::{Mutex, MutexGuard};

use shared::{AggregateTotals, BasketError, BasketState, LineItem, LineItemBasket, Searchable};

use crate::api::BasketResource;
use crate::controllers::list::ListController;
use crate::error::ClientResult;

fn lock(basket: &Mutex<LineItemBasket>) -> MutexGuard<'_, LineItemBasket> {
    basket.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Returns the basket to editing if the submission future is dropped
/// before the backend answered
struct SubmissionGuard<'a> {
    basket: &'a Mutex<LineItemBasket>,
    armed: bool,
}

impl<'a> SubmissionGuard<'a> {
    fn new(basket: &'a Mutex<LineItemBasket>) -> Self {
        Self { basket, armed: true }
    }

    fn finish(mut self, success: bool) -> Result<(), BasketError> {
        self.armed = false;
        lock(self.basket).complete_submission(success)
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            // Outcome unknown: keep the lines so the user can check and retry
            let _ = lock(self.basket).complete_submission(false);
            tracing::warn!("Submission abandoned before the server answered; lines kept");
        }
    }
}

/// Controller of a purchase or sale page
pub struct BasketController<R> {
    basket: Mutex<LineItemBasket>,
    list: ListController<R>,
}

impl<R> BasketController<R>
where
    R: BasketResource + Searchable,
{
    pub fn new(list: ListController<R>) -> Self {
        Self {
            basket: Mutex::new(LineItemBasket::new(R::BASKET)),
            list,
        }
    }

    pub fn list(&self) -> &ListController<R> {
        &self.list
    }

    /// Insert a line, or replace the line at `index`; returns its position
    pub async fn add_or_replace(&self, line: LineItem, index: Option<usize>) -> ClientResult<usize> {
        Ok(lock(&self.basket).add_or_replace(line, index)?)
    }

    pub async fn remove_at(&self, index: usize) -> Option<LineItem> {
        lock(&self.basket).remove_at(index)
    }

    pub async fn lines(&self) -> Vec<LineItem> {
        lock(&self.basket).lines().to_vec()
    }

    pub async fn state(&self) -> BasketState {
        lock(&self.basket).state()
    }

    pub async fn totals(&self) -> AggregateTotals {
        lock(&self.basket).totals()
    }

    /// Submit the basket as one transaction.
    ///
    /// On success the basket is emptied and the list reloaded; on failure
    /// every line is kept so the user can correct and retry.
    pub async fn confirm(&self) -> ClientResult<Option<R>> {
        let payload = lock(&self.basket).begin_submission()?;
        let guard = SubmissionGuard::new(&self.basket);
        let lines = payload.lines.len();

        // The basket lock is released while the request is in flight; edits
        // are refused by the submitting state instead.
        let result = self.list.api().submit_as::<R>(&payload).await;

        guard.finish(result.is_ok())?;

        match result {
            Ok(record) => {
                tracing::info!("Recorded {} with {} line(s)", R::KIND, lines);
                // A failed reload is recorded on the list itself.
                let _ = self.list.reload().await;
                Ok(record)
            }
            Err(e) => {
                tracing::error!("Failed to record {}: {}", R::KIND, e);
                Err(e)
            }
        }
    }
}
