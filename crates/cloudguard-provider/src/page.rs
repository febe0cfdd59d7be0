use crate::error::ProviderError;
use serde_json::Value;
use std::collections::VecDeque;

/// One response unit from a paginated remote listing call.
///
/// A page yields its items once, reports whether the provider signalled more
/// pages, and can advance itself to the next page. Implementations own the
/// provider-specific pagination convention; callers see only this interface.
pub trait Page {
    type Item;

    /// Remove and return this page's items. An absent or empty item field is
    /// an empty page, not an error.
    fn take_items(&mut self) -> Vec<Self::Item>;

    /// Whether the provider indicated another page is available.
    fn has_more(&self) -> bool;

    /// Fetch the next page in place. Transport errors propagate unmodified;
    /// there are no retries at this layer.
    fn advance(&mut self) -> Result<(), ProviderError>;
}

/// Drive a paginated listing to completion, concatenating items in page
/// order. No deduplication, no reordering.
pub fn collect_all<P>(page: &mut P) -> Result<Vec<P::Item>, ProviderError>
where
    P: Page + ?Sized,
{
    let mut items = page.take_items();
    while page.has_more() {
        page.advance()?;
        items.extend(page.take_items());
    }
    Ok(items)
}

/// Fetches the raw response document for a pagination token.
pub type FetchNext = Box<dyn FnMut(&str) -> Result<Value, ProviderError>>;

/// [`Page`] over a raw JSON response document.
///
/// The named `items_field` holds the current page's array; a string-valued
/// `token_field` signals that more pages are available and carries the token
/// handed to the fetch callback.
pub struct ValuePage {
    response: Value,
    items_field: String,
    token_field: String,
    fetch_next: FetchNext,
}

impl std::fmt::Debug for ValuePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuePage")
            .field("response", &self.response)
            .field("items_field", &self.items_field)
            .field("token_field", &self.token_field)
            .field("fetch_next", &"<fn>")
            .finish()
    }
}

impl ValuePage {
    pub fn new(response: Value, items_field: &str, token_field: &str, fetch_next: FetchNext) -> Self {
        Self {
            response,
            items_field: items_field.to_string(),
            token_field: token_field.to_string(),
            fetch_next,
        }
    }
}

impl Page for ValuePage {
    type Item = Value;

    fn take_items(&mut self) -> Vec<Value> {
        match self.response.get_mut(&self.items_field).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }

    fn has_more(&self) -> bool {
        self.response
            .get(&self.token_field)
            .and_then(Value::as_str)
            .is_some()
    }

    fn advance(&mut self) -> Result<(), ProviderError> {
        let token = match self.response.get(&self.token_field).and_then(Value::as_str) {
            Some(t) => t.to_string(),
            None => return Ok(()),
        };
        self.response = (self.fetch_next)(&token)?;
        Ok(())
    }
}

/// Build a [`ValuePage`] that serves a pre-recorded sequence of response
/// documents, ignoring token values and simply yielding the next document.
pub fn scripted_pages(
    mut docs: VecDeque<Value>,
    items_field: &str,
    token_field: &str,
    operation: &str,
) -> ValuePage {
    let first = docs.pop_front().unwrap_or(Value::Null);
    let operation = operation.to_string();
    ValuePage::new(
        first,
        items_field,
        token_field,
        Box::new(move |_token| {
            docs.pop_front().ok_or_else(|| ProviderError::Malformed {
                operation: operation.clone(),
                message: "pagination token points past the final page".to_string(),
            })
        }),
    )
}
