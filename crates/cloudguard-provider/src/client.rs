use crate::error::ProviderError;
use crate::options::ConnectionOptions;
use crate::page::ValuePage;

/// A single paginated listing operation, named at the transport boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListRequest<'a> {
    /// Owning service, e.g. `s3`.
    pub service: &'a str,
    /// Provider operation name, e.g. `list_buckets`.
    pub operation: &'a str,
    /// Response field holding the current page's array of items.
    pub items_field: &'a str,
}

/// Issues listing calls and returns the first page of the response.
///
/// Implementations are otherwise schema-agnostic: the engine only consumes
/// the named items field and the pagination indicator through [`ValuePage`].
pub trait ListClient {
    fn list(
        &self,
        request: &ListRequest<'_>,
        options: &ConnectionOptions,
    ) -> Result<ValuePage, ProviderError>;
}
