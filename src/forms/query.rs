use std::collections::BTreeMap;

use serde::Deserialize;

use crate::forms::FormError;
use crate::pagination::RequestQueryParams;

/// Raw query string of a list endpoint.
///
/// Every key other than the paging ones is collected into `filter`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryForm {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub order: Option<String>,
    pub sort: Option<String>,
    #[serde(flatten)]
    pub filter: BTreeMap<String, String>,
}

impl TryFrom<ListQueryForm> for RequestQueryParams {
    type Error = FormError;

    fn try_from(form: ListQueryForm) -> Result<Self, Self::Error> {
        let params = RequestQueryParams::parse(
            form.page.as_deref(),
            form.limit.as_deref(),
            form.order.as_deref(),
            form.sort.as_deref(),
        )?;
        Ok(params.with_filter(form.filter))
    }
}
