pub mod activity;
pub mod packages;
pub mod searches;
pub mod track;
pub mod translate;
pub mod webhook;

use serde::Deserialize;

/// `?userId=` filter shared by the listing routes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}
