//! Newsletter DTOs.

use serde::Deserialize;
use utoipa::IntoParams;

/// Query string for `POST /newsletter/subscribe`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscribeQuery {
    /// Address to subscribe.
    #[serde(default)]
    pub email: Option<String>,
}
