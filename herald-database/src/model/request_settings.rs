use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChatRequestSetting {
    pub chat_id: i64,
    pub should_request: bool,
}
