use serde::{Deserialize, Serialize};

/// Settings of the bot that forwards attempt results to the admins' chat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSetting {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub admin_chat_id: String,
    #[serde(default)]
    pub is_active: bool,
}
