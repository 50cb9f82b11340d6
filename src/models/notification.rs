//! Notification and system log parameters

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NotificationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Log level filter, e.g. `ERROR`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}
