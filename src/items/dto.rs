use serde::{Deserialize, Serialize};

use crate::items::repo_types::ItemStatus;

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
