use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Inactive,
}

/// The protected resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: ItemStatus,
    /// Username of the creator; compared by string equality only.
    pub created_by: String,
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub status: ItemStatus,
    pub created_by: String,
}

/// Fields to replace on update; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ItemStatus>,
}

impl Item {
    pub fn apply(&mut self, patch: ItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item {
            id: 1,
            title: "T".into(),
            description: "D".into(),
            status: ItemStatus::Active,
            created_by: "alice".into(),
        }
    }

    #[test]
    fn serializes_created_by_in_camel_case() {
        let json = serde_json::to_value(item()).unwrap();
        assert_eq!(json["createdBy"], "alice");
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut it = item();
        it.apply(ItemPatch {
            status: Some(ItemStatus::Inactive),
            ..Default::default()
        });
        assert_eq!(it.title, "T");
        assert_eq!(it.description, "D");
        assert_eq!(it.status, ItemStatus::Inactive);
        assert_eq!(it.created_by, "alice");
    }
}
