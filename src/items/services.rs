use tracing::info;

use crate::{
    auth::{extractors::AuthUser, policy::Policy},
    error::ApiError,
    items::{
        repo::ItemStore,
        repo_types::{Item, ItemPatch, NewItem},
    },
};

fn not_found() -> ApiError {
    ApiError::NotFound("Item not found".into())
}

pub async fn get_item(store: &dyn ItemStore, id: i64) -> Result<Item, ApiError> {
    store.get(id).await?.ok_or_else(not_found)
}

pub async fn create_item(
    store: &dyn ItemStore,
    caller: &AuthUser,
    new_item: NewItem,
) -> Result<Item, ApiError> {
    Policy::Authenticated.authorize(caller)?;
    let item = store.insert(new_item).await?;
    info!(item_id = item.id, created_by = %item.created_by, "item created");
    Ok(item)
}

/// Existence is checked before ownership, so a missing item is a 404 for
/// every caller.
pub async fn update_item(
    store: &dyn ItemStore,
    caller: &AuthUser,
    id: i64,
    patch: ItemPatch,
) -> Result<Item, ApiError> {
    let current = get_item(store, id).await?;
    Policy::OwnerOrAdmin {
        owner: &current.created_by,
    }
    .authorize(caller)?;

    let item = store.update(id, patch).await?.ok_or_else(not_found)?;
    info!(item_id = id, by = %caller.username, "item updated");
    Ok(item)
}

/// The role check runs first: non-admins get 403 whether or not the item exists.
pub async fn delete_item(store: &dyn ItemStore, caller: &AuthUser, id: i64) -> Result<(), ApiError> {
    Policy::AdminOnly.authorize(caller)?;
    store.remove(id).await?.ok_or_else(not_found)?;
    info!(item_id = id, by = %caller.username, "item deleted");
    Ok(())
}
