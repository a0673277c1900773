use anyhow::{Context, Result};
use kaigi_core::timetable::SessionId;

use super::utils::AppContext;

pub async fn toggle(ctx: &AppContext, id: String) -> Result<()> {
    let store = ctx.favorite_store().await?;
    let id = SessionId::new(id);

    let favorited = store
        .toggle(&id)
        .await
        .with_context(|| format!("Failed to save favorite {}", id))?;

    if favorited {
        println!("Added {} to favorites", id);
    } else {
        println!("Removed {} from favorites", id);
    }
    Ok(())
}

pub async fn list(ctx: &AppContext) -> Result<()> {
    let favorites = ctx.favorite_store().await?.current();

    if favorites.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }
    for id in favorites.iter() {
        println!("{}", id);
    }
    Ok(())
}

pub async fn clear(ctx: &AppContext) -> Result<()> {
    let store = ctx.favorite_store().await?;
    let count = store.current().len();

    store.clear().await.context("Failed to clear favorites")?;

    println!("Cleared {} favorites", count);
    Ok(())
}
