use crate::app::{AppContext, Result};
use crate::catalog::CatalogClient;
use crate::domain::{Anime, Page};

pub async fn top(ctx: &AppContext, page: u32) -> Result<()> {
    let page = ctx.catalog.top(page).await?;
    print_page(ctx, &page);
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, page: u32) -> Result<()> {
    let page = ctx.catalog.search(page, query).await?;

    if page.is_empty() {
        println!("No results for \"{}\"", query);
        return Ok(());
    }

    print_page(ctx, &page);
    Ok(())
}

pub fn list_favorites(ctx: &AppContext) -> Result<()> {
    let favorites = ctx.favorites.list();

    if favorites.is_empty() {
        println!("No favorites");
        return Ok(());
    }

    for anime in favorites {
        println!("{:>8}  {}", anime.id, describe(&anime));
    }

    Ok(())
}

pub fn remove_favorite(ctx: &AppContext, id: i64) -> Result<()> {
    if ctx.favorites.remove(id)? {
        println!("Removed favorite {}", id);
    } else {
        println!("Not a favorite: {}", id);
    }
    Ok(())
}

fn print_page(ctx: &AppContext, page: &Page) {
    for anime in &page.items {
        let marker = if ctx.favorites.contains(anime.id) {
            "★"
        } else {
            " "
        };
        println!("{} {}", marker, describe(anime));
    }

    if page.has_more {
        println!("\n(more pages available, use --page {})", page.number + 1);
    }
}

fn describe(anime: &Anime) -> String {
    let score = anime
        .score
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "-".into());
    let kind = anime.kind.as_deref().unwrap_or("?");

    let mut line = format!("{:>5}  {:<6} {}", score, kind, anime.display_title());
    if let Some(episodes) = anime.episodes {
        line.push_str(&format!(" ({} eps)", episodes));
    }
    line
}
