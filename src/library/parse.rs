use soup::prelude::*;
use url::Url;

use crate::config::GameIdSource;
use crate::constants::selectors;
use crate::galaxy::types::Game;
use crate::library::types::CollectionEntry;
use crate::utils::{decode_entities, slug_from_href};

/// Games listed on one `library/showcase/{page}` page
pub fn showcase_page(html: &str, base_url: &Url, id_source: GameIdSource) -> Vec<Game> {
    let soup = Soup::new(html);
    let mut games = Vec::new();
    for anchor in soup
        .tag("a")
        .class(selectors::SHOWCASE_TITLE_CLASS)
        .find_all()
    {
        let title = anchor.text().trim().to_string();
        if title.is_empty() {
            continue;
        }
        let game_id = match id_source {
            GameIdSource::Title => Some(title.clone()),
            GameIdSource::Slug => anchor
                .get("href")
                .and_then(|href| slug_from_href(base_url, &href)),
        };
        match game_id {
            Some(game_id) => games.push(Game::single_purchase(game_id, title)),
            None => log::warn!("Skipping showcase entry without a link: {}", title),
        }
    }
    games
}

/// Games from the `user_collection` array of the user info payload
pub fn user_collection(entries: Vec<CollectionEntry>, id_source: GameIdSource) -> Vec<Game> {
    entries
        .into_iter()
        .map(|entry| {
            let game_id = match id_source {
                GameIdSource::Slug => entry.prod_slugged_name,
                GameIdSource::Title => entry.prod_name.clone(),
            };
            Game::single_purchase(game_id, entry.prod_name)
        })
        .collect()
}

/// Games from the legacy collection markup
///
/// Entries are cut out on the literal column delimiter. The id is the anchor
/// text as sent, entities included, which is what older installs already
/// reported to the host.
pub fn legacy_collection(html: &str) -> Vec<Game> {
    html.split(selectors::LEGACY_ITEM_DELIMITER)
        .filter(|chunk| chunk.starts_with("<a"))
        .filter_map(|chunk| {
            let anchor = chunk.split("</a>").next()?;
            let raw_title = anchor.split('>').nth(1)?;
            let title = decode_entities(raw_title);
            log::debug!("Legacy showcase entry {}", title);
            Some(Game::single_purchase(raw_title, title))
        })
        .collect()
}
