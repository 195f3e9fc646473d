use anyhow::Result;
use taskdeck_store::search_characters;

use crate::config::Config;

/// Search the character API by name and print one card per match.
pub async fn run(cfg: &Config, name: &str) -> Result<()> {
    let query = name.trim();
    if query.is_empty() {
        println!("Ingrese un nombre del personaje");
        return Ok(());
    }

    let client = reqwest::Client::new();
    let results = match search_characters(&client, &cfg.api.character_api_url, query).await {
        Ok(results) => results,
        Err(e) => {
            // Failed searches print nothing; details go to the log.
            tracing::warn!(error = %format!("{e:#}"), "character search failed");
            return Ok(());
        }
    };

    for c in &results {
        println!("Nombre: {}", c.name);
        println!("Estado: {}", c.status);
        println!("Imagen: {}", c.image);
        println!();
    }

    Ok(())
}
