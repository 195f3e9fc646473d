//! Character lookup client (independent of the task board).

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Character {
    pub name: String,
    pub image: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Character>,
}

/// Name-substring search: GET {base}/character/?name={query}.
///
/// Callers must pass a non-empty trimmed query; the empty-query prompt is a
/// UI concern. No pagination, no caching, no retry.
pub async fn search_characters(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
) -> Result<Vec<Character>> {
    let url = format!("{}/character/", base_url.trim_end_matches('/'));
    let body: SearchResponse = client
        .get(&url)
        .query(&[("name", name)])
        .send()
        .await
        .context("character search request")?
        .error_for_status()
        .context("character search")?
        .json()
        .await
        .context("decoding character search response")?;
    Ok(body.results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_results_envelope() {
        let json = r#"{
            "info": {"count": 1, "pages": 1},
            "results": [
                {"id": 1, "name": "Rick Sanchez", "status": "Alive",
                 "image": "https://example.test/rick.png", "species": "Human"}
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.results[0].name, "Rick Sanchez");
        assert_eq!(resp.results[0].status, "Alive");
    }
}
