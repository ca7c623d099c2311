//! Tests for the TCGdex catalog client, against a wiremock server

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::error::OrganizerError;

fn tcgdex_set(id: &str, name: &str, official: u32, total: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "cardCount": { "official": official, "total": total }
    })
}

fn known_set(id: &str, name: &str, printed_total: u32) -> CardSet {
    CardSet {
        id: id.to_string(),
        name: name.to_string(),
        series: "BASE".to_string(),
        printed_total,
        total: printed_total,
        release_date: String::new(),
        updated_at: String::new(),
        images: Default::default(),
    }
}

// ── get_sets ─────────────────────────────────────────────────────────

#[tokio::test]
async fn get_sets_filters_pocket_sets_and_reverses_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            tcgdex_set("base1", "Base Set", 102, 102),
            tcgdex_set("jungle", "Jungle", 64, 64),
            tcgdex_set("A1", "Genetic Apex", 226, 286),
            tcgdex_set("B2a", "Pocket Expansion", 100, 100),
            tcgdex_set("MEP01", "Pocket Promos", 50, 50),
            tcgdex_set("P-A", "Promo A", 30, 30),
            tcgdex_set("sv01", "Scarlet & Violet", 198, 258),
        ])))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let page = client.get_sets(1, 50).await.unwrap();

    let ids: Vec<&str> = page.sets.iter().map(|s| s.id.as_str()).collect();
    // Pocket sets gone, newest (last in API order) first
    assert_eq!(ids, vec!["sv01", "jungle", "base1"]);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn get_sets_paginates_manually() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            tcgdex_set("base1", "Base Set", 102, 102),
            tcgdex_set("jungle", "Jungle", 64, 64),
            tcgdex_set("fossil", "Fossil", 62, 62),
        ])))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());

    let first = client.get_sets(1, 2).await.unwrap();
    let ids: Vec<&str> = first.sets.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["fossil", "jungle"]);

    let second = client.get_sets(2, 2).await.unwrap();
    let ids: Vec<&str> = second.sets.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["base1"]);
    assert_eq!(second.total_count, 3);
}

#[tokio::test]
async fn get_sets_converts_series_and_image_fallbacks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "sv01",
            "name": "Scarlet & Violet",
            "logo": "https://assets.tcgdex.net/en/sv/sv01/logo",
            "cardCount": { "official": 198, "total": 258 }
        }])))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let page = client.get_sets(1, 10).await.unwrap();
    let set = &page.sets[0];

    assert_eq!(set.series, "SV");
    assert_eq!(set.printed_total, 198);
    assert_eq!(set.total, 258);
    // explicit logo gets the .png suffix, missing symbol falls back to the CDN
    assert_eq!(set.images.logo, "https://assets.tcgdex.net/en/sv/sv01/logo.png");
    assert_eq!(
        set.images.symbol,
        "https://images.pokemontcg.io/sv01/symbol.png"
    );
}

#[tokio::test]
async fn get_set_converts_a_single_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets/jungle"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tcgdex_set("jungle", "Jungle", 64, 64)),
        )
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let set = client.get_set("jungle").await.unwrap();

    assert_eq!(set.id, "jungle");
    assert_eq!(set.name, "Jungle");
    assert_eq!(set.series, "JUNGLE");
    assert_eq!(set.printed_total, 64);
}

// ── get_cards_by_set ─────────────────────────────────────────────────

#[tokio::test]
async fn get_cards_by_set_attaches_set_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets/base1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "base1",
            "name": "Base Set",
            "cardCount": { "official": 102, "total": 110 },
            "cards": [
                {
                    "id": "base1-4",
                    "localId": "4",
                    "name": "Charizard ex",
                    "image": "https://assets.tcgdex.net/en/base/base1/4"
                },
                { "id": "base1-98", "localId": "98", "name": "Fire Energy" },
                { "id": "base1-45", "localId": "45", "name": "Caterpie" }
            ]
        })))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let cards = client.get_cards_by_set("base1").await.unwrap();

    assert_eq!(cards.len(), 3);
    for card in &cards {
        assert_eq!(card.set.id, "base1");
        assert_eq!(card.set.name, "Base Set");
        assert_eq!(card.set.printed_total, 102);
        assert_eq!(card.set.total, 110);
    }

    // name-based inference: mechanic suffix => ultra, energy => Energy
    assert_eq!(cards[0].rarity, "Rare Ultra");
    assert_eq!(cards[1].supertype, "Energy");
    assert_eq!(cards[2].rarity, "Common");
    assert_eq!(cards[2].supertype, "Pokémon");

    assert_eq!(
        cards[0].images.small,
        "https://assets.tcgdex.net/en/base/base1/4/low.png"
    );
    assert_eq!(
        cards[0].images.large,
        "https://assets.tcgdex.net/en/base/base1/4/high.png"
    );
    assert_eq!(cards[1].images.small, "");
}

#[tokio::test]
async fn http_error_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let err = client.get_cards_by_set("missing").await.unwrap_err();

    match err {
        OrganizerError::HttpStatus(status) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

// ── get_cards_by_artist ──────────────────────────────────────────────

#[tokio::test]
async fn artist_search_filters_to_known_sets_and_enriches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/illustrators/Ken%20Sugimori"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Ken Sugimori",
            "cards": [
                { "id": "base1-5", "localId": "5", "name": "Clefairy" },
                { "id": "pocket-set-1", "localId": "1", "name": "Pikachu" }
            ]
        })))
        .mount(&server)
        .await;

    let known = vec![known_set("base1", "Base Set", 102)];
    let client = CatalogClient::with_base_url(server.uri());
    let cards = client
        .get_cards_by_artist("Ken Sugimori", &known)
        .await
        .unwrap();

    // the unknown set's card is dropped, the known one is enriched
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, "base1-5");
    assert_eq!(cards[0].set.name, "Base Set");
    assert_eq!(cards[0].set.printed_total, 102);
    assert_eq!(cards[0].artist, "Ken Sugimori");
}

// ── search_cards_in_sets ─────────────────────────────────────────────

#[tokio::test]
async fn search_isolates_individual_set_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets/ok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ok1",
            "name": "Working Set",
            "cardCount": { "official": 10, "total": 10 },
            "cards": [
                { "id": "ok1-1", "localId": "1", "name": "Pikachu" },
                { "id": "ok1-2", "localId": "2", "name": "Raichu" }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sets/bad1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = CatalogClient::with_base_url(server.uri());
    let results = client
        .search_cards_in_sets("pika", &["bad1".to_string(), "ok1".to_string()])
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Pikachu");
}

#[tokio::test]
async fn search_requires_at_least_two_characters() {
    // No mock mounted: a query this short must not hit the network at all
    let client = CatalogClient::with_base_url("http://127.0.0.1:9");
    let results = client
        .search_cards_in_sets("p", &["base1".to_string()])
        .await
        .unwrap();
    assert!(results.is_empty());
}
