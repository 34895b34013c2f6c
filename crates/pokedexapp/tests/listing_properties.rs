//! End-to-end behavior of the listing and creation contracts through the API
//! facade, over a store shared between threads.

use pokedexapp::api::PokedexApi;
use pokedexapp::model::{CreateOutcome, NewRecord};
use pokedexapp::query::build;
use pokedexapp::store::memory::InMemoryStore;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn seeded_api() -> PokedexApi<InMemoryStore> {
    let api = PokedexApi::new(InMemoryStore::new());
    let seed: &[(&str, &[&str])] = &[
        ("Bulbasaur", &["grass", "poison"]),
        ("Charmander", &["fire"]),
        ("Squirtle", &["water"]),
        ("Caterpie", &["bug"]),
        ("Pidgey", &["normal", "flying"]),
        ("Vulpix", &["fire"]),
        ("Psyduck", &["water"]),
        ("Growlithe", &["fire"]),
        ("Poliwag", &["water"]),
        ("Charizard", &["fire", "flying"]),
        ("Lapras", &["water", "ice"]),
    ];
    for (name, types) in seed {
        api.create_record(NewRecord::new(
            *name,
            types.iter().map(|t| t.to_string()).collect(),
            format!("https://sprites.test/{}.png", name.to_lowercase()),
        ))
        .unwrap()
        .unwrap();
    }
    api
}

#[test]
fn test_past_end_pages_are_empty() {
    let api = seeded_api();
    for page_size in 1..=12 {
        let total = 11;
        let first_empty = (total + page_size - 1) / page_size + 1;
        for page in first_empty..first_empty + 3 {
            let response = api
                .list_page(Some(page as i64), Some(page_size as i64), None)
                .unwrap();
            assert!(response.records.is_empty());
            assert_eq!(response.total, total);
        }
    }
}

#[test]
fn test_filtered_records_intersect_filter() {
    let api = seeded_api();
    for query in ["fire", "water", "fire,water", "flying, ice", "ghost"] {
        let filter = build(Some(query));
        let response = api.list_page(Some(1), Some(100), Some(query)).unwrap();
        assert_eq!(response.records.len(), response.total);
        for record in &response.records {
            assert!(
                record.tags.iter().any(|t| filter.required_tags().contains(t)),
                "{} does not match {}",
                record.name,
                query
            );
        }
    }
}

#[test]
fn test_fire_water_is_superset_of_fire() {
    let api = seeded_api();
    let fire = api.list_page(Some(1), Some(100), Some("fire")).unwrap();
    let fire_water = api.list_page(Some(1), Some(100), Some("fire,water")).unwrap();

    let fire_ids: HashSet<u64> = fire.records.iter().map(|r| r.id).collect();
    let wide_ids: HashSet<u64> = fire_water.records.iter().map(|r| r.id).collect();
    assert!(fire_ids.is_subset(&wide_ids));
    assert_eq!(fire.total, 4);
    assert_eq!(fire_water.total, 8);
}

#[test]
fn test_pagination_covers_matches_once() {
    let api = seeded_api();
    let mut seen = Vec::new();
    let mut page = 1;
    loop {
        let response = api.list_page(Some(page), Some(3), Some("water,fire")).unwrap();
        if response.records.is_empty() {
            break;
        }
        seen.extend(response.records.into_iter().map(|r| r.name));
        page += 1;
    }
    assert_eq!(
        seen,
        vec![
            "Charmander",
            "Squirtle",
            "Vulpix",
            "Psyduck",
            "Growlithe",
            "Poliwag",
            "Charizard",
            "Lapras"
        ]
    );
}

#[test]
fn test_creation_contract() {
    let api = seeded_api();
    let before = api.list_page(Some(1), Some(5), None).unwrap().total;

    let outcome: CreateOutcome = api
        .create_record(NewRecord::new("Pikachu", vec!["electric".into()], "https://x/y.png"))
        .into();
    let record = match outcome {
        CreateOutcome::Created(record) => record,
        other => panic!("expected creation, got {:?}", other),
    };
    assert_eq!(record.id, before as u64 + 1);
    assert_eq!(api.list_page(Some(1), Some(5), None).unwrap().total, before + 1);

    let rejected: CreateOutcome = api
        .create_record(NewRecord::new(" ", vec![], "ftp://a"))
        .into();
    match rejected {
        CreateOutcome::Invalid(violations) => assert_eq!(violations.len(), 3),
        other => panic!("expected violations, got {:?}", other),
    }
}

#[test]
fn test_concurrent_creations_get_distinct_ids() {
    let api = Arc::new(PokedexApi::new(InMemoryStore::new()));
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let api = Arc::clone(&api);
            thread::spawn(move || {
                (0..25)
                    .map(|i| {
                        api.create_record(NewRecord::new(
                            format!("w{}-{}", worker, i),
                            vec!["normal".into()],
                            "https://n",
                        ))
                        .unwrap()
                        .unwrap()
                        .id
                    })
                    .collect::<Vec<u64>>()
            })
        })
        .collect();

    let ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(ids.len(), 200);
    assert_eq!(unique.len(), 200);
    assert_eq!(unique.iter().max(), Some(&200));
}
