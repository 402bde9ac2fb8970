use crate::data_models::RestaurantRecord;

/// Restaurants whose name contains `term`, ignoring case. An empty term keeps
/// everything. Order follows `restaurants`.
pub fn search(restaurants: &[RestaurantRecord], term: &str) -> Vec<RestaurantRecord> {
    let needle = term.to_lowercase();
    restaurants
        .iter()
        .filter(|r| r.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Restaurants rated strictly above `threshold`.
pub fn top_rated(restaurants: &[RestaurantRecord], threshold: f64) -> Vec<RestaurantRecord> {
    restaurants
        .iter()
        .filter(|r| r.avg_rating() > threshold)
        .cloned()
        .collect()
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let list = vec![
        RestaurantRecord::new("1", "Pizza Hut", 4.2),
        RestaurantRecord::new("2", "Burger King", 3.8),
        RestaurantRecord::new("3", "La Pino'z Pizza", 4.0),
    ];

    let ids = |v: Vec<RestaurantRecord>| v.into_iter().map(|r| r.info.id).collect::<Vec<_>>();

    assert_eq!(ids(search(&list, "pizza")), vec!["1", "3"]);
    assert_eq!(ids(search(&list, "PIZZA")), vec!["1", "3"]);
    assert_eq!(ids(search(&list, "urge")), vec!["2"]);
    assert_eq!(ids(search(&list, "")), vec!["1", "2", "3"]);
    assert!(search(&list, "sushi").is_empty());
}

#[test]
fn test_top_rated_is_strict() {
    let list = vec![
        RestaurantRecord::new("1", "Pizza Hut", 4.2),
        RestaurantRecord::new("2", "Burger King", 3.8),
        RestaurantRecord::new("3", "La Pino'z Pizza", 4.0),
    ];

    let got = top_rated(&list, 4.0);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id(), "1");
    assert_eq!(top_rated(&got, 4.0), got);
}
