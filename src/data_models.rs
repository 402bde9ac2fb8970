use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top level of the listing feed: `{ data: { cards: [...] } }`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct FeedResponse {
    #[serde(default)]
    pub data: FeedData,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct FeedData {
    #[serde(default)]
    pub cards: Vec<CardWrapper>,
}

/// One element of `data.cards`. The feed nests the interesting part twice,
/// as `card.card`; either level may be missing on banner/carousel entries.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CardWrapper {
    #[serde(default)]
    pub card: Option<CardEnvelope>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CardEnvelope {
    #[serde(default)]
    pub card: Option<Card>,
}

/// Inner card. Only `id` is inspected for every card; `gridElements` is kept
/// raw because its shape differs between card kinds.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Card {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "gridElements", default)]
    pub grid_elements: Option<Value>,
}

impl CardWrapper {
    pub fn inner(&self) -> Option<&Card> {
        self.card.as_ref().and_then(|envelope| envelope.card.as_ref())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GridElements {
    #[serde(rename = "infoWithStyle")]
    pub info_with_style: InfoWithStyle,
}

#[derive(Deserialize, Debug, Clone)]
pub struct InfoWithStyle {
    pub restaurants: Vec<RestaurantRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RestaurantRecord {
    pub info: RestaurantInfo,

    /// Everything else on the record (analytics, cta, widget ids, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RestaurantInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(rename = "avgRating", default)]
    pub avg_rating: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RestaurantRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, avg_rating: f64) -> RestaurantRecord {
        RestaurantRecord {
            info: RestaurantInfo {
                id: id.into(),
                name: name.into(),
                cuisines: Vec::new(),
                avg_rating,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn with_cuisines<I, S>(mut self, cuisines: I) -> RestaurantRecord
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.info.cuisines = cuisines.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn avg_rating(&self) -> f64 {
        self.info.avg_rating
    }

    pub fn cost_for_two(&self) -> Option<&str> {
        self.info.extra.get("costForTwo").and_then(Value::as_str)
    }

    pub fn delivery_time(&self) -> Option<u64> {
        self.info
            .extra
            .get("sla")
            .and_then(|sla| sla.get("deliveryTime"))
            .and_then(Value::as_u64)
    }
}

#[test]
fn test_restaurant_record_keeps_unknown_fields() {
    let raw = serde_json::json!({
        "info": {
            "id": "42",
            "name": "Meghana Foods",
            "cuisines": ["Biryani", "Andhra"],
            "avgRating": 4.4,
            "costForTwo": "₹500 for two",
            "sla": { "deliveryTime": 31 }
        },
        "analytics": { "context": "seo-data" }
    });

    let record: RestaurantRecord = serde_json::from_value(raw).unwrap();
    assert_eq!(record.id(), "42");
    assert_eq!(record.info.cuisines, vec!["Biryani", "Andhra"]);
    assert_eq!(record.cost_for_two(), Some("₹500 for two"));
    assert_eq!(record.delivery_time(), Some(31));
    assert!(record.extra.contains_key("analytics"));
}

#[test]
fn test_restaurant_info_defaults() {
    let raw = serde_json::json!({ "info": { "id": "7", "name": "Corner House" } });
    let record: RestaurantRecord = serde_json::from_value(raw).unwrap();
    assert!(record.info.cuisines.is_empty());
    assert_eq!(record.avg_rating(), 0.0);
    assert_eq!(record.cost_for_two(), None);
}
