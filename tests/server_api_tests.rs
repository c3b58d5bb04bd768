use gearforge::data::catalog::{Catalog, CatalogStore};
use gearforge::data::item::Item;
use gearforge::server::routes::route_request;

fn test_store() -> CatalogStore {
    let raw = r#"[
        {"id": "AAA", "name": "None", "mainType": "Accessory"},
        {"id": "AAB", "name": "None", "mainType": "Chestplate"},
        {"id": "AAC", "name": "None", "mainType": "Boots"},
        {"id": "AAD", "name": "None", "mainType": "Enchant"},
        {"id": "AAE", "name": "None", "mainType": "Modifier"},
        {"id": "AAF", "name": "None", "mainType": "Gem"},
        {"id": "X1", "name": "Test Amulet", "mainType": "Accessory", "rarity": "Rare",
         "statsPerLevel": [
            {"level": 130, "power": 20, "defense": 84},
            {"level": 140, "power": 23, "defense": 91}
         ]},
        {"id": "X2", "name": "Lesser Amulet", "mainType": "Accessory", "rarity": "Common",
         "statsPerLevel": [
            {"level": 140, "power": 11, "defense": 40}
         ]}
    ]"#;
    let items: Vec<Item> = serde_json::from_str(raw).expect("test items should deserialize");
    CatalogStore::new(Catalog::from_items(items))
}

fn valid_code() -> String {
    [
        "100,20,20,20,20",
        "0,19",
        "5",
        "X1,AAD,AAE,140",
        "AAA,AAD,AAE,140",
        "AAA,AAD,AAE,140",
        "AAB,AAD,AAE,140",
        "AAC,AAD,AAE,140",
    ]
    .join("|")
}

#[test]
fn health_endpoint_returns_ok_json() {
    let store = test_store();
    let response = route_request("GET", "/api/health", "", &store);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
}

#[test]
fn build_endpoint_decodes_and_aggregates() {
    let store = test_store();
    let body = serde_json::json!({ "code": valid_code() }).to_string();
    let response = route_request("POST", "/api/build", &body, &store);

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");

    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["level"], 100);
    assert_eq!(payload["magics"], serde_json::json!(["Acid", "Wood"]));
    assert_eq!(payload["stats"]["power"], 23);
    assert_eq!(payload["stats"]["defense"], 91);

    let slots = payload["slots"].as_array().expect("slots should be an array");
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[0]["item_name"], "Test Amulet");
    assert_eq!(slots[3]["position"], "chestplate");

    let stats_text = payload["stats_text"].as_str().expect("stats_text should be a string");
    assert!(stats_text.contains("Power 23"));
    assert!(stats_text.contains("Defense 91"));
}

#[test]
fn build_endpoint_reports_decode_errors_with_422() {
    let store = test_store();
    let body = serde_json::json!({ "code": "abc|1|2" }).to_string();
    let response = route_request("POST", "/api/build", &body, &store);

    assert_eq!(response.status_code, 422);
    assert!(response.body.contains("expected 8 sections"));
}

#[test]
fn build_endpoint_rejects_malformed_json_with_400() {
    let store = test_store();
    let response = route_request("POST", "/api/build", "not json", &store);
    assert_eq!(response.status_code, 400);
}

#[test]
fn items_endpoint_lists_the_catalog() {
    let store = test_store();
    let response = route_request("GET", "/api/items", "", &store);

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let items = payload["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 8);
}

#[test]
fn item_detail_resolves_by_id_and_by_name() {
    let store = test_store();

    let by_id = route_request("GET", "/api/items/X1", "", &store);
    assert_eq!(by_id.status_code, 200);
    assert!(by_id.body.contains("Test Amulet"));

    let by_name = route_request("GET", "/api/items/test%20amulet", "", &store);
    assert_eq!(by_name.status_code, 200);
    assert!(by_name.body.contains("\"id\": \"X1\""));

    let missing = route_request("GET", "/api/items/nope", "", &store);
    assert_eq!(missing.status_code, 404);
}

#[test]
fn rank_endpoint_sorts_descending() {
    let store = test_store();
    let response = route_request("GET", "/api/rank?stat=power", "", &store);

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["stat"], "Power");

    let items = payload["items"].as_array().expect("items should be an array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "Test Amulet");
    assert_eq!(items[0]["value"], 23);
    assert_eq!(items[1]["value"], 11);
}

#[test]
fn rank_endpoint_rejects_unknown_stats() {
    let store = test_store();
    let response = route_request("GET", "/api/rank?stat=luck", "", &store);
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("unknown stat"));
}

#[test]
fn data_version_reports_item_count() {
    let store = test_store();
    let response = route_request("GET", "/api/data/version", "", &store);

    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["item_count"], 8);
    assert!(payload["loaded_at"].as_str().is_some());
}

#[test]
fn unknown_routes_return_404() {
    let store = test_store();
    let response = route_request("GET", "/api/nothing", "", &store);
    assert_eq!(response.status_code, 404);
}
