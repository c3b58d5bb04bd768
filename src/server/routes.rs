use crate::data::catalog::CatalogStore;
use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn json_ok(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\"status\": \"error\", \"message\": {}}}",
            serde_json::json!(message)
        ),
    }
}

pub fn route_request(method: &str, path: &str, body: &str, store: &CatalogStore) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    match (method, route) {
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/build") => match api::build_payload(body, store) {
            Ok(payload) => json_ok(payload),
            Err(api::BuildPayloadError::Parse(err)) => {
                error_response(400, "Bad Request", &err.to_string())
            }
            Err(api::BuildPayloadError::Decode(err)) => {
                error_response(422, "Unprocessable Entity", &err.to_string())
            }
        },
        ("GET", "/api/items") => match api::items_payload(store) {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", route) if route.starts_with("/api/items/") => {
            let id_or_name = &route["/api/items/".len()..];
            // Names may arrive percent-encoded from browsers; spaces only.
            let id_or_name = id_or_name.replace("%20", " ");
            match api::item_detail_payload(&id_or_name, store) {
                Ok(payload) => json_ok(payload),
                Err(api::ItemLookupError::NotFound) => {
                    error_response(404, "Not Found", "item not found")
                }
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("GET", "/api/rank") => match api::rank_payload(path, store) {
            Ok(payload) => json_ok(payload),
            Err(err @ api::RankPayloadError::UnknownStat(_)) => {
                error_response(400, "Bad Request", &err.to_string())
            }
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/data/version") => match api::data_version_payload(store) {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/data/refresh") => match api::refresh_payload(store) {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        _ => error_response(404, "Not Found", "no such route"),
    }
}
