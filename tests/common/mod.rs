#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use realty_console::config::ClientConfig;
use realty_console::http::HttpClient;
use realty_console::notify::NotificationCenter;
use realty_console::session::{Identity, MemoryNavigator, SessionStore};
use serde_json::{json, Value};
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Client wired to a mock server, with observable notifications,
/// navigation and session.
pub struct Harness {
    pub client: HttpClient,
    pub session: SessionStore,
    pub notifications: NotificationCenter,
    pub navigator: Arc<MemoryNavigator>,
}

pub fn harness(server: &MockServer) -> Harness {
    harness_from(ClientConfig::builder().base_url(server.uri()).build())
}

/// Like [`harness`], with a shorter default timeout.
pub fn harness_with_timeout(server: &MockServer, timeout: Duration) -> Harness {
    harness_from(
        ClientConfig::builder()
            .base_url(server.uri())
            .timeout(timeout)
            .build(),
    )
}

pub fn harness_from(config: ClientConfig) -> Harness {
    let session = SessionStore::new();
    let notifications = NotificationCenter::new();
    let navigator = Arc::new(MemoryNavigator::new("/admin/owners"));
    let client = HttpClient::new(config, session.clone())
        .expect("client")
        .with_notifier(Arc::new(notifications.clone()))
        .with_navigator(navigator.clone());
    Harness {
        client,
        session,
        notifications,
        navigator,
    }
}

pub fn admin() -> Identity {
    Identity {
        id: "1".into(),
        name: "Admin User".into(),
        email: ADMIN_EMAIL.into(),
    }
}

#[derive(Debug, Default)]
struct BackendState {
    owners: Vec<Value>,
    properties: Vec<Value>,
    users: Vec<Value>,
}

/// In-memory stand-in for the console backend.
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    /// Two owners, two properties (both owned by owner `1`), two users.
    pub fn seeded() -> Self {
        let state = BackendState {
            owners: vec![
                json!({
                    "id": "1", "name": "John Doe", "email": "john@example.com",
                    "address": "123 Main St", "phone": "555-0123", "birthday": "1980-01-01"
                }),
                json!({
                    "id": "2", "name": "Jane Smith", "email": "jane@example.com",
                    "address": "456 Oak Ave", "phone": "555-0456", "birthday": "1985-05-15"
                }),
            ],
            properties: vec![
                json!({
                    "id": "1", "name": "Beautiful House", "address": "123 Property St",
                    "price": 250000, "image": "house1.jpg", "ownerName": "John Doe", "idOwner": "1"
                }),
                json!({
                    "id": "2", "name": "Modern Apartment", "address": "456 Apartment Blvd",
                    "price": 180000, "image": "apt1.jpg", "ownerName": "John Doe", "idOwner": "1"
                }),
            ],
            users: vec![
                json!({
                    "id": "1", "name": "Admin User", "address": "789 Admin St",
                    "email": "admin@example.com", "phone": "555-0789", "birthday": "1975-03-20"
                }),
                json!({
                    "id": "2", "name": "Regular User", "address": "321 User Ave",
                    "email": "user@example.com", "phone": "555-0321", "birthday": "1990-07-10"
                }),
            ],
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Start a mock server answering every `/api/` route from this backend.
    pub async fn start(&self) -> MockServer {
        let server = MockServer::start().await;
        self.mount(&server).await;
        server
    }

    pub async fn mount(&self, server: &MockServer) {
        Mock::given(path_regex("^/api/"))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }

    /// Add `count` extra properties owned by John Doe.
    pub fn add_properties(&self, count: usize) {
        let mut state = self.state.lock().expect("backend lock poisoned");
        for _ in 0..count {
            let id = (state.properties.len() + 1).to_string();
            state.properties.push(json!({
                "id": id, "name": format!("Listing {id}"), "address": format!("{id} Filler Rd"),
                "price": 100000, "ownerName": "John Doe", "idOwner": "1"
            }));
        }
    }

    pub fn owner_count(&self) -> usize {
        self.state.lock().expect("backend lock poisoned").owners.len()
    }

    fn route(&self, method: &str, segments: &[&str], request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock().expect("backend lock poisoned");
        match (method, segments) {
            ("POST", ["auth", "login"]) => login(request),
            ("POST", ["auth", "logout"]) | ("POST", ["auth", "refresh"]) => {
                ResponseTemplate::new(200).set_body_json(json!({}))
            }

            ("GET", ["Owners"]) => ResponseTemplate::new(200).set_body_json(&state.owners),
            ("POST", ["Owners"]) => {
                let mut owner = body(request);
                let id = (state.owners.len() + 1).to_string();
                let email = owner["name"]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .replacen(' ', ".", 1);
                owner["id"] = json!(id);
                owner["email"] = json!(format!("{email}@example.com"));
                state.owners.push(owner.clone());
                ResponseTemplate::new(201).set_body_json(owner)
            }
            ("PUT", ["Owners", id]) => update(&mut state.owners, id, body(request), "Owner"),
            ("DELETE", ["Owners", id]) => {
                let Some(index) = position(&state.owners, id) else {
                    return not_found("Owner");
                };
                if state.properties.iter().any(|p| p["idOwner"] == *id) {
                    return ResponseTemplate::new(400).set_body_json(json!({
                        "code": "Owner.HasAssociatedProperties",
                        "message": "Cannot delete owner with associated properties"
                    }));
                }
                state.owners.remove(index);
                ResponseTemplate::new(204)
            }

            ("GET", ["Properties"]) => {
                let name = query(request, "Name");
                let min = query(request, "MinPrice").and_then(|v| v.parse::<f64>().ok());
                let matches: Vec<Value> = state
                    .properties
                    .iter()
                    .filter(|p| contains(&p["name"], name.as_deref()))
                    .filter(|p| min.map_or(true, |min| p["price"].as_f64().unwrap_or(0.0) >= min))
                    .cloned()
                    .collect();
                paged(request, matches)
            }
            ("POST", ["Properties"]) => {
                let mut property = body(request);
                property["id"] = json!((state.properties.len() + 1).to_string());
                let owner_name = state
                    .owners
                    .iter()
                    .find(|o| o["id"] == property["idOwner"])
                    .and_then(|o| o["name"].as_str())
                    .unwrap_or("Unknown")
                    .to_string();
                property["ownerName"] = json!(owner_name);
                state.properties.push(property.clone());
                ResponseTemplate::new(201).set_body_json(property)
            }
            ("PUT", ["Properties", id]) => {
                update(&mut state.properties, id, body(request), "Property")
            }
            ("DELETE", ["Properties", id]) => remove(&mut state.properties, id, "Property"),

            ("GET", ["User"]) => {
                let name = query(request, "Name");
                let email = query(request, "Email");
                let matches: Vec<Value> = state
                    .users
                    .iter()
                    .filter(|u| contains(&u["name"], name.as_deref()))
                    .filter(|u| contains(&u["email"], email.as_deref()))
                    .cloned()
                    .collect();
                paged(request, matches)
            }
            ("POST", ["User"]) => {
                let mut user = body(request);
                if let Some(map) = user.as_object_mut() {
                    map.remove("password");
                }
                user["id"] = json!((state.users.len() + 1).to_string());
                state.users.push(user.clone());
                ResponseTemplate::new(201).set_body_json(user)
            }
            ("PUT", ["User", id]) => update(&mut state.users, id, body(request), "User"),
            ("DELETE", ["User", id]) => remove(&mut state.users, id, "User"),

            _ => ResponseTemplate::new(404).set_body_json(json!({ "message": "No route" })),
        }
    }
}

impl Respond for MockBackend {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path().trim_start_matches("/api/").to_string();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.route(request.method.as_str(), &segments, request)
    }
}

fn login(request: &Request) -> ResponseTemplate {
    let credentials = body(request);
    if credentials["email"] == ADMIN_EMAIL && credentials["password"] == ADMIN_PASSWORD {
        ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "1", "name": "Admin User", "email": ADMIN_EMAIL }
        }))
    } else {
        ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" }))
    }
}

fn body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap_or(Value::Null)
}

fn query(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn contains(field: &Value, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => field
            .as_str()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&needle.to_lowercase()),
    }
}

fn position(records: &[Value], id: &str) -> Option<usize> {
    records.iter().position(|r| r["id"] == id)
}

fn not_found(kind: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({ "message": format!("{kind} not found") }))
}

fn update(records: &mut [Value], id: &str, patch: Value, kind: &str) -> ResponseTemplate {
    let Some(index) = position(records, id) else {
        return not_found(kind);
    };
    if let (Some(record), Some(patch)) = (records[index].as_object_mut(), patch.as_object()) {
        for (key, value) in patch {
            record.insert(key.clone(), value.clone());
        }
    }
    ResponseTemplate::new(200).set_body_json(&records[index])
}

fn remove(records: &mut Vec<Value>, id: &str, kind: &str) -> ResponseTemplate {
    let Some(index) = position(records, id) else {
        return not_found(kind);
    };
    records.remove(index);
    ResponseTemplate::new(204)
}

fn paged(request: &Request, matches: Vec<Value>) -> ResponseTemplate {
    let page = query(request, "Page")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1);
    let page_size = query(request, "PageSize")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(10);
    let start = (page - 1) * page_size;
    let end = start + page_size;
    let data: Vec<Value> = matches.iter().skip(start).take(page_size).cloned().collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "data": data,
        "totalCount": matches.len(),
        "page": page,
        "pageSize": page_size,
        "totalPages": matches.len().div_ceil(page_size),
        "hasNextPage": end < matches.len(),
        "hasPreviousPage": page > 1
    }))
}
