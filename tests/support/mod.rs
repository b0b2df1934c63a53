//! Shared test helpers: a recording mock transport and an in-memory
//! marketplace backend

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use geodata_marketplace_client::models::{
    Account, Cart, CartAddItemCommand, CartItem, CatalogueAddItemCommand, CatalogueItem,
    CatalogueItemStatistics, CatalogueQuery, Configuration, EnumLevel, Publisher, ServerMessage,
    ServerResponse,
};
use geodata_marketplace_client::{
    ApiError, ClientConfig, HttpMethod, MarketplaceClient, RequestBody, RequestDescriptor,
    Transport, TransportResponse,
};

pub const BASE_URL: &str = "http://localhost:8080";
pub const TAX_PERCENT: u32 = 24;

type Responder = dyn Fn(&RequestDescriptor) -> Result<TransportResponse, ApiError> + Send + Sync;

/// Transport that records every request and answers with a fixed responder
pub struct MockTransport {
    requests: Mutex<Vec<RequestDescriptor>>,
    responder: Box<Responder>,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&RequestDescriptor) -> Result<TransportResponse, ApiError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Always answer with the given status and JSON body
    pub fn json(status: u16, body: Value) -> Arc<Self> {
        Self::new(move |_| Ok(TransportResponse::new(status, body.to_string())))
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RequestDescriptor> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: RequestDescriptor) -> Result<TransportResponse, ApiError> {
        let response = (self.responder)(&request);
        self.requests.lock().push(request);
        response
    }
}

pub fn envelope(result: Value) -> Value {
    json!({"messages": [], "result": result, "success": true})
}

pub fn client_with(transport: Arc<dyn Transport>) -> MarketplaceClient {
    MarketplaceClient::with_transport(ClientConfig::default().with_base_url(BASE_URL), transport)
        .unwrap()
}

pub fn account_json(username: &str, roles: &[&str]) -> Value {
    json!({
        "email": username,
        "locale": "en",
        "emailVerified": true,
        "username": username,
        "roles": roles,
        "profile": {
            "firstName": "Ada",
            "lastName": "Lovelace",
            "addresses": []
        }
    })
}

#[derive(Default)]
struct MarketplaceState {
    users: HashMap<String, (String, Account)>,
    session: Option<String>,
    csrf_counter: u32,
    items: Vec<CatalogueItem>,
    publishers: HashMap<Uuid, Publisher>,
    cart_items: Vec<CartItem>,
    configuration: Configuration,
}

/// In-memory marketplace server speaking the action API
pub struct FakeMarketplace {
    state: Mutex<MarketplaceState>,
    requests: Mutex<Vec<RequestDescriptor>>,
    publisher_id: Uuid,
}

fn ok<T: Serialize>(result: T) -> TransportResponse {
    respond(200, &ServerResponse::ok(result))
}

fn fail(code: &str) -> TransportResponse {
    let response: ServerResponse<()> = ServerResponse::failure(vec![ServerMessage {
        code: code.to_string(),
        level: EnumLevel::Error,
        description: None,
    }]);
    respond(200, &response)
}

fn respond<T: Serialize>(status: u16, body: &T) -> TransportResponse {
    TransportResponse::new(status, serde_json::to_string(body).unwrap())
}

fn json_body<T: serde::de::DeserializeOwned>(request: &RequestDescriptor) -> Option<T> {
    match &request.body {
        RequestBody::Json(value) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

fn form_field<'a>(request: &'a RequestDescriptor, name: &str) -> Option<&'a str> {
    match &request.body {
        RequestBody::Form(fields) => fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str()),
        _ => None,
    }
}

impl FakeMarketplace {
    pub fn new() -> Arc<Self> {
        let publisher_id = Uuid::new_v4();
        let mut state = MarketplaceState::default();
        state.publishers.insert(
            publisher_id,
            serde_json::from_value(json!({"id": publisher_id, "name": "Acme Geo", "city": "Athens"}))
                .unwrap(),
        );
        state.configuration = serde_json::from_value(json!({
            "authProviders": ["Forms", "Google"],
            "asset": {"fileTypes": [
                {"category": "VECTOR", "format": "GeoJSON", "extensions": ["json", "geojson"], "notes": null}
            ]}
        }))
        .unwrap();

        Arc::new(Self {
            state: Mutex::new(state),
            requests: Mutex::new(Vec::new()),
            publisher_id,
        })
    }

    pub fn publisher_id(&self) -> Uuid {
        self.publisher_id
    }

    pub fn add_user(&self, username: &str, password: &str, roles: &[&str]) {
        let account: Account = serde_json::from_value(account_json(username, roles)).unwrap();
        self.state
            .lock()
            .users
            .insert(username.to_string(), (password.to_string(), account));
    }

    /// Store an item directly, bypassing the API
    pub fn insert_item(&self, command: CatalogueAddItemCommand, publisher_id: Uuid) -> CatalogueItem {
        let item = CatalogueItem {
            id: Uuid::new_v4(),
            metadata: command.metadata,
            pricing_models: command
                .pricing_models
                .iter()
                .map(|m| m.quote(Uuid::new_v4(), TAX_PERCENT))
                .collect(),
            publisher: None,
            publisher_id,
            statistics: CatalogueItemStatistics::default(),
        };
        self.state.lock().items.push(item.clone());
        item
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().clone()
    }

    fn next_csrf(state: &mut MarketplaceState) -> Value {
        state.csrf_counter += 1;
        json!({"csrfHeader": "X-CSRF-TOKEN", "csrfToken": format!("csrf-{}", state.csrf_counter)})
    }

    fn cart(state: &MarketplaceState) -> Cart {
        let items = state.cart_items.clone();
        let sum = |f: fn(&CartItem) -> f64| items.iter().map(f).sum::<f64>();
        Cart {
            total_price: sum(|i| i.pricing_model.totals().total_price),
            total_price_excluding_tax: sum(|i| i.pricing_model.totals().total_price_excluding_tax),
            tax_total: sum(|i| i.pricing_model.totals().tax),
            currency: "EUR".to_string(),
            total_items: items.len() as u32,
            applied_coupons: Vec::new(),
            created_at: None,
            modified_at: None,
            items,
        }
    }

    fn search(state: &MarketplaceState, query: &CatalogueQuery) -> TransportResponse {
        let needle = query.query.to_lowercase();
        let matching: Vec<&CatalogueItem> = state
            .items
            .iter()
            .filter(|item| {
                item.metadata
                    .title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&needle))
            })
            .collect();
        let page: Vec<&CatalogueItem> = matching
            .iter()
            .skip((query.page * query.size) as usize)
            .take(query.size as usize)
            .copied()
            .collect();
        let publishers: HashMap<String, &Publisher> = page
            .iter()
            .filter_map(|item| {
                state
                    .publishers
                    .get(&item.publisher_id)
                    .map(|p| (p.id.to_string(), p))
            })
            .collect();

        let body = json!({
            "messages": [],
            "success": true,
            "result": {
                "pageRequest": {"page": query.page, "size": query.size},
                "count": matching.len(),
                "items": page
            },
            "publishers": publishers
        });
        TransportResponse::new(200, body.to_string())
    }

    fn handle(&self, request: &RequestDescriptor) -> TransportResponse {
        let path = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        let mut state = self.state.lock();

        match (request.method, segments.as_slice()) {
            (HttpMethod::Post, ["login"]) => {
                let username = form_field(request, "username").unwrap_or_default();
                let password = form_field(request, "password").unwrap_or_default();
                let valid = matches!(
                    state.users.get(username),
                    Some((expected, _)) if expected == password
                );
                if !valid {
                    return TransportResponse::new(401, "");
                }
                state.session = Some(username.to_string());
                let token = Self::next_csrf(&mut state);
                ok(token)
            }
            (HttpMethod::Post, ["logout"]) => {
                state.session = None;
                let token = Self::next_csrf(&mut state);
                ok(token)
            }
            (HttpMethod::Get, ["action", "account", "user-data"]) => {
                let account = state
                    .session
                    .as_ref()
                    .and_then(|user| state.users.get(user))
                    .map(|(_, account)| account.clone());
                match account {
                    Some(account) => ok(account),
                    None => TransportResponse::new(401, ""),
                }
            }
            (HttpMethod::Get, ["action", "configuration", _locale]) => {
                ok(state.configuration.clone())
            }
            (HttpMethod::Post, ["action", "catalogue"]) => {
                match json_body::<CatalogueQuery>(request) {
                    Some(query) => Self::search(&state, &query),
                    None => TransportResponse::new(400, ""),
                }
            }
            (HttpMethod::Post, ["action", "catalogue", "items"]) => {
                match json_body::<CatalogueAddItemCommand>(request) {
                    Some(command) => {
                        drop(state);
                        self.insert_item(command, self.publisher_id);
                        ok(())
                    }
                    None => TransportResponse::new(400, ""),
                }
            }
            (HttpMethod::Get, ["action", "catalogue", "items", id]) => {
                let id = Uuid::parse_str(id).ok();
                match state.items.iter().find(|i| Some(i.id) == id) {
                    Some(item) => ok(item.clone()),
                    None => fail("CatalogueServiceMessageCode.ITEM_NOT_FOUND"),
                }
            }
            (HttpMethod::Get, ["action", "cart"]) => ok(Self::cart(&state)),
            (HttpMethod::Post, ["action", "cart"]) => {
                let Some(command) = json_body::<CartAddItemCommand>(request) else {
                    return TransportResponse::new(400, "");
                };
                let found = state
                    .items
                    .iter()
                    .find(|i| i.id == command.product_id)
                    .and_then(|item| {
                        item.pricing_model(command.pricing_model_id)
                            .map(|model| (item.clone(), model.clone()))
                    });
                match found {
                    Some((product, pricing_model)) => {
                        state.cart_items.push(CartItem {
                            id: Uuid::new_v4(),
                            product,
                            added_at: None,
                            pricing_model,
                        });
                        ok(Self::cart(&state))
                    }
                    None => fail("CartMessageCode.ASSET_NOT_FOUND"),
                }
            }
            (HttpMethod::Delete, ["action", "cart"]) => {
                state.cart_items.clear();
                ok(Self::cart(&state))
            }
            (HttpMethod::Delete, ["action", "cart", id]) => {
                let id = Uuid::parse_str(id).ok();
                state.cart_items.retain(|i| Some(i.id) != id);
                ok(Self::cart(&state))
            }
            (HttpMethod::Get, ["action", "rating", "asset", _id]) => ok(json!([
                {"value": 4, "comment": "Accurate"},
                {"value": 5}
            ])),
            _ => TransportResponse::new(404, ""),
        }
    }
}

#[async_trait]
impl Transport for FakeMarketplace {
    async fn execute(&self, request: RequestDescriptor) -> Result<TransportResponse, ApiError> {
        let response = self.handle(&request);
        self.requests.lock().push(request);
        Ok(response)
    }
}
