use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const NOT_FOUND_BODY: &str = "not found";
pub const NOT_ACCEPTABLE_BODY: &str = "not acceptable";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct NewItem {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ItemChanges {
    pub name: Option<String>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    items: BTreeMap<u64, Item>,
}

pub type Db = Arc<RwLock<Store>>;

type NotFound = (StatusCode, &'static str);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item).put(update_item).delete(delete_item))
        .layer(middleware::from_fn(require_json_accept))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reject requests that do not declare they accept JSON.
async fn require_json_accept(request: Request, next: Next) -> Response {
    let accepts_json = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json") || v.contains("*/*"));
    if !accepts_json {
        tracing::warn!(uri = %request.uri(), "request without a JSON Accept header");
        return (StatusCode::NOT_ACCEPTABLE, NOT_ACCEPTABLE_BODY).into_response();
    }
    next.run(request).await
}

fn not_found() -> NotFound {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

async fn list_items(State(db): State<Db>) -> Json<Vec<Item>> {
    let store = db.read().await;
    Json(store.items.values().cloned().collect())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<NewItem>,
) -> (StatusCode, Json<Item>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let item = Item {
        id: store.next_id,
        name: input.name,
    };
    store.items.insert(item.id, item.clone());
    tracing::debug!(id = item.id, "item created");
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Item>, NotFound> {
    let store = db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ItemChanges>,
) -> Result<Json<Item>, NotFound> {
    let mut store = db.write().await;
    let item = store.items.get_mut(&id).ok_or_else(not_found)?;
    if let Some(name) = input.name {
        item.name = name;
    }
    Ok(Json(item.clone()))
}

/// Answers 200 with an empty body, which is not a JSON object or array.
async fn delete_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, NotFound> {
    let mut store = db.write().await;
    store.items.remove(&id).map(|_| StatusCode::OK).ok_or_else(not_found)
}
