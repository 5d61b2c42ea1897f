use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub date_created: DateTime<Utc>,
}

/// Body of both `POST /expenses` and `PUT /expenses/{id}`.
#[derive(Debug, Deserialize)]
pub struct ExpenseInput {
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

type Rejection = (StatusCode, Json<Detail>);

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    /// Oldest first.
    expenses: Vec<Expense>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", put(update_expense).delete(delete_expense))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn validate(input: &ExpenseInput) -> Result<(), Rejection> {
    let detail = if input.title.trim().is_empty() {
        "title must not be empty"
    } else if input.amount.is_sign_negative() && !input.amount.is_zero() {
        "amount must not be negative"
    } else {
        return Ok(());
    };
    tracing::debug!(detail, "rejecting expense");
    Err((
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(Detail {
            detail: detail.to_string(),
        }),
    ))
}

/// Newest first, as the backend orders by creation time descending.
async fn list_expenses(State(db): State<Db>) -> Json<Vec<Expense>> {
    let store = db.read().await;
    Json(store.expenses.iter().rev().cloned().collect())
}

async fn create_expense(
    State(db): State<Db>,
    Json(input): Json<ExpenseInput>,
) -> Result<(StatusCode, Json<Expense>), Rejection> {
    validate(&input)?;
    let mut store = db.write().await;
    store.next_id += 1;
    let expense = Expense {
        id: store.next_id,
        title: input.title,
        amount: input.amount,
        category: input.category,
        date_created: Utc::now(),
    };
    store.expenses.push(expense.clone());
    tracing::info!(id = expense.id, "expense created");
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn update_expense(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ExpenseInput>,
) -> Result<Json<Expense>, Rejection> {
    validate(&input)?;
    let mut store = db.write().await;
    let expense = store
        .expenses
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| not_found(id))?;
    expense.title = input.title;
    expense.amount = input.amount;
    expense.category = input.category;
    Ok(Json(expense.clone()))
}

async fn delete_expense(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    let before = store.expenses.len();
    store.expenses.retain(|e| e.id != id);
    if store.expenses.len() == before {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: i64) -> Rejection {
    (
        StatusCode::NOT_FOUND,
        Json(Detail {
            detail: format!("expense {id} not found"),
        }),
    )
}
