#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use chrono::{Datelike, Duration, Utc, Weekday};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use reservation_server::{Config, DbService, ServerState, api::build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

/// In-process app backed by a private in-memory database
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DbService::in_memory().await.expect("in-memory database");
        let state = ServerState::new(Config::with_overrides(":memory:", 0), db);
        Self {
            router: build_app(state),
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, json) = self.request_with_headers(method, uri, body, &[]).await;
        (status, json)
    }

    pub async fn request_with_headers(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, http::HeaderMap, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request("DELETE", uri, None).await
    }

    /// Book a reservation and return its id
    pub async fn book(&self, date: &str, time: &str, people: i64, mobile: &str) -> i64 {
        let (status, body) = self
            .post("/reservations", reservation(date, time, json!(people), mobile))
            .await;
        assert_eq!(status, StatusCode::CREATED, "booking failed: {body}");
        body["data"]["reservation_id"].as_i64().unwrap()
    }

    /// Create a free table and return its id
    pub async fn table(&self, name: &str, capacity: i64) -> i64 {
        let (status, body) = self
            .post(
                "/tables",
                json!({ "data": { "table_name": name, "capacity": capacity } }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "table creation failed: {body}");
        body["data"]["table_id"].as_i64().unwrap()
    }
}

/// Reservation request body
pub fn reservation(date: &str, time: &str, people: Value, mobile: &str) -> Value {
    json!({
        "data": {
            "first_name": "Rick",
            "last_name": "Sanchez",
            "mobile_number": mobile,
            "reservation_date": date,
            "reservation_time": time,
            "people": people,
        }
    })
}

/// The first `weekday` at least a week from today (UTC)
pub fn upcoming(weekday: Weekday) -> String {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday() != weekday {
        date = date.succ_opt().unwrap();
    }
    date.format("%Y-%m-%d").to_string()
}
