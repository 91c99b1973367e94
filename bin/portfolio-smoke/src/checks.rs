//! The individual smoke checks and their bookkeeping.

use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};

/// Tally of a finished run.
#[derive(Debug, Default)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failures: Vec<String>,
}

impl Summary {
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 * 100.0 / self.total as f64
        }
    }

    fn record(&mut self, name: &str, outcome: Result<(), String>) {
        self.total += 1;
        match outcome {
            Ok(()) => {
                self.passed += 1;
                println!("✅ {name}");
            }
            Err(reason) => {
                println!("❌ {name}: {reason}");
                self.failures.push(format!("{name}: {reason}"));
            }
        }
    }
}

pub struct Runner {
    client: Client,
    base_url: String,
    summary: Summary,
}

impl Runner {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            summary: Summary::default(),
        })
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Send `request`, require `expected`, and hand back the JSON body.
    async fn call(request: RequestBuilder, expected: StatusCode) -> Result<Value, String> {
        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let text = response.text().await.map_err(|e| e.to_string())?;
        if status != expected {
            return Err(format!("expected {expected}, got {status}: {}", truncate(&text)));
        }
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| format!("response is not JSON: {e}"))
    }

    async fn check<F>(&mut self, name: &str, request: RequestBuilder, expected: StatusCode, verify: F)
    where
        F: FnOnce(&Value) -> Result<(), String>,
    {
        let outcome = match Self::call(request, expected).await {
            Ok(body) => verify(&body),
            Err(e) => Err(e),
        };
        self.summary.record(name, outcome);
    }

    pub async fn run_all(&mut self) {
        let root = self.client.get(self.url("api/"));
        self.check("API root", root, StatusCode::OK, |body| {
            require(body["message"].is_string(), "missing `message`")
        })
        .await;

        let contact = self.client.post(self.url("api/contact")).json(&json!({
            "name": "Test User",
            "email": "test@example.com",
            "phone": "+91 98765 43210",
            "service": "Bridal Makeup",
            "message": "This is a test message for portfolio contact form.",
        }));
        self.check("Contact form submission", contact, StatusCode::OK, |body| {
            require(has_id(body), "missing generated `id`")?;
            require(body["service"] == "Bridal Makeup", "service not echoed")
        })
        .await;

        let contacts = self.client.get(self.url("api/contact"));
        self.check("Get contact submissions", contacts, StatusCode::OK, |body| {
            require(body.is_array(), "expected an array")
        })
        .await;

        let portfolio = self.client.post(self.url("api/portfolio")).json(&json!({
            "title": "Test Portfolio Item",
            "category": "bridal",
            "image_url": "https://example.com/test-image.jpg",
            "description": "Test portfolio item description",
        }));
        self.check("Create portfolio item", portfolio, StatusCode::OK, |body| {
            require(has_id(body), "missing generated `id`")
        })
        .await;

        let all = self.client.get(self.url("api/portfolio"));
        self.check("Get all portfolio items", all, StatusCode::OK, |body| {
            require(body.is_array(), "expected an array")
        })
        .await;

        let bridal = self.client.get(self.url("api/portfolio?category=bridal"));
        self.check("Get portfolio items by category", bridal, StatusCode::OK, |body| {
            all_in_category(body, "bridal")
        })
        .await;

        let invalid = self.client.post(self.url("api/contact")).json(&json!({
            "name": "",
            "email": "invalid-email",
            "service": "Bridal Makeup",
            "message": "Test message",
        }));
        self.check(
            "Invalid contact submission",
            invalid,
            StatusCode::UNPROCESSABLE_ENTITY,
            |_| Ok(()),
        )
        .await;
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn require(condition: bool, reason: &str) -> Result<(), String> {
    if condition { Ok(()) } else { Err(reason.to_owned()) }
}

fn has_id(body: &Value) -> bool {
    body["id"].as_str().is_some_and(|id| !id.is_empty())
}

fn all_in_category(body: &Value, category: &str) -> Result<(), String> {
    let items = body.as_array().ok_or("expected an array")?;
    require(!items.is_empty(), "no items returned for the category")?;
    match items.iter().find(|item| item["category"] != category) {
        Some(item) => Err(format!("item outside category: {item}")),
        None => Ok(()),
    }
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
