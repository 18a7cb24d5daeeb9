// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper.

use async_trait::async_trait;
use burgerbox::catalog::Category;
use burgerbox::{KeyValueStore, MemoryStore, PriceTable, Product, ProductPayload};
use burgerbox_storefront::models::payment::{VerifyPaymentRequest, VerifyPaymentResponse};
use burgerbox_storefront::models::{
  LoginRequest, Order, OrderStatus, PaymentOrder, PaymentOrderRequest, RegisterRequest, UserRecord, UserSession,
  WidgetRequest,
};
use burgerbox_storefront::services::{
  AuthApi, CatalogApi, CheckoutWidget, OrderApi, PaymentApi, UserAdminApi, WidgetOutcome,
};
use burgerbox_storefront::{AppConfig, AppError, AppState, Result};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Level;

// --- Fixtures ---

pub fn classic() -> Product {
  Product {
    id: "b1".to_string(),
    name: "Classic".to_string(),
    description: "Grilled veg patty".to_string(),
    category: Category::Veg,
    variants: vec!["small".to_string(), "large".to_string()],
    prices: [("small", 100), ("large", 250)].into_iter().collect::<PriceTable>(),
    image: "https://img.test/b1.png".to_string(),
  }
}

pub fn session(is_admin: bool) -> UserSession {
  UserSession {
    id: "u1".to_string(),
    name: "asha".to_string(),
    email: "asha@example.com".to_string(),
    is_admin,
    token: "t0k".to_string(),
  }
}

pub fn order(id: &str, status: OrderStatus) -> Order {
  Order {
    id: id.to_string(),
    gateway_order_id: format!("order_{}", id),
    name: "asha".to_string(),
    email: "asha@example.com".to_string(),
    phone: "9876543210".to_string(),
    shipping_address: "12 Long Street, Pune".to_string(),
    order_items: Vec::new(),
    amount: 250,
    order_status: status,
    created_at: None,
    updated_at: None,
  }
}

fn api_error(status: u16, message: &str) -> AppError {
  AppError::Api {
    status: Some(status),
    message: message.to_string(),
  }
}

// --- Fake API ---

/// In-memory stand-in for the REST API. Records every call by name.
pub struct FakeApi {
  pub calls: Mutex<Vec<String>>,
  pub burgers: Mutex<Vec<Product>>,
  pub users: Mutex<Vec<UserRecord>>,
  pub orders: Mutex<Vec<Order>>,
  /// Returned by login/register. `None` makes them fail with "Invalid credentials".
  pub account: Mutex<Option<UserSession>>,
  /// `None` mimics a response without `data`.
  pub payment_order: Mutex<Option<PaymentOrder>>,
  pub verify_success: Mutex<bool>,
  pub last_payment_request: Mutex<Option<PaymentOrderRequest>>,
  pub last_verify_request: Mutex<Option<VerifyPaymentRequest>>,
}

impl Default for FakeApi {
  fn default() -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      burgers: Mutex::new(vec![classic()]),
      users: Mutex::new(Vec::new()),
      orders: Mutex::new(Vec::new()),
      account: Mutex::new(Some(session(false))),
      payment_order: Mutex::new(Some(PaymentOrder {
        id: "order_rzp_1".to_string(),
        amount: 45000,
        currency: "INR".to_string(),
      })),
      verify_success: Mutex::new(true),
      last_payment_request: Mutex::new(None),
      last_verify_request: Mutex::new(None),
    }
  }
}

impl FakeApi {
  fn record(&self, call: &str) {
    self.calls.lock().push(call.to_string());
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().clone()
  }

  fn account(&self) -> Result<UserSession> {
    self.account.lock().clone().ok_or_else(|| api_error(401, "Invalid credentials"))
  }
}

#[async_trait]
impl AuthApi for FakeApi {
  async fn register(&self, _request: &RegisterRequest) -> Result<UserSession> {
    self.record("register");
    self.account()
  }

  async fn login(&self, _request: &LoginRequest) -> Result<UserSession> {
    self.record("login");
    self.account()
  }

  async fn forgot_password(&self, _email: &str) -> Result<Option<String>> {
    self.record("forgot_password");
    Ok(Some("Password reset link sent to your email".to_string()))
  }

  async fn verify_reset_link(&self, _user_id: &str, token: &str) -> Result<Option<String>> {
    self.record("verify_reset_link");
    if token == "expired" {
      return Err(api_error(400, "Link expired"));
    }
    Ok(None)
  }

  async fn reset_password(&self, _user_id: &str, _token: &str, _password: &str) -> Result<Option<String>> {
    self.record("reset_password");
    Ok(Some("Password updated".to_string()))
  }
}

#[async_trait]
impl CatalogApi for FakeApi {
  async fn list_burgers(&self, search: &str, category: Option<Category>) -> Result<Vec<Product>> {
    self.record("list_burgers");
    Ok(
      self
        .burgers
        .lock()
        .iter()
        .filter(|b| b.name.to_lowercase().contains(&search.to_lowercase()))
        .filter(|b| category.map_or(true, |c| b.category == c))
        .cloned()
        .collect(),
    )
  }

  async fn get_burger(&self, id: &str) -> Result<Product> {
    self.record("get_burger");
    self
      .burgers
      .lock()
      .iter()
      .find(|b| b.id == id)
      .cloned()
      .ok_or_else(|| api_error(404, "Burger not found"))
  }

  async fn create_burger(&self, _token: &str, payload: &ProductPayload) -> Result<Product> {
    self.record("create_burger");
    let product = Product {
      id: "b9".to_string(),
      name: payload.name.clone(),
      description: payload.description.clone(),
      category: payload.category,
      variants: payload.variants.clone(),
      prices: payload.prices.clone(),
      image: payload.image.clone(),
    };
    self.burgers.lock().push(product.clone());
    Ok(product)
  }

  async fn update_burger(&self, token: &str, _id: &str, payload: &ProductPayload) -> Result<Product> {
    self.record("update_burger");
    self.create_burger(token, payload).await
  }

  async fn delete_burger(&self, _token: &str, id: &str) -> Result<()> {
    self.record("delete_burger");
    self.burgers.lock().retain(|b| b.id != id);
    Ok(())
  }
}

#[async_trait]
impl OrderApi for FakeApi {
  async fn user_orders(&self, _token: &str, _user_id: &str) -> Result<Vec<Order>> {
    self.record("user_orders");
    Ok(self.orders.lock().clone())
  }

  async fn order_detail(&self, _token: &str, order_id: &str) -> Result<Order> {
    self.record("order_detail");
    self
      .orders
      .lock()
      .iter()
      .find(|o| o.id == order_id)
      .cloned()
      .ok_or_else(|| AppError::NotFound("No order details found!".to_string()))
  }

  async fn all_orders(&self, _token: &str) -> Result<Vec<Order>> {
    self.record("all_orders");
    Ok(self.orders.lock().clone())
  }

  async fn update_order_status(&self, _token: &str, order_id: &str, status: OrderStatus) -> Result<Order> {
    self.record("update_order_status");
    let mut orders = self.orders.lock();
    let order = orders
      .iter_mut()
      .find(|o| o.id == order_id)
      .ok_or_else(|| api_error(404, "Order not found"))?;
    order.order_status = status;
    Ok(order.clone())
  }
}

#[async_trait]
impl PaymentApi for FakeApi {
  async fn create_payment_order(&self, _token: &str, request: &PaymentOrderRequest) -> Result<Option<PaymentOrder>> {
    self.record("create_payment_order");
    *self.last_payment_request.lock() = Some(request.clone());
    Ok(self.payment_order.lock().clone())
  }

  async fn verify_payment(&self, _token: &str, request: &VerifyPaymentRequest) -> Result<VerifyPaymentResponse> {
    self.record("verify_payment");
    *self.last_verify_request.lock() = Some(request.clone());
    let success = *self.verify_success.lock();
    Ok(VerifyPaymentResponse {
      success,
      order_id: success.then(|| "o-100".to_string()),
    })
  }
}

#[async_trait]
impl UserAdminApi for FakeApi {
  async fn list_users(&self, _token: &str) -> Result<Vec<UserRecord>> {
    self.record("list_users");
    Ok(self.users.lock().clone())
  }

  async fn delete_user(&self, _token: &str, user_id: &str) -> Result<()> {
    self.record("delete_user");
    self.users.lock().retain(|u| u.id != user_id);
    Ok(())
  }
}

// --- Widget ---

/// Returns a preset outcome and remembers what it was asked to collect.
#[derive(Default)]
pub struct ScriptedWidget {
  /// `None` dismisses the widget.
  pub outcome: Mutex<Option<WidgetOutcome>>,
  pub opened: Mutex<Vec<WidgetRequest>>,
}

impl ScriptedWidget {
  pub fn paying(outcome: WidgetOutcome) -> Self {
    Self {
      outcome: Mutex::new(Some(outcome)),
      opened: Mutex::new(Vec::new()),
    }
  }
}

#[async_trait]
impl CheckoutWidget for ScriptedWidget {
  async fn open(&self, request: &WidgetRequest) -> Result<WidgetOutcome> {
    self.opened.lock().push(request.clone());
    Ok(self.outcome.lock().clone().unwrap_or(WidgetOutcome::Dismissed))
  }
}

// --- App wiring ---

pub fn config() -> AppConfig {
  AppConfig::from_lookup(|name| match name {
    "BURGERBOX_API_BASE_URL" => Some("http://api.test/".to_string()),
    "BURGERBOX_PAYMENT_KEY_ID" => Some("rzp_test_key".to_string()),
    _ => None,
  })
  .expect("test config")
}

pub struct TestApp {
  pub state: AppState,
  pub api: Arc<FakeApi>,
  pub widget: Arc<ScriptedWidget>,
  pub store: Arc<MemoryStore>,
}

pub fn app_with(api: FakeApi, widget: ScriptedWidget, store: Arc<MemoryStore>) -> TestApp {
  let api = Arc::new(api);
  let widget = Arc::new(widget);
  let state = AppState::new(
    Arc::new(config()),
    api.clone(),
    widget.clone(),
    store.clone() as Arc<dyn KeyValueStore>,
  );
  TestApp {
    state,
    api,
    widget,
    store,
  }
}

pub fn app(api: FakeApi, widget: ScriptedWidget) -> TestApp {
  app_with(api, widget, Arc::new(MemoryStore::new()))
}

/// Signs `app` in without going through the login flow.
pub fn sign_in(app: &TestApp, user: UserSession) {
  app.state.session_store.save(&user).expect("save session");
  *app.state.session.write() = Some(user);
}

// --- Tracing ---

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_env_filter(filter)
    .with_test_writer()
    .init();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
