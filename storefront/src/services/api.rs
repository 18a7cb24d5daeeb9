// burgerbox_storefront/src/services/api.rs

//! The remote storefront API.
//!
//! Each concern is a trait so workflows can run against an in-memory fake.
//! [`ApiClient`] is the `reqwest` implementation. Every failure becomes
//! [`AppError::Api`] carrying the server's `message` when the body has one,
//! otherwise the call's default text.

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::order::{OrderDetailResponse, OrderStatusUpdate, UserOrdersResponse};
use crate::models::payment::{PaymentOrderEnvelope, VerifyPaymentRequest, VerifyPaymentResponse};
use crate::models::user::MessageResponse;
use crate::models::{LoginRequest, Order, OrderStatus, PaymentOrder, PaymentOrderRequest, RegisterRequest, UserRecord, UserSession};
use async_trait::async_trait;
use burgerbox::{Category, Product, ProductPayload};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument, warn};

#[async_trait]
pub trait AuthApi: Send + Sync {
  async fn register(&self, request: &RegisterRequest) -> Result<UserSession>;
  async fn login(&self, request: &LoginRequest) -> Result<UserSession>;
  /// Returns the server's confirmation message, if any.
  async fn forgot_password(&self, email: &str) -> Result<Option<String>>;
  async fn verify_reset_link(&self, user_id: &str, token: &str) -> Result<Option<String>>;
  async fn reset_password(&self, user_id: &str, token: &str, password: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
  async fn list_burgers(&self, search: &str, category: Option<Category>) -> Result<Vec<Product>>;
  async fn get_burger(&self, id: &str) -> Result<Product>;
  async fn create_burger(&self, token: &str, payload: &ProductPayload) -> Result<Product>;
  async fn update_burger(&self, token: &str, id: &str, payload: &ProductPayload) -> Result<Product>;
  async fn delete_burger(&self, token: &str, id: &str) -> Result<()>;
}

#[async_trait]
pub trait OrderApi: Send + Sync {
  async fn user_orders(&self, token: &str, user_id: &str) -> Result<Vec<Order>>;
  async fn order_detail(&self, token: &str, order_id: &str) -> Result<Order>;
  async fn all_orders(&self, token: &str) -> Result<Vec<Order>>;
  async fn update_order_status(&self, token: &str, order_id: &str, status: OrderStatus) -> Result<Order>;
}

#[async_trait]
pub trait PaymentApi: Send + Sync {
  /// `Ok(None)` when the server answered without an order.
  async fn create_payment_order(&self, token: &str, request: &PaymentOrderRequest) -> Result<Option<PaymentOrder>>;
  async fn verify_payment(&self, token: &str, request: &VerifyPaymentRequest) -> Result<VerifyPaymentResponse>;
}

#[async_trait]
pub trait UserAdminApi: Send + Sync {
  async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>>;
  async fn delete_user(&self, token: &str, user_id: &str) -> Result<()>;
}

/// Everything the storefront talks to.
pub trait StorefrontApi: AuthApi + CatalogApi + OrderApi + PaymentApi + UserAdminApi {}

impl<T> StorefrontApi for T where T: AuthApi + CatalogApi + OrderApi + PaymentApi + UserAdminApi {}

/// Builds the error for a failed call from the response status and body.
pub fn api_error(status: Option<u16>, body: &str, fallback: &str) -> AppError {
  let message = serde_json::from_str::<MessageResponse>(body)
    .ok()
    .and_then(|m| m.message)
    .filter(|m| !m.trim().is_empty())
    .unwrap_or_else(|| fallback.to_string());
  AppError::Api { status, message }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
  http: Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(config: &AppConfig) -> Result<Self> {
    let http = Client::builder().timeout(config.http_timeout).build()?;
    Ok(Self {
      http,
      base_url: config.api_base_url.clone(),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn send_raw(&self, request: RequestBuilder, fallback: &str) -> Result<reqwest::Response> {
    let response = request.send().await.map_err(|e| {
      warn!(error = %e, "Request failed before a response arrived.");
      AppError::Api {
        status: None,
        message: fallback.to_string(),
      }
    })?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "API returned an error status.");
    Err(api_error(Some(status.as_u16()), &body, fallback))
  }

  async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<T> {
    let response = self.send_raw(request, fallback).await?;
    let status = response.status().as_u16();
    response.json::<T>().await.map_err(|e| {
      warn!(error = %e, "API response body could not be decoded.");
      AppError::Api {
        status: Some(status),
        message: fallback.to_string(),
      }
    })
  }

  async fn send_message(&self, request: RequestBuilder, fallback: &str) -> Result<Option<String>> {
    let response = self.send_raw(request, fallback).await?;
    let body = response.text().await.unwrap_or_default();
    Ok(serde_json::from_str::<MessageResponse>(&body).ok().and_then(|m| m.message))
  }
}

#[async_trait]
impl AuthApi for ApiClient {
  #[instrument(name = "api::register", skip_all, fields(email = %request.email), err(Display))]
  async fn register(&self, request: &RegisterRequest) -> Result<UserSession> {
    let req = self.http.post(self.url("/users/register")).json(request);
    self.send_json(req, "Registration Failed!").await
  }

  #[instrument(name = "api::login", skip_all, fields(email = %request.email), err(Display))]
  async fn login(&self, request: &LoginRequest) -> Result<UserSession> {
    let req = self.http.post(self.url("/users/login")).json(request);
    self.send_json(req, "Login Failed!").await
  }

  #[instrument(name = "api::forgot_password", skip_all, err(Display))]
  async fn forgot_password(&self, email: &str) -> Result<Option<String>> {
    let req = self.http.post(self.url("/users/forgot-password")).json(&json!({ "email": email }));
    self.send_message(req, "Something went wrong!").await
  }

  #[instrument(name = "api::verify_reset_link", skip(self, token), err(Display))]
  async fn verify_reset_link(&self, user_id: &str, token: &str) -> Result<Option<String>> {
    let req = self.http.get(self.url(&format!("/users/reset-link-verify/{}/{}", user_id, token)));
    self.send_message(req, "Invalid or expired password reset link.").await
  }

  #[instrument(name = "api::reset_password", skip(self, token, password), err(Display))]
  async fn reset_password(&self, user_id: &str, token: &str, password: &str) -> Result<Option<String>> {
    let req = self
      .http
      .post(self.url(&format!("/users/reset-password/{}/{}", user_id, token)))
      .json(&json!({ "password": password }));
    self.send_message(req, "Something went wrong!").await
  }
}

#[async_trait]
impl CatalogApi for ApiClient {
  #[instrument(name = "api::list_burgers", skip(self), err(Display))]
  async fn list_burgers(&self, search: &str, category: Option<Category>) -> Result<Vec<Product>> {
    let category = category.map(|c| c.as_str()).unwrap_or("");
    let req = self
      .http
      .get(self.url("/burgers/getAllBurgers"))
      .query(&[("search", search), ("category", category)]);
    let burgers: Vec<Product> = self.send_json(req, "Failed to fetch burgers!").await?;
    debug!(count = burgers.len(), "Burgers fetched.");
    Ok(burgers)
  }

  #[instrument(name = "api::get_burger", skip(self), err(Display))]
  async fn get_burger(&self, id: &str) -> Result<Product> {
    let req = self.http.get(self.url(&format!("/burgers/{}", id)));
    self.send_json(req, "Failed to fetch burger!").await
  }

  #[instrument(name = "api::create_burger", skip_all, fields(name = %payload.name), err(Display))]
  async fn create_burger(&self, token: &str, payload: &ProductPayload) -> Result<Product> {
    let req = self.http.post(self.url("/burgers")).bearer_auth(token).json(payload);
    self.send_json(req, "Failed to add burger!").await
  }

  #[instrument(name = "api::update_burger", skip(self, token, payload), err(Display))]
  async fn update_burger(&self, token: &str, id: &str, payload: &ProductPayload) -> Result<Product> {
    let req = self
      .http
      .put(self.url(&format!("/burgers/update/{}", id)))
      .bearer_auth(token)
      .json(payload);
    self.send_json(req, "Failed to update burger!").await
  }

  #[instrument(name = "api::delete_burger", skip(self, token), err(Display))]
  async fn delete_burger(&self, token: &str, id: &str) -> Result<()> {
    let req = self.http.delete(self.url(&format!("/burgers/{}", id))).bearer_auth(token);
    self.send_raw(req, "Failed to delete burger!").await.map(|_| ())
  }
}

#[async_trait]
impl OrderApi for ApiClient {
  #[instrument(name = "api::user_orders", skip(self, token), err(Display))]
  async fn user_orders(&self, token: &str, user_id: &str) -> Result<Vec<Order>> {
    let req = self.http.get(self.url(&format!("/payment/user/{}", user_id))).bearer_auth(token);
    let body: UserOrdersResponse = self.send_json(req, "Something went wrong!").await?;
    Ok(body.orders)
  }

  #[instrument(name = "api::order_detail", skip(self, token), err(Display))]
  async fn order_detail(&self, token: &str, order_id: &str) -> Result<Order> {
    let req = self.http.get(self.url(&format!("/payment/orders/{}", order_id))).bearer_auth(token);
    let body: OrderDetailResponse = self.send_json(req, "Failed to fetch order details!").await?;
    body
      .order
      .into_iter()
      .next()
      .ok_or_else(|| AppError::NotFound("No order details found!".to_string()))
  }

  #[instrument(name = "api::all_orders", skip_all, err(Display))]
  async fn all_orders(&self, token: &str) -> Result<Vec<Order>> {
    let req = self.http.get(self.url("/payment/orders")).bearer_auth(token);
    self.send_json(req, "Failed to fetch orders!").await
  }

  #[instrument(name = "api::update_order_status", skip(self, token), err(Display))]
  async fn update_order_status(&self, token: &str, order_id: &str, status: OrderStatus) -> Result<Order> {
    let req = self
      .http
      .put(self.url(&format!("/payment/orders/{}", order_id)))
      .bearer_auth(token)
      .json(&OrderStatusUpdate { order_status: status });
    self.send_json(req, "Failed to update order status!").await
  }
}

#[async_trait]
impl PaymentApi for ApiClient {
  #[instrument(name = "api::create_payment_order", skip_all, fields(amount = request.amount), err(Display))]
  async fn create_payment_order(&self, token: &str, request: &PaymentOrderRequest) -> Result<Option<PaymentOrder>> {
    let req = self.http.post(self.url("/payment/order")).bearer_auth(token).json(request);
    let envelope: PaymentOrderEnvelope = self.send_json(req, "Payment initiation failed.").await?;
    Ok(envelope.data)
  }

  #[instrument(name = "api::verify_payment", skip_all, fields(order = %request.confirmation.razorpay_order_id), err(Display))]
  async fn verify_payment(&self, token: &str, request: &VerifyPaymentRequest) -> Result<VerifyPaymentResponse> {
    let req = self.http.post(self.url("/payment/verify")).bearer_auth(token).json(request);
    self.send_json(req, "Payment verification failed.").await
  }
}

#[async_trait]
impl UserAdminApi for ApiClient {
  #[instrument(name = "api::list_users", skip_all, err(Display))]
  async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>> {
    let req = self.http.get(self.url("/users")).bearer_auth(token);
    self.send_json(req, "Failed to fetch users!").await
  }

  #[instrument(name = "api::delete_user", skip(self, token), err(Display))]
  async fn delete_user(&self, token: &str, user_id: &str) -> Result<()> {
    let req = self.http.delete(self.url(&format!("/users/{}", user_id))).bearer_auth(token);
    self.send_raw(req, "Failed to delete user!").await.map(|_| ())
  }
}
