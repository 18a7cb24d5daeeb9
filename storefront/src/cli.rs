// burgerbox_storefront/src/cli.rs

//! Terminal front end. Each subcommand is one shopper or admin action; the
//! notices it queues are printed by `main` afterwards.

use crate::errors::{AppError, Result};
use crate::forms::{LoginForm, RegisterForm, ResetPasswordForm};
use crate::models::{ContactDetails, Order, OrderStatus};
use crate::pagination::{self, ADMIN_ORDERS_PER_PAGE, CATALOG_PER_PAGE, ORDER_HISTORY_PER_PAGE};
use crate::state::AppState;
use crate::workflows::{account_flows, admin, catalog, orders, place_order, CheckoutOutcome};
use burgerbox::{Category, LineKey, ProductDraft};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "burgerbox", author, version, about = "BurgerBox storefront client")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Browse burgers
  Catalog {
    #[arg(long, default_value = "")]
    search: String,
    /// veg or nonveg
    #[arg(long)]
    category: Option<Category>,
    #[arg(long, default_value_t = 1)]
    page: usize,
  },
  /// Show the cart or change it
  Cart {
    #[command(subcommand)]
    action: CartAction,
  },
  Register {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
  },
  Login {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
  },
  Logout,
  /// Request a password reset link
  ForgotPassword {
    #[arg(long)]
    email: String,
  },
  /// Set a new password from a reset link's id and token
  ResetPassword {
    #[arg(long)]
    id: String,
    #[arg(long)]
    token: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
  },
  /// Pay for the cart
  Checkout {
    #[arg(long)]
    address: String,
    #[arg(long)]
    phone: String,
    /// Defaults to the signed-in user's name
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
  },
  /// Your past orders
  Orders {
    #[arg(long, default_value_t = 1)]
    page: usize,
  },
  Admin {
    #[command(subcommand)]
    action: AdminAction,
  },
}

#[derive(Subcommand, Debug)]
pub enum CartAction {
  Show,
  Add {
    product_id: String,
    /// Defaults to the burger's first variant
    #[arg(long)]
    variant: Option<String>,
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,
  },
  /// Step a line's quantity up or down
  Adjust {
    product_id: String,
    variant: String,
    #[arg(allow_negative_numbers = true)]
    delta: i64,
  },
  Remove {
    product_id: String,
    variant: String,
  },
  Clear,
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
  Users,
  DeleteUser {
    user_id: String,
  },
  Orders {
    #[arg(long, default_value_t = 1)]
    page: usize,
  },
  /// Placed, Processing, "Out for Delivery", Delivered or Failed
  SetStatus {
    order_id: String,
    status: OrderStatus,
  },
  AddBurger {
    #[command(flatten)]
    fields: BurgerFields,
  },
  /// Edit a burger; fields left out keep their current values
  UpdateBurger {
    id: String,
    #[command(flatten)]
    fields: BurgerFields,
  },
  DeleteBurger {
    id: String,
  },
}

#[derive(Args, Debug, Default)]
pub struct BurgerFields {
  #[arg(long)]
  pub name: Option<String>,
  #[arg(long)]
  pub description: Option<String>,
  #[arg(long)]
  pub category: Option<Category>,
  /// Image URL
  #[arg(long)]
  pub image: Option<String>,
  /// VARIANT=PRICE, repeatable (small, medium, large)
  #[arg(long = "price", value_parser = parse_price)]
  pub prices: Vec<(String, u64)>,
  /// Variant to stop offering, repeatable
  #[arg(long = "drop-variant")]
  pub drop_variants: Vec<String>,
}

impl BurgerFields {
  /// Applies the given fields on top of `draft`.
  pub fn apply(self, mut draft: ProductDraft) -> Result<ProductDraft> {
    if let Some(name) = self.name {
      draft.name = name;
    }
    if let Some(description) = self.description {
      draft.description = description;
    }
    if let Some(category) = self.category {
      draft.category = category;
    }
    if let Some(image) = self.image {
      draft.image = image;
    }
    for variant in &self.drop_variants {
      if draft.variants.iter().any(|(v, _)| v == variant) {
        draft.toggle_variant(variant)?;
      }
    }
    for (variant, price) in self.prices {
      if !draft.variants.iter().any(|(v, _)| *v == variant) {
        draft.toggle_variant(&variant)?;
      }
      draft.set_price(&variant, price)?;
    }
    Ok(draft)
  }
}

fn parse_price(raw: &str) -> std::result::Result<(String, u64), String> {
  let (variant, price) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected VARIANT=PRICE, got '{}'", raw))?;
  let price = price
    .trim()
    .parse::<u64>()
    .map_err(|e| format!("invalid price '{}': {}", price, e))?;
  Ok((variant.trim().to_ascii_lowercase(), price))
}

pub async fn run(app_state: &AppState, command: Command) -> Result<()> {
  match command {
    Command::Catalog { search, category, page } => {
      let burgers = catalog::browse(app_state, &search, category).await?;
      let pages = pagination::total_pages(burgers.len(), CATALOG_PER_PAGE);
      for burger in pagination::page(&burgers, CATALOG_PER_PAGE, page) {
        let prices: Vec<String> = burger.prices.iter().map(|(v, p)| format!("{} {}", v, p)).collect();
        println!("{}  {} ({})  {}", burger.id, burger.name, burger.category, prices.join(", "));
      }
      println!("page {} of {}", page, pages);
    }
    Command::Cart { action } => run_cart(app_state, action).await?,
    Command::Register {
      name,
      email,
      password,
      confirm_password,
    } => {
      let form = RegisterForm {
        name,
        email,
        password,
        confirm_password,
      };
      let user = account_flows::register(app_state, form).await.map_err(print_form_errors)?;
      println!("Signed in as {}", user.name);
    }
    Command::Login { email, password } => {
      let user = account_flows::login(app_state, LoginForm { email, password })
        .await
        .map_err(print_form_errors)?;
      println!("Signed in as {}{}", user.name, if user.is_admin { " (admin)" } else { "" });
    }
    Command::Logout => account_flows::logout(app_state)?,
    Command::ForgotPassword { email } => {
      account_flows::forgot_password(app_state, &email).await.map_err(print_form_errors)?
    }
    Command::ResetPassword {
      id,
      token,
      password,
      confirm_password,
    } => {
      account_flows::verify_reset_link(app_state, &id, &token).await?;
      let form = ResetPasswordForm {
        password,
        confirm_password,
      };
      account_flows::reset_password(app_state, &id, &token, form)
        .await
        .map_err(print_form_errors)?;
    }
    Command::Checkout {
      address,
      phone,
      name,
      email,
    } => {
      let user = app_state.report(app_state.require_session())?;
      let mut contact = ContactDetails::for_user(&user);
      contact.address = address;
      contact.phone = phone;
      if let Some(name) = name {
        contact.name = name;
      }
      if let Some(email) = email {
        contact.email = email;
      }
      match place_order(app_state, contact).await.map_err(print_form_errors)? {
        CheckoutOutcome::Paid(summary) => {
          println!("Order {} placed", summary.order_id);
          for line in &summary.order_items {
            println!("  {} x{} ({})  {}", line.name(), line.quantity(), line.variant(), line.line_total());
          }
          println!(
            "Subtotal {}  Delivery {}  Paid {}",
            summary.subtotal, summary.delivery_fee, summary.amount
          );
        }
        CheckoutOutcome::Cancelled => println!("Checkout cancelled, your cart is unchanged."),
      }
    }
    Command::Orders { page } => {
      let history = orders::history(app_state).await?;
      print_orders(&history, ORDER_HISTORY_PER_PAGE, page);
    }
    Command::Admin { action } => run_admin(app_state, action).await?,
  }
  Ok(())
}

async fn run_cart(app_state: &AppState, action: CartAction) -> Result<()> {
  match action {
    CartAction::Show => {}
    CartAction::Add {
      product_id,
      variant,
      quantity,
    } => {
      let product = catalog::product(app_state, &product_id).await?;
      let variant = match variant.or_else(|| product.default_variant().map(str::to_string)) {
        Some(variant) => variant,
        None => {
          return app_state.report(Err(AppError::Validation(format!("{} has no variants to choose from.", product.name))))
        }
      };
      app_state.add_to_cart(&product, quantity, &variant)?;
    }
    CartAction::Adjust {
      product_id,
      variant,
      delta,
    } => {
      app_state.adjust_line(&LineKey::new(product_id, variant), delta)?;
    }
    CartAction::Remove { product_id, variant } => {
      app_state.remove_from_cart(&LineKey::new(product_id, variant))?;
    }
    CartAction::Clear => {
      app_state.clear_cart()?;
    }
  }

  let cart = app_state.cart.read();
  if cart.is_empty() {
    println!("Your cart is empty.");
    return Ok(());
  }
  for line in cart.lines() {
    println!(
      "{}/{}  {} x{}  {}",
      line.product_id(),
      line.variant(),
      line.name(),
      line.quantity(),
      line.line_total()
    );
  }
  println!(
    "{} items, total {} (+{} delivery)",
    cart.item_count(),
    cart.total_price(),
    app_state.config.delivery_fee
  );
  Ok(())
}

async fn run_admin(app_state: &AppState, action: AdminAction) -> Result<()> {
  match action {
    AdminAction::Users => {
      for user in admin::users(app_state).await? {
        println!("{}  {} <{}>{}", user.id, user.name, user.email, if user.is_admin { " admin" } else { "" });
      }
    }
    AdminAction::DeleteUser { user_id } => admin::delete_user(app_state, &user_id).await?,
    AdminAction::Orders { page } => {
      let all = admin::orders(app_state).await?;
      print_orders(&all, ADMIN_ORDERS_PER_PAGE, page);
    }
    AdminAction::SetStatus { order_id, status } => {
      let all = admin::orders(app_state).await?;
      let Some(order) = all.iter().find(|o| o.id == order_id) else {
        return app_state.report(Err(AppError::NotFound(format!("Order {} not found.", order_id))));
      };
      let updated = admin::update_order_status(app_state, order, status).await?;
      println!("{} is now {}", updated.id, updated.order_status);
    }
    AdminAction::AddBurger { fields } => {
      let draft = app_state.report(fields.apply(ProductDraft::default()))?;
      let burger = admin::add_burger(app_state, &draft).await?;
      println!("Added {}  {}", burger.id, burger.name);
    }
    AdminAction::UpdateBurger { id, fields } => {
      let current = catalog::product(app_state, &id).await?;
      let draft = app_state.report(fields.apply(ProductDraft::from_product(&current)))?;
      let burger = admin::update_burger(app_state, &id, &draft).await?;
      println!("Updated {}  {}", burger.id, burger.name);
    }
    AdminAction::DeleteBurger { id } => admin::delete_burger(app_state, &id).await?,
  }
  Ok(())
}

fn print_orders(orders: &[Order], per_page: usize, page: usize) {
  if orders.is_empty() {
    println!("No orders yet.");
    return;
  }
  for order in pagination::page(orders, per_page, page) {
    let placed = order
      .created_at
      .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
      .unwrap_or_default();
    println!(
      "{}  {}  {} items  {}  {}",
      order.id,
      placed,
      order.item_count(),
      order.amount,
      order.order_status
    );
  }
  println!("page {} of {}", page, pagination::total_pages(orders.len(), per_page));
}

// Field messages go to stderr; the summary notice is printed with the others.
fn print_form_errors(err: AppError) -> AppError {
  if let AppError::Form(fields) = &err {
    for (field, message) in fields.iter() {
      eprintln!("  {}: {}", field, message);
    }
  }
  err
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(args: &[&str]) -> Command {
    Cli::try_parse_from(std::iter::once("burgerbox").chain(args.iter().copied()))
      .unwrap()
      .command
  }

  #[test]
  fn add_burger_builds_a_priced_draft() {
    let Command::Admin {
      action: AdminAction::AddBurger { fields },
    } = parse(&[
      "admin",
      "add-burger",
      "--name",
      "Zinger",
      "--description",
      "Crispy chicken",
      "--category",
      "nonveg",
      "--image",
      "https://img.test/z.png",
      "--price",
      "small=120",
      "--price",
      "Large=260",
    ])
    else {
      panic!("expected admin add-burger");
    };

    let payload = fields.apply(ProductDraft::default()).unwrap().to_payload().unwrap();
    assert_eq!(payload.name, "Zinger");
    assert_eq!(payload.category, Category::NonVeg);
    assert_eq!(payload.variants, vec!["small".to_string(), "large".to_string()]);
    assert_eq!(payload.prices.get("large"), Some(260));
  }

  #[test]
  fn update_burger_keeps_unset_fields() {
    let current = ProductDraft {
      name: "Classic".into(),
      description: "Grilled veg patty".into(),
      category: Category::Veg,
      variants: vec![("small".into(), Some(100)), ("large".into(), Some(250))],
      image: "https://img.test/b1.png".into(),
    };
    let Command::Admin {
      action: AdminAction::UpdateBurger { id, fields },
    } = parse(&[
      "admin",
      "update-burger",
      "b1",
      "--price",
      "small=110",
      "--drop-variant",
      "large",
    ])
    else {
      panic!("expected admin update-burger");
    };

    assert_eq!(id, "b1");
    let draft = fields.apply(current).unwrap();
    assert_eq!(draft.name, "Classic");
    assert_eq!(draft.variants, vec![("small".to_string(), Some(110))]);
  }

  #[test]
  fn malformed_prices_and_unknown_variants_are_rejected() {
    assert!(Cli::try_parse_from(["burgerbox", "admin", "add-burger", "--price", "small"]).is_err());
    assert!(Cli::try_parse_from(["burgerbox", "admin", "add-burger", "--price", "small=abc"]).is_err());

    let fields = BurgerFields {
      prices: vec![("jumbo".into(), 500)],
      ..Default::default()
    };
    assert!(matches!(fields.apply(ProductDraft::default()), Err(AppError::Draft(_))));
  }
}
