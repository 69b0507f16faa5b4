//! End-to-end checkout against file-backed storage

use std::sync::Arc;

use jiff::{Timestamp, civil::Date};
use rust_decimal::dec;
use tempfile::TempDir;
use testresult::TestResult;

use iara::prelude::*;

fn storage(dir: &TempDir) -> TestResult<Arc<dyn Storage>> {
    Ok(Arc::new(FileStorage::open(dir.path())?))
}

fn game_a() -> CartItem {
    CartItem::new(1, "A", dec!(10.00))
}

fn game_b() -> CartItem {
    CartItem::new(2, "B", dec!(25.50))
}

fn form(payment_method: PaymentMethod) -> CheckoutForm {
    let card = (payment_method == PaymentMethod::Card).then(|| CardDetails {
        number: "4111 1111 1111 1111".to_string(),
        holder_name: "MARIA SILVA".to_string(),
        expiry: "12/29".to_string(),
        cvv: "123".to_string(),
    });

    CheckoutForm {
        name: "Maria Silva".to_string(),
        tax_id: "123.456.789-01".to_string(),
        phone: "(11) 98765-4321".to_string(),
        payment_method,
        card,
    }
}

fn checkout(
    storage: &Arc<dyn Storage>,
    millis: i64,
) -> TestResult<CheckoutOrchestrator<FixedClock, InstantSettlement>> {
    Ok(CheckoutOrchestrator::new(
        storage.clone(),
        FixedClock(Timestamp::from_millisecond(millis)?),
        InstantSettlement,
    ))
}

#[tokio::test]
async fn card_checkout_records_order_and_empties_cart() -> TestResult {
    let dir = TempDir::new()?;
    let storage = storage(&dir)?;

    let mut cart = CartManager::load(storage.clone())?;
    cart.add(game_a())?;
    cart.add(game_b())?;

    assert_eq!(cart.total(), dec!(35.50));

    let mut checkout = checkout(&storage, 1_718_000_000_123)?;
    let outcome = checkout.submit(&mut cart, &form(PaymentMethod::Card)).await?;

    assert_eq!(outcome.order().total, dec!(35.50));
    assert_eq!(outcome.order().id.as_str(), "ORDER-1718000000123");
    assert_eq!(outcome.order().customer.email, "usuario@iaragames.com");
    assert!(matches!(checkout.state(), CheckoutState::Completed { .. }));

    // A fresh load sees what was persisted.
    let reloaded = CartManager::load(storage.clone())?;
    let orders = OrderStore::new(storage);

    assert!(reloaded.is_empty());
    assert_eq!(orders.history()?, vec![outcome.order().clone()]);
    assert!(orders.pending()?.is_none());

    Ok(())
}

#[tokio::test]
async fn signed_in_email_is_stored_on_the_order() -> TestResult {
    let dir = TempDir::new()?;
    let storage = storage(&dir)?;

    SessionStore::new(storage.clone()).sign_in("QpwL5tke4Pnpja7X4", "eve.holt@reqres.in")?;

    let mut cart = CartManager::load(storage.clone())?;
    cart.add(game_a())?;

    let outcome = checkout(&storage, 0)?
        .submit(&mut cart, &form(PaymentMethod::Pix))
        .await?;

    assert_eq!(outcome.order().customer.email, "eve.holt@reqres.in");

    Ok(())
}

#[tokio::test]
async fn pix_checkout_waits_for_confirmation() -> TestResult {
    let dir = TempDir::new()?;
    let storage = storage(&dir)?;

    let mut cart = CartManager::load(storage.clone())?;
    cart.add(game_a())?;

    let mut checkout = checkout(&storage, 1_718_000_000_123)?;
    let outcome = checkout.submit(&mut cart, &form(PaymentMethod::Pix)).await?;
    let order = outcome.order().clone();

    assert!(matches!(
        checkout.state(),
        CheckoutState::AwaitingAsyncPayment { order_id } if *order_id == order.id
    ));

    let orders = OrderStore::new(storage.clone());

    assert_eq!(orders.pending()?, Some(order.clone()));
    assert!(orders.history()?.is_empty());
    assert!(CartManager::load(storage)?.is_empty());

    let Some(PaymentArtifact::Pix(pix)) = checkout.payment_artifact(&order)? else {
        panic!("expected a PIX artifact");
    };

    assert_eq!(pix.value, "10.00");
    assert!(pix.qr_code.starts_with("data:image/svg+xml;base64,"));

    let paid = checkout.confirm_payment()?;

    assert_eq!(paid.pix_paid, Some(true));
    assert!(paid.is_paid());
    assert!(orders.pending()?.is_none());
    assert_eq!(orders.history()?, vec![paid.clone()]);
    assert_eq!(checkout.payment_artifact(&paid)?, None);

    Ok(())
}

#[tokio::test]
async fn boleto_confirmation_moves_order_to_history() -> TestResult {
    let dir = TempDir::new()?;
    let storage = storage(&dir)?;

    let mut cart = CartManager::load(storage.clone())?;
    cart.add(game_a())?;
    cart.add(game_b())?;

    let mut checkout = checkout(&storage, 1_718_000_000_123)?;
    checkout
        .submit(&mut cart, &form(PaymentMethod::Boleto))
        .await?;

    let confirmed = checkout.confirm_payment()?;

    assert_eq!(confirmed.boleto_paid, Some(true));
    assert_eq!(confirmed.pix_paid, None);

    let orders = OrderStore::new(storage);
    let summary = orders.summary()?;

    assert_eq!(summary.orders, 1);
    assert_eq!(summary.items, 2);
    assert_eq!(summary.spent, dec!(35.50));

    assert!(matches!(
        checkout.confirm_payment(),
        Err(CheckoutError::NoPendingOrder)
    ));

    Ok(())
}

#[tokio::test]
async fn invalid_checkout_writes_nothing() -> TestResult {
    let dir = TempDir::new()?;
    let storage = storage(&dir)?;

    let mut cart = CartManager::load(storage.clone())?;
    let mut checkout = checkout(&storage, 0)?;

    let invalid = CheckoutForm {
        tax_id: "123".to_string(),
        ..form(PaymentMethod::Card)
    };

    let Err(CheckoutError::Validation(errors)) = checkout.submit(&mut cart, &invalid).await
    else {
        panic!("expected a validation error");
    };

    assert_eq!(errors.get(Field::Cart), Some(&FieldError::Empty));
    assert!(errors.get(Field::TaxId).is_some());
    assert!(matches!(
        checkout.state(),
        CheckoutState::Editing { error: Some(_) }
    ));

    let orders = OrderStore::new(storage);

    assert!(orders.history()?.is_empty());
    assert!(orders.pending()?.is_none());

    Ok(())
}

#[test]
fn toggle_round_trip_survives_reload() -> TestResult {
    let dir = TempDir::new()?;
    let storage = storage(&dir)?;

    let mut cart = CartManager::load(storage.clone())?;
    cart.add(game_b())?;

    assert_eq!(cart.toggle(game_a())?, Toggled::Added);
    assert!(CartManager::load(storage.clone())?.is_in_cart(1));

    assert_eq!(cart.toggle(game_a())?, Toggled::Removed);

    let reloaded = CartManager::load(storage)?;

    assert_eq!(reloaded.items(), &[game_b()]);

    Ok(())
}

#[test]
fn boleto_is_reproducible() -> TestResult {
    let request = BoletoRequest {
        amount: dec!(35.50),
        order_id: "ORDER-1718000000123",
        customer_name: "Maria Silva",
        customer_tax_id: "123.456.789-01",
        issued_on: Date::new(2024, 6, 10)?,
    };

    let first = generate_boleto(&request)?;
    let second = generate_boleto(&request)?;

    assert_eq!(first, second);
    assert_eq!(first.barcode.len(), 44);
    assert_eq!(first.barcode.get(..4), Some("0019"));
    assert_eq!(first.barcode.get(9..19), Some("0000003550"));
    assert_eq!(first.due_date_display(), "13/06/2024");

    Ok(())
}
