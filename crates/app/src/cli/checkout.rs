use std::io;

use clap::{Args, ValueEnum};
use iara::{
    checkout::{CardDetails, CheckoutError, CheckoutForm, CheckoutOutcome},
    masks::{format_card_expiry, format_card_number, format_cpf, format_phone},
    orders::{Order, PaymentMethod},
    payments::PaymentArtifact,
    receipt::write_order,
};
use iara_app::context::{AppCheckout, AppContext};
use jiff::tz::TimeZone;

use super::describe;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Card,
    Pix,
    Boleto,
}

impl From<Method> for PaymentMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Card => Self::Card,
            Method::Pix => Self::Pix,
            Method::Boleto => Self::Boleto,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Buyer's full name
    #[arg(long)]
    name: String,

    /// CPF, digits or formatted
    #[arg(long)]
    cpf: String,

    /// Phone with area code, digits or formatted
    #[arg(long)]
    phone: String,

    /// Payment method
    #[arg(long, value_enum, default_value_t = Method::Card)]
    method: Method,

    /// Card number
    #[arg(long)]
    card_number: Option<String>,

    /// Name printed on the card
    #[arg(long)]
    card_holder: Option<String>,

    /// Card expiry, MM/YY or MMYY
    #[arg(long)]
    card_expiry: Option<String>,

    /// Card security code
    #[arg(long)]
    card_cvv: Option<String>,
}

impl CheckoutArgs {
    fn card(&self) -> Option<CardDetails> {
        if self.card_number.is_none()
            && self.card_holder.is_none()
            && self.card_expiry.is_none()
            && self.card_cvv.is_none()
        {
            return None;
        }

        Some(CardDetails {
            number: format_card_number(self.card_number.as_deref().unwrap_or_default()),
            holder_name: self
                .card_holder
                .as_deref()
                .unwrap_or_default()
                .to_uppercase(),
            expiry: format_card_expiry(self.card_expiry.as_deref().unwrap_or_default()),
            cvv: self.card_cvv.clone().unwrap_or_default(),
        })
    }

    fn form(&self) -> CheckoutForm {
        CheckoutForm {
            name: self.name.clone(),
            tax_id: format_cpf(&self.cpf),
            phone: format_phone(&self.phone),
            payment_method: self.method.into(),
            card: self.card(),
        }
    }
}

pub(crate) async fn run(context: &AppContext, args: CheckoutArgs) -> Result<(), String> {
    let mut cart = context
        .cart()
        .map_err(|error| format!("failed to load cart: {}", describe(&error)))?;

    let mut checkout = context.checkout();

    if matches!(args.method, Method::Card) {
        println!("processing card payment...");
    }

    let outcome = checkout
        .submit(&mut cart, &args.form())
        .await
        .map_err(|error| match error {
            CheckoutError::Validation(errors) => format!("please fix the form: {errors}"),
            error => format!("checkout failed: {}", describe(&error)),
        })?;

    print_order(outcome.order())?;

    match outcome {
        CheckoutOutcome::Completed(_) => println!("payment approved, thank you!"),
        CheckoutOutcome::AwaitingPayment(order) => {
            print_artifact(&checkout, &order)?;
            println!();
            println!("run `iara-app orders confirm` once you have paid");
        }
    }

    Ok(())
}

pub(super) fn print_order(order: &Order) -> Result<(), String> {
    write_order(io::stdout().lock(), order, &TimeZone::system())
        .map_err(|error| format!("failed to print order: {error}"))
}

pub(super) fn print_artifact(checkout: &AppCheckout, order: &Order) -> Result<(), String> {
    let artifact = checkout
        .payment_artifact(order)
        .map_err(|error| format!("failed to generate payment details: {}", describe(&error)))?;

    match artifact {
        None => println!("order {} needs no further payment", order.id),
        Some(PaymentArtifact::Pix(pix)) => {
            println!();
            println!("PIX");
            println!("  key:        {}", pix.pix_key);
            println!("  value:      {}", pix.value);
            println!("  expires in: {} minutes", pix.expires_in_minutes);
            println!("  copy/paste: {}", pix.payload);
            println!("  qr code:    {}", pix.qr_code);
        }
        Some(PaymentArtifact::Boleto(boleto)) => {
            println!();
            println!("Boleto");
            println!("  recipient:      {} ({})", boleto.recipient, boleto.cnpj);
            println!("  payer:          {} ({})", boleto.customer_name, boleto.customer_tax_id);
            println!("  value:          {}", boleto.value);
            println!("  due date:       {}", boleto.due_date_display());
            println!("  digitable line: {}", boleto.digitable_line);
            println!("  barcode:        {}", boleto.barcode);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(method: Method) -> CheckoutArgs {
        CheckoutArgs {
            name: "Maria Silva".to_string(),
            cpf: "12345678901".to_string(),
            phone: "11987654321".to_string(),
            method,
            card_number: None,
            card_holder: None,
            card_expiry: None,
            card_cvv: None,
        }
    }

    #[test]
    fn raw_digits_are_masked() {
        let form = args(Method::Pix).form();

        assert_eq!(form.tax_id, "123.456.789-01");
        assert_eq!(form.phone, "(11) 98765-4321");
        assert_eq!(form.payment_method, PaymentMethod::Pix);
        assert_eq!(form.card, None);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn card_flags_are_masked() {
        let form = CheckoutArgs {
            card_number: Some("4111111111111111".to_string()),
            card_holder: Some("maria silva".to_string()),
            card_expiry: Some("1229".to_string()),
            card_cvv: Some("123".to_string()),
            ..args(Method::Card)
        }
        .form();

        assert_eq!(
            form.card,
            Some(CardDetails {
                number: "4111 1111 1111 1111".to_string(),
                holder_name: "MARIA SILVA".to_string(),
                expiry: "12/29".to_string(),
                cvv: "123".to_string(),
            })
        );
        assert_eq!(form.validate(), Ok(()));
    }
}
