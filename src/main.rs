use billease::config::{self, Settings};
use billease::core::display::{format_currency, format_date};
use billease::core::{InvoiceSnapshot, Session};
use billease::errors::Result;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Settings and the saved collection
    let settings = Settings::load()?;
    let store = config::storage::open_store(&settings);
    let session = Session::new(store, settings.defaults.clone());
    info!("{} saved bills", session.saved().len());

    // 4. Summary of every saved bill
    for invoice in session.saved() {
        let snapshot = InvoiceSnapshot::capture(invoice);
        let due = if snapshot.payments_recorded {
            format!("  due {:>14}", format_currency(snapshot.totals.due_amount))
        } else {
            String::new()
        };
        println!(
            "{:<10} {}  {:<30} {:>16}{due}",
            invoice.invoice_number.as_deref().unwrap_or("-"),
            format_date(invoice.invoice_date),
            invoice.customer_name,
            format_currency(snapshot.totals.grand_total),
        );
        if let Some(words) = snapshot.amount_in_words {
            println!("           {words}");
        }
    }

    Ok(())
}
