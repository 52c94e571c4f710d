//! Submits one credit form from the command line and prints both rendered regions.
//!
//! Usage: `submit_form age=30 cash_inflow=45000 bnpl_used=false ...`

use credit_form::config::Config;
use credit_form::form::{FormFields, SubmitEvent};
use credit_form::page::{CreditPage, FORM_ID};
use credit_form::submitter::FormSubmitter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credit_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let fields = FormFields::from_assignments(std::env::args().skip(1))?;
    if fields.is_empty() {
        anyhow::bail!("usage: submit_form name=value [name=value ...]");
    }

    let page = CreditPage::in_memory();
    let submitter = FormSubmitter::from_config(&config, page.clone())?;

    let mut event = SubmitEvent::new(FORM_ID, fields);
    submitter.handle_submit(&mut event).await?;

    println!("{}", page.result.inner_html());
    println!("{}", page.suggestions.inner_html());

    Ok(())
}
