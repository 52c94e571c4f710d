use crate::config::Config;
use crate::errors::{AppError, ResultExt};
use crate::form::SubmitEvent;
use crate::models::Rendered;
use crate::page::CreditPage;
use crate::payload::Payload;
use crate::predict_client::PredictClient;
use crate::render::{self, RenderOptions};
use tracing::Instrument;
use uuid::Uuid;

/// Submit handler bound to one credit form page.
///
/// Each call is independent. Concurrent submissions are neither cancelled
/// nor sequenced. Both regions are written together, so the page ends up
/// showing whichever response arrived last, never a mix of two.
#[derive(Clone)]
pub struct FormSubmitter {
    client: PredictClient,
    page: CreditPage,
    options: RenderOptions,
}

impl FormSubmitter {
    /// Creates a submitter writing into `page`.
    ///
    /// # Arguments
    ///
    /// * `client` - Client for the prediction endpoint.
    /// * `page` - Handles to the bound form and its two output regions.
    /// * `options` - Rendering switches.
    pub fn new(client: PredictClient, page: CreditPage, options: RenderOptions) -> Self {
        Self {
            client,
            page,
            options,
        }
    }

    pub fn from_config(config: &Config, page: CreditPage) -> Result<Self, AppError> {
        let client = PredictClient::from_config(config)?;
        let options = RenderOptions {
            raw_html: config.render_raw_html,
        };
        Ok(Self::new(client, page, options))
    }

    /// Handles a submit event of the bound form.
    ///
    /// The default navigation is cancelled before anything else happens. On
    /// any failure the regions are left untouched.
    ///
    /// # Arguments
    ///
    /// * `event` - The submit event. Must come from the bound form.
    ///
    /// # Returns
    ///
    /// * `Result<Rendered, AppError>` - The HTML written into both regions, or
    ///   the transport, parse or foreign-form error that stopped the submission.
    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> Result<Rendered, AppError> {
        if event.form_id() != self.page.form_id {
            return Err(AppError::BadRequest(format!(
                "submit event from form '{}', handler is bound to '{}'",
                event.form_id(),
                self.page.form_id
            )));
        }
        event.prevent_default();

        let submission_id = Uuid::new_v4();
        let payload = Payload::from_fields(event.fields());
        let span = tracing::info_span!(
            "submission",
            id = %submission_id,
            form = %self.page.form_id
        );

        async move {
            tracing::debug!("Coerced {} fields", payload.len());

            let result = self
                .client
                .predict(&payload)
                .await
                .with_context(|| format!("submission {}", submission_id))
                .inspect_err(|e| tracing::error!("Submission failed: {}", e))?;

            let rendered = render::render(&result, self.options);
            self.page.commit(&rendered);

            tracing::info!("Rendered score {}", result.credit_score);
            Ok(rendered)
        }
        .instrument(span)
        .await
    }
}
