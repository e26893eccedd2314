//! Quote submission command.
//!
//! Mirrors the storefront's flow end to end: fill the form, check the gates,
//! generate the document, then either dispatch it or save it locally.

use std::path::PathBuf;
use std::sync::Arc;

use toolquote_core::{CountryCode, QuotationType};

use toolquote_client::config::ClientConfig;
use toolquote_client::notify::TracingNotifier;
use toolquote_client::quote::{
    QuoteClient, QuoteDocument, QuoteForm, SendOutcome, SubmissionFlow, SubmitOutcome,
};

use super::{open_cart, CommandError};

/// Arguments for `quote submit`.
pub struct SubmitArgs {
    /// Customer name.
    pub name: String,
    /// National phone number.
    pub phone: String,
    /// International calling code.
    pub code: String,
    /// Optional customer email.
    pub email: Option<String>,
    /// Quotation type identifier.
    pub quotation_type: String,
    /// Optional service description.
    pub description: Option<String>,
    /// Whether the user agreed to the data-use terms.
    pub consent: bool,
    /// Dispatch the quote after generating it.
    pub send: bool,
    /// Save the generated document here.
    pub output: Option<PathBuf>,
}

/// Fill the form, run the submission flow, and dispatch or save the result.
pub async fn submit(args: SubmitArgs) -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let mut cart = open_cart(&config)?;

    let form = build_form(&args)?;
    if !form.submit_enabled() {
        report_gate(&form);
        return Err(CommandError::InvalidArgument(
            "the form does not validate".to_owned(),
        ));
    }

    let client = QuoteClient::new(config.quote_url);
    let notifier = Arc::new(TracingNotifier);
    let mut flow = SubmissionFlow::new(client, notifier, config.recipients);

    match flow.submit(&cart, &form).await {
        SubmitOutcome::Presented => {}
        outcome => {
            return Err(CommandError::InvalidArgument(format!(
                "submission did not produce a document ({outcome:?})"
            )));
        }
    }

    if let Some(path) = &args.output
        && let Some(document) = flow.document()
    {
        document.save_to(path).map_err(toolquote_client::AppError::from)?;
        tracing::info!("Document saved to {}", path.display());
    }

    if args.send {
        match flow.confirm_send(&mut cart).await {
            SendOutcome::Sent => tracing::info!("Quote sent, cart cleared"),
            SendOutcome::Failed => {
                // The document is still presented; save it so nothing is lost
                if args.output.is_none()
                    && let Some(document) = flow.document()
                {
                    let path = PathBuf::from(QuoteDocument::DEFAULT_FILENAME);
                    document.save_to(&path).map_err(toolquote_client::AppError::from)?;
                    tracing::info!("Dispatch failed; document saved to {}", path.display());
                }
                flow.dismiss();
            }
            SendOutcome::Ignored => {}
        }
    } else {
        if args.output.is_none()
            && let Some(document) = flow.document()
        {
            let path = PathBuf::from(QuoteDocument::DEFAULT_FILENAME);
            document.save_to(&path).map_err(toolquote_client::AppError::from)?;
            tracing::info!("Document saved to {}", path.display());
        }
        flow.dismiss();
    }

    Ok(())
}

fn build_form(args: &SubmitArgs) -> Result<QuoteForm, CommandError> {
    let code = CountryCode::parse(&args.code)
        .map_err(|e| CommandError::InvalidArgument(e.to_string()))?;
    let quotation_type: QuotationType = args
        .quotation_type
        .parse()
        .map_err(|e: toolquote_core::UnknownQuotationType| {
            CommandError::InvalidArgument(e.to_string())
        })?;

    let mut form = QuoteForm::new();
    form.set_name(&args.name);
    form.set_country_code(code);
    form.set_phone(&args.phone);
    if let Some(email) = &args.email {
        form.set_email(email);
    }
    form.set_quotation_type(quotation_type);
    if let Some(description) = &args.description {
        form.set_service_description(description);
    }
    form.set_consent(args.consent);
    Ok(form)
}

/// Log why the submit gate is closed.
fn report_gate(form: &QuoteForm) {
    let report = form.validate();
    for problem in [
        &report.name,
        &report.phone,
        &report.email,
        &report.quotation_type,
        &report.service_description,
    ]
    .into_iter()
    .flatten()
    {
        tracing::warn!("{problem}");
    }
    if report.is_clean() && !form.consent() {
        tracing::warn!("Pass --consent to agree to the data-use terms");
    }
}
