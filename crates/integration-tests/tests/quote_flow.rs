//! End-to-end tests of the quote submission flow against mock backends:
//! catalog fetch, cart, form gating, generation, presentation, dispatch.

use std::sync::Arc;

use toolquote_core::{Email, QuotationType};

use toolquote_client::cart::CartStore;
use toolquote_client::catalog::CatalogClient;
use toolquote_client::notify::BufferNotifier;
use toolquote_client::quote::{
    FlowState, QuoteClient, QuoteForm, SendOutcome, SubmissionFlow, SubmitOutcome,
};
use toolquote_client::storage::MemoryStore;

use toolquote_integration_tests::{sample_catalog, MockCatalog, MockQuoteBackend, FAKE_PDF};

fn ready_form() -> QuoteForm {
    let mut form = QuoteForm::new();
    form.set_name("Ana Torres");
    form.set_phone("5512345678");
    form.set_email("ana@example.com");
    form.set_quotation_type(QuotationType::Purchase);
    form.set_consent(true);
    form
}

fn recipients() -> Vec<Email> {
    vec![Email::parse("sales@example.com").expect("recipient")]
}

async fn carted_products(feed: &MockCatalog) -> CartStore {
    let client = CatalogClient::new(feed.url.clone());
    let products = client.fetch_all().await.expect("fetch catalog");

    let mut cart = CartStore::open(Arc::new(MemoryStore::new()), Arc::new(BufferNotifier::new()));
    cart.add_or_increment(&products[0], 2).expect("add first");
    cart.add_or_increment(&products[2], 1).expect("add second");
    cart
}

#[tokio::test]
async fn test_submit_presents_generated_document() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let cart = carted_products(&feed).await;

    let notifier = Arc::new(BufferNotifier::new());
    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        notifier,
        recipients(),
    );

    let outcome = flow.submit(&cart, &ready_form()).await;
    assert_eq!(outcome, SubmitOutcome::Presented);
    assert_eq!(flow.state(), FlowState::Presented);

    let document = flow.document().expect("document presented");
    assert_eq!(document.bytes, FAKE_PDF);
    assert_eq!(document.recipients.len(), 1);

    // The wire request carried the cart and the form
    let request = backend.last_request().expect("request captured");
    assert_eq!(request["customerName"], "Ana Torres");
    assert_eq!(request["customerPhone"], "+52 5512345678");
    assert_eq!(request["quotationType"], "purchase");
    assert_eq!(request["items"].as_array().expect("items").len(), 2);
    assert_eq!(request["items"][0]["quantity"], 2);
    assert_eq!(request["items"][0]["brand"], "Makita");
    assert_eq!(request["items"][0]["purpose"], "Drilling");
    assert_eq!(request["items"][1]["brand"], "Makita");
    assert_eq!(request["items"][1]["purpose"], "Cutting");
}

#[tokio::test]
async fn test_repeat_submit_while_presented_is_ignored() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let cart = carted_products(&feed).await;

    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        Arc::new(BufferNotifier::new()),
        recipients(),
    );

    assert_eq!(flow.submit(&cart, &ready_form()).await, SubmitOutcome::Presented);
    assert_eq!(flow.submit(&cart, &ready_form()).await, SubmitOutcome::Ignored);
}

#[tokio::test]
async fn test_confirm_send_clears_cart_and_returns_to_idle() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let mut cart = carted_products(&feed).await;

    let notifier = Arc::new(BufferNotifier::new());
    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        notifier.clone(),
        recipients(),
    );

    flow.submit(&cart, &ready_form()).await;
    let outcome = flow.confirm_send(&mut cart).await;

    assert_eq!(outcome, SendOutcome::Sent);
    assert_eq!(flow.state(), FlowState::Idle);
    assert!(flow.document().is_none());
    assert!(cart.is_empty());
    assert_eq!(backend.send_count(), 1);
    assert!(notifier.messages().contains(&"Quote sent".to_owned()));
}

#[tokio::test]
async fn test_dispatch_failure_keeps_document_and_cart() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let mut cart = carted_products(&feed).await;

    let notifier = Arc::new(BufferNotifier::new());
    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        notifier.clone(),
        recipients(),
    );

    flow.submit(&cart, &ready_form()).await;
    backend.set_fail_send(true);

    let outcome = flow.confirm_send(&mut cart).await;
    assert_eq!(outcome, SendOutcome::Failed);

    // Still presented: the user can retry or download
    assert_eq!(flow.state(), FlowState::Presented);
    assert!(flow.document().is_some());
    assert!(!cart.is_empty());
    assert_eq!(backend.send_count(), 0);
    assert!(notifier
        .messages()
        .iter()
        .any(|m| m.contains("download")));

    // Retry after the backend recovers
    backend.set_fail_send(false);
    assert_eq!(flow.confirm_send(&mut cart).await, SendOutcome::Sent);
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_generation_failure_returns_to_idle_and_allows_retry() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let cart = carted_products(&feed).await;

    backend.set_fail_generate(true);
    let notifier = Arc::new(BufferNotifier::new());
    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        notifier.clone(),
        recipients(),
    );

    let outcome = flow.submit(&cart, &ready_form()).await;
    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(flow.state(), FlowState::Idle);
    assert!(!notifier.is_empty());

    backend.set_fail_generate(false);
    assert_eq!(flow.submit(&cart, &ready_form()).await, SubmitOutcome::Presented);
}

#[tokio::test]
async fn test_dismiss_drops_document_and_keeps_cart() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let cart = carted_products(&feed).await;

    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        Arc::new(BufferNotifier::new()),
        recipients(),
    );

    flow.submit(&cart, &ready_form()).await;
    flow.dismiss();

    assert_eq!(flow.state(), FlowState::Idle);
    assert!(flow.document().is_none());
    assert!(!cart.is_empty());
    assert_eq!(backend.send_count(), 0);
}

#[tokio::test]
async fn test_dismiss_after_dispatch_failure_releases_the_flow() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let mut cart = carted_products(&feed).await;

    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        Arc::new(BufferNotifier::new()),
        recipients(),
    );

    flow.submit(&cart, &ready_form()).await;
    backend.set_fail_send(true);
    assert_eq!(flow.confirm_send(&mut cart).await, SendOutcome::Failed);

    // Giving up instead of retrying drops the document and unblocks a new
    // submission
    flow.dismiss();
    assert_eq!(flow.state(), FlowState::Idle);
    assert!(flow.document().is_none());
    assert!(!cart.is_empty());

    assert_eq!(flow.submit(&cart, &ready_form()).await, SubmitOutcome::Presented);
}

#[tokio::test]
async fn test_maintenance_service_description_reaches_backend() {
    let feed = MockCatalog::spawn(sample_catalog()).await;
    let backend = MockQuoteBackend::spawn().await;
    let cart = carted_products(&feed).await;

    let mut form = ready_form();
    form.set_quotation_type(QuotationType::MaintenanceService);
    // Changing the type re-gates the form
    assert!(!form.submit_enabled());
    form.set_service_description("Calibrate both drills and replace worn chucks");
    form.set_consent(true);

    let mut flow = SubmissionFlow::new(
        QuoteClient::new(backend.url.clone()),
        Arc::new(BufferNotifier::new()),
        recipients(),
    );
    assert_eq!(flow.submit(&cart, &form).await, SubmitOutcome::Presented);

    let request = backend.last_request().expect("request captured");
    assert_eq!(request["quotationType"], "maintenance_service");
    assert_eq!(
        request["serviceDescription"],
        "Calibrate both drills and replace worn chucks"
    );
}
