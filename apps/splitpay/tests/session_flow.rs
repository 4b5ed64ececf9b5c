//! End-to-end session flows over an in-memory provider.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use splitpay_app::commands::refresh_rates;
use splitpay_app::error::{ErrorCode, RATES_UNAVAILABLE_MESSAGE};
use splitpay_app::export::{ExportOutcome, MemoryClipboard, UnsupportedShare};
use splitpay_app::provider::{ProviderResult, RateProvider, RateSnapshot, StaticRateProvider};
use splitpay_app::state::RatesState;
use splitpay_app::{AppConfig, SplitSession};

fn snapshot() -> RateSnapshot {
    RateSnapshot::new(
        "USD",
        BTreeMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.5),
            ("GBP".to_string(), 0.8),
            ("NGN".to_string(), 1600.0),
        ]),
    )
    .with_currencies([
        ("USD", "United States Dollar"),
        ("EUR", "Euro"),
        ("GBP", "Pound Sterling"),
        ("NGN", "Nigerian Naira"),
    ])
}

fn session() -> (SplitSession, Arc<StaticRateProvider>) {
    let provider = Arc::new(StaticRateProvider::new(snapshot()));
    let session = SplitSession::new(AppConfig::default(), provider.clone());
    (session, provider)
}

/// Serves the snapshot after a per-base delay: EUR is slow, GBP is fast.
struct SlowRateProvider {
    snapshot: RateSnapshot,
}

#[async_trait]
impl RateProvider for SlowRateProvider {
    async fn fetch_rates(&self, base: &str) -> ProviderResult<BTreeMap<String, f64>> {
        let delay = match base {
            "EUR" => 50,
            "GBP" => 5,
            _ => 0,
        };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.snapshot.rates_for(base)
    }

    async fn fetch_currencies(&self) -> ProviderResult<Vec<(String, String)>> {
        Ok(self.snapshot.currencies.clone())
    }
}

fn name_everyone(session: &SplitSession, names: &[&str]) {
    let ids: Vec<String> = session
        .roster()
        .participants
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    for (id, name) in ids.iter().zip(names) {
        session.rename_participant(id, *name).unwrap();
    }
}

#[tokio::test]
async fn startup_loads_rates_and_names() {
    let (session, _) = session();

    let status = session.startup().await.unwrap();

    assert_eq!(status.base_currency, "USD");
    assert_eq!(status.currency_count, 4);
    assert!(status.last_error.is_none());

    let currencies: Vec<String> = session
        .roster()
        .participants
        .iter()
        .map(|p| p.currency.clone())
        .collect();
    assert_eq!(currencies, ["NGN", "USD", "GBP"]);
}

#[tokio::test]
async fn full_split_and_export() {
    let (session, _) = session();
    session.startup().await.unwrap();
    name_everyone(&session, &["Ada", "Bayo", "Cy"]);
    session.set_total_amount("300");

    let response = session.calculate().unwrap();

    assert_eq!(response.headline, "Split 3 ways = $100.00 each");
    let amounts: Vec<String> = response
        .result
        .people
        .iter()
        .map(|p| p.display_amount())
        .collect();
    assert_eq!(amounts, ["₦160000.00", "$100.00", "£80.00"]);

    let clipboard = MemoryClipboard::new();
    let outcome = session
        .share_results(&UnsupportedShare, &clipboard)
        .unwrap();
    assert_eq!(outcome, ExportOutcome::Copied);
    assert_eq!(
        clipboard.contents().as_deref(),
        Some(
            "Bill Split Results:\nTotal: $300\nSplit 3 ways:\n\n\
             Ada: ₦160000.00\nBayo: $100.00\nCy: £80.00"
        )
    );
}

#[tokio::test]
async fn changing_base_rebases_rates() {
    let (session, _) = session();
    session.startup().await.unwrap();
    name_everyone(&session, &["Ada", "Bayo", "Cy"]);

    let status = session.set_base_currency("EUR").await.unwrap();
    assert_eq!(status.base_currency, "EUR");

    session.set_total_amount("30");
    let result = session.calculate().unwrap().result;

    assert_eq!(result.base_symbol, "€");
    assert_eq!(result.amount_per_person, 10.0);
    assert_eq!(result.people[0].amount, 32000.0);
    assert_eq!(result.people[1].amount, 20.0);
}

#[tokio::test]
async fn failed_refresh_keeps_working_table() {
    let (session, provider) = session();
    session.startup().await.unwrap();
    name_everyone(&session, &["Ada", "Bayo", "Cy"]);

    provider.set_failing(true);
    let err = session.refresh_rates().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::RatesUnavailable);
    assert_eq!(
        session.rates_status().last_error.as_deref(),
        Some(RATES_UNAVAILABLE_MESSAGE)
    );

    session.set_total_amount("300");
    let result = session.calculate().unwrap().result;
    assert_eq!(result.people[0].amount, 160000.0);
}

#[tokio::test]
async fn startup_without_rates_still_splits() {
    let (session, provider) = session();
    provider.set_failing(true);

    assert!(session.startup().await.is_err());

    name_everyone(&session, &["Ada", "Bayo", "Cy"]);
    session.set_total_amount("90");
    let result = session.calculate().unwrap().result;

    assert!(result.people.iter().all(|p| p.amount == 30.0));
    assert_eq!(result.people[0].display_amount(), "₦30.00");
}

#[tokio::test]
async fn form_errors_keep_previous_result() {
    let (session, _) = session();
    session.startup().await.unwrap();
    name_everyone(&session, &["Ada", "Bayo", "Cy"]);
    session.set_total_amount("300");
    let first = session.calculate().unwrap().result;

    let roster = session.add_participant(None).unwrap();
    let id = roster.participants[3].id.to_string();
    let err = session.calculate().unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingName);
    assert_eq!(err.message, "Please enter names for all people");
    assert_eq!(session.bill().result, Some(first));

    session.remove_participant(&id).unwrap();
    session.set_total_amount("abc");
    let err = session.calculate().unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidAmount);
}

#[tokio::test]
async fn rates_and_names_refresh_side_by_side() {
    let (session, _) = session();

    let (a, b) = tokio::join!(session.refresh_rates(), session.refresh_currency_metadata());
    a.unwrap();
    b.unwrap();

    let status = session.rates_status();
    assert!(!status.refreshing);
    assert_eq!(status.rate_count, 4);
}

#[tokio::test]
async fn overlapping_refreshes_last_finisher_wins() {
    let rates = RatesState::default();
    let provider = SlowRateProvider {
        snapshot: snapshot(),
    };

    let (eur, gbp, mid_flight) = tokio::join!(
        refresh_rates(&rates, &provider, "EUR"),
        async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            refresh_rates(&rates, &provider, "GBP").await
        },
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            (rates.is_refreshing(), rates.status().base_currency)
        }
    );
    eur.unwrap();
    gbp.unwrap();

    // GBP has landed while EUR is still being fetched.
    assert_eq!(mid_flight, (true, "GBP".to_string()));

    let status = rates.status();
    assert_eq!(status.base_currency, "EUR");
    assert!(!status.refreshing);
    assert!(status.last_error.is_none());
    assert_eq!(rates.with_cache(|c| c.rate("GBP")), Some(1.6));
}
