use super::*;

/// Fetcher failing as the proxy would on a non-2xx response.
struct FailingFetcher;

#[async_trait::async_trait]
impl EntitlementFetcher for FailingFetcher {
    async fn list_entitlements(
        &self,
        _legacy_only: bool,
    ) -> Result<ListEntitlementsResponse, AppError> {
        Err(SyncError::UnexpectedStatus(503).into())
    }
}

/// Fetcher that never answers within a test's timeout.
struct StalledFetcher;

#[async_trait::async_trait]
impl EntitlementFetcher for StalledFetcher {
    async fn list_entitlements(
        &self,
        _legacy_only: bool,
    ) -> Result<ListEntitlementsResponse, AppError> {
        tokio::time::sleep(StdDuration::from_secs(60)).await;
        Err(SyncError::UnexpectedStatus(504).into())
    }
}

/// Tests that a failed fetch leaves persisted state untouched.
///
/// Expected: Err(UnexpectedStatus) with every existing record kept
#[tokio::test]
async fn fetch_failure_has_no_side_effects() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 111111111, &sku).await?;
    factory::helpers::create_patreon_grant(db, 111111111, sku.id).await?;
    let settings = settings(&[(10, sku.id)]);

    let result = Reconciler::new(db, &FailingFetcher, &settings)
        .run_at(now())
        .await;

    assert!(matches!(
        result,
        Err(AppError::SyncErr(SyncError::UnexpectedStatus(503)))
    ));
    assert_eq!(LegacyPremiumEntitlement::find().count(db).await?, 1);
    assert_eq!(Entitlement::find().count(db).await?, 1);

    Ok(())
}

/// Tests that a run exceeding the execution timeout is aborted.
///
/// Expected: Err(Timeout) carrying the configured timeout
#[tokio::test]
async fn run_past_execution_timeout_is_aborted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let mut settings = settings(&[]);
    settings.execution_timeout = StdDuration::from_millis(50);

    let result = Reconciler::new(db, &StalledFetcher, &settings).run().await;

    match result {
        Err(AppError::SyncErr(SyncError::Timeout(timeout))) => {
            assert_eq!(timeout, StdDuration::from_millis(50))
        }
        other => panic!("expected timeout, got {other:?}"),
    }

    Ok(())
}
