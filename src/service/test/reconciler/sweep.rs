use super::*;

/// Tests that a user absent from the snapshot loses their records.
///
/// Expected: Ok with the absent user's legacy record and grant removed and the present user's
/// kept
#[tokio::test]
async fn removes_user_absent_from_snapshot() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = now();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 111111111, &sku).await?;
    factory::helpers::create_patreon_grant(db, 111111111, sku.id).await?;
    factory::create_legacy_entitlement(db, 222222222, &sku).await?;
    factory::helpers::create_patreon_grant(db, 222222222, sku.id).await?;

    let fetcher = fetcher(
        now,
        vec![(
            222222222,
            vec![source(1, "premium", 10, true, now + Duration::days(30))],
        )],
    );
    let settings = settings(&[(10, sku.id)]);

    let summary = Reconciler::new(db, &fetcher, &settings).run_at(now).await?;

    assert!(summary.removals_allowed);
    assert_eq!(summary.removed, 1);

    let legacy_repo = LegacyEntitlementRepository::new(db);
    assert!(legacy_repo.find_by_user_id(111111111).await?.is_none());
    assert!(legacy_repo.find_by_user_id(222222222).await?.is_some());
    assert_eq!(Entitlement::find().count(db).await?, 1);
    assert_eq!(PatreonEntitlement::find().count(db).await?, 1);

    Ok(())
}

/// Tests that a user whose only entitlement expired past the grace period is removed.
///
/// Expected: Ok with the legacy record and its guild grants removed
#[tokio::test]
async fn removes_user_with_expired_entitlement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = now();

    let sku = factory::create_sku_with_limit(db, "whitelabel", Some(3)).await?;
    factory::create_legacy_entitlement(db, 111111111, &sku).await?;
    factory::helpers::create_guild_grants(db, 111111111, sku.id, &[100, 200]).await?;

    let fetcher = fetcher(
        now,
        vec![(
            111111111,
            vec![source(2, "whitelabel", 20, false, now - Duration::days(8))],
        )],
    );
    let settings = settings(&[(20, sku.id)]);

    let summary = Reconciler::new(db, &fetcher, &settings).run_at(now).await?;

    assert_eq!(summary.expired, 1);
    assert_eq!(summary.removed, 1);
    assert_eq!(LegacyPremiumEntitlement::find().count(db).await?, 0);
    assert_eq!(LegacyPremiumEntitlementGuild::find().count(db).await?, 0);
    assert_eq!(Entitlement::find().count(db).await?, 0);

    Ok(())
}

/// Tests that removals are skipped when fewer users than the minimum are reported.
///
/// Expected: Ok with the absent user's records kept and new users still recorded
#[tokio::test]
async fn below_minimum_threshold_removes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = now();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 999999999, &sku).await?;
    factory::helpers::create_patreon_grant(db, 999999999, sku.id).await?;

    let users = (1..=5)
        .map(|user_id| {
            (
                user_id,
                vec![source(1, "premium", 10, true, now + Duration::days(30))],
            )
        })
        .collect();
    let fetcher = fetcher(now, users);
    let mut settings = settings(&[(10, sku.id)]);
    settings.min_entitlements_threshold = 100;

    let summary = Reconciler::new(db, &fetcher, &settings).run_at(now).await?;

    assert!(!summary.removals_allowed);
    assert_eq!(summary.removed, 0);
    assert_eq!(summary.upserted, 5);
    assert!(LegacyEntitlementRepository::new(db)
        .find_by_user_id(999999999)
        .await?
        .is_some());
    assert_eq!(LegacyPremiumEntitlement::find().count(db).await?, 6);

    Ok(())
}

/// Tests that removals are skipped when the proxy has not polled recently.
///
/// Expected: Ok with the absent user's records kept
#[tokio::test]
async fn stale_snapshot_removes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = now();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 999999999, &sku).await?;

    let fetcher = StaticFetcher {
        response: ListEntitlementsResponse {
            entitlements: [(
                111111111,
                vec![source(1, "premium", 10, true, now + Duration::days(30))],
            )]
            .into_iter()
            .collect(),
            last_poll_time: now - Duration::hours(2),
        },
    };
    let settings = settings(&[(10, sku.id)]);

    let summary = Reconciler::new(db, &fetcher, &settings).run_at(now).await?;

    assert!(!summary.removals_allowed);
    assert_eq!(summary.removed, 0);
    assert_eq!(LegacyPremiumEntitlement::find().count(db).await?, 2);

    Ok(())
}

/// Tests that a sweep over the removal budget rolls back the whole run.
///
/// Expected: Err(RemovalBudgetExceeded) with neither removals nor upserts persisted
#[tokio::test]
async fn exceeding_removal_budget_rolls_back_run() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = now();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    for user_id in [111111111, 222222222, 333333333] {
        factory::create_legacy_entitlement(db, user_id, &sku).await?;
        factory::helpers::create_patreon_grant(db, user_id, sku.id).await?;
    }

    let fetcher = fetcher(
        now,
        vec![(
            444444444,
            vec![source(1, "premium", 10, true, now + Duration::days(30))],
        )],
    );
    let mut settings = settings(&[(10, sku.id)]);
    settings.max_removals_threshold = 1;

    let result = Reconciler::new(db, &fetcher, &settings).run_at(now).await;

    assert!(matches!(
        result,
        Err(AppError::SyncErr(SyncError::RemovalBudgetExceeded {
            removed: 3,
            max: 1
        }))
    ));

    let legacy_repo = LegacyEntitlementRepository::new(db);
    assert_eq!(legacy_repo.get_all().await?.len(), 3);
    assert!(legacy_repo.find_by_user_id(444444444).await?.is_none());
    assert_eq!(Entitlement::find().count(db).await?, 3);
    assert_eq!(PatreonEntitlement::find().count(db).await?, 3);

    Ok(())
}

/// Tests that removals exactly at the budget are committed.
///
/// Expected: Ok with every flagged record removed
#[tokio::test]
async fn removals_at_budget_are_committed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let now = now();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 111111111, &sku).await?;
    factory::create_legacy_entitlement(db, 222222222, &sku).await?;

    let fetcher = fetcher(now, Vec::new());
    let mut settings = settings(&[(10, sku.id)]);
    settings.max_removals_threshold = 2;

    let summary = Reconciler::new(db, &fetcher, &settings).run_at(now).await?;

    assert_eq!(summary.removed, 2);
    assert_eq!(LegacyPremiumEntitlement::find().count(db).await?, 0);

    Ok(())
}
