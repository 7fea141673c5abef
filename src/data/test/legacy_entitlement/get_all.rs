use super::*;

/// Tests listing every legacy entitlement.
///
/// Expected: Ok with one domain model per stored row
#[tokio::test]
async fn returns_all_entitlements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    factory::create_legacy_entitlement(db, 111111111, &sku).await?;
    factory::create_legacy_entitlement(db, 222222222, &sku).await?;

    let repo = LegacyEntitlementRepository::new(db);
    let all = repo.get_all().await?;

    assert_eq!(all.len(), 2);
    assert_eq!(all[0].user_id, 111111111);
    assert_eq!(all[1].user_id, 222222222);

    Ok(())
}

/// Tests that rows with an unparseable user ID are skipped.
///
/// Verifies that a single corrupt row does not prevent the remaining rows from being listed.
///
/// Expected: Ok with only the valid row returned
#[tokio::test]
async fn skips_rows_with_invalid_user_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    factory::create_legacy_entitlement(db, 111111111, &sku).await?;

    entity::prelude::LegacyPremiumEntitlement::insert(
        entity::legacy_premium_entitlement::ActiveModel {
            user_id: ActiveValue::Set("not-a-user".to_string()),
            tier_id: ActiveValue::Set(1),
            sku_label: ActiveValue::Set(sku.label.clone()),
            sku_id: ActiveValue::Set(sku.id),
            is_legacy: ActiveValue::Set(true),
            expires_at: ActiveValue::Set(Utc::now() + Duration::days(30)),
        },
    )
    .exec(db)
    .await?;

    let repo = LegacyEntitlementRepository::new(db);
    let all = repo.get_all().await?;

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].user_id, 111111111);

    Ok(())
}

/// Tests listing when no entitlements exist.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_when_no_entitlements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = LegacyEntitlementRepository::new(db);

    assert!(repo.get_all().await?.is_empty());

    Ok(())
}
