use super::*;

fn param(user_id: u64, sku_id: uuid::Uuid, label: &str) -> UpsertLegacyEntitlementParam {
    UpsertLegacyEntitlementParam {
        user_id,
        tier_id: 1,
        sku_label: SkuLabel::from(label),
        sku_id,
        is_legacy: true,
        expires_at: Utc::now().duration_trunc(Duration::seconds(1)).unwrap() + Duration::days(30),
    }
}

/// Tests creating a legacy entitlement for a user without one.
///
/// Verifies that the repository inserts a new row keyed by the user ID and returns the stored
/// values as a domain model.
///
/// Expected: Ok with new row created
#[tokio::test]
async fn creates_new_entitlement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    let param = param(123456789, sku.id, "premium");
    let expires_at = param.expires_at;

    let repo = LegacyEntitlementRepository::new(db);
    let result = repo.upsert(param).await;

    assert!(result.is_ok());
    let legacy = result.unwrap();
    assert_eq!(legacy.user_id, 123456789);
    assert_eq!(legacy.sku_label, SkuLabel::Premium);
    assert_eq!(legacy.expires_at, expires_at);

    let stored = entity::prelude::LegacyPremiumEntitlement::find_by_id("123456789".to_string())
        .one(db)
        .await?;
    assert!(stored.is_some());

    Ok(())
}

/// Tests replacing an existing legacy entitlement.
///
/// Verifies that upserting for a user who already has a row updates every column in place
/// rather than adding a second row.
///
/// Expected: Ok with one row carrying the new values
#[tokio::test]
async fn replaces_existing_entitlement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let premium = factory::create_sku_with_limit(db, "premium", None).await?;
    let whitelabel = factory::create_sku_with_limit(db, "whitelabel", Some(2)).await?;
    factory::create_legacy_entitlement(db, 123456789, &premium).await?;

    let mut update = param(123456789, whitelabel.id, "whitelabel");
    update.tier_id = 3;
    update.is_legacy = false;

    let repo = LegacyEntitlementRepository::new(db);
    let legacy = repo.upsert(update).await?;

    assert_eq!(legacy.tier_id, 3);
    assert_eq!(legacy.sku_id, whitelabel.id);
    assert_eq!(legacy.sku_label, SkuLabel::Whitelabel);
    assert!(!legacy.is_legacy);

    let count = entity::prelude::LegacyPremiumEntitlement::find()
        .count(db)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

/// Tests that the upserted row is readable through find_by_user_id.
///
/// Expected: Ok with the same values returned by both calls
#[tokio::test]
async fn upserted_entitlement_is_found_by_user_id() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;

    let repo = LegacyEntitlementRepository::new(db);
    let upserted = repo.upsert(param(42, sku.id, "premium")).await?;
    let found = repo.find_by_user_id(42).await?;

    assert_eq!(found, Some(upserted));
    assert!(repo.find_by_user_id(43).await?.is_none());

    Ok(())
}
