use super::*;

/// Tests deleting a user's legacy entitlement by user and label.
///
/// Expected: Ok with one row deleted
#[tokio::test]
async fn deletes_matching_entitlement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 123456789, &sku).await?;

    let repo = LegacyEntitlementRepository::new(db);
    let deleted = repo.delete(123456789, &SkuLabel::Premium).await?;

    assert_eq!(deleted, 1);
    assert!(repo.find_by_user_id(123456789).await?.is_none());

    Ok(())
}

/// Tests that a label mismatch leaves the row in place.
///
/// Verifies that a row upgraded to a different SKU since it was listed is not deleted.
///
/// Expected: Ok with zero rows deleted
#[tokio::test]
async fn keeps_entitlement_with_different_label() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 123456789, &sku).await?;

    let repo = LegacyEntitlementRepository::new(db);
    let deleted = repo.delete(123456789, &SkuLabel::Whitelabel).await?;

    assert_eq!(deleted, 0);
    assert!(repo.find_by_user_id(123456789).await?.is_some());

    Ok(())
}

/// Tests that only the given user's row is deleted.
///
/// Expected: Ok with other users' rows untouched
#[tokio::test]
async fn does_not_delete_other_users() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;
    factory::create_legacy_entitlement(db, 111111111, &sku).await?;
    factory::create_legacy_entitlement(db, 222222222, &sku).await?;

    let repo = LegacyEntitlementRepository::new(db);
    repo.delete(111111111, &SkuLabel::Premium).await?;

    let remaining = entity::prelude::LegacyPremiumEntitlement::find()
        .count(db)
        .await?;
    assert_eq!(remaining, 1);
    assert!(repo.find_by_user_id(222222222).await?.is_some());

    Ok(())
}
