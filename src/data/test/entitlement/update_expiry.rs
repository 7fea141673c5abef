use super::*;

/// Tests setting a new expiry on a linked entitlement.
///
/// Expected: Ok with the stored expiry replaced
#[tokio::test]
async fn updates_expiry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    let entitlement = factory::create_entitlement(db, sku.id, 123456789).await?;
    let new_expiry = Utc::now().duration_trunc(Duration::seconds(1)).unwrap() + Duration::days(60);

    let repo = EntitlementRepository::new(db);
    repo.update_expiry(entitlement.id, new_expiry).await?;

    let stored = repo.find_by_id(entitlement.id).await?.unwrap();
    assert_eq!(stored.expires_at, Some(new_expiry));
    assert_eq!(stored.created_at, entitlement.created_at);

    Ok(())
}

/// Tests that only the targeted entitlement changes.
///
/// Expected: Ok with other entitlements keeping their expiry
#[tokio::test]
async fn does_not_update_other_entitlements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    let target = factory::create_entitlement(db, sku.id, 111111111).await?;
    let other = factory::create_entitlement(db, sku.id, 222222222).await?;

    let repo = EntitlementRepository::new(db);
    repo.update_expiry(target.id, Utc::now() + Duration::days(90))
        .await?;

    let stored = entity::prelude::Entitlement::find_by_id(other.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(stored.expires_at, other.expires_at);

    Ok(())
}
