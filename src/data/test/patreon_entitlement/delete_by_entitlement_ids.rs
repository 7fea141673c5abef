use super::*;

/// Tests deleting join rows by linked entitlement ID.
///
/// Expected: Ok with only the listed rows deleted
#[tokio::test]
async fn deletes_rows_for_entitlements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    let (first, _) = factory::helpers::create_patreon_grant(db, 111111111, sku.id).await?;
    let (second, _) = factory::helpers::create_patreon_grant(db, 222222222, sku.id).await?;

    let repo = PatreonEntitlementRepository::new(db);
    let deleted = repo.delete_by_entitlement_ids(&[first.id]).await?;

    assert_eq!(deleted, 1);
    assert!(repo.get_by_user_id(111111111).await?.is_empty());
    assert_eq!(
        repo.get_by_user_id(222222222).await?[0].entitlement_id,
        second.id
    );

    Ok(())
}

/// Tests that an empty ID list deletes nothing.
///
/// Expected: Ok(0)
#[tokio::test]
async fn empty_ids_delete_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    factory::helpers::create_patreon_grant(db, 111111111, sku.id).await?;

    let repo = PatreonEntitlementRepository::new(db);

    assert_eq!(repo.delete_by_entitlement_ids(&[]).await?, 0);
    assert_eq!(
        entity::prelude::PatreonEntitlement::find().count(db).await?,
        1
    );

    Ok(())
}
