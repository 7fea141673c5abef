use super::*;

/// Tests deleting linked entitlements by ID.
///
/// Expected: Ok with only the listed entitlements removed
#[tokio::test]
async fn deletes_listed_entitlements() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    let first = factory::create_entitlement(db, sku.id, 111111111).await?;
    let second = factory::create_entitlement(db, sku.id, 222222222).await?;
    let kept = factory::create_entitlement(db, sku.id, 333333333).await?;

    let repo = EntitlementRepository::new(db);
    let deleted = repo.delete_many(&[first.id, second.id]).await?;

    assert_eq!(deleted, 2);
    assert_eq!(entity::prelude::Entitlement::find().count(db).await?, 1);
    assert!(repo.find_by_id(kept.id).await?.is_some());

    Ok(())
}

/// Tests that an empty ID list deletes nothing.
///
/// Expected: Ok(0) with every entitlement kept
#[tokio::test]
async fn empty_ids_delete_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    factory::create_entitlement(db, sku.id, 111111111).await?;

    let repo = EntitlementRepository::new(db);

    assert_eq!(repo.delete_many(&[]).await?, 0);
    assert_eq!(entity::prelude::Entitlement::find().count(db).await?, 1);

    Ok(())
}
