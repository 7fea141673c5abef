use super::*;

/// Tests reading the limit of a server-limited SKU.
///
/// Expected: Ok(Some(limit))
#[tokio::test]
async fn returns_limit_for_limited_sku() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "whitelabel", Some(2)).await?;

    let repo = SkuRepository::new(db);

    assert_eq!(repo.get_permitted_server_count(sku.id).await?, Some(2));
    assert_eq!(
        repo.find_by_id(sku.id).await?.map(|sku| sku.label),
        Some(SkuLabel::Whitelabel)
    );

    Ok(())
}

/// Tests reading the limit of an unlimited SKU.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unlimited_sku() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku_with_limit(db, "premium", None).await?;

    let repo = SkuRepository::new(db);

    assert_eq!(repo.get_permitted_server_count(sku.id).await?, None);

    Ok(())
}

/// Tests reading the limit of a SKU that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_sku() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = SkuRepository::new(db);

    assert_eq!(
        repo.get_permitted_server_count(uuid::Uuid::new_v4()).await?,
        None
    );

    Ok(())
}
