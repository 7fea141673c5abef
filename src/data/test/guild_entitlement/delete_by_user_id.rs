use super::*;

/// Tests deleting every grant of a user.
///
/// Expected: Ok with only the user's grants removed
#[tokio::test]
async fn deletes_grants_for_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    helpers::create_guild_grants(db, 111111111, sku.id, &[100, 200]).await?;
    helpers::create_guild_grants(db, 222222222, sku.id, &[300]).await?;

    let repo = GuildEntitlementRepository::new(db);
    let deleted = repo.delete_by_user_id(111111111).await?;

    assert_eq!(deleted, 2);
    assert!(repo.get_by_user_id(111111111).await?.is_empty());
    assert_eq!(
        entity::prelude::LegacyPremiumEntitlementGuild::find()
            .count(db)
            .await?,
        1
    );

    Ok(())
}
