mod legacy_entitlement;
