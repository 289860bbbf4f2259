#![no_main]
use connection_status::auth::Privilege;
use connection_status::PrivilegeConsolidator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(grants) = serde_json::from_slice::<Vec<Privilege>>(data) else {
        return;
    };

    let consolidated = PrivilegeConsolidator::merge(grants.clone());
    for grant in &grants {
        let merged = consolidated
            .get(grant.resource())
            .expect("every granted resource survives consolidation");
        assert!(merged.contains_all(grant.actions()));
    }

    // Reply documents parse back into the same privileges
    let json = serde_json::to_string(&consolidated).unwrap();
    let reparsed: Vec<Privilege> = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, consolidated.into_vec());
});
