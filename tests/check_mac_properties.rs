//! Property tests for CheckMacValue signing.

use std::collections::BTreeMap;

use ecpay_checkout::domain::checkout::{CheckMacSigner, WireFields};
use proptest::prelude::*;

fn signer() -> CheckMacSigner {
    CheckMacSigner::new("pwFHCqoQZGmho4w6", "EkRm7iFT261dpevs")
}

/// Distinct field names with printable or arbitrary text values.
fn field_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    let value = prop_oneof![
        "[ -~]{0,24}",
        "\\PC{0,8}",
    ];
    prop::collection::btree_map("[A-Z][A-Za-z0-9]{0,10}", value, 1..10)
}

fn fields_from<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> WireFields {
    entries
        .into_iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

proptest! {
    /// Signing the same fields twice yields the same checksum.
    #[test]
    fn sign_is_deterministic(map in field_map()) {
        let fields = fields_from(&map);
        prop_assert_eq!(signer().sign(&fields), signer().sign(&fields));
    }

    /// Only the sorted order matters, not insertion order.
    #[test]
    fn sign_ignores_insertion_order(map in field_map(), rotate in any::<prop::sample::Index>()) {
        let mut entries: Vec<_> = map.iter().collect();
        let forward = fields_from(entries.iter().copied());

        entries.reverse();
        let reversed = fields_from(entries.iter().copied());

        let k = rotate.index(entries.len());
        entries.rotate_left(k);
        let rotated = fields_from(entries.iter().copied());

        let expected = signer().sign(&forward);
        prop_assert_eq!(signer().sign(&reversed), expected.clone());
        prop_assert_eq!(signer().sign(&rotated), expected);
    }

    /// Extending any one value changes the checksum.
    #[test]
    fn sign_detects_single_value_change(map in field_map(), pick in any::<prop::sample::Index>()) {
        let original = fields_from(&map);
        let (name, value) = map.iter().nth(pick.index(map.len())).unwrap();

        let mut changed = original.clone();
        changed.insert(name.clone(), format!("{}x", value));

        prop_assert_ne!(signer().sign(&original), signer().sign(&changed));
    }

    /// Adding a field changes the checksum.
    #[test]
    fn sign_detects_added_field(map in field_map(), extra in "[0-9]{1,4}") {
        let original = fields_from(&map);
        let mut extended = original.clone();
        extended.insert(format!("Zz{}", extra), "1");

        prop_assume!(!original.contains(&format!("Zz{}", extra)));
        prop_assert_ne!(signer().sign(&original), signer().sign(&extended));
    }

    /// Removing a field changes the checksum.
    #[test]
    fn sign_detects_removed_field(map in field_map(), pick in any::<prop::sample::Index>()) {
        prop_assume!(map.len() >= 2);
        let original = fields_from(&map);
        let (name, _) = map.iter().nth(pick.index(map.len())).unwrap();

        let mut reduced = original.clone();
        reduced.remove(name);

        prop_assert_eq!(reduced.len(), original.len() - 1);
        prop_assert_ne!(signer().sign(&original), signer().sign(&reduced));
    }

    /// Output is always 64 uppercase hex characters.
    #[test]
    fn sign_output_is_uppercase_hex(map in field_map()) {
        let mac = signer().sign(&fields_from(&map));
        prop_assert_eq!(mac.as_str().len(), 64);
        prop_assert!(mac.as_str().chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    /// A fresh signature always verifies.
    #[test]
    fn own_signature_verifies(map in field_map()) {
        let fields = fields_from(&map);
        let mac = signer().sign(&fields);
        prop_assert!(signer().verify(&fields, &mac));
    }
}
