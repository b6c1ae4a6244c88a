use proptest::prelude::*;

use stakeset_types::{AccountKey, Coin, PublicKey};

proptest! {
    /// Any key built from the username alphabet with single separators is valid.
    #[test]
    fn well_formed_usernames_are_valid(
        head in "[a-z]",
        parts in prop::collection::vec("[a-z0-9]{1,3}", 1..4),
        seps in prop::collection::vec(prop::sample::select(vec![".", "-"]), 3),
    ) {
        let mut name = head;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                name.push_str(seps[i - 1]);
            }
            name.push_str(part);
        }
        prop_assume!(name.len() <= 20);
        prop_assert!(AccountKey::from(name.as_str()).is_valid());
    }

    /// Uppercase letters always make a username invalid.
    #[test]
    fn uppercase_is_rejected(name in "[a-z][a-z0-9]{1,10}[A-Z][a-z0-9]{0,5}") {
        prop_assert!(!AccountKey::from(name.as_str()).is_valid());
    }

    /// Splitting a stake n ways never hands out more than the stake, and
    /// leaves less than n raw units behind.
    #[test]
    fn even_split_remainder_is_below_count(raw in 0i128..1_000_000_000_000, n in 1i64..50) {
        let stake = Coin::new(raw);
        let share = stake.checked_div_int(n).unwrap();
        let handed_out = share.raw() * n as i128;
        prop_assert!(handed_out <= raw);
        prop_assert!(raw - handed_out < n as i128);
    }

    /// Coin addition and subtraction are inverse.
    #[test]
    fn coin_add_sub_inverse(a in -1_000_000_000_000i128..1_000_000_000_000, b in -1_000_000_000_000i128..1_000_000_000_000) {
        let x = Coin::new(a);
        let y = Coin::new(b);
        prop_assert_eq!(x + y - y, x);
        prop_assert_eq!(x - y, x + (-y));
    }

    /// PublicKey bincode serialization roundtrip keeps the derived address.
    #[test]
    fn public_key_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let key = PublicKey(bytes);
        let encoded = bincode::serialize(&key).unwrap();
        let decoded: PublicKey = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, key);
        prop_assert_eq!(decoded.address(), key.address());
    }
}
