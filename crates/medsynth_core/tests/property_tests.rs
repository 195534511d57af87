//! Property-based tests for medsynth_core.
//!
//! Uses proptest to verify invariants that must hold for ALL possible inputs:
//! the walk engine never leaves its clamp range, and the literal codec
//! round-trips and degrades without failing.

use medsynth_core::literal::{decode_list, decode_list_text, decode_record, encode_list, encode_record, ListField, RecordField};
use medsynth_core::rng::seeded;
use medsynth_core::{BoundedWalk, Bounds, EmergencyContact, Resolution, VitalChannel};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_resolution() -> impl Strategy<Value = Resolution> {
    prop_oneof![Just(Resolution::Whole), Just(Resolution::Tenths)]
}

fn arb_walk() -> impl Strategy<Value = BoundedWalk> {
    (-50.0f64..50.0, 0.0f64..200.0, 0.0f64..30.0, arb_resolution()).prop_map(|(min, width, spread, resolution)| {
        let min = min.round();
        let max = min + width.round();
        BoundedWalk::new(spread, Bounds::new(min, max), resolution)
    })
}

fn arb_contact() -> impl Strategy<Value = EmergencyContact> {
    (".{0,20}", ".{0,20}", "[0-9()\\- ]{0,16}").prop_map(|(name, relationship, phone)| EmergencyContact {
        name,
        relationship,
        phone,
    })
}

// ============================================================================
// Walk engine
// ============================================================================

proptest! {
    /// **Core invariant**: a draw never leaves its clamp range, whatever the
    /// baseline or offset.
    #[test]
    fn walk_sample_stays_in_bounds(
        walk in arb_walk(),
        baseline in -1000.0f64..1000.0,
        offset in 0.0f64..100.0,
        seed in any::<u64>(),
    ) {
        let mut rng = seeded(seed);
        let v = walk.sample(&mut rng, baseline);
        prop_assert!(walk.bounds.contains(v), "{} outside {:?}", v, walk.bounds);
        let w = walk.sample_with_offset(&mut rng, baseline, offset);
        prop_assert!(walk.bounds.contains(w), "{} outside {:?}", w, walk.bounds);
    }

    /// A non-negative offset never lowers the settled value.
    #[test]
    fn walk_offset_never_decreases(
        walk in arb_walk(),
        baseline in -100.0f64..300.0,
        offset in 0.0f64..50.0,
        seed in any::<u64>(),
    ) {
        let mut a = seeded(seed);
        let mut b = seeded(seed);
        let plain = walk.sample(&mut a, baseline);
        let lifted = walk.sample_with_offset(&mut b, baseline, offset);
        prop_assert!(lifted >= plain, "{} < {}", lifted, plain);
    }

    /// Every vital channel's historical walk stays in its documented range.
    #[test]
    fn vital_channel_walks_stay_in_range(seed in any::<u64>(), baseline in -500.0f64..500.0) {
        let mut rng = seeded(seed);
        for channel in VitalChannel::ALL {
            let spec = channel.spec();
            let v = spec.historical_walk().sample(&mut rng, baseline);
            prop_assert!(spec.bounds.contains(v), "{} = {}", channel, v);
        }
    }
}

// ============================================================================
// Literal codec
// ============================================================================

proptest! {
    /// decode(encode(x)) == x for any list of strings.
    #[test]
    fn list_roundtrip(items in prop::collection::vec(".{0,24}", 0..6)) {
        let encoded = encode_list(&items);
        prop_assert_eq!(decode_list(&ListField::Encoded(encoded)), items.clone());
        prop_assert_eq!(decode_list(&ListField::Items(items.clone())), items);
    }

    /// decode(encode(x)) == x for record bundles.
    #[test]
    fn record_roundtrip(contact in arb_contact()) {
        let encoded = encode_record(&contact).unwrap();
        let back: EmergencyContact = decode_record(&RecordField::Encoded(encoded));
        prop_assert_eq!(back, contact);
    }

    /// A bare word is never a literal list: it comes back as a one-element list.
    #[test]
    fn bare_scalar_wraps_into_one_element(word in "[A-Za-z][A-Za-z0-9 ]{0,20}") {
        prop_assert_eq!(decode_list_text(&word), vec![word.clone()]);
    }

    /// Decoding arbitrary text never panics.
    #[test]
    fn decode_never_panics(raw in ".{0,64}") {
        let _ = decode_list_text(&raw);
        let _: EmergencyContact = medsynth_core::literal::decode_record_text(&raw);
    }
}
