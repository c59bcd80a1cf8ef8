#![cfg(feature = "blst")]

use rand::{SeedableRng, rngs::StdRng};

use keyshare::{
    BlockContext, CurvePoint, DEFAULT_HASH_DST, DEFAULT_IDENTITY, EncodedShare, Error, Fr,
    HeightPolicy, KeyshareConfig, MemoryEvents, MemoryRegistry, MemoryShareStore,
    PersistedKeyShare, SendKeyShare, ShareCollector, ShareStore, dealer::Dealer,
};

type Collector = ShareCollector<MemoryRegistry, MemoryShareStore, MemoryEvents>;

const HEIGHT: u64 = 100;

fn setup(seed: u64, threshold: usize, parties: usize) -> (Dealer, Vec<EncodedShare>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let dealer = Dealer::split(&mut rng, threshold, parties).expect("split");
    let shares = dealer
        .derive_all(DEFAULT_IDENTITY.as_bytes(), DEFAULT_HASH_DST.as_bytes())
        .expect("derive all");
    let expected = CurvePoint::<Fr>::to_bytes(
        &dealer.expected_key(DEFAULT_IDENTITY.as_bytes(), DEFAULT_HASH_DST.as_bytes()),
    );
    (dealer, shares, expected)
}

fn collector_with(config: KeyshareConfig, validators: &[&str]) -> Collector {
    ShareCollector::new(
        config,
        MemoryRegistry::new(validators.iter().copied()),
        MemoryShareStore::new(),
        MemoryEvents::default(),
    )
    .expect("collector")
}

fn collector() -> Collector {
    collector_with(KeyshareConfig::default(), &["val1", "val2", "val3"])
}

fn submission(validator: &str, share: &EncodedShare) -> SendKeyShare {
    SendKeyShare {
        validator: validator.into(),
        height: HEIGHT,
        index: share.index,
        share_hex: share.share_hex.clone(),
        commitment_hex: share.commitment_hex.clone(),
    }
}

fn block() -> BlockContext {
    BlockContext {
        height: HEIGHT,
        time: 1_700_000_000,
    }
}

#[test]
fn two_of_three_reconstructs_after_second_share() {
    let (_, shares, expected) = setup(100, 2, 3);
    let mut collector = collector();

    let first = collector
        .submit(block(), submission("val1", &shares[0]))
        .expect("val1");
    assert!(first.accepted);
    let partial = first.aggregated_key.expect("single share aggregates");
    assert_eq!(partial.contributors, vec![1]);
    assert_ne!(partial.key_material, expected);

    let second = collector
        .submit(block(), submission("val2", &shares[1]))
        .expect("val2");
    assert!(second.accepted);
    let key = second.aggregated_key.expect("key");
    assert_eq!(key.contributors, vec![1, 2]);
    assert_eq!(key.key_material, expected);
    assert_eq!(collector.aggregated_key(HEIGHT), Some(&key));

    // A third share keeps the key stable.
    let third = collector
        .submit(block(), submission("val3", &shares[2]))
        .expect("val3");
    let key = third.aggregated_key.expect("key");
    assert_eq!(key.contributors, vec![1, 2, 3]);
    assert_eq!(key.key_material, expected);

    assert_eq!(collector.store().len(), 3);
    assert_eq!(collector.events().events.len(), 3);
}

#[test]
fn unregistered_validator_never_reaches_the_store() {
    let (_, shares, _) = setup(101, 2, 3);
    let mut collector = collector();

    let err = collector
        .submit(block(), submission("mallory", &shares[0]))
        .unwrap_err();
    assert!(matches!(err, Error::NotRegistered { ref validator } if validator == "mallory"));
    assert!(err.is_rejection());
    assert!(collector.store().is_empty());
    assert!(collector.events().events.is_empty());
    assert!(collector.aggregated_key(HEIGHT).is_none());
}

#[test]
fn invalid_own_share_is_rejected_without_writes() {
    let (_, shares, _) = setup(102, 2, 3);
    let mut collector = collector();

    let mut malformed = submission("val1", &shares[0]);
    malformed.share_hex = "not hex".into();
    assert!(matches!(
        collector.submit(block(), malformed),
        Err(Error::MalformedEncoding { .. })
    ));

    let mut mismatched = submission("val1", &shares[0]);
    mismatched.share_hex = shares[1].share_hex.clone();
    assert!(matches!(
        collector.submit(block(), mismatched),
        Err(Error::InvalidShare { index: 1 })
    ));

    assert!(collector.store().is_empty());
    assert!(collector.events().events.is_empty());
}

#[test]
fn corrupted_peer_record_is_tolerated() {
    let (_, shares, expected) = setup(103, 2, 4);
    let mut collector = collector_with(
        KeyshareConfig::default(),
        &["val1", "val2", "val3", "val4"],
    );
    collector
        .submit(block(), submission("val1", &shares[0]))
        .expect("val1");
    collector
        .submit(block(), submission("val2", &shares[1]))
        .expect("val2");

    // Corrupt val2's record behind the collector's back: the stored share no
    // longer matches its commitment.
    let mut store = collector.store().clone();
    let mut record: PersistedKeyShare = store.get("val2", HEIGHT).expect("val2 record");
    record.share_hex = shares[3].share_hex.clone();
    store.put(record);
    let mut collector: Collector = ShareCollector::new(
        KeyshareConfig::default(),
        MemoryRegistry::new(["val1", "val2", "val3", "val4"]),
        store,
        MemoryEvents::default(),
    )
    .expect("collector");

    let result = collector
        .submit(block(), submission("val3", &shares[2]))
        .expect("val3 is accepted despite the bad peer");
    let key = result.aggregated_key.expect("key");
    assert_eq!(key.contributors, vec![1, 3]);
    assert_eq!(key.key_material, expected);
}

#[test]
fn malformed_peer_records_are_dropped() {
    let (_, shares, expected) = setup(109, 2, 4);
    let record = |validator: &str, share: &EncodedShare, share_hex: String| PersistedKeyShare {
        validator: validator.into(),
        height: HEIGHT,
        share_hex,
        commitment_hex: share.commitment_hex.clone(),
        index: share.index,
        received_at_time: 0,
        received_at_height: HEIGHT,
    };

    let mut store = MemoryShareStore::new();
    // Not hex at all.
    store.put(record("val1", &shares[0], "zz".into()));
    // Valid hex, but a G1-sized share.
    store.put(record("val4", &shares[3], shares[3].commitment_hex.clone()));
    store.put(record("val2", &shares[1], shares[1].share_hex.clone()));

    let mut collector: Collector = ShareCollector::new(
        KeyshareConfig::default(),
        MemoryRegistry::new(["val1", "val2", "val3", "val4"]),
        store,
        MemoryEvents::default(),
    )
    .expect("collector");

    let result = collector
        .submit(block(), submission("val3", &shares[2]))
        .expect("val3 is accepted despite malformed peers");
    let key = result.aggregated_key.expect("key");
    assert_eq!(key.contributors, vec![2, 3]);
    assert_eq!(key.key_material, expected);
    assert_eq!(collector.store().len(), 4);
}

#[test]
fn resubmission_is_idempotent() {
    let (_, shares, _) = setup(104, 2, 3);
    let mut collector = collector();
    collector
        .submit(block(), submission("val1", &shares[0]))
        .expect("val1");

    let first = collector
        .submit(block(), submission("val2", &shares[1]))
        .expect("val2")
        .aggregated_key;
    let again = collector
        .submit(block(), submission("val2", &shares[1]))
        .expect("val2 again")
        .aggregated_key;

    assert_eq!(first, again);
    assert_eq!(collector.store().len(), 2);
    assert_eq!(collector.store().get_all(HEIGHT).len(), 2);
}

#[test]
fn heights_are_independent() {
    let (_, shares, expected) = setup(105, 2, 3);
    let mut collector = collector();
    collector
        .submit(block(), submission("val1", &shares[0]))
        .expect("val1 at 100");

    let mut later = submission("val2", &shares[1]);
    later.height = HEIGHT + 1;
    let key = collector
        .submit(block(), later)
        .expect("val2 at 101")
        .aggregated_key
        .expect("key");
    assert_eq!(key.contributors, vec![2]);
    assert_ne!(key.key_material, expected);
    assert_eq!(
        collector.aggregated_key(HEIGHT).map(|k| k.contributors.clone()),
        Some(vec![1])
    );
}

#[test]
fn threshold_gates_aggregation() {
    let (_, shares, expected) = setup(106, 2, 3);
    let config = KeyshareConfig {
        parties: Some(3),
        threshold: Some(2),
        ..KeyshareConfig::default()
    };
    let mut collector = collector_with(config, &["val1", "val2", "val3"]);

    let first = collector
        .submit(block(), submission("val1", &shares[0]))
        .expect("val1");
    assert!(first.accepted);
    assert!(first.aggregated_key.is_none());
    assert!(collector.aggregated_key(HEIGHT).is_none());

    let second = collector
        .submit(block(), submission("val2", &shares[1]))
        .expect("val2");
    assert_eq!(second.aggregated_key.expect("key").key_material, expected);
}

#[test]
fn reject_past_policy() {
    let (_, shares, _) = setup(107, 2, 3);
    let config = KeyshareConfig {
        height_policy: HeightPolicy::RejectPast,
        ..KeyshareConfig::default()
    };
    let mut collector = collector_with(config, &["val1", "val2", "val3"]);
    let ahead = BlockContext {
        height: HEIGHT + 5,
        time: 0,
    };
    let err = collector
        .submit(ahead, submission("val1", &shares[0]))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::StaleHeight {
            target: HEIGHT,
            current: 105
        }
    ));
    assert!(collector.store().is_empty());
}

#[test]
fn submission_round_trips_through_json() {
    let (_, shares, _) = setup(108, 2, 3);
    let msg = submission("val1", &shares[0]);
    let json = serde_json::to_string(&msg).expect("serialize");
    let parsed: SendKeyShare = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, msg);

    let mut collector = collector();
    let result = collector.submit(block(), parsed).expect("submit");
    let event_json = serde_json::to_value(&result.event).expect("event");
    assert_eq!(event_json["validator"], "val1");
    assert_eq!(event_json["received_at_height"], HEIGHT);
}
