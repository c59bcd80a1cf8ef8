use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, instrument};
use tracing_subscriber::fmt;

use keyshare::{
    BlockContext, CurvePoint, EncodedShare, Fr, KeyshareConfig, MemoryEvents, MemoryRegistry,
    MemoryShareStore, SendKeyShare, ShareCollector, dealer::Dealer,
};

const PARTIES: usize = 5;
const THRESHOLD: usize = 3;
const HEIGHT: u64 = 100;

fn to_msg(validator: &str, share: &EncodedShare) -> SendKeyShare {
    SendKeyShare {
        validator: validator.to_owned(),
        height: HEIGHT,
        index: share.index,
        share_hex: share.share_hex.clone(),
        commitment_hex: share.commitment_hex.clone(),
    }
}

#[instrument(level = "info")]
fn run_submit_flow(parties: usize, threshold: usize) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    let config = KeyshareConfig::default();

    let dealer = Dealer::split(&mut rng, threshold, parties)?;
    let shares = dealer.derive_all(config.identity.as_bytes(), config.hash_dst.as_bytes())?;
    let expected = CurvePoint::<Fr>::to_bytes(
        &dealer.expected_key(config.identity.as_bytes(), config.hash_dst.as_bytes()),
    );

    let validators: Vec<String> = (1..=parties).map(|i| format!("val{i}")).collect();
    let mut collector: ShareCollector<_, _, _> = ShareCollector::new(
        config,
        MemoryRegistry::new(validators.iter().cloned()),
        MemoryShareStore::new(),
        MemoryEvents::default(),
    )?;

    // Validator 2 submits garbage first; it is rejected and never stored.
    let mut bad = to_msg(&validators[1], &shares[1]);
    bad.share_hex = shares[0].share_hex.clone();
    if let Err(err) = collector.submit(BlockContext { height: HEIGHT, time: 0 }, bad) {
        info!(error = %err, "rejected submission");
    }

    for (offset, (validator, share)) in validators.iter().zip(&shares).enumerate() {
        let ctx = BlockContext {
            height: HEIGHT,
            time: 1_700_000_000 + offset as u64,
        };
        let result = collector.submit(ctx, to_msg(validator, share))?;
        let key = result.aggregated_key;
        info!(
            validator = %validator,
            contributors = ?key.as_ref().map(|k| k.contributors.clone()),
            reconstructed = key.as_ref().is_some_and(|k| k.key_material == expected),
            "share accepted"
        );
    }

    info!(
        events = collector.events().events.len(),
        stored = collector.store().len(),
        fingerprint = ?collector.aggregated_key(HEIGHT).map(|k| k.fingerprint()),
        "submission flow finished"
    );

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set to DEBUG to see peer verification, or TRACE for every pairing check
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .init();

    run_submit_flow(PARTIES, THRESHOLD)
}
