//! Aggregation orchestrator.
//!
//! [`ShareCollector::submit`] is the entry point for a validator's key share at
//! a target height. A submission is either rejected before anything is
//! written, or it is persisted, announced through the [`EventSink`] and
//! followed by an aggregation attempt over every share currently known for the
//! height:
//!
//! 1. the submitter must be registered
//! 2. the target height must pass the configured [`HeightPolicy`](crate::HeightPolicy)
//! 3. the index must be in range
//! 4. the submitter's share is decoded and verified against its commitment
//! 5. peer records for the height are re-verified; bad ones are logged and
//!    dropped
//! 6. the record is persisted and the event emitted
//! 7. with a quorum of verified shares, the height key is reconstructed
//!
//! Aggregation failures after step 6 are logged and never fail the submission.

use tracing::{debug, error, info, instrument, warn};

use crate::{
    Commitment, CurvePoint, ExtractedShare, Fr, KeyshareConfig, PairingBackend, PairingEngine,
    PersistedKeyShare, ShareIndex, Suite, aggregate, errors::Error,
};

mod cache;
use cache::AggregateCache;

mod events;
pub use events::{AggregatedKey, BlockContext, KeyShareEvent, SendKeyShare, SubmissionResult};

mod store;
pub use store::{
    EventSink, MemoryEvents, MemoryRegistry, MemoryShareStore, ShareStore, ValidatorRegistry,
};

/// Shares that passed verification in the current attempt.
struct VerifiedSet<B: PairingBackend> {
    shares: Vec<ExtractedShare<B>>,
    commitments: Vec<Commitment<B>>,
}

impl<B: PairingBackend> VerifiedSet<B> {
    fn new() -> Self {
        Self {
            shares: Vec::new(),
            commitments: Vec::new(),
        }
    }

    fn push(&mut self, (share, commitment): (ExtractedShare<B>, Commitment<B>)) {
        self.shares.push(share);
        self.commitments.push(commitment);
    }

    fn contains(&self, index: ShareIndex) -> bool {
        self.shares.iter().any(|share| share.index == index)
    }

    fn len(&self) -> usize {
        self.shares.len()
    }

    fn digest(&self) -> [u8; 32] {
        let mut members: Vec<_> = self
            .shares
            .iter()
            .zip(&self.commitments)
            .map(|(share, commitment)| {
                (
                    share.index,
                    share.secret_point.to_bytes(),
                    commitment.commitment_point.to_bytes(),
                )
            })
            .collect();
        AggregateCache::digest(&mut members)
    }
}

/// Collects, verifies and aggregates key shares per height.
///
/// Generic over the pairing backend and the three collaborators, so that the
/// same logic runs against the in-memory fakes and a real state backend.
pub struct ShareCollector<R, S, E, B = PairingEngine>
where
    B: PairingBackend<Scalar = Fr>,
{
    config: KeyshareConfig,
    suite: Suite<B>,
    registry: R,
    store: S,
    events: E,
    cache: AggregateCache,
}

impl<R, S, E, B> ShareCollector<R, S, E, B>
where
    R: ValidatorRegistry,
    S: ShareStore,
    E: EventSink,
    B: PairingBackend<Scalar = Fr>,
{
    /// Creates a collector.
    ///
    /// # Errors
    ///
    /// `Error::InvalidConfig` if `config` does not validate.
    pub fn new(config: KeyshareConfig, registry: R, store: S, events: E) -> Result<Self, Error> {
        config.validate()?;
        let suite = Suite::from_config(&config);
        let cache = AggregateCache::new(config.max_cached_heights);
        Ok(Self {
            config,
            suite,
            registry,
            store,
            events,
            cache,
        })
    }

    /// Handles a key share submission.
    ///
    /// # Errors
    ///
    /// Rejections leave the store untouched:
    ///
    /// - `Error::NotRegistered` if the validator is not in the registry
    /// - `Error::StaleHeight` if the height policy refuses the target height
    /// - `Error::InvalidShareIndex` for index 0 or an index above `parties`
    /// - `Error::UnsupportedPrimitive` if the suite cannot hash the identity
    /// - `Error::MalformedEncoding`, `Error::InvalidGroupElement` or
    ///   `Error::InvalidShare` for the submitter's own share
    #[instrument(
        level = "info",
        skip(self, ctx, msg),
        fields(validator = %msg.validator, height = msg.height, index = msg.index)
    )]
    pub fn submit(
        &mut self,
        ctx: BlockContext,
        msg: SendKeyShare,
    ) -> Result<SubmissionResult, Error> {
        if !self.registry.is_registered(&msg.validator) {
            return Err(Error::NotRegistered {
                validator: msg.validator,
            });
        }
        self.config.height_policy.check(msg.height, ctx.height)?;
        self.config.check_index(msg.index)?;

        let identity_point = self.suite.identity_point()?;
        let own = self.suite.decode_and_verify(
            &msg.share_hex,
            &msg.commitment_hex,
            msg.index,
            &identity_point,
        )?;

        let mut verified = VerifiedSet::new();
        verified.push(own);
        self.collect_peers(&msg, &identity_point, &mut verified);

        self.store.put(PersistedKeyShare {
            validator: msg.validator.clone(),
            height: msg.height,
            share_hex: msg.share_hex.clone(),
            commitment_hex: msg.commitment_hex.clone(),
            index: msg.index,
            received_at_time: ctx.time,
            received_at_height: ctx.height,
        });

        let event = KeyShareEvent {
            validator: msg.validator,
            height: msg.height,
            index: msg.index,
            share_hex: msg.share_hex,
            commitment_hex: msg.commitment_hex,
            received_at_height: ctx.height,
        };
        self.events.emit(event.clone());

        let aggregated_key = if self.config.has_quorum(verified.len()) {
            self.aggregate_verified(event.height, &verified)
        } else {
            debug!(
                verified = verified.len(),
                threshold = ?self.config.threshold,
                "below quorum, skipping aggregation"
            );
            if self.cache.remove(event.height) {
                debug!(height = event.height, "dropped aggregated key below quorum");
            }
            None
        };

        Ok(SubmissionResult {
            accepted: true,
            aggregated_key,
            event,
        })
    }

    /// Key reconstructed from the currently valid shares for `height`.
    ///
    /// `None` if the last submission at `height` fell below quorum or failed
    /// to aggregate, or if the height was evicted from the cache.
    pub fn aggregated_key(&self, height: u64) -> Option<&AggregatedKey> {
        self.cache.get(height)
    }

    /// Number of heights with a retained aggregated key.
    pub fn cached_heights(&self) -> usize {
        self.cache.len()
    }

    pub fn config(&self) -> &KeyshareConfig {
        &self.config
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Re-verifies every other record stored for the submission's height.
    fn collect_peers(
        &self,
        msg: &SendKeyShare,
        identity_point: &B::G2,
        verified: &mut VerifiedSet<B>,
    ) {
        for peer in self.store.get_all(msg.height) {
            if peer.validator == msg.validator {
                continue;
            }
            if !self.registry.is_registered(&peer.validator) {
                debug!(peer = %peer.validator, "skipping record of unregistered validator");
                continue;
            }
            if verified.contains(peer.index) {
                warn!(
                    peer = %peer.validator,
                    index = peer.index,
                    "skipping peer key share with duplicate index"
                );
                continue;
            }
            match self.suite.decode_and_verify(
                &peer.share_hex,
                &peer.commitment_hex,
                peer.index,
                identity_point,
            ) {
                Ok(pair) => {
                    debug!(peer = %peer.validator, index = peer.index, "peer key share verified");
                    verified.push(pair);
                }
                Err(err) if err.is_rejection() => {
                    warn!(
                        peer = %peer.validator,
                        index = peer.index,
                        error = %err,
                        "skipping invalid peer key share"
                    );
                }
                Err(err) => {
                    error!(
                        peer = %peer.validator,
                        index = peer.index,
                        error = %err,
                        "failed to verify peer key share, skipping"
                    );
                }
            }
        }
    }

    fn aggregate_verified(
        &mut self,
        height: u64,
        verified: &VerifiedSet<B>,
    ) -> Option<AggregatedKey> {
        let digest = verified.digest();
        if let Some(key) = self.cache.lookup(height, &digest) {
            debug!(height, "verified set unchanged, reusing aggregated key");
            return Some(key.clone());
        }

        match aggregate::<B>(&verified.shares, &verified.commitments) {
            Ok(decryption_key) => {
                let key = AggregatedKey {
                    height,
                    key_material: decryption_key.to_bytes(),
                    contributors: decryption_key.contributors,
                };
                info!(
                    height,
                    contributors = key.contributors.len(),
                    fingerprint = %key.fingerprint(),
                    "aggregated decryption key"
                );
                self.cache.insert(digest, key.clone());
                Some(key)
            }
            Err(err) => {
                error!(height, error = %err, "failed to aggregate key shares");
                self.cache.remove(height);
                None
            }
        }
    }
}
