//! # Builder → Processor Flows
//!
//! Batches signed by the builder are applied by the transaction processor
//! against in-memory state, the way a validator would after consensus.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use shared_crypto::{Secp256k1KeyPair, Secp256k1PublicKey, Secp256k1Signature};
    use shared_types::{AddressDeriver, Batch, Family, StoredEntity};

    use sp_01_batch_builder::{
        BatchBuilder, CategoryPayload, EntityPayload, EnvelopePayload, FixedNonce, NonceSource,
        PartPayload,
        SupplierPayload, TransactionBuilderApi,
    };
    use sp_03_state_transition::{
        ApplyError, BatchError, DedupPolicy, InMemoryStateStore, ProcessorConfig,
        TransactionProcessor,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn builder() -> BatchBuilder {
        BatchBuilder::new(Secp256k1KeyPair::from_bytes([0x5au8; 32]).unwrap())
    }

    fn batch<N: NonceSource>(builder: &BatchBuilder<N>, payloads: &[&dyn EntityPayload]) -> Batch {
        builder
            .build_batch_list(payloads)
            .unwrap()
            .batches
            .remove(0)
    }

    fn stored(store: &InMemoryStateStore, family: Family, id: &str) -> StoredEntity {
        let address = AddressDeriver::for_family(family).address(id);
        StoredEntity::decode(&store.get(&address).unwrap().unwrap()).unwrap()
    }

    fn supply_chain(builder: &BatchBuilder) -> Vec<Batch> {
        vec![
            batch(
                builder,
                &[
                    &CategoryPayload::new("c1", "Libraries", "Libraries"),
                    &SupplierPayload {
                        supplier_name: "Acme".into(),
                        ..SupplierPayload::new("s1")
                    },
                    &PartPayload {
                        pt_name: "zlib".into(),
                        version: "1.3".into(),
                        ..PartPayload::new("p1")
                    },
                    &EnvelopePayload::new("e1"),
                ],
            ),
            batch(
                builder,
                &[
                    &PartPayload::add_supplier("p1", "s1"),
                    &PartPayload::add_category("p1", "c1"),
                    &PartPayload::add_envelope("p1", "e1"),
                    &SupplierPayload::add_part("s1", "p1"),
                    &EnvelopePayload::add_artifact("e1", "e2"),
                ],
            ),
        ]
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_supply_chain_end_to_end() {
        let processor = TransactionProcessor::with_families(&ProcessorConfig::default());
        let store = InMemoryStateStore::new();

        for batch in supply_chain(&builder()) {
            processor.apply_batch(&batch, &store).unwrap();
        }

        assert_eq!(
            stored(&store, Family::Category, "c1").json,
            r#"{"category_id":"c1","category_name":"Libraries","description":"Libraries"}"#
        );
        let part = stored(&store, Family::Part, "p1");
        assert_eq!(part.record.relation_ids("suppliers"), vec!["s1"]);
        assert_eq!(part.record.relation_ids("categories"), vec!["c1"]);
        assert_eq!(part.record.relation_ids("envelopes"), vec!["e1"]);
        assert_eq!(
            stored(&store, Family::Supplier, "s1").record.relation_ids("parts"),
            vec!["p1"]
        );
        assert_eq!(
            stored(&store, Family::Envelope, "e1").record.relation_ids("sub_artifact"),
            vec!["e2"]
        );
    }

    #[test]
    fn test_signed_transactions_verify() {
        let builder = builder();
        let public_key = Secp256k1PublicKey::from_hex(&builder.public_key()).unwrap();

        for batch in supply_chain(&builder) {
            let signature = Secp256k1Signature::from_hex(batch.id()).unwrap();
            assert!(public_key.verify(&batch.header, &signature).is_ok());
            for transaction in &batch.transactions {
                let signature = Secp256k1Signature::from_hex(transaction.id()).unwrap();
                assert!(public_key.verify(&transaction.header, &signature).is_ok());
            }
        }
    }

    #[test]
    fn test_duplicate_create_in_one_batch() {
        let processor = TransactionProcessor::with_families(&ProcessorConfig::default());
        let store = InMemoryStateStore::new();
        let builder = builder();
        let batch = batch(
            &builder,
            &[&SupplierPayload::new("s1"), &SupplierPayload::new("s1")],
        );
        let second_id = batch.transactions[1].id().to_string();

        match processor.apply_batch(&batch, &store) {
            Err(BatchError::TransactionRejected {
                index,
                transaction_id,
                source: ApplyError::InvalidTransaction(_),
            }) => {
                assert_eq!(index, 1);
                assert_eq!(transaction_id, second_id);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_replicas_reach_identical_state() {
        let processor = TransactionProcessor::with_families(&ProcessorConfig::default());
        let batches = supply_chain(&builder());
        let (left, right) = (InMemoryStateStore::new(), InMemoryStateStore::new());

        for batch in &batches {
            processor.apply_batch(batch, &left).unwrap();
            processor.apply_batch(batch, &right).unwrap();
        }

        for family in Family::ALL {
            let prefix = AddressDeriver::for_family(family);
            assert_eq!(
                left.list(prefix.prefix()).unwrap(),
                right.list(prefix.prefix()).unwrap()
            );
        }
    }

    #[test]
    fn test_nonce_does_not_change_outcome() {
        let processor = TransactionProcessor::with_families(&ProcessorConfig::default());
        let key = [0x21u8; 32];
        let fixed = BatchBuilder::with_nonce_source(
            Secp256k1KeyPair::from_bytes(key).unwrap(),
            FixedNonce("0".into()),
        );
        let wall_clock = BatchBuilder::new(Secp256k1KeyPair::from_bytes(key).unwrap());
        let (a, b) = (InMemoryStateStore::new(), InMemoryStateStore::new());

        processor
            .apply_batch(&batch(&fixed, &[&PartPayload::new("p1")]), &a)
            .unwrap();
        processor
            .apply_batch(&batch(&wall_clock, &[&PartPayload::new("p1")]), &b)
            .unwrap();

        assert_eq!(stored(&a, Family::Part, "p1"), stored(&b, Family::Part, "p1"));
    }

    #[test]
    fn test_legacy_dedup_through_processor() {
        let processor = TransactionProcessor::with_families(&ProcessorConfig {
            dedup_policy: DedupPolicy::LegacySubstring,
        });
        let store = InMemoryStateStore::new();
        let builder = builder();

        processor
            .apply_batch(
                &batch(
                    &builder,
                    &[
                        &SupplierPayload::new("s1"),
                        &SupplierPayload::add_part("s1", "p10"),
                        &SupplierPayload::add_part("s1", "p1"),
                    ],
                ),
                &store,
            )
            .unwrap();

        assert_eq!(
            stored(&store, Family::Supplier, "s1").record.relation_ids("parts"),
            vec!["p10"]
        );
    }

    #[test]
    fn test_concurrent_batches_on_shared_store() {
        let processor = Arc::new(TransactionProcessor::with_families(&ProcessorConfig::default()));
        let store = Arc::new(InMemoryStateStore::new());

        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let processor = Arc::clone(&processor);
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let builder = builder();
                    let id = format!("s{worker}");
                    let batch = batch(
                        &builder,
                        &[
                            &SupplierPayload::new(id.clone()),
                            &SupplierPayload::add_part(id.clone(), "p1"),
                        ],
                    );
                    processor.apply_batch(&batch, store.as_ref()).unwrap();
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 4);
        for worker in 0..4 {
            let supplier = stored(&store, Family::Supplier, &format!("s{worker}"));
            assert_eq!(supplier.record.relation_ids("parts"), vec!["p1"]);
        }
    }
}
