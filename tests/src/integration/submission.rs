//! # Builder → REST Client
//!
//! A serialized batch list goes through the blocking client to a mock REST
//! API; the state a processor derives from the same batch is then served
//! back and decoded by the client's record helpers.

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use mockito::{Matcher, Server};

    use shared_crypto::Secp256k1KeyPair;
    use shared_types::{AddressDeriver, BatchList, Family};
    use sp_01_batch_builder::{BatchBuilder, PartPayload};
    use sp_02_submission_client::{
        BatchStatus, ClientConfig, RestSubmissionClient, SubmissionApi,
    };
    use sp_03_state_transition::{InMemoryStateStore, ProcessorConfig, TransactionProcessor};

    #[test]
    fn test_submit_apply_and_show() {
        let builder = BatchBuilder::new(Secp256k1KeyPair::generate());
        let bytes = builder
            .batch_list_bytes(&[
                &PartPayload::new("p1"),
                &PartPayload::add_category("p1", "c1"),
            ])
            .unwrap();

        let mut server = Server::new();
        let post = server
            .mock("POST", "/batches")
            .match_header("content-type", "application/octet-stream")
            .with_status(202)
            .create();
        let client = RestSubmissionClient::new(ClientConfig::new(server.url())).unwrap();

        let batch_id = client.submit(&bytes).unwrap();
        post.assert();

        // The validator side: apply what was posted.
        let list = BatchList::from_bytes(&bytes).unwrap();
        assert_eq!(list.batch_ids(), vec![batch_id.as_str()]);
        let processor = TransactionProcessor::with_families(&ProcessorConfig::default());
        let store = InMemoryStateStore::new();
        processor.apply_batch(&list.batches[0], &store).unwrap();

        let address = AddressDeriver::for_family(Family::Part).address("p1");
        let value = store.get(&address).unwrap().unwrap();
        server
            .mock("GET", format!("/state/{address}").as_str())
            .with_body(format!(r#"{{"data": "{}"}}"#, STANDARD.encode(&value)))
            .create();
        server
            .mock("GET", "/batch_status")
            .match_query(Matcher::UrlEncoded("id".into(), batch_id.clone()))
            .with_body(format!(
                r#"{{"data": [{{"id": "{batch_id}", "status": "COMMITTED", "invalid_transactions": []}}]}}"#
            ))
            .create();

        assert_eq!(client.status(&batch_id, 1).unwrap(), BatchStatus::Committed);
        let part = client.show(Family::Part, "p1").unwrap().unwrap();
        assert_eq!(part.entity_id, "p1");
        assert_eq!(part.record.relation_ids("categories"), vec!["c1"]);
        assert!(part.json.ends_with(r#""categories":[{"category_id":"c1"}]}"#));
    }

    #[test]
    fn test_invalid_batch_reported_with_reason() {
        let mut server = Server::new();
        server
            .mock("GET", "/batch_status")
            .match_query(Matcher::Any)
            .with_body(
                r#"{"data": [{"id": "b1", "status": "INVALID",
                    "invalid_transactions": [{"id": "t1", "message": "Invalid Action-part already exists."}]}]}"#,
            )
            .create();
        let client = RestSubmissionClient::new(ClientConfig::new(server.url())).unwrap();

        let report = client.status_report("b1", 0).unwrap();
        assert_eq!(report.status, BatchStatus::Invalid);
        assert_eq!(
            report.invalid_transactions[0].message,
            "Invalid Action-part already exists."
        );
    }
}
