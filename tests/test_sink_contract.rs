//! Contract checks shared by every `RecordSink` implementation.

use record_pipeline::{MemorySink, NewRecord, PipelineError, RecordSink, SqliteSink};

fn new_record(primary: &str, secondary: &str, numeric: Option<i64>) -> NewRecord {
    NewRecord {
        primary_text: primary.to_string(),
        secondary_text: secondary.to_string(),
        numeric_attribute: numeric,
    }
}

async fn sinks() -> Vec<(&'static str, Box<dyn RecordSink>)> {
    let sqlite = SqliteSink::in_memory().await.expect("in-memory sqlite");
    vec![
        ("memory", Box::new(MemorySink::new()) as Box<dyn RecordSink>),
        ("sqlite", Box::new(sqlite)),
    ]
}

#[tokio::test]
async fn clear_then_fetch_is_empty() {
    for (name, sink) in sinks().await {
        sink.initialize().await.unwrap();
        sink.insert(new_record("a", "x", Some(1))).await.unwrap();
        sink.insert(new_record("b", "y", None)).await.unwrap();

        sink.clear().await.unwrap();
        assert!(sink.fetch_all(None).await.unwrap().is_empty(), "{name}");
        assert_eq!(sink.count().await.unwrap(), 0, "{name}");

        // Clearing an empty store is fine too.
        sink.clear().await.unwrap();
        assert_eq!(sink.count().await.unwrap(), 0, "{name}");
    }
}

#[tokio::test]
async fn insert_then_fetch_round_trips() {
    for (name, sink) in sinks().await {
        sink.initialize().await.unwrap();
        let accepted = sink
            .insert(new_record("The Crimson Rose II", "Toni Morrison", Some(1987)))
            .await
            .unwrap();
        let fetched = sink.fetch(accepted.identifier).await.unwrap();
        assert_eq!(fetched.as_ref(), Some(&accepted), "{name}");
        let fetched = fetched.unwrap();
        assert_eq!(fetched.primary_text, "The Crimson Rose II");
        assert_eq!(fetched.secondary_text, "Toni Morrison");
        assert_eq!(fetched.numeric_attribute, Some(1987));

        assert_eq!(sink.fetch(accepted.identifier + 1000).await.unwrap(), None, "{name}");
    }
}

#[tokio::test]
async fn null_numeric_survives_storage() {
    for (name, sink) in sinks().await {
        sink.initialize().await.unwrap();
        let accepted = sink.insert(new_record("Ann", "ann@example.com", None)).await.unwrap();
        let fetched = sink.fetch(accepted.identifier).await.unwrap().unwrap();
        assert_eq!(fetched.numeric_attribute, None, "{name}");
    }
}

#[tokio::test]
async fn duplicate_secondary_text_is_refused() {
    for (name, sink) in sinks().await {
        sink.initialize().await.unwrap();
        sink.insert(new_record("Ann", "same@example.com", None)).await.unwrap();
        let before = sink.count().await.unwrap();

        let err = sink
            .insert(new_record("Other Ann", "same@example.com", Some(5)))
            .await
            .unwrap_err();
        assert!(
            matches!(err, PipelineError::DuplicateKey { .. }),
            "{name}: unexpected {err:?}"
        );
        assert!(err.is_recoverable());
        assert_eq!(sink.count().await.unwrap(), before, "{name}");
        assert_eq!(sink.count().await.unwrap(), 1, "{name}");
    }
}

#[tokio::test]
async fn fetch_all_is_in_identifier_order_and_limited() {
    for (name, sink) in sinks().await {
        sink.initialize().await.unwrap();
        for i in 0..5 {
            sink.insert(new_record("t", &format!("s{i}"), Some(i))).await.unwrap();
        }
        let all = sink.fetch_all(None).await.unwrap();
        assert_eq!(all.len(), 5, "{name}");
        assert!(all.windows(2).all(|w| w[0].identifier < w[1].identifier), "{name}");

        let first_three = sink.fetch_all(Some(3)).await.unwrap();
        assert_eq!(first_three, all[..3].to_vec(), "{name}");
        assert_eq!(sink.count().await.unwrap(), 5, "{name}");

        assert_eq!(sink.fetch_all(Some(50)).await.unwrap().len(), 5, "{name}");
    }
}
