//! End-to-end decoding of error metric files through the public API.

use interop_metrics::{
    ABSENT_COUNT, AdapterSequences, FieldType, InterOp, InterOpError, MetricKind, MetricRecord,
    MetricTable, MetricValue, ReaderOptions, TabularMetric, read_all,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn v3_record(lane: u16, tile: u16, cycle: u16, rate: f32, counts: [u32; 5]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&lane.to_le_bytes());
    bytes.extend_from_slice(&tile.to_le_bytes());
    bytes.extend_from_slice(&cycle.to_le_bytes());
    bytes.extend_from_slice(&rate.to_le_bytes());
    counts.iter().for_each(|c| bytes.extend_from_slice(&c.to_le_bytes()));
    bytes
}

fn v4_record(lane: u16, tile: u32, cycle: u16, rate: f32, trailing_rates: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&lane.to_le_bytes());
    bytes.extend_from_slice(&tile.to_le_bytes());
    bytes.extend_from_slice(&cycle.to_le_bytes());
    bytes.extend_from_slice(&rate.to_le_bytes());
    trailing_rates.iter().for_each(|r| bytes.extend_from_slice(&r.to_le_bytes()));
    bytes
}

fn file(version: u8, record_length: u8, records: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = vec![version, record_length];
    records.iter().for_each(|r| bytes.extend_from_slice(r));
    bytes
}

fn two_adapters() -> AdapterSequences {
    AdapterSequences::new(["AGATCGGAAGAG", "CTGTCTCTTATA"])
}

#[test]
fn version_3_record_reads_back_exactly() -> anyhow::Result<()> {
    init_tracing();
    let data = file(3, 30, &[v3_record(1, 1101, 5, 0.01, [100, 5, 2, 1, 0])]);

    let records = read_all(data, MetricKind::Error, None)?.collect_records()?;
    assert_eq!(records.len(), 1);

    let metric = records[0].as_error().ok_or_else(|| anyhow::anyhow!("not an error metric"))?;
    assert_eq!((metric.lane(), metric.tile(), metric.cycle()), (1, 1101, 5));
    assert_eq!(metric.error_rate(), 0.01f32);
    assert_eq!(
        [
            metric.perfect_reads(),
            metric.reads_one_error(),
            metric.reads_two_errors(),
            metric.reads_three_errors(),
            metric.reads_four_errors(),
        ],
        [100, 5, 2, 1, 0]
    );
    assert!(metric.phix_adapter_rate().is_nan());
    Ok(())
}

#[test]
fn version_4_marks_counts_and_adapter_rate_absent() -> anyhow::Result<()> {
    let data = file(4, 12, &[v4_record(2, 2_114_302, 7, 0.25, &[])]);
    let records = read_all(data, MetricKind::Error, None)?.collect_records()?;

    let metric = records[0].as_error().ok_or_else(|| anyhow::anyhow!("not an error metric"))?;
    assert_eq!(metric.tile(), 2_114_302);
    assert_eq!(metric.perfect_reads(), ABSENT_COUNT);
    assert_eq!(metric.reads_four_errors(), ABSENT_COUNT);
    assert!(metric.phix_adapter_rate().is_nan());
    assert_eq!(metric.adapter_count(), 0);
    Ok(())
}

#[test]
fn version_6_pairs_rates_with_adapters_in_order() -> anyhow::Result<()> {
    let data = file(6, 20, &[v4_record(1, 1101, 3, 0.5, &[0.125, 0.375])]);
    let records = read_all(data, MetricKind::Error, Some(two_adapters()))?.collect_records()?;

    let metric = records[0].as_error().ok_or_else(|| anyhow::anyhow!("not an error metric"))?;
    let pairs: Vec<(&str, f32)> = metric.adapters().collect();
    assert_eq!(pairs, vec![("AGATCGGAAGAG", 0.125), ("CTGTCTCTTATA", 0.375)]);
    Ok(())
}

#[test]
fn version_6_without_adapters_is_rejected_before_decoding() {
    let data = file(6, 20, &[v4_record(1, 1101, 3, 0.5, &[0.125, 0.375])]);
    match read_all(data, MetricKind::Error, None) {
        Err(err @ InterOpError::MissingAdapterContext { .. }) => {
            assert!(!err.recovery_suggestions().is_empty());
        }
        other => panic!("Expected MissingAdapterContext, got {:?}", other.map(|r| r.header())),
    }
}

#[test]
fn header_problems_surface_before_any_record() {
    let cases: [(Vec<u8>, fn(&InterOpError) -> bool); 3] = [
        (vec![3], |e| matches!(e, InterOpError::MalformedHeader { .. })),
        (file(3, 12, &[]), |e| matches!(e, InterOpError::MalformedHeader { .. })),
        (file(9, 30, &[]), |e| matches!(e, InterOpError::UnsupportedFormatVersion { version: 9, .. })),
    ];

    for (data, check) in cases {
        match read_all(data, MetricKind::Error, None) {
            Err(err) => assert!(check(&err), "Unexpected error {err}"),
            Ok(reader) => panic!("Expected header error, got reader at {:?}", reader.header()),
        }
    }
}

#[test]
fn truncated_tail_keeps_complete_records() -> anyhow::Result<()> {
    init_tracing();
    let mut data = file(
        3,
        30,
        &[
            v3_record(1, 1101, 1, 0.01, [1, 0, 0, 0, 0]),
            v3_record(1, 1101, 2, 0.02, [2, 0, 0, 0, 0]),
        ],
    );
    data.extend_from_slice(&[0xAB; 11]);

    let results: Vec<_> = read_all(data, MetricKind::Error, None)?.collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok() && results[1].is_ok());
    assert!(matches!(
        results[2],
        Err(InterOpError::TruncatedFile { record_length: 30, trailing_bytes: 11 })
    ));
    Ok(())
}

#[test]
fn decoding_twice_gives_equal_records() -> anyhow::Result<()> {
    let data = file(5, 16, &[v4_record(1, 1101, 1, f32::NAN, &[0.5]), v4_record(1, 1102, 1, 0.1, &[0.0])]);

    let first = read_all(data.clone(), MetricKind::Error, None)?.collect_records()?;
    let second = read_all(data, MetricKind::Error, None)?.collect_records()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn records_share_one_tabular_schema() -> anyhow::Result<()> {
    let data = file(
        3,
        30,
        &(1..=4).map(|c| v3_record(1, 1101, c, 0.01, [10, 1, 0, 0, 0])).collect::<Vec<_>>(),
    );
    let records = read_all(data, MetricKind::Error, None)?.collect_records()?;

    for record in &records {
        assert_eq!(record.field_names().len(), record.values().len());
        assert_eq!(record.field_types().len(), record.values().len());
        for (value, field_type) in record.values().iter().zip(record.field_types()) {
            assert_eq!(value.field_type(), *field_type);
        }
    }

    let table = MetricTable::from_records(MetricKind::Error, &records)?;
    assert_eq!(table.len(), 4);
    assert_eq!(table.version(), Some(3));
    let cycles = table.column("Cycle").ok_or_else(|| anyhow::anyhow!("missing Cycle column"))?;
    assert_eq!(cycles, (1..=4).map(MetricValue::Integer).collect::<Vec<_>>());
    assert_eq!(table.field_types()[3], FieldType::Float);
    Ok(())
}

#[test]
fn records_serialize_with_kind_tag() -> anyhow::Result<()> {
    let data = file(3, 30, &[v3_record(1, 1101, 5, 0.5, [100, 5, 2, 1, 0])]);
    let records = read_all(data, MetricKind::Error, None)?.collect_records()?;

    let yaml = serde_yaml_ng::to_string(&records[0])?;
    assert!(yaml.contains("kind: Error"), "{yaml}");
    assert!(matches!(records[0], MetricRecord::Error(_)));
    Ok(())
}

#[tokio::test]
async fn open_decodes_file_written_to_disk() -> anyhow::Result<()> {
    init_tracing();
    let path = std::env::temp_dir().join(format!(
        "interop-it-{}-{}",
        std::process::id(),
        MetricKind::Error.file_name()
    ));
    let data = file(6, 20, &[v4_record(1, 1101, 1, 0.5, &[0.1, 0.2]), v4_record(1, 1101, 2, 0.5, &[0.3, 0.4])]);
    tokio::fs::write(&path, &data).await?;

    let options = ReaderOptions::new().with_adapter_sequences(two_adapters());
    let opened = InterOp::open(&path, MetricKind::Error, options).await;
    tokio::fs::remove_file(&path).await?;

    let reader = opened?;
    assert_eq!(reader.record_count(), 2);

    use futures::StreamExt;
    let records: Vec<_> = reader.into_stream().collect().await;
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(Result::is_ok));
    Ok(())
}
