use std::fs;
use std::path::Path;

use tempfile::TempDir;

use amharic_corpus::models::error::PipelineError;
use amharic_corpus::models::message_record::RAW_HEADER;
use amharic_corpus::pipeline::merge::merge;
use amharic_corpus::pipeline::preprocess::{preprocess, PREPROCESSED_HEADER};
use amharic_corpus::pipeline::sample::export_sample;

fn write_raw_csv(path: &Path, rows: &[[&str; 7]]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(&RAW_HEADER).unwrap();
    for row in rows {
        writer.write_record(row).unwrap();
    }
    writer.flush().unwrap();
}

fn raw_row<'a>(id: &'a str, text: &'a str) -> [&'a str; 7] {
    ["Shop", "@shop", id, "2024-05-01T12:00:00+00:00", text, "10", ""]
}

#[test]
fn merge_concatenates_preserving_intra_file_order() {
    let dir = TempDir::new().unwrap();
    let scraped = dir.path().join("scraped_data");
    write_raw_csv(
        &scraped.join("run1").join("a_data.csv"),
        &[raw_row("1", "a one"), raw_row("2", "a two")],
    );
    write_raw_csv(
        &scraped.join("run2").join("b_data.csv"),
        &[
            raw_row("1", "b one"),
            raw_row("2", "b two"),
            raw_row("3", "b three"),
        ],
    );
    // a file that does not match the suffix is ignored
    write_raw_csv(&scraped.join("run2").join("notes.csv"), &[raw_row("9", "x")]);

    let out = dir.path().join("combined.csv");
    let total = merge(&scraped, "_data.csv", &out).unwrap();
    assert_eq!(total, 5);

    let mut reader = csv::Reader::from_path(&out).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        RAW_HEADER.to_vec()
    );
    let texts: Vec<String> = reader
        .records()
        .map(|r| r.unwrap().get(4).unwrap().to_string())
        .collect();
    assert_eq!(texts.len(), 5);
    // rows of one source file stay contiguous and in their original order
    let pos = |t: &str| texts.iter().position(|x| x == t).unwrap();
    assert_eq!(pos("a two"), pos("a one") + 1);
    assert_eq!(pos("b two"), pos("b one") + 1);
    assert_eq!(pos("b three"), pos("b two") + 1);
}

#[test]
fn merge_with_no_matching_files_fails() {
    let dir = TempDir::new().unwrap();
    let scraped = dir.path().join("scraped_data");
    fs::create_dir_all(&scraped).unwrap();

    let out = dir.path().join("combined.csv");
    match merge(&scraped, "_data.csv", &out) {
        Err(PipelineError::NoFilesFound(_)) => {}
        other => panic!("expected NoFilesFound, got {:?}", other),
    }
}

#[test]
fn preprocess_cleans_projects_and_drops_empty_rows() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("combined.csv");
    write_raw_csv(
        &input,
        &[
            raw_row("1", "ዋጋ፡ 2500 ብር 🔥 @seller"),
            raw_row("2", ""),
            raw_row("3", "https://t.me/only_a_link #promo"),
            raw_row("4", "Brand new phone!"),
        ],
    );

    let output = dir.path().join("preprocessed.csv");
    let kept = preprocess(&input, &output).unwrap();
    assert_eq!(kept, 2);

    let mut reader = csv::Reader::from_path(&output).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        PREPROCESSED_HEADER.to_vec()
    );
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec!["Shop", "@shop", "ዋጋ፡ 2500 ብር"]);
    assert_eq!(rows[1], vec!["Shop", "@shop", "Brand new phone!"]);
}

#[test]
fn preprocess_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("combined.csv");
    write_raw_csv(&input, &[raw_row("1", "ሰላም ዓለም"), raw_row("2", "selam!")]);

    let out1 = dir.path().join("p1.csv");
    let out2 = dir.path().join("p2.csv");
    preprocess(&input, &out1).unwrap();
    preprocess(&input, &out2).unwrap();
    assert_eq!(fs::read(&out1).unwrap(), fs::read(&out2).unwrap());
}

fn write_preprocessed_csv(path: &Path, texts: &[String]) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(&PREPROCESSED_HEADER).unwrap();
    for text in texts {
        writer.write_record(&["Shop", "@shop", text.as_str()]).unwrap();
    }
    writer.flush().unwrap();
}

#[test]
fn sampling_with_fixed_seed_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("preprocessed.csv");
    let texts: Vec<String> = (0..60).map(|i| format!("message {}", i)).collect();
    write_preprocessed_csv(&input, &texts);

    let out1 = dir.path().join("labels1.txt");
    let out2 = dir.path().join("labels2.txt");
    export_sample(&input, &out1, 50, 42).unwrap();
    export_sample(&input, &out2, 50, 42).unwrap();

    let bytes1 = fs::read(&out1).unwrap();
    assert_eq!(bytes1, fs::read(&out2).unwrap());

    let lines: Vec<&str> = std::str::from_utf8(&bytes1)
        .unwrap()
        .lines()
        .collect();
    assert_eq!(lines.len(), 50);
    // without replacement: no line appears twice
    let mut unique = lines.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 50);
    assert!(lines.iter().all(|l| texts.contains(&l.to_string())));
}

#[test]
fn sampling_fails_when_fewer_rows_than_requested() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("preprocessed.csv");
    let texts: Vec<String> = (0..10).map(|i| format!("message {}", i)).collect();
    write_preprocessed_csv(&input, &texts);

    let out = dir.path().join("labels.txt");
    match export_sample(&input, &out, 50, 42) {
        Err(PipelineError::InsufficientRows { wanted, available }) => {
            assert_eq!(wanted, 50);
            assert_eq!(available, 10);
        }
        other => panic!("expected InsufficientRows, got {:?}", other),
    }
}
