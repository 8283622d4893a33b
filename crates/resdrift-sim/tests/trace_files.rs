//! End-to-end checks on the emitted trace files.
//!
//! Purpose:
//! - Confirm the three per-set files agree line-for-line with each other and
//!   with the label semantics (sentinels, drift fractions, read counts).
//! - Confirm back-to-back sets carry no state across: read counts restart
//!   from zero in every set.
//!
//! Cases:
//! 1) File schema: line counts, CSV header, field shapes, hex addresses.
//! 2) Cross-file consistency: clean vs drifted vs labels per cycle.
//! 3) Two-set independence of read-count and write-history state.

use resdrift_sim::emit::LABEL_HEADER;
use resdrift_sim::{generate_trace_sets, SimConfig};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// One parsed `.nvt` line.
struct NvtLine {
    cycle: u64,
    op: char,
    address: u64,
    data: String,
    timestamp_ns: u64,
}

/// One parsed label row.
struct LabelRow {
    cycle: u64,
    label: u8,
    time_since_ns: i64,
    op_flag: u8,
    read_count: u64,
    drift_pct: f64,
}

fn parse_nvt(path: &PathBuf) -> Vec<NvtLine> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| {
            let f: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(f.len(), 5, "nvt line must have 5 fields: {line}");
            assert!(f[2].starts_with("0x"), "address must be hex: {line}");
            NvtLine {
                cycle: f[0].parse().unwrap(),
                op: f[1].chars().next().unwrap(),
                address: u64::from_str_radix(&f[2][2..], 16).unwrap(),
                data: f[3].to_owned(),
                timestamp_ns: f[4].parse().unwrap(),
            }
        })
        .collect()
}

fn parse_labels(path: &PathBuf) -> Vec<LabelRow> {
    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(LABEL_HEADER));
    lines
        .map(|line| {
            let f: Vec<&str> = line.split(',').collect();
            assert_eq!(f.len(), 6, "label row must have 6 fields: {line}");
            LabelRow {
                cycle: f[0].parse().unwrap(),
                label: f[1].parse().unwrap(),
                time_since_ns: f[2].parse().unwrap(),
                op_flag: f[3].parse().unwrap(),
                read_count: f[4].parse().unwrap(),
                drift_pct: f[5].parse().unwrap(),
            }
        })
        .collect()
}

fn temp_out_dir(tag: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("resdrift_{tag}_{nanos}"))
}

fn test_cfg(out_dir: PathBuf) -> SimConfig {
    SimConfig {
        output_dir: out_dir,
        num_trace_sets: 2,
        rows_per_trace: 400,
        block_size_bits: 64,
        num_blocks: 4,
        reuse_prob: 0.4,
        seed: Some(99),
        ..SimConfig::default()
    }
}

#[test]
fn emitted_sets_are_aligned_and_independent() {
    let dir = temp_out_dir("e2e");
    let cfg = test_cfg(dir.clone());
    let sets = generate_trace_sets(&cfg).unwrap();
    assert_eq!(sets.len(), 2);

    for paths in &sets {
        let clean = parse_nvt(&paths.clean);
        let drifted = parse_nvt(&paths.drifted);
        let labels = parse_labels(&paths.labels);
        assert_eq!(clean.len() as u64, cfg.rows_per_trace);
        assert_eq!(drifted.len(), clean.len());
        assert_eq!(labels.len(), clean.len());

        let mut read_counts: HashMap<u64, u64> = HashMap::new();
        let mut written: HashMap<u64, bool> = HashMap::new();
        let mut prev_ts = 0u64;

        for (i, ((c, d), l)) in clean.iter().zip(&drifted).zip(&labels).enumerate() {
            // Cycle indices are 1-based and sequential; rows stay aligned.
            assert_eq!(c.cycle, i as u64 + 1);
            assert_eq!(d.cycle, c.cycle);
            assert_eq!(l.cycle, c.cycle);
            assert_eq!(d.op, c.op);
            assert_eq!(d.address, c.address);
            assert_eq!(d.timestamp_ns, c.timestamp_ns);

            // Addresses are block-aligned slots.
            assert_eq!(c.address % cfg.block_size_bits, 0);
            assert!(c.address < cfg.num_blocks * cfg.block_size_bits);

            // Data width matches the configured block size.
            assert_eq!(c.data.len() as u64, cfg.block_size_bits);
            assert_eq!(d.data.len() as u64, cfg.block_size_bits);

            // Simulated time never decreases.
            assert!(c.timestamp_ns >= prev_ts);
            prev_ts = c.timestamp_ns;

            match c.op {
                'W' => {
                    assert_eq!(l.op_flag, 0);
                    assert_eq!(l.label, 0);
                    assert_eq!(l.time_since_ns, 0);
                    assert_eq!(l.drift_pct, 0.0);
                    assert_eq!(d.data, c.data);
                    assert_eq!(
                        l.read_count,
                        read_counts.get(&c.address).copied().unwrap_or(0)
                    );
                    let _ = written.insert(c.address, true);
                }
                'R' => {
                    assert_eq!(l.op_flag, 1);
                    let count = read_counts.entry(c.address).or_insert(0);
                    *count += 1;
                    assert_eq!(l.read_count, *count);

                    if written.get(&c.address).copied().unwrap_or(false) {
                        assert!(l.time_since_ns >= 0);
                        let errors = c
                            .data
                            .chars()
                            .zip(d.data.chars())
                            .filter(|(a, b)| a != b)
                            .count();
                        assert_eq!(l.drift_pct, errors as f64 / cfg.block_size_bits as f64);
                        assert_eq!(l.label == 1, errors > 0);
                    } else {
                        // Never written in this set: sentinel + clean passthrough.
                        assert_eq!(l.time_since_ns, -1);
                        assert_eq!(d.data, c.data);
                        assert_eq!(l.label, 0);
                        assert_eq!(l.drift_pct, 0.0);
                    }
                }
                other => panic!("unexpected op {other}"),
            }
        }
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn set_index_appears_in_the_file_names() {
    let dir = temp_out_dir("names");
    let cfg = SimConfig {
        rows_per_trace: 10,
        ..test_cfg(dir.clone())
    };
    let sets = generate_trace_sets(&cfg).unwrap();
    for (i, paths) in sets.iter().enumerate() {
        for (path, part) in [
            (&paths.clean, format!("clean_{i}.nvt")),
            (&paths.drifted, format!("drift_{i}.nvt")),
            (&paths.labels, format!("labels_{i}.csv")),
        ] {
            let name = path.file_name().unwrap().to_string_lossy();
            assert!(name.ends_with(&part), "{name} should end with {part}");
            assert!(path.exists());
        }
    }
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn output_directory_creation_is_idempotent() {
    let base = temp_out_dir("mkdir");
    let cfg = SimConfig {
        num_trace_sets: 1,
        rows_per_trace: 5,
        ..test_cfg(base.join("nested").join("deep"))
    };
    // Twice: the second run must not fail on the existing directory.
    let _ = generate_trace_sets(&cfg).unwrap();
    let sets = generate_trace_sets(&cfg).unwrap();
    assert!(sets[0].clean.exists());
    let _ = fs::remove_dir_all(&base);
}
