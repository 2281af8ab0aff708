use ndarray::array;

use crate::errors::ReconError;
use crate::train::{LossLog, LossRecord};

fn sample_log() -> LossLog {
    let mut log = LossLog::new(&["relu", "siren"]);
    log.push(LossRecord {
        noisy: vec![0.5, 0.4],
        clean: vec![0.45, 0.35],
    })
    .unwrap();
    log.push(LossRecord {
        noisy: vec![0.3, 0.2],
        clean: vec![0.25, 0.15],
    })
    .unwrap();
    log
}

#[test]
fn test_push_and_series() {
    let log = sample_log();
    assert_eq!(log.len(), 2);
    assert!(!log.is_empty());
    assert_eq!(log.labels(), &["relu".to_string(), "siren".to_string()]);
    assert_eq!(log.series(1, false), vec![0.4, 0.2]);
    assert_eq!(log.series(0, true), vec![0.45, 0.25]);
    assert!(log.series(5, false).is_empty());
}

#[test]
fn test_push_rejects_wrong_width() {
    let mut log = LossLog::new(&["relu", "siren"]);
    let result = log.push(LossRecord {
        noisy: vec![0.5],
        clean: vec![0.5, 0.5],
    });
    assert!(matches!(result, Err(ReconError::ShapeMismatch { .. })));
    assert!(log.is_empty());
}

#[test]
fn test_to_array_puts_noisy_columns_first() {
    let log = sample_log();
    assert_eq!(
        log.to_array(),
        array![[0.5, 0.4, 0.45, 0.35], [0.3, 0.2, 0.25, 0.15]]
    );
}

#[test]
fn test_json_export_reloads() {
    let log = sample_log();
    let path = std::env::temp_dir().join("coord_recon_loss_log_test.json");
    log.save_json(&path).unwrap();
    assert_eq!(LossLog::load_json(&path).unwrap(), log);
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_npy_export_reloads() {
    let log = sample_log();
    let path = std::env::temp_dir().join("coord_recon_loss_log_test.npy");
    log.write_npy(&path).unwrap();
    let loaded: ndarray::Array2<f32> = ndarray_npy::read_npy(&path).unwrap();
    assert_eq!(loaded, log.to_array());
    let _ = std::fs::remove_file(path);
}
