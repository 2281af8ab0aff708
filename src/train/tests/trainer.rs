use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array2;

use super::{tiny_config, tiny_data};
use crate::errors::{ReconError, Result};
use crate::nn::{Module, models};
use crate::train::trainer::progress_line;
use crate::train::{
    Checkpoint, JointTrainer, LossLog, NeverStop, NullReporter, Reporter, StopFlag, StopWhen,
};

/// 记录检查点与收尾调用的报告器
#[derive(Default)]
struct Recorder {
    checkpoints: Vec<(usize, Vec<String>, usize)>,
    finished_with: Option<usize>,
}

impl Reporter for Recorder {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint<'_>) -> Result<()> {
        assert_eq!(checkpoint.predictions.len(), checkpoint.labels.len());
        assert_eq!(checkpoint.record.noisy.len(), checkpoint.labels.len());
        self.checkpoints.push((
            checkpoint.iteration,
            checkpoint.labels.to_vec(),
            checkpoint.predictions[0].nrows(),
        ));
        Ok(())
    }

    fn on_finish(&mut self, log: &LossLog) -> Result<()> {
        self.finished_with = Some(log.len());
        Ok(())
    }
}

#[test]
fn test_step_records_both_losses() {
    let config = tiny_config();
    let mut trainer =
        JointTrainer::new(tiny_data(&config), models::build_all(&config), &config).unwrap();
    assert_eq!(trainer.labels(), &["relu", "relu_pe", "siren"]);

    let output = trainer.step().unwrap();
    assert_eq!(output.record.noisy.len(), 3);
    assert_eq!(output.record.clean.len(), 3);
    assert!(
        output
            .record
            .noisy
            .iter()
            .chain(&output.record.clean)
            .all(|l| l.is_finite() && *l >= 0.0)
    );
    assert!(output.predictions.iter().all(|p| p.shape() == [16, 3]));
    // 三个模型共用一个Adam，步数只加一次
    assert_eq!(trainer.optimizer().timestep(), 1);
}

#[test]
fn test_step_updates_every_model() {
    let config = tiny_config();
    let mut trainer =
        JointTrainer::new(tiny_data(&config), models::build_all(&config), &config).unwrap();
    let before: Vec<Vec<Array2<f32>>> = trainer
        .models()
        .iter()
        .map(|m| m.parameters().iter().map(|p| p.value().clone()).collect())
        .collect();
    trainer.step().unwrap();
    for (model, old) in trainer.models().iter().zip(&before) {
        let changed = model
            .parameters()
            .iter()
            .zip(old)
            .any(|(p, o)| p.value() != o);
        assert!(changed, "{}的参数未被更新", model.name());
    }
}

#[test]
fn test_run_checkpoints_and_finish() {
    let config = tiny_config();
    let mut trainer =
        JointTrainer::new(tiny_data(&config), models::build_all(&config), &config).unwrap();
    let mut recorder = Recorder::default();
    let outcome = trainer.run(&mut NeverStop, &mut recorder).unwrap();

    assert_eq!(outcome.log.len(), 5);
    assert!(!outcome.stopped_early);
    let iterations: Vec<usize> = recorder.checkpoints.iter().map(|c| c.0).collect();
    assert_eq!(iterations, vec![0, 2, 4]);
    assert!(recorder.checkpoints.iter().all(|c| c.1.len() == 3 && c.2 == 16));
    assert_eq!(recorder.finished_with, Some(5));
    assert_eq!(trainer.optimizer().timestep(), 5);
}

#[test]
fn test_stop_is_polled_only_at_checkpoints() {
    let config = tiny_config();
    let mut trainer =
        JointTrainer::new(tiny_data(&config), models::build_all(&config), &config).unwrap();
    let polled = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&polled);
    let mut stop = StopWhen(move |i: usize| {
        seen.borrow_mut().push(i);
        i >= 2
    });
    let mut recorder = Recorder::default();
    let outcome = trainer.run(&mut stop, &mut recorder).unwrap();

    assert!(outcome.stopped_early);
    assert_eq!(*polled.borrow(), vec![0, 2]);
    assert_eq!(outcome.log.len(), 3);
    assert_eq!(recorder.finished_with, Some(3));
}

#[test]
fn test_stop_flag_set_beforehand_stops_after_first_iteration() {
    let config = tiny_config();
    let mut trainer =
        JointTrainer::new(tiny_data(&config), models::build_all(&config), &config).unwrap();
    let mut flag = StopFlag::new();
    flag.request_stop();
    let outcome = trainer.run(&mut flag, &mut NullReporter).unwrap();
    assert!(outcome.stopped_early);
    assert_eq!(outcome.log.len(), 1);
}

#[test]
fn test_zero_noise_makes_curves_coincide() {
    let config = tiny_config();
    let zero_noise = crate::config::FitConfig {
        noise_std: 0.0,
        ..config
    };
    let mut trainer = JointTrainer::new(
        tiny_data(&zero_noise),
        models::build_all(&zero_noise),
        &zero_noise,
    )
    .unwrap();
    let outcome = trainer.run(&mut NeverStop, &mut NullReporter).unwrap();
    for record in outcome.log.records() {
        assert_eq!(record.noisy, record.clean);
    }
}

#[test]
fn test_rejects_empty_model_list() {
    let config = tiny_config();
    let models: Vec<Box<dyn Module>> = Vec::new();
    let result = JointTrainer::new(tiny_data(&config), models, &config);
    assert!(matches!(result, Err(ReconError::InvalidConfig(_))));
}

#[test]
fn test_progress_line_uses_six_decimals() {
    let labels = ["relu", "relu_pe", "siren"].map(String::from);
    assert_eq!(
        progress_line(&labels, &[0.5, 0.0123456789, 1.25]),
        "relu loss: 0.500000, relu_pe loss: 0.012346, siren loss: 1.250000"
    );
}
