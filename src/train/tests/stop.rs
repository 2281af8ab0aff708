use crate::train::{NeverStop, StopFile, StopFlag, StopSignal, StopWhen};

#[test]
fn test_never_stop() {
    let mut stop = NeverStop;
    assert!((0..1000).all(|i| !stop.should_stop(i)));
}

#[test]
fn test_stop_flag_is_shared() {
    let flag = StopFlag::new();
    let mut signal = flag.clone();
    assert!(!signal.should_stop(0));

    std::thread::spawn(move || flag.request_stop()).join().unwrap();
    assert!(signal.is_requested());
    assert!(signal.should_stop(100));
}

#[test]
fn test_stop_when_closure() {
    let mut polled = Vec::new();
    let mut stop = StopWhen(|i: usize| {
        polled.push(i);
        i >= 200
    });
    assert!(!stop.should_stop(0));
    assert!(!stop.should_stop(100));
    assert!(stop.should_stop(200));
    drop(stop);
    assert_eq!(polled, vec![0, 100, 200]);
}

#[test]
fn test_stop_file_appears() {
    let path = std::env::temp_dir().join("coord_recon_stop_file_test");
    let _ = std::fs::remove_file(&path);
    let mut stop = StopFile::new(&path);
    assert!(!stop.should_stop(0));

    std::fs::write(&path, b"").unwrap();
    assert!(stop.should_stop(100));
    let _ = std::fs::remove_file(path);
}
