//!
//! End-to-end Pattern Tests
//!
//! Exercises the three demo patterns through the public API only, the way
//! the CLI wires them: a summing worker delivering its result through a
//! one-shot channel, the same worker configured to fail, and the
//! mutual-exclusion accumulation across ten workers.
//!

use std::time::Duration;

use threadlab::{
    ComputeError, RecvError, Worker, accumulate, expected_total, oneshot, sum_up_to,
};

#[test]
fn summing_worker_delivers_result_through_channel() {
    let (producer, waiter) = oneshot();
    let worker = Worker::spawn("summer", move || {
        std::thread::sleep(Duration::from_millis(25));
        match sum_up_to(100_000) {
            Ok(total) => producer.publish(total),
            Err(err) => producer.publish_err(err),
        }
    })
    .unwrap();

    assert_eq!(waiter.wait(), Ok(5_000_050_000));
    worker.join();
}

#[test]
fn failing_worker_delivers_error_not_value() {
    let (producer, waiter) = oneshot::<i64>();
    let worker = Worker::spawn("summer", move || {
        producer.publish_err(ComputeError::Injected);
    })
    .unwrap();

    assert_eq!(waiter.wait(), Err(RecvError::Compute(ComputeError::Injected)));
    worker.join();
}

#[test]
fn negative_input_travels_as_domain_error() {
    let (producer, waiter) = oneshot::<i64>();
    let worker = Worker::spawn("summer", move || match sum_up_to(-7) {
        Ok(total) => producer.publish(total),
        Err(err) => producer.publish_err(err),
    })
    .unwrap();

    assert_eq!(
        waiter.wait(),
        Err(RecvError::Compute(ComputeError::NegativeInput(-7)))
    );
    worker.join();
}

#[test]
fn ten_workers_accumulate_without_lost_updates() {
    let total = accumulate(10, 10_000).unwrap();
    assert_eq!(total, 500_050_000);
    assert_eq!(total, expected_total(10, 10_000));
}
