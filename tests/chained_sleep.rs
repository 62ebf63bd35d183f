//! Async chained sleep over a bounded async delay.
mod helpers;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use helpers::{bound, MockTimer};
use safe_timers::scheduling::sleep::{sleep_chained, sleep_chained_or_cancel, SleepOutcome};
use safe_timers::ScheduleError;
use tokio::time::{sleep, Duration, Instant};

#[tokio::test(start_paused = true)]
async fn short_sleep_is_a_single_delay() {
    let mut timer = MockTimer::new();
    let started = Instant::now();

    let hops = sleep_chained(&mut timer, 500, bound(3000))
        .await
        .expect("sleep");

    assert_eq!(hops, 1);
    assert_eq!(timer.delays, vec![500]);
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn long_sleep_is_chained() {
    let mut timer = MockTimer::new();
    let started = Instant::now();

    let hops = sleep_chained(&mut timer, 3500, bound(3000))
        .await
        .expect("sleep");

    assert_eq!(hops, 2);
    assert_eq!(timer.delays, vec![3000, 500]);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(3500));
    assert!(elapsed < Duration::from_millis(3600));
}

#[tokio::test(start_paused = true)]
async fn very_long_sleep_with_default_bound() {
    let mut timer = MockTimer::new();
    let forty_days = 40 * 24 * 3_600_000u64;

    let hops = sleep_chained(&mut timer, forty_days, safe_timers::ClampBound::DEFAULT)
        .await
        .expect("sleep");

    assert_eq!(hops, 2);
    assert_eq!(timer.delays, vec![2_147_483_647, 1_308_516_353]);
}

#[tokio::test(start_paused = true)]
async fn sleep_can_be_cancelled_between_hops() {
    let mut timer = MockTimer::new();
    let cancel: Signal<NoopRawMutex, ()> = Signal::new();

    let sleeper = sleep_chained_or_cancel(&mut timer, 10_000, bound(3000), &cancel);
    let canceller = async {
        sleep(Duration::from_millis(4000)).await;
        cancel.signal(());
    };

    let (outcome, ()) = tokio::join!(sleeper, canceller);
    assert_eq!(outcome, Ok(SleepOutcome::Cancelled));
    assert_eq!(timer.delays, vec![3000, 3000]);
}

#[tokio::test(start_paused = true)]
async fn uncancelled_sleep_reports_hops() {
    let mut timer = MockTimer::new();
    let cancel: Signal<NoopRawMutex, ()> = Signal::new();

    let outcome = sleep_chained_or_cancel(&mut timer, 6500, bound(3000), &cancel).await;
    assert_eq!(outcome, Ok(SleepOutcome::Elapsed { hops: 3 }));
}

#[tokio::test(start_paused = true)]
async fn overflowing_sleep_is_rejected() {
    let mut timer = MockTimer::new();
    tokio::time::advance(Duration::from_millis(10)).await;
    let result = sleep_chained(&mut timer, u64::MAX, bound(3000)).await;
    assert!(matches!(
        result,
        Err(ScheduleError::DeadlineOverflow { delay_ms: u64::MAX, .. })
    ));
    assert!(timer.delays.is_empty());
}
