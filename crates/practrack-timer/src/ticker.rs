//! 취소 가능한 주기 태스크.
//!
//! `tokio::time::interval` 루프를 태스크로 띄우고 핸들로 소유한다.
//! 핸들을 drop하거나 `cancel()`하면 태스크가 중단된다.

use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// 주기 태스크 핸들
#[derive(Debug)]
pub struct TickHandle {
    handle: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// `start + period`부터 `period` 간격으로 `on_tick` 실행
    ///
    /// `on_tick`이 `ControlFlow::Break`를 반환하면 루프를 끝낸다.
    /// 밀린 틱은 따라잡지 않고 건너뛴다. tokio 런타임 안에서 호출해야 한다.
    pub fn spawn<F>(start: Instant, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(start + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    break;
                }
            }
        });

        Self {
            handle: Some(handle),
        }
    }

    /// 태스크 중단. 이미 중단됐으면 no-op (false 반환)
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// 태스크가 아직 살아 있는지
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn counting(counter: &Arc<AtomicU64>) -> impl FnMut() -> ControlFlow<()> + Send + 'static {
        let counter = counter.clone();
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ControlFlow::Continue(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let counter = Arc::new(AtomicU64::new(0));
        let _handle = TickHandle::spawn(Instant::now(), Duration::from_secs(1), counting(&counter));

        time::sleep(Duration::from_millis(3_500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_ticking_and_is_idempotent() {
        let counter = Arc::new(AtomicU64::new(0));
        let mut handle =
            TickHandle::spawn(Instant::now(), Duration::from_secs(1), counting(&counter));

        time::sleep(Duration::from_millis(1_500)).await;
        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert!(!handle.is_active());

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn break_ends_loop() {
        let counter = Arc::new(AtomicU64::new(0));
        let c = counter.clone();
        let handle = TickHandle::spawn(Instant::now(), Duration::from_secs(1), move || {
            if c.fetch_add(1, Ordering::SeqCst) + 1 >= 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(!handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels() {
        let counter = Arc::new(AtomicU64::new(0));
        let handle = TickHandle::spawn(Instant::now(), Duration::from_secs(1), counting(&counter));
        drop(handle);

        time::sleep(Duration::from_secs(3)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
