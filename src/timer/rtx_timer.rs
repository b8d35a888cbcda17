use std::sync::Weak;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::time::Duration;

use crate::association::RtxTimerId;

/// max_retries value meaning "never give up": T2-shutdown, T3-rtx and the
/// RECONFIG timer all retransmit forever per RFC 4960.
pub(crate) const NO_MAX_RETRANS: usize = 0;
/// max_retries for T1-init and T1-cookie, per RFC 4960 Sec 15.
pub(crate) const MAX_INIT_RETRANS: usize = 8;

/// rtxTimerObserver is the interface to a retransmission timer observer.
#[async_trait]
pub(crate) trait RtxTimerObserver {
    async fn on_retransmission_timeout(&mut self, id: RtxTimerId, n_rtos: usize);
    async fn on_retransmission_failure(&mut self, id: RtxTimerId);
}

#[derive(Default)]
struct RtxTimerInternal {
    close_tx: Option<mpsc::Sender<()>>,
}

/// rtxTimer provides the retransmission timer conforming to RFC 4960 Sec 6.3.1.
/// Unlike AckTimer, a stopped rtxTimer remains usable: start() may be called
/// again to begin a fresh run with its own exponential backoff sequence.
pub(crate) struct RtxTimer<T: 'static + RtxTimerObserver + Send> {
    timeout_observer: Weak<Mutex<T>>,
    id: RtxTimerId,
    max_retries: usize,
    internal: Mutex<RtxTimerInternal>,
}

impl<T: 'static + RtxTimerObserver + Send> RtxTimer<T> {
    pub(crate) fn new(timeout_observer: Weak<Mutex<T>>, id: RtxTimerId, max_retries: usize) -> Self {
        RtxTimer {
            timeout_observer,
            id,
            max_retries,
            internal: Mutex::new(RtxTimerInternal::default()),
        }
    }

    /// start (re)starts the timer with the given initial rto. If the timer is
    /// already running, this is a no-op; callers that want a fresh backoff
    /// sequence must stop() first.
    pub(crate) async fn start(&self, rto: Duration) -> bool {
        {
            let internal = self.internal.lock().await;
            if internal.close_tx.is_some() {
                return false;
            }
        }

        let (close_tx, mut close_rx) = mpsc::channel(1);
        let timeout_observer = self.timeout_observer.clone();
        let id = self.id;
        let max_retries = self.max_retries;

        tokio::spawn(async move {
            let mut n_rtos = 0usize;
            let mut rto = rto;

            loop {
                let timer = tokio::time::sleep(rto);
                tokio::pin!(timer);

                tokio::select! {
                    _ = timer.as_mut() => {
                        n_rtos += 1;

                        if max_retries != NO_MAX_RETRANS && n_rtos > max_retries {
                            if let Some(observer) = timeout_observer.upgrade() {
                                let mut observer = observer.lock().await;
                                observer.on_retransmission_failure(id).await;
                            }
                            break;
                        }

                        if let Some(observer) = timeout_observer.upgrade() {
                            let mut observer = observer.lock().await;
                            observer.on_retransmission_timeout(id, n_rtos).await;
                        } else {
                            break;
                        }

                        // RFC 4960 Sec 6.3.3: back off the RTO on every retransmission,
                        // capped the same way RtoManager caps its own estimate.
                        rto = std::cmp::min(rto * 2, Duration::from_secs(60));
                    }
                    _ = close_rx.recv() => {
                        break;
                    }
                }
            }
        });

        let mut internal = self.internal.lock().await;
        internal.close_tx = Some(close_tx);
        true
    }

    /// stop cancels the current run. The timer may be start()-ed again.
    pub(crate) async fn stop(&self) {
        let mut internal = self.internal.lock().await;
        internal.close_tx.take();
    }

    /// isRunning tests if the timer is running. Debug purpose only.
    pub(crate) async fn is_running(&self) -> bool {
        let internal = self.internal.lock().await;
        internal.close_tx.is_some()
    }
}
