use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crossbeam::channel::{Receiver, Sender};

use crate::{
    retarget::{retarget_rig, Outcome, RetargetRequest},
    rig::Rig,
};

/// Shared flag that stops workers from starting on further rigs.
#[derive(Clone, Default, Debug)]
pub struct CancelToken(Arc<AtomicBool>);
impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct RetargetTask {
    /// position of the rig in the submitted batch
    pub position: usize,
    pub rig: Rig,
}

pub struct RetargetResponse {
    pub position: usize,
    pub rig: Rig,
    /// `None` when the batch was cancelled before this rig was picked up
    pub outcome: Option<Outcome>,
}

fn worker_loop(
    rx: Receiver<RetargetTask>,
    tx: Sender<RetargetResponse>,
    request: Arc<RetargetRequest>,
    cancel: CancelToken,
) {
    while let Ok(RetargetTask { position, mut rig }) = rx.recv() {
        let outcome = if cancel.is_cancelled() {
            None
        } else {
            Some(retarget_rig(&mut rig, &request))
        };
        if tx.send(RetargetResponse { position, rig, outcome }).is_err() {
            break;
        }
    }
}

/// Each rig is moved to exactly one worker, so no two workers ever touch the same rig.
pub struct WorkerPool {
    workers: Vec<std::thread::JoinHandle<()>>,
}
impl WorkerPool {
    pub fn init(
        worker_count: usize,
        request: RetargetRequest,
        cancel: CancelToken,
    ) -> (Self, Sender<RetargetTask>, Receiver<RetargetResponse>) {
        let (req_tx, req_rx) = crossbeam::channel::unbounded::<RetargetTask>();
        let (res_tx, res_rx) = crossbeam::channel::unbounded::<RetargetResponse>();
        let request = Arc::new(request);

        let workers = (0..worker_count.max(1))
            .map(|_| {
                let rx = req_rx.clone();
                let tx = res_tx.clone();
                let request = request.clone();
                let cancel = cancel.clone();
                std::thread::spawn(move || {
                    worker_loop(rx, tx, request, cancel);
                })
            })
            .collect();

        let this = Self { workers };

        (this, req_tx, res_rx)
    }

    pub fn join(self) {
        for worker in self.workers {
            if worker.join().is_err() {
                log::error!("retarget worker panicked");
            }
        }
    }
}

/// Retargets `rigs` on `worker_count` threads and hands them back in submission order.
pub fn retarget_batch(
    rigs: Vec<Rig>,
    request: &RetargetRequest,
    worker_count: usize,
    cancel: &CancelToken,
) -> Vec<RetargetResponse> {
    let (pool, task_tx, res_rx) = WorkerPool::init(worker_count, request.clone(), cancel.clone());

    let count = rigs.len();
    for (position, rig) in rigs.into_iter().enumerate() {
        if task_tx.send(RetargetTask { position, rig }).is_err() {
            log::error!("retarget workers stopped before the batch was submitted");
            break;
        }
    }
    drop(task_tx);

    let mut responses: Vec<RetargetResponse> = res_rx.iter().collect();
    pool.join();
    if responses.len() != count {
        log::error!("{} of {} rigs came back from the workers", responses.len(), count);
    }
    responses.sort_by_key(|response| response.position);
    responses
}
