//! Bounded worker pool for running a pure function over independent inputs.
//!
//! [`dispatch`] queues every input on a FIFO channel, starts at most
//! `num_workers` named threads that pull from it, blocks until every task has
//! finished, and returns the outputs in input order. Nothing is shared
//! between tasks except the function itself; each input is moved into the
//! worker that runs it.
//!
//! ```text
//!   inputs ──► [ task queue (FIFO) ] ──► worker-0 ─┐
//!                                   ├──► worker-1 ─┼──► [ results ] ──► outputs[i]
//!                                   └──► worker-N ─┘
//! ```

use std::io;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur while dispatching work.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Worker pool needs at least one worker")]
    NoWorkers,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),

    #[error("Worker {worker} panicked")]
    WorkerPanicked { worker: usize },

    #[error("Task {index} produced no output")]
    MissingOutput { index: usize },
}

/// Run `func` over every input on up to `num_workers` threads.
///
/// Blocks until all tasks complete. `outputs[i]` is `func(inputs[i])`.
/// Fewer threads are started when there are fewer inputs than workers.
pub fn dispatch<I, O, F>(func: F, inputs: Vec<I>, num_workers: usize) -> Result<Vec<O>, PoolError>
where
    I: Send,
    O: Send,
    F: Fn(I) -> O + Sync,
{
    if num_workers == 0 {
        return Err(PoolError::NoWorkers);
    }

    let num_tasks = inputs.len();
    if num_tasks == 0 {
        return Ok(Vec::new());
    }

    let (task_tx, task_rx) = unbounded::<(usize, I)>();
    let (result_tx, result_rx) = unbounded::<(usize, O)>();

    for task in inputs.into_iter().enumerate() {
        // Receiver is alive until the scope below ends
        let _ = task_tx.send(task);
    }
    // Workers stop once the queue is drained
    drop(task_tx);

    let num_threads = num_workers.min(num_tasks);
    debug!(tasks = num_tasks, workers = num_threads, "Starting workers");

    let func = &func;
    thread::scope(|scope| -> Result<(), PoolError> {
        let mut handles = Vec::with_capacity(num_threads);
        for worker_id in 0..num_threads {
            let task_rx = task_rx.clone();
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("worker-{}", worker_id))
                .spawn_scoped(scope, move || {
                    worker_loop(worker_id, func, task_rx, result_tx)
                })?;
            handles.push(handle);
        }

        // Join every worker before reporting, so no panic escapes the scope
        let mut panicked = None;
        for (worker_id, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && panicked.is_none() {
                panicked = Some(worker_id);
            }
        }
        debug!("Workers stopped");

        match panicked {
            Some(worker) => Err(PoolError::WorkerPanicked { worker }),
            None => Ok(()),
        }
    })?;
    drop(result_tx);

    let mut outputs: Vec<Option<O>> = (0..num_tasks).map(|_| None).collect();
    for (index, output) in result_rx.iter() {
        outputs[index] = Some(output);
    }

    outputs
        .into_iter()
        .enumerate()
        .map(|(index, output)| output.ok_or(PoolError::MissingOutput { index }))
        .collect()
}

fn worker_loop<I, O, F>(
    worker_id: usize,
    func: &F,
    tasks: Receiver<(usize, I)>,
    results: Sender<(usize, O)>,
) where
    F: Fn(I) -> O,
{
    for (index, input) in tasks.iter() {
        trace!(worker = worker_id, task = index, "Starting task");
        let output = func(input);
        if results.send((index, output)).is_err() {
            break;
        }
        trace!(worker = worker_id, task = index, "Finished task");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn test_outputs_aligned_with_inputs() {
        let inputs: Vec<u64> = (0..100).collect();
        let outputs = dispatch(|x| x * x, inputs, 8).unwrap();
        let expected: Vec<u64> = (0..100).map(|x| x * x).collect();
        assert_eq!(outputs, expected);
    }

    #[test]
    fn test_slow_early_tasks_keep_order() {
        // Early tasks finish last; output order must still follow input order
        let inputs: Vec<u64> = (0..6).rev().collect();
        let outputs = dispatch(
            |ms| {
                std::thread::sleep(Duration::from_millis(ms * 5));
                ms
            },
            inputs.clone(),
            3,
        )
        .unwrap();
        assert_eq!(outputs, inputs);
    }

    #[test]
    fn test_worker_count_is_bounded() {
        let names = Mutex::new(HashSet::new());
        dispatch(
            |_: u32| {
                let name = std::thread::current().name().map(str::to_string);
                names.lock().unwrap().insert(name);
                std::thread::sleep(Duration::from_millis(2));
            },
            (0..40).collect(),
            3,
        )
        .unwrap();

        let names = names.into_inner().unwrap();
        assert!(!names.is_empty() && names.len() <= 3);
        for name in names {
            assert!(name.unwrap().starts_with("worker-"));
        }
    }

    #[test]
    fn test_empty_inputs() {
        let outputs: Vec<u8> = dispatch(|x: u8| x, Vec::new(), 4).unwrap();
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = dispatch(|x: u8| x, vec![1, 2], 0).unwrap_err();
        assert!(matches!(err, PoolError::NoWorkers));
    }

    #[test]
    fn test_panicking_task_reported() {
        let err = dispatch(
            |x: u8| {
                if x == 3 {
                    panic!("boom");
                }
                x
            },
            vec![1, 2, 3, 4],
            2,
        )
        .unwrap_err();
        assert!(matches!(err, PoolError::WorkerPanicked { .. }));
    }
}
