//! Growing independent proof trees on a worker pool.
use crossbeam::channel;
use log::{debug, trace};
use seqformal::sequent::Sequent;

use crate::decomposer::Decomposer;
use crate::tree::ProofTree;
use crate::utils::error::{SeqError, SeqResult};
use crate::witness::WitnessPool;

/// Number of workers used when the caller passes `0`.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Grow one tree per sequent, spreading the work over `workers` threads (`0` picks
/// [`default_workers`]).
///
/// Results come back in input order, each with its own error. The outer error only reports
/// a worker that panicked.
pub fn grow_many(
    sequents: Vec<Sequent>,
    decomposer: &Decomposer,
    pool: &WitnessPool,
    workers: usize,
) -> SeqResult<Vec<SeqResult<ProofTree>>> {
    let total = sequents.len();
    let workers = match workers {
        0 => default_workers(),
        n => n,
    }
    .min(total.max(1));
    debug!("Growing {} proof tree(s) on {} worker(s)", total, workers);

    let (job_tx, job_rx) = channel::unbounded::<(usize, Sequent)>();
    let (result_tx, result_rx) = channel::unbounded::<(usize, SeqResult<ProofTree>)>();
    for job in sequents.into_iter().enumerate() {
        // The receiver lives until the end of this function.
        let _ = job_tx.send(job);
    }
    drop(job_tx);

    crossbeam::thread::scope(|scope| {
        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move |_| {
                for (index, sequent) in job_rx.iter() {
                    trace!("Worker {} grows sequent #{}", worker, index);
                    let result = ProofTree::grown(sequent, decomposer, pool);
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
    })
    .map_err(|_| SeqError::Unknown("a proof tree worker panicked".to_string()))?;
    drop(result_tx);

    let mut slots: Vec<Option<SeqResult<ProofTree>>> = (0..total).map(|_| None).collect();
    for (index, result) in result_rx.iter() {
        slots[index] = Some(result);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.ok_or_else(|| SeqError::Unknown(format!("no result for sequent #{index}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Discipline, RuleConfig};

    #[test]
    fn results_keep_input_order() {
        let decomposer = Decomposer::new(RuleConfig::uniform(Discipline::Multiplicative));
        let inputs = ["A & B; A", "A; B", "; A v ~A", "~~A; A"];
        let sequents: Vec<Sequent> = inputs.iter().map(|s| s.parse().unwrap()).collect();
        let trees = grow_many(sequents.clone(), &decomposer, &WitnessPool::empty(), 3).unwrap();
        assert_eq!(trees.len(), inputs.len());
        for (tree, sequent) in trees.iter().zip(&sequents) {
            let tree = tree.as_ref().unwrap();
            assert_eq!(tree.root(), sequent);
            assert!(tree.is_grown());
        }
    }

    #[test]
    fn empty_input() {
        let decomposer = Decomposer::new(RuleConfig::uniform(Discipline::Additive));
        let trees = grow_many(Vec::new(), &decomposer, &WitnessPool::empty(), 0).unwrap();
        assert!(trees.is_empty());
    }
}
