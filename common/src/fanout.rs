use rayon::prelude::*;

/// Fans `items` out over the rayon pool, blocks until every task has
/// completed, and returns the results in submission order. There is no
/// cancellation and no partial result: stragglers always run to the end.
///
/// This is the one concurrency primitive the search core uses; parallel
/// simulation, per-child simulation and parallel tree building all go
/// through it.
pub fn fan_out_join<T, R, F>(items: Vec<T>, task: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Sync + Send,
{
    items.into_par_iter().map(task).collect()
}

/// Runs the same task `count` times concurrently, passing the run index.
pub fn fan_out_join_n<R, F>(count: usize, task: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    fan_out_join((0..count).collect(), task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_results_keep_submission_order() {
        let results = fan_out_join(vec![3u64, 1, 4, 1, 5, 9, 2, 6], |n| n * 10);

        assert_eq!(results, vec![30, 10, 40, 10, 50, 90, 20, 60]);
    }

    #[test]
    fn test_every_task_runs_exactly_once() {
        let ran = AtomicUsize::new(0);

        let results = fan_out_join_n(64, |i| {
            ran.fetch_add(1, Ordering::SeqCst);
            i
        });

        assert_eq!(ran.load(Ordering::SeqCst), 64);
        assert_eq!(results, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let results: Vec<u8> = fan_out_join(Vec::<u8>::new(), |n| n);

        assert!(results.is_empty());
    }
}
