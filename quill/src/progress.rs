/// Receives progress updates from long running operations, like writing mappings.
///
/// Calls are fire-and-forget, a listener can't influence or abort the operation.
pub trait ProgressListener {
	/// Called once before any work is done, with the number of steps that will follow.
	fn init(&mut self, total_work: usize, title: &str);

	/// Called when starting the next step, with `num_done` out of the total given to [`ProgressListener::init`]
	/// already completed.
	fn step(&mut self, num_done: usize, message: &str);
}

/// Ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
	fn init(&mut self, _total_work: usize, _title: &str) {}

	fn step(&mut self, _num_done: usize, _message: &str) {}
}
