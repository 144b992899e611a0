//! Background request execution
//!
//! Runs blocking API calls on worker threads and funnels their outcomes
//! back to the main loop over an mpsc channel. The main loop polls on each
//! tick and applies completed responses; worker threads never touch
//! application state.

use crate::model::course::{Course, FilterOptions, UploadReport};
use crate::services::api::ApiError;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Outcome of one background API call, delivered to the main loop.
#[derive(Debug)]
pub enum ApiResponse {
    /// A catalog refresh. `generation` is the refresh counter captured when
    /// the request was started; the app discards responses whose generation
    /// is not the latest, so a slow early refresh can never overwrite a
    /// newer snapshot.
    Catalog {
        generation: u64,
        result: Result<Vec<Course>, ApiError>,
    },
    /// Distinct filter values for the dimension dialogs.
    Options(Result<FilterOptions, ApiError>),
    /// Create/update/delete outcome; on success the message is shown and a
    /// fresh catalog refresh is triggered.
    Mutation(Result<String, ApiError>),
    /// Spreadsheet import outcome.
    Upload(Result<UploadReport, ApiError>),
    /// PDF export outcome; on success carries the written file path.
    Export(Result<PathBuf, ApiError>),
}

/// Spawns API jobs and collects their responses.
pub struct RequestRunner {
    tx: Sender<ApiResponse>,
    rx: Receiver<ApiResponse>,
}

impl RequestRunner {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    /// Run `job` on a fresh worker thread. The job owns everything it needs
    /// (client clone, request parameters) and returns exactly one response.
    pub fn spawn<F>(&self, job: F)
    where
        F: FnOnce() -> ApiResponse + Send + 'static,
    {
        let tx = self.tx.clone();
        thread::spawn(move || {
            // Send fails only if the app is shutting down.
            let _ = tx.send(job());
        });
    }

    /// Drain all responses that have completed since the last poll.
    pub fn poll(&self) -> Vec<ApiResponse> {
        self.rx.try_iter().collect()
    }
}

impl Default for RequestRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_poll_empty_when_nothing_spawned() {
        let runner = RequestRunner::new();
        assert!(runner.poll().is_empty());
    }

    #[test]
    fn test_spawned_job_response_arrives() {
        let runner = RequestRunner::new();
        runner.spawn(|| ApiResponse::Mutation(Ok("done".to_string())));

        let mut responses = Vec::new();
        for _ in 0..50 {
            responses.extend(runner.poll());
            if !responses.is_empty() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(responses.len(), 1);
        match &responses[0] {
            ApiResponse::Mutation(Ok(msg)) => assert_eq!(msg, "done"),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn test_multiple_jobs_all_delivered() {
        let runner = RequestRunner::new();
        runner.spawn(|| ApiResponse::Mutation(Ok("first".to_string())));
        runner.spawn(|| ApiResponse::Mutation(Ok("second".to_string())));

        let mut responses = Vec::new();
        for _ in 0..50 {
            responses.extend(runner.poll());
            if responses.len() == 2 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(responses.len(), 2);
    }
}
