// File bridge contract
// The three attachment operations the view may ask of the trusted host

use std::future::Future;

use crate::models::Attachment;

/// Host-side file operations. Each call is awaited once, runs to completion
/// and cannot be cancelled.
pub trait FileBridge: Send + Sync {
    /// Pick files and copy them into private storage. Cancelling the picker
    /// yields an empty list; a copy failure fails the whole call.
    fn importFiles(&self) -> impl Future<Output = Result<Vec<Attachment>, String>> + Send;

    /// Open `path` with the system's default application. Empty paths are ignored.
    fn openFile(&self, path: &str) -> impl Future<Output = Result<(), String>> + Send;

    /// Delete `path`; `true` when it is gone afterwards.
    fn deleteFile(&self, path: &str) -> impl Future<Output = bool> + Send;
}
