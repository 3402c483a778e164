use thiserror::Error;

/// Failures surfaced by the index engine.
///
/// Absence of a record in [`find_by_id`](crate::Connection::find_by_id) is a
/// normal `None`, not a variant here.
#[derive(Debug, Error)]
pub enum Error {
    /// No index has been built at the configured location yet. The caller
    /// should trigger a build.
    #[error("city index has not been built yet")]
    NotBuilt,

    /// An index is present on disk but could not be read back. Never
    /// auto-recovered; the caller must rebuild.
    #[error("city index is corrupt: {0}")]
    Corrupt(anyhow::Error),

    /// A blank (all-whitespace) name query reached the engine directly. The
    /// HTTP layer pre-filters blank input and returns an empty result instead.
    #[error("blank name query")]
    BlankQuery,

    /// The build was aborted and rolled back; nothing remains on disk.
    #[error("city index build failed: {0}")]
    BuildFailure(anyhow::Error),
}
