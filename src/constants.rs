use std::time::Duration;

/// Interval between task status polls while the worker is running.
///
/// Bounds the staleness of cross-process status observation without
/// saturating the store with queries. Deliberately not configurable.
pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Grace period granted to the worker after a store-observed completion or
/// failure before it is forcefully killed.
pub const TERMINATION_GRACE_PERIOD: Duration = Duration::from_secs(5);

/// Grace period granted to the worker when supervision is cancelled.
pub const CANCELLATION_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Environment variable carrying the task id into the worker process.
pub const TASK_ID_ENV_VAR: &str = "TASKHERD_TASK_ID";

/// Default worker program when the configuration does not name one.
pub const DEFAULT_WORKER_COMMAND: &str = "claude";

/// Default prefix for terminal session names.
pub const DEFAULT_SESSION_PREFIX: &str = "taskherd";

/// Application directory name used under the platform config/data roots.
pub const APP_DIR_NAME: &str = "taskherd";
