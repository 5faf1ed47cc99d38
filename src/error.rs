use thiserror::Error;

/// Recoverable errors of the ECS.
///
/// Contract violations such as stale entity handles are not errors: they panic.
#[derive(Debug, Error)]
pub enum EcsError {
	#[error("cannot register more than {limit} component types")]
	TooManyComponents { limit: usize },

	#[error("component {0} is not registered")]
	UnknownComponent(&'static str),

	#[error("a system named {0:?} is already registered")]
	DuplicateSystem(String),

	#[error("the query of system {0:?} does not declare every component it fetches")]
	UncoveredFetch(String),

	#[error("failed to start worker threads: {0}")]
	ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type EcsResult<T> = Result<T, EcsError>;
