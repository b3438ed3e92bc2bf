//! Result type alias for the collector

use super::errors::CollectorError;

/// Result type alias for collector operations
///
/// # Examples
///
/// ```
/// use nos_config_collector::domain::result::Result;
/// use nos_config_collector::domain::errors::CollectorError;
///
/// fn failing_function() -> Result<()> {
///     Err(CollectorError::Configuration("Invalid input".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, CollectorError>;
