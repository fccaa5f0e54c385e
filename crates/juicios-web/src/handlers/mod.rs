pub mod cases;
pub mod export;
pub mod movements;
pub mod uploads;

use crate::error::Error;

/// Box a backend error into [`Error::Store`].
pub(super) fn store_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
