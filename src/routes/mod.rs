/// Router Module Index
///
/// Organizes the application's routing logic into security-segregated
/// modules, so access control is applied explicitly at the module level
/// (via Axum layers) and protected endpoints cannot be exposed by accident.

/// Routes accessible to all clients: health check and the read-only
/// public mirrors.
pub mod public;

/// Identity endpoints (login, admin creation). Unauthenticated by design:
/// they are how a client obtains a token in the first place.
pub mod admin;

/// The five record-collection CRUD surfaces. Every route in this module is
/// gated by the bearer-token middleware.
pub mod authenticated;
