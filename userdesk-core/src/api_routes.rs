//! HTTP paths served by userdesk, shared by the server and its tests.

/// Front-end page.
pub const INDEX: &str = "/";

/// Liveness plus store connectivity.
pub const HEALTH: &str = "/health";

/// Tagged mutation endpoint (POST only).
pub const USER_ACTION: &str = "/api/user-action";

/// Account listing (GET only).
pub const USERS: &str = "/api/usuarios";

/// English alias of [`USERS`].
pub const USERS_ALIAS: &str = "/api/users";
