//! Resolution of the user performing a deployment.

/// Variables consulted in order: the Windows one first, then the POSIX one.
pub const USERNAME_VARS: [&str; 2] = ["USERNAME", "USER"];

/// Returns the first non-empty value `lookup` yields for [`USERNAME_VARS`].
pub fn resolve_username_with<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    USERNAME_VARS
        .iter()
        .filter_map(|&name| lookup(name))
        .find(|value| !value.is_empty())
}

/// Resolves the current user from the process environment.
pub fn resolve_username() -> Option<String> {
    resolve_username_with(|name| std::env::var(name).ok())
}
