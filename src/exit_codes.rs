//! Exit code constants for the grace-dizmo CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unknown task, unreadable input)
//! - 2: Configuration error (missing key, wrong format, key not allowed)
//! - 3: Store failure (login rejected, server error, upload rejected)
//! - 4: Filesystem failure (not writable, folder removal, missing file)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unknown task, or unreadable input.
pub const USER_ERROR: i32 = 1;

/// Configuration error: a key is missing, malformed, or not allowed.
pub const CONFIG_ERROR: i32 = 2;

/// Store failure: login rejected, non-2xx response, or transport failure.
pub const STORE_FAILURE: i32 = 3;

/// Filesystem failure: a file could not be written, moved, removed, or found.
pub const FILESYSTEM_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            CONFIG_ERROR,
            STORE_FAILURE,
            FILESYSTEM_FAILURE,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
