//! C ABI for `taihen-config`, matching the historical `taihen/parser.h`:
//!
//! ```c
//! typedef void (* taihen_config_handler)(const char *module, void *param);
//!
//! int taihen_config_validate(const char *input);
//! void taihen_config_parse(const char *input, const char *section,
//!                          taihen_config_handler handler, void *param);
//! ```

use core::ffi::{CStr, c_char, c_int, c_void};

use taihen_config::{MAX_LINE_LENGTH, TokenizeError, for_each_path, validate};
use tracing::debug;

/// Receives one module path per call. `module` is NUL-terminated and only
/// valid for the duration of the call.
pub type TaihenConfigHandler = Option<unsafe extern "C" fn(module: *const c_char, param: *mut c_void)>;

/// Borrows a NUL-terminated string as bytes, without the terminator.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// and unmodified for `'a`.
unsafe fn c_bytes<'a>(ptr: *const c_char) -> Result<&'a [u8], TokenizeError> {
    if ptr.is_null() {
        return Err(TokenizeError::NullArgument);
    }
    // SAFETY: non-null, and the caller guarantees termination and lifetime.
    Ok(unsafe { CStr::from_ptr(ptr) }.to_bytes())
}

/// Checks whether a configuration is well-formed.
///
/// Returns non-zero for a valid configuration, and zero for an invalid one
/// or a null `input`.
///
/// # Safety
///
/// `input` must be null or point to a NUL-terminated string valid for the
/// duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn taihen_config_validate(input: *const c_char) -> c_int {
    // SAFETY: forwarded from this function's contract.
    match unsafe { c_bytes(input) } {
        Ok(input) => c_int::from(validate(input)),
        Err(err) => {
            debug!(%err, "taihen_config_validate");
            0
        }
    }
}

/// Calls `handler` with every path `section` selects, in document order.
///
/// Does no validation: call [`taihen_config_validate`] first. Nothing is
/// called when `input`, `section` or `handler` is null.
///
/// # Safety
///
/// `input` and `section` must be null or point to NUL-terminated strings
/// valid for the duration of the call. `handler` must be safe to call with
/// `param`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn taihen_config_parse(
    input: *const c_char,
    section: *const c_char,
    handler: TaihenConfigHandler,
    param: *mut c_void,
) {
    let Some(handler) = handler else {
        debug!("taihen_config_parse: no handler");
        return;
    };
    // SAFETY: forwarded from this function's contract.
    let (input, section) = match unsafe { (c_bytes(input), c_bytes(section)) } {
        (Ok(input), Ok(section)) => (input, section),
        (Err(err), _) | (_, Err(err)) => {
            debug!(%err, "taihen_config_parse");
            return;
        }
    };

    // Payloads are shorter than a line and contain no NUL, so one line's
    // worth of bytes always fits the path and its terminator.
    let mut module = [0u8; MAX_LINE_LENGTH];
    for_each_path(input, section, |path| {
        module[..path.len()].copy_from_slice(path);
        module[path.len()] = 0;
        // SAFETY: `module` is NUL-terminated and outlives the call; the
        // caller vouches for `handler` and `param`.
        unsafe { handler(module.as_ptr().cast(), param) };
    });
}
