//! C-ABI wrapper around `crossword-core`.
//!
//! # Overview
//! Exposes request validation, request building, and response parsing for the
//! crossword endpoint through `extern "C"` functions so any language with a C
//! FFI can drive the API without linking to serde directly.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Request parameters arrive as three nullable C strings; null reads as
//!   "not set", matching the empty-string convention of the core.
//! - `FfiCrosswordResult` conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `crossword_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use crossword_core::{CrosswordRequest, HttpResponse};

use types::*;

/// Read a nullable C string; null and invalid UTF-8 read as empty.
fn read_str(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap_or("").to_string()
}

fn request_from_c(size: *const c_char, theme: *const c_char, difficulty: *const c_char) -> CrosswordRequest {
    CrosswordRequest {
        size: read_str(size),
        theme: read_str(theme),
        difficulty: read_str(difficulty),
    }
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `CrosswordClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `crossword_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_client_new(base_url: *const c_char) -> *mut FfiCrosswordClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let client = crossword_core::CrosswordClient::new(&read_str(base_url));
        Box::into_raw(Box::new(FfiCrosswordClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Attach a header (for example `x-api-key`) to every request the client
/// builds. Returns false if any argument is null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_client_add_header(
    client: *mut FfiCrosswordClient,
    name: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if client.is_null() || name.is_null() || value.is_null() {
            return false;
        }
        let client = unsafe { &mut *client };
        client.inner.add_header(&read_str(name), &read_str(value));
        true
    })
    .unwrap_or(false)
}

/// Free a client created by `crossword_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_client_free(client: *mut FfiCrosswordClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Validation and request building
// ---------------------------------------------------------------------------

/// Validate request parameters without building a request.
///
/// Returns null when the parameters are valid, otherwise the aggregated
/// violation message. Free a non-null result with `crossword_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_validate(
    size: *const c_char,
    theme: *const c_char,
    difficulty: *const c_char,
) -> *mut c_char {
    catch_unwind(|| match request_from_c(size, theme, difficulty).validate() {
        Ok(()) => std::ptr::null_mut(),
        Err(e) => into_c_string(e.to_string()),
    })
    .unwrap_or_else(|_| into_c_string("panic in crossword_validate".to_string()))
}

/// Build the HTTP request for generating a crossword.
///
/// Returns null if `client` is null or the request cannot be built. In that
/// case, when `error_out` is non-null, `*error_out` receives the reason;
/// free it with `crossword_free_string`. `*error_out` is left untouched on
/// success. The caller must free the returned pointer with
/// `crossword_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_build_generate(
    client: *const FfiCrosswordClient,
    size: *const c_char,
    theme: *const c_char,
    difficulty: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut FfiHttpRequest {
    let report = |message: String| -> *mut FfiHttpRequest {
        if !error_out.is_null() {
            unsafe { *error_out = into_c_string(message) };
        }
        std::ptr::null_mut()
    };

    catch_unwind(|| {
        if client.is_null() {
            return report("null argument: client".to_string());
        }
        let client = unsafe { &*client };
        let request = request_from_c(size, theme, difficulty);
        match client.inner.build_generate(&request) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(e) => report(e.to_string()),
        }
    })
    .unwrap_or_else(|_| report("panic in crossword_build_generate".to_string()))
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body: read_str(resp.body),
    }
}

/// Parse the HTTP response of a generate request.
///
/// Returns a result whose `data` points to the puzzle on success.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_parse_generate(
    client: *const FfiCrosswordClient,
    response: *const FfiHttpResponse,
) -> *mut FfiCrosswordResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiCrosswordResult::null_arg("client");
        }
        if response.is_null() {
            return FfiCrosswordResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client.inner.parse_generate(ffi_response_to_core(resp)) {
            Ok(data) => FfiCrosswordResult::ok(data),
            Err(e) => FfiCrosswordResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiCrosswordResult::panic("panic in crossword_parse_generate"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `crossword_build_generate`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiCrosswordResult` returned by `crossword_parse_generate`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_free_result(result: *mut FfiCrosswordResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.data.is_null() {
            let puzzle = unsafe { Box::from_raw(result.data) };
            puzzle.free_fields();
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn crossword_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
