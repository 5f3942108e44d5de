//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use crossword_core::{ApiError, HttpRequest, ResponseData};

/// Opaque handle to a `CrosswordClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiCrosswordClient {
    pub(crate) inner: crossword_core::CrosswordClient,
}

/// Copy `s` into a heap C string owned by the caller.
///
/// Interior NUL bytes cannot be represented and are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let bytes: Vec<u8> = s.into_bytes().into_iter().filter(|b| *b != 0).collect();
    CString::new(bytes).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP `GET` request described as C-compatible plain data.
///
/// Built by `crossword_build_generate`. The C caller executes the request
/// and passes the response back through `crossword_parse_generate`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = into_c_string(req.url);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            // Boxed slice so capacity == len when it is rebuilt for freeing.
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            url,
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to `crossword_parse_generate`. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiCrosswordResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Validation = 1,
    InvalidUrl = 2,
    Http = 3,
    Remote = 4,
    Deserialization = 5,
    Panic = 6,
    NullArg = 7,
}

/// A generated puzzle exposed to C.
///
/// Scalar fields are flattened for convenience; `data_json` carries the full
/// puzzle (grid and clues included) as a JSON document.
#[repr(C)]
pub struct FfiCrossword {
    pub size: i64,
    pub word_count: i64,
    pub difficulty: *mut c_char,
    pub theme: *mut c_char,
    pub html: *mut c_char,
    pub image_url: *mut c_char,
    pub solution_image_url: *mut c_char,
    pub data_json: *mut c_char,
}

impl FfiCrossword {
    fn from_core(data: ResponseData) -> Self {
        let data_json = serde_json::to_string(&data).unwrap_or_default();
        FfiCrossword {
            size: data.size,
            word_count: data.word_count,
            difficulty: into_c_string(data.difficulty),
            theme: into_c_string(data.theme),
            html: into_c_string(data.html),
            image_url: into_c_string(data.image.download_url),
            solution_image_url: into_c_string(data.solution_image.download_url),
            data_json: into_c_string(data_json),
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        for s in [
            self.difficulty,
            self.theme,
            self.html,
            self.image_url,
            self.solution_image_url,
            self.data_json,
        ] {
            if !s.is_null() {
                drop(unsafe { CString::from_raw(s) });
            }
        }
    }
}

/// Result envelope for parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed puzzle. On failure `error_code` describes the
/// category, `error_message` is a human-readable C string, and `data` is
/// null.
#[repr(C)]
pub struct FfiCrosswordResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data: *mut FfiCrossword,
}

impl FfiCrosswordResult {
    fn boxed(error_code: FfiErrorCode, message: Option<String>, http_status: u16, data: *mut FfiCrossword) -> *mut Self {
        Box::into_raw(Box::new(FfiCrosswordResult {
            error_code,
            error_message: message.map_or(std::ptr::null_mut(), into_c_string),
            http_status,
            data,
        }))
    }

    /// Build a success result carrying a puzzle.
    pub(crate) fn ok(data: ResponseData) -> *mut Self {
        let puzzle = Box::into_raw(Box::new(FfiCrossword::from_core(data)));
        Self::boxed(FfiErrorCode::Ok, None, 200, puzzle)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::Validation(_) => (FfiErrorCode::Validation, 0),
            ApiError::InvalidUrl(_) => (FfiErrorCode::InvalidUrl, 0),
            ApiError::Http { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Remote { code, .. } => (FfiErrorCode::Remote, code.unwrap_or(200)),
            ApiError::Deserialization(_) => (FfiErrorCode::Deserialization, 0),
        };
        Self::boxed(error_code, Some(err.to_string()), http_status, std::ptr::null_mut())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::NullArg, Some(format!("null argument: {name}")), 0, std::ptr::null_mut())
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(FfiErrorCode::Panic, Some(msg.to_string()), 0, std::ptr::null_mut())
    }
}
