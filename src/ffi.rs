//! C-ABI FFI bindings for cross-language integration.
//!
//! Lets services written in other languages (the resume API, Python or
//! Node.js workers) call the extractor directly instead of shelling out to
//! the CLI.

use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;

use crate::render::OutputMode;
use crate::Extractor;

/// Raw view selector for [`resume_pdf_extract`].
pub const RESUME_PDF_MODE_RAW: c_int = 0;
/// LLM view selector for [`resume_pdf_extract`].
pub const RESUME_PDF_MODE_LLM: c_int = 1;

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct ResumePdfResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The JSON output (null if failed). Freed by `resume_pdf_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Freed by `resume_pdf_free_result`.
    pub error: *mut c_char,
}

impl ResumePdfResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message.into()).unwrap_or_default().into_raw(),
        }
    }
}

fn mode_from_c(mode: c_int) -> Option<OutputMode> {
    match mode {
        RESUME_PDF_MODE_RAW => Some(OutputMode::Raw),
        RESUME_PDF_MODE_LLM => Some(OutputMode::Llm),
        _ => None,
    }
}

/// Extract a PDF (path or base64 payload) and return the JSON for `mode`.
///
/// A document without text succeeds with the error object as `data`; only
/// invalid arguments and serialization failures set `success` to false.
///
/// # Safety
///
/// The `input` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `resume_pdf_free_result`.
#[no_mangle]
pub unsafe extern "C" fn resume_pdf_extract(input: *const c_char, mode: c_int) -> ResumePdfResult {
    if input.is_null() {
        return ResumePdfResult::error("Input cannot be null");
    }

    let input = match CStr::from_ptr(input).to_str() {
        Ok(s) => s,
        Err(_) => return ResumePdfResult::error("Invalid UTF-8 input"),
    };

    let Some(mode) = mode_from_c(mode) else {
        return ResumePdfResult::error(format!("Unknown output mode {}", mode));
    };

    match Extractor::new().extract_json(input, mode) {
        Ok(json) => ResumePdfResult::success(json),
        Err(e) => ResumePdfResult::error(e.to_string()),
    }
}

/// Free a result returned by [`resume_pdf_extract`].
///
/// # Safety
///
/// The `result` must have been returned by a resume_pdf function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn resume_pdf_free_result(result: ResumePdfResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by resume_pdf.
///
/// # Safety
///
/// The `ptr` must have been allocated by resume_pdf.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn resume_pdf_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the resume_pdf library.
///
/// The returned string is statically allocated and must not be freed.
#[no_mangle]
pub extern "C" fn resume_pdf_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
