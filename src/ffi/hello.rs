//! String echo - C API
//!
//! Strings returned to the host are owned by this library and must be handed
//! back to `hello_world_free`.

use std::ffi::{c_char, CStr, CString};

/// Greeting for `to`
pub fn greeting(to: &str) -> String {
    format!("Hello {}", to)
}

/// Greet the nul-terminated string `to`
///
/// A null or non-UTF-8 argument greets "there". Returns null only if the
/// greeting cannot be represented as a C string.
///
/// # Safety
/// - `to` must be null or point to a nul-terminated string
/// - The result must be released with `hello_world_free`
#[no_mangle]
pub unsafe extern "C" fn hello_world(to: *const c_char) -> *mut c_char {
    let recipient = if to.is_null() {
        "there"
    } else {
        CStr::from_ptr(to).to_str().unwrap_or("there")
    };

    CString::new(greeting(recipient))
        .map(CString::into_raw)
        .unwrap_or(std::ptr::null_mut())
}

/// Free a string returned by `hello_world`
///
/// # Safety
/// - `s` must be null or a pointer returned by `hello_world`, freed once
#[no_mangle]
pub unsafe extern "C" fn hello_world_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(to: *const c_char) -> String {
        unsafe {
            let raw = hello_world(to);
            assert!(!raw.is_null());
            let text = CStr::from_ptr(raw).to_str().unwrap().to_owned();
            hello_world_free(raw);
            text
        }
    }

    #[test]
    fn test_hello() {
        let to = CString::new("from the Rust native library").unwrap();
        assert_eq!(call(to.as_ptr()), "Hello from the Rust native library");
    }

    #[test]
    fn test_hello_null() {
        assert_eq!(call(std::ptr::null()), "Hello there");
    }

    #[test]
    fn test_hello_invalid_utf8() {
        let bytes = b"\xff\xfe\0";
        assert_eq!(call(bytes.as_ptr() as *const c_char), "Hello there");
    }

    #[test]
    fn test_free_null() {
        unsafe { hello_world_free(std::ptr::null_mut()) };
    }
}
