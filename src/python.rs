//! Python bindings (feature `python`)
//!
//! Exposes the counter as a native class so Python hosts do not need ctypes:
//!
//! ```python
//! from pingpong import PingPong
//!
//! seen = []
//! with PingPong(0, 3) as pp:
//!     pp.set_callback(seen.append)
//!     for _ in range(11):
//!         pp.ping()
//! assert seen == [3, 6, 9]
//! ```

use crate::counter::PingPong;
use crate::ffi::greeting;
use crate::logging::warn;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

type PyCallback = Box<dyn FnMut(i32)>;

#[pyfunction]
fn hello(to: &str) -> String {
    greeting(to)
}

/// Ping-pong counter; closed by `close()` or leaving a `with` block
#[pyclass(name = "PingPong", unsendable)]
pub struct PyPingPong {
    inner: Option<PingPong<PyCallback>>,
}

fn closed() -> PyErr {
    PyValueError::new_err("PingPong is closed")
}

impl PyPingPong {
    fn live(&mut self) -> PyResult<&mut PingPong<PyCallback>> {
        self.inner.as_mut().ok_or_else(closed)
    }
}

#[pymethods]
impl PyPingPong {
    #[new]
    fn new(start: i32, trigger: i32) -> Self {
        Self {
            inner: Some(PingPong::new(start, trigger)),
        }
    }

    #[getter]
    fn current(&self) -> PyResult<i32> {
        self.inner.as_ref().map(PingPong::current).ok_or_else(closed)
    }

    #[getter]
    fn trigger(&self) -> PyResult<i32> {
        self.inner.as_ref().map(PingPong::trigger).ok_or_else(closed)
    }

    /// Register a callable taking the triggering value; None clears it
    fn set_callback(&mut self, py: Python<'_>, callback: Option<PyObject>) -> PyResult<()> {
        let callback: Option<PyCallback> = match callback {
            Some(cb) if !cb.as_ref(py).is_callable() => {
                return Err(PyTypeError::new_err("callback must be callable"));
            }
            Some(cb) => Some(Box::new(move |value: i32| {
                Python::with_gil(|py| {
                    // A failing callback must not abort the ping
                    if let Err(err) = cb.call1(py, (value,)) {
                        warn!(value, "python callback raised");
                        err.print(py);
                    }
                })
            })),
            None => None,
        };

        self.live()?.set_callback(callback);
        Ok(())
    }

    /// Advance the counter; returns the value the callback fired with, if any
    fn ping(&mut self) -> PyResult<Option<i32>> {
        Ok(self.live()?.ping())
    }

    fn close(&mut self) {
        self.inner = None;
    }

    fn __enter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __exit__(
        &mut self,
        _exc_type: Option<&PyAny>,
        _exc_value: Option<&PyAny>,
        _traceback: Option<&PyAny>,
    ) -> bool {
        self.close();
        false
    }

    fn __repr__(&self) -> String {
        match &self.inner {
            Some(pp) => format!("PingPong(current={}, trigger={})", pp.current(), pp.trigger()),
            None => "PingPong(closed)".to_string(),
        }
    }
}

#[pymodule]
fn pingpong(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(hello, m)?)?;
    m.add_class::<PyPingPong>()?;
    Ok(())
}
