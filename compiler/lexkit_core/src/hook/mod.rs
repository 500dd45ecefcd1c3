//! Debug hooks: where a reader's structured log lines go.
//!
//! The reader never logs directly. Each `peek`/`next`/`discard` and each
//! emitted token is handed to an injected [`DebugHook`] as a message plus
//! structured [`Field`]s. [`NoopHook`] is the default; [`TracingHook`]
//! forwards into `tracing`.

use std::fmt;
use std::sync::Once;

/// Value carried by a [`Field`].
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    Int(i64),
    Uint(usize),
    Str(&'a str),
    /// A code point, or `None` for the end-of-input sentinel.
    Char(Option<char>),
    Display(&'a dyn fmt::Display),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Uint(n) => write!(f, "{n}"),
            FieldValue::Str(s) => write!(f, "{s:?}"),
            FieldValue::Char(Some(ch)) => write!(f, "{ch:?}"),
            FieldValue::Char(None) => f.write_str("EOF"),
            FieldValue::Display(d) => write!(f, "{d}"),
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(n: i32) -> Self {
        FieldValue::Int(i64::from(n))
    }
}

impl From<usize> for FieldValue<'_> {
    fn from(n: usize) -> Self {
        FieldValue::Uint(n)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Str(s)
    }
}

impl From<char> for FieldValue<'_> {
    fn from(ch: char) -> Self {
        FieldValue::Char(Some(ch))
    }
}

impl From<Option<char>> for FieldValue<'_> {
    fn from(ch: Option<char>) -> Self {
        FieldValue::Char(ch)
    }
}

/// A named structured value attached to a log line.
#[derive(Clone, Copy, Debug)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: impl Into<FieldValue<'a>>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Renders a field list as space-separated `name=value` pairs.
pub struct Fields<'a, 'b>(pub &'a [Field<'b>]);

impl fmt::Display for Fields<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

/// Receiver for a reader's debug output.
///
/// Any `Fn(&str, &[Field<'_>])` closure is a hook.
pub trait DebugHook {
    fn debug(&self, message: &str, fields: &[Field<'_>]);

    /// Whether [`debug`](DebugHook::debug) would do anything. Callers skip
    /// building the message and fields when this is `false`.
    fn enabled(&self) -> bool {
        true
    }
}

impl<F> DebugHook for F
where
    F: Fn(&str, &[Field<'_>]),
{
    fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self(message, fields);
    }
}

/// Discards everything. The default hook.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHook;

impl DebugHook for NoopHook {
    fn debug(&self, _message: &str, _fields: &[Field<'_>]) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Forwards every line to `tracing::debug!` under target `lexkit`.
///
/// Install a subscriber first, e.g. with [`init_tracing`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHook;

impl DebugHook for TracingHook {
    fn debug(&self, message: &str, fields: &[Field<'_>]) {
        tracing::debug!(target: "lexkit", fields = %Fields(fields), "{message}");
    }

    fn enabled(&self) -> bool {
        tracing::enabled!(target: "lexkit", tracing::Level::DEBUG)
    }
}

/// Environment variable holding the `EnvFilter` directives for lexkit.
pub const LOG_ENV: &str = "LEXKIT_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize a `tracing` subscriber for debug output.
///
/// Reads filter directives from `LEXKIT_LOG`, falling back to `RUST_LOG`.
/// Does nothing when neither is set. Safe to call multiple times, and a
/// subscriber installed elsewhere is left alone.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match std::env::var(LOG_ENV) {
            Ok(directives) => EnvFilter::new(directives),
            Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            Err(_) => return,
        };
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(filter)
            .try_init();
        if installed.is_err() {
            // The host application already set a global subscriber; keep it.
            tracing::debug!(target: "lexkit", "global subscriber already installed");
        }
    });
}

#[cfg(test)]
mod tests;
