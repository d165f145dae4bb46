// ABOUTME: Hook invoked after every completed HTTP exchange, with a stdout echo as the default.
// ABOUTME: Closures implement ResponseObserver, so callers can capture, redirect or drop the echo.

use std::io::{self, Write};

/// A completed request/response exchange.
#[derive(Debug, Clone, Copy)]
pub struct Exchange<'a> {
    pub url: &'a str,
    pub status: u16,
    pub body: &'a [u8],
}

/// Receives every exchange a [`Connection`](crate::Connection) completes.
pub trait ResponseObserver: Send + Sync {
    fn on_response(&self, exchange: &Exchange<'_>);
}

impl<F> ResponseObserver for F
where
    F: Fn(&Exchange<'_>) + Send + Sync,
{
    fn on_response(&self, exchange: &Exchange<'_>) {
        self(exchange)
    }
}

/// Writes `status code N` followed by the raw body to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutObserver;

impl StdoutObserver {
    fn write_to(&self, out: &mut impl Write, exchange: &Exchange<'_>) -> io::Result<()> {
        writeln!(out, "status code {}", exchange.status)?;
        out.write_all(exchange.body)?;
        writeln!(out)
    }
}

impl ResponseObserver for StdoutObserver {
    fn on_response(&self, exchange: &Exchange<'_>) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        // Diagnostics only; a closed stdout must not fail the request.
        let _ = self.write_to(&mut lock, exchange);
    }
}
