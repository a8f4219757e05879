// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Line pattern shared by the console and file sinks:
//!
//! ```text
//! 2026-01-02T03:04:05.678Z [<request id, 36 wide>] [<thread>] LEVEL target - message key=value
//! ```

use super::request_id::RequestId;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// UTC timestamp with millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Width of the request id column (a hyphenated UUID).
pub const REQUEST_ID_WIDTH: usize = 36;

/// Event formatter producing the shared line pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternFormatter {
    ansi: bool,
}

impl PatternFormatter {
    /// `ansi` highlights the level with terminal colours.
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }
}

/// Pad or truncate a request id to the fixed column width.
pub fn request_id_column(request_id: &str) -> String {
    format!(
        "{:<width$.width$}",
        request_id,
        width = REQUEST_ID_WIDTH
    )
}

fn level_colour(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[31m",
        Level::WARN => "\x1b[33m",
        Level::INFO => "\x1b[32m",
        Level::DEBUG => "\x1b[34m",
        Level::TRACE => "\x1b[35m",
    }
}

impl<S, N> FormatEvent<S, N> for PatternFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let request_id = ctx
            .event_scope()
            .and_then(|scope| {
                scope.into_iter().find_map(|span| {
                    let extensions = span.extensions();
                    extensions.get::<RequestId>().map(|id| id.0.clone())
                })
            })
            .unwrap_or_default();

        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("unnamed");

        write!(
            writer,
            "{} [{}] [{}] ",
            chrono::Utc::now().format(TIMESTAMP_FORMAT),
            request_id_column(&request_id),
            thread_name
        )?;

        if self.ansi {
            write!(
                writer,
                "{}{:>5}\x1b[0m",
                level_colour(metadata.level()),
                metadata.level()
            )?;
        } else {
            write!(writer, "{:>5}", metadata.level())?;
        }

        write!(writer, " {} - ", metadata.target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
