//! Binary entrypoint that renders one prompt from a JSON request on stdin.

use std::process::ExitCode;

use enrollment_desk::start_enrollment_desk;

/// Render the requested prompt and write it to stdout.
fn main() -> ExitCode {
    start_enrollment_desk::run()
}
