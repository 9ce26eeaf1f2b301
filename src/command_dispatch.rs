//! Purpose: Hold top-level CLI command dispatch for `routedec`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Decode failures become a stdout failure report with exit code 0.
//! Invariants: Output envelopes and exit code semantics stay stable once published.

use super::*;

use routedec::api::decode_report;

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "routedec", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Version => {
            emit_version_output();
            Ok(RunOutcome::ok())
        }
        Command::Decode {
            input,
            value_only,
            compact,
        } => {
            let route = resolve_route_input(&input)?;
            let report = decode_report(&route);
            let style = output_style(color_mode, compact);
            let rendered = match (&report, value_only) {
                (routedec::api::DecodeReport::Success(outcome), true) => {
                    render::render_roots(&outcome.roots, style)
                }
                _ => render::render_report(&report, style),
            };
            println!("{rendered}");
            Ok(RunOutcome::ok())
        }
    }
}
