//! cadmousectl: command-line CadMouse configuration tool.

use anyhow::{Context, Result};
use cadmouse_core::backend::{self, OpenOptions};
use cadmouse_core::command::{report_hex, Command};
use cadmouse_core::device::Backend;
use cadmouse_core::driver::{Driver, Flag};
use cadmouse_core::transport::{HidTransport, RecordingTransport};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    Hidapi,
    Hidraw,
    Usb,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Hidapi => Backend::Hidapi,
            BackendArg::Hidraw => Backend::Hidraw,
            BackendArg::Usb => Backend::Usb,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "cadmousectl",
    version,
    about = "Configure a 3Dconnexion CadMouse",
    after_help = "Setting flags may be repeated and are applied in the order given."
)]
struct Cli {
    /// Transport backend (defaults to the first one compiled in).
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// USB interface claimed by the usb backend.
    #[arg(long, value_name = "N", default_value_t = 0)]
    usb_interface: u8,

    /// Print the reports as JSON instead of sending them.
    #[arg(long)]
    dry_run: bool,

    /// List matching devices and exit.
    #[arg(long)]
    list: bool,

    /// Lift-off detection: 0 disables, any other value enables.
    #[arg(short = 'l', value_name = "0|N", allow_negative_numbers = true)]
    liftoff: Vec<String>,

    /// Polling rate in Hz: 125, 250, 500 or 1000.
    #[arg(short = 'p', value_name = "HZ", allow_negative_numbers = true)]
    poll_rate: Vec<String>,

    /// Remap a button, e.g. `left:extra`.
    ///
    /// Buttons: left, right, middle, wheel, forward, backward, rm.
    /// Functions: left, right, middle, backward, forward, rm, extra.
    #[arg(short = 'r', value_name = "HW:SW", allow_hyphen_values = true)]
    remap: Vec<String>,

    /// Pointer speed (1-164; 0-100 on the usb backend).
    #[arg(short = 's', value_name = "SPEED", allow_negative_numbers = true)]
    speed: Vec<String>,

    /// Pointer speed as DPI (50-8200). Cannot be combined with -s.
    #[arg(short = 'd', value_name = "DPI", allow_negative_numbers = true)]
    dpi: Vec<String>,

    /// Smart-scroll mode: 0 off, 1 on, 2 free-spin, 3 smart free-spin.
    #[arg(short = 'S', value_name = "MODE", allow_negative_numbers = true)]
    smart_scroll: Vec<String>,
}

/// Setting arguments and their option letters.
const FLAG_ARGS: [(&str, char); 6] = [
    ("liftoff", 'l'),
    ("poll_rate", 'p'),
    ("remap", 'r'),
    ("speed", 's'),
    ("dpi", 'd'),
    ("smart_scroll", 'S'),
];

/// Collect setting flags in command-line order.
fn ordered_flags(matches: &ArgMatches) -> Vec<Flag> {
    let mut indexed = Vec::new();
    for (id, letter) in FLAG_ARGS {
        let (Some(values), Some(indices)) =
            (matches.get_many::<String>(id), matches.indices_of(id))
        else {
            continue;
        };
        for (value, index) in values.zip(indices) {
            if let Some(flag) = Flag::from_letter(letter, value.as_str()) {
                indexed.push((index, flag));
            }
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, flag)| flag).collect()
}

fn apply(transport: &dyn HidTransport, backend: Backend, flags: &[Flag]) -> Result<()> {
    let summary = Driver::new(transport, backend).run(flags, |e| eprintln!("{e}"))?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected.len(),
        "Settings applied"
    );
    Ok(())
}

/// One JSON object per recorded report.
fn report_lines(recorder: &RecordingTransport) -> Result<Vec<String>> {
    recorder
        .reports()
        .iter()
        .map(|report| {
            let command = Command::decode(report).context("recorded report is malformed")?;
            Ok(serde_json::json!({ "command": command, "report": report_hex(report) }).to_string())
        })
        .collect()
}

fn run(cli: &Cli, flags: &[Flag]) -> Result<()> {
    let backend = cli
        .backend
        .map(Backend::from)
        .or_else(Backend::default_available)
        .unwrap_or(Backend::Hidapi);

    if cli.list {
        let devices = backend::discover_devices(backend)?;
        if devices.is_empty() {
            println!("No CadMouse found.");
        }
        for dev in &devices {
            println!("{} ({})", dev.path, dev.backend);
        }
        return Ok(());
    }

    if cli.dry_run {
        let recorder = RecordingTransport::new();
        let result = apply(&recorder, backend, flags);
        for line in report_lines(&recorder)? {
            println!("{line}");
        }
        return result;
    }

    let transport = backend::open(
        backend,
        OpenOptions {
            usb_interface: cli.usb_interface,
        },
    )
    .context("Could not find/open a CadMouse")?;

    // `transport` drops on every path out of here, releasing the device.
    apply(&*transport, backend, flags)
}

/// Single-line diagnostic: the context chain joined with `: `.
fn diagnostic(e: &anyhow::Error) -> String {
    format!("{e:#}")
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let flags = ordered_flags(&matches);

    match run(&cli, &flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", diagnostic(&e));
            ExitCode::FAILURE
        }
    }
}
