//! Output formatting for detected services

use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, IsTerminal, Write};
use std::path::Path;

use crate::config::{OutputFormat, ReportConfig};
use portprint_common::{PortprintError, PortprintResult, Service};

const CSV_HEADER: [&str; 6] = ["Host", "IP", "Port", "Protocol", "TLS", "Data"];

/// Asks the operator whether an existing output file may be replaced.
pub trait OverwritePrompt {
    /// Whether anyone is there to answer.
    fn is_interactive(&self) -> bool;

    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompts on stderr, reads the answer from stdin.
pub struct TerminalPrompt;

impl OverwritePrompt for TerminalPrompt {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{}", question)?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

/// Make sure writing to `path` will not silently clobber a file.
///
/// A missing file is fine. An existing one needs an explicit yes from an
/// interactive operator; without a terminal the answer is always no.
pub fn check_output_file(path: &Path, prompt: &mut dyn OverwritePrompt) -> PortprintResult<()> {
    match fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(io::Error::new(e.kind(), format!("failed to check output file {:?}: {}", path, e)).into());
        }
    }

    if prompt.is_interactive() {
        let answer = prompt.ask(&format!("File: {:?} already exists. Overwrite? (Y/n): ", path))?;
        if is_affirmative(&answer) {
            return Ok(());
        }
    }
    Err(PortprintError::OutputFileExists(path.to_path_buf()))
}

/// Empty input takes the default, which is yes.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

/// Render every service to the configured sink.
pub fn report(services: &[Service], config: &ReportConfig) -> PortprintResult<()> {
    match &config.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_services(services, config.format, &mut out)?;
            out.flush()?;
            Ok(())
        }
        None => write_services(services, config.format, io::stdout().lock()),
    }
}

/// Write `services` in `format`. Stops at the first write error; whatever
/// was written before stays written.
pub fn write_services<W: Write>(services: &[Service], format: OutputFormat, out: W) -> PortprintResult<()> {
    match format {
        OutputFormat::Json => write_json(services, out),
        OutputFormat::Csv => write_csv(services, out),
        OutputFormat::Text => write_text(services, out),
    }
}

fn write_json<W: Write>(services: &[Service], mut out: W) -> PortprintResult<()> {
    for service in services {
        serde_json::to_writer(&mut out, service).map_err(io::Error::from)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn write_csv<W: Write>(services: &[Service], out: W) -> PortprintResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER).map_err(io::Error::from)?;

    for service in services {
        writer
            .write_record([
                service.host.clone(),
                service.ip.to_string(),
                service.port.to_string(),
                service.protocol.clone(),
                service.tls.to_string(),
                service.raw_text(),
            ])
            .map_err(io::Error::from)?;
    }

    // csv buffers internally; rows are not on the sink until this returns
    writer.flush()?;
    Ok(())
}

fn write_text<W: Write>(services: &[Service], mut out: W) -> PortprintResult<()> {
    for service in services {
        writeln!(out, "{}", service)?;
    }
    out.flush()?;
    Ok(())
}
