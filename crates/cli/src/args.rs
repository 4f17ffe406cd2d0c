use clap::Parser;
use std::path::PathBuf;

const TARGET_HELP: &str = "TARGET SPECIFICATION:
    Requires a host and port number or ip and port number. The port is assumed to be open.
    HOST:PORT or IP:PORT

EXAMPLES:
    portprint -t example.com:80
    portprint -l input-file.txt
    portprint --json -t example.com:80,127.0.0.1:8000";

#[derive(Parser, Debug)]
#[command(name = "portprint")]
#[command(version)]
#[command(about = "Identify the services listening on HOST:PORT endpoints", long_about = None)]
#[command(after_help = TARGET_HELP)]
pub struct Cli {
    /// Input file containing targets
    #[arg(short = 'l', long = "list", value_name = "PATH")]
    pub list: Option<PathBuf>,

    /// Target or comma separated target list
    #[arg(short = 't', long, value_delimiter = ',', conflicts_with = "list")]
    pub targets: Vec<String>,

    /// Fast mode: only run the plugin expected on each port
    #[arg(short, long)]
    pub fast: bool,

    /// Run UDP plugins
    #[arg(short = 'U', long)]
    pub udp: bool,

    /// Verbose mode
    #[arg(short, long)]
    pub verbose: bool,

    /// Timeout in milliseconds
    #[arg(short = 'w', long, default_value_t = 2000, value_name = "MS")]
    pub timeout: u64,

    /// Output file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format in json
    #[arg(long, conflicts_with = "csv")]
    pub json: bool,

    /// Output format in csv
    #[arg(long)]
    pub csv: bool,

    /// Max targets probed concurrently
    #[arg(short, long, default_value_t = 50)]
    pub concurrency: usize,

    /// Print the default priority port list and exit
    #[arg(long)]
    pub priority_ports: bool,
}
