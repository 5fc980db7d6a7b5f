use clap::{Parser, Subcommand};
use orbitline::config;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "orbitctl", version, about = "Control a running orbitline daemon", long_about = None)]
struct Cli {
    /// Path to the daemon control socket
    #[arg(short, long)]
    socket: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Expand an item; re-select it to collapse
    Select { id: u32 },
    /// Collapse any expanded item and resume rotation
    Clear,
    /// Report new container dimensions to the engine
    Resize { width: f64, height: f64 },
    /// Print the daemon's latest layout frame as JSON
    Frame,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let socket = cli
        .socket
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_SOCKET_PATH));

    let line = match &cli.command {
        Commands::Select { id } => format!("select {id}"),
        Commands::Clear => "clear".to_string(),
        Commands::Resize { width, height } => format!("resize {width} {height}"),
        Commands::Frame => "frame".to_string(),
    };

    let mut stream = UnixStream::connect(&socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to orbitline daemon at {}: {}. Is orbitline running?",
            socket.display(),
            e
        )
    })?;

    writeln!(stream, "{}", line)?;

    if matches!(cli.command, Commands::Frame) {
        let mut reply = String::new();
        BufReader::new(stream).read_line(&mut reply)?;
        print!("{reply}");
    }

    Ok(())
}
