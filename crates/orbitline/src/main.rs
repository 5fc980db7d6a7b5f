use clap::Parser;
use orbitline::config;
use orbitline::events::AppEvent;
use orbitline::render;
use orbitline::sys::runtime;
use orbitline::sys::server::FrameSnapshot;
use orbitline_core::Engine;
use parking_lot::RwLock;
use std::sync::Arc;

/// Re-render on this many ticks (one second at the 50 ms cadence) so a
/// rotating ring stays visible without flooding the terminal.
const TICKS_PER_RENDER: u64 = 20;

#[derive(Parser, Debug)]
#[command(name = "orbitline", version, about = "Radial timeline layout daemon", long_about = None)]
struct Cli {
    /// Write the demo config to the user config directory and exit
    #[arg(long)]
    setup: bool,

    /// Print a frame every second while auto-rotating
    #[arg(long)]
    watch: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.setup {
        match config::write_default_config() {
            Ok(path) => println!("Wrote default config to {}", path.display()),
            Err(e) => {
                log::error!("Failed to write default config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let cfg = config::load_or_setup();
    let mut engine = Engine::new(cfg.timeline_items(), cfg.compact);

    let (tx, rx) = async_channel::bounded(32);
    let snapshot: FrameSnapshot = Arc::new(RwLock::new(engine.frame()));

    runtime::start_background_services(tx.clone(), snapshot.clone(), cfg.socket_path());

    log::info!(
        "orbitline up: {} items, compact={}, socket={}",
        engine.items().len(),
        engine.compact(),
        cfg.socket_path().display()
    );
    println!("{}", render::render(&engine, &engine.frame()));

    let mut ticks: u64 = 0;
    while let Ok(event) = rx.recv_blocking() {
        let interactive = !matches!(event, AppEvent::Tick);

        match event {
            AppEvent::Tick => {
                engine.tick();
                ticks += 1;
            }
            AppEvent::Select(id) => engine.select(id),
            AppEvent::ClearSelection => engine.clear_selection(),
            AppEvent::Resize(width, height) => engine.resize(width, height),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_cfg) => {
                    if new_cfg.compact != engine.compact() {
                        // compact mode is an engine lifetime parameter
                        engine = Engine::new(new_cfg.timeline_items(), new_cfg.compact);
                    } else {
                        engine.replace_items(new_cfg.timeline_items());
                    }
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }

        let frame = engine.frame();
        let periodic =
            cli.watch && engine.is_auto_rotating() && ticks % TICKS_PER_RENDER == 0;
        if interactive || periodic {
            println!("{}", render::render(&engine, &frame));
        }
        *snapshot.write() = frame;
    }
}
