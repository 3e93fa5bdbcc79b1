use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use stackwm::actor::broadcast::BroadcastReceiver;
use stackwm::actor::reactor::{Event, Reactor};
use stackwm::common::config::{Config, config_file};
use stackwm::common::log;
use stackwm::layout_engine::LayoutEngine;
use stackwm::sys::x11::X11;
use tracing::{debug, info, warn};

#[derive(Parser)]
struct Cli {
    /// Path to the configuration file. Defaults to
    /// `$XDG_CONFIG_HOME/stackwm/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// X display to manage, overriding `$DISPLAY`.
    #[arg(long)]
    display: Option<String>,

    /// Check the configuration file and exit without connecting to the X
    /// server.
    #[arg(long)]
    validate: bool,
}

fn main() -> anyhow::Result<()> {
    let opt: Cli = Parser::parse();

    log::init_logging();
    install_panic_hook();

    let path = opt.config.unwrap_or_else(config_file);
    let mut config = Config::load_or_default(&path)?;

    if opt.validate {
        let issues = config.validate();
        for issue in &issues {
            println!("{}: {issue}", path.display());
        }
        if !issues.is_empty() {
            anyhow::bail!("{} configuration issue(s) found", issues.len());
        }
        println!("{}: ok", path.display());
        return Ok(());
    }

    let fixed = config.auto_fix_values();
    if fixed > 0 {
        warn!(fixed, "adjusted out-of-range configuration values");
    }

    let x11 = X11::connect(opt.display.as_deref()).context("starting window manager")?;
    let existing = x11.existing_windows()?;

    let (broadcast_tx, broadcast_rx) = stackwm::actor::channel();
    spawn_broadcast_logger(broadcast_rx);

    let layout = LayoutEngine::new(&config.settings);
    let mut reactor = Reactor::new(config, layout, x11, Some(broadcast_tx));

    for (window, mapped) in existing {
        reactor.handle_event(Event::WindowAppeared { window, mapped });
    }
    info!(clients = reactor.registry().len(), "ready");

    loop {
        if let Some(event) = reactor.system_mut().next_event()? {
            reactor.handle_event(event);
        }
    }
}

/// Drains published changes on a background thread.
fn spawn_broadcast_logger(mut rx: BroadcastReceiver) {
    std::thread::spawn(move || {
        while let Some((span, event)) = rx.blocking_recv() {
            let _guard = span.enter();
            debug!(?event, "broadcast");
        }
    });
}

#[cfg(panic = "unwind")]
fn install_panic_hook() {
    // Abort on panic so a half-updated registry never keeps running.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        original_hook(info);
        std::process::abort();
    }));
}

#[cfg(not(panic = "unwind"))]
fn install_panic_hook() {}
