use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::UdpSocket;
use tokio::time::{MissedTickBehavior, interval};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "gpio-toggle")]
#[command(about = "Alternately drives a remote GPIO pin low and high over UDP", long_about = None)]
struct Args {
    /// Address of the board listening for commands
    #[arg(long, env = "GPIO_TOGGLE_PEER", default_value = "192.168.89.31:10001")]
    peer: SocketAddr,

    /// Pin number to toggle
    #[arg(long, env = "GPIO_TOGGLE_PIN", default_value_t = 4)]
    pin: u8,

    /// Delay between commands, in milliseconds
    #[arg(
        long,
        env = "GPIO_TOGGLE_INTERVAL_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval_ms: u64,

    /// Stop after this many commands instead of running until Ctrl+C
    #[arg(long)]
    count: Option<u64>,
}

/// The command sent on the `tick`-th iteration: even ticks drive the pin low, odd ticks high.
fn command_for(pin: u8, tick: u64) -> String {
    format!("GPIO{pin}={}", tick % 2)
}

/// An ephemeral local address in the same family as `peer`.
fn bind_addr_for(peer: SocketAddr) -> SocketAddr {
    if peer.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    }
}

async fn run(socket: &UdpSocket, args: &Args) -> anyhow::Result<u64> {
    let mut ticker = interval(Duration::from_millis(args.interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut sent = 0;
    while args.count.is_none_or(|count| sent < count) {
        ticker.tick().await;
        let command = command_for(args.pin, sent);
        socket
            .send_to(command.as_bytes(), args.peer)
            .await
            .with_context(|| format!("failed to send `{command}` to {}", args.peer))?;
        tracing::info!(peer = %args.peer, %command, "sent command");
        sent += 1;
    }
    Ok(sent)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let socket = UdpSocket::bind(bind_addr_for(args.peer)).await?;
    tokio::select! {
        sent = run(&socket, &args) => {
            tracing::info!("finished after {} commands", sent?);
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, stopping");
        }
    }
    Ok(())
}
