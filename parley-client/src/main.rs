use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;

use parley_core::{DEFAULT_PORT, ServerLine};

/// Console chat client: prints server lines, forwards stdin lines.
#[derive(Debug, Parser)]
#[command(name = "parley-client")]
struct Cli {
    /// Server host.
    #[arg(default_value = "localhost")]
    host: String,
    /// Server port.
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let stream = TcpStream::connect((cli.host.as_str(), cli.port)).await?;
    let (r, mut w) = stream.into_split();

    let mut printer = tokio::spawn(print_server_lines(r));
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = &mut printer => {
                // Server went away; nothing more to send.
                return Ok(());
            }
            line = input.next_line() => {
                let Some(text) = line? else { break };
                w.write_all(text.as_bytes()).await?;
                w.write_all(b"\n").await?;
                w.flush().await?;
                if text.eq_ignore_ascii_case("/quit") || text.eq_ignore_ascii_case("/exit") {
                    break;
                }
            }
        }
    }

    // Closing our write half tells the server we are done; the printer
    // finishes once the server closes the other direction.
    drop(w);
    let _ = printer.await;
    println!("Client closed.");
    Ok(())
}

async fn print_server_lines(r: OwnedReadHalf) {
    let mut reader = BufReader::new(r);
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => display(line.trim_end_matches(['\r', '\n'])),
        }
    }
}

fn display(raw: &str) {
    match ServerLine::parse(raw) {
        ServerLine::EnterName => println!("Enter username:"),
        ServerLine::NameInUse => println!("Username in use. Choose another:"),
        ServerLine::Users(names) => println!("Current users: {}", names.join(",")),
        ServerLine::Welcome(_) | ServerLine::Chat { .. } => println!("{raw}"),
    }
}
