//! Minimal terminal chat loop against the live OpenWeatherMap API.
//!
//! Requires an API key in the config file or the OPENWEATHER_API_KEY
//! environment variable. Run with:
//!
//!   cargo run -p nimbus-chat --example terminal_chat

use std::io::{self, BufRead, Write};

use anyhow::Result;
use nimbus_chat::ChatSession;
use nimbus_weather::OpenWeatherClient;

#[tokio::main]
async fn main() -> Result<()> {
    nimbus_core::init()?;
    let (config, _validation) = nimbus_core::Config::load_validated()?;

    let client = OpenWeatherClient::new(config.weather.api_key.clone())?;
    let mut session = ChatSession::with_greeting();
    for message in session.messages() {
        println!("bot> {}", message.text);
    }

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let (next, reply) = session.handle_turn(&client, line.trim_end()).await;
        session = next;
        if let Some(reply) = reply {
            println!("bot [{}]> {}", session.mood().animation_name(), reply.text);
        }
    }

    Ok(())
}
