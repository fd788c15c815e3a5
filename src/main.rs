use flockr::{AppResult, Config, Server};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
register <email> <password> <first> <last>
login <email> <password>
logout
create <name> [private]
join <channel>
send <channel> <text...>
messages <channel> [start]
prune <channel> <count>
kick <channel> <u_id>
profile [u_id]
quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = Server::new(config);
    let mut token = String::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{USAGE}");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        match run(&server, &mut token, line).await {
            Ok(Some(out)) => println!("{out}"),
            Ok(None) => println!("{USAGE}"),
            Err(e) => println!("error: {e}"),
        }
    }

    Ok(())
}

/// `Ok(None)` means the line did not parse.
async fn run(server: &Server, token: &mut String, line: &str) -> AppResult<Option<String>> {
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let out = match (cmd, args.as_slice()) {
        ("register", [email, password, first, last]) => {
            let auth = server.register(email, password, first, last).await?;
            *token = auth.token.clone();
            json(&auth)
        }
        ("login", [email, password]) => {
            let auth = server.login(email, password).await?;
            *token = auth.token.clone();
            json(&auth)
        }
        ("logout", []) => {
            let is_success = server.logout(token).await?;
            token.clear();
            json(&serde_json::json!({ "is_success": is_success }))
        }
        ("create", [name]) => json(&server.channels_create(token, name, true).await?),
        ("create", [name, "private"]) => json(&server.channels_create(token, name, false).await?),
        ("join", [channel]) => {
            let Ok(channel) = channel.parse() else { return Ok(None) };
            server.channel_join(token, channel).await?;
            json(&server.channel_details(token, channel).await?)
        }
        ("send", [channel, ..]) => {
            let Ok(channel) = channel.parse() else { return Ok(None) };
            let text = rest.trim_start().split_once(' ').map_or("", |(_, text)| text);
            json(&server.message_send(token, channel, text).await?)
        }
        ("messages", [channel, start @ ..]) => {
            let Ok(channel) = channel.parse() else { return Ok(None) };
            let start = match start {
                [] => 0,
                [start] => match start.parse() {
                    Ok(start) => start,
                    Err(_) => return Ok(None),
                },
                _ => return Ok(None),
            };
            json(&server.channel_messages(token, channel, start).await?)
        }
        ("prune", [channel, count]) => {
            let (Ok(channel), Ok(count)) = (channel.parse(), count.parse()) else { return Ok(None) };
            server.message_prune(token, channel, count).await?;
            json(&server.channel_messages(token, channel, 0).await?)
        }
        ("kick", [channel, u_id]) => {
            let (Ok(channel), Ok(u_id)) = (channel.parse(), u_id.parse()) else { return Ok(None) };
            server.channel_kick(token, channel, u_id).await?;
            json(&server.channel_details(token, channel).await?)
        }
        ("profile", []) => {
            let Some(me) = server.user_with_token(token).await else {
                return Err(flockr::AppError::access("Invalid token"));
            };
            json(&server.user_profile(token, me.u_id).await?)
        }
        ("profile", [u_id]) => {
            let Ok(u_id) = u_id.parse() else { return Ok(None) };
            json(&server.user_profile(token, u_id).await?)
        }
        _ => return Ok(None),
    };

    Ok(Some(out))
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("unprintable: {e}"))
}
