use galaxy_indiegala::galaxy::types::AuthOutcome;
use galaxy_indiegala::{Credentials, Host, Plugin, PluginConfig};
use std::fs::read;
use std::sync::Arc;

struct PrintingHost;

impl Host for PrintingHost {
    fn store_credentials(&self, credentials: &Credentials) {
        println!("Host asked to store cookies {:?}", credentials);
    }

    fn lost_authentication(&self) {
        println!("Host notified about lost authentication");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    // Cookies exported from a logged-in browser session, e.g. {"auth": "..."}
    let data = read(".indiegala.cookies").expect("Failed to load cookies");
    let cookies_str = String::from_utf8(data).expect("Failed to parse Utf-8 sequence");
    let credentials: Credentials = serde_json::from_str(&cookies_str)?;

    let plugin = Plugin::new(PluginConfig::default(), Arc::new(PrintingHost))?;
    match plugin.authenticate(Some(credentials)).await? {
        AuthOutcome::Authenticated(auth) => println!("Logged in as {}", auth.user_name()),
        AuthOutcome::NextStep(step) => {
            println!(
                "Session rejected, log in again at {}",
                step.auth_params().start_uri()
            );
            return Ok(());
        }
    }

    let games = plugin.get_owned_games().await?;
    println!("Got {} owned games", games.len());
    for game in &games {
        println!("{}\t{}", game.game_id(), game.game_title());
    }
    Ok(())
}
