use tracing::Level;

#[rocket::main]
async fn main() {
    #[cfg(debug_assertions)]
    let level = Some(Level::DEBUG);
    #[cfg(not(debug_assertions))]
    let level = Some(Level::INFO);

    let r = match quizdeck::create(level) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Unable to set up server: {}", e);
            std::process::exit(1);
        }
    };

    match r.launch().await {
        Ok(_) => {}
        Err(e) => {
            tracing::error!("Error launching server: {}", e);
        }
    };
}
