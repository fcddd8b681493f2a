use counted_cache::{config::Config, redis_store, Cache};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("fail to load config: {err:#}");
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(config).await {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let value = std::env::args().nth(1).unwrap_or_else(|| "hello".to_string());

    let conn = redis_store::connect(&config.redis_addr).await?;
    let mut cache = if config.flush_on_start {
        Cache::with_flush(conn).await?
    } else {
        Cache::new(conn)
    };

    let key = cache.store(value).await?;
    let stored = cache.get_str(&key).await?;
    let calls = cache.store_calls().await?;

    println!("key:   {key}");
    println!("value: {}", stored.as_deref().unwrap_or("<absent>"));
    println!("Cache.store calls: {calls}");

    Ok(())
}
